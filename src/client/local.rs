use async_trait::async_trait;

use crate::{
    error::AppError,
    models::ride::{NewRide, Ride},
    services::rides::RideService,
};

use super::{ClientError, RidesApi};

/// Calls the ride service in-process; used by the server-rendered board.
#[derive(Clone)]
pub struct LocalRidesApi {
    service: RideService,
}

impl LocalRidesApi {
    pub fn new(service: RideService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RidesApi for LocalRidesApi {
    async fn list_rides(&self) -> Result<Vec<Ride>, ClientError> {
        let rides = self.service.list().await.map_err(rejected)?;
        Ok(rides.into_iter().map(|listed| listed.ride).collect())
    }

    async fn create_ride(&self, ride: &NewRide) -> Result<Ride, ClientError> {
        self.service.create(ride.clone()).await.map_err(rejected)
    }
}

fn rejected(err: AppError) -> ClientError {
    ClientError::Rejected {
        status: err.status().as_u16(),
        message: err.to_string(),
    }
}
