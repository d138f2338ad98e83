use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;

use crate::models::ride::{CreatedRide, NewRide, Ride};

use super::{ClientError, RidesApi};

const RIDES_PATH: &str = "/api/rides";

/// Talks to a running server over HTTP.
#[derive(Clone)]
pub struct HttpRidesApi {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpRidesApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn rides_url(&self) -> String {
        format!("{}{RIDES_PATH}", self.base_url)
    }
}

#[async_trait]
impl RidesApi for HttpRidesApi {
    async fn list_rides(&self) -> Result<Vec<Ride>, ClientError> {
        let response = self.client.get(self.rides_url()).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    async fn create_ride(&self, ride: &NewRide) -> Result<Ride, ClientError> {
        let response = self
            .client
            .post(self.rides_url())
            .json(ride)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let created: CreatedRide = response.json().await?;
        Ok(created.ride)
    }
}

async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|body| body.error)
        .unwrap_or(body);
    Err(ClientError::Rejected {
        status: status.as_u16(),
        message,
    })
}
