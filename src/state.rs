use crate::{
    db::DbPool,
    services::{ride_store::RideStore, rides::RideService},
};

#[derive(Clone)]
pub struct AppState {
    pub rides: RideService,
}

impl AppState {
    pub fn new(db: DbPool) -> Self {
        let rides = RideService::new(RideStore::new(db));
        Self { rides }
    }
}
