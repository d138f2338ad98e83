//! Ride board UI: a headless form + list state machine and the transports it
//! can talk through.

pub mod board;
pub mod http;
pub mod local;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::ride::{NewRide, Ride};

pub use board::{FormField, LoadState, Notification, NotificationKind, RideBoard, RideForm};
pub use http::HttpRidesApi;
pub use local::LocalRidesApi;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Network(#[from] reqwest::Error),
    #[error("request failed with status {status}: {message}")]
    Rejected { status: u16, message: String },
}

#[async_trait]
pub trait RidesApi: Send + Sync {
    async fn list_rides(&self) -> Result<Vec<Ride>, ClientError>;
    async fn create_ride(&self, ride: &NewRide) -> Result<Ride, ClientError>;
}
