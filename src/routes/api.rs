use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::error;

use crate::{
    error::AppError,
    models::ride::{CreatedRide, NewRide, RideWithDriver},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/rides", get(list_rides).post(create_ride))
}

async fn create_ride(
    State(state): State<AppState>,
    payload: Result<Json<NewRide>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedRide>), AppError> {
    let Json(input) = payload.map_err(|rejection| {
        error!("unreadable ride payload: {rejection}");
        AppError::MalformedBody(rejection.body_text())
    })?;
    let ride = state.rides.create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedRide {
            success: true,
            ride,
        }),
    ))
}

async fn list_rides(State(state): State<AppState>) -> Result<Json<Vec<RideWithDriver>>, AppError> {
    Ok(Json(state.rides.list().await?))
}
