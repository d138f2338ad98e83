use askama_axum::IntoResponse as AskamaTemplateResponse;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};

use crate::{
    client::{LocalRidesApi, RideBoard, RideForm},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(landing))
        .route("/rides", get(rides_page).post(rides_submit))
}

async fn landing() -> Redirect {
    Redirect::to("/rides")
}

async fn rides_page(State(state): State<AppState>) -> Response {
    let mut board = RideBoard::new(LocalRidesApi::new(state.rides.clone()));
    board.mount().await;
    AskamaTemplateResponse::into_response(board.page())
}

async fn rides_submit(State(state): State<AppState>, Form(form): Form<RideForm>) -> Response {
    let mut board = RideBoard::new(LocalRidesApi::new(state.rides.clone()));
    board.mount().await;
    board.replace_form(form);
    let status = match board.submit().await {
        Ok(_) => StatusCode::CREATED,
        Err(_) => StatusCode::BAD_REQUEST,
    };
    (status, AskamaTemplateResponse::into_response(board.page())).into_response()
}
