// src/handlers/mod.rs
pub mod car_handler;
pub mod driver_handler;
pub mod manufacturer_handler;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{errors::TaxiError, state::AppState};

pub type SharedState = Arc<AppState>;

/// 302 redirect issued after a successful write.
pub(crate) fn found(location: impl Into<String>) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.into())]).into_response()
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct IndexResponse {
    pub num_drivers: usize,
    pub num_cars: usize,
    pub num_manufacturers: usize,
}

pub async fn index(State(state): State<SharedState>) -> Json<IndexResponse> {
    let (num_drivers, num_cars, num_manufacturers) = state.store.read().await.counts();
    Json(IndexResponse {
        num_drivers,
        num_cars,
        num_manufacturers,
    })
}

async fn route_not_found(uri: Uri) -> TaxiError {
    TaxiError::not_found(uri.path().to_string())
}

pub fn create_app(state: SharedState) -> Router {
    let cors = if state.config.cors_allow_any {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    Router::new()
        .route("/", get(index))
        .route("/manufacturers", get(manufacturer_handler::list_manufacturers))
        .route("/manufacturers/create", post(manufacturer_handler::create_manufacturer))
        .route("/manufacturers/:id/update", post(manufacturer_handler::update_manufacturer))
        .route("/manufacturers/:id/delete", post(manufacturer_handler::delete_manufacturer))
        .route("/cars", get(car_handler::list_cars))
        .route("/cars/create", post(car_handler::create_car))
        .route("/cars/:id", get(car_handler::get_car))
        .route("/cars/:id/update", post(car_handler::update_car))
        .route("/cars/:id/delete", post(car_handler::delete_car))
        .route("/cars/:id/drivers/:driver_id/assign", post(car_handler::assign_driver))
        .route("/cars/:id/drivers/:driver_id/unassign", post(car_handler::unassign_driver))
        .route("/drivers", get(driver_handler::list_drivers))
        .route("/drivers/create", post(driver_handler::create_driver))
        .route("/drivers/:id", get(driver_handler::get_driver))
        .route("/drivers/:id/update", post(driver_handler::update_driver_license))
        .route("/drivers/:id/delete", post(driver_handler::delete_driver))
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
