// src/handlers/car_handler.rs
use axum::{
    Json,
    extract::{Path, Query, State},
    response::Response,
};
use axum_extra::extract::Form;

use super::{SharedState, found};
use crate::{
    errors::{TaxiError, TaxiResult},
    forms::{CarForm, CarSearchForm},
    models::{CarDetailResponse, CarResponse},
    services::CarOperations,
};

const LIST_URL: &str = "/cars";

fn detail_url(id: &str) -> String {
    format!("/cars/{}", id)
}

pub async fn list_cars(
    State(state): State<SharedState>,
    Query(search): Query<CarSearchForm>,
) -> TaxiResult<Json<Vec<CarResponse>>> {
    Ok(Json(state.car_service.list_cars(search).await?))
}

pub async fn get_car(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> TaxiResult<Json<CarDetailResponse>> {
    state
        .car_service
        .get_car(&id)
        .await?
        .map(Json)
        .ok_or_else(|| TaxiError::car_not_found(id))
}

pub async fn create_car(
    State(state): State<SharedState>,
    Form(form): Form<CarForm>,
) -> TaxiResult<Response> {
    state.car_service.create_car(form).await?;
    Ok(found(LIST_URL))
}

pub async fn update_car(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Form(form): Form<CarForm>,
) -> TaxiResult<Response> {
    let car = state.car_service.update_car(&id, form).await?;
    Ok(found(detail_url(&car.id)))
}

pub async fn delete_car(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> TaxiResult<Response> {
    state.car_service.delete_car(&id).await?;
    Ok(found(LIST_URL))
}

pub async fn assign_driver(
    State(state): State<SharedState>,
    Path((id, driver_id)): Path<(String, String)>,
) -> TaxiResult<Response> {
    state.car_service.assign_driver(&id, &driver_id).await?;
    Ok(found(detail_url(&id)))
}

pub async fn unassign_driver(
    State(state): State<SharedState>,
    Path((id, driver_id)): Path<(String, String)>,
) -> TaxiResult<Response> {
    state.car_service.unassign_driver(&id, &driver_id).await?;
    Ok(found(detail_url(&id)))
}
