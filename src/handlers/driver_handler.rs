// src/handlers/driver_handler.rs
use axum::{
    Json,
    extract::{Path, Query, State},
    response::Response,
};
use axum_extra::extract::Form;

use super::{SharedState, found};
use crate::{
    errors::{TaxiError, TaxiResult},
    forms::{DriverCreationForm, DriverLicenseUpdateForm, DriverSearchForm},
    models::{DriverDetailResponse, DriverResponse},
    services::DriverOperations,
};

fn detail_url(id: &str) -> String {
    format!("/drivers/{}", id)
}

pub async fn list_drivers(
    State(state): State<SharedState>,
    Query(search): Query<DriverSearchForm>,
) -> TaxiResult<Json<Vec<DriverResponse>>> {
    Ok(Json(state.driver_service.list_drivers(search).await?))
}

pub async fn get_driver(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> TaxiResult<Json<DriverDetailResponse>> {
    state
        .driver_service
        .get_driver(&id)
        .await?
        .map(Json)
        .ok_or_else(|| TaxiError::driver_not_found(id))
}

pub async fn create_driver(
    State(state): State<SharedState>,
    Form(form): Form<DriverCreationForm>,
) -> TaxiResult<Response> {
    let driver = state.driver_service.register_driver(form).await?;
    Ok(found(detail_url(&driver.id)))
}

pub async fn update_driver_license(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Form(form): Form<DriverLicenseUpdateForm>,
) -> TaxiResult<Response> {
    let driver = state.driver_service.update_license(&id, form).await?;
    Ok(found(detail_url(&driver.id)))
}

pub async fn delete_driver(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> TaxiResult<Response> {
    state.driver_service.delete_driver(&id).await?;
    Ok(found("/drivers"))
}
