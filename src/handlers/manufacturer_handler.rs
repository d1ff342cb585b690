// src/handlers/manufacturer_handler.rs
use axum::{
    Json,
    extract::{Path, Query, State},
    response::Response,
};
use axum_extra::extract::Form;

use super::{SharedState, found};
use crate::{
    errors::TaxiResult,
    forms::{ManufacturerForm, ManufacturerSearchForm},
    models::ManufacturerResponse,
    services::ManufacturerOperations,
};

const LIST_URL: &str = "/manufacturers";

pub async fn list_manufacturers(
    State(state): State<SharedState>,
    Query(search): Query<ManufacturerSearchForm>,
) -> TaxiResult<Json<Vec<ManufacturerResponse>>> {
    Ok(Json(state.manufacturer_service.list_manufacturers(search).await?))
}

pub async fn create_manufacturer(
    State(state): State<SharedState>,
    Form(form): Form<ManufacturerForm>,
) -> TaxiResult<Response> {
    state.manufacturer_service.create_manufacturer(form).await?;
    Ok(found(LIST_URL))
}

pub async fn update_manufacturer(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Form(form): Form<ManufacturerForm>,
) -> TaxiResult<Response> {
    state.manufacturer_service.update_manufacturer(&id, form).await?;
    Ok(found(LIST_URL))
}

pub async fn delete_manufacturer(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> TaxiResult<Response> {
    state.manufacturer_service.delete_manufacturer(&id).await?;
    Ok(found(LIST_URL))
}
