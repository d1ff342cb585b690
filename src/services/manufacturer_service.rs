// src/services/manufacturer_service.rs
use async_trait::async_trait;
use std::sync::Arc;
use tracing;

use crate::{
    errors::TaxiError as AppError,
    forms::{ManufacturerForm, ManufacturerSearchForm},
    models::manufacturer::{Manufacturer, ManufacturerResponse},
    services::store::FleetStore,
};

#[async_trait]
pub trait ManufacturerOperations: Send + Sync {
    async fn create_manufacturer(&self, form: ManufacturerForm) -> Result<ManufacturerResponse, AppError>;
    async fn list_manufacturers(&self, search: ManufacturerSearchForm) -> Result<Vec<ManufacturerResponse>, AppError>;
    async fn update_manufacturer(&self, manufacturer_id: &str, form: ManufacturerForm) -> Result<ManufacturerResponse, AppError>;
    async fn delete_manufacturer(&self, manufacturer_id: &str) -> Result<(), AppError>;
}

pub struct ManufacturerService {
    store: Arc<FleetStore>,
}

impl ManufacturerService {
    pub fn new(store: Arc<FleetStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ManufacturerOperations for ManufacturerService {
    async fn create_manufacturer(&self, form: ManufacturerForm) -> Result<ManufacturerResponse, AppError> {
        let cleaned = form.clean()?;
        let manufacturer = self
            .store
            .write()
            .await
            .insert_manufacturer(Manufacturer::new(cleaned.name, cleaned.country));

        tracing::info!("Manufacturer created: {} ({})", manufacturer.id, manufacturer);
        Ok(manufacturer.into())
    }

    async fn list_manufacturers(&self, search: ManufacturerSearchForm) -> Result<Vec<ManufacturerResponse>, AppError> {
        tracing::debug!("Listing manufacturers, name filter: {:?}", search.name);
        let tables = self.store.read().await;
        Ok(tables
            .manufacturers()
            .into_iter()
            .filter(|m| search.matches(&m.name))
            .map(|m| m.clone().into())
            .collect())
    }

    async fn update_manufacturer(&self, manufacturer_id: &str, form: ManufacturerForm) -> Result<ManufacturerResponse, AppError> {
        let mut tables = self.store.write().await;
        if tables.manufacturer(manufacturer_id).is_none() {
            return Err(AppError::manufacturer_not_found(manufacturer_id));
        }
        let cleaned = form.clean()?;
        let manufacturer = tables.update_manufacturer(manufacturer_id, cleaned.name, cleaned.country)?;

        tracing::info!("Manufacturer updated: {}", manufacturer.id);
        Ok(manufacturer.into())
    }

    async fn delete_manufacturer(&self, manufacturer_id: &str) -> Result<(), AppError> {
        let removed_cars = self.store.write().await.delete_manufacturer(manufacturer_id)?;
        tracing::info!(
            "Manufacturer deleted: {} (cascaded to {} cars)",
            manufacturer_id,
            removed_cars.len()
        );
        Ok(())
    }
}
