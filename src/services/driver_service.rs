// src/services/driver_service.rs
use async_trait::async_trait;
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing;

use crate::{
    errors::TaxiError as AppError,
    forms::{DriverCreationForm, DriverLicenseUpdateForm, DriverSearchForm},
    models::driver::{Driver, DriverDetailResponse, DriverResponse},
    services::{car_service::car_response, store::FleetStore},
    utils::id_generator::{IdGenerator, IdType},
};

#[async_trait]
pub trait DriverOperations: Send + Sync {
    async fn register_driver(&self, form: DriverCreationForm) -> Result<DriverResponse, AppError>;
    async fn get_driver(&self, driver_id: &str) -> Result<Option<DriverDetailResponse>, AppError>;
    async fn list_drivers(&self, search: DriverSearchForm) -> Result<Vec<DriverResponse>, AppError>;
    async fn update_license(&self, driver_id: &str, form: DriverLicenseUpdateForm) -> Result<DriverResponse, AppError>;
    async fn delete_driver(&self, driver_id: &str) -> Result<(), AppError>;
}

pub struct DriverService {
    store: Arc<FleetStore>,
    password_min_length: usize,
}

impl DriverService {
    pub fn new(store: Arc<FleetStore>, password_min_length: usize) -> Self {
        Self { store, password_min_length }
    }

    fn hash_password(password: &str) -> String {
        let salt = uuid::Uuid::new_v4().simple().to_string();
        format!("{}${}", salt, Self::digest(&salt, password))
    }

    fn digest(salt: &str, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(password.as_bytes());
        hasher
            .finalize()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }
}

#[async_trait]
impl DriverOperations for DriverService {
    async fn register_driver(&self, form: DriverCreationForm) -> Result<DriverResponse, AppError> {
        let mut tables = self.store.write().await;
        let cleaned = form.clean(&*tables, self.password_min_length)?;

        tracing::info!("Registering driver: {}", cleaned.username);

        let now = Utc::now();
        let driver = tables.insert_driver(Driver {
            id: String::new(), // Assigned by the store
            username: cleaned.username,
            first_name: cleaned.first_name,
            last_name: cleaned.last_name,
            password_hash: Self::hash_password(&cleaned.password),
            license_number: cleaned.license_number,
            is_active: true,
            created_at: now,
            updated_at: now,
        })?;

        tracing::info!("Driver registered successfully: {}", driver.id);
        Ok(DriverResponse::from(&driver))
    }

    async fn get_driver(&self, driver_id: &str) -> Result<Option<DriverDetailResponse>, AppError> {
        if !IdGenerator::validate_id(driver_id, Some(IdType::Driver)) {
            tracing::warn!("Invalid driver ID format: {}", driver_id);
            return Ok(None);
        }

        tracing::debug!("Getting driver: {}", driver_id);
        let tables = self.store.read().await;
        let Some(driver) = tables.driver(driver_id) else {
            return Ok(None);
        };
        let cars = tables
            .cars_of_driver(driver_id)
            .into_iter()
            .map(|car| car_response(&tables, car))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(DriverDetailResponse {
            driver: DriverResponse::from(driver),
            cars,
        }))
    }

    async fn list_drivers(&self, search: DriverSearchForm) -> Result<Vec<DriverResponse>, AppError> {
        tracing::debug!("Listing drivers, username filter: {:?}", search.username);
        let tables = self.store.read().await;
        Ok(tables
            .drivers()
            .into_iter()
            .filter(|d| search.matches(&d.username))
            .map(DriverResponse::from)
            .collect())
    }

    async fn update_license(&self, driver_id: &str, form: DriverLicenseUpdateForm) -> Result<DriverResponse, AppError> {
        let mut tables = self.store.write().await;
        if tables.driver(driver_id).is_none() {
            return Err(AppError::driver_not_found(driver_id));
        }
        let license_number = form.clean(&*tables, driver_id)?;
        let driver = tables.update_driver_license(driver_id, license_number)?;

        tracing::info!("Driver {} license updated", driver.id);
        Ok(DriverResponse::from(&driver))
    }

    async fn delete_driver(&self, driver_id: &str) -> Result<(), AppError> {
        let driver = self.store.write().await.delete_driver(driver_id)?;
        tracing::info!("Driver deleted: {} ({})", driver.id, driver);
        Ok(())
    }
}
