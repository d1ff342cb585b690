// src/state.rs
use std::sync::Arc;

use crate::{
    errors::{TaxiError, TaxiResult},
    services::{CarService, DriverService, FleetStore, ManufacturerService},
};

pub struct AppState {
    pub manufacturer_service: Arc<ManufacturerService>,
    pub car_service: Arc<CarService>,
    pub driver_service: Arc<DriverService>,
    pub store: Arc<FleetStore>,
    pub config: AppConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub password_min_length: usize,
    pub cors_allow_any: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            password_min_length: 8,
            cors_allow_any: true,
        }
    }
}

impl AppConfig {
    /// Reads `TAXI_*` variables, falling back to the defaults for unset ones.
    pub fn from_env() -> TaxiResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> TaxiResult<Self> {
        let mut config = Self::default();

        if let Some(addr) = lookup("TAXI_BIND_ADDR") {
            if addr.trim().is_empty() {
                return Err(TaxiError::InvalidConfiguration("TAXI_BIND_ADDR is empty".to_string()));
            }
            config.bind_addr = addr;
        }

        if let Some(raw) = lookup("TAXI_PASSWORD_MIN_LENGTH") {
            config.password_min_length = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    TaxiError::InvalidConfiguration(format!(
                        "TAXI_PASSWORD_MIN_LENGTH must be a positive integer, got '{}'",
                        raw
                    ))
                })?;
        }

        if let Some(raw) = lookup("TAXI_CORS_ALLOW_ANY") {
            config.cors_allow_any = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(TaxiError::InvalidConfiguration(format!(
                        "TAXI_CORS_ALLOW_ANY must be a boolean, got '{}'",
                        raw
                    )));
                }
            };
        }

        Ok(config)
    }
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let store = Arc::new(FleetStore::new());
        let manufacturer_service = Arc::new(ManufacturerService::new(store.clone()));
        let car_service = Arc::new(CarService::new(store.clone()));
        let driver_service = Arc::new(DriverService::new(store.clone(), config.password_min_length));

        Self {
            manufacturer_service,
            car_service,
            driver_service,
            store,
            config,
        }
    }
}
