// src/models/car.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{driver::DriverResponse, manufacturer::ManufacturerResponse};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Car {
    pub id: String,
    pub model: String,
    pub manufacturer_id: String, // Owning manufacturer, cascades on delete
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Car {
    pub fn new(model: impl Into<String>, manufacturer_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            model: model.into(),
            manufacturer_id: manufacturer_id.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.model)
    }
}

/// List entry for a car.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CarResponse {
    pub id: String,
    pub model: String,
    pub manufacturer: ManufacturerResponse,
    pub display: String,
}

/// Car with its manufacturer and assigned drivers.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CarDetailResponse {
    pub id: String,
    pub model: String,
    pub manufacturer: ManufacturerResponse,
    pub drivers: Vec<DriverResponse>,
    pub display: String,
}
