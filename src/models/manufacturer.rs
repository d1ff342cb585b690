// src/models/manufacturer.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Manufacturer {
    pub id: String,
    pub name: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Manufacturer {
    /// Builds an unsaved manufacturer; the store assigns the id.
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            name: name.into(),
            country: country.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Natural ordering of the manufacturer collection: by name, then country, then id.
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.country.cmp(&other.country))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl fmt::Display for Manufacturer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.country)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ManufacturerResponse {
    pub id: String,
    pub name: String,
    pub country: String,
    pub display: String,
}

impl From<Manufacturer> for ManufacturerResponse {
    fn from(manufacturer: Manufacturer) -> Self {
        Self {
            display: manufacturer.to_string(),
            id: manufacturer.id,
            name: manufacturer.name,
            country: manufacturer.country,
        }
    }
}
