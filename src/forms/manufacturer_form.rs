// src/forms/manufacturer_form.rs
use serde::{Deserialize, Serialize};

use super::FieldErrors;
use crate::errors::TaxiResult;

/// Create/update form for a manufacturer.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ManufacturerForm {
    pub name: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanedManufacturer {
    pub name: String,
    pub country: String,
}

impl ManufacturerForm {
    pub fn clean(&self) -> TaxiResult<CleanedManufacturer> {
        let mut errors = FieldErrors::default();
        let name = errors.required("name", self.name.as_deref());
        let country = errors.required("country", self.country.as_deref());

        errors.finish(|| CleanedManufacturer {
            name: name.unwrap_or_default().to_string(),
            country: country.unwrap_or_default().to_string(),
        })
    }
}
