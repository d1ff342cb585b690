// src/forms/mod.rs
//! Form checkers. Each form holds raw, optional field values as submitted and
//! `clean`s them into a validated value or a list of per-field errors.

pub mod car_form;
pub mod driver_form;
pub mod license;
pub mod manufacturer_form;
pub mod search;

pub use car_form::{CarForm, CleanedCar};
pub use driver_form::{CleanedDriver, DriverCreationForm, DriverLicenseUpdateForm};
pub use license::{LicenseNumberError, validate_license_number};
pub use manufacturer_form::{CleanedManufacturer, ManufacturerForm};
pub use search::{CarSearchForm, DriverSearchForm, ManufacturerSearchForm};

use crate::errors::{TaxiError, TaxiResult, ValidationError};

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const INVALID_CHOICE_MESSAGE: &str = "Select a valid choice. That choice is not one of the available choices.";

/// Read access the form checkers need to resolve references and uniqueness.
pub trait FleetLookup {
    fn manufacturer_exists(&self, id: &str) -> bool;
    fn driver_exists(&self, id: &str) -> bool;
    /// Id of the driver holding `username`, if any.
    fn driver_id_by_username(&self, username: &str) -> Option<&str>;
    /// Id of the driver holding `license_number`, if any.
    fn driver_id_by_license(&self, license_number: &str) -> Option<&str>;
}

/// Accumulates field errors across a whole form.
#[derive(Debug, Default)]
pub(crate) struct FieldErrors(Vec<ValidationError>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(ValidationError::new(field, message));
    }

    /// Returns the value with surrounding whitespace stripped, or records a
    /// "required" error when nothing is left.
    pub fn required<'a>(&mut self, field: &str, value: Option<&'a str>) -> Option<&'a str> {
        self.required_raw(field, value).map(str::trim)
    }

    /// Like [`FieldErrors::required`], but hands back the value exactly as submitted.
    pub fn required_raw<'a>(&mut self, field: &str, value: Option<&'a str>) -> Option<&'a str> {
        match value {
            Some(v) if !v.trim().is_empty() => Some(v),
            _ => {
                self.add(field, REQUIRED_MESSAGE);
                None
            }
        }
    }

    pub fn finish<T>(self, value: impl FnOnce() -> T) -> TaxiResult<T> {
        if self.0.is_empty() {
            Ok(value())
        } else {
            tracing::warn!("Form rejected: {:?}", self.0);
            Err(TaxiError::ValidationFailed(self.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_strips_whitespace() {
        let mut errors = FieldErrors::default();
        assert_eq!(errors.required("name", Some("  Toyota ")), Some("Toyota"));
        assert_eq!(errors.required("name", Some(" \t")), None);
        assert_eq!(errors.required("country", None), None);
        assert_eq!(errors.0.len(), 2);
    }

    #[test]
    fn test_required_raw_keeps_value() {
        let mut errors = FieldErrors::default();
        assert_eq!(errors.required_raw("password1", Some(" secret ")), Some(" secret "));
        assert_eq!(errors.required_raw("password1", Some("")), None);
        assert_eq!(errors.0.len(), 1);
    }
}
