use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::forms::license::LicenseNumberError;

/// Main error type for the taxi-fleet service
#[derive(Debug)]
pub enum TaxiError {
    // HTTP and API errors
    NotFound(String),
    InternalServer(String),

    // Business logic errors
    ManufacturerNotFound(String),
    CarNotFound(String),
    DriverNotFound(String),

    // Validation errors
    ValidationFailed(Vec<ValidationError>),

    // Configuration and setup errors
    InvalidConfiguration(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl fmt::Display for TaxiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            TaxiError::InternalServer(msg) => write!(f, "Internal server error: {}", msg),

            TaxiError::ManufacturerNotFound(id) => write!(f, "Manufacturer not found: {}", id),
            TaxiError::CarNotFound(id) => write!(f, "Car not found: {}", id),
            TaxiError::DriverNotFound(id) => write!(f, "Driver not found: {}", id),

            TaxiError::ValidationFailed(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }

            TaxiError::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for TaxiError {}

impl IntoResponse for TaxiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            TaxiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),

            TaxiError::ValidationFailed(errors) => {
                let details = serde_json::to_value(&errors).ok();
                (StatusCode::BAD_REQUEST, "validation_failed", "Validation errors occurred".to_string(), details)
            }

            TaxiError::ManufacturerNotFound(id) => (StatusCode::NOT_FOUND, "manufacturer_not_found", format!("Manufacturer not found: {}", id), None),
            TaxiError::CarNotFound(id) => (StatusCode::NOT_FOUND, "car_not_found", format!("Car not found: {}", id), None),
            TaxiError::DriverNotFound(id) => (StatusCode::NOT_FOUND, "driver_not_found", format!("Driver not found: {}", id), None),

            // All other errors are treated as internal server errors
            other => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", other.to_string(), None),
        };

        let error_response = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, axum::Json(error_response)).into_response()
    }
}

// Convenience type alias for Results
pub type TaxiResult<T> = Result<T, TaxiError>;

impl From<LicenseNumberError> for TaxiError {
    fn from(err: LicenseNumberError) -> Self {
        TaxiError::validation_error("license_number", err.to_string())
    }
}

// Helper functions for creating common errors
impl TaxiError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        TaxiError::NotFound(resource.into())
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        TaxiError::InternalServer(msg.into())
    }

    pub fn validation_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        TaxiError::ValidationFailed(vec![ValidationError::new(field, message)])
    }

    pub fn manufacturer_not_found(id: impl Into<String>) -> Self {
        TaxiError::ManufacturerNotFound(id.into())
    }

    pub fn car_not_found(id: impl Into<String>) -> Self {
        TaxiError::CarNotFound(id.into())
    }

    pub fn driver_not_found(id: impl Into<String>) -> Self {
        TaxiError::DriverNotFound(id.into())
    }

    /// Field errors carried by a validation failure, empty for every other kind.
    pub fn field_errors(&self) -> &[ValidationError] {
        match self {
            TaxiError::ValidationFailed(errors) => errors,
            _ => &[],
        }
    }

    /// True when `field` is among the reported field errors.
    pub fn has_field_error(&self, field: &str) -> bool {
        self.field_errors().iter().any(|e| e.field == field)
    }
}
