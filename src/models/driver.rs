// src/models/driver.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::car::CarResponse;

/// A user account extended with a license number.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Driver {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String, // "{salt}${hex sha256}", never sent to clients
    pub license_number: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.username, self.first_name, self.last_name)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DriverResponse {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub license_number: String,
    pub display: String,
}

impl From<&Driver> for DriverResponse {
    fn from(driver: &Driver) -> Self {
        Self {
            id: driver.id.clone(),
            username: driver.username.clone(),
            first_name: driver.first_name.clone(),
            last_name: driver.last_name.clone(),
            license_number: driver.license_number.clone(),
            display: driver.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DriverDetailResponse {
    #[serde(flatten)]
    pub driver: DriverResponse,
    pub cars: Vec<CarResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_driver() -> Driver {
        Driver {
            id: "drv-231207-a1b2c".to_string(),
            username: "driver1".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            password_hash: "salt$hash".to_string(),
            license_number: "ABC12345".to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(sample_driver().to_string(), "driver1 (John Doe)");
    }

    #[test]
    fn test_response_hides_password_hash() {
        let response = DriverResponse::from(&sample_driver());
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("password"));
        assert_eq!(response.display, "driver1 (John Doe)");
    }
}
