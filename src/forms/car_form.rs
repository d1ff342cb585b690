// src/forms/car_form.rs
use serde::{Deserialize, Serialize};

use super::{FieldErrors, FleetLookup, INVALID_CHOICE_MESSAGE};
use crate::errors::TaxiResult;

/// Create/update form for a car. `drivers` may repeat in the request body.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CarForm {
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub drivers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanedCar {
    pub model: String,
    pub manufacturer_id: String,
    /// Resolved driver ids, deduplicated, in submission order.
    pub driver_ids: Vec<String>,
}

impl CarForm {
    pub fn clean(&self, lookup: &impl FleetLookup) -> TaxiResult<CleanedCar> {
        let mut errors = FieldErrors::default();
        let model = errors.required("model", self.model.as_deref());

        let manufacturer = errors.required("manufacturer", self.manufacturer.as_deref());
        if let Some(id) = manufacturer {
            if !lookup.manufacturer_exists(id) {
                errors.add("manufacturer", INVALID_CHOICE_MESSAGE);
            }
        }

        let mut driver_ids: Vec<String> = Vec::with_capacity(self.drivers.len());
        for id in &self.drivers {
            if !lookup.driver_exists(id) {
                errors.add("drivers", format!("Select a valid choice. {} is not one of the available choices.", id));
            } else if !driver_ids.contains(id) {
                driver_ids.push(id.clone());
            }
        }

        errors.finish(|| CleanedCar {
            model: model.unwrap_or_default().to_string(),
            manufacturer_id: manufacturer.unwrap_or_default().to_string(),
            driver_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::fixtures::StaticLookup;

    fn lookup() -> StaticLookup {
        StaticLookup {
            manufacturers: vec!["mfr-231207-toyot".into()],
            drivers: vec![
                ("drv-231207-aaaaa".into(), "driver1".into(), "ABC12345".into()),
                ("drv-231207-bbbbb".into(), "driver2".into(), "XYZ67890".into()),
            ],
        }
    }

    #[test]
    fn test_car_form_valid() {
        let form = CarForm {
            model: Some("Camry".into()),
            manufacturer: Some("mfr-231207-toyot".into()),
            drivers: vec!["drv-231207-aaaaa".into()],
        };
        let cleaned = form.clean(&lookup()).unwrap();
        assert_eq!(cleaned.model, "Camry");
        assert_eq!(cleaned.manufacturer_id, "mfr-231207-toyot");
        assert_eq!(cleaned.driver_ids, vec!["drv-231207-aaaaa".to_string()]);
    }

    #[test]
    fn test_car_form_without_drivers_is_valid() {
        let form = CarForm {
            model: Some("Corolla".into()),
            manufacturer: Some("mfr-231207-toyot".into()),
            drivers: vec![],
        };
        assert!(form.clean(&lookup()).unwrap().driver_ids.is_empty());
    }

    #[test]
    fn test_car_form_invalid() {
        let err = CarForm::default().clean(&lookup()).unwrap_err();
        assert!(err.has_field_error("model"));
        assert!(err.has_field_error("manufacturer"));
    }

    #[test]
    fn test_unknown_references() {
        let form = CarForm {
            model: Some("Camry".into()),
            manufacturer: Some("mfr-231207-nopee".into()),
            drivers: vec!["drv-231207-aaaaa".into(), "drv-231207-ghost".into()],
        };
        let err = form.clean(&lookup()).unwrap_err();
        assert!(err.has_field_error("manufacturer"));
        assert!(err.has_field_error("drivers"));
        assert!(!err.has_field_error("model"));
    }

    #[test]
    fn test_duplicate_drivers_collapse() {
        let form = CarForm {
            model: Some("Camry".into()),
            manufacturer: Some("mfr-231207-toyot".into()),
            drivers: vec![
                "drv-231207-bbbbb".into(),
                "drv-231207-aaaaa".into(),
                "drv-231207-bbbbb".into(),
            ],
        };
        let cleaned = form.clean(&lookup()).unwrap();
        assert_eq!(cleaned.driver_ids, vec!["drv-231207-bbbbb".to_string(), "drv-231207-aaaaa".to_string()]);
    }

    #[test]
    fn test_model_is_stripped() {
        let form = CarForm {
            model: Some(" Camry  ".into()),
            manufacturer: Some("mfr-231207-toyot".into()),
            drivers: vec![],
        };
        assert_eq!(form.clean(&lookup()).unwrap().model, "Camry");
    }
}
