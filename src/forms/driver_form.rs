// src/forms/driver_form.rs
use serde::{Deserialize, Serialize};

use super::{FieldErrors, FleetLookup, license::validate_license_number};
use crate::errors::TaxiResult;

const USERNAME_MAX_LEN: usize = 150;

/// Sign-up form for a new driver account.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DriverCreationForm {
    pub username: Option<String>,
    pub password1: Option<String>,
    pub password2: Option<String>,
    pub license_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanedDriver {
    pub username: String,
    /// Plain password; hashed by the driver service before it is stored.
    pub password: String,
    pub license_number: String,
    pub first_name: String,
    pub last_name: String,
}

impl DriverCreationForm {
    pub fn clean(&self, lookup: &impl FleetLookup, password_min_length: usize) -> TaxiResult<CleanedDriver> {
        let mut errors = FieldErrors::default();

        let username = errors.required("username", self.username.as_deref());
        if let Some(username) = username {
            if username.chars().count() > USERNAME_MAX_LEN
                || !username.chars().all(|c| c.is_alphanumeric() || "@.+-_".contains(c))
            {
                errors.add(
                    "username",
                    "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
                );
            } else if lookup.driver_id_by_username(username).is_some() {
                errors.add("username", "A user with that username already exists.");
            }
        }

        let password1 = errors.required_raw("password1", self.password1.as_deref());
        let password2 = errors.required_raw("password2", self.password2.as_deref());
        if let (Some(p1), Some(p2)) = (password1, password2) {
            if p1 != p2 {
                errors.add("password2", "The two password fields didn't match.");
            } else {
                check_password_strength(&mut errors, p2, password_min_length);
            }
        }

        let license_number = clean_license_number(&mut errors, lookup, self.license_number.as_deref(), None);

        errors.finish(|| CleanedDriver {
            username: username.unwrap_or_default().to_string(),
            password: password1.unwrap_or_default().to_string(),
            license_number: license_number.unwrap_or_default().to_string(),
            first_name: self.first_name.as_deref().unwrap_or_default().trim().to_string(),
            last_name: self.last_name.as_deref().unwrap_or_default().trim().to_string(),
        })
    }
}

/// Replaces the license number of an existing driver.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DriverLicenseUpdateForm {
    pub license_number: Option<String>,
}

impl DriverLicenseUpdateForm {
    /// Cleans the form for the driver `driver_id`; its own current number is not a clash.
    pub fn clean(&self, lookup: &impl FleetLookup, driver_id: &str) -> TaxiResult<String> {
        let mut errors = FieldErrors::default();
        let license_number =
            clean_license_number(&mut errors, lookup, self.license_number.as_deref(), Some(driver_id));
        errors.finish(|| license_number.unwrap_or_default().to_string())
    }
}

fn clean_license_number<'a>(
    errors: &mut FieldErrors,
    lookup: &impl FleetLookup,
    value: Option<&'a str>,
    owner_id: Option<&str>,
) -> Option<&'a str> {
    let value = errors.required_raw("license_number", value)?;
    match validate_license_number(value) {
        Err(e) => {
            errors.add("license_number", e.to_string());
            None
        }
        Ok(valid) => match lookup.driver_id_by_license(valid) {
            Some(holder) if Some(holder) != owner_id => {
                errors.add("license_number", "Driver with this license number already exists.");
                None
            }
            _ => Some(valid),
        },
    }
}

fn check_password_strength(errors: &mut FieldErrors, password: &str, min_length: usize) {
    if password.chars().count() < min_length {
        errors.add(
            "password2",
            format!("This password is too short. It must contain at least {} characters.", min_length),
        );
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        errors.add("password2", "This password is entirely numeric.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::fixtures::StaticLookup;

    fn lookup() -> StaticLookup {
        StaticLookup {
            manufacturers: vec![],
            drivers: vec![("drv-231207-aaaaa".into(), "driver1".into(), "ABC12345".into())],
        }
    }

    fn valid_form() -> DriverCreationForm {
        DriverCreationForm {
            username: Some("newdriver".into()),
            password1: Some("testpass123".into()),
            password2: Some("testpass123".into()),
            license_number: Some("DEF67890".into()),
            first_name: Some("New".into()),
            last_name: Some("Driver".into()),
        }
    }

    #[test]
    fn test_driver_creation_form_valid() {
        let cleaned = valid_form().clean(&lookup(), 8).unwrap();
        assert_eq!(cleaned.username, "newdriver");
        assert_eq!(cleaned.license_number, "DEF67890");
        assert_eq!(cleaned.first_name, "New");
        assert_eq!(cleaned.last_name, "Driver");
    }

    #[test]
    fn test_names_are_optional() {
        let form = DriverCreationForm {
            first_name: None,
            last_name: None,
            ..valid_form()
        };
        let cleaned = form.clean(&lookup(), 8).unwrap();
        assert_eq!(cleaned.first_name, "");
        assert_eq!(cleaned.last_name, "");
    }

    #[test]
    fn test_empty_form_is_invalid() {
        let err = DriverCreationForm::default().clean(&lookup(), 8).unwrap_err();
        for field in ["username", "password1", "password2", "license_number"] {
            assert!(err.has_field_error(field), "missing error for {}", field);
        }
    }

    #[test]
    fn test_invalid_license() {
        let form = DriverCreationForm {
            license_number: Some("abc12345".into()),
            ..valid_form()
        };
        let err = form.clean(&lookup(), 8).unwrap_err();
        assert_eq!(err.field_errors().len(), 1);
        assert_eq!(err.field_errors()[0].message, "First 3 characters should be uppercase letters");
    }

    #[test]
    fn test_password_mismatch() {
        let form = DriverCreationForm {
            password2: Some("otherpass123".into()),
            ..valid_form()
        };
        let err = form.clean(&lookup(), 8).unwrap_err();
        assert!(err.has_field_error("password2"));
    }

    #[test]
    fn test_weak_passwords() {
        let short = DriverCreationForm {
            password1: Some("abc12".into()),
            password2: Some("abc12".into()),
            ..valid_form()
        };
        assert!(short.clean(&lookup(), 8).unwrap_err().has_field_error("password2"));

        let numeric = DriverCreationForm {
            password1: Some("1234567890".into()),
            password2: Some("1234567890".into()),
            ..valid_form()
        };
        assert!(numeric.clean(&lookup(), 8).unwrap_err().has_field_error("password2"));
    }

    #[test]
    fn test_duplicate_username_and_license() {
        let form = DriverCreationForm {
            username: Some("driver1".into()),
            license_number: Some("ABC12345".into()),
            ..valid_form()
        };
        let err = form.clean(&lookup(), 8).unwrap_err();
        assert!(err.has_field_error("username"));
        assert!(err.has_field_error("license_number"));
    }

    #[test]
    fn test_bad_username_characters() {
        let form = DriverCreationForm {
            username: Some("new driver!".into()),
            ..valid_form()
        };
        assert!(form.clean(&lookup(), 8).unwrap_err().has_field_error("username"));
    }

    #[test]
    fn test_driver_license_update_form_valid() {
        let form = DriverLicenseUpdateForm {
            license_number: Some("XYZ67890".into()),
        };
        assert_eq!(form.clean(&lookup(), "drv-231207-aaaaa").unwrap(), "XYZ67890");
    }

    #[test]
    fn test_driver_license_update_form_invalid() {
        let form = DriverLicenseUpdateForm {
            license_number: Some("XYZ".into()),
        };
        let err = form.clean(&lookup(), "drv-231207-aaaaa").unwrap_err();
        assert!(err.has_field_error("license_number"));
    }

    #[test]
    fn test_license_update_keeping_own_number() {
        let form = DriverLicenseUpdateForm {
            license_number: Some("ABC12345".into()),
        };
        assert!(form.clean(&lookup(), "drv-231207-aaaaa").is_ok());
        assert!(form.clean(&lookup(), "drv-231207-zzzzz").is_err());
    }

    #[test]
    fn test_username_is_stripped_but_license_is_not() {
        let form = DriverCreationForm {
            username: Some("  newdriver ".into()),
            ..valid_form()
        };
        assert_eq!(form.clean(&lookup(), 8).unwrap().username, "newdriver");

        let taken = DriverCreationForm {
            username: Some(" driver1".into()),
            ..valid_form()
        };
        assert!(taken.clean(&lookup(), 8).unwrap_err().has_field_error("username"));

        let padded_license = DriverCreationForm {
            license_number: Some(" DEF67890".into()),
            ..valid_form()
        };
        let err = padded_license.clean(&lookup(), 8).unwrap_err();
        assert_eq!(err.field_errors()[0].message, "License number should consist of 8 characters");
    }

    #[test]
    fn test_password_is_kept_verbatim() {
        let form = DriverCreationForm {
            password1: Some(" testpass123 ".into()),
            password2: Some(" testpass123 ".into()),
            ..valid_form()
        };
        assert_eq!(form.clean(&lookup(), 8).unwrap().password, " testpass123 ");
    }
}
