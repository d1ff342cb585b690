// src/forms/license.rs
use thiserror::Error;

pub const LICENSE_NUMBER_LEN: usize = 8;
const LETTER_PREFIX_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LicenseNumberError {
    #[error("License number should consist of 8 characters")]
    WrongLength,

    #[error("First 3 characters should be uppercase letters")]
    InvalidLetters,

    #[error("Last 5 characters should be digits")]
    InvalidDigits,
}

/// Checks a license number against `[A-Z]{3}[0-9]{5}` and hands it back untouched.
///
/// Rules run in order (length, letter prefix, digit suffix) and the first
/// one that fails is reported. No trimming or case folding happens here.
pub fn validate_license_number(candidate: &str) -> Result<&str, LicenseNumberError> {
    if candidate.chars().count() != LICENSE_NUMBER_LEN {
        return Err(LicenseNumberError::WrongLength);
    }

    let mut chars = candidate.chars();
    if !chars.by_ref().take(LETTER_PREFIX_LEN).all(|c| c.is_ascii_uppercase()) {
        return Err(LicenseNumberError::InvalidLetters);
    }
    if !chars.all(|c| c.is_ascii_digit()) {
        return Err(LicenseNumberError::InvalidDigits);
    }

    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_license_is_returned_unchanged() {
        assert_eq!(validate_license_number("ABC12345"), Ok("ABC12345"));
        assert_eq!(validate_license_number("XYZ67890"), Ok("XYZ67890"));
    }

    #[test]
    fn test_wrong_length() {
        assert_eq!(validate_license_number("ABC123"), Err(LicenseNumberError::WrongLength));
        assert_eq!(validate_license_number(""), Err(LicenseNumberError::WrongLength));
        assert_eq!(validate_license_number("ABC123456"), Err(LicenseNumberError::WrongLength));
    }

    #[test]
    fn test_lowercase_letters() {
        assert_eq!(validate_license_number("abc12345"), Err(LicenseNumberError::InvalidLetters));
        assert_eq!(validate_license_number("AB112345"), Err(LicenseNumberError::InvalidLetters));
    }

    #[test]
    fn test_non_digit_in_digit_segment() {
        assert_eq!(validate_license_number("ABC12A45"), Err(LicenseNumberError::InvalidDigits));
    }

    #[test]
    fn test_no_trimming_or_case_folding() {
        assert_eq!(validate_license_number(" ABC1234"), Err(LicenseNumberError::InvalidLetters));
        assert_eq!(validate_license_number("ABC12345 "), Err(LicenseNumberError::WrongLength));
        assert_eq!(validate_license_number("Abc12345"), Err(LicenseNumberError::InvalidLetters));
    }

    #[test]
    fn test_non_ascii_of_correct_length() {
        assert_eq!(validate_license_number("ÄBC12345"), Err(LicenseNumberError::InvalidLetters));
        assert_eq!(validate_license_number("ABC1234٣"), Err(LicenseNumberError::InvalidDigits));
    }

    #[test]
    fn test_rule_order_reports_length_first() {
        assert_eq!(validate_license_number("abc"), Err(LicenseNumberError::WrongLength));
    }

    #[test]
    fn test_every_matching_string_is_accepted() {
        // Every letter in every prefix slot crossed with every digit in every suffix slot.
        for letter_pos in 0..LETTER_PREFIX_LEN {
            for letter in 'A'..='Z' {
                for digit_pos in LETTER_PREFIX_LEN..LICENSE_NUMBER_LEN {
                    for digit in '0'..='9' {
                        let mut chars = ['M', 'N', 'O', '1', '2', '3', '4', '5'];
                        chars[letter_pos] = letter;
                        chars[digit_pos] = digit;
                        let sample: String = chars.iter().collect();

                        assert_eq!(validate_license_number(&sample), Ok(sample.as_str()));
                        // Idempotent: feeding the output back in gives the same answer.
                        let again = validate_license_number(&sample).unwrap();
                        assert_eq!(validate_license_number(again), Ok(sample.as_str()));
                    }
                }
            }
        }
    }

    #[test]
    fn test_every_misplaced_character_is_rejected() {
        for pos in 0..LICENSE_NUMBER_LEN {
            for c in ['a', 'z', '0', '9', 'A', 'Z', ' ', '-'] {
                let mut chars = ['A', 'B', 'C', '1', '2', '3', '4', '5'];
                chars[pos] = c;
                let sample: String = chars.iter().collect();
                let fits = if pos < LETTER_PREFIX_LEN {
                    c.is_ascii_uppercase()
                } else {
                    c.is_ascii_digit()
                };
                let expected = match (fits, pos < LETTER_PREFIX_LEN) {
                    (true, _) => Ok(sample.as_str()),
                    (false, true) => Err(LicenseNumberError::InvalidLetters),
                    (false, false) => Err(LicenseNumberError::InvalidDigits),
                };
                assert_eq!(validate_license_number(&sample), expected, "sample {:?}", sample);
            }
        }
    }
}
