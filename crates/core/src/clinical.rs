//! Field constraints for staff accounts, patients and vital-sign records.
//!
//! The bounds mirror what the clinic front-end enforces on its forms so a
//! direct API caller cannot store values the UI would never produce.

use validator::{ValidateEmail, ValidateUrl};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Accepted values for `patients.sexe`.
pub const VALID_SEXES: &[&str] = &["M", "F"];

/// Accepted values for `patients.groupe_sanguin`.
pub const VALID_BLOOD_GROUPS: &[&str] = &["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

pub const MAX_AGE: i32 = 150;

/// Body temperature bounds in degrees Celsius.
pub const MIN_TEMPERATURE: f64 = 30.0;
pub const MAX_TEMPERATURE: f64 = 45.0;

/// Oxygen saturation is a percentage.
pub const MAX_SATURATION: i32 = 100;

/// Default minimum password length when none is configured.
pub const DEFAULT_PASSWORD_MIN_LENGTH: usize = 1;

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// Validate that a required text field is present and not blank.
pub fn validate_required(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), CoreError> {
    validate_required("email", email)?;
    if !email.to_string().validate_email() {
        return Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(())
}

/// Validate that a password meets the configured minimum length (in characters).
pub fn validate_password(password: &str, min_length: usize) -> Result<(), CoreError> {
    if password.is_empty() || password.chars().count() < min_length {
        return Err(CoreError::Validation(format!(
            "Password must be at least {} characters long",
            min_length.max(1)
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Patients
// ---------------------------------------------------------------------------

pub fn validate_age(age: Option<i32>) -> Result<(), CoreError> {
    match age {
        Some(a) if !(0..=MAX_AGE).contains(&a) => Err(CoreError::Validation(format!(
            "age must be between 0 and {MAX_AGE}, got {a}"
        ))),
        _ => Ok(()),
    }
}

pub fn validate_sexe(sexe: Option<&str>) -> Result<(), CoreError> {
    validate_one_of("sexe", sexe, VALID_SEXES)
}

pub fn validate_groupe_sanguin(groupe: Option<&str>) -> Result<(), CoreError> {
    validate_one_of("groupe_sanguin", groupe, VALID_BLOOD_GROUPS)
}

pub fn validate_image_url(url: Option<&str>) -> Result<(), CoreError> {
    match url {
        Some(u) if !u.is_empty() && !u.to_string().validate_url() => Err(
            CoreError::Validation(format!("image_url '{u}' is not a valid URL")),
        ),
        _ => Ok(()),
    }
}

/// Empty strings are treated as "not provided", matching the form selects.
fn validate_one_of(field: &str, value: Option<&str>, allowed: &[&str]) -> Result<(), CoreError> {
    match value {
        Some(v) if !v.is_empty() && !allowed.contains(&v) => Err(CoreError::Validation(format!(
            "{field} must be one of {}, got '{v}'",
            allowed.join(", ")
        ))),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Vital signs
// ---------------------------------------------------------------------------

pub fn validate_temperature(temperature: Option<f64>) -> Result<(), CoreError> {
    let Some(t) = temperature else {
        return Ok(());
    };
    if !t.is_finite() || !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&t) {
        return Err(CoreError::Validation(format!(
            "temperature must be between {MIN_TEMPERATURE} and {MAX_TEMPERATURE}, got {t}"
        )));
    }
    Ok(())
}

pub fn validate_saturation(saturation: Option<i32>) -> Result<(), CoreError> {
    match saturation {
        Some(s) if !(0..=MAX_SATURATION).contains(&s) => Err(CoreError::Validation(format!(
            "saturation must be between 0 and {MAX_SATURATION}, got {s}"
        ))),
        _ => Ok(()),
    }
}

pub fn validate_non_negative_int(field: &str, value: Option<i32>) -> Result<(), CoreError> {
    match value {
        Some(v) if v < 0 => Err(CoreError::Validation(format!(
            "{field} must be >= 0, got {v}"
        ))),
        _ => Ok(()),
    }
}

/// NaN and infinity are rejected along with negative values.
pub fn validate_non_negative_float(field: &str, value: Option<f64>) -> Result<(), CoreError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(CoreError::Validation(format!(
            "{field} must be a finite number >= 0, got {v}"
        ))),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_required_field_rejected() {
        assert!(validate_required("nom", "   ").is_err());
        assert!(validate_required("nom", "Jean").is_ok());
    }

    #[test]
    fn email_format_checked() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn password_length_counts_characters() {
        assert!(validate_password("pw1", 3).is_ok());
        assert!(validate_password("pw", 3).is_err());
        assert!(validate_password("", 0).is_err());
        assert!(validate_password("éé", 2).is_ok());
    }

    #[test]
    fn age_bounds() {
        assert!(validate_age(None).is_ok());
        assert!(validate_age(Some(0)).is_ok());
        assert!(validate_age(Some(MAX_AGE)).is_ok());
        assert!(validate_age(Some(-1)).is_err());
        assert!(validate_age(Some(MAX_AGE + 1)).is_err());
    }

    #[test]
    fn enumerated_patient_fields() {
        assert!(validate_sexe(Some("F")).is_ok());
        assert!(validate_sexe(Some("")).is_ok());
        assert!(validate_sexe(Some("X")).is_err());
        assert!(validate_groupe_sanguin(Some("AB-")).is_ok());
        assert!(validate_groupe_sanguin(Some("C+")).is_err());
    }

    #[test]
    fn image_url_must_parse_when_present() {
        assert!(validate_image_url(None).is_ok());
        assert!(validate_image_url(Some("")).is_ok());
        assert!(validate_image_url(Some("https://cdn.example.com/p/1.png")).is_ok());
        assert!(validate_image_url(Some("not a url")).is_err());
    }

    #[test]
    fn temperature_range() {
        assert!(validate_temperature(Some(37.2)).is_ok());
        assert!(validate_temperature(Some(29.9)).is_err());
        assert!(validate_temperature(Some(f64::NAN)).is_err());
    }

    #[test]
    fn saturation_is_a_percentage() {
        assert!(validate_saturation(Some(98)).is_ok());
        assert!(validate_saturation(Some(101)).is_err());
    }

    #[test]
    fn negative_measurements_rejected() {
        assert!(validate_non_negative_int("respiration", Some(-3)).is_err());
        assert!(validate_non_negative_float("poids", Some(-0.5)).is_err());
        assert!(validate_non_negative_float("taille", Some(172.0)).is_ok());
    }
}
