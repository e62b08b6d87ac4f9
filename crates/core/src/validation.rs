//! Field-level validation shared by create/update handlers.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Maximum length of names and titles.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length of short free-text fields (location, client, phone, ...).
pub const MAX_SHORT_TEXT_LENGTH: usize = 100;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Inclusive rating bounds for customer testimonials.
pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

/// Require a non-blank value of at most `max` characters.
pub fn validate_required(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    validate_max_length(field, value, max)
}

/// Reject values longer than `max` characters.
pub fn validate_max_length(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Same as [`validate_max_length`] for optional fields.
pub fn validate_optional_length(
    field: &str,
    value: Option<&str>,
    max: usize,
) -> Result<(), CoreError> {
    match value {
        Some(v) => validate_max_length(field, v, max),
        None => Ok(()),
    }
}

/// Validate an email address.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if !email.trim().to_string().validate_email() {
        return Err(CoreError::Validation(format!(
            "'{}' is not a valid email address",
            email.trim()
        )));
    }
    Ok(())
}

/// Normalize an email for storage and lookup (trimmed, lowercase).
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate a testimonial star rating.
pub fn validate_rating(rating: i16) -> Result<(), CoreError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}"
        )));
    }
    Ok(())
}

/// Reject negative or non-finite prices.
pub fn validate_price(price: Option<f64>) -> Result<(), CoreError> {
    match price {
        Some(p) if !p.is_finite() || p < 0.0 => Err(CoreError::Validation(
            "Price must be a non-negative number".into(),
        )),
        _ => Ok(()),
    }
}

/// Validate a new password and its confirmation.
pub fn validate_new_password(password: &str, confirmation: &str) -> Result<(), CoreError> {
    if password != confirmation {
        return Err(CoreError::Validation("Password fields didn't match.".into()));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}
