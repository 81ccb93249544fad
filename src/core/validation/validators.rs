//! Reusable field validators
//!
//! Each validator receives the field's raw text and returns the message to
//! show when the rule is violated.

use crate::core::order::OrderStatus;

/// Validator: field must not be empty
pub fn required(message: &'static str) -> impl Fn(&str) -> Result<(), String> + Send + Sync + Clone {
    move |value: &str| {
        if value.is_empty() {
            Err(message.to_string())
        } else {
            Ok(())
        }
    }
}

/// Validator: field must contain something other than whitespace
pub fn required_trimmed(
    message: &'static str,
) -> impl Fn(&str) -> Result<(), String> + Send + Sync + Clone {
    move |value: &str| {
        if value.trim().is_empty() {
            Err(message.to_string())
        } else {
            Ok(())
        }
    }
}

/// Validator: field must parse as a finite number strictly greater than zero
pub fn positive_number(
    message: &'static str,
) -> impl Fn(&str) -> Result<(), String> + Send + Sync + Clone {
    move |value: &str| match value.trim().parse::<f64>() {
        Ok(num) if num.is_finite() && num > 0.0 => Ok(()),
        _ => Err(message.to_string()),
    }
}

/// Validator: a non-empty value must name one of the selectable statuses
///
/// Emptiness is left to [`required`].
pub fn known_status(
    message: &'static str,
) -> impl Fn(&str) -> Result<(), String> + Send + Sync + Clone {
    move |value: &str| {
        if value.is_empty() || value.parse::<OrderStatus>().is_ok_and(|s| s.is_known()) {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }
}
