//! Argument checks shared by the domain actions.

use crate::common::error::{ApiError, ApiResult};

/// Column width of every short text field (names, titles).
pub const MAX_NAME_LEN: usize = 100;

/// Rejects values longer than the column they are stored in.
pub fn check_max_chars(field: &str, value: &str, max: usize) -> ApiResult<()> {
    if value.chars().count() > max {
        return Err(ApiError::validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

/// Same as [`check_max_chars`] for optional arguments.
pub fn check_max_chars_opt(field: &str, value: Option<&str>, max: usize) -> ApiResult<()> {
    value.map_or(Ok(()), |v| check_max_chars(field, v, max))
}
