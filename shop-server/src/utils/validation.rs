//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits are chosen as reasonable UX limits for contact handles and
//! catalog text; the store has no built-in length enforcement.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: enchantment name, category
pub const MAX_NAME_LEN: usize = 200;

/// Contact handles: Discord / Minecraft usernames
pub const MAX_USERNAME_LEN: usize = 100;

/// Catalog descriptions
pub const MAX_DESCRIPTION_LEN: usize = 500;

// ── Validation helpers (handlers) ───────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}
