//! Field rules for todo items.
//!
//! These run while a request is being bound, before anything reaches the
//! repository.

use crate::error::CoreError;
use crate::types::DbId;

/// Entity name used in not-found errors and log fields.
pub const ENTITY: &str = "todo";

/// Maximum accepted title length, in characters.
pub const TITLE_MAX_LEN: usize = 1024;

/// Check that a todo id taken from a URL is a positive integer.
pub fn validate_id(id: DbId) -> Result<DbId, CoreError> {
    if id <= 0 {
        return Err(CoreError::Validation(format!(
            "todo id must be a positive integer, got {id}"
        )));
    }
    Ok(id)
}

/// Check that a title is non-blank and within [`TITLE_MAX_LEN`].
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("title must not be blank".into()));
    }
    let len = title.chars().count();
    if len > TITLE_MAX_LEN {
        return Err(CoreError::Validation(format!(
            "title must be at most {TITLE_MAX_LEN} characters, got {len}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_ids_pass() {
        assert_eq!(validate_id(1).unwrap(), 1);
        assert_eq!(validate_id(DbId::MAX).unwrap(), DbId::MAX);
    }

    #[test]
    fn zero_and_negative_ids_fail() {
        assert!(matches!(validate_id(0), Err(CoreError::Validation(_))));
        assert!(matches!(validate_id(-7), Err(CoreError::Validation(_))));
    }

    #[test]
    fn blank_title_is_rejected() {
        assert!(validate_title("").is_err());
        assert!(validate_title("   \t").is_err());
    }

    #[test]
    fn ordinary_title_is_accepted() {
        assert!(validate_title("buy milk").is_ok());
    }

    #[test]
    fn title_length_counts_characters_not_bytes() {
        let at_limit: String = "é".repeat(TITLE_MAX_LEN);
        assert!(validate_title(&at_limit).is_ok());

        let over = "a".repeat(TITLE_MAX_LEN + 1);
        let err = validate_title(&over).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Validation failed: title must be at most {TITLE_MAX_LEN} characters, got {}", TITLE_MAX_LEN + 1)
        );
    }

    #[test]
    fn not_found_message_omits_id() {
        let err = CoreError::NotFound { entity: ENTITY, id: 9 };
        assert_eq!(err.to_string(), "todo not found");
    }
}
