//! Input validation for task fields.
//!
//! Pure functions — the store and the route layer both call these before
//! touching SQL, so the messages here are the user-facing ones.

use thiserror::Error;

/// Maximum trimmed description length.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Validation failures for user-supplied task fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Description is empty or whitespace-only.
    #[error("Task description cannot be empty")]
    EmptyDescription,
    /// Description exceeds [`MAX_DESCRIPTION_LENGTH`] after trimming.
    #[error("Task description cannot exceed {MAX_DESCRIPTION_LENGTH} characters")]
    DescriptionTooLong,
    /// Priority value is outside the enum.
    #[error("Invalid priority: {0}")]
    InvalidPriority(String),
}

/// Validate a task description: non-empty after trim, length-bounded.
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    if trimmed.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::DescriptionTooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_normal_description() {
        assert!(validate_description("Buy milk").is_ok());
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(
            validate_description(""),
            Err(ValidationError::EmptyDescription)
        );
    }

    #[test]
    fn rejects_whitespace_only() {
        assert_eq!(
            validate_description("   \t "),
            Err(ValidationError::EmptyDescription)
        );
    }

    #[test]
    fn accepts_exactly_max_length() {
        let s = "x".repeat(MAX_DESCRIPTION_LENGTH);
        assert!(validate_description(&s).is_ok());
    }

    #[test]
    fn rejects_over_max_length() {
        let s = "x".repeat(MAX_DESCRIPTION_LENGTH + 1);
        assert_eq!(
            validate_description(&s),
            Err(ValidationError::DescriptionTooLong)
        );
    }

    #[test]
    fn surrounding_whitespace_does_not_count_toward_limit() {
        let s = format!("  {}  ", "x".repeat(MAX_DESCRIPTION_LENGTH));
        assert!(validate_description(&s).is_ok());
    }

    #[test]
    fn error_messages_are_user_facing() {
        assert_eq!(
            ValidationError::EmptyDescription.to_string(),
            "Task description cannot be empty"
        );
        assert_eq!(
            ValidationError::DescriptionTooLong.to_string(),
            "Task description cannot exceed 500 characters"
        );
        assert_eq!(
            ValidationError::InvalidPriority("urgent".into()).to_string(),
            "Invalid priority: urgent"
        );
    }
}
