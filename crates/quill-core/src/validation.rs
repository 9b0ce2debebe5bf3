//! Field validation for posts and account registration.
//!
//! Lengths are counted in characters. The empty check always wins over the
//! length checks so a blank field reports as missing rather than short.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::domain::{PostChanges, PostDraft};

pub const TITLE_MIN_LEN: usize = 5;
pub const TITLE_MAX_LEN: usize = 100;
pub const CONTENT_MIN_LEN: usize = 10;
pub const USERNAME_MAX_LEN: usize = 150;
pub const PASSWORD_MIN_LEN: usize = 8;

/// Field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Content,
    Username,
    Password,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Content => "content",
            Field::Username => "username",
            Field::Password => "password",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Content => "Content",
            Field::Username => "Username",
            Field::Password => "Password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-scoped validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{} is required.", .field.label())]
    EmptyField { field: Field },

    #[error("{} must be at least {min} characters long.", .field.label())]
    TooShort { field: Field, min: usize },

    #[error("{} must be less than {max} characters long.", .field.label())]
    TooLong { field: Field, max: usize },
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. } => *field,
        }
    }
}

/// Validate a post title. Returns the input unchanged on success.
pub fn validate_title(value: &str) -> Result<&str, ValidationError> {
    let field = Field::Title;
    let len = value.chars().count();
    if len == 0 {
        return Err(ValidationError::EmptyField { field });
    }
    if len < TITLE_MIN_LEN {
        return Err(ValidationError::TooShort {
            field,
            min: TITLE_MIN_LEN,
        });
    }
    if len > TITLE_MAX_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: TITLE_MAX_LEN,
        });
    }
    Ok(value)
}

/// Validate post content. Returns the input unchanged on success.
pub fn validate_content(value: &str) -> Result<&str, ValidationError> {
    let field = Field::Content;
    let len = value.chars().count();
    if len == 0 {
        return Err(ValidationError::EmptyField { field });
    }
    if len < CONTENT_MIN_LEN {
        return Err(ValidationError::TooShort {
            field,
            min: CONTENT_MIN_LEN,
        });
    }
    Ok(value)
}

/// Validate a username for registration. Surrounding whitespace is not allowed
/// to satisfy the empty check.
pub fn validate_username(value: &str) -> Result<&str, ValidationError> {
    let field = Field::Username;
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    if value.chars().count() > USERNAME_MAX_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: USERNAME_MAX_LEN,
        });
    }
    Ok(value)
}

/// Validate a plain text password before hashing.
pub fn validate_password(value: &str) -> Result<&str, ValidationError> {
    let field = Field::Password;
    if value.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    if value.chars().count() < PASSWORD_MIN_LEN {
        return Err(ValidationError::TooShort {
            field,
            min: PASSWORD_MIN_LEN,
        });
    }
    Ok(value)
}

impl PostDraft {
    /// Validate both fields, collecting every failure.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<_> = [validate_title(&self.title), validate_content(&self.content)]
            .into_iter()
            .filter_map(Result::err)
            .collect();

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl PostChanges {
    /// Validate only the supplied fields, collecting every failure.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        if let Some(Err(e)) = self.title.as_deref().map(validate_title) {
            errors.push(e);
        }
        if let Some(Err(e)) = self.content.as_deref().map(validate_content) {
            errors.push(e);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_bounds() {
        assert_eq!(
            validate_title("abcd"),
            Err(ValidationError::TooShort {
                field: Field::Title,
                min: 5
            })
        );
        assert_eq!(validate_title("abcde"), Ok("abcde"));

        let longest = "a".repeat(100);
        assert_eq!(validate_title(&longest), Ok(longest.as_str()));

        assert_eq!(
            validate_title(&"a".repeat(101)),
            Err(ValidationError::TooLong {
                field: Field::Title,
                max: 100
            })
        );
    }

    #[test]
    fn test_every_valid_title_length_passes_unchanged() {
        for len in TITLE_MIN_LEN..=TITLE_MAX_LEN {
            let title = format!(" {}", "x".repeat(len - 1));
            assert_eq!(validate_title(&title), Ok(title.as_str()));
        }
    }

    #[test]
    fn test_empty_field_takes_priority_over_too_short() {
        assert_eq!(
            validate_title(""),
            Err(ValidationError::EmptyField {
                field: Field::Title
            })
        );
        assert_eq!(
            validate_content(""),
            Err(ValidationError::EmptyField {
                field: Field::Content
            })
        );
    }

    #[test]
    fn test_content_bounds() {
        assert_eq!(
            validate_content("123456789"),
            Err(ValidationError::TooShort {
                field: Field::Content,
                min: 10
            })
        );
        assert_eq!(validate_content("1234567890"), Ok("1234567890"));
        assert!(validate_content(&"z".repeat(10_000)).is_ok());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 5 characters, 10 bytes
        assert_eq!(validate_title("ééééé"), Ok("ééééé"));
        // 4 characters, 8 bytes
        assert!(validate_title("éééé").is_err());
    }

    #[test]
    fn test_messages() {
        let err = validate_title("").unwrap_err();
        assert_eq!(err.to_string(), "Title is required.");
        let err = validate_title("abc").unwrap_err();
        assert_eq!(err.to_string(), "Title must be at least 5 characters long.");
        let err = validate_content("short").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Content must be at least 10 characters long."
        );
        assert_eq!(err.field(), Field::Content);
    }

    #[test]
    fn test_account_fields() {
        assert_eq!(validate_username("alice"), Ok("alice"));
        assert_eq!(
            validate_username("   "),
            Err(ValidationError::EmptyField {
                field: Field::Username
            })
        );
        assert!(validate_username(&"u".repeat(151)).is_err());

        assert_eq!(
            validate_password("1234567"),
            Err(ValidationError::TooShort {
                field: Field::Password,
                min: 8
            })
        );
        assert_eq!(validate_password("12345678"), Ok("12345678"));
    }

    #[test]
    fn test_draft_collects_all_field_errors() {
        let draft = PostDraft {
            title: "abc".to_string(),
            content: String::new(),
        };
        let errors = draft.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(ValidationError::field).collect();
        assert_eq!(fields, vec![Field::Title, Field::Content]);
    }

    #[test]
    fn test_changes_only_validate_supplied_fields() {
        let changes = PostChanges {
            title: None,
            content: Some("long enough content".to_string()),
        };
        assert!(changes.validate().is_ok());

        let changes = PostChanges {
            title: Some(String::new()),
            content: None,
        };
        assert_eq!(
            changes.validate().unwrap_err(),
            vec![ValidationError::EmptyField {
                field: Field::Title
            }]
        );
    }
}
