use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account entity - a registered author.
///
/// The password hash is opaque to the domain; it is produced and checked
/// through [`crate::ports::PasswordService`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with generated ID and timestamp.
    pub fn new(
        username: String,
        first_name: String,
        last_name: String,
        password_hash: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            first_name,
            last_name,
            password_hash,
            created_at: Utc::now(),
        }
    }

    /// Name shown next to an author's posts.
    ///
    /// Falls back to the username when no first or last name is on file.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(first: &str, last: &str) -> Account {
        Account::new(
            "jdoe".to_string(),
            first.to_string(),
            last.to_string(),
            "hash".to_string(),
        )
    }

    #[test]
    fn test_display_name_uses_full_name() {
        assert_eq!(account("Jane", "Doe").display_name(), "Jane Doe");
    }

    #[test]
    fn test_display_name_with_single_name() {
        assert_eq!(account("Jane", "").display_name(), "Jane");
        assert_eq!(account("", "Doe").display_name(), "Doe");
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        assert_eq!(account("", "  ").display_name(), "jdoe");
    }
}
