use std::sync::Arc;

use crate::domain::{Account, Principal};
use crate::error::{DomainError, RepoError};
use crate::ports::{AccountRepository, BaseRepository, PasswordService};
use crate::validation::{validate_password, validate_username};

/// Registration input.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Account registration, credential checks and removal.
pub struct AccountService {
    accounts: Arc<dyn AccountRepository>,
    passwords: Arc<dyn PasswordService>,
}

impl AccountService {
    pub fn new(accounts: Arc<dyn AccountRepository>, passwords: Arc<dyn PasswordService>) -> Self {
        Self {
            accounts,
            passwords,
        }
    }

    /// Register a new account with a hashed password.
    pub async fn register(&self, new: NewAccount) -> Result<Account, DomainError> {
        let errors: Vec<_> = [
            validate_username(&new.username),
            validate_password(&new.password),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        if self.accounts.find_by_username(&new.username).await?.is_some() {
            return Err(DomainError::Duplicate("Username already taken".to_string()));
        }

        let password_hash = self
            .passwords
            .hash(&new.password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let account = self
            .accounts
            .insert(Account::new(
                new.username,
                new.first_name,
                new.last_name,
                password_hash,
            ))
            .await?;

        tracing::info!(account_id = %account.id, "Account registered");
        Ok(account)
    }

    /// Check a username/password pair. Unknown usernames and wrong passwords
    /// are reported the same way.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Account, DomainError> {
        let account = self
            .accounts
            .find_by_username(username)
            .await?
            .ok_or(DomainError::Unauthorized)?;

        let valid = self
            .passwords
            .verify(password, &account.password_hash)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if !valid {
            tracing::debug!(account_id = %account.id, "Password mismatch");
            return Err(DomainError::Unauthorized);
        }
        Ok(account)
    }

    /// The account behind `principal`.
    pub async fn profile(&self, principal: &Principal) -> Result<Account, DomainError> {
        let id = principal.account_id().ok_or(DomainError::Unauthorized)?;
        self.accounts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::Unauthorized)
    }

    /// Delete the principal's account together with all of its posts.
    pub async fn delete(&self, principal: &Principal) -> Result<(), DomainError> {
        let id = principal.account_id().ok_or(DomainError::Unauthorized)?;
        match self.accounts.delete(id).await {
            Ok(()) => {
                tracing::info!(account_id = %id, "Account deleted");
                Ok(())
            }
            Err(RepoError::NotFound) => Err(DomainError::Unauthorized),
            Err(e) => Err(e.into()),
        }
    }
}
