//! Authentication ports: token issuance and password hashing.

use std::fmt;

use uuid::Uuid;

/// Which of the two token kinds a JWT is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims carried by a verified token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub account_id: Uuid,
    pub username: String,
    pub kind: TokenKind,
    /// Unique token id, used to revoke refresh tokens.
    pub jti: String,
    pub exp: i64,
}

/// Token service trait for JWT operations.
pub trait TokenService: Send + Sync {
    /// Issue a token of the given kind for an account.
    fn generate_token(
        &self,
        account_id: Uuid,
        username: &str,
        kind: TokenKind,
    ) -> Result<String, AuthError>;

    /// Validate and decode a token, requiring it to be of `expected` kind.
    fn validate_token(&self, token: &str, expected: TokenKind) -> Result<TokenClaims, AuthError>;

    /// Lifetime of a freshly issued token of the given kind.
    fn lifetime_seconds(&self, kind: TokenKind) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token has been revoked")]
    TokenRevoked,

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
