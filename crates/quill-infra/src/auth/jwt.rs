//! JWT token service implementation.
//!
//! Issues short-lived access tokens and longer-lived refresh tokens, both
//! HS256-signed. The `token_type` claim keeps the two kinds apart.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quill_core::ports::{AuthError, TokenClaims, TokenKind, TokenService};

pub const DEFAULT_SECRET: &str = "change-me-in-production";

/// JWT token service configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_ttl_minutes: i64,
    pub refresh_ttl_days: i64,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            access_ttl_minutes: 5,
            refresh_ttl_days: 1,
            issuer: "quill-api".to_string(),
        }
    }
}

impl JwtConfig {
    /// Whether the secret is still the built-in placeholder.
    pub fn uses_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }

    fn lifetime(&self, kind: TokenKind) -> TimeDelta {
        match kind {
            TokenKind::Access => TimeDelta::minutes(self.access_ttl_minutes),
            TokenKind::Refresh => TimeDelta::days(self.refresh_ttl_days),
        }
    }
}

/// Wire claims.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // account id
    username: String,
    token_type: String,
    jti: String,
    exp: i64,
    iat: i64,
    iss: String,
}

/// JWT-based token service.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }
}

impl TokenService for JwtTokenService {
    fn generate_token(
        &self,
        account_id: Uuid,
        username: &str,
        kind: TokenKind,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + self.config.lifetime(kind);

        let claims = Claims {
            sub: account_id.to_string(),
            username: username.to_string(),
            token_type: kind.as_str().to_string(),
            jti: Uuid::new_v4().simple().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn validate_token(&self, token: &str, expected: TokenKind) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;
        let claims = token_data.claims;

        if claims.token_type != expected.as_str() {
            return Err(AuthError::InvalidToken(format!(
                "expected {expected} token, got {}",
                claims.token_type
            )));
        }

        let account_id =
            Uuid::parse_str(&claims.sub).map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(TokenClaims {
            account_id,
            username: claims.username,
            kind: expected,
            jti: claims.jti,
            exp: claims.exp,
        })
    }

    fn lifetime_seconds(&self, kind: TokenKind) -> i64 {
        self.config.lifetime(kind).num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key".to_string(),
            access_ttl_minutes: 5,
            refresh_ttl_days: 1,
            issuer: "test-issuer".to_string(),
        }
    }

    #[test]
    fn test_access_token_round_trip() {
        let service = JwtTokenService::new(test_config());
        let account_id = Uuid::new_v4();

        let token = service
            .generate_token(account_id, "alice", TokenKind::Access)
            .unwrap();
        let claims = service.validate_token(&token, TokenKind::Access).unwrap();

        assert_eq!(claims.account_id, account_id);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.kind, TokenKind::Access);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_token_kinds_are_not_interchangeable() {
        let service = JwtTokenService::new(test_config());
        let refresh = service
            .generate_token(Uuid::new_v4(), "alice", TokenKind::Refresh)
            .unwrap();

        assert!(service.validate_token(&refresh, TokenKind::Refresh).is_ok());
        assert!(matches!(
            service.validate_token(&refresh, TokenKind::Access),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_each_token_has_its_own_jti() {
        let service = JwtTokenService::new(test_config());
        let id = Uuid::new_v4();
        let a = service.generate_token(id, "alice", TokenKind::Refresh).unwrap();
        let b = service.generate_token(id, "alice", TokenKind::Refresh).unwrap();

        let a = service.validate_token(&a, TokenKind::Refresh).unwrap();
        let b = service.validate_token(&b, TokenKind::Refresh).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_validate_invalid_token() {
        let service = JwtTokenService::new(test_config());

        let result = service.validate_token("invalid-token", TokenKind::Access);

        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_validate_wrong_issuer_token() {
        let service1 = JwtTokenService::new(JwtConfig {
            issuer: "issuer1".to_string(),
            ..test_config()
        });
        let service2 = JwtTokenService::new(JwtConfig {
            issuer: "issuer2".to_string(),
            ..test_config()
        });

        let token = service1
            .generate_token(Uuid::new_v4(), "alice", TokenKind::Access)
            .unwrap();

        assert!(service2.validate_token(&token, TokenKind::Access).is_err());
    }

    #[test]
    fn test_expired_token() {
        let service = JwtTokenService::new(JwtConfig {
            access_ttl_minutes: -10,
            ..test_config()
        });
        let token = service
            .generate_token(Uuid::new_v4(), "alice", TokenKind::Access)
            .unwrap();

        assert!(matches!(
            service.validate_token(&token, TokenKind::Access),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_lifetimes() {
        let service = JwtTokenService::new(test_config());
        assert_eq!(service.lifetime_seconds(TokenKind::Access), 300);
        assert_eq!(service.lifetime_seconds(TokenKind::Refresh), 86400);
        assert!(JwtConfig::default().uses_default_secret());
    }
}
