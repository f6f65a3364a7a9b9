//! Main token service implementation

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{
    Claims, TokenPair, TokenType, MAX_ACCESS_TOKEN_EXPIRY_MINUTES, MAX_REFRESH_TOKEN_EXPIRY_DAYS,
};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Service for issuing and verifying JWT access and refresh tokens
///
/// Keys are derived once from the configured secret and never change for
/// the lifetime of the service. All operations take the current time as a
/// parameter, so the service itself holds no clock.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `config` - Token service configuration
    ///
    /// # Returns
    ///
    /// A new `TokenService`, or a validation error when the secret is empty,
    /// the algorithm is not HMAC-based, or a lifetime is outside its bounds
    pub fn new(config: TokenServiceConfig) -> Result<Self, DomainError> {
        if config.jwt_secret.is_empty() {
            return Err(DomainError::Validation {
                message: "JWT secret must not be empty".to_string(),
            });
        }
        if !config.is_symmetric() {
            return Err(DomainError::Validation {
                message: format!("Unsupported JWT algorithm: {:?}", config.algorithm),
            });
        }
        if config.access_token_expiry_minutes <= 0 || config.refresh_token_expiry_days <= 0 {
            return Err(DomainError::Validation {
                message: "Token lifetimes must be positive".to_string(),
            });
        }
        if config.access_token_expiry_minutes > MAX_ACCESS_TOKEN_EXPIRY_MINUTES {
            return Err(DomainError::Validation {
                message: format!(
                    "Access token lifetime must not exceed {} minutes",
                    MAX_ACCESS_TOKEN_EXPIRY_MINUTES
                ),
            });
        }
        if config.refresh_token_expiry_days > MAX_REFRESH_TOKEN_EXPIRY_DAYS {
            return Err(DomainError::Validation {
                message: format!(
                    "Refresh token lifetime must not exceed {} days",
                    MAX_REFRESH_TOKEN_EXPIRY_DAYS
                ),
            });
        }

        let access_ttl = Duration::try_minutes(config.access_token_expiry_minutes).ok_or_else(|| {
            DomainError::Validation {
                message: "Access token lifetime is out of range".to_string(),
            }
        })?;
        let refresh_ttl = Duration::try_days(config.refresh_token_expiry_days).ok_or_else(|| {
            DomainError::Validation {
                message: "Refresh token lifetime is out of range".to_string(),
            }
        })?;

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // Expiry is checked against the caller-supplied clock in `decode_and_verify`
        let mut validation = Validation::new(config.algorithm);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            access_ttl,
            refresh_ttl,
        })
    }

    /// Lifetime of access tokens issued with the default TTL
    pub fn access_token_ttl(&self) -> Duration {
        self.access_ttl
    }

    /// Lifetime of refresh tokens issued with the default TTL
    pub fn refresh_token_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Issues an access token for `subject` with the configured lifetime
    pub fn issue_access_token(&self, subject: &str, now: DateTime<Utc>) -> Result<String, DomainError> {
        self.issue_access_token_with_ttl(subject, now, self.access_token_ttl())
    }

    /// Issues an access token with a custom lifetime
    pub fn issue_access_token_with_ttl(
        &self,
        subject: &str,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, DomainError> {
        self.issue(subject, TokenType::Access, now, ttl)
    }

    /// Issues a refresh token for `subject` with the configured lifetime
    pub fn issue_refresh_token(&self, subject: &str, now: DateTime<Utc>) -> Result<String, DomainError> {
        self.issue_refresh_token_with_ttl(subject, now, self.refresh_token_ttl())
    }

    /// Issues a refresh token with a custom lifetime
    pub fn issue_refresh_token_with_ttl(
        &self,
        subject: &str,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, DomainError> {
        self.issue(subject, TokenType::Refresh, now, ttl)
    }

    /// Issues a fresh access + refresh token pair for `subject`
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The generated token pair, `token_type` "bearer"
    /// * `Err(DomainError)` - Token generation failed
    pub fn issue_token_pair(&self, subject: &str, now: DateTime<Utc>) -> Result<TokenPair, DomainError> {
        let access_token = self.issue_access_token(subject, now)?;
        let refresh_token = self.issue_refresh_token(subject, now)?;
        Ok(TokenPair::new(access_token, refresh_token))
    }

    /// Verifies a token and returns its subject
    ///
    /// Checks run in a fixed order:
    /// 1. signature and structure, else `TokenError::Invalid`
    /// 2. `exp <= now` gives `TokenError::Expired`
    /// 3. type mismatch gives `TokenError::WrongType`
    /// 4. empty subject gives `TokenError::Invalid`
    pub fn decode_and_verify(
        &self,
        token: &str,
        expected_type: TokenType,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = self.decode_claims(token)?;

        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }
        if claims.token_type != expected_type {
            return Err(TokenError::WrongType);
        }
        if claims.sub.is_empty() {
            return Err(TokenError::Invalid);
        }

        Ok(claims.sub)
    }

    /// Verifies the signature and decodes the claims without time or type checks
    pub fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(kind = ?e.kind(), "Token rejected during decode");
                TokenError::Invalid
            })
    }

    fn issue(
        &self,
        subject: &str,
        token_type: TokenType,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, DomainError> {
        // An issued token must expire strictly after `now`
        if ttl.num_seconds() <= 0 {
            return Err(TokenError::GenerationFailed("token lifetime must be positive".to_string()).into());
        }

        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
            DomainError::from(TokenError::GenerationFailed(
                "token expiry is out of range".to_string(),
            ))
        })?;

        let claims = Claims::new(subject, token_type, expires_at);
        encode(&Header::new(self.config.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::GenerationFailed(e.to_string()).into())
    }
}
