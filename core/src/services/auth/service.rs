//! Main authentication service implementation

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::domain::entities::token::{TokenPair, TokenType};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::UserRepository;
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::credentials::normalize_email;
use super::password::{hash_password_with_cost, verify_password};

/// Plaintext behind the hash checked when a login names an unknown email
pub(super) const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-accounts";

/// Authentication service for signup, login, refresh and identity lookup
pub struct AuthService<U>
where
    U: UserRepository,
{
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Token service for JWT management
    token_service: Arc<TokenService>,
    /// Service configuration
    config: AuthServiceConfig,
    /// bcrypt hash at the configured cost, built on first use
    pub(super) dummy_hash: OnceCell<String>,
}

impl<U> AuthService<U>
where
    U: UserRepository,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `token_service` - Service for JWT token management
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            config,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Token service used to issue and verify tokens
    pub fn token_service(&self) -> &Arc<TokenService> {
        &self.token_service
    }

    /// Register a new user
    ///
    /// # Arguments
    ///
    /// * `email` - Login email, trimmed with its domain lowercased before storage
    /// * `password` - Plaintext password, hashed with bcrypt
    /// * `name` - Optional display name
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))` - Email taken
    /// * `Err(DomainError::Validation)` - Registration is disabled
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        name: Option<String>,
    ) -> DomainResult<User> {
        // Step 1: Check registration is open
        if !self.config.allow_registration {
            return Err(DomainError::Validation {
                message: "Registration is disabled".to_string(),
            });
        }

        // Step 2: Reject duplicates early; the store enforces this as well
        let email = normalize_email(email);
        if self.user_repository.exists_by_email(&email).await? {
            tracing::info!("Signup rejected: email already registered");
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        // Step 3: Hash off the async executor
        let password_hash = self.hash(password).await?;

        // Step 4: Persist
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        let user = self
            .user_repository
            .create(User::new(email, password_hash, name))
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Authenticate with email and password and issue a token pair
    ///
    /// Unknown email and wrong password produce the same error, and both
    /// cost one bcrypt verification.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Fresh access and refresh tokens
    /// * `Err(DomainError::Auth(AuthError::InvalidCredentials))` - Bad email or password
    /// * `Err(DomainError::Auth(AuthError::AccountDisabled))` - User is inactive
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<TokenPair> {
        // Step 1: Look up the user
        let user = match self.user_repository.find_by_email(&normalize_email(email)).await? {
            Some(user) => user,
            None => {
                let dummy_hash = self
                    .dummy_hash
                    .get_or_try_init(|| self.hash(DUMMY_PASSWORD))
                    .await?;
                self.verify(password, dummy_hash).await?;
                tracing::info!("Login failed: invalid credentials");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        // Step 2: Verify the password
        if !self.verify(password, &user.password_hash).await? {
            tracing::info!(user_id = %user.id, "Login failed: invalid credentials");
            return Err(AuthError::InvalidCredentials.into());
        }

        // Step 3: Check the account is enabled
        if !user.is_active {
            tracing::info!(user_id = %user.id, "Login refused: account disabled");
            return Err(AuthError::AccountDisabled.into());
        }

        // Step 4: Issue tokens
        let tokens = self.token_service.issue_token_pair(&user.id.to_string(), now)?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok(tokens)
    }

    /// Exchange a refresh token for a new token pair
    ///
    /// The presented refresh token stays valid until it expires.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - New access and refresh tokens
    /// * `Err(DomainError::Token(_))` - Token invalid, expired or not a refresh token
    /// * `Err(DomainError::Auth(AuthError::UserUnavailable))` - User missing or inactive
    pub async fn refresh(&self, refresh_token: &str, now: DateTime<Utc>) -> DomainResult<TokenPair> {
        let user_id = self.verified_user_id(refresh_token, TokenType::Refresh, now)?;

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .filter(|user| user.is_active)
            .ok_or_else(|| {
                tracing::info!(user_id = %user_id, "Refresh refused: user unavailable");
                AuthError::UserUnavailable
            })?;

        let tokens = self.token_service.issue_token_pair(&user.id.to_string(), now)?;
        tracing::debug!(user_id = %user.id, "Tokens refreshed");
        Ok(tokens)
    }

    /// Verify an access token and return the user ID it names
    pub fn authenticate(&self, access_token: &str, now: DateTime<Utc>) -> DomainResult<Uuid> {
        self.verified_user_id(access_token, TokenType::Access, now)
    }

    /// Load the user behind an authenticated request
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The user
    /// * `Err(DomainError::NotFound)` - The user no longer exists
    pub async fn current_user(&self, user_id: Uuid) -> DomainResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: "User".to_string(),
            })
    }

    fn verified_user_id(
        &self,
        token: &str,
        expected_type: TokenType,
        now: DateTime<Utc>,
    ) -> DomainResult<Uuid> {
        let subject = self
            .token_service
            .decode_and_verify(token, expected_type, now)?;
        Uuid::parse_str(&subject).map_err(|_| TokenError::Invalid.into())
    }

    async fn hash(&self, password: &str) -> DomainResult<String> {
        let password = password.to_owned();
        let cost = self.config.bcrypt_cost;
        tokio::task::spawn_blocking(move || hash_password_with_cost(&password, cost))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing task failed: {}", e),
            })?
    }

    async fn verify(&self, password: &str, hash: &str) -> DomainResult<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password verification task failed: {}", e),
            })
    }
}
