//! User repository trait defining the interface for user data persistence.
//!
//! The trait is async-first and keeps the storage backend behind the domain
//! boundary. Emails are compared exactly; callers normalize (trim) them
//! before lookup.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use uuid::Uuid;
/// use dl_core::repositories::UserRepository;
/// use dl_core::domain::entities::user::User;
/// use dl_core::errors::DomainError;
///
/// struct PgUserRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl UserRepository for PgUserRepository {
///     async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
///         // Implementation here
///         Ok(None)
///     }
///
///     // ... other methods
/// #   async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> { Ok(None) }
/// #   async fn create(&self, user: User) -> Result<User, DomainError> { Ok(user) }
/// #   async fn update(&self, user: User) -> Result<User, DomainError> { Ok(user) }
/// #   async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> { Ok(false) }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email address
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that email
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    ///
    /// # Arguments
    /// * `id` - The UUID of the user
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given ID
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Create a new user in the repository
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))` - Email taken
    /// * `Err(DomainError)` - Any other failure
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user
    ///
    /// # Returns
    /// * `Ok(User)` - The updated user
    /// * `Err(DomainError::NotFound)` - No user with that ID
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Check if a user exists with the given email
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;
}
