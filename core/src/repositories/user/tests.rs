//! Tests for the in-memory user repository

use uuid::Uuid;

use super::{MockUserRepository, UserRepository};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};

fn user(email: &str) -> User {
    User::new(email.to_string(), "hash".to_string(), None)
}

#[tokio::test]
async fn test_create_and_find() {
    let repo = MockUserRepository::new();
    let created = repo.create(user("u@x.com")).await.unwrap();

    let by_email = repo.find_by_email("u@x.com").await.unwrap().unwrap();
    assert_eq!(by_email.id, created.id);

    let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(by_id.email, "u@x.com");

    assert!(repo.exists_by_email("u@x.com").await.unwrap());
    assert!(!repo.exists_by_email("other@x.com").await.unwrap());
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let repo = MockUserRepository::new();
    repo.create(user("u@x.com")).await.unwrap();

    let err = repo.create(user("u@x.com")).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::EmailAlreadyRegistered)));
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_email_lookup_is_exact() {
    let repo = MockUserRepository::new();
    repo.create(user("U@x.com")).await.unwrap();

    assert!(repo.find_by_email("u@x.com").await.unwrap().is_none());
    assert!(repo.find_by_email("U@x.com").await.unwrap().is_some());
}

#[tokio::test]
async fn test_update() {
    let repo = MockUserRepository::new();
    let mut created = repo.create(user("u@x.com")).await.unwrap();

    created.deactivate();
    repo.update(created.clone()).await.unwrap();
    let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert!(!stored.is_active);

    let err = repo.update(user("ghost@x.com")).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}
