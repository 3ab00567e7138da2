use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{Session, User};
use super::errors::AuthError;
use super::value_objects::{Email, Password, PasswordHash};

/// Account storage
///
/// A duplicate email on `create` surfaces as `RepositoryError::DuplicateKey`.
#[async_trait]
pub trait UserRepository: Send + Sync {
  async fn create(&self, user: User) -> Result<User, AuthError>;

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError>;

  /// Lookup used by login and registration
  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError>;

  /// Persists name and password hash changes
  async fn update(&self, user: User) -> Result<User, AuthError>;

  /// Removes the account along with its recipes, tags and ingredients.
  /// `RepositoryError::NotFound` when no such account exists.
  async fn delete(&self, id: Uuid) -> Result<(), AuthError>;
}

/// Storage for logins, keyed by the digest of the bearer token
#[async_trait]
pub trait SessionRepository: Send + Sync {
  async fn create(&self, session: Session) -> Result<Session, AuthError>;

  /// `None` for a token that was never issued or has been revoked
  async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AuthError>;

  /// Newest first
  async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Session>, AuthError>;

  /// Revokes one login. `RepositoryError::NotFound` if it is already gone.
  async fn delete(&self, session_id: Uuid) -> Result<(), AuthError>;

  /// Signs the account out everywhere
  async fn delete_all_for_user(&self, user_id: Uuid) -> Result<(), AuthError>;
}

#[async_trait]
pub trait PasswordHasher: Send + Sync {
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError>;

  /// `Ok(false)` on a mismatch, `Err` when the stored hash cannot be checked
  async fn verify(
    &self,
    password: &Password,
    hashed_password: &PasswordHash,
  ) -> Result<bool, AuthError>;
}
