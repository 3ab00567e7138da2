use chrono::Duration;
use std::net::IpAddr;
use std::sync::Arc;
use uuid::Uuid;

use super::entities::{Session, User};
use super::errors::{AuthError, RepositoryError};
use super::ports::{PasswordHasher, SessionRepository, UserRepository};
use super::value_objects::{Email, Password, PasswordHash, SessionToken, UserName};

/// Tunables for session lifetime and password policy
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
  pub session_ttl_seconds: i64,
  pub remember_me_ttl_seconds: i64,
  pub password_min_length: usize,
}

impl Default for AuthServiceConfig {
  fn default() -> Self {
    Self {
      session_ttl_seconds: 24 * 60 * 60,
      remember_me_ttl_seconds: 30 * 24 * 60 * 60,
      password_min_length: Password::MIN_LENGTH,
    }
  }
}

/// Changes a user may apply to their own profile
#[derive(Debug, Default)]
pub struct ProfileUpdate {
  pub name: Option<UserName>,
  pub password: Option<Password>,
}

/// Authentication service implementing account and session logic
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  session_repo: Arc<dyn SessionRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  config: AuthServiceConfig,
}

impl AuthService {
  /// Creates a new instance of AuthService
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    config: AuthServiceConfig,
  ) -> Self {
    Self {
      user_repo,
      session_repo,
      password_hasher,
      config,
    }
  }

  /// Parses a new password against the configured policy
  pub fn parse_password(&self, raw: impl Into<String>) -> Result<Password, AuthError> {
    Ok(Password::with_min_length(
      raw,
      self.config.password_min_length,
    )?)
  }

  /// Registers a new user and opens a first session
  ///
  /// # Errors
  /// Returns `AuthError::EmailAlreadyExists` if email is already registered
  pub async fn register(
    &self,
    email: Email,
    password: Password,
    name: UserName,
  ) -> Result<(User, Session, SessionToken), AuthError> {
    if self.user_repo.find_by_email(&email).await?.is_some() {
      return Err(AuthError::EmailAlreadyExists);
    }

    let password_hash = self.password_hasher.hash(&password).await?;
    let user = User::new(
      email.into_inner(),
      password_hash.into_inner(),
      name.into_inner(),
    );

    let created_user = match self.user_repo.create(user).await {
      Ok(user) => user,
      Err(AuthError::Repository(RepositoryError::DuplicateKey(_))) => {
        return Err(AuthError::EmailAlreadyExists);
      }
      Err(e) => return Err(e),
    };

    tracing::info!(user_id = %created_user.id, "Registered new user");

    let (session, token) = self
      .open_session(
        created_user.id,
        Duration::seconds(self.config.session_ttl_seconds),
        None,
        None,
      )
      .await?;

    Ok((created_user, session, token))
  }

  /// Authenticates a user and creates a new session
  ///
  /// Unknown emails and wrong passwords are indistinguishable to the caller.
  pub async fn login(
    &self,
    email: Email,
    password: &str,
    ip_address: Option<IpAddr>,
    user_agent: Option<String>,
    remember_me: bool,
  ) -> Result<(User, Session, SessionToken), AuthError> {
    let user = self
      .user_repo
      .find_by_email(&email)
      .await?
      .ok_or(AuthError::InvalidCredentials)?;

    let password = Password::new(password).map_err(|_| AuthError::InvalidCredentials)?;
    let password_hash = PasswordHash::from_hash(&user.password_hash)?;

    if !self.password_hasher.verify(&password, &password_hash).await? {
      tracing::warn!(user_id = %user.id, "Rejected login with wrong password");
      return Err(AuthError::InvalidCredentials);
    }

    let ttl = if remember_me {
      self.config.remember_me_ttl_seconds
    } else {
      self.config.session_ttl_seconds
    };

    let (session, token) = self
      .open_session(user.id, Duration::seconds(ttl), ip_address, user_agent)
      .await?;

    Ok((user, session, token))
  }

  /// Invalidates a single session token
  ///
  /// # Errors
  /// Returns `AuthError::InvalidSession` if session not found
  pub async fn logout(&self, token: SessionToken) -> Result<(), AuthError> {
    let token_hash = token.hash();

    let session = self
      .session_repo
      .find_by_token_hash(token_hash.as_str())
      .await?
      .ok_or(AuthError::InvalidSession)?;

    self.session_repo.delete(session.id).await?;

    Ok(())
  }

  /// Invalidates every session of a user, returning how many were removed
  pub async fn logout_all(&self, user_id: Uuid) -> Result<usize, AuthError> {
    self
      .user_repo
      .find_by_id(user_id)
      .await?
      .ok_or(AuthError::UserNotFound)?;

    let session_count = self.session_repo.find_by_user_id(user_id).await?.len();
    self.session_repo.delete_all_for_user(user_id).await?;

    Ok(session_count)
  }

  /// Validates a session token and returns the associated user
  ///
  /// Expired sessions are deleted on sight.
  pub async fn validate_session(&self, token: SessionToken) -> Result<User, AuthError> {
    let token_hash = token.hash();

    let session = self
      .session_repo
      .find_by_token_hash(token_hash.as_str())
      .await?
      .ok_or(AuthError::InvalidSession)?;

    if session.is_expired() {
      self.session_repo.delete(session.id).await?;
      return Err(AuthError::InvalidSession);
    }

    self
      .user_repo
      .find_by_id(session.user_id)
      .await?
      .ok_or(AuthError::InvalidSession)
  }

  /// Applies a profile update to the given user
  pub async fn update_profile(
    &self,
    user_id: Uuid,
    update: ProfileUpdate,
  ) -> Result<User, AuthError> {
    let mut user = self
      .user_repo
      .find_by_id(user_id)
      .await?
      .ok_or(AuthError::UserNotFound)?;

    if let Some(name) = update.name {
      user.rename(name.into_inner());
    }

    if let Some(password) = update.password {
      let password_hash = self.password_hasher.hash(&password).await?;
      user.set_password_hash(password_hash.into_inner());
    }

    self.user_repo.update(user).await
  }

  /// Deletes the account and, through the repository, everything it owns
  pub async fn delete_account(&self, user_id: Uuid) -> Result<(), AuthError> {
    self.session_repo.delete_all_for_user(user_id).await?;

    match self.user_repo.delete(user_id).await {
      Ok(()) => {
        tracing::info!(user_id = %user_id, "Deleted user account");
        Ok(())
      }
      Err(AuthError::Repository(RepositoryError::NotFound)) => Err(AuthError::UserNotFound),
      Err(e) => Err(e),
    }
  }

  async fn open_session(
    &self,
    user_id: Uuid,
    duration: Duration,
    ip_address: Option<IpAddr>,
    user_agent: Option<String>,
  ) -> Result<(Session, SessionToken), AuthError> {
    let token = SessionToken::generate();
    let session = Session::issue(
      user_id,
      token.hash().into_inner(),
      duration,
      ip_address,
      user_agent,
    );

    let created_session = self.session_repo.create(session).await?;

    Ok((created_session, token))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::infrastructure::persistence::memory::InMemoryStore;
  use crate::infrastructure::security::Argon2PasswordHasher;

  fn service() -> AuthService {
    let store = Arc::new(InMemoryStore::new());
    AuthService::new(
      store.clone(),
      store,
      Arc::new(Argon2PasswordHasher::new().unwrap()),
      AuthServiceConfig::default(),
    )
  }

  async fn register(service: &AuthService, email: &str) -> (User, SessionToken) {
    let (user, _, token) = service
      .register(
        Email::new(email).unwrap(),
        Password::new("Test1234").unwrap(),
        UserName::new("Test User").unwrap(),
      )
      .await
      .unwrap();
    (user, token)
  }

  #[tokio::test]
  async fn test_register_then_validate_session() {
    let service = service();
    let (user, token) = register(&service, "testt@gmail.com").await;

    let resolved = service.validate_session(token).await.unwrap();
    assert_eq!(resolved.id, user.id);
    assert_eq!(resolved.email, "testt@gmail.com");
  }

  #[tokio::test]
  async fn test_register_duplicate_email() {
    let service = service();
    register(&service, "dup@example.com").await;

    let result = service
      .register(
        Email::new("DUP@example.com").unwrap(),
        Password::new("Test1234").unwrap(),
        UserName::new("Other").unwrap(),
      )
      .await;

    assert!(matches!(result, Err(AuthError::EmailAlreadyExists)));
  }

  #[tokio::test]
  async fn test_login_with_wrong_password() {
    let service = service();
    register(&service, "login@example.com").await;

    let result = service
      .login(
        Email::new("login@example.com").unwrap(),
        "wrong-password",
        None,
        None,
        false,
      )
      .await;

    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
  }

  #[tokio::test]
  async fn test_login_remember_me_extends_expiry() {
    let service = service();
    register(&service, "remember@example.com").await;
    let email = Email::new("remember@example.com").unwrap();

    let (_, short, _) = service
      .login(email.clone(), "Test1234", None, None, false)
      .await
      .unwrap();
    let (_, long, _) = service
      .login(email, "Test1234", None, None, true)
      .await
      .unwrap();

    assert!(long.expires_at > short.expires_at);
  }

  #[tokio::test]
  async fn test_logout_invalidates_token() {
    let service = service();
    let (_, token) = register(&service, "logout@example.com").await;

    service.logout(token.clone()).await.unwrap();

    let result = service.validate_session(token).await;
    assert!(matches!(result, Err(AuthError::InvalidSession)));
  }

  #[tokio::test]
  async fn test_logout_all_counts_sessions() {
    let service = service();
    let (user, _) = register(&service, "all@example.com").await;
    service
      .login(
        Email::new("all@example.com").unwrap(),
        "Test1234",
        None,
        None,
        false,
      )
      .await
      .unwrap();

    let terminated = service.logout_all(user.id).await.unwrap();
    assert_eq!(terminated, 2);
  }

  #[tokio::test]
  async fn test_update_profile_changes_password() {
    let service = service();
    let (user, _) = register(&service, "profile@example.com").await;

    service
      .update_profile(
        user.id,
        ProfileUpdate {
          name: Some(UserName::new("New Name").unwrap()),
          password: Some(Password::new("NewPass5678").unwrap()),
        },
      )
      .await
      .unwrap();

    let email = Email::new("profile@example.com").unwrap();
    assert!(
      service
        .login(email.clone(), "Test1234", None, None, false)
        .await
        .is_err()
    );
    let (updated, _, _) = service
      .login(email, "NewPass5678", None, None, false)
      .await
      .unwrap();
    assert_eq!(updated.name, "New Name");
  }

  #[tokio::test]
  async fn test_delete_account_revokes_sessions() {
    let service = service();
    let (user, token) = register(&service, "gone@example.com").await;

    service.delete_account(user.id).await.unwrap();

    assert!(service.validate_session(token).await.is_err());
    assert!(matches!(
      service.delete_account(user.id).await,
      Err(AuthError::UserNotFound)
    ));
  }
}
