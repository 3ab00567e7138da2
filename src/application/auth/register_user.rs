use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, UserName};

/// Command for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
  pub email: String,
  /// Plain text, hashed before storage
  pub password: String,
  pub name: String,
}

/// Response after successful user registration
#[derive(Debug, Clone)]
pub struct RegisterUserResponse {
  pub user_id: Uuid,
  pub email: String,
  pub name: String,
  /// Session token for immediate use
  pub session_token: String,
  pub expires_at: DateTime<Utc>,
}

/// Use case for registering a new user
pub struct RegisterUserUseCase {
  auth_service: Arc<AuthService>,
}

impl RegisterUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the user registration use case
  ///
  /// # Errors
  /// Returns `AuthError::EmailAlreadyExists` for a taken email and
  /// `AuthError::ValueObject` when a field fails validation
  pub async fn execute(
    &self,
    command: RegisterUserCommand,
  ) -> Result<RegisterUserResponse, AuthError> {
    let email = Email::new(command.email)?;
    let password = self.auth_service.parse_password(command.password)?;
    let name = UserName::new(command.name)?;

    let (user, session, session_token) =
      self.auth_service.register(email, password, name).await?;

    Ok(RegisterUserResponse {
      user_id: user.id,
      email: user.email,
      name: user.name,
      session_token: session_token.into_inner(),
      expires_at: session.expires_at,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::auth::test_support::auth_service;

  fn command(email: &str, password: &str) -> RegisterUserCommand {
    RegisterUserCommand {
      email: email.to_string(),
      password: password.to_string(),
      name: "Test User".to_string(),
    }
  }

  #[tokio::test]
  async fn test_register_returns_usable_token() {
    let use_case = RegisterUserUseCase::new(auth_service());

    let response = use_case
      .execute(command("Testt@Gmail.com", "Test1234"))
      .await
      .unwrap();

    assert_eq!(response.email, "testt@gmail.com");
    assert_eq!(response.session_token.len(), 64);
  }

  #[tokio::test]
  async fn test_register_rejects_short_password() {
    let use_case = RegisterUserUseCase::new(auth_service());

    let result = use_case.execute(command("short@example.com", "pw")).await;

    assert!(matches!(result, Err(AuthError::ValueObject(_))));
  }
}
