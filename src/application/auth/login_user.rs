use chrono::{DateTime, Utc};
use std::net::IpAddr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::Email;

/// Command for logging in a user
#[derive(Debug, Clone)]
pub struct LoginUserCommand {
  pub email: String,
  pub password: String,
  /// Whether to create a long-lived session
  pub remember_me: bool,
}

/// Response after successful user login
#[derive(Debug, Clone)]
pub struct LoginUserResponse {
  pub user_id: Uuid,
  pub email: String,
  pub session_token: String,
  pub expires_at: DateTime<Utc>,
}

/// Use case for logging in a user
pub struct LoginUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LoginUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the user login use case
  ///
  /// A malformed email is reported as invalid credentials, same as a wrong password.
  pub async fn execute(
    &self,
    command: LoginUserCommand,
    ip_address: Option<IpAddr>,
    user_agent: Option<String>,
  ) -> Result<LoginUserResponse, AuthError> {
    let email = Email::new(command.email).map_err(|_| AuthError::InvalidCredentials)?;

    let (user, session, session_token) = self
      .auth_service
      .login(
        email,
        &command.password,
        ip_address,
        user_agent,
        command.remember_me,
      )
      .await?;

    Ok(LoginUserResponse {
      user_id: user.id,
      email: user.email,
      session_token: session_token.into_inner(),
      expires_at: session.expires_at,
    })
  }
}
