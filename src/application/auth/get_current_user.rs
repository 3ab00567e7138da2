use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::entities::User;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::SessionToken;

/// The authenticated caller, without credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
  pub user_id: Uuid,
  pub email: String,
  pub name: String,
  pub created_at: DateTime<Utc>,
}

impl From<User> for CurrentUser {
  fn from(user: User) -> Self {
    Self {
      user_id: user.id,
      email: user.email,
      name: user.name,
      created_at: user.created_at,
    }
  }
}

/// Use case for resolving a session token into the user behind it
pub struct GetCurrentUserUseCase {
  auth_service: Arc<AuthService>,
}

impl GetCurrentUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// # Errors
  /// Returns `AuthError::InvalidSession` if the token is malformed, unknown or expired
  pub async fn execute(&self, session_token: String) -> Result<CurrentUser, AuthError> {
    let token = SessionToken::from_string(session_token).map_err(|_| AuthError::InvalidSession)?;

    let user = self.auth_service.validate_session(token).await?;

    Ok(user.into())
  }
}
