use std::sync::Arc;
use uuid::Uuid;

use super::CurrentUser;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::{AuthService, ProfileUpdate};
use crate::domain::auth::value_objects::UserName;

/// Command for changing the caller's own profile
#[derive(Debug, Clone, Default)]
pub struct UpdateCurrentUserCommand {
  pub user_id: Uuid,
  pub name: Option<String>,
  pub password: Option<String>,
}

pub struct UpdateCurrentUserUseCase {
  auth_service: Arc<AuthService>,
}

impl UpdateCurrentUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, command: UpdateCurrentUserCommand) -> Result<CurrentUser, AuthError> {
    let update = ProfileUpdate {
      name: command.name.map(UserName::new).transpose()?,
      password: command
        .password
        .map(|p| self.auth_service.parse_password(p))
        .transpose()?,
    };

    let user = self
      .auth_service
      .update_profile(command.user_id, update)
      .await?;

    Ok(user.into())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::auth::test_support::{auth_service, register};

  #[tokio::test]
  async fn test_rename_only() {
    let service = auth_service();
    let registered = register(&service, "rename@example.com").await;
    let use_case = UpdateCurrentUserUseCase::new(service);

    let updated = use_case
      .execute(UpdateCurrentUserCommand {
        user_id: registered.user_id,
        name: Some("Head Chef".to_string()),
        password: None,
      })
      .await
      .unwrap();

    assert_eq!(updated.name, "Head Chef");
    assert_eq!(updated.email, "rename@example.com");
  }

  #[tokio::test]
  async fn test_blank_name_is_rejected() {
    let service = auth_service();
    let registered = register(&service, "blank@example.com").await;
    let use_case = UpdateCurrentUserUseCase::new(service);

    let result = use_case
      .execute(UpdateCurrentUserCommand {
        user_id: registered.user_id,
        name: Some("   ".to_string()),
        password: None,
      })
      .await;

    assert!(matches!(result, Err(AuthError::ValueObject(_))));
  }
}
