use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;

/// Use case for deleting the caller's account and everything it owns
pub struct DeleteCurrentUserUseCase {
  auth_service: Arc<AuthService>,
}

impl DeleteCurrentUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, user_id: Uuid) -> Result<(), AuthError> {
    self.auth_service.delete_account(user_id).await
  }
}
