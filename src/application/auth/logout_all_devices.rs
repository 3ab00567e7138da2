use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;

/// Response after logging out from all devices
#[derive(Debug, Clone)]
pub struct LogoutAllDevicesResponse {
  /// Number of sessions that were terminated
  pub sessions_terminated: usize,
}

/// Use case for logging out a user from all devices
pub struct LogoutAllDevicesUseCase {
  auth_service: Arc<AuthService>,
}

impl LogoutAllDevicesUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, user_id: Uuid) -> Result<LogoutAllDevicesResponse, AuthError> {
    let sessions_terminated = self.auth_service.logout_all(user_id).await?;

    Ok(LogoutAllDevicesResponse {
      sessions_terminated,
    })
  }
}
