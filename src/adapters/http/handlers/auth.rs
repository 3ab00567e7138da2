use actix_web::{HttpRequest, HttpResponse, web};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{
    CurrentUserResponse, LoginRequest, LoginResponse, LogoutAllResponse, RegisterRequest,
    RegisterResponse, SuccessResponse, UpdateProfileRequest,
  },
  errors::{ApiError, AuthErrorKind},
};
use crate::application::auth::{
  CurrentUser, DeleteCurrentUserUseCase, LoginUserCommand, LoginUserUseCase,
  LogoutAllDevicesUseCase, LogoutUserUseCase, RegisterUserCommand, RegisterUserUseCase,
  UpdateCurrentUserCommand, UpdateCurrentUserUseCase,
};

/// Extract session token from Authorization header
fn extract_session_token(req: &HttpRequest) -> Result<String, ApiError> {
  req
    .headers()
    .get("Authorization")
    .and_then(|h| h.to_str().ok())
    .and_then(|s| s.strip_prefix("Bearer "))
    .map(|s| s.trim().to_string())
    .filter(|s| !s.is_empty())
    .ok_or(ApiError::Auth(AuthErrorKind::InvalidToken))
}

/// Extract IP address from the request
fn extract_ip_address(req: &HttpRequest) -> Option<IpAddr> {
  let addr = req.connection_info().realip_remote_addr()?.to_string();
  // "1.2.3.4:5678" and "[::1]:5678" carry a port, bare addresses don't
  addr
    .parse::<SocketAddr>()
    .map(|socket| socket.ip())
    .or_else(|_| addr.parse::<IpAddr>())
    .ok()
}

/// Extract user agent from the request
fn extract_user_agent(req: &HttpRequest) -> Option<String> {
  req
    .headers()
    .get("User-Agent")
    .and_then(|h| h.to_str().ok())
    .map(|s| s.to_string())
}

impl From<CurrentUser> for CurrentUserResponse {
  fn from(user: CurrentUser) -> Self {
    Self {
      user_id: user.user_id,
      email: user.email,
      name: user.name,
      created_at: user.created_at,
    }
  }
}

/// Handler for user registration
///
/// POST /api/user/register
/// Body: RegisterRequest (JSON)
/// Response: RegisterResponse (JSON) with status 201
pub async fn register_handler(
  request: web::Json<RegisterRequest>,
  use_case: web::Data<Arc<RegisterUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let command = RegisterUserCommand {
    email: request.email,
    password: request.password,
    name: request.name,
  };

  let response = use_case.execute(command).await?;
  tracing::info!("Registered user {}", response.user_id);

  Ok(HttpResponse::Created().json(RegisterResponse {
    user_id: response.user_id,
    email: response.email,
    name: response.name,
    session_token: response.session_token,
    expires_at: response.expires_at,
  }))
}

/// Handler for user login
///
/// POST /api/user/login
/// Body: LoginRequest (JSON)
/// Response: LoginResponse (JSON) with status 200
pub async fn login_handler(
  request: web::Json<LoginRequest>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let ip_address = extract_ip_address(&http_req);
  let user_agent = extract_user_agent(&http_req);

  let request = request.into_inner();
  let command = LoginUserCommand {
    email: request.email,
    password: request.password,
    remember_me: request.remember_me,
  };

  let response = use_case.execute(command, ip_address, user_agent).await?;

  Ok(HttpResponse::Ok().json(LoginResponse {
    user_id: response.user_id,
    email: response.email,
    session_token: response.session_token,
    expires_at: response.expires_at,
  }))
}

/// Handler for user logout
///
/// POST /api/user/logout
/// Headers: Authorization: Bearer <token>
/// Response: SuccessResponse (JSON) with status 200
pub async fn logout_handler(
  use_case: web::Data<Arc<LogoutUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let session_token = extract_session_token(&http_req)?;

  use_case.execute(session_token).await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: "Successfully logged out".to_string(),
  }))
}

/// Handler for logging out from all devices
///
/// POST /api/user/logout-all
/// Response: LogoutAllResponse (JSON) with status 200
pub async fn logout_all_handler(
  user: CurrentUser,
  use_case: web::Data<Arc<LogoutAllDevicesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case.execute(user.user_id).await?;

  Ok(HttpResponse::Ok().json(LogoutAllResponse {
    sessions_terminated: response.sessions_terminated,
    message: format!(
      "Successfully logged out from {} device(s)",
      response.sessions_terminated
    ),
  }))
}

/// GET /api/user/me
pub async fn get_me_handler(user: CurrentUser) -> Result<HttpResponse, ApiError> {
  Ok(HttpResponse::Ok().json(CurrentUserResponse::from(user)))
}

/// PATCH /api/user/me
pub async fn update_me_handler(
  user: CurrentUser,
  request: web::Json<UpdateProfileRequest>,
  use_case: web::Data<Arc<UpdateCurrentUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let updated = use_case
    .execute(UpdateCurrentUserCommand {
      user_id: user.user_id,
      name: request.name,
      password: request.password,
    })
    .await?;

  Ok(HttpResponse::Ok().json(CurrentUserResponse::from(updated)))
}

/// DELETE /api/user/me
///
/// Removes the account together with its sessions, recipes, tags and ingredients.
pub async fn delete_me_handler(
  user: CurrentUser,
  use_case: web::Data<Arc<DeleteCurrentUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  use_case.execute(user.user_id).await?;
  tracing::info!("Deleted user {}", user.user_id);

  Ok(HttpResponse::NoContent().finish())
}
