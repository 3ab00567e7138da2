use actix_web::{
  Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
  body::EitherBody,
  dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};

use crate::{
  adapters::http::errors::{ApiError, AuthErrorKind},
  application::auth::{CurrentUser, GetCurrentUserUseCase},
  domain::auth::AuthError,
};

/// Resolves the Bearer session token into a [`CurrentUser`] and stores it in request extensions
///
/// Requests without a usable token are answered with 401 before reaching the handler.
/// Storage failures while resolving the session surface as 500.
pub struct AuthMiddleware {
  get_user_use_case: Arc<GetCurrentUserUseCase>,
}

impl AuthMiddleware {
  pub fn new(get_user_use_case: Arc<GetCurrentUserUseCase>) -> Self {
    Self { get_user_use_case }
  }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = AuthMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(AuthMiddlewareService {
      service: Rc::new(service),
      get_user_use_case: self.get_user_use_case.clone(),
    }))
  }
}

pub struct AuthMiddlewareService<S> {
  service: Rc<S>,
  get_user_use_case: Arc<GetCurrentUserUseCase>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let get_user_use_case = self.get_user_use_case.clone();

    Box::pin(async move {
      let session_token = match extract_session_token(&req) {
        Ok(token) => token,
        Err(e) => return Ok(reject(req, e)),
      };

      let user = match get_user_use_case.execute(session_token).await {
        Ok(user) => user,
        Err(e @ (AuthError::InvalidSession | AuthError::UserNotFound)) => {
          tracing::debug!("Rejected session on {}: {}", req.path(), e);
          return Ok(reject(req, ApiError::Auth(AuthErrorKind::InvalidSession)));
        }
        Err(e) => return Ok(reject(req, ApiError::from(e))),
      };

      req.extensions_mut().insert(user);

      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}

fn reject<B>(req: ServiceRequest, error: ApiError) -> ServiceResponse<EitherBody<B>> {
  let (request, _) = req.into_parts();
  let response = error.error_response().map_into_right_body();
  ServiceResponse::new(request, response)
}

/// Extract session token from Authorization header
fn extract_session_token(req: &ServiceRequest) -> Result<String, ApiError> {
  req
    .headers()
    .get("Authorization")
    .and_then(|h| h.to_str().ok())
    .and_then(|s| s.strip_prefix("Bearer "))
    .map(|s| s.trim().to_string())
    .filter(|s| !s.is_empty())
    .ok_or(ApiError::Auth(AuthErrorKind::InvalidToken))
}

/// Handlers behind [`AuthMiddleware`] take the caller as an argument
impl FromRequest for CurrentUser {
  type Error = ApiError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
    ready(
      req
        .extensions()
        .get::<CurrentUser>()
        .cloned()
        .ok_or(ApiError::Auth(AuthErrorKind::InvalidToken)),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::{
    App, HttpResponse,
    http::StatusCode,
    test::{self, TestRequest},
    web,
  };

  use async_trait::async_trait;
  use uuid::Uuid;

  use crate::application::auth::test_support::{auth_service, register};
  use crate::domain::auth::{
    AuthService, AuthServiceConfig,
    entities::Session,
    errors::RepositoryError,
    ports::SessionRepository,
  };
  use crate::infrastructure::{persistence::memory::InMemoryStore, security::Argon2PasswordHasher};

  /// Session storage whose backend is unreachable
  struct UnreachableSessions;

  fn pool_timeout() -> AuthError {
    AuthError::Repository(RepositoryError::ConnectionFailed(
      "Pool timed out".to_string(),
    ))
  }

  #[async_trait]
  impl SessionRepository for UnreachableSessions {
    async fn create(&self, _session: Session) -> Result<Session, AuthError> {
      Err(pool_timeout())
    }

    async fn find_by_token_hash(&self, _token_hash: &str) -> Result<Option<Session>, AuthError> {
      Err(pool_timeout())
    }

    async fn find_by_user_id(&self, _user_id: Uuid) -> Result<Vec<Session>, AuthError> {
      Err(pool_timeout())
    }

    async fn delete(&self, _session_id: Uuid) -> Result<(), AuthError> {
      Err(pool_timeout())
    }

    async fn delete_all_for_user(&self, _user_id: Uuid) -> Result<(), AuthError> {
      Err(pool_timeout())
    }
  }

  #[test]
  fn test_extract_session_token_valid() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "Bearer test_token_123"))
      .to_srv_request();

    let token = extract_session_token(&req).unwrap();
    assert_eq!(token, "test_token_123");
  }

  #[test]
  fn test_extract_session_token_missing() {
    let req = TestRequest::default().to_srv_request();

    let result = extract_session_token(&req);
    assert!(result.is_err());
  }

  #[test]
  fn test_extract_session_token_invalid_format() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "Token abc"))
      .to_srv_request();

    let result = extract_session_token(&req);
    assert!(result.is_err());
  }

  async fn whoami(user: CurrentUser) -> HttpResponse {
    HttpResponse::Ok().body(user.email)
  }

  #[actix_web::test]
  async fn test_middleware_attaches_current_user() {
    let service = auth_service();
    let registered = register(&service, "mw@example.com").await;
    let use_case = Arc::new(GetCurrentUserUseCase::new(service));

    let app = test::init_service(
      App::new()
        .wrap(AuthMiddleware::new(use_case))
        .route("/", web::get().to(whoami)),
    )
    .await;

    let req = TestRequest::get()
      .uri("/")
      .insert_header((
        "Authorization",
        format!("Bearer {}", registered.session_token),
      ))
      .to_request();
    let body = test::call_and_read_body(&app, req).await;

    assert_eq!(body, "mw@example.com");
  }

  #[actix_web::test]
  async fn test_middleware_rejects_unknown_token() {
    let use_case = Arc::new(GetCurrentUserUseCase::new(auth_service()));

    let app = test::init_service(
      App::new()
        .wrap(AuthMiddleware::new(use_case))
        .route("/", web::get().to(whoami)),
    )
    .await;

    let req = TestRequest::get()
      .uri("/")
      .insert_header(("Authorization", format!("Bearer {}", "a".repeat(64))))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  #[actix_web::test]
  async fn test_middleware_reports_storage_outage_as_server_error() {
    let service = Arc::new(AuthService::new(
      Arc::new(InMemoryStore::new()),
      Arc::new(UnreachableSessions),
      Arc::new(Argon2PasswordHasher::new().unwrap()),
      AuthServiceConfig::default(),
    ));
    let use_case = Arc::new(GetCurrentUserUseCase::new(service));

    let app = test::init_service(
      App::new()
        .wrap(AuthMiddleware::new(use_case))
        .route("/", web::get().to(whoami)),
    )
    .await;

    let req = TestRequest::get()
      .uri("/")
      .insert_header(("Authorization", format!("Bearer {}", "b".repeat(64))))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "internal_error");
    assert!(!body.to_string().contains("Pool timed out"));
  }

  #[actix_web::test]
  async fn test_extractor_without_middleware_is_unauthorized() {
    let app = test::init_service(App::new().route("/", web::get().to(whoami))).await;

    let resp = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }
}
