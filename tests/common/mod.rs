#![allow(dead_code)]

use actix_http::Request;
use actix_web::{
  App, Error,
  body::MessageBody,
  dev::{Service, ServiceResponse},
  middleware::NormalizePath,
  test,
};
use serde_json::{Value, json};
use std::sync::Arc;

use recipe_api::{
  adapters::http::{ApiDependencies, RequestIdMiddleware, configure_api},
  domain::auth::{AuthService, AuthServiceConfig},
  domain::recipe::RecipeService,
  infrastructure::{persistence::memory::InMemoryStore, security::Argon2PasswordHasher},
};

pub const PASSWORD: &str = "Test1234";

/// The full API over a fresh in-memory store
pub async fn test_app()
-> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
  let store = Arc::new(InMemoryStore::new());
  let auth_service = Arc::new(AuthService::new(
    store.clone(),
    store.clone(),
    Arc::new(Argon2PasswordHasher::new().unwrap()),
    AuthServiceConfig::default(),
  ));
  let recipe_service = Arc::new(RecipeService::new(store.clone(), store.clone(), store));
  let deps = ApiDependencies::new(auth_service, recipe_service);

  test::init_service(
    App::new()
      .wrap(NormalizePath::trim())
      .wrap(RequestIdMiddleware::new())
      .configure(|cfg| configure_api(cfg, &deps)),
  )
  .await
}

pub fn bearer(token: &str) -> (&'static str, String) {
  ("Authorization", format!("Bearer {}", token))
}

/// Registers a user and returns its session token
pub async fn register<S, B>(app: &S, email: &str) -> String
where
  S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
  B: MessageBody,
{
  let req = test::TestRequest::post()
    .uri("/api/user/register")
    .set_json(json!({ "email": email, "password": PASSWORD, "name": "Cook" }))
    .to_request();
  let body: Value = test::call_and_read_body_json(app, req).await;

  body["session_token"]
    .as_str()
    .expect("registration should return a session token")
    .to_string()
}

/// Creates a tag or ingredient and returns its id
pub async fn create_attribute<S, B>(app: &S, token: &str, kind: &str, name: &str) -> String
where
  S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
  B: MessageBody,
{
  let req = test::TestRequest::post()
    .uri(&format!("/api/recipe/{}", kind))
    .insert_header(bearer(token))
    .set_json(json!({ "name": name }))
    .to_request();
  let body: Value = test::call_and_read_body_json(app, req).await;

  body["id"].as_str().expect("created item should have an id").to_string()
}

/// Creates a recipe from a JSON body and returns the response body
pub async fn create_recipe<S, B>(app: &S, token: &str, body: Value) -> Value
where
  S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
  B: MessageBody,
{
  let req = test::TestRequest::post()
    .uri("/api/recipe/recipes")
    .insert_header(bearer(token))
    .set_json(body)
    .to_request();

  test::call_and_read_body_json(app, req).await
}

pub fn sample_recipe(title: &str) -> Value {
  json!({ "title": title, "time_minutes": 10, "price": "5.00" })
}
