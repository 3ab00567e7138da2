pub mod attributes;
pub mod auth;
pub mod recipes;

/// GET /health
pub async fn health_handler() -> &'static str {
  "OK"
}
