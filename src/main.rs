use actix_web::{
  App, HttpServer,
  middleware::{Logger, NormalizePath},
};
use anyhow::Context;
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recipe_api::{
  adapters::http::{ApiDependencies, RequestIdMiddleware, configure_api},
  domain::auth::{AuthService, AuthServiceConfig},
  domain::recipe::RecipeService,
  infrastructure::{
    config::{Config, DatabaseConfig, StorageBackend},
    persistence::{
      memory::InMemoryStore,
      postgres::{
        PostgresIngredientRepository, PostgresRecipeRepository, PostgresSessionRepository,
        PostgresTagRepository, PostgresUserRepository,
      },
    },
    security::Argon2PasswordHasher,
  },
};

async fn connect_postgres(database: &DatabaseConfig) -> anyhow::Result<PgPool> {
  tracing::info!("Connecting to database");

  let pool = tokio::time::timeout(
    Duration::from_secs(database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(database.max_connections)
      .acquire_timeout(Duration::from_secs(database.acquire_timeout_seconds))
      .connect(&database.url),
  )
  .await
  .with_context(|| {
    format!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      database.connect_timeout_seconds
    )
  })?
  .context("Failed to connect to database")?;

  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .context("Failed to run database migrations")?;
  tracing::info!("Database migrations completed");

  Ok(pool)
}

async fn build_services(config: &Config) -> anyhow::Result<(Arc<AuthService>, Arc<RecipeService>)> {
  let password_hasher = Arc::new(Argon2PasswordHasher::new().context("Invalid Argon2 parameters")?);
  let auth_config = AuthServiceConfig::from(&config.security);

  match config.database.backend {
    StorageBackend::Postgres => {
      let pool = connect_postgres(&config.database).await?;

      let auth_service = AuthService::new(
        Arc::new(PostgresUserRepository::new(pool.clone())),
        Arc::new(PostgresSessionRepository::new(pool.clone())),
        password_hasher,
        auth_config,
      );
      let recipe_service = RecipeService::new(
        Arc::new(PostgresRecipeRepository::new(pool.clone())),
        Arc::new(PostgresTagRepository::new(pool.clone())),
        Arc::new(PostgresIngredientRepository::new(pool)),
      );

      Ok((Arc::new(auth_service), Arc::new(recipe_service)))
    }
    StorageBackend::Memory => {
      tracing::warn!("Using in-memory storage; all data is lost on shutdown");
      let store = Arc::new(InMemoryStore::new());

      let auth_service =
        AuthService::new(store.clone(), store.clone(), password_hasher, auth_config);
      let recipe_service = RecipeService::new(store.clone(), store.clone(), store);

      Ok((Arc::new(auth_service), Arc::new(recipe_service)))
    }
  }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "recipe_api=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting recipe API");

  let config = Config::load().context("Failed to load configuration")?;
  tracing::info!(
    "Configuration loaded (storage backend: {:?})",
    config.database.backend
  );

  let (auth_service, recipe_service) = build_services(&config).await?;
  let deps = ApiDependencies::new(auth_service, recipe_service);

  let bind_address = format!("{}:{}", config.server.host, config.server.port);
  tracing::info!("Listening on http://{}", bind_address);

  HttpServer::new(move || {
    App::new()
      .wrap(NormalizePath::trim())
      .wrap(Logger::default())
      .wrap(RequestIdMiddleware::new())
      .configure(|cfg| configure_api(cfg, &deps))
  })
  .bind(&bind_address)
  .with_context(|| format!("Failed to bind {}", bind_address))?
  .run()
  .await
  .context("HTTP server error")?;

  Ok(())
}
