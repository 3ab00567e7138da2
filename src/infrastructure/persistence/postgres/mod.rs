pub mod ingredient_repository;
pub mod recipe_repository;
pub mod session_repository;
pub mod tag_repository;
pub mod user_repository;

pub use ingredient_repository::PostgresIngredientRepository;
pub use recipe_repository::PostgresRecipeRepository;
pub use session_repository::PostgresSessionRepository;
pub use tag_repository::PostgresTagRepository;
pub use user_repository::PostgresUserRepository;

#[cfg(test)]
pub(crate) mod test_support {
  use sqlx::PgPool;
  use sqlx::postgres::PgPoolOptions;
  use testcontainers::ImageExt;
  use testcontainers_modules::postgres::Postgres;
  use testcontainers_modules::testcontainers::{ContainerAsync, runners::AsyncRunner};
  use uuid::Uuid;

  /// Starts a throwaway PostgreSQL container with migrations applied
  pub async fn setup_test_db() -> (PgPool, ContainerAsync<Postgres>) {
    let container = Postgres::default()
      .with_tag("16-alpine")
      .start()
      .await
      .expect("Failed to start postgres container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
      .get_host_port_ipv4(5432)
      .await
      .expect("Failed to get port");
    let database_url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

    let pool = PgPoolOptions::new()
      .max_connections(5)
      .connect(&database_url)
      .await
      .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
      .run(&pool)
      .await
      .expect("Failed to run migrations");

    (pool, container)
  }

  pub async fn create_test_user(pool: &PgPool) -> Uuid {
    let user_id = Uuid::new_v4();
    sqlx::query(
      r#"
            INSERT INTO users (id, email, password_hash, name)
            VALUES ($1, $2, 'hash', 'Test User')
            "#,
    )
    .bind(user_id)
    .bind(format!("test_{}@example.com", user_id))
    .execute(pool)
    .await
    .expect("Failed to create test user");
    user_id
  }
}
