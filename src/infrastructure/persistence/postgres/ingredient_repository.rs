use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::recipe::{
  entities::Ingredient, errors::RecipeError, ports::IngredientRepository,
};

#[derive(Debug, FromRow)]
struct IngredientRow {
  id: Uuid,
  user_id: Uuid,
  name: String,
}

impl From<IngredientRow> for Ingredient {
  fn from(row: IngredientRow) -> Self {
    Ingredient::from_db(row.id, row.user_id, row.name)
  }
}

pub struct PostgresIngredientRepository {
  pool: PgPool,
}

impl PostgresIngredientRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl IngredientRepository for PostgresIngredientRepository {
  async fn create(&self, ingredient: Ingredient) -> Result<Ingredient, RecipeError> {
    let row = sqlx::query_as::<_, IngredientRow>(
      r#"
            INSERT INTO ingredients (id, user_id, name)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, name
            "#,
    )
    .bind(ingredient.id)
    .bind(ingredient.user_id)
    .bind(&ingredient.name)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to create ingredient: {}", e);
      RecipeError::from(e)
    })?;

    Ok(row.into())
  }

  async fn update(&self, ingredient: Ingredient) -> Result<Ingredient, RecipeError> {
    let row = sqlx::query_as::<_, IngredientRow>(
      r#"
            UPDATE ingredients SET name = $2
            WHERE id = $1
            RETURNING id, user_id, name
            "#,
    )
    .bind(ingredient.id)
    .bind(&ingredient.name)
    .fetch_optional(&self.pool)
    .await?;

    row.map(Into::into).ok_or(RecipeError::IngredientNotFound)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Ingredient>, RecipeError> {
    let row = sqlx::query_as::<_, IngredientRow>(
      "SELECT id, user_id, name FROM ingredients WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Into::into))
  }

  async fn find_by_ids(
    &self,
    user_id: Uuid,
    ids: &[Uuid],
  ) -> Result<Vec<Ingredient>, RecipeError> {
    let rows = sqlx::query_as::<_, IngredientRow>(
      r#"
            SELECT id, user_id, name
            FROM ingredients
            WHERE user_id = $1 AND id = ANY($2)
            ORDER BY name ASC, id ASC
            "#,
    )
    .bind(user_id)
    .bind(ids)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  async fn find_by_user(
    &self,
    user_id: Uuid,
    assigned_only: bool,
  ) -> Result<Vec<Ingredient>, RecipeError> {
    let rows = sqlx::query_as::<_, IngredientRow>(
      r#"
            SELECT i.id, i.user_id, i.name
            FROM ingredients i
            WHERE i.user_id = $1
              AND ($2 = FALSE OR EXISTS (
                    SELECT 1 FROM recipe_ingredients ri
                    JOIN recipes r ON r.id = ri.recipe_id
                    WHERE ri.ingredient_id = i.id AND r.user_id = $1))
            ORDER BY i.name ASC, i.id ASC
            "#,
    )
    .bind(user_id)
    .bind(assigned_only)
    .fetch_all(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to list ingredients for user {}: {}", user_id, e);
      RecipeError::from(e)
    })?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  async fn delete(&self, id: Uuid) -> Result<(), RecipeError> {
    let result = sqlx::query("DELETE FROM ingredients WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    if result.rows_affected() == 0 {
      return Err(RecipeError::IngredientNotFound);
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::recipe::entities::Recipe;
  use crate::domain::recipe::ports::RecipeRepository;
  use crate::domain::recipe::value_objects::{CookingTime, Name, Price, RecipeTitle};
  use crate::infrastructure::persistence::postgres::PostgresRecipeRepository;
  use crate::infrastructure::persistence::postgres::test_support::{create_test_user, setup_test_db};
  use rust_decimal::Decimal;

  #[tokio::test]
  #[ignore = "requires a Docker daemon"]
  async fn test_assigned_only_and_cascade() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresIngredientRepository::new(pool.clone());
    let recipes = PostgresRecipeRepository::new(pool.clone());
    let owner = create_test_user(&pool).await;

    let salt = repo
      .create(Ingredient::new(owner, Name::new("Salt").unwrap()))
      .await
      .unwrap();
    repo
      .create(Ingredient::new(owner, Name::new("Saffron").unwrap()))
      .await
      .unwrap();

    let mut soup = Recipe::new(
      owner,
      RecipeTitle::new("Soup").unwrap(),
      CookingTime::new(30).unwrap(),
      Price::new(Decimal::TEN).unwrap(),
      None,
    );
    soup.set_ingredients(vec![salt.id]);
    let soup = recipes.create(soup).await.unwrap();

    let assigned = repo.find_by_user(owner, true).await.unwrap();
    assert_eq!(assigned, vec![salt.clone()]);

    repo.delete(salt.id).await.unwrap();
    let soup = recipes.find_by_id(soup.id).await.unwrap().unwrap();
    assert!(soup.ingredient_ids.is_empty());
  }
}
