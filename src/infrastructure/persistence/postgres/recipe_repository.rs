use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::recipe::{
  entities::Recipe,
  errors::RecipeError,
  ports::{RecipeFilter, RecipeRepository},
};

/// Recipe columns plus the sorted id arrays of its links
const SELECT_RECIPE: &str = r#"
            SELECT
                r.id, r.user_id, r.title, r.time_minutes, r.price, r.link,
                r.created_at, r.updated_at,
                ARRAY(SELECT rt.tag_id FROM recipe_tags rt
                      WHERE rt.recipe_id = r.id ORDER BY rt.tag_id) AS tag_ids,
                ARRAY(SELECT ri.ingredient_id FROM recipe_ingredients ri
                      WHERE ri.recipe_id = r.id ORDER BY ri.ingredient_id) AS ingredient_ids
            FROM recipes r
"#;

#[derive(Debug, FromRow)]
struct RecipeRow {
  id: Uuid,
  user_id: Uuid,
  title: String,
  time_minutes: i32,
  price: Decimal,
  link: Option<String>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
  tag_ids: Vec<Uuid>,
  ingredient_ids: Vec<Uuid>,
}

impl From<RecipeRow> for Recipe {
  fn from(row: RecipeRow) -> Self {
    let mut recipe = Recipe::from_db(
      row.id,
      row.user_id,
      row.title,
      row.time_minutes,
      row.price,
      row.link,
      row.created_at,
      row.updated_at,
    );
    recipe.tag_ids = row.tag_ids;
    recipe.ingredient_ids = row.ingredient_ids;
    recipe
  }
}

pub struct PostgresRecipeRepository {
  pool: PgPool,
}

impl PostgresRecipeRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  async fn replace_links(
    tx: &mut Transaction<'_, Postgres>,
    recipe: &Recipe,
  ) -> Result<(), RecipeError> {
    sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = $1")
      .bind(recipe.id)
      .execute(&mut **tx)
      .await?;
    sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
      .bind(recipe.id)
      .execute(&mut **tx)
      .await?;

    if !recipe.tag_ids.is_empty() {
      sqlx::query(
        r#"
            INSERT INTO recipe_tags (recipe_id, tag_id)
            SELECT $1, UNNEST($2::uuid[])
            "#,
      )
      .bind(recipe.id)
      .bind(recipe.tag_ids.as_slice())
      .execute(&mut **tx)
      .await?;
    }

    if !recipe.ingredient_ids.is_empty() {
      sqlx::query(
        r#"
            INSERT INTO recipe_ingredients (recipe_id, ingredient_id)
            SELECT $1, UNNEST($2::uuid[])
            "#,
      )
      .bind(recipe.id)
      .bind(recipe.ingredient_ids.as_slice())
      .execute(&mut **tx)
      .await?;
    }

    Ok(())
  }

  async fn fetch(&self, id: Uuid) -> Result<Recipe, RecipeError> {
    self
      .find_by_id(id)
      .await?
      .ok_or(RecipeError::RecipeNotFound)
  }
}

#[async_trait]
impl RecipeRepository for PostgresRecipeRepository {
  async fn create(&self, recipe: Recipe) -> Result<Recipe, RecipeError> {
    let mut tx = self.pool.begin().await?;

    sqlx::query(
      r#"
            INSERT INTO recipes (id, user_id, title, time_minutes, price, link, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
    )
    .bind(recipe.id)
    .bind(recipe.user_id)
    .bind(&recipe.title)
    .bind(recipe.time_minutes)
    .bind(recipe.price)
    .bind(&recipe.link)
    .bind(recipe.created_at)
    .bind(recipe.updated_at)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
      tracing::error!("Failed to create recipe: {}", e);
      RecipeError::from(e)
    })?;

    Self::replace_links(&mut tx, &recipe).await?;
    tx.commit().await?;

    self.fetch(recipe.id).await
  }

  async fn update(&self, recipe: Recipe) -> Result<Recipe, RecipeError> {
    let mut tx = self.pool.begin().await?;

    let result = sqlx::query(
      r#"
            UPDATE recipes
            SET title = $2, time_minutes = $3, price = $4, link = $5, updated_at = $6
            WHERE id = $1
            "#,
    )
    .bind(recipe.id)
    .bind(&recipe.title)
    .bind(recipe.time_minutes)
    .bind(recipe.price)
    .bind(&recipe.link)
    .bind(recipe.updated_at)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
      tracing::error!("Failed to update recipe {}: {}", recipe.id, e);
      RecipeError::from(e)
    })?;

    if result.rows_affected() == 0 {
      return Err(RecipeError::RecipeNotFound);
    }

    Self::replace_links(&mut tx, &recipe).await?;
    tx.commit().await?;

    self.fetch(recipe.id).await
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, RecipeError> {
    let sql = format!("{} WHERE r.id = $1", SELECT_RECIPE);
    let row = sqlx::query_as::<_, RecipeRow>(&sql)
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;

    Ok(row.map(Into::into))
  }

  async fn find_by_user(
    &self,
    user_id: Uuid,
    filter: &RecipeFilter,
  ) -> Result<Vec<Recipe>, RecipeError> {
    let sql = format!(
      r#"{}
            WHERE r.user_id = $1
              AND (CARDINALITY($2::uuid[]) = 0 OR EXISTS (
                    SELECT 1 FROM recipe_tags rt
                    WHERE rt.recipe_id = r.id AND rt.tag_id = ANY($2)))
              AND (CARDINALITY($3::uuid[]) = 0 OR EXISTS (
                    SELECT 1 FROM recipe_ingredients ri
                    WHERE ri.recipe_id = r.id AND ri.ingredient_id = ANY($3)))
            ORDER BY r.created_at ASC, r.id ASC
            "#,
      SELECT_RECIPE
    );

    let rows = sqlx::query_as::<_, RecipeRow>(&sql)
      .bind(user_id)
      .bind(filter.tag_ids.as_slice())
      .bind(filter.ingredient_ids.as_slice())
      .fetch_all(&self.pool)
      .await
      .map_err(|e| {
        tracing::error!("Failed to list recipes for user {}: {}", user_id, e);
        RecipeError::from(e)
      })?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  async fn delete(&self, id: Uuid) -> Result<(), RecipeError> {
    let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    if result.rows_affected() == 0 {
      return Err(RecipeError::RecipeNotFound);
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::recipe::entities::Tag;
  use crate::domain::recipe::ports::TagRepository;
  use crate::domain::recipe::value_objects::{CookingTime, Name, Price, RecipeTitle};
  use crate::infrastructure::persistence::postgres::PostgresTagRepository;
  use crate::infrastructure::persistence::postgres::test_support::{create_test_user, setup_test_db};
  use rust_decimal_macros::dec;

  fn recipe(user_id: Uuid, title: &str) -> Recipe {
    Recipe::new(
      user_id,
      RecipeTitle::new(title).unwrap(),
      CookingTime::new(20).unwrap(),
      Price::new(dec!(4.25)).unwrap(),
      None,
    )
  }

  #[tokio::test]
  #[ignore = "requires a Docker daemon"]
  async fn test_create_with_links_and_filter() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresRecipeRepository::new(pool.clone());
    let tags = PostgresTagRepository::new(pool.clone());
    let user_id = create_test_user(&pool).await;

    let tag = tags
      .create(Tag::new(user_id, Name::new("Dinner").unwrap()))
      .await
      .unwrap();

    let mut tagged = recipe(user_id, "Stew");
    tagged.set_tags(vec![tag.id]);
    let created = repo.create(tagged).await.unwrap();
    repo.create(recipe(user_id, "Toast")).await.unwrap();

    assert_eq!(created.tag_ids, vec![tag.id]);
    assert_eq!(created.price, dec!(4.25));

    let filter = RecipeFilter {
      tag_ids: vec![tag.id],
      ..Default::default()
    };
    let filtered = repo.find_by_user(user_id, &filter).await.unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].title, "Stew");

    let all = repo
      .find_by_user(user_id, &RecipeFilter::default())
      .await
      .unwrap();
    assert_eq!(all.len(), 2);
  }

  #[tokio::test]
  #[ignore = "requires a Docker daemon"]
  async fn test_update_replaces_links() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresRecipeRepository::new(pool.clone());
    let tags = PostgresTagRepository::new(pool.clone());
    let user_id = create_test_user(&pool).await;

    let tag = tags
      .create(Tag::new(user_id, Name::new("Lunch").unwrap()))
      .await
      .unwrap();
    let mut stored = recipe(user_id, "Wrap");
    stored.set_tags(vec![tag.id]);
    let mut stored = repo.create(stored).await.unwrap();

    stored.set_tags(Vec::new());
    stored.set_title(RecipeTitle::new("Better wrap").unwrap());
    let updated = repo.update(stored).await.unwrap();

    assert_eq!(updated.title, "Better wrap");
    assert!(updated.tag_ids.is_empty());
  }

  #[tokio::test]
  #[ignore = "requires a Docker daemon"]
  async fn test_delete_missing_recipe() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresRecipeRepository::new(pool);

    assert!(matches!(
      repo.delete(Uuid::new_v4()).await,
      Err(RecipeError::RecipeNotFound)
    ));
  }
}
