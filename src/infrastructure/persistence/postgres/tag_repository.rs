use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::recipe::{entities::Tag, errors::RecipeError, ports::TagRepository};

#[derive(Debug, FromRow)]
struct TagRow {
  id: Uuid,
  user_id: Uuid,
  name: String,
}

impl From<TagRow> for Tag {
  fn from(row: TagRow) -> Self {
    Tag::from_db(row.id, row.user_id, row.name)
  }
}

pub struct PostgresTagRepository {
  pool: PgPool,
}

impl PostgresTagRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
  async fn create(&self, tag: Tag) -> Result<Tag, RecipeError> {
    let row = sqlx::query_as::<_, TagRow>(
      r#"
            INSERT INTO tags (id, user_id, name)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, name
            "#,
    )
    .bind(tag.id)
    .bind(tag.user_id)
    .bind(&tag.name)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to create tag: {}", e);
      RecipeError::from(e)
    })?;

    Ok(row.into())
  }

  async fn update(&self, tag: Tag) -> Result<Tag, RecipeError> {
    let row = sqlx::query_as::<_, TagRow>(
      r#"
            UPDATE tags SET name = $2
            WHERE id = $1
            RETURNING id, user_id, name
            "#,
    )
    .bind(tag.id)
    .bind(&tag.name)
    .fetch_optional(&self.pool)
    .await?;

    row.map(Into::into).ok_or(RecipeError::TagNotFound)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Tag>, RecipeError> {
    let row = sqlx::query_as::<_, TagRow>("SELECT id, user_id, name FROM tags WHERE id = $1")
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;

    Ok(row.map(Into::into))
  }

  async fn find_by_ids(&self, user_id: Uuid, ids: &[Uuid]) -> Result<Vec<Tag>, RecipeError> {
    let rows = sqlx::query_as::<_, TagRow>(
      r#"
            SELECT id, user_id, name
            FROM tags
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
  ) -> Result<Vec<Tag>, RecipeError> {
    let rows = sqlx::query_as::<_, TagRow>(
      r#"
            SELECT t.id, t.user_id, t.name
            FROM tags t
            WHERE t.user_id = $1
              AND ($2 = FALSE OR EXISTS (
                    SELECT 1 FROM recipe_tags rt
                    JOIN recipes r ON r.id = rt.recipe_id
                    WHERE rt.tag_id = t.id AND r.user_id = $1))
            ORDER BY t.name ASC, t.id ASC
            "#,
    )
    .bind(user_id)
    .bind(assigned_only)
    .fetch_all(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to list tags for user {}: {}", user_id, e);
      RecipeError::from(e)
    })?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  /// recipe_tags rows go with the tag via ON DELETE CASCADE
  async fn delete(&self, id: Uuid) -> Result<(), RecipeError> {
    let result = sqlx::query("DELETE FROM tags WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    if result.rows_affected() == 0 {
      return Err(RecipeError::TagNotFound);
    }

    Ok(())
  }
}
