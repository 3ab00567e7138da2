use thiserror::Error;

use super::value_objects::ValueObjectError;

/// Recipe domain errors
#[derive(Debug, Error)]
pub enum RecipeError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Recipe not found")]
  RecipeNotFound,

  #[error("Tag not found")]
  TagNotFound,

  #[error("Ingredient not found")]
  IngredientNotFound,

  #[error("Unknown tag: {0}")]
  UnknownTag(uuid::Uuid),

  #[error("Unknown ingredient: {0}")]
  UnknownIngredient(uuid::Uuid),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_display() {
    let id = uuid::Uuid::nil();
    assert_eq!(
      RecipeError::UnknownTag(id).to_string(),
      format!("Unknown tag: {}", id)
    );
    assert_eq!(RecipeError::RecipeNotFound.to_string(), "Recipe not found");
  }

  #[test]
  fn test_from_value_object_error() {
    let err: RecipeError = ValueObjectError::InvalidTitle("empty".to_string()).into();
    assert!(matches!(err, RecipeError::Validation(_)));
  }
}
