use std::sync::Arc;
use uuid::Uuid;

use super::dto::{AttributeDto, AttributeKind};
use crate::domain::recipe::{RecipeError, RecipeService};

#[derive(Debug, Clone)]
pub struct ListAttributesCommand {
  pub user_id: Uuid,
  pub kind: AttributeKind,
  /// Only attributes attached to at least one of the user's recipes
  pub assigned_only: bool,
}

/// Lists the caller's tags or ingredients ordered by name
pub struct ListAttributesUseCase {
  recipe_service: Arc<RecipeService>,
}

impl ListAttributesUseCase {
  pub fn new(recipe_service: Arc<RecipeService>) -> Self {
    Self { recipe_service }
  }

  pub async fn execute(
    &self,
    command: ListAttributesCommand,
  ) -> Result<Vec<AttributeDto>, RecipeError> {
    let items: Vec<AttributeDto> = match command.kind {
      AttributeKind::Tags => self
        .recipe_service
        .list_tags(command.user_id, command.assigned_only)
        .await?
        .into_iter()
        .map(Into::into)
        .collect(),
      AttributeKind::Ingredients => self
        .recipe_service
        .list_ingredients(command.user_id, command.assigned_only)
        .await?
        .into_iter()
        .map(Into::into)
        .collect(),
    };

    Ok(items)
  }
}
