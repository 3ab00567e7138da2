use std::sync::Arc;
use uuid::Uuid;

use super::dto::RecipeDetailsDto;
use crate::domain::recipe::{RecipeError, RecipeService};

#[derive(Debug, Clone)]
pub struct GetRecipeDetailsCommand {
  pub user_id: Uuid,
  pub recipe_id: Uuid,
}

pub struct GetRecipeDetailsUseCase {
  recipe_service: Arc<RecipeService>,
}

impl GetRecipeDetailsUseCase {
  pub fn new(recipe_service: Arc<RecipeService>) -> Self {
    Self { recipe_service }
  }

  /// # Errors
  /// Returns `RecipeError::RecipeNotFound` when the recipe is missing or owned by someone else
  pub async fn execute(
    &self,
    command: GetRecipeDetailsCommand,
  ) -> Result<RecipeDetailsDto, RecipeError> {
    let details = self
      .recipe_service
      .get_recipe_details(command.user_id, command.recipe_id)
      .await?;

    Ok(details.into())
  }
}
