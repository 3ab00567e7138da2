use std::sync::Arc;
use uuid::Uuid;

use super::create_recipe::RecipeFields;
use super::dto::RecipeDto;
use crate::domain::recipe::{RecipeData, RecipeError, RecipeService};

/// Full replacement; an omitted link, tag list or ingredient list is cleared
#[derive(Debug, Clone)]
pub struct ReplaceRecipeCommand {
  pub user_id: Uuid,
  pub recipe_id: Uuid,
  pub fields: RecipeFields,
}

pub struct ReplaceRecipeUseCase {
  recipe_service: Arc<RecipeService>,
}

impl ReplaceRecipeUseCase {
  pub fn new(recipe_service: Arc<RecipeService>) -> Self {
    Self { recipe_service }
  }

  pub async fn execute(&self, command: ReplaceRecipeCommand) -> Result<RecipeDto, RecipeError> {
    let data = RecipeData::try_from(command.fields)?;

    let recipe = self
      .recipe_service
      .replace_recipe(command.user_id, command.recipe_id, data)
      .await?;

    Ok(recipe.into())
  }
}
