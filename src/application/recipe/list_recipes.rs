use std::sync::Arc;
use uuid::Uuid;

use super::dto::RecipeDto;
use crate::domain::recipe::{RecipeError, RecipeFilter, RecipeService};

#[derive(Debug, Clone, Default)]
pub struct ListRecipesCommand {
  pub user_id: Uuid,
  /// Keep recipes carrying any of these tags
  pub tag_ids: Vec<Uuid>,
  /// Keep recipes using any of these ingredients
  pub ingredient_ids: Vec<Uuid>,
}

#[derive(Debug, Clone)]
pub struct ListRecipesResponse {
  pub recipes: Vec<RecipeDto>,
}

pub struct ListRecipesUseCase {
  recipe_service: Arc<RecipeService>,
}

impl ListRecipesUseCase {
  pub fn new(recipe_service: Arc<RecipeService>) -> Self {
    Self { recipe_service }
  }

  pub async fn execute(
    &self,
    command: ListRecipesCommand,
  ) -> Result<ListRecipesResponse, RecipeError> {
    let filter = RecipeFilter {
      tag_ids: command.tag_ids,
      ingredient_ids: command.ingredient_ids,
    };

    let recipes = self
      .recipe_service
      .list_recipes(command.user_id, &filter)
      .await?;

    Ok(ListRecipesResponse {
      recipes: recipes.into_iter().map(Into::into).collect(),
    })
  }
}
