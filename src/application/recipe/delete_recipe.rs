use std::sync::Arc;
use uuid::Uuid;

use crate::domain::recipe::{RecipeError, RecipeService};

#[derive(Debug, Clone)]
pub struct DeleteRecipeCommand {
  pub user_id: Uuid,
  pub recipe_id: Uuid,
}

pub struct DeleteRecipeUseCase {
  recipe_service: Arc<RecipeService>,
}

impl DeleteRecipeUseCase {
  pub fn new(recipe_service: Arc<RecipeService>) -> Self {
    Self { recipe_service }
  }

  pub async fn execute(&self, command: DeleteRecipeCommand) -> Result<(), RecipeError> {
    self
      .recipe_service
      .delete_recipe(command.user_id, command.recipe_id)
      .await
  }
}
