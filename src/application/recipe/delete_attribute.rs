use std::sync::Arc;
use uuid::Uuid;

use super::dto::AttributeKind;
use crate::domain::recipe::{RecipeError, RecipeService};

#[derive(Debug, Clone)]
pub struct DeleteAttributeCommand {
  pub user_id: Uuid,
  pub kind: AttributeKind,
  pub attribute_id: Uuid,
}

/// Deletes a tag or ingredient; recipes using it simply lose the link
pub struct DeleteAttributeUseCase {
  recipe_service: Arc<RecipeService>,
}

impl DeleteAttributeUseCase {
  pub fn new(recipe_service: Arc<RecipeService>) -> Self {
    Self { recipe_service }
  }

  pub async fn execute(&self, command: DeleteAttributeCommand) -> Result<(), RecipeError> {
    match command.kind {
      AttributeKind::Tags => {
        self
          .recipe_service
          .delete_tag(command.user_id, command.attribute_id)
          .await
      }
      AttributeKind::Ingredients => {
        self
          .recipe_service
          .delete_ingredient(command.user_id, command.attribute_id)
          .await
      }
    }
  }
}
