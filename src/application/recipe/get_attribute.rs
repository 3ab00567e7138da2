use std::sync::Arc;
use uuid::Uuid;

use super::dto::{AttributeDto, AttributeKind};
use crate::domain::recipe::{RecipeError, RecipeService};

#[derive(Debug, Clone)]
pub struct GetAttributeCommand {
  pub user_id: Uuid,
  pub kind: AttributeKind,
  pub attribute_id: Uuid,
}

pub struct GetAttributeUseCase {
  recipe_service: Arc<RecipeService>,
}

impl GetAttributeUseCase {
  pub fn new(recipe_service: Arc<RecipeService>) -> Self {
    Self { recipe_service }
  }

  pub async fn execute(&self, command: GetAttributeCommand) -> Result<AttributeDto, RecipeError> {
    let dto: AttributeDto = match command.kind {
      AttributeKind::Tags => self
        .recipe_service
        .get_tag(command.user_id, command.attribute_id)
        .await?
        .into(),
      AttributeKind::Ingredients => self
        .recipe_service
        .get_ingredient(command.user_id, command.attribute_id)
        .await?
        .into(),
    };

    Ok(dto)
  }
}
