use std::sync::Arc;
use uuid::Uuid;

use super::dto::{AttributeDto, AttributeKind};
use crate::domain::recipe::{Name, RecipeError, RecipeService};

#[derive(Debug, Clone)]
pub struct CreateAttributeCommand {
  pub user_id: Uuid,
  pub kind: AttributeKind,
  pub name: String,
}

pub struct CreateAttributeUseCase {
  recipe_service: Arc<RecipeService>,
}

impl CreateAttributeUseCase {
  pub fn new(recipe_service: Arc<RecipeService>) -> Self {
    Self { recipe_service }
  }

  pub async fn execute(&self, command: CreateAttributeCommand) -> Result<AttributeDto, RecipeError> {
    let name = Name::new(command.name)?;

    let dto: AttributeDto = match command.kind {
      AttributeKind::Tags => self
        .recipe_service
        .create_tag(command.user_id, name)
        .await?
        .into(),
      AttributeKind::Ingredients => self
        .recipe_service
        .create_ingredient(command.user_id, name)
        .await?
        .into(),
    };

    Ok(dto)
  }
}
