use std::sync::Arc;
use uuid::Uuid;

use super::dto::{AttributeDto, AttributeKind};
use crate::domain::recipe::{Name, RecipeError, RecipeService};

#[derive(Debug, Clone)]
pub struct RenameAttributeCommand {
  pub user_id: Uuid,
  pub kind: AttributeKind,
  pub attribute_id: Uuid,
  pub name: String,
}

pub struct RenameAttributeUseCase {
  recipe_service: Arc<RecipeService>,
}

impl RenameAttributeUseCase {
  pub fn new(recipe_service: Arc<RecipeService>) -> Self {
    Self { recipe_service }
  }

  pub async fn execute(&self, command: RenameAttributeCommand) -> Result<AttributeDto, RecipeError> {
    let name = Name::new(command.name)?;

    let dto: AttributeDto = match command.kind {
      AttributeKind::Tags => self
        .recipe_service
        .rename_tag(command.user_id, command.attribute_id, name)
        .await?
        .into(),
      AttributeKind::Ingredients => self
        .recipe_service
        .rename_ingredient(command.user_id, command.attribute_id, name)
        .await?
        .into(),
    };

    Ok(dto)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::recipe::test_support::recipe_service;
  use crate::application::recipe::{CreateAttributeCommand, CreateAttributeUseCase};

  #[tokio::test]
  async fn test_cannot_rename_foreign_tag() {
    let service = recipe_service();
    let tag = CreateAttributeUseCase::new(service.clone())
      .execute(CreateAttributeCommand {
        user_id: Uuid::new_v4(),
        kind: AttributeKind::Tags,
        name: "Mine".to_string(),
      })
      .await
      .unwrap();

    let result = RenameAttributeUseCase::new(service)
      .execute(RenameAttributeCommand {
        user_id: Uuid::new_v4(),
        kind: AttributeKind::Tags,
        attribute_id: tag.id,
        name: "Stolen".to_string(),
      })
      .await;

    assert!(matches!(result, Err(RecipeError::TagNotFound)));
  }
}
