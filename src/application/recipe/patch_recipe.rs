use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use super::dto::RecipeDto;
use crate::domain::recipe::{
  CookingTime, Price, RecipeError, RecipeLink, RecipePatch, RecipeService, RecipeTitle,
};

/// Partial update; `None` leaves the field as it is
#[derive(Debug, Clone, Default)]
pub struct PatchRecipeCommand {
  pub user_id: Uuid,
  pub recipe_id: Uuid,
  pub title: Option<String>,
  pub time_minutes: Option<i32>,
  pub price: Option<Decimal>,
  /// `Some(None)` clears the link
  pub link: Option<Option<String>>,
  pub tags: Option<Vec<Uuid>>,
  pub ingredients: Option<Vec<Uuid>>,
}

pub struct PatchRecipeUseCase {
  recipe_service: Arc<RecipeService>,
}

impl PatchRecipeUseCase {
  pub fn new(recipe_service: Arc<RecipeService>) -> Self {
    Self { recipe_service }
  }

  pub async fn execute(&self, command: PatchRecipeCommand) -> Result<RecipeDto, RecipeError> {
    let patch = RecipePatch {
      title: command.title.map(RecipeTitle::new).transpose()?,
      time: command.time_minutes.map(CookingTime::new).transpose()?,
      price: command.price.map(Price::new).transpose()?,
      link: command.link.map(RecipeLink::parse).transpose()?,
      tag_ids: command.tags,
      ingredient_ids: command.ingredients,
    };

    let recipe = self
      .recipe_service
      .patch_recipe(command.user_id, command.recipe_id, patch)
      .await?;

    Ok(recipe.into())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::recipe::test_support::{fields, recipe_service};
  use crate::application::recipe::{CreateRecipeCommand, CreateRecipeUseCase};

  #[tokio::test]
  async fn test_patch_clears_link() {
    let service = recipe_service();
    let user_id = Uuid::new_v4();
    let mut recipe_fields = fields("Pie");
    recipe_fields.link = Some("https://example.com/pie".to_string());
    let created = CreateRecipeUseCase::new(service.clone())
      .execute(CreateRecipeCommand {
        user_id,
        fields: recipe_fields,
      })
      .await
      .unwrap();

    let patched = PatchRecipeUseCase::new(service)
      .execute(PatchRecipeCommand {
        user_id,
        recipe_id: created.id,
        link: Some(None),
        ..Default::default()
      })
      .await
      .unwrap();

    assert_eq!(patched.title, "Pie");
    assert!(patched.link.is_none());
  }
}
