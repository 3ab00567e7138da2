use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use super::dto::RecipeDto;
use crate::domain::recipe::{
  CookingTime, Price, RecipeData, RecipeError, RecipeLink, RecipeService, RecipeTitle,
};

/// Every writable recipe field, as received from a client
#[derive(Debug, Clone)]
pub struct RecipeFields {
  pub title: String,
  pub time_minutes: i32,
  pub price: Decimal,
  pub link: Option<String>,
  pub tags: Vec<Uuid>,
  pub ingredients: Vec<Uuid>,
}

impl TryFrom<RecipeFields> for RecipeData {
  type Error = RecipeError;

  fn try_from(fields: RecipeFields) -> Result<Self, Self::Error> {
    Ok(RecipeData {
      title: RecipeTitle::new(fields.title)?,
      time: CookingTime::new(fields.time_minutes)?,
      price: Price::new(fields.price)?,
      link: RecipeLink::parse(fields.link)?,
      tag_ids: fields.tags,
      ingredient_ids: fields.ingredients,
    })
  }
}

#[derive(Debug, Clone)]
pub struct CreateRecipeCommand {
  pub user_id: Uuid,
  pub fields: RecipeFields,
}

pub struct CreateRecipeUseCase {
  recipe_service: Arc<RecipeService>,
}

impl CreateRecipeUseCase {
  pub fn new(recipe_service: Arc<RecipeService>) -> Self {
    Self { recipe_service }
  }

  pub async fn execute(&self, command: CreateRecipeCommand) -> Result<RecipeDto, RecipeError> {
    let data = RecipeData::try_from(command.fields)?;

    let recipe = self
      .recipe_service
      .create_recipe(command.user_id, data)
      .await?;

    Ok(recipe.into())
  }
}
