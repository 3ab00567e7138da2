use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::recipe::{Ingredient, Recipe, RecipeDetails, Tag};

/// Recipe with its links as bare ids
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDto {
  pub id: Uuid,
  pub title: String,
  pub time_minutes: i32,
  pub price: Decimal,
  pub link: Option<String>,
  pub tags: Vec<Uuid>,
  pub ingredients: Vec<Uuid>,
}

impl From<Recipe> for RecipeDto {
  fn from(recipe: Recipe) -> Self {
    Self {
      id: recipe.id,
      title: recipe.title,
      time_minutes: recipe.time_minutes,
      price: recipe.price,
      link: recipe.link,
      tags: recipe.tag_ids,
      ingredients: recipe.ingredient_ids,
    }
  }
}

/// A tag or an ingredient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDto {
  pub id: Uuid,
  pub name: String,
}

impl From<Tag> for AttributeDto {
  fn from(tag: Tag) -> Self {
    Self {
      id: tag.id,
      name: tag.name,
    }
  }
}

impl From<Ingredient> for AttributeDto {
  fn from(ingredient: Ingredient) -> Self {
    Self {
      id: ingredient.id,
      name: ingredient.name,
    }
  }
}

/// Recipe with tags and ingredients nested
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDetailsDto {
  pub id: Uuid,
  pub title: String,
  pub time_minutes: i32,
  pub price: Decimal,
  pub link: Option<String>,
  pub tags: Vec<AttributeDto>,
  pub ingredients: Vec<AttributeDto>,
}

impl From<RecipeDetails> for RecipeDetailsDto {
  fn from(details: RecipeDetails) -> Self {
    let RecipeDetails {
      recipe,
      tags,
      ingredients,
    } = details;

    Self {
      id: recipe.id,
      title: recipe.title,
      time_minutes: recipe.time_minutes,
      price: recipe.price,
      link: recipe.link,
      tags: tags.into_iter().map(Into::into).collect(),
      ingredients: ingredients.into_iter().map(Into::into).collect(),
    }
  }
}

/// Which attribute collection a request targets, as named in the URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
  Tags,
  Ingredients,
}
