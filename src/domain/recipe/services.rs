use std::sync::Arc;
use uuid::Uuid;

use super::entities::{Ingredient, Recipe, RecipeDetails, Tag, dedup_ids};
use super::errors::RecipeError;
use super::ports::{IngredientRepository, RecipeFilter, RecipeRepository, TagRepository};
use super::value_objects::{CookingTime, Name, Price, RecipeLink, RecipeTitle};

/// Full set of recipe fields, used for create and replace
pub struct RecipeData {
  pub title: RecipeTitle,
  pub time: CookingTime,
  pub price: Price,
  pub link: Option<RecipeLink>,
  pub tag_ids: Vec<Uuid>,
  pub ingredient_ids: Vec<Uuid>,
}

/// Partial recipe update; `None` leaves a field untouched
#[derive(Default)]
pub struct RecipePatch {
  pub title: Option<RecipeTitle>,
  pub time: Option<CookingTime>,
  pub price: Option<Price>,
  pub link: Option<Option<RecipeLink>>,
  pub tag_ids: Option<Vec<Uuid>>,
  pub ingredient_ids: Option<Vec<Uuid>>,
}

pub struct RecipeService {
  recipe_repo: Arc<dyn RecipeRepository>,
  tag_repo: Arc<dyn TagRepository>,
  ingredient_repo: Arc<dyn IngredientRepository>,
}

impl RecipeService {
  pub fn new(
    recipe_repo: Arc<dyn RecipeRepository>,
    tag_repo: Arc<dyn TagRepository>,
    ingredient_repo: Arc<dyn IngredientRepository>,
  ) -> Self {
    Self {
      recipe_repo,
      tag_repo,
      ingredient_repo,
    }
  }

  // Recipe operations
  pub async fn create_recipe(
    &self,
    user_id: Uuid,
    data: RecipeData,
  ) -> Result<Recipe, RecipeError> {
    let tag_ids = self.verify_tags(user_id, data.tag_ids).await?;
    let ingredient_ids = self.verify_ingredients(user_id, data.ingredient_ids).await?;

    let mut recipe = Recipe::new(user_id, data.title, data.time, data.price, data.link);
    recipe.set_tags(tag_ids);
    recipe.set_ingredients(ingredient_ids);

    let recipe = self.recipe_repo.create(recipe).await?;
    tracing::debug!(recipe_id = %recipe.id, user_id = %user_id, "Created recipe");
    Ok(recipe)
  }

  pub async fn list_recipes(
    &self,
    user_id: Uuid,
    filter: &RecipeFilter,
  ) -> Result<Vec<Recipe>, RecipeError> {
    self.recipe_repo.find_by_user(user_id, filter).await
  }

  pub async fn get_recipe(&self, user_id: Uuid, recipe_id: Uuid) -> Result<Recipe, RecipeError> {
    self.owned_recipe(user_id, recipe_id).await
  }

  /// Loads a recipe with its tags and ingredients, each ordered by name
  pub async fn get_recipe_details(
    &self,
    user_id: Uuid,
    recipe_id: Uuid,
  ) -> Result<RecipeDetails, RecipeError> {
    let recipe = self.owned_recipe(user_id, recipe_id).await?;
    let tags = self.tag_repo.find_by_ids(user_id, &recipe.tag_ids).await?;
    let ingredients = self
      .ingredient_repo
      .find_by_ids(user_id, &recipe.ingredient_ids)
      .await?;

    Ok(RecipeDetails {
      recipe,
      tags,
      ingredients,
    })
  }

  pub async fn replace_recipe(
    &self,
    user_id: Uuid,
    recipe_id: Uuid,
    data: RecipeData,
  ) -> Result<Recipe, RecipeError> {
    let mut recipe = self.owned_recipe(user_id, recipe_id).await?;
    let tag_ids = self.verify_tags(user_id, data.tag_ids).await?;
    let ingredient_ids = self.verify_ingredients(user_id, data.ingredient_ids).await?;

    recipe.set_title(data.title);
    recipe.set_time(data.time);
    recipe.set_price(data.price);
    recipe.set_link(data.link);
    recipe.set_tags(tag_ids);
    recipe.set_ingredients(ingredient_ids);

    self.recipe_repo.update(recipe).await
  }

  pub async fn patch_recipe(
    &self,
    user_id: Uuid,
    recipe_id: Uuid,
    patch: RecipePatch,
  ) -> Result<Recipe, RecipeError> {
    let mut recipe = self.owned_recipe(user_id, recipe_id).await?;

    if let Some(ids) = patch.tag_ids {
      let tag_ids = self.verify_tags(user_id, ids).await?;
      recipe.set_tags(tag_ids);
    }
    if let Some(ids) = patch.ingredient_ids {
      let ingredient_ids = self.verify_ingredients(user_id, ids).await?;
      recipe.set_ingredients(ingredient_ids);
    }
    if let Some(title) = patch.title {
      recipe.set_title(title);
    }
    if let Some(time) = patch.time {
      recipe.set_time(time);
    }
    if let Some(price) = patch.price {
      recipe.set_price(price);
    }
    if let Some(link) = patch.link {
      recipe.set_link(link);
    }

    self.recipe_repo.update(recipe).await
  }

  pub async fn delete_recipe(&self, user_id: Uuid, recipe_id: Uuid) -> Result<(), RecipeError> {
    let recipe = self.owned_recipe(user_id, recipe_id).await?;
    self.recipe_repo.delete(recipe.id).await?;
    tracing::debug!(recipe_id = %recipe_id, user_id = %user_id, "Deleted recipe");
    Ok(())
  }

  // Tag operations
  pub async fn create_tag(&self, user_id: Uuid, name: Name) -> Result<Tag, RecipeError> {
    self.tag_repo.create(Tag::new(user_id, name)).await
  }

  pub async fn list_tags(
    &self,
    user_id: Uuid,
    assigned_only: bool,
  ) -> Result<Vec<Tag>, RecipeError> {
    self.tag_repo.find_by_user(user_id, assigned_only).await
  }

  pub async fn get_tag(&self, user_id: Uuid, tag_id: Uuid) -> Result<Tag, RecipeError> {
    self.owned_tag(user_id, tag_id).await
  }

  pub async fn rename_tag(
    &self,
    user_id: Uuid,
    tag_id: Uuid,
    name: Name,
  ) -> Result<Tag, RecipeError> {
    let mut tag = self.owned_tag(user_id, tag_id).await?;
    tag.rename(name);
    self.tag_repo.update(tag).await
  }

  pub async fn delete_tag(&self, user_id: Uuid, tag_id: Uuid) -> Result<(), RecipeError> {
    let tag = self.owned_tag(user_id, tag_id).await?;
    self.tag_repo.delete(tag.id).await
  }

  // Ingredient operations
  pub async fn create_ingredient(
    &self,
    user_id: Uuid,
    name: Name,
  ) -> Result<Ingredient, RecipeError> {
    self
      .ingredient_repo
      .create(Ingredient::new(user_id, name))
      .await
  }

  pub async fn list_ingredients(
    &self,
    user_id: Uuid,
    assigned_only: bool,
  ) -> Result<Vec<Ingredient>, RecipeError> {
    self
      .ingredient_repo
      .find_by_user(user_id, assigned_only)
      .await
  }

  pub async fn get_ingredient(
    &self,
    user_id: Uuid,
    ingredient_id: Uuid,
  ) -> Result<Ingredient, RecipeError> {
    self.owned_ingredient(user_id, ingredient_id).await
  }

  pub async fn rename_ingredient(
    &self,
    user_id: Uuid,
    ingredient_id: Uuid,
    name: Name,
  ) -> Result<Ingredient, RecipeError> {
    let mut ingredient = self.owned_ingredient(user_id, ingredient_id).await?;
    ingredient.rename(name);
    self.ingredient_repo.update(ingredient).await
  }

  pub async fn delete_ingredient(
    &self,
    user_id: Uuid,
    ingredient_id: Uuid,
  ) -> Result<(), RecipeError> {
    let ingredient = self.owned_ingredient(user_id, ingredient_id).await?;
    self.ingredient_repo.delete(ingredient.id).await
  }

  // Another user's record is reported exactly like a missing one
  async fn owned_recipe(&self, user_id: Uuid, recipe_id: Uuid) -> Result<Recipe, RecipeError> {
    self
      .recipe_repo
      .find_by_id(recipe_id)
      .await?
      .filter(|r| r.is_owned_by(user_id))
      .ok_or(RecipeError::RecipeNotFound)
  }

  async fn owned_tag(&self, user_id: Uuid, tag_id: Uuid) -> Result<Tag, RecipeError> {
    self
      .tag_repo
      .find_by_id(tag_id)
      .await?
      .filter(|t| t.user_id == user_id)
      .ok_or(RecipeError::TagNotFound)
  }

  async fn owned_ingredient(
    &self,
    user_id: Uuid,
    ingredient_id: Uuid,
  ) -> Result<Ingredient, RecipeError> {
    self
      .ingredient_repo
      .find_by_id(ingredient_id)
      .await?
      .filter(|i| i.user_id == user_id)
      .ok_or(RecipeError::IngredientNotFound)
  }

  async fn verify_tags(&self, user_id: Uuid, ids: Vec<Uuid>) -> Result<Vec<Uuid>, RecipeError> {
    let ids = dedup_ids(ids);
    if ids.is_empty() {
      return Ok(ids);
    }

    let found = self.tag_repo.find_by_ids(user_id, &ids).await?;
    if let Some(missing) = ids.iter().find(|id| !found.iter().any(|t| t.id == **id)) {
      return Err(RecipeError::UnknownTag(*missing));
    }

    Ok(ids)
  }

  async fn verify_ingredients(
    &self,
    user_id: Uuid,
    ids: Vec<Uuid>,
  ) -> Result<Vec<Uuid>, RecipeError> {
    let ids = dedup_ids(ids);
    if ids.is_empty() {
      return Ok(ids);
    }

    let found = self.ingredient_repo.find_by_ids(user_id, &ids).await?;
    if let Some(missing) = ids.iter().find(|id| !found.iter().any(|i| i.id == **id)) {
      return Err(RecipeError::UnknownIngredient(*missing));
    }

    Ok(ids)
  }
}
