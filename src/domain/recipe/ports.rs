use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{Ingredient, Recipe, Tag};
use super::errors::RecipeError;

/// Narrows a recipe listing; an empty list means "no filter"
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
  pub tag_ids: Vec<Uuid>,
  pub ingredient_ids: Vec<Uuid>,
}

impl RecipeFilter {
  pub fn matches(&self, recipe: &Recipe) -> bool {
    (self.tag_ids.is_empty() || recipe.has_any_tag(&self.tag_ids))
      && (self.ingredient_ids.is_empty() || recipe.has_any_ingredient(&self.ingredient_ids))
  }
}

/// Repository trait for recipe persistence, including tag and ingredient links
#[async_trait]
pub trait RecipeRepository: Send + Sync {
  async fn create(&self, recipe: Recipe) -> Result<Recipe, RecipeError>;

  /// Replaces the stored recipe and its links
  async fn update(&self, recipe: Recipe) -> Result<Recipe, RecipeError>;

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, RecipeError>;

  /// Lists a user's recipes, oldest first
  async fn find_by_user(
    &self,
    user_id: Uuid,
    filter: &RecipeFilter,
  ) -> Result<Vec<Recipe>, RecipeError>;

  async fn delete(&self, id: Uuid) -> Result<(), RecipeError>;
}

/// Repository trait for tag persistence
#[async_trait]
pub trait TagRepository: Send + Sync {
  async fn create(&self, tag: Tag) -> Result<Tag, RecipeError>;

  async fn update(&self, tag: Tag) -> Result<Tag, RecipeError>;

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Tag>, RecipeError>;

  /// Returns the subset of `ids` owned by `user_id`
  async fn find_by_ids(&self, user_id: Uuid, ids: &[Uuid]) -> Result<Vec<Tag>, RecipeError>;

  /// Lists a user's tags ordered by name
  async fn find_by_user(&self, user_id: Uuid, assigned_only: bool)
  -> Result<Vec<Tag>, RecipeError>;

  /// Deletes the tag and detaches it from every recipe
  async fn delete(&self, id: Uuid) -> Result<(), RecipeError>;
}

/// Repository trait for ingredient persistence
#[async_trait]
pub trait IngredientRepository: Send + Sync {
  async fn create(&self, ingredient: Ingredient) -> Result<Ingredient, RecipeError>;

  async fn update(&self, ingredient: Ingredient) -> Result<Ingredient, RecipeError>;

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Ingredient>, RecipeError>;

  /// Returns the subset of `ids` owned by `user_id`
  async fn find_by_ids(
    &self,
    user_id: Uuid,
    ids: &[Uuid],
  ) -> Result<Vec<Ingredient>, RecipeError>;

  /// Lists a user's ingredients ordered by name
  async fn find_by_user(
    &self,
    user_id: Uuid,
    assigned_only: bool,
  ) -> Result<Vec<Ingredient>, RecipeError>;

  /// Deletes the ingredient and detaches it from every recipe
  async fn delete(&self, id: Uuid) -> Result<(), RecipeError>;
}
