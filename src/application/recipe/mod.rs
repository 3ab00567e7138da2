//! Recipe, tag and ingredient use cases

mod create_attribute;
mod create_recipe;
mod delete_attribute;
mod delete_recipe;
mod dto;
mod get_attribute;
mod get_recipe_details;
mod list_attributes;
mod list_recipes;
mod patch_recipe;
mod rename_attribute;
mod replace_recipe;

pub use create_attribute::{CreateAttributeCommand, CreateAttributeUseCase};
pub use create_recipe::{CreateRecipeCommand, CreateRecipeUseCase, RecipeFields};
pub use delete_attribute::{DeleteAttributeCommand, DeleteAttributeUseCase};
pub use delete_recipe::{DeleteRecipeCommand, DeleteRecipeUseCase};
pub use dto::{AttributeDto, AttributeKind, RecipeDetailsDto, RecipeDto};
pub use get_attribute::{GetAttributeCommand, GetAttributeUseCase};
pub use get_recipe_details::{GetRecipeDetailsCommand, GetRecipeDetailsUseCase};
pub use list_attributes::{ListAttributesCommand, ListAttributesUseCase};
pub use list_recipes::{ListRecipesCommand, ListRecipesResponse, ListRecipesUseCase};
pub use patch_recipe::{PatchRecipeCommand, PatchRecipeUseCase};
pub use rename_attribute::{RenameAttributeCommand, RenameAttributeUseCase};
pub use replace_recipe::{ReplaceRecipeCommand, ReplaceRecipeUseCase};

#[cfg(test)]
pub(crate) mod test_support {
  use rust_decimal_macros::dec;
  use std::sync::Arc;

  use super::RecipeFields;
  use crate::domain::recipe::RecipeService;
  use crate::infrastructure::persistence::memory::InMemoryStore;

  pub fn recipe_service() -> Arc<RecipeService> {
    let store = Arc::new(InMemoryStore::new());
    Arc::new(RecipeService::new(store.clone(), store.clone(), store))
  }

  pub fn fields(title: &str) -> RecipeFields {
    RecipeFields {
      title: title.to_string(),
      time_minutes: 10,
      price: dec!(5.99),
      link: None,
      tags: Vec::new(),
      ingredients: Vec::new(),
    }
  }
}
