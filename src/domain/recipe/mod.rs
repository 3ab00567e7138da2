pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{Ingredient, Recipe, RecipeDetails, Tag};
pub use errors::RecipeError;
pub use ports::RecipeFilter;
pub use services::{RecipeData, RecipePatch, RecipeService};
pub use value_objects::{CookingTime, Name, Price, RecipeLink, RecipeTitle, ValueObjectError};
