use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::{CookingTime, Name, Price, RecipeLink, RecipeTitle};

/// Recipe entity owned by a single user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
  pub id: Uuid,
  pub user_id: Uuid,
  pub title: String,
  pub time_minutes: i32,
  pub price: Decimal,
  pub link: Option<String>,
  /// Attached tag ids, kept sorted and free of duplicates
  pub tag_ids: Vec<Uuid>,
  /// Attached ingredient ids, kept sorted and free of duplicates
  pub ingredient_ids: Vec<Uuid>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Recipe {
  pub fn new(
    user_id: Uuid,
    title: RecipeTitle,
    time: CookingTime,
    price: Price,
    link: Option<RecipeLink>,
  ) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      user_id,
      title: title.value().to_string(),
      time_minutes: time.minutes(),
      price: price.amount(),
      link: link.map(|l| l.value().to_string()),
      tag_ids: Vec::new(),
      ingredient_ids: Vec::new(),
      created_at: now,
      updated_at: now,
    }
  }

  #[allow(clippy::too_many_arguments)]
  pub fn from_db(
    id: Uuid,
    user_id: Uuid,
    title: String,
    time_minutes: i32,
    price: Decimal,
    link: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      user_id,
      title,
      time_minutes,
      price,
      link,
      tag_ids: Vec::new(),
      ingredient_ids: Vec::new(),
      created_at,
      updated_at,
    }
  }

  pub fn is_owned_by(&self, user_id: Uuid) -> bool {
    self.user_id == user_id
  }

  pub fn set_title(&mut self, title: RecipeTitle) {
    self.title = title.value().to_string();
    self.touch();
  }

  pub fn set_time(&mut self, time: CookingTime) {
    self.time_minutes = time.minutes();
    self.touch();
  }

  pub fn set_price(&mut self, price: Price) {
    self.price = price.amount();
    self.touch();
  }

  pub fn set_link(&mut self, link: Option<RecipeLink>) {
    self.link = link.map(|l| l.value().to_string());
    self.touch();
  }

  pub fn set_tags(&mut self, tag_ids: Vec<Uuid>) {
    self.tag_ids = dedup_ids(tag_ids);
    self.touch();
  }

  pub fn set_ingredients(&mut self, ingredient_ids: Vec<Uuid>) {
    self.ingredient_ids = dedup_ids(ingredient_ids);
    self.touch();
  }

  pub fn has_any_tag(&self, ids: &[Uuid]) -> bool {
    self.tag_ids.iter().any(|id| ids.contains(id))
  }

  pub fn has_any_ingredient(&self, ids: &[Uuid]) -> bool {
    self.ingredient_ids.iter().any(|id| ids.contains(id))
  }

  fn touch(&mut self) {
    self.updated_at = Utc::now();
  }
}

pub(crate) fn dedup_ids(mut ids: Vec<Uuid>) -> Vec<Uuid> {
  ids.sort();
  ids.dedup();
  ids
}

/// Tag entity used to group recipes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
  pub id: Uuid,
  pub user_id: Uuid,
  pub name: String,
}

impl Tag {
  pub fn new(user_id: Uuid, name: Name) -> Self {
    Self {
      id: Uuid::new_v4(),
      user_id,
      name: name.value().to_string(),
    }
  }

  pub fn from_db(id: Uuid, user_id: Uuid, name: String) -> Self {
    Self { id, user_id, name }
  }

  pub fn rename(&mut self, name: Name) {
    self.name = name.value().to_string();
  }
}

/// Ingredient entity used in recipes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
  pub id: Uuid,
  pub user_id: Uuid,
  pub name: String,
}

impl Ingredient {
  pub fn new(user_id: Uuid, name: Name) -> Self {
    Self {
      id: Uuid::new_v4(),
      user_id,
      name: name.value().to_string(),
    }
  }

  pub fn from_db(id: Uuid, user_id: Uuid, name: String) -> Self {
    Self { id, user_id, name }
  }

  pub fn rename(&mut self, name: Name) {
    self.name = name.value().to_string();
  }
}

/// Recipe with its tags and ingredients resolved
#[derive(Debug, Clone)]
pub struct RecipeDetails {
  pub recipe: Recipe,
  pub tags: Vec<Tag>,
  pub ingredients: Vec<Ingredient>,
}
