//! In-memory implementation of every repository port.
//!
//! All state lives behind a single `tokio::sync::RwLock`, so cascades
//! (user deletion, tag/ingredient detachment) are applied atomically. State
//! is lost on restart; this backend serves development and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::auth::{
  entities::{Session, User},
  errors::{AuthError, RepositoryError},
  ports::{SessionRepository, UserRepository},
  value_objects::Email,
};
use crate::domain::recipe::{
  entities::{Ingredient, Recipe, Tag},
  errors::RecipeError,
  ports::{IngredientRepository, RecipeFilter, RecipeRepository, TagRepository},
};

#[derive(Default)]
struct State {
  users: HashMap<Uuid, User>,
  sessions: HashMap<Uuid, Session>,
  /// Kept in insertion order so listings come out oldest first
  recipes: Vec<Recipe>,
  tags: HashMap<Uuid, Tag>,
  ingredients: HashMap<Uuid, Ingredient>,
}

impl State {
  fn recipe_mut(&mut self, id: Uuid) -> Option<&mut Recipe> {
    self.recipes.iter_mut().find(|r| r.id == id)
  }

  fn tag_in_use(&self, user_id: Uuid, tag_id: Uuid) -> bool {
    self
      .recipes
      .iter()
      .any(|r| r.user_id == user_id && r.tag_ids.contains(&tag_id))
  }

  fn ingredient_in_use(&self, user_id: Uuid, ingredient_id: Uuid) -> bool {
    self
      .recipes
      .iter()
      .any(|r| r.user_id == user_id && r.ingredient_ids.contains(&ingredient_id))
  }
}

/// Shared in-memory store; wrap in `Arc` and hand out as any repository port
#[derive(Default)]
pub struct InMemoryStore {
  state: RwLock<State>,
}

impl InMemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

fn by_name<T>(items: &mut [T], name: impl Fn(&T) -> (&str, Uuid)) {
  items.sort_by(|a, b| name(a).cmp(&name(b)));
}

#[async_trait]
impl UserRepository for InMemoryStore {
  async fn create(&self, user: User) -> Result<User, AuthError> {
    let mut state = self.state.write().await;
    if state.users.values().any(|u| u.email == user.email) {
      return Err(AuthError::Repository(RepositoryError::DuplicateKey(
        "users_email_key".to_string(),
      )));
    }
    state.users.insert(user.id, user.clone());
    Ok(user)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
    Ok(self.state.read().await.users.get(&id).cloned())
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
    let state = self.state.read().await;
    Ok(
      state
        .users
        .values()
        .find(|u| u.email == email.as_str())
        .cloned(),
    )
  }

  async fn update(&self, user: User) -> Result<User, AuthError> {
    let mut state = self.state.write().await;
    match state.users.get_mut(&user.id) {
      Some(existing) => {
        *existing = user.clone();
        Ok(user)
      }
      None => Err(AuthError::Repository(RepositoryError::NotFound)),
    }
  }

  async fn delete(&self, id: Uuid) -> Result<(), AuthError> {
    let mut state = self.state.write().await;
    if state.users.remove(&id).is_none() {
      return Err(AuthError::Repository(RepositoryError::NotFound));
    }

    state.sessions.retain(|_, s| s.user_id != id);
    state.recipes.retain(|r| r.user_id != id);
    state.tags.retain(|_, t| t.user_id != id);
    state.ingredients.retain(|_, i| i.user_id != id);

    Ok(())
  }
}

#[async_trait]
impl SessionRepository for InMemoryStore {
  async fn create(&self, session: Session) -> Result<Session, AuthError> {
    let mut state = self.state.write().await;
    if !state.users.contains_key(&session.user_id) {
      return Err(AuthError::Repository(RepositoryError::NotFound));
    }
    state.sessions.insert(session.id, session.clone());
    Ok(session)
  }

  async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AuthError> {
    let state = self.state.read().await;
    Ok(
      state
        .sessions
        .values()
        .find(|s| s.token_hash == token_hash)
        .cloned(),
    )
  }

  async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Session>, AuthError> {
    let state = self.state.read().await;
    let mut sessions: Vec<Session> = state
      .sessions
      .values()
      .filter(|s| s.user_id == user_id)
      .cloned()
      .collect();
    sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(sessions)
  }

  async fn delete(&self, session_id: Uuid) -> Result<(), AuthError> {
    match self.state.write().await.sessions.remove(&session_id) {
      Some(_) => Ok(()),
      None => Err(AuthError::Repository(RepositoryError::NotFound)),
    }
  }

  async fn delete_all_for_user(&self, user_id: Uuid) -> Result<(), AuthError> {
    self
      .state
      .write()
      .await
      .sessions
      .retain(|_, s| s.user_id != user_id);
    Ok(())
  }
}

#[async_trait]
impl RecipeRepository for InMemoryStore {
  async fn create(&self, recipe: Recipe) -> Result<Recipe, RecipeError> {
    self.state.write().await.recipes.push(recipe.clone());
    Ok(recipe)
  }

  async fn update(&self, recipe: Recipe) -> Result<Recipe, RecipeError> {
    let mut state = self.state.write().await;
    let existing = state
      .recipe_mut(recipe.id)
      .ok_or(RecipeError::RecipeNotFound)?;
    *existing = recipe.clone();
    Ok(recipe)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, RecipeError> {
    let state = self.state.read().await;
    Ok(state.recipes.iter().find(|r| r.id == id).cloned())
  }

  async fn find_by_user(
    &self,
    user_id: Uuid,
    filter: &RecipeFilter,
  ) -> Result<Vec<Recipe>, RecipeError> {
    let state = self.state.read().await;
    Ok(
      state
        .recipes
        .iter()
        .filter(|r| r.user_id == user_id && filter.matches(r))
        .cloned()
        .collect(),
    )
  }

  async fn delete(&self, id: Uuid) -> Result<(), RecipeError> {
    let mut state = self.state.write().await;
    let before = state.recipes.len();
    state.recipes.retain(|r| r.id != id);
    if state.recipes.len() == before {
      return Err(RecipeError::RecipeNotFound);
    }
    Ok(())
  }
}

#[async_trait]
impl TagRepository for InMemoryStore {
  async fn create(&self, tag: Tag) -> Result<Tag, RecipeError> {
    self.state.write().await.tags.insert(tag.id, tag.clone());
    Ok(tag)
  }

  async fn update(&self, tag: Tag) -> Result<Tag, RecipeError> {
    let mut state = self.state.write().await;
    let existing = state.tags.get_mut(&tag.id).ok_or(RecipeError::TagNotFound)?;
    *existing = tag.clone();
    Ok(tag)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Tag>, RecipeError> {
    Ok(self.state.read().await.tags.get(&id).cloned())
  }

  async fn find_by_ids(&self, user_id: Uuid, ids: &[Uuid]) -> Result<Vec<Tag>, RecipeError> {
    let state = self.state.read().await;
    let mut tags: Vec<Tag> = ids
      .iter()
      .filter_map(|id| state.tags.get(id))
      .filter(|t| t.user_id == user_id)
      .cloned()
      .collect();
    by_name(&mut tags, |t| (t.name.as_str(), t.id));
    tags.dedup_by_key(|t| t.id);
    Ok(tags)
  }

  async fn find_by_user(
    &self,
    user_id: Uuid,
    assigned_only: bool,
  ) -> Result<Vec<Tag>, RecipeError> {
    let state = self.state.read().await;
    let mut tags: Vec<Tag> = state
      .tags
      .values()
      .filter(|t| t.user_id == user_id)
      .filter(|t| !assigned_only || state.tag_in_use(user_id, t.id))
      .cloned()
      .collect();
    by_name(&mut tags, |t| (t.name.as_str(), t.id));
    Ok(tags)
  }

  async fn delete(&self, id: Uuid) -> Result<(), RecipeError> {
    let mut state = self.state.write().await;
    if state.tags.remove(&id).is_none() {
      return Err(RecipeError::TagNotFound);
    }
    for recipe in state.recipes.iter_mut() {
      recipe.tag_ids.retain(|t| *t != id);
    }
    Ok(())
  }
}

#[async_trait]
impl IngredientRepository for InMemoryStore {
  async fn create(&self, ingredient: Ingredient) -> Result<Ingredient, RecipeError> {
    self
      .state
      .write()
      .await
      .ingredients
      .insert(ingredient.id, ingredient.clone());
    Ok(ingredient)
  }

  async fn update(&self, ingredient: Ingredient) -> Result<Ingredient, RecipeError> {
    let mut state = self.state.write().await;
    let existing = state
      .ingredients
      .get_mut(&ingredient.id)
      .ok_or(RecipeError::IngredientNotFound)?;
    *existing = ingredient.clone();
    Ok(ingredient)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Ingredient>, RecipeError> {
    Ok(self.state.read().await.ingredients.get(&id).cloned())
  }

  async fn find_by_ids(
    &self,
    user_id: Uuid,
    ids: &[Uuid],
  ) -> Result<Vec<Ingredient>, RecipeError> {
    let state = self.state.read().await;
    let mut ingredients: Vec<Ingredient> = ids
      .iter()
      .filter_map(|id| state.ingredients.get(id))
      .filter(|i| i.user_id == user_id)
      .cloned()
      .collect();
    by_name(&mut ingredients, |i| (i.name.as_str(), i.id));
    ingredients.dedup_by_key(|i| i.id);
    Ok(ingredients)
  }

  async fn find_by_user(
    &self,
    user_id: Uuid,
    assigned_only: bool,
  ) -> Result<Vec<Ingredient>, RecipeError> {
    let state = self.state.read().await;
    let mut ingredients: Vec<Ingredient> = state
      .ingredients
      .values()
      .filter(|i| i.user_id == user_id)
      .filter(|i| !assigned_only || state.ingredient_in_use(user_id, i.id))
      .cloned()
      .collect();
    by_name(&mut ingredients, |i| (i.name.as_str(), i.id));
    Ok(ingredients)
  }

  async fn delete(&self, id: Uuid) -> Result<(), RecipeError> {
    let mut state = self.state.write().await;
    if state.ingredients.remove(&id).is_none() {
      return Err(RecipeError::IngredientNotFound);
    }
    for recipe in state.recipes.iter_mut() {
      recipe.ingredient_ids.retain(|i| *i != id);
    }
    Ok(())
  }
}
