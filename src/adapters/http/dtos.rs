use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::application::recipe::{AttributeDto, RecipeDetailsDto, RecipeDto};

use super::errors::ApiError;

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`)
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
  T: Deserialize<'de>,
  D: Deserializer<'de>,
{
  Option::<T>::deserialize(deserializer).map(Some)
}

// ============================================================================
// Users and sessions
// ============================================================================

/// Request for user registration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  /// The configured minimum length is enforced further in
  #[validate(length(max = 128, message = "Password cannot exceed 128 characters"))]
  pub password: String,

  #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
  pub name: String,
}

/// Request for user login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
  #[validate(length(min = 1, message = "Email is required"))]
  pub email: String,

  #[validate(length(min = 1, message = "Password is required"))]
  pub password: String,

  /// Whether to create a long-lived session
  #[serde(default)]
  pub remember_me: bool,
}

/// Request for changing the caller's own profile
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
  #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
  pub name: Option<String>,

  #[validate(length(max = 128, message = "Password cannot exceed 128 characters"))]
  pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
  pub user_id: Uuid,
  pub email: String,
  pub name: String,
  pub session_token: String,
  pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
  pub user_id: Uuid,
  pub email: String,
  pub session_token: String,
  pub expires_at: DateTime<Utc>,
}

/// Response after successful logout from all devices
#[derive(Debug, Clone, Serialize)]
pub struct LogoutAllResponse {
  pub sessions_terminated: usize,
  pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
  pub user_id: Uuid,
  pub email: String,
  pub name: String,
  pub created_at: DateTime<Utc>,
}

/// Standard success response for operations without data
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
  pub message: String,
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}

// ============================================================================
// Recipes
// ============================================================================

/// Body of POST and PUT on recipes
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeRequest {
  #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
  pub title: String,

  #[validate(range(min = 0, max = 10080, message = "Time must be between 0 and 10080 minutes"))]
  pub time_minutes: i32,

  /// Accepts a JSON number or a decimal string
  pub price: Decimal,

  #[validate(length(max = 255, message = "Link cannot exceed 255 characters"))]
  pub link: Option<String>,

  #[serde(default)]
  pub tags: Vec<Uuid>,

  #[serde(default)]
  pub ingredients: Vec<Uuid>,
}

/// Body of PATCH on recipes
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PatchRecipeRequest {
  #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
  pub title: Option<String>,

  #[validate(range(min = 0, max = 10080, message = "Time must be between 0 and 10080 minutes"))]
  pub time_minutes: Option<i32>,

  pub price: Option<Decimal>,

  #[serde(default, deserialize_with = "double_option")]
  pub link: Option<Option<String>>,

  pub tags: Option<Vec<Uuid>>,

  pub ingredients: Option<Vec<Uuid>>,
}

/// Query string of GET on the recipe list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeListQuery {
  /// Comma separated tag ids
  pub tags: Option<String>,
  /// Comma separated ingredient ids
  pub ingredients: Option<String>,
}

impl RecipeListQuery {
  pub fn tag_ids(&self) -> Result<Vec<Uuid>, ApiError> {
    parse_id_list("tags", self.tags.as_deref())
  }

  pub fn ingredient_ids(&self) -> Result<Vec<Uuid>, ApiError> {
    parse_id_list("ingredients", self.ingredients.as_deref())
  }
}

fn parse_id_list(field: &str, raw: Option<&str>) -> Result<Vec<Uuid>, ApiError> {
  raw
    .unwrap_or_default()
    .split(',')
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(|s| {
      Uuid::parse_str(s)
        .map_err(|_| ApiError::Validation(format!("Invalid id in {}: {}", field, s)))
    })
    .collect()
}

/// Recipe with related records as bare ids
#[derive(Debug, Clone, Serialize)]
pub struct RecipeResponse {
  pub id: Uuid,
  pub title: String,
  pub time_minutes: i32,
  /// Serialized as a decimal string, e.g. "5.99"
  pub price: Decimal,
  pub link: Option<String>,
  pub tags: Vec<Uuid>,
  pub ingredients: Vec<Uuid>,
}

impl From<RecipeDto> for RecipeResponse {
  fn from(dto: RecipeDto) -> Self {
    Self {
      id: dto.id,
      title: dto.title,
      time_minutes: dto.time_minutes,
      price: dto.price,
      link: dto.link,
      tags: dto.tags,
      ingredients: dto.ingredients,
    }
  }
}

/// Recipe with related records nested
#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetailResponse {
  pub id: Uuid,
  pub title: String,
  pub time_minutes: i32,
  pub price: Decimal,
  pub link: Option<String>,
  pub tags: Vec<AttributeResponse>,
  pub ingredients: Vec<AttributeResponse>,
}

impl From<RecipeDetailsDto> for RecipeDetailResponse {
  fn from(dto: RecipeDetailsDto) -> Self {
    Self {
      id: dto.id,
      title: dto.title,
      time_minutes: dto.time_minutes,
      price: dto.price,
      link: dto.link,
      tags: dto.tags.into_iter().map(Into::into).collect(),
      ingredients: dto.ingredients.into_iter().map(Into::into).collect(),
    }
  }
}

// ============================================================================
// Tags and ingredients
// ============================================================================

/// Body of POST, PUT and PATCH on tags and ingredients
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AttributeRequest {
  #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
  pub name: String,
}

/// Query string of GET on the tag and ingredient lists
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttributeListQuery {
  pub assigned_only: Option<String>,
}

impl AttributeListQuery {
  /// `1` and `true` switch the filter on
  pub fn assigned_only(&self) -> bool {
    matches!(self.assigned_only.as_deref(), Some("1") | Some("true"))
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeResponse {
  pub id: Uuid,
  pub name: String,
}

impl From<AttributeDto> for AttributeResponse {
  fn from(dto: AttributeDto) -> Self {
    Self {
      id: dto.id,
      name: dto.name,
    }
  }
}
