use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid title: {0}")]
  InvalidTitle(String),
  #[error("Invalid name: {0}")]
  InvalidName(String),
  #[error("Invalid preparation time: {0}")]
  InvalidTime(String),
  #[error("Invalid price: {0}")]
  InvalidPrice(String),
  #[error("Invalid link: {0}")]
  InvalidLink(String),
}

const MAX_TEXT_LENGTH: usize = 255;

fn bounded_text(value: &str) -> Option<String> {
  let trimmed = value.trim();
  if trimmed.is_empty() || trimmed.chars().count() > MAX_TEXT_LENGTH {
    None
  } else {
    Some(trimmed.to_string())
  }
}

// Recipe title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeTitle(String);

impl RecipeTitle {
  pub fn new(value: impl AsRef<str>) -> Result<Self, ValueObjectError> {
    bounded_text(value.as_ref()).map(Self).ok_or_else(|| {
      ValueObjectError::InvalidTitle("Title must be between 1 and 255 characters".to_string())
    })
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for RecipeTitle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Tag or ingredient name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name(String);

impl Name {
  pub fn new(value: impl AsRef<str>) -> Result<Self, ValueObjectError> {
    bounded_text(value.as_ref()).map(Self).ok_or_else(|| {
      ValueObjectError::InvalidName("Name must be between 1 and 255 characters".to_string())
    })
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for Name {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Preparation time in whole minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookingTime(i32);

impl CookingTime {
  /// One week
  const MAX_MINUTES: i32 = 7 * 24 * 60;

  pub fn new(minutes: i32) -> Result<Self, ValueObjectError> {
    if minutes < 0 {
      return Err(ValueObjectError::InvalidTime(
        "Time cannot be negative".to_string(),
      ));
    }
    if minutes > Self::MAX_MINUTES {
      return Err(ValueObjectError::InvalidTime(format!(
        "Time cannot exceed {} minutes",
        Self::MAX_MINUTES
      )));
    }
    Ok(Self(minutes))
  }

  pub fn minutes(&self) -> i32 {
    self.0
  }
}

// Price: at most 5 digits, 2 of them after the decimal point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price(Decimal);

impl Price {
  const MAX_DIGITS: u32 = 5;
  const DECIMAL_PLACES: u32 = 2;

  pub fn new(amount: Decimal) -> Result<Self, ValueObjectError> {
    if amount.is_sign_negative() && !amount.is_zero() {
      return Err(ValueObjectError::InvalidPrice(
        "Price cannot be negative".to_string(),
      ));
    }

    let normalized = amount.normalize();
    if normalized.scale() > Self::DECIMAL_PLACES {
      return Err(ValueObjectError::InvalidPrice(format!(
        "Price cannot have more than {} decimal places",
        Self::DECIMAL_PLACES
      )));
    }

    let limit = Decimal::from(10_i64.pow(Self::MAX_DIGITS - Self::DECIMAL_PLACES));
    if normalized >= limit {
      return Err(ValueObjectError::InvalidPrice(format!(
        "Price must be below {}",
        limit
      )));
    }

    let mut value = normalized.abs();
    value.rescale(Self::DECIMAL_PLACES);
    Ok(Self(value))
  }

  pub fn amount(&self) -> Decimal {
    self.0
  }
}

impl fmt::Display for Price {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// External link to the original recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeLink(String);

impl RecipeLink {
  /// Empty input means "no link"
  pub fn parse(value: Option<String>) -> Result<Option<Self>, ValueObjectError> {
    let Some(value) = value else {
      return Ok(None);
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Ok(None);
    }
    if trimmed.chars().count() > MAX_TEXT_LENGTH {
      return Err(ValueObjectError::InvalidLink(
        "Link cannot exceed 255 characters".to_string(),
      ));
    }

    Ok(Some(Self(trimmed.to_string())))
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}
