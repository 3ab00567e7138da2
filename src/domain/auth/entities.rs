use chrono::{DateTime, Duration, Utc};
use std::net::IpAddr;
use uuid::Uuid;

/// An account. Recipes, tags and ingredients all hang off `id`.
///
/// Not serializable: `password_hash` must never leave the service.
#[derive(Debug, Clone)]
pub struct User {
  pub id: Uuid,
  /// Lowercased, unique across accounts
  pub email: String,
  /// PHC string produced by the password hasher
  pub password_hash: String,
  pub name: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl User {
  pub fn new(email: String, password_hash: String, name: String) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      email,
      password_hash,
      name,
      created_at: now,
      updated_at: now,
    }
  }

  /// Rebuilds a stored account without touching its timestamps
  pub fn from_db(
    id: Uuid,
    email: String,
    password_hash: String,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      email,
      password_hash,
      name,
      created_at,
      updated_at,
    }
  }

  pub fn rename(&mut self, name: String) {
    self.name = name;
    self.updated_at = Utc::now();
  }

  pub fn set_password_hash(&mut self, password_hash: String) {
    self.password_hash = password_hash;
    self.updated_at = Utc::now();
  }
}

/// A login. The bearer token itself is handed to the client once and only
/// its SHA-256 digest is kept here.
#[derive(Debug, Clone)]
pub struct Session {
  pub id: Uuid,
  pub user_id: Uuid,
  /// Hex digest of the bearer token, the lookup key for every authenticated request
  pub token_hash: String,
  pub ip_address: Option<IpAddr>,
  pub user_agent: Option<String>,
  pub expires_at: DateTime<Utc>,
  pub created_at: DateTime<Utc>,
}

impl Session {
  /// Starts a session for `user_id` that stays valid for `ttl`
  pub fn issue(
    user_id: Uuid,
    token_hash: String,
    ttl: Duration,
    ip_address: Option<IpAddr>,
    user_agent: Option<String>,
  ) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      user_id,
      token_hash,
      ip_address,
      user_agent,
      expires_at: now + ttl,
      created_at: now,
    }
  }

  pub fn from_db(
    id: Uuid,
    user_id: Uuid,
    token_hash: String,
    ip_address: Option<IpAddr>,
    user_agent: Option<String>,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      user_id,
      token_hash,
      ip_address,
      user_agent,
      expires_at,
      created_at,
    }
  }

  /// A session is dead from `expires_at` onwards
  pub fn is_expired(&self) -> bool {
    self.expires_at <= Utc::now()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn cook() -> User {
    User::new(
      "cook@example.com".to_string(),
      "$argon2id$stub".to_string(),
      "Cook".to_string(),
    )
  }

  #[test]
  fn test_new_user_starts_unmodified() {
    let user = cook();

    assert_eq!(user.email, "cook@example.com");
    assert_eq!(user.created_at, user.updated_at);
  }

  #[test]
  fn test_rename_touches_updated_at() {
    let mut user = cook();
    let before = user.updated_at;

    user.rename("Head Chef".to_string());

    assert_eq!(user.name, "Head Chef");
    assert!(user.updated_at >= before);
  }

  #[test]
  fn test_set_password_hash_keeps_identity() {
    let mut user = cook();
    let id = user.id;

    user.set_password_hash("$argon2id$other".to_string());

    assert_eq!(user.id, id);
    assert_eq!(user.password_hash, "$argon2id$other");
  }

  #[test]
  fn test_issued_session_is_live() {
    let user_id = Uuid::new_v4();
    let session = Session::issue(
      user_id,
      "ab".repeat(32),
      Duration::hours(1),
      Some("127.0.0.1".parse().unwrap()),
      Some("Mozilla/5.0".to_string()),
    );

    assert_eq!(session.user_id, user_id);
    assert_eq!(session.expires_at - session.created_at, Duration::hours(1));
    assert!(!session.is_expired());
  }

  #[test]
  fn test_session_past_its_ttl_is_expired() {
    let session = Session::issue(
      Uuid::new_v4(),
      "ab".repeat(32),
      Duration::seconds(-10),
      None,
      None,
    );

    assert!(session.is_expired());
  }
}
