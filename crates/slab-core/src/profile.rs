//! User profile — the thin identity record kept alongside the cards.
//!
//! Authentication itself lives behind the API layer; this crate only models
//! the stored profile document and the credential material it carries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user. Created at registration, name mutable via profile
/// settings, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
  pub user_id:    Uuid,
  pub email:      String,
  pub name:       String,
  pub created_at: DateTime<Utc>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub updated_at: Option<DateTime<Utc>>,
}

/// Input to [`crate::store::CollectionStore::create_user`].
/// `password_hash` is an argon2 PHC string; the store never sees plaintext.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub email:         String,
  pub name:          String,
  pub password_hash: String,
}

/// A profile bundled with its credential hash, as read back for sign-in.
/// Never serialised; the hash must not leave the auth boundary.
#[derive(Debug, Clone)]
pub struct StoredUser {
  pub profile:       UserProfile,
  pub password_hash: String,
}
