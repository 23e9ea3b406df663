//! Handlers for registration and the profile document.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/register` | Body: `{"email","password","name"}`; 409 on duplicate |
//! | `GET`  | `/me` | The authenticated profile |
//! | `PUT`  | `/me` | Body: `{"name"}`; merge-updates the profile |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;

use slab_core::{
  profile::{NewUser, UserProfile},
  store::CollectionStore,
};

use crate::{AppState, auth, auth::CurrentUser, error::ApiError};

// ─── Register ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
  pub email:    String,
  pub password: String,
  pub name:     String,
}

/// `POST /register`
pub async fn register<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CollectionStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if body.email.trim().is_empty() || !body.email.contains('@') {
    return Err(ApiError::BadRequest("a valid email is required".into()));
  }
  if body.password.is_empty() {
    return Err(ApiError::BadRequest("a password is required".into()));
  }

  let email = body.email.trim().to_owned();
  let existing = state
    .store
    .get_user_by_email(&email)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if existing.is_some() {
    return Err(ApiError::Conflict(format!(
      "email already registered: {email}"
    )));
  }

  let name = if body.name.trim().is_empty() {
    // Fall back to the mailbox half of the email, as the profile screen does.
    email.split('@').next().unwrap_or_default().to_owned()
  } else {
    body.name.trim().to_owned()
  };

  let profile = state
    .store
    .create_user(NewUser {
      email,
      name,
      password_hash: auth::hash_password(&body.password)?,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok((StatusCode::CREATED, Json(profile)))
}

// ─── Profile ─────────────────────────────────────────────────────────────────

/// `GET /me`
pub async fn me<S>(
  CurrentUser(profile): CurrentUser,
) -> Result<Json<UserProfile>, ApiError>
where
  S: CollectionStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Ok(Json(profile))
}

#[derive(Debug, Deserialize)]
pub struct UpdateMeBody {
  pub name: String,
}

/// `PUT /me` — merge-update of the profile name.
pub async fn update_me<S>(
  State(state): State<AppState<S>>,
  CurrentUser(profile): CurrentUser,
  Json(body): Json<UpdateMeBody>,
) -> Result<Json<UserProfile>, ApiError>
where
  S: CollectionStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if body.name.trim().is_empty() {
    return Err(ApiError::BadRequest("name must not be empty".into()));
  }

  let updated = state
    .store
    .update_user_name(profile.user_id, body.name.trim())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(updated))
}
