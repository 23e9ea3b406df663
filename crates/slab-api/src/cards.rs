//! Handlers for `/cards` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/cards` | All cards owned by the caller |
//! | `POST`   | `/cards` | Body: camelCase card fields; 201 on success |
//! | `GET`    | `/cards/:id` | 404 if missing or foreign-owned |
//! | `PUT`    | `/cards/:id` | Full replacement of the mutable fields |
//! | `DELETE` | `/cards/:id` | 404 when already gone (no-op delete) |
//!
//! Ownership is checked on every id route; a foreign-owned card answers the
//! same 404 as a missing one, so the existence of other users' records is
//! never leaked.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use uuid::Uuid;

use slab_core::{
  card::{Card, CardFields, CardUpdate, NewCard},
  store::CollectionStore,
};

use crate::{AppState, auth::CurrentUser, error::ApiError};

/// Fetch a card and hide it unless `user_id` owns it.
async fn owned_card<S>(
  state: &AppState<S>,
  user_id: Uuid,
  id: Uuid,
) -> Result<Card, ApiError>
where
  S: CollectionStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  state
    .store
    .get_card(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .filter(|card| card.user_id == user_id)
    .ok_or_else(|| ApiError::NotFound(format!("card {id} not found")))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /cards`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  CurrentUser(profile): CurrentUser,
) -> Result<Json<Vec<Card>>, ApiError>
where
  S: CollectionStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let cards = state
    .store
    .list_cards(profile.user_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(cards))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /cards` — body is the camelCase [`CardFields`] document.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  CurrentUser(profile): CurrentUser,
  Json(fields): Json<CardFields>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CollectionStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let fields = fields.validated()?;
  let card = state
    .store
    .create_card(NewCard::new(profile.user_id, fields))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(card)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /cards/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  CurrentUser(profile): CurrentUser,
  Path(id): Path<Uuid>,
) -> Result<Json<Card>, ApiError>
where
  S: CollectionStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let card = owned_card(&state, profile.user_id, id).await?;
  Ok(Json(card))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /cards/:id`
pub async fn update_one<S>(
  State(state): State<AppState<S>>,
  CurrentUser(profile): CurrentUser,
  Path(id): Path<Uuid>,
  Json(fields): Json<CardFields>,
) -> Result<Json<Card>, ApiError>
where
  S: CollectionStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  owned_card(&state, profile.user_id, id).await?;

  let fields = fields.validated()?;
  let card = state
    .store
    .update_card(id, CardUpdate::from(fields))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(card))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /cards/:id`
pub async fn delete_one<S>(
  State(state): State<AppState<S>>,
  CurrentUser(profile): CurrentUser,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CollectionStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  owned_card(&state, profile.user_id, id).await?;

  let deleted = state
    .store
    .delete_card(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !deleted {
    // Raced with another session; the record is gone either way.
    return Err(ApiError::NotFound(format!("card {id} not found")));
  }
  Ok(StatusCode::NO_CONTENT)
}
