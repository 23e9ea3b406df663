//! HTTP Basic-auth extractor and password hashing.
//!
//! Credentials are the account email and password; the password is verified
//! against the argon2 PHC string kept by the store. Handlers that take a
//! [`CurrentUser`] parameter are authenticated by construction.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, request::Parts},
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use rand_core::OsRng;

use slab_core::{profile::UserProfile, store::CollectionStore};

use crate::{AppState, error::ApiError};

/// Hash a plaintext password into an argon2 PHC string for storage.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|h| h.to_string())
    .map_err(|e| ApiError::BadRequest(format!("cannot hash password: {e}")))
}

fn basic_credentials(headers: &HeaderMap) -> Result<(String, String), ApiError> {
  let header_val = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(ApiError::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| ApiError::Unauthorized)?;
  let creds =
    String::from_utf8(decoded).map_err(|_| ApiError::Unauthorized)?;

  let (email, password) =
    creds.split_once(':').ok_or(ApiError::Unauthorized)?;
  Ok((email.to_owned(), password.to_owned()))
}

/// Verify credentials against the store and return the signed-in profile.
pub async fn verify_auth<S>(
  headers: &HeaderMap,
  store: &S,
) -> Result<UserProfile, ApiError>
where
  S: CollectionStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let (email, password) = basic_credentials(headers)?;

  let stored = store
    .get_user_by_email(&email)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or(ApiError::Unauthorized)?;

  let parsed_hash = PasswordHash::new(&stored.password_hash)
    .map_err(|_| ApiError::Unauthorized)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| ApiError::Unauthorized)?;

  Ok(stored.profile)
}

/// The authenticated user; present in a handler means the request carried
/// valid credentials.
pub struct CurrentUser(pub UserProfile);

impl<S> FromRequestParts<AppState<S>> for CurrentUser
where
  S: CollectionStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let profile = verify_auth(&parts.headers, state.store.as_ref()).await?;
    Ok(CurrentUser(profile))
  }
}
