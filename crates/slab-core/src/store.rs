//! The `CollectionStore` trait — the document-store seam.
//!
//! Implemented by storage backends (e.g. `slab-store-sqlite`). Higher layers
//! (`slab-api`, `slab-cli`) depend on this abstraction, not on any concrete
//! backend. The store treats records as schemaless documents: it relies only
//! on field presence/absence, and never validates manufacturer or set names
//! against the reference tables.
//!
//! All methods return `Send` futures so the trait can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use uuid::Uuid;

use crate::{
  card::{Card, CardUpdate, NewCard},
  profile::{NewUser, StoredUser, UserProfile},
};

pub trait CollectionStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Create and persist a user. Emails are unique; a duplicate is an error.
  fn create_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<UserProfile, Self::Error>> + Send + '_;

  /// Retrieve a profile by id. Returns `None` if not found.
  fn get_user(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<UserProfile>, Self::Error>> + Send + '_;

  /// Retrieve a profile plus its credential hash by email (sign-in path).
  /// Email comparison is case-insensitive.
  fn get_user_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<StoredUser>, Self::Error>> + Send + 'a;

  /// Merge-update the profile name, stamping `updated_at`.
  fn update_user_name<'a>(
    &'a self,
    id: Uuid,
    name: &'a str,
  ) -> impl Future<Output = Result<UserProfile, Self::Error>> + Send + 'a;

  // ── Cards ─────────────────────────────────────────────────────────────

  /// Persist a new card and return it. The store assigns the id and
  /// `created_at`.
  fn create_card(
    &self,
    input: NewCard,
  ) -> impl Future<Output = Result<Card, Self::Error>> + Send + '_;

  /// Retrieve a card by id. Returns `None` if not found. Ownership checks
  /// are the caller's responsibility.
  fn get_card(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Card>, Self::Error>> + Send + '_;

  /// Replace a card's mutable fields, stamping `updated_at`. The id and
  /// owner are stable. Errors if the card does not exist.
  fn update_card(
    &self,
    id: Uuid,
    update: CardUpdate,
  ) -> impl Future<Output = Result<Card, Self::Error>> + Send + '_;

  /// Delete a card. Returns `false` when it was already gone — callers
  /// treat that as a tolerated no-op, never a fatal error.
  fn delete_card(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// All cards owned by `user_id`, in storage order. Ordering for display
  /// is the browse engine's job.
  fn list_cards(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Card>, Self::Error>> + Send + '_;
}
