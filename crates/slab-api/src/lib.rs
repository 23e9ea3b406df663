//! JSON REST API for the slab collection.
//!
//! Exposes an axum [`Router`] backed by any
//! [`slab_core::store::CollectionStore`]. Every card route is scoped to the
//! authenticated user; TLS and transport concerns are the caller's
//! responsibility.

pub mod auth;
pub mod cards;
pub mod error;
pub mod search;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use tower_http::trace::TraceLayer;

use slab_core::store::CollectionStore;

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: CollectionStore> {
  pub store: Arc<S>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: CollectionStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Registration and profile
    .route("/register", post(users::register::<S>))
    .route("/me", get(users::me::<S>).put(users::update_me::<S>))
    // Cards
    .route("/cards", get(cards::list::<S>).post(cards::create::<S>))
    .route("/cards/search", get(search::handler::<S>))
    .route(
      "/cards/{id}",
      get(cards::get_one::<S>)
        .put(cards::update_one::<S>)
        .delete(cards::delete_one::<S>),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use base64::Engine as _;
  use base64::engine::general_purpose::STANDARD as B64;
  use serde_json::{Value, json};
  use slab_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;
  use uuid::Uuid;

  async fn make_state() -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    AppState { store: Arc::new(store) }
  }

  fn auth_header(email: &str, pass: &str) -> String {
    format!("Basic {}", B64.encode(format!("{email}:{pass}")))
  }

  async fn oneshot_raw(
    state:   AppState<SqliteStore>,
    method:  &str,
    uri:     &str,
    auth:    Option<&str>,
    body:    Option<Value>,
  ) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(a) = auth {
      builder = builder.header(header::AUTHORIZATION, a);
    }
    let req = match body {
      Some(json) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    router(state).oneshot(req).await.unwrap()
  }

  async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  /// Register `email` with password "secret" and return the profile JSON.
  async fn register(state: &AppState<SqliteStore>, email: &str) -> Value {
    let resp = oneshot_raw(
      state.clone(),
      "POST",
      "/register",
      None,
      Some(json!({ "email": email, "password": "secret", "name": "Tester" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
  }

  fn card_body(player: &str, year: i32) -> Value {
    json!({
      "player": player,
      "year": year,
      "sport": "Baseball",
      "manufacturer": "Topps",
      "set": "Topps Chrome",
      "graded": "No"
    })
  }

  // ── Registration ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn register_returns_201_with_profile() {
    let state = make_state().await;
    let profile = register(&state, "a@example.com").await;
    assert_eq!(profile["email"], "a@example.com");
    assert_eq!(profile["name"], "Tester");
    // The credential hash never appears in a response.
    assert!(profile.get("passwordHash").is_none());
  }

  #[tokio::test]
  async fn duplicate_email_returns_409() {
    let state = make_state().await;
    register(&state, "a@example.com").await;

    let resp = oneshot_raw(
      state,
      "POST",
      "/register",
      None,
      Some(json!({ "email": "a@example.com", "password": "x", "name": "B" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
  }

  #[tokio::test]
  async fn register_without_email_returns_400() {
    let state = make_state().await;
    let resp = oneshot_raw(
      state,
      "POST",
      "/register",
      None,
      Some(json!({ "email": "not-an-email", "password": "x", "name": "B" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  // ── Auth ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn unauthenticated_requests_return_401() {
    let state = make_state().await;
    let resp = oneshot_raw(state, "GET", "/cards", None, None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));
  }

  #[tokio::test]
  async fn wrong_password_returns_401() {
    let state = make_state().await;
    register(&state, "a@example.com").await;

    let auth = auth_header("a@example.com", "wrong");
    let resp = oneshot_raw(state, "GET", "/me", Some(&auth), None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn me_round_trip_and_name_update() {
    let state = make_state().await;
    register(&state, "a@example.com").await;
    let auth = auth_header("a@example.com", "secret");

    let resp =
      oneshot_raw(state.clone(), "GET", "/me", Some(&auth), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["name"], "Tester");

    let resp = oneshot_raw(
      state.clone(),
      "PUT",
      "/me",
      Some(&auth),
      Some(json!({ "name": "Renamed" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = oneshot_raw(state, "GET", "/me", Some(&auth), None).await;
    let me = body_json(resp).await;
    assert_eq!(me["name"], "Renamed");
    assert!(me.get("updatedAt").is_some());
  }

  // ── Cards ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_then_list_cards() {
    let state = make_state().await;
    register(&state, "a@example.com").await;
    let auth = auth_header("a@example.com", "secret");

    let resp = oneshot_raw(
      state.clone(),
      "POST",
      "/cards",
      Some(&auth),
      Some(card_body("Hank Aaron", 1954)),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await;
    assert_eq!(created["player"], "Hank Aaron");
    assert!(created.get("cardId").is_some());

    let resp = oneshot_raw(state, "GET", "/cards", Some(&auth), None).await;
    let cards = body_json(resp).await;
    assert_eq!(cards.as_array().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn invalid_card_returns_422_and_writes_nothing() {
    let state = make_state().await;
    register(&state, "a@example.com").await;
    let auth = auth_header("a@example.com", "secret");

    // graded = Yes without a grading company must be rejected.
    let mut body = card_body("Jordan", 1986);
    body["graded"] = json!("Yes");
    let resp =
      oneshot_raw(state.clone(), "POST", "/cards", Some(&auth), Some(body))
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // No storage call was made.
    let resp = oneshot_raw(state, "GET", "/cards", Some(&auth), None).await;
    assert_eq!(body_json(resp).await.as_array().unwrap().len(), 0);
  }

  #[tokio::test]
  async fn foreign_cards_are_invisible() {
    let state = make_state().await;
    register(&state, "alice@example.com").await;
    register(&state, "bob@example.com").await;
    let alice = auth_header("alice@example.com", "secret");
    let bob = auth_header("bob@example.com", "secret");

    let resp = oneshot_raw(
      state.clone(),
      "POST",
      "/cards",
      Some(&alice),
      Some(card_body("Mays", 1951)),
    )
    .await;
    let id = body_json(resp).await["cardId"].as_str().unwrap().to_owned();

    // Bob cannot read, update or delete Alice's card; all answer 404.
    let uri = format!("/cards/{id}");
    let resp =
      oneshot_raw(state.clone(), "GET", &uri, Some(&bob), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = oneshot_raw(
      state.clone(),
      "PUT",
      &uri,
      Some(&bob),
      Some(card_body("Hijacked", 1951)),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp =
      oneshot_raw(state.clone(), "DELETE", &uri, Some(&bob), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Alice still sees it untouched.
    let resp = oneshot_raw(state, "GET", &uri, Some(&alice), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["player"], "Mays");
  }

  #[tokio::test]
  async fn update_stamps_updated_at_and_keeps_id() {
    let state = make_state().await;
    register(&state, "a@example.com").await;
    let auth = auth_header("a@example.com", "secret");

    let resp = oneshot_raw(
      state.clone(),
      "POST",
      "/cards",
      Some(&auth),
      Some(card_body("Acuna", 2018)),
    )
    .await;
    let id = body_json(resp).await["cardId"].as_str().unwrap().to_owned();

    let resp = oneshot_raw(
      state,
      "PUT",
      &format!("/cards/{id}"),
      Some(&auth),
      Some(card_body("Acuna Jr.", 2018)),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    assert_eq!(updated["cardId"], id.as_str());
    assert_eq!(updated["player"], "Acuna Jr.");
    assert!(updated.get("updatedAt").is_some());
  }

  #[tokio::test]
  async fn delete_is_a_no_op_the_second_time() {
    let state = make_state().await;
    register(&state, "a@example.com").await;
    let auth = auth_header("a@example.com", "secret");

    let resp = oneshot_raw(
      state.clone(),
      "POST",
      "/cards",
      Some(&auth),
      Some(card_body("Trout", 2011)),
    )
    .await;
    let id = body_json(resp).await["cardId"].as_str().unwrap().to_owned();
    let uri = format!("/cards/{id}");

    let resp =
      oneshot_raw(state.clone(), "DELETE", &uri, Some(&auth), None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = oneshot_raw(state, "DELETE", &uri, Some(&auth), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn delete_unknown_id_returns_404() {
    let state = make_state().await;
    register(&state, "a@example.com").await;
    let auth = auth_header("a@example.com", "secret");
    let resp = oneshot_raw(
      state,
      "DELETE",
      &format!("/cards/{}", Uuid::new_v4()),
      Some(&auth),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Search ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn search_runs_the_engine_server_side() {
    let state = make_state().await;
    register(&state, "a@example.com").await;
    let auth = auth_header("a@example.com", "secret");

    for body in [
      card_body("Raw Rookie", 2010),
      json!({
        "player": "Gem Mint",
        "year": 2020,
        "sport": "Basketball",
        "manufacturer": "Panini",
        "set": "Prizm",
        "graded": "Yes",
        "gradingCompany": "PSA",
        "gradeNumber": 10
      }),
    ] {
      let resp = oneshot_raw(
        state.clone(),
        "POST",
        "/cards",
        Some(&auth),
        Some(body),
      )
      .await;
      assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = oneshot_raw(
      state.clone(),
      "GET",
      "/cards/search?grade_range=10",
      Some(&auth),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let hits = body_json(resp).await;
    assert_eq!(hits.as_array().unwrap().len(), 1);
    assert_eq!(hits[0]["player"], "Gem Mint");

    let resp = oneshot_raw(
      state.clone(),
      "GET",
      "/cards/search?sort_by=year&sort_order=desc",
      Some(&auth),
      None,
    )
    .await;
    let all = body_json(resp).await;
    assert_eq!(all[0]["year"], 2020);
    assert_eq!(all[1]["year"], 2010);

    let resp = oneshot_raw(
      state,
      "GET",
      "/cards/search?grading_companies=PSA,BGS&sport=Basketball",
      Some(&auth),
      None,
    )
    .await;
    let hits = body_json(resp).await;
    assert_eq!(hits.as_array().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn search_rejects_unknown_grading_company() {
    let state = make_state().await;
    register(&state, "a@example.com").await;
    let auth = auth_header("a@example.com", "secret");

    let resp = oneshot_raw(
      state,
      "GET",
      "/cards/search?grading_companies=NOPE",
      Some(&auth),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }
}
