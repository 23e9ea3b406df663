//! Async HTTP client wrapping the slab JSON API.

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, StatusCode};
use slab_core::{
  card::{Card, CardFields},
  profile::UserProfile,
};
use std::time::Duration;
use uuid::Uuid;

/// Connection settings for the slab API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub email:    String,
  pub password: String,
}

/// Async HTTP client for the slab JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    req.basic_auth(&self.config.email, Some(&self.config.password))
  }

  // ── Account ───────────────────────────────────────────────────────────────

  /// `POST /register` — uses the configured email/password.
  pub async fn register(&self, name: &str) -> Result<UserProfile> {
    let resp = self
      .client
      .post(self.url("/register"))
      .json(&serde_json::json!({
        "email": self.config.email,
        "password": self.config.password,
        "name": name,
      }))
      .send()
      .await
      .context("POST /register failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("POST /register → {}", resp.status()));
    }
    resp.json().await.context("deserialising profile")
  }

  /// `GET /me` — doubles as the sign-in check.
  pub async fn me(&self) -> Result<UserProfile> {
    let resp = self
      .auth(self.client.get(self.url("/me")))
      .send()
      .await
      .context("GET /me failed")?;

    if resp.status() == StatusCode::UNAUTHORIZED {
      return Err(anyhow!("invalid email or password"));
    }
    if !resp.status().is_success() {
      return Err(anyhow!("GET /me → {}", resp.status()));
    }
    resp.json().await.context("deserialising profile")
  }

  /// `PUT /me`
  pub async fn update_name(&self, name: &str) -> Result<UserProfile> {
    let resp = self
      .auth(self.client.put(self.url("/me")))
      .json(&serde_json::json!({ "name": name }))
      .send()
      .await
      .context("PUT /me failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("PUT /me → {}", resp.status()));
    }
    resp.json().await.context("deserialising profile")
  }

  // ── Cards ─────────────────────────────────────────────────────────────────

  /// `GET /cards`
  pub async fn list_cards(&self) -> Result<Vec<Card>> {
    let resp = self
      .auth(self.client.get(self.url("/cards")))
      .send()
      .await
      .context("GET /cards failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /cards → {}", resp.status()));
    }
    resp.json().await.context("deserialising cards")
  }

  /// `POST /cards`
  pub async fn create_card(&self, fields: &CardFields) -> Result<Card> {
    let resp = self
      .auth(self.client.post(self.url("/cards")))
      .json(fields)
      .send()
      .await
      .context("POST /cards failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("POST /cards → {}", resp.status()));
    }
    resp.json().await.context("deserialising created card")
  }

  /// `PUT /cards/:id`
  pub async fn update_card(&self, id: Uuid, fields: &CardFields) -> Result<Card> {
    let resp = self
      .auth(self.client.put(self.url(&format!("/cards/{id}"))))
      .json(fields)
      .send()
      .await
      .context("PUT /cards failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("PUT /cards/{id} → {}", resp.status()));
    }
    resp.json().await.context("deserialising updated card")
  }

  /// `DELETE /cards/:id` — `Ok(false)` when the card was already gone.
  pub async fn delete_card(&self, id: Uuid) -> Result<bool> {
    let resp = self
      .auth(self.client.delete(self.url(&format!("/cards/{id}"))))
      .send()
      .await
      .context("DELETE /cards failed")?;

    match resp.status() {
      StatusCode::NO_CONTENT => Ok(true),
      StatusCode::NOT_FOUND => Ok(false),
      other => Err(anyhow!("DELETE /cards/{id} → {other}")),
    }
  }
}
