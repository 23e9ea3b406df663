//! ImgBB-style image host client.
//!
//! Implements [`ImageHost`] over the hosted upload API: a multipart POST of
//! the image bytes, authenticated with an API key in the query string. Only
//! the returned public URL ever reaches the card record.

use reqwest::multipart;
use serde::Deserialize;
use slab_core::{draft::PendingImage, images::ImageHost};
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://api.imgbb.com/1/upload";

#[derive(Debug, Error)]
pub enum ImgbbError {
  #[error("upload request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("upload rejected: {0}")]
  Rejected(String),
}

/// Response envelope: `{"success":true,"data":{"url":...}}` on success,
/// `{"error":{"message":...}}` otherwise.
#[derive(Debug, Deserialize)]
struct UploadResponse {
  #[serde(default)]
  success: bool,
  data:    Option<UploadData>,
  error:   Option<UploadError>,
}

#[derive(Debug, Deserialize)]
struct UploadData {
  url: String,
}

#[derive(Debug, Deserialize)]
struct UploadError {
  message: String,
}

#[derive(Clone)]
pub struct ImgbbHost {
  endpoint: String,
  api_key:  String,
  client:   reqwest::Client,
}

impl ImgbbHost {
  pub fn new(endpoint: String, api_key: String) -> Self {
    Self { endpoint, api_key, client: reqwest::Client::new() }
  }
}

impl ImageHost for ImgbbHost {
  type Error = ImgbbError;

  async fn upload(&self, image: PendingImage) -> Result<String, ImgbbError> {
    let part = multipart::Part::bytes(image.bytes)
      .file_name("card.jpg")
      .mime_str(&image.mime)?;
    let form = multipart::Form::new().part("image", part);

    let resp = self
      .client
      .post(&self.endpoint)
      .query(&[("key", self.api_key.as_str())])
      .multipart(form)
      .send()
      .await?;

    let status = resp.status();
    let parsed: UploadResponse = resp
      .json()
      .await
      .map_err(|_| ImgbbError::Rejected(format!("unexpected response ({status})")))?;

    match parsed {
      UploadResponse { success: true, data: Some(data), .. } => Ok(data.url),
      UploadResponse { error: Some(e), .. } => Err(ImgbbError::Rejected(e.message)),
      _ => Err(ImgbbError::Rejected(format!("upload failed ({status})"))),
    }
  }
}
