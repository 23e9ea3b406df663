//! The `ImageHost` trait — the image-hosting seam.
//!
//! Card images are never stored alongside the records; an accepted
//! attachment is uploaded to an external host and only the returned public
//! URL is persisted. An upload failure must abort the surrounding submit
//! before any record write.

use std::future::Future;

use crate::draft::PendingImage;

pub trait ImageHost: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Upload an image and return its public URL.
  fn upload(
    &self,
    image: PendingImage,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + '_;
}
