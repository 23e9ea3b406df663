//! Local image preparation: sniff, size-check, resize, re-encode.
//!
//! The attachment constraints (MIME prefix, 5 MiB cap, 800×1000 bounding
//! box) come from `slab_core::draft`; this module does the byte work. The
//! resize runs before upload so the hosted copy is bounded in size no matter
//! what the user picked.

use std::{io::Cursor, path::Path};

use anyhow::{Context, Result, bail};
use image::{ImageFormat, ImageOutputFormat};
use slab_core::draft::{
  IMAGE_BOX_HEIGHT, IMAGE_BOX_WIDTH, PendingImage, validate_attachment,
};

const JPEG_QUALITY: u8 = 80;

fn mime_for(format: ImageFormat) -> Option<&'static str> {
  match format {
    ImageFormat::Jpeg => Some("image/jpeg"),
    ImageFormat::Png => Some("image/png"),
    ImageFormat::Gif => Some("image/gif"),
    ImageFormat::WebP => Some("image/webp"),
    _ => None,
  }
}

/// Read `path`, validate it as an acceptable attachment and shrink it into
/// the upload bounding box.
///
/// The validation runs against the file as picked: a 6 MiB photo is rejected
/// even though the recompressed copy would fit.
pub fn prepare_image(path: &Path) -> Result<PendingImage> {
  let bytes = std::fs::read(path)
    .with_context(|| format!("reading image {}", path.display()))?;

  let Some(mime) = image::guess_format(&bytes).ok().and_then(mime_for) else {
    bail!("{} is not a supported image file", path.display());
  };
  validate_attachment(mime, bytes.len())?;

  let decoded = image::load_from_memory(&bytes)
    .with_context(|| format!("decoding image {}", path.display()))?;

  // Shrink into the box preserving aspect ratio; images that already fit
  // are left at their original dimensions.
  let resized = if decoded.width() > IMAGE_BOX_WIDTH
    || decoded.height() > IMAGE_BOX_HEIGHT
  {
    decoded.thumbnail(IMAGE_BOX_WIDTH, IMAGE_BOX_HEIGHT)
  } else {
    decoded
  };

  let mut out = Vec::new();
  resized
    .write_to(
      &mut Cursor::new(&mut out),
      ImageOutputFormat::Jpeg(JPEG_QUALITY),
    )
    .context("re-encoding image")?;

  Ok(PendingImage { bytes: out, mime: "image/jpeg".into() })
}

#[cfg(test)]
mod tests {
  use super::*;
  use image::{DynamicImage, RgbImage};

  fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
    let mut out = Vec::new();
    img
      .write_to(&mut Cursor::new(&mut out), ImageOutputFormat::Png)
      .unwrap();
    out
  }

  fn write_temp(name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(name);
    std::fs::write(&path, bytes).unwrap();
    path
  }

  #[test]
  fn oversized_source_dimensions_are_shrunk_into_the_box() {
    let path = write_temp("slab-media-large.png", &png_bytes(1600, 1200));
    let pending = prepare_image(&path).unwrap();
    assert_eq!(pending.mime, "image/jpeg");

    let round = image::load_from_memory(&pending.bytes).unwrap();
    assert!(round.width() <= IMAGE_BOX_WIDTH);
    assert!(round.height() <= IMAGE_BOX_HEIGHT);
    // Aspect ratio survives (4:3 within rounding).
    let ratio = f64::from(round.width()) / f64::from(round.height());
    assert!((ratio - 4.0 / 3.0).abs() < 0.02, "ratio {ratio}");
  }

  #[test]
  fn small_images_are_not_upscaled() {
    let path = write_temp("slab-media-small.png", &png_bytes(200, 250));
    let pending = prepare_image(&path).unwrap();
    let round = image::load_from_memory(&pending.bytes).unwrap();
    assert_eq!((round.width(), round.height()), (200, 250));
  }

  #[test]
  fn non_image_files_are_rejected() {
    let path = write_temp("slab-media-not-image.txt", b"just some text");
    let err = prepare_image(&path).unwrap_err();
    assert!(err.to_string().contains("not a supported image"));
  }
}
