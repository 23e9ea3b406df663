//! The card draft — form state for the add and edit flows.
//!
//! The draft keeps numeric fields as raw text while the user types;
//! [`CardDraft::validate`] is the single parse/validate boundary, so invalid
//! input surfaces as a typed error rather than a silent non-match. The
//! sport → manufacturer → set cascade is modelled as explicit transitions
//! that each leave the draft fully consistent.

use crate::{
  Error, Result,
  card::{
    Card, CardFields, GRADE_MAX, GRADE_MIN, Graded, GradingCompany, Sport,
  },
  reference,
};

// ─── Attachment limits ───────────────────────────────────────────────────────

/// Upper bound on an attached image file, before any recompression.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Bounding box an attached image is resized into (aspect ratio preserved)
/// before upload, to bound upload size and hosting cost.
pub const IMAGE_BOX_WIDTH: u32 = 800;
pub const IMAGE_BOX_HEIGHT: u32 = 1000;

/// An image accepted into a draft, ready for upload.
#[derive(Debug, Clone)]
pub struct PendingImage {
  pub bytes: Vec<u8>,
  /// MIME type, e.g. `image/jpeg`.
  pub mime:  String,
}

/// Check the raw attachment constraints: an `image/*` MIME type and at most
/// [`MAX_IMAGE_BYTES`] bytes.
pub fn validate_attachment(mime: &str, len: usize) -> Result<()> {
  if !mime.starts_with("image/") {
    return Err(Error::NotAnImage(mime.to_owned()));
  }
  if len > MAX_IMAGE_BYTES {
    return Err(Error::ImageTooLarge(len));
  }
  Ok(())
}

// ─── CardDraft ───────────────────────────────────────────────────────────────

/// A card being composed or edited. Text fields hold raw input; option lists
/// track what the reference tables currently allow.
#[derive(Debug, Clone, Default)]
pub struct CardDraft {
  pub player:               String,
  /// Raw text; parsed by [`CardDraft::validate`].
  pub year:                 String,
  pub sport:                Option<Sport>,
  pub manufacturer:         String,
  pub set_name:             String,
  pub card_number:          String,
  pub graded:               Graded,
  pub grading_company:      Option<GradingCompany>,
  /// Raw text; parsed by [`CardDraft::validate`].
  pub grade_number:         String,
  pub notes:                String,
  /// A newly attached image awaiting upload.
  pub image:                Option<PendingImage>,
  /// The already-hosted image URL (edit mode), kept unless replaced.
  pub image_url:            Option<String>,
  pub manufacturer_options: &'static [&'static str],
  pub set_options:          &'static [&'static str],
}

impl CardDraft {
  /// An empty default draft: ungraded, nothing selected.
  pub fn new() -> Self { Self::default() }

  /// Seed a draft from an existing card (edit mode), including the option
  /// lists for its current sport and manufacturer.
  pub fn from_card(card: &Card) -> Self {
    let manufacturer_options = reference::manufacturers_for_sport(card.sport);
    let set_options = reference::sets_for(&card.manufacturer, card.sport);
    Self {
      player: card.player.clone(),
      year: card.year.to_string(),
      sport: Some(card.sport),
      manufacturer: card.manufacturer.clone(),
      set_name: card.set_name.clone().unwrap_or_default(),
      card_number: card.card_number.clone().unwrap_or_default(),
      graded: card.graded,
      grading_company: card.grading_company,
      grade_number: card
        .grade_number
        .map(|g| g.to_string())
        .unwrap_or_default(),
      notes: card.notes.clone().unwrap_or_default(),
      image: None,
      image_url: card.image_url.clone(),
      manufacturer_options,
      set_options,
    }
  }

  // ── Cascade transitions ───────────────────────────────────────────────────

  /// Change the sport. Unlike the browse filter, the form always resets the
  /// manufacturer and set — a fresh choice is forced on every sport change.
  pub fn apply_sport(&mut self, sport: Option<Sport>) {
    self.sport = sport;
    self.manufacturer.clear();
    self.set_name.clear();
    self.set_options = &[];
    self.manufacturer_options = match sport {
      Some(s) => reference::manufacturers_for_sport(s),
      None => &[],
    };
  }

  /// Change the manufacturer, resetting the set and reloading its options.
  pub fn apply_manufacturer(&mut self, manufacturer: String) {
    self.manufacturer = manufacturer;
    self.set_name.clear();
    self.set_options = if self.manufacturer.is_empty() {
      &[]
    } else {
      let sport = self.sport.unwrap_or(Sport::Other);
      reference::sets_for(&self.manufacturer, sport)
    };
  }

  // ── Image attachment ──────────────────────────────────────────────────────

  /// Accept an image into the draft, or reject it leaving the draft's image
  /// state unchanged.
  pub fn attach_image(&mut self, image: PendingImage) -> Result<()> {
    validate_attachment(&image.mime, image.bytes.len())?;
    self.image = Some(image);
    Ok(())
  }

  /// Drop both the pending attachment and any hosted URL.
  pub fn clear_image(&mut self) {
    self.image = None;
    self.image_url = None;
  }

  // ── Submit boundary ───────────────────────────────────────────────────────

  /// Parse and validate the draft into a consistent [`CardFields`] value.
  /// The draft itself is untouched, so a failed submit can be corrected and
  /// retried.
  pub fn validate(&self) -> Result<CardFields> {
    let year_text = self.year.trim();
    if year_text.is_empty() {
      return Err(Error::MissingField("year"));
    }
    let year: i32 = year_text
      .parse()
      .map_err(|_| Error::InvalidYear(self.year.clone()))?;

    let sport = self.sport.ok_or(Error::MissingField("sport"))?;

    let grade_number = match self.graded {
      Graded::No => None,
      Graded::Yes => {
        let text = self.grade_number.trim();
        if text.is_empty() {
          None // reported as missing by CardFields::validated
        } else {
          let grade: u8 =
            text.parse().map_err(|_| Error::InvalidGrade(text.to_owned()))?;
          if !(GRADE_MIN..=GRADE_MAX).contains(&grade) {
            return Err(Error::GradeOutOfRange(grade));
          }
          Some(grade)
        }
      }
    };

    let non_empty =
      |s: &str| (!s.trim().is_empty()).then(|| s.trim().to_owned());

    CardFields {
      player: self.player.trim().to_owned(),
      year,
      sport,
      manufacturer: self.manufacturer.clone(),
      set_name: non_empty(&self.set_name),
      card_number: non_empty(&self.card_number),
      graded: self.graded,
      grading_company: self.grading_company,
      grade_number,
      notes: non_empty(&self.notes),
      image_url: self.image_url.clone(),
    }
    .validated()
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn filled_draft() -> CardDraft {
    let mut draft = CardDraft::new();
    draft.player = "Shohei Ohtani".into();
    draft.year = "2018".into();
    draft.apply_sport(Some(Sport::Baseball));
    draft.apply_manufacturer("Topps".into());
    draft.set_name = "Topps Chrome".into();
    draft
  }

  #[test]
  fn new_draft_is_ungraded_with_no_options() {
    let draft = CardDraft::new();
    assert_eq!(draft.graded, Graded::No);
    assert!(draft.manufacturer_options.is_empty());
    assert!(draft.set_options.is_empty());
  }

  // ── Cascade ───────────────────────────────────────────────────────────────

  #[test]
  fn apply_sport_resets_downstream_and_loads_options() {
    let mut draft = filled_draft();
    draft.apply_sport(Some(Sport::Hockey));
    assert!(draft.manufacturer.is_empty());
    assert!(draft.set_name.is_empty());
    assert_eq!(
      draft.manufacturer_options,
      reference::manufacturers_for_sport(Sport::Hockey),
    );
    assert!(draft.set_options.is_empty());
  }

  #[test]
  fn apply_manufacturer_resets_set_and_loads_options() {
    let mut draft = filled_draft();
    draft.apply_manufacturer("Bowman".into());
    assert!(draft.set_name.is_empty());
    assert_eq!(
      draft.set_options,
      reference::sets_for("Bowman", Sport::Baseball),
    );
  }

  #[test]
  fn from_card_seeds_fields_and_option_lists() {
    let fields = filled_draft().validate().unwrap();
    let card = Card {
      card_id: uuid::Uuid::new_v4(),
      user_id: uuid::Uuid::new_v4(),
      player: fields.player.clone(),
      year: fields.year,
      sport: fields.sport,
      manufacturer: fields.manufacturer.clone(),
      set_name: fields.set_name.clone(),
      card_number: None,
      graded: Graded::No,
      grading_company: None,
      grade_number: None,
      notes: None,
      image_url: Some("https://img.example/x.jpg".into()),
      created_at: chrono::Utc::now(),
      updated_at: None,
    };
    let draft = CardDraft::from_card(&card);
    assert_eq!(draft.player, "Shohei Ohtani");
    assert_eq!(draft.year, "2018");
    assert_eq!(
      draft.manufacturer_options,
      reference::manufacturers_for_sport(Sport::Baseball),
    );
    assert_eq!(draft.set_options, reference::sets_for("Topps", Sport::Baseball));
    assert_eq!(draft.image_url.as_deref(), Some("https://img.example/x.jpg"));
  }

  // ── Validation ────────────────────────────────────────────────────────────

  #[test]
  fn validate_parses_year_and_trims_text() {
    let mut draft = filled_draft();
    draft.year = " 2018 ".into();
    draft.notes = "  ".into();
    let fields = draft.validate().unwrap();
    assert_eq!(fields.year, 2018);
    assert_eq!(fields.notes, None);
  }

  #[test]
  fn validate_rejects_non_numeric_year_with_typed_error() {
    let mut draft = filled_draft();
    draft.year = "twenty18".into();
    assert_eq!(
      draft.validate(),
      Err(Error::InvalidYear("twenty18".into()))
    );
  }

  #[test]
  fn graded_yes_without_company_is_rejected_before_any_side_effect() {
    let mut draft = filled_draft();
    draft.graded = Graded::Yes;
    draft.grade_number = "10".into();
    assert_eq!(draft.validate(), Err(Error::MissingField("grading company")));
    // The draft is preserved for correction.
    assert_eq!(draft.grade_number, "10");
  }

  #[test]
  fn grade_outside_one_to_ten_is_rejected() {
    let mut draft = filled_draft();
    draft.graded = Graded::Yes;
    draft.grading_company = Some(GradingCompany::CGC);
    draft.grade_number = "11".into();
    assert_eq!(draft.validate(), Err(Error::GradeOutOfRange(11)));
  }

  // ── Attachment ────────────────────────────────────────────────────────────

  #[test]
  fn oversized_attachment_is_rejected_and_draft_unchanged() {
    let mut draft = filled_draft();
    let six_mb = 6 * 1024 * 1024;
    let err = draft
      .attach_image(PendingImage {
        bytes: vec![0u8; six_mb],
        mime:  "image/jpeg".into(),
      })
      .unwrap_err();
    assert_eq!(err, Error::ImageTooLarge(six_mb));
    assert!(draft.image.is_none());
  }

  #[test]
  fn non_image_mime_is_rejected() {
    let mut draft = filled_draft();
    let err = draft
      .attach_image(PendingImage {
        bytes: vec![0u8; 128],
        mime:  "application/pdf".into(),
      })
      .unwrap_err();
    assert_eq!(err, Error::NotAnImage("application/pdf".into()));
    assert!(draft.image.is_none());
  }

  #[test]
  fn acceptable_attachment_is_stored() {
    let mut draft = filled_draft();
    draft
      .attach_image(PendingImage {
        bytes: vec![0u8; 1024],
        mime:  "image/png".into(),
      })
      .unwrap();
    assert!(draft.image.is_some());
  }
}
