//! Card types — the fundamental record of the slab collection.
//!
//! A card is a plain mutable document owned by exactly one user. The store
//! assigns its id and timestamps; everything else is caller-supplied and
//! validated once, at the submit boundary, via [`CardFields::validated`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Accepted bounds for [`Card::year`], both inclusive.
pub const YEAR_MIN: i32 = 1900;
pub const YEAR_MAX: i32 = 2030;

/// Accepted bounds for [`Card::grade_number`], both inclusive.
pub const GRADE_MIN: u8 = 1;
pub const GRADE_MAX: u8 = 10;

// ─── Closed enums ────────────────────────────────────────────────────────────

/// The sport a card belongs to. Closed set; "Other" is the catch-all.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumIter,
  strum::EnumString,
)]
pub enum Sport {
  Baseball,
  Football,
  Basketball,
  #[serde(rename = "WNBA")]
  #[strum(serialize = "WNBA")]
  Wnba,
  Hockey,
  Soccer,
  Other,
}

/// Whether a card has been professionally graded.
/// Stored as the literal strings "Yes" / "No" on the wire.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub enum Graded {
  Yes,
  #[default]
  No,
}

impl Graded {
  pub fn is_yes(self) -> bool { matches!(self, Self::Yes) }
}

/// The company that graded a card. Only meaningful when graded = Yes.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumIter,
  strum::EnumString,
)]
#[allow(clippy::upper_case_acronyms)]
pub enum GradingCompany {
  PSA,
  BGS,
  SGC,
  CGC,
  HGA,
  CSG,
  GMA,
  Flawless,
  Other,
}

// ─── Card ────────────────────────────────────────────────────────────────────

/// One physical collectible card.
///
/// Serialises in the camelCase, sparse-document shape the hosted store
/// expects: absent optionals are omitted entirely, and `set_name` travels as
/// plain `set`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
  pub card_id:         Uuid,
  /// Owner; set at creation, never changed afterwards.
  pub user_id:         Uuid,
  pub player:          String,
  pub year:            i32,
  pub sport:           Sport,
  pub manufacturer:    String,
  #[serde(rename = "set", default, skip_serializing_if = "Option::is_none")]
  pub set_name:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub card_number:     Option<String>,
  #[serde(default)]
  pub graded:          Graded,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub grading_company: Option<GradingCompany>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub grade_number:    Option<u8>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notes:           Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image_url:       Option<String>,
  /// Store-assigned; never changes after creation.
  pub created_at:      DateTime<Utc>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub updated_at:      Option<DateTime<Utc>>,
}

impl Card {
  /// Whether the card carries a hosted image (present and non-empty).
  pub fn has_image(&self) -> bool {
    self.image_url.as_deref().is_some_and(|u| !u.is_empty())
  }
}

// ─── CardFields ──────────────────────────────────────────────────────────────

/// The caller-supplied portion of a card: everything except identity and
/// timestamps. Used both as the validated output of a draft and as the JSON
/// request body for card create/update calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardFields {
  pub player:          String,
  pub year:            i32,
  pub sport:           Sport,
  pub manufacturer:    String,
  #[serde(rename = "set", default, skip_serializing_if = "Option::is_none")]
  pub set_name:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub card_number:     Option<String>,
  #[serde(default)]
  pub graded:          Graded,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub grading_company: Option<GradingCompany>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub grade_number:    Option<u8>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notes:           Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image_url:       Option<String>,
}

impl CardFields {
  /// Enforce the submit-time rules and return a consistent value.
  ///
  /// Required: player, manufacturer and set non-empty, year within
  /// [`YEAR_MIN`]..=[`YEAR_MAX`]; when graded = Yes, a grading company and a
  /// grade within [`GRADE_MIN`]..=[`GRADE_MAX`]. When graded = No, company
  /// and grade are blanked rather than rejected.
  pub fn validated(mut self) -> Result<Self> {
    if self.player.trim().is_empty() {
      return Err(Error::MissingField("player"));
    }
    if !(YEAR_MIN..=YEAR_MAX).contains(&self.year) {
      return Err(Error::YearOutOfRange(self.year));
    }
    if self.manufacturer.trim().is_empty() {
      return Err(Error::MissingField("manufacturer"));
    }
    if self.set_name.as_deref().is_none_or(|s| s.trim().is_empty()) {
      return Err(Error::MissingField("set"));
    }

    match self.graded {
      Graded::Yes => {
        if self.grading_company.is_none() {
          return Err(Error::MissingField("grading company"));
        }
        let grade =
          self.grade_number.ok_or(Error::MissingField("grade number"))?;
        if !(GRADE_MIN..=GRADE_MAX).contains(&grade) {
          return Err(Error::GradeOutOfRange(grade));
        }
      }
      Graded::No => {
        // Ungraded cards never carry grading data.
        self.grading_company = None;
        self.grade_number = None;
      }
    }

    Ok(self)
  }
}

// ─── Store inputs ────────────────────────────────────────────────────────────

/// Input to [`crate::store::CollectionStore::create_card`].
/// The id and `created_at` are always set by the store.
#[derive(Debug, Clone)]
pub struct NewCard {
  pub user_id: Uuid,
  pub fields:  CardFields,
}

impl NewCard {
  pub fn new(user_id: Uuid, fields: CardFields) -> Self {
    Self { user_id, fields }
  }
}

/// Input to [`crate::store::CollectionStore::update_card`]: the full set of
/// mutable fields. The owner and `created_at` are untouched; the store stamps
/// `updated_at`.
#[derive(Debug, Clone)]
pub struct CardUpdate {
  pub fields: CardFields,
}

impl From<CardFields> for CardUpdate {
  fn from(fields: CardFields) -> Self { Self { fields } }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
