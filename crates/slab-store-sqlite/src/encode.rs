//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Enums are stored as their
//! display strings (the same strings they use on the wire). UUIDs are stored
//! as hyphenated lowercase strings.

use chrono::{DateTime, Utc};
use slab_core::{
  card::{Card, Graded, GradingCompany, Sport},
  profile::{StoredUser, UserProfile},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Enums ───────────────────────────────────────────────────────────────────

pub fn encode_sport(s: Sport) -> String { s.to_string() }

pub fn decode_sport(s: &str) -> Result<Sport> {
  s.parse()
    .map_err(|_| Error::Decode(format!("unknown sport: {s:?}")))
}

pub fn encode_graded(g: Graded) -> &'static str {
  match g {
    Graded::Yes => "Yes",
    Graded::No => "No",
  }
}

pub fn decode_graded(s: &str) -> Result<Graded> {
  match s {
    "Yes" => Ok(Graded::Yes),
    "No" => Ok(Graded::No),
    other => Err(Error::Decode(format!("unknown graded flag: {other:?}"))),
  }
}

pub fn encode_company(c: GradingCompany) -> String { c.to_string() }

pub fn decode_company(s: &str) -> Result<GradingCompany> {
  s.parse()
    .map_err(|_| Error::Decode(format!("unknown grading company: {s:?}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `cards` row.
pub struct RawCard {
  pub card_id:         String,
  pub user_id:         String,
  pub player:          String,
  pub year:            i32,
  pub sport:           String,
  pub manufacturer:    String,
  pub set_name:        Option<String>,
  pub card_number:     Option<String>,
  pub graded:          String,
  pub grading_company: Option<String>,
  pub grade_number:    Option<i64>,
  pub notes:           Option<String>,
  pub image_url:       Option<String>,
  pub created_at:      String,
  pub updated_at:      Option<String>,
}

impl RawCard {
  pub fn into_card(self) -> Result<Card> {
    let grading_company = self
      .grading_company
      .as_deref()
      .map(decode_company)
      .transpose()?;

    let grade_number = self
      .grade_number
      .map(|g| {
        u8::try_from(g)
          .map_err(|_| Error::Decode(format!("grade out of range: {g}")))
      })
      .transpose()?;

    Ok(Card {
      card_id:         decode_uuid(&self.card_id)?,
      user_id:         decode_uuid(&self.user_id)?,
      player:          self.player,
      year:            self.year,
      sport:           decode_sport(&self.sport)?,
      manufacturer:    self.manufacturer,
      set_name:        self.set_name,
      card_number:     self.card_number,
      graded:          decode_graded(&self.graded)?,
      grading_company,
      grade_number,
      notes:           self.notes,
      image_url:       self.image_url,
      created_at:      decode_dt(&self.created_at)?,
      updated_at:      self
        .updated_at
        .as_deref()
        .map(decode_dt)
        .transpose()?,
    })
  }
}

/// Raw strings read directly from a `users` row.
pub struct RawUser {
  pub user_id:       String,
  pub email:         String,
  pub name:          String,
  pub password_hash: String,
  pub created_at:    String,
  pub updated_at:    Option<String>,
}

impl RawUser {
  pub fn into_stored(self) -> Result<StoredUser> {
    Ok(StoredUser {
      profile:       UserProfile {
        user_id:    decode_uuid(&self.user_id)?,
        email:      self.email,
        name:       self.name,
        created_at: decode_dt(&self.created_at)?,
        updated_at: self
          .updated_at
          .as_deref()
          .map(decode_dt)
          .transpose()?,
      },
      password_hash: self.password_hash,
    })
  }
}
