//! The add/edit form screen: a [`CardDraft`] plus cursor state and the
//! submit orchestration (validate → upload image → persist).

use std::path::Path;

use anyhow::{Context as _, Result, anyhow};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use strum::IntoEnumIterator as _;
use uuid::Uuid;

use slab_core::{
  card::{Card, Graded, GradingCompany, Sport},
  draft::CardDraft,
  images::ImageHost,
};

use crate::{client::ApiClient, media};

// ─── Fields ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Player,
  Year,
  Sport,
  Manufacturer,
  SetName,
  CardNumber,
  Graded,
  GradingCompany,
  GradeNumber,
  Notes,
  Image,
}

const ALL_FIELDS: &[Field] = &[
  Field::Player,
  Field::Year,
  Field::Sport,
  Field::Manufacturer,
  Field::SetName,
  Field::CardNumber,
  Field::Graded,
  Field::GradingCompany,
  Field::GradeNumber,
  Field::Notes,
  Field::Image,
];

impl Field {
  pub fn label(self) -> &'static str {
    match self {
      Self::Player => "Player",
      Self::Year => "Year",
      Self::Sport => "Sport",
      Self::Manufacturer => "Manufacturer",
      Self::SetName => "Set",
      Self::CardNumber => "Card #",
      Self::Graded => "Graded",
      Self::GradingCompany => "Grading company",
      Self::GradeNumber => "Grade",
      Self::Notes => "Notes",
      Self::Image => "Image file",
    }
  }
}

// ─── Form ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
  Add,
  Edit(Uuid),
}

/// What a key press did; the app decides how to react.
#[derive(Debug, PartialEq, Eq)]
pub enum FormEvent {
  None,
  Cancelled,
  SubmitRequested,
  /// A local outcome worth a status-bar line (attach accepted/rejected).
  Notice(String),
}

pub struct CardForm {
  pub mode:       FormMode,
  pub draft:      CardDraft,
  pub cursor:     usize,
  /// Text buffer for the image file path; attached on Enter.
  pub image_path: String,
}

impl CardForm {
  pub fn add() -> Self {
    Self {
      mode:       FormMode::Add,
      draft:      CardDraft::new(),
      cursor:     0,
      image_path: String::new(),
    }
  }

  pub fn edit(card: &Card) -> Self {
    Self {
      mode:       FormMode::Edit(card.card_id),
      draft:      CardDraft::from_card(card),
      cursor:     0,
      image_path: String::new(),
    }
  }

  /// Fields currently navigable; grading fields only exist while graded=Yes.
  pub fn fields(&self) -> Vec<Field> {
    ALL_FIELDS
      .iter()
      .copied()
      .filter(|f| {
        self.draft.graded.is_yes()
          || !matches!(f, Field::GradingCompany | Field::GradeNumber)
      })
      .collect()
  }

  pub fn current_field(&self) -> Field {
    let fields = self.fields();
    fields[self.cursor.min(fields.len() - 1)]
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  pub fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
    if key.modifiers.contains(KeyModifiers::CONTROL)
      && key.code == KeyCode::Char('s')
    {
      return FormEvent::SubmitRequested;
    }

    match key.code {
      KeyCode::Esc => return FormEvent::Cancelled,
      KeyCode::Up | KeyCode::BackTab => self.move_cursor(-1),
      KeyCode::Down | KeyCode::Tab => self.move_cursor(1),
      KeyCode::Left => self.cycle(-1),
      KeyCode::Right => self.cycle(1),
      KeyCode::Enter => {
        if self.current_field() == Field::Image {
          return self.attach();
        }
        self.move_cursor(1);
      }
      KeyCode::Backspace => self.pop_char(),
      KeyCode::Char(c) => self.push_char(c),
      _ => {}
    }
    FormEvent::None
  }

  fn move_cursor(&mut self, delta: isize) {
    let len = self.fields().len() as isize;
    self.cursor = (self.cursor as isize + delta).rem_euclid(len) as usize;
  }

  fn push_char(&mut self, c: char) {
    match self.current_field() {
      Field::Player => self.draft.player.push(c),
      Field::Year => {
        if c.is_ascii_digit() && self.draft.year.len() < 4 {
          self.draft.year.push(c);
        }
      }
      Field::CardNumber => self.draft.card_number.push(c),
      Field::GradeNumber => {
        if c.is_ascii_digit() && self.draft.grade_number.len() < 2 {
          self.draft.grade_number.push(c);
        }
      }
      Field::Notes => self.draft.notes.push(c),
      Field::Image => self.image_path.push(c),
      // Choice fields only cycle.
      _ => {}
    }
  }

  fn pop_char(&mut self) {
    match self.current_field() {
      Field::Player => {
        self.draft.player.pop();
      }
      Field::Year => {
        self.draft.year.pop();
      }
      Field::CardNumber => {
        self.draft.card_number.pop();
      }
      Field::GradeNumber => {
        self.draft.grade_number.pop();
      }
      Field::Notes => {
        self.draft.notes.pop();
      }
      Field::Image => {
        self.image_path.pop();
      }
      _ => {}
    }
  }

  // ── Choice cycling ────────────────────────────────────────────────────────

  fn cycle(&mut self, dir: isize) {
    match self.current_field() {
      Field::Sport => {
        let options: Vec<Option<Sport>> =
          std::iter::once(None).chain(Sport::iter().map(Some)).collect();
        let next = cycled(&options, &self.draft.sport, dir);
        self.draft.apply_sport(next);
      }
      Field::Manufacturer => {
        let mut options = vec![String::new()];
        options.extend(
          self.draft.manufacturer_options.iter().map(|m| m.to_string()),
        );
        let next = cycled(&options, &self.draft.manufacturer, dir);
        self.draft.apply_manufacturer(next);
      }
      Field::SetName => {
        let mut options = vec![String::new()];
        options.extend(self.draft.set_options.iter().map(|s| s.to_string()));
        self.draft.set_name = cycled(&options, &self.draft.set_name, dir);
      }
      Field::Graded => {
        self.draft.graded = match self.draft.graded {
          Graded::Yes => Graded::No,
          Graded::No => Graded::Yes,
        };
        // Keep the cursor on the Graded row as rows appear/disappear.
        let fields = self.fields();
        self.cursor = fields
          .iter()
          .position(|f| *f == Field::Graded)
          .unwrap_or(0);
      }
      Field::GradingCompany => {
        let options: Vec<Option<GradingCompany>> = std::iter::once(None)
          .chain(GradingCompany::iter().map(Some))
          .collect();
        self.draft.grading_company =
          cycled(&options, &self.draft.grading_company, dir);
      }
      Field::GradeNumber => {
        let options: Vec<String> = std::iter::once(String::new())
          .chain((1..=10).map(|g| g.to_string()))
          .collect();
        self.draft.grade_number =
          cycled(&options, &self.draft.grade_number, dir);
      }
      _ => {}
    }
  }

  // ── Image attach ──────────────────────────────────────────────────────────

  fn attach(&mut self) -> FormEvent {
    if self.image_path.trim().is_empty() {
      self.draft.clear_image();
      return FormEvent::Notice("image removed".into());
    }
    let prepared = match media::prepare_image(Path::new(self.image_path.trim()))
    {
      Ok(p) => p,
      Err(e) => return FormEvent::Notice(format!("image rejected: {e}")),
    };
    match self.draft.attach_image(prepared) {
      Ok(()) => FormEvent::Notice("image attached".into()),
      Err(e) => FormEvent::Notice(format!("image rejected: {e}")),
    }
  }

  // ── Submit ────────────────────────────────────────────────────────────────

  /// Validate, upload a pending image, then persist.
  ///
  /// Validation failure aborts with no side effects. An upload failure
  /// aborts before any record write. A storage failure leaves the draft
  /// intact so the user can retry; only a successful add clears it.
  pub async fn submit<H>(
    &mut self,
    client: &ApiClient,
    host: Option<&H>,
  ) -> Result<Card>
  where
    H: ImageHost,
  {
    let mut fields = self.draft.validate()?;

    if let Some(image) = self.draft.image.clone() {
      let host = host
        .ok_or_else(|| anyhow!("no image host configured; set the API key"))?;
      let url = host.upload(image).await.context("image upload failed")?;
      // Substitute the hosted URL before the record is written; keep it on
      // the draft too so a later storage failure does not re-upload.
      self.draft.image_url = Some(url.clone());
      self.draft.image = None;
      fields.image_url = Some(url);
    }

    let card = match self.mode {
      FormMode::Add => client.create_card(&fields).await?,
      FormMode::Edit(id) => client.update_card(id, &fields).await?,
    };

    if self.mode == FormMode::Add {
      self.draft = CardDraft::new();
      self.image_path.clear();
      self.cursor = 0;
    }
    Ok(card)
  }
}

/// The element after (or before) `current` in `options`, wrapping. Falls back
/// to the first element when `current` is not an option (e.g. after a
/// cascade reset).
fn cycled<T: Clone + PartialEq>(options: &[T], current: &T, dir: isize) -> T {
  let len = options.len() as isize;
  let at = options.iter().position(|o| o == current).unwrap_or(0) as isize;
  options[(at + dir).rem_euclid(len) as usize].clone()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
