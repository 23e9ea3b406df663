//! Application state machine and event dispatcher.
//!
//! [`App`] owns the authoritative in-memory snapshot of the user's cards and
//! the browse criteria panel. Add/edit/delete flows hand their outcome back
//! as a [`CollectionEvent`], which is the only way the snapshot changes —
//! there is no global bus.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use strum::IntoEnumIterator as _;
use uuid::Uuid;

use slab_core::{
  browse::{BrowsePanel, GradeRange, ImageFilter, SortKey},
  card::{Card, GradingCompany, Sport},
};

use crate::{
  client::ApiClient,
  form::{CardForm, FormEvent, FormMode},
  imgbb::ImgbbHost,
};

// ─── Screens and overlays ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// The filtered card list plus a preview pane.
  Browse,
  /// Focus on one card.
  Detail,
  /// The add/edit form.
  Form,
}

/// A transient input layer over the Browse screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
  None,
  /// Typing into the free-text search.
  Search,
  /// Typing a year range, e.g. "1980-1989", "1980-", "-1989" or "1989".
  YearRange(String),
  /// Multi-select over grading companies; the cursor index into the list.
  Companies(usize),
  /// Waiting for explicit confirmation of a pending delete.
  ConfirmDelete,
  /// Typing a new profile display name.
  Rename(String),
}

/// How a mutation flow reports back to the view controller.
#[derive(Debug, Clone)]
pub enum CollectionEvent {
  Added(Card),
  Updated(Card),
  Deleted(Uuid),
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub screen: Screen,

  pub overlay: Overlay,

  /// The full snapshot of the user's cards; display order is derived, the
  /// snapshot itself is never reordered.
  pub cards: Vec<Card>,

  /// Filter/sort criteria plus the dependent option lists.
  pub panel: BrowsePanel,

  /// Cursor position within the *filtered* card list.
  pub list_cursor: usize,

  /// Card shown on the Detail screen.
  pub selected_card_id: Option<Uuid>,

  /// Delete target awaiting confirmation; at most one at a time.
  pub pending_delete: Option<Uuid>,

  /// The add/edit form, present while `screen == Screen::Form`.
  pub form: Option<CardForm>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  pub client: Arc<ApiClient>,

  pub image_host: Option<ImgbbHost>,
}

impl App {
  pub fn new(client: ApiClient, image_host: Option<ImgbbHost>) -> Self {
    Self {
      screen: Screen::Browse,
      overlay: Overlay::None,
      cards: Vec::new(),
      panel: BrowsePanel::new(),
      list_cursor: 0,
      selected_card_id: None,
      pending_delete: None,
      form: None,
      status_msg: String::new(),
      client: Arc::new(client),
      image_host,
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Fetch all of the user's cards, replacing the snapshot wholesale.
  pub async fn load_cards(&mut self) -> anyhow::Result<()> {
    self.status_msg = "Loading cards…".into();
    match self.client.list_cards().await {
      Ok(cards) => {
        self.cards = cards;
        self.clamp_cursor();
        self.status_msg = String::new();
        Ok(())
      }
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        Err(e)
      }
    }
  }

  /// Apply a mutation outcome. Adds and deletes trigger a full reload so the
  /// snapshot cannot drift from storage; an edit is patched in place since
  /// the updated record is already in hand.
  pub async fn apply_event(&mut self, event: CollectionEvent) {
    match event {
      CollectionEvent::Added(_) | CollectionEvent::Deleted(_) => {
        let _ = self.load_cards().await;
      }
      CollectionEvent::Updated(card) => {
        if let Some(slot) =
          self.cards.iter_mut().find(|c| c.card_id == card.card_id)
        {
          *slot = card;
        } else {
          let _ = self.load_cards().await;
        }
      }
    }
  }

  // ── Derived views ─────────────────────────────────────────────────────────

  /// The filtered, ordered view the list renders.
  pub fn visible_cards(&self) -> Vec<&Card> {
    self.panel.criteria.select(&self.cards)
  }

  /// The card under the list cursor in the filtered view, if any.
  pub fn cursor_card(&self) -> Option<&Card> {
    let list = self.visible_cards();
    list.get(self.list_cursor).copied()
  }

  pub fn selected_card(&self) -> Option<&Card> {
    let id = self.selected_card_id?;
    self.cards.iter().find(|c| c.card_id == id)
  }

  fn clamp_cursor(&mut self) {
    let len = self.visible_cards().len();
    if self.list_cursor >= len {
      self.list_cursor = len.saturating_sub(1);
    }
  }

  // ── Two-phase delete ──────────────────────────────────────────────────────

  /// Mark `id` for deletion. A second request while one is pending is
  /// ignored, so at most one storage delete can follow per confirmation.
  pub fn request_delete(&mut self, id: Uuid) {
    if self.pending_delete.is_some() {
      return;
    }
    self.pending_delete = Some(id);
    self.overlay = Overlay::ConfirmDelete;
  }

  pub fn cancel_delete(&mut self) {
    self.pending_delete = None;
    self.overlay = Overlay::None;
  }

  /// Issue the storage delete for the pending target, then reload.
  pub async fn confirm_delete(&mut self) {
    let Some(id) = self.pending_delete.take() else {
      return;
    };
    self.overlay = Overlay::None;

    match self.client.delete_card(id).await {
      Ok(true) => {
        self.status_msg = "Card deleted".into();
      }
      Ok(false) => {
        // Already gone (another session beat us); report once, not fatal.
        self.status_msg = "Card was already deleted".into();
      }
      Err(e) => {
        self.status_msg = format!("Error deleting card: {e}");
        return;
      }
    }

    if self.selected_card_id == Some(id) {
      self.selected_card_id = None;
      self.screen = Screen::Browse;
    }
    self.apply_event(CollectionEvent::Deleted(id)).await;
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL)
      && key.code == KeyCode::Char('c')
    {
      return Ok(false);
    }

    if self.screen == Screen::Form {
      self.handle_form_key(key).await;
      return Ok(true);
    }

    match self.overlay.clone() {
      Overlay::Search => {
        self.handle_search_key(key);
        Ok(true)
      }
      Overlay::YearRange(buf) => {
        self.handle_year_key(key, buf);
        Ok(true)
      }
      Overlay::Companies(cursor) => {
        self.handle_companies_key(key, cursor);
        Ok(true)
      }
      Overlay::ConfirmDelete => {
        self.handle_confirm_key(key).await;
        Ok(true)
      }
      Overlay::Rename(buf) => {
        self.handle_rename_key(key, buf).await;
        Ok(true)
      }
      Overlay::None => match self.screen {
        Screen::Browse => self.handle_browse_key(key).await,
        Screen::Detail => self.handle_detail_key(key),
        Screen::Form => unreachable!("handled above"),
      },
    }
  }

  async fn handle_browse_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.visible_cards().len();
        if len > 0 && self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }

      // Open detail
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        if let Some(id) = self.cursor_card().map(|c| c.card_id) {
          self.selected_card_id = Some(id);
          self.screen = Screen::Detail;
        }
      }

      // Filters
      KeyCode::Char('/') => {
        self.overlay = Overlay::Search;
        self.panel.criteria.search_term.clear();
        self.list_cursor = 0;
      }
      KeyCode::Char('y') => {
        self.overlay = Overlay::YearRange(String::new());
      }
      KeyCode::Char('s') => {
        let next = cycle_option(Sport::iter(), self.panel.criteria.sport);
        self.panel.apply_sport(next);
        self.list_cursor = 0;
      }
      KeyCode::Char('m') => {
        if self.panel.criteria.sport.is_none() {
          self.status_msg = "Select a sport first".into();
        } else {
          let next = cycle_str_option(
            self.panel.manufacturer_options,
            self.panel.criteria.manufacturer.as_deref(),
          );
          self.panel.apply_manufacturer(next);
          self.list_cursor = 0;
        }
      }
      KeyCode::Char('e') => {
        if self.panel.criteria.manufacturer.is_none() {
          self.status_msg = "Select a manufacturer first".into();
        } else {
          self.panel.criteria.set_name = cycle_str_option(
            self.panel.set_options,
            self.panel.criteria.set_name.as_deref(),
          );
          self.list_cursor = 0;
        }
      }
      KeyCode::Char('g') => {
        self.panel.criteria.grade_range =
          cycle_option(GradeRange::iter(), self.panel.criteria.grade_range);
        self.list_cursor = 0;
      }
      KeyCode::Char('G') => {
        self.overlay = Overlay::Companies(0);
      }
      KeyCode::Char('i') => {
        self.panel.criteria.has_image =
          cycle_wrapping(ImageFilter::iter(), self.panel.criteria.has_image);
        self.list_cursor = 0;
      }
      KeyCode::Char('o') => {
        self.panel.criteria.sort_by =
          cycle_wrapping(SortKey::iter(), self.panel.criteria.sort_by);
      }
      KeyCode::Char('r') => {
        self.panel.criteria.sort_order =
          self.panel.criteria.sort_order.toggled();
      }
      KeyCode::Char('c') => {
        self.panel.clear_filters();
        self.list_cursor = 0;
      }

      // Mutations
      KeyCode::Char('a') => {
        self.form = Some(CardForm::add());
        self.screen = Screen::Form;
      }
      KeyCode::Char('d') => {
        if let Some(id) = self.cursor_card().map(|c| c.card_id) {
          self.request_delete(id);
        }
      }
      KeyCode::Char('R') => {
        let _ = self.load_cards().await;
      }
      KeyCode::Char('p') => {
        self.overlay = Overlay::Rename(String::new());
      }

      _ => {}
    }
    Ok(true)
  }

  fn handle_detail_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        self.screen = Screen::Browse;
        self.selected_card_id = None;
      }
      KeyCode::Char('e') => {
        if let Some(card) = self.selected_card() {
          self.form = Some(CardForm::edit(card));
          self.screen = Screen::Form;
        }
      }
      KeyCode::Char('d') => {
        if let Some(id) = self.selected_card_id {
          self.request_delete(id);
        }
      }
      _ => {}
    }
    Ok(true)
  }

  // ── Overlay key handlers ──────────────────────────────────────────────────

  fn handle_search_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.panel.criteria.search_term.clear();
        self.overlay = Overlay::None;
        self.list_cursor = 0;
      }
      KeyCode::Enter => {
        self.overlay = Overlay::None;
        self.list_cursor = 0;
      }
      KeyCode::Backspace => {
        self.panel.criteria.search_term.pop();
        self.list_cursor = 0;
      }
      KeyCode::Char(c) => {
        self.panel.criteria.search_term.push(c);
        self.list_cursor = 0;
      }
      _ => {}
    }
  }

  fn handle_year_key(&mut self, key: KeyEvent, mut buf: String) {
    match key.code {
      KeyCode::Esc => {
        self.overlay = Overlay::None;
      }
      KeyCode::Enter => match parse_year_range(&buf) {
        Ok((start, end)) => {
          self.panel.criteria.year_start = start;
          self.panel.criteria.year_end = end;
          self.overlay = Overlay::None;
          self.list_cursor = 0;
        }
        Err(msg) => {
          self.status_msg = msg;
          self.overlay = Overlay::YearRange(buf);
        }
      },
      KeyCode::Backspace => {
        buf.pop();
        self.overlay = Overlay::YearRange(buf);
      }
      KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
        buf.push(c);
        self.overlay = Overlay::YearRange(buf);
      }
      _ => {}
    }
  }

  fn handle_companies_key(&mut self, key: KeyEvent, cursor: usize) {
    let companies: Vec<GradingCompany> = GradingCompany::iter().collect();
    match key.code {
      KeyCode::Esc | KeyCode::Enter => {
        self.overlay = Overlay::None;
        self.list_cursor = 0;
      }
      KeyCode::Down | KeyCode::Char('j') => {
        self.overlay =
          Overlay::Companies((cursor + 1).min(companies.len() - 1));
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.overlay = Overlay::Companies(cursor.saturating_sub(1));
      }
      KeyCode::Char(' ') => {
        let company = companies[cursor];
        let selected = &mut self.panel.criteria.grading_companies;
        if let Some(at) = selected.iter().position(|c| *c == company) {
          selected.remove(at);
        } else {
          selected.push(company);
        }
      }
      _ => {}
    }
  }

  async fn handle_rename_key(&mut self, key: KeyEvent, mut buf: String) {
    match key.code {
      KeyCode::Esc => {
        self.overlay = Overlay::None;
      }
      KeyCode::Enter => {
        self.overlay = Overlay::None;
        if buf.trim().is_empty() {
          return;
        }
        match self.client.update_name(buf.trim()).await {
          Ok(profile) => {
            self.status_msg = format!("Name updated to {}", profile.name);
          }
          Err(e) => {
            self.status_msg = format!("Error updating name: {e}");
          }
        }
      }
      KeyCode::Backspace => {
        buf.pop();
        self.overlay = Overlay::Rename(buf);
      }
      KeyCode::Char(c) => {
        buf.push(c);
        self.overlay = Overlay::Rename(buf);
      }
      _ => {}
    }
  }

  async fn handle_confirm_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char('y') | KeyCode::Char('Y') => {
        self.confirm_delete().await;
      }
      KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
        self.cancel_delete();
      }
      _ => {}
    }
  }

  // ── Form key handling ─────────────────────────────────────────────────────

  async fn handle_form_key(&mut self, key: KeyEvent) {
    let Some(form) = self.form.as_mut() else {
      self.screen = Screen::Browse;
      return;
    };

    match form.handle_key(key) {
      FormEvent::None => {}
      FormEvent::Notice(msg) => {
        self.status_msg = msg;
      }
      FormEvent::Cancelled => {
        let mode = form.mode;
        self.form = None;
        self.screen = match mode {
          FormMode::Edit(_) if self.selected_card_id.is_some() => {
            Screen::Detail
          }
          _ => Screen::Browse,
        };
      }
      FormEvent::SubmitRequested => {
        self.submit_form().await;
      }
    }
  }

  async fn submit_form(&mut self) {
    let client = self.client.clone();
    let host = self.image_host.clone();
    let Some(form) = self.form.as_mut() else {
      return;
    };
    let mode = form.mode;

    match form.submit(&client, host.as_ref()).await {
      Ok(card) => match mode {
        FormMode::Add => {
          self.status_msg = "Card added".into();
          // Form stays open with a cleared draft for the next card.
          self.apply_event(CollectionEvent::Added(card)).await;
        }
        FormMode::Edit(_) => {
          self.status_msg = "Card updated".into();
          self.form = None;
          self.screen = if self.selected_card_id.is_some() {
            Screen::Detail
          } else {
            Screen::Browse
          };
          self.apply_event(CollectionEvent::Updated(card)).await;
        }
      },
      Err(e) => {
        // Draft is preserved for correction and retry.
        self.status_msg = format!("Error: {e}");
      }
    }
  }
}

// ─── Cycling helpers ──────────────────────────────────────────────────────────

/// None → first → … → last → None.
fn cycle_option<T, I>(options: I, current: Option<T>) -> Option<T>
where
  T: PartialEq + Copy,
  I: Iterator<Item = T>,
{
  let options: Vec<T> = options.collect();
  match current {
    None => options.first().copied(),
    Some(at) => match options.iter().position(|o| *o == at) {
      Some(i) if i + 1 < options.len() => Some(options[i + 1]),
      _ => None,
    },
  }
}

/// Like [`cycle_option`] over a static string list.
fn cycle_str_option(
  options: &'static [&'static str],
  current: Option<&str>,
) -> Option<String> {
  match current {
    None => options.first().map(|s| s.to_string()),
    Some(at) => match options.iter().position(|o| *o == at) {
      Some(i) if i + 1 < options.len() => Some(options[i + 1].to_string()),
      _ => None,
    },
  }
}

/// first → … → last → first, with no empty state.
fn cycle_wrapping<T, I>(options: I, current: T) -> T
where
  T: PartialEq + Copy,
  I: Iterator<Item = T>,
{
  let options: Vec<T> = options.collect();
  let at = options.iter().position(|o| *o == current).unwrap_or(0);
  options[(at + 1) % options.len()]
}

/// Parse "1980-1989", "1980-", "-1989", "1989" or "" into inclusive bounds.
fn parse_year_range(
  input: &str,
) -> Result<(Option<i32>, Option<i32>), String> {
  let input = input.trim();
  if input.is_empty() {
    return Ok((None, None));
  }
  let parse = |s: &str| -> Result<Option<i32>, String> {
    if s.is_empty() {
      return Ok(None);
    }
    s.parse()
      .map(Some)
      .map_err(|_| format!("not a year: {s:?}"))
  };
  match input.split_once('-') {
    Some((start, end)) => Ok((parse(start.trim())?, parse(end.trim())?)),
    None => {
      let year = parse(input)?;
      Ok((year, year))
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use slab_core::card::Graded;
  use strum::IntoEnumIterator as _;

  use crate::client::ApiConfig;

  use super::*;

  fn test_app() -> App {
    let client = ApiClient::new(ApiConfig {
      base_url: "http://localhost:0".into(),
      email:    "t@example.com".into(),
      password: "x".into(),
    })
    .unwrap();
    App::new(client, None)
  }

  fn card(player: &str, year: i32) -> Card {
    Card {
      card_id:         Uuid::new_v4(),
      user_id:         Uuid::nil(),
      player:          player.into(),
      year,
      sport:           Sport::Baseball,
      manufacturer:    "Topps".into(),
      set_name:        None,
      card_number:     None,
      graded:          Graded::No,
      grading_company: None,
      grade_number:    None,
      notes:           None,
      image_url:       None,
      created_at:      Utc::now(),
      updated_at:      None,
    }
  }

  #[test]
  fn visible_cards_follow_the_criteria() {
    let mut app = test_app();
    app.cards = vec![card("Zito", 2002), card("Aaron", 1954)];
    let players: Vec<&str> =
      app.visible_cards().iter().map(|c| c.player.as_str()).collect();
    assert_eq!(players, ["Aaron", "Zito"]);

    app.panel.criteria.search_term = "zito".into();
    assert_eq!(app.visible_cards().len(), 1);
    // The snapshot itself is untouched.
    assert_eq!(app.cards[0].player, "Zito");
  }

  #[test]
  fn repeated_delete_requests_keep_a_single_pending_target() {
    let mut app = test_app();
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();

    app.request_delete(first);
    app.request_delete(second);
    assert_eq!(app.pending_delete, Some(first));
    assert_eq!(app.overlay, Overlay::ConfirmDelete);

    app.cancel_delete();
    assert_eq!(app.pending_delete, None);
    assert_eq!(app.overlay, Overlay::None);
  }

  #[tokio::test]
  async fn confirm_without_pending_issues_nothing() {
    // With no pending target this returns without touching the network
    // (an attempted delete against the dead endpoint would set an error).
    let mut app = test_app();
    app.confirm_delete().await;
    assert_eq!(app.status_msg, "");
  }

  #[tokio::test]
  async fn update_event_patches_in_place() {
    let mut app = test_app();
    let mut c = card("Before", 2000);
    let id = c.card_id;
    app.cards = vec![card("Other", 1999), c.clone()];

    c.player = "After".into();
    app.apply_event(CollectionEvent::Updated(c)).await;

    assert_eq!(app.cards.len(), 2);
    let patched = app.cards.iter().find(|x| x.card_id == id).unwrap();
    assert_eq!(patched.player, "After");
  }

  #[test]
  fn year_range_parser_accepts_all_forms() {
    assert_eq!(parse_year_range(""), Ok((None, None)));
    assert_eq!(parse_year_range("1989"), Ok((Some(1989), Some(1989))));
    assert_eq!(parse_year_range("1980-1989"), Ok((Some(1980), Some(1989))));
    assert_eq!(parse_year_range("1980-"), Ok((Some(1980), None)));
    assert_eq!(parse_year_range("-1989"), Ok((None, Some(1989))));
    assert!(parse_year_range("198x").is_err());
  }

  #[test]
  fn sport_cycle_passes_through_every_sport_then_clears() {
    let mut app = test_app();
    let mut seen = Vec::new();
    for _ in 0..=Sport::iter().count() {
      let next = cycle_option(Sport::iter(), app.panel.criteria.sport);
      app.panel.apply_sport(next);
      seen.push(app.panel.criteria.sport);
    }
    assert_eq!(seen.first().copied().flatten(), Some(Sport::Baseball));
    assert_eq!(seen.last().copied().flatten(), None);
  }
}
