//! The browse engine — filtering, sorting and search over a card snapshot.
//!
//! This is a pure, synchronous computation: given a read-only slice of cards
//! and a [`Criteria`] value it produces the visible, ordered subset. It never
//! mutates or reorders its input, performs no I/O and cannot fail — absent
//! numeric fields are simply non-matching for numeric predicates.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{
  card::{Card, Graded, GradingCompany, Sport},
  reference,
};

// ─── Criteria enums ──────────────────────────────────────────────────────────

/// Bucketed grade filter. All bounds inclusive; only a graded card with a
/// grade number can fall into any bucket.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumIter,
  strum::EnumString,
)]
pub enum GradeRange {
  #[serde(rename = "10")]
  #[strum(serialize = "10")]
  Ten,
  #[serde(rename = "9-10")]
  #[strum(serialize = "9-10")]
  NineToTen,
  #[serde(rename = "8-9")]
  #[strum(serialize = "8-9")]
  EightToNine,
  #[serde(rename = "6-8")]
  #[strum(serialize = "6-8")]
  SixToEight,
  #[serde(rename = "1-6")]
  #[strum(serialize = "1-6")]
  OneToSix,
}

impl GradeRange {
  /// Inclusive (low, high) bounds of the bucket.
  pub fn bounds(self) -> (u8, u8) {
    match self {
      Self::Ten => (10, 10),
      Self::NineToTen => (9, 10),
      Self::EightToNine => (8, 9),
      Self::SixToEight => (6, 8),
      Self::OneToSix => (1, 6),
    }
  }

  fn contains(self, grade: u8) -> bool {
    let (lo, hi) = self.bounds();
    (lo..=hi).contains(&grade)
  }
}

/// Tri-state image filter.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumIter,
  strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ImageFilter {
  #[default]
  Any,
  With,
  Without,
}

/// The field the comparator is keyed on.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumIter,
  strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortKey {
  #[default]
  Player,
  Year,
  Manufacturer,
  #[serde(rename = "set")]
  #[strum(serialize = "set")]
  SetName,
  Sport,
  GradeNumber,
  CreatedAt,
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
  #[default]
  Asc,
  Desc,
}

impl SortOrder {
  pub fn toggled(self) -> Self {
    match self {
      Self::Asc => Self::Desc,
      Self::Desc => Self::Asc,
    }
  }
}

// ─── Criteria ────────────────────────────────────────────────────────────────

/// Everything the browsing view can filter and sort on. A predicate whose
/// criterion is unset is vacuously true.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
  pub search_term:       String,
  pub sport:             Option<Sport>,
  /// Inclusive year bounds; a missing bound is unbounded on that side.
  pub year_start:        Option<i32>,
  pub year_end:          Option<i32>,
  pub manufacturer:      Option<String>,
  pub set_name:          Option<String>,
  /// Non-empty ⇒ only graded cards from one of these companies pass.
  pub grading_companies: Vec<GradingCompany>,
  pub grade_range:       Option<GradeRange>,
  pub has_image:         ImageFilter,
  pub sort_by:           SortKey,
  pub sort_order:        SortOrder,
}

impl Criteria {
  /// True when no filter is set (sort settings are not filters).
  pub fn is_unfiltered(&self) -> bool {
    self.search_term.is_empty()
      && self.sport.is_none()
      && self.year_start.is_none()
      && self.year_end.is_none()
      && self.manufacturer.is_none()
      && self.set_name.is_none()
      && self.grading_companies.is_empty()
      && self.grade_range.is_none()
      && self.has_image == ImageFilter::Any
  }

  // ── Predicates ────────────────────────────────────────────────────────────

  fn matches_search(&self, card: &Card) -> bool {
    if self.search_term.is_empty() {
      return true;
    }
    let term = self.search_term.to_lowercase();
    let hit = |s: &str| s.to_lowercase().contains(&term);

    hit(&card.player)
      || card.year.to_string().contains(&term)
      || hit(&card.manufacturer)
      || card.set_name.as_deref().is_some_and(hit)
      || card.notes.as_deref().is_some_and(hit)
  }

  fn year_in_range(&self, year: i32) -> bool {
    self.year_start.is_none_or(|start| year >= start)
      && self.year_end.is_none_or(|end| year <= end)
  }

  fn matches_grading(&self, card: &Card) -> bool {
    if self.grading_companies.is_empty() {
      return true;
    }
    card.graded.is_yes()
      && card
        .grading_company
        .is_some_and(|c| self.grading_companies.contains(&c))
  }

  fn matches_grade_range(&self, card: &Card) -> bool {
    let Some(range) = self.grade_range else {
      return true;
    };
    card.graded.is_yes()
      && card.grade_number.is_some_and(|g| range.contains(g))
  }

  fn matches_image(&self, card: &Card) -> bool {
    match self.has_image {
      ImageFilter::Any => true,
      ImageFilter::With => card.has_image(),
      ImageFilter::Without => !card.has_image(),
    }
  }

  /// Whether `card` passes every filter predicate (AND-combined).
  pub fn matches(&self, card: &Card) -> bool {
    self.matches_search(card)
      && self.sport.is_none_or(|s| card.sport == s)
      && self.year_in_range(card.year)
      && self
        .manufacturer
        .as_deref()
        .is_none_or(|m| card.manufacturer == m)
      && self
        .set_name
        .as_deref()
        .is_none_or(|s| card.set_name.as_deref() == Some(s))
      && self.matches_grading(card)
      && self.matches_grade_range(card)
      && self.matches_image(card)
  }

  // ── Ordering ──────────────────────────────────────────────────────────────

  /// Compare two cards under the current sort key, ascending sense.
  /// String keys are case-insensitive; missing optionals sort first.
  pub fn compare(&self, a: &Card, b: &Card) -> Ordering {
    let by_str = |x: &str, y: &str| x.to_lowercase().cmp(&y.to_lowercase());
    match self.sort_by {
      SortKey::Player => by_str(&a.player, &b.player),
      SortKey::Year => a.year.cmp(&b.year),
      SortKey::Manufacturer => by_str(&a.manufacturer, &b.manufacturer),
      SortKey::SetName => by_str(
        a.set_name.as_deref().unwrap_or(""),
        b.set_name.as_deref().unwrap_or(""),
      ),
      SortKey::Sport => by_str(&a.sport.to_string(), &b.sport.to_string()),
      SortKey::GradeNumber => a.grade_number.cmp(&b.grade_number),
      SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
    }
  }

  /// Filter and order a snapshot. The input is borrowed read-only; ties keep
  /// their snapshot-relative order regardless of `sort_order`.
  pub fn select<'a>(&self, cards: &'a [Card]) -> Vec<&'a Card> {
    let mut out: Vec<&Card> =
      cards.iter().filter(|c| self.matches(c)).collect();
    match self.sort_order {
      SortOrder::Asc => out.sort_by(|a, b| self.compare(a, b)),
      SortOrder::Desc => out.sort_by(|a, b| self.compare(a, b).reverse()),
    }
    out
  }

  // ── Badges ────────────────────────────────────────────────────────────────

  /// Short labels for the active filters, in panel order. Empty when
  /// unfiltered. Sort settings are not badges.
  pub fn badges(&self) -> Vec<String> {
    let mut badges = Vec::new();
    if !self.search_term.is_empty() {
      badges.push(format!("\u{201c}{}\u{201d}", self.search_term));
    }
    if let Some(sport) = self.sport {
      badges.push(sport.to_string());
    }
    match (self.year_start, self.year_end) {
      (Some(a), Some(b)) => badges.push(format!("{a}-{b}")),
      (Some(a), None) => badges.push(format!("{a}+")),
      (None, Some(b)) => badges.push(format!("-{b}")),
      (None, None) => {}
    }
    if let Some(m) = &self.manufacturer {
      badges.push(m.clone());
    }
    if let Some(s) = &self.set_name {
      badges.push(s.clone());
    }
    if !self.grading_companies.is_empty() {
      let companies: Vec<String> =
        self.grading_companies.iter().map(|c| c.to_string()).collect();
      badges.push(companies.join("/"));
    }
    if let Some(range) = self.grade_range {
      badges.push(format!("grade {range}"));
    }
    match self.has_image {
      ImageFilter::Any => {}
      ImageFilter::With => badges.push("has image".into()),
      ImageFilter::Without => badges.push("no image".into()),
    }
    badges
  }
}

// ─── BrowsePanel ─────────────────────────────────────────────────────────────

/// Criteria plus the dependent option lists the UI renders.
///
/// The sport → manufacturer → set cascade is modelled as two transitions that
/// each leave the whole panel consistent; they must run synchronously before
/// the next [`Criteria::select`] call. A previously-chosen value survives a
/// transition only if it is still in the repopulated option list.
#[derive(Debug, Clone, Default)]
pub struct BrowsePanel {
  pub criteria:             Criteria,
  pub manufacturer_options: &'static [&'static str],
  pub set_options:          &'static [&'static str],
}

impl BrowsePanel {
  pub fn new() -> Self { Self::default() }

  /// Change (or clear) the sport filter, repopulating the manufacturer
  /// options and dropping downstream selections that are no longer legal.
  pub fn apply_sport(&mut self, sport: Option<Sport>) {
    self.criteria.sport = sport;
    match sport {
      Some(s) => {
        self.manufacturer_options = reference::manufacturers_for_sport(s);
        let keep = self
          .criteria
          .manufacturer
          .as_deref()
          .is_some_and(|m| self.manufacturer_options.contains(&m));
        if keep {
          // Sets depend on (manufacturer, sport): refresh for the new sport.
          let manufacturer = self.criteria.manufacturer.clone();
          self.apply_manufacturer(manufacturer);
        } else {
          self.criteria.manufacturer = None;
          self.criteria.set_name = None;
          self.set_options = &[];
        }
      }
      None => {
        self.manufacturer_options = &[];
        self.set_options = &[];
        self.criteria.manufacturer = None;
        self.criteria.set_name = None;
      }
    }
  }

  /// Change (or clear) the manufacturer filter, repopulating the set options
  /// and dropping a set selection that is no longer legal.
  pub fn apply_manufacturer(&mut self, manufacturer: Option<String>) {
    self.criteria.manufacturer = manufacturer;
    match self.criteria.manufacturer.as_deref() {
      Some(m) => {
        let sport = self.criteria.sport.unwrap_or(Sport::Other);
        self.set_options = reference::sets_for(m, sport);
        let keep = self
          .criteria
          .set_name
          .as_deref()
          .is_some_and(|s| self.set_options.contains(&s));
        if !keep {
          self.criteria.set_name = None;
        }
      }
      None => {
        self.set_options = &[];
        self.criteria.set_name = None;
      }
    }
  }

  /// Drop every filter (and option list), keeping the sort settings.
  pub fn clear_filters(&mut self) {
    let sort_by = self.criteria.sort_by;
    let sort_order = self.criteria.sort_order;
    self.criteria = Criteria { sort_by, sort_order, ..Criteria::default() };
    self.manufacturer_options = &[];
    self.set_options = &[];
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};
  use uuid::Uuid;

  use super::*;

  fn card(player: &str, year: i32) -> Card {
    Card {
      card_id:         Uuid::new_v4(),
      user_id:         Uuid::nil(),
      player:          player.into(),
      year,
      sport:           Sport::Baseball,
      manufacturer:    "Topps".into(),
      set_name:        Some("Topps Chrome".into()),
      card_number:     None,
      graded:          Graded::No,
      grading_company: None,
      grade_number:    None,
      notes:           None,
      image_url:       None,
      created_at:      Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
      updated_at:      None,
    }
  }

  fn graded_card(
    player: &str,
    company: GradingCompany,
    grade: u8,
  ) -> Card {
    let mut c = card(player, 2020);
    c.graded = Graded::Yes;
    c.grading_company = Some(company);
    c.grade_number = Some(grade);
    c
  }

  // ── Defaults ──────────────────────────────────────────────────────────────

  #[test]
  fn empty_criteria_returns_all_in_default_order() {
    let cards = vec![card("carlton", 1972), card("Aaron", 1954), card("Banks", 1955)];
    let criteria = Criteria::default();
    let out = criteria.select(&cards);
    let players: Vec<&str> = out.iter().map(|c| c.player.as_str()).collect();
    // Player ascending, case-insensitive.
    assert_eq!(players, ["Aaron", "Banks", "carlton"]);
    assert_eq!(out.len(), cards.len());
  }

  #[test]
  fn select_never_reorders_the_snapshot() {
    let cards = vec![card("Zito", 2002), card("Aaron", 1954)];
    let criteria = Criteria::default();
    let _ = criteria.select(&cards);
    assert_eq!(cards[0].player, "Zito");
    assert_eq!(cards[1].player, "Aaron");
  }

  #[test]
  fn same_criteria_twice_is_deterministic() {
    let cards = vec![card("Mays", 1951), card("Mays", 1952), card("Ott", 1933)];
    let criteria = Criteria {
      search_term: "mays".into(),
      ..Criteria::default()
    };
    let first: Vec<Uuid> =
      criteria.select(&cards).iter().map(|c| c.card_id).collect();
    let second: Vec<Uuid> =
      criteria.select(&cards).iter().map(|c| c.card_id).collect();
    assert_eq!(first, second);
  }

  // ── Search ────────────────────────────────────────────────────────────────

  #[test]
  fn search_is_case_insensitive_across_fields() {
    let mut by_notes = card("Jeter", 1993);
    by_notes.notes = Some("rookie AUTO".into());
    let cards = vec![card("Arod", 1994), by_notes, card("Posada", 1995)];

    let criteria = Criteria { search_term: "auto".into(), ..Criteria::default() };
    let out = criteria.select(&cards);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].player, "Jeter");

    // "a" matches Arod and Posada by player; Jeter only via its notes field.
    let criteria = Criteria { search_term: "a".into(), ..Criteria::default() };
    assert_eq!(criteria.select(&cards).len(), 3);
  }

  #[test]
  fn search_matches_year_as_string() {
    let cards = vec![card("Ryan", 1968), card("Brett", 1975)];
    let criteria = Criteria { search_term: "196".into(), ..Criteria::default() };
    let out = criteria.select(&cards);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].player, "Ryan");
  }

  // ── Year range ────────────────────────────────────────────────────────────

  #[test]
  fn year_range_is_inclusive_with_unbounded_sides() {
    let cards: Vec<Card> =
      [1899, 1950, 1980, 2010, 2030].iter().map(|y| card("P", *y)).collect();

    let both = Criteria {
      year_start: Some(1950),
      year_end: Some(2010),
      ..Criteria::default()
    };
    let years: Vec<i32> = both.select(&cards).iter().map(|c| c.year).collect();
    assert_eq!(years, [1950, 1980, 2010]);

    // Only a start: no hidden upper default — very new cards still pass.
    let start_only =
      Criteria { year_start: Some(2010), ..Criteria::default() };
    let years: Vec<i32> =
      start_only.select(&cards).iter().map(|c| c.year).collect();
    assert_eq!(years, [2010, 2030]);

    // Only an end: no hidden lower default — very old cards still pass.
    let end_only = Criteria { year_end: Some(1950), ..Criteria::default() };
    let years: Vec<i32> =
      end_only.select(&cards).iter().map(|c| c.year).collect();
    assert_eq!(years, [1899, 1950]);
  }

  // ── Grading ───────────────────────────────────────────────────────────────

  #[test]
  fn grade_range_ten_excludes_ungraded() {
    let cards = vec![
      card("A", 2010),
      graded_card("B", GradingCompany::PSA, 10),
    ];
    let criteria =
      Criteria { grade_range: Some(GradeRange::Ten), ..Criteria::default() };
    let out = criteria.select(&cards);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].player, "B");
  }

  #[test]
  fn grade_buckets_are_inclusive() {
    let cards: Vec<Card> = (1..=10)
      .map(|g| graded_card(&format!("g{g}"), GradingCompany::SGC, g))
      .collect();

    let grades = |range: GradeRange| -> Vec<u8> {
      let criteria = Criteria {
        grade_range: Some(range),
        sort_by: SortKey::GradeNumber,
        ..Criteria::default()
      };
      criteria
        .select(&cards)
        .iter()
        .filter_map(|c| c.grade_number)
        .collect()
    };

    assert_eq!(grades(GradeRange::Ten), [10]);
    assert_eq!(grades(GradeRange::NineToTen), [9, 10]);
    assert_eq!(grades(GradeRange::EightToNine), [8, 9]);
    assert_eq!(grades(GradeRange::SixToEight), [6, 7, 8]);
    assert_eq!(grades(GradeRange::OneToSix), [1, 2, 3, 4, 5, 6]);
  }

  #[test]
  fn grading_company_filter_requires_graded_membership() {
    let mut sneaky = card("Ungraded", 2000);
    // A leftover company on an ungraded card must not match.
    sneaky.grading_company = Some(GradingCompany::PSA);
    let cards = vec![
      sneaky,
      graded_card("Psa", GradingCompany::PSA, 9),
      graded_card("Bgs", GradingCompany::BGS, 9),
      graded_card("Sgc", GradingCompany::SGC, 9),
    ];
    let criteria = Criteria {
      grading_companies: vec![GradingCompany::PSA, GradingCompany::BGS],
      ..Criteria::default()
    };
    let players: Vec<&str> =
      criteria.select(&cards).iter().map(|c| c.player.as_str()).collect();
    assert_eq!(players, ["Bgs", "Psa"]);
  }

  // ── Image filter ──────────────────────────────────────────────────────────

  #[test]
  fn image_filter_treats_empty_url_as_absent() {
    let mut with = card("With", 2001);
    with.image_url = Some("https://img.example/1.jpg".into());
    let mut empty = card("Empty", 2002);
    empty.image_url = Some(String::new());
    let cards = vec![with, empty, card("None", 2003)];

    let with_only =
      Criteria { has_image: ImageFilter::With, ..Criteria::default() };
    assert_eq!(with_only.select(&cards).len(), 1);

    let without =
      Criteria { has_image: ImageFilter::Without, ..Criteria::default() };
    assert_eq!(without.select(&cards).len(), 2);
  }

  // ── Sorting ───────────────────────────────────────────────────────────────

  #[test]
  fn desc_reverses_sense_but_not_tie_order() {
    let mut a = card("Tie", 1999);
    a.notes = Some("first".into());
    let mut b = card("Tie", 1999);
    b.notes = Some("second".into());
    let cards = vec![a, b, card("Aaron", 1954)];

    let desc = Criteria {
      sort_by: SortKey::Year,
      sort_order: SortOrder::Desc,
      ..Criteria::default()
    };
    let out = desc.select(&cards);
    assert_eq!(out[2].player, "Aaron");
    // The two 1999 ties keep snapshot order even under Desc.
    assert_eq!(out[0].notes.as_deref(), Some("first"));
    assert_eq!(out[1].notes.as_deref(), Some("second"));
  }

  #[test]
  fn missing_grade_sorts_before_any_present_grade() {
    let cards = vec![
      graded_card("Graded", GradingCompany::PSA, 5),
      card("Raw", 2000),
    ];
    let criteria =
      Criteria { sort_by: SortKey::GradeNumber, ..Criteria::default() };
    let out = criteria.select(&cards);
    assert_eq!(out[0].player, "Raw");
    assert_eq!(out[1].player, "Graded");
  }

  #[test]
  fn created_at_sorts_numerically() {
    let mut old = card("Old", 2000);
    old.created_at = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    let mut new = card("New", 2000);
    new.created_at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let cards = vec![new, old];
    let criteria =
      Criteria { sort_by: SortKey::CreatedAt, ..Criteria::default() };
    let out = criteria.select(&cards);
    assert_eq!(out[0].player, "Old");
  }

  // ── Cascade ───────────────────────────────────────────────────────────────

  #[test]
  fn selecting_a_sport_populates_manufacturers_exactly() {
    let mut panel = BrowsePanel::new();
    panel.apply_sport(Some(Sport::Hockey));
    assert_eq!(
      panel.manufacturer_options,
      reference::manufacturers_for_sport(Sport::Hockey),
    );
    assert_eq!(panel.criteria.manufacturer, None);
    assert_eq!(panel.criteria.set_name, None);
  }

  #[test]
  fn sport_change_clears_manufacturer_not_in_new_list() {
    let mut panel = BrowsePanel::new();
    panel.apply_sport(Some(Sport::Basketball));
    panel.apply_manufacturer(Some("Hoops".into()));
    assert_eq!(panel.criteria.manufacturer.as_deref(), Some("Hoops"));

    // Hoops is not a baseball manufacturer; both downstream filters drop.
    panel.apply_sport(Some(Sport::Baseball));
    assert_eq!(panel.criteria.manufacturer, None);
    assert_eq!(panel.criteria.set_name, None);
    assert!(panel.set_options.is_empty());
  }

  #[test]
  fn sport_change_keeps_manufacturer_still_in_list_and_refreshes_sets() {
    let mut panel = BrowsePanel::new();
    panel.apply_sport(Some(Sport::Baseball));
    panel.apply_manufacturer(Some("Topps".into()));
    panel.criteria.set_name = Some("Topps Chrome".into());

    // Topps also makes football cards, but "Topps Chrome" (baseball) is not
    // in the football set list, so only the set selection drops.
    panel.apply_sport(Some(Sport::Football));
    assert_eq!(panel.criteria.manufacturer.as_deref(), Some("Topps"));
    assert_eq!(
      panel.set_options,
      reference::sets_for("Topps", Sport::Football),
    );
    assert_eq!(panel.criteria.set_name, None);
  }

  #[test]
  fn clearing_the_sport_clears_downstream_filters() {
    let mut panel = BrowsePanel::new();
    panel.apply_sport(Some(Sport::Soccer));
    panel.apply_manufacturer(Some("Panini".into()));
    panel.apply_sport(None);
    assert!(panel.manufacturer_options.is_empty());
    assert_eq!(panel.criteria.manufacturer, None);
    assert_eq!(panel.criteria.set_name, None);
  }

  #[test]
  fn clear_filters_keeps_sort_settings() {
    let mut panel = BrowsePanel::new();
    panel.criteria.sort_by = SortKey::Year;
    panel.criteria.sort_order = SortOrder::Desc;
    panel.apply_sport(Some(Sport::Hockey));
    panel.criteria.search_term = "gretzky".into();

    panel.clear_filters();
    assert!(panel.criteria.is_unfiltered());
    assert_eq!(panel.criteria.sort_by, SortKey::Year);
    assert_eq!(panel.criteria.sort_order, SortOrder::Desc);
  }

  // ── Badges ────────────────────────────────────────────────────────────────

  #[test]
  fn badges_reflect_active_filters_only() {
    assert!(Criteria::default().badges().is_empty());

    let criteria = Criteria {
      sport: Some(Sport::Baseball),
      year_start: Some(1980),
      grading_companies: vec![GradingCompany::PSA, GradingCompany::BGS],
      has_image: ImageFilter::With,
      sort_by: SortKey::Year,
      ..Criteria::default()
    };
    let badges = criteria.badges();
    assert_eq!(badges, ["Baseball", "1980+", "PSA/BGS", "has image"]);
  }
}
