//! Reference data tables — static sport → manufacturer and
//! (manufacturer, sport) → set lookups.
//!
//! These tables only drive option lists in forms and filters. Nothing at the
//! data layer validates against them, so records that predate a table change
//! keep whatever values they were saved with.

use std::collections::BTreeSet;

use strum::IntoEnumIterator as _;

use crate::card::Sport;

// ─── Manufacturers ───────────────────────────────────────────────────────────

const BASEBALL: &[&str] = &[
  "Topps",
  "Bowman",
  "Donruss",
  "Fleer",
  "Upper Deck",
  "Panini",
  "Leaf",
  "Score",
  "Pinnacle",
  "O-Pee-Chee",
  "Other",
];

const FOOTBALL: &[&str] = &[
  "Topps",
  "Panini",
  "Donruss",
  "Fleer",
  "Upper Deck",
  "Score",
  "Pinnacle",
  "Playoff",
  "Leaf",
  "Other",
];

const BASKETBALL: &[&str] = &[
  "Topps",
  "Panini",
  "Upper Deck",
  "Fleer",
  "Donruss",
  "Hoops",
  "Other",
];

const HOCKEY: &[&str] = &[
  "Upper Deck",
  "Topps",
  "Panini",
  "O-Pee-Chee",
  "Donruss",
  "Fleer",
  "Score",
  "Pinnacle",
  "Other",
];

const SOCCER: &[&str] = &[
  "Panini",
  "Topps",
  "Upper Deck",
  "Donruss",
  "Fleer",
  "Score",
  "Pinnacle",
  "Other",
];

const GENERIC_MANUFACTURERS: &[&str] = &[
  "Topps",
  "Panini",
  "Upper Deck",
  "Donruss",
  "Fleer",
  "Score",
  "Pinnacle",
  "Other",
];

/// Manufacturers offered for a given sport. WNBA shares the basketball list.
pub fn manufacturers_for_sport(sport: Sport) -> &'static [&'static str] {
  match sport {
    Sport::Baseball => BASEBALL,
    Sport::Football => FOOTBALL,
    Sport::Basketball | Sport::Wnba => BASKETBALL,
    Sport::Hockey => HOCKEY,
    Sport::Soccer => SOCCER,
    Sport::Other => GENERIC_MANUFACTURERS,
  }
}

/// The sorted union of manufacturers across all sports.
pub fn all_manufacturers() -> Vec<&'static str> {
  let set: BTreeSet<&'static str> = Sport::iter()
    .flat_map(|s| manufacturers_for_sport(s).iter().copied())
    .collect();
  set.into_iter().collect()
}

// ─── Sets ────────────────────────────────────────────────────────────────────

const GENERIC_SETS: &[&str] = &["Base", "Chrome", "Prizm", "Other"];

/// Set names offered for a (manufacturer, sport) pair.
///
/// Pairs without a dedicated entry fall back to a generic list; every list
/// ends in "Other" so a record is never forced into a wrong set name.
pub fn sets_for(manufacturer: &str, sport: Sport) -> &'static [&'static str] {
  match (manufacturer, sport) {
    ("Topps", Sport::Baseball) => &[
      "Topps Series 1",
      "Topps Series 2",
      "Topps Update",
      "Topps Chrome",
      "Topps Heritage",
      "Stadium Club",
      "Other",
    ],
    ("Bowman", Sport::Baseball) => &[
      "Bowman",
      "Bowman Chrome",
      "Bowman Draft",
      "Bowman's Best",
      "Other",
    ],
    ("Upper Deck", Sport::Baseball) => {
      &["Upper Deck", "SP Authentic", "SPx", "Other"]
    }
    ("Topps", Sport::Football) => {
      &["Topps", "Topps Chrome", "Stadium Club", "Other"]
    }
    ("Panini", Sport::Football) => &[
      "Prizm",
      "Select",
      "Donruss Optic",
      "Mosaic",
      "Contenders",
      "Absolute",
      "Other",
    ],
    ("Panini", Sport::Basketball | Sport::Wnba) => &[
      "Prizm",
      "Select",
      "Mosaic",
      "Donruss Optic",
      "Court Kings",
      "National Treasures",
      "Other",
    ],
    ("Hoops", Sport::Basketball | Sport::Wnba) => {
      &["NBA Hoops", "NBA Hoops Premium Stock", "Other"]
    }
    ("Upper Deck", Sport::Hockey) => &[
      "Upper Deck Series 1",
      "Upper Deck Series 2",
      "SP Authentic",
      "The Cup",
      "Other",
    ],
    ("O-Pee-Chee", Sport::Hockey) => {
      &["O-Pee-Chee", "O-Pee-Chee Platinum", "Other"]
    }
    ("Panini", Sport::Soccer) => {
      &["Prizm World Cup", "Select", "Obsidian", "Other"]
    }
    ("Topps", Sport::Soccer) => {
      &["Topps Chrome UEFA", "Merlin", "Other"]
    }
    _ => GENERIC_SETS,
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
