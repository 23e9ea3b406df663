//! Handler for `GET /cards/search`.
//!
//! Query params map onto [`Criteria`] fields; `grading_companies` is a
//! comma-separated list. The browse engine runs server-side over the
//! caller's cards, so API consumers get the same semantics the client
//! computes locally.

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;

use slab_core::{
  browse::{Criteria, GradeRange, ImageFilter, SortKey, SortOrder},
  card::{Card, GradingCompany, Sport},
  store::CollectionStore,
};

use crate::{AppState, auth::CurrentUser, error::ApiError};

#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
  /// Free-text filter over player, year, manufacturer, set and notes.
  pub search:            Option<String>,
  pub sport:             Option<Sport>,
  pub year_start:        Option<i32>,
  pub year_end:          Option<i32>,
  pub manufacturer:      Option<String>,
  pub set:               Option<String>,
  /// Comma-separated company list, e.g. `PSA,BGS`.
  pub grading_companies: Option<String>,
  pub grade_range:       Option<GradeRange>,
  pub has_image:         Option<ImageFilter>,
  pub sort_by:           Option<SortKey>,
  pub sort_order:        Option<SortOrder>,
}

impl SearchParams {
  fn into_criteria(self) -> Result<Criteria, ApiError> {
    let grading_companies = self
      .grading_companies
      .as_deref()
      .map(|list| {
        list
          .split(',')
          .map(str::trim)
          .filter(|t| !t.is_empty())
          .map(|t| {
            t.parse::<GradingCompany>().map_err(|_| {
              ApiError::BadRequest(format!("unknown grading company: {t:?}"))
            })
          })
          .collect::<Result<Vec<_>, _>>()
      })
      .transpose()?
      .unwrap_or_default();

    Ok(Criteria {
      search_term: self.search.unwrap_or_default(),
      sport: self.sport,
      year_start: self.year_start,
      year_end: self.year_end,
      manufacturer: self.manufacturer,
      set_name: self.set,
      grading_companies,
      grade_range: self.grade_range,
      has_image: self.has_image.unwrap_or_default(),
      sort_by: self.sort_by.unwrap_or_default(),
      sort_order: self.sort_order.unwrap_or_default(),
    })
  }
}

/// `GET /cards/search[?search=...][&sport=...][&year_start=...][&year_end=...]`
/// `[&manufacturer=...][&set=...][&grading_companies=...][&grade_range=...]`
/// `[&has_image=...][&sort_by=...][&sort_order=...]`
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  CurrentUser(profile): CurrentUser,
  Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Card>>, ApiError>
where
  S: CollectionStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let criteria = params.into_criteria()?;

  let cards = state
    .store
    .list_cards(profile.user_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let selected: Vec<Card> =
    criteria.select(&cards).into_iter().cloned().collect();
  Ok(Json(selected))
}
