//! Add/edit form pane.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::form::{CardForm, Field, FormMode};

fn value_for(form: &CardForm, field: Field) -> String {
  let draft = &form.draft;
  let or_dash = |s: &str| {
    if s.is_empty() { "—".to_string() } else { s.to_string() }
  };
  match field {
    Field::Player => or_dash(&draft.player),
    Field::Year => or_dash(&draft.year),
    Field::Sport => draft
      .sport
      .map(|s| s.to_string())
      .unwrap_or_else(|| "— (←/→ to choose)".into()),
    Field::Manufacturer => {
      if draft.sport.is_none() {
        "select a sport first".into()
      } else {
        or_dash(&draft.manufacturer)
      }
    }
    Field::SetName => {
      if draft.manufacturer.is_empty() {
        "select a manufacturer first".into()
      } else {
        or_dash(&draft.set_name)
      }
    }
    Field::CardNumber => or_dash(&draft.card_number),
    Field::Graded => match draft.graded {
      slab_core::card::Graded::Yes => "Yes".into(),
      slab_core::card::Graded::No => "No".into(),
    },
    Field::GradingCompany => draft
      .grading_company
      .map(|c| c.to_string())
      .unwrap_or_else(|| "—".into()),
    Field::GradeNumber => or_dash(&draft.grade_number),
    Field::Notes => or_dash(&draft.notes),
    Field::Image => {
      let mut text = or_dash(&form.image_path);
      if draft.image.is_some() {
        text.push_str("  (attached)");
      } else if draft.image_url.is_some() {
        text.push_str("  (hosted)");
      }
      text
    }
  }
}

/// Render the form into `area`.
pub fn draw(f: &mut Frame, area: Rect, form: &CardForm) {
  let title = match form.mode {
    FormMode::Add => " Add card ",
    FormMode::Edit(_) => " Edit card ",
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let fields = form.fields();
  let lines: Vec<Line> = fields
    .iter()
    .enumerate()
    .map(|(i, field)| {
      let active = i == form.cursor.min(fields.len() - 1);
      let label_style = if active {
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD)
      } else {
        Style::default().fg(Color::Gray)
      };
      let marker = if active { "›" } else { " " };
      Line::from(vec![
        Span::styled(
          format!("{marker} {:>16}  ", field.label()),
          label_style,
        ),
        Span::raw(value_for(form, *field)),
      ])
    })
    .collect();

  f.render_widget(Paragraph::new(lines), inner);
}
