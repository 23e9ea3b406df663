//! Card detail pane.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use slab_core::card::{Card, Graded};

fn field<'a>(label: &'a str, value: String) -> Line<'a> {
  Line::from(vec![
    Span::styled(
      format!("{label:>14}  "),
      Style::default().fg(Color::Gray),
    ),
    Span::raw(value),
  ])
}

/// Render `card` (or an empty hint) into `area`.
pub fn draw(f: &mut Frame, area: Rect, card: Option<&Card>) {
  let block = Block::default()
    .title(" Card ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let Some(card) = card else {
    f.render_widget(
      Paragraph::new(Span::styled(
        "Select a card.",
        Style::default().fg(Color::Gray),
      )),
      inner,
    );
    return;
  };

  let mut lines = vec![
    Line::from(Span::styled(
      card.player.clone(),
      Style::default().add_modifier(Modifier::BOLD),
    )),
    Line::from(""),
    field("Year", card.year.to_string()),
    field("Sport", card.sport.to_string()),
    field("Manufacturer", card.manufacturer.clone()),
  ];

  if let Some(set) = &card.set_name {
    lines.push(field("Set", set.clone()));
  }
  if let Some(number) = &card.card_number {
    lines.push(field("Card #", number.clone()));
  }

  match (card.graded, card.grading_company, card.grade_number) {
    (Graded::Yes, Some(company), Some(grade)) => {
      lines.push(field("Graded", format!("{company} {grade}")));
    }
    (Graded::Yes, _, _) => lines.push(field("Graded", "Yes".into())),
    (Graded::No, _, _) => lines.push(field("Graded", "No".into())),
  }

  if let Some(notes) = &card.notes {
    lines.push(field("Notes", notes.clone()));
  }
  if let Some(url) = &card.image_url {
    if !url.is_empty() {
      lines.push(field("Image", url.clone()));
    }
  }

  lines.push(Line::from(""));
  lines.push(field(
    "Added",
    card.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
  ));
  if let Some(updated) = card.updated_at {
    lines.push(field(
      "Updated",
      updated.format("%Y-%m-%d %H:%M UTC").to_string(),
    ));
  }

  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
