//! Card list pane — left panel of the Browse screen.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use slab_core::card::Card;

use crate::app::{App, Overlay};

fn summary(card: &Card) -> String {
  let mut line = format!("{} {} {}", card.year, card.manufacturer, card.player);
  if let (Some(company), Some(grade)) =
    (card.grading_company, card.grade_number)
  {
    line.push_str(&format!("  [{company} {grade}]"));
  }
  if card.has_image() {
    line.push_str("  \u{1f4f7}");
  }
  line
}

/// Render the filtered card list into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let visible = app.visible_cards();
  let total = app.cards.len();

  let title = if visible.len() == total {
    format!(" Cards ({total}) ")
  } else {
    format!(" Cards ({}/{total}) ", visible.len())
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let items: Vec<ListItem> = visible
    .iter()
    .enumerate()
    .map(|(i, card)| {
      let style = if i == app.list_cursor {
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD)
      } else {
        Style::default()
      };
      ListItem::new(Line::from(Span::styled(summary(card), style)))
    })
    .collect();

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  // Active-filter badges on the first inner row.
  let badges = app.panel.criteria.badges();
  if !badges.is_empty() && inner_area.height > 1 {
    let badge_area = Rect { height: 1, ..inner_area };
    inner_area.y += 1;
    inner_area.height -= 1;
    f.render_widget(
      Paragraph::new(Span::styled(
        badges.join("  "),
        Style::default().fg(Color::Yellow),
      )),
      badge_area,
    );
  }

  // Search input line at the bottom while typing (or with a term kept).
  let searching = app.overlay == Overlay::Search;
  let term = &app.panel.criteria.search_term;
  if (searching || !term.is_empty()) && inner_area.height > 2 {
    let search_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height -= 1;

    let text = if searching {
      format!("/{term}_")
    } else {
      format!("/{term}")
    };
    f.render_widget(
      Paragraph::new(text).style(Style::default().fg(Color::Yellow)),
      search_area,
    );
  }

  if visible.is_empty() {
    f.render_widget(
      Paragraph::new(Span::styled(
        "No cards found. Press [a] to add your first card.",
        Style::default().fg(Color::Gray),
      )),
      inner_area,
    );
    return;
  }

  let mut state = ListState::default();
  state.select(Some(app.list_cursor.min(visible.len() - 1)));

  f.render_stateful_widget(
    List::new(items)
      .highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol(""),
    inner_area,
    &mut state,
  );
}
