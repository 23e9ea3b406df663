//! TUI rendering — orchestrates all panes.

pub mod card_detail;
pub mod card_form;
pub mod card_list;

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use strum::IntoEnumIterator as _;

use slab_core::card::GradingCompany;

use crate::app::{App, Overlay, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);

  // Overlays sit on top of whatever the body drew.
  match &app.overlay {
    Overlay::ConfirmDelete => draw_confirm(f, area),
    Overlay::Companies(cursor) => draw_companies(f, area, app, *cursor),
    Overlay::YearRange(buf) => draw_year_input(f, area, buf),
    Overlay::Rename(buf) => draw_rename_input(f, area, buf),
    Overlay::Search | Overlay::None => {}
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let left = Span::styled(
    " slab  [a] add  [/] search  [q] quit",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  // The total always reflects the unfiltered snapshot.
  let right = Span::styled(
    format!("{} cards ", app.cards.len()),
    Style::default().fg(Color::Gray),
  );

  let left_width = left.content.len() as u16;
  let right_width = right.content.len() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  match app.screen {
    Screen::Form => {
      if let Some(form) = &app.form {
        card_form::draw(f, area, form);
      }
    }
    Screen::Detail => {
      card_detail::draw(f, area, app.selected_card());
    }
    Screen::Browse => {
      // Split into left list pane (55%) and right preview pane (45%).
      let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);
      card_list::draw(f, cols[0], app);
      card_detail::draw(f, cols[1], app.cursor_card());
    }
  }
}

// ─── Overlays ─────────────────────────────────────────────────────────────────

fn popup(area: Rect, width: u16, height: u16) -> Rect {
  let w = width.min(area.width);
  let h = height.min(area.height);
  Rect {
    x:      area.x + (area.width - w) / 2,
    y:      area.y + (area.height - h) / 2,
    width:  w,
    height: h,
  }
}

fn draw_confirm(f: &mut Frame, area: Rect) {
  let rect = popup(area, 46, 5);
  f.render_widget(Clear, rect);
  let block = Block::default()
    .title(" Delete card ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Red));
  let inner = block.inner(rect);
  f.render_widget(block, rect);
  f.render_widget(
    Paragraph::new(vec![
      Line::from("Delete this card? This cannot be undone."),
      Line::from(Span::styled(
        "[y] delete   [n] cancel",
        Style::default().fg(Color::Gray),
      )),
    ]),
    inner,
  );
}

fn draw_companies(f: &mut Frame, area: Rect, app: &App, cursor: usize) {
  let companies: Vec<GradingCompany> = GradingCompany::iter().collect();
  let rect = popup(area, 30, companies.len() as u16 + 2);
  f.render_widget(Clear, rect);

  let items: Vec<ListItem> = companies
    .iter()
    .enumerate()
    .map(|(i, company)| {
      let selected =
        app.panel.criteria.grading_companies.contains(company);
      let mark = if selected { "[x]" } else { "[ ]" };
      let style = if i == cursor {
        Style::default().bg(Color::Blue).fg(Color::White)
      } else {
        Style::default()
      };
      ListItem::new(Line::from(Span::styled(
        format!(" {mark} {company}"),
        style,
      )))
    })
    .collect();

  let block = Block::default()
    .title(" Grading companies ")
    .borders(Borders::ALL);
  let mut state = ListState::default();
  state.select(Some(cursor));
  f.render_stateful_widget(
    List::new(items).block(block),
    rect,
    &mut state,
  );
}

fn draw_year_input(f: &mut Frame, area: Rect, buf: &str) {
  let rect = popup(area, 40, 4);
  f.render_widget(Clear, rect);
  let block = Block::default()
    .title(" Year range ")
    .borders(Borders::ALL);
  let inner = block.inner(rect);
  f.render_widget(block, rect);
  f.render_widget(
    Paragraph::new(vec![
      Line::from(format!("{buf}_")),
      Line::from(Span::styled(
        "1980-1989, 1980-, -1989 or 1989; empty clears",
        Style::default().fg(Color::Gray),
      )),
    ]),
    inner,
  );
}

fn draw_rename_input(f: &mut Frame, area: Rect, buf: &str) {
  let rect = popup(area, 40, 4);
  f.render_widget(Clear, rect);
  let block = Block::default()
    .title(" Profile name ")
    .borders(Borders::ALL);
  let inner = block.inner(rect);
  f.render_widget(block, rect);
  f.render_widget(
    Paragraph::new(vec![
      Line::from(format!("{buf}_")),
      Line::from(Span::styled(
        "Enter save  Esc cancel",
        Style::default().fg(Color::Gray),
      )),
    ]),
    inner,
  );
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match (&app.screen, &app.overlay) {
    (_, Overlay::Search) => ("SEARCH", "Type to filter  Esc clear  Enter keep"),
    (_, Overlay::YearRange(_)) => ("YEARS", "Type a range  Enter apply  Esc cancel"),
    (_, Overlay::Companies(_)) => ("COMPANIES", "Space toggle  Enter done"),
    (_, Overlay::ConfirmDelete) => ("CONFIRM", "y delete  n cancel"),
    (_, Overlay::Rename(_)) => ("PROFILE", "Type a name  Enter save  Esc cancel"),
    (Screen::Browse, _) => (
      "BROWSE",
      "jk move  Enter detail  a add  d delete  p profile  s/m/e/y/g/G/i filter  o/r sort  c clear",
    ),
    (Screen::Detail, _) => ("DETAIL", "e edit  d delete  Esc back"),
    (Screen::Form, _) => {
      ("FORM", "Tab/↑↓ field  ←→ choose  Enter attach image  Ctrl-S save  Esc cancel")
    }
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::Gray),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
