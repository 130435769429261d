//! TUI rendering: header, the current step's screen, status bar, and the
//! assistant panel when it is open.

pub mod assistant;
pub mod dashboard;
pub mod intake;
pub mod login;
pub mod success;
pub mod validation;

use admission_core::navigation::AppStep;
use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::app::App;

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
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let admin_hint = if app.nav.step().is_admin() {
    "[F3] applicant portal"
  } else {
    "[F3] admin"
  };
  let left = Span::styled(
    format!(" UNISEL Postgraduate Admission  {admin_hint}"),
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::Gray));

  let left_width = left.content.chars().count() as u16;
  let right_width = right.content.chars().count() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![left, Span::raw(" ".repeat(pad as usize)), right]);

  let block = Block::default().style(Style::default().bg(Color::Blue));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  let (main, side) = if app.assistant_open {
    let cols = Layout::default()
      .direction(Direction::Horizontal)
      .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
      .split(area);
    (cols[0], Some(cols[1]))
  } else {
    (area, None)
  };

  match app.nav.step() {
    AppStep::Validation => validation::draw(f, main, app),
    AppStep::Application => intake::draw(f, main, app),
    AppStep::Success => success::draw(f, main, app),
    AppStep::AdminLogin => login::draw(f, main, app),
    AppStep::AdminDashboard => dashboard::draw(f, main, app),
  }

  if let Some(side) = side {
    assistant::draw(f, side, app);
  }
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = if app.assistant_open {
    ("ASSISTANT", "Type a question  Enter send  Esc close")
  } else {
    match app.nav.step() {
      AppStep::Validation => ("IDENTITY", "Type IC number  Enter continue  F1 assistant"),
      AppStep::Application if app.editing.is_some() => {
        ("EDIT", "Type  Enter save  Tab save+next  Esc cancel")
      }
      AppStep::Application => (
        "FORM",
        "↑↓ field  Enter edit  ←→ choose  Space tick  Ctrl-S submit  Esc restart",
      ),
      AppStep::Success => ("SUBMITTED", "p print slip  n new application  q quit"),
      AppStep::AdminLogin => ("LOGIN", "Tab switch field  F2 demo credentials  Enter login"),
      AppStep::AdminDashboard if app.filter_active => {
        ("SEARCH", "Type to filter by ID, name or IC  Esc clear  Enter done")
      }
      AppStep::AdminDashboard if app.document.is_some() => ("LETTER", "p print  Esc close"),
      AppStep::AdminDashboard => (
        "DASHBOARD",
        "jk move  / search  a approve  r reject  h hold  o offer  i insight  g reload  L logout",
      ),
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
  let hint_span = Span::styled(format!("  {status}"), Style::default().fg(Color::Gray));

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

// ─── Shared helpers ───────────────────────────────────────────────────────────

/// A bordered block titled `title`.
pub(crate) fn panel(title: &str) -> Block<'_> {
  Block::default()
    .title(format!(" {title} "))
    .borders(ratatui::widgets::Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray))
}

/// A `label: value` line with the label dimmed.
pub(crate) fn field_line<'a>(label: &'a str, value: impl Into<String>) -> Line<'a> {
  Line::from(vec![
    Span::styled(format!("{label:<20}"), Style::default().fg(Color::DarkGray)),
    Span::raw(value.into()),
  ])
}
