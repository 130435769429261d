//! Admin login screen.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::Paragraph,
};

use super::panel;
use crate::app::{App, LoginFocus};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = panel("Administrative Access");
  let inner = block.inner(area);
  f.render_widget(block, area);

  let input = |label: &'static str, value: String, focused: bool| {
    let style = if focused {
      Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
      Style::default()
    };
    let cursor = if focused { "_" } else { "" };
    Line::from(vec![
      Span::styled(format!("{label:<10}"), Style::default().fg(Color::DarkGray)),
      Span::styled(format!("{value}{cursor}"), style),
    ])
  };

  let lines = vec![
    Line::from("Sign in to review applications."),
    Line::from(""),
    input(
      "Username",
      app.login.username.clone(),
      app.login_focus == LoginFocus::Username,
    ),
    input(
      "Password",
      "*".repeat(app.login.password.chars().count()),
      app.login_focus == LoginFocus::Password,
    ),
    Line::from(""),
    Line::from(Span::styled(
      "F2: use demo credentials (not for production use)",
      Style::default().fg(Color::DarkGray),
    )),
  ];
  f.render_widget(Paragraph::new(lines), inner);
}
