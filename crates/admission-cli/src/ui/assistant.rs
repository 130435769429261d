//! Assistant side panel: transcript above, input line below.

use admission_core::assistant::Speaker;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Paragraph, Wrap},
};

use super::panel;
use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Min(0), Constraint::Length(3)])
    .split(area);

  let block = panel("AI Admission Assistant");
  let inner = block.inner(rows[0]);
  f.render_widget(block, rows[0]);

  let mut lines: Vec<Line> = Vec::new();
  match &app.conversation {
    Some((_, conversation)) => {
      for turn in conversation.turns() {
        let (who, color) = match turn.speaker {
          Speaker::User => ("You", Color::Cyan),
          Speaker::Ai => ("Assistant", Color::Green),
        };
        lines.push(Line::from(Span::styled(
          who,
          Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        lines.extend(turn.text.lines().map(|l| Line::from(l.to_owned())));
        lines.push(Line::from(""));
      }
      if conversation.is_pending() {
        lines.push(Line::from(Span::styled(
          "…",
          Style::default().fg(Color::DarkGray),
        )));
      }
    }
    None => lines.push(Line::from(Span::styled(
      "Connecting…",
      Style::default().fg(Color::DarkGray),
    ))),
  }

  // Keep the newest turns in view.
  let height = inner.height as usize;
  let scroll = lines.len().saturating_sub(height) as u16;
  f.render_widget(
    Paragraph::new(lines)
      .wrap(Wrap { trim: false })
      .scroll((scroll, 0)),
    inner,
  );

  let input = panel("Ask a question");
  let input_inner = input.inner(rows[1]);
  f.render_widget(input, rows[1]);
  f.render_widget(
    Paragraph::new(format!("{}_", app.chat_input)).style(Style::default().fg(Color::Yellow)),
    input_inner,
  );
}
