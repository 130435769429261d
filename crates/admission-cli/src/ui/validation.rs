//! Identity step: the IC number gate in front of the intake form.

use admission_core::identity::IC_NUMBER_LEN;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Paragraph, Wrap},
};

use super::panel;
use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = panel("Master by Research: Identity Check");
  let inner = block.inner(area);
  f.render_widget(block, area);

  let lines = vec![
    Line::from("Enter your MyKad (IC) number to start a new application."),
    Line::from(Span::styled(
      format!("{IC_NUMBER_LEN} digits, no dashes."),
      Style::default().fg(Color::DarkGray),
    )),
    Line::from(""),
    Line::from(vec![
      Span::styled("IC Number: ", Style::default().add_modifier(Modifier::BOLD)),
      Span::styled(
        format!("{}_", app.ic_input),
        Style::default().fg(Color::Yellow),
      ),
    ]),
  ];
  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
