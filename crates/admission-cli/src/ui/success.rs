//! Success step: confirmation and the printable submission slip.

use admission_core::letter::SubmissionSlip;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::Paragraph,
};

use super::panel;
use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = panel("Application Submitted");
  let inner = block.inner(area);
  f.render_widget(block, area);

  let mut lines = vec![
    Line::from(Span::styled(
      "Thank you. Your application has been received.",
      Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )),
    Line::from(""),
  ];
  match &app.submitted {
    Some(application) => {
      let slip = SubmissionSlip::for_application(application);
      lines.extend(slip.render_text().lines().map(|l| Line::from(l.to_owned())));
    }
    None => lines.push(Line::from(format!(
      "Application ID: {}",
      app.nav.submitted_id().unwrap_or("-")
    ))),
  }
  f.render_widget(Paragraph::new(lines), inner);
}
