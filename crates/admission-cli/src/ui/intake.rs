//! Intake form: one row per field, scrolled with the cursor.

use admission_core::{
  intake::{FieldKind, IntakeField},
  reference::{self, Choice},
};
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{List, ListItem, ListState},
};

use super::panel;
use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = panel("Application Form: Master by Research");
  let inner = block.inner(area);
  f.render_widget(block, area);

  let Some(draft) = app.draft.as_ref() else {
    return;
  };

  let items: Vec<ListItem> = app
    .fields
    .iter()
    .enumerate()
    .map(|(i, field)| {
      let is_cursor = i == app.field_cursor;
      let raw = match (&app.editing, is_cursor) {
        (Some(buffer), true) => format!("{buffer}_"),
        _ => draft.get(*field),
      };
      let required = if field.is_required() { "*" } else { " " };

      let value_style = if is_cursor && app.editing.is_some() {
        Style::default().fg(Color::Yellow)
      } else if field.is_required() && raw.trim().is_empty() {
        Style::default().fg(Color::Red)
      } else {
        Style::default()
      };

      ListItem::new(Line::from(vec![
        Span::styled(required, Style::default().fg(Color::Red)),
        Span::styled(
          format!("{:<34}", field.label()),
          Style::default().fg(Color::Gray),
        ),
        Span::styled(display_value(*field, &raw), value_style),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.field_cursor));

  f.render_stateful_widget(
    List::new(items).highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    inner,
    &mut state,
  );
}

/// How a stored value reads in the form: selects show their label,
/// checkboxes a tick box.
fn display_value(field: IntakeField, raw: &str) -> String {
  match field.kind() {
    FieldKind::Checkbox => {
      let tick = if raw == "true" { "[x]" } else { "[ ]" };
      format!("{tick} I declare the information given is true")
    }
    FieldKind::Select(table) if !raw.is_empty() => select_label(table, raw),
    FieldKind::Select(_) | FieldKind::Year if raw.is_empty() => "‹ choose ›".into(),
    _ => raw.to_owned(),
  }
}

fn select_label(table: &'static [Choice], raw: &str) -> String {
  format!("‹ {} ›", reference::label_for(table, raw))
}
