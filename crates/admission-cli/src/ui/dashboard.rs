//! Admin dashboard: summary counts, the searchable application table, and
//! the detail pane for the selected record.

use admission_core::{
  application::{Application, ApplicationStatus},
  reference::{
    INCOME_BRACKETS, MARITAL_STATUSES, PAYMENT_METHODS, RACES, SPONSOR_TYPES, STATES, label_for,
    program_label,
  },
};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use super::{field_line, panel};
use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(5), Constraint::Min(0)])
    .split(area);
  draw_stats(f, rows[0], app);

  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
    .split(rows[1]);
  draw_table(f, cols[0], app);
  draw_detail(f, cols[1], app);

  if let Some(doc) = &app.document {
    draw_document(f, area, &doc.file_name, &doc.text);
  }
}

fn status_color(status: ApplicationStatus) -> Color {
  match status {
    ApplicationStatus::Pending => Color::Yellow,
    ApplicationStatus::Approved => Color::Green,
    ApplicationStatus::Rejected => Color::Red,
  }
}

// ─── Summary ──────────────────────────────────────────────────────────────────

fn draw_stats(f: &mut Frame, area: Rect, app: &App) {
  let block = panel("Overview");
  let inner = block.inner(area);
  f.render_widget(block, area);

  let s = &app.stats;
  let count = |label: &'static str, n: usize, color: Color| {
    vec![
      Span::styled(format!("{label} "), Style::default().fg(Color::Gray)),
      Span::styled(
        format!("{n} ({:.0}%)   ", s.percentage(n)),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
      ),
    ]
  };

  let mut first = vec![Span::styled(
    format!("Total {}   ", s.total),
    Style::default().add_modifier(Modifier::BOLD),
  )];
  first.extend(count("Pending", s.pending, Color::Yellow));
  first.extend(count("Approved", s.approved, Color::Green));
  first.extend(count("Rejected", s.rejected, Color::Red));

  let modes = Line::from(format!(
    "Full time {}   Part time {}",
    s.full_time, s.part_time
  ));
  let programs = Line::from(
    s.programs
      .iter()
      .map(|p| format!("{} {}", p.program, p.count))
      .collect::<Vec<_>>()
      .join("  "),
  );

  f.render_widget(
    Paragraph::new(vec![Line::from(first), modes, programs]),
    inner,
  );
}

// ─── Table ────────────────────────────────────────────────────────────────────

fn draw_table(f: &mut Frame, area: Rect, app: &App) {
  let filtered = app.filtered_applications();
  let total = app.applications.len();

  let title = if app.filter_active || !app.filter.is_empty() {
    format!("Applications ({}/{})", filtered.len(), total)
  } else {
    format!("Applications ({total})")
  };
  let block = panel(&title);
  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  if (app.filter_active || !app.filter.is_empty()) && inner_area.height > 2 {
    let filter_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height = inner_area.height.saturating_sub(1);

    let filter_text = if app.filter_active {
      format!("/{}_", app.filter)
    } else {
      format!("/{}", app.filter)
    };
    f.render_widget(
      Paragraph::new(filter_text).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  let items: Vec<ListItem> = filtered
    .iter()
    .map(|a| {
      ListItem::new(Line::from(vec![
        Span::styled(format!("{:<9}", a.id), Style::default().fg(Color::Cyan)),
        Span::styled(
          format!("{:<9}", a.status.to_string()),
          Style::default().fg(status_color(a.status)),
        ),
        Span::raw(a.name.clone()),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select(app.selected_row());

  f.render_stateful_widget(
    List::new(items).highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    inner_area,
    &mut state,
  );
}

// ─── Detail ───────────────────────────────────────────────────────────────────

fn draw_detail(f: &mut Frame, area: Rect, app: &App) {
  let Some(a) = app.selected_application() else {
    let block = panel("Detail");
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
      Paragraph::new("No application selected.").style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  };

  let block = panel(&a.id);
  let inner = block.inner(area);
  f.render_widget(block, area);

  let mut lines = detail_lines(a);
  if a.status == ApplicationStatus::Approved {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
      "[o] Issue Offer Letter",
      Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )));
  }
  if let Some((id, text)) = &app.insight
    && *id == a.id
  {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
      "AI insight",
      Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.extend(text.lines().map(|l| Line::from(l.to_owned())));
  }

  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn detail_lines(a: &Application) -> Vec<Line<'static>> {
  let mut lines = vec![
    Line::from(vec![
      Span::styled("Status              ", Style::default().fg(Color::DarkGray)),
      Span::styled(
        a.status.to_string(),
        Style::default()
          .fg(status_color(a.status))
          .add_modifier(Modifier::BOLD),
      ),
    ]),
    field_line("Submitted", a.submission_date.format("%Y-%m-%d %H:%M").to_string()),
    field_line("Name", a.name.clone()),
    field_line("IC Number", a.ic_number.clone()),
    field_line("Date of birth", a.dob.clone()),
    field_line("Gender", a.gender.to_string()),
    field_line("Race", label_for(RACES, &a.race).to_owned()),
    field_line("Marital status", label_for(MARITAL_STATUSES, &a.marital_status).to_owned()),
    field_line("Mobile", a.mobile.clone()),
    field_line("Email", a.email.clone()),
    field_line("Address", a.address1.clone()),
  ];
  if !a.address2.trim().is_empty() {
    lines.push(field_line("", a.address2.clone()));
  }
  lines.extend([
    field_line("", format!("{} {}", a.postcode, a.town)),
    field_line("", label_for(STATES, &a.state).to_owned()),
    Line::from(""),
    field_line("Programme 1", program_label(&a.program1).to_owned()),
    field_line("Programme 2", program_label(&a.program2).to_owned()),
    field_line("Mode of study", a.study_mode.to_string()),
    field_line("Family income", label_for(INCOME_BRACKETS, &a.family_income).to_owned()),
    field_line("Sponsor", format!(
      "{} {}",
      label_for(SPONSOR_TYPES, &a.sponsor_type),
      a.sponsor_name
    )),
    field_line("Payment", label_for(PAYMENT_METHODS, &a.payment_method).to_owned()),
  ]);

  let work: Vec<_> = a.filled_work_experience().collect();
  if !work.is_empty() {
    lines.push(Line::from(""));
    for w in work {
      lines.push(field_line(
        "Experience",
        format!("{} at {} ({}-{})", w.position, w.organization, w.start_year, w.end_year),
      ));
    }
  }
  for r in &a.referees {
    lines.push(field_line("Referee", format!("{} ({}, {})", r.name, r.mobile, r.city)));
  }
  lines
}

// ─── Letter preview ───────────────────────────────────────────────────────────

fn draw_document(f: &mut Frame, area: Rect, title: &str, text: &str) {
  let popup = Rect {
    x:      area.x + area.width / 10,
    y:      area.y + 1,
    width:  area.width - area.width / 5,
    height: area.height.saturating_sub(2),
  };
  f.render_widget(Clear, popup);
  let block = panel(title).style(Style::default().bg(Color::Black));
  let inner = block.inner(popup);
  f.render_widget(block, popup);
  f.render_widget(Paragraph::new(text.to_owned()).wrap(Wrap { trim: false }), inner);
}
