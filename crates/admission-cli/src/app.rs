//! Application state machine and event dispatcher.
//!
//! Step sequencing lives in [`Navigator`]; this module owns the per-screen
//! input state and turns key presses into navigator calls and API requests.
//! Slow requests are queued as a [`Task`] and run after the next frame is
//! drawn, so the screen shows that a reply is pending.

use std::path::PathBuf;

use admission_core::{
  application::{Application, ApplicationStatus},
  assistant::Conversation,
  auth::{AdminCredentials, AdminSession},
  dashboard::{DashboardStats, matches_search},
  intake::{FieldKind, IntakeDraft, IntakeField},
  navigation::{AppStep, Navigator},
  reference,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use uuid::Uuid;

use crate::{client::ApiClient, print::Printable};

// ─── Tasks ────────────────────────────────────────────────────────────────────

/// Work that needs the network, run between frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
  Submit,
  Login,
  Refresh,
  SetStatus(String, ApplicationStatus),
  OfferLetter(String),
  Insight(String),
  OpenConversation,
  SendMessage(String),
}

impl Task {
  pub fn label(&self) -> &'static str {
    match self {
      Task::Submit => "Submitting application…",
      Task::Login => "Verifying credentials…",
      Task::Refresh => "Loading applications…",
      Task::SetStatus(..) => "Updating status…",
      Task::OfferLetter(_) => "Preparing offer letter…",
      Task::Insight(_) => "Asking for AI insight…",
      Task::OpenConversation => "Connecting to assistant…",
      Task::SendMessage(_) => "Assistant is typing…",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
  Username,
  Password,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub nav:        Navigator,
  pub client:     ApiClient,
  /// Where printed documents are written.
  pub print_dir:  PathBuf,
  /// One-line status message shown in the status bar.
  pub status_msg: String,
  pub task:       Option<Task>,

  // ── Identity ────────────────────────────────────────────────────────────
  pub ic_input: String,

  // ── Intake ──────────────────────────────────────────────────────────────
  pub draft:        Option<IntakeDraft>,
  pub fields:       Vec<IntakeField>,
  pub field_cursor: usize,
  /// Edit buffer while a text field is being typed into.
  pub editing:      Option<String>,

  // ── Success ─────────────────────────────────────────────────────────────
  pub submitted: Option<Application>,

  // ── Admin ───────────────────────────────────────────────────────────────
  pub login:         AdminCredentials,
  pub login_focus:   LoginFocus,
  pub applications:  Vec<Application>,
  pub stats:         DashboardStats,
  pub filter:        String,
  pub filter_active: bool,
  /// Id of the selected record; survives refreshes and filter edits.
  pub selected_id:   Option<String>,
  pub insight:       Option<(String, String)>,
  /// A document open for preview; `p` prints it.
  pub document:      Option<Printable>,

  // ── Assistant ───────────────────────────────────────────────────────────
  pub assistant_open: bool,
  pub conversation:   Option<(Uuid, Conversation)>,
  pub chat_input:     String,
}

impl App {
  pub fn new(client: ApiClient, print_dir: PathBuf) -> Self {
    Self {
      nav: Navigator::new(AdminSession::default()),
      client,
      print_dir,
      status_msg: String::new(),
      task: None,
      ic_input: String::new(),
      draft: None,
      fields: IntakeField::all(),
      field_cursor: 0,
      editing: None,
      submitted: None,
      login: AdminCredentials::new("", ""),
      login_focus: LoginFocus::Username,
      applications: Vec::new(),
      stats: DashboardStats::default(),
      filter: String::new(),
      filter_active: false,
      selected_id: None,
      insight: None,
      document: None,
      assistant_open: false,
      conversation: None,
      chat_input: String::new(),
    }
  }

  fn queue(&mut self, task: Task) {
    self.status_msg = task.label().to_owned();
    self.task = Some(task);
  }

  fn fail(&mut self, e: impl std::fmt::Display) {
    self.status_msg = format!("Error: {e}");
  }

  // ── Derived views ─────────────────────────────────────────────────────────

  /// Applications that match the current search box.
  pub fn filtered_applications(&self) -> Vec<&Application> {
    self
      .applications
      .iter()
      .filter(|a| matches_search(a, &self.filter))
      .collect()
  }

  /// The selected application, looked up by id among the visible rows.
  pub fn selected_application(&self) -> Option<&Application> {
    let id = self.selected_id.as_deref()?;
    self.filtered_applications().into_iter().find(|a| a.id == id)
  }

  /// Row of the selection in the visible list.
  pub fn selected_row(&self) -> Option<usize> {
    let id = self.selected_id.as_deref()?;
    self.filtered_applications().iter().position(|a| a.id == id)
  }

  /// Keep the selection on its id, or fall back to the first visible row
  /// once that id is no longer shown.
  fn reselect(&mut self) {
    if self.selected_row().is_none() {
      self.selected_id = self.filtered_applications().first().map(|a| a.id.clone());
    }
  }

  fn move_selection(&mut self, delta: isize) {
    let row = self.selected_row().unwrap_or(0).saturating_add_signed(delta);
    let rows = self.filtered_applications();
    let Some(last) = rows.len().checked_sub(1) else {
      return;
    };
    let id = rows[row.min(last)].id.clone();
    self.selected_id = Some(id);
  }

  /// Install a freshly loaded registry snapshot.
  fn load(&mut self, applications: Vec<Application>, stats: DashboardStats) {
    self.applications = applications;
    self.stats = stats;
    self.reselect();
  }

  pub fn cursor_field(&self) -> Option<IntakeField> {
    self.fields.get(self.field_cursor).copied()
  }

  // ── Tasks ─────────────────────────────────────────────────────────────────

  /// Run the queued task, if any. Errors end up in the status bar.
  pub async fn run_task(&mut self) {
    let Some(task) = self.task.take() else {
      return;
    };
    self.status_msg.clear();
    match task {
      Task::Submit => self.submit().await,
      Task::Login => self.login().await,
      Task::Refresh => self.refresh().await,
      Task::SetStatus(id, status) => match self.client.set_status(&id, status).await {
        Ok(updated) => {
          self.status_msg = format!("{} is now {}", updated.id, updated.status);
          self.refresh().await;
        }
        Err(e) => self.fail(e),
      },
      Task::OfferLetter(id) => match self.client.offer_letter_text(&id).await {
        Ok(text) => self.document = Some(Printable::offer_letter(&id, text)),
        Err(e) => self.fail(e),
      },
      Task::Insight(id) => match self.client.insight(&id).await {
        Ok(text) => self.insight = Some((id, text)),
        Err(e) => self.fail(e),
      },
      Task::OpenConversation => match self.client.new_conversation().await {
        Ok(view) => self.conversation = Some((view.id, view.conversation)),
        Err(e) => self.fail(e),
      },
      Task::SendMessage(text) => self.send_message(text).await,
    }
  }

  async fn submit(&mut self) {
    let Some(draft) = self.draft.as_ref() else {
      return;
    };
    match self.client.submit(draft).await {
      Ok(application) => {
        self.nav.submitted(application.id.clone());
        self.submitted = Some(application);
        self.draft = None;
        self.assistant_open = false;
      }
      Err(e) => self.fail(e),
    }
  }

  async fn login(&mut self) {
    match self.client.login(self.login.clone()).await {
      Ok(()) => {
        self.nav.logged_in();
        self.login = AdminCredentials::new("", "");
        self.login_focus = LoginFocus::Username;
        self.assistant_open = false;
        self.refresh().await;
      }
      Err(e) => self.fail(e),
    }
  }

  async fn refresh(&mut self) {
    let loaded = async {
      let applications = self.client.list_applications().await?;
      let stats = self.client.dashboard().await?;
      anyhow::Ok((applications, stats))
    }
    .await;
    match loaded {
      Ok((applications, stats)) => self.load(applications, stats),
      Err(e) => self.fail(e),
    }
  }

  async fn send_message(&mut self, text: String) {
    let Some((id, conversation)) = self.conversation.as_mut() else {
      return;
    };
    let id = *id;
    match self.client.send_message(id, &text).await {
      Ok(view) => *conversation = view.conversation,
      Err(e) => {
        tracing::warn!(error = %e, "assistant message failed");
        conversation.complete_turn(Err(e));
      }
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }
    if self.task.is_some() {
      return true;
    }

    match key.code {
      KeyCode::F(3) => {
        self.nav.toggle_admin_view();
        self.assistant_open = false;
        self.status_msg.clear();
        if self.nav.step() == AppStep::AdminDashboard {
          self.queue(Task::Refresh);
        }
        return true;
      }
      KeyCode::F(1) if self.nav.shows_assistant() => {
        self.assistant_open = !self.assistant_open;
        if self.assistant_open && self.conversation.is_none() {
          self.queue(Task::OpenConversation);
        }
        return true;
      }
      _ => {}
    }

    if self.assistant_open {
      self.handle_chat_key(key);
      return true;
    }

    match self.nav.step() {
      AppStep::Validation => self.handle_validation_key(key),
      AppStep::Application => self.handle_intake_key(key),
      AppStep::Success => return self.handle_success_key(key),
      AppStep::AdminLogin => self.handle_login_key(key),
      AppStep::AdminDashboard => return self.handle_dashboard_key(key),
    }
    true
  }

  fn handle_chat_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => self.assistant_open = false,
      KeyCode::Backspace => {
        self.chat_input.pop();
      }
      KeyCode::Char(c) => self.chat_input.push(c),
      KeyCode::Enter => {
        let Some((_, conversation)) = self.conversation.as_mut() else {
          return;
        };
        // Shows the user's turn and the pending marker until the reply
        // arrives; the server transcript replaces it afterwards.
        if conversation.begin_turn(&self.chat_input).is_ok() {
          let text = std::mem::take(&mut self.chat_input);
          self.queue(Task::SendMessage(text));
        }
      }
      _ => {}
    }
  }

  fn handle_validation_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char(c) if self.ic_input.len() < 20 => self.ic_input.push(c),
      KeyCode::Backspace => {
        self.ic_input.pop();
      }
      KeyCode::Enter => match self.nav.validate_identity(&self.ic_input).map(|_| ()) {
        Ok(()) => {
          self.draft = self.nav.intake_draft();
          self.field_cursor = 0;
          self.editing = None;
          self.status_msg.clear();
        }
        Err(e) => self.status_msg = e.to_string(),
      },
      _ => {}
    }
  }

  fn handle_intake_key(&mut self, key: KeyEvent) {
    let Some(field) = self.cursor_field() else {
      return;
    };

    if let Some(buffer) = self.editing.as_mut() {
      match key.code {
        KeyCode::Esc => self.editing = None,
        KeyCode::Backspace => {
          buffer.pop();
        }
        KeyCode::Char(c) => buffer.push(c),
        KeyCode::Enter | KeyCode::Tab => {
          let value = std::mem::take(buffer);
          self.editing = None;
          self.set_field(field, &value);
          if key.code == KeyCode::Tab {
            self.move_field(1);
          }
        }
        _ => {}
      }
      return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
      self.queue(Task::Submit);
      return;
    }

    match key.code {
      KeyCode::Down | KeyCode::Tab => self.move_field(1),
      KeyCode::Up | KeyCode::BackTab => self.move_field(-1),
      KeyCode::PageDown => self.move_field(10),
      KeyCode::PageUp => self.move_field(-10),
      KeyCode::Left | KeyCode::Right => {
        let forward = key.code == KeyCode::Right;
        let current = self.draft.as_ref().map(|d| d.get(field)).unwrap_or_default();
        if let Some(next) = cycle(&options(field), &current, forward) {
          self.set_field(field, &next);
        }
      }
      KeyCode::Char(' ') if field.kind() == FieldKind::Checkbox => {
        let checked = self.draft.as_ref().is_some_and(|d| d.declaration_verified);
        self.set_field(field, &(!checked).to_string());
      }
      KeyCode::Enter => match field.kind() {
        FieldKind::Text { .. } | FieldKind::Digits { .. } => {
          self.editing = self.draft.as_ref().map(|d| d.get(field));
        }
        FieldKind::ReadOnly => self.status_msg = format!("{} is read-only", field.label()),
        _ => {}
      },
      KeyCode::Esc => {
        self.nav.reset();
        self.draft = None;
        self.ic_input.clear();
      }
      _ => {}
    }
  }

  fn set_field(&mut self, field: IntakeField, value: &str) {
    let Some(draft) = self.draft.as_mut() else {
      return;
    };
    match draft.set(field, value) {
      Ok(()) => self.status_msg.clear(),
      Err(e) => self.status_msg = e.to_string(),
    }
  }

  fn move_field(&mut self, delta: isize) {
    let last = self.fields.len().saturating_sub(1);
    self.field_cursor = self.field_cursor.saturating_add_signed(delta).min(last);
  }

  fn handle_success_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Char('p') => {
        if let Some(app) = self.submitted.as_ref() {
          let slip = admission_core::letter::SubmissionSlip::for_application(app);
          let doc = Printable::slip(&app.id, slip.render_text());
          self.print(&doc);
        }
      }
      KeyCode::Char('n') | KeyCode::Enter => {
        self.nav.reset();
        self.submitted = None;
        self.ic_input.clear();
        self.status_msg.clear();
      }
      _ => {}
    }
    true
  }

  fn handle_login_key(&mut self, key: KeyEvent) {
    let target = match self.login_focus {
      LoginFocus::Username => &mut self.login.username,
      LoginFocus::Password => &mut self.login.password,
    };
    match key.code {
      KeyCode::Char(c) => target.push(c),
      KeyCode::Backspace => {
        target.pop();
      }
      KeyCode::Tab | KeyCode::Down | KeyCode::Up | KeyCode::BackTab => {
        self.login_focus = match self.login_focus {
          LoginFocus::Username => LoginFocus::Password,
          LoginFocus::Password => LoginFocus::Username,
        };
      }
      // "Use demo credentials"
      KeyCode::F(2) => self.login = AdminCredentials::demo(),
      KeyCode::Enter => self.queue(Task::Login),
      KeyCode::Esc => self.nav.toggle_admin_view(),
      _ => {}
    }
  }

  fn handle_dashboard_key(&mut self, key: KeyEvent) -> bool {
    if self.filter_active {
      match key.code {
        KeyCode::Esc => {
          self.filter_active = false;
          self.filter.clear();
        }
        KeyCode::Enter => self.filter_active = false,
        KeyCode::Backspace => {
          self.filter.pop();
        }
        KeyCode::Char(c) => self.filter.push(c),
        _ => {}
      }
      self.reselect();
      return true;
    }

    if let Some(doc) = self.document.clone() {
      match key.code {
        KeyCode::Char('p') => self.print(&doc),
        KeyCode::Esc | KeyCode::Char('q') => self.document = None,
        _ => {}
      }
      return true;
    }

    let selected = self.selected_application().map(|a| (a.id.clone(), a.status));
    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
      KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.reselect();
      }
      KeyCode::Char('g') => self.queue(Task::Refresh),
      KeyCode::Char('L') => {
        self.client.logout();
        self.nav.logout();
        self.applications.clear();
        self.selected_id = None;
        self.insight = None;
        self.status_msg = "Logged out".into();
      }
      KeyCode::Char(c @ ('a' | 'r' | 'h')) => {
        if let Some((id, _)) = selected {
          let status = match c {
            'a' => ApplicationStatus::Approved,
            'r' => ApplicationStatus::Rejected,
            _ => ApplicationStatus::Pending,
          };
          self.queue(Task::SetStatus(id, status));
        }
      }
      KeyCode::Char('o') => match selected {
        Some((id, ApplicationStatus::Approved)) => self.queue(Task::OfferLetter(id)),
        Some(_) => self.status_msg = "Offer letters are issued only for APPROVED applications".into(),
        None => {}
      },
      KeyCode::Char('i') => {
        if let Some((id, _)) = selected {
          self.queue(Task::Insight(id));
        }
      }
      _ => {}
    }
    true
  }

  fn print(&mut self, doc: &Printable) {
    match doc.write_to(&self.print_dir) {
      Ok(path) => self.status_msg = format!("Printed to {}", path.display()),
      Err(e) => self.fail(e),
    }
  }
}

// ─── Field options ────────────────────────────────────────────────────────────

/// Values a select or year field cycles through with ←/→. Empty means "not
/// chosen" and is offered wherever the draft allows it.
pub fn options(field: IntakeField) -> Vec<String> {
  let mut values: Vec<String> = match field {
    IntakeField::StudyMode | IntakeField::Gender => Vec::new(),
    _ => vec![String::new()],
  };
  match field.kind() {
    FieldKind::Select(table) => values.extend(table.iter().map(|c| c.value.to_owned())),
    FieldKind::Year => values.extend(reference::years().rev().map(|y| y.to_string())),
    _ => return Vec::new(),
  }
  values
}

/// The value after (or before) `current` in `values`, wrapping around.
pub fn cycle(values: &[String], current: &str, forward: bool) -> Option<String> {
  if values.is_empty() {
    return None;
  }
  let len = values.len();
  let next = match values.iter().position(|v| v == current) {
    Some(i) if forward => (i + 1) % len,
    Some(i) => (i + len - 1) % len,
    None => 0,
  };
  Some(values[next].clone())
}

#[cfg(test)]
mod tests {
  use admission_core::application::{Gender, StudyMode};
  use chrono::Utc;

  use super::*;
  use crate::client::ApiConfig;

  fn app() -> App {
    let client = ApiClient::new(ApiConfig {
      base_url: "http://localhost:8080".into(),
    })
    .unwrap();
    App::new(client, PathBuf::from("."))
  }

  fn record(id: &str, name: &str) -> Application {
    Application {
      id:                   id.into(),
      status:               ApplicationStatus::Pending,
      submission_date:      Utc::now(),
      program1:             "IT603".into(),
      program2:             "EN601".into(),
      study_mode:           StudyMode::FullTime,
      name:                 name.into(),
      ic_number:            "960101105544".into(),
      dob:                  String::new(),
      address1:             String::new(),
      address2:             String::new(),
      town:                 String::new(),
      postcode:             String::new(),
      state:                String::new(),
      race:                 String::new(),
      marital_status:       String::new(),
      gender:               Gender::M,
      family_income:        String::new(),
      mobile:               String::new(),
      email:                String::new(),
      work_experience:      Vec::new(),
      sponsor_type:         String::new(),
      sponsor_name:         String::new(),
      payment_method:       String::new(),
      referees:             Vec::new(),
      declaration_verified: true,
    }
  }

  fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

  #[test]
  fn selection_follows_id_across_refresh() {
    let mut app = app();
    app.load(
      vec![record("APP-2000", "SITI"), record("APP-1001", "AHMAD")],
      DashboardStats::default(),
    );
    assert_eq!(app.selected_id.as_deref(), Some("APP-2000"));
    app.handle_dashboard_key(key(KeyCode::Down));
    assert_eq!(app.selected_id.as_deref(), Some("APP-1001"));

    // A new submission lands at the front of the registry.
    app.load(
      vec![
        record("APP-3000", "NURUL"),
        record("APP-2000", "SITI"),
        record("APP-1001", "AHMAD"),
      ],
      DashboardStats::default(),
    );
    assert_eq!(app.selected_application().map(|a| a.name.as_str()), Some("AHMAD"));
    assert_eq!(app.selected_row(), Some(2));

    app.handle_dashboard_key(key(KeyCode::Char('a')));
    assert_eq!(
      app.task,
      Some(Task::SetStatus("APP-1001".into(), ApplicationStatus::Approved))
    );
  }

  #[test]
  fn filter_keeps_visible_selection_and_falls_back_otherwise() {
    let mut app = app();
    app.load(
      vec![record("APP-2000", "SITI"), record("APP-1001", "AHMAD")],
      DashboardStats::default(),
    );
    app.handle_dashboard_key(key(KeyCode::Down));

    app.filter = "ahmad".into();
    app.reselect();
    assert_eq!(app.selected_id.as_deref(), Some("APP-1001"));

    app.filter = "siti".into();
    app.reselect();
    assert_eq!(app.selected_id.as_deref(), Some("APP-2000"));

    app.filter = "nobody".into();
    app.reselect();
    assert_eq!(app.selected_id, None);
    assert!(app.selected_application().is_none());
  }

  #[test]
  fn program_options_start_blank() {
    let opts = options(IntakeField::Program1);
    assert_eq!(opts[0], "");
    assert_eq!(opts.len(), reference::PROGRAMS.len() + 1);
  }

  #[test]
  fn enum_options_have_no_blank() {
    assert_eq!(options(IntakeField::StudyMode), ["FULL TIME", "PART TIME"]);
    assert_eq!(options(IntakeField::Gender), ["M", "F"]);
  }

  #[test]
  fn text_fields_have_no_options() {
    assert!(options(IntakeField::Name).is_empty());
  }

  #[test]
  fn cycle_wraps_both_ways() {
    let v: Vec<String> = ["", "A", "B"].map(String::from).to_vec();
    assert_eq!(cycle(&v, "B", true).as_deref(), Some(""));
    assert_eq!(cycle(&v, "", false).as_deref(), Some("B"));
    assert_eq!(cycle(&v, "A", true).as_deref(), Some("B"));
    assert_eq!(cycle(&v, "zzz", true).as_deref(), Some(""));
    assert_eq!(cycle(&[], "", true), None);
  }
}
