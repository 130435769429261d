//! Aggregates derived from a registry snapshot for the admin dashboard.
//!
//! Nothing here is stored: every view recomputes from the current list.

use serde::{Deserialize, Serialize};

use crate::{
  application::{Application, ApplicationStatus, StudyMode},
  reference::PROGRAMS,
};

/// Number of applications whose first choice is one programme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramCount {
  pub program: String,
  pub label:   String,
  pub count:   usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
  pub total:     usize,
  pub pending:   usize,
  pub approved:  usize,
  pub rejected:  usize,
  /// First-choice distribution, descending by count, zero counts excluded.
  /// Ties keep programme-table order.
  pub programs:  Vec<ProgramCount>,
  pub full_time: usize,
  pub part_time: usize,
}

impl DashboardStats {
  pub fn compute(applications: &[Application]) -> Self {
    let by_status = |s: ApplicationStatus| {
      applications.iter().filter(|a| a.status == s).count()
    };
    let by_mode =
      |m: StudyMode| applications.iter().filter(|a| a.study_mode == m).count();

    let mut programs: Vec<ProgramCount> = PROGRAMS
      .iter()
      .map(|p| ProgramCount {
        program: p.value.to_owned(),
        label:   p.label.to_owned(),
        count:   applications.iter().filter(|a| a.program1 == p.value).count(),
      })
      .filter(|p| p.count > 0)
      .collect();
    // `sort_by` is stable, so equal counts stay in table order.
    programs.sort_by(|a, b| b.count.cmp(&a.count));

    Self {
      total: applications.len(),
      pending: by_status(ApplicationStatus::Pending),
      approved: by_status(ApplicationStatus::Approved),
      rejected: by_status(ApplicationStatus::Rejected),
      programs,
      full_time: by_mode(StudyMode::FullTime),
      part_time: by_mode(StudyMode::PartTime),
    }
  }

  pub fn count(&self, status: ApplicationStatus) -> usize {
    match status {
      ApplicationStatus::Pending => self.pending,
      ApplicationStatus::Approved => self.approved,
      ApplicationStatus::Rejected => self.rejected,
    }
  }

  /// `count` as a percentage of the total; 0 for an empty registry.
  pub fn percentage(&self, count: usize) -> f64 {
    if self.total == 0 {
      0.0
    } else {
      count as f64 / self.total as f64 * 100.0
    }
  }
}

/// Table filter: case-insensitive substring match on id, name or IC number.
/// An empty (or blank) query matches everything.
pub fn matches_search(application: &Application, query: &str) -> bool {
  let query = query.trim().to_lowercase();
  if query.is_empty() {
    return true;
  }
  [&application.id, &application.name, &application.ic_number]
    .iter()
    .any(|field| field.to_lowercase().contains(&query))
}
