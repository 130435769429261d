//! [`MemoryStore`]: the in-memory implementation of [`ApplicationStore`].

use std::{convert::Infallible, sync::Arc};

use chrono::Utc;
use tokio::sync::RwLock;

use admission_core::{
  application::{Application, ApplicationStatus},
  store::ApplicationStore,
};

use crate::seed::seed_application;

/// The application registry, newest record first.
///
/// Cloning is cheap and clones share the same records. Each operation holds
/// the lock only for one read or one mutation.
#[derive(Clone, Default)]
pub struct MemoryStore {
  applications: Arc<RwLock<Vec<Application>>>,
}

impl MemoryStore {
  /// An empty registry.
  pub fn new() -> Self { Self::default() }

  /// A registry holding the mock record `APP-1001`.
  pub fn seeded() -> Self {
    Self::with_applications(vec![seed_application(Utc::now())])
  }

  /// A registry holding `applications` in the given (display) order.
  pub fn with_applications(applications: Vec<Application>) -> Self {
    Self {
      applications: Arc::new(RwLock::new(applications)),
    }
  }
}

impl ApplicationStore for MemoryStore {
  type Error = Infallible;

  async fn append(&self, application: Application) -> Result<(), Infallible> {
    tracing::debug!(id = %application.id, "appending application");
    self.applications.write().await.insert(0, application);
    Ok(())
  }

  async fn update_status<'a>(
    &'a self,
    id: &'a str,
    status: ApplicationStatus,
  ) -> Result<Option<Application>, Infallible> {
    // Ids are not unique; every record sharing `id` moves together.
    let mut applications = self.applications.write().await;
    let mut first = None;
    let mut updated = 0;
    for record in applications.iter_mut().filter(|a| a.id == id) {
      record.status = status;
      updated += 1;
      first.get_or_insert_with(|| record.clone());
    }
    if first.is_none() {
      tracing::debug!(%id, "status update for unknown application ignored");
    } else {
      tracing::debug!(%id, %status, updated, "application status updated");
    }
    Ok(first)
  }

  async fn list(&self) -> Result<Vec<Application>, Infallible> {
    Ok(self.applications.read().await.clone())
  }

  async fn get<'a>(&'a self, id: &'a str) -> Result<Option<Application>, Infallible> {
    Ok(
      self
        .applications
        .read()
        .await
        .iter()
        .find(|a| a.id == id)
        .cloned(),
    )
  }
}
