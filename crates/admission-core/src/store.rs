//! The `ApplicationStore` trait: the registry's storage interface.
//!
//! Implemented by registry backends (e.g. `admission-store-memory`). The REST
//! layer and the intake submit depend on this abstraction, so a persistent
//! backend can replace the in-memory one without touching them.

use std::future::Future;

use crate::application::{Application, ApplicationStatus};

/// An ordered collection of submitted applications, newest first.
///
/// Records are only ever appended or status-mutated; nothing is deleted.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ApplicationStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert `application` at the front of the registry. No deduplication and
  /// no capacity limit.
  fn append(
    &self,
    application: Application,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Replace the `status` of the record whose id is `id` and return the
  /// updated record.
  ///
  /// Returns `None` and changes nothing when no record matches. Every
  /// transition is permitted, including setting the current status again.
  fn update_status<'a>(
    &'a self,
    id: &'a str,
    status: ApplicationStatus,
  ) -> impl Future<Output = Result<Option<Application>, Self::Error>> + Send + 'a;

  /// The full registry in display order (newest first).
  fn list(
    &self,
  ) -> impl Future<Output = Result<Vec<Application>, Self::Error>> + Send + '_;

  /// Look up one record by id. Returns `None` if not found.
  fn get<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Application>, Self::Error>> + Send + 'a;
}
