//! Core types and trait definitions for the admission portal.
//!
//! This crate is deliberately free of HTTP and storage dependencies. The
//! registry backend, the REST service, the text-generation client and the
//! terminal portal all depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod application;
pub mod assistant;
pub mod auth;
pub mod dashboard;
pub mod error;
pub mod identity;
pub mod intake;
pub mod letter;
pub mod navigation;
pub mod reference;
pub mod store;

pub use error::{Error, Result};
