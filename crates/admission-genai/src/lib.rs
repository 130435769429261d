//! Gemini client implementing [`admission_core::assistant::TextGenerator`].
//!
//! One `generateContent` call per request. No streaming, retry or backoff.

mod client;
mod wire;

pub mod error;

pub use client::{DEFAULT_MODEL, GeminiClient, GeminiConfig};
pub use error::{Error, Result};
pub use wire::extract_text;
