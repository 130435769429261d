//! In-process registry backend for the admission portal.
//!
//! Records live for the life of the process. There is no persistence: a
//! restart returns the registry to its seed.

mod seed;
mod store;

pub use seed::seed_application;
pub use store::MemoryStore;

#[cfg(test)]
mod tests;
