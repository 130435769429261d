//! Route handlers, one module per resource.

pub mod admin;
pub mod applications;
pub mod assistant;
pub mod dashboard;
pub mod identity;
pub mod reference;
