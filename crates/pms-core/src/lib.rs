//! # PMS Core
//!
//! Domain entities, tenant-isolation rules, booking availability logic,
//! repository traits and services of the property management backend.

pub mod domain;
pub mod access;
pub mod availability;
pub mod deletion;
pub mod repositories;
pub mod services;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
