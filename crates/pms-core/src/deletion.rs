//! Dependency-guarded deletion
//!
//! Properties, rooms and guests may only be removed once nothing references
//! them any more. Tenants are the exception and cascade unconditionally.

use std::fmt;

use serde::Serialize;

use crate::error::DomainError;

/// A kind of dependent record and how many of them exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub kind: &'static str,
    pub count: i64,
}

impl Dependency {
    pub fn new(kind: &'static str, count: i64) -> Self {
        Self { kind, count }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}(s)", self.count, self.kind)
    }
}

/// Renders blocking dependencies as `2 room(s) and 3 booking(s)`.
pub fn describe_dependencies(dependencies: &[Dependency]) -> String {
    dependencies
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" and ")
}

/// Collects dependent counts for a resource and refuses deletion if any is
/// nonzero.
#[derive(Debug)]
pub struct DependencyGuard {
    resource: String,
    dependencies: Vec<Dependency>,
}

impl DependencyGuard {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            dependencies: Vec::new(),
        }
    }

    /// Zero counts are dropped.
    pub fn with(mut self, kind: &'static str, count: i64) -> Self {
        if count > 0 {
            self.dependencies.push(Dependency::new(kind, count));
        }
        self
    }

    pub fn check(self) -> Result<(), DomainError> {
        if self.dependencies.is_empty() {
            return Ok(());
        }
        Err(DomainError::DependencyConflict {
            resource: self.resource,
            dependencies: self.dependencies,
        })
    }
}

/// Rows removed by a tenant cascade, returned for auditing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TenantDeletionSummary {
    pub users: u64,
    pub properties: u64,
    pub rooms: u64,
    pub guests: u64,
    pub bookings: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_passes_without_dependents() {
        let result = DependencyGuard::new("guest 'Jane Doe'")
            .with("booking", 0)
            .check();
        assert!(result.is_ok());
    }

    #[test]
    fn test_guard_reports_only_nonzero_kinds() {
        let err = DependencyGuard::new("property 'Sea View'")
            .with("room", 0)
            .with("booking", 3)
            .check()
            .unwrap_err();

        match err {
            DomainError::DependencyConflict { dependencies, .. } => {
                assert_eq!(dependencies, vec![Dependency::new("booking", 3)]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_describe_dependencies() {
        let text = describe_dependencies(&[Dependency::new("room", 1), Dependency::new("booking", 4)]);
        assert_eq!(text, "1 room(s) and 4 booking(s)");
    }
}
