use serde::Serialize;
use thiserror::Error;
use wellplan_core::PlanCategory;

use crate::extract::ExtractError;

/// A single schema violation with its location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub code: String,
    /// JSON pointer to the offending field (`/` for the document root).
    pub path: String,
    pub expected: String,
    pub actual: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(
        code: impl Into<String>,
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            path: path.into(),
            expected: expected.into(),
            actual: actual.into(),
            message: message.into(),
        }
    }
}

/// Every violation found while validating one document.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Returns true when there are no issues.
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// True if any issue points at `path` or below it.
    pub fn mentions(&self, path: &str) -> bool {
        let prefix = path.trim_end_matches('/');
        self.issues.iter().any(|issue| {
            issue.path == path
                || issue
                    .path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

/// Why raw backend output could not become validated content.
#[derive(Debug, Error)]
pub enum ResolveFailure {
    #[error("no structured value in response: {0}")]
    Extraction(#[from] ExtractError),
    #[error("{category} content violates its schema ({} issue(s))", .report.issues.len())]
    Violations {
        category: PlanCategory,
        report: ValidationReport,
    },
    #[error("{category} content does not match the plan model: {message}")]
    Shape {
        category: PlanCategory,
        message: String,
    },
    #[error("registry error: {0}")]
    Registry(#[from] wellplan_core::Error),
}

impl ResolveFailure {
    /// Stable identifier used in logs and run manifests.
    pub fn code(&self) -> &'static str {
        match self {
            ResolveFailure::Extraction(_) => "extraction_failed",
            ResolveFailure::Violations { .. } => "schema_violation",
            ResolveFailure::Shape { .. } => "shape_mismatch",
            ResolveFailure::Registry(_) => "registry_error",
        }
    }

    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            ResolveFailure::Violations { report, .. } => Some(report),
            _ => None,
        }
    }
}

/// Errors raised while preparing the resolver itself.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("schema error for {category}: {message}")]
    Schema {
        category: PlanCategory,
        message: String,
    },
    #[error("registry error: {0}")]
    Registry(#[from] wellplan_core::Error),
}

/// Result type for resolver setup.
pub type Result<T> = std::result::Result<T, PlanError>;
