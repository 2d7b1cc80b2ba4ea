use thiserror::Error;

use crate::category::PlanCategory;

/// Core error type shared across wellplan crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A category name did not match any known plan category.
    #[error("unknown plan category: {0}")]
    UnknownCategory(String),
    /// The registry has no entry for the category.
    #[error("no schema registered for category '{0}'")]
    MissingSchema(PlanCategory),
    /// Plan content does not belong to the category it was filed under.
    #[error("content mismatch: expected {expected} content, found {found}")]
    CategoryMismatch {
        expected: PlanCategory,
        found: PlanCategory,
    },
    /// Serializing a schema or example failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results returned by wellplan crates.
pub type Result<T> = std::result::Result<T, Error>;
