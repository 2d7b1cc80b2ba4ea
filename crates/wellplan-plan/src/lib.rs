//! Plan resolution for wellplan.
//!
//! Turns raw backend text into [`GeneratedContent`]: JSON extraction from
//! noisy text, validation against the category schema, metadata backfill,
//! and the fallback path that produces valid content without any backend.

pub mod content;
pub mod errors;
pub mod extract;
pub mod fallback;
pub mod resolve;
pub mod validate;

pub use content::{ContentSource, GeneratedContent};
pub use errors::{PlanError, ResolveFailure, Result, ValidationIssue, ValidationReport};
pub use extract::{ExtractError, extract_json};
pub use fallback::FallbackSynthesizer;
pub use resolve::{Resolver, ValidationOutcome};
pub use validate::SchemaValidator;
