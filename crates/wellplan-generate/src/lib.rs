//! Generation pipeline for wellplan.
//!
//! Compiles a generation instruction, calls one text-generation backend,
//! resolves its response into validated content (or falls back to local
//! content) and renders the final document.

pub mod errors;
pub mod pipeline;
pub mod prompt;
pub mod provider;
pub mod request;
pub mod settings;

pub use errors::{ParseProviderError, PipelineError, ProviderError};
pub use pipeline::{FallbackReason, Pipeline, PipelineOutput, PipelineStage};
pub use prompt::PromptCompiler;
pub use provider::{
    Credentials, GeminiProvider, GenerationProvider, OpenAiProvider, ProviderChoice, ProviderKind,
    ProviderTable,
};
pub use request::{DEFAULT_AUDIENCE, DEFAULT_TONE, GenerationRequest};
pub use settings::{EndpointSettings, ProviderSettings};
