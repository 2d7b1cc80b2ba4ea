use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};
use wellplan_core::{PlanCategory, SchemaRegistry};
use wellplan_plan::{
    FallbackSynthesizer, GeneratedContent, ResolveFailure, Resolver, ValidationIssue,
};
use wellplan_render::{RenderedDocument, Renderer};

use crate::errors::{PipelineError, ProviderError};
use crate::prompt::PromptCompiler;
use crate::provider::{GenerationProvider, ProviderKind, ProviderTable};
use crate::request::GenerationRequest;
use crate::settings::DEFAULT_TIMEOUT_SECS;

/// States a run passes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Compiling,
    Generating,
    Resolving,
    FallingBack,
    Rendering,
    Done,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Compiling => "compiling",
            PipelineStage::Generating => "generating",
            PipelineStage::Resolving => "resolving",
            PipelineStage::FallingBack => "falling_back",
            PipelineStage::Rendering => "rendering",
            PipelineStage::Done => "done",
        }
    }
}

/// Why a run served fallback content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FallbackReason {
    /// `no_provider`, a provider error code or a resolve failure code.
    pub code: String,
    pub provider: Option<ProviderKind>,
    pub detail: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<ValidationIssue>,
}

impl FallbackReason {
    fn no_provider() -> Self {
        Self {
            code: "no_provider".to_string(),
            provider: None,
            detail: "no credential available for any backend".to_string(),
            issues: Vec::new(),
        }
    }

    fn from_provider(err: &ProviderError) -> Self {
        Self {
            code: err.code().to_string(),
            provider: Some(err.provider()),
            detail: err.to_string(),
            issues: Vec::new(),
        }
    }

    fn from_resolve(provider: ProviderKind, failure: &ResolveFailure) -> Self {
        Self {
            code: failure.code().to_string(),
            provider: Some(provider),
            detail: failure.to_string(),
            issues: failure
                .report()
                .map(|report| report.issues.clone())
                .unwrap_or_default(),
        }
    }
}

/// Result of one run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub document: RenderedDocument,
    pub content: GeneratedContent,
    pub stages: Vec<PipelineStage>,
    /// Backend that was called, if any.
    pub provider: Option<ProviderKind>,
    pub fallback: Option<FallbackReason>,
}

/// Compile, generate, resolve (or fall back) and render one document.
///
/// All collaborators are immutable after construction, so one pipeline can
/// serve concurrent runs.
#[derive(Debug, Clone)]
pub struct Pipeline {
    compiler: PromptCompiler,
    providers: ProviderTable,
    resolver: Arc<Resolver>,
    fallback: FallbackSynthesizer,
    renderer: Arc<Renderer>,
    timeout: Duration,
}

impl Pipeline {
    pub fn new(
        registry: Arc<SchemaRegistry>,
        providers: ProviderTable,
        renderer: Arc<Renderer>,
    ) -> Result<Self, PipelineError> {
        let resolver = Resolver::new(Arc::clone(&registry))?;
        Ok(Self {
            compiler: PromptCompiler::new(Arc::clone(&registry)),
            providers,
            resolver: Arc::new(resolver),
            fallback: FallbackSynthesizer::new(registry),
            renderer,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Bound on the backend call. Expiry is treated like any provider failure.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run the request end to end.
    ///
    /// Only an explicit provider without a credential, a registry lookup
    /// failure or a render failure is returned as an error; every backend
    /// or resolve failure is replaced with fallback content. Dropping the
    /// returned future cancels an in-flight backend call.
    pub async fn run(&self, request: &GenerationRequest) -> Result<PipelineOutput, PipelineError> {
        let category = request.category;
        let mut stages = Vec::new();

        enter(&mut stages, PipelineStage::Compiling, category);
        let instruction = self
            .compiler
            .compile(category, &request.tone, &request.audience)?;

        let selected = self.providers.select(request.provider).inspect_err(|err| {
            warn!(event = "provider_unavailable", category = %category, error = %err);
        })?;

        let (content, provider, fallback) = match selected {
            Some(provider) => {
                info!(
                    event = "provider_selected",
                    category = %category,
                    provider = %provider.kind(),
                    model = provider.model(),
                    choice = %request.provider
                );
                match self.generate(&mut stages, category, provider.as_ref(), &instruction).await {
                    Ok(content) => (content, Some(provider.kind()), None),
                    Err(reason) => {
                        let content = self.fall_back(&mut stages, category, &reason);
                        (content, Some(provider.kind()), Some(reason))
                    }
                }
            }
            None => {
                let reason = FallbackReason::no_provider();
                let content = self.fall_back(&mut stages, category, &reason);
                (content, None, Some(reason))
            }
        };

        enter(&mut stages, PipelineStage::Rendering, category);
        let document = self.renderer.render(&content)?;

        enter(&mut stages, PipelineStage::Done, category);
        info!(
            event = "pipeline_completed",
            category = %category,
            fallback = fallback.is_some(),
            title = content.title()
        );

        Ok(PipelineOutput {
            document,
            content,
            stages,
            provider,
            fallback,
        })
    }

    async fn generate(
        &self,
        stages: &mut Vec<PipelineStage>,
        category: PlanCategory,
        provider: &dyn GenerationProvider,
        instruction: &str,
    ) -> Result<GeneratedContent, FallbackReason> {
        let kind = provider.kind();

        enter(stages, PipelineStage::Generating, category);
        let raw = match tokio::time::timeout(self.timeout, provider.generate(instruction)).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(err)) => return Err(FallbackReason::from_provider(&err)),
            Err(_) => {
                let err = ProviderError::Timeout {
                    provider: kind,
                    after: self.timeout,
                };
                return Err(FallbackReason::from_provider(&err));
            }
        };

        enter(stages, PipelineStage::Resolving, category);
        self.resolver
            .resolve_from(&raw, category, Some(kind.as_str()))
            .map_err(|failure| FallbackReason::from_resolve(kind, &failure))
    }

    fn fall_back(
        &self,
        stages: &mut Vec<PipelineStage>,
        category: PlanCategory,
        reason: &FallbackReason,
    ) -> GeneratedContent {
        enter(stages, PipelineStage::FallingBack, category);
        warn!(
            event = "fallback_triggered",
            category = %category,
            code = %reason.code,
            provider = reason.provider.map(|kind| kind.as_str()),
            detail = %reason.detail
        );
        for issue in &reason.issues {
            warn!(
                event = "schema_violation",
                category = %category,
                code = %issue.code,
                path = %issue.path,
                expected = %issue.expected,
                actual = %issue.actual
            );
        }
        self.fallback.synthesize(category)
    }
}

fn enter(stages: &mut Vec<PipelineStage>, stage: PipelineStage, category: PlanCategory) {
    info!(event = "stage_entered", stage = stage.as_str(), category = %category);
    stages.push(stage);
}
