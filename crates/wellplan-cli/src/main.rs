mod registry;
mod workspace;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use registry::{
    RunContext, RunRecord, init_console_logging, init_run_logging, start_run, write_content,
    write_record,
};
use thiserror::Error;
use uuid::Uuid;
use wellplan_core::{Error as CoreError, PlanCategory, SCHEMA_VERSION, SchemaRegistry};
use wellplan_generate::{
    Credentials, DEFAULT_AUDIENCE, DEFAULT_TONE, GenerationRequest, Pipeline, PipelineError,
    PromptCompiler, ProviderChoice, ProviderError, ProviderKind, ProviderTable,
};
use wellplan_plan::{PlanError, Resolver};
use wellplan_render::{RenderError, Renderer};
use workspace::{load_settings, write_bytes_atomic};

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("workspace error: {0}")]
    Workspace(#[from] workspace::WorkspaceError),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("plan error: {0}")]
    Plan(#[from] PlanError),
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
    #[error("render error: {0}")]
    Render(#[from] RenderError),
    #[error("pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response rejected ({code}): {detail}")]
    Rejected { code: &'static str, detail: String },
}

#[derive(Parser, Debug)]
#[command(name = "wellplan", version, about = "Wellness plan document generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a plan document for one category.
    Generate(GenerateArgs),
    /// Print the JSON Schema of a category.
    Schema(CategoryArgs),
    /// Print the instruction sent to a backend.
    Prompt(PromptArgs),
    /// Resolve a saved backend response and report violations.
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
struct CategoryArgs {
    /// diet, fitness, skincare, recovery or wellness.
    #[arg(long)]
    category: PlanCategory,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[arg(long)]
    category: PlanCategory,
    /// auto, openai or gemini.
    #[arg(long, default_value = "auto")]
    provider: ProviderChoice,
    #[arg(long, default_value = DEFAULT_TONE)]
    tone: String,
    #[arg(long, default_value = DEFAULT_AUDIENCE)]
    audience: String,
    /// Output path for the rendered document.
    #[arg(long)]
    out: PathBuf,
    /// Output directory for runs.
    #[arg(long, default_value = "runs")]
    run_dir: PathBuf,
    /// Optional TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PromptArgs {
    #[arg(long)]
    category: PlanCategory,
    #[arg(long, default_value = DEFAULT_TONE)]
    tone: String,
    #[arg(long, default_value = DEFAULT_AUDIENCE)]
    audience: String,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    #[arg(long)]
    category: PlanCategory,
    /// File holding the raw backend response.
    file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(args).await,
        Command::Schema(args) => run_schema(args),
        Command::Prompt(args) => run_prompt(args),
        Command::Validate(args) => run_validate(args),
    }
}

async fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let GenerateArgs {
        category,
        provider,
        tone,
        audience,
        out,
        run_dir,
        config,
    } = args;

    let settings = load_settings(config.as_deref())?;
    let credentials = Credentials::from_env();
    let present: Vec<ProviderKind> = ProviderKind::PRIORITY
        .into_iter()
        .filter(|kind| credentials.has(*kind))
        .collect();

    let run_id = Uuid::new_v4().to_string();
    let run_ctx = RunContext {
        run_id: run_id.clone(),
        started_at: chrono::Utc::now(),
        schema_version: SCHEMA_VERSION.to_string(),
        run_dir,
        category,
        provider: provider.to_string(),
        tone: tone.clone(),
        audience: audience.clone(),
        out: out.clone(),
        settings: settings.providers.clone(),
        credentials: present,
    };

    let run_paths = start_run(&run_ctx)?;
    init_run_logging(&run_paths.logs_path)?;

    tracing::info!(event = "run_started", run_id = %run_id, category = %category, provider = %provider);
    let timer = Instant::now();

    let registry = Arc::new(SchemaRegistry::builtin()?);
    let providers = ProviderTable::from_credentials(&credentials, &settings.providers)?;
    let renderer = Arc::new(Renderer::new()?);
    let pipeline = Pipeline::new(registry, providers, renderer)?.with_timeout(settings.providers.timeout());

    let request = GenerationRequest::new(category, out.clone())
        .with_provider(provider)
        .with_tone(tone)
        .with_audience(audience);

    let output = match pipeline.run(&request).await {
        Ok(output) => output,
        Err(err) => {
            tracing::error!(event = "run_finished", status = "failed", error = %err);
            return Err(err.into());
        }
    };

    write_bytes_atomic(request.destination(), output.document.markup.as_bytes())?;
    tracing::info!(event = "document_written", path = %out.display());

    write_content(&run_paths, &output.content)?;
    write_record(&run_paths, &RunRecord::new(&output, &out))?;

    let duration_ms = timer.elapsed().as_millis();
    tracing::info!(
        event = "run_finished",
        status = "success",
        fallback = output.fallback.is_some(),
        duration_ms = duration_ms
    );

    let source = match (&output.fallback, output.provider) {
        (Some(reason), _) => format!("fallback ({})", reason.code),
        (None, Some(kind)) => kind.to_string(),
        (None, None) => "fallback".to_string(),
    };
    println!("{} -> {} [{source}]", output.content.title(), out.display());
    println!("run: {}", run_paths.root.display());
    Ok(())
}

fn run_schema(args: CategoryArgs) -> Result<(), CliError> {
    init_console_logging()?;
    let registry = SchemaRegistry::builtin()?;
    let schema = registry.schema(args.category)?;
    println!("{}", serde_json::to_string_pretty(&schema.document)?);
    Ok(())
}

fn run_prompt(args: PromptArgs) -> Result<(), CliError> {
    init_console_logging()?;
    let compiler = PromptCompiler::new(Arc::new(SchemaRegistry::builtin()?));
    let prompt = compiler.compile(args.category, &args.tone, &args.audience)?;
    print!("{prompt}");
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), CliError> {
    init_console_logging()?;
    let raw = std::fs::read_to_string(&args.file)?;
    let resolver = Resolver::new(Arc::new(SchemaRegistry::builtin()?))?;

    match resolver.resolve(&raw, args.category) {
        Ok(content) => {
            println!("valid {} plan: {}", args.category, content.title());
            Ok(())
        }
        Err(failure) => {
            if let Some(report) = failure.report() {
                println!("{}", serde_json::to_string_pretty(&report.issues)?);
            }
            Err(CliError::Rejected {
                code: failure.code(),
                detail: failure.to_string(),
            })
        }
    }
}
