use std::fs::{OpenOptions, create_dir_all};
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Utc};
use serde::Serialize;
use wellplan_core::PlanCategory;
use wellplan_generate::{
    FallbackReason, PipelineOutput, PipelineStage, ProviderKind, ProviderSettings,
};
use wellplan_plan::GeneratedContent;
use wellplan_render::RenderedDocument;

use super::{RegistryError, RegistryResult};

/// Metadata captured at run start.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub schema_version: String,
    pub run_dir: PathBuf,
    pub category: PlanCategory,
    pub provider: String,
    pub tone: String,
    pub audience: String,
    pub out: PathBuf,
    pub settings: ProviderSettings,
    /// Backends with a credential. Keys themselves are never recorded.
    pub credentials: Vec<ProviderKind>,
}

/// JSON config written to each run directory.
#[derive(Debug, Serialize)]
pub struct RunConfig<'a> {
    pub run_id: &'a str,
    pub started_at: String,
    pub schema_version: &'a str,
    pub category: PlanCategory,
    pub provider: &'a str,
    pub tone: &'a str,
    pub audience: &'a str,
    pub out: &'a Path,
    pub settings: &'a ProviderSettings,
    pub credentials: &'a [ProviderKind],
    pub git: GitInfo,
}

/// Git metadata for reproducibility.
#[derive(Debug, Serialize)]
pub struct GitInfo {
    pub commit: Option<String>,
    pub dirty: Option<bool>,
}

/// Outcome of a run, written as `document.json`.
#[derive(Debug, Serialize)]
pub struct RunRecord<'a> {
    pub document: &'a RenderedDocument,
    pub out: &'a Path,
    pub provider: Option<ProviderKind>,
    pub stages: &'a [PipelineStage],
    pub fallback: Option<&'a FallbackReason>,
}

impl<'a> RunRecord<'a> {
    pub fn new(output: &'a PipelineOutput, out: &'a Path) -> Self {
        Self {
            document: &output.document,
            out,
            provider: output.provider,
            stages: &output.stages,
            fallback: output.fallback.as_ref(),
        }
    }
}

/// Paths for run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub root: PathBuf,
    pub content_path: PathBuf,
    pub document_path: PathBuf,
    pub logs_path: PathBuf,
}

pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let root = ctx
        .run_dir
        .join(format!("{timestamp}__{}_{}", ctx.category, ctx.run_id));

    create_dir_all(&root)?;

    let config_path = root.join("config.json");
    let logs_path = root.join("logs.ndjson");

    let config = RunConfig {
        run_id: &ctx.run_id,
        started_at: ctx.started_at.to_rfc3339(),
        schema_version: &ctx.schema_version,
        category: ctx.category,
        provider: &ctx.provider,
        tone: &ctx.tone,
        audience: &ctx.audience,
        out: &ctx.out,
        settings: &ctx.settings,
        credentials: &ctx.credentials,
        git: collect_git_info(),
    };
    write_json(&config_path, &config)?;

    OpenOptions::new().create(true).append(true).open(&logs_path)?;

    Ok(RunPaths {
        content_path: root.join("content.json"),
        document_path: root.join("document.json"),
        logs_path,
        root,
    })
}

pub fn write_content(paths: &RunPaths, content: &GeneratedContent) -> RegistryResult<()> {
    write_json(&paths.content_path, content)
}

pub fn write_record(paths: &RunPaths, record: &RunRecord<'_>) -> RegistryResult<()> {
    write_json(&paths.document_path, record)
}

pub fn collect_git_info() -> GitInfo {
    let commit = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|value| !value.is_empty());

    let dirty = Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| !output.stdout.is_empty());

    GitInfo { commit, dirty }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> RegistryResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    serde_json::to_writer_pretty(file, value).map_err(RegistryError::from)
}
