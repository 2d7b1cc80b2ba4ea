use std::path::Path;

use serde::{Deserialize, Serialize};
use wellplan_generate::ProviderSettings;

use super::{WorkspaceError, WorkspaceResult};

/// Contents of the `--config` TOML file.
///
/// ```toml
/// [providers]
/// timeout_secs = 30
///
/// [providers.gemini]
/// model = "gemini-1.5-flash"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub providers: ProviderSettings,
}

/// Read settings from `path`, or use defaults when no path is given.
pub fn load_settings(path: Option<&Path>) -> WorkspaceResult<AppSettings> {
    let Some(path) = path else {
        return Ok(AppSettings::default());
    };
    if !path.exists() {
        return Err(WorkspaceError::Invalid(format!(
            "config file '{}' does not exist",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)?;
    let settings: AppSettings = toml::from_str(&content)?;
    Ok(settings)
}
