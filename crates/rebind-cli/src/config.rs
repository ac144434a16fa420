//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `REBIND_FORMAT`, `REBIND_PROGRESS`
//! 2. Project-local: `.rebind/config.toml`
//! 3. Global: `~/.rebind/config.toml`
//!
//! Command-line flags override all of them.

use clap::ValueEnum;
use rebind_core::{RebindError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// `[output]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSection {
    #[serde(default)]
    pub format: Option<OutputFormat>,
    #[serde(default)]
    pub progress: Option<bool>,
}

/// `[recovery]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecoverySection {
    /// Save repaired clips; `false` makes every fix a dry run
    #[serde(default)]
    pub save: Option<bool>,
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RebindConfigFile {
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub recovery: RecoverySection,
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebindConfig {
    pub format: OutputFormat,
    pub progress: bool,
    pub save: bool,
}

impl Default for RebindConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            progress: true,
            save: true,
        }
    }
}

impl RebindConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = RebindConfigFile::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                Self::merge_into(&mut config, Self::load_file(&global_path)?);
            }
        }

        let local_path = PathBuf::from(".rebind/config.toml");
        if local_path.exists() {
            Self::merge_into(&mut config, Self::load_file(&local_path)?);
        }

        Self::apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        Ok(Self::resolve(config))
    }

    /// Load config from a specific file path only, with the given environment
    pub fn load_from_file(
        path: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        Self::apply_env_overrides(&mut config, env);
        Ok(Self::resolve(config))
    }

    fn resolve(file: RebindConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            format: file.output.format.unwrap_or(defaults.format),
            progress: file.output.progress.unwrap_or(defaults.progress),
            save: file.recovery.save.unwrap_or(defaults.save),
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".rebind").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<RebindConfigFile> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            RebindError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    fn merge_into(base: &mut RebindConfigFile, overlay: RebindConfigFile) {
        if overlay.output.format.is_some() {
            base.output.format = overlay.output.format;
        }
        if overlay.output.progress.is_some() {
            base.output.progress = overlay.output.progress;
        }
        if overlay.recovery.save.is_some() {
            base.recovery.save = overlay.recovery.save;
        }
    }

    fn apply_env_overrides(config: &mut RebindConfigFile, env: impl Fn(&str) -> Option<String>) {
        if let Some(value) = env("REBIND_FORMAT") {
            match OutputFormat::parse(&value) {
                Some(format) => config.output.format = Some(format),
                None => tracing::warn!(value = %value, "ignoring unknown REBIND_FORMAT"),
            }
        }
        if let Some(value) = env("REBIND_PROGRESS") {
            config.output.progress = Some(!matches!(value.as_str(), "0" | "false" | "off"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_config(
            &dir,
            r#"
[output]
format = "json"
progress = false

[recovery]
save = false
"#,
        );
        let config = RebindConfig::load_from_file(&path, no_env).unwrap();
        assert_eq!(
            config,
            RebindConfig {
                format: OutputFormat::Json,
                progress: false,
                save: false,
            }
        );
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_config(&dir, "");
        let config = RebindConfig::load_from_file(&path, no_env).unwrap();
        assert_eq!(config, RebindConfig::default());
    }

    #[test]
    fn test_env_var_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_config(&dir, "[output]\nformat = \"text\"\n");
        let env = |key: &str| match key {
            "REBIND_FORMAT" => Some("JSON".to_string()),
            "REBIND_PROGRESS" => Some("off".to_string()),
            _ => None,
        };
        let config = RebindConfig::load_from_file(&path, env).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert!(!config.progress);
    }

    #[test]
    fn test_unknown_env_format_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_config(&dir, "[output]\nformat = \"json\"\n");
        let env = |key: &str| (key == "REBIND_FORMAT").then(|| "yaml".to_string());
        let config = RebindConfig::load_from_file(&path, env).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_project_layer_overrides_global() {
        let mut base = RebindConfigFile::default();
        let global: RebindConfigFile =
            toml::from_str("[output]\nformat = \"json\"\nprogress = false\n").unwrap();
        let project: RebindConfigFile = toml::from_str("[output]\nformat = \"text\"\n").unwrap();

        RebindConfig::merge_into(&mut base, global);
        RebindConfig::merge_into(&mut base, project);
        let config = RebindConfig::resolve(base);
        assert_eq!(config.format, OutputFormat::Text);
        assert!(!config.progress);
    }

    #[test]
    fn test_bad_config_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_config(&dir, "[output]\nformat = \"yaml\"\n");
        assert!(matches!(
            RebindConfig::load_from_file(&path, no_env),
            Err(RebindError::ConfigError(_))
        ));
    }
}
