//! Configuration file support for dep-visualizer.
//!
//! Provides TOML-based configuration through `dep-visualizer.toml` files,
//! including data structures, file loading, validation, and merging with
//! command-line overrides into the final [`Settings`].

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::adapters::outbound::formatters::TreeStyle;
use crate::adapters::outbound::network::DEFAULT_REPOSITORY_URL;
use crate::application::dto::OutputFormat;
use crate::application::factories::SourceType;
use crate::graph_exploration::domain::PackageName;
use crate::shared::error::VisualizerError;
use crate::shared::security::safe_read_to_string;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "dep-visualizer.toml";

pub const DEFAULT_MAX_DEPTH: usize = 3;
pub const MAX_ALLOWED_DEPTH: usize = 100;
/// Request budget applied to the registry when none is configured
pub const DEFAULT_REGISTRY_MAX_REQUESTS: usize = 200;

/// Top-level configuration file schema.
///
/// Every key is optional here; required keys are enforced when the file is
/// merged with command-line overrides.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub package_name: Option<String>,
    pub repository_url: Option<String>,
    pub test_mode: Option<bool>,
    pub test_repository_path: Option<String>,
    pub ascii_tree: Option<bool>,
    pub max_depth: Option<i64>,
    pub filter_substring: Option<String>,
    pub show_reverse_deps: Option<bool>,
    pub max_requests: Option<i64>,
    pub include_optional: Option<bool>,
    pub format: Option<String>,
    /// Directory the file was loaded from; relative paths resolve against it.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, toml::Value>,
}

/// Values given on the command line; each one wins over the config file.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub package_name: Option<String>,
    pub max_depth: Option<usize>,
    pub filter_substring: Option<String>,
    pub show_reverse: bool,
    pub test_mode: bool,
    pub test_repository_path: Option<PathBuf>,
    pub repository_url: Option<String>,
    pub max_requests: Option<usize>,
    pub unicode: bool,
    pub format: Option<OutputFormat>,
}

/// Fully merged and validated settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub package_name: PackageName,
    pub max_depth: usize,
    pub filter_substring: String,
    pub show_reverse: bool,
    pub source: SourceType,
    /// `None` means unlimited
    pub max_requests: Option<usize>,
    pub tree_style: TreeStyle,
    pub format: OutputFormat,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = safe_read_to_string(path, "config file")?;

    let mut config: ConfigFile = toml::from_str(&content).map_err(|e| {
        VisualizerError::config(format!(
            "Failed to parse config file {}: {}\n💡 Hint: Ensure the file contains valid TOML with the expected value types.",
            path.display(),
            e
        ))
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    config.base_dir = path.parent().map(Path::to_path_buf);
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(name) = &config.package_name {
        if name.trim().is_empty() {
            return Err(VisualizerError::config("package_name must not be empty").into());
        }
    }

    if let Some(depth) = config.max_depth {
        validate_depth_value(depth)?;
    }

    if let Some(max_requests) = config.max_requests {
        if max_requests < 1 {
            return Err(VisualizerError::config(format!(
                "max_requests must be at least 1, got {}",
                max_requests
            ))
            .into());
        }
    }

    if let Some(format) = &config.format {
        format
            .parse::<OutputFormat>()
            .map_err(VisualizerError::config)?;
    }

    Ok(())
}

fn validate_depth_value(depth: i64) -> Result<()> {
    if depth < 0 || depth > MAX_ALLOWED_DEPTH as i64 {
        return Err(VisualizerError::config(format!(
            "max_depth must be between 0 and {}, got {}",
            MAX_ALLOWED_DEPTH, depth
        ))
        .into());
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!("⚠️  Warning: Unknown config field '{}' will be ignored.", key);
    }
}

impl Settings {
    /// Merges an optional config file with command-line overrides
    ///
    /// # Errors
    /// Returns `ConfigInvalid` when no package name is given anywhere or a
    /// merged value is out of range.
    pub fn resolve(file: Option<ConfigFile>, overrides: ConfigOverrides) -> Result<Self> {
        let file = file.unwrap_or_default();

        let raw_name = overrides
            .package_name
            .or(file.package_name)
            .ok_or_else(|| {
                VisualizerError::config(
                    "package_name is required (set it in the config file or pass --package)",
                )
            })?;
        let package_name = PackageName::new(raw_name.trim())?;

        let max_depth = match overrides.max_depth {
            Some(depth) => depth,
            None => match file.max_depth {
                Some(depth) => usize::try_from(depth).unwrap_or(usize::MAX),
                None => DEFAULT_MAX_DEPTH,
            },
        };
        if max_depth > MAX_ALLOWED_DEPTH {
            return Err(VisualizerError::config(format!(
                "max_depth must be between 0 and {}, got {}",
                MAX_ALLOWED_DEPTH, max_depth
            ))
            .into());
        }

        let test_repository_path = overrides.test_repository_path.clone().or_else(|| {
            file.test_repository_path
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(|p| resolve_relative(p, file.base_dir.as_deref()))
        });
        let test_mode = overrides.test_mode
            || overrides.test_repository_path.is_some()
            || file.test_mode.unwrap_or(false);

        let source = if test_mode {
            match test_repository_path {
                Some(path) => SourceType::FlatFile(path),
                None => SourceType::Demo,
            }
        } else {
            SourceType::Registry {
                repository_url: overrides
                    .repository_url
                    .or(file.repository_url)
                    .unwrap_or_else(|| DEFAULT_REPOSITORY_URL.to_string()),
                include_optional: file.include_optional.unwrap_or(true),
            }
        };

        let max_requests = match overrides.max_requests {
            Some(0) => {
                return Err(VisualizerError::config("max_requests must be at least 1").into())
            }
            Some(n) => Some(n),
            None => file
                .max_requests
                .map(|n| usize::try_from(n).unwrap_or(usize::MAX)),
        };
        let max_requests = match (&source, max_requests) {
            (_, Some(n)) => Some(n),
            (SourceType::Registry { .. }, None) => Some(DEFAULT_REGISTRY_MAX_REQUESTS),
            (_, None) => None,
        };

        let tree_style = if overrides.unicode || !file.ascii_tree.unwrap_or(true) {
            TreeStyle::Unicode
        } else {
            TreeStyle::Ascii
        };

        let format = match overrides.format {
            Some(format) => format,
            None => match file.format.as_deref() {
                Some(raw) => raw.parse().map_err(VisualizerError::config)?,
                None => OutputFormat::default(),
            },
        };

        Ok(Settings {
            package_name,
            max_depth,
            filter_substring: overrides
                .filter_substring
                .or(file.filter_substring)
                .unwrap_or_default(),
            show_reverse: overrides.show_reverse || file.show_reverse_deps.unwrap_or(false),
            source,
            max_requests,
            tree_style,
            format,
        })
    }
}

fn resolve_relative(path: &str, base_dir: Option<&Path>) -> PathBuf {
    let path = PathBuf::from(path);
    match base_dir {
        Some(base) if path.is_relative() => base.join(path),
        _ => path,
    }
}
