//! Config file discovery, loading, and environment variable overlay.

use crate::sections::{LoggingConfig, OutputConfig};
use crate::{ChordConfig, ConfigError};
use std::env;
use std::path::{Path, PathBuf};

/// Information about where config values came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Config files that were loaded (in order)
    pub files: Vec<PathBuf>,
    /// Environment variables that overrode config values
    pub env_overrides: Vec<String>,
}

/// Discover config files in standard locations.
///
/// Returns paths in load order (system, user, local).
/// Only returns files that exist.
pub fn discover_config_files() -> Vec<PathBuf> {
    discover_config_files_with_override(None)
}

/// Discover config files, optionally with a CLI override path.
///
/// If `cli_path` is provided and exists, it replaces the local override.
pub fn discover_config_files_with_override(cli_path: Option<&Path>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let system = PathBuf::from("/etc/chordsmith/config.toml");
    if system.exists() {
        files.push(system);
    }

    // XDG_CONFIG_HOME or ~/.config
    if let Some(config_dir) = directories::BaseDirs::new().map(|d| d.config_dir().to_path_buf()) {
        let user = config_dir.join("chordsmith/config.toml");
        if user.exists() {
            files.push(user);
        }
    }

    if let Some(path) = cli_path {
        if path.exists() {
            files.push(path.to_path_buf());
            return files;
        }
    }

    let local = PathBuf::from("chordsmith.toml");
    if local.exists() {
        files.push(local);
    }

    files
}

/// Load config from a TOML file.
pub fn load_from_file(path: &Path) -> Result<ChordConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_toml(&contents, path)
}

/// Parse config from a TOML string.
pub fn parse_toml(contents: &str, path: &Path) -> Result<ChordConfig, ConfigError> {
    toml::from_str(contents).map_err(|e: toml::de::Error| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Merge two configs, with `overlay` taking precedence.
///
/// Theory settings merge per field. Logging and output values win only when
/// the overlay moved them off their defaults.
pub fn merge_configs(base: ChordConfig, overlay: ChordConfig) -> ChordConfig {
    let default_logging = LoggingConfig::default();
    let default_output = OutputConfig::default();

    ChordConfig {
        theory: base.theory.merge(overlay.theory),
        logging: LoggingConfig {
            level: if overlay.logging.level != default_logging.level {
                overlay.logging.level
            } else {
                base.logging.level
            },
        },
        output: OutputConfig {
            color: if overlay.output.color != default_output.color {
                overlay.output.color
            } else {
                base.output.color
            },
            json: if overlay.output.json != default_output.json {
                overlay.output.json
            } else {
                base.output.json
            },
        },
    }
}

/// Apply environment variable overrides to config.
pub fn apply_env_overrides(config: &mut ChordConfig, sources: &mut ConfigSources) {
    apply_overrides_from(config, sources, |name| env::var(name).ok());
}

/// Apply overrides from any variable lookup (the process environment in production).
pub fn apply_overrides_from<F>(config: &mut ChordConfig, sources: &mut ConfigSources, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("CHORDSMITH_LOG_LEVEL") {
        config.logging.level = v;
        sources.env_overrides.push("CHORDSMITH_LOG_LEVEL".to_string());
    }
    // Also support RUST_LOG
    if let Some(v) = lookup("RUST_LOG") {
        config.logging.level = v;
        sources.env_overrides.push("RUST_LOG".to_string());
    }

    if let Some(v) = lookup("CHORDSMITH_TOP_MATCHES") {
        if let Ok(n) = v.trim().parse() {
            config.theory.top_matches = Some(n);
            sources.env_overrides.push("CHORDSMITH_TOP_MATCHES".to_string());
        }
    }
    if let Some(v) = lookup("CHORDSMITH_NEAR_HIT_WEIGHT") {
        if let Ok(w) = v.trim().parse() {
            config.theory.near_hit_weight = Some(w);
            sources.env_overrides.push("CHORDSMITH_NEAR_HIT_WEIGHT".to_string());
        }
    }
    if let Some(v) = lookup("CHORDSMITH_CANDIDATE_KEYS") {
        config.theory.candidate_keys = Some(split_list(&v));
        sources.env_overrides.push("CHORDSMITH_CANDIDATE_KEYS".to_string());
    }
    if let Some(v) = lookup("CHORDSMITH_FLAT_KEYS") {
        config.theory.flat_keys = Some(split_list(&v));
        sources.env_overrides.push("CHORDSMITH_FLAT_KEYS".to_string());
    }

    // Presence alone disables color, as with NO_COLOR
    if lookup("CHORDSMITH_NO_COLOR").is_some() {
        config.output.color = false;
        sources.env_overrides.push("CHORDSMITH_NO_COLOR".to_string());
    }
}

/// Split a comma-separated list, dropping blanks.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
