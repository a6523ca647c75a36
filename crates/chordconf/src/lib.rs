//! Minimal configuration loading for chordsmith.
//!
//! This crate has no dependency on the theory crate. Theory values are
//! optional overrides; anything left unset falls back to the engine's own
//! defaults.
//!
//! # Usage
//!
//! ```rust,no_run
//! use chordconf::ChordConfig;
//!
//! let config = ChordConfig::load().expect("Failed to load config");
//! println!("log level: {}", config.logging.level);
//! if let Some(keys) = &config.theory.candidate_keys {
//!     println!("candidate keys: {}", keys.join(" "));
//! }
//! ```
//!
//! # Config File Locations
//!
//! Files are loaded in order (later wins):
//! 1. `/etc/chordsmith/config.toml` (system)
//! 2. `~/.config/chordsmith/config.toml` (user)
//! 3. `./chordsmith.toml` (local override), or a path given on the command line
//! 4. Environment variables (`CHORDSMITH_*`, `RUST_LOG`)
//!
//! # Example Config
//!
//! ```toml
//! [theory]
//! flat_keys = ["F", "Bb", "Eb", "Ab", "Db", "Gb"]
//! candidate_keys = ["C", "G", "D", "A", "E", "B", "F#", "Db", "Ab", "Eb", "Bb", "F"]
//! near_hit_weight = 0.5
//! top_matches = 5
//!
//! [[theory.progressions]]
//! name = "ii–V–I"
//! steps = ["ii", "V", "I"]
//!
//! [logging]
//! level = "warn"
//!
//! [output]
//! color = true
//! json = false
//! ```

pub mod loader;
pub mod sections;

pub use loader::{discover_config_files_with_override, ConfigSources};
pub use sections::{LoggingConfig, OutputConfig, ProgressionEntry, TheorySettings};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Complete chordsmith configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChordConfig {
    #[serde(default)]
    pub theory: TheorySettings,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl ChordConfig {
    /// Load configuration from all sources.
    pub fn load() -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(None)?;
        Ok(config)
    }

    /// Load configuration, with `config_path` replacing `./chordsmith.toml`.
    pub fn load_from(config_path: Option<&std::path::Path>) -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(config_path)?;
        Ok(config)
    }

    /// Load configuration from optional path and return information about sources.
    pub fn load_with_sources_from(
        config_path: Option<&std::path::Path>,
    ) -> Result<(Self, ConfigSources), ConfigError> {
        let mut sources = ConfigSources::default();
        let mut config = ChordConfig::default();

        for path in loader::discover_config_files_with_override(config_path) {
            let file_config = loader::load_from_file(&path)?;
            config = loader::merge_configs(config, file_config);
            sources.files.push(path);
        }

        loader::apply_env_overrides(&mut config, &mut sources);

        Ok((config, sources))
    }

    /// Serialize config to a TOML string.
    pub fn to_toml(&self) -> String {
        let mut output = String::from("# chordsmith configuration\n\n");
        match toml::to_string_pretty(self) {
            Ok(body) => output.push_str(&body),
            Err(e) => output.push_str(&format!("# failed to render config: {}\n", e)),
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ChordConfig::default();
        assert_eq!(config.logging.level, "warn");
        assert!(config.output.color);
        assert!(!config.output.json);
        assert_eq!(config.theory, TheorySettings::default());
    }

    #[test]
    fn test_to_toml() {
        let mut config = ChordConfig::default();
        config.theory.top_matches = Some(3);
        let toml = config.to_toml();
        assert!(toml.contains("[theory]"));
        assert!(toml.contains("top_matches = 3"));
        assert!(toml.contains("[logging]"));
        assert!(toml.contains("[output]"));
    }

    #[test]
    fn test_to_toml_round_trips() {
        let mut config = ChordConfig::default();
        config.theory.candidate_keys = Some(vec!["C".into(), "Bb".into()]);
        config.theory.progressions = Some(vec![ProgressionEntry {
            name: "I–IV".into(),
            steps: vec!["I".into(), "IV".into()],
        }]);
        let parsed: ChordConfig = toml::from_str(&config.to_toml()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[theory]\ntop_matches = 9\ncandidate_keys = [\"D\", \"A\"]").unwrap();

        let (config, sources) = ChordConfig::load_with_sources_from(Some(file.path())).unwrap();
        assert_eq!(config.theory.top_matches, Some(9));
        assert_eq!(
            config.theory.candidate_keys,
            Some(vec!["D".to_string(), "A".into()])
        );
        assert!(sources.files.iter().any(|p| p == file.path()));
    }

    #[test]
    fn test_load_from_broken_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[theory]\ntop_matches = \"lots\"").unwrap();

        let err = ChordConfig::load_from(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
