//! Configuration sections.
//!
//! Theory values are optional: `None` means "use the library default", so
//! the defaults live in one place (the theory crate) and a config file only
//! has to name what it changes.

use serde::{Deserialize, Serialize};

/// A named progression, e.g. `name = "ii–V–I"`, `steps = ["ii", "V", "I"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionEntry {
    pub name: String,
    pub steps: Vec<String>,
}

/// `[theory]` overrides for the chord-theory engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TheorySettings {
    /// Keys spelled with flats.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flat_keys: Option<Vec<String>>,

    /// Keys scored when matching, in tie-break order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_keys: Option<Vec<String>>,

    /// Weight of a near-hit relative to a diatonic hit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub near_hit_weight: Option<f64>,

    /// Number of ranked keys to show.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_matches: Option<usize>,

    /// Replaces the whole progression catalog when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progressions: Option<Vec<ProgressionEntry>>,
}

impl TheorySettings {
    /// Field-by-field merge; values set in `overlay` win.
    pub fn merge(self, overlay: TheorySettings) -> TheorySettings {
        TheorySettings {
            flat_keys: overlay.flat_keys.or(self.flat_keys),
            candidate_keys: overlay.candidate_keys.or(self.candidate_keys),
            near_hit_weight: overlay.near_hit_weight.or(self.near_hit_weight),
            top_matches: overlay.top_matches.or(self.top_matches),
            progressions: overlay.progressions.or(self.progressions),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive (trace, debug, info, warn, error, or a full
    /// `tracing` filter such as `chordsmith=debug`).
    /// Default: warn
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl LoggingConfig {
    fn default_level() -> String {
        "warn".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Colorize terminal output.
    /// Default: true
    #[serde(default = "OutputConfig::default_color")]
    pub color: bool,

    /// Print JSON instead of text.
    /// Default: false
    #[serde(default)]
    pub json: bool,
}

impl OutputConfig {
    fn default_color() -> bool {
        true
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: Self::default_color(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theory_merge_prefers_overlay() {
        let base = TheorySettings {
            top_matches: Some(3),
            near_hit_weight: Some(0.25),
            ..Default::default()
        };
        let overlay = TheorySettings {
            top_matches: Some(8),
            ..Default::default()
        };
        let merged = base.merge(overlay);
        assert_eq!(merged.top_matches, Some(8));
        assert_eq!(merged.near_hit_weight, Some(0.25));
        assert_eq!(merged.flat_keys, None);
    }
}
