//! Theory configuration injected into [`crate::ChordTheory`].
//!
//! Everything here used to be a fixed table: the flat-spelled keys, the keys
//! to try when matching, and the progression catalog. Passing them in lets
//! callers swap catalogs or key sets without touching the algorithms.

use serde::{Deserialize, Serialize};

use crate::pitch::Spelling;

/// A named run of Roman numerals, e.g. `ii–V–I`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionPattern {
    pub name: String,
    pub steps: Vec<String>,
}

impl ProgressionPattern {
    /// Build a pattern whose name joins the steps with en-dashes.
    pub fn from_steps(steps: &[&str]) -> Self {
        Self {
            name: steps.join("–"),
            steps: steps.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TheoryConfig {
    /// Keys spelled with flats. All other keys spell accidentals as sharps.
    #[serde(default = "TheoryConfig::default_flat_keys")]
    pub flat_keys: Vec<String>,

    /// Keys scored when matching a chord sequence, in tie-break order.
    #[serde(default = "TheoryConfig::default_candidate_keys")]
    pub candidate_keys: Vec<String>,

    /// Checked in this order; reported in this order.
    #[serde(default = "TheoryConfig::default_progressions")]
    pub progressions: Vec<ProgressionPattern>,

    /// Credit for a near-hit relative to a diatonic hit.
    #[serde(default = "TheoryConfig::default_near_hit_weight")]
    pub near_hit_weight: f64,

    /// How many ranked keys to keep.
    #[serde(default = "TheoryConfig::default_top_matches")]
    pub top_matches: usize,
}

impl TheoryConfig {
    pub fn default_flat_keys() -> Vec<String> {
        ["F", "Bb", "Eb", "Ab", "Db", "Gb"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn default_candidate_keys() -> Vec<String> {
        [
            "C", "G", "D", "A", "E", "B", "F#", "Db", "Ab", "Eb", "Bb", "F",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    pub fn default_progressions() -> Vec<ProgressionPattern> {
        vec![
            ProgressionPattern::from_steps(&["ii", "V", "I"]),
            ProgressionPattern::from_steps(&["I", "V", "vi", "IV"]),
            ProgressionPattern::from_steps(&["I", "vi", "IV", "V"]),
            ProgressionPattern::from_steps(&["I", "IV", "V"]),
            ProgressionPattern::from_steps(&["vi", "IV", "I", "V"]),
            ProgressionPattern::from_steps(&["IV", "V", "I"]),
        ]
    }

    pub fn default_near_hit_weight() -> f64 {
        0.5
    }

    pub fn default_top_matches() -> usize {
        5
    }

    /// Whether `key` is one of the flat-spelled keys (case-insensitive).
    ///
    /// This is a fixed list, not a key-signature model: it knows nothing of
    /// double accidentals or of `Cb`/`C#` major.
    pub fn prefers_flats(&self, key: &str) -> bool {
        let key = key.trim();
        self.flat_keys
            .iter()
            .any(|k| k.trim().eq_ignore_ascii_case(key))
    }

    pub fn spelling_for(&self, key: &str) -> Spelling {
        Spelling::from_prefer_flats(self.prefers_flats(key))
    }
}

impl Default for TheoryConfig {
    fn default() -> Self {
        Self {
            flat_keys: Self::default_flat_keys(),
            candidate_keys: Self::default_candidate_keys(),
            progressions: Self::default_progressions(),
            near_hit_weight: Self::default_near_hit_weight(),
            top_matches: Self::default_top_matches(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flat_keys() {
        let config = TheoryConfig::default();
        for key in ["F", "Bb", "Eb", "Ab", "Db", "Gb"] {
            assert!(config.prefers_flats(key), "{} should prefer flats", key);
        }
        for key in ["C", "G", "D", "F#", "B"] {
            assert!(!config.prefers_flats(key), "{} should prefer sharps", key);
        }
    }

    #[test]
    fn flat_key_lookup_ignores_case() {
        let config = TheoryConfig::default();
        assert!(config.prefers_flats("bb"));
        assert!(config.prefers_flats(" eb "));
        assert_eq!(config.spelling_for("ab"), Spelling::Flats);
    }

    #[test]
    fn progression_names_use_en_dashes() {
        let names: Vec<_> = TheoryConfig::default_progressions()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(
            names,
            vec!["ii–V–I", "I–V–vi–IV", "I–vi–IV–V", "I–IV–V", "vi–IV–I–V", "IV–V–I"]
        );
    }

    #[test]
    fn candidate_keys_cover_all_twelve_roots() {
        let mut roots: Vec<_> = TheoryConfig::default_candidate_keys()
            .iter()
            .filter_map(|k| crate::pitch::index_of(k))
            .collect();
        roots.sort();
        roots.dedup();
        assert_eq!(roots.len(), 12);
    }
}
