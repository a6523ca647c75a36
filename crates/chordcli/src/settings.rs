//! Turns loaded `[theory]` overrides into an engine configuration.

use chordconf::TheorySettings;
use chordsmith::{ProgressionPattern, TheoryConfig};

/// Start from the engine defaults and apply whatever the config set.
pub fn theory_config(settings: &TheorySettings) -> TheoryConfig {
    let mut config = TheoryConfig::default();

    if let Some(keys) = &settings.flat_keys {
        config.flat_keys = keys.clone();
    }
    if let Some(keys) = &settings.candidate_keys {
        config.candidate_keys = keys.clone();
    }
    if let Some(weight) = settings.near_hit_weight {
        config.near_hit_weight = weight;
    }
    if let Some(top) = settings.top_matches {
        config.top_matches = top;
    }
    if let Some(entries) = &settings.progressions {
        config.progressions = entries
            .iter()
            .filter(|e| !e.steps.is_empty())
            .map(|e| ProgressionPattern {
                name: e.name.clone(),
                steps: e.steps.clone(),
            })
            .collect();
    }

    config
}
