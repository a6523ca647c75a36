//! Command implementations

use anyhow::{Context, Result};
use chordconf::{ChordConfig, ConfigSources};
use chordsmith::ChordTheory;
use std::io::Read;

use crate::render::Renderer;
use crate::settings::theory_config;

/// Twelve major keys, theory rows 5 through 18.
const DEMO_GRID: &str = include_str!("../demo/major_grid.csv");

/// Read the grid from a file, from stdin (`-`), or fall back to the demo grid.
fn read_table(table: Option<&str>) -> Result<String> {
    match table {
        None => Ok(DEMO_GRID.to_string()),
        Some("-") => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read grid from stdin")?;
            Ok(raw)
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read grid file {}", path)),
    }
}

/// Derive and print the chord palette for `key`.
pub fn derive(
    config: &ChordConfig,
    key: &str,
    table: Option<&str>,
    json: bool,
    color: bool,
) -> Result<()> {
    let raw = read_table(table)?;
    let theory = ChordTheory::new(theory_config(&config.theory));
    let set = theory.derive_chords(key, &raw)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&set)?);
    } else {
        print!("{}", Renderer::new(color).chord_set(&set));
    }
    Ok(())
}

/// Rank candidate keys for `chords` and print the report.
pub fn match_chords(
    config: &ChordConfig,
    chords: &str,
    keys: Option<&[String]>,
    top: Option<usize>,
    json: bool,
    color: bool,
) -> Result<()> {
    let mut engine = theory_config(&config.theory);
    if let Some(top) = top {
        engine.top_matches = top;
    }
    let theory = ChordTheory::new(engine);

    let outcome = match keys {
        Some(keys) => theory.match_chords(chords, keys),
        None => theory.match_default_keys(chords),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", Renderer::new(color).match_outcome(&outcome));
    }
    Ok(())
}

/// Print the effective configuration as TOML.
pub fn show_config(config: &ChordConfig, sources: &ConfigSources, show_sources: bool) {
    if show_sources {
        println!("# Sources:");
        if sources.files.is_empty() {
            println!("#   (no config files found, using defaults)");
        }
        for path in &sources.files {
            println!("#   file: {}", path.display());
        }
        for var in &sources.env_overrides {
            println!("#   env:  {}", var);
        }
        println!();
    }
    print!("{}", config.to_toml());
}
