//! Chord theory for major keys.
//!
//! Two pipelines share the pitch and chord-symbol layers:
//!
//! - **Derivation**: a key name plus a pasted chord grid yields the scale-degree
//!   chords, their secondary dominants, the modal-interchange chords, and the
//!   leading-tone chords for that key ([`ChordSet`]).
//! - **Matching**: a chord sequence is scored against candidate keys, read as
//!   Roman numerals in the best key, and scanned for common progressions
//!   ([`MatchOutcome`]).
//!
//! Everything is pure and synchronous. A [`ChordTheory`] holds only its
//! immutable [`TheoryConfig`] and can be shared freely across threads.
//!
//! # Example
//!
//! ```
//! use chordsmith::ChordTheory;
//!
//! let theory = ChordTheory::default();
//!
//! let grid = "C,D,G\nC,D,G\nDm,Em,Am\nEm,F#m,Bm\nF,G,C\nG,A,D\nAm,Bm,Em\n";
//! let set = theory.derive_chords("C", grid).unwrap();
//! assert_eq!(set.five_of_two, "A7");
//! assert_eq!(set.seven_diminished, "B°");
//!
//! let outcome = theory.match_default_keys("Dm7 G7 Cmaj7");
//! let report = outcome.report().unwrap();
//! assert_eq!(report.best_key.as_deref(), Some("C"));
//! assert_eq!(report.progressions, vec!["ii–V–I"]);
//! ```

pub mod config;
pub mod derive;
pub mod error;
pub mod grid;
pub mod matcher;
pub mod pitch;
pub mod token;
pub mod types;

pub use config::{ProgressionPattern, TheoryConfig};
pub use derive::ChordDeriver;
pub use error::{Result, TheoryError};
pub use grid::GridTable;
pub use matcher::{DiatonicKeySet, KeyMatcher};
pub use pitch::{PitchClass, Spelling};
pub use token::NormalizedChord;
pub use types::{ChordQuality, ChordSet, KeyMatchResult, MatchOutcome, MatchReport, Slot, SlotGroup};

/// Entry point for both pipelines, holding the injected configuration.
#[derive(Debug, Clone, Default)]
pub struct ChordTheory {
    config: TheoryConfig,
}

impl ChordTheory {
    pub fn new(config: TheoryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TheoryConfig {
        &self.config
    }

    pub fn deriver(&self) -> ChordDeriver<'_> {
        ChordDeriver::new(&self.config)
    }

    pub fn matcher(&self) -> KeyMatcher<'_> {
        KeyMatcher::new(&self.config)
    }

    /// Parse `raw_table` and derive the chord set for `key`.
    ///
    /// Fails with [`TheoryError::KeyNotFound`] when no header names `key`.
    pub fn derive_chords(&self, key: &str, raw_table: &str) -> Result<ChordSet> {
        let grid = GridTable::parse(raw_table);
        self.deriver().derive(key, &grid)
    }

    /// Match a whitespace-separated chord sequence against `candidate_keys`.
    pub fn match_chords<S: AsRef<str>>(&self, text: &str, candidate_keys: &[S]) -> MatchOutcome {
        self.matcher().match_sequence(text, candidate_keys)
    }

    /// [`ChordTheory::match_chords`] over the configured candidate keys.
    pub fn match_default_keys(&self, text: &str) -> MatchOutcome {
        self.match_chords(text, &self.config.candidate_keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theory_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ChordTheory>();
    }

    #[test]
    fn custom_candidate_keys() {
        let theory = ChordTheory::new(TheoryConfig {
            candidate_keys: vec!["G".into(), "D".into()],
            top_matches: 1,
            ..Default::default()
        });
        let report = theory.match_default_keys("G C D").report().cloned().unwrap();
        assert_eq!(report.ranked.len(), 1);
        assert_eq!(report.ranked[0].key, "G");
    }

    #[test]
    fn custom_progression_catalog() {
        let theory = ChordTheory::new(TheoryConfig {
            progressions: vec![ProgressionPattern::from_steps(&["I", "vi", "ii", "V"])],
            ..Default::default()
        });
        let report = theory.match_default_keys("C Am Dm G").report().cloned().unwrap();
        assert_eq!(report.progressions, vec!["I–vi–ii–V"]);
    }

    #[test]
    fn derive_reports_missing_key() {
        let theory = ChordTheory::default();
        let err = theory.derive_chords("F#", "C,G\nC,G\n").unwrap_err();
        assert_eq!(err, TheoryError::KeyNotFound { key: "F#".into() });
    }
}
