//! Key matching for a chord sequence.
//!
//! Every candidate major key is scored by how many input chords are diatonic
//! to it (a hit) or commonly borrowed into it (a near-hit: the six secondary
//! dominants V/ii..V/vii° plus ♭III, iv, ♭VI, ♭VII). The best key is then
//! used to read the sequence as Roman numerals and look for well-known
//! progressions.
//!
//! All sets here come from pitch arithmetic on the key name, never from a
//! chord grid.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::TheoryConfig;
use crate::pitch::{PitchClass, Spelling, PERFECT_FIFTH};
use crate::token::{parse_sequence, NormalizedChord};
use crate::types::{ChordQuality, KeyMatchResult, MatchOutcome, MatchReport};

/// Placeholder numeral for a chord outside the key.
pub const UNMAPPED: &str = "?";

/// Semitone offset, triad quality and numeral of each major-scale degree.
const MAJOR_DEGREES: [(i32, ChordQuality, &str); 7] = [
    (0, ChordQuality::Major, "I"),
    (2, ChordQuality::Minor, "ii"),
    (4, ChordQuality::Minor, "iii"),
    (5, ChordQuality::Major, "IV"),
    (7, ChordQuality::Major, "V"),
    (9, ChordQuality::Minor, "vi"),
    (11, ChordQuality::Diminished, "vii°"),
];

/// Borrowed from the parallel minor: ♭III, iv, ♭VI, ♭VII.
const BORROWED: [(i32, ChordQuality); 4] = [
    (3, ChordQuality::Major),
    (5, ChordQuality::Minor),
    (8, ChordQuality::Major),
    (10, ChordQuality::Major),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiatonicChord {
    pub chord: NormalizedChord,
    pub numeral: &'static str,
}

/// The seven diatonic triads of one major key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiatonicKeySet {
    pub key: String,
    pub tonic: PitchClass,
    pub chords: Vec<DiatonicChord>,
}

impl DiatonicKeySet {
    pub fn contains(&self, chord: &NormalizedChord) -> bool {
        self.numeral_of(chord).is_some()
    }

    pub fn numeral_of(&self, chord: &NormalizedChord) -> Option<&'static str> {
        self.chords
            .iter()
            .find(|d| d.chord == *chord)
            .map(|d| d.numeral)
    }
}

pub struct KeyMatcher<'a> {
    config: &'a TheoryConfig,
}

impl<'a> KeyMatcher<'a> {
    pub fn new(config: &'a TheoryConfig) -> Self {
        Self { config }
    }

    fn tonic(&self, key: &str) -> Option<(PitchClass, Spelling)> {
        let key = key.trim();
        let tonic = PitchClass::parse(key)?;
        Some((tonic, self.config.spelling_for(key)))
    }

    /// Diatonic triads of `key`, or `None` if `key` is not a note name.
    pub fn diatonic_set(&self, key: &str) -> Option<DiatonicKeySet> {
        let (tonic, spelling) = self.tonic(key)?;
        let chords = MAJOR_DEGREES
            .iter()
            .map(|&(offset, quality, numeral)| DiatonicChord {
                chord: NormalizedChord::new(tonic.transpose(offset), quality, spelling),
                numeral,
            })
            .collect();
        Some(DiatonicKeySet {
            key: key.trim().to_string(),
            tonic,
            chords,
        })
    }

    /// The ten chords that earn partial credit in `key`.
    ///
    /// Secondary dominants are taken as major triads, matching how input
    /// sevenths are coarsened. Empty if `key` is not a note name.
    pub fn near_hit_set(&self, key: &str) -> Vec<NormalizedChord> {
        let Some((tonic, spelling)) = self.tonic(key) else {
            return Vec::new();
        };

        let secondary_dominants = MAJOR_DEGREES[1..].iter().map(|&(offset, _, _)| {
            NormalizedChord::major(tonic.transpose(offset + PERFECT_FIFTH), spelling)
        });
        let borrowed = BORROWED.iter().map(|&(offset, quality)| {
            NormalizedChord::new(tonic.transpose(offset), quality, spelling)
        });

        secondary_dominants.chain(borrowed).collect()
    }

    /// Score `chords` against `key`. `None` if `key` is not a note name.
    ///
    /// Unparsable entries earn nothing but still count toward the total.
    pub fn score(&self, key: &str, chords: &[Option<NormalizedChord>]) -> Option<KeyMatchResult> {
        let diatonic = self.diatonic_set(key)?;
        let near_hits = self.near_hit_set(key);

        let mut hit = 0;
        let mut near = 0;
        for chord in chords.iter().flatten() {
            if diatonic.contains(chord) {
                hit += 1;
            } else if near_hits.contains(chord) {
                near += 1;
            }
        }

        let credit = hit as f64 + self.config.near_hit_weight * near as f64;
        let percent = (100.0 * credit / chords.len().max(1) as f64).round() as u32;

        Some(KeyMatchResult {
            key: diatonic.key,
            hit,
            near,
            percent,
        })
    }

    /// Score every candidate, best first. Ties keep candidate order.
    ///
    /// Candidates that are not note names are skipped.
    pub fn rank_keys<S: AsRef<str>>(
        &self,
        candidates: &[S],
        chords: &[Option<NormalizedChord>],
    ) -> Vec<KeyMatchResult> {
        let mut results: Vec<KeyMatchResult> = candidates
            .iter()
            .filter_map(|key| {
                let key = key.as_ref();
                let result = self.score(key, chords);
                if result.is_none() {
                    warn!(key, "candidate key is not a note name; skipping");
                }
                result
            })
            .collect();

        results.sort_by(|a, b| b.percent.cmp(&a.percent));
        results
    }

    /// Roman numeral of each entry in `key`, [`UNMAPPED`] when not diatonic
    /// or not parsable.
    pub fn romanize(&self, chords: &[Option<NormalizedChord>], key: &str) -> Vec<String> {
        let diatonic = self.diatonic_set(key);
        chords
            .iter()
            .map(|chord| {
                diatonic
                    .as_ref()
                    .zip(chord.as_ref())
                    .and_then(|(set, chord)| set.numeral_of(chord))
                    .unwrap_or(UNMAPPED)
                    .to_string()
            })
            .collect()
    }

    /// Names of catalog progressions that occur as a contiguous run.
    ///
    /// Unmapped chords are removed first, so a pattern may straddle them.
    /// Each name is reported once, in catalog order.
    pub fn detect_progressions<S: AsRef<str>>(&self, numerals: &[S]) -> Vec<String> {
        let filtered: Vec<&str> = numerals
            .iter()
            .map(|n| n.as_ref())
            .filter(|n| *n != UNMAPPED)
            .collect();

        let mut found: Vec<String> = Vec::new();
        for pattern in &self.config.progressions {
            if pattern.is_empty() || found.contains(&pattern.name) {
                continue;
            }
            let occurs = filtered
                .windows(pattern.len())
                .any(|window| window.iter().zip(&pattern.steps).all(|(a, b)| *a == b.as_str()));
            if occurs {
                found.push(pattern.name.clone());
            }
        }
        found
    }

    /// Full matching pipeline over whitespace-separated chord text.
    pub fn match_sequence<S: AsRef<str>>(&self, text: &str, candidates: &[S]) -> MatchOutcome {
        let chords = parse_sequence(text);
        if chords.iter().all(Option::is_none) {
            debug!("no parsable chords in input");
            return MatchOutcome::NoChords;
        }

        let mut ranked = self.rank_keys(candidates, &chords);
        let best_key = ranked.first().map(|r| r.key.clone());
        let romanization = match &best_key {
            Some(key) => self.romanize(&chords, key),
            None => Vec::new(),
        };
        let progressions = self.detect_progressions(&romanization);
        ranked.truncate(self.config.top_matches);

        info!(
            chords = chords.len(),
            best_key = best_key.as_deref().unwrap_or(""),
            progressions = progressions.len(),
            "matched chord sequence"
        );

        MatchOutcome::Matched(MatchReport {
            chords: chords
                .iter()
                .map(|c| c.map(|c| c.symbol()).unwrap_or_default())
                .collect(),
            ranked,
            best_key,
            romanization,
            progressions,
        })
    }
}
