//! Pitch-class arithmetic over the 12 equal-tempered tones.
//!
//! A [`PitchClass`] is always an integer in `0..12`. Sharp or flat spelling is
//! a presentation choice made when rendering a name and never changes the
//! integer value.

use serde::{Deserialize, Serialize};

const NOTE_NAMES_SHARP: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];
const NOTE_NAMES_FLAT: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Semitones in an octave.
pub const OCTAVE: i32 = 12;

/// Semitones in a perfect fifth.
pub const PERFECT_FIFTH: i32 = 7;

/// Accidental preference used when rendering a pitch class as a name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spelling {
    #[default]
    Sharps,
    Flats,
}

impl Spelling {
    pub fn from_prefer_flats(prefer_flats: bool) -> Self {
        if prefer_flats {
            Spelling::Flats
        } else {
            Spelling::Sharps
        }
    }
}

/// One of the 12 pitch classes, C = 0.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PitchClass(u8);

impl PitchClass {
    /// Wrap any integer into `0..12`. Negative values wrap downward.
    pub fn new(index: i32) -> Self {
        PitchClass(index.rem_euclid(OCTAVE) as u8)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Parse a note name: a letter `A`–`G` (either case) optionally followed
    /// by `#` or `b`. Anything else, including chord suffixes, is rejected.
    pub fn parse(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let base = natural_index(chars.next()?)?;
        let offset = match chars.next() {
            None => 0,
            Some('#') => 1,
            Some('b') => -1,
            Some(_) => return None,
        };
        if chars.next().is_some() {
            return None;
        }
        Some(PitchClass::new(base + offset))
    }

    pub fn transpose(self, semitones: i32) -> Self {
        PitchClass::new(self.0 as i32 + semitones)
    }

    pub fn name(self, spelling: Spelling) -> &'static str {
        let idx = self.0 as usize;
        match spelling {
            Spelling::Sharps => NOTE_NAMES_SHARP[idx],
            Spelling::Flats => NOTE_NAMES_FLAT[idx],
        }
    }
}

impl std::fmt::Display for PitchClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name(Spelling::Sharps))
    }
}

fn natural_index(letter: char) -> Option<i32> {
    match letter.to_ascii_uppercase() {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

/// Resolve a note name to its pitch-class index.
pub fn index_of(name: &str) -> Option<u8> {
    PitchClass::parse(name).map(PitchClass::index)
}

/// Render an arbitrary integer as a note name, wrapping into `0..12` first.
pub fn name_of(index: i32, prefer_flats: bool) -> &'static str {
    PitchClass::new(index).name(Spelling::from_prefer_flats(prefer_flats))
}

/// Move a named root by `semitones` (negative moves down) and render the result.
///
/// Returns `None` when `root_name` is not a note name.
pub fn transpose(root_name: &str, semitones: i32, prefer_flats: bool) -> Option<&'static str> {
    let root = PitchClass::parse(root_name)?;
    Some(name_of(root.index() as i32 + semitones, prefer_flats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_naturals_and_accidentals() {
        assert_eq!(index_of("C"), Some(0));
        assert_eq!(index_of("c"), Some(0));
        assert_eq!(index_of("F#"), Some(6));
        assert_eq!(index_of("Bb"), Some(10));
        assert_eq!(index_of("bb"), Some(10));
        assert_eq!(index_of("Db"), Some(1));
    }

    #[test]
    fn accidentals_wrap_around_the_octave() {
        assert_eq!(index_of("Cb"), Some(11));
        assert_eq!(index_of("B#"), Some(0));
        assert_eq!(index_of("E#"), Some(5));
    }

    #[test]
    fn rejects_non_note_names() {
        assert_eq!(index_of(""), None);
        assert_eq!(index_of("H"), None);
        assert_eq!(index_of("C#m"), None);
        assert_eq!(index_of("Cx"), None);
        assert_eq!(index_of("BB"), None);
    }

    #[test]
    fn name_of_wraps_before_lookup() {
        assert_eq!(name_of(12, false), "C");
        assert_eq!(name_of(-1, false), "B");
        assert_eq!(name_of(13, true), "Db");
        assert_eq!(name_of(13, false), "C#");
        assert_eq!(name_of(4, true), "E");
    }

    #[test]
    fn transpose_unknown_root_is_none() {
        assert_eq!(transpose("X", 3, false), None);
        assert_eq!(transpose("", 3, false), None);
    }

    #[test]
    fn transpose_down_a_semitone() {
        assert_eq!(transpose("C", -1, false), Some("B"));
        assert_eq!(transpose("F", -1, true), Some("E"));
        assert_eq!(transpose("Bb", 7, true), Some("F"));
    }

    #[test]
    fn flat_keys_survive_identity_transpose() {
        for key in ["F", "Bb", "Eb", "Ab", "Db", "Gb"] {
            assert_eq!(transpose(key, 0, true), Some(key), "key {}", key);
        }
    }

    #[test]
    fn transpose_round_trips_pitch_class() {
        let names = ["C", "C#", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B"];
        for name in names {
            for semitones in -14..=14 {
                for prefer_flats in [false, true] {
                    let there = transpose(name, semitones, prefer_flats).unwrap();
                    let back = transpose(there, -semitones, prefer_flats).unwrap();
                    assert_eq!(index_of(back), index_of(name), "{} by {}", name, semitones);
                }
            }
        }
    }

    #[test]
    fn spelling_never_changes_the_index() {
        for i in 0..12 {
            let pc = PitchClass::new(i);
            assert_eq!(PitchClass::parse(pc.name(Spelling::Sharps)), Some(pc));
            assert_eq!(PitchClass::parse(pc.name(Spelling::Flats)), Some(pc));
        }
    }

    #[test]
    fn five_black_keys_have_two_names() {
        let count = (0..12)
            .map(PitchClass::new)
            .filter(|pc| pc.name(Spelling::Sharps) != pc.name(Spelling::Flats))
            .count();
        assert_eq!(count, 5);
    }
}
