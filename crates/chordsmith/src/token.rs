//! Chord-symbol parsing.
//!
//! A chord symbol is a root (`A`–`G` plus optional `#`/`b`) followed by a
//! free-form tail. Only three qualities survive normalization: diminished
//! when the tail says `dim` or `°`, minor when it has a lowercase `m` that
//! does not start `maj`, and major for everything else (`7`, `sus4`, `add9`,
//! `maj7`, ...).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::pitch::{PitchClass, Spelling};
use crate::types::ChordQuality;

/// Split a chord symbol into its root and the remaining tail.
///
/// The root keeps the accidental as written; the letter may be either case.
fn split_root(text: &str) -> Option<(&str, &str)> {
    let mut chars = text.char_indices();
    let (_, letter) = chars.next()?;
    if !matches!(letter.to_ascii_uppercase(), 'A'..='G') {
        return None;
    }
    let end = match chars.next() {
        Some((i, '#' | 'b')) => i + 1,
        Some((i, _)) => i,
        None => text.len(),
    };
    Some(text.split_at(end))
}

/// The root written at the start of a grid cell, ignoring any quality suffix.
///
/// The letter is upper-cased and the accidental kept, so `"bbm7"` gives
/// `"Bb"`. Returns an empty string when the cell does not start with a note.
pub fn root_token(cell: &str) -> String {
    let Some((root, _)) = split_root(cell.trim()) else {
        return String::new();
    };
    let mut chars = root.chars();
    let mut token = String::with_capacity(root.len());
    if let Some(letter) = chars.next() {
        token.push(letter.to_ascii_uppercase());
    }
    token.extend(chars);
    token
}

/// Classify a chord-symbol tail into one of the three coarse qualities.
pub fn classify_tail(tail: &str) -> ChordQuality {
    if tail.contains("dim") || tail.contains('°') {
        return ChordQuality::Diminished;
    }
    let has_minor_m = tail
        .match_indices('m')
        .any(|(i, _)| !tail[i + 1..].starts_with("aj"));
    if has_minor_m {
        ChordQuality::Minor
    } else {
        ChordQuality::Major
    }
}

/// A chord reduced to root pitch class and coarse quality.
///
/// Equality ignores spelling: `A#m` and `Bbm` are the same chord.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NormalizedChord {
    pub root: PitchClass,
    pub quality: ChordQuality,
    pub spelling: Spelling,
}

impl NormalizedChord {
    pub fn new(root: PitchClass, quality: ChordQuality, spelling: Spelling) -> Self {
        Self {
            root,
            quality,
            spelling,
        }
    }

    pub fn major(root: PitchClass, spelling: Spelling) -> Self {
        Self::new(root, ChordQuality::Major, spelling)
    }

    pub fn symbol(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for NormalizedChord {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root && self.quality == other.quality
    }
}

impl Eq for NormalizedChord {}

impl std::hash::Hash for NormalizedChord {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.root.hash(state);
        self.quality.hash(state);
    }
}

impl std::fmt::Display for NormalizedChord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.root.name(self.spelling), self.quality.suffix())
    }
}

/// Parse a free-form chord symbol, or `None` if it has no recognizable root.
///
/// The root is re-spelled with flats when the input used a flat accidental.
pub fn normalize(token: &str) -> Option<NormalizedChord> {
    let (root, tail) = split_root(token.trim())?;
    let pitch = PitchClass::parse(root)?;
    let spelling = Spelling::from_prefer_flats(root.ends_with('b') && root.len() > 1);
    Some(NormalizedChord::new(pitch, classify_tail(tail), spelling))
}

/// Parse a whitespace-separated chord sequence, one entry per token.
///
/// Unparsable tokens stay in place as `None` so positions line up with the input.
pub fn parse_sequence(text: &str) -> Vec<Option<NormalizedChord>> {
    text.split_whitespace()
        .map(|token| {
            let chord = normalize(token);
            if chord.is_none() {
                debug!(token, "unparsable chord token");
            }
            chord
        })
        .collect()
}
