//! Chord derivation for one key from a chord grid.
//!
//! Two sources of truth are combined:
//!
//! - The grid is authoritative for the scale-degree chords (theory-rows
//!   5–10) and the modal-interchange chords (14, 15, 17, 18). It may encode
//!   borrowed qualities that plain pitch arithmetic would not produce.
//! - Secondary dominants are resolved through the grid as well: take the
//!   root of a degree chord, find the column headed by that root, read that
//!   column's V row, append `7`.
//! - The grid has no seventh degree, so vii° and V/vii° come from pitch
//!   arithmetic on the key name. Nothing reconciles them with the grid's own
//!   V row when the two disagree.

use tracing::{debug, info};

use crate::config::TheoryConfig;
use crate::error::{Result, TheoryError};
use crate::grid::GridTable;
use crate::pitch::{self, PERFECT_FIFTH};
use crate::token::root_token;
use crate::types::{ChordQuality, ChordSet};

/// Theory-rows of the I, ii, iii, IV, V and vi chords.
pub const PRIMARY_ROWS: [usize; 6] = [5, 6, 7, 8, 9, 10];

/// Theory-row holding each column's dominant (V) chord.
pub const DOMINANT_ROW: usize = 9;

pub const FLAT_THREE_ROW: usize = 14;
pub const FLAT_FOUR_ROW: usize = 15;
pub const FLAT_SIX_ROW: usize = 17;
pub const FLAT_SEVEN_ROW: usize = 18;

pub struct ChordDeriver<'a> {
    config: &'a TheoryConfig,
}

impl<'a> ChordDeriver<'a> {
    pub fn new(config: &'a TheoryConfig) -> Self {
        Self { config }
    }

    /// Derive the full chord set for `key`.
    ///
    /// Fails only when no header matches `key`. Every other gap leaves the
    /// affected field empty.
    pub fn derive(&self, key: &str, grid: &GridTable) -> Result<ChordSet> {
        let column = grid
            .find_column(key)
            .ok_or_else(|| TheoryError::KeyNotFound {
                key: key.trim().to_string(),
            })?;

        let cell = |row| grid.cell_at(row, column).to_string();
        let dominant = |row| self.secondary_dominant(grid, column, row);
        let (seven_diminished, five_of_seven) = self.leading_tone(key);

        let set = ChordSet {
            key: key.trim().to_string(),
            one: cell(PRIMARY_ROWS[0]),
            two: cell(PRIMARY_ROWS[1]),
            three: cell(PRIMARY_ROWS[2]),
            four: cell(PRIMARY_ROWS[3]),
            five: cell(PRIMARY_ROWS[4]),
            six: cell(PRIMARY_ROWS[5]),
            flat_three: cell(FLAT_THREE_ROW),
            flat_four: cell(FLAT_FOUR_ROW),
            flat_six: cell(FLAT_SIX_ROW),
            flat_seven: cell(FLAT_SEVEN_ROW),
            five_of_one: dominant(PRIMARY_ROWS[0]),
            five_of_two: dominant(PRIMARY_ROWS[1]),
            five_of_three: dominant(PRIMARY_ROWS[2]),
            five_of_four: dominant(PRIMARY_ROWS[3]),
            five_of_five: dominant(PRIMARY_ROWS[4]),
            five_of_six: dominant(PRIMARY_ROWS[5]),
            seven_diminished,
            five_of_seven,
        };

        info!(
            key = %set.key,
            column,
            empty_slots = set.empty_slots(),
            "derived chord set"
        );
        Ok(set)
    }

    /// Resolve the secondary dominant of the chord at `theory_row` in `column`.
    ///
    /// root of the cell → column headed by that root → that column's V row →
    /// root of the V chord → `"<root>7"`. Any broken link gives `""`.
    pub fn secondary_dominant(&self, grid: &GridTable, column: usize, theory_row: usize) -> String {
        let source = grid.cell_at(theory_row, column);
        let root = root_token(source);
        if root.is_empty() {
            debug!(theory_row, column, cell = source, "no root in degree chord");
            return String::new();
        }

        let Some(target) = grid.find_column_by_root(&root) else {
            debug!(theory_row, root = %root, "no column headed by degree root");
            return String::new();
        };

        let dominant_root = root_token(grid.cell_at(DOMINANT_ROW, target));
        if dominant_root.is_empty() {
            debug!(theory_row, target, "matched column has no V chord");
            return String::new();
        }
        format!("{}7", dominant_root)
    }

    /// vii° and V/vii° by transposition: down a semitone for the leading tone,
    /// then up a perfect fifth for its dominant. Empty if the key is not a note name.
    pub fn leading_tone(&self, key: &str) -> (String, String) {
        let key = key.trim();
        let prefer_flats = self.config.prefers_flats(key);

        let Some(leading) = pitch::transpose(key, -1, prefer_flats) else {
            debug!(key, "key is not a note name; skipping leading-tone chords");
            return (String::new(), String::new());
        };
        let dominant = pitch::transpose(leading, PERFECT_FIFTH, prefer_flats).unwrap_or_default();

        (
            format!("{}{}", leading, ChordQuality::Diminished.suffix()),
            format!("{}7", dominant),
        )
    }
}
