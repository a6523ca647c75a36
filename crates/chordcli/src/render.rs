//! Text rendering for terminal output.

use chordsmith::{ChordSet, MatchOutcome, MatchReport, SlotGroup};
use owo_colors::{OwoColorize, Style};
use std::fmt::Write;

/// Placeholder for an unfilled slot or an unparsable chord.
const EMPTY_SLOT: &str = "-";

pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    fn heading(&self, text: &str) -> String {
        self.paint(text, Style::new().bold())
    }

    fn chord(&self, text: &str) -> String {
        self.paint(text, Style::new().green())
    }

    fn dim(&self, text: &str) -> String {
        self.paint(text, Style::new().dimmed())
    }

    /// One section per slot group, one `label  chord` line per slot.
    pub fn chord_set(&self, set: &ChordSet) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} {}", self.heading("Key:"), self.chord(&set.key));

        let mut current: Option<SlotGroup> = None;
        for slot in set.labeled_slots() {
            if current != Some(slot.group) {
                let _ = writeln!(out, "\n{}", self.heading(slot.group.title()));
                current = Some(slot.group);
            }
            // Labels hold multi-byte glyphs, so pad by chars
            let pad = 8usize.saturating_sub(slot.label.chars().count());
            let value = if slot.value.is_empty() {
                self.dim(EMPTY_SLOT)
            } else {
                self.chord(slot.value)
            };
            let _ = writeln!(out, "  {}{}{}", slot.label, " ".repeat(pad), value);
        }
        out
    }

    pub fn match_outcome(&self, outcome: &MatchOutcome) -> String {
        match outcome {
            MatchOutcome::NoChords => "No chords provided\n".to_string(),
            MatchOutcome::Matched(report) => self.match_report(report),
        }
    }

    fn match_report(&self, report: &MatchReport) -> String {
        let mut out = String::new();
        let chords: Vec<String> = report
            .chords
            .iter()
            .map(|c| if c.is_empty() { self.dim(EMPTY_SLOT) } else { c.clone() })
            .collect();
        let _ = writeln!(out, "{} {}", self.heading("Chords:"), chords.join(" "));

        let _ = writeln!(out, "\n{}", self.heading("Key matches"));
        for result in &report.ranked {
            let _ = writeln!(
                out,
                "  {:<4}{:>4}%  {}",
                result.key,
                result.percent,
                self.dim(&format!("({} hit, {} near)", result.hit, result.near))
            );
        }

        match &report.best_key {
            Some(key) => {
                let _ = writeln!(out, "\n{} {}", self.heading("Best key:"), self.chord(key));
                let _ = writeln!(
                    out,
                    "{} {}",
                    self.heading("Roman numerals:"),
                    report.romanization.join(" ")
                );
            }
            None => {
                let _ = writeln!(out, "\n{} none of the candidate keys resolved", self.heading("Best key:"));
            }
        }

        if report.progressions.is_empty() {
            let _ = writeln!(out, "{} {}", self.heading("Progressions:"), self.dim("none"));
        } else {
            let _ = writeln!(
                out,
                "{} {}",
                self.heading("Progressions:"),
                report.progressions.join(", ")
            );
        }
        out
    }
}
