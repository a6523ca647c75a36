use serde::{Deserialize, Serialize};

/// Coarse chord quality used for matching. Sevenths, suspensions and added
/// tones collapse onto one of these three.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordQuality {
    #[default]
    Major,
    Minor,
    Diminished,
}

impl ChordQuality {
    /// Suffix for chord symbol display
    pub fn suffix(&self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Diminished => "°",
        }
    }
}

impl std::fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChordQuality::Major => write!(f, "major"),
            ChordQuality::Minor => write!(f, "minor"),
            ChordQuality::Diminished => write!(f, "diminished"),
        }
    }
}

/// Every chord derived for one key from a chord grid.
///
/// Fields are independently possibly empty: an empty string means the grid
/// had nothing at that position or a cross-reference could not be resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordSet {
    pub key: String,

    // Scale-degree chords as written in the grid
    pub one: String,
    pub two: String,
    pub three: String,
    pub four: String,
    pub five: String,
    pub six: String,

    // Modal interchange, also verbatim from the grid
    pub flat_three: String,
    pub flat_four: String,
    pub flat_six: String,
    pub flat_seven: String,

    // Secondary dominants resolved through the grid's V row
    pub five_of_one: String,
    pub five_of_two: String,
    pub five_of_three: String,
    pub five_of_four: String,
    pub five_of_five: String,
    pub five_of_six: String,

    // Leading tone, from pitch arithmetic on the key name
    pub seven_diminished: String,
    pub five_of_seven: String,
}

/// Display grouping for [`ChordSet::labeled_slots`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotGroup {
    Primary,
    SecondaryDominants,
    ModalInterchange,
    LeadingTone,
}

impl SlotGroup {
    pub fn title(&self) -> &'static str {
        match self {
            SlotGroup::Primary => "Diatonic",
            SlotGroup::SecondaryDominants => "Secondary Dominants",
            SlotGroup::ModalInterchange => "Modal Interchange",
            SlotGroup::LeadingTone => "Leading Tone",
        }
    }
}

/// One named output slot with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot<'a> {
    pub group: SlotGroup,
    pub label: &'static str,
    pub value: &'a str,
}

impl ChordSet {
    /// Named slots in display order, grouped the way a results view lays them out.
    pub fn labeled_slots(&self) -> Vec<Slot<'_>> {
        use SlotGroup::*;
        vec![
            slot(Primary, "I", &self.one),
            slot(Primary, "ii", &self.two),
            slot(Primary, "iii", &self.three),
            slot(Primary, "IV", &self.four),
            slot(Primary, "V", &self.five),
            slot(Primary, "vi", &self.six),
            slot(SecondaryDominants, "V/ I", &self.five_of_one),
            slot(SecondaryDominants, "V/ ii", &self.five_of_two),
            slot(SecondaryDominants, "V/ iii", &self.five_of_three),
            slot(SecondaryDominants, "V/ IV", &self.five_of_four),
            slot(SecondaryDominants, "V/ V", &self.five_of_five),
            slot(SecondaryDominants, "V/ vi", &self.five_of_six),
            slot(ModalInterchange, "♭III", &self.flat_three),
            slot(ModalInterchange, "♭IV", &self.flat_four),
            slot(ModalInterchange, "♭VI", &self.flat_six),
            slot(ModalInterchange, "♭VII", &self.flat_seven),
            slot(LeadingTone, "vii°", &self.seven_diminished),
            slot(LeadingTone, "V/ vii°", &self.five_of_seven),
        ]
    }

    /// Number of slots that ended up empty.
    pub fn empty_slots(&self) -> usize {
        self.labeled_slots()
            .iter()
            .filter(|s| s.value.is_empty())
            .count()
    }
}

fn slot<'a>(group: SlotGroup, label: &'static str, value: &'a str) -> Slot<'a> {
    Slot {
        group,
        label,
        value,
    }
}

/// How well a chord sequence fits one candidate key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMatchResult {
    pub key: String,
    /// Exact diatonic matches
    pub hit: usize,
    /// Secondary-dominant or borrowed-chord matches
    pub near: usize,
    /// Rounded 0–100 fit, near-hits weighted
    pub percent: u32,
}

/// Full outcome of matching a chord sequence against candidate keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    /// One symbol per input token, empty where the token did not parse
    pub chords: Vec<String>,
    /// Best first, truncated to the configured length
    pub ranked: Vec<KeyMatchResult>,
    pub best_key: Option<String>,
    /// Roman numeral per input chord in the best key, `?` when not diatonic
    pub romanization: Vec<String>,
    /// Names of the progressions found, in catalog order
    pub progressions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MatchOutcome {
    /// The input held no parsable chord.
    NoChords,
    Matched(MatchReport),
}

impl MatchOutcome {
    pub fn report(&self) -> Option<&MatchReport> {
        match self {
            MatchOutcome::NoChords => None,
            MatchOutcome::Matched(report) => Some(report),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_suffixes() {
        assert_eq!(ChordQuality::Major.suffix(), "");
        assert_eq!(ChordQuality::Minor.suffix(), "m");
        assert_eq!(ChordQuality::Diminished.suffix(), "°");
    }

    #[test]
    fn labeled_slots_cover_every_field() {
        let set = ChordSet {
            one: "C".into(),
            five_of_two: "A7".into(),
            flat_seven: "Bb".into(),
            seven_diminished: "B°".into(),
            ..Default::default()
        };
        let slots = set.labeled_slots();
        assert_eq!(slots.len(), 18);
        assert_eq!(slots[0].label, "I");
        assert_eq!(slots[0].value, "C");

        let v_of_ii = slots.iter().find(|s| s.label == "V/ ii").unwrap();
        assert_eq!(v_of_ii.group, SlotGroup::SecondaryDominants);
        assert_eq!(v_of_ii.value, "A7");

        let flat_seven = slots.iter().find(|s| s.label == "♭VII").unwrap();
        assert_eq!(flat_seven.value, "Bb");
        assert_eq!(set.empty_slots(), 14);
    }

    #[test]
    fn no_chords_serializes_with_tag() {
        let json = serde_json::to_string(&MatchOutcome::NoChords).unwrap();
        assert_eq!(json, r#"{"outcome":"no_chords"}"#);
    }
}
