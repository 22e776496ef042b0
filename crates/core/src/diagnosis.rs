//! Diagnosis labels produced by the engine.
//!
//! Diagnoses are modelled as enums; their display labels are fixed clinical wording and are what
//! gets serialised. The one place where label *text* still matters is the ambiguity gate, which
//! classifies the pulpal label by the category patterns it contains (see [`PulpalCategory`]).

use crate::constants::{NOT_DETERMINED, PERIAPICAL_SEPARATOR};
use serde::Serialize;

/// Classification of pulp health. Exactly one is produced per evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PulpalDiagnosis {
    SymptomaticIrreversiblePulpitis,
    ReversiblePulpitis,
    PossibleReversiblePulpitis,
    NecroticOrPreviouslyTreated,
    /// No thermal sensitivity at all: several conditions remain possible.
    NeedMoreInformation,
    NotDetermined,
}

impl PulpalDiagnosis {
    pub fn label(self) -> &'static str {
        match self {
            PulpalDiagnosis::SymptomaticIrreversiblePulpitis => "Symptomatic irreversible pulpitis",
            PulpalDiagnosis::ReversiblePulpitis => "Reversible pulpitis",
            PulpalDiagnosis::PossibleReversiblePulpitis => "Possible reversible pulpitis",
            PulpalDiagnosis::NecroticOrPreviouslyTreated => "Necrotic pulp or previously treated",
            PulpalDiagnosis::NeedMoreInformation => {
                "Normal pulp / Asymptomatic irreversible pulpitis / Previously treated / Necrotic pulp (need more info)"
            }
            PulpalDiagnosis::NotDetermined => NOT_DETERMINED,
        }
    }

    /// The label may name a necrotic pulp.
    pub fn includes_necrosis(self) -> bool {
        matches!(
            self,
            PulpalDiagnosis::NecroticOrPreviouslyTreated | PulpalDiagnosis::NeedMoreInformation
        )
    }

    /// The label may name an irreversibly inflamed pulp, symptomatic or not.
    pub fn includes_irreversible_pulpitis(self) -> bool {
        matches!(
            self,
            PulpalDiagnosis::SymptomaticIrreversiblePulpitis | PulpalDiagnosis::NeedMoreInformation
        )
    }

    /// The label may name a tooth that already had root canal treatment, or a necrotic pulp.
    pub fn includes_previous_treatment(self) -> bool {
        matches!(
            self,
            PulpalDiagnosis::NecroticOrPreviouslyTreated | PulpalDiagnosis::NeedMoreInformation
        )
    }

    /// Every category tag whose pattern occurs in this diagnosis' label.
    pub fn categories(self) -> Vec<PulpalCategory> {
        PulpalCategory::matching(self.label())
    }
}

impl std::fmt::Display for PulpalDiagnosis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for PulpalDiagnosis {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

/// Classification of the tissues around the root tip. Zero or more apply at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PeriapicalDiagnosis {
    SymptomaticApicalPeriodontitis,
    AcuteApicalAbscess,
    ChronicApicalAbscess,
    AsymptomaticApicalPeriodontitis,
}

impl PeriapicalDiagnosis {
    pub fn label(self) -> &'static str {
        match self {
            PeriapicalDiagnosis::SymptomaticApicalPeriodontitis => {
                "Symptomatic apical periodontitis"
            }
            PeriapicalDiagnosis::AcuteApicalAbscess => "Acute apical abscess (Necrotic pulp required)",
            PeriapicalDiagnosis::ChronicApicalAbscess => {
                "Chronic apical abscess (Diff: perio abscess or osteosarcoma, biopsy req)"
            }
            PeriapicalDiagnosis::AsymptomaticApicalPeriodontitis => {
                "Asymptomatic apical periodontitis"
            }
        }
    }
}

impl std::fmt::Display for PeriapicalDiagnosis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for PeriapicalDiagnosis {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

/// Renders a periapical diagnosis list on one line, or "Not determined" when empty.
pub fn periapical_display(diagnoses: &[PeriapicalDiagnosis]) -> String {
    if diagnoses.is_empty() {
        return NOT_DETERMINED.to_owned();
    }
    diagnoses
        .iter()
        .map(|d| d.label())
        .collect::<Vec<_>>()
        .join(PERIAPICAL_SEPARATOR)
}

/// Category tags used by the ambiguity gate.
///
/// A pulpal label is classified by case-sensitive substring matching against each tag's
/// patterns. A label that matches no pattern has no category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PulpalCategory {
    SymptomaticIrreversible,
    Reversible,
    PossibleReversible,
    NecroticOrPreviouslyTreated,
}

impl PulpalCategory {
    pub const ALL: [PulpalCategory; 4] = [
        PulpalCategory::SymptomaticIrreversible,
        PulpalCategory::Reversible,
        PulpalCategory::PossibleReversible,
        PulpalCategory::NecroticOrPreviouslyTreated,
    ];

    fn patterns(self) -> &'static [&'static str] {
        match self {
            PulpalCategory::SymptomaticIrreversible => &["Symptomatic irreversible pulpitis"],
            PulpalCategory::Reversible => &["Reversible pulpitis"],
            PulpalCategory::PossibleReversible => &["Possible reversible pulpitis"],
            PulpalCategory::NecroticOrPreviouslyTreated => &["Necrotic pulp", "previously treated"],
        }
    }

    /// Returns every category whose pattern occurs in `label`, in declaration order.
    pub fn matching(label: &str) -> Vec<PulpalCategory> {
        PulpalCategory::ALL
            .into_iter()
            .filter(|category| category.patterns().iter().any(|p| label.contains(p)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_determined_label_matches_exactly_one_category() {
        let cases = [
            (
                PulpalDiagnosis::SymptomaticIrreversiblePulpitis,
                PulpalCategory::SymptomaticIrreversible,
            ),
            (PulpalDiagnosis::ReversiblePulpitis, PulpalCategory::Reversible),
            (
                PulpalDiagnosis::PossibleReversiblePulpitis,
                PulpalCategory::PossibleReversible,
            ),
            (
                PulpalDiagnosis::NecroticOrPreviouslyTreated,
                PulpalCategory::NecroticOrPreviouslyTreated,
            ),
            (
                PulpalDiagnosis::NeedMoreInformation,
                PulpalCategory::NecroticOrPreviouslyTreated,
            ),
        ];

        for (diagnosis, expected) in cases {
            assert_eq!(diagnosis.categories(), vec![expected], "{diagnosis}");
        }
    }

    #[test]
    fn not_determined_has_no_category() {
        assert!(PulpalDiagnosis::NotDetermined.categories().is_empty());
    }

    #[test]
    fn overlapping_text_matches_several_categories() {
        let label = "Reversible pulpitis / Necrotic pulp";
        assert_eq!(
            PulpalCategory::matching(label),
            vec![
                PulpalCategory::Reversible,
                PulpalCategory::NecroticOrPreviouslyTreated
            ]
        );
    }

    #[test]
    fn periapical_display_joins_in_order() {
        assert_eq!(periapical_display(&[]), "Not determined");
        assert_eq!(
            periapical_display(&[
                PeriapicalDiagnosis::AcuteApicalAbscess,
                PeriapicalDiagnosis::ChronicApicalAbscess
            ]),
            "Acute apical abscess (Necrotic pulp required), Chronic apical abscess (Diff: perio abscess or osteosarcoma, biopsy req)"
        );
    }

    #[test]
    fn compound_label_covers_necrosis_and_irreversible_pulpitis() {
        let d = PulpalDiagnosis::NeedMoreInformation;
        assert!(d.label().contains("Necrotic pulp"));
        assert!(d.label().contains("Asymptomatic irreversible pulpitis"));
        assert!(d.includes_necrosis());
        assert!(d.includes_irreversible_pulpitis());
    }
}
