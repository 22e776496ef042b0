//! Treatment recommendation rules.
//!
//! Rules are evaluated in a fixed order and the first match wins:
//!
//! 1. Necrotic pulp or irreversible pulpitis: root canal therapy or extraction.
//! 2. Previously treated tooth with a radiolucency and apical signs: retreatment.
//! 3. Probing detail mentions a depth token from `5` to `12`: open and medicate.
//! 4. Reversible pulpitis: temporary crown, caries removal or re-evaluation.
//! 5. Otherwise no specific recommendation.
//!
//! Rule 3 (and the depth check inside rule 4) matches the probing *text* lexically rather than
//! parsing a number, so `"15mm"` matches because it contains `5`, while `"3mm"` does not.

use crate::constants::AMBIGUITY_NOTICE;
use crate::diagnosis::{PeriapicalDiagnosis, PulpalDiagnosis};
use crate::record::SymptomRecord;
use crate::vocabulary::PeriapicalSymptom;
use serde::Serialize;

/// Depth tokens that trigger "open and medicate".
const DEEP_PROBING_TOKENS: [&str; 8] = ["5", "6", "7", "8", "9", "10", "11", "12"];

/// Depth tokens that, with a positive bite stick, suggest a temporary crown.
const MODERATE_PROBING_TOKENS: [&str; 2] = ["4", "5"];

/// The recommendation issued for a case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Recommendation {
    RootCanalOrExtraction,
    RetreatmentSurgeryOrExtraction,
    OpenAndMedicate,
    TemporaryCrown,
    CariesRemoval,
    Reevaluate,
    NoSpecificTreatment,
    /// Findings are inconsistent; no treatment is suggested until the tooth is re-tested.
    WithheldForAmbiguity,
}

impl Recommendation {
    pub fn text(self) -> &'static str {
        match self {
            Recommendation::RootCanalOrExtraction => {
                "Root canal therapy or extraction (with or without replacement)"
            }
            Recommendation::RetreatmentSurgeryOrExtraction => {
                "Endodontic retreatment, apical surgery, or extraction (with or without replacement)"
            }
            Recommendation::OpenAndMedicate => {
                "Open and medicate the tooth to see if symptoms resolve or extraction (with or without replacement)"
            }
            Recommendation::TemporaryCrown => "Place temporary crown and re-evaluate in 4–6 weeks",
            Recommendation::CariesRemoval => "Caries removal or re-evaluate in 4–6 weeks",
            Recommendation::Reevaluate => "Re-evaluate in 4–6 weeks",
            Recommendation::NoSpecificTreatment => {
                "No specific treatment recommendation based on current findings."
            }
            Recommendation::WithheldForAmbiguity => AMBIGUITY_NOTICE,
        }
    }

    /// True when an actual treatment was suggested.
    pub fn is_actionable(self) -> bool {
        !matches!(
            self,
            Recommendation::NoSpecificTreatment | Recommendation::WithheldForAmbiguity
        )
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

impl Serialize for Recommendation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.text())
    }
}

/// Everything the treatment rules look at, with the derived flags already computed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreatmentInputs<'a> {
    pub pulpal: PulpalDiagnosis,
    pub periapical: &'a [PeriapicalDiagnosis],
    pub caries: bool,
    pub bite_stick: bool,
    pub probing_detail: &'a str,
    /// Pulpal diagnosis names a previously treated tooth or a necrotic pulp.
    pub previously_treated: bool,
    /// A radiolucency was reported or asymptomatic apical periodontitis was diagnosed.
    pub radiolucency_present: bool,
    /// Biting, percussion or palpation tenderness was reported.
    pub periapical_tenderness: bool,
}

impl<'a> TreatmentInputs<'a> {
    /// Derives the rule inputs from a record and the diagnoses already made for it.
    pub fn derive(
        record: &'a SymptomRecord,
        pulpal: PulpalDiagnosis,
        periapical: &'a [PeriapicalDiagnosis],
    ) -> Self {
        let asymptomatic_periodontitis =
            periapical.contains(&PeriapicalDiagnosis::AsymptomaticApicalPeriodontitis);

        Self {
            pulpal,
            periapical,
            caries: record.additional.caries.present,
            bite_stick: record.additional.bite_stick.present,
            probing_detail: &record.additional.probing.detail,
            previously_treated: pulpal.includes_previous_treatment(),
            radiolucency_present: record
                .has_periapical(PeriapicalSymptom::Radiolucency)
                || asymptomatic_periodontitis,
            periapical_tenderness: record.periapical.iter().any(|s| s.is_tenderness()),
        }
    }
}

/// Applies the treatment rules in order and returns the first match.
pub fn recommend(inputs: &TreatmentInputs<'_>) -> Recommendation {
    let pulpal = inputs.pulpal;

    if pulpal.includes_necrosis() || pulpal.includes_irreversible_pulpitis() {
        return Recommendation::RootCanalOrExtraction;
    }

    let asymptomatic_periodontitis = inputs
        .periapical
        .contains(&PeriapicalDiagnosis::AsymptomaticApicalPeriodontitis);
    if inputs.previously_treated
        && inputs.radiolucency_present
        && (asymptomatic_periodontitis || inputs.periapical_tenderness)
    {
        return Recommendation::RetreatmentSurgeryOrExtraction;
    }

    if mentions_any(inputs.probing_detail, &DEEP_PROBING_TOKENS) {
        return Recommendation::OpenAndMedicate;
    }

    if pulpal == PulpalDiagnosis::ReversiblePulpitis {
        if mentions_any(inputs.probing_detail, &MODERATE_PROBING_TOKENS) && inputs.bite_stick {
            return Recommendation::TemporaryCrown;
        }
        return if inputs.caries {
            Recommendation::CariesRemoval
        } else {
            Recommendation::Reevaluate
        };
    }

    Recommendation::NoSpecificTreatment
}

fn mentions_any(text: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|token| text.contains(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(pulpal: PulpalDiagnosis) -> TreatmentInputs<'static> {
        TreatmentInputs {
            pulpal,
            periapical: &[],
            caries: false,
            bite_stick: false,
            probing_detail: "",
            previously_treated: false,
            radiolucency_present: false,
            periapical_tenderness: false,
        }
    }

    #[test]
    fn necrosis_and_irreversible_pulpitis_need_root_canal() {
        for pulpal in [
            PulpalDiagnosis::SymptomaticIrreversiblePulpitis,
            PulpalDiagnosis::NecroticOrPreviouslyTreated,
            PulpalDiagnosis::NeedMoreInformation,
        ] {
            assert_eq!(
                recommend(&inputs(pulpal)),
                Recommendation::RootCanalOrExtraction,
                "{pulpal}"
            );
        }
    }

    #[test]
    fn retreatment_requires_all_three_conditions() {
        let mut i = inputs(PulpalDiagnosis::NotDetermined);
        i.previously_treated = true;
        i.radiolucency_present = true;
        i.periapical_tenderness = true;
        assert_eq!(recommend(&i), Recommendation::RetreatmentSurgeryOrExtraction);

        i.periapical_tenderness = false;
        assert_eq!(recommend(&i), Recommendation::NoSpecificTreatment);

        i.periapical = &[PeriapicalDiagnosis::AsymptomaticApicalPeriodontitis];
        assert_eq!(recommend(&i), Recommendation::RetreatmentSurgeryOrExtraction);

        i.radiolucency_present = false;
        assert_eq!(recommend(&i), Recommendation::NoSpecificTreatment);
    }

    #[test]
    fn probing_detail_is_matched_lexically() {
        let mut i = inputs(PulpalDiagnosis::NotDetermined);

        i.probing_detail = "15mm";
        assert_eq!(recommend(&i), Recommendation::OpenAndMedicate);

        i.probing_detail = "8mm buccal pocket";
        assert_eq!(recommend(&i), Recommendation::OpenAndMedicate);

        i.probing_detail = "3mm";
        assert_eq!(recommend(&i), Recommendation::NoSpecificTreatment);

        i.probing_detail = "1";
        assert_eq!(recommend(&i), Recommendation::NoSpecificTreatment);
    }

    #[test]
    fn reversible_pulpitis_branches() {
        let mut i = inputs(PulpalDiagnosis::ReversiblePulpitis);
        assert_eq!(recommend(&i), Recommendation::Reevaluate);

        i.caries = true;
        assert_eq!(recommend(&i), Recommendation::CariesRemoval);

        i.probing_detail = "4mm distal";
        assert_eq!(recommend(&i), Recommendation::CariesRemoval);

        i.bite_stick = true;
        assert_eq!(recommend(&i), Recommendation::TemporaryCrown);
    }

    #[test]
    fn possible_reversible_pulpitis_is_not_reversible_pulpitis() {
        let mut i = inputs(PulpalDiagnosis::PossibleReversiblePulpitis);
        i.caries = true;
        assert_eq!(recommend(&i), Recommendation::NoSpecificTreatment);
    }

    #[test]
    fn withheld_recommendation_carries_notice() {
        assert_eq!(Recommendation::WithheldForAmbiguity.text(), AMBIGUITY_NOTICE);
        assert!(!Recommendation::WithheldForAmbiguity.is_actionable());
        assert!(Recommendation::TemporaryCrown.is_actionable());
    }
}
