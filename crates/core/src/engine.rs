//! The Diagnosis Engine.
//!
//! [`evaluate`] is a pure, total function from a [`SymptomRecord`] to a [`DiagnosisReport`]:
//!
//! - **Pulpal diagnosis**: first matching rule wins, so exactly one label is produced.
//! - **Periapical diagnoses**: cumulative; every rule that holds contributes, in fixed order.
//! - **Red flag**: vital pulp responses reported alongside swelling or a sinus tract.
//! - **Fracture warning**: deep probing or a positive bite stick.
//! - **Ambiguity gate**: when more than one diagnosis applies the treatment recommendation is
//!   replaced by a re-test notice.
//!
//! The red-flag check is exposed on its own because the questionnaire also raises it as soon as
//! the periapical answers are entered; both call sites use [`red_flag`] so the outcome is always
//! identical.
//!
//! The engine holds no state. Calling [`evaluate`] twice on the same record yields equal reports.

use crate::constants::{FRACTURE_WARNING_MESSAGE, RED_FLAG_MESSAGE};
use crate::diagnosis::{periapical_display, PeriapicalDiagnosis, PulpalDiagnosis};
use crate::record::{AdditionalFindings, SymptomRecord};
use crate::treatment::{recommend, Recommendation, TreatmentInputs};
use crate::vocabulary::{PeriapicalSymptom, PulpalSymptom};
use serde::Serialize;
use std::collections::BTreeSet;

// ============================================================================
// REPORT TYPES
// ============================================================================

/// Advisory raised when pulp vitality contradicts signs of an abscess.
///
/// It never blocks the questionnaire and never changes the diagnoses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RedFlag {
    pub raised: bool,
    pub message: Option<String>,
}

impl RedFlag {
    fn from_condition(raised: bool) -> Self {
        Self {
            raised,
            message: raised.then(|| RED_FLAG_MESSAGE.to_owned()),
        }
    }
}

/// Warning raised when the additional tests suggest a cracked or fractured tooth.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FractureWarning {
    pub raised: bool,
    pub message: Option<String>,
}

impl FractureWarning {
    fn from_condition(raised: bool) -> Self {
        Self {
            raised,
            message: raised.then(|| FRACTURE_WARNING_MESSAGE.to_owned()),
        }
    }
}

/// Outcome of the ambiguity gate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Ambiguity {
    /// The pulpal label matched more than one category pattern.
    pub multiple_pulpal_categories: bool,
    /// More than one periapical diagnosis applies.
    pub multiple_periapical: bool,
}

impl Ambiguity {
    pub fn is_ambiguous(self) -> bool {
        self.multiple_pulpal_categories || self.multiple_periapical
    }
}

/// The engine's output for one record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosisReport {
    pub pulpal_diagnosis: PulpalDiagnosis,
    pub periapical_diagnoses: Vec<PeriapicalDiagnosis>,
    pub red_flag: RedFlag,
    pub fracture_warning: FractureWarning,
    pub ambiguity: Ambiguity,
    pub treatment: Recommendation,
}

impl DiagnosisReport {
    /// Periapical diagnoses on one line, or "Not determined".
    pub fn periapical_display(&self) -> String {
        periapical_display(&self.periapical_diagnoses)
    }

    /// The recommendation text, or the ambiguity notice when the gate suppressed it.
    pub fn treatment_recommendation(&self) -> &'static str {
        self.treatment.text()
    }

    pub fn is_ambiguous(&self) -> bool {
        self.ambiguity.is_ambiguous()
    }
}

// ============================================================================
// RULES
// ============================================================================

/// Pulpal diagnosis. The first matching rule wins.
pub fn pulpal_diagnosis(symptoms: &BTreeSet<PulpalSymptom>) -> PulpalDiagnosis {
    let has = |s: PulpalSymptom| symptoms.contains(&s);

    if symptoms.iter().any(|s| s.is_lingering()) {
        PulpalDiagnosis::SymptomaticIrreversiblePulpitis
    } else if has(PulpalSymptom::ColdResolvesQuickly) {
        PulpalDiagnosis::ReversiblePulpitis
    } else if has(PulpalSymptom::Sweets) {
        PulpalDiagnosis::PossibleReversiblePulpitis
    } else if has(PulpalSymptom::NoResponseToCold) {
        PulpalDiagnosis::NecroticOrPreviouslyTreated
    } else if has(PulpalSymptom::NoThermalSensitivity) {
        PulpalDiagnosis::NeedMoreInformation
    } else {
        PulpalDiagnosis::NotDetermined
    }
}

/// Periapical diagnoses. Every rule that holds contributes, in fixed order.
pub fn periapical_diagnoses(symptoms: &BTreeSet<PeriapicalSymptom>) -> Vec<PeriapicalDiagnosis> {
    let has = |s: PeriapicalSymptom| symptoms.contains(&s);
    let mut diagnoses = Vec::new();

    if symptoms.iter().any(|s| s.is_tenderness()) {
        diagnoses.push(PeriapicalDiagnosis::SymptomaticApicalPeriodontitis);
    }
    if has(PeriapicalSymptom::FacialSwelling) {
        diagnoses.push(PeriapicalDiagnosis::AcuteApicalAbscess);
    }
    if has(PeriapicalSymptom::SinusTract) {
        diagnoses.push(PeriapicalDiagnosis::ChronicApicalAbscess);
    }
    if has(PeriapicalSymptom::Radiolucency) {
        diagnoses.push(PeriapicalDiagnosis::AsymptomaticApicalPeriodontitis);
    }

    diagnoses
}

/// Red flag: swelling or a sinus tract together with any vital pulp response.
pub fn red_flag(
    pulpal: &BTreeSet<PulpalSymptom>,
    periapical: &BTreeSet<PeriapicalSymptom>,
) -> RedFlag {
    let abscess_signs = periapical.iter().any(|s| s.indicates_abscess());
    let vital_pulp = pulpal.iter().any(|s| s.indicates_vital_pulp());
    RedFlag::from_condition(abscess_signs && vital_pulp)
}

/// Fracture warning: positive probing or bite stick.
pub fn fracture_warning(additional: &AdditionalFindings) -> FractureWarning {
    FractureWarning::from_condition(additional.probing.present || additional.bite_stick.present)
}

/// Ambiguity gate.
///
/// The pulpal check classifies the chosen label by category pattern. With the current label set
/// every label matches at most one category.
pub fn assess_ambiguity(
    pulpal: PulpalDiagnosis,
    periapical: &[PeriapicalDiagnosis],
) -> Ambiguity {
    Ambiguity {
        multiple_pulpal_categories: pulpal.categories().len() > 1,
        multiple_periapical: periapical.len() > 1,
    }
}

/// Evaluates a complete symptom record.
pub fn evaluate(record: &SymptomRecord) -> DiagnosisReport {
    let pulpal_diagnosis = pulpal_diagnosis(&record.pulpal);
    let periapical_diagnoses = periapical_diagnoses(&record.periapical);
    let red_flag = red_flag(&record.pulpal, &record.periapical);
    let fracture_warning = fracture_warning(&record.additional);
    let ambiguity = assess_ambiguity(pulpal_diagnosis, &periapical_diagnoses);

    let treatment = if ambiguity.is_ambiguous() {
        Recommendation::WithheldForAmbiguity
    } else {
        recommend(&TreatmentInputs::derive(
            record,
            pulpal_diagnosis,
            &periapical_diagnoses,
        ))
    };

    tracing::debug!(
        pulpal = pulpal_diagnosis.label(),
        periapical = periapical_diagnoses.len(),
        red_flag = red_flag.raised,
        fracture_warning = fracture_warning.raised,
        ambiguous = ambiguity.is_ambiguous(),
        treatment = ?treatment,
        "evaluated symptom record"
    );

    DiagnosisReport {
        pulpal_diagnosis,
        periapical_diagnoses,
        red_flag,
        fracture_warning,
        ambiguity,
        treatment,
    }
}
