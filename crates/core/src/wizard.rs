//! The questionnaire as a forward-only state machine.
//!
//! The questionnaire walks through six steps:
//!
//! ```text
//! ToothSelect -> ChiefComplaint -> Pulpal -> Periapical -> Additional -> Summary
//! ```
//!
//! Each step is a type-state marker on [`Wizard`], so answering out of order does not compile:
//! every transition consumes the wizard and returns it in the next state. [`Wizard::reset`] is
//! available in every state and discards all collected answers.
//!
//! The wizard only collects answers. Diagnosis happens once, when the additional tests are
//! submitted, by handing the completed [`SymptomRecord`] to [`crate::evaluate`].

use crate::engine::{evaluate, red_flag, DiagnosisReport, RedFlag};
use crate::record::{normalise_complaint, AdditionalFindings, SymptomRecord};
use crate::summary::CaseOverview;
use crate::vocabulary::{PeriapicalSymptom, PulpalSymptom};
use crate::{DiagnosisError, DiagnosisResult};
use endo_types::ToothReference;
use std::collections::BTreeSet;

// ============================================================================
// STEPS
// ============================================================================

/// Named questionnaire steps, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    ToothSelect,
    ChiefComplaint,
    Pulpal,
    Periapical,
    Additional,
    Summary,
}

impl WizardStep {
    pub const ALL: [WizardStep; 6] = [
        WizardStep::ToothSelect,
        WizardStep::ChiefComplaint,
        WizardStep::Pulpal,
        WizardStep::Periapical,
        WizardStep::Additional,
        WizardStep::Summary,
    ];

    /// The step that follows this one. `Summary` is terminal.
    pub fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::ToothSelect => Some(WizardStep::ChiefComplaint),
            WizardStep::ChiefComplaint => Some(WizardStep::Pulpal),
            WizardStep::Pulpal => Some(WizardStep::Periapical),
            WizardStep::Periapical => Some(WizardStep::Additional),
            WizardStep::Additional => Some(WizardStep::Summary),
            WizardStep::Summary => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::ToothSelect => "Select tooth to evaluate",
            WizardStep::ChiefComplaint => "Chief Complaint",
            WizardStep::Pulpal => "Pulpal Symptoms",
            WizardStep::Periapical => "Periapical Symptoms",
            WizardStep::Additional => "Additional Testing",
            WizardStep::Summary => "Case Overview & Diagnosis",
        }
    }

    /// Short page name, as used in URLs and logs.
    pub fn page_name(self) -> &'static str {
        match self {
            WizardStep::ToothSelect => "tooth",
            WizardStep::ChiefComplaint => "chief",
            WizardStep::Pulpal => "pulpal",
            WizardStep::Periapical => "periapical",
            WizardStep::Additional => "additional",
            WizardStep::Summary => "summary",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

impl std::str::FromStr for WizardStep {
    type Err = DiagnosisError;

    fn from_str(s: &str) -> DiagnosisResult<Self> {
        WizardStep::ALL
            .into_iter()
            .find(|step| step.page_name() == s.trim())
            .ok_or_else(|| DiagnosisError::InvalidInput(format!("unknown wizard step: {s}")))
    }
}

// ============================================================================
// TYPE-STATE MARKERS
// ============================================================================

/// Marker: no tooth selected yet.
#[derive(Clone, Copy, Debug)]
pub struct ToothSelect;

/// Marker: tooth selected, waiting for the chief complaint.
#[derive(Clone, Debug)]
pub struct ChiefComplaint {
    tooth: ToothReference,
}

/// Marker: waiting for pulpal symptoms.
#[derive(Clone, Debug)]
pub struct Pulpal {
    tooth: ToothReference,
}

/// Marker: waiting for periapical symptoms.
#[derive(Clone, Debug)]
pub struct Periapical {
    tooth: ToothReference,
}

/// Marker: waiting for additional test results.
///
/// Carries the red flag raised when the periapical answers were submitted.
#[derive(Clone, Debug)]
pub struct Additional {
    tooth: ToothReference,
    red_flag: RedFlag,
}

/// Marker: all answers collected and evaluated.
#[derive(Clone, Debug)]
pub struct Summary {
    tooth: ToothReference,
    report: DiagnosisReport,
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::ToothSelect {}
    impl Sealed for super::ChiefComplaint {}
    impl Sealed for super::Pulpal {}
    impl Sealed for super::Periapical {}
    impl Sealed for super::Additional {}
    impl Sealed for super::Summary {}
}

/// Implemented by every wizard state marker.
pub trait WizardState: sealed::Sealed {
    const STEP: WizardStep;

    fn tooth(&self) -> Option<&ToothReference>;
}

impl WizardState for ToothSelect {
    const STEP: WizardStep = WizardStep::ToothSelect;

    fn tooth(&self) -> Option<&ToothReference> {
        None
    }
}

macro_rules! with_tooth {
    ($marker:ty, $step:expr) => {
        impl WizardState for $marker {
            const STEP: WizardStep = $step;

            fn tooth(&self) -> Option<&ToothReference> {
                Some(&self.tooth)
            }
        }
    };
}

with_tooth!(ChiefComplaint, WizardStep::ChiefComplaint);
with_tooth!(Pulpal, WizardStep::Pulpal);
with_tooth!(Periapical, WizardStep::Periapical);
with_tooth!(Additional, WizardStep::Additional);
with_tooth!(Summary, WizardStep::Summary);

// ============================================================================
// WIZARD
// ============================================================================

/// A diagnostic session in progress.
///
/// Generic parameter `S` is the current step's marker type.
#[derive(Clone, Debug)]
pub struct Wizard<S> {
    record: SymptomRecord,
    state: S,
}

impl Wizard<ToothSelect> {
    /// Starts a new session at tooth selection.
    pub fn new() -> Self {
        Self {
            record: SymptomRecord::default(),
            state: ToothSelect,
        }
    }

    pub fn select_tooth(self, tooth: ToothReference) -> Wizard<ChiefComplaint> {
        tracing::debug!(tooth = %tooth, kind = %tooth.kind(), "tooth selected");
        self.advance(ChiefComplaint { tooth })
    }
}

impl Default for Wizard<ToothSelect> {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard<ChiefComplaint> {
    /// Records the chief complaint. Blank text is treated as not provided.
    pub fn submit_chief_complaint(mut self, complaint: Option<String>) -> Wizard<Pulpal> {
        self.record.chief_complaint = normalise_complaint(complaint);
        let tooth = self.state.tooth.clone();
        self.advance(Pulpal { tooth })
    }
}

impl Wizard<Pulpal> {
    pub fn submit_pulpal(mut self, symptoms: BTreeSet<PulpalSymptom>) -> Wizard<Periapical> {
        self.record.pulpal = symptoms;
        let tooth = self.state.tooth.clone();
        self.advance(Periapical { tooth })
    }
}

impl Wizard<Periapical> {
    /// The red flag the given periapical answers would raise against the pulpal answers
    /// already recorded. Advisory only.
    pub fn red_flag_preview(&self, periapical: &BTreeSet<PeriapicalSymptom>) -> RedFlag {
        red_flag(&self.record.pulpal, periapical)
    }

    pub fn submit_periapical(
        mut self,
        symptoms: BTreeSet<PeriapicalSymptom>,
    ) -> Wizard<Additional> {
        let red_flag = self.red_flag_preview(&symptoms);
        if red_flag.raised {
            tracing::warn!(tooth = %self.state.tooth, "red flag raised at periapical step");
        }
        self.record.periapical = symptoms;
        let tooth = self.state.tooth.clone();
        self.advance(Additional { tooth, red_flag })
    }
}

impl Wizard<Additional> {
    /// The red flag raised when the periapical answers were submitted.
    pub fn periapical_red_flag(&self) -> &RedFlag {
        &self.state.red_flag
    }

    /// Records the additional tests and evaluates the completed record.
    pub fn submit_additional(mut self, additional: AdditionalFindings) -> Wizard<Summary> {
        self.record.additional = additional;
        let report = evaluate(&self.record);
        let tooth = self.state.tooth.clone();
        self.advance(Summary { tooth, report })
    }
}

impl Wizard<Summary> {
    pub fn report(&self) -> &DiagnosisReport {
        &self.state.report
    }

    pub fn overview(&self) -> CaseOverview {
        CaseOverview::new(&self.state.tooth, &self.record, &self.state.report)
    }
}

impl<S: WizardState> Wizard<S> {
    pub fn step(&self) -> WizardStep {
        S::STEP
    }

    pub fn tooth(&self) -> Option<&ToothReference> {
        self.state.tooth()
    }

    /// The answers collected so far.
    pub fn record(&self) -> &SymptomRecord {
        &self.record
    }

    /// Discards every answer and returns to tooth selection.
    pub fn reset(self) -> Wizard<ToothSelect> {
        tracing::debug!(from = S::STEP.page_name(), "wizard reset");
        Wizard::new()
    }

    fn advance<T: WizardState>(self, state: T) -> Wizard<T> {
        debug_assert_eq!(S::STEP.next(), Some(T::STEP));
        tracing::debug!(
            from = S::STEP.page_name(),
            to = T::STEP.page_name(),
            "wizard step"
        );
        Wizard {
            record: self.record,
            state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Finding;
    use crate::treatment::Recommendation;

    fn tooth() -> ToothReference {
        ToothReference::permanent(14).expect("14 is a permanent tooth")
    }

    #[test]
    fn steps_only_move_forward() {
        let mut step = WizardStep::ToothSelect;
        let mut visited = vec![step];
        while let Some(next) = step.next() {
            assert!(next > step);
            visited.push(next);
            step = next;
        }
        assert_eq!(visited, WizardStep::ALL.to_vec());
    }

    #[test]
    fn parses_page_names() {
        assert_eq!("chief".parse::<WizardStep>().expect("chief"), WizardStep::ChiefComplaint);
        assert_eq!("summary".parse::<WizardStep>().expect("summary"), WizardStep::Summary);
        let err = "review".parse::<WizardStep>().expect_err("unknown page");
        assert!(matches!(err, DiagnosisError::InvalidInput(msg) if msg.contains("review")));
    }

    #[test]
    fn full_session_produces_report() {
        let wizard = Wizard::new();
        assert_eq!(wizard.step(), WizardStep::ToothSelect);
        assert!(wizard.tooth().is_none());

        let wizard = wizard.select_tooth(tooth());
        assert_eq!(wizard.step(), WizardStep::ChiefComplaint);
        assert_eq!(wizard.tooth().map(|t| t.label()), Some("14"));

        let wizard = wizard.submit_chief_complaint(Some("Lingering pain with cold drinks".into()));
        let wizard = wizard.submit_pulpal([PulpalSymptom::ColdLingers].into_iter().collect());
        let wizard = wizard.submit_periapical([PeriapicalSymptom::Biting].into_iter().collect());
        assert!(!wizard.periapical_red_flag().raised);

        let wizard = wizard.submit_additional(AdditionalFindings::default());
        assert_eq!(wizard.step(), WizardStep::Summary);
        assert_eq!(
            wizard.report().treatment,
            Recommendation::RootCanalOrExtraction
        );

        assert_eq!(wizard.tooth().map(|t| t.label()), Some("14"));
        assert_eq!(
            wizard.record().chief_complaint.as_deref(),
            Some("Lingering pain with cold drinks")
        );
        assert_eq!(wizard.report(), &evaluate(wizard.record()));
    }

    #[test]
    fn periapical_and_summary_red_flags_agree() {
        let wizard = Wizard::new()
            .select_tooth(tooth())
            .submit_chief_complaint(None)
            .submit_pulpal([PulpalSymptom::Sweets].into_iter().collect());

        let periapical: BTreeSet<_> = [PeriapicalSymptom::FacialSwelling].into_iter().collect();
        let preview = wizard.red_flag_preview(&periapical);
        assert!(preview.raised);

        let wizard = wizard.submit_periapical(periapical);
        assert_eq!(wizard.periapical_red_flag(), &preview);

        let wizard = wizard.submit_additional(AdditionalFindings {
            bite_stick: Finding::positive("MB cusp"),
            ..Default::default()
        });
        assert_eq!(wizard.report().red_flag, preview);
        assert!(wizard.report().fracture_warning.raised);
    }

    #[test]
    fn blank_complaint_is_not_provided() {
        let wizard = Wizard::new()
            .select_tooth(tooth())
            .submit_chief_complaint(Some("  ".into()));
        assert!(wizard.record().chief_complaint.is_none());
    }

    #[test]
    fn reset_discards_answers_from_any_step() {
        let wizard = Wizard::new()
            .select_tooth(tooth())
            .submit_chief_complaint(Some("Swelling".into()))
            .submit_pulpal([PulpalSymptom::NoResponseToCold].into_iter().collect());
        let wizard = wizard.reset();
        assert_eq!(wizard.step(), WizardStep::ToothSelect);
        assert!(wizard.tooth().is_none());
        assert_eq!(wizard.record(), &SymptomRecord::default());

        let summary = Wizard::new()
            .select_tooth(tooth())
            .submit_chief_complaint(None)
            .submit_pulpal(BTreeSet::new())
            .submit_periapical(BTreeSet::new())
            .submit_additional(AdditionalFindings::default());
        let wizard = summary.reset();
        assert_eq!(wizard.record(), &SymptomRecord::default());
    }
}
