//! The clinical answers collected during one diagnostic session.
//!
//! A [`SymptomRecord`] is assembled by the caller (the wizard, a case file, an API request) and
//! then handed to [`crate::evaluate`] as a complete, immutable value. `Default` produces a fully
//! populated empty record, so there is no such thing as a "missing" field by the time the engine
//! sees it.

use crate::vocabulary::{PeriapicalSymptom, PulpalSymptom};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A yes/no test result with an optional free-text detail.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Finding {
    pub present: bool,
    pub detail: String,
}

impl Finding {
    pub fn new(present: bool, detail: impl Into<String>) -> Self {
        Self {
            present,
            detail: detail.into(),
        }
    }

    /// A positive finding with the given detail.
    pub fn positive(detail: impl Into<String>) -> Self {
        Self::new(true, detail)
    }

    /// Returns the detail when the finding is present and the detail is not blank.
    pub fn noted_detail(&self) -> Option<&str> {
        let detail = self.detail.trim();
        (self.present && !detail.is_empty()).then_some(self.detail.as_str())
    }
}

/// Results of the additional tests performed after the symptom questions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdditionalFindings {
    /// Deep or narrow probing depths (detail e.g. "8mm buccal pocket").
    pub probing: Finding,
    /// Bite stick test (detail names the cusp(s)).
    pub bite_stick: Finding,
    /// Caries present (detail names the location).
    pub caries: Finding,
    /// Recent dental work (detail says when).
    pub recent_work: Finding,
    /// Discomfort with the muscles of mastication (detail names muscles or side).
    pub mastication: Finding,
    /// Free-text occlusion description.
    pub occlusion: String,
}

/// The accumulated answers for one tooth.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SymptomRecord {
    pub chief_complaint: Option<String>,
    pub pulpal: BTreeSet<PulpalSymptom>,
    pub periapical: BTreeSet<PeriapicalSymptom>,
    pub additional: AdditionalFindings,
}

impl SymptomRecord {
    /// An empty record.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chief_complaint(mut self, complaint: Option<String>) -> Self {
        self.chief_complaint = normalise_complaint(complaint);
        self
    }

    pub fn with_pulpal(mut self, symptoms: impl IntoIterator<Item = PulpalSymptom>) -> Self {
        self.pulpal.extend(symptoms);
        self
    }

    pub fn with_periapical(
        mut self,
        symptoms: impl IntoIterator<Item = PeriapicalSymptom>,
    ) -> Self {
        self.periapical.extend(symptoms);
        self
    }

    pub fn with_additional(mut self, additional: AdditionalFindings) -> Self {
        self.additional = additional;
        self
    }

    pub fn has_pulpal(&self, symptom: PulpalSymptom) -> bool {
        self.pulpal.contains(&symptom)
    }

    pub fn has_periapical(&self, symptom: PeriapicalSymptom) -> bool {
        self.periapical.contains(&symptom)
    }
}

/// Blank complaints are recorded as "not provided".
pub(crate) fn normalise_complaint(complaint: Option<String>) -> Option<String> {
    complaint.filter(|c| !c.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_is_empty() {
        let record = SymptomRecord::default();
        assert!(record.chief_complaint.is_none());
        assert!(record.pulpal.is_empty());
        assert!(record.periapical.is_empty());
        assert!(!record.additional.probing.present);
        assert!(record.additional.occlusion.is_empty());
    }

    #[test]
    fn symptom_sets_ignore_duplicates_and_order() {
        let a = SymptomRecord::new().with_pulpal([
            PulpalSymptom::Sweets,
            PulpalSymptom::ColdLingers,
            PulpalSymptom::Sweets,
        ]);
        let b = SymptomRecord::new().with_pulpal([PulpalSymptom::ColdLingers, PulpalSymptom::Sweets]);
        assert_eq!(a, b);
        assert_eq!(a.pulpal.len(), 2);
        assert!(a.has_pulpal(PulpalSymptom::Sweets));
        assert!(!a.has_periapical(PeriapicalSymptom::Biting));
    }

    #[test]
    fn blank_chief_complaint_is_not_recorded() {
        let record = SymptomRecord::new().with_chief_complaint(Some("   ".into()));
        assert!(record.chief_complaint.is_none());

        let record = SymptomRecord::new().with_chief_complaint(Some("Throbbing pain".into()));
        assert_eq!(record.chief_complaint.as_deref(), Some("Throbbing pain"));
    }

    #[test]
    fn noted_detail_requires_presence_and_text() {
        assert_eq!(Finding::positive("8mm buccal").noted_detail(), Some("8mm buccal"));
        assert_eq!(Finding::positive("  ").noted_detail(), None);
        assert_eq!(Finding::new(false, "8mm buccal").noted_detail(), None);
    }
}
