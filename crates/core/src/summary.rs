//! Case overview shown at the end of the questionnaire.
//!
//! The overview is plain data assembled from the tooth, the record and the report, so every
//! front end (terminal, REST, tests) renders the same content. `Display` produces Markdown.

use crate::constants::{CLINICAL_DISCLAIMER, NOT_PROVIDED};
use crate::engine::DiagnosisReport;
use crate::record::{AdditionalFindings, SymptomRecord};
use endo_types::ToothReference;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CaseOverview {
    pub tooth: String,
    pub chief_complaint: String,
    pub pulpal_diagnosis: String,
    pub periapical_diagnosis: String,
    pub red_flag: Option<String>,
    pub testing_notes: Vec<String>,
    /// False when every additional test was negative and no occlusion note was written.
    pub any_testing_findings: bool,
    pub fracture_warning: Option<String>,
    pub treatment_recommendation: String,
    pub disclaimer: &'static str,
}

impl CaseOverview {
    pub fn new(tooth: &ToothReference, record: &SymptomRecord, report: &DiagnosisReport) -> Self {
        Self {
            tooth: tooth.label().to_owned(),
            chief_complaint: record
                .chief_complaint
                .clone()
                .unwrap_or_else(|| NOT_PROVIDED.to_owned()),
            pulpal_diagnosis: report.pulpal_diagnosis.label().to_owned(),
            periapical_diagnosis: report.periapical_display(),
            red_flag: report.red_flag.message.clone(),
            testing_notes: testing_notes(&record.additional),
            any_testing_findings: has_any_testing_findings(&record.additional),
            fracture_warning: report.fracture_warning.message.clone(),
            treatment_recommendation: report.treatment_recommendation().to_owned(),
            disclaimer: CLINICAL_DISCLAIMER,
        }
    }
}

/// One note per positive finding with a detail, then the occlusion description.
pub fn testing_notes(additional: &AdditionalFindings) -> Vec<String> {
    let labelled = [
        ("Deep/narrow probings", &additional.probing),
        ("Bite stick positive", &additional.bite_stick),
        ("Caries present", &additional.caries),
        ("Recent dental work", &additional.recent_work),
        ("Discomfort with muscles of mastication", &additional.mastication),
    ];

    let mut notes: Vec<String> = labelled
        .into_iter()
        .filter_map(|(label, finding)| {
            finding
                .noted_detail()
                .map(|detail| format!("{label}: {detail}"))
        })
        .collect();

    if !additional.occlusion.trim().is_empty() {
        notes.push(format!("Occlusion: {}", additional.occlusion));
    }

    notes
}

/// True when any additional test was positive or an occlusion note was written.
pub fn has_any_testing_findings(additional: &AdditionalFindings) -> bool {
    [
        &additional.probing,
        &additional.bite_stick,
        &additional.caries,
        &additional.recent_work,
        &additional.mastication,
    ]
    .iter()
    .any(|f| f.present)
        || !additional.occlusion.trim().is_empty()
}

impl std::fmt::Display for CaseOverview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "### Case Overview & Diagnosis")?;
        writeln!(f, "**Tooth:** {}", self.tooth)?;
        writeln!(f, "**Chief Complaint:** {}", self.chief_complaint)?;
        writeln!(f, "**Pulpal diagnosis:** {}", self.pulpal_diagnosis)?;
        writeln!(f, "**Periapical diagnosis:** {}", self.periapical_diagnosis)?;
        if let Some(red_flag) = &self.red_flag {
            writeln!(f, "{red_flag}")?;
        }

        writeln!(f, "**Additional testing notes:**")?;
        if !self.any_testing_findings {
            writeln!(f, "None")?;
        }
        for note in &self.testing_notes {
            writeln!(f, "- {note}")?;
        }

        if let Some(warning) = &self.fracture_warning {
            writeln!(f, "{warning}")?;
        }

        writeln!(f, "**Treatment Recommendation:**")?;
        writeln!(f, "{}", self.treatment_recommendation)?;
        write!(f, "{}", self.disclaimer)
    }
}
