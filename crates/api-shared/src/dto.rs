//! JSON request and response bodies for the diagnosis APIs.
//!
//! Symptoms travel as strings (the display label or the short key); validation against the
//! vocabulary happens in the API layer so that the error can be reported back to the caller.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Tooth the case is about.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ToothReq {
    /// Catalogue label, e.g. `"14"`, `"B"` or `"Upper left"`.
    pub label: String,
    /// One of `permanent`, `primary`, `region` or `other`.
    pub kind: String,
}

/// One additional test result.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, deny_unknown_fields)]
pub struct FindingReq {
    pub present: bool,
    pub detail: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, deny_unknown_fields)]
pub struct AdditionalReq {
    pub probing: FindingReq,
    pub bite_stick: FindingReq,
    pub caries: FindingReq,
    pub recent_work: FindingReq,
    pub mastication: FindingReq,
    pub occlusion: String,
}

/// A completed questionnaire to evaluate.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct EvaluateReq {
    /// Optional. When present the response also carries the rendered case overview.
    #[serde(default)]
    pub tooth: Option<ToothReq>,
    #[serde(default)]
    pub chief_complaint: Option<String>,
    #[serde(default)]
    pub pulpal: Vec<String>,
    #[serde(default)]
    pub periapical: Vec<String>,
    #[serde(default)]
    pub additional: AdditionalReq,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EvaluateRes {
    pub pulpal_diagnosis: String,
    pub periapical_diagnoses: Vec<String>,
    /// Periapical diagnoses joined with `", "`, or `"Not determined"`.
    pub periapical_display: String,
    pub red_flag: bool,
    pub red_flag_message: Option<String>,
    pub fracture_warning: bool,
    pub fracture_warning_message: Option<String>,
    pub ambiguous: bool,
    pub treatment_recommendation: String,
    /// False when no treatment was suggested, including when ambiguity withheld it.
    pub treatment_actionable: bool,
    /// Markdown case overview, only when a tooth was supplied.
    pub overview: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SymptomEntry {
    pub key: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VocabularyRes {
    pub pulpal: Vec<SymptomEntry>,
    pub periapical: Vec<SymptomEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_req_defaults_missing_sections() {
        let req: EvaluateReq =
            serde_json::from_str(r#"{"pulpal":["sweets"]}"#).expect("minimal request");
        assert_eq!(req.pulpal, vec!["sweets".to_owned()]);
        assert!(req.tooth.is_none());
        assert_eq!(req.additional, AdditionalReq::default());
    }

    #[test]
    fn evaluate_req_rejects_unknown_fields() {
        let err = serde_json::from_str::<EvaluateReq>(r#"{"pulp":[]}"#)
            .expect_err("unknown field should be rejected");
        assert!(err.to_string().contains("pulp"));
    }
}
