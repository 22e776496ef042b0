//! Case files: a complete questionnaire written down as YAML or JSON.
//!
//! Case files let a clinician (or a test suite) evaluate a case without walking through the
//! interactive wizard. The wire format is strict: unknown keys are rejected and schema errors
//! report the path of the failing field.
//!
//! ```yaml
//! tooth:
//!   label: "14"
//!   kind: permanent
//! chief_complaint: Pain on chewing
//! pulpal:
//!   - Sensitive to cold and lingers (≥30s)
//! periapical:
//!   - percussion
//! additional:
//!   probing: { present: true, detail: 8mm buccal pocket }
//!   occlusion: Heavy working-side contact
//! ```
//!
//! Every section except `tooth` may be omitted and defaults to "nothing reported".

use crate::engine::{evaluate, DiagnosisReport};
use crate::record::{normalise_complaint, AdditionalFindings, SymptomRecord};
use crate::summary::CaseOverview;
use crate::vocabulary::{parse_periapical_symptoms, parse_pulpal_symptoms};
use crate::{DiagnosisError, DiagnosisResult};
use endo_types::{ToothKind, ToothReference};
use serde::Deserialize;
use std::path::Path;

/// A fully specified case: the tooth and its answers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Case {
    pub tooth: ToothReference,
    pub record: SymptomRecord,
}

impl Case {
    pub fn evaluate(&self) -> DiagnosisReport {
        evaluate(&self.record)
    }

    pub fn overview(&self, report: &DiagnosisReport) -> CaseOverview {
        CaseOverview::new(&self.tooth, &self.record, report)
    }
}

/// Case file parsing.
///
/// This is a zero-sized type used for namespacing; all methods are associated functions.
pub struct CaseFile;

impl CaseFile {
    /// Parse a case from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`DiagnosisError::CaseFile`] on a schema mismatch (message includes the path),
    /// [`DiagnosisError::Tooth`] for an invalid tooth, and the vocabulary errors for unknown or
    /// repeated symptoms.
    pub fn parse_yaml(yaml_text: &str) -> DiagnosisResult<Case> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);
        let wire = serde_path_to_error::deserialize::<_, CaseWire>(deserializer)
            .map_err(schema_mismatch)?;
        wire_to_domain(wire)
    }

    /// Parse a case from JSON text.
    ///
    /// # Errors
    ///
    /// Same as [`CaseFile::parse_yaml`].
    pub fn parse_json(json_text: &str) -> DiagnosisResult<Case> {
        let mut deserializer = serde_json::Deserializer::from_str(json_text);
        let wire = serde_path_to_error::deserialize::<_, CaseWire>(&mut deserializer)
            .map_err(schema_mismatch)?;
        deserializer
            .end()
            .map_err(|e| DiagnosisError::CaseFile(format!("trailing content: {e}")))?;
        wire_to_domain(wire)
    }

    /// Load a case from disk. Files ending in `.json` are parsed as JSON, anything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`DiagnosisError::FileRead`] if the file cannot be read, otherwise the parse errors.
    pub fn load(path: &Path) -> DiagnosisResult<Case> {
        let text = std::fs::read_to_string(path).map_err(DiagnosisError::FileRead)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        tracing::debug!(path = %path.display(), json = is_json, "loading case file");

        if is_json {
            Self::parse_json(&text)
        } else {
            Self::parse_yaml(&text)
        }
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CaseWire {
    tooth: ToothWire,
    #[serde(default)]
    chief_complaint: Option<String>,
    #[serde(default)]
    pulpal: Vec<String>,
    #[serde(default)]
    periapical: Vec<String>,
    #[serde(default)]
    additional: AdditionalFindings,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ToothWire {
    label: String,
    kind: ToothKind,
}

fn schema_mismatch<E: std::fmt::Display>(err: serde_path_to_error::Error<E>) -> DiagnosisError {
    let path = err.path().to_string();
    let source = err.into_inner();
    let path = if path.is_empty() || path == "." {
        "<root>"
    } else {
        path.as_str()
    };
    DiagnosisError::CaseFile(format!("schema mismatch at {path}: {source}"))
}

fn wire_to_domain(wire: CaseWire) -> DiagnosisResult<Case> {
    let tooth = ToothReference::new(&wire.tooth.label, wire.tooth.kind)?;
    let record = SymptomRecord {
        chief_complaint: normalise_complaint(wire.chief_complaint),
        pulpal: parse_pulpal_symptoms(&wire.pulpal)?,
        periapical: parse_periapical_symptoms(&wire.periapical)?,
        additional: wire.additional,
    };
    Ok(Case { tooth, record })
}
