//! # Endo Core
//!
//! Core business logic for the endodontic diagnosis questionnaire.
//!
//! This crate contains the pure diagnostic rules and the data they operate on:
//! - The fixed pulpal and periapical symptom vocabularies
//! - The `SymptomRecord` collected for one tooth
//! - The Diagnosis Engine (`evaluate`) and the treatment rules
//! - The questionnaire state machine (`Wizard`) and the case overview
//! - Case files (YAML/JSON) for evaluating a case without the wizard
//! - Startup configuration (`ServerConfig`) resolved once from raw environment values
//!
//! **No API concerns**: HTTP servers, terminal prompts and request/response types belong in
//! `api-rest`, `endo-cli` or `api-shared`.

pub mod case_file;
pub mod config;
pub mod constants;
pub mod diagnosis;
pub mod engine;
pub mod error;
pub mod record;
pub mod summary;
pub mod treatment;
pub mod vocabulary;
pub mod wizard;

pub use case_file::{Case, CaseFile};
pub use config::ServerConfig;
pub use diagnosis::{periapical_display, PeriapicalDiagnosis, PulpalCategory, PulpalDiagnosis};
pub use engine::{evaluate, Ambiguity, DiagnosisReport, FractureWarning, RedFlag};
pub use error::{DiagnosisError, DiagnosisResult};
pub use record::{AdditionalFindings, Finding, SymptomRecord};
pub use summary::CaseOverview;
pub use treatment::Recommendation;
pub use vocabulary::{
    parse_periapical_symptoms, parse_pulpal_symptoms, PeriapicalSymptom, PulpalSymptom,
};
pub use wizard::{Wizard, WizardStep};

pub use endo_types::{ToothError, ToothKind, ToothReference};
