use endo_types::ToothError;

#[derive(Debug, thiserror::Error)]
pub enum DiagnosisError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unknown {vocabulary} symptom: '{value}'")]
    UnknownSymptom {
        vocabulary: &'static str,
        value: String,
    },
    #[error("{vocabulary} symptom listed more than once: '{value}'")]
    DuplicateSymptom {
        vocabulary: &'static str,
        value: String,
    },
    #[error("invalid tooth: {0}")]
    Tooth(#[from] ToothError),
    #[error("invalid case file: {0}")]
    CaseFile(String),
    #[error("failed to read case file: {0}")]
    FileRead(std::io::Error),
}

pub type DiagnosisResult<T> = std::result::Result<T, DiagnosisError>;
