//! Conversions between the JSON bodies in `api-shared` and the core domain types.

use api_shared::{
    AdditionalReq, EvaluateReq, EvaluateRes, FindingReq, SymptomEntry, ToothReq, VocabularyRes,
};
use endo_core::{
    parse_periapical_symptoms, parse_pulpal_symptoms, AdditionalFindings, CaseOverview,
    DiagnosisError, DiagnosisReport, DiagnosisResult, Finding, PeriapicalSymptom, PulpalSymptom,
    SymptomRecord, ToothKind, ToothReference,
};

/// Validate a request into the optional tooth and the record to evaluate.
pub fn request_to_domain(
    req: EvaluateReq,
) -> DiagnosisResult<(Option<ToothReference>, SymptomRecord)> {
    let tooth = req.tooth.map(tooth_from_req).transpose()?;
    let record = SymptomRecord::new()
        .with_chief_complaint(req.chief_complaint)
        .with_pulpal(parse_pulpal_symptoms(&req.pulpal)?)
        .with_periapical(parse_periapical_symptoms(&req.periapical)?)
        .with_additional(additional_from_req(req.additional));
    Ok((tooth, record))
}

fn tooth_from_req(req: ToothReq) -> DiagnosisResult<ToothReference> {
    let kind: ToothKind = req.kind.parse().map_err(DiagnosisError::InvalidInput)?;
    Ok(ToothReference::new(&req.label, kind)?)
}

fn finding_from_req(req: FindingReq) -> Finding {
    Finding::new(req.present, req.detail)
}

fn additional_from_req(req: AdditionalReq) -> AdditionalFindings {
    AdditionalFindings {
        probing: finding_from_req(req.probing),
        bite_stick: finding_from_req(req.bite_stick),
        caries: finding_from_req(req.caries),
        recent_work: finding_from_req(req.recent_work),
        mastication: finding_from_req(req.mastication),
        occlusion: req.occlusion,
    }
}

pub fn report_to_res(report: &DiagnosisReport, overview: Option<&CaseOverview>) -> EvaluateRes {
    EvaluateRes {
        pulpal_diagnosis: report.pulpal_diagnosis.label().to_string(),
        periapical_diagnoses: report
            .periapical_diagnoses
            .iter()
            .map(|d| d.label().to_string())
            .collect(),
        periapical_display: report.periapical_display(),
        red_flag: report.red_flag.raised,
        red_flag_message: report.red_flag.message.clone(),
        fracture_warning: report.fracture_warning.raised,
        fracture_warning_message: report.fracture_warning.message.clone(),
        ambiguous: report.is_ambiguous(),
        treatment_recommendation: report.treatment_recommendation().to_string(),
        treatment_actionable: report.treatment.is_actionable(),
        overview: overview.map(ToString::to_string),
    }
}

pub fn vocabulary() -> VocabularyRes {
    VocabularyRes {
        pulpal: PulpalSymptom::ALL
            .iter()
            .map(|s| SymptomEntry {
                key: s.key().to_string(),
                label: s.label().to_string(),
            })
            .collect(),
        periapical: PeriapicalSymptom::ALL
            .iter()
            .map(|s| SymptomEntry {
                key: s.key().to_string(),
                label: s.label().to_string(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_tooth_kind() {
        let req = EvaluateReq {
            tooth: Some(ToothReq {
                label: "14".into(),
                kind: "molar".into(),
            }),
            ..Default::default()
        };
        let err = request_to_domain(req).expect_err("unknown kind");
        assert!(matches!(err, DiagnosisError::InvalidInput(_)));
    }

    #[test]
    fn blank_complaint_is_not_provided() {
        let req = EvaluateReq {
            chief_complaint: Some("   ".into()),
            ..Default::default()
        };
        let (tooth, record) = request_to_domain(req).expect("valid request");
        assert!(tooth.is_none());
        assert!(record.chief_complaint.is_none());
    }

    #[test]
    fn vocabulary_lists_every_symptom() {
        let vocab = vocabulary();
        assert_eq!(vocab.pulpal.len(), PulpalSymptom::ALL.len());
        assert_eq!(vocab.periapical.len(), PeriapicalSymptom::ALL.len());
    }
}
