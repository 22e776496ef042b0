//! The fixed symptom vocabularies offered by the questionnaire.
//!
//! Both vocabularies are closed: a symptom is either one of the six variants below or it is
//! rejected at the boundary with [`DiagnosisError::UnknownSymptom`]. Each variant has two textual
//! forms:
//!
//! - a **label**, the exact wording shown to the clinician (e.g. `Sensitive to sweets`)
//! - a **key**, a stable snake_case identifier for flags and APIs (e.g. `sweets`)
//!
//! Parsing accepts either form. Serialisation always produces the label.
//!
//! Variants are declared in questionnaire order, which is also their `Ord` order, so a
//! `BTreeSet` of symptoms iterates in the order the questions were asked.

use crate::{DiagnosisError, DiagnosisResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const PULPAL_VOCABULARY: &str = "pulpal";
const PERIAPICAL_VOCABULARY: &str = "periapical";

// ============================================================================
// PULPAL SYMPTOMS
// ============================================================================

/// Thermal and sweet sensitivity responses used to classify pulp health.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PulpalSymptom {
    ColdResolvesQuickly,
    ColdLingers,
    HotLingers,
    NoResponseToCold,
    NoThermalSensitivity,
    Sweets,
}

impl PulpalSymptom {
    /// Every pulpal symptom, in questionnaire order.
    pub const ALL: [PulpalSymptom; 6] = [
        PulpalSymptom::ColdResolvesQuickly,
        PulpalSymptom::ColdLingers,
        PulpalSymptom::HotLingers,
        PulpalSymptom::NoResponseToCold,
        PulpalSymptom::NoThermalSensitivity,
        PulpalSymptom::Sweets,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PulpalSymptom::ColdResolvesQuickly => "Sensitive to cold but resolves quickly",
            PulpalSymptom::ColdLingers => "Sensitive to cold and lingers (≥30s)",
            PulpalSymptom::HotLingers => "Sensitive to hot and lingers (≥30s)",
            PulpalSymptom::NoResponseToCold => "No response to cold",
            PulpalSymptom::NoThermalSensitivity => "No sensitivity to hot or cold",
            PulpalSymptom::Sweets => "Sensitive to sweets",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            PulpalSymptom::ColdResolvesQuickly => "cold_resolves_quickly",
            PulpalSymptom::ColdLingers => "cold_lingers",
            PulpalSymptom::HotLingers => "hot_lingers",
            PulpalSymptom::NoResponseToCold => "no_response_to_cold",
            PulpalSymptom::NoThermalSensitivity => "no_thermal_sensitivity",
            PulpalSymptom::Sweets => "sweets",
        }
    }

    /// True for responses that can only come from a pulp that is still alive.
    pub fn indicates_vital_pulp(self) -> bool {
        matches!(
            self,
            PulpalSymptom::ColdResolvesQuickly
                | PulpalSymptom::ColdLingers
                | PulpalSymptom::HotLingers
                | PulpalSymptom::Sweets
        )
    }

    /// True for a thermal response that persists for 30 seconds or more.
    pub fn is_lingering(self) -> bool {
        matches!(self, PulpalSymptom::ColdLingers | PulpalSymptom::HotLingers)
    }
}

impl std::fmt::Display for PulpalSymptom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for PulpalSymptom {
    type Err = DiagnosisError;

    fn from_str(s: &str) -> DiagnosisResult<Self> {
        let s = s.trim();
        PulpalSymptom::ALL
            .into_iter()
            .find(|symptom| symptom.label() == s || symptom.key() == s)
            .ok_or_else(|| DiagnosisError::UnknownSymptom {
                vocabulary: PULPAL_VOCABULARY,
                value: s.to_owned(),
            })
    }
}

// ============================================================================
// PERIAPICAL SYMPTOMS
// ============================================================================

/// Findings around the root tip: tenderness, swelling, sinus tract and imaging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PeriapicalSymptom {
    Biting,
    Percussion,
    Palpation,
    FacialSwelling,
    SinusTract,
    Radiolucency,
}

impl PeriapicalSymptom {
    /// Every periapical symptom, in questionnaire order.
    pub const ALL: [PeriapicalSymptom; 6] = [
        PeriapicalSymptom::Biting,
        PeriapicalSymptom::Percussion,
        PeriapicalSymptom::Palpation,
        PeriapicalSymptom::FacialSwelling,
        PeriapicalSymptom::SinusTract,
        PeriapicalSymptom::Radiolucency,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PeriapicalSymptom::Biting => "Sensitive to biting",
            PeriapicalSymptom::Percussion => "Sensitive to percussion",
            PeriapicalSymptom::Palpation => "Sensitive to palpation",
            PeriapicalSymptom::FacialSwelling => "Facial swelling",
            PeriapicalSymptom::SinusTract => "Sinus tract ('bump on gums')",
            PeriapicalSymptom::Radiolucency => "No symptoms but radiolucency on Xrays",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            PeriapicalSymptom::Biting => "biting",
            PeriapicalSymptom::Percussion => "percussion",
            PeriapicalSymptom::Palpation => "palpation",
            PeriapicalSymptom::FacialSwelling => "facial_swelling",
            PeriapicalSymptom::SinusTract => "sinus_tract",
            PeriapicalSymptom::Radiolucency => "radiolucency",
        }
    }

    /// True for biting, percussion and palpation tenderness.
    pub fn is_tenderness(self) -> bool {
        matches!(
            self,
            PeriapicalSymptom::Biting | PeriapicalSymptom::Percussion | PeriapicalSymptom::Palpation
        )
    }

    /// True for signs of an abscess (swelling or a draining sinus tract).
    pub fn indicates_abscess(self) -> bool {
        matches!(
            self,
            PeriapicalSymptom::FacialSwelling | PeriapicalSymptom::SinusTract
        )
    }
}

impl std::fmt::Display for PeriapicalSymptom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for PeriapicalSymptom {
    type Err = DiagnosisError;

    fn from_str(s: &str) -> DiagnosisResult<Self> {
        let s = s.trim();
        PeriapicalSymptom::ALL
            .into_iter()
            .find(|symptom| symptom.label() == s || symptom.key() == s)
            .ok_or_else(|| DiagnosisError::UnknownSymptom {
                vocabulary: PERIAPICAL_VOCABULARY,
                value: s.to_owned(),
            })
    }
}

// ============================================================================
// PARSING ANSWER LISTS
// ============================================================================

/// Parses a list of pulpal labels or keys into a set.
///
/// # Errors
///
/// Returns [`DiagnosisError::UnknownSymptom`] for a value outside the vocabulary and
/// [`DiagnosisError::DuplicateSymptom`] when the same symptom is listed twice (in any form).
pub fn parse_pulpal_symptoms<I, S>(values: I) -> DiagnosisResult<BTreeSet<PulpalSymptom>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_set(values, PULPAL_VOCABULARY)
}

/// Parses a list of periapical labels or keys into a set.
///
/// # Errors
///
/// Same as [`parse_pulpal_symptoms`].
pub fn parse_periapical_symptoms<I, S>(values: I) -> DiagnosisResult<BTreeSet<PeriapicalSymptom>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_set(values, PERIAPICAL_VOCABULARY)
}

fn parse_set<T, I, S>(values: I, vocabulary: &'static str) -> DiagnosisResult<BTreeSet<T>>
where
    T: std::str::FromStr<Err = DiagnosisError> + Ord,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set = BTreeSet::new();
    for value in values {
        let value = value.as_ref();
        if !set.insert(value.parse::<T>()?) {
            return Err(DiagnosisError::DuplicateSymptom {
                vocabulary,
                value: value.trim().to_owned(),
            });
        }
    }
    Ok(set)
}

// ============================================================================
// SERDE (labels on the wire)
// ============================================================================

impl Serialize for PulpalSymptom {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for PulpalSymptom {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Serialize for PeriapicalSymptom {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for PeriapicalSymptom {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_and_keys() {
        assert_eq!(
            "Sensitive to cold and lingers (≥30s)".parse::<PulpalSymptom>().expect("label"),
            PulpalSymptom::ColdLingers
        );
        assert_eq!(
            "cold_lingers".parse::<PulpalSymptom>().expect("key"),
            PulpalSymptom::ColdLingers
        );
        assert_eq!(
            "Sinus tract ('bump on gums')".parse::<PeriapicalSymptom>().expect("label"),
            PeriapicalSymptom::SinusTract
        );
        assert_eq!(
            " radiolucency ".parse::<PeriapicalSymptom>().expect("trimmed key"),
            PeriapicalSymptom::Radiolucency
        );
    }

    #[test]
    fn rejects_symptoms_outside_vocabulary() {
        let err = "Throbbing at night"
            .parse::<PulpalSymptom>()
            .expect_err("not in the pulpal vocabulary");
        assert!(matches!(
            err,
            DiagnosisError::UnknownSymptom { vocabulary: "pulpal", ref value } if value == "Throbbing at night"
        ));

        // Labels are matched exactly, not case-insensitively.
        assert!("facial swelling".parse::<PeriapicalSymptom>().is_err());

        // A pulpal label is not a periapical symptom.
        assert!("Sensitive to sweets".parse::<PeriapicalSymptom>().is_err());
    }

    #[test]
    fn vital_pulp_responses() {
        let vital: Vec<_> = PulpalSymptom::ALL
            .into_iter()
            .filter(|s| s.indicates_vital_pulp())
            .collect();
        assert_eq!(
            vital,
            vec![
                PulpalSymptom::ColdResolvesQuickly,
                PulpalSymptom::ColdLingers,
                PulpalSymptom::HotLingers,
                PulpalSymptom::Sweets,
            ]
        );
    }

    #[test]
    fn ordering_follows_questionnaire() {
        let mut sorted = PeriapicalSymptom::ALL;
        sorted.reverse();
        sorted.sort();
        assert_eq!(sorted, PeriapicalSymptom::ALL);
    }

    #[test]
    fn parses_answer_lists_into_sets() {
        let set = parse_pulpal_symptoms(["sweets", "Sensitive to hot and lingers (≥30s)"])
            .expect("valid answers");
        assert_eq!(
            set.into_iter().collect::<Vec<_>>(),
            vec![PulpalSymptom::HotLingers, PulpalSymptom::Sweets]
        );

        let empty = parse_periapical_symptoms(Vec::<String>::new()).expect("no answers");
        assert!(empty.is_empty());
    }

    #[test]
    fn rejects_duplicates_in_any_form() {
        let err = parse_periapical_symptoms(["Facial swelling", "facial_swelling"])
            .expect_err("same symptom twice");
        assert!(matches!(
            err,
            DiagnosisError::DuplicateSymptom { vocabulary: "periapical", ref value } if value == "facial_swelling"
        ));

        let err = parse_pulpal_symptoms(["sweets", "salty"]).expect_err("unknown symptom");
        assert!(matches!(err, DiagnosisError::UnknownSymptom { .. }));
    }

    #[test]
    fn serialises_as_label() {
        let json = serde_json::to_string(&PulpalSymptom::Sweets).expect("serialise");
        assert_eq!(json, "\"Sensitive to sweets\"");

        let parsed: PeriapicalSymptom =
            serde_json::from_str("\"facial_swelling\"").expect("deserialise key");
        assert_eq!(parsed, PeriapicalSymptom::FacialSwelling);
    }
}
