//! Tooth identification shared across the endodontic diagnosis crates.
//!
//! A diagnostic session always concerns exactly one tooth (or, when the patient cannot localise
//! the pain, a region of the mouth). This crate defines the validated [`ToothReference`] type and
//! the fixed catalogue of labels offered by the tooth selector:
//!
//! - Permanent teeth use the universal numbering system, `1` to `32`.
//! - Primary teeth use letters, `A` to `T`.
//! - Regions cover the quadrants, the anterior segments and `Unknown`.
//! - `Other` accepts any non-empty label for cases the catalogue does not cover.

use serde::{Deserialize, Serialize};

/// Errors that can occur when creating a [`ToothReference`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ToothError {
    /// The label was empty or contained only whitespace
    #[error("tooth label cannot be empty")]
    EmptyLabel,
    /// The label is not part of the catalogue for the requested kind
    #[error("'{label}' is not a valid {kind} tooth")]
    NotInCatalogue { kind: ToothKind, label: String },
}

const PERMANENT_TEETH: [&str; 32] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17",
    "18", "19", "20", "21", "22", "23", "24", "25", "26", "27", "28", "29", "30", "31", "32",
];

const PRIMARY_TEETH: [&str; 20] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S",
    "T",
];

const REGIONS: [&str; 7] = [
    "Upper left",
    "Upper right",
    "Lower left",
    "Lower right",
    "Maxillary anteriors",
    "Mandibular anteriors",
    "Unknown",
];

/// The kind of tooth (or area) being evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToothKind {
    Permanent,
    Primary,
    Region,
    Other,
}

impl ToothKind {
    /// Every kind, in the order the selector offers them.
    pub const ALL: [ToothKind; 4] = [
        ToothKind::Permanent,
        ToothKind::Primary,
        ToothKind::Region,
        ToothKind::Other,
    ];

    /// Returns the selectable labels for this kind.
    ///
    /// `Other` has no catalogue and returns an empty slice.
    pub fn catalogue(self) -> &'static [&'static str] {
        match self {
            ToothKind::Permanent => &PERMANENT_TEETH,
            ToothKind::Primary => &PRIMARY_TEETH,
            ToothKind::Region => &REGIONS,
            ToothKind::Other => &[],
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            ToothKind::Permanent => "permanent",
            ToothKind::Primary => "primary",
            ToothKind::Region => "region",
            ToothKind::Other => "other",
        }
    }
}

impl std::fmt::Display for ToothKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ToothKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToothKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tooth kind: {s}"))
    }
}

/// Identifies the tooth under evaluation.
///
/// Construction validates the label against the catalogue for its kind, so a `ToothReference`
/// always names something the selector could have offered. The value is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ToothReference {
    label: String,
    kind: ToothKind,
}

impl ToothReference {
    /// Creates a new `ToothReference`.
    ///
    /// The label is trimmed of leading and trailing whitespace before validation.
    ///
    /// # Errors
    ///
    /// Returns [`ToothError::EmptyLabel`] if the trimmed label is empty, or
    /// [`ToothError::NotInCatalogue`] if the label is not offered for `kind`.
    pub fn new(label: impl AsRef<str>, kind: ToothKind) -> Result<Self, ToothError> {
        let trimmed = label.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ToothError::EmptyLabel);
        }

        if kind != ToothKind::Other && !kind.catalogue().contains(&trimmed) {
            return Err(ToothError::NotInCatalogue {
                kind,
                label: trimmed.to_owned(),
            });
        }

        Ok(Self {
            label: trimmed.to_owned(),
            kind,
        })
    }

    /// A permanent tooth by universal number (1-32).
    pub fn permanent(number: u8) -> Result<Self, ToothError> {
        Self::new(number.to_string(), ToothKind::Permanent)
    }

    /// A primary tooth by letter (A-T).
    pub fn primary(letter: char) -> Result<Self, ToothError> {
        Self::new(letter.to_string(), ToothKind::Primary)
    }

    /// A region of the mouth, e.g. `"Upper left"` or `"Unknown"`.
    pub fn region(name: &str) -> Result<Self, ToothError> {
        Self::new(name, ToothKind::Region)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> ToothKind {
        self.kind
    }
}

impl std::fmt::Display for ToothReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

impl<'de> Deserialize<'de> for ToothReference {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Wire {
            label: String,
            kind: ToothKind,
        }

        let wire = Wire::deserialize(deserializer)?;
        ToothReference::new(&wire.label, wire.kind).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_catalogue_labels_for_each_kind() {
        let tooth = ToothReference::new("14", ToothKind::Permanent).expect("14 is permanent");
        assert_eq!(tooth.label(), "14");
        assert_eq!(tooth.kind(), ToothKind::Permanent);

        assert!(ToothReference::primary('B').is_ok());
        assert!(ToothReference::region("Upper left").is_ok());
        assert!(ToothReference::region("Unknown").is_ok());
    }

    #[test]
    fn trims_labels() {
        let tooth = ToothReference::new("  30 ", ToothKind::Permanent).expect("trimmed label");
        assert_eq!(tooth.label(), "30");
        assert_eq!(tooth.to_string(), "30");
    }

    #[test]
    fn rejects_empty_label() {
        let err = ToothReference::new("   ", ToothKind::Other).expect_err("should reject blank");
        assert_eq!(err, ToothError::EmptyLabel);
    }

    #[test]
    fn rejects_labels_outside_catalogue() {
        let err = ToothReference::permanent(33).expect_err("33 is out of range");
        assert!(matches!(err, ToothError::NotInCatalogue { kind: ToothKind::Permanent, .. }));

        let err = ToothReference::primary('U').expect_err("U is not a primary tooth");
        assert!(matches!(err, ToothError::NotInCatalogue { kind: ToothKind::Primary, .. }));

        let err = ToothReference::new("14", ToothKind::Region).expect_err("14 is not a region");
        assert_eq!(err.to_string(), "'14' is not a valid region tooth");
    }

    #[test]
    fn other_accepts_free_labels() {
        let tooth = ToothReference::new("Implant site #19", ToothKind::Other).expect("free label");
        assert_eq!(tooth.kind(), ToothKind::Other);
        assert!(ToothKind::Other.catalogue().is_empty());
    }

    #[test]
    fn catalogue_sizes_match_selector() {
        assert_eq!(ToothKind::Permanent.catalogue().len(), 32);
        assert_eq!(ToothKind::Primary.catalogue().len(), 20);
        assert_eq!(ToothKind::Region.catalogue().len(), 7);
    }

    #[test]
    fn parses_kind_case_insensitively() {
        assert_eq!("Primary".parse::<ToothKind>(), Ok(ToothKind::Primary));
        assert!("molar".parse::<ToothKind>().is_err());
    }

    #[test]
    fn deserialisation_revalidates() {
        let tooth: ToothReference =
            serde_json::from_str(r#"{"label":"B","kind":"primary"}"#).expect("valid tooth");
        assert_eq!(tooth, ToothReference::primary('B').expect("B"));

        let err = serde_json::from_str::<ToothReference>(r#"{"label":"Z","kind":"primary"}"#)
            .expect_err("Z is not a primary tooth");
        assert!(err.to_string().contains("not a valid primary tooth"));
    }
}
