//! Fixed texts used throughout the diagnosis engine.
//!
//! Keeping every clinician-facing message here ensures the wizard, the CLI and the REST API
//! surface exactly the same wording.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

/// Shown when no rule produced a diagnosis.
pub const NOT_DETERMINED: &str = "Not determined";

/// Shown in the case overview when no chief complaint was recorded.
pub const NOT_PROVIDED: &str = "Not provided";

/// Raised when a vital pulp response coexists with swelling or a sinus tract.
pub const RED_FLAG_MESSAGE: &str =
    "Red flag: Pulpal diagnosis inconsistent with periapical findings. Recommend repeat testing.";

/// Raised when probing or the bite stick suggests a crack.
pub const FRACTURE_WARNING_MESSAGE: &str =
    "Warning: Deep probing or bite stick positive – Possible crack or fracture present.";

/// Replaces the treatment recommendation when more than one diagnosis applies.
pub const AMBIGUITY_NOTICE: &str =
    "Inconsistent findings: more than one diagnosis applies. Re-test before selecting a treatment.";

/// Appended to every case overview.
pub const CLINICAL_DISCLAIMER: &str = "*For clinical decision-making, always corroborate these with full clinical exam and radiographic review.";

/// Separator used when several periapical diagnoses are displayed on one line.
pub const PERIAPICAL_SEPARATOR: &str = ", ";

/// REST bind address used when `ENDO_REST_ADDR` is not set.
pub const DEFAULT_REST_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 3000));
