//! Audit action labels.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Short machine-readable label for an audited action.
///
/// Labels serialize as snake_case strings (`login_failed`, `ballot_cast`).
/// `Custom` carries any label outside the built-in vocabulary and is the
/// `FromStr` fallback, so stored labels always parse back losslessly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AuditAction {
    // Authentication
    Login,
    Logout,
    LoginFailed,
    SessionExpired,

    // Voter management
    VoterRegistered,
    VoterUpdated,
    VoterRemoved,

    // Election lifecycle
    ElectionCreated,
    ElectionOpened,
    ElectionClosed,

    // Ballots
    BallotCast,
    BallotRejected,
    BallotVerified,

    // Configuration
    ConfigUpdated,

    // Custom action
    #[strum(default)]
    Custom(String),
}

impl AuditAction {
    /// Whether this action warrants review by election operators.
    pub fn is_security_sensitive(&self) -> bool {
        matches!(
            self,
            Self::LoginFailed | Self::BallotRejected | Self::VoterRemoved
        )
    }
}
