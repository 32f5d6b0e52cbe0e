//! Terminal release statuses
//!
//! A release is "available" once its status is one the release tool only
//! reports after it has stopped working on the release. That includes failed
//! and removed releases: availability means "no longer changing", and callers
//! look at the status itself to tell success from failure.

use phf::phf_ordered_map;
use std::fmt;

use crate::snapshot::ReleaseSnapshot;

/// A status in the known terminal set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownStatus {
    Unknown,
    Deployed,
    Deleted,
    Superseded,
    Failed,
    Uninstalled,
}

/// Lower-case status literal to status, in reporting order
static KNOWN_STATUSES: phf::OrderedMap<&'static str, KnownStatus> = phf_ordered_map! {
    "unknown" => KnownStatus::Unknown,
    "deployed" => KnownStatus::Deployed,
    "deleted" => KnownStatus::Deleted,
    "superseded" => KnownStatus::Superseded,
    "failed" => KnownStatus::Failed,
    "uninstalled" => KnownStatus::Uninstalled,
};

impl KnownStatus {
    /// Every known status, in the order of the lookup table
    pub const ALL: [KnownStatus; 6] = [
        KnownStatus::Unknown,
        KnownStatus::Deployed,
        KnownStatus::Deleted,
        KnownStatus::Superseded,
        KnownStatus::Failed,
        KnownStatus::Uninstalled,
    ];

    /// Look up a reported status, ignoring case
    pub fn parse(status: &str) -> Option<Self> {
        KNOWN_STATUSES.get(status.to_lowercase().as_str()).copied()
    }

    /// Lower-case literal for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Deployed => "deployed",
            Self::Deleted => "deleted",
            Self::Superseded => "superseded",
            Self::Failed => "failed",
            Self::Uninstalled => "uninstalled",
        }
    }

    /// Whether the release ended up running
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Deployed)
    }
}

impl fmt::Display for KnownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a snapshot carries a terminal status
///
/// False for the not-found sentinel, whose status is empty.
pub fn is_available(snapshot: &ReleaseSnapshot) -> bool {
    KnownStatus::parse(&snapshot.status).is_some()
}
