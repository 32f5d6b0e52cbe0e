//! Release snapshots and poll requests

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Result, WaitError};

/// The latest revision of a release, as reported by one inspection
///
/// Field names on the wire match the records of `helm history --output json`.
/// The zero value (revision 0) means the release was not found; see
/// [`ReleaseSnapshot::is_not_found`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReleaseSnapshot {
    /// Revision number, 0 when the release does not exist
    pub revision: u32,

    /// When the revision was last updated, verbatim from the inspector
    #[serde(rename = "updated")]
    pub updated_at: String,

    /// Reported status, compared case-insensitively
    pub status: String,

    /// Chart name and version, e.g. `nginx-1.2.3`
    pub chart: String,

    /// Application version of the chart
    #[serde(alias = "app_version")]
    pub app_version: String,

    /// Description of the last operation on the release
    pub description: String,
}

impl ReleaseSnapshot {
    /// The "not found" sentinel
    pub fn not_found() -> Self {
        Self::default()
    }

    /// Whether this is the "not found" sentinel
    ///
    /// Only the revision decides; the other fields are ignored.
    pub fn is_not_found(&self) -> bool {
        self.revision == 0
    }
}

/// What to wait for and for how long
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollRequest {
    pub release_name: String,
    pub namespace: String,
    pub timeout_seconds: u64,
    pub interval_seconds: u64,
}

impl PollRequest {
    /// Create a request, rejecting a zero timeout or interval
    pub fn new(
        release_name: impl Into<String>,
        namespace: impl Into<String>,
        timeout_seconds: u64,
        interval_seconds: u64,
    ) -> Result<Self> {
        let release_name = release_name.into();
        if release_name.is_empty() {
            return Err(WaitError::InvalidRequest(
                "release name must not be empty".to_string(),
            ));
        }
        if timeout_seconds == 0 {
            return Err(WaitError::InvalidRequest(
                "timeout must be at least 1 second".to_string(),
            ));
        }
        if interval_seconds == 0 {
            return Err(WaitError::InvalidRequest(
                "interval must be at least 1 second".to_string(),
            ));
        }

        Ok(Self {
            release_name,
            namespace: namespace.into(),
            timeout_seconds,
            interval_seconds,
        })
    }

    /// Number of inspections allowed: `timeout / interval`, at least one
    ///
    /// Floor division means the loop may give up before `timeout` has
    /// elapsed, e.g. 14s/5s allows 2 attempts and one 5s sleep.
    pub fn max_attempts(&self) -> u64 {
        (self.timeout_seconds / self.interval_seconds).max(1)
    }

    /// Fixed pause between attempts
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deployed() -> ReleaseSnapshot {
        ReleaseSnapshot {
            revision: 46,
            updated_at: "Tue Feb 11 12:14:53 2020".to_string(),
            status: "deployed".to_string(),
            chart: "codacy-0.1.1".to_string(),
            app_version: "1.0".to_string(),
            description: "Upgrade complete".to_string(),
        }
    }

    #[test]
    fn test_sentinel_is_zero_value() {
        assert_eq!(ReleaseSnapshot::not_found(), ReleaseSnapshot::default());
        assert!(ReleaseSnapshot::not_found().is_not_found());
    }

    #[test]
    fn test_revision_alone_decides_not_found() {
        let mut snapshot = deployed();
        assert!(!snapshot.is_not_found());

        snapshot.revision = 0;
        assert!(snapshot.is_not_found());

        let bare = ReleaseSnapshot {
            revision: 1,
            ..Default::default()
        };
        assert!(!bare.is_not_found());
    }

    #[test]
    fn test_wire_format() {
        insta::assert_json_snapshot!(deployed(), @r###"
        {
          "revision": 46,
          "updated": "Tue Feb 11 12:14:53 2020",
          "status": "deployed",
          "chart": "codacy-0.1.1",
          "appVersion": "1.0",
          "description": "Upgrade complete"
        }
        "###);
    }

    #[test]
    fn test_roundtrip_preserves_every_field() {
        for snapshot in [deployed(), ReleaseSnapshot::not_found()] {
            let json = serde_json::to_string(&snapshot).unwrap();
            let back: ReleaseSnapshot = serde_json::from_str(&json).unwrap();
            assert_eq!(back, snapshot);
        }
    }

    #[test]
    fn test_deserialize_helm_field_names() {
        let json = r#"{"revision":3,"updated":"2024-05-01T10:00:00Z","status":"superseded","chart":"web-2.0.0","app_version":"2.0","description":"Upgrade complete"}"#;
        let snapshot: ReleaseSnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot.revision, 3);
        assert_eq!(snapshot.app_version, "2.0");
        assert_eq!(snapshot.status, "superseded");
    }

    #[test]
    fn test_deserialize_missing_fields_default() {
        let snapshot: ReleaseSnapshot = serde_json::from_str(r#"{"revision":2}"#).unwrap();
        assert_eq!(snapshot.revision, 2);
        assert_eq!(snapshot.status, "");
    }

    #[test]
    fn test_max_attempts_floor_division() {
        let request = |timeout, interval| PollRequest::new("web", "default", timeout, interval).unwrap();

        assert_eq!(request(300, 5).max_attempts(), 60);
        assert_eq!(request(10, 10).max_attempts(), 1);
        assert_eq!(request(10, 5).max_attempts(), 2);
        assert_eq!(request(14, 5).max_attempts(), 2);
        assert_eq!(request(5, 10).max_attempts(), 1);
    }

    #[test]
    fn test_request_rejects_zero_values() {
        assert!(matches!(
            PollRequest::new("web", "default", 0, 5),
            Err(WaitError::InvalidRequest(_))
        ));
        assert!(matches!(
            PollRequest::new("web", "default", 10, 0),
            Err(WaitError::InvalidRequest(_))
        ));
        assert!(matches!(
            PollRequest::new("", "default", 10, 5),
            Err(WaitError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_interval_duration() {
        let request = PollRequest::new("web", "default", 30, 7).unwrap();
        assert_eq!(request.interval(), Duration::from_secs(7));
    }
}
