//! Scripted inspector for testing
//!
//! Replays a fixed sequence of responses, one per call, and keeps its own
//! call log so tests never share state.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use super::ReleaseInspector;
use crate::error::{Result, WaitError};
use crate::snapshot::ReleaseSnapshot;

/// One scripted answer
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    /// Return this snapshot
    Snapshot(ReleaseSnapshot),
    /// Return the not-found sentinel
    NotFound,
    /// Fail the inspection with this message
    Error(String),
}

/// In-memory inspector for testing
///
/// The n-th call gets the n-th response; once the script runs out the last
/// response repeats. An empty script always answers not found.
#[derive(Clone, Default)]
pub struct ScriptedInspector {
    script: Arc<Vec<ScriptedResponse>>,
    /// Only answer for this (release, namespace); anything else is not found
    target: Option<(String, String)>,
    /// Arguments of every call, in order
    calls: Arc<RwLock<Vec<(String, String)>>>,
}

impl ScriptedInspector {
    /// Create from a list of responses
    pub fn new(script: Vec<ScriptedResponse>) -> Self {
        Self {
            script: Arc::new(script),
            target: None,
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// A release that never exists
    pub fn not_found() -> Self {
        Self::new(vec![ScriptedResponse::NotFound])
    }

    /// A release walking through the given statuses, one per call
    ///
    /// Each status becomes a snapshot whose revision is its position plus one.
    pub fn with_statuses(statuses: &[&str]) -> Self {
        let script = statuses
            .iter()
            .enumerate()
            .map(|(index, status)| {
                ScriptedResponse::Snapshot(ReleaseSnapshot {
                    revision: index as u32 + 1,
                    updated_at: format!("2024-01-01T00:00:{:02}Z", index),
                    status: status.to_string(),
                    chart: "demo-0.1.0".to_string(),
                    app_version: "1.0".to_string(),
                    description: format!("scripted step {}", index + 1),
                })
            })
            .collect();
        Self::new(script)
    }

    /// Restrict answers to one release in one namespace
    pub fn for_release(mut self, release_name: &str, namespace: &str) -> Self {
        self.target = Some((release_name.to_string(), namespace.to_string()));
        self
    }

    /// Number of inspections performed
    pub fn calls(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// `(release, namespace)` of every inspection, in order
    pub fn requests(&self) -> Vec<(String, String)> {
        self.calls.read().unwrap().clone()
    }

    fn response_for_call(&self, index: usize) -> ScriptedResponse {
        self.script
            .get(index)
            .or_else(|| self.script.last())
            .cloned()
            .unwrap_or(ScriptedResponse::NotFound)
    }
}

#[async_trait]
impl ReleaseInspector for ScriptedInspector {
    async fn inspect(&self, release_name: &str, namespace: &str) -> Result<ReleaseSnapshot> {
        let index = {
            let mut calls = self.calls.write().unwrap();
            calls.push((release_name.to_string(), namespace.to_string()));
            calls.len() - 1
        };

        if let Some((name, ns)) = &self.target {
            if name != release_name || ns != namespace {
                return Ok(ReleaseSnapshot::not_found());
            }
        }

        match self.response_for_call(index) {
            ScriptedResponse::Snapshot(snapshot) => Ok(snapshot),
            ScriptedResponse::NotFound => Ok(ReleaseSnapshot::not_found()),
            ScriptedResponse::Error(message) => Err(WaitError::CommandFailed {
                program: "scripted".to_string(),
                status: "exit status: 1".to_string(),
                stderr: message,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_walks_script_then_repeats_last() {
        let inspector = ScriptedInspector::with_statuses(&["pending-install", "deployed"]);

        let statuses = [
            inspector.inspect("web", "default").await.unwrap().status,
            inspector.inspect("web", "default").await.unwrap().status,
            inspector.inspect("web", "default").await.unwrap().status,
        ];
        assert_eq!(statuses, ["pending-install", "deployed", "deployed"]);
        assert_eq!(inspector.calls(), 3);
    }

    #[tokio::test]
    async fn test_empty_script_is_not_found() {
        let inspector = ScriptedInspector::default();
        assert!(inspector.inspect("web", "default").await.unwrap().is_not_found());
    }

    #[tokio::test]
    async fn test_other_namespace_is_not_found() {
        let inspector = ScriptedInspector::with_statuses(&["deployed"]).for_release("web", "prod");

        assert!(inspector.inspect("web", "default").await.unwrap().is_not_found());
        assert!(inspector.inspect("api", "prod").await.unwrap().is_not_found());
        assert!(!inspector.inspect("web", "prod").await.unwrap().is_not_found());
        assert_eq!(
            inspector.requests(),
            vec![
                ("web".to_string(), "default".to_string()),
                ("api".to_string(), "prod".to_string()),
                ("web".to_string(), "prod".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_scripted_error() {
        let inspector = ScriptedInspector::new(vec![ScriptedResponse::Error("boom".to_string())]);
        let err = inspector.inspect("web", "default").await.unwrap_err();
        assert!(err.is_inspection_failure());
        assert!(err.to_string().contains("boom"));
    }

    #[tokio::test]
    async fn test_clones_share_call_log() {
        let inspector = ScriptedInspector::not_found();
        let clone = inspector.clone();
        clone.inspect("web", "default").await.unwrap();
        assert_eq!(inspector.calls(), 1);

        let fresh = ScriptedInspector::not_found();
        assert_eq!(fresh.calls(), 0);
    }
}
