//! Inspector backed by the `helm` binary

use async_trait::async_trait;

use super::ReleaseInspector;
use crate::error::{Result, WaitError};
use crate::snapshot::ReleaseSnapshot;

/// Default program name, resolved through `PATH`
pub const DEFAULT_HELM_PROGRAM: &str = "helm";

/// Runs `helm history <release> --max 1 --output json` once per inspection
#[derive(Debug, Clone)]
pub struct HelmInspector {
    program: String,
    kube_context: Option<String>,
}

impl HelmInspector {
    /// Create an inspector using `helm` from `PATH`
    pub fn new() -> Self {
        Self {
            program: DEFAULT_HELM_PROGRAM.to_string(),
            kube_context: None,
        }
    }

    /// Use a different helm executable
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Target a specific kubeconfig context
    pub fn with_kube_context(mut self, kube_context: Option<String>) -> Self {
        self.kube_context = kube_context;
        self
    }

    /// The program this inspector runs
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to helm for one inspection
    pub fn args(&self, release_name: &str, namespace: &str) -> Vec<String> {
        let mut args = vec![
            "history".to_string(),
            release_name.to_string(),
            "--namespace".to_string(),
            namespace.to_string(),
            "--max".to_string(),
            "1".to_string(),
            "--output".to_string(),
            "json".to_string(),
        ];
        if let Some(context) = &self.kube_context {
            args.push("--kube-context".to_string());
            args.push(context.clone());
        }
        args
    }
}

impl Default for HelmInspector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReleaseInspector for HelmInspector {
    async fn inspect(&self, release_name: &str, namespace: &str) -> Result<ReleaseSnapshot> {
        let args = self.args(release_name, namespace);
        tracing::debug!(program = %self.program, args = ?args, "inspecting release");

        let output = tokio::process::Command::new(&self.program)
            .args(&args)
            .output()
            .await
            .map_err(|source| WaitError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if is_not_found_message(&stderr) {
                tracing::debug!(release = release_name, namespace, "release not found");
                return Ok(ReleaseSnapshot::not_found());
            }
            return Err(WaitError::CommandFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        parse_history(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Message helm prints when the release has no history in the namespace
const RELEASE_NOT_FOUND: &str = "release: not found";

/// Whether helm's stderr says the release does not exist
///
/// Other "not found" failures (kube context, credential plugins) are
/// operational and must not be mistaken for a missing release.
fn is_not_found_message(stderr: &str) -> bool {
    stderr.to_lowercase().contains(RELEASE_NOT_FOUND)
}

/// Parse `helm history --output json` into the latest snapshot
///
/// Blank output, `null` and `[]` mean the release does not exist. When more
/// than one record is present the highest revision wins.
pub fn parse_history(stdout: &str) -> Result<ReleaseSnapshot> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(ReleaseSnapshot::not_found());
    }

    let entries: Option<Vec<ReleaseSnapshot>> = serde_json::from_str(trimmed)?;
    let latest = entries
        .unwrap_or_default()
        .into_iter()
        .max_by_key(|entry| entry.revision)
        .unwrap_or_default();

    if latest.is_not_found() {
        Ok(ReleaseSnapshot::not_found())
    } else {
        Ok(latest)
    }
}
