//! The wait loop
//!
//! Inspects a release once per attempt until it reports a terminal status or
//! the attempt budget runs out. Attempts are spaced by a fixed interval and
//! there is no sleep after the last one, so a run lasts roughly
//! `(max_attempts - 1) * interval`.

use crate::error::Result;
use crate::inspector::ReleaseInspector;
use crate::snapshot::{PollRequest, ReleaseSnapshot};
use crate::status::is_available;

/// Wait for a release to become available
///
/// Returns the first available snapshot, or [`ReleaseSnapshot::not_found`]
/// when the budget is exhausted. A release that never appeared and one that
/// never settled both end in the sentinel. Inspector errors are returned
/// immediately and never retried.
pub async fn poll<I>(inspector: &I, request: &PollRequest) -> Result<ReleaseSnapshot>
where
    I: ReleaseInspector + ?Sized,
{
    let max_attempts = request.max_attempts();

    for attempt in 1..=max_attempts {
        tracing::debug!(
            release = %request.release_name,
            namespace = %request.namespace,
            attempt,
            max_attempts,
            "inspecting release"
        );

        let snapshot = inspector
            .inspect(&request.release_name, &request.namespace)
            .await?;

        if !snapshot.is_not_found() && is_available(&snapshot) {
            return Ok(snapshot);
        }

        let status = if snapshot.is_not_found() {
            "not found"
        } else {
            snapshot.status.as_str()
        };
        tracing::info!("{} is {}... waiting...", request.release_name, status);

        if attempt < max_attempts {
            tokio::time::sleep(request.interval()).await;
        }
    }

    tracing::warn!(
        "{} took too long to become available... exiting...",
        request.release_name
    );
    Ok(ReleaseSnapshot::not_found())
}
