//! Release inspection
//!
//! The wait loop only needs one question answered: what is the latest
//! revision of this release right now? [`ReleaseInspector`] is that question.
//! [`HelmInspector`] asks the `helm` binary; [`ScriptedInspector`] replays a
//! fixed list of answers for tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::snapshot::ReleaseSnapshot;

pub mod helm;
pub mod mock;

pub use helm::HelmInspector;
pub use mock::{ScriptedInspector, ScriptedResponse};

/// Source of release snapshots
///
/// Implementations must return [`ReleaseSnapshot::not_found`] (not an error)
/// when the release does not exist in the namespace. Errors are reserved for
/// the inspection itself failing, and end the wait run.
#[async_trait]
pub trait ReleaseInspector: Send + Sync {
    /// Inspect the most recent revision of a release
    async fn inspect(&self, release_name: &str, namespace: &str) -> Result<ReleaseSnapshot>;
}
