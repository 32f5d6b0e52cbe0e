//! Relwait Core - wait for a Helm release to stop changing
//!
//! This crate provides:
//! - `ReleaseSnapshot`: One observation of a release's latest revision
//! - `KnownStatus`: The fixed set of terminal statuses and the availability check
//! - `ReleaseInspector`: How a snapshot is obtained (Helm subprocess or scripted)
//! - `poll`: The bounded, fixed-interval wait loop

pub mod error;
pub mod inspector;
pub mod poll;
pub mod snapshot;
pub mod status;

pub use error::{Result, WaitError};
pub use inspector::{HelmInspector, ReleaseInspector, ScriptedInspector, ScriptedResponse};
pub use poll::poll;
pub use snapshot::{PollRequest, ReleaseSnapshot};
pub use status::{KnownStatus, is_available};
