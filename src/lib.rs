#![warn(missing_docs)]
//! Soragen - async client for Sora 2 text-to-video generation via muapi.ai.
//!
//! This crate drives one video generation job through the provider's
//! asynchronous lifecycle: submit the request, poll for completion on a fixed
//! interval bounded by a deadline, then stream the finished MP4 to disk.
//!
//! # Quick Start
//!
//! ```no_run
//! use soragen::{ClipDuration, JobOutcome, JobSpec, SoraClient};
//!
//! #[tokio::main]
//! async fn main() -> soragen::Result<()> {
//!     // Reads the key from MUAPI_API_KEY when not set explicitly.
//!     let client = SoraClient::builder().build()?;
//!
//!     let spec = JobSpec::new("Ocean waves crashing on a rocky shore at sunset")
//!         .with_duration(ClipDuration::Secs10);
//!
//!     match client.run_job(&spec).await {
//!         JobOutcome::Succeeded { path, bytes } => {
//!             println!("saved {} ({bytes} bytes)", path.display());
//!         }
//!         JobOutcome::Failed { stage, reason } => {
//!             eprintln!("job failed during {stage}: {reason}");
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Batches are processed one job at a time, in order; a failing job never
//! aborts the batch (see [`SoraClient::run_batch`]). Individual stages are
//! also exposed ([`SoraClient::submit`], [`SoraClient::poll_until_terminal`],
//! [`SoraClient::download`]) for callers that need finer control, along with
//! a [`ProgressObserver`] seam for download progress and a
//! [`tokio_util::sync::CancellationToken`] checked on every poll tick and
//! download chunk.

mod client;
mod error;
mod progress;
mod transport;
mod types;

pub use client::{SoraClient, SoraClientBuilder};
pub use error::{Result, SoragenError};
pub use progress::{NoopProgress, ProgressObserver};
pub use types::{
    AspectRatio, BatchSummary, ClipDuration, DownloadedArtifact, JobHandle, JobOutcome, JobSpec,
    JobStatus, Resolution, Stage,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{Result, SoragenError};
    pub use crate::progress::{NoopProgress, ProgressObserver};
    pub use crate::types::{
        AspectRatio, ClipDuration, JobOutcome, JobSpec, JobStatus, Resolution,
    };
    pub use crate::{SoraClient, SoraClientBuilder};
}
