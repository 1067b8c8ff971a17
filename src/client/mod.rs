//! The Sora generation client: configuration and single-job orchestration.

mod download;
mod poll;
mod submit;

use crate::error::{Result, SoragenError};
use crate::progress::{NoopProgress, ProgressObserver};
use crate::transport::Transport;
use crate::types::{BatchSummary, JobOutcome, JobSpec, JobStatus, Stage};
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const DEFAULT_BASE_URL: &str = "https://api.muapi.ai/api/v1";
const DEFAULT_OUTPUT_DIR: &str = "sora_videos";

/// Builder for [`SoraClient`].
#[derive(Debug, Clone)]
pub struct SoraClientBuilder {
    api_key: Option<String>,
    base_url: String,
    output_dir: PathBuf,
    poll_interval: Duration,
    max_wait: Duration,
    submit_timeout: Duration,
    poll_timeout: Duration,
    download_timeout: Duration,
}

impl Default for SoraClientBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            poll_interval: Duration::from_secs(5),
            max_wait: Duration::from_secs(600), // 10 minutes for video
            submit_timeout: Duration::from_secs(60),
            poll_timeout: Duration::from_secs(30),
            download_timeout: Duration::from_secs(300),
        }
    }
}

impl SoraClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key. Falls back to the `MUAPI_API_KEY` env var.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Overrides the API base URL (used by tests against a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the directory artifacts are written to.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Sets the fixed interval between status polls.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the maximum wall-clock time to wait for a job to finish.
    pub fn max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }

    /// Sets the per-request timeout for submission.
    pub fn submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = timeout;
        self
    }

    /// Sets the per-request timeout for each status poll.
    pub fn poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    /// Sets the timeout for the artifact download (transfer, not API latency).
    pub fn download_timeout(mut self, timeout: Duration) -> Self {
        self.download_timeout = timeout;
        self
    }

    /// Builds the client, resolving the API key. Fails with
    /// [`SoragenError::Auth`] when no key is supplied and `MUAPI_API_KEY` is
    /// unset; there is no built-in fallback credential.
    pub fn build(self) -> Result<SoraClient> {
        let api_key = self
            .api_key
            .or_else(|| std::env::var("MUAPI_API_KEY").ok())
            .ok_or_else(|| {
                SoragenError::Auth("MUAPI_API_KEY not set and no API key provided".into())
            })?;

        Ok(SoraClient {
            transport: Transport::new(api_key, self.base_url),
            output_dir: self.output_dir,
            poll_interval: self.poll_interval,
            max_wait: self.max_wait,
            submit_timeout: self.submit_timeout,
            poll_timeout: self.poll_timeout,
            download_timeout: self.download_timeout,
        })
    }
}

/// Client for the muapi.ai Sora 2 text-to-video API.
///
/// Drives one job at a time through submit → poll → download. See
/// [`SoraClient::run_job`] for the full lifecycle or the individual stage
/// methods for finer control.
pub struct SoraClient {
    pub(crate) transport: Transport,
    pub(crate) output_dir: PathBuf,
    pub(crate) poll_interval: Duration,
    pub(crate) max_wait: Duration,
    pub(crate) submit_timeout: Duration,
    pub(crate) poll_timeout: Duration,
    pub(crate) download_timeout: Duration,
}

impl SoraClient {
    /// Creates a new [`SoraClientBuilder`].
    pub fn builder() -> SoraClientBuilder {
        SoraClientBuilder::new()
    }

    /// Runs one job to completion with no progress reporting and no external
    /// cancellation. Never returns an error; all failures fold into
    /// [`JobOutcome::Failed`].
    pub async fn run_job(&self, spec: &JobSpec) -> JobOutcome {
        self.run_job_with(spec, &NoopProgress, &CancellationToken::new())
            .await
    }

    /// Runs one job to completion, reporting download progress to `observer`
    /// and aborting promptly if `cancel` is triggered.
    pub async fn run_job_with(
        &self,
        spec: &JobSpec,
        observer: &dyn ProgressObserver,
        cancel: &CancellationToken,
    ) -> JobOutcome {
        let handle = match self.submit(spec).await {
            Ok(handle) => handle,
            Err(e) => {
                return JobOutcome::Failed {
                    stage: Stage::Submit,
                    reason: e.to_string(),
                }
            }
        };
        tracing::info!(request_id = %handle, prompt = %spec.prompt, "job submitted");

        let status = match self.poll_until_terminal(&handle, cancel).await {
            Ok(status) => status,
            Err(e) => {
                return JobOutcome::Failed {
                    stage: Stage::Poll,
                    reason: e.to_string(),
                }
            }
        };

        let url = match status {
            JobStatus::Completed(url) => url,
            JobStatus::Failed(reason) => {
                return JobOutcome::Failed {
                    stage: Stage::Poll,
                    reason,
                }
            }
            // poll_until_terminal never yields Pending.
            JobStatus::Pending(raw) => {
                return JobOutcome::Failed {
                    stage: Stage::Poll,
                    reason: format!("polling ended in non-terminal state: {raw}"),
                }
            }
        };
        tracing::info!(request_id = %handle, "job completed, downloading artifact");

        match self.download(&url, &spec.prompt, observer, cancel).await {
            Ok(artifact) => JobOutcome::Succeeded {
                path: artifact.path,
                bytes: artifact.bytes,
            },
            Err(e) => JobOutcome::Failed {
                stage: Stage::Download,
                reason: e.to_string(),
            },
        }
    }

    /// Processes a batch of jobs strictly sequentially, in order. A failed
    /// job never aborts the batch; the summary tallies both sides.
    pub async fn run_batch(&self, specs: &[JobSpec]) -> BatchSummary {
        let mut summary = BatchSummary::default();

        for (i, spec) in specs.iter().enumerate() {
            tracing::info!(
                job = i + 1,
                total = specs.len(),
                prompt = %spec.prompt,
                "starting job"
            );
            let outcome = self.run_job(spec).await;
            match &outcome {
                JobOutcome::Succeeded { path, bytes } => {
                    tracing::info!(path = %path.display(), bytes, "job succeeded");
                    summary.succeeded += 1;
                }
                JobOutcome::Failed { stage, reason } => {
                    tracing::warn!(%stage, %reason, "job failed");
                    summary.failed += 1;
                }
            }
            summary.outcomes.push(outcome);
        }

        tracing::info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            "batch finished"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_with_explicit_key() {
        let client = SoraClientBuilder::new().api_key("test-key").build();
        assert!(client.is_ok());
    }

    #[test]
    fn test_builder_without_key_fails() {
        std::env::remove_var("MUAPI_API_KEY");
        let client = SoraClientBuilder::new().build();
        assert!(matches!(client, Err(SoragenError::Auth(_))));
    }

    #[test]
    fn test_builder_defaults() {
        let client = SoraClientBuilder::new().api_key("k").build().unwrap();
        assert_eq!(client.poll_interval, Duration::from_secs(5));
        assert_eq!(client.max_wait, Duration::from_secs(600));
        assert_eq!(client.submit_timeout, Duration::from_secs(60));
        assert_eq!(client.poll_timeout, Duration::from_secs(30));
        assert_eq!(client.download_timeout, Duration::from_secs(300));
        assert_eq!(client.output_dir, PathBuf::from("sora_videos"));
    }

    #[test]
    fn test_builder_custom_settings() {
        let client = SoraClientBuilder::new()
            .api_key("k")
            .output_dir("/tmp/clips")
            .poll_interval(Duration::from_secs(2))
            .max_wait(Duration::from_secs(120))
            .download_timeout(Duration::from_secs(900))
            .build()
            .unwrap();
        assert_eq!(client.output_dir, PathBuf::from("/tmp/clips"));
        assert_eq!(client.poll_interval, Duration::from_secs(2));
        assert_eq!(client.max_wait, Duration::from_secs(120));
        assert_eq!(client.download_timeout, Duration::from_secs(900));
    }
}
