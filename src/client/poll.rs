//! Status polling.

use super::SoraClient;
use crate::error::{Result, SoragenError};
use crate::types::{JobHandle, JobStatus};
use serde::Deserialize;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Status strings the provider is known to report for in-flight jobs.
const IN_FLIGHT_STATUSES: [&str; 5] =
    ["pending", "queued", "processing", "starting", "in_progress"];

impl SoraClient {
    /// Polls the status endpoint on a fixed interval until the job reaches a
    /// terminal state, the deadline elapses, or `cancel` fires.
    ///
    /// Returns `JobStatus::Completed` or `JobStatus::Failed` (never
    /// `Pending`). Transport errors and non-success status codes on a tick
    /// are transient: logged and retried on the next tick, bounded only by
    /// the overall deadline. The deadline overrun is at most one interval.
    pub async fn poll_until_terminal(
        &self,
        handle: &JobHandle,
        cancel: &CancellationToken,
    ) -> Result<JobStatus> {
        let path = format!("/predictions/{}/result", handle.as_str());
        let start = Instant::now();

        loop {
            if cancel.is_cancelled() {
                return Err(SoragenError::Cancelled);
            }
            if start.elapsed() >= self.max_wait {
                return Err(SoragenError::Timeout(self.max_wait));
            }

            match self.tick(&path).await {
                Ok(JobStatus::Pending(raw)) => {
                    if IN_FLIGHT_STATUSES.contains(&raw.as_str()) {
                        tracing::debug!(
                            request_id = %handle,
                            status = %raw,
                            elapsed_secs = start.elapsed().as_secs(),
                            "job still in flight"
                        );
                    } else {
                        // Unrecognized status. Keep polling, but flag it: a
                        // future API version may have added a terminal state
                        // we do not know about.
                        tracing::warn!(
                            request_id = %handle,
                            status = %raw,
                            "unrecognized job status, treating as in-flight"
                        );
                    }
                }
                Ok(terminal) => return Ok(terminal),
                // Transport blips and provider error responses are transient
                // in this loop: a single blip must not abort a multi-minute
                // job. Retrying is bounded by the deadline above.
                Err(e) if e.is_transient() || matches!(e, SoragenError::Api { .. }) => {
                    tracing::warn!(request_id = %handle, error = %e, "transient poll error, retrying");
                }
                Err(e) => return Err(e),
            }

            tokio::select! {
                _ = tokio::time::sleep(self.poll_interval) => {}
                _ = cancel.cancelled() => return Err(SoragenError::Cancelled),
            }
        }
    }

    /// One status query. Non-success status codes come back as
    /// [`SoragenError::Api`], which the loop above retries; a success body
    /// that is not valid JSON is a protocol violation and terminal.
    async fn tick(&self, path: &str) -> Result<JobStatus> {
        let response = self.transport.get_json(path, self.poll_timeout).await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SoragenError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let text = response.text().await?;
        let payload: StatusResponse = serde_json::from_str(&text)?;
        interpret(payload)
    }
}

/// Wire shape of the status endpoint's response.
#[derive(Debug, Deserialize)]
struct StatusResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    outputs: Vec<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Interprets one status payload into a [`JobStatus`]. A completed job with
/// no outputs is a protocol violation, terminal and not retried.
fn interpret(payload: StatusResponse) -> Result<JobStatus> {
    let status = payload.status.unwrap_or_else(|| "unknown".into());
    match status.as_str() {
        "completed" => match payload.outputs.into_iter().next() {
            Some(url) if !url.is_empty() => Ok(JobStatus::Completed(url)),
            _ => Err(SoragenError::MalformedResponse(
                "completed job has no output URL".into(),
            )),
        },
        "failed" => Ok(JobStatus::Failed(
            payload.error.unwrap_or_else(|| "unknown error".into()),
        )),
        _ => Ok(JobStatus::Pending(status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> StatusResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_interpret_completed_with_url() {
        let payload = parse(r#"{"status": "completed", "outputs": ["https://cdn/x.mp4"]}"#);
        assert_eq!(
            interpret(payload).unwrap(),
            JobStatus::Completed("https://cdn/x.mp4".into())
        );
    }

    #[test]
    fn test_interpret_completed_takes_first_output() {
        let payload = parse(r#"{"status": "completed", "outputs": ["https://a", "https://b"]}"#);
        assert_eq!(
            interpret(payload).unwrap(),
            JobStatus::Completed("https://a".into())
        );
    }

    #[test]
    fn test_interpret_completed_without_outputs_is_malformed() {
        let payload = parse(r#"{"status": "completed", "outputs": []}"#);
        assert!(matches!(
            interpret(payload),
            Err(SoragenError::MalformedResponse(_))
        ));

        let payload = parse(r#"{"status": "completed"}"#);
        assert!(matches!(
            interpret(payload),
            Err(SoragenError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_interpret_failed_with_message() {
        let payload = parse(r#"{"status": "failed", "error": "content policy violation"}"#);
        assert_eq!(
            interpret(payload).unwrap(),
            JobStatus::Failed("content policy violation".into())
        );
    }

    #[test]
    fn test_interpret_failed_without_message_defaults() {
        let payload = parse(r#"{"status": "failed"}"#);
        assert_eq!(
            interpret(payload).unwrap(),
            JobStatus::Failed("unknown error".into())
        );
    }

    #[test]
    fn test_interpret_in_flight_and_unknown_statuses_are_pending() {
        for status in ["pending", "processing", "queued", "almost_done_promise"] {
            let payload = parse(&format!(r#"{{"status": "{status}"}}"#));
            assert_eq!(interpret(payload).unwrap(), JobStatus::Pending(status.into()));
        }
    }

    #[test]
    fn test_interpret_missing_status_is_pending_unknown() {
        let payload = parse(r#"{}"#);
        assert_eq!(
            interpret(payload).unwrap(),
            JobStatus::Pending("unknown".into())
        );
    }
}
