//! Job submission.

use super::SoraClient;
use crate::error::{Result, SoragenError};
use crate::types::{JobHandle, JobSpec};
use serde::{Deserialize, Serialize};

const SUBMIT_PATH: &str = "/openai-sora-2-text-to-video";

impl SoraClient {
    /// Submits a generation request and returns the provider's job handle.
    ///
    /// Fails with [`SoragenError::Api`] on a non-success status code and with
    /// [`SoragenError::MalformedResponse`] when a success response lacks a
    /// non-empty `request_id`. Neither is retried here.
    pub async fn submit(&self, spec: &JobSpec) -> Result<JobHandle> {
        if spec.prompt.trim().is_empty() {
            return Err(SoragenError::InvalidRequest(
                "prompt must not be empty".into(),
            ));
        }

        let body = SubmitRequest::from_spec(spec);
        let response = self
            .transport
            .post_json(SUBMIT_PATH, &body, self.submit_timeout)
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SoragenError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let text = response.text().await?;
        let parsed: SubmitResponse = serde_json::from_str(&text)?;
        match parsed.request_id {
            Some(id) if !id.is_empty() => {
                tracing::debug!(request_id = %id, "submission accepted");
                Ok(JobHandle::new(id))
            }
            _ => Err(SoragenError::MalformedResponse(format!(
                "no request_id in submission response: {text}"
            ))),
        }
    }
}

/// Wire shape of the submission body. Enum values pass through verbatim as
/// the provider's enumerated strings.
#[derive(Debug, Serialize)]
struct SubmitRequest {
    prompt: String,
    duration: String,
    resolution: String,
    aspect_ratio: String,
}

impl SubmitRequest {
    fn from_spec(spec: &JobSpec) -> Self {
        Self {
            prompt: spec.prompt.clone(),
            duration: spec.duration.as_str().to_string(),
            resolution: spec.resolution.as_str().to_string(),
            aspect_ratio: spec.aspect_ratio.as_str().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    #[serde(default)]
    request_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AspectRatio, ClipDuration, Resolution};

    #[test]
    fn test_request_body_shape() {
        let spec = JobSpec::new("A dragon over a castle")
            .with_duration(ClipDuration::Secs15)
            .with_resolution(Resolution::P1080)
            .with_aspect_ratio(AspectRatio::Portrait);
        let body = SubmitRequest::from_spec(&spec);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "prompt": "A dragon over a castle",
                "duration": "15s",
                "resolution": "1080p",
                "aspect_ratio": "9:16",
            })
        );
    }

    #[test]
    fn test_request_body_defaults() {
        let body = SubmitRequest::from_spec(&JobSpec::new("test"));
        assert_eq!(body.duration, "10s");
        assert_eq!(body.resolution, "720p");
        assert_eq!(body.aspect_ratio, "16:9");
    }

    #[test]
    fn test_submit_response_with_request_id() {
        let resp: SubmitResponse = serde_json::from_str(r#"{"request_id": "req-42"}"#).unwrap();
        assert_eq!(resp.request_id.as_deref(), Some("req-42"));
    }

    #[test]
    fn test_submit_response_missing_request_id() {
        let resp: SubmitResponse = serde_json::from_str(r#"{"detail": "accepted"}"#).unwrap();
        assert!(resp.request_id.is_none());
    }
}
