//! Core types for the job lifecycle: specifications, handles, statuses and
//! outcomes.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Allowed clip durations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClipDuration {
    /// 5 second clip.
    #[serde(rename = "5s")]
    Secs5,
    /// 10 second clip (default).
    #[default]
    #[serde(rename = "10s")]
    Secs10,
    /// 15 second clip.
    #[serde(rename = "15s")]
    Secs15,
    /// 20 second clip.
    #[serde(rename = "20s")]
    Secs20,
}

impl ClipDuration {
    /// Returns the duration as the API's string form (e.g. "10s").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Secs5 => "5s",
            Self::Secs10 => "10s",
            Self::Secs15 => "15s",
            Self::Secs20 => "20s",
        }
    }
}

impl std::fmt::Display for ClipDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Allowed output resolutions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// 720p (default).
    #[default]
    #[serde(rename = "720p")]
    P720,
    /// 1080p.
    #[serde(rename = "1080p")]
    P1080,
}

impl Resolution {
    /// Returns the resolution as the API's string form (e.g. "720p").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::P720 => "720p",
            Self::P1080 => "1080p",
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Allowed aspect ratios.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    /// 16:9 landscape (default).
    #[default]
    #[serde(rename = "16:9")]
    Landscape,
    /// 9:16 portrait.
    #[serde(rename = "9:16")]
    Portrait,
    /// 1:1 square.
    #[serde(rename = "1:1")]
    Square,
}

impl AspectRatio {
    /// Returns the aspect ratio as the API's string form (e.g. "16:9").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Landscape => "16:9",
            Self::Portrait => "9:16",
            Self::Square => "1:1",
        }
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A request to generate one video clip.
///
/// Immutable once built; the prompt is validated (non-empty) at submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSpec {
    /// The text prompt describing the desired video.
    pub prompt: String,
    /// Clip duration.
    pub duration: ClipDuration,
    /// Output resolution.
    pub resolution: Resolution,
    /// Output aspect ratio.
    pub aspect_ratio: AspectRatio,
}

impl JobSpec {
    /// Creates a new spec with the given prompt and default rendering
    /// parameters (10s, 720p, 16:9).
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            duration: ClipDuration::default(),
            resolution: Resolution::default(),
            aspect_ratio: AspectRatio::default(),
        }
    }

    /// Sets the clip duration.
    pub fn with_duration(mut self, duration: ClipDuration) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the output resolution.
    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Sets the aspect ratio.
    pub fn with_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }
}

/// Opaque identifier for a submitted job (the provider's `request_id`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle(String);

impl JobHandle {
    /// Wraps a provider-issued request identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of a job as observed on one poll. Each observation fully replaces
/// the previous one; nothing is merged across polls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    /// Job still in flight; carries the provider's raw status string.
    Pending(String),
    /// Job finished; carries the artifact URL.
    Completed(String),
    /// Job failed; carries the provider's error message.
    Failed(String),
}

impl JobStatus {
    /// Returns true for `Completed` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending(_))
    }
}

/// A successfully downloaded artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedArtifact {
    /// Absolute (or output-dir-relative) path of the final MP4 file.
    pub path: PathBuf,
    /// Total bytes written.
    pub bytes: u64,
}

/// The lifecycle stage a job failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Request submission.
    Submit,
    /// Status polling (includes provider-reported generation failures).
    Poll,
    /// Artifact download.
    Download,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Submit => write!(f, "submit"),
            Self::Poll => write!(f, "poll"),
            Self::Download => write!(f, "download"),
        }
    }
}

/// Terminal outcome of one job. All failure paths fold into `Failed`; the
/// orchestrator never panics or returns an `Err`, so a batch can keep going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// Job completed and the artifact was written.
    Succeeded {
        /// Final artifact path.
        path: PathBuf,
        /// Total bytes written.
        bytes: u64,
    },
    /// Job failed at some stage.
    Failed {
        /// Stage the failure occurred in.
        stage: Stage,
        /// Human-readable failure reason.
        reason: String,
    },
}

impl JobOutcome {
    /// Returns true if the job produced an artifact.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

/// Tally of a sequentially processed batch of jobs.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Number of jobs that produced an artifact.
    pub succeeded: usize,
    /// Number of jobs that failed at any stage.
    pub failed: usize,
    /// Per-job outcomes, in submission order.
    pub outcomes: Vec<JobOutcome>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_strings() {
        assert_eq!(ClipDuration::Secs5.as_str(), "5s");
        assert_eq!(ClipDuration::Secs20.as_str(), "20s");
        assert_eq!(Resolution::P1080.as_str(), "1080p");
        assert_eq!(AspectRatio::Portrait.as_str(), "9:16");
        assert_eq!(AspectRatio::Square.to_string(), "1:1");
    }

    #[test]
    fn test_enum_serde_uses_api_strings() {
        assert_eq!(
            serde_json::to_value(ClipDuration::Secs10).unwrap(),
            serde_json::json!("10s")
        );
        assert_eq!(
            serde_json::to_value(Resolution::P720).unwrap(),
            serde_json::json!("720p")
        );
        assert_eq!(
            serde_json::to_value(AspectRatio::Landscape).unwrap(),
            serde_json::json!("16:9")
        );

        let ratio: AspectRatio = serde_json::from_str(r#""9:16""#).unwrap();
        assert_eq!(ratio, AspectRatio::Portrait);
    }

    #[test]
    fn test_job_spec_defaults() {
        let spec = JobSpec::new("a cat");
        assert_eq!(spec.prompt, "a cat");
        assert_eq!(spec.duration, ClipDuration::Secs10);
        assert_eq!(spec.resolution, Resolution::P720);
        assert_eq!(spec.aspect_ratio, AspectRatio::Landscape);
    }

    #[test]
    fn test_job_spec_builder() {
        let spec = JobSpec::new("a dog")
            .with_duration(ClipDuration::Secs15)
            .with_resolution(Resolution::P1080)
            .with_aspect_ratio(AspectRatio::Portrait);
        assert_eq!(spec.duration, ClipDuration::Secs15);
        assert_eq!(spec.resolution, Resolution::P1080);
        assert_eq!(spec.aspect_ratio, AspectRatio::Portrait);
    }

    #[test]
    fn test_job_status_terminal() {
        assert!(!JobStatus::Pending("processing".into()).is_terminal());
        assert!(JobStatus::Completed("https://cdn/x.mp4".into()).is_terminal());
        assert!(JobStatus::Failed("moderation".into()).is_terminal());
    }

    #[test]
    fn test_job_outcome_is_success() {
        let ok = JobOutcome::Succeeded {
            path: PathBuf::from("out.mp4"),
            bytes: 10,
        };
        assert!(ok.is_success());

        let bad = JobOutcome::Failed {
            stage: Stage::Poll,
            reason: "timeout".into(),
        };
        assert!(!bad.is_success());
        assert_eq!(Stage::Download.to_string(), "download");
    }
}
