//! Artifact download: streamed to a temp file, renamed into place on success.

use super::SoraClient;
use crate::error::{Result, SoragenError};
use crate::progress::ProgressObserver;
use crate::types::DownloadedArtifact;
use chrono::{DateTime, Local};
use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;

/// Longest prompt prefix considered for the filename.
const PROMPT_PREFIX_CHARS: usize = 50;

impl SoraClient {
    /// Streams the artifact at `url` into the output directory.
    ///
    /// The destination name is derived from the current local time and a
    /// sanitized prefix of the prompt. Data is written to a `.part` file and
    /// renamed only once the stream completed, so a failed or cancelled
    /// transfer never leaves a file at the final path.
    pub async fn download(
        &self,
        url: &str,
        prompt: &str,
        observer: &dyn ProgressObserver,
        cancel: &CancellationToken,
    ) -> Result<DownloadedArtifact> {
        let response = self.transport.get_stream(url, self.download_timeout).await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SoragenError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        tokio::fs::create_dir_all(&self.output_dir).await?;
        let filename = artifact_filename(prompt, Local::now());
        let dest = self.output_dir.join(&filename);
        let temp = self.output_dir.join(format!("{filename}.part"));

        let total = response.content_length().filter(|len| *len > 0);
        let mut stream = response.bytes_stream();
        let mut file = tokio::fs::File::create(&temp).await?;
        let mut written: u64 = 0;

        let transfer: Result<()> = async {
            while let Some(chunk) = stream.next().await {
                if cancel.is_cancelled() {
                    return Err(SoragenError::Cancelled);
                }
                let chunk = chunk?;
                file.write_all(&chunk).await?;
                written += chunk.len() as u64;
                let percent = total.map(|len| written as f64 / len as f64 * 100.0);
                observer.on_progress(written, percent);
            }
            file.flush().await?;
            Ok(())
        }
        .await;

        drop(file);
        match transfer {
            Ok(()) => {
                tokio::fs::rename(&temp, &dest).await?;
                tracing::info!(path = %dest.display(), bytes = written, "artifact saved");
                Ok(DownloadedArtifact {
                    path: dest,
                    bytes: written,
                })
            }
            Err(e) => {
                if let Err(cleanup) = tokio::fs::remove_file(&temp).await {
                    tracing::warn!(path = %temp.display(), error = %cleanup, "failed to remove partial download");
                }
                Err(e)
            }
        }
    }
}

/// Builds the deterministic artifact filename:
/// `{YYYYMMDD_HHMMSS}_{sanitized_prompt}.mp4`.
pub(crate) fn artifact_filename(prompt: &str, at: DateTime<Local>) -> String {
    format!("{}_{}.mp4", at.format("%Y%m%d_%H%M%S"), sanitize_prompt(prompt))
}

/// Reduces a prompt to a filesystem-safe prefix: first 50 characters, keep
/// alphanumeric/space/hyphen/underscore, trim, spaces become underscores.
fn sanitize_prompt(prompt: &str) -> String {
    let kept: String = prompt
        .chars()
        .take(PROMPT_PREFIX_CHARS)
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    kept.trim().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn test_sanitize_strips_punctuation() {
        assert_eq!(sanitize_prompt("A dragon! @2024"), "A_dragon_2024");
    }

    #[test]
    fn test_sanitize_keeps_hyphen_and_underscore() {
        assert_eq!(sanitize_prompt("neo-tokyo_alley"), "neo-tokyo_alley");
    }

    #[test]
    fn test_sanitize_trims_before_replacing_spaces() {
        assert_eq!(sanitize_prompt("  a cat  "), "a_cat");
    }

    #[test]
    fn test_sanitize_truncates_to_prefix() {
        let long = "x".repeat(80);
        assert_eq!(sanitize_prompt(&long).len(), PROMPT_PREFIX_CHARS);
    }

    #[test]
    fn test_sanitize_all_punctuation_yields_empty() {
        assert_eq!(sanitize_prompt("!?!#$%"), "");
    }

    #[test]
    fn test_artifact_filename_format() {
        assert_eq!(
            artifact_filename("A dragon! @2024", fixed_time()),
            "20240102_030405_A_dragon_2024.mp4"
        );
    }
}
