//! Basic video generation demo.
//!
//! Run with: `cargo run --example generate`
//!
//! Requires the `MUAPI_API_KEY` environment variable.

use soragen::{ClipDuration, JobOutcome, JobSpec, SoraClient};

#[tokio::main]
async fn main() -> soragen::Result<()> {
    tracing_subscriber::fmt::init();

    let client = SoraClient::builder().output_dir("sora_videos").build()?;

    let spec = JobSpec::new("Ocean waves crashing on a rocky shore at sunset")
        .with_duration(ClipDuration::Secs10);

    println!("Generating video (this may take a few minutes)...");
    let progress = |bytes: u64, percent: Option<f64>| match percent {
        Some(p) => println!("downloaded {bytes} bytes ({p:.1}%)"),
        None => println!("downloaded {bytes} bytes"),
    };

    match client
        .run_job_with(
            &spec,
            &progress,
            &tokio_util::sync::CancellationToken::new(),
        )
        .await
    {
        JobOutcome::Succeeded { path, bytes } => {
            println!("Saved {} ({bytes} bytes)", path.display());
        }
        JobOutcome::Failed { stage, reason } => {
            eprintln!("Generation failed during {stage}: {reason}");
        }
    }

    Ok(())
}
