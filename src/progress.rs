//! Download progress reporting seam.

/// Observer for artifact download progress.
///
/// Called after every chunk with the cumulative byte count and, when the
/// response carried a `Content-Length`, the completion percentage. Rendering
/// (console line, progress bar, nothing) is the implementor's concern.
pub trait ProgressObserver: Send + Sync {
    /// Reports cumulative bytes written and optional percent complete.
    fn on_progress(&self, bytes: u64, percent: Option<f64>);
}

/// Observer that discards all progress events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressObserver for NoopProgress {
    fn on_progress(&self, _bytes: u64, _percent: Option<f64>) {}
}

impl<F> ProgressObserver for F
where
    F: Fn(u64, Option<f64>) + Send + Sync,
{
    fn on_progress(&self, bytes: u64, percent: Option<f64>) {
        self(bytes, percent)
    }
}
