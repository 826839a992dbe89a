//! Progress reporting for batch runs

use tracing::info;

/// Receives human-readable progress and terminal messages
pub trait ProgressSink {
    fn report(&self, message: &str);
}

impl<F> ProgressSink for F
where
    F: Fn(&str),
{
    fn report(&self, message: &str) {
        self(message)
    }
}

/// Default sink writing through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ProgressSink for LogSink {
    fn report(&self, message: &str) {
        info!("{}", message);
    }
}

/// True when the 1-based `done` count lands on a reporting boundary
pub(crate) fn is_progress_point(done: usize, interval: usize) -> bool {
    interval > 0 && done % interval == 0
}
