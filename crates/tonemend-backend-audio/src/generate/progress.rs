//! Progress reporting and cancellation.
//!
//! The orchestrator calls its sink once after every block. That call is the
//! only point where a caller can observe progress or stop the request.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;

use tonemend_spec::ProgressEvent;

/// Receives progress between blocks.
///
/// Returning `ControlFlow::Break` cancels the request; the file being
/// rendered is discarded.
pub trait ProgressSink {
    /// Called after each block is encoded.
    fn on_progress(&mut self, event: &ProgressEvent) -> ControlFlow<()>;
}

impl<F> ProgressSink for F
where
    F: FnMut(&ProgressEvent) -> ControlFlow<()>,
{
    fn on_progress(&mut self, event: &ProgressEvent) -> ControlFlow<()> {
        self(event)
    }
}

/// Ignores progress and never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_progress(&mut self, _event: &ProgressEvent) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Forwards events over a channel. A dropped receiver cancels.
#[derive(Debug, Clone)]
pub struct ChannelSink(pub Sender<ProgressEvent>);

impl ProgressSink for ChannelSink {
    fn on_progress(&mut self, event: &ProgressEvent) -> ControlFlow<()> {
        match self.0.send(*event) {
            Ok(()) => ControlFlow::Continue(()),
            Err(_) => ControlFlow::Break(()),
        }
    }
}

/// Shared cancellation switch, checked at block boundaries.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates an unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Takes effect after the current block.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl ProgressSink for CancelFlag {
    fn on_progress(&mut self, _event: &ProgressEvent) -> ControlFlow<()> {
        if self.is_cancelled() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}
