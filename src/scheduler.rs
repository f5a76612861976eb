//! Frame scheduling.
//!
//! A scheduler hands out one pending frame at a time. Whoever requested a
//! frame owns the returned handle and must cancel it exactly once if the
//! frame should no longer run.

use crate::error::HostError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

pub trait FrameScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, HostError>;

    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler driven by hand: frames only happen when the owner calls
/// [`ManualScheduler::take_due`].
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: i32,
    pending: Option<FrameHandle>,
    requested: usize,
    cancelled: Vec<FrameHandle>,
}

impl ManualScheduler {
    pub fn new() -> ManualScheduler {
        ManualScheduler::default()
    }

    /// Advances the frame clock, yielding the frame that is now due.
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn requested(&self) -> usize {
        self.requested
    }

    pub fn cancelled(&self) -> &[FrameHandle] {
        &self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, HostError> {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        self.requested += 1;
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
        self.cancelled.push(handle);
    }
}
