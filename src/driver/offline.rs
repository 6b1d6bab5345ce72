use crate::driver::clock::{FrameRequest, FrameScheduler};
use crate::foundation::core::Fps;
use std::collections::VecDeque;

/// FIFO scheduler: requests queue up until the host pops them.
///
/// Cancelled requests are removed from the queue but a host may still hold a copy it popped
/// earlier; the [`crate::Driver`] ignores those.
#[derive(Debug, Default)]
pub struct QueuedScheduler {
    queue: VecDeque<FrameRequest>,
    next_id: u64,
    requested: u64,
    cancelled: u64,
}

impl QueuedScheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the oldest outstanding request.
    pub fn pop(&mut self) -> Option<FrameRequest> {
        self.queue.pop_front()
    }

    /// Peek at the oldest outstanding request.
    pub fn peek(&self) -> Option<FrameRequest> {
        self.queue.front().copied()
    }

    /// Number of outstanding requests.
    pub fn outstanding(&self) -> usize {
        self.queue.len()
    }

    /// Total requests made.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Total cancellations received.
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for QueuedScheduler {
    fn request_frame(&mut self) -> FrameRequest {
        let req = FrameRequest(self.next_id);
        self.next_id += 1;
        self.requested += 1;
        self.queue.push_back(req);
        req
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.cancelled += 1;
        self.queue.retain(|r| *r != request);
    }
}

/// Fixed-rate virtual clock for offline rendering.
///
/// Every tick pops the outstanding request and stamps it with the next frame time, so frame
/// `n` is delivered at `start_ms + n / fps`.
#[derive(Debug)]
pub struct OfflineClock {
    queue: QueuedScheduler,
    fps: Fps,
    start_ms: f64,
    ticks: u64,
}

impl OfflineClock {
    /// Clock starting at `start_ms`.
    pub fn new(fps: Fps, start_ms: f64) -> Self {
        Self {
            queue: QueuedScheduler::new(),
            fps,
            start_ms,
            ticks: 0,
        }
    }

    /// Deliver the next outstanding request with its timestamp.
    pub fn tick(&mut self) -> Option<(FrameRequest, f64)> {
        let req = self.queue.pop()?;
        let ts = self.start_ms + self.fps.frames_to_ms(self.ticks);
        self.ticks += 1;
        Some((req, ts))
    }

    /// Frames delivered so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Frame rate of this clock.
    pub fn fps(&self) -> Fps {
        self.fps
    }
}

impl FrameScheduler for OfflineClock {
    fn request_frame(&mut self) -> FrameRequest {
        self.queue.request_frame()
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.queue.cancel_frame(request);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/driver/offline.rs"]
mod tests;
