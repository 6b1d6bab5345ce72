/// Handle for one requested frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

/// Host per-frame scheduling primitive (a browser's `requestAnimationFrame`, a vsync tick, or
/// an offline clock).
pub trait FrameScheduler {
    /// Ask the host for one frame callback.
    fn request_frame(&mut self) -> FrameRequest;
    /// Withdraw a request made with [`FrameScheduler::request_frame`].
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// Timing handed to the per-frame callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTime {
    /// Host timestamp in milliseconds.
    pub timestamp_ms: f64,
    /// Milliseconds since the first frame after `start`.
    pub since_start_ms: f64,
}

impl FrameTime {
    /// A frame at `timestamp_ms` long after start, with every one-shot entrance finished.
    pub fn settled(timestamp_ms: f64) -> Self {
        Self {
            timestamp_ms,
            since_start_ms: f64::INFINITY,
        }
    }
}

/// Loop state owned by a [`Driver`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationState {
    /// Timestamp of the most recent frame.
    pub last_timestamp: Option<f64>,
    /// Timestamp of the first frame since `start`.
    pub started_at: Option<f64>,
    /// Whether frame callbacks may draw.
    pub active: bool,
}

/// Cooperative, single-threaded frame loop.
///
/// At most one request is in flight. Each accepted frame runs its callback and then requests the
/// next frame before returning. After [`Driver::stop`] every callback is a no-op, including one
/// the host had already queued.
#[derive(Debug)]
pub struct Driver<S: FrameScheduler> {
    scheduler: S,
    state: AnimationState,
    pending: Option<FrameRequest>,
}

impl<S: FrameScheduler> Driver<S> {
    /// Create an inactive driver on top of `scheduler`.
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            state: AnimationState::default(),
            pending: None,
        }
    }

    /// Activate the loop and request the first frame. Restarting resets the start time.
    pub fn start(&mut self) {
        if self.state.active {
            return;
        }
        self.state = AnimationState {
            active: true,
            ..AnimationState::default()
        };
        self.pending = Some(self.scheduler.request_frame());
    }

    /// Cancel the pending request and deactivate.
    pub fn stop(&mut self) {
        if let Some(req) = self.pending.take() {
            self.scheduler.cancel_frame(req);
        }
        self.state.active = false;
    }

    /// Host entry point for a frame callback.
    ///
    /// Returns `false` without calling `draw` when the driver is stopped or `request` is not the
    /// one currently pending.
    pub fn on_frame<F>(&mut self, request: FrameRequest, timestamp_ms: f64, draw: F) -> bool
    where
        F: FnOnce(FrameTime),
    {
        if !self.state.active {
            return false;
        }
        if self.pending != Some(request) {
            tracing::trace!(request = request.0, "ignoring stale frame callback");
            return false;
        }
        self.pending = None;

        let started_at = *self.state.started_at.get_or_insert(timestamp_ms);
        self.state.last_timestamp = Some(timestamp_ms);
        draw(FrameTime {
            timestamp_ms,
            since_start_ms: (timestamp_ms - started_at).max(0.0),
        });

        self.pending = Some(self.scheduler.request_frame());
        true
    }

    /// Whether frame callbacks may draw.
    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// Current loop state.
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// The request the driver is waiting on.
    pub fn pending(&self) -> Option<FrameRequest> {
        self.pending
    }

    /// Borrow the scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutably borrow the scheduler (hosts pump it).
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Consume the driver, returning the scheduler.
    pub fn into_scheduler(self) -> S {
        self.scheduler
    }
}

#[cfg(test)]
#[path = "../../tests/unit/driver/clock.rs"]
mod tests;
