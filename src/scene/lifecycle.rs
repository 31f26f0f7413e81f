//! Render loop state machine.
//!
//! The loop is self-rescheduling: each frame requests the next one at its
//! end. `FrameLoop` tracks the single outstanding request so pausing,
//! resuming and stopping never leave two requests in flight.

use std::fmt::Debug;

/// Host hook for "run again before the next repaint".
pub trait FrameScheduler {
    type Handle: Copy + PartialEq + Debug;

    /// Request one callback. `None` when the host refused the request.
    fn request_frame(&mut self) -> Option<Self::Handle>;

    fn cancel_frame(&mut self, handle: Self::Handle);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Paused,
    Stopped,
}

pub struct FrameLoop<S: FrameScheduler> {
    scheduler: S,
    state: LoopState,
    pending: Option<S::Handle>,
}

impl<S: FrameScheduler> FrameLoop<S> {
    /// A new loop is paused with nothing scheduled until `start`.
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            state: LoopState::Paused,
            pending: None,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn pending(&self) -> Option<S::Handle> {
        self.pending
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn start(&mut self) {
        self.resume();
    }

    /// Called at the top of the frame callback. The request that fired is
    /// consumed; returns whether the frame should run.
    pub fn begin_frame(&mut self) -> bool {
        self.pending = None;
        self.state == LoopState::Running
    }

    /// Called at the end of the frame callback to chain the next frame.
    pub fn end_frame(&mut self) {
        if self.state == LoopState::Running {
            self.schedule();
        }
    }

    /// Running -> Paused. Cancels the outstanding request.
    pub fn pause(&mut self) {
        if self.state == LoopState::Running {
            self.cancel_pending();
            self.state = LoopState::Paused;
        }
    }

    /// Paused -> Running. Schedules exactly one frame.
    pub fn resume(&mut self) {
        if self.state == LoopState::Paused {
            self.state = LoopState::Running;
            self.schedule();
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        if visible {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Terminal. Idempotent.
    pub fn stop(&mut self) {
        self.cancel_pending();
        self.state = LoopState::Stopped;
    }

    fn schedule(&mut self) {
        if self.pending.is_none() {
            self.pending = self.scheduler.request_frame();
            if self.pending.is_none() {
                log::warn!("[loop] frame request refused");
            }
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }
}
