//! Scheduler task driving the particle trail once per display refresh.
//!
//! The host calls [`FrameLoop::step`] from its repaint callback and keeps
//! requesting repaints for as long as it returns `true`. Tests call `step`
//! directly to single-step frames.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::surface::Surface;
use crate::trail::ParticleTrail;

/// Cloneable cancellation signal for a [`FrameLoop`]
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

#[derive(Debug, Default)]
pub struct FrameLoop {
    running: bool,
    cancel: CancelHandle,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) the loop. A previously cancelled loop gets a fresh handle.
    pub fn start(&mut self) {
        if self.cancel.is_cancelled() {
            self.cancel = CancelHandle::default();
        }
        if !self.running {
            log::debug!("Frame loop started after {} frames", self.frames);
        }
        self.running = true;
    }

    pub fn stop(&mut self) {
        if self.running {
            log::debug!("Frame loop stopped after {} frames", self.frames);
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running && !self.cancel.is_cancelled()
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Number of frames stepped so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs one frame: wipe the trail surface, then tick the trail.
    ///
    /// A stopped loop only wipes what the last frame left behind.
    /// Returns whether the host should schedule another frame.
    pub fn step(&mut self, trail: &mut ParticleTrail, surface: &mut dyn Surface) -> bool {
        if self.cancel.is_cancelled() {
            self.stop();
        }
        if !self.running {
            if !surface.is_blank() {
                surface.clear();
            }
            return false;
        }

        surface.clear();
        trail.tick(surface);
        self.frames += 1;
        true
    }
}
