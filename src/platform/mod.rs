//! Platform abstraction layer
//!
//! The wheel core never touches the host directly. This module holds the
//! host-side plumbing:
//! - `FrameLoop`: generation guard for the self-rescheduling frame callback
//! - `web` (wasm32): mounting a wheel into a DOM container

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Guard for a self-rescheduling frame callback.
///
/// Each scheduled callback carries the generation it was started under and
/// checks [`FrameLoop::is_current`] before doing any work, so a stopped or
/// restarted loop never runs a stale continuation.
#[derive(Debug, Clone, Default)]
pub struct FrameLoop {
    generation: u64,
    running: bool,
}

impl FrameLoop {
    /// Start (or restart) the loop, invalidating earlier callbacks
    pub fn start(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.running = true;
        self.generation
    }

    /// Stop the loop; any callback already scheduled becomes a no-op
    pub fn stop(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.running && generation == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restart_invalidates_old_generation() {
        let mut frames = FrameLoop::default();
        assert!(!frames.is_running());
        let first = frames.start();
        assert!(frames.is_current(first));
        let second = frames.start();
        assert!(!frames.is_current(first));
        assert!(frames.is_current(second));
    }

    #[test]
    fn test_stop_invalidates_everything() {
        let mut frames = FrameLoop::default();
        let generation = frames.start();
        frames.stop();
        assert!(!frames.is_running());
        assert!(!frames.is_current(generation));
        frames.stop();
        assert!(!frames.is_current(generation));
    }
}
