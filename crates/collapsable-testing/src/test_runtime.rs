//! Virtual-time runtime for driving animations frame by frame.

use std::cell::Cell;
use std::future::Future;
use std::sync::Arc;

use collapsable_core::{DefaultScheduler, FrameClock, Runtime, RuntimeHandle, TaskHandle};

/// Length of one virtual frame (60 fps, rounded to 16ms).
pub const FRAME_DURATION_NANOS: u64 = 16_000_000;

/// Upper bound for [`TestRuntime::advance_until_idle`] so a runaway animation
/// fails the test instead of hanging it.
const MAX_IDLE_FRAMES: usize = 10_000;

/// Runtime whose clock only moves when the test says so.
///
/// Spawned futures run on [`TestRuntime::launch`] until their first
/// suspension. Every [`TestRuntime::advance_frame`] then moves the clock by
/// one frame, fires pending frame callbacks and resumes the woken futures.
pub struct TestRuntime {
    runtime: Runtime,
    frame_time_nanos: Cell<u64>,
    frames: Cell<usize>,
}

impl TestRuntime {
    pub fn new() -> Self {
        Self {
            runtime: Runtime::new(Arc::new(DefaultScheduler)),
            frame_time_nanos: Cell::new(0),
            frames: Cell::new(0),
        }
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn frame_clock(&self) -> FrameClock {
        self.runtime.frame_clock()
    }

    /// Timestamp of the most recent virtual frame.
    pub fn frame_time_nanos(&self) -> u64 {
        self.frame_time_nanos.get()
    }

    /// Frames advanced since creation.
    pub fn frame_count(&self) -> usize {
        self.frames.get()
    }

    /// Spawns `future` and runs it up to its first suspension point.
    pub fn launch<F>(&self, future: F) -> Option<TaskHandle>
    where
        F: Future<Output = ()> + 'static,
    {
        let handle = self.runtime.handle();
        let task = handle.spawn_ui(future);
        handle.drain_ui();
        task
    }

    /// Runs queued tasks without moving the clock.
    pub fn run_pending(&self) {
        self.runtime.handle().drain_ui();
    }

    /// Moves the clock one frame forward and runs everything it wakes.
    pub fn advance_frame(&self) {
        let handle = self.runtime.handle();
        handle.drain_ui();
        let time = self.frame_time_nanos.get() + FRAME_DURATION_NANOS;
        self.frame_time_nanos.set(time);
        self.frames.set(self.frames.get() + 1);
        handle.drain_frame_callbacks(time);
        handle.drain_ui();
    }

    pub fn advance_frames(&self, count: usize) {
        for _ in 0..count {
            self.advance_frame();
        }
    }

    /// Advances at least `millis` of virtual time, one frame at a time.
    pub fn advance_time_by(&self, millis: u64) {
        let frames = (millis * 1_000_000).div_ceil(FRAME_DURATION_NANOS);
        self.advance_frames(frames as usize);
    }

    /// True when no task is queued and no frame callback is waiting.
    pub fn is_idle(&self) -> bool {
        let handle = self.runtime.handle();
        !handle.has_frame_callbacks() && !handle.has_pending_ui()
    }

    /// Advances frames until nothing is left to run; returns how many frames
    /// that took.
    ///
    /// Panics if the runtime is still busy after a large number of frames.
    pub fn advance_until_idle(&self) -> usize {
        self.run_pending();
        let mut advanced = 0;
        while self.runtime.handle().has_frame_callbacks() {
            assert!(
                advanced < MAX_IDLE_FRAMES,
                "runtime still busy after {MAX_IDLE_FRAMES} frames"
            );
            self.advance_frame();
            advanced += 1;
        }
        log::trace!("idle after {advanced} frames");
        advanced
    }
}

impl Default for TestRuntime {
    fn default() -> Self {
        Self::new()
    }
}
