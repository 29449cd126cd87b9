//! Wall-clock runtime for hosts that run collapsable surfaces on `std`.
//!
//! A host creates one [`StdRuntime`], hands its [`FrameClock`] to behaviors,
//! and calls [`StdRuntime::frame`] whenever it draws. Between frames it can
//! sleep until [`StdRuntime::set_frame_waker`] fires or poll
//! [`StdRuntime::take_frame_request`].

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use collapsable_core::{Clock, FrameClock, Runtime, RuntimeHandle, RuntimeScheduler};
use web_time::Instant;

type FrameWaker = Box<dyn Fn() + Send + Sync + 'static>;

/// Remembers that the runtime wants a frame and pokes the host about it.
#[derive(Default)]
pub struct StdScheduler {
    requested: AtomicBool,
    waker: Mutex<Option<FrameWaker>>,
}

impl StdScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears and returns the pending frame request.
    pub fn take_frame_request(&self) -> bool {
        self.requested.swap(false, Ordering::AcqRel)
    }

    pub fn set_frame_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        match self.waker.lock() {
            Ok(mut slot) => *slot = Some(Box::new(waker)),
            Err(_) => log::warn!("frame waker lock poisoned, waker dropped"),
        }
    }

    pub fn clear_frame_waker(&self) {
        if let Ok(mut slot) = self.waker.lock() {
            slot.take();
        }
    }
}

impl RuntimeScheduler for StdScheduler {
    fn schedule_frame(&self) {
        self.requested.store(true, Ordering::Release);
        if let Ok(slot) = self.waker.lock() {
            if let Some(waker) = slot.as_ref() {
                waker();
            }
        }
    }
}

impl fmt::Debug for StdScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdScheduler")
            .field("requested", &self.requested.load(Ordering::Acquire))
            .finish()
    }
}

/// Monotonic clock from `web_time`, so the same code runs on wasm.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed_millis(&self, since: Instant) -> u64 {
        u64::try_from(since.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn elapsed_nanos(&self, since: Instant) -> u64 {
        u64::try_from(since.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

/// A [`Runtime`] paced by the wall clock.
///
/// Frame times are nanoseconds since the runtime was created.
#[derive(Clone)]
pub struct StdRuntime {
    runtime: Runtime,
    scheduler: Arc<StdScheduler>,
    clock: StdClock,
    started: Instant,
}

impl StdRuntime {
    pub fn new() -> Self {
        let scheduler = Arc::new(StdScheduler::new());
        let clock = StdClock;
        Self {
            runtime: Runtime::new(scheduler.clone()),
            scheduler,
            started: clock.now(),
            clock,
        }
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn frame_clock(&self) -> FrameClock {
        self.runtime.frame_clock()
    }

    pub fn take_frame_request(&self) -> bool {
        self.scheduler.take_frame_request()
    }

    pub fn set_frame_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        self.scheduler.set_frame_waker(waker);
    }

    pub fn clear_frame_waker(&self) {
        self.scheduler.clear_frame_waker();
    }

    /// Runs one frame now: queued tasks, the frame callbacks, then whatever
    /// those callbacks woke. Returns the frame time.
    pub fn frame(&self) -> u64 {
        let handle = self.runtime.handle();
        let now = self.clock.elapsed_nanos(self.started);
        handle.drain_ui();
        handle.drain_frame_callbacks(now);
        handle.drain_ui();
        log::trace!("frame at {now}ns");
        now
    }

    pub fn needs_frame(&self) -> bool {
        self.runtime.needs_frame()
    }
}

impl Default for StdRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StdRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdRuntime")
            .field("runtime", &self.runtime)
            .field("scheduler", &self.scheduler)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/std_runtime_tests.rs"]
mod tests;
