//! What the runtime needs from its host.

/// Tells the host that the runtime has work for the next frame.
///
/// Task wakers hold the scheduler, so it has to be shareable across threads
/// even though the runtime itself is not.
pub trait RuntimeScheduler: Send + Sync {
    fn schedule_frame(&self);
}

/// Source of frame timestamps.
pub trait Clock: Send + Sync {
    type Instant: Copy + Send + Sync;

    fn now(&self) -> Self::Instant;

    fn elapsed_millis(&self, since: Self::Instant) -> u64;

    /// Defaults to millisecond precision.
    fn elapsed_nanos(&self, since: Self::Instant) -> u64 {
        self.elapsed_millis(since).saturating_mul(1_000_000)
    }
}
