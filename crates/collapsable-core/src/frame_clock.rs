use std::cell::{Cell, RefCell};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use crate::runtime::{FrameCallbackId, RuntimeHandle};

/// Frame-paced time source for animations.
///
/// Animations await [`FrameClock::next_frame`] once per step and read the
/// frame's timestamp, in nanoseconds, from the result.
#[derive(Clone)]
pub struct FrameClock {
    runtime: RuntimeHandle,
}

impl FrameClock {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self { runtime }
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.clone()
    }

    /// Future resolving to the timestamp of the next frame.
    ///
    /// Never resolves if the runtime is gone, so animations stop with it.
    pub fn next_frame(&self) -> NextFrame {
        NextFrame {
            runtime: self.runtime.clone(),
            slot: Rc::new(FrameSlot::default()),
            callback: None,
        }
    }
}

impl fmt::Debug for FrameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameClock")
            .field("runtime", &self.runtime)
            .finish()
    }
}

/// Shared between a [`NextFrame`] and the frame callback it registered.
#[derive(Default)]
struct FrameSlot {
    time: Cell<Option<u64>>,
    waker: RefCell<Option<Waker>>,
}

/// Future returned by [`FrameClock::next_frame`].
///
/// Registers its frame callback on first poll and unregisters it if dropped
/// before the frame arrives.
pub struct NextFrame {
    runtime: RuntimeHandle,
    slot: Rc<FrameSlot>,
    callback: Option<FrameCallbackId>,
}

impl Future for NextFrame {
    type Output = u64;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<u64> {
        if let Some(time) = self.slot.time.get() {
            self.callback = None;
            return Poll::Ready(time);
        }
        *self.slot.waker.borrow_mut() = Some(cx.waker().clone());
        if self.callback.is_none() {
            let slot = Rc::downgrade(&self.slot);
            self.callback = self.runtime.register_frame_callback(move |time| {
                let Some(slot) = slot.upgrade() else {
                    return;
                };
                slot.time.set(Some(time));
                let waker = slot.waker.borrow_mut().take();
                if let Some(waker) = waker {
                    waker.wake();
                }
            });
        }
        Poll::Pending
    }
}

impl Drop for NextFrame {
    fn drop(&mut self) {
        if let Some(id) = self.callback.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}

impl fmt::Debug for NextFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NextFrame")
            .field("time", &self.slot.time.get())
            .field("registered", &self.callback.is_some())
            .finish()
    }
}
