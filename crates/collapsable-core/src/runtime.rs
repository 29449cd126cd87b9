use std::cell::{Cell, RefCell};
use std::fmt;
use std::future::Future;
use std::mem;
use std::pin::Pin;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use std::task::{Context, Poll, Waker};

use crate::frame_clock::FrameClock;
use crate::platform::RuntimeScheduler;

pub(crate) type FrameCallbackId = u64;

type BoxedTask = Pin<Box<dyn Future<Output = ()> + 'static>>;
type FrameCallback = Box<dyn FnOnce(u64) + 'static>;

/// One spawned future. The future is taken out while it is being polled, so
/// `cancelled` is how a cancel reaches a task that is running right now.
struct Task {
    id: u64,
    future: RefCell<Option<BoxedTask>>,
    cancelled: Cell<bool>,
}

struct Executor {
    scheduler: Arc<dyn RuntimeScheduler>,
    waker: Waker,
    needs_frame: Cell<bool>,
    tasks: RefCell<Vec<Rc<Task>>>,
    next_task_id: Cell<u64>,
    frame_callbacks: RefCell<Vec<(FrameCallbackId, FrameCallback)>>,
    next_callback_id: Cell<FrameCallbackId>,
}

impl Executor {
    fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        let waker = futures_task::waker(Arc::new(FrameRequestWaker {
            scheduler: Arc::clone(&scheduler),
        }));
        Self {
            scheduler,
            waker,
            needs_frame: Cell::new(false),
            tasks: RefCell::new(Vec::new()),
            next_task_id: Cell::new(1),
            frame_callbacks: RefCell::new(Vec::new()),
            next_callback_id: Cell::new(1),
        }
    }

    fn request_frame(&self) {
        self.needs_frame.set(true);
        self.scheduler.schedule_frame();
    }

    fn spawn(&self, future: BoxedTask) -> u64 {
        let id = self.next_task_id.get();
        self.next_task_id.set(id + 1);
        self.tasks.borrow_mut().push(Rc::new(Task {
            id,
            future: RefCell::new(Some(future)),
            cancelled: Cell::new(false),
        }));
        self.request_frame();
        id
    }

    fn cancel(&self, id: u64) {
        let task = {
            let mut tasks = self.tasks.borrow_mut();
            match tasks.iter().position(|task| task.id == id) {
                Some(index) => tasks.remove(index),
                None => return,
            }
        };
        task.cancelled.set(true);
        // Dropped outside every borrow: the future's destructors may call
        // back into the runtime.
        let future = task.future.borrow_mut().take();
        drop(future);
        self.settle_needs_frame();
    }

    fn is_running(&self, id: u64) -> bool {
        self.tasks
            .borrow()
            .iter()
            .any(|task| task.id == id && !task.cancelled.get())
    }

    /// Polls every live task once. Returns whether anything finished or
    /// spawned, which may have unblocked the others.
    fn poll_once(&self) -> bool {
        let snapshot: Vec<Rc<Task>> = self.tasks.borrow().clone();
        if snapshot.is_empty() {
            return false;
        }
        let spawned_before = self.next_task_id.get();
        let mut cx = Context::from_waker(&self.waker);
        let mut progressed = false;

        for task in snapshot {
            let taken = task.future.borrow_mut().take();
            let Some(mut future) = taken else {
                continue;
            };
            match future.as_mut().poll(&mut cx) {
                Poll::Ready(()) => progressed = true,
                Poll::Pending if task.cancelled.get() => progressed = true,
                Poll::Pending => *task.future.borrow_mut() = Some(future),
            }
        }

        self.tasks
            .borrow_mut()
            .retain(|task| !task.cancelled.get() && task.future.borrow().is_some());
        progressed || self.next_task_id.get() != spawned_before
    }

    fn drain_ui(&self) {
        while self.poll_once() {}
        self.settle_needs_frame();
    }

    fn has_pending_ui(&self) -> bool {
        self.tasks
            .try_borrow()
            .map(|tasks| !tasks.is_empty())
            .unwrap_or(true)
    }

    fn register_frame_callback(&self, callback: FrameCallback) -> FrameCallbackId {
        let id = self.next_callback_id.get();
        self.next_callback_id.set(id + 1);
        self.frame_callbacks.borrow_mut().push((id, callback));
        self.request_frame();
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let removed = {
            let mut callbacks = self.frame_callbacks.borrow_mut();
            callbacks
                .iter()
                .position(|(entry, _)| *entry == id)
                .map(|index| callbacks.remove(index))
        };
        drop(removed);
        self.settle_needs_frame();
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    /// Runs the callbacks registered before this frame. Callbacks registered
    /// while it runs wait for the next one.
    fn run_frame(&self, frame_time_nanos: u64) {
        let due = mem::take(&mut *self.frame_callbacks.borrow_mut());
        for (_, callback) in due {
            callback(frame_time_nanos);
        }
        self.settle_needs_frame();
    }

    fn settle_needs_frame(&self) {
        let idle = self
            .frame_callbacks
            .try_borrow()
            .map(|callbacks| callbacks.is_empty())
            .unwrap_or(false)
            && !self.has_pending_ui();
        if idle {
            self.needs_frame.set(false);
        }
    }
}

/// Wakes the host when a task becomes ready; the next drain polls it.
struct FrameRequestWaker {
    scheduler: Arc<dyn RuntimeScheduler>,
}

impl futures_task::ArcWake for FrameRequestWaker {
    fn wake_by_ref(arc_self: &Arc<Self>) {
        arc_self.scheduler.schedule_frame();
    }
}

/// Owner of the single-threaded UI runtime.
///
/// Handles only hold a weak reference. Dropping the last `Runtime` drops
/// every pending task and frame callback with it.
#[derive(Clone)]
pub struct Runtime {
    executor: Rc<Executor>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            executor: Rc::new(Executor::new(scheduler)),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            executor: Rc::downgrade(&self.executor),
        }
    }

    pub fn needs_frame(&self) -> bool {
        self.executor.needs_frame.get()
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.handle())
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("needs_frame", &self.executor.needs_frame.get())
            .field("tasks", &self.executor.tasks.borrow().len())
            .field(
                "frame_callbacks",
                &self.executor.frame_callbacks.borrow().len(),
            )
            .finish()
    }
}

/// Scheduler for hosts that pump frames on their own, such as tests.
#[derive(Default, Debug)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}

#[derive(Clone)]
pub struct RuntimeHandle {
    executor: Weak<Executor>,
}

impl RuntimeHandle {
    fn with_executor<R>(&self, f: impl FnOnce(&Executor) -> R) -> Option<R> {
        self.executor.upgrade().map(|executor| f(&executor))
    }

    /// Asks the host for a frame.
    pub fn schedule(&self) {
        self.with_executor(Executor::request_frame);
    }

    pub fn is_alive(&self) -> bool {
        self.executor.strong_count() > 0
    }

    /// Queues `fut` to run on the next drain. `None` once the runtime is gone.
    pub fn spawn_ui<F>(&self, fut: F) -> Option<TaskHandle>
    where
        F: Future<Output = ()> + 'static,
    {
        let id = self.with_executor(|executor| executor.spawn(Box::pin(fut)))?;
        Some(TaskHandle {
            id,
            runtime: self.clone(),
        })
    }

    pub fn cancel_task(&self, id: u64) {
        self.with_executor(|executor| executor.cancel(id));
    }

    /// Polls spawned futures until none of them can make progress.
    pub fn drain_ui(&self) {
        self.with_executor(Executor::drain_ui);
    }

    pub fn has_pending_ui(&self) -> bool {
        self.with_executor(Executor::has_pending_ui)
            .unwrap_or(false)
    }

    pub(crate) fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.with_executor(|executor| executor.register_frame_callback(Box::new(callback)))
    }

    pub(crate) fn cancel_frame_callback(&self, id: FrameCallbackId) {
        self.with_executor(|executor| executor.cancel_frame_callback(id));
    }

    /// Fires every frame callback waiting for a frame at `frame_time_nanos`.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.with_executor(|executor| executor.run_frame(frame_time_nanos));
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.with_executor(Executor::has_frame_callbacks)
            .unwrap_or(false)
    }

    pub fn needs_frame(&self) -> bool {
        self.with_executor(|executor| executor.needs_frame.get())
            .unwrap_or(false)
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }
}

impl fmt::Debug for RuntimeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}

/// Handle to a future spawned with [`RuntimeHandle::spawn_ui`].
///
/// Dropping the handle detaches the task; call [`TaskHandle::cancel`] to stop it.
pub struct TaskHandle {
    id: u64,
    runtime: RuntimeHandle,
}

impl TaskHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// True until the task finishes or is cancelled.
    pub fn is_active(&self) -> bool {
        self.runtime
            .with_executor(|executor| executor.is_running(self.id))
            .unwrap_or(false)
    }

    pub fn cancel(self) {
        self.runtime.cancel_task(self.id);
    }
}

impl fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle").field("id", &self.id).finish()
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
