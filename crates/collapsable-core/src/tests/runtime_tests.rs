use super::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
struct CountingScheduler {
    frames: AtomicUsize,
}

impl RuntimeScheduler for CountingScheduler {
    fn schedule_frame(&self) {
        self.frames.fetch_add(1, Ordering::SeqCst);
    }
}

fn new_runtime() -> (Runtime, Arc<CountingScheduler>) {
    let scheduler = Arc::new(CountingScheduler::default());
    (Runtime::new(scheduler.clone()), scheduler)
}

#[test]
fn spawned_future_runs_on_drain() {
    let (runtime, scheduler) = new_runtime();
    let handle = runtime.handle();
    let ran = Rc::new(Cell::new(false));

    let task = {
        let ran = Rc::clone(&ran);
        handle.spawn_ui(async move { ran.set(true) })
    }
    .expect("runtime alive");

    assert!(scheduler.frames.load(Ordering::SeqCst) > 0);
    assert!(task.is_active());
    assert!(!ran.get());

    handle.drain_ui();
    assert!(ran.get());
    assert!(!task.is_active());
    assert!(!runtime.needs_frame());
}

#[test]
fn next_frame_resolves_with_frame_time() {
    let (runtime, _) = new_runtime();
    let handle = runtime.handle();
    let clock = runtime.frame_clock();
    let seen = Rc::new(RefCell::new(Vec::new()));

    {
        let seen = Rc::clone(&seen);
        handle.spawn_ui(async move {
            let first = clock.next_frame().await;
            seen.borrow_mut().push(first);
            let second = clock.next_frame().await;
            seen.borrow_mut().push(second);
        });
    }

    handle.drain_ui();
    assert!(seen.borrow().is_empty());
    assert!(handle.has_frame_callbacks());

    handle.drain_frame_callbacks(16);
    handle.drain_ui();
    assert_eq!(seen.borrow().as_slice(), &[16]);

    handle.drain_frame_callbacks(32);
    handle.drain_ui();
    assert_eq!(seen.borrow().as_slice(), &[16, 32]);
    assert!(!handle.has_frame_callbacks());
}

#[test]
fn cancelled_task_drops_its_frame_callback() {
    let (runtime, _) = new_runtime();
    let handle = runtime.handle();
    let clock = runtime.frame_clock();
    let resumed = Rc::new(Cell::new(false));

    let task = {
        let resumed = Rc::clone(&resumed);
        handle.spawn_ui(async move {
            clock.next_frame().await;
            resumed.set(true);
        })
    }
    .expect("runtime alive");

    handle.drain_ui();
    assert!(handle.has_frame_callbacks());

    task.cancel();
    assert!(!handle.has_frame_callbacks());
    handle.drain_frame_callbacks(16);
    handle.drain_ui();
    assert!(!resumed.get());
}

#[test]
fn task_can_cancel_a_sibling_during_the_same_poll() {
    let (runtime, _) = new_runtime();
    let handle = runtime.handle();
    let clock = runtime.frame_clock();
    let sibling_resumed = Rc::new(Cell::new(false));
    let sibling_id = Rc::new(Cell::new(0u64));

    {
        let handle_inner = handle.clone();
        let sibling_id = Rc::clone(&sibling_id);
        let clock = clock.clone();
        handle.spawn_ui(async move {
            clock.next_frame().await;
            handle_inner.cancel_task(sibling_id.get());
        });
    }
    let sibling = {
        let sibling_resumed = Rc::clone(&sibling_resumed);
        handle.spawn_ui(async move {
            clock.next_frame().await;
            sibling_resumed.set(true);
        })
    }
    .expect("runtime alive");
    sibling_id.set(sibling.id());

    handle.drain_ui();
    handle.drain_frame_callbacks(16);
    handle.drain_ui();

    assert!(!sibling_resumed.get());
    assert!(!sibling.is_active());
}

#[test]
fn tasks_spawned_while_polling_run_in_the_same_drain() {
    let (runtime, _) = new_runtime();
    let handle = runtime.handle();
    let inner_ran = Rc::new(Cell::new(false));

    {
        let spawner = handle.clone();
        let inner_ran = Rc::clone(&inner_ran);
        handle.spawn_ui(async move {
            spawner.spawn_ui(async move { inner_ran.set(true) });
        });
    }

    handle.drain_ui();
    assert!(inner_ran.get());
}

#[test]
fn tasks_resume_in_spawn_order() {
    let (runtime, _) = new_runtime();
    let handle = runtime.handle();
    let clock = runtime.frame_clock();
    let order = Rc::new(RefCell::new(Vec::new()));

    for i in 0..3 {
        let order = Rc::clone(&order);
        let clock = clock.clone();
        handle.spawn_ui(async move {
            clock.next_frame().await;
            order.borrow_mut().push(i);
        });
    }
    handle.drain_ui();
    handle.drain_frame_callbacks(16);
    handle.drain_ui();
    assert_eq!(order.borrow().as_slice(), &[0, 1, 2]);
    assert!(!handle.has_pending_ui());
}

#[test]
fn task_cancelling_itself_stops_at_its_next_suspension() {
    let (runtime, _) = new_runtime();
    let handle = runtime.handle();
    let clock = runtime.frame_clock();
    let id = Rc::new(Cell::new(0u64));
    let frames = Rc::new(Cell::new(0));

    let task = {
        let (handle, id, frames) = (handle.clone(), Rc::clone(&id), Rc::clone(&frames));
        handle.clone().spawn_ui(async move {
            loop {
                clock.next_frame().await;
                frames.set(frames.get() + 1);
                handle.cancel_task(id.get());
            }
        })
    }
    .expect("runtime alive");
    id.set(task.id());

    for time in [16, 32, 48] {
        handle.drain_ui();
        handle.drain_frame_callbacks(time);
    }
    handle.drain_ui();
    assert_eq!(frames.get(), 1);
    assert!(!task.is_active());
    assert!(!handle.has_frame_callbacks());
}

#[test]
fn dropped_runtime_refuses_new_tasks() {
    let (runtime, _) = new_runtime();
    let handle = runtime.handle();
    drop(runtime);

    assert!(!handle.is_alive());
    assert!(handle.spawn_ui(async {}).is_none());
}
