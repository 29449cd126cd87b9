use super::*;
use collapsable_testing::TestRuntime;
use std::cell::Cell;

/// Parent that eats half of every pre-scroll and records post-scroll input.
#[derive(Default)]
struct HalvingParent {
    post_available: Cell<Option<Offset>>,
    post_fling_available: Cell<Option<Velocity>>,
}

impl NestedScrollConnection for HalvingParent {
    fn on_pre_scroll(&self, available: Offset, _source: NestedScrollSource) -> Offset {
        Offset::vertical(available.y / 2.0)
    }

    fn on_post_scroll(
        &self,
        _consumed: Offset,
        available: Offset,
        _source: NestedScrollSource,
    ) -> Offset {
        self.post_available.set(Some(available));
        available
    }

    fn on_post_fling(&self, _consumed: Velocity, available: Velocity) -> FlingFuture<'_> {
        self.post_fling_available.set(Some(available));
        Box::pin(async move { available })
    }
}

#[test]
fn dispatcher_without_parent_consumes_nothing() {
    let dispatcher = NestedScrollDispatcher::new();
    assert!(!dispatcher.has_parent());
    assert_eq!(
        dispatcher.dispatch_pre_scroll(Offset::vertical(-10.0), NestedScrollSource::Drag),
        Offset::ZERO
    );
    assert_eq!(
        dispatcher.dispatch_post_scroll(
            Offset::ZERO,
            Offset::vertical(-10.0),
            NestedScrollSource::Drag
        ),
        Offset::ZERO
    );
}

#[test]
fn dispatcher_forwards_to_parent() {
    let parent = Rc::new(HalvingParent::default());
    let dispatcher = NestedScrollDispatcher::with_parent(parent.clone());

    let consumed = dispatcher.dispatch_pre_scroll(Offset::vertical(-40.0), NestedScrollSource::Drag);
    assert_eq!(consumed, Offset::vertical(-20.0));

    dispatcher.dispatch_post_scroll(
        Offset::vertical(-5.0),
        Offset::vertical(-15.0),
        NestedScrollSource::Drag,
    );
    assert_eq!(parent.post_available.get(), Some(Offset::vertical(-15.0)));

    dispatcher.detach_parent();
    assert_eq!(
        dispatcher.dispatch_pre_scroll(Offset::vertical(-40.0), NestedScrollSource::Drag),
        Offset::ZERO
    );
}

#[test]
fn fling_dispatch_resolves_through_runtime() {
    let runtime = TestRuntime::new();
    let parent = Rc::new(HalvingParent::default());
    let dispatcher = Rc::new(NestedScrollDispatcher::with_parent(parent.clone()));
    let result = Rc::new(Cell::new(None));

    let (sink, dispatcher_task) = (result.clone(), dispatcher.clone());
    runtime.launch(async move {
        let pre = dispatcher_task.dispatch_pre_fling(Velocity::vertical(900.0)).await;
        let post = dispatcher_task
            .dispatch_post_fling(pre, Velocity::vertical(900.0) - pre)
            .await;
        sink.set(Some((pre, post)));
    });

    assert_eq!(
        result.get(),
        Some((Velocity::ZERO, Velocity::vertical(900.0)))
    );
    assert_eq!(
        parent.post_fling_available.get(),
        Some(Velocity::vertical(900.0))
    );
}
