use super::*;
use crate::state::CollapsableState;
use crate::top_behavior::CollapsableTopBehavior;
use collapsable_testing::TestRuntime;

#[derive(Default)]
struct RecordingParent {
    pre_scrolls: RefCell<Vec<Offset>>,
    post_scrolls: RefCell<Vec<(Offset, Offset)>>,
    post_flings: RefCell<Vec<(Velocity, Velocity)>>,
    pre_scroll_share: Cell<f32>,
}

impl NestedScrollConnection for RecordingParent {
    fn on_pre_scroll(&self, available: Offset, _source: NestedScrollSource) -> Offset {
        self.pre_scrolls.borrow_mut().push(available);
        Offset::vertical(available.y * self.pre_scroll_share.get())
    }

    fn on_post_scroll(
        &self,
        consumed: Offset,
        available: Offset,
        _source: NestedScrollSource,
    ) -> Offset {
        self.post_scrolls.borrow_mut().push((consumed, available));
        Offset::ZERO
    }

    fn on_post_fling(
        &self,
        consumed: Velocity,
        available: Velocity,
    ) -> collapsable_foundation::FlingFuture<'_> {
        self.post_flings.borrow_mut().push((consumed, available));
        Box::pin(std::future::ready(Velocity::ZERO))
    }
}

fn top_draggable(
    runtime: &TestRuntime,
    offset: f32,
) -> (CollapsableState, Rc<CollapsableDraggable>) {
    let state = CollapsableState::with_values(-100.0, offset);
    let behavior = CollapsableTopBehavior::new(state.clone(), runtime.frame_clock());
    (state, behavior.draggable())
}

#[test]
fn leftover_drag_reaches_outer_parent() {
    let runtime = TestRuntime::new();
    let (state, draggable) = top_draggable(&runtime, 0.0);
    let parent = Rc::new(RecordingParent::default());
    draggable.dispatcher().attach_parent(parent.clone());

    assert_eq!(draggable.drag(-30.0), Offset::vertical(-30.0));
    assert_eq!(draggable.drag(-90.0), Offset::vertical(-70.0));

    assert_eq!(state.offset(), -100.0);
    assert_eq!(
        *parent.post_scrolls.borrow(),
        vec![
            (Offset::vertical(-30.0), Offset::ZERO),
            (Offset::vertical(-70.0), Offset::vertical(-20.0)),
        ]
    );
}

#[test]
fn parent_pre_scroll_goes_first() {
    let runtime = TestRuntime::new();
    let (state, draggable) = top_draggable(&runtime, 0.0);
    let parent = Rc::new(RecordingParent::default());
    parent.pre_scroll_share.set(0.5);
    draggable.dispatcher().attach_parent(parent.clone());

    assert_eq!(draggable.drag(-40.0), Offset::vertical(-40.0));
    assert_eq!(*parent.pre_scrolls.borrow(), vec![Offset::vertical(-40.0)]);
    assert_eq!(state.offset(), -20.0);
}

#[test]
fn expanding_drag_applies_in_post_scroll() {
    let runtime = TestRuntime::new();
    let (state, draggable) = top_draggable(&runtime, -60.0);

    assert_eq!(draggable.drag(25.0), Offset::vertical(25.0));
    assert_eq!(state.offset(), -35.0);
}

#[test]
fn disabled_adapter_ignores_input() {
    let runtime = TestRuntime::new();
    let (state, draggable) = top_draggable(&runtime, -50.0);

    draggable.set_enabled(false);
    assert_eq!(draggable.drag(-20.0), Offset::ZERO);
    draggable.on_drag_start(0);
    draggable.on_drag_delta(16, -40.0);
    assert_eq!(draggable.on_drag_stop(), None);
    assert_eq!(state.offset(), -50.0);

    draggable.set_enabled(true);
    assert!(draggable.is_enabled());
    draggable.drag(-20.0);
    assert_eq!(state.offset(), -70.0);
}

#[test]
fn pointer_drag_waits_for_slop_then_reports_velocity() {
    let runtime = TestRuntime::new();
    let (state, draggable) = top_draggable(&runtime, 0.0);

    draggable.on_drag_start(0);
    draggable.on_drag_delta(8, -5.0);
    assert_eq!(state.offset(), 0.0);
    draggable.on_drag_delta(16, -5.0);
    assert_eq!(state.offset(), -5.0);
    for step in 3..6 {
        draggable.on_drag_delta(step * 8, -5.0);
    }
    assert_eq!(state.offset(), -20.0);

    let velocity = draggable.on_drag_stop().expect("drag passed the slop");
    assert!(velocity < 0.0 && velocity >= -MAX_FLING_VELOCITY);
}

#[test]
fn tap_without_movement_does_not_fling() {
    let runtime = TestRuntime::new();
    let (_state, draggable) = top_draggable(&runtime, 0.0);

    draggable.on_drag_start(0);
    draggable.on_drag_delta(10, 3.0);
    assert_eq!(draggable.on_drag_stop(), None);
}

#[test]
fn cancelled_drag_reports_nothing() {
    let runtime = TestRuntime::new();
    let (_state, draggable) = top_draggable(&runtime, 0.0);

    draggable.on_drag_start(0);
    draggable.on_drag_delta(8, -20.0);
    draggable.on_drag_cancel();
    assert_eq!(draggable.on_drag_stop(), None);
}

#[test]
fn fling_leftover_reaches_outer_parent() {
    let runtime = TestRuntime::new();
    let (state, draggable) = top_draggable(&runtime, 0.0);
    let parent = Rc::new(RecordingParent::default());
    draggable.dispatcher().attach_parent(parent.clone());

    // Already expanded: settle has nothing to do.
    draggable.launch_fling(&runtime.runtime_handle(), 1200.0);
    runtime.advance_until_idle();

    assert!(state.is_expanded());
    assert_eq!(
        *parent.post_flings.borrow(),
        vec![(Velocity::ZERO, Velocity::vertical(1200.0))]
    );
}
