//! End-to-end scroll, drag and settle scenarios driven on a virtual clock.

use std::cell::RefCell;
use std::rc::Rc;

use collapsable::prelude::*;
use collapsable::Velocity;
use collapsable_testing::TestRuntime;

const DRAG: NestedScrollSource = NestedScrollSource::Drag;

/// Stands in for the scrolling content below an app bar: consumes from its
/// own scroll range and reports the rest.
struct ScrollingList {
    position: RefCell<f32>,
    max: f32,
}

impl ScrollingList {
    fn scroll(&self, delta: f32) -> f32 {
        let mut position = self.position.borrow_mut();
        // Positive deltas move toward the start of the list.
        let next = (*position - delta).clamp(0.0, self.max);
        let consumed = *position - next;
        *position = next;
        consumed
    }
}

/// One nested scroll event from content inside `parent`.
fn scroll_content(parent: &dyn NestedScrollConnection, list: &ScrollingList, delta: f32) {
    let available = Offset::vertical(delta);
    let pre = parent.on_pre_scroll(available, DRAG);
    let consumed = Offset::vertical(list.scroll(available.y - pre.y));
    parent.on_post_scroll(consumed, available - pre - consumed, DRAG);
}

#[test]
fn scroll_collapse_consumes_until_saturated() {
    let runtime = TestRuntime::new();
    let state = CollapsableState::with_offset_limit(-100.0);
    let behavior = CollapsableTopBehavior::new(state.clone(), runtime.frame_clock());

    assert_eq!(
        behavior.on_pre_scroll(Offset::vertical(-30.0), DRAG),
        Offset::vertical(-30.0)
    );
    assert_eq!(state.offset(), -30.0);
    assert_eq!(
        behavior.on_pre_scroll(Offset::vertical(-90.0), DRAG),
        Offset::vertical(-70.0)
    );
    assert_eq!(state.offset(), -100.0);
}

#[test]
fn expansion_waits_until_content_reaches_its_start() {
    let runtime = TestRuntime::new();
    let state = CollapsableState::with_values(-100.0, -100.0);
    let behavior = CollapsableTopBehavior::new(state.clone(), runtime.frame_clock());
    let list = ScrollingList {
        position: RefCell::new(50.0),
        max: 1000.0,
    };

    scroll_content(&behavior, &list, 30.0);
    assert_eq!(*list.position.borrow(), 20.0);
    assert_eq!(state.offset(), -100.0);

    scroll_content(&behavior, &list, 30.0);
    assert_eq!(*list.position.borrow(), 0.0);
    assert_eq!(state.offset(), -90.0);

    scroll_content(&behavior, &list, 200.0);
    assert!(state.is_expanded());
}

#[test]
fn enter_always_expands_before_content_moves() {
    let runtime = TestRuntime::new();
    let state = CollapsableState::with_values(-100.0, -50.0);
    let behavior = CollapsableTopBehavior::new(state.clone(), runtime.frame_clock())
        .with_config(CollapsableBehaviorConfig::default().with_enter_always(true));
    let list = ScrollingList {
        position: RefCell::new(500.0),
        max: 1000.0,
    };

    assert_eq!(
        behavior.on_pre_scroll(Offset::vertical(20.0), DRAG),
        Offset::vertical(20.0)
    );
    scroll_content(&behavior, &list, 40.0);
    assert!(state.is_expanded());
    assert_eq!(*list.position.borrow(), 490.0);
}

#[test]
fn collapsing_scroll_moves_nothing_twice() {
    let runtime = TestRuntime::new();
    let state = CollapsableState::with_offset_limit(-100.0);
    let behavior = CollapsableTopBehavior::new(state.clone(), runtime.frame_clock());
    let list = ScrollingList {
        position: RefCell::new(0.0),
        max: 1000.0,
    };

    for _ in 0..6 {
        scroll_content(&behavior, &list, -35.0);
    }
    // 210 of motion: 100 collapsed the bar, the rest scrolled the list.
    assert_eq!(state.offset(), -100.0);
    assert_eq!(*list.position.borrow(), 110.0);
}

#[test]
fn bottom_bar_follows_content() {
    let runtime = TestRuntime::new();
    let state = CollapsableState::with_offset_limit(-56.0);
    let behavior = CollapsableBottomBehavior::new(state.clone(), runtime.frame_clock());

    let post = behavior.on_post_scroll(Offset::vertical(-15.0), Offset::ZERO, DRAG);
    assert_eq!(post, Offset::ZERO);
    assert_eq!(state.offset(), -15.0);
}

#[test]
fn release_between_bounds_snaps_to_the_nearer_one() {
    let runtime = TestRuntime::new();
    let state = CollapsableState::with_values(-100.0, -40.0);
    let behavior = CollapsableTopBehavior::new(state.clone(), runtime.frame_clock()).with_config(
        CollapsableBehaviorConfig::default()
            .without_fling()
            .with_snap(tween(200, Easing::FastOutSlowInEasing)),
    );
    let lowest = Rc::new(RefCell::new(state.offset()));
    let sink = Rc::clone(&lowest);
    let _subscription = state.subscribe_offset(move |offset| {
        let mut lowest = sink.borrow_mut();
        *lowest = lowest.min(offset);
    });

    behavior.launch_settle(0.0);
    runtime.advance_until_idle();

    assert!(state.is_expanded());
    assert_eq!(*lowest.borrow(), -40.0);
}

#[test]
fn dragged_bar_forwards_leftover_to_outer_parent() {
    struct Outer(RefCell<Vec<f32>>);

    impl NestedScrollConnection for Outer {
        fn on_post_scroll(
            &self,
            _consumed: Offset,
            available: Offset,
            _source: NestedScrollSource,
        ) -> Offset {
            self.0.borrow_mut().push(available.y);
            Offset::ZERO
        }
    }

    let runtime = TestRuntime::new();
    let state = CollapsableState::with_offset_limit(-100.0);
    let behavior = CollapsableTopBehavior::new(state.clone(), runtime.frame_clock());
    let draggable = behavior.draggable();
    let outer = Rc::new(Outer(RefCell::new(Vec::new())));
    draggable.dispatcher().attach_parent(outer.clone());

    draggable.drag(-30.0);
    draggable.drag(-90.0);

    assert_eq!(state.offset(), -100.0);
    assert_eq!(*outer.0.borrow(), vec![0.0, -20.0]);
}

#[test]
fn pointer_fling_on_the_bar_settles_it() {
    let runtime = TestRuntime::new();
    let state = CollapsableState::with_offset_limit(-100.0);
    let behavior = CollapsableTopBehavior::new(state.clone(), runtime.frame_clock());
    let draggable = behavior.draggable();

    draggable.on_drag_start(0);
    for step in 1..=6 {
        draggable.on_drag_delta(step * 8, -6.0);
    }
    let velocity = draggable.on_drag_stop().expect("drag started");
    draggable.launch_fling(&runtime.runtime_handle(), velocity);
    runtime.advance_until_idle();

    assert!(state.is_expanded() || state.is_collapsed());
    assert!(!state.is_animating());
}

#[test]
fn programmatic_collapse_stops_a_running_fling() {
    let runtime = TestRuntime::new();
    let state = CollapsableState::with_values(-1000.0, -900.0);
    let behavior = CollapsableTopBehavior::new(state.clone(), runtime.frame_clock())
        .with_config(CollapsableBehaviorConfig::default().with_fling(ExponentialDecaySpec::default()));
    let writes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&writes);
    let _subscription = state.subscribe_offset(move |offset| sink.borrow_mut().push(offset));

    behavior.launch_settle(2000.0);
    runtime.advance_frames(4);
    assert!(state.offset() > -900.0, "fling is expanding");
    assert!(state.is_animating());

    writes.borrow_mut().clear();
    behavior.launch_animate_collapse(tween(160, Easing::LinearEasing));
    runtime.advance_until_idle();

    let writes = writes.borrow();
    assert!(
        writes.windows(2).all(|pair| pair[1] <= pair[0]),
        "fling kept writing after the collapse started: {writes:?}"
    );
    assert!(state.is_collapsed());
    assert!(!state.is_animating());
}

#[test]
fn settle_on_a_bound_starts_nothing() {
    let runtime = TestRuntime::new();
    let state = CollapsableState::with_offset_limit(-100.0);
    let behavior = CollapsableTopBehavior::new(state.clone(), runtime.frame_clock());

    state.expand();
    state.expand();
    behavior.launch_settle(-500.0);

    assert_eq!(runtime.advance_until_idle(), 0);
    assert_eq!(state.offset(), 0.0);
    assert!(!state.is_animating());
}
