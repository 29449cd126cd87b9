use super::*;
use collapsable_animation::{tween, Easing};
use collapsable_testing::TestRuntime;
use std::cell::Cell;

const DRAG: NestedScrollSource = NestedScrollSource::Drag;

fn behavior(runtime: &TestRuntime, offset: f32) -> CollapsableBottomBehavior {
    CollapsableBottomBehavior::new(
        CollapsableState::with_values(-40.0, offset),
        runtime.frame_clock(),
    )
    .with_config(
        CollapsableBehaviorConfig::default()
            .without_fling()
            .with_snap(tween(96, Easing::LinearEasing)),
    )
}

#[test]
fn pre_scroll_never_consumes() {
    let runtime = TestRuntime::new();
    let behavior = behavior(&runtime, -10.0);

    assert_eq!(behavior.on_pre_scroll(Offset::vertical(-25.0), DRAG), Offset::ZERO);
    assert_eq!(behavior.on_pre_scroll(Offset::vertical(25.0), DRAG), Offset::ZERO);
    assert_eq!(behavior.state().offset(), -10.0);
}

#[test]
fn post_scroll_follows_consumed_content_scroll() {
    let runtime = TestRuntime::new();
    let behavior = behavior(&runtime, 0.0);

    let post = behavior.on_post_scroll(Offset::vertical(-15.0), Offset::vertical(-5.0), DRAG);
    assert_eq!(post, Offset::ZERO);
    assert_eq!(behavior.state().offset(), -15.0);

    let post = behavior.on_post_scroll(Offset::vertical(9.0), Offset::ZERO, DRAG);
    assert_eq!(post, Offset::ZERO);
    assert_eq!(behavior.state().offset(), -6.0);
}

#[test]
fn dragging_the_bar_down_collapses_it() {
    let runtime = TestRuntime::new();
    let behavior = behavior(&runtime, 0.0);
    let draggable = behavior.draggable();

    let consumed = draggable.drag(25.0);
    assert_eq!(consumed, Offset::vertical(25.0));
    assert_eq!(behavior.state().offset(), -25.0);

    let consumed = draggable.drag(30.0);
    assert_eq!(consumed, Offset::vertical(15.0));
    assert!(behavior.state().is_collapsed());

    draggable.drag(-10.0);
    assert_eq!(behavior.state().offset(), -30.0);
}

#[test]
fn downward_fling_on_the_bar_settles_collapsed() {
    let runtime = TestRuntime::new();
    let behavior = CollapsableBottomBehavior::new(
        CollapsableState::with_values(-40.0, -25.0),
        runtime.frame_clock(),
    )
    .with_config(CollapsableBehaviorConfig::default().without_snap());
    let draggable = behavior.draggable();
    let consumed = Rc::new(Cell::new(None));

    let sink = Rc::clone(&consumed);
    let flinging = Rc::clone(&draggable);
    runtime.launch(async move {
        sink.set(Some(flinging.fling(2500.0).await));
    });
    runtime.advance_until_idle();

    assert!(behavior.state().is_collapsed());
    let consumed = consumed.get().expect("fling finished");
    assert!(
        consumed.y > 0.0 && consumed.y < 2500.0,
        "consumed {consumed:?}"
    );
}

#[test]
fn post_fling_snaps_to_nearer_bound() {
    let runtime = TestRuntime::new();
    let behavior = behavior(&runtime, -12.0);

    let connection = behavior.clone();
    runtime.launch(async move {
        connection.on_post_fling(Velocity::ZERO, Velocity::ZERO).await;
    });
    runtime.advance_until_idle();

    assert!(behavior.state().is_expanded());
}
