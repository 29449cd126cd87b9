use super::*;
use crate::animation::{spring, tween, Easing, SpringSpec};
use crate::decay_spec::ExponentialDecaySpec;
use collapsable_core::MutatorSlot;
use collapsable_testing::TestRuntime;
use std::cell::RefCell;
use std::rc::Rc;

type Shared<T> = Rc<RefCell<T>>;

#[test]
fn tween_reports_every_frame_and_finishes_on_target() {
    let runtime = TestRuntime::new();
    let clock = runtime.frame_clock();
    let slot = MutatorSlot::new();
    let token = slot.acquire();
    let values: Shared<Vec<f32>> = Rc::default();
    let result: Shared<Option<AnimationResult>> = Rc::default();

    let (values_sink, result_sink) = (values.clone(), result.clone());
    runtime.launch(async move {
        let mut state = AnimationState::new(0.0);
        let outcome = state
            .animate_to(&clock, &token, 100.0, tween(64, Easing::LinearEasing), |scope| {
                values_sink.borrow_mut().push(scope.value())
            })
            .await;
        *result_sink.borrow_mut() = Some(outcome);
    });
    runtime.advance_until_idle();

    assert_eq!(*values.borrow(), vec![0.0, 25.0, 50.0, 75.0, 100.0]);
    let outcome = result.borrow().expect("animation completed");
    assert_eq!(outcome.end_reason, AnimationEndReason::Finished);
    assert_eq!(outcome.value, 100.0);
}

#[test]
fn spring_settles_exactly_on_target() {
    let runtime = TestRuntime::new();
    let clock = runtime.frame_clock();
    let slot = MutatorSlot::new();
    let token = slot.acquire();
    let result: Shared<Option<AnimationResult>> = Rc::default();

    let sink = result.clone();
    runtime.launch(async move {
        let mut state = AnimationState::new(-60.0).with_visibility_threshold(0.5);
        let outcome = state
            .animate_to(
                &clock,
                &token,
                0.0,
                spring(1.0, SpringSpec::STIFFNESS_MEDIUM_LOW),
                |_| {},
            )
            .await;
        *sink.borrow_mut() = Some(outcome);
    });
    let frames = runtime.advance_until_idle();

    let outcome = result.borrow().expect("animation completed");
    assert!(outcome.is_finished());
    assert_eq!(outcome.value, 0.0);
    assert!(frames > 5, "spring finished suspiciously fast: {frames}");
}

#[test]
fn revoking_the_token_interrupts_without_another_write() {
    let runtime = TestRuntime::new();
    let clock = runtime.frame_clock();
    let slot = Rc::new(MutatorSlot::new());
    let token = slot.acquire();
    let writes: Shared<Vec<f32>> = Rc::default();
    let result: Shared<Option<AnimationResult>> = Rc::default();

    let (writes_sink, result_sink) = (writes.clone(), result.clone());
    runtime.launch(async move {
        let mut state = AnimationState::new(0.0);
        let outcome = state
            .animate_to(&clock, &token, 10.0, tween(1000, Easing::LinearEasing), |scope| {
                writes_sink.borrow_mut().push(scope.value())
            })
            .await;
        *result_sink.borrow_mut() = Some(outcome);
    });
    runtime.advance_frames(3);
    let before = writes.borrow().len();

    let _newer = slot.acquire();
    runtime.advance_until_idle();

    assert_eq!(writes.borrow().len(), before);
    let outcome = result.borrow().expect("animation ended");
    assert_eq!(outcome.end_reason, AnimationEndReason::Interrupted);
}

#[test]
fn block_can_cancel_a_decay() {
    let runtime = TestRuntime::new();
    let clock = runtime.frame_clock();
    let slot = MutatorSlot::new();
    let token = slot.acquire();
    let result: Shared<Option<AnimationResult>> = Rc::default();

    let sink = result.clone();
    runtime.launch(async move {
        let spec = ExponentialDecaySpec::default();
        let mut state = AnimationState::new(0.0).with_velocity(-2000.0);
        let outcome = state
            .animate_decay(&clock, &token, &spec, |scope| {
                if scope.value() < -20.0 {
                    scope.cancel_animation();
                }
            })
            .await;
        *sink.borrow_mut() = Some(outcome);
    });
    runtime.advance_until_idle();

    let outcome = result.borrow().expect("decay ended");
    assert_eq!(outcome.end_reason, AnimationEndReason::Cancelled);
    assert!(outcome.value < -20.0);
    assert!(outcome.velocity < 0.0);
}

#[test]
fn decay_without_velocity_finishes_on_first_frame() {
    let runtime = TestRuntime::new();
    let clock = runtime.frame_clock();
    let slot = MutatorSlot::new();
    let token = slot.acquire();
    let result: Shared<Option<AnimationResult>> = Rc::default();

    let sink = result.clone();
    runtime.launch(async move {
        let spec = ExponentialDecaySpec::default();
        let mut state = AnimationState::new(7.0);
        let outcome = state.animate_decay(&clock, &token, &spec, |_| {}).await;
        *sink.borrow_mut() = Some(outcome);
    });

    assert_eq!(runtime.advance_until_idle(), 1);
    let outcome = result.borrow().expect("decay ended");
    assert!(outcome.is_finished());
    assert_eq!(outcome.value, 7.0);
}
