use std::cell::Cell;

use collapsable::prelude::*;
use collapsable::{measure_collapsable_column, ColumnLayout, NestedScrollConnection};
use collapsable_runtime_std::StdRuntime;
use collapsable_ui_layout::{Constraints, Measurable, Placeable, Size};

use crate::run_until_idle;

const WIDTH: f32 = 360.0;

/// A fixed-size piece of content, like a toolbar or a tab row.
struct Slab {
    name: &'static str,
    height: f32,
}

impl Measurable for Slab {
    fn measure(&self, constraints: Constraints) -> Box<dyn Placeable> {
        let (width, height) = constraints.constrain(WIDTH, self.height);
        Box::new(Size::new(width, height))
    }

    fn min_intrinsic_height(&self, _width: f32) -> f32 {
        self.height
    }

    fn max_intrinsic_height(&self, _width: f32) -> f32 {
        self.height
    }
}

/// Scrolling content that consumes deltas within its own range.
struct List {
    position: Cell<f32>,
    length: f32,
}

impl List {
    fn scroll(&self, delta: f32) -> f32 {
        let next = (self.position.get() - delta).clamp(0.0, self.length);
        let consumed = self.position.get() - next;
        self.position.set(next);
        consumed
    }

    /// Feeds one nested scroll through `parent` the way a scrolling list does.
    fn scroll_within(&self, parent: &dyn NestedScrollConnection, delta: f32) {
        let source = NestedScrollSource::Drag;
        let available = Offset::vertical(delta);
        let pre = parent.on_pre_scroll(available, source);
        let consumed = Offset::vertical(self.scroll(available.y - pre.y));
        parent.on_post_scroll(consumed, available - pre - consumed, source);
    }
}

fn describe(label: &str, layout: &ColumnLayout, slabs: &[&Slab]) {
    let children: Vec<String> = layout
        .placements
        .iter()
        .map(|placement| format!("{}@{}", slabs[placement.index].name, placement.y))
        .collect();
    println!("  {label:<24} height {:>5} [{}]", layout.height, children.join(", "));
}

pub fn app_bar(runtime: &StdRuntime) {
    println!("App bar over a list");
    let state = CollapsableState::new();
    let behavior = CollapsableTopBehavior::new(state.clone(), runtime.frame_clock());
    let title = Slab {
        name: "title",
        height: 112.0,
    };
    let tabs = Slab {
        name: "tabs",
        height: 48.0,
    };
    let children = [
        ColumnChild::collapsing(&title, CollapseChild::default().with_collapsed_height(Some(56.0))),
        ColumnChild::pinned(&tabs),
    ];
    let layout = || measure_collapsable_column(&state, Constraints::fixed_width(WIDTH), &children);
    let list = List {
        position: Cell::new(0.0),
        length: 2000.0,
    };

    describe("expanded", &layout(), &[&title, &tabs]);
    for _ in 0..3 {
        list.scroll_within(&behavior, -15.0);
    }
    describe("scrolled 45 down", &layout(), &[&title, &tabs]);

    behavior.launch_settle(-400.0);
    let frames = run_until_idle(runtime);
    describe(&format!("settled in {frames} frames"), &layout(), &[&title, &tabs]);
    println!("  list position {}", list.position.get());

    for _ in 0..4 {
        list.scroll_within(&behavior, 60.0);
    }
    describe("scrolled back up", &layout(), &[&title, &tabs]);
    println!();
}

pub fn bottom_bar(runtime: &StdRuntime) {
    println!("Bottom bar dragged by hand");
    let state = CollapsableState::with_offset_limit(-80.0);
    let behavior = CollapsableBottomBehavior::new(state.clone(), runtime.frame_clock());
    let draggable = behavior.draggable();

    draggable.on_drag_start(0);
    for step in 1..=5 {
        draggable.on_drag_delta(step * 16, 9.0);
    }
    println!("  after drag: offset {:.1}", state.offset());
    if let Some(velocity) = draggable.on_drag_stop() {
        println!("  released at {velocity:.0}px/s");
        draggable.launch_fling(&runtime.runtime_handle(), velocity);
    }
    run_until_idle(runtime);
    println!(
        "  at rest: offset {:.1}, collapsed {}",
        state.offset(),
        state.is_collapsed()
    );
    println!();
}

pub fn accordion(runtime: &StdRuntime) {
    println!("Accordion");
    let sections: Vec<(&str, CollapsableState)> = [("Overview", -120.0), ("Details", -240.0)]
        .into_iter()
        .map(|(name, limit)| (name, CollapsableState::with_offset_limit(limit)))
        .collect();
    // Start with everything folded.
    for (_, state) in &sections {
        state.collapse();
    }

    let clock = runtime.frame_clock();
    let handle = runtime.runtime_handle();
    for (name, state) in &sections {
        let toggle = state.animate_toggle(&clock, spring(1.0, SpringSpec::STIFFNESS_MEDIUM));
        handle.spawn_ui(async move {
            toggle.await;
        });
        let frames = run_until_idle(runtime);
        println!(
            "  {name:<10} toggled in {frames} frames: fraction {:.2}",
            state.collapsed_fraction()
        );
    }
    println!();
}

pub fn restore(runtime: &StdRuntime) {
    println!("Save and restore");
    let state = CollapsableState::with_values(-96.0, -30.0);
    let saved = state.to_list();
    println!("  saved {saved:?}");

    match CollapsableState::restore_from_list(&saved) {
        Ok(restored) => {
            let behavior = CollapsableTopBehavior::new(restored.clone(), runtime.frame_clock());
            behavior.launch_settle(0.0);
            run_until_idle(runtime);
            println!("  restored and settled at {}", restored.offset());
        }
        Err(error) => log::error!("restore failed: {error}"),
    }
    if let Err(error) = CollapsableState::restore_from_list(&saved[..1]) {
        println!("  truncated save rejected: {error}");
    }
}
