//! Drives a collapsing app bar, a bottom bar and an accordion on a real
//! clock and prints where each one comes to rest.

mod scenes;

use std::time::Duration;

use collapsable_runtime_std::StdRuntime;

/// Frames after which a scene is considered stuck.
const MAX_FRAMES: usize = 600;
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Runs frames until no animation is waiting for one.
pub fn run_until_idle(runtime: &StdRuntime) -> usize {
    let handle = runtime.runtime_handle();
    let mut frames = 0;
    runtime.frame();
    while handle.has_frame_callbacks() && frames < MAX_FRAMES {
        std::thread::sleep(FRAME_INTERVAL);
        runtime.frame();
        frames += 1;
    }
    if frames == MAX_FRAMES {
        log::warn!("still animating after {MAX_FRAMES} frames");
    }
    frames
}

fn main() {
    #[cfg(all(feature = "logging", not(target_arch = "wasm32")))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Collapsable demo ===");
    println!("Set RUST_LOG=debug to follow settles and limit changes.");
    println!();

    let runtime = StdRuntime::new();
    scenes::app_bar(&runtime);
    scenes::bottom_bar(&runtime);
    scenes::accordion(&runtime);
    scenes::restore(&runtime);
}
