//! # Headless
//!
//! Drives the simulator without a window and prints per-second draw-call
//! statistics, including the flare from a toss at the two-second mark.
//! Useful for eyeballing determinism: the output is identical run to run.
//!
//! Run with: `cargo run --example headless`

use gravwell::{DrawCmd, FieldConfig, FieldSim};

fn main() {
    let mut sim = FieldSim::new(FieldConfig::default().with_seed(7), 800.0, 600.0);

    for second in 0..10 {
        for _ in 0..60 {
            sim.tick();
        }

        if second == 2 {
            let outcome = sim.toss("let the build be green");
            println!("toss -> {outcome:?}");
        }

        let frame = sim.tick().expect("sim is running");
        let discs = frame.count_where(|c| matches!(c, DrawCmd::Disc { .. }));
        let strokes = frame.count_where(|c| {
            matches!(c, DrawCmd::Polyline { .. } | DrawCmd::Circle { .. })
        });
        let cmds = frame.len();
        println!(
            "t+{second}s tick {:>4} intensity {:.3} cmds {:>4} (discs {discs}, strokes {strokes})",
            sim.tick_count(),
            sim.intensity(),
            cmds,
        );

        if let Some(wish) = sim.revealed_text() {
            println!("revealed: {wish}");
        }
    }

    sim.stop();
    assert!(sim.tick().is_none());
}
