//! # Portal
//!
//! The full windowed experience with a denser field than the defaults.
//! Type a wish and press Enter to toss it into the void; Escape quits.
//!
//! Run with: `cargo run --example portal`

use gravwell::Portal;

fn main() {
    Portal::new()
        .with_title("cosmic portal")
        .with_seed(0xC0FFEE)
        .with_star_count(120)
        .with_particle_count(300)
        .with_ring_count(4)
        .run()
        .expect("Portal failed");
}
