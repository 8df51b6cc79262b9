//! # gravwell - Gravity-Well Particle Field
//!
//! A seeded, tick-driven visualization of matter spiraling into a focal
//! point: a twinkling starfield, pulsating energy rings, an accretion glow
//! and a recycling pool of particles that fall into an event horizon and
//! are reborn at the rim.
//!
//! The simulation is pure CPU arithmetic over fixed-size entity pools. Each
//! tick produces a [`Frame`] - an ordered list of 2D draw calls - which the
//! wgpu renderer replays onto a window surface. Given the same seed and
//! dimensions, the draw-call sequence is identical run to run.
//!
//! ## Quick Start
//!
//! ```ignore
//! use gravwell::Portal;
//!
//! fn main() {
//!     Portal::new()
//!         .with_title("cosmic portal")
//!         .run()
//!         .expect("portal failed");
//! }
//! ```
//!
//! Type a wish in the window and press Enter to toss it into the void: the
//! field flares for a few seconds and the wish is revealed in the title
//! once it has crossed the horizon.
//!
//! ## Headless use
//!
//! The simulator runs fine without a window, which is how the tests drive
//! it:
//!
//! ```
//! use gravwell::{FieldConfig, FieldSim};
//!
//! let mut sim = FieldSim::new(FieldConfig::default().with_seed(7), 800.0, 600.0);
//! assert!(sim.toss("clear skies").accepted());
//! for _ in 0..120 {
//!     sim.tick();
//! }
//! assert_eq!(sim.revealed_text(), Some("clear skies"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Focal point** - the surface center everything orbits and falls
//!   toward; recomputed on resize.
//! - **Intensity signal** - one scalar ([`IntensityWave`]) coupling the
//!   toss action to ring radii, gravity pull, glow and horizon size.
//! - **Toss** - [`FieldSim::toss`] starts a boost window; repeated triggers
//!   are rejected while one is in flight, and two tick-denominated
//!   one-shots reveal the text and clear the boost.
//! - **Consumption** - particles closer than a threshold are reseeded far
//!   out instead of destroyed, so pool sizes never change.

pub mod config;
pub mod error;
pub mod field;
pub mod frame;
mod gpu;
pub mod intensity;
pub mod particle;
pub mod portal;
pub mod ring;
pub mod star;
pub mod time;
pub mod toss;
mod window;

pub use config::FieldConfig;
pub use error::{GpuError, SimulationError};
pub use field::FieldSim;
pub use frame::{DrawCmd, Frame, GradientStop, Rgba};
pub use glam::Vec2;
pub use gpu::{DISC_SHADER, GRADIENT_SHADER, SEGMENT_SHADER};
pub use intensity::IntensityWave;
pub use particle::Particle;
pub use portal::Portal;
pub use ring::EnergyRing;
pub use star::Star;
pub use toss::TossOutcome;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use gravwell::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::FieldConfig;
    pub use crate::field::FieldSim;
    pub use crate::frame::{DrawCmd, Frame, GradientStop, Rgba};
    pub use crate::intensity::IntensityWave;
    pub use crate::portal::Portal;
    pub use crate::time::Time;
    pub use crate::toss::TossOutcome;
    pub use crate::Vec2;
}
