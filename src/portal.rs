//! Portal window builder.
//!
//! The counterpart to constructing a [`FieldSim`](crate::FieldSim) by hand:
//! configure, then call `.run()` to open a window and drive the simulator
//! until it is closed.
//!
//! ```ignore
//! use gravwell::Portal;
//!
//! Portal::new()
//!     .with_seed(7)
//!     .with_particle_count(300)
//!     .with_title("wishing well")
//!     .run()
//!     .expect("portal failed");
//! ```

use winit::event_loop::{ControlFlow, EventLoop};

use crate::config::FieldConfig;
use crate::error::SimulationError;
use crate::window::App;

/// Builder for a windowed portal simulation.
pub struct Portal {
    config: FieldConfig,
    title: String,
}

impl Portal {
    /// Create a portal with default configuration.
    pub fn new() -> Self {
        Self {
            config: FieldConfig::default(),
            title: "gravwell".to_string(),
        }
    }

    /// Replace the whole simulation config.
    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config = self.config.with_seed(seed);
        self
    }

    /// Set the number of background stars.
    pub fn with_star_count(mut self, count: usize) -> Self {
        self.config = self.config.with_star_count(count);
        self
    }

    /// Set the number of orbiting particles.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.config = self.config.with_particle_count(count);
        self
    }

    /// Set the number of energy rings.
    pub fn with_ring_count(mut self, count: usize) -> Self {
        self.config = self.config.with_ring_count(count);
        self
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Open the window and run until it is closed.
    pub fn run(self) -> Result<(), SimulationError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self.config, self.title);
        event_loop.run_app(&mut app)?;
        Ok(())
    }
}

impl Default for Portal {
    fn default() -> Self {
        Self::new()
    }
}
