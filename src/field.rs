//! The particle field simulator.
//!
//! [`FieldSim`] owns every entity pool and advances the whole field once per
//! display frame, rebuilding a [`Frame`] of draw calls in a fixed order:
//! background gradient, stars, accretion glow, energy rings, particles
//! (trail before body), event horizon, photon ring. Everything is owned by
//! the one loop that calls [`FieldSim::tick`] - there is no shared state
//! and no locking.
//!
//! # Example
//!
//! ```
//! use gravwell::{FieldConfig, FieldSim};
//!
//! let mut sim = FieldSim::new(FieldConfig::default(), 800.0, 600.0);
//! let frame = sim.tick().expect("sim is running");
//! assert!(!frame.is_empty());
//! ```

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::FieldConfig;
use crate::frame::{DrawCmd, Frame, GradientStop, Rgba};
use crate::particle::{self, Particle};
use crate::ring::{self, EnergyRing};
use crate::star::{self, Star};
use crate::toss::{TossOutcome, TossState};

/// Background gradient stops, darkest at the edge of space.
const BACKGROUND_STOPS: [(f32, Rgba); 3] = [
    (0.0, Rgba::rgb(0.0, 0.067, 0.133)),
    (0.5, Rgba::rgb(0.0, 0.031, 0.094)),
    (1.0, Rgba::rgb(0.0, 0.0, 0.02)),
];

/// The simulator: entity pools plus the tick/toss/resize lifecycle.
#[derive(Debug, Clone)]
pub struct FieldSim {
    config: FieldConfig,
    rng: SmallRng,
    width: f32,
    height: f32,
    focal: Vec2,
    tick: u64,
    running: bool,
    intensity: f32,
    stars: Vec<Star>,
    rings: Vec<EnergyRing>,
    particles: Vec<Particle>,
    toss: TossState,
    frame: Frame,
}

impl FieldSim {
    /// Build a simulator for a surface of the given pixel dimensions.
    ///
    /// The focal point is the surface center. All pools are populated from
    /// the config's seed; two sims built with equal config and dimensions
    /// produce identical frames forever.
    pub fn new(config: FieldConfig, width: f32, height: f32) -> Self {
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let focal = Vec2::new(width / 2.0, height / 2.0);

        let stars = star::spawn_pool(&mut rng, config.star_count, width, height);
        let particles = particle::spawn_pool(&mut rng, config.particle_count, focal, &config);
        let rings = ring::spawn_pool(&mut rng, config.ring_count);

        Self {
            intensity: config.intensity.sample(0, false),
            config,
            rng,
            width,
            height,
            focal,
            tick: 0,
            running: true,
            stars,
            rings,
            particles,
            toss: TossState::new(),
            frame: Frame::new(),
        }
    }

    /// Advance one tick and rebuild the draw-call list.
    ///
    /// Returns `None` once the sim has been stopped: no state advances, no
    /// commands are emitted, and stopping again is a no-op.
    pub fn tick(&mut self) -> Option<&Frame> {
        if !self.running {
            return None;
        }

        self.tick += 1;
        self.toss.advance(self.tick);
        self.intensity = self.config.intensity.sample(self.tick, self.toss.is_active());
        let intensity = self.intensity;

        self.frame.clear();
        self.draw_background();

        for s in &mut self.stars {
            s.update();
            s.draw(&mut self.frame);
        }

        self.draw_accretion_glow();

        for r in &mut self.rings {
            r.update(intensity);
            r.draw(&mut self.frame, self.focal, intensity);
        }

        for p in &mut self.particles {
            p.update(&mut self.rng, self.focal, self.tick, intensity, &self.config);
            p.draw(&mut self.frame, intensity);
        }

        self.draw_event_horizon();

        Some(&self.frame)
    }

    /// Trigger the toss action. Precondition failures come back as
    /// non-accepted outcomes; the simulation itself cannot fail here.
    pub fn toss(&mut self, text: &str) -> TossOutcome {
        self.toss.trigger(
            text,
            self.tick,
            self.config.reveal_delay_ticks,
            self.config.clear_delay_ticks,
        )
    }

    /// Adopt new surface dimensions.
    ///
    /// Recomputes the focal point and regenerates the star pool for the new
    /// bounds. Particles and rings are defined relative to the focal point
    /// and keep their state.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.focal = Vec2::new(width / 2.0, height / 2.0);
        self.stars = star::spawn_pool(&mut self.rng, self.config.star_count, width, height);
    }

    /// Stop the loop. Idempotent; later `tick` calls return `None`.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks advanced so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Intensity signal computed by the most recent tick.
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Whether a toss boost window is currently open.
    pub fn toss_active(&self) -> bool {
        self.toss.is_active()
    }

    /// Text revealed by the last toss, once its reveal delay has elapsed.
    pub fn revealed_text(&self) -> Option<&str> {
        self.toss.revealed()
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn rings(&self) -> &[EnergyRing] {
        &self.rings
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Event-horizon radius at the current intensity.
    pub fn horizon_radius(&self) -> f32 {
        self.config.horizon_base + self.intensity * self.config.horizon_gain
    }

    fn draw_background(&mut self) {
        let stops = BACKGROUND_STOPS
            .iter()
            .map(|&(offset, color)| GradientStop::new(offset, color))
            .collect();
        self.frame.push(DrawCmd::RadialGradient {
            center: self.focal,
            inner_radius: 0.0,
            outer_radius: self.width.max(self.height),
            stops,
        });
    }

    fn draw_accretion_glow(&mut self) {
        let i = self.intensity;
        let horizon = self.horizon_radius();
        let disk = self.config.disk_base + i * self.config.disk_gain;
        self.frame.push(DrawCmd::RadialGradient {
            center: self.focal,
            inner_radius: horizon,
            outer_radius: disk,
            stops: vec![
                GradientStop::new(0.0, Rgba::rgba(1.0, 0.39, 0.0, 0.8 * i)),
                GradientStop::new(0.3, Rgba::rgba(0.0, 0.78, 1.0, 0.4 * i)),
                GradientStop::new(0.7, Rgba::rgba(0.39, 0.0, 1.0, 0.2 * i)),
                GradientStop::new(1.0, Rgba::TRANSPARENT),
            ],
        });
    }

    fn draw_event_horizon(&mut self) {
        let i = self.intensity;
        let horizon = self.horizon_radius();

        // Opaque focal disk with a cyan halo.
        self.frame.push(DrawCmd::Disc {
            center: self.focal,
            radius: horizon,
            color: Rgba::BLACK,
            glow_radius: horizon,
            glow_color: Rgba::rgba(0.0, 1.0, 1.0, i),
        });

        // Photon ring accent at 1.5x the horizon.
        self.frame.push(DrawCmd::Circle {
            center: self.focal,
            radius: horizon * 1.5,
            thickness: 2.0,
            color: Rgba::rgba(1.0, 1.0, 1.0, 0.3 * i),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_sim() -> FieldSim {
        let cfg = FieldConfig::default()
            .with_star_count(8)
            .with_particle_count(16)
            .with_ring_count(2);
        FieldSim::new(cfg, 800.0, 600.0)
    }

    #[test]
    fn test_focal_point_is_surface_center() {
        let sim = small_sim();
        assert_eq!(sim.focal, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_frame_ordering() {
        let mut sim = small_sim();
        let frame = sim.tick().unwrap();
        let cmds = frame.cmds();

        // Background gradient first, photon ring last.
        assert!(matches!(cmds[0], DrawCmd::RadialGradient { .. }));
        assert!(matches!(cmds[cmds.len() - 1], DrawCmd::Circle { .. }));

        // Exactly two gradients per frame: background and accretion glow.
        let gradients = frame.count_where(|c| matches!(c, DrawCmd::RadialGradient { .. }));
        assert_eq!(gradients, 2);

        // One polyline per ring.
        let polylines = frame.count_where(|c| matches!(c, DrawCmd::Polyline { .. }));
        assert_eq!(polylines, 2);
    }

    #[test]
    fn test_same_seed_same_frames() {
        let cfg = FieldConfig::default().with_particle_count(32).with_star_count(16);
        let mut a = FieldSim::new(cfg.clone(), 800.0, 600.0);
        let mut b = FieldSim::new(cfg, 800.0, 600.0);
        for _ in 0..50 {
            assert_eq!(a.tick(), b.tick());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let cfg = FieldConfig::default().with_particle_count(32);
        let mut a = FieldSim::new(cfg.clone().with_seed(1), 800.0, 600.0);
        let mut b = FieldSim::new(cfg.with_seed(2), 800.0, 600.0);
        assert_ne!(a.tick(), b.tick());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut sim = small_sim();
        sim.tick();
        let ticks = sim.tick_count();
        sim.stop();
        sim.stop();
        assert!(sim.tick().is_none());
        assert!(sim.tick().is_none());
        assert_eq!(sim.tick_count(), ticks);
    }

    #[test]
    fn test_horizon_grows_with_boost() {
        let mut sim = small_sim();
        sim.tick();
        let calm = sim.horizon_radius();
        assert!(sim.toss("grow").accepted());
        sim.tick();
        // Boost factor is at least 1.2 at these ticks, so the horizon grows.
        assert!(sim.horizon_radius() > calm);
    }
}
