//! Simulation tuning parameters.
//!
//! Every constant that shapes the field lives in [`FieldConfig`] so that
//! tests can shrink pools and demos can restyle the portal without touching
//! the update rules. The defaults are the stock portal look.

use std::ops::Range;

use crate::intensity::IntensityWave;

/// Configuration for a [`FieldSim`](crate::FieldSim).
///
/// Construct with [`FieldConfig::default`] and override individual values
/// with the `with_*` builder methods:
///
/// ```
/// use gravwell::FieldConfig;
///
/// let config = FieldConfig::default()
///     .with_seed(7)
///     .with_particle_count(50);
/// assert_eq!(config.particle_count, 50);
/// ```
#[derive(Debug, Clone)]
pub struct FieldConfig {
    /// RNG seed. Two sims built from the same seed and dimensions emit
    /// identical draw-call sequences.
    pub seed: u64,
    /// Number of background stars (regenerated on resize).
    pub star_count: usize,
    /// Number of orbiting particles (fixed pool, recycled in place).
    pub particle_count: usize,
    /// Number of energy rings around the focal point.
    pub ring_count: usize,
    /// Particle hue band in degrees (cyan through blue by default).
    pub hue_band: Range<f32>,
    /// Distance above which gravity pull is zero.
    pub distance_ceiling: f32,
    /// Below this distance a particle is consumed and reseeded far away.
    pub consume_below: f32,
    /// Range a consumed particle's distance is reseeded into. The lower
    /// bound must stay above `fade_in_below` so recycled particles fade
    /// back in from zero alpha.
    pub reseed_range: Range<f32>,
    /// Particles fade in once closer than this.
    pub fade_in_below: f32,
    /// Particles fade out sharply once closer than this.
    pub fade_out_below: f32,
    /// Divisor mapping distance to the visual shrink factor.
    pub distance_scale: f32,
    /// Maximum trail points kept per particle.
    pub trail_len: usize,
    /// Ticks between an accepted toss and the text reveal (108 ~ 1.8s at 60Hz).
    pub reveal_delay_ticks: u64,
    /// Ticks between an accepted toss and the intensity boost clearing
    /// (480 ~ 8s at 60Hz).
    pub clear_delay_ticks: u64,
    /// Shape of the intensity signal.
    pub intensity: IntensityWave,
    /// Event-horizon radius: `horizon_base + horizon_gain * intensity`.
    pub horizon_base: f32,
    pub horizon_gain: f32,
    /// Accretion glow radius: `disk_base + disk_gain * intensity`.
    pub disk_base: f32,
    pub disk_gain: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            star_count: 80,
            particle_count: 200,
            ring_count: 3,
            hue_band: 180.0..240.0,
            distance_ceiling: 500.0,
            consume_below: 15.0,
            reseed_range: 400.0..700.0,
            fade_in_below: 350.0,
            fade_out_below: 30.0,
            distance_scale: 600.0,
            trail_len: 4,
            reveal_delay_ticks: 108,
            clear_delay_ticks: 480,
            intensity: IntensityWave::default(),
            horizon_base: 25.0,
            horizon_gain: 15.0,
            disk_base: 180.0,
            disk_gain: 50.0,
        }
    }
}

impl FieldConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of background stars.
    pub fn with_star_count(mut self, count: usize) -> Self {
        self.star_count = count;
        self
    }

    /// Set the number of orbiting particles.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    /// Set the number of energy rings.
    pub fn with_ring_count(mut self, count: usize) -> Self {
        self.ring_count = count;
        self
    }

    /// Set the particle hue band in degrees.
    pub fn with_hue_band(mut self, band: Range<f32>) -> Self {
        self.hue_band = band;
        self
    }

    /// Set the toss reveal/clear delays in ticks.
    pub fn with_toss_delays(mut self, reveal: u64, clear: u64) -> Self {
        self.reveal_delay_ticks = reveal;
        self.clear_delay_ticks = clear;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pool_counts() {
        let cfg = FieldConfig::default();
        assert_eq!(cfg.star_count, 80);
        assert_eq!(cfg.particle_count, 200);
        assert_eq!(cfg.ring_count, 3);
    }

    #[test]
    fn test_reseed_stays_clear_of_fade_in() {
        let cfg = FieldConfig::default();
        assert!(cfg.reseed_range.start > cfg.fade_in_below);
    }

    #[test]
    fn test_builder_chain() {
        let cfg = FieldConfig::default()
            .with_seed(9)
            .with_star_count(10)
            .with_ring_count(1)
            .with_toss_delays(5, 20);
        assert_eq!(cfg.seed, 9);
        assert_eq!(cfg.star_count, 10);
        assert_eq!(cfg.ring_count, 1);
        assert_eq!(cfg.reveal_delay_ticks, 5);
        assert_eq!(cfg.clear_delay_ticks, 20);
    }
}
