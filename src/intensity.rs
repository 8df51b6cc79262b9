//! The intensity signal.
//!
//! A single scalar couples user interaction to the simulation's look: ring
//! radii, gravity pull, glow size and the event horizon all scale with it.
//! It is the product of a slow ambient oscillation and a faster transient
//! boost that is only applied while a toss is in flight.

/// Parameters of the intensity signal.
///
/// `sample` evaluates `(base_center + base_amp * sin(tick * base_rate))`
/// multiplied, while boosted, by `(boost_center + boost_amp * sin(tick *
/// boost_rate))`. With the defaults the unboosted signal stays inside
/// `[0.6, 1.0]` and the boosted one inside roughly `[0.7, 1.8]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityWave {
    pub base_center: f32,
    pub base_amp: f32,
    pub base_rate: f32,
    pub boost_center: f32,
    pub boost_amp: f32,
    pub boost_rate: f32,
}

impl Default for IntensityWave {
    fn default() -> Self {
        Self {
            base_center: 0.8,
            base_amp: 0.2,
            base_rate: 0.03,
            boost_center: 1.5,
            boost_amp: 0.3,
            boost_rate: 0.1,
        }
    }
}

impl IntensityWave {
    /// Evaluate the signal for a tick.
    pub fn sample(&self, tick: u64, boosted: bool) -> f32 {
        let t = tick as f32;
        let base = self.base_center + self.base_amp * (t * self.base_rate).sin();
        let boost = if boosted {
            self.boost_center + self.boost_amp * (t * self.boost_rate).sin()
        } else {
            1.0
        };
        base * boost
    }

    /// Lower bound of the unboosted signal.
    pub fn base_min(&self) -> f32 {
        self.base_center - self.base_amp
    }

    /// Upper bound of the unboosted signal.
    pub fn base_max(&self) -> f32 {
        self.base_center + self.base_amp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unboosted_signal_stays_in_band() {
        let wave = IntensityWave::default();
        for tick in 0..20_000 {
            let s = wave.sample(tick, false);
            assert!(s >= wave.base_min() - 1e-4, "tick {tick}: {s}");
            assert!(s <= wave.base_max() + 1e-4, "tick {tick}: {s}");
        }
    }

    #[test]
    fn test_boost_raises_the_signal() {
        let wave = IntensityWave::default();
        // Minimum boosted factor is 1.2, so boosted always exceeds unboosted.
        for tick in 0..2_000 {
            assert!(wave.sample(tick, true) > wave.sample(tick, false));
        }
    }

    #[test]
    fn test_signal_is_pure_in_tick() {
        let wave = IntensityWave::default();
        assert_eq!(wave.sample(123, true), wave.sample(123, true));
    }
}
