//! Background starfield.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::frame::{DrawCmd, Frame, Rgba};

/// A twinkling background star.
///
/// Stars are independent of the intensity signal; their brightness bounces
/// between 0 and 1 at a per-star rate. The whole pool is regenerated when
/// the surface is resized.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub brightness: f32,
    pub twinkle_rate: f32,
    pub size: f32,
}

impl Star {
    /// Spawn a star at a uniformly random position on the surface.
    pub fn spawn(rng: &mut SmallRng, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(rng.gen::<f32>() * width, rng.gen::<f32>() * height),
            brightness: rng.gen(),
            twinkle_rate: 0.02 + rng.gen::<f32>() * 0.03,
            size: 0.5 + rng.gen::<f32>() * 1.5,
        }
    }

    /// Advance the twinkle oscillation by one tick.
    ///
    /// The rate is negated when brightness leaves `[0, 1]`, then brightness
    /// is clamped back into the band.
    pub fn update(&mut self) {
        self.brightness += self.twinkle_rate;
        if self.brightness > 1.0 || self.brightness < 0.0 {
            self.twinkle_rate = -self.twinkle_rate;
        }
        self.brightness = self.brightness.clamp(0.0, 1.0);
    }

    pub fn draw(&self, frame: &mut Frame) {
        let alpha = self.brightness * 0.8;
        let color = Rgba::WHITE.with_alpha(alpha);
        frame.push(DrawCmd::Disc {
            center: self.pos,
            radius: self.size,
            color,
            glow_radius: self.size * 2.0,
            glow_color: color.with_alpha(alpha * 0.5),
        });
    }
}

/// Build a fresh pool of `count` stars for the given surface size.
pub fn spawn_pool(rng: &mut SmallRng, count: usize, width: f32, height: f32) -> Vec<Star> {
    (0..count).map(|_| Star::spawn(rng, width, height)).collect()
}
