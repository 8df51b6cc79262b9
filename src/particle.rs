//! Orbiting particles spiraling into the focal point.
//!
//! Particles live in polar coordinates around the focal point. Each tick
//! they orbit, spiral inward under an intensity-scaled gravity pull, and
//! once consumed by the center are reseeded far away instead of being
//! destroyed - the pool size never changes.

use std::collections::VecDeque;
use std::f32::consts::TAU;

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::config::FieldConfig;
use crate::frame::{DrawCmd, Frame, Rgba};

/// A recorded trail position with the alpha the particle had there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub alpha: f32,
}

/// One particle of the recycling pool.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Cartesian position, derived from the polar state every tick.
    pub pos: Vec2,
    pub base_radius: f32,
    pub radius: f32,
    pub angle: f32,
    /// Base angular speed; the effective speed scales with intensity.
    pub speed: f32,
    pub distance: f32,
    pub alpha: f32,
    pub alpha_rate: f32,
    /// Phase of the brightness flicker, advanced a fixed step per tick.
    pub flicker_phase: f32,
    pub hue: f32,
    /// Per-particle phase offset of the orbital wobble.
    pub wobble_phase: f32,
    /// Recent positions, newest first; bounded by `FieldConfig::trail_len`.
    pub trail: VecDeque<TrailPoint>,
}

impl Particle {
    pub fn spawn(rng: &mut SmallRng, focal: Vec2, cfg: &FieldConfig) -> Self {
        let base_radius = 0.8 + rng.gen::<f32>() * 3.0;
        let angle = rng.gen::<f32>() * TAU;
        let distance = 300.0 + rng.gen::<f32>() * 400.0;
        let hue_span = cfg.hue_band.end - cfg.hue_band.start;
        Self {
            pos: focal + Vec2::new(angle.cos(), angle.sin()) * distance,
            base_radius,
            radius: base_radius,
            angle,
            speed: 0.01 + rng.gen::<f32>() * 0.02,
            distance,
            alpha: 0.0,
            alpha_rate: 0.015 + rng.gen::<f32>() * 0.015,
            flicker_phase: rng.gen::<f32>() * TAU,
            hue: cfg.hue_band.start + rng.gen::<f32>() * hue_span,
            wobble_phase: rng.gen::<f32>() * TAU,
            trail: VecDeque::with_capacity(cfg.trail_len + 1),
        }
    }

    /// Advance the particle by one tick.
    ///
    /// Ordering matters: orbit, spiral, consume-and-reseed, wobble into
    /// cartesian, alpha fade, radius scale, flicker, trail record.
    pub fn update(
        &mut self,
        rng: &mut SmallRng,
        focal: Vec2,
        tick: u64,
        intensity: f32,
        cfg: &FieldConfig,
    ) {
        self.angle += self.speed * (1.0 + intensity * 0.5);

        // Inward spiral steepens near the center and while boosted. The
        // spiral step is re-randomized every tick.
        let pull = ((cfg.distance_ceiling - self.distance) / cfg.distance_ceiling).max(0.0)
            * intensity;
        let spiral = (0.8 + rng.gen::<f32>() * 1.2) * (1.0 + pull * 3.0);
        self.distance -= spiral;

        if self.distance < cfg.consume_below {
            let span = cfg.reseed_range.end - cfg.reseed_range.start;
            self.distance = cfg.reseed_range.start + rng.gen::<f32>() * span;
            self.alpha = 0.0;
            self.angle = rng.gen::<f32>() * TAU;
        }

        let wobble = ((tick as f32) * 0.02 + self.wobble_phase).sin() * 20.0;
        self.pos = focal + Vec2::new(self.angle.cos(), self.angle.sin()) * (self.distance + wobble);

        if self.alpha < 1.0 && self.distance < cfg.fade_in_below {
            self.alpha += self.alpha_rate;
        } else if self.distance < cfg.fade_out_below {
            self.alpha -= self.alpha_rate * 3.0;
        }
        self.alpha = self.alpha.clamp(0.0, 1.0);

        let distance_scale = (self.distance / cfg.distance_scale).max(0.2);
        self.radius = self.base_radius * distance_scale * (1.0 + intensity * 0.5);

        self.flicker_phase += 0.08;

        self.trail.push_front(TrailPoint {
            pos: self.pos,
            alpha: self.alpha,
        });
        self.trail.truncate(cfg.trail_len);
    }

    /// Emit the trail (oldest faintest) followed by the particle body and
    /// its core highlight.
    pub fn draw(&self, frame: &mut Frame, intensity: f32) {
        if self.alpha <= 0.0 {
            return;
        }

        let trail_len = self.trail.len() as f32;
        for (i, point) in self.trail.iter().enumerate() {
            let falloff = 1.0 - i as f32 / trail_len;
            let trail_alpha = point.alpha * falloff * 0.4;
            if trail_alpha <= 0.02 {
                continue;
            }
            let trail_size = (self.radius * falloff * 0.6).max(0.1);
            let color = Rgba::hsla(self.hue, 1.0, 0.7, trail_alpha);
            frame.push(DrawCmd::Disc {
                center: point.pos,
                radius: trail_size,
                color,
                glow_radius: trail_size * 2.0,
                glow_color: color.with_alpha(trail_alpha * 0.5),
            });
        }

        let flicker = 0.7 + 0.3 * self.flicker_phase.sin();
        let final_alpha = self.alpha * flicker;
        let lightness = 0.6 + self.flicker_phase.sin() * 0.15;

        frame.push(DrawCmd::Disc {
            center: self.pos,
            radius: self.radius.max(0.3),
            color: Rgba::hsla(self.hue, 1.0, lightness, final_alpha),
            glow_radius: self.radius * (4.0 + intensity * 2.0),
            glow_color: Rgba::hsla(self.hue, 1.0, 0.7, final_alpha * 0.8),
        });

        frame.push(DrawCmd::Disc {
            center: self.pos,
            radius: (self.radius * 0.3).max(0.1),
            color: Rgba::hsla(self.hue + 30.0, 1.0, 0.9, final_alpha * 0.6),
            glow_radius: self.radius * 1.5,
            glow_color: Rgba::hsla(self.hue + 30.0, 1.0, 0.9, final_alpha * 0.3),
        });
    }
}

/// Build the fixed particle pool around the focal point.
pub fn spawn_pool(
    rng: &mut SmallRng,
    count: usize,
    focal: Vec2,
    cfg: &FieldConfig,
) -> Vec<Particle> {
    (0..count).map(|_| Particle::spawn(rng, focal, cfg)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn test_particle(rng: &mut SmallRng, cfg: &FieldConfig) -> Particle {
        Particle::spawn(rng, Vec2::new(400.0, 300.0), cfg)
    }

    #[test]
    fn test_consumed_particle_reseeds_far_away() {
        let cfg = FieldConfig::default();
        let mut rng = SmallRng::seed_from_u64(10);
        let focal = Vec2::new(400.0, 300.0);
        let mut p = test_particle(&mut rng, &cfg);
        p.distance = cfg.consume_below - 1.0;
        p.alpha = 0.9;
        p.update(&mut rng, focal, 0, 1.0, &cfg);
        assert!(p.distance >= cfg.reseed_range.start - 1e-3);
        assert!(p.distance < cfg.reseed_range.end);
        assert_eq!(p.alpha, 0.0);
    }

    #[test]
    fn test_distance_never_rests_below_threshold() {
        let cfg = FieldConfig::default();
        let mut rng = SmallRng::seed_from_u64(11);
        let focal = Vec2::new(400.0, 300.0);
        let mut p = test_particle(&mut rng, &cfg);
        for tick in 0..20_000 {
            p.update(&mut rng, focal, tick, 1.8, &cfg);
            assert!(
                p.distance >= cfg.consume_below,
                "tick {tick}: distance {} below threshold",
                p.distance
            );
        }
    }

    #[test]
    fn test_alpha_stays_clamped() {
        let cfg = FieldConfig::default();
        let mut rng = SmallRng::seed_from_u64(12);
        let focal = Vec2::new(400.0, 300.0);
        let mut p = test_particle(&mut rng, &cfg);
        for tick in 0..20_000 {
            p.update(&mut rng, focal, tick, 1.0, &cfg);
            assert!((0.0..=1.0).contains(&p.alpha));
        }
    }

    #[test]
    fn test_trail_is_bounded() {
        let cfg = FieldConfig::default();
        let mut rng = SmallRng::seed_from_u64(13);
        let focal = Vec2::new(400.0, 300.0);
        let mut p = test_particle(&mut rng, &cfg);
        for tick in 0..100 {
            p.update(&mut rng, focal, tick, 1.0, &cfg);
            assert!(p.trail.len() <= cfg.trail_len);
        }
        // Newest point first.
        assert_eq!(p.trail[0].pos, p.pos);
    }

    #[test]
    fn test_invisible_particle_draws_nothing() {
        let cfg = FieldConfig::default();
        let mut rng = SmallRng::seed_from_u64(14);
        let p = test_particle(&mut rng, &cfg);
        assert_eq!(p.alpha, 0.0);
        let mut frame = Frame::new();
        p.draw(&mut frame, 1.0);
        assert!(frame.is_empty());
    }

    #[test]
    fn test_hue_within_band() {
        let cfg = FieldConfig::default();
        let mut rng = SmallRng::seed_from_u64(15);
        for _ in 0..200 {
            let p = test_particle(&mut rng, &cfg);
            assert!(p.hue >= cfg.hue_band.start && p.hue < cfg.hue_band.end);
        }
    }
}
