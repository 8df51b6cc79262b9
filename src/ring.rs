//! Energy rings around the focal point.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::frame::{DrawCmd, Frame, Rgba};

/// A pulsating ring orbiting the focal point.
///
/// The rendered radius oscillates around `base_radius` as a function of the
/// accumulated rotation, scaled by the intensity signal. Rings are created
/// once at simulator start and only ever mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyRing {
    pub base_radius: f32,
    pub radius: f32,
    pub alpha: f32,
    pub rotation: f32,
    pub rotation_rate: f32,
    pub thickness: f32,
}

impl EnergyRing {
    pub fn spawn(rng: &mut SmallRng) -> Self {
        let base_radius = 50.0 + rng.gen::<f32>() * 100.0;
        Self {
            base_radius,
            radius: base_radius,
            alpha: 0.8,
            rotation: rng.gen::<f32>() * TAU,
            rotation_rate: 0.02 + rng.gen::<f32>() * 0.03,
            thickness: 2.0 + rng.gen::<f32>() * 3.0,
        }
    }

    /// Advance rotation and recompute the oscillating radius.
    pub fn update(&mut self, intensity: f32) {
        self.rotation += self.rotation_rate;
        self.radius = self.base_radius + (self.rotation * 3.0).sin() * 20.0 * intensity;
    }

    /// Emit the ring as a closed wavy polyline, 15 degrees per segment.
    pub fn draw(&self, frame: &mut Frame, focal: Vec2, intensity: f32) {
        let mut points = Vec::with_capacity(24);
        for step in 0..24 {
            let angle = step as f32 * 15.0_f32.to_radians() + self.rotation;
            let wave = (angle * 4.0 + self.rotation * 3.0).sin() * 8.0 * intensity;
            let r = self.radius + wave;
            points.push(focal + Vec2::new(angle.cos(), angle.sin()) * r);
        }
        frame.push(DrawCmd::Polyline {
            points,
            closed: true,
            thickness: self.thickness * intensity,
            color: Rgba::rgba(0.0, 1.0, 1.0, self.alpha * intensity),
        });
    }

    /// Bound of the radius oscillation for a given intensity.
    pub fn radius_swing(intensity: f32) -> f32 {
        20.0 * intensity
    }
}

/// Build the fixed ring pool.
pub fn spawn_pool(rng: &mut SmallRng, count: usize) -> Vec<EnergyRing> {
    (0..count).map(|_| EnergyRing::spawn(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_radius_oscillates_within_swing() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut ring = EnergyRing::spawn(&mut rng);
        let base = ring.base_radius;
        for _ in 0..5_000 {
            ring.update(1.0);
            assert!((ring.radius - base).abs() <= EnergyRing::radius_swing(1.0) + 1e-3);
        }
    }

    #[test]
    fn test_rotation_accumulates() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut ring = EnergyRing::spawn(&mut rng);
        let start = ring.rotation;
        ring.update(1.0);
        ring.update(1.0);
        assert!((ring.rotation - start - 2.0 * ring.rotation_rate).abs() < 1e-5);
    }

    #[test]
    fn test_draw_emits_closed_polyline() {
        let mut rng = SmallRng::seed_from_u64(6);
        let ring = EnergyRing::spawn(&mut rng);
        let mut frame = Frame::new();
        ring.draw(&mut frame, Vec2::new(400.0, 300.0), 1.0);
        match &frame.cmds()[0] {
            DrawCmd::Polyline { points, closed, .. } => {
                assert_eq!(points.len(), 24);
                assert!(*closed);
            }
            other => panic!("expected polyline, got {other:?}"),
        }
    }
}
