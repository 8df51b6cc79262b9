//! Retained draw-call list produced by one tick.
//!
//! The simulation never touches the GPU directly. Each tick rebuilds a
//! [`Frame`] - an ordered list of [`DrawCmd`]s in surface pixel coordinates -
//! and the renderer replays it back-to-front. Keeping the draw layer as
//! plain data makes the whole visual output of a tick comparable in tests.

use glam::Vec2;

/// Linear RGBA color, each channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Rgba = Rgba::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Rgba = Rgba::rgba(1.0, 1.0, 1.0, 1.0);

    /// Opaque color from RGB channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Color from RGBA channels. Alpha is clamped when drawn, not here,
    /// so intensity-scaled alphas above 1.0 are representable.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Color from hue (degrees, wraps), saturation, lightness and alpha.
    ///
    /// The particle palette is authored in HSL and lives in the 180-240
    /// degree band.
    pub fn hsla(hue_deg: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        let h = hue_deg.rem_euclid(360.0) / 60.0;
        let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = lightness - c / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Self::rgba(r + m, g + m, b + m, alpha)
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { a: alpha, ..self }
    }

    /// Channels clamped to `[0, 1]`, ready for the renderer.
    pub fn clamped(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        let c = self.clamped();
        [c.r, c.g, c.b, c.a]
    }
}

/// One color stop of a radial gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient, `0.0` at the inner radius, `1.0` at the outer.
    pub offset: f32,
    pub color: Rgba,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// A single draw call in surface pixel coordinates.
///
/// Commands are replayed in emission order; later commands paint over
/// earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Radial gradient fill between two radii around a center. Everything
    /// inside the inner radius takes the first stop's color, everything
    /// outside the outer radius the last stop's.
    RadialGradient {
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        stops: Vec<GradientStop>,
    },
    /// Filled disc with an optional soft halo extending `glow_radius`
    /// pixels past the rim in `glow_color`.
    Disc {
        center: Vec2,
        radius: f32,
        color: Rgba,
        glow_radius: f32,
        glow_color: Rgba,
    },
    /// Stroked polyline; `closed` joins the last point back to the first.
    Polyline {
        points: Vec<Vec2>,
        closed: bool,
        thickness: f32,
        color: Rgba,
    },
    /// Stroked circle outline.
    Circle {
        center: Vec2,
        radius: f32,
        thickness: f32,
        color: Rgba,
    },
}

/// The draw-call list for one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    cmds: Vec<DrawCmd>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all commands, keeping the allocation for the next tick.
    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }

    pub fn cmds(&self) -> &[DrawCmd] {
        &self.cmds
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Number of commands matching a predicate. Test helper, mostly.
    pub fn count_where(&self, pred: impl Fn(&DrawCmd) -> bool) -> usize {
        self.cmds.iter().filter(|c| pred(c)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsla_primaries() {
        let red = Rgba::hsla(0.0, 1.0, 0.5, 1.0);
        assert!((red.r - 1.0).abs() < 0.001);
        assert!(red.g < 0.001);
        assert!(red.b < 0.001);

        let cyan = Rgba::hsla(180.0, 1.0, 0.5, 1.0);
        assert!(cyan.r < 0.001);
        assert!((cyan.g - 1.0).abs() < 0.001);
        assert!((cyan.b - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_hsla_wraps_hue() {
        let a = Rgba::hsla(30.0, 1.0, 0.5, 1.0);
        let b = Rgba::hsla(390.0, 1.0, 0.5, 1.0);
        assert!((a.r - b.r).abs() < 0.001);
        assert!((a.g - b.g).abs() < 0.001);
        assert!((a.b - b.b).abs() < 0.001);
    }

    #[test]
    fn test_hsla_lightness_extremes() {
        let white = Rgba::hsla(200.0, 1.0, 1.0, 1.0);
        assert!((white.r - 1.0).abs() < 0.001);
        let black = Rgba::hsla(200.0, 1.0, 0.0, 1.0);
        assert!(black.g < 0.001);
    }

    #[test]
    fn test_clamped_caps_overdriven_alpha() {
        let c = Rgba::rgba(0.0, 1.0, 1.0, 1.4).clamped();
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_frame_clear_keeps_nothing() {
        let mut frame = Frame::new();
        frame.push(DrawCmd::Circle {
            center: Vec2::ZERO,
            radius: 1.0,
            thickness: 1.0,
            color: Rgba::WHITE,
        });
        assert_eq!(frame.len(), 1);
        frame.clear();
        assert!(frame.is_empty());
    }
}
