use crate::coords::{Affine, Vec2};
use crate::surface::Filter;

/// Coordinate space a queued draw is committed in.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Space {
    /// Camera-relative; the camera transform is applied at commit time.
    #[default]
    World,
    /// Screen pixels; the camera is ignored.
    Canvas,
}

/// Placement of one sprite.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawOptions {
    pub position: Vec2,
    /// Pivot for rotation, in image pixels. The origin ends up at `position`.
    pub origin: Vec2,
    /// Uniform scale. Negative values mirror.
    pub scale: f32,
    /// Radians.
    pub rotation: f32,
    /// Shear angles in radians. Only applied when both axes are non-zero.
    pub skew: Vec2,
    pub filter: Filter,
    pub space: Space,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            position: Vec2::zero(),
            origin: Vec2::zero(),
            scale: 1.0,
            rotation: 0.0,
            skew: Vec2::zero(),
            filter: Filter::Nearest,
            space: Space::World,
        }
    }
}

impl DrawOptions {
    /// Composes the sprite transform.
    ///
    /// Order:
    /// 1. rotate about `origin`
    /// 2. translate by `position - origin`
    /// 3. uniform scale (skipped when 1)
    /// 4. skew (skipped unless both components are non-zero)
    ///
    /// Affine composition does not commute; changing this order changes output.
    pub fn transform(&self) -> Affine {
        let mut t = Affine::identity()
            .translate(-self.origin.x, -self.origin.y)
            .rotate(self.rotation)
            .translate(self.origin.x, self.origin.y)
            .translate_by(self.position - self.origin);

        if self.scale != 1.0 {
            t = t.scale(self.scale, self.scale);
        }

        if self.skew.x != 0.0 && self.skew.y != 0.0 {
            t = t.skew(self.skew.x, self.skew.y);
        }

        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    fn assert_affine_close(got: Affine, want: Affine) {
        let pairs = [
            (got.a, want.a),
            (got.b, want.b),
            (got.c, want.c),
            (got.d, want.d),
            (got.tx, want.tx),
            (got.ty, want.ty),
        ];
        for (g, w) in pairs {
            assert!((g - w).abs() < 1e-4, "got {got:?}, want {want:?}");
        }
    }

    #[test]
    fn defaults_produce_identity() {
        assert!(DrawOptions::default().transform().is_identity());
    }

    #[test]
    fn composed_matrix_matches_hand_computation() {
        // T(-5,-5) -> R(90°) -> T(5,5) -> T(10-5, 10-5) -> S(2):
        //   linear part: 2 * [[0, -1], [1, 0]]
        //   (0,0) -> (-5,-5) -> (5,-5) -> (10,0) -> (15,5) -> (30,10)
        let opts = DrawOptions {
            origin: Vec2::new(5.0, 5.0),
            rotation: FRAC_PI_2,
            position: Vec2::new(10.0, 10.0),
            scale: 2.0,
            ..DrawOptions::default()
        };
        assert_affine_close(opts.transform(), Affine::new(0.0, -2.0, 2.0, 0.0, 30.0, 10.0));
    }

    #[test]
    fn origin_lands_on_position() {
        let opts = DrawOptions {
            origin: Vec2::new(8.0, 4.0),
            rotation: 1.234,
            position: Vec2::new(-20.0, 60.0),
            ..DrawOptions::default()
        };
        let p = opts.transform().apply(opts.origin);
        assert!((p.x + 20.0).abs() < 1e-4 && (p.y - 60.0).abs() < 1e-4, "{p:?}");
    }

    #[test]
    fn negative_scale_mirrors() {
        let opts = DrawOptions { scale: -1.0, ..DrawOptions::default() };
        assert_eq!(opts.transform().apply(Vec2::new(3.0, 2.0)), Vec2::new(-3.0, -2.0));
    }

    // ── skew ──────────────────────────────────────────────────────────────

    #[test]
    fn asymmetric_skew_is_ignored() {
        for skew in [Vec2::new(FRAC_PI_4, 0.0), Vec2::new(0.0, FRAC_PI_4)] {
            let opts = DrawOptions { skew, ..DrawOptions::default() };
            assert!(opts.transform().is_identity(), "skew {skew:?} applied");
        }
    }

    #[test]
    fn skew_on_both_axes_is_applied() {
        let opts = DrawOptions { skew: Vec2::new(FRAC_PI_4, FRAC_PI_4), ..DrawOptions::default() };
        let t = opts.transform();
        assert!((t.b - 1.0).abs() < 1e-4 && (t.c - 1.0).abs() < 1e-4, "{t:?}");
    }
}
