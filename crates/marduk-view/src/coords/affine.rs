use super::Vec2;

/// 2x3 affine transform.
///
/// Maps a point as:
///
/// ```text
/// x' = a * x + b * y + tx
/// y' = c * x + d * y + ty
/// ```
///
/// Every builder method post-composes: `t.rotate(r)` first applies `t`, then the
/// rotation. Chains therefore read in application order, which is the order the
/// draw-op pipeline documents.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Affine {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine { a: 1.0, b: 0.0, c: 0.0, d: 1.0, tx: 0.0, ty: 0.0 };

    #[inline]
    pub const fn new(a: f32, b: f32, c: f32, d: f32, tx: f32, ty: f32) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Pure translation.
    #[inline]
    pub const fn translation(tx: f32, ty: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Returns `next ∘ self`: a transform applying `self`, then `next`.
    #[inline]
    pub fn then(self, next: Affine) -> Self {
        Self {
            a: next.a * self.a + next.b * self.c,
            b: next.a * self.b + next.b * self.d,
            c: next.c * self.a + next.d * self.c,
            d: next.c * self.b + next.d * self.d,
            tx: next.a * self.tx + next.b * self.ty + next.tx,
            ty: next.c * self.tx + next.d * self.ty + next.ty,
        }
    }

    #[inline]
    pub fn translate(self, tx: f32, ty: f32) -> Self {
        Self { tx: self.tx + tx, ty: self.ty + ty, ..self }
    }

    #[inline]
    pub fn translate_by(self, v: Vec2) -> Self {
        self.translate(v.x, v.y)
    }

    #[inline]
    pub fn scale(self, sx: f32, sy: f32) -> Self {
        self.then(Affine::new(sx, 0.0, 0.0, sy, 0.0, 0.0))
    }

    /// Rotation by `radians`; positive angles turn +X towards +Y (clockwise on screen).
    #[inline]
    pub fn rotate(self, radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        self.then(Affine::new(cos, -sin, sin, cos, 0.0, 0.0))
    }

    /// Shear by the given angles (radians). `skew_x` shears along X as Y grows.
    #[inline]
    pub fn skew(self, skew_x: f32, skew_y: f32) -> Self {
        self.then(Affine::new(1.0, skew_x.tan(), skew_y.tan(), 1.0, 0.0, 0.0))
    }

    #[inline]
    pub fn apply(self, p: Vec2) -> Vec2 {
        Vec2::new(
            self.a * p.x + self.b * p.y + self.tx,
            self.c * p.x + self.d * p.y + self.ty,
        )
    }

    #[inline]
    pub fn determinant(self) -> f32 {
        self.a * self.d - self.b * self.c
    }

    /// Inverse transform, or `None` when the matrix is singular or non-finite.
    pub fn invert(self) -> Option<Affine> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }

        let a = self.d / det;
        let b = -self.b / det;
        let c = -self.c / det;
        let d = self.a / det;

        Some(Affine {
            a,
            b,
            c,
            d,
            tx: -(a * self.tx + b * self.ty),
            ty: -(c * self.tx + d * self.ty),
        })
    }

    #[inline]
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::FRAC_PI_2;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    // ── composition order ─────────────────────────────────────────────────

    #[test]
    fn translate_then_scale_scales_the_offset() {
        let t = Affine::identity().translate(2.0, 3.0).scale(2.0, 2.0);
        assert_eq!(t.apply(Vec2::zero()), Vec2::new(4.0, 6.0));
    }

    #[test]
    fn scale_then_translate_keeps_the_offset() {
        let t = Affine::identity().scale(2.0, 2.0).translate(2.0, 3.0);
        assert_eq!(t.apply(Vec2::zero()), Vec2::new(2.0, 3.0));
        assert_eq!(t.apply(Vec2::new(1.0, 1.0)), Vec2::new(4.0, 5.0));
    }

    #[test]
    fn rotate_quarter_turn_maps_x_to_y() {
        let t = Affine::identity().rotate(FRAC_PI_2);
        assert!(close(t.apply(Vec2::new(1.0, 0.0)), Vec2::new(0.0, 1.0)));
        assert!(close(t.apply(Vec2::new(0.0, 1.0)), Vec2::new(-1.0, 0.0)));
    }

    #[test]
    fn then_matches_chained_application() {
        let first = Affine::identity().rotate(0.3).translate(4.0, -1.0);
        let second = Affine::identity().scale(1.5, 0.5).translate(-2.0, 7.0);
        let p = Vec2::new(3.0, 9.0);
        assert!(close(first.then(second).apply(p), second.apply(first.apply(p))));
    }

    #[test]
    fn skew_shears_each_axis() {
        let t = Affine::identity().skew(core::f32::consts::FRAC_PI_4, 0.0);
        assert!(close(t.apply(Vec2::new(0.0, 2.0)), Vec2::new(2.0, 2.0)));
    }

    // ── invert ────────────────────────────────────────────────────────────

    #[test]
    fn invert_round_trips_points() {
        let t = Affine::identity()
            .translate(-5.0, -5.0)
            .rotate(1.1)
            .scale(3.0, 0.25)
            .translate(40.0, 12.0);
        let inv = t.invert().unwrap();
        let p = Vec2::new(17.0, -3.5);
        assert!(close(inv.apply(t.apply(p)), p));
        assert!(close(t.then(inv).apply(p), p));
    }

    #[test]
    fn invert_singular_returns_none() {
        assert!(Affine::identity().scale(0.0, 1.0).invert().is_none());
    }

    #[test]
    fn default_is_identity() {
        assert!(Affine::default().is_identity());
        assert_eq!(Affine::translation(1.0, 2.0), Affine::identity().translate(1.0, 2.0));
    }
}
