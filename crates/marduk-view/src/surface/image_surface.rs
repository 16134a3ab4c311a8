use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::coords::{Affine, Vec2};

use super::{Filter, LoadError, Surface};

/// CPU surface backed by an 8-bit straight-alpha RGBA buffer.
///
/// Blits inverse-map every covered destination pixel center into source space,
/// sample there, and blend source-over in premultiplied space.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSurface {
    pixels: RgbaImage,
}

impl ImageSurface {
    /// Transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { pixels: RgbaImage::new(width, height) }
    }

    /// Surface where every pixel is `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self { pixels: RgbaImage::from_pixel(width, height, Rgba(rgba)) }
    }

    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// Procedural surface; `f(x, y)` yields each pixel's RGBA.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [u8; 4]) -> Self {
        Self { pixels: RgbaImage::from_fn(width, height, |x, y| Rgba(f(x, y))) }
    }

    /// Decodes an image file (format guessed from the extension).
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|e| LoadError::new(path, e))?;
        Ok(Self::from_rgba(decoded.to_rgba8()))
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// RGBA of the pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixels.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Row-major RGBA bytes, suitable for a texture upload.
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    #[inline]
    pub fn as_image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    /// True when every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.pixels.pixels().all(|p| p.0[3] == 0)
    }
}

impl Surface for ImageSurface {
    fn with_size(width: u32, height: u32) -> Self {
        Self::new(width, height)
    }

    fn size(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn draw_image(&mut self, src: &Self, transform: Affine, filter: Filter) {
        let (sw, sh) = src.size();
        let (dw, dh) = self.size();
        if sw == 0 || sh == 0 || dw == 0 || dh == 0 {
            return;
        }

        let Some(inverse) = transform.invert() else {
            log::trace!("skipping blit with singular transform {transform:?}");
            return;
        };
        let Some((x0, y0, x1, y1)) = covered_bounds(transform, sw, sh, dw, dh) else {
            return;
        };

        for y in y0..y1 {
            for x in x0..x1 {
                let p = inverse.apply(Vec2::new(x as f32 + 0.5, y as f32 + 0.5));
                let sampled = match filter {
                    Filter::Nearest => sample_nearest(&src.pixels, p),
                    Filter::Linear => sample_linear(&src.pixels, p),
                };
                if let Some(color) = sampled {
                    blend_over(self.pixels.get_pixel_mut(x, y), color);
                }
            }
        }
    }
}

// ── coverage ──────────────────────────────────────────────────────────────

/// Destination pixel range `[x0, x1) x [y0, y1)` touched by the transformed source
/// rectangle, clipped to the destination.
fn covered_bounds(t: Affine, sw: u32, sh: u32, dw: u32, dh: u32) -> Option<(u32, u32, u32, u32)> {
    let (w, h) = (sw as f32, sh as f32);
    let corners = [
        t.apply(Vec2::new(0.0, 0.0)),
        t.apply(Vec2::new(w, 0.0)),
        t.apply(Vec2::new(0.0, h)),
        t.apply(Vec2::new(w, h)),
    ];
    if !corners.iter().all(|c| c.is_finite()) {
        return None;
    }

    let min_x = corners.iter().map(|c| c.x).fold(f32::INFINITY, f32::min);
    let min_y = corners.iter().map(|c| c.y).fold(f32::INFINITY, f32::min);
    let max_x = corners.iter().map(|c| c.x).fold(f32::NEG_INFINITY, f32::max);
    let max_y = corners.iter().map(|c| c.y).fold(f32::NEG_INFINITY, f32::max);

    // `as u32` saturates, so negative coordinates land on 0.
    let x0 = (min_x.floor().max(0.0) as u32).min(dw);
    let y0 = (min_y.floor().max(0.0) as u32).min(dh);
    let x1 = (max_x.ceil().max(0.0) as u32).min(dw);
    let y1 = (max_y.ceil().max(0.0) as u32).min(dh);

    if x0 >= x1 || y0 >= y1 { None } else { Some((x0, y0, x1, y1)) }
}

// ── sampling ──────────────────────────────────────────────────────────────

fn inside(img: &RgbaImage, p: Vec2) -> bool {
    p.x >= 0.0 && p.y >= 0.0 && p.x < img.width() as f32 && p.y < img.height() as f32
}

fn sample_nearest(img: &RgbaImage, p: Vec2) -> Option<[f32; 4]> {
    if !inside(img, p) {
        return None;
    }
    let x = (p.x as u32).min(img.width() - 1);
    let y = (p.y as u32).min(img.height() - 1);
    Some(premultiply(*img.get_pixel(x, y)))
}

/// Bilinear sampling between texel centers, clamped to the image edge.
fn sample_linear(img: &RgbaImage, p: Vec2) -> Option<[f32; 4]> {
    if !inside(img, p) {
        return None;
    }

    let u = p.x - 0.5;
    let v = p.y - 0.5;
    let fu = u.floor();
    let fv = v.floor();
    let (tu, tv) = (u - fu, v - fv);

    let max_x = i64::from(img.width()) - 1;
    let max_y = i64::from(img.height()) - 1;
    let ix0 = (fu as i64).clamp(0, max_x) as u32;
    let ix1 = (fu as i64 + 1).clamp(0, max_x) as u32;
    let iy0 = (fv as i64).clamp(0, max_y) as u32;
    let iy1 = (fv as i64 + 1).clamp(0, max_y) as u32;

    let p00 = premultiply(*img.get_pixel(ix0, iy0));
    let p10 = premultiply(*img.get_pixel(ix1, iy0));
    let p01 = premultiply(*img.get_pixel(ix0, iy1));
    let p11 = premultiply(*img.get_pixel(ix1, iy1));

    let mut out = [0.0; 4];
    for (i, o) in out.iter_mut().enumerate() {
        let top = p00[i] + (p10[i] - p00[i]) * tu;
        let bottom = p01[i] + (p11[i] - p01[i]) * tu;
        *o = top + (bottom - top) * tv;
    }
    Some(out)
}

// ── blending ──────────────────────────────────────────────────────────────

fn premultiply(px: Rgba<u8>) -> [f32; 4] {
    let a = f32::from(px.0[3]) / 255.0;
    [
        f32::from(px.0[0]) / 255.0 * a,
        f32::from(px.0[1]) / 255.0 * a,
        f32::from(px.0[2]) / 255.0 * a,
        a,
    ]
}

fn unpremultiply(c: [f32; 4]) -> Rgba<u8> {
    let a = c[3];
    if a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgba([to_u8(c[0] / a), to_u8(c[1] / a), to_u8(c[2] / a), to_u8(a)])
}

fn blend_over(dst: &mut Rgba<u8>, src: [f32; 4]) {
    let sa = src[3];
    if sa <= 0.0 {
        return;
    }
    let d = premultiply(*dst);
    let inv = 1.0 - sa;
    *dst = unpremultiply([
        src[0] + d[0] * inv,
        src[1] + d[1] * inv,
        src[2] + d[2] * inv,
        sa + d[3] * inv,
    ]);
}
