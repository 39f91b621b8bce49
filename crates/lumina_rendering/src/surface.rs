//! Drawing surface with canvas-like fill primitives.
//!
//! Pixels are stored as premultiplied linear RGBA in `f32`. Shapes are
//! anti-aliased by area coverage, so sub-pixel particles (1.2px squares)
//! still contribute proportionally instead of snapping to whole pixels.

use lumina_core::Color;

use crate::effect::SurfaceEffect;

/// Subsamples per axis for disc coverage.
const DISC_SUBSAMPLES: u32 = 4;

/// An RGBA drawing surface.
#[derive(Debug, Clone)]
pub struct Surface {
    width: u32,
    height: u32,
    /// Premultiplied RGBA, row-major.
    pixels: Vec<[f32; 4]>,
}

impl Surface {
    /// Creates a transparent surface.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0.0; 4]; width as usize * height as usize],
        }
    }

    /// Resizes and clears the surface.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width as usize * height as usize, [0.0; 4]);
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// True if either dimension is zero. Nothing can be drawn.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clears every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixels.fill([0.0; 4]);
    }

    /// Raw premultiplied pixels as bytes (native-endian `f32`).
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Reads back one pixel as a straight-alpha color.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(unpremultiply(self.pixels[self.index(x, y)]))
    }

    /// Sum of alpha over the whole surface. Handy for "did anything draw".
    #[must_use]
    pub fn total_alpha(&self) -> f64 {
        self.pixels.iter().map(|p| f64::from(p[3])).sum()
    }

    /// Fills an axis-aligned rectangle with top-left corner at `(x, y)`.
    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        if self.is_empty() || !(x.is_finite() && y.is_finite() && w > 0.0 && h > 0.0) {
            return;
        }
        let Some((x0, x1)) = clip_span(x, x + w, self.width) else {
            return;
        };
        let Some((y0, y1)) = clip_span(y, y + h, self.height) else {
            return;
        };

        for py in y0..y1 {
            let cover_y = overlap(y, y + h, f64::from(py));
            for px in x0..x1 {
                let cover = cover_y * overlap(x, x + w, f64::from(px));
                if cover > 0.0 {
                    self.blend(px, py, color, cover as f32);
                }
            }
        }
    }

    /// Fills a circle centered at `(cx, cy)`.
    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        if self.is_empty() || !(cx.is_finite() && cy.is_finite() && radius > 0.0) {
            return;
        }
        let Some((x0, x1)) = clip_span(cx - radius, cx + radius, self.width) else {
            return;
        };
        let Some((y0, y1)) = clip_span(cy - radius, cy + radius, self.height) else {
            return;
        };

        let r2 = radius * radius;
        let step = 1.0 / f64::from(DISC_SUBSAMPLES);
        let per_sample = 1.0 / f64::from(DISC_SUBSAMPLES * DISC_SUBSAMPLES);

        for py in y0..y1 {
            for px in x0..x1 {
                let mut inside = 0u32;
                for sy in 0..DISC_SUBSAMPLES {
                    let dy = f64::from(py) + (f64::from(sy) + 0.5) * step - cy;
                    for sx in 0..DISC_SUBSAMPLES {
                        let dx = f64::from(px) + (f64::from(sx) + 0.5) * step - cx;
                        if dx * dx + dy * dy <= r2 {
                            inside += 1;
                        }
                    }
                }
                if inside > 0 {
                    self.blend(px, py, color, (f64::from(inside) * per_sample) as f32);
                }
            }
        }
    }

    /// Composites the surface through `effect` into an 8-bit frame.
    #[must_use]
    pub fn present(&self, effect: &SurfaceEffect) -> Frame {
        let blurred;
        let source = if effect.has_blur() && !self.is_empty() {
            blurred = effect.blur(&self.pixels, self.width as usize, self.height as usize);
            &blurred
        } else {
            &self.pixels
        };

        let opacity = effect.opacity.clamp(0.0, 1.0);
        let pixels = source
            .iter()
            .map(|&px| to_rgba8(unpremultiply(px.map(|c| (c * opacity).max(0.0)))))
            .collect();

        Frame {
            width: self.width,
            height: self.height,
            pixels,
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Source-over blend of `color` scaled by `coverage`.
    fn blend(&mut self, x: u32, y: u32, color: Color, coverage: f32) {
        let index = self.index(x, y);
        let alpha = (color.a * coverage).clamp(0.0, 1.0);
        let dst = &mut self.pixels[index];
        let keep = 1.0 - alpha;
        dst[0] = color.r * alpha + dst[0] * keep;
        dst[1] = color.g * alpha + dst[1] * keep;
        dst[2] = color.b * alpha + dst[2] * keep;
        dst[3] = alpha + dst[3] * keep;
    }
}

/// Pixel range touched by `[lo, hi)`, clipped to `[0, limit)`.
fn clip_span(lo: f64, hi: f64, limit: u32) -> Option<(u32, u32)> {
    let start = lo.floor().max(0.0);
    let end = hi.ceil().min(f64::from(limit));
    if end <= start {
        return None;
    }
    Some((start as u32, end as u32))
}

/// Length of `[lo, hi)` inside the unit cell starting at `cell`.
#[inline]
fn overlap(lo: f64, hi: f64, cell: f64) -> f64 {
    (hi.min(cell + 1.0) - lo.max(cell)).max(0.0)
}

#[inline]
fn unpremultiply([r, g, b, a]: [f32; 4]) -> Color {
    if a <= f32::EPSILON {
        return Color::TRANSPARENT;
    }
    Color::rgba(
        (r / a).min(1.0),
        (g / a).min(1.0),
        (b / a).min(1.0),
        a.min(1.0),
    )
}

#[inline]
fn to_rgba8(color: Color) -> [u8; 4] {
    color
        .to_array()
        .map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// A presented frame: straight-alpha RGBA8, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// One `[r, g, b, a]` per pixel.
    pub pixels: Vec<[u8; 4]>,
}

impl Frame {
    /// Pixels as a flat byte slice, ready for upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Reads one pixel.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_covers_expected_pixels() {
        let mut surface = Surface::new(8, 8);
        surface.fill_rect(2.0, 3.0, 2.0, 1.0, Color::WHITE);

        assert_eq!(surface.pixel(2, 3), Some(Color::WHITE));
        assert_eq!(surface.pixel(3, 3), Some(Color::WHITE));
        assert_eq!(surface.pixel(4, 3), Some(Color::TRANSPARENT));
        assert_eq!(surface.pixel(2, 4), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_subpixel_rect_has_partial_coverage() {
        let mut surface = Surface::new(4, 4);
        surface.fill_rect(1.5, 1.5, 1.2, 1.2, Color::WHITE);

        // 1.2 x 1.2 area spread over four pixels
        assert!((surface.total_alpha() - 1.44).abs() < 1e-4);
        let corner = surface.pixel(1, 1).unwrap();
        assert!((corner.a - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_circle_area_matches_radius() {
        let mut surface = Surface::new(32, 32);
        surface.fill_circle(16.0, 16.0, 2.5, Color::WHITE);

        let area = std::f64::consts::PI * 2.5 * 2.5;
        assert!((surface.total_alpha() - area).abs() < 1.5);
    }

    #[test]
    fn test_source_over_blending() {
        let mut surface = Surface::new(1, 1);
        let half = Color::rgba(1.0, 0.0, 0.0, 0.5);
        surface.fill_rect(0.0, 0.0, 1.0, 1.0, half);
        surface.fill_rect(0.0, 0.0, 1.0, 1.0, half);

        let pixel = surface.pixel(0, 0).unwrap();
        assert!((pixel.a - 0.75).abs() < 1e-6);
        assert!((pixel.r - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_offscreen_and_non_finite_draws_are_ignored() {
        let mut surface = Surface::new(10, 10);
        surface.fill_rect(-50.0, -50.0, 1.2, 1.2, Color::WHITE);
        surface.fill_rect(f64::NAN, 2.0, 1.2, 1.2, Color::WHITE);
        surface.fill_circle(500.0, 5.0, 2.5, Color::WHITE);
        surface.fill_circle(5.0, f64::INFINITY, 2.5, Color::WHITE);
        assert!(surface.total_alpha().abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_sized_surface() {
        let mut surface = Surface::new(0, 0);
        surface.fill_rect(0.0, 0.0, 1.2, 1.2, Color::WHITE);
        surface.fill_circle(0.0, 0.0, 2.5, Color::WHITE);
        let frame = surface.present(&SurfaceEffect::LIQUID);
        assert!(frame.pixels.is_empty());
    }

    #[test]
    fn test_clear_and_resize() {
        let mut surface = Surface::new(4, 4);
        surface.fill_rect(0.0, 0.0, 4.0, 4.0, Color::WHITE);
        surface.clear();
        assert!(surface.total_alpha().abs() < f64::EPSILON);

        surface.resize(6, 2);
        assert_eq!(surface.as_bytes().len(), 6 * 2 * 16);
    }

    #[test]
    fn test_present_applies_opacity() {
        let mut surface = Surface::new(1, 1);
        surface.fill_rect(0.0, 0.0, 1.0, 1.0, Color::WHITE);
        let frame = surface.present(&SurfaceEffect {
            blur_radius: 0.0,
            opacity: 0.5,
        });
        assert_eq!(frame.pixel(0, 0), Some([255, 255, 255, 128]));
        assert_eq!(frame.as_bytes().len(), 4);
    }
}
