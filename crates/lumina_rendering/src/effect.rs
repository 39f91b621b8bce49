//! Surface-level presentation effects.
//!
//! These apply to the whole composited surface, not to individual particles:
//! the liquid look is a gaussian blur plus reduced opacity over everything.

/// Blur radii below this are presented unblurred.
const MIN_BLUR: f32 = 0.05;

/// Whole-surface blur and opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceEffect {
    /// Gaussian standard deviation in pixels (CSS `blur()` radius).
    pub blur_radius: f32,
    /// Multiplier on final alpha (0-1).
    pub opacity: f32,
}

impl SurfaceEffect {
    /// No effect.
    pub const NONE: Self = Self {
        blur_radius: 0.0,
        opacity: 1.0,
    };

    /// Liquid phase look: 2px blur at 80% opacity.
    pub const LIQUID: Self = Self {
        blur_radius: 2.0,
        opacity: 0.8,
    };

    /// Interpolates between two effects.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            blur_radius: self.blur_radius + (other.blur_radius - self.blur_radius) * t,
            opacity: self.opacity + (other.opacity - self.opacity) * t,
        }
    }

    /// True if presenting would blur.
    #[must_use]
    pub fn has_blur(&self) -> bool {
        self.blur_radius.is_finite() && self.blur_radius >= MIN_BLUR
    }

    /// Separable gaussian blur over premultiplied pixels.
    ///
    /// Samples outside the surface count as transparent, so edges fade out
    /// rather than smear.
    pub(crate) fn blur(&self, pixels: &[[f32; 4]], width: usize, height: usize) -> Vec<[f32; 4]> {
        let kernel = gaussian_kernel(self.blur_radius);
        let half = kernel.len() / 2;

        let mut horizontal = vec![[0.0f32; 4]; pixels.len()];
        for y in 0..height {
            let row = &pixels[y * width..(y + 1) * width];
            for x in 0..width {
                let mut acc = [0.0f32; 4];
                for (k, weight) in kernel.iter().enumerate() {
                    let Some(sx) = (x + k).checked_sub(half) else {
                        continue;
                    };
                    if let Some(src) = row.get(sx) {
                        accumulate(&mut acc, src, *weight);
                    }
                }
                horizontal[y * width + x] = acc;
            }
        }

        let mut out = vec![[0.0f32; 4]; pixels.len()];
        for y in 0..height {
            for x in 0..width {
                let mut acc = [0.0f32; 4];
                for (k, weight) in kernel.iter().enumerate() {
                    let Some(sy) = (y + k).checked_sub(half) else {
                        continue;
                    };
                    if sy < height {
                        accumulate(&mut acc, &horizontal[sy * width + x], *weight);
                    }
                }
                out[y * width + x] = acc;
            }
        }
        out
    }
}

impl Default for SurfaceEffect {
    fn default() -> Self {
        Self::NONE
    }
}

#[inline]
fn accumulate(acc: &mut [f32; 4], src: &[f32; 4], weight: f32) {
    for (a, s) in acc.iter_mut().zip(src) {
        *a += s * weight;
    }
}

/// Normalized 1D gaussian, radius `ceil(3 * sigma)`.
fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = (sigma * 3.0).ceil().max(1.0) as usize;
    let denom = 2.0 * sigma * sigma;
    let mut kernel: Vec<f32> = (0..=2 * radius)
        .map(|i| {
            let d = i as f32 - radius as f32;
            (-(d * d) / denom).exp()
        })
        .collect();
    let sum: f32 = kernel.iter().sum();
    for w in &mut kernel {
        *w /= sum;
    }
    kernel
}
