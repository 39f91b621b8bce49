//! Frame snapshots as binary PPM (`P6`).
//!
//! PPM has no alpha channel, so the frame is composited over a solid
//! background first.

use std::io::Write;
use std::path::Path;

use lumina_rendering::Frame;

use crate::error::{LuminaError, LuminaResult};

/// Page background the portrait is drawn over.
pub const BACKGROUND: [u8; 3] = [5, 8, 20];

/// Encodes `frame` over `background` as a binary PPM image.
#[must_use]
pub fn encode_ppm(frame: &Frame, background: [u8; 3]) -> Vec<u8> {
    let header = format!("P6\n{} {}\n255\n", frame.width, frame.height);
    let mut out = Vec::with_capacity(header.len() + frame.pixels.len() * 3);
    out.extend_from_slice(header.as_bytes());

    for &[r, g, b, a] in &frame.pixels {
        let alpha = u32::from(a);
        for (src, dst) in [r, g, b].into_iter().zip(background) {
            // Straight-alpha source-over, rounded
            let mixed = (u32::from(src) * alpha + u32::from(dst) * (255 - alpha) + 127) / 255;
            out.push(mixed as u8);
        }
    }
    out
}

/// Writes `frame` to `path` as a binary PPM over [`BACKGROUND`].
///
/// # Errors
///
/// Returns [`LuminaError::Io`] if the file cannot be created or written.
pub fn write_ppm(frame: &Frame, path: impl AsRef<Path>) -> LuminaResult<()> {
    let path = path.as_ref();
    let bytes = encode_ppm(frame, BACKGROUND);
    let mut file = std::fs::File::create(path).map_err(|e| LuminaError::io(path, e))?;
    file.write_all(&bytes).map_err(|e| LuminaError::io(path, e))?;
    tracing::info!(
        "Wrote {}x{} snapshot to {}",
        frame.width,
        frame.height,
        path.display()
    );
    Ok(())
}
