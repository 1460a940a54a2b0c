//! Seed sampling
//!
//! Walks an RGBA pixel buffer on a fixed grid and keeps every grid point
//! whose alpha is above the threshold.

use thiserror::Error;

/// Grid spacing between sampled pixels
pub const SPACING: usize = 4;

/// Samples with alpha strictly above this seed a particle
pub const ALPHA_THRESHOLD: u8 = 128;

/// Colours particles are drawn with
pub const PALETTE: [&str; 5] = ["#B6DDDC", "#8CC8C6", "#5BA7A5", "#3A8E8C", "#2D7170"];

/// Errors raised while sampling a pixel buffer
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParticleError {
    #[error("Pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    BufferSize {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Sampling spacing must be at least 1")]
    ZeroSpacing,
}

/// Origin of one particle, in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seed {
    pub x: f64,
    pub y: f64,
}

/// Collect seeds from `rgba`, row by row.
///
/// The result depends only on the buffer, its dimensions and `spacing`.
pub fn sample_seeds(
    rgba: &[u8],
    width: usize,
    height: usize,
    spacing: usize,
) -> Result<Vec<Seed>, ParticleError> {
    if spacing == 0 {
        return Err(ParticleError::ZeroSpacing);
    }

    let expected = width.checked_mul(height).and_then(|n| n.checked_mul(4));
    if expected != Some(rgba.len()) {
        return Err(ParticleError::BufferSize {
            width,
            height,
            expected: expected.unwrap_or(usize::MAX),
            actual: rgba.len(),
        });
    }

    let mut seeds = Vec::new();
    for y in (0..height).step_by(spacing) {
        for x in (0..width).step_by(spacing) {
            let alpha = rgba[(y * width + x) * 4 + 3];
            if alpha > ALPHA_THRESHOLD {
                seeds.push(Seed {
                    x: x as f64,
                    y: y as f64,
                });
            }
        }
    }

    Ok(seeds)
}
