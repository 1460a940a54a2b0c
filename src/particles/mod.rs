//! Particle text effect
//!
//! The hero heading of the site dissolves into particles. This module holds
//! the engine behind it, independent of any drawing surface:
//!
//! - [`sampler`] turns an RGBA rendering of the text into particle seeds
//! - [`system`] advances the particles frame by frame and reacts to pointer
//!   movement and clicks
//!
//! Randomness is injected, so a seeded generator replays the same run.
//!
//! # Usage
//!
//! ```ignore
//! use folio::particles::ParticleSystem;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut system = ParticleSystem::from_rgba(&pixels, 800, 200, StdRng::seed_from_u64(7))?;
//! system.pointer_move(120.0, 80.0);
//! system.trigger();
//! for _ in 0..60 {
//!     system.update();
//!     system.advance(std::time::Duration::from_millis(16));
//! }
//! ```

pub mod sampler;
pub mod system;

pub use sampler::{sample_seeds, ParticleError, Seed, ALPHA_THRESHOLD, PALETTE, SPACING};
pub use system::{Particle, ParticleSystem, Phase};
