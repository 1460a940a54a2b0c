//! Particle physics
//!
//! A [`ParticleSystem`] owns one particle per seed. Each call to
//! [`ParticleSystem::update`] is one animation frame; wall-clock time is fed
//! in separately through [`ParticleSystem::advance`], which drives the
//! explode / return / idle cycle a click starts.

use rand::Rng;
use std::f64::consts::TAU;
use std::time::Duration;

use super::sampler::{sample_seeds, ParticleError, Seed, PALETTE, SPACING};

const PARTICLE_SIZE: f64 = 3.0;
const IDLE_DECAY: f64 = 0.01;
const EXPLOSION_DECAY: f64 = 0.02;

const GRAVITY: f64 = 0.05;
const DAMPING: f64 = 0.98;
const BOUNCE: f64 = -0.5;

/// Pointer influence radius, in pixels
const POINTER_RADIUS: f64 = 50.0;

const EXPLOSION_MIN_SPEED: f64 = 2.0;
const EXPLOSION_SPEED_RANGE: f64 = 5.0;

/// Fraction of the remaining distance covered per frame on the way home
const RETURN_RATE: f64 = 0.05;
/// Particles closer than this to their origin snap back
const SNAP_DISTANCE: f64 = 1.0;

const EXPLODE_FOR: Duration = Duration::from_secs(2);
const RETURN_FOR: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub origin_x: f64,
    pub origin_y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
    pub color: &'static str,
    /// Opacity in [0, 1]
    pub life: f64,
    pub decay: f64,
}

/// Where the system is in the click animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Flying apart; `elapsed` counts time since the click
    Exploding { elapsed: Duration },
    /// Heading back to the origins; `elapsed` counts time since the turn
    Returning { elapsed: Duration },
}

pub struct ParticleSystem<R> {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    phase: Phase,
    rng: R,
}

impl<R: Rng> ParticleSystem<R> {
    /// Seed a system from an RGBA rendering of the text
    pub fn from_rgba(rgba: &[u8], width: usize, height: usize, rng: R) -> Result<Self, ParticleError> {
        let mut system = Self {
            particles: Vec::new(),
            width: width as f64,
            height: height as f64,
            phase: Phase::Idle,
            rng,
        };
        system.reseed(rgba, width, height)?;
        Ok(system)
    }

    /// Replace every particle with fresh ones sampled from `rgba`.
    ///
    /// Used when the canvas is resized or the text changes. On error the
    /// current particles are kept.
    pub fn reseed(&mut self, rgba: &[u8], width: usize, height: usize) -> Result<(), ParticleError> {
        let seeds = sample_seeds(rgba, width, height, SPACING)?;

        self.width = width as f64;
        self.height = height as f64;
        self.particles = seeds.into_iter().map(|seed| self.spawn(seed)).collect();

        tracing::debug!(
            "Sampled {} particles from a {}x{} canvas",
            self.particles.len(),
            width,
            height
        );
        Ok(())
    }

    fn spawn(&mut self, seed: Seed) -> Particle {
        Particle {
            x: seed.x,
            y: seed.y,
            origin_x: seed.x,
            origin_y: seed.y,
            vx: (self.rng.random::<f64>() - 0.5) * 2.0,
            vy: (self.rng.random::<f64>() - 0.5) * 2.0,
            size: PARTICLE_SIZE,
            color: PALETTE[self.rng.random_range(0..PALETTE.len())],
            life: 1.0,
            decay: IDLE_DECAY,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Advance every particle by one frame
    pub fn update(&mut self) {
        let animating = self.is_animating();
        let (width, height) = (self.width, self.height);

        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;

            p.vy += GRAVITY;

            p.vx *= DAMPING;
            p.vy *= DAMPING;

            if p.x < 0.0 || p.x > width {
                p.vx *= BOUNCE;
                p.x = p.x.clamp(0.0, width);
            }
            if p.y < 0.0 || p.y > height {
                p.vy *= BOUNCE;
                p.y = p.y.clamp(0.0, height);
            }

            if animating {
                p.life = (p.life - p.decay).max(0.0);
            } else {
                p.life = 1.0;
            }
        }
    }

    /// Push particles near the pointer away from it
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        for p in &mut self.particles {
            let dx = x - p.x;
            let dy = y - p.y;
            let distance = dx.hypot(dy);

            if distance < POINTER_RADIUS {
                let force = (POINTER_RADIUS - distance) / POINTER_RADIUS;
                let angle = dy.atan2(dx);
                p.vx -= angle.cos() * force;
                p.vy -= angle.sin() * force;
            }
        }
    }

    /// Explode the particles outwards.
    ///
    /// Returns `false` and changes nothing while an animation is running.
    pub fn trigger(&mut self) -> bool {
        if self.is_animating() {
            return false;
        }

        for p in &mut self.particles {
            let angle = self.rng.random::<f64>() * TAU;
            let speed = self.rng.random::<f64>() * EXPLOSION_SPEED_RANGE + EXPLOSION_MIN_SPEED;
            p.vx = angle.cos() * speed;
            p.vy = angle.sin() * speed;
            p.decay = EXPLOSION_DECAY;
        }

        self.phase = Phase::Exploding {
            elapsed: Duration::ZERO,
        };
        true
    }

    /// Let `elapsed` wall-clock time pass.
    ///
    /// Two seconds after a click the particles turn for home; two seconds
    /// after that the animation ends. A single large step can cross both
    /// boundaries.
    pub fn advance(&mut self, elapsed: Duration) {
        let mut remaining = elapsed;

        loop {
            match self.phase {
                Phase::Idle => return,
                Phase::Exploding { elapsed } => {
                    let total = elapsed + remaining;
                    if total < EXPLODE_FOR {
                        self.phase = Phase::Exploding { elapsed: total };
                        return;
                    }
                    remaining = total - EXPLODE_FOR;
                    self.start_return();
                }
                Phase::Returning { elapsed } => {
                    let total = elapsed + remaining;
                    if total < RETURN_FOR {
                        self.phase = Phase::Returning { elapsed: total };
                    } else {
                        self.phase = Phase::Idle;
                    }
                    return;
                }
            }
        }
    }

    fn start_return(&mut self) {
        for p in &mut self.particles {
            let dx = p.origin_x - p.x;
            let dy = p.origin_y - p.y;

            if dx.hypot(dy) > SNAP_DISTANCE {
                p.vx = dx * RETURN_RATE;
                p.vy = dy * RETURN_RATE;
            } else {
                p.vx = 0.0;
                p.vy = 0.0;
                p.x = p.origin_x;
                p.y = p.origin_y;
            }
        }

        self.phase = Phase::Returning {
            elapsed: Duration::ZERO,
        };
    }
}
