use crate::color::Rgb;
use crate::config::{KeyBounds, KeyRecord, ParticleParams};
use glam::Vec2;
use rand::prelude::*;

/// Hard ceiling on live particles; spawning stops rather than evicting.
pub const MAX_PARTICLES: usize = 100;

// Base motion/size before the config multipliers are applied.
const DRIFT_X: f32 = 1.0; // horizontal drift spans [-DRIFT_X/2, DRIFT_X/2] px per tick
const RISE_MIN: f32 = 1.0; // px per tick
const RISE_SPAN: f32 = 2.0;
const SIZE_MIN: f32 = 2.0; // px radius
const SIZE_SPAN: f32 = 3.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Pixels per tick, so motion is tied to the frame rate.
    pub velocity: Vec2,
    pub color: Rgb,
    pub size: f32,
    pub born_ms: f64,
    pub lifetime_ms: f64,
    pub alpha: f32,
}

impl Particle {
    /// Linear fade, 1 at birth and 0 once `age >= lifetime`.
    pub fn alpha_at(&self, now_ms: f64) -> f32 {
        if self.lifetime_ms <= 0.0 {
            return 0.0;
        }
        let age = (now_ms - self.born_ms).max(0.0);
        (1.0 - age / self.lifetime_ms).clamp(0.0, 1.0) as f32
    }

    #[inline]
    pub fn expired(&self, now_ms: f64) -> bool {
        now_ms - self.born_ms >= self.lifetime_ms
    }
}

pub struct ParticleEngine {
    particles: Vec<Particle>,
    rng: StdRng,
}

impl ParticleEngine {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::with_capacity(MAX_PARTICLES),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Emits a burst along the key's top edge. Returns how many were created.
    /// The caller resolves the key; hidden keys and disabled particles are
    /// no-ops here.
    pub fn spawn(
        &mut self,
        key: &KeyRecord,
        bounds: &KeyBounds,
        color: Rgb,
        params: &ParticleParams,
        now_ms: f64,
    ) -> usize {
        if !params.enabled || key.is_hidden() {
            return 0;
        }
        let (left, width) = key.span(true);
        let top = bounds.top + key.vertical_offset();
        if !(left.is_finite() && width.is_finite() && top.is_finite()) {
            return 0;
        }
        let burst = self.rng.gen_range(1..=params.count.max(1));
        let mut created = 0;
        for _ in 0..burst {
            if self.particles.len() >= MAX_PARTICLES {
                break;
            }
            let x = left + self.rng.gen::<f32>() * width;
            let vx = (self.rng.gen::<f32>() - 0.5) * DRIFT_X;
            let vy = -(RISE_MIN + self.rng.gen::<f32>() * RISE_SPAN) * params.speed;
            let size = (SIZE_MIN + self.rng.gen::<f32>() * SIZE_SPAN) * params.size;
            self.particles.push(Particle {
                position: Vec2::new(x, top),
                velocity: Vec2::new(vx, vy),
                color,
                size,
                born_ms: now_ms,
                lifetime_ms: params.lifetime,
                alpha: 1.0,
            });
            created += 1;
        }
        created
    }

    /// Retires expired particles, then steps the rest one tick and refreshes
    /// their fade.
    pub fn tick(&mut self, now_ms: f64) {
        self.particles.retain(|p| !p.expired(now_ms));
        for p in &mut self.particles {
            p.position += p.velocity;
            p.alpha = p.alpha_at(now_ms);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
