use std::collections::VecDeque;

use egui::{Color32, Pos2, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::TrailConfig;
use crate::error::OverlayResult;
use crate::surface::Surface;

/// A single decaying point-sprite of the cursor trail
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Pos2,
    pub velocity: Vec2,
    pub size: f32,
    pub life: f32,
}

impl Particle {
    pub fn new(pos: Pos2, velocity: Vec2, size: f32) -> Self {
        Self {
            pos,
            velocity,
            size,
            life: 1.0,
        }
    }

    /// Advances one frame: move, then decay life and size.
    pub fn update(&mut self, config: &TrailConfig) {
        self.pos += self.velocity;
        self.life -= config.life_decay;
        if self.size > config.size_floor {
            self.size -= config.size_decay;
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Live particle collection behind the cursor trail.
///
/// Oldest particles sit at the front. Once `max_particles` is reached, new
/// spawns evict from the front.
pub struct ParticleTrail {
    particles: VecDeque<Particle>,
    config: TrailConfig,
    rng: StdRng,
    evicted: u64,
}

impl ParticleTrail {
    /// Fails if the config has ranges that can't be sampled.
    pub fn new(config: TrailConfig) -> OverlayResult<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Trail with a deterministic random source
    pub fn with_seed(config: TrailConfig, seed: u64) -> OverlayResult<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: TrailConfig, rng: StdRng) -> OverlayResult<Self> {
        config.validate()?;
        Ok(Self {
            particles: VecDeque::with_capacity(config.max_particles.min(1024)),
            config,
            rng,
            evicted: 0,
        })
    }

    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    /// Spawns one particle with a random velocity and size at `pos`.
    pub fn spawn(&mut self, pos: Pos2) {
        let speed = self.config.max_speed;
        let velocity = Vec2::new(
            self.rng.gen_range(-speed..speed),
            self.rng.gen_range(-speed..speed),
        );
        let size = self.rng.gen_range(self.config.min_size..self.config.max_size);
        self.push(Particle::new(pos, velocity, size));
    }

    /// Adds a particle, evicting the oldest ones if the trail is full.
    pub fn push(&mut self, particle: Particle) {
        while self.particles.len() >= self.config.max_particles.max(1) {
            self.particles.pop_front();
            self.evicted += 1;
            log::trace!("Particle cap reached, evicted oldest ({} total)", self.evicted);
        }
        self.particles.push_back(particle);
    }

    /// Runs one frame: update and draw every live particle, then prune the dead ones.
    pub fn tick(&mut self, surface: &mut dyn Surface) {
        let config = &self.config;
        for particle in self.particles.iter_mut() {
            particle.update(config);
            if particle.is_alive() {
                surface.fill_circle(particle.pos, particle.size, particle_color(config, particle.life));
            }
        }
        self.particles.retain(Particle::is_alive);
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Number of particles dropped by the cap since creation
    pub fn evicted(&self) -> u64 {
        self.evicted
    }
}

fn particle_color(config: &TrailConfig, life: f32) -> Color32 {
    let [r, g, b] = config.color;
    let alpha = (life.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(r, g, b, alpha)
}
