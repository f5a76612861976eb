// Fixed-size collection of particles, advanced and drawn once per frame

use rand::Rng;

use crate::config::{BackgroundConfig, Span};
use crate::particle::{self, Particle};
use crate::surface::{Bounds, Surface};

#[derive(Clone, Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    opacity_band: Span,
}

impl ParticleField {
    pub fn seed<R: Rng + ?Sized>(rng: &mut R, bounds: Bounds, config: &BackgroundConfig) -> ParticleField {
        let mut particles = Vec::with_capacity(config.particle_count);
        for _ in 0..config.particle_count {
            particles.push(Particle::spawn(rng, bounds, config));
        }
        ParticleField {
            particles,
            opacity_band: config.opacity,
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

    /// Clears `surface`, then moves each particle against the surface's
    /// current size and draws it at its new position. Later particles
    /// paint over earlier ones.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        surface.clear();
        let bounds = surface.size();
        for p in self.particles.iter_mut() {
            *p = particle::advance(*p, bounds, self.opacity_band);
            particle::render(p, surface);
        }
    }
}
