// Simple particle record to keep track of individual position, velocity, size,
// color and the opacity it oscillates through

use rand::seq::SliceRandom;
use rand::Rng;
use vecmath::{vec2_add, Vector2};

use crate::color::Color;
use crate::config::{BackgroundConfig, Span};
use crate::surface::{Bounds, Surface};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub radius: f64,
    pub color: Color,
    pub opacity: f64,
    pub opacity_step: f64,
}

impl Particle {
    pub fn new(pos: Vector2<f64>, vel: Vector2<f64>, radius: f64, color: Color, opacity: f64, opacity_step: f64) -> Particle {
        Particle {
            pos,
            vel,
            radius,
            color,
            opacity,
            opacity_step,
        }
    }

    /// Places a new particle uniformly at random inside `bounds`, drawing
    /// every other attribute from the ranges in `config`.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: Bounds, config: &BackgroundConfig) -> Particle {
        let pos_x = rng.gen::<f64>() * bounds.width;
        let pos_y = rng.gen::<f64>() * bounds.height;
        let vel_x = symmetric(rng, config.max_speed);
        let vel_y = symmetric(rng, config.max_speed);
        let radius = within(rng, config.radius);
        let color = config.palette.choose(rng).copied().unwrap_or(Color::WHITE);
        let opacity = within(rng, config.opacity);
        let opacity_step = symmetric(rng, config.max_opacity_step);
        Particle::new([pos_x, pos_y], [vel_x, vel_y], radius, color, opacity, opacity_step)
    }
}

fn within<R: Rng + ?Sized>(rng: &mut R, span: Span) -> f64 {
    span.min + rng.gen::<f64>() * span.width()
}

fn symmetric<R: Rng + ?Sized>(rng: &mut R, magnitude: f64) -> f64 {
    rng.gen::<f64>() * magnitude * 2.0 - magnitude
}

/// Moves the particle one frame forward.
///
/// The opacity step flips once the stepped opacity reaches either edge of
/// `band`, so the value may sit one step past the edge for a frame. Velocity
/// flips when a coordinate has crossed out of `bounds`; the position itself
/// is left where it landed.
pub fn advance(mut particle: Particle, bounds: Bounds, band: Span) -> Particle {
    particle.pos = vec2_add(particle.pos, particle.vel);
    particle.opacity += particle.opacity_step;

    if particle.opacity <= band.min || particle.opacity >= band.max {
        particle.opacity_step = -particle.opacity_step;
    }

    if particle.pos[0] < 0.0 || particle.pos[0] > bounds.width {
        particle.vel[0] = -particle.vel[0];
    }
    if particle.pos[1] < 0.0 || particle.pos[1] > bounds.height {
        particle.vel[1] = -particle.vel[1];
    }
    particle
}

pub fn render<S: Surface + ?Sized>(particle: &Particle, surface: &mut S) {
    surface.fill_circle(
        particle.pos,
        particle.radius,
        particle.color.with_opacity(particle.opacity),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn still(pos: Vector2<f64>, vel: Vector2<f64>) -> Particle {
        Particle::new(pos, vel, 2.0, Color::WHITE, 0.5, 0.0)
    }

    #[test]
    fn reflects_without_clamping() {
        let p = still([-1.0, 50.0], [-0.05, 0.0]);
        let p = advance(p, Bounds::new(100.0, 100.0), Span::OPACITY);
        assert!(close(p.vel[0], 0.05));
        assert!(close(p.pos[0], -1.05));
    }

    #[test]
    fn moves_inside_bounds_unchanged() {
        let p = still([10.0, 10.0], [0.1, 0.1]);
        let p = advance(p, Bounds::new(20.0, 20.0), Span::OPACITY);
        assert!(close(p.pos[0], 10.1));
        assert!(close(p.pos[1], 10.1));
        assert_eq!(p.vel, [0.1, 0.1]);
    }

    #[test]
    fn flips_on_the_tick_x_first_exceeds_width() {
        let bounds = Bounds::new(20.0, 20.0);
        let mut p = still([10.0, 10.0], [0.1, 0.1]);
        let mut ticks = 0;
        loop {
            let before = p;
            p = advance(p, bounds, Span::OPACITY);
            ticks += 1;
            if p.pos[0] > 20.0 {
                assert!(before.pos[0] <= 20.0);
                assert!(close(p.vel[0], -0.1));
                break;
            }
            assert!(close(p.vel[0], 0.1), "flipped early on tick {}", ticks);
            assert!(ticks < 200);
        }
    }

    #[test]
    fn opacity_reverses_after_overshoot() {
        let p = Particle::new([1.0, 1.0], [0.0, 0.0], 1.0, Color::TEAL, 0.695, 0.01);
        let p = advance(p, Bounds::new(10.0, 10.0), Span::OPACITY);
        assert!(close(p.opacity, 0.705));
        assert!(close(p.opacity_step, -0.01));
        let p = advance(p, Bounds::new(10.0, 10.0), Span::OPACITY);
        assert!(close(p.opacity, 0.695));
        assert!(close(p.opacity_step, -0.01));
    }

    #[test]
    fn opacity_reverses_at_lower_edge() {
        let p = Particle::new([1.0, 1.0], [0.0, 0.0], 1.0, Color::TEAL, 0.205, -0.01);
        let p = advance(p, Bounds::new(10.0, 10.0), Span::OPACITY);
        assert!(p.opacity < 0.2);
        assert!(close(p.opacity_step, 0.01));
    }

    #[test]
    fn spawn_respects_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = BackgroundConfig::default();
        let bounds = Bounds::new(640.0, 480.0);
        for _ in 0..500 {
            let p = Particle::spawn(&mut rng, bounds, &config);
            assert!(p.pos[0] >= 0.0 && p.pos[0] < 640.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] < 480.0);
            assert!(p.vel.iter().all(|v| *v >= -0.1 && *v < 0.1));
            assert!(p.radius >= 1.0 && p.radius < 3.0);
            assert!(p.opacity >= 0.2 && p.opacity < 0.7);
            assert!(p.opacity_step >= -0.01 && p.opacity_step < 0.01);
            assert!(config.palette.contains(&p.color));
        }
    }

    #[test]
    fn spawn_is_reproducible_with_seed() {
        let config = BackgroundConfig::default();
        let bounds = Bounds::new(100.0, 100.0);
        let a = Particle::spawn(&mut StdRng::seed_from_u64(9), bounds, &config);
        let b = Particle::spawn(&mut StdRng::seed_from_u64(9), bounds, &config);
        assert_eq!(a, b);
    }

    #[test]
    fn render_paints_translucent_circle() {
        let mut surface = crate::surface::PixelSurface::new(8, 8);
        let p = Particle::new([4.0, 4.0], [0.0, 0.0], 2.0, Color::TEAL, 0.4, 0.0);
        render(&p, &mut surface);
        let px = surface.pixel(4, 4).unwrap();
        assert!(px[3] > 0 && px[3] < 255);
    }
}
