//! Decorative particle backdrop.
//!
//! `ParticleField` is the pure simulation: seeding, toroidal motion and the
//! connection-line pass. It draws through the `Surface` trait so the same code
//! renders onto a browser canvas (`animator`) or a recorder in tests.

use rand::Rng;

pub mod animator;
pub mod color;
pub mod options;

pub use animator::{FrameLoop, ParticleAnimator, destroy_all, init_section_particles};
pub use color::{FALLBACK_COLOR, Rgb};
pub use options::{ParticleOptions, Range};

/// Peak opacity of a connection line (at distance 0).
pub const CONNECTION_MAX_OPACITY: f64 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub vx: f64,
    pub vy: f64,
    pub opacity: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        // Negative / NaN sizes from a collapsed container behave as empty.
        let clean = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self { width: clean(width), height: clean(height) }
    }
}

/// Drawing target for one frame.
pub trait Surface {
    fn clear(&mut self, bounds: Bounds);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgb, opacity: f64);
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgb, opacity: f64);
}

/// Pair of particles close enough to be joined, with the line's opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub opacity: f64,
}

fn sample(rng: &mut impl Rng, range: (f64, f64)) -> f64 {
    let (lo, hi) = range;
    if hi > lo { rng.gen_range(lo..=hi) } else { lo }
}

/// Wrap `v` into `[0, extent)`. An empty extent pins to 0.
fn wrap(v: f64, extent: f64) -> f64 {
    if extent <= 0.0 || !v.is_finite() {
        return 0.0;
    }
    let w = v.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs.
    if w >= extent { 0.0 } else { w }
}

pub struct ParticleField {
    bounds: Bounds,
    options: ParticleOptions,
    color: Rgb,
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Seed `options.particle_count` particles inside `bounds`.
    pub fn new(bounds: Bounds, options: ParticleOptions, color: Rgb, rng: &mut impl Rng) -> Self {
        let mut field = Self { bounds, options, color, particles: Vec::new() };
        field.reseed(bounds, rng);
        field
    }

    /// Replace every particle with a fresh random one for the new bounds.
    pub fn reseed(&mut self, bounds: Bounds, rng: &mut impl Rng) {
        self.bounds = bounds;
        let half_speed = self.options.particle_speed.max.abs() / 2.0;
        let size = self.options.particle_size.ordered();
        let opacity = self.options.particle_opacity.ordered();
        self.particles = (0..self.options.particle_count)
            .map(|_| Particle {
                x: wrap(sample(rng, (0.0, bounds.width)), bounds.width),
                y: wrap(sample(rng, (0.0, bounds.height)), bounds.height),
                radius: sample(rng, size),
                vx: sample(rng, (-half_speed, half_speed)),
                vy: sample(rng, (-half_speed, half_speed)),
                opacity: sample(rng, opacity),
            })
            .collect();
    }

    /// Advance one frame with toroidal wraparound.
    pub fn tick(&mut self) {
        let Bounds { width, height } = self.bounds;
        for p in &mut self.particles {
            p.x = wrap(p.x + p.vx, width);
            p.y = wrap(p.y + p.vy, height);
        }
    }

    /// Every pair closer than `connection_distance`, opacity fading linearly to
    /// zero at that distance.
    pub fn connections(&self) -> Vec<Connection> {
        let max_d = self.options.connection_distance;
        let mut out = Vec::new();
        if max_d <= 0.0 {
            return out;
        }
        for (i, a) in self.particles.iter().enumerate() {
            for (j, b) in self.particles.iter().enumerate().skip(i + 1) {
                let d = (a.x - b.x).hypot(a.y - b.y);
                if d < max_d {
                    out.push(Connection {
                        a: i,
                        b: j,
                        opacity: (1.0 - d / max_d) * CONNECTION_MAX_OPACITY,
                    });
                }
            }
        }
        out
    }

    pub fn render(&self, surface: &mut impl Surface) {
        surface.clear(self.bounds);
        for p in &self.particles {
            surface.fill_circle(p.x, p.y, p.radius, self.color, p.opacity);
        }
        if self.options.show_connections {
            for c in self.connections() {
                let (a, b) = (&self.particles[c.a], &self.particles[c.b]);
                surface.stroke_line((a.x, a.y), (b.x, b.y), self.color, c.opacity);
            }
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Replace the particle set verbatim (positions are wrapped into bounds).
    pub fn set_particles(&mut self, particles: Vec<Particle>) {
        let Bounds { width, height } = self.bounds;
        self.particles = particles
            .into_iter()
            .map(|p| Particle { x: wrap(p.x, width), y: wrap(p.y, height), ..p })
            .collect();
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn options(&self) -> &ParticleOptions {
        &self.options
    }
}
