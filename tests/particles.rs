// Native tests for the particle field (no canvas involved).

use arcade_gallery::particles::{Bounds, FALLBACK_COLOR, Particle, ParticleField, ParticleOptions, Rgb, Surface};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

#[derive(Default)]
struct CountingSurface {
    clears: usize,
    circles: usize,
    lines: Vec<f64>,
}

impl Surface for CountingSurface {
    fn clear(&mut self, _bounds: Bounds) {
        self.clears += 1;
    }
    fn fill_circle(&mut self, _x: f64, _y: f64, _radius: f64, _color: Rgb, _opacity: f64) {
        self.circles += 1;
    }
    fn stroke_line(&mut self, _from: (f64, f64), _to: (f64, f64), _color: Rgb, opacity: f64) {
        self.lines.push(opacity);
    }
}

fn field(width: f64, height: f64, options: ParticleOptions) -> ParticleField {
    let mut rng = SmallRng::seed_from_u64(42);
    ParticleField::new(Bounds::new(width, height), options, FALLBACK_COLOR, &mut rng)
}

#[test]
fn section_preset_seeds_forty_particles() {
    let f = field(800.0, 300.0, ParticleOptions::section_preset());
    assert_eq!(f.particles().len(), 40);
}

#[test]
fn connection_lines_fade_with_distance() {
    let opts = ParticleOptions {
        show_connections: true,
        connection_distance: 100.0,
        ..ParticleOptions::default()
    };
    let mut f = field(500.0, 500.0, opts);
    let still = |x: f64| Particle { x, y: 10.0, radius: 1.0, vx: 0.0, vy: 0.0, opacity: 0.2 };
    f.set_particles(vec![still(0.0), still(25.0), still(90.0), still(300.0)]);
    let mut surface = CountingSurface::default();
    f.render(&mut surface);
    assert_eq!(surface.clears, 1);
    assert_eq!(surface.circles, 4);
    // pairs within 100: (0,25) d=25, (0,90) d=90, (25,90) d=65
    assert_eq!(surface.lines.len(), 3);
    let mut lines = surface.lines.clone();
    lines.sort_by(|a, b| b.partial_cmp(a).unwrap());
    assert!((lines[0] - 0.15).abs() < 1e-9);
    assert!((lines[1] - 0.07).abs() < 1e-9);
    assert!((lines[2] - 0.02).abs() < 1e-9);
}

proptest! {
    #[test]
    fn tick_keeps_particles_inside(
        width in 1.0f64..2000.0,
        height in 1.0f64..2000.0,
        raw in prop::collection::vec((-5000.0f64..5000.0, -5000.0f64..5000.0, -50.0f64..50.0, -50.0f64..50.0), 1..20),
        ticks in 1usize..10,
    ) {
        let mut f = field(width, height, ParticleOptions::default());
        f.set_particles(raw.into_iter().map(|(x, y, vx, vy)| Particle { x, y, radius: 1.0, vx, vy, opacity: 0.2 }).collect());
        for _ in 0..ticks {
            f.tick();
            for p in f.particles() {
                prop_assert!(p.x >= 0.0 && p.x < width, "x {} outside [0, {})", p.x, width);
                prop_assert!(p.y >= 0.0 && p.y < height, "y {} outside [0, {})", p.y, height);
            }
        }
    }

    #[test]
    fn seeding_respects_option_ranges(count in 0usize..60, speed in 0.0f64..4.0, seed in any::<u64>()) {
        let opts = ParticleOptions {
            particle_count: count,
            particle_speed: arcade_gallery::particles::Range::new(0.0, speed),
            ..ParticleOptions::default()
        };
        let mut rng = SmallRng::seed_from_u64(seed);
        let f = ParticleField::new(Bounds::new(320.0, 240.0), opts, FALLBACK_COLOR, &mut rng);
        prop_assert_eq!(f.particles().len(), count);
        for p in f.particles() {
            prop_assert!(p.vx.abs() <= speed / 2.0 && p.vy.abs() <= speed / 2.0);
            prop_assert!((1.0..=3.0).contains(&p.radius));
            prop_assert!((0.1..=0.3).contains(&p.opacity));
            prop_assert!(p.x < 320.0 && p.y < 240.0);
        }
    }
}
