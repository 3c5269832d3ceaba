//! Confetti particle system.
//!
//! Two spawners: the tier-4 teaser burst and the finale side cannons that
//! keep firing for a fixed window. Integration is plain velocity plus
//! gravity with a linear fade; the view draws the live set onto the overlay
//! canvas every frame.

use super::rng::RandomSource;

/// Particles spawned by the tier-4 teaser.
pub const TEASER_COUNT: usize = 15;
/// How long the finale cannons keep firing.
pub const CANNON_WINDOW_MS: f64 = 4000.0;
/// Particles per cannon per frame while the window is open.
pub const CANNON_RATE: usize = 4;

const TEASER_SPREAD_DEG: f64 = 40.0;
const CANNON_SPREAD_DEG: f64 = 55.0;
const GRAVITY_PX_S2: f64 = 900.0;
const PARTICLE_TTL_MS: f64 = 1800.0;

/// Two-color teaser palette.
pub const TEASER_COLORS: [&str; 2] = ["#C8A2FF", "#7B2CBF"];
/// Five-color celebration palette.
pub const CANNON_COLORS: [&str; 5] = ["#C8A2FF", "#7B2CBF", "#FF6B9D", "#FFD700", "#F2E6FF"];

#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    vx: f64,
    vy: f64,
    pub size: f64,
    pub color: &'static str,
    born_ms: f64,
}

impl Particle {
    /// 1.0 at spawn, 0.0 at expiry.
    pub fn alpha(&self, now: f64) -> f64 {
        (1.0 - (now - self.born_ms) / PARTICLE_TTL_MS).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
    /// Finale cannons fire until this instant.
    cannons_until: Option<f64>,
}

impl ParticleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty() && self.cannons_until.is_none()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.cannons_until = None;
    }

    /// Tier-4 teaser: a small upward burst from just below screen center.
    pub fn spawn_teaser(
        &mut self,
        rng: &mut impl RandomSource,
        now: f64,
        view_w: f64,
        view_h: f64,
    ) {
        let origin = (view_w * 0.5, view_h * 0.6);
        for _ in 0..TEASER_COUNT {
            self.spawn_one(
                rng,
                now,
                origin,
                90.0,
                TEASER_SPREAD_DEG,
                &TEASER_COLORS,
            );
        }
    }

    /// Opens the finale cannon window; [`step`](Self::step) emits while open.
    pub fn open_cannons(&mut self, now: f64) {
        self.cannons_until = Some(now + CANNON_WINDOW_MS);
    }

    /// Advances the simulation by `dt_ms`, emitting cannon particles while
    /// the window is open and pruning everything expired or off screen.
    pub fn step(
        &mut self,
        rng: &mut impl RandomSource,
        now: f64,
        dt_ms: f64,
        view_w: f64,
        view_h: f64,
    ) {
        if let Some(until) = self.cannons_until {
            if now < until {
                for _ in 0..CANNON_RATE {
                    // Left cannon fires up-right, right cannon up-left.
                    self.spawn_one(rng, now, (0.0, view_h * 0.7), 60.0, CANNON_SPREAD_DEG, &CANNON_COLORS);
                    self.spawn_one(
                        rng,
                        now,
                        (view_w, view_h * 0.7),
                        120.0,
                        CANNON_SPREAD_DEG,
                        &CANNON_COLORS,
                    );
                }
            } else {
                self.cannons_until = None;
            }
        }
        let dt = dt_ms / 1000.0;
        for p in &mut self.particles {
            p.x += p.vx * dt;
            p.y += p.vy * dt;
            p.vy += GRAVITY_PX_S2 * dt;
        }
        self.particles
            .retain(|p| now - p.born_ms < PARTICLE_TTL_MS && p.y < view_h + 40.0);
    }

    fn spawn_one(
        &mut self,
        rng: &mut impl RandomSource,
        now: f64,
        origin: (f64, f64),
        angle_deg: f64,
        spread_deg: f64,
        colors: &[&'static str],
    ) {
        let angle = (angle_deg + rng.symmetric(spread_deg / 2.0)).to_radians();
        let speed = rng.range(350.0, 750.0);
        let color_idx = (rng.next_f64() * colors.len() as f64) as usize % colors.len();
        self.particles.push(Particle {
            x: origin.0,
            y: origin.1,
            // Screen y grows downward, so launch angles point up.
            vx: angle.cos() * speed,
            vy: -angle.sin() * speed,
            size: rng.range(5.0, 11.0),
            color: colors[color_idx],
            born_ms: now,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::rng::Lcg;

    #[test]
    fn teaser_spawns_fixed_count() {
        let mut field = ParticleField::new();
        let mut rng = Lcg::new(5);
        field.spawn_teaser(&mut rng, 0.0, 800.0, 600.0);
        assert_eq!(field.live().len(), TEASER_COUNT);
        for p in field.live() {
            assert!(TEASER_COLORS.contains(&p.color));
            assert!(p.vy < 0.0, "teaser particles launch upward");
        }
    }

    #[test]
    fn cannons_emit_only_inside_window() {
        let mut field = ParticleField::new();
        let mut rng = Lcg::new(6);
        field.open_cannons(0.0);
        field.step(&mut rng, 16.0, 16.0, 800.0, 600.0);
        let during = field.live().len();
        assert_eq!(during, CANNON_RATE * 2);
        // Past the window nothing new is emitted.
        field.clear();
        field.open_cannons(0.0);
        field.step(&mut rng, CANNON_WINDOW_MS + 1.0, 16.0, 800.0, 600.0);
        assert!(field.live().is_empty());
        assert!(field.is_empty(), "window closed after expiry");
    }

    #[test]
    fn particles_expire_and_fall() {
        let mut field = ParticleField::new();
        let mut rng = Lcg::new(7);
        field.spawn_teaser(&mut rng, 0.0, 800.0, 600.0);
        field.step(&mut rng, 100.0, 100.0, 800.0, 600.0);
        assert!(!field.live().is_empty());
        let alpha = field.live()[0].alpha(100.0);
        assert!(alpha < 1.0 && alpha > 0.9);
        field.step(&mut rng, PARTICLE_TTL_MS + 200.0, 100.0, 800.0, 600.0);
        assert!(field.live().is_empty());
    }
}
