//! Random source abstraction.
//!
//! All randomized placement (ambient glyphs, evasion teleports, particle
//! spray) goes through [`RandomSource`] so tests can substitute a fixed
//! sequence and assert bounds deterministically. The production generator is
//! a clock-seeded LCG; the decorative randomness here has no security or
//! statistical requirements.

/// Uniform random values in `[0, 1)` plus a few derived draws.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// Uniform draw over the symmetric range `[-half, half]`.
    fn symmetric(&mut self, half: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * half
    }

    /// Uniform draw over `[lo, hi)`.
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }
}

/// Linear congruential generator (not crypto secure).
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self {
            // Avoid the all-zero fixed point.
            state: seed ^ 0x9E37_79B9_7F4A_7C15,
        }
    }

    /// Seed from the page clock; falls back to a constant when no window
    /// exists (native tests never call this).
    pub fn from_clock() -> Self {
        let now = web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0);
        Self::new(now.to_bits())
    }
}

impl RandomSource for Lcg {
    fn next_f64(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        // Top 53 bits map cleanly onto the f64 mantissa.
        (self.state >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Replays a fixed sequence of values, cycling when exhausted. Test helper.
pub struct StepSource {
    values: Vec<f64>,
    idx: usize,
}

impl StepSource {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, idx: 0 }
    }
}

impl RandomSource for StepSource {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.5;
        }
        let v = self.values[self.idx % self.values.len()];
        self.idx += 1;
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lcg_stays_in_unit_interval() {
        let mut rng = Lcg::new(42);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v), "value {v} out of [0,1)");
        }
    }

    #[test]
    fn symmetric_draw_respects_bounds() {
        let mut rng = Lcg::new(7);
        for _ in 0..1000 {
            let v = rng.symmetric(125.0);
            assert!(v.abs() <= 125.0, "symmetric draw {v} outside +/-125");
        }
    }

    #[test]
    fn step_source_replays_sequence() {
        let mut src = StepSource::new(vec![0.0, 0.25, 0.5]);
        assert_eq!(src.next_f64(), 0.0);
        assert_eq!(src.next_f64(), 0.25);
        assert_eq!(src.next_f64(), 0.5);
        assert_eq!(src.next_f64(), 0.0);
    }
}
