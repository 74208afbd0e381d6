use crate::geom::{self, Vector};

/// Source of tie-break directions for pairs whose centers coincide exactly.
///
/// The radial separation method cannot derive a direction from a zero-length offset, so it asks
/// the jitter source instead. Implementations must return a unit vector.
pub trait Jitter {
    fn direction(&mut self) -> Vector;
}

/// Always answers the positive x direction, so the lower-index item of a coincident pair moves
/// toward negative x.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl Jitter for NoJitter {
    fn direction(&mut self) -> Vector {
        geom::vector(1.0, 0.0)
    }
}

/// Seeded pseudo-random directions. The same seed yields the same sequence.
#[derive(Debug, Clone)]
pub struct SeededJitter {
    rng: XorShift64Star,
}

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: XorShift64Star::new(seed),
        }
    }
}

impl Jitter for SeededJitter {
    fn direction(&mut self) -> Vector {
        let angle = self.rng.next_f64_unit() * std::f64::consts::TAU;
        geom::vector(angle.cos(), angle.sin())
    }
}

#[derive(Debug, Clone)]
pub struct XorShift64Star {
    state: u64,
}

impl XorShift64Star {
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D_u64)
    }

    /// Uniform in `[0, 1)` with 53 bits of precision.
    pub fn next_f64_unit(&mut self) -> f64 {
        let u = self.next_u64() >> 11;
        (u as f64) / ((1u64 << 53) as f64)
    }

    /// Uniform in `[lo, hi)`.
    pub fn next_f64_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64_unit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xorshift64star_sequence_is_stable_for_seed_one() {
        let mut rng = XorShift64Star::new(1);
        let expected = [
            0.28083505005035947,
            0.6711372530266764,
            0.7258461452833668,
            0.303529299965799,
            0.056176763098259475,
        ];
        for (i, &e) in expected.iter().enumerate() {
            let v = rng.next_f64_unit();
            assert!(
                (v - e).abs() < 1e-15,
                "unexpected rng value at {i}: got {v}, expected {e}"
            );
        }
    }

    #[test]
    fn zero_seed_is_not_a_fixed_point() {
        let mut rng = XorShift64Star::new(0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn seeded_jitter_returns_unit_vectors_reproducibly() {
        let mut a = SeededJitter::new(42);
        let mut b = SeededJitter::new(42);
        for _ in 0..16 {
            let da = a.direction();
            assert!((da.length() - 1.0).abs() < 1e-12);
            assert_eq!(da, b.direction());
        }
    }
}
