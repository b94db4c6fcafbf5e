// Two-lane xorshift generator seeded from a `SeedPair`.
//
// This is NOT cryptographically secure.
// It exists so that a maze (or a pellet position) derived from an identifier
// is bit-for-bit identical across implementations of the same procedure.

use crate::seed::SeedPair;

/// Scale for mapping the low 24 bits of a draw into `[0, 1)`.
const DRAW_SCALE: f64 = 16_777_216.0;
const DRAW_MASK: u32 = 0x00FF_FFFF;

#[derive(Debug, Clone)]
pub struct SeededRandom {
    // Lanes are kept signed: the right shifts below must sign-extend.
    s1: i32,
    s2: i32,
}

impl SeededRandom {
    pub fn new(seeds: SeedPair) -> Self {
        Self {
            s1: seeds.h1 as i32,
            s2: seeds.h2 as i32,
        }
    }

    /// Seed a generator directly from an identifier string.
    pub fn from_identifier(identifier: &str) -> Self {
        Self::new(crate::seed::derive_seeds(identifier))
    }

    /// Advance both lanes and return the 24-bit combined value.
    #[inline]
    pub fn next_u24(&mut self) -> u32 {
        let mut s1 = self.s1;
        s1 ^= s1 << 13;
        s1 ^= s1 >> 17;
        s1 ^= s1 << 5;
        self.s1 = s1;

        let mut s2 = self.s2;
        s2 ^= s2 << 15;
        s2 ^= s2 >> 13;
        s2 ^= s2 << 7;
        self.s2 = s2;

        (s1 as u32).wrapping_add(s2 as u32) & DRAW_MASK
    }

    /// Next draw in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u24()) / DRAW_SCALE
    }

    /// `floor(draw * upper_exclusive)`; returns 0 for an empty range.
    #[inline]
    pub fn pick_index(&mut self, upper_exclusive: usize) -> usize {
        if upper_exclusive == 0 {
            return 0;
        }
        // A 24-bit fraction times a small count is exact in f64, and the
        // product stays strictly below `upper_exclusive`.
        (self.next_f64() * upper_exclusive as f64) as usize
    }
}

impl Iterator for SeededRandom {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::derive_seeds;

    #[test]
    fn golden_draws_for_abc() {
        let mut rng = SeededRandom::new(derive_seeds("abc"));
        let draws: [u32; 5] = core::array::from_fn(|_| rng.next_u24());
        assert_eq!(draws, [827_917, 1_444_233, 1_149_695, 2_744_752, 7_540_481]);
    }

    #[test]
    fn small_seeds_golden() {
        let mut rng = SeededRandom::new(SeedPair::new(1, 2));
        assert_eq!(rng.next_u24(), 8_725_803);
        assert_eq!(rng.next_u24(), 16_385_579);
        assert_eq!(rng.next_u24(), 1_168_440);
    }

    #[test]
    fn draws_stay_in_unit_interval() {
        let rng = SeededRandom::from_identifier("range-check");
        for x in rng.take(10_000) {
            assert!((0.0..1.0).contains(&x), "draw out of range: {x}");
        }
    }

    #[test]
    fn independent_generators_do_not_share_state() {
        let seeds = derive_seeds("shared?");
        let mut a = SeededRandom::new(seeds);
        let mut b = SeededRandom::new(seeds);
        // Drain a few from `a` first; `b` must still start at the beginning.
        let first_a = a.next_u24();
        let _ = a.next_u24();
        let _ = a.next_u24();
        assert_eq!(b.next_u24(), first_a);
    }

    #[test]
    fn zero_seeds_are_total() {
        let mut rng = SeededRandom::new(SeedPair::new(0, 0));
        assert_eq!(rng.next_f64(), 0.0);
        assert_eq!(rng.pick_index(4), 0);
        assert_eq!(rng.pick_index(0), 0);
    }
}
