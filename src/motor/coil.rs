// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Half-step coil sequence for a 4-phase unipolar stepper.
//!
//! Bit `n` of a pattern drives winding `n`. Walking the table forward turns the shaft one way,
//! walking it backward turns it the other way.

/// Four-bit coil energization pattern.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoilPattern(u8);

impl CoilPattern {
    /// All windings de-energized.
    pub const OFF: Self = Self(0x0);

    /// Build a pattern from the low four bits of `bits`.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0xF)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// True when winding `coil` (0..=3) is energized.
    #[inline]
    pub const fn is_energized(self, coil: u8) -> bool {
        coil < 4 && (self.0 >> coil) & 1 == 1
    }
}

/// Half-step sequence, one entry per step.
pub const COIL_SEQUENCE: [CoilPattern; 8] = [
    CoilPattern(0xC),
    CoilPattern(0x4),
    CoilPattern(0x6),
    CoilPattern(0x2),
    CoilPattern(0x3),
    CoilPattern(0x1),
    CoilPattern(0x9),
    CoilPattern(0x8),
];

/// Look up the pattern for a step index. Negative indices wrap like positive ones.
#[inline]
pub fn pattern(step_index: i32) -> CoilPattern {
    COIL_SEQUENCE[step_index.rem_euclid(COIL_SEQUENCE.len() as i32) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_cyclic() {
        for i in -40..40 {
            assert_eq!(pattern(i), pattern(i + 8));
            assert_eq!(pattern(i), pattern(i - 8));
        }
    }

    #[test]
    fn negative_indices_wrap() {
        assert_eq!(pattern(-1), CoilPattern::from_bits(0x8));
        assert_eq!(pattern(-8), CoilPattern::from_bits(0xC));
        assert_eq!(pattern(i32::MIN), COIL_SEQUENCE[0]);
        assert_eq!(pattern(i32::MAX), COIL_SEQUENCE[7]);
    }

    #[test]
    fn forward_and_reverse_walk_table_in_opposite_order() {
        let forward: [CoilPattern; 8] = core::array::from_fn(|i| pattern(i as i32));
        assert_eq!(forward, COIL_SEQUENCE);

        let reverse: [CoilPattern; 8] = core::array::from_fn(|i| pattern(-(i as i32)));
        for (i, p) in reverse.iter().enumerate() {
            assert_eq!(*p, COIL_SEQUENCE[(8 - i) % 8]);
        }
    }

    #[test]
    fn adjacent_patterns_differ_by_one_winding() {
        for i in 0..8 {
            let changed = (pattern(i).bits() ^ pattern(i + 1).bits()).count_ones();
            assert_eq!(changed, 1, "step {i}");
        }
    }

    #[test]
    fn every_pattern_energizes_at_least_one_winding() {
        for p in COIL_SEQUENCE {
            assert_ne!(p, CoilPattern::OFF);
            assert!((0..4).any(|c| p.is_energized(c)));
        }
        assert!(!CoilPattern::OFF.is_energized(0));
    }

    #[test]
    fn from_bits_masks_high_nibble() {
        assert_eq!(CoilPattern::from_bits(0xFC).bits(), 0xC);
    }
}
