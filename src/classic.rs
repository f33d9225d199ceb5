use std::hash::{Hash, Hasher};

use twox_hash::XxHash64;

use crate::bits::BitArray;
use crate::params::optimal_params;
use crate::Filter;
use crate::FilterError::{self, InvalidParameter};

/// A classic Bloom filter: every probe position comes from its own
/// independently seeded hash function.
///
/// The k hash functions are `XxHash64` parameterized with the sequential
/// seeds `0..k`, so two filters constructed with the same parameters derive
/// identical positions for identical items. Never yields false negatives,
/// yields false positives roughly at the rate the filter was sized for.
///
/// Items can only be added, not deleted, and a filter is never resized;
/// different parameters mean constructing a new filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassicFilter {
    bits: BitArray,
    hash_fn_count: usize,
    elements_inserted: usize,
}

impl Filter for ClassicFilter {
    /// Inserts the `item` into the filter.
    fn insert(&mut self, item: impl Hash) {
        for seed in 0..self.hash_fn_count as u64 {
            let idx = self.bit_index(&item, seed);
            self.bits.set(idx);
        }

        self.elements_inserted += 1;
    }

    /// *Indicates* whether `item` is in the filter.
    ///
    /// Returns `false` as soon as any probed bit is clear.
    fn contains(&self, item: impl Hash) -> bool {
        (0..self.hash_fn_count as u64).all(|seed| self.bits.test(self.bit_index(&item, seed)))
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

impl ClassicFilter {
    /// Constructs a new `ClassicFilter` sized for `capacity` items at the
    /// given target false positive rate.
    ///
    /// * `capacity`: Intended items the filter shall be able to hold
    /// * `target_fp_rate`: The filter's acceptable false positive rate
    pub fn new(capacity: usize, target_fp_rate: f64) -> Result<ClassicFilter, FilterError> {
        let params = optimal_params(capacity, target_fp_rate)?;
        Self::with_params(params.bit_count, params.hash_fn_count)
    }

    /// Constructs a new `ClassicFilter` directly from a bit count and a hash
    /// function count, bypassing the parameter calculation.
    pub fn with_params(
        bit_count: usize,
        hash_fn_count: usize,
    ) -> Result<ClassicFilter, FilterError> {
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

        Ok(ClassicFilter {
            bits: BitArray::new(bit_count),
            hash_fn_count,
            elements_inserted: 0,
        })
    }

    /// The probe position for `item` under the hash function with `seed`.
    fn bit_index<T>(&self, item: &T, seed: u64) -> usize
    where
        T: Hash,
    {
        let mut hasher = XxHash64::with_seed(seed);
        item.hash(&mut hasher);

        (hasher.finish() % self.bits.len() as u64) as usize
    }
}
