//! Optimal parameter calculation shared by both filter variants.
//!
//! For an expected item count `n` and a target false positive rate `p`, the
//! bit count minimizing the false positive rate is
//! `m = -n * ln(p) / (ln 2)^2`, and the matching hash function count is
//! `k = (m / n) * ln 2`.

use std::f64::consts::LN_2;

use crate::FilterError;
use crate::FilterError::InvalidParameter;

/// Parameters a filter is sized with: a bit count and a hash function count.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FilterParams {
    /// Number of bits in the filter (m)
    pub bit_count: usize,
    /// Number of probe positions derived per item (k)
    pub hash_fn_count: usize,
}

/// Calculates the parameters minimizing the false positive rate for
/// `capacity` expected items and the given target rate.
///
/// * `capacity`: Intended items the filter shall be able to hold
/// * `target_fp_rate`: The filter's acceptable false positive rate
///
/// The hash function count is at least 1 but otherwise uncapped; whether a
/// very large k is worth paying for is the caller's call.
pub fn optimal_params(capacity: usize, target_fp_rate: f64) -> Result<FilterParams, FilterError> {
    if capacity < 1 {
        return Err(InvalidParameter {
            expected: "1 <= capacity",
            found: capacity.to_string(),
        });
    }
    if target_fp_rate <= 0.0 || 1.0 <= target_fp_rate {
        return Err(InvalidParameter {
            expected: "0.0 < target false positive rate < 1.0",
            found: target_fp_rate.to_string(),
        });
    }

    let n = capacity as f64;
    let bit_count = (-(n * target_fp_rate.ln()) / (LN_2 * LN_2)).ceil() as usize;
    let hash_fn_count = ((bit_count as f64 / n) * LN_2).round().max(1.0) as usize;

    Ok(FilterParams {
        bit_count,
        hash_fn_count,
    })
}

/// The false positive rate a filter with `bit_count` bits and
/// `hash_fn_count` probes is expected to show once it holds `capacity`
/// items: `(1 - e^(-kn/m))^k`.
pub fn expected_fp_rate(bit_count: usize, capacity: usize, hash_fn_count: usize) -> f64 {
    let m = bit_count as f64;
    let n = capacity as f64;
    let k = hash_fn_count as f64;

    (1.0 - (-(k * n) / m).exp()).powf(k)
}
