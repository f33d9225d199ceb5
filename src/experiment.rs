//! Support for measuring empirical false positive rates.
//!
//! Trial results live in an explicit [`TrialReport`] value that is returned
//! from each trial and merged by the caller; nothing here touches shared
//! state, so sweeping a parameter grid stays a plain fold over reports.

use std::hash::Hash;

use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

use crate::Filter;

/// The outcome of one false positive trial.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TrialReport {
    /// Number of probes queried
    pub queries: usize,
    /// Number of probes the filter claimed to contain
    pub false_positives: usize,
}

impl TrialReport {
    /// The observed false positive rate, 0.0 for an empty trial.
    pub fn rate(&self) -> f64 {
        if self.queries == 0 {
            return 0.0;
        }

        self.false_positives as f64 / self.queries as f64
    }

    /// Folds `other` into this report.
    pub fn merge(self, other: TrialReport) -> TrialReport {
        TrialReport {
            queries: self.queries + other.queries,
            false_positives: self.false_positives + other.false_positives,
        }
    }
}

/// Queries `filter` for every probe and counts how many it claims to
/// contain.
///
/// The probes must be absent from the filter; every positive answer is then
/// a false one.
pub fn measure_fp_rate<F, I>(filter: &F, probes: I) -> TrialReport
where
    F: Filter,
    I: IntoIterator,
    I::Item: Hash,
{
    let mut report = TrialReport::default();
    for probe in probes {
        report.queries += 1;
        if filter.contains(probe) {
            report.false_positives += 1;
        }
    }

    report
}

/// Deterministic `prefix_i` strings for reproducible trials.
///
/// Disjoint prefixes yield disjoint datasets, which is what makes the
/// "guaranteed absent" probe set of a trial easy to build.
pub fn numbered_strings(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{prefix}_{i}")).collect()
}

/// Random alphanumeric strings with a very low collision risk.
pub fn random_strings(prefix: &str, count: usize, len: usize) -> Vec<String> {
    let mut rng = thread_rng();

    (0..count)
        .map(|_| {
            let token: String = (&mut rng)
                .sample_iter(Alphanumeric)
                .take(len)
                .map(char::from)
                .collect();
            format!("{prefix}{token}")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClassicFilter;

    #[test]
    fn test_rate_of_empty_trial() {
        assert_eq!(0.0, TrialReport::default().rate());
    }

    #[test]
    fn test_rate() {
        let report = TrialReport {
            queries: 200,
            false_positives: 3,
        };
        assert_eq!(0.015, report.rate());
    }

    #[test]
    fn test_merge() {
        let a = TrialReport {
            queries: 100,
            false_positives: 1,
        };
        let b = TrialReport {
            queries: 300,
            false_positives: 5,
        };

        let merged = a.merge(b);
        assert_eq!(400, merged.queries);
        assert_eq!(6, merged.false_positives);
    }

    #[test]
    fn test_measure_fp_rate_empty_filter() {
        let filter = ClassicFilter::new(100, 0.01).expect("couldn't construct filter");
        let report = measure_fp_rate(&filter, numbered_strings("probe", 500));

        assert_eq!(500, report.queries);
        assert_eq!(0, report.false_positives);
    }

    #[test]
    fn test_numbered_strings_are_deterministic_and_disjoint() {
        let first = numbered_strings("in", 10);
        let second = numbered_strings("in", 10);
        let other = numbered_strings("out", 10);

        assert_eq!(first, second);
        assert!(first.iter().all(|s| !other.contains(s)));
    }

    #[test]
    fn test_random_strings_shape() {
        let strings = random_strings("x", 5, 16);

        assert_eq!(5, strings.len());
        assert!(strings.iter().all(|s| s.len() == 17 && s.starts_with('x')));
    }
}
