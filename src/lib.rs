//! # Muslin
//!
//! Two Bloom filter variants behind one interface, built to be compared.
//! Both can claim that a given item is
//!
//! * definitely not represented in a set of items, or
//! * might be represented in the set.
//!
//! [`ClassicFilter`] derives every probe position from its own independently
//! seeded hash function. [`DoubleHashingFilter`] derives all of them from two
//! base hashes combined linearly (Kirsch–Mitzenmacher double hashing),
//! trading a sliver of independence for roughly k-fold fewer hash
//! computations per operation.
//!
//! ## Muslin in Action
//!
//! ```rust
//! use muslin::{ClassicFilter, DoubleHashingFilter, Filter};
//!
//! // The number of items the filters should store while not
//! // returning too many false positives
//! let capacity = 10_000;
//! // The rate of false positives allowed once `capacity` items are stored
//! let target_fp_rate = 0.01;
//!
//! // Both variants size themselves identically from these two numbers
//! let mut classic = ClassicFilter::new(capacity, target_fp_rate)
//!     .expect("couldn't construct classic filter.");
//! let mut double = DoubleHashingFilter::new(capacity, target_fp_rate)
//!     .expect("couldn't construct double-hashing filter.");
//!
//! // Filters accept any type that is `impl Hash`
//! classic.insert(1);
//! classic.insert("a");
//! classic.insert(Vec::<bool>::new());
//! double.insert(1);
//! double.insert("a");
//!
//! // Querying never yields a false negative
//! assert!(classic.contains(1));
//! assert!(classic.contains("a"));
//! assert!(double.contains("a"));
//!
//! // Both variants expose the same introspection surface
//! assert_eq!(classic.bit_count(), double.bit_count());
//! assert_eq!(classic.hash_fn_count(), double.hash_fn_count());
//! println!("classic fill estimate: {}", classic.estimated_fp_rate());
//! println!("double fill estimate:  {}", double.estimated_fp_rate());
//! ```

use core::hash::Hash;
use thiserror::Error;

/// An error returned when constructing a filter.
#[derive(Error, Debug)]
pub enum FilterError {
    /// A constructor is called with invalid parameters.
    #[error("invalid parameters (expected {expected:?}, found: {found:?})")]
    InvalidParameter {
        /// Expected parameter
        expected: &'static str,
        /// Provided parameter
        found: String,
    },
}

/// The capability set shared by both filter variants.
///
/// `insert` and `contains` never fail; only construction can. Queries never
/// yield false negatives for items previously inserted into the same filter.
pub trait Filter {
    fn insert(&mut self, item: impl Hash);
    fn contains(&self, item: impl Hash) -> bool;
    /// Number of bits in the underlying bit array (m).
    fn bit_count(&self) -> usize;
    /// Number of probe positions derived per item (k).
    fn hash_fn_count(&self) -> usize;
    /// How many times `insert` has been called. Reporting only.
    fn elements_inserted(&self) -> usize;
    /// Number of bits currently set in the underlying bit array.
    fn set_bits(&self) -> usize;
    /// `(set_bits / bit_count)^k`, the probability that a query for a
    /// never-inserted item comes back positive. Reporting only; `contains`
    /// never consults it.
    fn estimated_fp_rate(&self) -> f64;
}

pub mod bits;
pub mod classic;
pub mod double_hashing;
pub mod experiment;
pub mod params;

pub use classic::ClassicFilter;
pub use double_hashing::DoubleHashingFilter;
