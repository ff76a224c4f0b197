//! Numeric Cache
//!
//! Values that are expensive to compute and never change once known: the
//! Bernoulli numbers met so far, and the longest digit strings of π and e.
//!
//! The Bernoulli table is a sharded map with per-key atomic insert. The π
//! and e slots each sit behind their own lock and hold `Arc` snapshots, so a
//! reader never sees a half-written value. Computation always happens
//! outside the locks; two threads missing at the same time may both compute,
//! and the longer result wins.

use crate::constants::PiMultiples;
use dashmap::DashMap;
use entities_numeric::BigRational;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// Cache shared by the math functions. The caller owns it and passes it to
/// every function that needs it; clones of the stored values are handed out.
#[derive(Debug, Default)]
pub struct NumericCache {
    /// B(n) keyed by n / 2; odd entries are all zero and never stored
    bernoulli: DashMap<usize, BigRational>,
    /// Longest run of π digits ("31415...") generated so far
    pi_digits: RwLock<Option<Arc<str>>>,
    /// π and its multiples at the most recently requested digit count
    pi_multiples: RwLock<Option<Arc<PiMultiples>>>,
    /// Longest run of e digits ("27182...") generated so far
    e_digits: RwLock<Option<Arc<str>>>,
}

impl NumericCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached B(2 * index), if computed
    pub fn bernoulli(&self, index: usize) -> Option<BigRational> {
        let hit = self.bernoulli.get(&index).map(|entry| entry.value().clone());
        if hit.is_some() {
            debug!(n = index * 2, "bernoulli number from cache");
        }
        hit
    }

    /// Remember B(2 * index). The first value stored for an index is kept.
    pub fn insert_bernoulli(&self, index: usize, value: BigRational) {
        self.bernoulli.entry(index).or_insert(value);
    }

    /// Number of Bernoulli numbers cached
    pub fn bernoulli_count(&self) -> usize {
        self.bernoulli.len()
    }

    pub fn pi_digits(&self) -> Option<Arc<str>> {
        self.pi_digits.read().clone()
    }

    /// Keep `digits` if it is longer than what is cached.
    pub fn offer_pi_digits(&self, digits: Arc<str>) {
        offer_longer(&self.pi_digits, digits);
    }

    /// Cached multiples of π, if they were derived at `digits` fractional digits
    pub fn pi_multiples(&self, digits: u32) -> Option<Arc<PiMultiples>> {
        self.pi_multiples
            .read()
            .as_ref()
            .filter(|multiples| multiples.digits == digits)
            .cloned()
    }

    pub fn store_pi_multiples(&self, multiples: Arc<PiMultiples>) {
        *self.pi_multiples.write() = Some(multiples);
    }

    pub fn e_digits(&self) -> Option<Arc<str>> {
        self.e_digits.read().clone()
    }

    /// Keep `digits` if it is longer than what is cached.
    pub fn offer_e_digits(&self, digits: Arc<str>) {
        offer_longer(&self.e_digits, digits);
    }
}

fn offer_longer(slot: &RwLock<Option<Arc<str>>>, digits: Arc<str>) {
    let mut guard = slot.write();
    let longer = guard.as_ref().map_or(true, |current| digits.len() > current.len());
    if longer {
        debug!(length = digits.len(), "caching digit string");
        *guard = Some(digits);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bernoulli_first_insert_wins() {
        let cache = NumericCache::new();
        assert!(cache.bernoulli(1).is_none());
        cache.insert_bernoulli(1, BigRational::from_fraction(1, 6).unwrap());
        cache.insert_bernoulli(1, BigRational::from_i64(99));
        assert_eq!(cache.bernoulli(1), BigRational::from_fraction(1, 6));
        assert_eq!(cache.bernoulli_count(), 1);
    }

    #[test]
    fn test_digit_strings_only_grow() {
        let cache = NumericCache::new();
        cache.offer_pi_digits(Arc::from("31415"));
        cache.offer_pi_digits(Arc::from("314"));
        assert_eq!(cache.pi_digits().as_deref(), Some("31415"));
        cache.offer_e_digits(Arc::from("2718"));
        assert_eq!(cache.e_digits().as_deref(), Some("2718"));
    }

    #[test]
    fn test_instances_are_independent() {
        let first = NumericCache::new();
        let second = NumericCache::new();
        first.insert_bernoulli(1, BigRational::from_fraction(1, 6).unwrap());
        first.offer_pi_digits(Arc::from("314"));
        assert_eq!(second.bernoulli_count(), 0);
        assert!(second.pi_digits().is_none());
        assert_eq!(first.bernoulli_count(), 1);
    }

    #[test]
    fn test_cache_is_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NumericCache>();
    }
}
