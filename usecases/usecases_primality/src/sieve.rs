//! Odd-only Sieve of Eratosthenes
//!
//! Only odd candidates from 3 up are represented: bit `i` stands for the
//! number `2i + 3`, and a set bit means composite. Primes are discovered in
//! increasing order; each time one is found its odd multiples are marked, so
//! a caller can stop as soon as it has what it needs.

/// Bitset over the odd numbers 3, 5, 7, ... up to a limit.
#[derive(Debug, Clone)]
pub struct OddSieve {
    words: Vec<u64>,
    len: usize,
}

impl OddSieve {
    /// A sieve covering every odd number from 3 to `limit` inclusive.
    pub fn new(limit: u64) -> Self {
        let len = if limit < 3 { 0 } else { ((limit - 3) / 2 + 1) as usize };
        Self {
            words: vec![0; len.div_ceil(64)],
            len,
        }
    }

    /// Number of candidates covered
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Largest odd number covered, if any
    pub fn limit(&self) -> Option<u64> {
        self.len.checked_sub(1).map(candidate)
    }

    fn is_marked(&self, bit: usize) -> bool {
        self.words[bit / 64] & (1 << (bit % 64)) != 0
    }

    fn mark(&mut self, bit: usize) {
        self.words[bit / 64] |= 1 << (bit % 64);
    }

    /// Mark the odd multiples of the prime at `bit`, starting from its square.
    fn mark_multiples(&mut self, bit: usize) {
        let prime = candidate(bit);
        let Some(square) = prime.checked_mul(prime) else {
            return;
        };
        // Odd multiples are 2p apart, which is p bits.
        let mut multiple = ((square - 3) / 2) as usize;
        while multiple < self.len {
            self.mark(multiple);
            multiple += prime as usize;
        }
    }

    /// Primes in increasing order, sieving as it goes.
    pub fn primes(&mut self) -> Primes<'_> {
        Primes { sieve: self, next: 0 }
    }
}

/// The odd number bit `bit` stands for
fn candidate(bit: usize) -> u64 {
    bit as u64 * 2 + 3
}

/// Iterator returned by [`OddSieve::primes`].
#[derive(Debug)]
pub struct Primes<'a> {
    sieve: &'a mut OddSieve,
    next: usize,
}

impl Iterator for Primes<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        while self.next < self.sieve.len {
            let bit = self.next;
            self.next += 1;
            if !self.sieve.is_marked(bit) {
                self.sieve.mark_multiples(bit);
                return Some(candidate(bit));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_primes() {
        let mut sieve = OddSieve::new(50);
        let primes: Vec<u64> = sieve.primes().collect();
        assert_eq!(primes, vec![3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47]);
    }

    #[test]
    fn test_sieve_bounds() {
        assert!(OddSieve::new(2).is_empty());
        assert_eq!(OddSieve::new(3).len(), 1);
        assert_eq!(OddSieve::new(10).limit(), Some(9));
        assert_eq!(OddSieve::new(11).limit(), Some(11));
        assert_eq!(OddSieve::new(0).limit(), None);
    }

    #[test]
    fn test_word_boundaries() {
        // 1000 candidates span several words
        let mut sieve = OddSieve::new(2001);
        let primes: Vec<u64> = sieve.primes().collect();
        assert_eq!(primes.len(), 302); // pi(2001) = 303, minus the 2
        assert_eq!(primes.last(), Some(&1999));
    }

    #[test]
    fn test_partial_iteration_then_resume() {
        let mut sieve = OddSieve::new(100);
        let first: Vec<u64> = sieve.primes().take(3).collect();
        assert_eq!(first, vec![3, 5, 7]);
        let again: Vec<u64> = sieve.primes().collect();
        assert_eq!(again.len(), 24);
    }
}
