//! CodingFrequencies (component K): frequency tables and zero-order
//! entropy, used to parameterize Huffman.

use std::collections::HashMap;

const SPARSE_THRESHOLD: u64 = 16_384;

/// Map a signed integer onto a dense non-negative index:
/// `idx(x) = x >= 0 ? 2x : -2x - 1`.
fn int_index(x: i64) -> u64 {
    if x >= 0 {
        2 * x as u64
    } else {
        (2 * (-(x as i128) - 1)) as u64
    }
}

/// Immutable frequency table plus its cached zero-order entropy
/// (spec.md §4.9). Built once by a factory, never mutated.
#[derive(Debug, Clone)]
pub struct CodingFrequencies {
    dense: Vec<u64>,
    overflow: HashMap<u64, u64>,
    total: u64,
    entropy_nats: f64,
}

impl CodingFrequencies {
    fn finish(dense: Vec<u64>, overflow: HashMap<u64, u64>, total: Option<u64>) -> Self {
        let computed_total: u64 = dense.iter().sum::<u64>() + overflow.values().sum::<u64>();
        let total = total.unwrap_or(computed_total);
        let entropy_nats = if total == 0 {
            0.0
        } else {
            let mut h = 0.0f64;
            for &f in dense.iter().chain(overflow.values()) {
                if f == 0 {
                    continue;
                }
                let p = f as f64 / total as f64;
                h -= p * p.ln();
            }
            h
        };
        Self {
            dense,
            overflow,
            total,
            entropy_nats,
        }
    }

    /// An empty frequency table (no observations).
    pub fn from_empty() -> Self {
        Self::finish(Vec::new(), HashMap::new(), None)
    }

    /// Dense 256-entry table counting raw byte values.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut dense = vec![0u64; 256];
        for &b in bytes {
            dense[b as usize] += 1;
        }
        Self::finish(dense, HashMap::new(), None)
    }

    /// Interleaved indexing of signed integers: `idx(x) = x >= 0 ? 2x : -2x - 1`.
    /// Starts at 256 slots, doubles on overflow up to 16384, then spills
    /// into a sparse map for larger indices.
    pub fn from_ints(values: &[i64]) -> Self {
        let mut capacity = 256usize;
        let max_index = values.iter().map(|&x| int_index(x)).max().unwrap_or(0);
        while (max_index as usize) >= capacity && (capacity as u64) < SPARSE_THRESHOLD {
            capacity *= 2;
        }
        let mut dense = vec![0u64; capacity.min(SPARSE_THRESHOLD as usize)];
        let mut overflow = HashMap::new();
        for &x in values {
            let idx = int_index(x);
            if idx < dense.len() as u64 {
                dense[idx as usize] += 1;
            } else {
                *overflow.entry(idx).or_insert(0) += 1;
            }
        }
        Self::finish(dense, overflow, None)
    }

    /// Take a caller-provided table for a contiguous `[0, len)` alphabet.
    ///
    /// If `total` is `None`, it is recomputed by summing `freqs`.
    /// Otherwise the caller's value is trusted: an incorrect total only
    /// skews the entropy estimate, never Huffman construction.
    pub fn from_frequencies(freqs: &[u64], total: Option<u64>) -> Self {
        Self::finish(freqs.to_vec(), HashMap::new(), total)
    }

    /// Frequency observed at `index`, or `0` if never observed.
    pub fn frequency_at(&self, index: u64) -> u64 {
        if let Some(&f) = self.dense.get(index as usize) {
            return f;
        }
        self.overflow.get(&index).copied().unwrap_or(0)
    }

    /// Total number of observations.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Zero-order entropy in the given logarithm `base` (e.g. `2.0` for bits).
    pub fn entropy(&self, base: f64) -> f64 {
        self.entropy_nats / base.ln()
    }

    /// `entropy(2.0) * total()`: the estimated size of the data under an
    /// ideal entropy coder, in bits.
    pub fn bits(&self) -> f64 {
        self.entropy(2.0) * self.total as f64
    }

    /// A view discarding value identities: every non-zero frequency, in
    /// unspecified order. This is the input shape Huffman's `Unordered`
    /// frequencies flavor consumes.
    pub fn compact(&self) -> Vec<u64> {
        self.dense
            .iter()
            .chain(self.overflow.values())
            .copied()
            .filter(|&f| f != 0)
            .collect()
    }
}
