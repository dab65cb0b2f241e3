//! Canonical Huffman coding (component L): construction from frequencies
//! or from a transmitted dictionary, accelerated decode tables.

use oxiarc_core::bitstream::{BitReader, BitWriter};
use oxiarc_core::error::{OxiArcError, Result};
use std::collections::VecDeque;
use std::io::{Read, Write};

use crate::coding::Coding;

/// Input to Huffman construction (spec.md §4.10 "Frequencies abstraction").
///
/// `Dictionary` skips tree construction entirely: it rebuilds the coding
/// directly from previously transmitted code lengths.
#[derive(Debug, Clone)]
pub enum HuffmanFrequencies {
    /// Arbitrary non-negative frequencies; sorted descending internally.
    Unordered(Vec<u64>),
    /// Frequencies the caller has already sorted descending.
    Descending(Vec<u64>),
    /// A previously transmitted dictionary: code lengths per rank plus
    /// the rank-to-symbol-ordinal correspondence.
    Dictionary {
        /// Code length of the symbol at each rank.
        lengths: Vec<u8>,
        /// `correspondence[rank]` is the original symbol ordinal.
        correspondence: Vec<u32>,
    },
}

#[derive(Clone, Copy)]
enum ArenaNode {
    Leaf { rank: u32 },
    Internal { left: u32, right: u32 },
}

/// Build per-leaf code lengths from ascending-sorted frequencies using
/// the two-queue linear-time merge (spec.md §4.10): a queue of
/// untouched leaves and a queue of merged internal nodes, always
/// popping the smaller of the two queue fronts.
fn code_lengths_from_ascending(freqs_ascending: &[u64]) -> Vec<u8> {
    let n = freqs_ascending.len();
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![1];
    }

    let mut arena_freq: Vec<u64> = freqs_ascending.to_vec();
    let mut arena_node: Vec<ArenaNode> = (0..n as u32).map(|rank| ArenaNode::Leaf { rank }).collect();

    let mut leaf_queue: VecDeque<u32> = (0..n as u32).collect();
    let mut internal_queue: VecDeque<u32> = VecDeque::new();

    let pop_min = |leaf_queue: &mut VecDeque<u32>,
                   internal_queue: &mut VecDeque<u32>,
                   arena_freq: &[u64]|
     -> u32 {
        match (leaf_queue.front(), internal_queue.front()) {
            (Some(&l), Some(&i)) => {
                if arena_freq[l as usize] <= arena_freq[i as usize] {
                    leaf_queue.pop_front().unwrap()
                } else {
                    internal_queue.pop_front().unwrap()
                }
            }
            (Some(_), None) => leaf_queue.pop_front().unwrap(),
            (None, Some(_)) => internal_queue.pop_front().unwrap(),
            (None, None) => unreachable!("merge loop stops before both queues empty"),
        }
    };

    let mut root = 0u32;
    while leaf_queue.len() + internal_queue.len() > 1 {
        let a = pop_min(&mut leaf_queue, &mut internal_queue, &arena_freq);
        let b = pop_min(&mut leaf_queue, &mut internal_queue, &arena_freq);
        let freq = arena_freq[a as usize] + arena_freq[b as usize];
        let idx = arena_node.len() as u32;
        arena_freq.push(freq);
        arena_node.push(ArenaNode::Internal { left: a, right: b });
        internal_queue.push_back(idx);
        root = idx;
    }

    let mut lengths = vec![0u8; n];
    let mut stack = vec![(root, 0u8)];
    while let Some((idx, depth)) = stack.pop() {
        match arena_node[idx as usize] {
            ArenaNode::Leaf { rank } => lengths[rank as usize] = depth.max(1),
            ArenaNode::Internal { left, right } => {
                stack.push((left, depth + 1));
                stack.push((right, depth + 1));
            }
        }
    }
    lengths
}

/// A serializable canonical Huffman dictionary: per-rank code lengths,
/// the rank-to-symbol correspondence, and the derived codewords and
/// accelerated decode tables (spec.md §4.10).
#[derive(Debug, Clone)]
pub struct Dictionary {
    lengths: Vec<u8>,
    correspondence: Vec<u32>,
    rank_of_symbol: Vec<u32>,
    codes: Vec<u32>,
    canonical_order: Vec<u32>,
    first_code: Vec<u32>,
    first_symbol: Vec<u32>,
    max_length: u8,
}

impl Dictionary {
    /// Build a dictionary from a `Frequencies` view.
    pub fn from_frequencies(frequencies: &HuffmanFrequencies) -> Result<Self> {
        match frequencies {
            HuffmanFrequencies::Dictionary {
                lengths,
                correspondence,
            } => Self::from_lengths(lengths.clone(), correspondence.clone()),
            HuffmanFrequencies::Descending(freqs) => {
                let ascending: Vec<u64> = freqs.iter().rev().copied().collect();
                let lengths_ascending = code_lengths_from_ascending(&ascending);
                let lengths: Vec<u8> = lengths_ascending.into_iter().rev().collect();
                let correspondence: Vec<u32> = (0..freqs.len() as u32).collect();
                Self::from_lengths(lengths, correspondence)
            }
            HuffmanFrequencies::Unordered(freqs) => {
                let mut indexed: Vec<(u64, u32)> = freqs
                    .iter()
                    .enumerate()
                    .map(|(i, &f)| (f, i as u32))
                    .collect();
                indexed.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
                let descending_freqs: Vec<u64> = indexed.iter().map(|&(f, _)| f).collect();
                let correspondence: Vec<u32> = indexed.iter().map(|&(_, i)| i).collect();
                let ascending: Vec<u64> = descending_freqs.iter().rev().copied().collect();
                let lengths_ascending = code_lengths_from_ascending(&ascending);
                let lengths: Vec<u8> = lengths_ascending.into_iter().rev().collect();
                Self::from_lengths(lengths, correspondence)
            }
        }
    }

    /// Rebuild a dictionary directly from transmitted `(lengths, correspondence)`,
    /// deriving canonical codewords and decode-acceleration tables without
    /// re-running tree construction.
    pub fn from_lengths(lengths: Vec<u8>, correspondence: Vec<u32>) -> Result<Self> {
        if lengths.len() != correspondence.len() {
            return Err(OxiArcError::invalid_dictionary(
                "lengths and correspondence must have the same size",
            ));
        }
        if lengths.iter().any(|&l| l == 0) {
            return Err(OxiArcError::invalid_dictionary(
                "every symbol must have a code length of at least 1",
            ));
        }
        let max_length = *lengths.iter().max().unwrap_or(&0);
        if max_length > 56 {
            return Err(OxiArcError::invalid_dictionary(
                "code lengths above 56 bits are not supported",
            ));
        }

        let n = lengths.len();
        let mut canonical_order: Vec<u32> = (0..n as u32).collect();
        canonical_order.sort_by(|&a, &b| {
            lengths[a as usize]
                .cmp(&lengths[b as usize])
                .then(a.cmp(&b))
        });

        let mut count_at_len = vec![0u32; max_length as usize + 2];
        for &l in &lengths {
            count_at_len[l as usize] += 1;
        }

        let mut first_code = vec![0u32; max_length as usize + 2];
        let mut first_symbol = vec![0u32; max_length as usize + 2];
        let mut code = 0u32;
        let mut symbol_cursor = 0u32;
        for len in 1..=max_length as usize {
            first_code[len] = code;
            first_symbol[len] = symbol_cursor;
            code = (code + count_at_len[len]) << 1;
            symbol_cursor += count_at_len[len];
        }
        first_symbol[max_length as usize + 1] = symbol_cursor;

        if n >= 2 {
            let kraft_numerator: u64 = lengths
                .iter()
                .map(|&l| 1u64 << (max_length - l))
                .sum();
            let kraft_denominator = 1u64 << max_length;
            if kraft_numerator != kraft_denominator {
                return Err(OxiArcError::invalid_dictionary(format!(
                    "Kraft sum is not 1 ({kraft_numerator}/{kraft_denominator})"
                )));
            }
        }

        let mut codes = vec![0u32; n];
        let mut running = vec![0u32; max_length as usize + 2];
        for &rank in &canonical_order {
            let len = lengths[rank as usize] as usize;
            codes[rank as usize] = first_code[len] + running[len];
            running[len] += 1;
        }

        let mut rank_of_symbol = vec![0u32; n];
        for (rank, &symbol) in correspondence.iter().enumerate() {
            if symbol as usize >= n {
                return Err(OxiArcError::invalid_dictionary(
                    "correspondence entry out of range",
                ));
            }
            rank_of_symbol[symbol as usize] = rank as u32;
        }

        Ok(Self {
            lengths,
            correspondence,
            rank_of_symbol,
            codes,
            canonical_order,
            first_code,
            first_symbol,
            max_length,
        })
    }

    /// Number of symbols in the alphabet.
    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    /// Whether the alphabet is empty.
    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// Code length of the symbol with ordinal `symbol`.
    pub fn code_length(&self, symbol: u32) -> u8 {
        self.lengths[self.rank_of_symbol[symbol as usize] as usize]
    }

    /// The code lengths indexed by rank, and the rank-to-symbol
    /// correspondence — sufficient to rebuild this dictionary via
    /// [`Self::from_lengths`].
    pub fn serialize(&self) -> (Vec<u8>, Vec<u32>) {
        (self.lengths.clone(), self.correspondence.clone())
    }

    fn encode_symbol<W: Write>(&self, writer: &mut BitWriter<W>, symbol: u32) -> Result<u32> {
        let rank = *self
            .rank_of_symbol
            .get(symbol as usize)
            .ok_or_else(|| OxiArcError::out_of_range(symbol as u64, self.len() as u64))?;
        let len = self.lengths[rank as usize];
        writer.write_long(self.codes[rank as usize] as u64, len)?;
        Ok(len as u32)
    }

    fn decode_symbol<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u32> {
        let mut code = 0u32;
        let mut len = 0u8;
        let start = reader.bit_position();
        loop {
            code = (code << 1) | reader.read_bit()? as u32;
            len += 1;
            if len > self.max_length {
                return Err(OxiArcError::invalid_prefix(start));
            }
            let count = self.first_symbol.get(len as usize + 1).copied().unwrap_or(0)
                - self.first_symbol[len as usize];
            if count > 0 && code >= self.first_code[len as usize] {
                let offset = code - self.first_code[len as usize];
                if offset < count {
                    let canonical_index = self.first_symbol[len as usize] + offset;
                    let rank = self.canonical_order[canonical_index as usize];
                    return Ok(self.correspondence[rank as usize]);
                }
            }
        }
    }
}

/// Canonical Huffman coding over a fixed alphabet (spec.md §4.10).
///
/// Implements [`Coding`] directly: encoded values are symbol ordinals
/// bound by the dictionary's alphabet size, so the universal
/// non-negativity gate does not apply on its own.
#[derive(Debug, Clone)]
pub struct HuffmanCoding {
    dictionary: Dictionary,
}

impl HuffmanCoding {
    /// Build a Huffman coding from a `Frequencies` view.
    pub fn from_frequencies(frequencies: &HuffmanFrequencies) -> Result<Self> {
        Ok(Self {
            dictionary: Dictionary::from_frequencies(frequencies)?,
        })
    }

    /// Build a Huffman coding directly from a dictionary.
    pub fn from_dictionary(dictionary: Dictionary) -> Self {
        Self { dictionary }
    }

    /// The underlying dictionary.
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }
}

impl Coding for HuffmanCoding {
    fn encode_positive_fixed<W: Write>(&self, writer: &mut BitWriter<W>, value: i32) -> Result<u32> {
        if value < 0 {
            return Err(OxiArcError::invalid_argument("symbol ordinal must be non-negative"));
        }
        self.dictionary.encode_symbol(writer, value as u32)
    }

    fn encode_positive_wide<W: Write>(&self, writer: &mut BitWriter<W>, value: i64) -> Result<u32> {
        if value < 0 || value > u32::MAX as i64 {
            return Err(OxiArcError::invalid_argument("symbol ordinal out of range"));
        }
        self.dictionary.encode_symbol(writer, value as u32)
    }

    fn encode_positive_unbounded<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        value: &num_bigint::BigInt,
    ) -> Result<u64> {
        use num_traits::ToPrimitive;
        let symbol = value
            .to_u32()
            .ok_or_else(|| OxiArcError::invalid_argument("symbol ordinal out of range"))?;
        self.dictionary
            .encode_symbol(writer, symbol)
            .map(|bits| bits as u64)
    }

    fn decode_positive_fixed<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u32> {
        self.dictionary.decode_symbol(reader)
    }

    fn decode_positive_wide<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u64> {
        self.dictionary.decode_symbol(reader).map(|s| s as u64)
    }

    fn decode_positive_unbounded<R: Read>(
        &self,
        reader: &mut BitReader<R>,
    ) -> Result<num_bigint::BigUint> {
        self.dictionary
            .decode_symbol(reader)
            .map(num_bigint::BigUint::from)
    }
}
