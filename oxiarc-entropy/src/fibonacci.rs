//! Fibonacci coding (component F): Zeckendorf representation terminated
//! by the unique `"11"` pair.
//!
//! Uses the shifted sequence `F1=1, F2=2, F3=3, F4=5, …` (each term is
//! the ordinary Fibonacci sequence shifted by one place). The table is
//! rebuilt on demand rather than cached across calls: generating the ~90
//! terms that fit in a `u64` costs a handful of additions, far cheaper
//! than the synchronization a shared cache would need (see DESIGN.md).

use num_bigint::BigUint;
use num_traits::{One, Zero};
use oxiarc_core::bitstream::{BitReader, BitWriter};
use oxiarc_core::error::{OxiArcError, Result};
use std::io::{Read, Write};

use crate::coding::UniversalCoding;

/// Build the `F1=1, F2=2, …` table, stopping just before the term would
/// overflow `u64`. Index `k` (1-based) is `table[k - 1]`.
fn fib_table_u64() -> Vec<u64> {
    let mut table = vec![1u64, 2u64];
    loop {
        let next = match table[table.len() - 1].checked_add(table[table.len() - 2]) {
            Some(n) => n,
            None => break,
        };
        table.push(next);
    }
    table
}

/// Find the Zeckendorf decomposition of `x` over `table` (1-based terms),
/// returning the set of 1-based indices used, in descending order.
fn zeckendorf_indices_u64(mut x: u64, table: &[u64]) -> Vec<usize> {
    let mut indices = Vec::new();
    let mut i = table.iter().rposition(|&f| f <= x).unwrap_or(0);
    loop {
        if table[i] <= x {
            x -= table[i];
            indices.push(i + 1);
            if x == 0 {
                break;
            }
        }
        if i == 0 {
            break;
        }
        i -= 1;
    }
    indices
}

/// Zeckendorf representation terminated by `"11"` (spec.md §4.4).
#[derive(Debug, Clone, Copy, Default)]
pub struct FibonacciCoding;

impl FibonacciCoding {
    /// Create a new Fibonacci coding.
    pub fn new() -> Self {
        Self
    }

    fn encode_u64<W: Write>(writer: &mut BitWriter<W>, value: u64) -> Result<u32> {
        let x = value + 1;
        let table = fib_table_u64();
        let indices = zeckendorf_indices_u64(x, &table);
        let top = *indices.iter().max().unwrap_or(&0);
        let mut bits = 0u32;
        for j in 1..=top {
            writer.write_bit(indices.contains(&j))?;
            bits += 1;
        }
        writer.write_bit(true)?;
        bits += 1;
        Ok(bits)
    }

    fn decode_u64<R: Read>(reader: &mut BitReader<R>, max_bits: u32) -> Result<u64> {
        let table = fib_table_u64();
        let mut sum: u64 = 0;
        let mut prev = false;
        let mut index = 0usize; // 0-based into `table`
        loop {
            if index >= table.len() {
                return Err(OxiArcError::value_too_large(index as u32, max_bits));
            }
            let bit = reader.read_bit()?;
            if bit && prev {
                break;
            }
            if bit {
                sum = sum
                    .checked_add(table[index])
                    .ok_or_else(|| OxiArcError::value_too_large(64, max_bits))?;
            }
            prev = bit;
            index += 1;
        }
        Ok(sum - 1)
    }
}

impl UniversalCoding for FibonacciCoding {
    fn unsafe_encode_positive_fixed<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        value: u32,
    ) -> Result<u32> {
        Self::encode_u64(writer, value as u64)
    }

    fn unsafe_encode_positive_wide<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        value: u64,
    ) -> Result<u32> {
        Self::encode_u64(writer, value)
    }

    fn unsafe_encode_positive_unbounded<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        value: &BigUint,
    ) -> Result<u64> {
        let x = value + BigUint::one();
        let mut table = vec![BigUint::one(), BigUint::from(2u32)];
        while *table.last().unwrap() <= x {
            let next = &table[table.len() - 1] + &table[table.len() - 2];
            table.push(next);
        }
        let mut remaining = x;
        let mut indices = Vec::new();
        let mut i = table.iter().rposition(|f| *f <= remaining).unwrap_or(0);
        loop {
            if table[i] <= remaining {
                remaining -= &table[i];
                indices.push(i + 1);
                if remaining.is_zero() {
                    break;
                }
            }
            if i == 0 {
                break;
            }
            i -= 1;
        }
        let top = *indices.iter().max().unwrap_or(&0);
        let mut bits = 0u64;
        for j in 1..=top {
            writer.write_bit(indices.contains(&j))?;
            bits += 1;
        }
        writer.write_bit(true)?;
        bits += 1;
        Ok(bits)
    }

    fn unsafe_decode_positive_fixed<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u32> {
        Self::decode_u64(reader, 31).map(|v| v as u32)
    }

    fn unsafe_decode_positive_wide<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u64> {
        Self::decode_u64(reader, 63)
    }

    fn unsafe_decode_positive_unbounded<R: Read>(
        &self,
        reader: &mut BitReader<R>,
    ) -> Result<BigUint> {
        let mut table = vec![BigUint::one(), BigUint::from(2u32)];
        let mut sum = BigUint::zero();
        let mut prev = false;
        let mut index = 0usize;
        loop {
            while index >= table.len() {
                let next = &table[table.len() - 1] + &table[table.len() - 2];
                table.push(next);
            }
            let bit = reader.read_bit()?;
            if bit && prev {
                break;
            }
            if bit {
                sum += &table[index];
            }
            prev = bit;
            index += 1;
        }
        Ok(sum - BigUint::one())
    }
}
