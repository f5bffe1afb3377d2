use std::f64::consts::{FRAC_1_SQRT_2, SQRT_2};

use crate::{
    bits::{Bit, BitLike, validate_bits},
    error::{BerError, Result},
    iter::Iter,
};

use itertools::Itertools;
use num::complex::Complex;

/// Gray-coded QPSK points before normalisation, indexed by `2 * b0 + b1`.
const QPSK_GRAY: [Complex<f64>; 4] = [
    Complex::new(1f64, 1f64),   // 00
    Complex::new(-1f64, 1f64),  // 01
    Complex::new(1f64, -1f64),  // 10
    Complex::new(-1f64, -1f64), // 11
];

/// Map each bit to `1 - 2b`, so 0 -> +1 and 1 -> -1.
pub fn tx_bpsk_signal<I: Iterator<Item = Bit>>(message: I) -> impl Iterator<Item = f64> {
    message.map(|bit| 1f64 - 2f64 * bit as f64)
}

pub fn rx_bpsk_signal<I: Iterator<Item = f64>>(signal: I) -> impl Iterator<Item = Bit> {
    signal.map(|sample| (sample < 0f64) as Bit)
}

/// Consume bits in pairs and emit unit-energy Gray-coded QPSK symbols.
///
/// Only the low bit of each input is used, and a trailing unpaired bit is
/// dropped; use [`qpsk_modulate`] for a checked version.
pub fn tx_qpsk_signal<I: Iterator<Item = Bit>>(
    message: I,
) -> impl Iterator<Item = Complex<f64>> {
    message
        .tuples()
        .map(|(b0, b1)| QPSK_GRAY[(2 * (b0 & 1) + (b1 & 1)) as usize])
        .scale(FRAC_1_SQRT_2)
}

/// Hard decision per quadrant: `im < 0` gives b0, `re < 0` gives b1.
pub fn rx_qpsk_signal<I: Iterator<Item = Complex<f64>>>(
    signal: I,
) -> impl Iterator<Item = Bit> {
    // Undoing the normalisation doesn't change the signs, but keeps decisions
    // on the unnormalised grid.
    signal
        .scale(SQRT_2)
        .flat_map(|sample| [(sample.im < 0f64) as Bit, (sample.re < 0f64) as Bit])
}

pub fn bpsk_modulate<B: BitLike>(bits: &[B]) -> Result<Vec<f64>> {
    let bits = validate_bits(bits)?;
    Ok(tx_bpsk_signal(bits.into_iter()).collect())
}

pub fn bpsk_demodulate(symbols: &[f64]) -> Vec<Bit> {
    rx_bpsk_signal(symbols.iter().cloned()).collect()
}

pub fn qpsk_modulate<B: BitLike>(bits: &[B]) -> Result<Vec<Complex<f64>>> {
    let bits = validate_bits(bits)?;
    if bits.len() % 2 != 0 {
        return Err(BerError::InvalidInput(format!(
            "QPSK needs an even number of bits, got {}",
            bits.len()
        )));
    }
    Ok(tx_qpsk_signal(bits.into_iter()).collect())
}

pub fn qpsk_demodulate(symbols: &[Complex<f64>]) -> Vec<Bit> {
    rx_qpsk_signal(symbols.iter().cloned()).collect()
}
