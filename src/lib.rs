//! Monte Carlo bit error rate simulation of BPSK and QPSK over AWGN.
//!
//! Data flows one way: bits -> symbols -> noisy symbols -> decided bits -> BER.
//! The only state shared between SNR points is the caller's random source.

pub mod bits;
pub mod channel;
pub mod error;
pub mod iter;
pub mod metrics;
pub mod modulation;
pub mod plot;
pub mod psk;
mod python;
pub mod sim;

pub use crate::{
    bits::{Bit, BitLike, random_bits},
    channel::{awgn, awgn_symbols, awgn_unseeded, noise_variance, snr_db_to_linear},
    error::{BerError, Result},
    metrics::{
        SnrDef, ber, ber_theory_bpsk_awgn, ber_theory_curve, ber_theory_qpsk_awgn, qfunc, ser,
    },
    modulation::{Modulation, Symbols, avg_energy, demodulate, modulate},
    sim::{BerPoint, SweepConfig, run_sweep, simulate_ber},
};

#[inline]
pub fn undb(x: f64) -> f64 {
    10f64.powf(x / 10f64)
}

/// `num` evenly spaced points from `start` to `stop` inclusive. A single point is just `start`.
#[inline]
pub fn linspace(start: f64, stop: f64, num: usize) -> impl Iterator<Item = f64> {
    let step = if num > 1 {
        (stop - start) / ((num - 1) as f64)
    } else {
        0f64
    };
    (0..num).map(move |i| start + step * (i as f64))
}

/// Complementary error function.
///
/// Chebyshev fit from Numerical Recipes, fractional error below 1.2e-7
/// everywhere. The tail is evaluated directly so it stays accurate far past
/// the point where `1 - erf(x)` would round to zero.
#[inline]
pub fn erfc(x: f64) -> f64 {
    let t: f64 = 1f64 / (1f64 + 0.5 * x.abs());
    let tau = t
        * (-x.powi(2) - 1.26551223
            + 1.00002368 * t
            + 0.37409196 * t.powi(2)
            + 0.09678418 * t.powi(3)
            - 0.18628806 * t.powi(4)
            + 0.27886807 * t.powi(5)
            - 1.13520398 * t.powi(6)
            + 1.48851587 * t.powi(7)
            - 0.82215223 * t.powi(8)
            + 0.17087277 * t.powi(9))
        .exp();
    if x >= 0f64 { tau } else { 2f64 - tau }
}
