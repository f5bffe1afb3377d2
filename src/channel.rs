//! Additive white Gaussian noise channel.
//!
//! SNR is always read as Es/N0 with unit symbol energy. Real signals get
//! `N(0, 1 / (2 SNR))` noise, complex signals get circular `CN(0, 1 / SNR)`
//! noise with half of the variance on each rail.

use log::debug;
use num_complex::Complex;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::{
    error::{BerError, Result},
    modulation::Symbols,
    undb,
};

#[inline]
pub fn snr_db_to_linear(snr_db: f64) -> f64 {
    undb(snr_db)
}

/// Noise variance for a unit-energy signal at `snr_db`.
///
/// With `complex_noise` this is the total variance `E[|n|^2] = 1 / SNR`;
/// otherwise it is the real-valued `N0 / 2 = 1 / (2 SNR)`.
pub fn noise_variance(snr_db: f64, complex_noise: bool) -> Result<f64> {
    let snr = snr_db_to_linear(snr_db);
    // Also catches NaN.
    if !(snr > 0f64) {
        return Err(BerError::InvalidSnr(snr_db));
    }
    if complex_noise {
        Ok(1f64 / snr)
    } else {
        Ok(1f64 / (2f64 * snr))
    }
}

/// A sample type the channel knows how to corrupt.
pub trait NoiseSample: Copy {
    /// Whether noise for this type is circular complex or real.
    const COMPLEX: bool;

    /// Add one draw of noise, where `normal` is the per-rail distribution.
    fn add_noise<R: Rng + ?Sized>(self, normal: &Normal<f64>, rng: &mut R) -> Self;
}

impl NoiseSample for f64 {
    const COMPLEX: bool = false;

    #[inline]
    fn add_noise<R: Rng + ?Sized>(self, normal: &Normal<f64>, rng: &mut R) -> Self {
        self + normal.sample(rng)
    }
}

impl NoiseSample for Complex<f64> {
    const COMPLEX: bool = true;

    #[inline]
    fn add_noise<R: Rng + ?Sized>(self, normal: &Normal<f64>, rng: &mut R) -> Self {
        let n_1 = normal.sample(rng);
        let n_2 = normal.sample(rng);
        self + Complex::new(n_1, n_2)
    }
}

/// Pass `signal` through an AWGN channel at `snr_db`.
///
/// Every call advances `rng`, so sharing one generator across calls in a fixed
/// order reproduces the same noise.
pub fn awgn<T: NoiseSample, R: Rng + ?Sized>(
    signal: &[T],
    snr_db: f64,
    rng: &mut R,
) -> Result<Vec<T>> {
    let sigma2 = noise_variance(snr_db, T::COMPLEX)?;
    let rail_variance = if T::COMPLEX { sigma2 / 2f64 } else { sigma2 };
    let normal =
        Normal::new(0f64, rail_variance.sqrt()).map_err(|_| BerError::InvalidSnr(snr_db))?;

    debug!(
        "awgn: {} {} samples at {snr_db} dB (sigma^2 = {sigma2:e})",
        signal.len(),
        if T::COMPLEX { "complex" } else { "real" },
    );

    Ok(signal
        .iter()
        .map(|&sample| sample.add_noise(&normal, &mut *rng))
        .collect())
}

/// [`awgn`] with a fresh, unseeded random source.
pub fn awgn_unseeded<T: NoiseSample>(signal: &[T], snr_db: f64) -> Result<Vec<T>> {
    awgn(signal, snr_db, &mut rand::rng())
}

/// [`awgn`] on a modulated block, keeping its real or complex kind.
pub fn awgn_symbols<R: Rng + ?Sized>(
    symbols: &Symbols,
    snr_db: f64,
    rng: &mut R,
) -> Result<Symbols> {
    match symbols {
        Symbols::Real(s) => awgn(s, snr_db, rng).map(Symbols::Real),
        Symbols::Complex(s) => awgn(s, snr_db, rng).map(Symbols::Complex),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::{SeedableRng, rngs::StdRng};
    use rstest::rstest;

    #[rstest]
    #[case(0f64, 1f64)]
    #[case(10f64, 0.1)]
    #[case(-10f64, 10f64)]
    #[case(3f64, 0.501187233627272)]
    fn variances(#[case] snr_db: f64, #[case] complex_var: f64) {
        assert_approx_eq!(noise_variance(snr_db, true).unwrap(), complex_var, 1e-12);
        assert_approx_eq!(noise_variance(snr_db, false).unwrap(), complex_var / 2f64, 1e-12);
    }

    #[rstest]
    #[case(f64::NEG_INFINITY)]
    #[case(f64::NAN)]
    fn degenerate_snr(#[case] snr_db: f64) {
        assert!(matches!(
            noise_variance(snr_db, false),
            Err(BerError::InvalidSnr(_))
        ));
        let mut rng = StdRng::seed_from_u64(0);
        assert!(awgn(&[1f64, -1f64], snr_db, &mut rng).is_err());
    }

    #[test]
    fn real_noise_power() {
        let mut rng = StdRng::seed_from_u64(42);
        let zeros = vec![0f64; 200_000];
        let noise = awgn(&zeros, 0f64, &mut rng).unwrap();

        let mean = noise.iter().sum::<f64>() / noise.len() as f64;
        let var = noise.iter().map(|n| n.powi(2)).sum::<f64>() / noise.len() as f64;
        assert_approx_eq!(mean, 0f64, 0.01);
        assert_approx_eq!(var, 0.5, 0.01);
    }

    #[test]
    fn complex_noise_power() {
        let mut rng = StdRng::seed_from_u64(43);
        let zeros = vec![Complex::new(0f64, 0f64); 200_000];
        let noise = awgn(&zeros, 3f64, &mut rng).unwrap();
        let len = noise.len() as f64;

        let total = noise.iter().map(|n| n.norm_sqr()).sum::<f64>() / len;
        let re = noise.iter().map(|n| n.re.powi(2)).sum::<f64>() / len;
        let im = noise.iter().map(|n| n.im.powi(2)).sum::<f64>() / len;
        let expected = noise_variance(3f64, true).unwrap();

        assert_approx_eq!(total, expected, 0.01);
        assert_approx_eq!(re, expected / 2f64, 0.01);
        assert_approx_eq!(im, expected / 2f64, 0.01);
    }

    #[test]
    fn shared_source_is_reproducible() {
        let signal = vec![1f64; 64];

        let mut rng_a = StdRng::seed_from_u64(9);
        let first_a = awgn(&signal, 2f64, &mut rng_a).unwrap();
        let second_a = awgn(&signal, 4f64, &mut rng_a).unwrap();

        let mut rng_b = StdRng::seed_from_u64(9);
        let first_b = awgn(&signal, 2f64, &mut rng_b).unwrap();
        let second_b = awgn(&signal, 4f64, &mut rng_b).unwrap();

        assert_eq!(first_a, first_b);
        assert_eq!(second_a, second_b);
        // The source moved on between calls.
        assert_ne!(first_a, second_a);
    }

    #[test]
    fn symbol_kind_is_preserved() {
        let mut rng = StdRng::seed_from_u64(5);
        let real = awgn_symbols(&Symbols::Real(vec![1f64; 8]), 5f64, &mut rng).unwrap();
        assert!(!real.is_complex());
        let complex = awgn_symbols(
            &Symbols::Complex(vec![Complex::new(1f64, 0f64); 8]),
            5f64,
            &mut rng,
        )
        .unwrap();
        assert!(complex.is_complex());
        assert_eq!(complex.len(), 8);
    }

    #[test]
    fn unseeded_source() {
        let noisy = awgn_unseeded(&[1f64, -1f64, 1f64], 100f64).unwrap();
        assert_eq!(noisy.len(), 3);
        // At 100 dB the noise is far below the symbol spacing.
        assert!(noisy[0] > 0f64 && noisy[1] < 0f64 && noisy[2] > 0f64);
    }
}
