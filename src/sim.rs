//! BER-vs-SNR sweeps.
//!
//! One bitstream is modulated once and then pushed through the channel at each
//! SNR point in order, drawing all noise from a single seeded source.

use log::{debug, info};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    bits::{BitLike, random_bits, validate_bits},
    channel::awgn_symbols,
    error::{BerError, Result},
    metrics::ber,
    modulation::Modulation,
};

pub const DEFAULT_NUM_BITS: usize = 200_000;

#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    pub scheme: Modulation,
    pub num_bits: usize,
    pub snrs_db: Vec<f64>,
    pub seed: u64,
}

impl SweepConfig {
    pub fn new(scheme: Modulation, snrs_db: Vec<f64>) -> Self {
        Self {
            scheme,
            num_bits: DEFAULT_NUM_BITS,
            snrs_db,
            seed: 0,
        }
    }

    pub fn num_bits(mut self, num_bits: usize) -> Self {
        self.num_bits = num_bits;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// One row of a sweep result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BerPoint {
    pub snr_db: f64,
    pub ber: f64,
    pub ber_theory: f64,
}

/// Round `num_bits` up to a whole number of symbols.
pub fn padded_num_bits(scheme: Modulation, num_bits: usize) -> usize {
    num_bits.next_multiple_of(scheme.bits_per_symbol())
}

/// Empirical BER of `bits` at each of `snrs_db`.
///
/// Points are simulated in order and all draw from `rng`, so the result for
/// point `k` depends on the noise generated for the points before it.
pub fn simulate_ber<B: BitLike, R: Rng + ?Sized>(
    bits: &[B],
    scheme: Modulation,
    snrs_db: &[f64],
    rng: &mut R,
) -> Result<Vec<f64>> {
    let bits_tx = validate_bits(bits)?;
    let symbols = scheme.modulate(&bits_tx)?;

    snrs_db
        .iter()
        .map(|&snr_db| {
            let noisy = awgn_symbols(&symbols, snr_db, &mut *rng)?;
            let bits_rx = scheme.demodulate(&noisy);
            let ber = ber(&bits_tx, &bits_rx)?;
            debug!("{scheme}: SNR = {snr_db:>6.2} dB | BER = {ber:e}");
            Ok(ber)
        })
        .collect()
}

/// Run a full seeded sweep and pair each point with its theoretical BER.
///
/// BPSK theory is evaluated with Eb/N0 and QPSK with Es/N0; see
/// [`Modulation::default_snr_def`].
pub fn run_sweep(config: &SweepConfig) -> Result<Vec<BerPoint>> {
    if config.num_bits == 0 {
        return Err(BerError::InvalidArgument(
            "number of bits must be positive".to_string(),
        ));
    }
    if config.snrs_db.is_empty() {
        return Err(BerError::InvalidArgument(
            "at least one SNR point is required".to_string(),
        ));
    }

    let scheme = config.scheme;
    let num_bits = padded_num_bits(scheme, config.num_bits);
    if num_bits != config.num_bits {
        info!(
            "{} requires a multiple of {} bits, using {num_bits} instead of {}",
            scheme.to_string().to_uppercase(),
            scheme.bits_per_symbol(),
            config.num_bits
        );
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let bits_tx = random_bits(num_bits, &mut rng);
    let bers = simulate_ber(&bits_tx, scheme, &config.snrs_db, &mut rng)?;

    let snr_def = scheme.default_snr_def();
    Ok(config
        .snrs_db
        .iter()
        .zip(bers)
        .map(|(&snr_db, ber)| BerPoint {
            snr_db,
            ber,
            ber_theory: scheme.theory_ber(snr_db, snr_def),
        })
        .collect())
}
