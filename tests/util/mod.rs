#![allow(dead_code, unused_macros)]
use awgn_ber::{Bit, Modulation, random_bits, simulate_ber};
use rand::{SeedableRng, rngs::StdRng};

pub mod ber;

/// Collect `$ber_fn` evaluated at every SNR in `$snrs`.
#[macro_export]
macro_rules! bers {
    ($ber_fn:expr, $snrs:expr) => {
        $snrs.iter().cloned().map($ber_fn).collect::<Vec<f64>>()
    };
}

pub fn seeded_bits(num_bits: usize, seed: u64) -> Vec<Bit> {
    random_bits(num_bits, &mut StdRng::seed_from_u64(seed))
}

/// Empirical BER of one fresh seeded trial at a single SNR.
pub fn trial_ber(scheme: Modulation, num_bits: usize, snr_db: f64, seed: u64) -> f64 {
    let mut rng = StdRng::seed_from_u64(seed);
    let bits = random_bits(num_bits, &mut rng);
    simulate_ber(&bits, scheme, &[snr_db], &mut rng).unwrap()[0]
}
