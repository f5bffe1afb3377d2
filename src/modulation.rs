//! Scheme selection for the modulator and demodulator.
//!
//! [`Modulation`] is the closed set of supported schemes. Adding a scheme means
//! adding a variant here and teaching each `match` about it.

use std::fmt;
use std::str::FromStr;

use crate::{
    bits::{Bit, BitLike},
    error::{BerError, Result},
    metrics::{SnrDef, ber_theory_bpsk_awgn, ber_theory_qpsk_awgn},
    psk::{bpsk_demodulate, bpsk_modulate, qpsk_demodulate, qpsk_modulate},
};

use num::complex::Complex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modulation {
    Bpsk,
    Qpsk,
}

/// A modulated block: real for BPSK, complex baseband for QPSK.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbols {
    Real(Vec<f64>),
    Complex(Vec<Complex<f64>>),
}

impl Symbols {
    pub fn len(&self) -> usize {
        match self {
            Symbols::Real(s) => s.len(),
            Symbols::Complex(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, Symbols::Complex(_))
    }

    /// Mean of `|s|^2` over the block.
    pub fn avg_energy(&self) -> f64 {
        match self {
            Symbols::Real(s) => s.iter().map(|s_i| s_i.powi(2)).sum::<f64>() / s.len() as f64,
            Symbols::Complex(s) => avg_energy(s),
        }
    }
}

/// Calculates the energy per sample.
#[inline]
pub fn avg_energy(signal: &[Complex<f64>]) -> f64 {
    signal.iter().map(|&sample| sample.norm_sqr()).sum::<f64>() / signal.len() as f64
}

impl Modulation {
    pub const ALL: [Modulation; 2] = [Modulation::Bpsk, Modulation::Qpsk];

    pub fn bits_per_symbol(self) -> usize {
        match self {
            Modulation::Bpsk => 1,
            Modulation::Qpsk => 2,
        }
    }

    pub fn modulate<B: BitLike>(self, bits: &[B]) -> Result<Symbols> {
        match self {
            Modulation::Bpsk => bpsk_modulate(bits).map(Symbols::Real),
            Modulation::Qpsk => qpsk_modulate(bits).map(Symbols::Complex),
        }
    }

    /// Hard-decision demodulation.
    ///
    /// BPSK decides on the real part of complex input. QPSK treats real input
    /// as having a zero imaginary part.
    pub fn demodulate(self, symbols: &Symbols) -> Vec<Bit> {
        match (self, symbols) {
            (Modulation::Bpsk, Symbols::Real(s)) => bpsk_demodulate(s),
            (Modulation::Bpsk, Symbols::Complex(s)) => {
                bpsk_demodulate(&s.iter().map(|s_i| s_i.re).collect::<Vec<f64>>())
            }
            (Modulation::Qpsk, Symbols::Complex(s)) => qpsk_demodulate(s),
            (Modulation::Qpsk, Symbols::Real(s)) => qpsk_demodulate(
                &s.iter()
                    .map(|&s_i| Complex::new(s_i, 0f64))
                    .collect::<Vec<Complex<f64>>>(),
            ),
        }
    }

    /// Closed-form BER over AWGN at `snr_db`.
    pub fn theory_ber(self, snr_db: f64, snr_def: SnrDef) -> f64 {
        match self {
            Modulation::Bpsk => ber_theory_bpsk_awgn(snr_db, snr_def),
            Modulation::Qpsk => ber_theory_qpsk_awgn(snr_db, snr_def),
        }
    }

    /// The SNR convention the sweep driver plots this scheme's theory curve under.
    pub fn default_snr_def(self) -> SnrDef {
        match self {
            Modulation::Bpsk => SnrDef::EbN0,
            Modulation::Qpsk => SnrDef::EsN0,
        }
    }
}

impl FromStr for Modulation {
    type Err = BerError;

    fn from_str(s: &str) -> Result<Self> {
        let scheme = s.trim();
        if scheme.eq_ignore_ascii_case("bpsk") {
            Ok(Modulation::Bpsk)
        } else if scheme.eq_ignore_ascii_case("qpsk") {
            Ok(Modulation::Qpsk)
        } else {
            Err(BerError::UnsupportedScheme(scheme.to_string()))
        }
    }
}

impl fmt::Display for Modulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modulation::Bpsk => write!(f, "bpsk"),
            Modulation::Qpsk => write!(f, "qpsk"),
        }
    }
}

pub fn modulate<B: BitLike>(bits: &[B], scheme: &str) -> Result<Symbols> {
    scheme.parse::<Modulation>()?.modulate(bits)
}

pub fn demodulate(symbols: &Symbols, scheme: &str) -> Result<Vec<Bit>> {
    Ok(scheme.parse::<Modulation>()?.demodulate(symbols))
}
