//! Error-rate measurements and their closed-form AWGN counterparts.

use std::f64::consts::SQRT_2;
use std::fmt;
use std::str::FromStr;

use crate::{
    bits::BitLike,
    erfc,
    error::{BerError, Result},
    modulation::Modulation,
    undb,
};

/// Which energy ratio an SNR in dB refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnrDef {
    /// Symbol energy to noise density.
    EsN0,
    /// Bit energy to noise density.
    EbN0,
}

impl FromStr for SnrDef {
    type Err = BerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "EsN0" => Ok(SnrDef::EsN0),
            "EbN0" => Ok(SnrDef::EbN0),
            other => Err(BerError::InvalidArgument(format!(
                "snr_def must be `EsN0` or `EbN0`, got `{other}`"
            ))),
        }
    }
}

impl fmt::Display for SnrDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnrDef::EsN0 => write!(f, "EsN0"),
            SnrDef::EbN0 => write!(f, "EbN0"),
        }
    }
}

fn check_pair(tx: usize, rx: usize) -> Result<()> {
    if tx != rx {
        return Err(BerError::ShapeMismatch {
            tx: vec![tx],
            rx: vec![rx],
        });
    }
    if tx == 0 {
        return Err(BerError::EmptyInput);
    }
    Ok(())
}

/// Fraction of positions where `bits_tx` and `bits_rx` disagree.
pub fn ber<A: BitLike, B: BitLike>(bits_tx: &[A], bits_rx: &[B]) -> Result<f64> {
    check_pair(bits_tx.len(), bits_rx.len())?;

    let mut errors: usize = 0;
    for (index, (&t_i, &r_i)) in bits_tx.iter().zip(bits_rx.iter()).enumerate() {
        let (Some(t_i), Some(r_i)) = (t_i.to_bit(), r_i.to_bit()) else {
            return Err(BerError::InvalidBitValue { index });
        };
        if t_i != r_i {
            errors += 1;
        }
    }
    Ok(errors as f64 / bits_tx.len() as f64)
}

/// Fraction of positions holding different symbols.
///
/// Compares with exact equality, so it only makes sense on decided symbols.
pub fn ser<T: PartialEq>(symbols_tx: &[T], symbols_rx: &[T]) -> Result<f64> {
    check_pair(symbols_tx.len(), symbols_rx.len())?;
    let errors = symbols_tx
        .iter()
        .zip(symbols_rx.iter())
        .filter(|(t_i, r_i)| t_i != r_i)
        .count();
    Ok(errors as f64 / symbols_tx.len() as f64)
}

/// Gaussian tail probability, `Q(x) = erfc(x / sqrt(2)) / 2`.
#[inline]
pub fn qfunc(x: f64) -> f64 {
    0.5 * erfc(x / SQRT_2)
}

/// `Q(sqrt(2 SNR))`. BPSK carries one bit per symbol so Es/N0 and Eb/N0 coincide.
pub fn ber_theory_bpsk_awgn(snr_db: f64, snr_def: SnrDef) -> f64 {
    let eb_n0 = match snr_def {
        SnrDef::EsN0 | SnrDef::EbN0 => undb(snr_db),
    };
    qfunc((2f64 * eb_n0).sqrt())
}

/// Gray-coded QPSK has the BPSK bit error rate per Eb/N0; Es/N0 is split over two bits.
pub fn ber_theory_qpsk_awgn(snr_db: f64, snr_def: SnrDef) -> f64 {
    let snr = undb(snr_db);
    let eb_n0 = match snr_def {
        SnrDef::EbN0 => snr,
        SnrDef::EsN0 => snr / 2f64,
    };
    qfunc((2f64 * eb_n0).sqrt())
}

/// Theoretical BER at each of `snrs_db`.
pub fn ber_theory_curve(scheme: Modulation, snrs_db: &[f64], snr_def: SnrDef) -> Vec<f64> {
    snrs_db
        .iter()
        .map(|&snr_db| scheme.theory_ber(snr_db, snr_def))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linspace;
    use assert_approx_eq::assert_approx_eq;
    use rstest::rstest;

    #[test]
    fn counts_errors() {
        assert_eq!(ber(&[0u8, 1, 1, 0], &[0u8, 1, 1, 0]).unwrap(), 0f64);
        assert_eq!(ber(&[0u8, 1, 1, 0], &[1u8, 1, 0, 0]).unwrap(), 0.5);
        assert_eq!(ber(&[0u8, 0], &[1u8, 1]).unwrap(), 1f64);
        assert_eq!(ber(&[true, false], &[1u8, 0]).unwrap(), 0f64);
    }

    #[test]
    fn symmetric() {
        let a = [0u8, 1, 1, 0, 1, 0, 0];
        let b = [1u8, 1, 0, 0, 1, 1, 0];
        assert_eq!(ber(&a, &b).unwrap(), ber(&b, &a).unwrap());
    }

    #[test]
    fn ber_errors() {
        let empty: [u8; 0] = [];
        assert_eq!(ber(&empty, &empty), Err(BerError::EmptyInput));
        assert_eq!(
            ber(&[0u8, 1], &[0u8]),
            Err(BerError::ShapeMismatch {
                tx: vec![2],
                rx: vec![1]
            })
        );
        assert_eq!(
            ber(&[0u8, 1, 2], &[0u8, 1, 1]),
            Err(BerError::InvalidBitValue { index: 2 })
        );
        assert_eq!(
            ber(&[0u8, 1], &[-1i32, 1]),
            Err(BerError::InvalidBitValue { index: 0 })
        );
    }

    #[test]
    fn symbol_errors() {
        assert_eq!(ser(&[1, 2, 3, 4], &[1, 2, 0, 4]).unwrap(), 0.25);
        let empty: [f64; 0] = [];
        assert_eq!(ser(&empty, &empty), Err(BerError::EmptyInput));
        assert!(matches!(
            ser(&[1f64], &[1f64, 2f64]),
            Err(BerError::ShapeMismatch { .. })
        ));
    }

    #[rstest]
    #[case(0f64, 0.5)]
    #[case(1f64, 0.158_655_253_931_457_05)]
    #[case(3f64, 0.001_349_898_031_630_094_6)]
    #[case(-1f64, 0.841_344_746_068_542_9)]
    fn q_function(#[case] x: f64, #[case] expected: f64) {
        assert_approx_eq!(qfunc(x) / expected, 1f64, 1e-6);
    }

    #[test]
    fn q_function_deep_tail() {
        // Q(sqrt(200)) is about 2e-45; it must not cancel to zero.
        let q = qfunc(200f64.sqrt());
        assert!(q > 0f64 && q < 1e-40);
    }

    #[rstest]
    #[case(0f64, 0.078_649_603_525_142_7)]
    #[case(4f64, 0.012_500_818_040_737_56)]
    #[case(10f64, 3.872_108_215_522_035e-6)]
    fn bpsk_theory(#[case] snr_db: f64, #[case] expected: f64) {
        for def in [SnrDef::EsN0, SnrDef::EbN0] {
            assert_approx_eq!(ber_theory_bpsk_awgn(snr_db, def) / expected, 1f64, 1e-5);
        }
    }

    #[test]
    fn qpsk_theory_conventions() {
        // Per-bit, QPSK matches BPSK.
        assert_approx_eq!(
            ber_theory_qpsk_awgn(6f64, SnrDef::EbN0),
            ber_theory_bpsk_awgn(6f64, SnrDef::EbN0),
            1e-15
        );
        // Es/N0 is 3 dB above Eb/N0 for two bits per symbol.
        let shift = 10f64 * 2f64.log10();
        assert_approx_eq!(
            ber_theory_qpsk_awgn(6f64 + shift, SnrDef::EsN0),
            ber_theory_qpsk_awgn(6f64, SnrDef::EbN0),
            1e-12
        );
    }

    #[rstest]
    #[case(Modulation::Bpsk, SnrDef::EbN0)]
    #[case(Modulation::Qpsk, SnrDef::EsN0)]
    #[case(Modulation::Qpsk, SnrDef::EbN0)]
    fn theory_strictly_decreasing(#[case] scheme: Modulation, #[case] def: SnrDef) {
        let snrs: Vec<f64> = linspace(-10f64, 20f64, 61).collect();
        let curve = ber_theory_curve(scheme, &snrs, def);
        assert_eq!(curve.len(), snrs.len());
        assert!(curve.iter().all(|&p| (0f64..=0.5).contains(&p)));
        assert!(curve.windows(2).all(|w| w[1] < w[0]));
    }

    #[rstest]
    #[case("EsN0", SnrDef::EsN0)]
    #[case("EbN0", SnrDef::EbN0)]
    fn parses_snr_defs(#[case] name: &str, #[case] expected: SnrDef) {
        assert_eq!(name.parse::<SnrDef>().unwrap(), expected);
        assert_eq!(expected.to_string(), name);
    }

    #[rstest]
    #[case("esn0")]
    #[case("SNR")]
    #[case("")]
    fn rejects_unknown_snr_defs(#[case] name: &str) {
        assert!(matches!(
            name.parse::<SnrDef>(),
            Err(BerError::InvalidArgument(_))
        ));
    }
}
