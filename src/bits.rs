use ndarray::{ArrayView1, ArrayViewD, Ix1};
use rand::Rng;

use crate::error::{BerError, Result};

/// A single binary digit, always 0 or 1.
pub type Bit = u8;

/// Values that can stand in for a bit.
///
/// Booleans, integers and floats are all accepted as long as they are exactly
/// zero or one. Anything else maps to `None`.
pub trait BitLike: Copy {
    fn to_bit(self) -> Option<Bit>;
}

impl BitLike for bool {
    #[inline]
    fn to_bit(self) -> Option<Bit> {
        Some(self as Bit)
    }
}

macro_rules! int_bit_like {
    ($($t:ty),*) => {
        $(
            impl BitLike for $t {
                #[inline]
                fn to_bit(self) -> Option<Bit> {
                    match self {
                        0 => Some(0),
                        1 => Some(1),
                        _ => None,
                    }
                }
            }
        )*
    };
}

int_bit_like!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl BitLike for f64 {
    #[inline]
    fn to_bit(self) -> Option<Bit> {
        if self == 0f64 {
            Some(0)
        } else if self == 1f64 {
            Some(1)
        } else {
            None
        }
    }
}

/// Coerce a sequence of bit-like values into `Bit`s, rejecting anything that isn't 0 or 1.
pub fn validate_bits<B: BitLike>(bits: &[B]) -> Result<Vec<Bit>> {
    bits.iter()
        .enumerate()
        .map(|(i, &b)| {
            b.to_bit().ok_or_else(|| {
                BerError::InvalidInput(format!(
                    "bits must contain only 0s and 1s (bad value at index {i})"
                ))
            })
        })
        .collect()
}

/// Draw `num_bits` uniformly random bits from `rng`.
pub fn random_bits<R: Rng + ?Sized>(num_bits: usize, rng: &mut R) -> Vec<Bit> {
    (0..num_bits).map(|_| rng.random::<bool>() as Bit).collect()
}

/// View an arbitrary-rank array as 1-D, or fail with `InvalidInput`.
pub fn as_1d<'a, T>(array: ArrayViewD<'a, T>, name: &str) -> Result<ArrayView1<'a, T>> {
    let ndim = array.ndim();
    array.into_dimensionality::<Ix1>().map_err(|_| {
        BerError::InvalidInput(format!("{name} must be a 1-D array, got {ndim} dimensions"))
    })
}

/// Paired inputs must both be 1-D; any other rank is a shape mismatch.
pub fn check_pair_rank(tx: &[usize], rx: &[usize]) -> Result<()> {
    if tx.len() != 1 || rx.len() != 1 {
        return Err(BerError::ShapeMismatch {
            tx: tx.to_vec(),
            rx: rx.to_vec(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, ArrayD, IxDyn, array};
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn coercions() {
        assert_eq!(validate_bits(&[true, false, true]).unwrap(), vec![1, 0, 1]);
        assert_eq!(validate_bits(&[0i64, 1, 1]).unwrap(), vec![0, 1, 1]);
        assert_eq!(validate_bits(&[1f64, 0f64]).unwrap(), vec![1, 0]);
    }

    #[test]
    fn rejects_non_binary() {
        assert!(matches!(
            validate_bits(&[0u8, 1, 2]),
            Err(BerError::InvalidInput(_))
        ));
        assert!(validate_bits(&[-1i32]).is_err());
        assert!(validate_bits(&[0.5f64]).is_err());
    }

    #[test]
    fn random_bits_are_binary() {
        let mut rng = StdRng::seed_from_u64(7);
        let bits = random_bits(4096, &mut rng);
        assert_eq!(bits.len(), 4096);
        assert!(bits.iter().all(|&b| b <= 1));
        // Both values should show up in a sample this large.
        assert!(bits.contains(&0) && bits.contains(&1));
    }

    #[test]
    fn one_dimensional_views() {
        let v = array![0u8, 1, 1].into_dyn();
        assert_eq!(as_1d(v.view(), "bits").unwrap().len(), 3);

        let m: ArrayD<u8> = Array2::zeros((2, 2)).into_dyn();
        assert!(matches!(
            as_1d(m.view(), "bits"),
            Err(BerError::InvalidInput(_))
        ));

        let scalar = ArrayD::<u8>::zeros(IxDyn(&[]));
        assert!(as_1d(scalar.view(), "bits").is_err());
    }

    #[test]
    fn paired_rank() {
        assert!(check_pair_rank(&[4], &[3]).is_ok());

        let m: ArrayD<u8> = Array2::zeros((2, 2)).into_dyn();
        assert_eq!(
            check_pair_rank(m.shape(), &[4]),
            Err(BerError::ShapeMismatch {
                tx: vec![2, 2],
                rx: vec![4]
            })
        );
        assert!(matches!(
            check_pair_rank(&[4], &[]),
            Err(BerError::ShapeMismatch { .. })
        ));
    }
}
