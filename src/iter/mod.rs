mod scale;

pub use scale::Scale;

/// Extra adaptors for sample streams.
pub trait Iter: Iterator {
    /// Multiply every item by a real constant.
    fn scale(self, gain: f64) -> Scale<Self::Item, Self>
    where
        Self: Sized,
        Self::Item: std::ops::Mul<f64, Output = Self::Item>,
    {
        Scale::new(self, gain)
    }
}

impl<I: Iterator> Iter for I {}
