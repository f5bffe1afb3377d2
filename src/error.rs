/// Everything that can go wrong when calling into the simulator.
///
/// All of these are caller contract violations; nothing here is transient.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Paired sequences whose shapes differ or aren't both 1-D.
    #[error("shape mismatch: tx has shape {tx:?}, rx has shape {rx:?}")]
    ShapeMismatch { tx: Vec<usize>, rx: Vec<usize> },

    #[error("cannot compute an error rate over empty sequences")]
    EmptyInput,

    #[error("invalid bit value at index {index}: bits must be 0 or 1")]
    InvalidBitValue { index: usize },

    #[error("unsupported modulation scheme: `{0}`")]
    UnsupportedScheme(String),

    #[error("SNR of {0} dB does not correspond to a positive linear SNR")]
    InvalidSnr(f64),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, BerError>;
