use thiserror::Error;

/// Error type shared by the berx crates
///
/// The taxonomy is deliberately small: a failure either came from the byte
/// stream itself, from bytes that do not form a valid encoding (or a value
/// outside its legal range), or from a value that cannot be represented
/// exactly in the requested narrower type.
#[derive(Error, Debug)]
pub enum BerError {
    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Precision loss: {0}")]
    PrecisionLoss(String),
}

/// Result type alias for berx operations
pub type BerResult<T> = Result<T, BerError>;
