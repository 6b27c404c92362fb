/// Cryptographic operation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CryptoError {
    // Buffer errors
    #[error("buffer length not enough: need {need}, got {got}")]
    BufferTooSmall { need: usize, got: usize },

    // Digest errors
    #[error("invalid block length: expected {expected}, got {got}")]
    InvalidBlockLength { expected: usize, got: usize },
}
