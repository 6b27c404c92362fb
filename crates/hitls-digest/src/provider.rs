//! Trait-based provider interface for digest algorithms.
//!
//! Every hash context in this crate implements [`Digest`], so callers that
//! only need "some hash" can hold a `Box<dyn Digest>` without caring which
//! algorithm sits behind it.

use hitls_types::CryptoError;

/// A hash / message digest algorithm.
pub trait Digest: Send + Sync {
    /// The output size in bytes.
    fn output_size(&self) -> usize;

    /// The internal block size in bytes.
    fn block_size(&self) -> usize;

    /// Feed data into the hash state.
    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError>;

    /// Finalize the hash and write the digest to `out`.
    /// The length of `out` must be at least `output_size()`.
    fn finish(&mut self, out: &mut [u8]) -> Result<(), CryptoError>;

    /// Reset the hash state to process a new message.
    fn reset(&mut self);
}

/// Copy a finished digest into the front of a caller-provided buffer.
pub(crate) fn write_digest(out: &mut [u8], digest: &[u8]) -> Result<(), CryptoError> {
    if out.len() < digest.len() {
        return Err(CryptoError::BufferTooSmall {
            need: digest.len(),
            got: out.len(),
        });
    }
    out[..digest.len()].copy_from_slice(digest);
    Ok(())
}

/// View `block` as exactly one `N`-byte block.
pub(crate) fn exact_block<const N: usize>(block: &[u8]) -> Result<&[u8; N], CryptoError> {
    block
        .try_into()
        .map_err(|_| CryptoError::InvalidBlockLength {
            expected: N,
            got: block.len(),
        })
}
