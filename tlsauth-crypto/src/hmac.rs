//! Keyed MAC interface for the `P_hash` expansion.

use crate::HashAlgorithm;

/// An HMAC computation in progress.
///
/// Every TLS PRF is a chain of these: each `P_hash` block is one HMAC over
/// the previous `A(i)` and the seed, keyed with (half of) the secret.
pub trait Hmac: Send {
    /// Absorb more input.
    fn update(&mut self, data: &[u8]);

    /// Produce the tag, consuming the state.
    fn finalize(self: Box<Self>) -> Vec<u8>;

    /// Tag length in bytes.
    fn output_size(&self) -> usize;

    /// Underlying hash.
    fn algorithm(&self) -> HashAlgorithm;
}
