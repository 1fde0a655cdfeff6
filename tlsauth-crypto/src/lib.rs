//! # tlsauth Cryptographic Provider Interface
//!
//! This crate defines the narrow cryptographic contracts consumed by the
//! tlsauth handshake core. The core never links a concrete crypto library;
//! it asks a [`CryptoProvider`] for hash, HMAC and signature instances and works through trait objects.
//!
//! ## Architecture
//!
//! ```text
//! CryptoProvider (main trait)
//! ├── Hash (MD5, SHA-1, SHA-256, SHA-384)
//! ├── Hmac (HMAC over any of the above)
//! └── Signature (RSA PKCS#1 v1.5, DSA)
//! ```
//!
//! MD5 and SHA-1 are present because the SSL 3.0 and TLS 1.0/1.1 key
//! derivation functions are defined over them.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use tlsauth_crypto::{CryptoProvider, HashAlgorithm};
//!
//! fn digest(provider: &dyn CryptoProvider, data: &[u8]) -> tlsauth_crypto::Result<Vec<u8>> {
//!     let mut hash = provider.hash(HashAlgorithm::Sha256)?;
//!     hash.update(data);
//!     Ok(hash.finalize())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    unused_qualifications,
    missing_debug_implementations
)]

pub mod error;
pub mod hash;
pub mod hmac;
pub mod signature;

pub use error::{Error, Result};
pub use hash::{Hash, HashAlgorithm};
pub use hmac::Hmac;
pub use signature::{Signature, SignatureAlgorithm, SigningKey};

/// The main cryptographic provider trait.
///
/// Implementations hand out fresh primitive instances on every call, so a
/// single provider can be shared by any number of concurrent handshakes.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`.
pub trait CryptoProvider: Send + Sync + 'static {
    /// Create a new instance of the crypto provider.
    fn new() -> Self
    where
        Self: Sized;

    /// Get a hash function instance.
    ///
    /// # Errors
    ///
    /// `UnsupportedAlgorithm` if the provider does not implement `algorithm`.
    fn hash(&self, algorithm: HashAlgorithm) -> Result<Box<dyn Hash>>;

    /// Get an HMAC instance keyed with `key`.
    ///
    /// # Errors
    ///
    /// `UnsupportedAlgorithm` if the provider does not implement `algorithm`.
    fn hmac(&self, algorithm: HashAlgorithm, key: &[u8]) -> Result<Box<dyn Hmac>>;

    /// Get a signature scheme instance.
    ///
    /// # Errors
    ///
    /// `UnsupportedAlgorithm` if the provider does not implement `algorithm`.
    fn signature(&self, algorithm: SignatureAlgorithm) -> Result<Box<dyn Signature>>;

    /// Check if the provider supports a specific hash algorithm.
    fn supports_hash(&self, algorithm: HashAlgorithm) -> bool {
        self.hash(algorithm).is_ok()
    }

    /// Check if the provider supports a specific signature algorithm.
    fn supports_signature(&self, algorithm: SignatureAlgorithm) -> bool {
        self.signature(algorithm).is_ok()
    }
}
