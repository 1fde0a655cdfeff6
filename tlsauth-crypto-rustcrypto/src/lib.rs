//! # RustCrypto-based Cryptography Provider for tlsauth
//!
//! This crate implements [`tlsauth_crypto::CryptoProvider`] on top of the
//! RustCrypto project crates.
//!
//! ## Supported Algorithms
//!
//! - **Hash**: MD5, SHA-1, SHA-256, SHA-384 (`md-5`, `sha1`, `sha2`)
//! - **HMAC**: over all of the above (`hmac`)
//! - **Signatures**: RSA PKCS#1 v1.5, raw MD5 ‖ SHA-1 and SHA-256 (`rsa`)
//!
//! DSA is recognised by the core but not implemented here; asking for it
//! yields `UnsupportedAlgorithm`.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use tlsauth_crypto::CryptoProvider;
//! use tlsauth_crypto_rustcrypto::RustCryptoProvider;
//!
//! let provider = RustCryptoProvider::new();
//! assert!(provider.supports_hash(tlsauth_crypto::HashAlgorithm::Md5));
//! ```

#![deny(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    unused_qualifications,
    missing_debug_implementations
)]

use tlsauth_crypto::{
    CryptoProvider, Hash, HashAlgorithm, Hmac, Result, Signature, SignatureAlgorithm,
};

pub mod hash;
pub mod hmac;
pub mod signature;

/// Cryptography provider using RustCrypto implementations.
///
/// Stateless: every call builds a fresh primitive, so one provider can be
/// shared by any number of sessions and threads.
#[derive(Debug, Clone, Copy)]
pub struct RustCryptoProvider;

impl Default for RustCryptoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CryptoProvider for RustCryptoProvider {
    fn new() -> Self {
        Self
    }

    fn hash(&self, algorithm: HashAlgorithm) -> Result<Box<dyn Hash>> {
        Ok(hash::create_hash(algorithm))
    }

    fn hmac(&self, algorithm: HashAlgorithm, key: &[u8]) -> Result<Box<dyn Hmac>> {
        hmac::create_hmac(algorithm, key)
    }

    fn signature(&self, algorithm: SignatureAlgorithm) -> Result<Box<dyn Signature>> {
        signature::create_signature(algorithm)
    }
}
