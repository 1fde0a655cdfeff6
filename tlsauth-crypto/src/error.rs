//! Error types for the cryptographic provider.

/// Result type for cryptographic operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during cryptographic operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The requested algorithm is not supported by this provider.
    #[error("algorithm not supported: {0}")]
    UnsupportedAlgorithm(String),

    /// Invalid key length for the primitive.
    #[error("invalid key length")]
    InvalidKeyLength,

    /// Signature verification failed.
    #[error("signature verification failed")]
    SignatureVerificationFailed,

    /// Invalid signature format.
    #[error("invalid signature format")]
    InvalidSignature,

    /// Invalid public key.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// Invalid private key.
    #[error("invalid private key")]
    InvalidPrivateKey,

    /// General cryptographic error with a message.
    #[error("cryptographic error: {0}")]
    CryptoError(String),

    /// Internal error (should not happen in correct usage).
    #[error("internal error: {0}")]
    Internal(String),
}
