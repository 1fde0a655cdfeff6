//! Digital signatures over handshake transcript digests.
//!
//! SSL/TLS up to 1.2 sign a digest the handshake layer has already
//! computed, so every [`Signature`] here takes the digest, not the message.

use crate::Result;
use zeroize::Zeroize;

/// Signature algorithms used by CertificateVerify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureAlgorithm {
    /// RSA PKCS#1 v1.5 over the 36-byte MD5 ‖ SHA-1 digest, without a
    /// DigestInfo prefix (SSL 3.0, TLS 1.0, TLS 1.1).
    RsaPkcs1Md5Sha1,
    /// RSA PKCS#1 v1.5 over a SHA-256 digest with DigestInfo (TLS 1.2).
    RsaPkcs1Sha256,
    /// DSA over a SHA-1 digest.
    DsaSha1,
}

impl SignatureAlgorithm {
    /// Get the algorithm name.
    pub const fn name(self) -> &'static str {
        match self {
            SignatureAlgorithm::RsaPkcs1Md5Sha1 => "rsa_pkcs1_md5_sha1",
            SignatureAlgorithm::RsaPkcs1Sha256 => "rsa_pkcs1_sha256",
            SignatureAlgorithm::DsaSha1 => "dsa_sha1",
        }
    }

    /// Length of the digest this algorithm signs.
    pub const fn digest_len(self) -> usize {
        match self {
            SignatureAlgorithm::RsaPkcs1Md5Sha1 => 36,
            SignatureAlgorithm::RsaPkcs1Sha256 => 32,
            SignatureAlgorithm::DsaSha1 => 20,
        }
    }
}

/// Signing key (private key), DER encoded.
///
/// Zeroized when dropped.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SigningKey {
    bytes: Vec<u8>,
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("bytes", &"<redacted>")
            .finish()
    }
}

impl SigningKey {
    /// Create a new signing key from DER bytes (PKCS#8 or PKCS#1).
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Get the signing key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Digital signature trait.
///
/// ```rust,no_run
/// use tlsauth_crypto::Signature;
///
/// fn verify_example(sig: &dyn Signature, public_key: &[u8], digest: &[u8], signature: &[u8]) -> bool {
///     sig.verify(public_key, digest, signature).is_ok()
/// }
/// ```
pub trait Signature: Send + Sync {
    /// Sign a precomputed digest.
    ///
    /// # Errors
    ///
    /// - `InvalidPrivateKey` if the signing key cannot be decoded
    /// - `CryptoError` for other errors
    fn sign(&self, signing_key: &[u8], digest: &[u8]) -> Result<Vec<u8>>;

    /// Verify a signature over a precomputed digest.
    ///
    /// `public_key` is the `subjectPublicKey` content of the certificate.
    ///
    /// # Errors
    ///
    /// - `InvalidPublicKey` if the public key cannot be decoded
    /// - `SignatureVerificationFailed` if the signature does not match
    fn verify(&self, public_key: &[u8], digest: &[u8], signature: &[u8]) -> Result<()>;

    /// Get the algorithm this signature implements.
    fn algorithm(&self) -> SignatureAlgorithm;
}
