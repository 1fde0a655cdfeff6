//! CertificateVerify generation and verification.
//!
//! The orchestration layer supplies the transcript digest: MD5 ‖ SHA-1
//! (36 bytes) up to TLS 1.1, SHA-256 for TLS 1.2. The signature algorithm
//! follows from the public key of the certificate in use.

use std::sync::Arc;

use tlsauth_crypto::{CryptoProvider, SignatureAlgorithm};

use crate::error::{Error, Result};
use crate::messages::CertificateVerify;
use crate::protocol::{ProtocolVersion, PublicKeyAlgorithm};
use crate::session::Session;
use crate::x509::parse_certificate;

/// Result of a [`SignCallback`]: the raw signature.
pub type SignResult = std::result::Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>>;

/// Application signing hook: leaf certificate, algorithm, digest to sign.
///
/// Lets the private key live outside the process, e.g. on a smartcard.
pub type SignCallback = Arc<dyn Fn(&[u8], SignatureAlgorithm, &[u8]) -> SignResult + Send + Sync>;

/// Length of the SHA-1 part that DSA signs.
const SHA1_LEN: usize = 20;

/// Signature algorithm for a key type on a protocol version.
pub fn signature_algorithm(
    version: ProtocolVersion,
    public_key_algorithm: PublicKeyAlgorithm,
) -> SignatureAlgorithm {
    match (public_key_algorithm, version) {
        (PublicKeyAlgorithm::Rsa, ProtocolVersion::Tls12) => SignatureAlgorithm::RsaPkcs1Sha256,
        (PublicKeyAlgorithm::Rsa, _) => SignatureAlgorithm::RsaPkcs1Md5Sha1,
        (PublicKeyAlgorithm::Dsa, _) => SignatureAlgorithm::DsaSha1,
    }
}

/// The part of the transcript digest `algorithm` signs.
fn signed_digest(algorithm: SignatureAlgorithm, digest: &[u8]) -> &[u8] {
    // DSA signs only the SHA-1 half of MD5 ‖ SHA-1.
    if algorithm == SignatureAlgorithm::DsaSha1 && digest.len() > SHA1_LEN {
        &digest[digest.len() - SHA1_LEN..]
    } else {
        digest
    }
}

/// Sign the transcript digest with the selected credential.
///
/// Returns the encoded CertificateVerify body, or `None` when no
/// certificate was selected and there is nothing to prove.
pub fn generate_certificate_verify(
    session: &Session,
    provider: &dyn CryptoProvider,
    digest: &[u8],
) -> Result<Option<Vec<u8>>> {
    let Some(entry) = session.selected() else {
        tracing::debug!("no certificate selected, skipping CertificateVerify");
        return Ok(None);
    };

    let algorithm = signature_algorithm(session.version(), entry.public_key_algorithm());
    let digest = signed_digest(algorithm, digest);

    let signature = match session.sign_callback() {
        Some(callback) => callback(entry.leaf(), algorithm, digest).map_err(|e| {
            tracing::warn!(error = %e, "sign callback failed");
            Error::InternalError(format!("sign callback failed: {}", e))
        })?,
        None => provider
            .signature(algorithm)?
            .sign(entry.key().as_bytes(), digest)?,
    };

    tracing::debug!(
        algorithm = algorithm.name(),
        signature_len = signature.len(),
        "CertificateVerify signed"
    );
    CertificateVerify::new(signature).encode().map(Some)
}

/// Check a peer's CertificateVerify against its leaf certificate.
///
/// # Errors
///
/// - `InternalError` if no peer certificate was received
/// - `TruncatedMessage` / `InvalidMessage` for a malformed body
/// - `SignatureInvalid` if the signature does not match
pub fn verify_certificate_verify(
    session: &Session,
    provider: &dyn CryptoProvider,
    body: &[u8],
    digest: &[u8],
) -> Result<()> {
    let leaf = session
        .peer_certificates()
        .first()
        .ok_or_else(|| Error::InternalError("no peer certificate to verify against".into()))?;

    let message = CertificateVerify::decode(body)?;
    let parsed = parse_certificate(leaf)?;
    let algorithm = signature_algorithm(session.version(), parsed.require_public_key_algorithm()?);

    let verifier = provider.signature(algorithm)?;
    match verifier.verify(
        &parsed.public_key,
        signed_digest(algorithm, digest),
        &message.signature,
    ) {
        Ok(()) => {
            tracing::debug!(algorithm = algorithm.name(), "CertificateVerify accepted");
            Ok(())
        },
        Err(
            tlsauth_crypto::Error::SignatureVerificationFailed
            | tlsauth_crypto::Error::InvalidSignature,
        ) => {
            tracing::debug!(algorithm = algorithm.name(), "CertificateVerify rejected");
            Err(Error::SignatureInvalid)
        },
        Err(e) => Err(e.into()),
    }
}
