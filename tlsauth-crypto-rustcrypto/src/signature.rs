//! RSA PKCS#1 v1.5 signatures using the RustCrypto `rsa` crate.

use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use tlsauth_crypto::{Error, Result, Signature, SignatureAlgorithm};

/// Create a signature instance for the specified algorithm.
pub fn create_signature(algorithm: SignatureAlgorithm) -> Result<Box<dyn Signature>> {
    match algorithm {
        SignatureAlgorithm::RsaPkcs1Md5Sha1 | SignatureAlgorithm::RsaPkcs1Sha256 => {
            Ok(Box::new(RsaPkcs1Sig { algorithm }))
        },
        SignatureAlgorithm::DsaSha1 => Err(Error::UnsupportedAlgorithm(format!(
            "{} is not provided by the RustCrypto backend",
            algorithm.name()
        ))),
    }
}

/// RSA PKCS#1 v1.5 over a precomputed digest.
///
/// `RsaPkcs1Md5Sha1` pads the 36-byte concatenated digest as is (no
/// DigestInfo), the SSL 3.0 to TLS 1.1 form. `RsaPkcs1Sha256` wraps a
/// SHA-256 digest in its DigestInfo, the TLS 1.2 form.
struct RsaPkcs1Sig {
    algorithm: SignatureAlgorithm,
}

impl RsaPkcs1Sig {
    fn padding(&self) -> Pkcs1v15Sign {
        match self.algorithm {
            SignatureAlgorithm::RsaPkcs1Sha256 => Pkcs1v15Sign::new::<sha2::Sha256>(),
            _ => Pkcs1v15Sign::new_unprefixed(),
        }
    }

    fn check_digest(&self, digest: &[u8]) -> Result<()> {
        if digest.len() != self.algorithm.digest_len() {
            return Err(Error::CryptoError(format!(
                "{} expects a {}-byte digest, got {}",
                self.algorithm.name(),
                self.algorithm.digest_len(),
                digest.len()
            )));
        }
        Ok(())
    }
}

/// Decode an RSA private key from PKCS#8 or PKCS#1 DER.
fn private_key_from_der(der: &[u8]) -> Result<RsaPrivateKey> {
    RsaPrivateKey::from_pkcs8_der(der)
        .or_else(|_| RsaPrivateKey::from_pkcs1_der(der))
        .map_err(|_| Error::InvalidPrivateKey)
}

/// Decode an RSA public key from the certificate's `subjectPublicKey`
/// (PKCS#1 `RSAPublicKey`), or from a full SubjectPublicKeyInfo.
fn public_key_from_der(der: &[u8]) -> Result<RsaPublicKey> {
    RsaPublicKey::from_pkcs1_der(der)
        .or_else(|_| RsaPublicKey::from_public_key_der(der))
        .map_err(|_| Error::InvalidPublicKey)
}

impl Signature for RsaPkcs1Sig {
    fn sign(&self, signing_key: &[u8], digest: &[u8]) -> Result<Vec<u8>> {
        self.check_digest(digest)?;
        let key = private_key_from_der(signing_key)?;
        key.sign(self.padding(), digest)
            .map_err(|e| Error::CryptoError(format!("RSA signing failed: {}", e)))
    }

    fn verify(&self, public_key: &[u8], digest: &[u8], signature: &[u8]) -> Result<()> {
        self.check_digest(digest)?;
        let key = public_key_from_der(public_key)?;
        key.verify(self.padding(), digest, signature)
            .map_err(|_| Error::SignatureVerificationFailed)
    }

    fn algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }
}
