//! X.509 certificate facts needed for authentication.
//!
//! Certificates are decoded with `x509-parser`; this module only lifts out
//! what certificate selection and CertificateVerify need: the raw issuer
//! and subject names, the subject public key and its algorithm, and the
//! key usage extension. No chain validation happens here.

use crate::error::{Error, Result};
use crate::protocol::{KeyUsage, PublicKeyAlgorithm};

/// DER-encoded certificate as carried in a Certificate message.
pub type CertificateDer = Vec<u8>;

const OID_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";
const OID_DSA: &str = "1.2.840.10040.4.1";

/// The parts of a certificate this crate looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCertificate {
    /// Raw DER of the issuer Name.
    pub issuer: Vec<u8>,
    /// Raw DER of the subject Name.
    pub subject: Vec<u8>,
    /// Subject public-key algorithm, `None` if neither RSA nor DSA.
    pub public_key_algorithm: Option<PublicKeyAlgorithm>,
    /// Contents of the `subjectPublicKey` bit string.
    pub public_key: Vec<u8>,
    /// Key usage bits, `None` when the extension is absent.
    pub key_usage: Option<KeyUsageFlags>,
}

/// The key usage bits relevant to SSL/TLS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyUsageFlags {
    /// digitalSignature
    pub digital_signature: bool,
    /// keyEncipherment
    pub key_encipherment: bool,
}

impl ParsedCertificate {
    /// Whether the certificate may be used for `usage`.
    ///
    /// A certificate without a key usage extension allows every usage.
    pub fn allows(&self, usage: KeyUsage) -> bool {
        match (self.key_usage, usage) {
            (None, _) => true,
            (Some(flags), KeyUsage::DigitalSignature) => flags.digital_signature,
            (Some(flags), KeyUsage::KeyEncipherment) => flags.key_encipherment,
        }
    }

    /// The public-key algorithm, or `UnsupportedAlgorithm`.
    pub fn require_public_key_algorithm(&self) -> Result<PublicKeyAlgorithm> {
        self.public_key_algorithm
            .ok_or(Error::UnsupportedAlgorithm)
    }
}

/// Decode a DER certificate.
pub fn parse_certificate(der: &[u8]) -> Result<ParsedCertificate> {
    let (rest, cert) = x509_parser::parse_x509_certificate(der)
        .map_err(|e| Error::CertificateParse(e.to_string()))?;
    if !rest.is_empty() {
        return Err(Error::CertificateParse(format!(
            "{} bytes after certificate",
            rest.len()
        )));
    }

    let spki = cert.public_key();
    let public_key_algorithm = match spki.algorithm.algorithm.to_id_string().as_str() {
        OID_RSA_ENCRYPTION => Some(PublicKeyAlgorithm::Rsa),
        OID_DSA => Some(PublicKeyAlgorithm::Dsa),
        _ => None,
    };

    let key_usage = cert
        .key_usage()
        .map_err(|e| Error::CertificateParse(e.to_string()))?
        .map(|ext| KeyUsageFlags {
            digital_signature: ext.value.digital_signature(),
            key_encipherment: ext.value.key_encipherment(),
        });

    Ok(ParsedCertificate {
        issuer: cert.tbs_certificate.issuer.as_raw().to_vec(),
        subject: cert.tbs_certificate.subject.as_raw().to_vec(),
        public_key_algorithm,
        public_key: spki.subject_public_key.data.to_vec(),
        key_usage,
    })
}
