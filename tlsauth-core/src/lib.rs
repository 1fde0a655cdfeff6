//! # tlsauth core
//!
//! Certificate authentication and master secret derivation for the
//! SSL 3.0 / TLS 1.0-1.2 handshake.
//!
//! This crate covers the part of the handshake between key exchange and
//! Finished:
//! - Certificate, CertificateRequest and CertificateVerify wire formats
//! - Credential storage and certificate selection (heuristic or callback)
//! - CertificateVerify signing and verification
//! - SSL 3.0 and TLS PRF based master secret derivation
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │   handshake orchestration / record I/O  │
//! └─────────────────┬───────────────────────┘
//!                   │ HandshakeIo
//! ┌─────────────────▼───────────────────────┐
//! │       tlsauth-core (this crate)         │
//! │  ┌──────────────────────────────────┐   │
//! │  │   handshake shims (client/server)│   │
//! │  ├──────────────────────────────────┤   │
//! │  │   session, selector, credentials │   │
//! │  ├──────────────────────────────────┤   │
//! │  │   messages, codec                │   │
//! │  ├──────────────────────────────────┤   │
//! │  │   cert_verify, kx, prf           │   │
//! │  └──────────────────────────────────┘   │
//! └─────────────────┬───────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────┐
//! │     tlsauth-crypto (trait interface)    │
//! └─────────────────────────────────────────┘
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    unused_qualifications
)]
#![forbid(unsafe_code)]

// Re-export crypto interface
pub use tlsauth_crypto;

// Core modules
pub mod cert_verify;
pub mod codec;
pub mod credentials;
pub mod error;
pub mod handshake;
pub mod kx;
pub mod messages;
pub mod prf;
pub mod protocol;
pub mod selector;
pub mod session;
pub mod x509;

#[cfg(test)]
mod test_fixtures;

// Re-exports
pub use cert_verify::{SignCallback, SignResult};
pub use credentials::{CertificateCredentials, CertificateCredentialsBuilder, CredentialEntry};
pub use error::{AlertDescription, AlertLevel, Error, Result};
pub use handshake::HandshakeIo;
pub use kx::{derive_master_secret, MasterSecret, OpaquePrfInput};
pub use protocol::{
    CertificateType, ConnectionEnd, KeyExchangeAlgorithm, ProtocolVersion, PublicKeyAlgorithm,
};
pub use selector::{CallbackResult, CertificateSelector, PeerConstraints};
pub use session::Session;

/// How a server asks for client certificates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CertificateRequestPolicy {
    /// Never send a CertificateRequest.
    #[default]
    Ignore,
    /// Ask for a certificate; continue without one.
    Request,
    /// Ask for a certificate; fail the handshake without one.
    Require,
}

/// Per-session configuration.
///
/// # Example
///
/// ```rust
/// use tlsauth_core::{CertificateRequestPolicy, KeyExchangeAlgorithm, SessionConfig};
///
/// let config = SessionConfig::builder()
///     .with_certificate_request(CertificateRequestPolicy::Require)
///     .with_key_exchange(KeyExchangeAlgorithm::DheRsa)
///     .build()
///     .unwrap();
/// assert!(!config.ignore_rdn_sequence);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Server policy for client certificates
    pub certificate_request: CertificateRequestPolicy,

    /// Omit the trusted issuer list from CertificateRequest
    pub ignore_rdn_sequence: bool,

    /// Negotiated certificate type
    pub certificate_type: CertificateType,

    /// Key exchange of the negotiated cipher suite
    pub key_exchange: KeyExchangeAlgorithm,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            certificate_request: CertificateRequestPolicy::Ignore,
            ignore_rdn_sequence: false,
            certificate_type: CertificateType::X509,
            key_exchange: KeyExchangeAlgorithm::Rsa,
        }
    }
}

impl SessionConfig {
    /// Create a new configuration builder.
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }
}

/// Configuration builder for a session.
#[derive(Debug, Default)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    /// Set the client certificate policy.
    pub fn with_certificate_request(mut self, policy: CertificateRequestPolicy) -> Self {
        self.config.certificate_request = policy;
        self
    }

    /// Leave the trusted issuer list out of CertificateRequest.
    pub fn with_ignore_rdn_sequence(mut self, ignore: bool) -> Self {
        self.config.ignore_rdn_sequence = ignore;
        self
    }

    /// Set the negotiated certificate type.
    pub fn with_certificate_type(mut self, certificate_type: CertificateType) -> Self {
        self.config.certificate_type = certificate_type;
        self
    }

    /// Set the key exchange of the negotiated cipher suite.
    pub fn with_key_exchange(mut self, key_exchange: KeyExchangeAlgorithm) -> Self {
        self.config.key_exchange = key_exchange;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<SessionConfig> {
        if self.config.certificate_type == CertificateType::OpenPgp {
            return Err(Error::InvalidConfig(
                "OpenPGP certificates are not supported".into(),
            ));
        }

        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.certificate_request, CertificateRequestPolicy::Ignore);
        assert!(!config.ignore_rdn_sequence);
        assert_eq!(config.certificate_type, CertificateType::X509);
        assert_eq!(config.key_exchange, KeyExchangeAlgorithm::Rsa);
    }

    #[test]
    fn test_config_builder() {
        let config = SessionConfig::builder()
            .with_certificate_request(CertificateRequestPolicy::Request)
            .with_ignore_rdn_sequence(true)
            .with_key_exchange(KeyExchangeAlgorithm::DheDss)
            .build()
            .unwrap();

        assert_eq!(config.certificate_request, CertificateRequestPolicy::Request);
        assert!(config.ignore_rdn_sequence);
        assert_eq!(config.key_exchange, KeyExchangeAlgorithm::DheDss);
    }

    #[test]
    fn test_config_validation() {
        let result = SessionConfig::builder()
            .with_certificate_type(CertificateType::OpenPgp)
            .build();
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }
}
