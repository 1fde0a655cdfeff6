//! Certificate credential store.
//!
//! A [`CertificateCredentials`] value is assembled once with
//! [`CertificateCredentialsBuilder`] and then shared read-only between
//! sessions through an `Arc`. Each [`CredentialEntry`] caches the leaf
//! facts selection needs so the hot path never re-parses certificates.
//!
//! # Example
//!
//! ```rust,ignore
//! use tlsauth_core::credentials::CertificateCredentials;
//! use tlsauth_crypto::SigningKey;
//!
//! let store = CertificateCredentials::builder()
//!     .with_key_pair(vec![leaf_der, intermediate_der], SigningKey::from_bytes(key_der))
//!     .with_trusted_issuer(ca_der)
//!     .build()?;
//! ```

use std::sync::Arc;

use bytes::BufMut;
use tlsauth_crypto::SigningKey;

use crate::codec::put_u16_len;
use crate::error::{Error, Result};
use crate::protocol::{CertificateType, PublicKeyAlgorithm};
use crate::selector::{
    CallbackSelector, CertificateSelector, ClientSelectCallback, HeuristicSelector,
    ServerSelectCallback,
};
use crate::x509::{parse_certificate, CertificateDer};

/// One certificate chain together with the private key of its leaf.
#[derive(Debug)]
pub struct CredentialEntry {
    chain: Vec<CertificateDer>,
    key: SigningKey,
    public_key_algorithm: PublicKeyAlgorithm,
    issuer: Vec<u8>,
    certificate_type: CertificateType,
}

impl CredentialEntry {
    /// Create an entry from a leaf-first X.509 chain and the leaf's key.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if the chain is empty
    /// - `CertificateParse` if the leaf cannot be decoded
    /// - `UnsupportedAlgorithm` if the leaf key is neither RSA nor DSA
    pub fn new(chain: Vec<CertificateDer>, key: SigningKey) -> Result<Self> {
        let leaf = chain
            .first()
            .ok_or_else(|| Error::InvalidConfig("empty certificate chain".into()))?;
        let parsed = parse_certificate(leaf)?;
        let public_key_algorithm = parsed.require_public_key_algorithm()?;

        Ok(Self {
            chain,
            key,
            public_key_algorithm,
            issuer: parsed.issuer,
            certificate_type: CertificateType::X509,
        })
    }

    /// The chain, leaf first. Never empty.
    pub fn chain(&self) -> &[CertificateDer] {
        &self.chain
    }

    /// The leaf certificate.
    pub fn leaf(&self) -> &[u8] {
        // `new` refuses empty chains.
        self.chain.first().map(Vec::as_slice).unwrap_or_default()
    }

    /// Private key of the leaf.
    pub fn key(&self) -> &SigningKey {
        &self.key
    }

    /// Subject public-key algorithm of the leaf.
    pub fn public_key_algorithm(&self) -> PublicKeyAlgorithm {
        self.public_key_algorithm
    }

    /// Raw DER issuer name of the leaf.
    pub fn issuer(&self) -> &[u8] {
        &self.issuer
    }

    /// Certificate type of the chain.
    pub fn certificate_type(&self) -> CertificateType {
        self.certificate_type
    }
}

/// Local certificates, trusted issuer names and the selection strategy.
#[derive(Debug)]
pub struct CertificateCredentials {
    entries: Vec<Arc<CredentialEntry>>,
    trusted_issuers: Vec<Vec<u8>>,
    rdn_sequence: Vec<u8>,
    selector: Arc<dyn CertificateSelector>,
}

impl CertificateCredentials {
    /// Create a new credentials builder.
    pub fn builder() -> CertificateCredentialsBuilder {
        CertificateCredentialsBuilder::default()
    }

    /// Entries in the order they were added.
    pub fn entries(&self) -> &[Arc<CredentialEntry>] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the store holds no certificate.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Trusted issuer names, raw DER.
    pub fn trusted_issuers(&self) -> &[Vec<u8>] {
        &self.trusted_issuers
    }

    /// The trusted issuers as advertised in CertificateRequest:
    /// each name prefixed with its 16-bit length, without the outer length.
    pub fn rdn_sequence(&self) -> &[u8] {
        &self.rdn_sequence
    }

    /// The selection strategy.
    pub fn selector(&self) -> &dyn CertificateSelector {
        self.selector.as_ref()
    }
}

enum TrustedIssuer {
    Certificate(CertificateDer),
    Name(Vec<u8>),
}

/// Builder for [`CertificateCredentials`].
///
/// Certificates are only parsed by [`build`](Self::build), so a chain of
/// `with_*` calls stays infallible.
#[derive(Default)]
pub struct CertificateCredentialsBuilder {
    key_pairs: Vec<(Vec<CertificateDer>, SigningKey)>,
    trusted_issuers: Vec<TrustedIssuer>,
    client_callback: Option<ClientSelectCallback>,
    server_callback: Option<ServerSelectCallback>,
    selector: Option<Arc<dyn CertificateSelector>>,
}

impl std::fmt::Debug for CertificateCredentialsBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CertificateCredentialsBuilder")
            .field("key_pairs", &self.key_pairs.len())
            .field("trusted_issuers", &self.trusted_issuers.len())
            .field("client_callback", &self.client_callback.is_some())
            .field("server_callback", &self.server_callback.is_some())
            .field("selector", &self.selector)
            .finish()
    }
}

impl CertificateCredentialsBuilder {
    /// Add a leaf-first certificate chain and the leaf's private key.
    pub fn with_key_pair(mut self, chain: Vec<CertificateDer>, key: SigningKey) -> Self {
        self.key_pairs.push((chain, key));
        self
    }

    /// Trust the subject of a CA certificate.
    pub fn with_trusted_issuer(mut self, ca_certificate: CertificateDer) -> Self {
        self.trusted_issuers
            .push(TrustedIssuer::Certificate(ca_certificate));
        self
    }

    /// Trust an issuer given as raw DER name.
    pub fn with_trusted_issuer_name(mut self, name: Vec<u8>) -> Self {
        self.trusted_issuers.push(TrustedIssuer::Name(name));
        self
    }

    /// Let the application pick the client certificate.
    pub fn with_client_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&CertificateCredentials, &[Vec<u8>], &[PublicKeyAlgorithm])
                -> crate::selector::CallbackResult
            + Send
            + Sync
            + 'static,
    {
        self.client_callback = Some(Arc::new(callback));
        self
    }

    /// Let the application pick the server certificate.
    pub fn with_server_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&CertificateCredentials, Option<PublicKeyAlgorithm>) -> crate::selector::CallbackResult
            + Send
            + Sync
            + 'static,
    {
        self.server_callback = Some(Arc::new(callback));
        self
    }

    /// Use a custom selection strategy. Takes precedence over callbacks.
    pub fn with_selector(mut self, selector: Arc<dyn CertificateSelector>) -> Self {
        self.selector = Some(selector);
        self
    }

    /// Forget every key pair added so far.
    pub fn clear_key_pairs(mut self) -> Self {
        self.key_pairs.clear();
        self
    }

    /// Forget every trusted issuer added so far.
    pub fn clear_trusted_issuers(mut self) -> Self {
        self.trusted_issuers.clear();
        self
    }

    /// Parse the certificates and build the store.
    pub fn build(self) -> Result<CertificateCredentials> {
        let entries = self
            .key_pairs
            .into_iter()
            .map(|(chain, key)| CredentialEntry::new(chain, key).map(Arc::new))
            .collect::<Result<Vec<_>>>()?;

        let trusted_issuers = self
            .trusted_issuers
            .into_iter()
            .map(|issuer| match issuer {
                TrustedIssuer::Certificate(der) => parse_certificate(&der).map(|c| c.subject),
                TrustedIssuer::Name(name) => Ok(name),
            })
            .collect::<Result<Vec<_>>>()?;

        let mut rdn_sequence = Vec::new();
        for name in &trusted_issuers {
            if name.is_empty() {
                return Err(Error::InvalidConfig("empty trusted issuer name".into()));
            }
            put_u16_len(&mut rdn_sequence, name.len())?;
            rdn_sequence.put_slice(name);
        }
        if rdn_sequence.len() > usize::from(u16::MAX) {
            return Err(Error::InvalidConfig(format!(
                "trusted issuer list of {} bytes does not fit in a CertificateRequest",
                rdn_sequence.len()
            )));
        }

        let selector: Arc<dyn CertificateSelector> = match self.selector {
            Some(selector) => selector,
            None if self.client_callback.is_some() || self.server_callback.is_some() => Arc::new(
                CallbackSelector::new(self.client_callback, self.server_callback),
            ),
            None => Arc::new(HeuristicSelector),
        };

        tracing::debug!(
            entries = entries.len(),
            trusted_issuers = trusted_issuers.len(),
            selector = ?selector,
            "certificate credentials built"
        );

        Ok(CertificateCredentials {
            entries,
            trusted_issuers,
            rdn_sequence,
            selector,
        })
    }
}
