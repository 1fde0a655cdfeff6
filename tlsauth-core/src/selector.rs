//! Certificate selection.
//!
//! Which local credential a session authenticates with is decided by a
//! [`CertificateSelector`] stored in the [`CertificateCredentials`]:
//!
//! - [`HeuristicSelector`] matches the store against what the peer asked
//!   for (issuer names, public-key algorithms).
//! - [`CallbackSelector`] hands the decision to application closures and
//!   falls back to the heuristic for a role without a closure.
//!
//! Selectors return `Ok(None)` when nothing fits; whether that is fatal is
//! the caller's decision.

use std::sync::Arc;

use crate::credentials::{CertificateCredentials, CredentialEntry};
use crate::error::{Error, Result};
use crate::messages::CertificateRequest;
use crate::protocol::{CertificateType, PublicKeyAlgorithm};

/// Result of an application selection closure.
///
/// `Ok(None)` declines to authenticate; an `Err` aborts the handshake.
pub type CallbackResult =
    std::result::Result<Option<Arc<CredentialEntry>>, Box<dyn std::error::Error + Send + Sync>>;

/// Client-side selection closure: store, requested issuer names, accepted algorithms.
pub type ClientSelectCallback = Arc<
    dyn Fn(&CertificateCredentials, &[Vec<u8>], &[PublicKeyAlgorithm]) -> CallbackResult
        + Send
        + Sync,
>;

/// Server-side selection closure: store, required algorithm (`None` for any).
pub type ServerSelectCallback =
    Arc<dyn Fn(&CertificateCredentials, Option<PublicKeyAlgorithm>) -> CallbackResult + Send + Sync>;

/// What the peer's CertificateRequest allows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeerConstraints {
    /// Accepted public-key algorithms, in peer order.
    pub algorithms: Vec<PublicKeyAlgorithm>,
    /// Acceptable issuer names (raw DER), in peer order.
    pub issuers: Vec<Vec<u8>>,
}

impl PeerConstraints {
    /// Create constraints from their parts.
    pub fn new(algorithms: Vec<PublicKeyAlgorithm>, issuers: Vec<Vec<u8>>) -> Self {
        Self {
            algorithms,
            issuers,
        }
    }

    /// Whether `algorithm` is accepted by the peer.
    pub fn accepts(&self, algorithm: PublicKeyAlgorithm) -> bool {
        self.algorithms.contains(&algorithm)
    }
}

impl From<CertificateRequest> for PeerConstraints {
    fn from(request: CertificateRequest) -> Self {
        Self {
            algorithms: request
                .certificate_types
                .iter()
                .map(|t| t.public_key_algorithm())
                .collect(),
            issuers: request.issuers,
        }
    }
}

/// Strategy choosing the credential a session authenticates with.
pub trait CertificateSelector: Send + Sync + std::fmt::Debug {
    /// Pick the certificate answering a server's CertificateRequest.
    fn select_client(
        &self,
        store: &CertificateCredentials,
        constraints: &PeerConstraints,
        certificate_type: CertificateType,
    ) -> Result<Option<Arc<CredentialEntry>>>;

    /// Pick the server certificate for the negotiated key exchange.
    ///
    /// `requested` is the public-key algorithm the key exchange needs, or
    /// `None` when any will do.
    fn select_server(
        &self,
        store: &CertificateCredentials,
        requested: Option<PublicKeyAlgorithm>,
        certificate_type: CertificateType,
    ) -> Result<Option<Arc<CredentialEntry>>>;
}

/// Matches the store against the peer's requirements.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicSelector;

impl CertificateSelector for HeuristicSelector {
    fn select_client(
        &self,
        store: &CertificateCredentials,
        constraints: &PeerConstraints,
        certificate_type: CertificateType,
    ) -> Result<Option<Arc<CredentialEntry>>> {
        if certificate_type != CertificateType::X509 {
            return Ok(None);
        }

        // Peer preference first, then store order.
        let found = constraints.issuers.iter().find_map(|issuer| {
            store.entries().iter().find(|entry| {
                entry.issuer() == issuer.as_slice()
                    && constraints.accepts(entry.public_key_algorithm())
            })
        });

        match found {
            Some(entry) => {
                tracing::debug!(
                    algorithm = entry.public_key_algorithm().name(),
                    chain_len = entry.chain().len(),
                    "client certificate matched requested issuer"
                );
                Ok(Some(Arc::clone(entry)))
            },
            None => {
                tracing::debug!(
                    issuers = constraints.issuers.len(),
                    entries = store.len(),
                    "no client certificate matches the request"
                );
                Ok(None)
            },
        }
    }

    fn select_server(
        &self,
        store: &CertificateCredentials,
        requested: Option<PublicKeyAlgorithm>,
        certificate_type: CertificateType,
    ) -> Result<Option<Arc<CredentialEntry>>> {
        let found = store.entries().iter().find(|entry| {
            requested.map_or(true, |algorithm| entry.public_key_algorithm() == algorithm)
                && entry.certificate_type() == certificate_type
        });

        tracing::debug!(
            requested = requested.map(|a| a.name()),
            found = found.is_some(),
            "server certificate selection"
        );
        Ok(found.cloned())
    }
}

/// Delegates selection to application closures.
#[derive(Clone, Default)]
pub struct CallbackSelector {
    client: Option<ClientSelectCallback>,
    server: Option<ServerSelectCallback>,
}

impl std::fmt::Debug for CallbackSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackSelector")
            .field("client", &self.client.is_some())
            .field("server", &self.server.is_some())
            .finish()
    }
}

impl CallbackSelector {
    /// Create a selector; a missing closure falls back to [`HeuristicSelector`].
    pub fn new(client: Option<ClientSelectCallback>, server: Option<ServerSelectCallback>) -> Self {
        Self { client, server }
    }

    fn check(
        result: CallbackResult,
        certificate_type: CertificateType,
    ) -> Result<Option<Arc<CredentialEntry>>> {
        let selected = result.map_err(|e| {
            tracing::warn!(error = %e, "certificate selection callback failed");
            Error::InternalError(format!("certificate selection callback failed: {}", e))
        })?;

        match selected {
            Some(entry) if entry.certificate_type() != certificate_type => {
                Err(Error::InvalidRequest(format!(
                    "callback returned a {:?} certificate, {:?} was negotiated",
                    entry.certificate_type(),
                    certificate_type
                )))
            },
            other => Ok(other),
        }
    }
}

impl CertificateSelector for CallbackSelector {
    fn select_client(
        &self,
        store: &CertificateCredentials,
        constraints: &PeerConstraints,
        certificate_type: CertificateType,
    ) -> Result<Option<Arc<CredentialEntry>>> {
        let Some(callback) = &self.client else {
            return HeuristicSelector.select_client(store, constraints, certificate_type);
        };

        // Issuer names only mean something for X.509.
        let issuers: &[Vec<u8>] = if certificate_type == CertificateType::X509 {
            &constraints.issuers
        } else {
            &[]
        };
        Self::check(
            callback(store, issuers, &constraints.algorithms),
            certificate_type,
        )
    }

    fn select_server(
        &self,
        store: &CertificateCredentials,
        requested: Option<PublicKeyAlgorithm>,
        certificate_type: CertificateType,
    ) -> Result<Option<Arc<CredentialEntry>>> {
        let Some(callback) = &self.server else {
            return HeuristicSelector.select_server(store, requested, certificate_type);
        };
        Self::check(callback(store, requested), certificate_type)
    }
}
