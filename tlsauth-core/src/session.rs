//! Per-connection authentication state.
//!
//! A [`Session`] is owned by one handshake and passed by `&mut` into every
//! step. It holds an `Arc` handle to the selected credential (never a copy
//! of the key) and owns the premaster and master secrets, which are wiped
//! when dropped.

use std::sync::Arc;

use tlsauth_crypto::CryptoProvider;
use zeroize::Zeroizing;

use crate::cert_verify::SignCallback;
use crate::credentials::{CertificateCredentials, CredentialEntry};
use crate::error::{Error, Result};
use crate::kx::{derive_master_secret, MasterSecret, OpaquePrfInput, RANDOM_LEN};
use crate::protocol::{
    CertificateType, ConnectionEnd, KeyExchangeAlgorithm, PublicKeyAlgorithm, ProtocolVersion,
};
use crate::selector::PeerConstraints;
use crate::x509::{parse_certificate, CertificateDer};
use crate::SessionConfig;

/// Certificate authentication state of one connection.
pub struct Session {
    config: SessionConfig,
    version: ProtocolVersion,
    entity: ConnectionEnd,
    key_exchange: KeyExchangeAlgorithm,
    credentials: Arc<CertificateCredentials>,
    selected: Option<Arc<CredentialEntry>>,
    certificate_requested: bool,
    peer_certificates: Vec<CertificateDer>,
    client_random: [u8; RANDOM_LEN],
    server_random: [u8; RANDOM_LEN],
    opaque_prf_input: Option<OpaquePrfInput>,
    premaster: Option<Zeroizing<Vec<u8>>>,
    master_secret: Option<MasterSecret>,
    inner_secret: Option<MasterSecret>,
    resumed: bool,
    sign_callback: Option<SignCallback>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("version", &self.version)
            .field("entity", &self.entity)
            .field("key_exchange", &self.key_exchange)
            .field("selected", &self.selected.is_some())
            .field("certificate_requested", &self.certificate_requested)
            .field("peer_certificates", &self.peer_certificates.len())
            .field("has_premaster", &self.premaster.is_some())
            .field("has_master_secret", &self.master_secret.is_some())
            .field("resumed", &self.resumed)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session for one side of a connection.
    pub fn new(
        config: SessionConfig,
        version: ProtocolVersion,
        entity: ConnectionEnd,
        credentials: Arc<CertificateCredentials>,
    ) -> Self {
        Self {
            key_exchange: config.key_exchange,
            config,
            version,
            entity,
            credentials,
            selected: None,
            certificate_requested: false,
            peer_certificates: Vec::new(),
            client_random: [0; RANDOM_LEN],
            server_random: [0; RANDOM_LEN],
            opaque_prf_input: None,
            premaster: None,
            master_secret: None,
            inner_secret: None,
            resumed: false,
            sign_callback: None,
        }
    }

    /// Session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Negotiated protocol version.
    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    /// Which side this session plays.
    pub fn entity(&self) -> ConnectionEnd {
        self.entity
    }

    /// Negotiated certificate type.
    pub fn certificate_type(&self) -> CertificateType {
        self.config.certificate_type
    }

    /// Negotiated key exchange.
    pub fn key_exchange(&self) -> KeyExchangeAlgorithm {
        self.key_exchange
    }

    /// Record the key exchange of the negotiated cipher suite.
    pub fn set_key_exchange(&mut self, key_exchange: KeyExchangeAlgorithm) {
        self.key_exchange = key_exchange;
    }

    /// The credential store.
    pub fn credentials(&self) -> &Arc<CertificateCredentials> {
        &self.credentials
    }

    /// Pick the client certificate answering a CertificateRequest.
    ///
    /// The result replaces any earlier selection, which is released even
    /// when selection fails. `Ok(None)` means the client will answer with
    /// an empty Certificate.
    pub fn select_client_certificate(
        &mut self,
        constraints: &PeerConstraints,
    ) -> Result<Option<Arc<CredentialEntry>>> {
        self.selected = None;
        let selected = self.credentials.selector().select_client(
            &self.credentials,
            constraints,
            self.certificate_type(),
        )?;
        self.selected = selected.clone();
        Ok(selected)
    }

    /// Pick the server certificate; `requested` is the public-key
    /// algorithm the key exchange needs, `None` for any.
    ///
    /// Any earlier selection is released first.
    ///
    /// # Errors
    ///
    /// `InsufficientCredentials` when nothing matches.
    pub fn select_server_certificate(
        &mut self,
        requested: Option<PublicKeyAlgorithm>,
    ) -> Result<Arc<CredentialEntry>> {
        self.selected = None;
        self.selected = self.credentials.selector().select_server(
            &self.credentials,
            requested,
            self.certificate_type(),
        )?;
        self.selected.clone().ok_or_else(|| {
            tracing::debug!(
                requested = requested.map(|a| a.name()),
                "no server certificate for the requested algorithm"
            );
            Error::InsufficientCredentials
        })
    }

    /// The selected credential.
    ///
    /// # Errors
    ///
    /// `InsufficientCredentials` on the server side when nothing was
    /// selected. A client may legitimately have no certificate.
    pub fn selected_certificate(&self) -> Result<Option<&Arc<CredentialEntry>>> {
        match (self.entity, &self.selected) {
            (ConnectionEnd::Server, None) => Err(Error::InsufficientCredentials),
            (_, selected) => Ok(selected.as_ref()),
        }
    }

    /// The selected credential, if any, regardless of side.
    pub fn selected(&self) -> Option<&Arc<CredentialEntry>> {
        self.selected.as_ref()
    }

    /// Key exchanges the selected certificate can serve.
    ///
    /// Only certificate based exchanges are listed; an exchange is kept
    /// when the leaf key algorithm fits and its key usage allows it.
    pub fn supported_key_exchanges(&self) -> Vec<KeyExchangeAlgorithm> {
        let Some(entry) = &self.selected else {
            return Vec::new();
        };
        let leaf = match parse_certificate(entry.leaf()) {
            Ok(leaf) => leaf,
            Err(e) => {
                tracing::warn!(error = %e, "selected certificate no longer parses");
                return Vec::new();
            },
        };

        KeyExchangeAlgorithm::ALL
            .into_iter()
            .filter(|kx| kx.server_public_key_algorithm() == Some(entry.public_key_algorithm()))
            .filter(|kx| kx.required_server_key_usage().map_or(true, |usage| leaf.allows(usage)))
            .collect()
    }

    /// Whether a certificate exchange is under way: on the client, the
    /// server sent a CertificateRequest; on the server, the client sent a
    /// certificate.
    pub fn certificate_requested(&self) -> bool {
        self.certificate_requested
    }

    /// Mark that a certificate exchange is under way.
    pub fn set_certificate_requested(&mut self, requested: bool) {
        self.certificate_requested = requested;
    }

    /// The peer's certificate chain, leaf first.
    pub fn peer_certificates(&self) -> &[CertificateDer] {
        &self.peer_certificates
    }

    /// Record the peer's certificate chain.
    pub fn set_peer_certificates(&mut self, chain: Vec<CertificateDer>) {
        self.peer_certificates = chain;
    }

    /// ClientHello.random
    pub fn client_random(&self) -> &[u8; RANDOM_LEN] {
        &self.client_random
    }

    /// ServerHello.random
    pub fn server_random(&self) -> &[u8; RANDOM_LEN] {
        &self.server_random
    }

    /// Record both hello randoms.
    pub fn set_randoms(&mut self, client: [u8; RANDOM_LEN], server: [u8; RANDOM_LEN]) {
        self.client_random = client;
        self.server_random = server;
    }

    /// Record the negotiated opaque PRF input values.
    pub fn set_opaque_prf_input(&mut self, input: OpaquePrfInput) {
        self.opaque_prf_input = Some(input);
    }

    /// The negotiated opaque PRF input values.
    pub fn opaque_prf_input(&self) -> Option<&OpaquePrfInput> {
        self.opaque_prf_input.as_ref()
    }

    /// Hand over the premaster secret produced by the key exchange.
    pub fn set_premaster(&mut self, premaster: Vec<u8>) {
        self.premaster = Some(Zeroizing::new(premaster));
    }

    /// The premaster secret, while it is still held.
    pub fn premaster(&self) -> Option<&[u8]> {
        self.premaster.as_deref().map(Vec::as_slice)
    }

    /// Continue a previous session: the master secret is reused and
    /// [`generate_master`](crate::handshake::generate_master) becomes a no-op.
    pub fn resume(&mut self, master_secret: MasterSecret) {
        self.inner_secret = Some(master_secret.clone());
        self.master_secret = Some(master_secret);
        self.resumed = true;
    }

    /// True for a resumed session.
    pub fn is_resumed(&self) -> bool {
        self.resumed
    }

    /// The master secret once derived.
    pub fn master_secret(&self) -> Option<&MasterSecret> {
        self.master_secret.as_ref()
    }

    /// Internal copy of the master secret.
    pub fn inner_secret(&self) -> Option<&MasterSecret> {
        self.inner_secret.as_ref()
    }

    /// Install an application signing hook used instead of the stored key.
    pub fn set_sign_callback(&mut self, callback: SignCallback) {
        self.sign_callback = Some(callback);
    }

    /// The application signing hook.
    pub fn sign_callback(&self) -> Option<&SignCallback> {
        self.sign_callback.as_ref()
    }

    /// Derive the master secret from the premaster secret.
    ///
    /// Does nothing for a resumed session. The premaster secret is wiped
    /// afterwards, whether derivation succeeded or not, unless
    /// `keep_premaster` is set. The master secret is only replaced on
    /// success.
    ///
    /// # Errors
    ///
    /// - `InternalError` if no premaster secret was set
    /// - `DerivationFailed` if the PRF fails
    pub(crate) fn generate_master(
        &mut self,
        provider: &dyn CryptoProvider,
        keep_premaster: bool,
    ) -> Result<()> {
        if self.resumed {
            tracing::debug!("resumed session, keeping master secret");
            return Ok(());
        }

        let premaster = self
            .premaster
            .take()
            .ok_or_else(|| Error::InternalError("no premaster secret".into()))?;

        let derived = derive_master_secret(
            provider,
            self.version,
            &premaster,
            &self.client_random,
            &self.server_random,
            self.opaque_prf_input.as_ref(),
        );

        if keep_premaster {
            self.premaster = Some(premaster);
        }

        let master = derived?;
        tracing::debug!(version = self.version.name(), "master secret generated");
        self.inner_secret = Some(master.clone());
        self.master_secret = Some(master);
        Ok(())
    }
}
