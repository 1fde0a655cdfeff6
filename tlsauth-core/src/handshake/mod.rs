//! Certificate authentication steps of the SSL/TLS handshake.
//!
//! These shims sequence the certificate messages against an external
//! record layer reached through [`HandshakeIo`]. Each is a no-op when the
//! negotiated key exchange does not use certificates.
//!
//! ```text
//! Client                                              Server
//!
//!                                    send_server_certificate
//! recv_server_certificate           <--------  Certificate
//!                             send_server_certificate_request
//! recv_server_certificate_request   <--------  CertificateRequest
//!
//! send_client_certificate   Certificate  -------->  recv_client_certificate
//! generate_master                                  generate_master
//! send_client_certificate_verify
//!                     CertificateVerify  -------->  recv_client_certificate_verify
//! ```

pub mod client;
pub mod server;

// Re-exports
pub use client::{
    recv_server_certificate, recv_server_certificate_request, send_client_certificate,
    send_client_certificate_verify,
};
pub use server::{
    recv_client_certificate, recv_client_certificate_verify, send_server_certificate,
    send_server_certificate_request,
};

use tlsauth_crypto::CryptoProvider;

use crate::error::{AlertDescription, AlertLevel, Error, Result};
use crate::messages::decode_certificate_list;
use crate::protocol::{ConnectionEnd, HandshakeType, KeyUsage, ProtocolVersion};
use crate::session::Session;
use crate::x509::parse_certificate;

/// Handshake message transport provided by the record layer.
///
/// Bodies exchanged here exclude the 4-byte handshake header.
pub trait HandshakeIo {
    /// Send one handshake message.
    fn send_handshake(&mut self, msg_type: HandshakeType, body: &[u8]) -> Result<()>;

    /// Receive the next handshake message, which must be of `msg_type`.
    ///
    /// When `required` is false and the peer sent a different message
    /// instead, returns `Ok(None)` and leaves that message for the next
    /// call. Alerts from the peer surface as [`Error::AlertReceived`].
    fn recv_handshake(&mut self, msg_type: HandshakeType, required: bool) -> Result<Option<Vec<u8>>>;

    /// Send an alert.
    fn send_alert(&mut self, level: AlertLevel, description: AlertDescription) -> Result<()>;
}

/// Decode and check a peer Certificate body, then record the chain.
///
/// The leaf's key usage must allow what this side needs from it: for a
/// server certificate, what the key exchange requires; for a client
/// certificate, signing.
///
/// # Errors
///
/// - `NoCertificateFound` for an empty body or an empty list
/// - `CertificateParse` if any certificate fails to decode
/// - `KeyUsageViolation` if the leaf's key usage forbids its role
pub fn process_peer_certificate(session: &mut Session, body: &[u8]) -> Result<()> {
    if body.is_empty() {
        return Err(Error::NoCertificateFound);
    }

    let chain = decode_certificate_list(body)?;
    let parsed = chain
        .iter()
        .map(|der| parse_certificate(der))
        .collect::<Result<Vec<_>>>()?;
    let Some(leaf) = parsed.first() else {
        tracing::debug!("peer sent an empty certificate list");
        return Err(Error::NoCertificateFound);
    };

    let required = match session.entity() {
        ConnectionEnd::Client => session.key_exchange().required_server_key_usage(),
        ConnectionEnd::Server => Some(KeyUsage::DigitalSignature),
    };
    if let Some(usage) = required {
        if !leaf.allows(usage) {
            tracing::warn!(
                usage = ?usage,
                key_exchange = session.key_exchange().name(),
                "peer certificate key usage forbids its role"
            );
            return Err(Error::KeyUsageViolation);
        }
    }

    tracing::debug!(chain_len = chain.len(), "peer certificate accepted");
    session.set_peer_certificates(chain);
    Ok(())
}

/// Derive the session's master secret once the premaster is known.
///
/// Does nothing for a resumed session. The premaster secret is wiped
/// afterwards, whether derivation succeeded or not, unless `keep_premaster`
/// is set. The master secret is only replaced on success.
///
/// # Errors
///
/// - `InternalError` if no premaster secret was set
/// - `DerivationFailed` if the PRF fails
pub fn generate_master(
    session: &mut Session,
    provider: &dyn CryptoProvider,
    keep_premaster: bool,
) -> Result<()> {
    let path = if session.is_resumed() {
        "resumed"
    } else if session.version() == ProtocolVersion::Ssl3 {
        "ssl3"
    } else if session.opaque_prf_input().is_some_and(|input| input.is_complete()) {
        "prf with opaque input"
    } else {
        "prf"
    };
    tracing::debug!(
        entity = ?session.entity(),
        version = session.version().name(),
        path,
        "generating master secret"
    );

    session.generate_master(provider, keep_premaster)
}
