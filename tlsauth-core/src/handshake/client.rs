//! Client side certificate steps.
//!
//! ```text
//! recv_server_certificate            Certificate        (mandatory)
//! recv_server_certificate_request    CertificateRequest (optional)
//! send_client_certificate            Certificate, or the SSL 3.0
//!                                    no_certificate alert
//! send_client_certificate_verify     CertificateVerify  (if we signed)
//! ```

use tlsauth_crypto::CryptoProvider;

use super::{process_peer_certificate, HandshakeIo};
use crate::cert_verify::generate_certificate_verify;
use crate::error::{AlertDescription, AlertLevel, Error, Result};
use crate::messages::{encode_certificate_list, CertificateRequest};
use crate::protocol::{ConnectionEnd, HandshakeType, ProtocolVersion};
use crate::selector::PeerConstraints;
use crate::session::Session;

/// Receive and check the server's Certificate.
pub fn recv_server_certificate(io: &mut dyn HandshakeIo, session: &mut Session) -> Result<()> {
    if !session.key_exchange().uses_certificates() {
        return Ok(());
    }

    let body = io
        .recv_handshake(HandshakeType::Certificate, true)?
        .ok_or(Error::NoCertificateFound)?;
    process_peer_certificate(session, &body)
}

/// Receive an optional CertificateRequest and pick the certificate to answer with.
///
/// A request with nothing matching is not an error: the client will send
/// an empty Certificate.
pub fn recv_server_certificate_request(
    io: &mut dyn HandshakeIo,
    session: &mut Session,
) -> Result<()> {
    if !session.key_exchange().uses_certificates() {
        return Ok(());
    }

    let Some(body) = io.recv_handshake(HandshakeType::CertificateRequest, false)? else {
        tracing::trace!("server did not request a certificate");
        return Ok(());
    };

    let request = CertificateRequest::decode(&body, session.version())?;
    let constraints = PeerConstraints::from(request);
    let selected = session.select_client_certificate(&constraints)?;
    tracing::debug!(
        issuers = constraints.issuers.len(),
        selected = selected.is_some(),
        "certificate requested by server"
    );

    // A Certificate message is owed even when empty.
    session.set_certificate_requested(true);
    Ok(())
}

/// Send the client Certificate if the server asked for one.
///
/// SSL 3.0 has no empty Certificate: a client without a certificate sends
/// the `no_certificate` warning alert instead.
pub fn send_client_certificate(io: &mut dyn HandshakeIo, session: &mut Session) -> Result<()> {
    if !session.certificate_requested() {
        return Ok(());
    }

    let chain = session.selected().map(|entry| entry.chain().to_vec());
    match chain {
        None if session.version() == ProtocolVersion::Ssl3 => {
            tracing::debug!("no client certificate, sending SSL 3.0 no_certificate alert");
            io.send_alert(AlertLevel::Warning, AlertDescription::NoCertificate)
        },
        chain => {
            let chain = chain.unwrap_or_default();
            tracing::debug!(chain_len = chain.len(), "sending client certificate");
            io.send_handshake(HandshakeType::Certificate, &encode_certificate_list(&chain)?)
        },
    }
}

/// Prove possession of the client key.
///
/// Sent only when a certificate was requested and one was selected.
pub fn send_client_certificate_verify(
    io: &mut dyn HandshakeIo,
    session: &Session,
    provider: &dyn CryptoProvider,
    transcript_digest: &[u8],
) -> Result<()> {
    if session.entity() == ConnectionEnd::Server || !session.certificate_requested() {
        return Ok(());
    }

    match generate_certificate_verify(session, provider, transcript_digest)? {
        Some(body) => io.send_handshake(HandshakeType::CertificateVerify, &body),
        None => Ok(()),
    }
}
