//! Server side certificate steps.
//!
//! How hard the server insists on a client certificate is set by
//! [`CertificateRequestPolicy`]:
//!
//! | policy    | CertificateRequest | client Certificate | CertificateVerify   |
//! |-----------|--------------------|--------------------|---------------------|
//! | `Ignore`  | not sent           | not read           | not read            |
//! | `Request` | sent               | optional           | after a certificate |
//! | `Require` | sent               | mandatory          | mandatory           |
//!
//! A client certificate is only kept once its CertificateVerify checks
//! out; on any failure the recorded peer chain is dropped.

use tlsauth_crypto::CryptoProvider;

use super::{process_peer_certificate, HandshakeIo};
use crate::cert_verify::verify_certificate_verify;
use crate::error::{AlertDescription, AlertLevel, Error, Result};
use crate::messages::certificate_request::encode_server_request;
use crate::messages::encode_certificate_list;
use crate::protocol::{CertificateType, HandshakeType, ProtocolVersion};
use crate::session::Session;
use crate::CertificateRequestPolicy;

/// Send the selected server certificate chain.
///
/// # Errors
///
/// `InsufficientCredentials` if no certificate was selected.
pub fn send_server_certificate(io: &mut dyn HandshakeIo, session: &mut Session) -> Result<()> {
    if !session.key_exchange().uses_certificates() {
        return Ok(());
    }

    let chain = session
        .selected_certificate()?
        .map(|entry| entry.chain().to_vec())
        .ok_or(Error::InsufficientCredentials)?;
    tracing::debug!(chain_len = chain.len(), "sending server certificate");
    io.send_handshake(HandshakeType::Certificate, &encode_certificate_list(&chain)?)
}

/// Ask the client for a certificate, unless the policy is `Ignore`.
///
/// The trusted issuer list goes along unless the session ignores it or
/// the certificate type is not X.509.
pub fn send_server_certificate_request(
    io: &mut dyn HandshakeIo,
    session: &mut Session,
) -> Result<()> {
    if !session.key_exchange().uses_certificates()
        || session.config().certificate_request == CertificateRequestPolicy::Ignore
    {
        return Ok(());
    }

    let rdn_sequence = if session.certificate_type() == CertificateType::X509
        && !session.config().ignore_rdn_sequence
    {
        session.credentials().rdn_sequence()
    } else {
        &[]
    };
    let body = encode_server_request(session.version(), rdn_sequence)?;

    tracing::debug!(
        policy = ?session.config().certificate_request,
        rdn_len = rdn_sequence.len(),
        "requesting client certificate"
    );
    io.send_handshake(HandshakeType::CertificateRequest, &body)
}

/// Receive the client's Certificate according to the request policy.
///
/// With `Request`, a client that sends nothing, an empty list or (on SSL
/// 3.0) the `no_certificate` warning is let through unauthenticated. With
/// `Require`, any of these is `NoCertificateFound`.
pub fn recv_client_certificate(io: &mut dyn HandshakeIo, session: &mut Session) -> Result<()> {
    let mandatory = match session.config().certificate_request {
        CertificateRequestPolicy::Ignore => return Ok(()),
        CertificateRequestPolicy::Request => false,
        CertificateRequestPolicy::Require => true,
    };
    if !session.key_exchange().uses_certificates() {
        return Ok(());
    }

    let body = match io.recv_handshake(HandshakeType::Certificate, mandatory) {
        Ok(body) => body,
        Err(Error::AlertReceived {
            level: AlertLevel::Warning,
            description: AlertDescription::NoCertificate,
        }) if !mandatory && session.version() == ProtocolVersion::Ssl3 => {
            tracing::debug!("SSL 3.0 client has no certificate");
            return Ok(());
        },
        Err(Error::AlertReceived { level, description }) if mandatory => {
            tracing::debug!(?level, ?description, "client refused required certificate");
            return Err(Error::NoCertificateFound);
        },
        Err(e) => return Err(e),
    };

    let Some(body) = body else {
        if mandatory {
            return Err(Error::NoCertificateFound);
        }
        tracing::debug!("client sent no Certificate message");
        return Ok(());
    };

    match process_peer_certificate(session, &body) {
        Ok(()) => {
            // A CertificateVerify must follow.
            session.set_certificate_requested(true);
            Ok(())
        },
        Err(Error::NoCertificateFound) if !mandatory => {
            tracing::debug!("client sent an empty certificate list");
            Ok(())
        },
        Err(e) => Err(e),
    }
}

/// Receive and check the client's CertificateVerify.
///
/// Expected only after the client sent a certificate, and then mandatory
/// under either policy.
///
/// # Errors
///
/// - `NoCertificateFound` if the client sent a certificate but no
///   CertificateVerify
/// - `SignatureInvalid` if the signature does not match the certificate
pub fn recv_client_certificate_verify(
    io: &mut dyn HandshakeIo,
    session: &mut Session,
    provider: &dyn CryptoProvider,
    transcript_digest: &[u8],
) -> Result<()> {
    if session.config().certificate_request == CertificateRequestPolicy::Ignore
        || !session.certificate_requested()
    {
        return Ok(());
    }

    let result = match io.recv_handshake(HandshakeType::CertificateVerify, false) {
        Ok(Some(body)) => verify_certificate_verify(session, provider, &body, transcript_digest),
        Ok(None) => {
            tracing::warn!("client certificate without CertificateVerify");
            Err(Error::NoCertificateFound)
        },
        Err(e) => Err(e),
    };
    if result.is_err() {
        session.set_peer_certificates(Vec::new());
    }
    result
}
