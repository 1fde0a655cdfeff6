//! Master Secret Known-Answer Tests
//!
//! Premaster 00..2f, client random a5 * 32, server random 5a * 32.

mod common;

use std::sync::Arc;

use common::init_tracing;
use tlsauth_core::handshake::generate_master;
use tlsauth_core::protocol::{ConnectionEnd, ProtocolVersion};
use tlsauth_core::{
    derive_master_secret, CertificateCredentials, Error, MasterSecret, OpaquePrfInput, Session,
    SessionConfig,
};
use tlsauth_crypto::CryptoProvider;
use tlsauth_crypto_rustcrypto::RustCryptoProvider;

const CLIENT_RANDOM: [u8; 32] = [0xA5; 32];
const SERVER_RANDOM: [u8; 32] = [0x5A; 32];

const TLS12_MASTER: [u8; 48] = [
    0xa0, 0xb1, 0x18, 0xb2, 0xf1, 0x06, 0xa8, 0x06, 0x06, 0x45, 0x8c, 0xa0, 0x81, 0x75, 0x4a, 0x68,
    0x32, 0x40, 0x2d, 0xef, 0x5c, 0x1b, 0x13, 0xf5, 0xee, 0x33, 0x09, 0xdd, 0x95, 0xfd, 0x43, 0xa3,
    0x41, 0xa2, 0xc6, 0x57, 0xfa, 0xe9, 0x9d, 0xef, 0x49, 0x21, 0xb4, 0xa0, 0x3c, 0x4f, 0xa6, 0x79,
];

const TLS10_MASTER: [u8; 48] = [
    0xb7, 0xd6, 0x66, 0xea, 0xd6, 0x08, 0x9d, 0xad, 0x0a, 0xd7, 0x46, 0x5f, 0x4e, 0x91, 0xce, 0x08,
    0xc8, 0x0d, 0x23, 0x21, 0x5d, 0x67, 0x89, 0x56, 0x6f, 0x3a, 0x2b, 0x35, 0xd0, 0xc5, 0xcb, 0x4a,
    0xf8, 0x01, 0xea, 0x84, 0xdc, 0xc7, 0xd6, 0x32, 0xe1, 0x66, 0x5d, 0xd2, 0xbd, 0x82, 0x45, 0x6c,
];

const SSL3_MASTER: [u8; 48] = [
    0x61, 0xd7, 0x3d, 0x52, 0x5b, 0x37, 0x47, 0xa2, 0xd3, 0xf3, 0x7f, 0x86, 0xc6, 0x0b, 0xf4, 0xb2,
    0x35, 0x14, 0xda, 0xcf, 0x65, 0xfd, 0xa8, 0xb5, 0xec, 0xe4, 0xbe, 0x30, 0x7d, 0x7b, 0x64, 0x82,
    0x82, 0xd8, 0x6e, 0x56, 0xf3, 0x65, 0xa4, 0x2a, 0xa1, 0xc9, 0xdc, 0xcd, 0xa4, 0x5d, 0xe3, 0xff,
];

/// Opaque PRF input "client opaque" / "server opaque".
const TLS12_OPRFI_MASTER: [u8; 48] = [
    0xcf, 0x60, 0xcf, 0x7c, 0x66, 0xa0, 0x67, 0xe8, 0x5b, 0xe8, 0x1b, 0x49, 0xad, 0x1c, 0x8c, 0x2d,
    0x94, 0xa9, 0xa9, 0x51, 0x56, 0xec, 0x4a, 0xb9, 0xb9, 0x91, 0xcf, 0x8d, 0x00, 0x8c, 0x89, 0x11,
    0x3e, 0x36, 0x2d, 0xc0, 0xd5, 0xe9, 0x7f, 0xa9, 0x90, 0x8d, 0x5c, 0xa3, 0xe0, 0xde, 0xdf, 0x12,
];

const TLS10_OPRFI_MASTER: [u8; 48] = [
    0xc5, 0x17, 0xa1, 0xe0, 0xc6, 0x1f, 0x26, 0x2d, 0x34, 0x3b, 0x20, 0xf0, 0x1c, 0x72, 0x7a, 0x11,
    0x02, 0xf7, 0x29, 0x8c, 0x08, 0xf0, 0xd5, 0x3d, 0xef, 0x32, 0x06, 0xb2, 0xaf, 0x05, 0x27, 0xf2,
    0x62, 0x19, 0x6c, 0x7e, 0xab, 0x0c, 0x19, 0x8b, 0x89, 0x73, 0x9c, 0x0b, 0x7e, 0x0b, 0x3c, 0x86,
];

fn premaster() -> Vec<u8> {
    (0..48).collect()
}

fn oprfi() -> OpaquePrfInput {
    OpaquePrfInput::new(b"client opaque".to_vec(), b"server opaque".to_vec())
}

fn derive(version: ProtocolVersion, opaque: Option<&OpaquePrfInput>) -> [u8; 48] {
    let provider = RustCryptoProvider::new();
    let master = derive_master_secret(
        &provider,
        version,
        &premaster(),
        &CLIENT_RANDOM,
        &SERVER_RANDOM,
        opaque,
    )
    .unwrap();
    *master.as_bytes()
}

fn session(version: ProtocolVersion) -> Session {
    let mut session = Session::new(
        SessionConfig::default(),
        version,
        ConnectionEnd::Client,
        Arc::new(CertificateCredentials::builder().build().unwrap()),
    );
    session.set_randoms(CLIENT_RANDOM, SERVER_RANDOM);
    session.set_premaster(premaster());
    session
}

#[test]
fn test_tls12_master_secret() {
    assert_eq!(derive(ProtocolVersion::Tls12, None), TLS12_MASTER);
}

/// TLS 1.0 and 1.1 share the MD5/SHA-1 PRF.
#[test]
fn test_tls10_tls11_master_secret() {
    assert_eq!(derive(ProtocolVersion::Tls10, None), TLS10_MASTER);
    assert_eq!(derive(ProtocolVersion::Tls11, None), TLS10_MASTER);
}

#[test]
fn test_ssl3_master_secret() {
    assert_eq!(derive(ProtocolVersion::Ssl3, None), SSL3_MASTER);
}

#[test]
fn test_opaque_prf_input_salts_seed() {
    assert_eq!(derive(ProtocolVersion::Tls12, Some(&oprfi())), TLS12_OPRFI_MASTER);
    assert_eq!(derive(ProtocolVersion::Tls10, Some(&oprfi())), TLS10_OPRFI_MASTER);
}

/// SSL 3.0 has no place for opaque PRF input.
#[test]
fn test_ssl3_ignores_opaque_prf_input() {
    assert_eq!(derive(ProtocolVersion::Ssl3, Some(&oprfi())), SSL3_MASTER);
}

/// The session derives from its own randoms and wipes the premaster.
#[test]
fn test_session_generate_master() {
    init_tracing();
    let provider = RustCryptoProvider::new();
    let mut session = session(ProtocolVersion::Tls12);

    generate_master(&mut session, &provider, false).unwrap();

    assert_eq!(session.master_secret().unwrap().as_bytes(), &TLS12_MASTER);
    assert_eq!(session.inner_secret(), session.master_secret());
    assert!(session.premaster().is_none());

    // Nothing left to derive from.
    assert!(matches!(
        generate_master(&mut session, &provider, false),
        Err(Error::InternalError(_))
    ));
    assert_eq!(session.master_secret().unwrap().as_bytes(), &TLS12_MASTER);
}

#[test]
fn test_session_keeps_premaster_on_request() {
    let provider = RustCryptoProvider::new();
    let mut session = session(ProtocolVersion::Tls11);
    session.set_opaque_prf_input(oprfi());

    generate_master(&mut session, &provider, true).unwrap();

    assert_eq!(session.premaster(), Some(premaster().as_slice()));
    assert_eq!(session.master_secret().unwrap().as_bytes(), &TLS10_OPRFI_MASTER);
}

/// A resumed session keeps the master secret it resumed with.
#[test]
fn test_resumed_session_skips_derivation() {
    let provider = RustCryptoProvider::new();
    let mut session = session(ProtocolVersion::Tls12);
    let resumed = MasterSecret::from_bytes([0x11; 48]);

    session.resume(resumed.clone());
    generate_master(&mut session, &provider, false).unwrap();

    assert!(session.is_resumed());
    assert_eq!(session.master_secret(), Some(&resumed));
}
