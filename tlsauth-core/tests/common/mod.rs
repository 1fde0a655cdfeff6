//! Shared fixtures and an in-memory transport for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Once;

use tlsauth_core::error::{AlertDescription, AlertLevel, Error, Result};
use tlsauth_core::protocol::HandshakeType;
use tlsauth_core::HandshakeIo;
use tlsauth_crypto::SigningKey;

macro_rules! fixture {
    ($name:literal) => {
        include_bytes!(concat!("../../../tlsauth-crypto-rustcrypto/tests/data/", $name))
    };
}

pub const CA_A_CERT: &[u8] = fixture!("ca-a.der");
pub const CA_B_CERT: &[u8] = fixture!("ca-b.der");
pub const CA_C_CERT: &[u8] = fixture!("ca-c.der");

pub const CLIENT_A_CERT: &[u8] = fixture!("client-a.der");
pub const CLIENT_A_KEY: &[u8] = fixture!("client-a.key.der");
pub const CLIENT_B_CERT: &[u8] = fixture!("client-b.der");
pub const CLIENT_B_KEY: &[u8] = fixture!("client-b.key.der");
pub const CLIENT_C_CERT: &[u8] = fixture!("client-c.der");
pub const CLIENT_C_KEY: &[u8] = fixture!("client-c.key.der");

pub const SERVER_CERT: &[u8] = fixture!("server.der");
pub const SERVER_KEY: &[u8] = fixture!("server.key.der");
pub const SERVER_SIGN_ONLY_CERT: &[u8] = fixture!("server-sign-only.der");

pub fn key(der: &[u8]) -> SigningKey {
    SigningKey::from_bytes(der.to_vec())
}

/// Route `tracing` output to the test harness once per binary.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A message travelling between the two ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flight {
    Handshake(HandshakeType, Vec<u8>),
    Alert(AlertLevel, AlertDescription),
}

/// One end of an in-memory record layer.
///
/// Sent messages queue in `outbox` until [`MemoryIo::deliver`] moves them
/// to the peer's `inbox`.
#[derive(Debug, Default)]
pub struct MemoryIo {
    pub outbox: VecDeque<Flight>,
    pub inbox: VecDeque<Flight>,
}

impl MemoryIo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move everything `self` sent into `peer`'s inbox.
    pub fn deliver(&mut self, peer: &mut MemoryIo) {
        peer.inbox.extend(self.outbox.drain(..));
    }
}

impl HandshakeIo for MemoryIo {
    fn send_handshake(&mut self, msg_type: HandshakeType, body: &[u8]) -> Result<()> {
        self.outbox.push_back(Flight::Handshake(msg_type, body.to_vec()));
        Ok(())
    }

    fn recv_handshake(&mut self, msg_type: HandshakeType, required: bool) -> Result<Option<Vec<u8>>> {
        let next = self.inbox.front().map(|flight| match flight {
            Flight::Handshake(found, _) => Ok(*found),
            Flight::Alert(level, description) => Err((*level, *description)),
        });

        match next {
            Some(Err((level, description))) => {
                self.inbox.pop_front();
                Err(Error::AlertReceived { level, description })
            },
            Some(Ok(found)) if found == msg_type => match self.inbox.pop_front() {
                Some(Flight::Handshake(_, body)) => Ok(Some(body)),
                _ => Ok(None),
            },
            Some(Ok(found)) if required => Err(Error::UnexpectedMessage(format!(
                "expected {:?}, got {:?}",
                msg_type, found
            ))),
            None if required => Err(Error::UnexpectedMessage(format!(
                "expected {:?}, got nothing",
                msg_type
            ))),
            _ => Ok(None),
        }
    }

    fn send_alert(&mut self, level: AlertLevel, description: AlertDescription) -> Result<()> {
        self.outbox.push_back(Flight::Alert(level, description));
        Ok(())
    }
}
