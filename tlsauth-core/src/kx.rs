//! Master secret derivation.
//!
//! ```text
//! SSL 3.0:   master_secret = ssl3_expand(pre_master_secret,
//!                                        ClientHello.random + ServerHello.random)[0..47]
//!
//! TLS:       master_secret = PRF(pre_master_secret, "master secret",
//!                                ClientHello.random + ServerHello.random)[0..47]
//! ```
//!
//! When both peers negotiated the opaque PRF input extension with
//! non-empty values, the TLS seed becomes
//! `ClientHello.random + client_input + ServerHello.random + server_input`.

use tlsauth_crypto::CryptoProvider;
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::prf::{ssl3_expand, Prf, PrfAlgorithm};
use crate::protocol::ProtocolVersion;

/// Length of the master secret on every protocol version.
pub const MASTER_SECRET_LEN: usize = 48;

/// Length of the client and server hello randoms.
pub const RANDOM_LEN: usize = 32;

const MASTER_SECRET_LABEL: &[u8] = b"master secret";

/// A 48-byte master secret, wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct MasterSecret(Zeroizing<[u8; MASTER_SECRET_LEN]>);

impl MasterSecret {
    /// Wrap raw master secret bytes, e.g. restored from a resumed session.
    pub fn from_bytes(bytes: [u8; MASTER_SECRET_LEN]) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// The secret bytes.
    pub fn as_bytes(&self) -> &[u8; MASTER_SECRET_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for MasterSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("MasterSecret").field(&"<redacted>").finish()
    }
}

/// Opaque PRF input values negotiated by the extension of the same name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpaquePrfInput {
    /// Value sent by the client.
    pub client: Vec<u8>,
    /// Value sent by the server.
    pub server: Vec<u8>,
}

impl OpaquePrfInput {
    /// Pair up the two negotiated values.
    pub fn new(client: Vec<u8>, server: Vec<u8>) -> Self {
        Self { client, server }
    }

    /// Both sides contributed a non-empty value.
    pub fn is_complete(&self) -> bool {
        !self.client.is_empty() && !self.server.is_empty()
    }
}

/// Derive the master secret from the premaster secret.
///
/// # Errors
///
/// `DerivationFailed` if the PRF fails; nothing is returned in that case.
pub fn derive_master_secret(
    provider: &dyn CryptoProvider,
    version: ProtocolVersion,
    premaster: &[u8],
    client_random: &[u8; RANDOM_LEN],
    server_random: &[u8; RANDOM_LEN],
    opaque_prf_input: Option<&OpaquePrfInput>,
) -> Result<MasterSecret> {
    tracing::trace!(
        version = version.name(),
        premaster_len = premaster.len(),
        "deriving master secret"
    );

    let output = match PrfAlgorithm::for_version(version) {
        None => {
            let mut seed = Vec::with_capacity(2 * RANDOM_LEN);
            seed.extend_from_slice(client_random);
            seed.extend_from_slice(server_random);
            ssl3_expand(provider, premaster, &seed, MASTER_SECRET_LEN)
        },
        Some(algorithm) => {
            let seed = match opaque_prf_input.filter(|input| input.is_complete()) {
                Some(input) => {
                    tracing::debug!(
                        client_len = input.client.len(),
                        server_len = input.server.len(),
                        "salting master secret seed with opaque PRF input"
                    );
                    let mut seed = Vec::with_capacity(
                        2 * RANDOM_LEN + input.client.len() + input.server.len(),
                    );
                    seed.extend_from_slice(client_random);
                    seed.extend_from_slice(&input.client);
                    seed.extend_from_slice(server_random);
                    seed.extend_from_slice(&input.server);
                    seed
                },
                None => {
                    let mut seed = Vec::with_capacity(2 * RANDOM_LEN);
                    seed.extend_from_slice(client_random);
                    seed.extend_from_slice(server_random);
                    seed
                },
            };
            Prf::new(provider, algorithm).compute(
                premaster,
                MASTER_SECRET_LABEL,
                &seed,
                MASTER_SECRET_LEN,
            )
        },
    };

    let output = output.map_err(|e| {
        tracing::warn!(error = %e, version = version.name(), "master secret derivation failed");
        Error::DerivationFailed
    })?;

    let bytes: [u8; MASTER_SECRET_LEN] = output.as_slice().try_into().map_err(|_| {
        tracing::warn!(len = output.len(), "PRF returned a short master secret");
        Error::DerivationFailed
    })?;
    Ok(MasterSecret::from_bytes(bytes))
}
