//! Shared inputs for the tlsauth benchmarks.

use tlsauth_core::{CertificateCredentials, Result};
use tlsauth_crypto::SigningKey;

/// Server leaf, RSA.
pub const SERVER_CERT: &[u8] = include_bytes!("../../tlsauth-crypto-rustcrypto/tests/data/server.der");
/// Root that issued [`SERVER_CERT`].
pub const CA_A_CERT: &[u8] = include_bytes!("../../tlsauth-crypto-rustcrypto/tests/data/ca-a.der");
/// Second and third roots, for longer issuer lists.
pub const CA_B_CERT: &[u8] = include_bytes!("../../tlsauth-crypto-rustcrypto/tests/data/ca-b.der");
/// See [`CA_B_CERT`].
pub const CA_C_CERT: &[u8] = include_bytes!("../../tlsauth-crypto-rustcrypto/tests/data/ca-c.der");

/// Client leaves and keys, one per root.
pub const CLIENT_CERTS: [(&[u8], &[u8]); 3] = [
    (
        include_bytes!("../../tlsauth-crypto-rustcrypto/tests/data/client-a.der"),
        include_bytes!("../../tlsauth-crypto-rustcrypto/tests/data/client-a.key.der"),
    ),
    (
        include_bytes!("../../tlsauth-crypto-rustcrypto/tests/data/client-b.der"),
        include_bytes!("../../tlsauth-crypto-rustcrypto/tests/data/client-b.key.der"),
    ),
    (
        include_bytes!("../../tlsauth-crypto-rustcrypto/tests/data/client-c.der"),
        include_bytes!("../../tlsauth-crypto-rustcrypto/tests/data/client-c.key.der"),
    ),
];

/// A client store holding every client credential, in root order.
pub fn client_store() -> Result<CertificateCredentials> {
    CLIENT_CERTS
        .iter()
        .fold(CertificateCredentials::builder(), |builder, (cert, key)| {
            builder.with_key_pair(vec![cert.to_vec()], SigningKey::from_bytes(key.to_vec()))
        })
        .build()
}
