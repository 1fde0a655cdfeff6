//! Certificates and keys shared by unit tests.
//!
//! Three self-signed roots (Alpha, Bravo, Charlie) issue the leaves; every
//! leaf key is 1024-bit RSA except `client-dsa`.

#![allow(dead_code)]

pub(crate) const CA_A_CERT: &[u8] =
    include_bytes!("../../tlsauth-crypto-rustcrypto/tests/data/ca-a.der");
pub(crate) const CA_B_CERT: &[u8] =
    include_bytes!("../../tlsauth-crypto-rustcrypto/tests/data/ca-b.der");
pub(crate) const CA_C_CERT: &[u8] =
    include_bytes!("../../tlsauth-crypto-rustcrypto/tests/data/ca-c.der");

pub(crate) const CLIENT_A_CERT: &[u8] =
    include_bytes!("../../tlsauth-crypto-rustcrypto/tests/data/client-a.der");
pub(crate) const CLIENT_A_KEY: &[u8] =
    include_bytes!("../../tlsauth-crypto-rustcrypto/tests/data/client-a.key.der");
pub(crate) const CLIENT_B_CERT: &[u8] =
    include_bytes!("../../tlsauth-crypto-rustcrypto/tests/data/client-b.der");
pub(crate) const CLIENT_B_KEY: &[u8] =
    include_bytes!("../../tlsauth-crypto-rustcrypto/tests/data/client-b.key.der");
pub(crate) const CLIENT_C_CERT: &[u8] =
    include_bytes!("../../tlsauth-crypto-rustcrypto/tests/data/client-c.der");
pub(crate) const CLIENT_C_KEY: &[u8] =
    include_bytes!("../../tlsauth-crypto-rustcrypto/tests/data/client-c.key.der");
pub(crate) const CLIENT_DSA_CERT: &[u8] =
    include_bytes!("../../tlsauth-crypto-rustcrypto/tests/data/client-dsa.der");
pub(crate) const CLIENT_DSA_KEY: &[u8] =
    include_bytes!("../../tlsauth-crypto-rustcrypto/tests/data/client-dsa.key.der");

pub(crate) const SERVER_CERT: &[u8] =
    include_bytes!("../../tlsauth-crypto-rustcrypto/tests/data/server.der");
pub(crate) const SERVER_KEY: &[u8] =
    include_bytes!("../../tlsauth-crypto-rustcrypto/tests/data/server.key.der");
pub(crate) const SERVER_SIGN_ONLY_CERT: &[u8] =
    include_bytes!("../../tlsauth-crypto-rustcrypto/tests/data/server-sign-only.der");
pub(crate) const SERVER_NO_KU_CERT: &[u8] =
    include_bytes!("../../tlsauth-crypto-rustcrypto/tests/data/server-no-ku.der");
