//! CertificateRequest message (RFC 5246 Section 7.4.4)
//!
//! Sent by a server that wants the client to authenticate.
//!
//! ```text
//! struct {
//!     ClientCertificateType certificate_types<1..2^8-1>;
//!     HashAlgorithm supported_hashes<0..2^8-1>;      -- TLS 1.2 only
//!     DistinguishedName certificate_authorities<0..2^16-1>;
//! } CertificateRequest;
//!
//! opaque DistinguishedName<1..2^16-1>;
//! ```
//!
//! # Protocol Flow
//!
//! ```text
//! Client                                           Server
//!
//!                           <--------  ServerHello
//!                                      Certificate
//!                                      CertificateRequest
//!                                      ServerHelloDone
//! Certificate
//! ClientKeyExchange
//! CertificateVerify
//! Finished                  -------->
//! ```

use bytes::BufMut;

use crate::codec::{put_u16_len, put_u8_len, Reader};
use crate::error::{Error, Result};
use crate::protocol::{ClientCertificateType, ProtocolVersion};

/// At most this many certificate types are kept from a request.
pub const MAX_SIGN_ALGORITHMS: usize = 2;

/// Certificate types a server asks for.
const SERVER_CERTIFICATE_TYPES: [ClientCertificateType; 2] =
    [ClientCertificateType::RsaSign, ClientCertificateType::DssSign];

/// CertificateRequest message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateRequest {
    /// Requested certificate types we support, in peer order.
    pub certificate_types: Vec<ClientCertificateType>,

    /// Raw TLS 1.2 hash algorithm ids; empty on earlier versions.
    pub hash_algorithms: Vec<u8>,

    /// Acceptable certificate authority names (raw DER).
    pub issuers: Vec<Vec<u8>>,
}

impl CertificateRequest {
    /// Create a new CertificateRequest.
    pub fn new(certificate_types: Vec<ClientCertificateType>, issuers: Vec<Vec<u8>>) -> Self {
        Self {
            certificate_types,
            hash_algorithms: Vec::new(),
            issuers,
        }
    }

    /// Encode to wire format for `version`.
    pub fn encode(&self, version: ProtocolVersion) -> Result<Vec<u8>> {
        let mut names = Vec::new();
        for issuer in &self.issuers {
            if issuer.is_empty() {
                return Err(Error::InvalidMessage("empty distinguished name".into()));
            }
            put_u16_len(&mut names, issuer.len())?;
            names.put_slice(issuer);
        }

        let mut buf = Vec::new();
        put_u8_len(&mut buf, self.certificate_types.len())?;
        for cert_type in &self.certificate_types {
            buf.put_u8(cert_type.to_u8());
        }
        if version.has_hash_algorithm_list() {
            put_u8_len(&mut buf, self.hash_algorithms.len())?;
            buf.put_slice(&self.hash_algorithms);
        }
        put_u16_len(&mut buf, names.len())?;
        buf.put_slice(&names);
        Ok(buf)
    }

    /// Decode from wire format for `version`.
    ///
    /// Unknown certificate types are skipped.
    ///
    /// # Errors
    ///
    /// - `UnsupportedAlgorithm` if no requested type is supported
    /// - `TruncatedMessage` if a length runs past the data
    /// - `InvalidMessage` for trailing bytes
    pub fn decode(data: &[u8], version: ProtocolVersion) -> Result<Self> {
        let mut reader = Reader::new(data);

        let mut certificate_types = Vec::with_capacity(MAX_SIGN_ALGORITHMS);
        for &raw in reader.vec_u8()? {
            match ClientCertificateType::from_u8(raw) {
                Some(cert_type)
                    if certificate_types.len() < MAX_SIGN_ALGORITHMS
                        && !certificate_types.contains(&cert_type) =>
                {
                    certificate_types.push(cert_type);
                },
                Some(_) => {},
                None => tracing::trace!(certificate_type = raw, "skipping unsupported type"),
            }
        }
        if certificate_types.is_empty() {
            return Err(Error::UnsupportedAlgorithm);
        }

        let hash_algorithms = if version.has_hash_algorithm_list() {
            reader.vec_u8()?.to_vec()
        } else {
            Vec::new()
        };

        let names_len = reader.u16()? as usize;
        let mut names = reader.sub(names_len)?;
        let mut issuers = Vec::new();
        while !names.is_empty() {
            let name = names.vec_u16()?;
            if !name.is_empty() {
                issuers.push(name.to_vec());
            }
        }
        reader.expect_end("CertificateRequest")?;

        Ok(Self {
            certificate_types,
            hash_algorithms,
            issuers,
        })
    }
}

/// Encode the CertificateRequest a server sends.
///
/// Asks for RSA and DSS certificates; TLS 1.2 gets an empty hash list.
/// `rdn_sequence` is the pre-encoded issuer list (each name with its own
/// 16-bit length), empty to leave the choice to the client.
pub fn encode_server_request(version: ProtocolVersion, rdn_sequence: &[u8]) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(1 + SERVER_CERTIFICATE_TYPES.len() + 1 + 2 + rdn_sequence.len());
    put_u8_len(&mut buf, SERVER_CERTIFICATE_TYPES.len())?;
    for cert_type in SERVER_CERTIFICATE_TYPES {
        buf.put_u8(cert_type.to_u8());
    }
    if version.has_hash_algorithm_list() {
        buf.put_u8(0);
    }
    put_u16_len(&mut buf, rdn_sequence.len())?;
    buf.put_slice(rdn_sequence);
    Ok(buf)
}
