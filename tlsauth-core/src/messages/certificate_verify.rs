//! CertificateVerify message (RFC 5246 Section 7.4.8).
//!
//! The body is a single 16-bit length prefixed signature. TLS 1.2's
//! SignatureAndHashAlgorithm prefix is not carried: the algorithm follows
//! from the signer's certificate.

use bytes::BufMut;

use crate::codec::{put_u16_len, Reader};
use crate::error::Result;

/// CertificateVerify message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateVerify {
    /// Signature over the handshake transcript digest.
    pub signature: Vec<u8>,
}

impl CertificateVerify {
    /// Create a new CertificateVerify.
    pub fn new(signature: Vec<u8>) -> Self {
        Self { signature }
    }

    /// Encode to wire format.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(2 + self.signature.len());
        put_u16_len(&mut buf, self.signature.len())?;
        buf.put_slice(&self.signature);
        Ok(buf)
    }

    /// Decode from wire format.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(data);
        let signature = reader.vec_u16()?.to_vec();
        reader.expect_end("CertificateVerify")?;
        Ok(Self { signature })
    }
}
