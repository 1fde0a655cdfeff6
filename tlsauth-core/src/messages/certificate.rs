//! Certificate message (RFC 5246 Section 7.4.2).
//!
//! ```text
//! opaque ASN.1Cert<1..2^24-1>;
//!
//! struct {
//!     ASN.1Cert certificate_list<0..2^24-1>;
//! } Certificate;
//! ```
//!
//! A side without a certificate sends an empty list, `00 00 00`. Some old
//! peers instead wrap that empty list once more and send `00 00 03 00 00 00`;
//! both decode to an empty list.

use bytes::BufMut;

use crate::codec::{put_u24, Reader, MAX_U24};
use crate::error::{Error, Result};
use crate::x509::CertificateDer;

/// Body length of the doubly wrapped empty list.
const LEGACY_EMPTY_LEN: usize = 3;

/// Certificate message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Certificate {
    /// Certificate chain, leaf first.
    pub certificate_list: Vec<CertificateDer>,
}

impl Certificate {
    /// Create a new Certificate message.
    pub fn new(certificate_list: Vec<CertificateDer>) -> Self {
        Self { certificate_list }
    }

    /// A Certificate message without certificates.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when no certificate is carried.
    pub fn is_empty(&self) -> bool {
        self.certificate_list.is_empty()
    }

    /// The leaf certificate, if any.
    pub fn leaf(&self) -> Option<&CertificateDer> {
        self.certificate_list.first()
    }

    /// Encode to bytes.
    pub fn encode(&self) -> Result<Vec<u8>> {
        encode_certificate_list(&self.certificate_list)
    }

    /// Decode from bytes.
    pub fn decode(data: &[u8]) -> Result<Self> {
        decode_certificate_list(data).map(Self::new)
    }
}

/// Encode a leaf-first certificate chain as a Certificate body.
///
/// # Errors
///
/// `InvalidMessage` for an empty certificate, or when a certificate or the
/// whole list does not fit a 24-bit length.
pub fn encode_certificate_list(certificates: &[CertificateDer]) -> Result<Vec<u8>> {
    let mut total = 0usize;
    for cert in certificates {
        if cert.is_empty() {
            return Err(Error::InvalidMessage("empty certificate in chain".into()));
        }
        if cert.len() > MAX_U24 {
            return Err(Error::InvalidMessage(format!(
                "certificate of {} bytes too large",
                cert.len()
            )));
        }
        total += 3 + cert.len();
    }

    let mut buf = Vec::with_capacity(3 + total);
    put_u24(&mut buf, total)?;
    for cert in certificates {
        put_u24(&mut buf, cert.len())?;
        buf.put_slice(cert);
    }
    Ok(buf)
}

/// Decode a Certificate body into its certificates, leaf first.
///
/// # Errors
///
/// - `TruncatedMessage` if any declared length runs past the data
/// - `InvalidMessage` for trailing bytes or a zero-length certificate
pub fn decode_certificate_list(data: &[u8]) -> Result<Vec<CertificateDer>> {
    let mut reader = Reader::new(data);
    let total = reader.u24()?;

    match total {
        0 => return Ok(Vec::new()),
        LEGACY_EMPTY_LEN => {
            reader.take(LEGACY_EMPTY_LEN)?;
            tracing::trace!("legacy empty certificate list");
            return Ok(Vec::new());
        },
        1 | 2 => return Err(Error::TruncatedMessage),
        _ => {},
    }

    let mut list = reader.sub(total)?;
    reader.expect_end("certificate list")?;

    let mut certificates = Vec::new();
    while !list.is_empty() {
        let cert = list.vec_u24()?;
        if cert.is_empty() {
            return Err(Error::InvalidMessage("zero-length certificate".into()));
        }
        certificates.push(cert.to_vec());
    }

    Ok(certificates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_single_certificate() {
        let encoded = encode_certificate_list(&[vec![0xAA, 0xBB]]).unwrap();
        assert_eq!(encoded, vec![0x00, 0x00, 0x05, 0x00, 0x00, 0x02, 0xAA, 0xBB]);
    }

    #[test]
    fn test_certificate_chain_order() {
        let chain = vec![vec![1; 10], vec![2; 20], vec![3; 30]];
        let cert = Certificate::new(chain.clone());

        let decoded = Certificate::decode(&cert.encode().unwrap()).unwrap();
        assert_eq!(decoded.certificate_list, chain);
        assert_eq!(decoded.leaf(), Some(&vec![1; 10]));
    }

    #[test]
    fn test_empty_forms() {
        let encoded = Certificate::empty().encode().unwrap();
        assert_eq!(encoded, vec![0x00, 0x00, 0x00]);
        assert!(decode_certificate_list(&encoded).unwrap().is_empty());

        let legacy = [0x00, 0x00, 0x03, 0x00, 0x00, 0x00];
        assert!(decode_certificate_list(&legacy).unwrap().is_empty());
    }

    #[test]
    fn test_legacy_empty_needs_its_bytes() {
        assert_eq!(
            decode_certificate_list(&[0x00, 0x00, 0x03, 0x00]),
            Err(Error::TruncatedMessage)
        );
    }

    #[test]
    fn test_short_totals_are_truncated() {
        assert_eq!(decode_certificate_list(&[]), Err(Error::TruncatedMessage));
        assert_eq!(decode_certificate_list(&[0x00, 0x00]), Err(Error::TruncatedMessage));
        assert_eq!(
            decode_certificate_list(&[0x00, 0x00, 0x01, 0x00]),
            Err(Error::TruncatedMessage)
        );
        assert_eq!(
            decode_certificate_list(&[0x00, 0x00, 0x02, 0x00, 0x00]),
            Err(Error::TruncatedMessage)
        );
    }

    #[test]
    fn test_entry_overruns_total() {
        // total says 5, entry claims 4 bytes but only 2 remain inside total
        let data = [0x00, 0x00, 0x05, 0x00, 0x00, 0x04, 0xAA, 0xBB];
        assert_eq!(decode_certificate_list(&data), Err(Error::TruncatedMessage));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut data = encode_certificate_list(&[vec![0x30, 0x00]]).unwrap();
        data.push(0xFF);
        assert!(matches!(
            decode_certificate_list(&data),
            Err(Error::InvalidMessage(_))
        ));
    }

    #[test]
    fn test_zero_length_certificate() {
        assert!(matches!(
            encode_certificate_list(&[vec![0x30], Vec::new()]),
            Err(Error::InvalidMessage(_))
        ));

        let data = [0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00];
        assert!(matches!(
            decode_certificate_list(&data),
            Err(Error::InvalidMessage(_))
        ));
    }
}
