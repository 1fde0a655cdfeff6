//! HMAC implementations using the RustCrypto `hmac` crate.

use hmac::{Hmac as RustHmac, Mac};
use tlsauth_crypto::{Error, HashAlgorithm, Hmac, Result};

/// Create an HMAC instance for the specified hash algorithm.
pub fn create_hmac(algorithm: HashAlgorithm, key: &[u8]) -> Result<Box<dyn Hmac>> {
    let state = match algorithm {
        HashAlgorithm::Md5 => MacState::Md5(
            RustHmac::<md5::Md5>::new_from_slice(key).map_err(|_| Error::InvalidKeyLength)?,
        ),
        HashAlgorithm::Sha1 => MacState::Sha1(
            RustHmac::<sha1::Sha1>::new_from_slice(key).map_err(|_| Error::InvalidKeyLength)?,
        ),
        HashAlgorithm::Sha256 => MacState::Sha256(
            RustHmac::<sha2::Sha256>::new_from_slice(key).map_err(|_| Error::InvalidKeyLength)?,
        ),
        HashAlgorithm::Sha384 => MacState::Sha384(
            RustHmac::<sha2::Sha384>::new_from_slice(key).map_err(|_| Error::InvalidKeyLength)?,
        ),
    };
    Ok(Box::new(HmacImpl { state }))
}

enum MacState {
    Md5(RustHmac<md5::Md5>),
    Sha1(RustHmac<sha1::Sha1>),
    Sha256(RustHmac<sha2::Sha256>),
    Sha384(RustHmac<sha2::Sha384>),
}

/// HMAC with incremental updates.
///
/// Keys of any length are accepted, as RFC 2104 requires; the PRFs feed it
/// premaster halves of arbitrary size.
struct HmacImpl {
    state: MacState,
}

impl Hmac for HmacImpl {
    fn update(&mut self, data: &[u8]) {
        match &mut self.state {
            MacState::Md5(m) => m.update(data),
            MacState::Sha1(m) => m.update(data),
            MacState::Sha256(m) => m.update(data),
            MacState::Sha384(m) => m.update(data),
        }
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        match self.state {
            MacState::Md5(m) => m.finalize().into_bytes().to_vec(),
            MacState::Sha1(m) => m.finalize().into_bytes().to_vec(),
            MacState::Sha256(m) => m.finalize().into_bytes().to_vec(),
            MacState::Sha384(m) => m.finalize().into_bytes().to_vec(),
        }
    }

    fn output_size(&self) -> usize {
        self.algorithm().output_size()
    }

    fn algorithm(&self) -> HashAlgorithm {
        match self.state {
            MacState::Md5(_) => HashAlgorithm::Md5,
            MacState::Sha1(_) => HashAlgorithm::Sha1,
            MacState::Sha256(_) => HashAlgorithm::Sha256,
            MacState::Sha384(_) => HashAlgorithm::Sha384,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 2202 / RFC 4231 test case 2: key "Jefe"
    const KEY: &[u8] = b"Jefe";
    const DATA: &[u8] = b"what do ya want for nothing?";

    fn tag(algorithm: HashAlgorithm) -> Vec<u8> {
        let mut mac = create_hmac(algorithm, KEY).unwrap();
        mac.update(DATA);
        mac.finalize()
    }

    #[test]
    fn test_hmac_md5_rfc2202() {
        assert_eq!(
            tag(HashAlgorithm::Md5),
            [
                0x75, 0x0c, 0x78, 0x3e, 0x6a, 0xb0, 0xb5, 0x03, 0xea, 0xa8, 0x6e, 0x31, 0x0a,
                0x5d, 0xb7, 0x38
            ]
        );
    }

    #[test]
    fn test_hmac_sha1_rfc2202() {
        assert_eq!(
            tag(HashAlgorithm::Sha1),
            [
                0xef, 0xfc, 0xdf, 0x6a, 0xe5, 0xeb, 0x2f, 0xa2, 0xd2, 0x74, 0x16, 0xd5, 0xf1,
                0x84, 0xdf, 0x9c, 0x25, 0x9a, 0x7c, 0x79
            ]
        );
    }

    #[test]
    fn test_hmac_sha256_rfc4231() {
        assert_eq!(
            tag(HashAlgorithm::Sha256),
            [
                0x5b, 0xdc, 0xc1, 0x46, 0xbf, 0x60, 0x75, 0x4e, 0x6a, 0x04, 0x24, 0x26, 0x08,
                0x95, 0x75, 0xc7, 0x5a, 0x00, 0x3f, 0x08, 0x9d, 0x27, 0x39, 0x83, 0x9d, 0xec,
                0x58, 0xb9, 0x64, 0xec, 0x38, 0x43
            ]
        );
    }

    /// RFC 4231 test case 6: a key longer than the block is hashed first.
    #[test]
    fn test_hmac_sha256_long_key() {
        let mut mac = create_hmac(HashAlgorithm::Sha256, &[0xAA; 131]).unwrap();
        mac.update(b"Test Using Larger Than Block-Size Key - Hash Key First");
        assert_eq!(mac.output_size(), 32);
        assert_eq!(
            mac.finalize(),
            [
                0x60, 0xe4, 0x31, 0x59, 0x1e, 0xe0, 0xb6, 0x7f, 0x0d, 0x8a, 0x26, 0xaa, 0xcb,
                0xf5, 0xb7, 0x7f, 0x8e, 0x0b, 0xc6, 0x21, 0x37, 0x28, 0xc5, 0x14, 0x05, 0x46,
                0x04, 0x0f, 0x0e, 0xe3, 0x7f, 0x54
            ]
        );
    }

    /// The PRF may hand over an empty secret half.
    #[test]
    fn test_hmac_md5_empty_key() {
        let mac = create_hmac(HashAlgorithm::Md5, &[]).unwrap();
        assert_eq!(mac.algorithm(), HashAlgorithm::Md5);
        assert_eq!(
            mac.finalize(),
            [
                0x74, 0xe6, 0xf7, 0x29, 0x8a, 0x9c, 0x2d, 0x16, 0x89, 0x35, 0xf5, 0x8c, 0x00,
                0x1b, 0xad, 0x88
            ]
        );
    }
}
