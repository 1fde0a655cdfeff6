//! Hash function implementations using the RustCrypto digest crates.

use sha2::Digest;
use tlsauth_crypto::{Hash, HashAlgorithm};

/// Create a hash instance for the specified algorithm.
pub fn create_hash(algorithm: HashAlgorithm) -> Box<dyn Hash> {
    let state = match algorithm {
        HashAlgorithm::Md5 => HashState::Md5(md5::Md5::new()),
        HashAlgorithm::Sha1 => HashState::Sha1(sha1::Sha1::new()),
        HashAlgorithm::Sha256 => HashState::Sha256(sha2::Sha256::new()),
        HashAlgorithm::Sha384 => HashState::Sha384(sha2::Sha384::new()),
    };
    Box::new(DigestHash { state })
}

enum HashState {
    Md5(md5::Md5),
    Sha1(sha1::Sha1),
    Sha256(sha2::Sha256),
    Sha384(sha2::Sha384),
}

/// Incremental hash over one of the supported digests.
struct DigestHash {
    state: HashState,
}

impl Hash for DigestHash {
    fn update(&mut self, data: &[u8]) {
        match &mut self.state {
            HashState::Md5(h) => h.update(data),
            HashState::Sha1(h) => h.update(data),
            HashState::Sha256(h) => h.update(data),
            HashState::Sha384(h) => h.update(data),
        }
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        match self.state {
            HashState::Md5(h) => h.finalize().to_vec(),
            HashState::Sha1(h) => h.finalize().to_vec(),
            HashState::Sha256(h) => h.finalize().to_vec(),
            HashState::Sha384(h) => h.finalize().to_vec(),
        }
    }

    fn output_size(&self) -> usize {
        self.algorithm().output_size()
    }

    fn algorithm(&self) -> HashAlgorithm {
        match self.state {
            HashState::Md5(_) => HashAlgorithm::Md5,
            HashState::Sha1(_) => HashAlgorithm::Sha1,
            HashState::Sha256(_) => HashAlgorithm::Sha256,
            HashState::Sha384(_) => HashAlgorithm::Sha384,
        }
    }
}
