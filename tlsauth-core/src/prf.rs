//! SSL/TLS pseudorandom functions.
//!
//! TLS 1.2 (RFC 5246 Section 5):
//!
//! ```text
//! PRF(secret, label, seed) = P_<hash>(secret, label + seed)
//! ```
//!
//! TLS 1.0 / 1.1 (RFC 2246 Section 5) split the secret in two halves
//! (overlapping by one byte when its length is odd):
//!
//! ```text
//! PRF(secret, label, seed) = P_MD5(S1, label + seed) XOR P_SHA-1(S2, label + seed)
//! ```
//!
//! Where P_hash is defined as:
//!
//! ```text
//! P_hash(secret, seed) = HMAC_hash(secret, A(1) + seed) +
//!                        HMAC_hash(secret, A(2) + seed) + ...
//! A(0) = seed
//! A(i) = HMAC_hash(secret, A(i-1))
//! ```
//!
//! SSL 3.0 has no labelled PRF; [`ssl3_expand`] implements its MD5/SHA-1
//! random expansion instead.

use tlsauth_crypto::{CryptoProvider, HashAlgorithm};
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::protocol::ProtocolVersion;

/// Which PRF construction to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrfAlgorithm {
    /// P_MD5 XOR P_SHA-1 (TLS 1.0 and 1.1)
    Md5Sha1,
    /// P_hash with a single hash (TLS 1.2)
    Single(HashAlgorithm),
}

impl PrfAlgorithm {
    /// The PRF a protocol version uses; SSL 3.0 has none.
    pub const fn for_version(version: ProtocolVersion) -> Option<Self> {
        match version {
            ProtocolVersion::Ssl3 => None,
            ProtocolVersion::Tls10 | ProtocolVersion::Tls11 => Some(PrfAlgorithm::Md5Sha1),
            ProtocolVersion::Tls12 => Some(PrfAlgorithm::Single(HashAlgorithm::Sha256)),
        }
    }
}

/// Labelled TLS PRF over a crypto provider.
pub struct Prf<'a> {
    provider: &'a dyn CryptoProvider,
    algorithm: PrfAlgorithm,
}

impl std::fmt::Debug for Prf<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prf")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl<'a> Prf<'a> {
    /// Create a PRF of the given construction.
    pub fn new(provider: &'a dyn CryptoProvider, algorithm: PrfAlgorithm) -> Self {
        Self {
            provider,
            algorithm,
        }
    }

    /// Compute `output_len` bytes of PRF output.
    ///
    /// # Arguments
    /// * `secret` - The secret key material
    /// * `label` - ASCII label (e.g. "master secret")
    /// * `seed` - Seed data
    /// * `output_len` - Desired output length in bytes
    pub fn compute(
        &self,
        secret: &[u8],
        label: &[u8],
        seed: &[u8],
        output_len: usize,
    ) -> Result<Zeroizing<Vec<u8>>> {
        let mut label_seed = Vec::with_capacity(label.len() + seed.len());
        label_seed.extend_from_slice(label);
        label_seed.extend_from_slice(seed);

        match self.algorithm {
            PrfAlgorithm::Single(hash) => self.p_hash(hash, secret, &label_seed, output_len),
            PrfAlgorithm::Md5Sha1 => {
                let half = secret.len().div_ceil(2);
                let s1 = &secret[..half];
                let s2 = &secret[secret.len() - half..];

                let mut output = self.p_hash(HashAlgorithm::Md5, s1, &label_seed, output_len)?;
                let sha1 = self.p_hash(HashAlgorithm::Sha1, s2, &label_seed, output_len)?;
                for (out, x) in output.iter_mut().zip(sha1.iter()) {
                    *out ^= x;
                }
                Ok(output)
            },
        }
    }

    fn p_hash(
        &self,
        hash: HashAlgorithm,
        secret: &[u8],
        seed: &[u8],
        output_len: usize,
    ) -> Result<Zeroizing<Vec<u8>>> {
        let mut output = Zeroizing::new(Vec::with_capacity(output_len));

        // A(0) = seed
        let mut a = seed.to_vec();

        while output.len() < output_len {
            // A(i) = HMAC_hash(secret, A(i-1))
            a = self.hmac(hash, secret, &[&a])?;

            // HMAC_hash(secret, A(i) + seed)
            let block = Zeroizing::new(self.hmac(hash, secret, &[&a, seed])?);

            let take = (output_len - output.len()).min(block.len());
            output.extend_from_slice(&block[..take]);
        }

        Ok(output)
    }

    fn hmac(&self, hash: HashAlgorithm, key: &[u8], parts: &[&[u8]]) -> Result<Vec<u8>> {
        let mut hmac = self.provider.hmac(hash, key)?;
        for part in parts {
            hmac.update(part);
        }
        Ok(hmac.finalize())
    }
}

/// SSL 3.0 random expansion.
///
/// ```text
/// block(i) = MD5(secret + SHA1(L(i) + secret + seed))
/// L(0) = "A", L(1) = "BB", L(2) = "CCC", ...
/// ```
pub fn ssl3_expand(
    provider: &dyn CryptoProvider,
    secret: &[u8],
    seed: &[u8],
    output_len: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    // 26 rounds of 16 bytes exhaust the alphabet.
    if output_len > 26 * HashAlgorithm::Md5.output_size() {
        return Err(Error::InvalidMessage(format!(
            "SSL 3.0 expansion limited to 416 bytes, asked for {}",
            output_len
        )));
    }

    let mut output = Zeroizing::new(Vec::with_capacity(output_len));
    let mut round = 0u8;

    while output.len() < output_len {
        let salt = vec![b'A' + round; usize::from(round) + 1];

        let mut sha1 = provider.hash(HashAlgorithm::Sha1)?;
        sha1.update(&salt);
        sha1.update(secret);
        sha1.update(seed);
        let inner = sha1.finalize();

        let mut md5 = provider.hash(HashAlgorithm::Md5)?;
        md5.update(secret);
        md5.update(&inner);
        let block = Zeroizing::new(md5.finalize());

        let take = (output_len - output.len()).min(block.len());
        output.extend_from_slice(&block[..take]);
        round += 1;
    }

    Ok(output)
}
