//! Certificate authentication handshake messages.
//!
//! Bodies of the SSL 3.0 - TLS 1.2 Certificate, CertificateRequest and
//! CertificateVerify messages, without the 4-byte handshake header.

pub mod certificate;
pub mod certificate_request;
pub mod certificate_verify;

// Re-exports
pub use certificate::{decode_certificate_list, encode_certificate_list, Certificate};
pub use certificate_request::{CertificateRequest, MAX_SIGN_ALGORITHMS};
pub use certificate_verify::CertificateVerify;
