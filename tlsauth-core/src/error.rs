//! Error types for the tlsauth core.

/// Result type for tlsauth operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while authenticating a handshake.
///
/// Parse and crypto failures abort the handshake. `InsufficientCredentials`
/// and `NoCertificateFound` are outcomes of the certificate exchange and may
/// or may not be fatal depending on whether authentication was mandatory;
/// see [`Error::is_credential_outcome`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A declared length exceeds the bytes that remain.
    #[error("truncated message")]
    TruncatedMessage,

    /// The peer advertised no algorithm this side supports.
    #[error("peer advertised no supported algorithm")]
    UnsupportedAlgorithm,

    /// No local certificate matches where one is required.
    #[error("insufficient credentials")]
    InsufficientCredentials,

    /// The PRF or the premaster bookkeeping failed during key derivation.
    #[error("master secret derivation failed")]
    DerivationFailed,

    /// CertificateVerify signature does not match the transcript.
    #[error("certificate verify signature is invalid")]
    SignatureInvalid,

    /// The peer declined to send a certificate that was required.
    #[error("no certificate was found")]
    NoCertificateFound,

    /// Structurally invalid message (trailing bytes, oversize fields).
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// A selection callback returned a credential that does not fit the session.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The X.509 parser rejected a certificate.
    #[error("certificate parse error: {0}")]
    CertificateParse(String),

    /// The peer's leaf certificate key usage forbids the negotiated key exchange.
    #[error("certificate key usage violation")]
    KeyUsageViolation,

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The record layer delivered something other than what was expected.
    #[error("unexpected message: {0}")]
    UnexpectedMessage(String),

    /// Alert received from the peer.
    #[error("alert received: {level:?} {description:?}")]
    AlertReceived {
        /// Alert level
        level: AlertLevel,
        /// Alert description
        description: AlertDescription,
    },

    /// Cryptographic provider failure.
    #[error("cryptographic error: {0}")]
    Crypto(#[from] tlsauth_crypto::Error),

    /// Record layer failure.
    #[error("I/O error: {0}")]
    Io(String),

    /// Orchestration logic error.
    #[error("internal error: {0}")]
    InternalError(String),
}

impl Error {
    /// True for errors raised while decoding peer bytes.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Error::TruncatedMessage | Error::InvalidMessage(_) | Error::CertificateParse(_)
        )
    }

    /// True for business-logic outcomes of the certificate exchange that a
    /// caller may tolerate when authentication is optional.
    pub fn is_credential_outcome(&self) -> bool {
        matches!(self, Error::InsufficientCredentials | Error::NoCertificateFound)
    }

    /// The alert the orchestration layer should send for this error.
    ///
    /// Returns `None` for alerts received from the peer.
    pub fn alert_description(&self) -> Option<AlertDescription> {
        let description = match self {
            Error::TruncatedMessage | Error::InvalidMessage(_) => AlertDescription::DecodeError,
            Error::UnsupportedAlgorithm
            | Error::InsufficientCredentials
            | Error::NoCertificateFound => AlertDescription::HandshakeFailure,
            Error::SignatureInvalid => AlertDescription::DecryptError,
            Error::CertificateParse(_) => AlertDescription::BadCertificate,
            Error::KeyUsageViolation => AlertDescription::UnsupportedCertificate,
            Error::UnexpectedMessage(_) => AlertDescription::UnexpectedMessage,
            Error::AlertReceived { .. } => return None,
            Error::DerivationFailed
            | Error::InvalidRequest(_)
            | Error::InvalidConfig(_)
            | Error::Crypto(_)
            | Error::Io(_)
            | Error::InternalError(_) => AlertDescription::InternalError,
        };
        Some(description)
    }
}

/// TLS alert level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AlertLevel {
    /// Warning
    Warning = 1,
    /// Fatal
    Fatal = 2,
}

impl AlertLevel {
    /// Create from wire format.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(AlertLevel::Warning),
            2 => Some(AlertLevel::Fatal),
            _ => None,
        }
    }

    /// Convert to wire format.
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

/// TLS alert descriptions relevant to certificate authentication
/// (RFC 5246 Section 7.2, plus SSL 3.0 `no_certificate`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AlertDescription {
    /// Close notify
    CloseNotify = 0,

    /// Unexpected message
    UnexpectedMessage = 10,

    /// Handshake failure
    HandshakeFailure = 40,

    /// No certificate (SSL 3.0 only, sent as a warning)
    NoCertificate = 41,

    /// Bad certificate
    BadCertificate = 42,

    /// Unsupported certificate
    UnsupportedCertificate = 43,

    /// Certificate unknown
    CertificateUnknown = 46,

    /// Illegal parameter
    IllegalParameter = 47,

    /// Unknown CA
    UnknownCa = 48,

    /// Decode error
    DecodeError = 50,

    /// Decrypt error
    DecryptError = 51,

    /// Internal error
    InternalError = 80,
}

impl AlertDescription {
    /// Create from wire format.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(AlertDescription::CloseNotify),
            10 => Some(AlertDescription::UnexpectedMessage),
            40 => Some(AlertDescription::HandshakeFailure),
            41 => Some(AlertDescription::NoCertificate),
            42 => Some(AlertDescription::BadCertificate),
            43 => Some(AlertDescription::UnsupportedCertificate),
            46 => Some(AlertDescription::CertificateUnknown),
            47 => Some(AlertDescription::IllegalParameter),
            48 => Some(AlertDescription::UnknownCa),
            50 => Some(AlertDescription::DecodeError),
            51 => Some(AlertDescription::DecryptError),
            80 => Some(AlertDescription::InternalError),
            _ => None,
        }
    }

    /// Convert to wire format.
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_roundtrip() {
        for value in 0u8..=255 {
            if let Some(desc) = AlertDescription::from_u8(value) {
                assert_eq!(desc.to_u8(), value);
            }
        }
        assert_eq!(AlertDescription::from_u8(41), Some(AlertDescription::NoCertificate));
        assert_eq!(AlertLevel::from_u8(1), Some(AlertLevel::Warning));
        assert_eq!(AlertLevel::from_u8(3), None);
    }

    #[test]
    fn test_credential_outcomes_are_distinguishable() {
        assert!(Error::InsufficientCredentials.is_credential_outcome());
        assert!(Error::NoCertificateFound.is_credential_outcome());
        assert!(!Error::TruncatedMessage.is_credential_outcome());
        assert!(!Error::SignatureInvalid.is_credential_outcome());

        assert!(Error::TruncatedMessage.is_parse_error());
        assert!(!Error::NoCertificateFound.is_parse_error());
    }

    #[test]
    fn test_alert_mapping() {
        assert_eq!(
            Error::TruncatedMessage.alert_description(),
            Some(AlertDescription::DecodeError)
        );
        assert_eq!(
            Error::SignatureInvalid.alert_description(),
            Some(AlertDescription::DecryptError)
        );
        assert_eq!(
            Error::KeyUsageViolation.alert_description(),
            Some(AlertDescription::UnsupportedCertificate)
        );
        let received = Error::AlertReceived {
            level: AlertLevel::Fatal,
            description: AlertDescription::HandshakeFailure,
        };
        assert_eq!(received.alert_description(), None);
    }

    #[test]
    fn test_crypto_error_conversion() {
        let err: Error = tlsauth_crypto::Error::InvalidPrivateKey.into();
        assert_eq!(err, Error::Crypto(tlsauth_crypto::Error::InvalidPrivateKey));
        assert_eq!(err.to_string(), "cryptographic error: invalid private key");
    }
}
