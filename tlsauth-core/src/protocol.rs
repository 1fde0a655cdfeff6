//! SSL/TLS protocol constants and types used by certificate authentication.

/// SSL/TLS protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum ProtocolVersion {
    /// SSL 3.0 (RFC 6101) - Legacy
    Ssl3 = 0x0300,

    /// TLS 1.0 (RFC 2246) - Legacy
    Tls10 = 0x0301,

    /// TLS 1.1 (RFC 4346) - Legacy
    Tls11 = 0x0302,

    /// TLS 1.2 (RFC 5246)
    Tls12 = 0x0303,
}

impl ProtocolVersion {
    /// Create from wire format (u16 big-endian).
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x0300 => Some(ProtocolVersion::Ssl3),
            0x0301 => Some(ProtocolVersion::Tls10),
            0x0302 => Some(ProtocolVersion::Tls11),
            0x0303 => Some(ProtocolVersion::Tls12),
            _ => None,
        }
    }

    /// Convert to wire format (u16 big-endian).
    pub const fn to_u16(self) -> u16 {
        self as u16
    }

    /// Get the protocol name.
    pub const fn name(self) -> &'static str {
        match self {
            ProtocolVersion::Ssl3 => "SSL 3.0",
            ProtocolVersion::Tls10 => "TLS 1.0",
            ProtocolVersion::Tls11 => "TLS 1.1",
            ProtocolVersion::Tls12 => "TLS 1.2",
        }
    }

    /// True for versions whose CertificateRequest carries a hash algorithm list.
    pub const fn has_hash_algorithm_list(self) -> bool {
        matches!(self, ProtocolVersion::Tls12)
    }
}

/// Handshake message types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HandshakeType {
    /// HelloRequest (0)
    HelloRequest = 0,

    /// ClientHello (1)
    ClientHello = 1,

    /// ServerHello (2)
    ServerHello = 2,

    /// Certificate (11)
    Certificate = 11,

    /// ServerKeyExchange (12)
    ServerKeyExchange = 12,

    /// CertificateRequest (13)
    CertificateRequest = 13,

    /// ServerHelloDone (14)
    ServerHelloDone = 14,

    /// CertificateVerify (15)
    CertificateVerify = 15,

    /// ClientKeyExchange (16)
    ClientKeyExchange = 16,

    /// Finished (20)
    Finished = 20,
}

impl HandshakeType {
    /// Create from wire format (u8).
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(HandshakeType::HelloRequest),
            1 => Some(HandshakeType::ClientHello),
            2 => Some(HandshakeType::ServerHello),
            11 => Some(HandshakeType::Certificate),
            12 => Some(HandshakeType::ServerKeyExchange),
            13 => Some(HandshakeType::CertificateRequest),
            14 => Some(HandshakeType::ServerHelloDone),
            15 => Some(HandshakeType::CertificateVerify),
            16 => Some(HandshakeType::ClientKeyExchange),
            20 => Some(HandshakeType::Finished),
            _ => None,
        }
    }

    /// Convert to wire format (u8).
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

/// Which side of the connection a session plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionEnd {
    /// Client
    Client,
    /// Server
    Server,
}

/// Negotiated certificate type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CertificateType {
    /// X.509 certificates
    #[default]
    X509,
    /// OpenPGP keys (RFC 6091)
    OpenPgp,
}

/// `ClientCertificateType` values of the CertificateRequest message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ClientCertificateType {
    /// rsa_sign (1)
    RsaSign = 1,
    /// dss_sign (2)
    DssSign = 2,
}

impl ClientCertificateType {
    /// Create from wire format; unknown values yield `None`.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(ClientCertificateType::RsaSign),
            2 => Some(ClientCertificateType::DssSign),
            _ => None,
        }
    }

    /// Convert to wire format.
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// The public-key algorithm a certificate of this type carries.
    pub const fn public_key_algorithm(self) -> PublicKeyAlgorithm {
        match self {
            ClientCertificateType::RsaSign => PublicKeyAlgorithm::Rsa,
            ClientCertificateType::DssSign => PublicKeyAlgorithm::Dsa,
        }
    }
}

/// Subject public-key algorithm of a certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublicKeyAlgorithm {
    /// rsaEncryption
    Rsa,
    /// id-dsa
    Dsa,
}

impl PublicKeyAlgorithm {
    /// The CertificateRequest type advertising this algorithm.
    pub const fn client_certificate_type(self) -> ClientCertificateType {
        match self {
            PublicKeyAlgorithm::Rsa => ClientCertificateType::RsaSign,
            PublicKeyAlgorithm::Dsa => ClientCertificateType::DssSign,
        }
    }

    /// Get the algorithm name.
    pub const fn name(self) -> &'static str {
        match self {
            PublicKeyAlgorithm::Rsa => "RSA",
            PublicKeyAlgorithm::Dsa => "DSA",
        }
    }
}

/// Key usage a certificate must allow for a given role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyUsage {
    /// digitalSignature
    DigitalSignature,
    /// keyEncipherment
    KeyEncipherment,
}

/// Key exchange algorithm of the negotiated cipher suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyExchangeAlgorithm {
    /// RSA key transport; the server certificate encrypts the premaster.
    Rsa,
    /// Ephemeral Diffie-Hellman signed with an RSA certificate.
    DheRsa,
    /// Ephemeral Diffie-Hellman signed with a DSA certificate.
    DheDss,
    /// Anonymous Diffie-Hellman, no certificates.
    AnonDh,
}

impl KeyExchangeAlgorithm {
    /// All key exchanges known to this crate.
    pub const ALL: [KeyExchangeAlgorithm; 4] = [
        KeyExchangeAlgorithm::Rsa,
        KeyExchangeAlgorithm::DheRsa,
        KeyExchangeAlgorithm::DheDss,
        KeyExchangeAlgorithm::AnonDh,
    ];

    /// True when the exchange authenticates with certificates.
    pub const fn uses_certificates(self) -> bool {
        !matches!(self, KeyExchangeAlgorithm::AnonDh)
    }

    /// Public-key algorithm the server certificate must carry.
    pub const fn server_public_key_algorithm(self) -> Option<PublicKeyAlgorithm> {
        match self {
            KeyExchangeAlgorithm::Rsa | KeyExchangeAlgorithm::DheRsa => {
                Some(PublicKeyAlgorithm::Rsa)
            },
            KeyExchangeAlgorithm::DheDss => Some(PublicKeyAlgorithm::Dsa),
            KeyExchangeAlgorithm::AnonDh => None,
        }
    }

    /// Key usage the server certificate must allow.
    pub const fn required_server_key_usage(self) -> Option<KeyUsage> {
        match self {
            KeyExchangeAlgorithm::Rsa => Some(KeyUsage::KeyEncipherment),
            KeyExchangeAlgorithm::DheRsa | KeyExchangeAlgorithm::DheDss => {
                Some(KeyUsage::DigitalSignature)
            },
            KeyExchangeAlgorithm::AnonDh => None,
        }
    }

    /// Get the algorithm name.
    pub const fn name(self) -> &'static str {
        match self {
            KeyExchangeAlgorithm::Rsa => "RSA",
            KeyExchangeAlgorithm::DheRsa => "DHE_RSA",
            KeyExchangeAlgorithm::DheDss => "DHE_DSS",
            KeyExchangeAlgorithm::AnonDh => "ANON_DH",
        }
    }
}
