use crypto_utils::base58::Base58Error;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Bip32Error {
    #[error("seed must be 16 to 64 bytes long, got {0}")]
    InvalidSeedLength(usize),
    #[error("seed produced a master key outside [1, n-1]")]
    InvalidSeedKey,
    #[error("invalid derivation path {0:?}")]
    InvalidPath(String),
    #[error("cannot derive hardened child {0:#x} from a public-only key")]
    HardenedFromPublicOnly(u32),
    #[error("maximum derivation depth exceeded")]
    MaxDepthExceeded,
    #[error("no valid child in {attempts} attempts starting at index {start:#x}")]
    DerivationExhausted { start: u32, attempts: u32 },
    #[error("invalid base58 character {0:?}")]
    InvalidBase58(char),
    #[error("base58check checksum mismatch")]
    ChecksumMismatch,
    #[error("extended key payload must be 78 bytes")]
    LengthMismatch,
    #[error("unknown extended key version {0:02x?}")]
    UnknownVersion([u8; 4]),
    #[error("key data does not match the version or is out of range")]
    InvalidKeyData,
    #[error("key data is not a valid curve point")]
    InvalidPoint,
    /// Depth 0 requires a zero parent fingerprint and child number.
    #[error("master key with non-zero parent fingerprint or child number")]
    InvalidRootFields,
    #[error("invalid WIF private key")]
    InvalidWif,
}

impl From<Base58Error> for Bip32Error {
    fn from(e: Base58Error) -> Self {
        match e {
            Base58Error::InvalidCharacter(c) => Bip32Error::InvalidBase58(c),
            Base58Error::InvalidLength => Bip32Error::LengthMismatch,
            Base58Error::InvalidChecksum => Bip32Error::ChecksumMismatch,
        }
    }
}
