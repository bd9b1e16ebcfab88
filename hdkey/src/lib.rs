//! BIP32 hierarchical deterministic keys for secp256k1.
//!
//! ```no_run
//! use hdkey::{ExtendedKey, Network};
//!
//! let seed = [0x42u8; 32];
//! let master = ExtendedKey::from_seed(&seed, Network::MAINNET)?;
//! let account = master.derive("m/0'/1")?;
//! let xpub = account.neuter().to_string();
//! let again: ExtendedKey = xpub.parse()?;
//! assert_eq!(again.derive("m/7")?, account.derive("m/7")?.neuter());
//! # Ok::<(), hdkey::Bip32Error>(())
//! ```

pub mod derivation;
pub mod error;
pub mod extended_key;
pub mod keypair;
pub mod network;
pub mod serialization;

pub use crypto_utils::base58::Alphabet;
pub use derivation::{DerivationPath, MAX_DERIVATION_ATTEMPTS};
pub use error::Bip32Error;
pub use extended_key::{ExtendedKey, HARDENED_OFFSET, KeyMaterial, is_hardened};
pub use keypair::KeyPair;
pub use network::{KNOWN_NETWORKS, KeyKind, Network};
pub use serialization::{LENIENT_ALPHABET, SERIALIZED_LEN};
