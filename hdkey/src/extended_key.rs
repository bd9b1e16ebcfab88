use crate::network::{KeyKind, Network};
use crypto_utils::{
    curve::{point_to_compressed, public_from_secret},
    hash::hash160,
};
use secp256k1::{PublicKey, SECP256K1, SecretKey};
use std::fmt;

/// Index offset for hardened children (index >= 0x80000000) i.e., 0x80000000 = 2³¹
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

pub fn is_hardened(index: u32) -> bool {
    index >= HARDENED_OFFSET
}

/// Key material of a node. A private node can always be projected to its
/// public point, never the reverse.
#[derive(Clone, PartialEq, Eq)]
pub enum KeyMaterial {
    Private(SecretKey),
    Public(PublicKey),
}

impl KeyMaterial {
    pub fn kind(&self) -> KeyKind {
        match self {
            KeyMaterial::Private(_) => KeyKind::Private,
            KeyMaterial::Public(_) => KeyKind::Public,
        }
    }

    pub fn public_key(&self) -> PublicKey {
        match self {
            KeyMaterial::Private(sk) => public_from_secret(SECP256K1, sk),
            KeyMaterial::Public(pk) => *pk,
        }
    }
}

impl Drop for KeyMaterial {
    fn drop(&mut self) {
        if let KeyMaterial::Private(sk) = self {
            sk.non_secure_erase();
        }
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMaterial::Private(_) => f.write_str("Private(..)"),
            KeyMaterial::Public(pk) => write!(f, "Public({})", hex::encode(pk.serialize())),
        }
    }
}

/// A BIP32 node: key material plus the metadata needed to derive children
/// and to serialize it. Immutable; derivation always returns a new value.
#[derive(Clone, PartialEq, Eq)]
pub struct ExtendedKey {
    pub(crate) depth: u8,
    pub(crate) parent_fingerprint: [u8; 4],
    pub(crate) child_number: u32,
    pub(crate) chain_code: [u8; 32],
    pub(crate) key: KeyMaterial,
    pub(crate) network: Network,
}

impl ExtendedKey {
    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    pub fn child_number(&self) -> u32 {
        self.child_number
    }

    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    pub fn key_material(&self) -> &KeyMaterial {
        &self.key
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn is_private(&self) -> bool {
        matches!(self.key, KeyMaterial::Private(_))
    }

    pub fn private_key(&self) -> Option<&SecretKey> {
        match &self.key {
            KeyMaterial::Private(sk) => Some(sk),
            KeyMaterial::Public(_) => None,
        }
    }

    pub fn public_key(&self) -> PublicKey {
        self.key.public_key()
    }

    /// Same node with key material replaced by its public point.
    pub fn neuter(&self) -> Self {
        ExtendedKey {
            key: KeyMaterial::Public(self.public_key()),
            ..self.clone()
        }
    }

    /// Same node serialized under a different set of version bytes.
    pub fn with_network(&self, network: Network) -> Self {
        ExtendedKey {
            network,
            ..self.clone()
        }
    }

    /// HASH160 of the compressed public key.
    pub fn identifier(&self) -> [u8; 20] {
        hash160(&point_to_compressed(&self.public_key()))
    }

    /// First 4 bytes of [`Self::identifier`]; stored by children as their
    /// parent fingerprint.
    pub fn fingerprint(&self) -> [u8; 4] {
        let id = self.identifier();
        [id[0], id[1], id[2], id[3]]
    }
}

impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("depth", &self.depth)
            .field("parent_fingerprint", &hex::encode(self.parent_fingerprint))
            .field("child_number", &self.child_number)
            .field("chain_code", &hex::encode(self.chain_code))
            .field("key", &self.key)
            .finish()
    }
}
