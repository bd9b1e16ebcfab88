//! 78-byte BIP32 serialization and its Base58Check text form.
//!
//! ```text
//! version(4) | depth(1) | parent_fingerprint(4) | child_number(4) | chain_code(32) | key_data(33)
//! ```

use crate::{
    Bip32Error,
    extended_key::{ExtendedKey, KeyMaterial},
    network::{KNOWN_NETWORKS, KeyKind, Network, lookup_version},
};
use crypto_utils::{
    base58::{self, Alphabet},
    curve::{self, compressed_to_point, point_to_compressed},
};
use log::debug;
use std::{fmt, str::FromStr};
use zeroize::Zeroizing;

pub const SERIALIZED_LEN: usize = 78;

/// Alphabet assumed by [`ExtendedKey::parse_lenient`].
pub const LENIENT_ALPHABET: Alphabet = Alphabet::Flickr;

fn read_array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[..N]);
    out
}

impl ExtendedKey {
    pub fn serialize(&self) -> [u8; SERIALIZED_LEN] {
        let mut payload = [0u8; SERIALIZED_LEN];
        payload[..4].copy_from_slice(&self.network.version(self.key.kind()));
        payload[4] = self.depth;
        payload[5..9].copy_from_slice(&self.parent_fingerprint);
        payload[9..13].copy_from_slice(&self.child_number.to_be_bytes());
        payload[13..45].copy_from_slice(&self.chain_code);
        match &self.key {
            KeyMaterial::Private(sk) => {
                payload[45] = 0;
                payload[46..].copy_from_slice(&*Zeroizing::new(sk.secret_bytes()));
            }
            KeyMaterial::Public(pk) => payload[45..].copy_from_slice(&point_to_compressed(pk)),
        }
        payload
    }

    pub fn to_base58check_string(&self) -> String {
        let payload = Zeroizing::new(self.serialize());
        base58::base58_check_encode(&*payload)
    }

    /// Strict Base58Check parse against [`KNOWN_NETWORKS`]. Keys on a network
    /// built with [`Network::new`] fail with `UnknownVersion` here and must be
    /// read back through [`ExtendedKey::parse_with_networks`].
    pub fn parse(s: &str) -> Result<Self, Bip32Error> {
        Self::parse_with_networks(s, KNOWN_NETWORKS)
    }

    pub fn parse_with_networks(s: &str, networks: &[Network]) -> Result<Self, Bip32Error> {
        let data = Zeroizing::new(base58::base58_check_decode(s)?);
        let payload: &[u8; SERIALIZED_LEN] = data
            .as_slice()
            .try_into()
            .map_err(|_| Bip32Error::LengthMismatch)?;
        Self::deserialize(payload, networks)
    }

    /// Recovers a key whose text form was produced with [`LENIENT_ALPHABET`]
    /// instead of the Bitcoin alphabet. The checksum is not verified.
    pub fn parse_lenient(s: &str) -> Result<Self, Bip32Error> {
        Self::parse_lenient_with(s, LENIENT_ALPHABET, KNOWN_NETWORKS)
    }

    /// Translates `s` from `alphabet` to the Bitcoin alphabet, decodes it
    /// without checksum verification and reads the first 78 bytes as a payload.
    pub fn parse_lenient_with(
        s: &str,
        alphabet: Alphabet,
        networks: &[Network],
    ) -> Result<Self, Bip32Error> {
        let standard = base58::translate_alphabet(s, alphabet, Alphabet::Bitcoin)?;
        let raw = Zeroizing::new(base58::base58_decode(&standard)?);
        if raw.len() < SERIALIZED_LEN {
            return Err(Bip32Error::LengthMismatch);
        }
        debug!(
            "recovering extended key from {alphabet:?} base58, ignoring {} trailing bytes",
            raw.len() - SERIALIZED_LEN
        );
        let payload: &[u8; SERIALIZED_LEN] = raw[..SERIALIZED_LEN]
            .try_into()
            .map_err(|_| Bip32Error::LengthMismatch)?;
        Self::deserialize(payload, networks)
    }

    /// Reads a 78-byte payload whose version belongs to one of `networks`.
    pub fn deserialize(
        payload: &[u8; SERIALIZED_LEN],
        networks: &[Network],
    ) -> Result<Self, Bip32Error> {
        let version: [u8; 4] = read_array(&payload[0..4]);
        let (network, kind) =
            lookup_version(networks, version).ok_or(Bip32Error::UnknownVersion(version))?;

        let depth = payload[4];
        let parent_fingerprint: [u8; 4] = read_array(&payload[5..9]);
        let child_number = u32::from_be_bytes(read_array(&payload[9..13]));
        if depth == 0 && (parent_fingerprint != [0u8; 4] || child_number != 0) {
            return Err(Bip32Error::InvalidRootFields);
        }
        let chain_code: [u8; 32] = read_array(&payload[13..45]);

        let key_data = &payload[45..];
        let key = match (kind, key_data[0]) {
            (KeyKind::Private, 0x00) => {
                let scalar = Zeroizing::new(read_array::<32>(&key_data[1..]));
                let sk = curve::parse_scalar(&scalar).map_err(|_| Bip32Error::InvalidKeyData)?;
                KeyMaterial::Private(sk)
            }
            (KeyKind::Public, 0x02 | 0x03) => {
                let pk = compressed_to_point(&read_array(key_data))
                    .map_err(|_| Bip32Error::InvalidPoint)?;
                KeyMaterial::Public(pk)
            }
            _ => return Err(Bip32Error::InvalidKeyData),
        };

        Ok(ExtendedKey {
            depth,
            parent_fingerprint,
            child_number,
            chain_code,
            key,
            network,
        })
    }
}

impl fmt::Display for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58check_string())
    }
}

impl FromStr for ExtendedKey {
    type Err = Bip32Error;

    fn from_str(s: &str) -> Result<Self, Bip32Error> {
        ExtendedKey::parse(s)
    }
}
