use crate::{
    Bip32Error,
    extended_key::{ExtendedKey, HARDENED_OFFSET, KeyMaterial, is_hardened},
    network::Network,
};
use crypto_utils::{
    curve::{self, point_to_compressed},
    hmac::hmac_sha512,
};
use log::{debug, trace, warn};
use secp256k1::SECP256K1;
use std::{fmt, str::FromStr};
use zeroize::Zeroizing;

/// HMAC key for master key generation.
pub const MASTER_SEED_KEY: &[u8] = b"Bitcoin seed";

/// Upper bound on consecutive indices tried by [`ExtendedKey::derive_child`]
/// when BIP32 declares an index invalid.
pub const MAX_DERIVATION_ATTEMPTS: u32 = 16;

const MIN_SEED_LEN: usize = 16;
const MAX_SEED_LEN: usize = 64;

/// A BIP-32 derivation path (e.g., "m/44'/0'/0'/0/1").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivationPath(pub Vec<u32>);

impl DerivationPath {
    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    /// Path extended by one more step.
    pub fn child(&self, index: u32) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        DerivationPath(indices)
    }
}

/// Parses one `/`-separated segment: decimal digits, optionally followed by `'`.
fn parse_segment(segment: &str) -> Option<u32> {
    let (digits, hardened) = match segment.strip_suffix('\'') {
        Some(digits) => (digits, true),
        None => (segment, false),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index: u32 = digits.parse().ok()?;
    if is_hardened(index) {
        return None;
    }
    Some(if hardened { index + HARDENED_OFFSET } else { index })
}

impl FromStr for DerivationPath {
    type Err = Bip32Error;

    /// Parses `m` followed by zero or more `/<index>` or `/<index>'` steps.
    fn from_str(s: &str) -> Result<Self, Bip32Error> {
        let invalid = || Bip32Error::InvalidPath(s.to_string());
        let mut segments = s.split('/');
        if segments.next() != Some("m") {
            return Err(invalid());
        }
        segments
            .map(|segment| parse_segment(segment).ok_or_else(invalid))
            .collect::<Result<Vec<_>, _>>()
            .map(DerivationPath)
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for &index in &self.0 {
            if is_hardened(index) {
                write!(f, "/{}'", index - HARDENED_OFFSET)?;
            } else {
                write!(f, "/{index}")?;
            }
        }
        Ok(())
    }
}

/// Walks `start, start + 1, ...` until `step` yields a child, giving up after
/// `max_attempts` indices or at the hardened boundary.
fn first_valid_child<F>(
    start: u32,
    max_attempts: u32,
    mut step: F,
) -> Result<ExtendedKey, Bip32Error>
where
    F: FnMut(u32) -> Result<Option<ExtendedKey>, Bip32Error>,
{
    let mut index = start;
    let mut attempts = 0;
    while attempts < max_attempts {
        attempts += 1;
        if let Some(child) = step(index)? {
            return Ok(child);
        }
        match index
            .checked_add(1)
            .filter(|next| is_hardened(*next) == is_hardened(start))
        {
            Some(next) => index = next,
            None => break,
        }
    }
    warn!("no valid child found from index {start:#x} after {attempts} attempts");
    Err(Bip32Error::DerivationExhausted { start, attempts })
}

impl ExtendedKey {
    /// Master extended private key from a 128 to 512 bit seed.
    pub fn from_seed(seed: &[u8], network: Network) -> Result<Self, Bip32Error> {
        if !(MIN_SEED_LEN..=MAX_SEED_LEN).contains(&seed.len()) {
            return Err(Bip32Error::InvalidSeedLength(seed.len()));
        }
        let i = hmac_sha512(MASTER_SEED_KEY, seed);
        let (il, ir) = split_hmac(&i);
        let secret = curve::parse_scalar(&il).map_err(|_| Bip32Error::InvalidSeedKey)?;
        debug!("derived master key from {}-byte seed", seed.len());
        Ok(ExtendedKey {
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_number: 0,
            chain_code: ir,
            key: KeyMaterial::Private(secret),
            network,
        })
    }

    /// Derives along a path such as `m/0'/1/2'`. `m` alone returns a copy of `self`.
    pub fn derive(&self, path: &str) -> Result<Self, Bip32Error> {
        let path: DerivationPath = path.parse()?;
        self.derive_path(&path)
    }

    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self, Bip32Error> {
        path.indices()
            .iter()
            .try_fold(self.clone(), |key, &index| key.derive_child(index))
    }

    /// One derivation step. If BIP32 rejects `index` for this parent the next
    /// index is used instead, so the returned child number may be larger.
    pub fn derive_child(&self, index: u32) -> Result<Self, Bip32Error> {
        self.derive_child_bounded(index, MAX_DERIVATION_ATTEMPTS)
    }

    pub fn derive_child_bounded(&self, index: u32, max_attempts: u32) -> Result<Self, Bip32Error> {
        first_valid_child(index, max_attempts, |i| self.ckd(i))
    }

    /// Child key derivation for exactly `index`: CKDpriv for private nodes,
    /// CKDpub for public ones. `Ok(None)` means the index is invalid for this
    /// parent and must be skipped.
    pub fn ckd(&self, index: u32) -> Result<Option<Self>, Bip32Error> {
        let data = self.hmac_input(index)?;
        if self.depth == u8::MAX {
            return Err(Bip32Error::MaxDepthExceeded);
        }
        trace!("deriving child {index:#x} at depth {}", self.depth);
        let i = hmac_sha512(&self.chain_code, &data);
        Ok(self.child_from_hmac(index, &i))
    }

    /// Hardened: 0x00 || ser256(k_par) || ser32(i)
    /// Normal:   serP(K_par) || ser32(i)
    fn hmac_input(&self, index: u32) -> Result<Zeroizing<Vec<u8>>, Bip32Error> {
        let mut data = Zeroizing::new(Vec::with_capacity(33 + 4));
        match (&self.key, is_hardened(index)) {
            (KeyMaterial::Private(sk), true) => {
                data.push(0u8);
                data.extend_from_slice(&*Zeroizing::new(sk.secret_bytes()));
            }
            (KeyMaterial::Public(_), true) => {
                return Err(Bip32Error::HardenedFromPublicOnly(index));
            }
            (key, false) => data.extend_from_slice(&point_to_compressed(&key.public_key())),
        }
        data.extend_from_slice(&index.to_be_bytes());
        Ok(data)
    }

    /// Builds the child from `I = HMAC-SHA512(c_par, data)`.
    fn child_from_hmac(&self, index: u32, i: &[u8; 64]) -> Option<Self> {
        let (il, chain_code) = split_hmac(i);
        let key = match &self.key {
            KeyMaterial::Private(sk) => curve::scalar_add(sk, &il).map(KeyMaterial::Private),
            KeyMaterial::Public(pk) => {
                curve::point_add_base_mul(SECP256K1, pk, &il).map(KeyMaterial::Public)
            }
        };
        match key {
            Ok(key) => Some(ExtendedKey {
                depth: self.depth + 1,
                parent_fingerprint: self.fingerprint(),
                child_number: index,
                chain_code,
                key,
                network: self.network,
            }),
            Err(e) => {
                warn!("child index {index:#x} is invalid ({e}), skipping");
                None
            }
        }
    }
}

fn split_hmac(i: &[u8; 64]) -> (Zeroizing<[u8; 32]>, [u8; 32]) {
    let mut il = Zeroizing::new([0u8; 32]);
    il.copy_from_slice(&i[..32]);
    let mut ir = [0u8; 32];
    ir.copy_from_slice(&i[32..]);
    (il, ir)
}
