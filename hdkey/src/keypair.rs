use crate::{
    Bip32Error,
    extended_key::{ExtendedKey, KeyMaterial},
    network::Network,
};
use crypto_utils::{
    base58::{base58_check_decode, base58_check_encode},
    curve::{self, point_to_compressed, public_from_secret},
};
use secp256k1::{PublicKey, SECP256K1, SecretKey};
use std::fmt;
use zeroize::Zeroizing;

/// Plain secp256k1 key pair without chain code or tree position, for
/// exporting a derived node as hex or WIF.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    secret: Option<SecretKey>,
    public: PublicKey,
    network: Network,
    compressed: bool,
}

impl KeyPair {
    pub fn from_secret(secret: SecretKey, network: Network) -> Self {
        KeyPair {
            public: public_from_secret(SECP256K1, &secret),
            secret: Some(secret),
            network,
            compressed: true,
        }
    }

    pub fn from_public(public: PublicKey, network: Network) -> Self {
        KeyPair {
            secret: None,
            public,
            network,
            compressed: true,
        }
    }

    /// Parses a WIF string: `prefix || scalar [|| 0x01]`, Base58Check encoded.
    pub fn from_wif(s: &str, networks: &[Network]) -> Result<Self, Bip32Error> {
        let data = Zeroizing::new(base58_check_decode(s)?);
        let compressed = match data.len() {
            34 if data[33] == 0x01 => true,
            33 => false,
            _ => return Err(Bip32Error::InvalidWif),
        };
        let network = *networks
            .iter()
            .find(|n| n.wif_prefix == data[0])
            .ok_or(Bip32Error::InvalidWif)?;
        let mut scalar = Zeroizing::new([0u8; 32]);
        scalar.copy_from_slice(&data[1..33]);
        let secret = curve::parse_scalar(&scalar).map_err(|_| Bip32Error::InvalidWif)?;
        Ok(KeyPair {
            public: public_from_secret(SECP256K1, &secret),
            secret: Some(secret),
            network,
            compressed,
        })
    }

    pub fn secret_key(&self) -> Option<&SecretKey> {
        self.secret.as_ref()
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// Public key in SEC1 form, compressed unless imported from an
    /// uncompressed WIF.
    pub fn public_key_hex(&self) -> String {
        if self.compressed {
            hex::encode(point_to_compressed(&self.public))
        } else {
            hex::encode(self.public.serialize_uncompressed())
        }
    }

    pub fn private_key_hex(&self) -> Option<Zeroizing<String>> {
        self.secret
            .as_ref()
            .map(|sk| Zeroizing::new(hex::encode(sk.secret_bytes())))
    }

    pub fn to_wif(&self) -> Option<Zeroizing<String>> {
        let sk = self.secret.as_ref()?;
        let mut data = Zeroizing::new(Vec::with_capacity(34));
        data.push(self.network.wif_prefix);
        data.extend_from_slice(&*Zeroizing::new(sk.secret_bytes()));
        if self.compressed {
            data.push(0x01);
        }
        Some(Zeroizing::new(base58_check_encode(&data)))
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("public", &self.public_key_hex())
            .field("network", &self.network)
            .field("compressed", &self.compressed)
            .finish()
    }
}

impl Drop for KeyPair {
    fn drop(&mut self) {
        if let Some(sk) = self.secret.as_mut() {
            sk.non_secure_erase();
        }
    }
}

impl From<&ExtendedKey> for KeyPair {
    fn from(key: &ExtendedKey) -> Self {
        match key.key_material() {
            KeyMaterial::Private(sk) => KeyPair::from_secret(*sk, key.network()),
            KeyMaterial::Public(pk) => KeyPair::from_public(*pk, key.network()),
        }
    }
}

impl ExtendedKey {
    pub fn key_pair(&self) -> KeyPair {
        KeyPair::from(self)
    }
}
