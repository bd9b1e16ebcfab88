//! Hash, HMAC, Base58 and secp256k1 primitives consumed by the `hdkey` crate.

pub mod base58;
pub mod curve;
pub mod hash;
pub mod hmac;
