//! secp256k1 scalar and point operations used by BIP32 derivation.

use secp256k1::{All, PublicKey, Scalar, Secp256k1, SecretKey, constants};
use thiserror::Error;

/// Order `n` of the secp256k1 base point, big-endian.
pub const CURVE_ORDER: [u8; 32] = constants::CURVE_ORDER;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CurveError {
    #[error("scalar is zero or not below the curve order")]
    ScalarOutOfRange,
    #[error("result is the point at infinity")]
    PointAtInfinity,
    #[error("bytes do not encode a compressed secp256k1 point")]
    InvalidPoint,
}

/// Parses a big-endian scalar in `[1, n-1]`.
pub fn parse_scalar(bytes: &[u8; 32]) -> Result<SecretKey, CurveError> {
    SecretKey::from_slice(bytes).map_err(|_| CurveError::ScalarOutOfRange)
}

/// `(k + tweak) mod n`. Fails when `tweak >= n` or the sum is zero.
pub fn scalar_add(k: &SecretKey, tweak: &[u8; 32]) -> Result<SecretKey, CurveError> {
    let tweak = Scalar::from_be_bytes(*tweak).map_err(|_| CurveError::ScalarOutOfRange)?;
    k.add_tweak(&tweak).map_err(|_| CurveError::ScalarOutOfRange)
}

/// `scalar * G`
pub fn scalar_mul_base(secp: &Secp256k1<All>, scalar: &[u8; 32]) -> Result<PublicKey, CurveError> {
    let k = parse_scalar(scalar)?;
    Ok(PublicKey::from_secret_key(secp, &k))
}

pub fn public_from_secret(secp: &Secp256k1<All>, k: &SecretKey) -> PublicKey {
    PublicKey::from_secret_key(secp, k)
}

pub fn point_add(a: &PublicKey, b: &PublicKey) -> Result<PublicKey, CurveError> {
    a.combine(b).map_err(|_| CurveError::PointAtInfinity)
}

/// `point + scalar * G`. A zero scalar leaves the point unchanged.
pub fn point_add_base_mul(
    secp: &Secp256k1<All>,
    point: &PublicKey,
    scalar: &[u8; 32],
) -> Result<PublicKey, CurveError> {
    if scalar.iter().all(|&b| b == 0) {
        return Ok(*point);
    }
    point_add(point, &scalar_mul_base(secp, scalar)?)
}

pub fn point_to_compressed(point: &PublicKey) -> [u8; 33] {
    point.serialize()
}

/// Parses a 33-byte SEC1 compressed point (`0x02`/`0x03` prefix only).
pub fn compressed_to_point(bytes: &[u8; 33]) -> Result<PublicKey, CurveError> {
    if !matches!(bytes[0], 0x02 | 0x03) {
        return Err(CurveError::InvalidPoint);
    }
    PublicKey::from_slice(bytes).map_err(|_| CurveError::InvalidPoint)
}
