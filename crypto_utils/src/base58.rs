use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Base58Error {
    #[error("invalid base58 character {0:?}")]
    InvalidCharacter(char),
    #[error("invalid base58 length")]
    InvalidLength,
    #[error("base58check checksum mismatch")]
    InvalidChecksum,
}

pub const BITCOIN_ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
pub const FLICKR_ALPHABET: &[u8; 58] = b"123456789abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ";
pub const RIPPLE_ALPHABET: &[u8; 58] = b"rpshnaf39wBUDNEGHJKLM4PQRST7VWXYZ2bcdeCg65jkm8oFqi1tuvAxyz";

/// Base58 digit tables. Every table maps digit values 0..58 to a character;
/// only the character assignment differs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Alphabet {
    #[default]
    Bitcoin,
    Flickr,
    Ripple,
}

impl Alphabet {
    pub fn chars(self) -> &'static [u8; 58] {
        match self {
            Alphabet::Bitcoin => BITCOIN_ALPHABET,
            Alphabet::Flickr => FLICKR_ALPHABET,
            Alphabet::Ripple => RIPPLE_ALPHABET,
        }
    }

    fn table(self) -> &'static bs58::Alphabet {
        match self {
            Alphabet::Bitcoin => bs58::Alphabet::BITCOIN,
            Alphabet::Flickr => bs58::Alphabet::FLICKR,
            Alphabet::Ripple => bs58::Alphabet::RIPPLE,
        }
    }
}

pub fn base58_encode(data: &[u8]) -> String {
    base58_encode_with(data, Alphabet::Bitcoin)
}

pub fn base58_encode_with(data: &[u8], alphabet: Alphabet) -> String {
    bs58::encode(data).with_alphabet(alphabet.table()).into_string()
}

pub fn base58_decode(s: &str) -> Result<Vec<u8>, Base58Error> {
    base58_decode_with(s, Alphabet::Bitcoin)
}

pub fn base58_decode_with(s: &str, alphabet: Alphabet) -> Result<Vec<u8>, Base58Error> {
    if s.is_empty() {
        return Err(Base58Error::InvalidLength);
    }
    bs58::decode(s)
        .with_alphabet(alphabet.table())
        .into_vec()
        .map_err(|e| decode_error(s, e))
}

fn decode_error(s: &str, e: bs58::decode::Error) -> Base58Error {
    match e {
        bs58::decode::Error::InvalidCharacter { character, .. } => {
            Base58Error::InvalidCharacter(character)
        }
        bs58::decode::Error::NonAsciiCharacter { index } => {
            Base58Error::InvalidCharacter(s[index..].chars().next().unwrap_or('\u{fffd}'))
        }
        bs58::decode::Error::InvalidChecksum { .. } => Base58Error::InvalidChecksum,
        _ => Base58Error::InvalidLength,
    }
}

/// Rewrites `s` digit by digit from one alphabet into another, leaving the
/// encoded value unchanged.
pub fn translate_alphabet(s: &str, from: Alphabet, to: Alphabet) -> Result<String, Base58Error> {
    let (src, dst) = (from.chars(), to.chars());
    s.chars()
        .map(|c| {
            u8::try_from(c)
                .ok()
                .and_then(|b| src.iter().position(|&x| x == b))
                .map(|digit| dst[digit] as char)
                .ok_or(Base58Error::InvalidCharacter(c))
        })
        .collect()
}

/// `payload || sha256d(payload)[..4]` in the Bitcoin alphabet.
pub fn base58_check_encode(payload: &[u8]) -> String {
    bs58::encode(payload).with_check().into_string()
}

pub fn base58_check_decode(s: &str) -> Result<Vec<u8>, Base58Error> {
    if s.is_empty() {
        return Err(Base58Error::InvalidLength);
    }
    bs58::decode(s)
        .with_check(None)
        .into_vec()
        .map_err(|e| decode_error(s, e))
}
