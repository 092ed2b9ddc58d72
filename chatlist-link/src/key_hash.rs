use base64::Engine as _;
use base64::alphabet::URL_SAFE;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::LinkError;

// Servers publish their fingerprints both with and without trailing '='.
const KEY_HASH_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// SHA-256 fingerprint of an SMP server's identity certificate.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyHash([u8; Self::LEN]);

impl KeyHash {
    pub const LEN: usize = 32;

    pub fn from_bytes(hash: [u8; Self::LEN]) -> Self {
        Self(hash)
    }

    pub fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }
}

impl From<KeyHash> for [u8; KeyHash::LEN] {
    fn from(hash: KeyHash) -> Self {
        hash.0
    }
}

impl std::fmt::Display for KeyHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&KEY_HASH_ENGINE.encode(self.as_bytes()))
    }
}

impl std::str::FromStr for KeyHash {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = KEY_HASH_ENGINE
            .decode(s)
            .map_err(|e| LinkError::InvalidKeyHash(e.to_string()))?
            .try_into()
            .map_err(|v: Vec<u8>| {
                LinkError::InvalidKeyHash(format!("invalid length: {}", v.len()))
            })?;
        Ok(Self::from_bytes(bytes))
    }
}

impl std::fmt::Debug for KeyHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}
