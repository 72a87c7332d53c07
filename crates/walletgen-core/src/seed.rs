//! BIP-39 mnemonic generation and seed derivation
//!
//! Entropy is drawn from the operating system (or any caller-supplied
//! cryptographic RNG), turned into a checksummed English mnemonic, and later
//! stretched into a 64-byte [`RawSeed`] with PBKDF2-HMAC-SHA512.

use crate::memory::LockedBytes;
use bip39::{Language, Mnemonic};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use std::fmt;
use thiserror::Error;
use zeroize::Zeroizing;

/// Length of a BIP-39 seed in bytes
pub const SEED_LEN: usize = 64;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Insufficient entropy: {0}")]
    InsufficientEntropy(String),
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),
    #[error("Unsupported mnemonic strength: {0} bits (expected 128, 160, 192, 224 or 256)")]
    UnsupportedStrength(u32),
}

/// Mnemonic strength in bits of entropy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strength {
    /// 12 words
    #[default]
    Bits128,
    /// 15 words
    Bits160,
    /// 18 words
    Bits192,
    /// 21 words
    Bits224,
    /// 24 words
    Bits256,
}

impl Strength {
    pub fn from_bits(bits: u32) -> Result<Self, SeedError> {
        match bits {
            128 => Ok(Self::Bits128),
            160 => Ok(Self::Bits160),
            192 => Ok(Self::Bits192),
            224 => Ok(Self::Bits224),
            256 => Ok(Self::Bits256),
            other => Err(SeedError::UnsupportedStrength(other)),
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            Self::Bits128 => 128,
            Self::Bits160 => 160,
            Self::Bits192 => 192,
            Self::Bits224 => 224,
            Self::Bits256 => 256,
        }
    }

    pub fn entropy_len(self) -> usize {
        self.bits() as usize / 8
    }

    /// Words in the resulting phrase (entropy + checksum, 11 bits per word)
    pub fn word_count(self) -> usize {
        (self.bits() as usize + self.bits() as usize / 32) / 11
    }
}

/// A checksum-valid English BIP-39 phrase.
///
/// `Debug` is redacted; use `Display` (or [`SeedPhrase::phrase`]) when the
/// words are really meant to leave the process.
#[derive(Clone, PartialEq, Eq)]
pub struct SeedPhrase {
    mnemonic: Mnemonic,
}

impl SeedPhrase {
    /// The space-separated words.
    pub fn phrase(&self) -> Zeroizing<String> {
        Zeroizing::new(self.mnemonic.to_string())
    }

    pub fn word_count(&self) -> usize {
        self.mnemonic.word_count()
    }

    /// Recover the original entropy bytes (checksum stripped).
    pub fn to_entropy(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.mnemonic.to_entropy())
    }

    /// Rebuild a phrase from raw entropy (16..=32 bytes, multiple of 4).
    pub fn from_entropy(entropy: &[u8]) -> Result<Self, SeedError> {
        let mnemonic = Mnemonic::from_entropy_in(Language::English, entropy)
            .map_err(|e| SeedError::InvalidMnemonic(e.to_string()))?;
        Ok(Self { mnemonic })
    }
}

impl fmt::Display for SeedPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.mnemonic, f)
    }
}

impl fmt::Debug for SeedPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SeedPhrase({} words, redacted)", self.word_count())
    }
}

/// The 64-byte BIP-39 seed.
///
/// Held in a locked buffer and wiped on drop, so every exit path out of a
/// derivation call releases it.
pub struct RawSeed {
    bytes: LockedBytes<SEED_LEN>,
}

impl RawSeed {
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        self.bytes.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn from_bytes(bytes: [u8; SEED_LEN]) -> Self {
        Self {
            bytes: LockedBytes::from_array(bytes),
        }
    }
}

impl fmt::Debug for RawSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawSeed(redacted)")
    }
}

/// Generate a new mnemonic from operating-system entropy.
pub fn generate_mnemonic(strength: Strength) -> Result<SeedPhrase, SeedError> {
    generate_mnemonic_with(&mut OsRng, strength)
}

/// Generate a new mnemonic from a caller-supplied cryptographic RNG.
///
/// Fails with [`SeedError::InsufficientEntropy`] if the RNG cannot fill the
/// requested number of bytes.
pub fn generate_mnemonic_with<R: RngCore + CryptoRng>(
    rng: &mut R,
    strength: Strength,
) -> Result<SeedPhrase, SeedError> {
    let mut entropy = Zeroizing::new(vec![0u8; strength.entropy_len()]);
    rng.try_fill_bytes(&mut entropy)
        .map_err(|e| SeedError::InsufficientEntropy(e.to_string()))?;
    SeedPhrase::from_entropy(&entropy)
}

/// Parse a phrase typed or pasted by a user.
///
/// Whitespace runs collapse to single spaces and words are lowercased before
/// the wordlist and checksum are checked.
pub fn parse_mnemonic(words: &str) -> Result<SeedPhrase, SeedError> {
    let normalized = Zeroizing::new(
        words
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" "),
    );
    let mnemonic = Mnemonic::parse_in(Language::English, normalized.as_str())
        .map_err(|e| SeedError::InvalidMnemonic(e.to_string()))?;
    Ok(SeedPhrase { mnemonic })
}

/// Derive the 64-byte seed from a phrase and optional passphrase.
pub fn derive_seed(phrase: &SeedPhrase, passphrase: &str) -> RawSeed {
    RawSeed {
        bytes: LockedBytes::from_array(phrase.mnemonic.to_seed(passphrase)),
    }
}
