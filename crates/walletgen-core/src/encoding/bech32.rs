//! Bech32 (BIP-173) byte strings
//!
//! Used for Sui's `suiprivkey1...` private key strings. Checksums and the
//! 8→5 bit regrouping come from the `bech32` crate; this module only fixes the
//! checksum variant to original Bech32 and maps errors into one type.
//!
//! Reference: https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki

use ::bech32::{Bech32, Hrp};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Bech32Error {
    #[error("Invalid human-readable part: {0}")]
    InvalidHrp(#[from] ::bech32::primitives::hrp::Error),
    #[error("Bech32 encoding failed: {0}")]
    Encode(#[from] ::bech32::EncodeError),
    #[error("Bech32 decoding failed: {0}")]
    Decode(#[from] ::bech32::DecodeError),
}

/// Encode arbitrary bytes under `hrp`. The output is lowercase.
pub fn encode_bytes(hrp: &str, bytes: &[u8]) -> Result<String, Bech32Error> {
    let hrp = Hrp::parse(hrp)?;
    Ok(::bech32::encode::<Bech32>(hrp, bytes)?)
}

/// Decode a bech32 string into its lowercase HRP and payload bytes.
///
/// Inverse of [`encode_bytes`]. Upper-case input is accepted, mixed case is
/// not.
pub fn decode_bytes(s: &str) -> Result<(String, Vec<u8>), Bech32Error> {
    let (hrp, bytes) = ::bech32::decode(s)?;
    Ok((hrp.to_lowercase(), bytes))
}
