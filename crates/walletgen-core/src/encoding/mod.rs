//! Private key serialization per network
//!
//! - EVM: 64 lowercase hex characters, no prefix
//! - Sui: bech32 of `0x00 || key` under HRP `suiprivkey` (the leading byte
//!   is the Ed25519 signature-scheme flag)
//! - Aptos: 64 lowercase hex characters, no prefix
//!
//! Addresses are produced by the drivers and never re-encoded here.

pub mod bech32;

use crate::network::{NetworkFamily, NetworkId};
use thiserror::Error;
use zeroize::Zeroizing;

/// Raw private key length for every supported curve
pub const PRIVATE_KEY_LEN: usize = 32;

/// Human-readable part of Sui private key strings
pub const SUI_PRIVATE_KEY_HRP: &str = "suiprivkey";

/// Sui signature-scheme flag for Ed25519
pub const SUI_ED25519_FLAG: u8 = 0x00;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Encoding failed for {network}: {reason}")]
    EncodingFailed { network: NetworkId, reason: String },
}

/// Serialize raw private key bytes in the format the network's wallets import.
pub fn encode_private_key(raw: &[u8], network: NetworkId) -> Result<Zeroizing<String>, EncodeError> {
    if raw.len() != PRIVATE_KEY_LEN {
        return Err(EncodeError::EncodingFailed {
            network,
            reason: format!(
                "expected {} key bytes, got {}",
                PRIVATE_KEY_LEN,
                raw.len()
            ),
        });
    }

    match network.family() {
        NetworkFamily::Evm | NetworkFamily::Aptos => Ok(Zeroizing::new(hex::encode(raw))),
        NetworkFamily::Sui => encode_sui_private_key(raw).map_err(|e| EncodeError::EncodingFailed {
            network,
            reason: e.to_string(),
        }),
    }
}

fn encode_sui_private_key(raw: &[u8]) -> Result<Zeroizing<String>, bech32::Bech32Error> {
    let mut tagged = Zeroizing::new(Vec::with_capacity(1 + raw.len()));
    tagged.push(SUI_ED25519_FLAG);
    tagged.extend_from_slice(raw);

    Ok(Zeroizing::new(bech32::encode_bytes(SUI_PRIVATE_KEY_HRP, &tagged)?))
}
