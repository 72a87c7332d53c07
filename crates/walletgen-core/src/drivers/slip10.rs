//! SLIP-0010 private key derivation for Ed25519
//!
//! Only hardened children exist on this curve, and any 32 bytes are a valid
//! secret, so the only failure is a malformed path.
//!
//! Reference: https://github.com/satoshilabs/slips/blob/master/slip-0010.md

use crate::encoding::PRIVATE_KEY_LEN;
use crate::path::HARDENED;
use hmac::{Hmac, Mac};
use sha2::Sha512;
use zeroize::{Zeroize, Zeroizing};

type HmacSha512 = Hmac<Sha512>;

const MASTER_SECRET: &[u8] = b"ed25519 seed";

type KeyPair = (Zeroizing<[u8; 32]>, Zeroizing<[u8; 32]>);

/// Derive the secret key at `path`. Every index must carry the hardened bit.
pub(crate) fn derive_ed25519(
    seed: &[u8],
    path: &[u32],
) -> Result<Zeroizing<[u8; PRIVATE_KEY_LEN]>, String> {
    let (mut key, mut chain_code) = hmac_split(MASTER_SECRET, &[seed])?;

    for &index in path {
        if index & HARDENED == 0 {
            return Err(format!("index {} is not hardened", index));
        }
        let index_bytes = index.to_be_bytes();
        let parts: [&[u8]; 3] = [&[0x00], key.as_slice(), &index_bytes];
        (key, chain_code) = hmac_split(chain_code.as_slice(), &parts)?;
    }

    Ok(key)
}

/// HMAC-SHA512 over the concatenated parts, split into (IL, IR).
fn hmac_split(key: &[u8], parts: &[&[u8]]) -> Result<KeyPair, String> {
    let mut mac = HmacSha512::new_from_slice(key).map_err(|e| format!("HMAC init failed: {}", e))?;
    for part in parts {
        mac.update(part);
    }

    let mut out = [0u8; 64];
    out.copy_from_slice(&mac.finalize().into_bytes());

    let mut left = Zeroizing::new([0u8; 32]);
    let mut right = Zeroizing::new([0u8; 32]);
    left.copy_from_slice(&out[..32]);
    right.copy_from_slice(&out[32..]);
    out.zeroize();

    Ok((left, right))
}
