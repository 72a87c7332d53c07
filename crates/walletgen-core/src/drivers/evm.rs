//! EVM family driver (Ethereum, BSC, Polygon, Avalanche C-Chain, Fantom)
//!
//! BIP-32 secp256k1 derivation, then the last 20 bytes of Keccak-256 over the
//! uncompressed public key without its `0x04` tag.

use super::{Derivable, DeriveError, DerivedCredential};
use crate::network::{NetworkId, NetworkSpec};
use crate::seed::RawSeed;
use bitcoin::bip32::{DerivationPath, Xpriv};
use bitcoin::NetworkKind;
use secp256k1::{All, PublicKey, Secp256k1};
use sha3::{Digest, Keccak256};
use zeroize::Zeroizing;

pub struct EvmDriver {
    spec: NetworkSpec,
    secp: Secp256k1<All>,
}

impl EvmDriver {
    pub fn new(spec: NetworkSpec) -> Self {
        Self {
            spec,
            secp: Secp256k1::new(),
        }
    }
}

impl Derivable for EvmDriver {
    fn network(&self) -> NetworkId {
        self.spec.id
    }

    fn derive(&self, seed: &RawSeed, index: u32) -> Result<DerivedCredential, DeriveError> {
        let network = self.spec.id;
        let path_str = self.spec.derivation_path(index);
        let path: DerivationPath = path_str
            .parse()
            .map_err(|e: bitcoin::bip32::Error| DeriveError::failed(network, e))?;

        let mut master = Xpriv::new_master(NetworkKind::Main, seed.as_bytes())
            .map_err(|e| DeriveError::failed(network, e))?;
        let child = master.derive_priv(&self.secp, &path);
        master.private_key.non_secure_erase();
        let mut child = child.map_err(|e| DeriveError::failed(network, e))?;

        let private_key = Zeroizing::new(child.private_key.secret_bytes());
        let public = PublicKey::from_secret_key(&self.secp, &child.private_key);
        child.private_key.non_secure_erase();

        let address = address_from_uncompressed(&public.serialize_uncompressed());
        Ok(DerivedCredential::new(
            network,
            path_str,
            address,
            public.serialize().to_vec(),
            private_key,
        ))
    }
}

fn address_from_uncompressed(public: &[u8; 65]) -> String {
    let hash = Keccak256::digest(&public[1..]);
    checksum_address(&hash[12..])
}

/// Render 20 address bytes as `0x` plus EIP-55 mixed-case hex.
///
/// A letter is uppercased when the matching nibble of Keccak-256 over the
/// lowercase hex is 8 or more.
pub fn checksum_address(address: &[u8]) -> String {
    let lower = hex::encode(address);
    let hash = Keccak256::digest(lower.as_bytes());

    let mut out = String::with_capacity(2 + lower.len());
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let byte = hash[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}
