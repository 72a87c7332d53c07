//! Aptos driver
//!
//! SLIP-0010 Ed25519 along `m/44'/637'/{index}'/0'/0'`. The account address
//! is the single-key authentication key: SHA3-256 over the public key and
//! the Ed25519 scheme byte.

use super::{slip10, Derivable, DeriveError, DerivedCredential};
use crate::network::{NetworkId, NetworkSpec};
use crate::path::parse_hardened_path;
use crate::seed::RawSeed;
use ed25519_dalek::SigningKey;
use sha3::{Digest, Sha3_256};

/// Authentication-key scheme byte for single Ed25519 keys
const ED25519_SCHEME: u8 = 0x00;

pub struct AptosDriver {
    spec: NetworkSpec,
}

impl AptosDriver {
    pub fn new(spec: NetworkSpec) -> Self {
        Self { spec }
    }
}

impl Derivable for AptosDriver {
    fn network(&self) -> NetworkId {
        self.spec.id
    }

    fn derive(&self, seed: &RawSeed, index: u32) -> Result<DerivedCredential, DeriveError> {
        let network = self.spec.id;
        let path_str = self.spec.derivation_path(index);
        let path = parse_hardened_path(&path_str).map_err(|e| DeriveError::failed(network, e))?;

        let secret = slip10::derive_ed25519(seed.as_bytes(), &path)
            .map_err(|e| DeriveError::failed(network, e))?;
        let public = SigningKey::from_bytes(&secret).verifying_key().to_bytes();

        let mut hasher = Sha3_256::new();
        hasher.update(public);
        hasher.update([ED25519_SCHEME]);
        let address = format!("0x{}", hex::encode(hasher.finalize()));

        Ok(DerivedCredential::new(network, path_str, address, public.to_vec(), secret))
    }
}
