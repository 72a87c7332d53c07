//! Sui driver
//!
//! SLIP-0010 Ed25519 along `m/44'/784'/0'/0'/{index}'`; the address is
//! BLAKE2b-256 over the scheme flag followed by the public key.

use super::{slip10, Derivable, DeriveError, DerivedCredential};
use crate::encoding::SUI_ED25519_FLAG;
use crate::network::{NetworkId, NetworkSpec};
use crate::path::parse_hardened_path;
use crate::seed::RawSeed;
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use ed25519_dalek::SigningKey;

type Blake2b256 = Blake2b<U32>;

pub struct SuiDriver {
    spec: NetworkSpec,
}

impl SuiDriver {
    pub fn new(spec: NetworkSpec) -> Self {
        Self { spec }
    }
}

impl Derivable for SuiDriver {
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

        let mut hasher = Blake2b256::new();
        hasher.update([SUI_ED25519_FLAG]);
        hasher.update(public);
        let address = format!("0x{}", hex::encode(hasher.finalize()));

        Ok(DerivedCredential::new(network, path_str, address, public.to_vec(), secret))
    }
}
