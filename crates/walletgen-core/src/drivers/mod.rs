//! Network derivation drivers
//!
//! One driver per network family turns a [`RawSeed`] and an address index into
//! a [`DerivedCredential`]:
//!
//! - [`EvmDriver`]: BIP-32 secp256k1, Keccak-256 address (EIP-55 checksummed)
//! - [`SuiDriver`]: SLIP-0010 Ed25519, BLAKE2b-256 address
//! - [`AptosDriver`]: SLIP-0010 Ed25519, SHA3-256 authentication-key address
//!
//! Drivers are built once per [`NetworkSpec`] with [`driver_for`] and only
//! looked up afterwards.

mod aptos;
mod evm;
mod slip10;
mod sui;

pub use aptos::AptosDriver;
pub use evm::{checksum_address, EvmDriver};
pub use sui::SuiDriver;

use crate::encoding::PRIVATE_KEY_LEN;
use crate::network::{NetworkFamily, NetworkId, NetworkSpec};
use crate::seed::RawSeed;
use std::fmt;
use thiserror::Error;
use zeroize::Zeroizing;

#[derive(Error, Debug)]
pub enum DeriveError {
    #[error("Derivation failed for {network}: {reason}")]
    DerivationFailed { network: NetworkId, reason: String },
}

impl DeriveError {
    pub(crate) fn failed(network: NetworkId, reason: impl fmt::Display) -> Self {
        Self::DerivationFailed {
            network,
            reason: reason.to_string(),
        }
    }
}

/// A private key and address derived for one network.
///
/// Owns its key bytes outright (nothing points back into the seed) and wipes
/// them on drop.
pub struct DerivedCredential {
    network: NetworkId,
    path: String,
    address: String,
    public_key: Vec<u8>,
    private_key: Zeroizing<[u8; PRIVATE_KEY_LEN]>,
}

impl DerivedCredential {
    pub(crate) fn new(
        network: NetworkId,
        path: String,
        address: String,
        public_key: Vec<u8>,
        private_key: Zeroizing<[u8; PRIVATE_KEY_LEN]>,
    ) -> Self {
        Self {
            network,
            path,
            address,
            public_key,
            private_key,
        }
    }

    pub fn network(&self) -> NetworkId {
        self.network
    }

    /// Concrete derivation path the key came from
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    pub fn private_key(&self) -> &[u8; PRIVATE_KEY_LEN] {
        &self.private_key
    }
}

impl fmt::Debug for DerivedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedCredential")
            .field("network", &self.network)
            .field("path", &self.path)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Capability shared by every network driver.
pub trait Derivable: Send + Sync {
    /// Network this driver was built for
    fn network(&self) -> NetworkId;

    /// Derive the key pair at `index` and render its address.
    fn derive(&self, seed: &RawSeed, index: u32) -> Result<DerivedCredential, DeriveError>;
}

/// Build the driver matching a network's family.
pub fn driver_for(spec: &NetworkSpec) -> Box<dyn Derivable> {
    match spec.family {
        NetworkFamily::Evm => Box::new(EvmDriver::new(spec.clone())),
        NetworkFamily::Sui => Box::new(SuiDriver::new(spec.clone())),
        NetworkFamily::Aptos => Box::new(AptosDriver::new(spec.clone())),
    }
}
