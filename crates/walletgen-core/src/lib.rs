//! Walletgen Core
//!
//! Mnemonic generation and multi-network key derivation.
//!
//! # Pipeline
//!
//! Each wallet gets its own BIP-39 mnemonic:
//! - Seed: PBKDF2-HMAC-SHA512 over the mnemonic and optional passphrase
//! - EVM chains: BIP-32 secp256k1 at m/44'/60'/0'/0/{index}
//! - Sui: SLIP-0010 Ed25519 at m/44'/784'/0'/0'/{index}'
//! - Aptos: SLIP-0010 Ed25519 at m/44'/637'/{index}'/0'/0'
//!
//! # Secrets
//!
//! Seeds live in mlocked, zeroize-on-drop buffers; private keys and
//! mnemonics in `Zeroizing` containers. Nothing secret is logged.

pub mod batch;
pub mod drivers;
pub mod encoding;
pub mod memory;
pub mod network;
pub mod path;
pub mod seed;

pub use batch::{
    generate_batch, resolve_selection, verify_record, BatchError, BatchOptions, BatchOrchestrator,
    BatchOutput, BatchReport, NetworkSummary, Skip, WalletRecord,
};
pub use drivers::{driver_for, Derivable, DeriveError, DerivedCredential};
pub use encoding::{encode_private_key, EncodeError};
pub use network::{NetworkFamily, NetworkId, NetworkOverride, NetworkRegistry, NetworkSpec, RegistryError};
pub use path::{PathError, PathTemplate};
pub use seed::*;
