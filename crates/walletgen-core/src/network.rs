//! Supported networks and their derivation parameters
//!
//! The registry is an immutable table built once at startup (optionally with
//! configuration overrides) and handed to the batch orchestrator.
//!
//! | key | id        | family | coin type | default path                  |
//! |-----|-----------|--------|-----------|-------------------------------|
//! | 1   | ethereum  | EVM    | 60        | `m/44'/60'/0'/0/{index}`      |
//! | 2   | bsc       | EVM    | 60        | `m/44'/60'/0'/0/{index}`      |
//! | 3   | polygon   | EVM    | 60        | `m/44'/60'/0'/0/{index}`      |
//! | 4   | avalanche | EVM    | 60        | `m/44'/60'/0'/0/{index}`      |
//! | 5   | fantom    | EVM    | 60        | `m/44'/60'/0'/0/{index}`      |
//! | 6   | sui       | Sui    | 784       | `m/44'/784'/0'/0'/{index}'`   |
//! | 7   | aptos     | Aptos  | 637       | `m/44'/637'/{index}'/0'/0'`   |

use crate::path::{parse_hardened_path, parse_path, PathError, PathTemplate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// SLIP-44 coin types used by the built-in networks
pub mod coin_type {
    pub const ETHEREUM: u32 = 60;
    pub const APTOS: u32 = 637;
    pub const SUI: u32 = 784;
}

const EVM_PATH: &str = "m/44'/{coin}'/0'/0/{index}";
const SUI_PATH: &str = "m/44'/{coin}'/0'/0'/{index}'";
const APTOS_PATH: &str = "m/44'/{coin}'/{index}'/0'/0'";

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),
    #[error("Invalid path template for {network}: {source}")]
    InvalidTemplate {
        network: NetworkId,
        #[source]
        source: PathError,
    },
    #[error("All networks are disabled")]
    Empty,
}

/// Identifier of a supported network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    Ethereum,
    Bsc,
    Polygon,
    Avalanche,
    Fantom,
    Sui,
    Aptos,
}

impl NetworkId {
    pub const ALL: [NetworkId; 7] = [
        NetworkId::Ethereum,
        NetworkId::Bsc,
        NetworkId::Polygon,
        NetworkId::Avalanche,
        NetworkId::Fantom,
        NetworkId::Sui,
        NetworkId::Aptos,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ethereum => "ethereum",
            Self::Bsc => "bsc",
            Self::Polygon => "polygon",
            Self::Avalanche => "avalanche",
            Self::Fantom => "fantom",
            Self::Sui => "sui",
            Self::Aptos => "aptos",
        }
    }

    pub fn family(self) -> NetworkFamily {
        match self {
            Self::Sui => NetworkFamily::Sui,
            Self::Aptos => NetworkFamily::Aptos,
            _ => NetworkFamily::Evm,
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkId {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| RegistryError::UnknownNetwork(s.to_string()))
    }
}

/// Cryptographic pipeline shared by a group of networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkFamily {
    /// secp256k1, BIP-32, Keccak-256 addresses
    Evm,
    /// Ed25519, SLIP-0010, BLAKE2b addresses, bech32 private keys
    Sui,
    /// Ed25519, SLIP-0010, SHA3-256 authentication-key addresses
    Aptos,
}

/// Static description of one network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSpec {
    pub id: NetworkId,
    /// Menu selector ("1".."7")
    pub key: &'static str,
    pub display_name: &'static str,
    pub icon: &'static str,
    pub family: NetworkFamily,
    pub coin_type: u32,
    pub path_template: PathTemplate,
}

impl NetworkSpec {
    /// Concrete derivation path for an address index.
    pub fn derivation_path(&self, index: u32) -> String {
        self.path_template.render(self.coin_type, index)
    }

    /// Check that the template renders to a path this family can derive.
    ///
    /// Ed25519 families need every segment hardened.
    pub fn check_path(&self) -> Result<(), PathError> {
        let path = self.derivation_path(0);
        match self.family {
            NetworkFamily::Evm => parse_path(&path).map(drop),
            NetworkFamily::Sui | NetworkFamily::Aptos => parse_hardened_path(&path).map(drop),
        }
    }
}

/// Per-network configuration override
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkOverride {
    pub id: String,
    #[serde(default)]
    pub coin_type: Option<u32>,
    #[serde(default)]
    pub path_template: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Immutable table of enabled networks, in menu order
#[derive(Debug, Clone)]
pub struct NetworkRegistry {
    specs: Vec<NetworkSpec>,
}

impl NetworkRegistry {
    /// The seven built-in networks with their default parameters.
    pub fn builtin() -> Self {
        let evm = |id, key, display_name, icon| NetworkSpec {
            id,
            key,
            display_name,
            icon,
            family: NetworkFamily::Evm,
            coin_type: coin_type::ETHEREUM,
            path_template: PathTemplate(EVM_PATH.to_string()),
        };

        Self {
            specs: vec![
                evm(NetworkId::Ethereum, "1", "Ethereum", "🌍"),
                evm(NetworkId::Bsc, "2", "Binance Smart Chain", "🔶"),
                evm(NetworkId::Polygon, "3", "Polygon", "🔺"),
                evm(NetworkId::Avalanche, "4", "Avalanche", "❄️"),
                evm(NetworkId::Fantom, "5", "Fantom", "👻"),
                NetworkSpec {
                    id: NetworkId::Sui,
                    key: "6",
                    display_name: "Sui",
                    icon: "🐢",
                    family: NetworkFamily::Sui,
                    coin_type: coin_type::SUI,
                    path_template: PathTemplate(SUI_PATH.to_string()),
                },
                NetworkSpec {
                    id: NetworkId::Aptos,
                    key: "7",
                    display_name: "Aptos",
                    icon: "🐎",
                    family: NetworkFamily::Aptos,
                    coin_type: coin_type::APTOS,
                    path_template: PathTemplate(APTOS_PATH.to_string()),
                },
            ],
        }
    }

    /// Built-in table with configuration overrides applied.
    pub fn with_overrides(overrides: &[NetworkOverride]) -> Result<Self, RegistryError> {
        let mut registry = Self::builtin();
        let mut disabled = Vec::new();

        for o in overrides {
            let id: NetworkId = o.id.parse()?;
            let Some(spec) = registry.specs.iter_mut().find(|s| s.id == id) else {
                continue;
            };
            if let Some(coin) = o.coin_type {
                spec.coin_type = coin;
            }
            if let Some(ref template) = o.path_template {
                spec.path_template = PathTemplate::new(template.as_str())
                    .map_err(|source| RegistryError::InvalidTemplate { network: id, source })?;
            }
            if o.enabled == Some(false) {
                disabled.push(id);
            }
        }

        registry.specs.retain(|s| !disabled.contains(&s.id));
        if registry.specs.is_empty() {
            return Err(RegistryError::Empty);
        }
        for spec in &registry.specs {
            spec.check_path()
                .map_err(|source| RegistryError::InvalidTemplate { network: spec.id, source })?;
        }
        Ok(registry)
    }

    pub fn get(&self, id: NetworkId) -> Option<&NetworkSpec> {
        self.specs.iter().find(|s| s.id == id)
    }

    /// Find a network by menu key, id or display name (case-insensitive).
    pub fn resolve(&self, token: &str) -> Option<&NetworkSpec> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        self.specs.iter().find(|s| {
            s.key == token
                || s.id.as_str().eq_ignore_ascii_case(token)
                || s.display_name.eq_ignore_ascii_case(token)
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &NetworkSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for NetworkRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
