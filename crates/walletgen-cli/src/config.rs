//! Generator configuration, parsed from TOML plus environment overrides.
//!
//! Priority: command-line flags > environment variables > config file > defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use walletgen_core::{BatchOptions, NetworkOverride, NetworkRegistry, Strength};
use walletgen_export::ExportConfig;
use zeroize::Zeroizing;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletgenConfig {
    /// Mnemonic and derivation settings
    #[serde(default)]
    pub generator: GeneratorSection,

    /// Output location and formats
    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub logging: LoggingSection,

    /// Per-network coin type / path overrides
    #[serde(default)]
    pub networks: Vec<NetworkOverride>,
}

/// Mnemonic and derivation settings
#[derive(Clone, Serialize, Deserialize)]
pub struct GeneratorSection {
    /// Mnemonic entropy in bits: 128, 160, 192, 224 or 256
    #[serde(default = "default_strength")]
    pub strength: u32,

    /// BIP-39 passphrase applied to every generated mnemonic
    #[serde(default)]
    pub passphrase: String,

    /// Address index substituted into each path template
    #[serde(default)]
    pub path_index: u32,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            strength: default_strength(),
            passphrase: String::new(),
            path_index: 0,
        }
    }
}

impl fmt::Debug for GeneratorSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorSection")
            .field("strength", &self.strength)
            .field("passphrase", &"[REDACTED]")
            .field("path_index", &self.path_index)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ============================================================================
// Default value functions
// ============================================================================

fn default_strength() -> u32 {
    128
}

fn default_log_level() -> String {
    "info".to_string()
}

// ============================================================================
// Loading & environment override
// ============================================================================

impl WalletgenConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: WalletgenConfig =
            toml::from_str(&contents).with_context(|| "Failed to parse TOML config")?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise start from defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `WALLETGEN_LOG_LEVEL`
    /// - `WALLETGEN_OUTPUT_DIR`
    /// - `WALLETGEN_STRENGTH`
    /// - `WALLETGEN_PASSPHRASE`
    /// - `WALLETGEN_PATH_INDEX`
    pub fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("WALLETGEN_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Ok(v) = std::env::var("WALLETGEN_OUTPUT_DIR") {
            self.export.output_dir = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("WALLETGEN_STRENGTH") {
            if let Ok(bits) = v.parse::<u32>() {
                self.generator.strength = bits;
            }
        }
        if let Ok(v) = std::env::var("WALLETGEN_PASSPHRASE") {
            self.generator.passphrase = v;
        }
        if let Ok(v) = std::env::var("WALLETGEN_PATH_INDEX") {
            if let Ok(index) = v.parse::<u32>() {
                self.generator.path_index = index;
            }
        }
    }

    /// Built-in networks with this config's overrides applied.
    pub fn registry(&self) -> Result<NetworkRegistry> {
        NetworkRegistry::with_overrides(&self.networks).context("Invalid [[networks]] override")
    }

    pub fn batch_options(&self) -> Result<BatchOptions> {
        Ok(BatchOptions {
            strength: Strength::from_bits(self.generator.strength)?,
            passphrase: Zeroizing::new(self.generator.passphrase.clone()),
            path_index: self.generator.path_index,
        })
    }

    /// Validate that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        Strength::from_bits(self.generator.strength).context("generator.strength")?;

        anyhow::ensure!(
            !self.export.formats.is_empty(),
            "export.formats must list at least one of \"csv\", \"txt\""
        );

        anyhow::ensure!(
            !self.logging.level.trim().is_empty(),
            "logging.level must not be empty"
        );

        // Unknown ids, bad templates and an all-disabled table
        self.registry()?;

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
