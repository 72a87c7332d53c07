//! Derivation path templates
//!
//! Network specs carry a template such as `m/44'/{coin}'/0'/0/{index}`.
//! Rendering substitutes the configured coin type and the requested address
//! index; the drivers then parse the concrete path with their own rules
//! (BIP-32 for secp256k1, SLIP-0010 for Ed25519).

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// BIP-32 hardened offset
pub const HARDENED: u32 = 0x8000_0000;

const COIN_PLACEHOLDER: &str = "{coin}";
const INDEX_PLACEHOLDER: &str = "{index}";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Path must start with 'm/': {0}")]
    MissingRoot(String),
    #[error("Invalid path segment '{segment}' in {path}")]
    InvalidSegment { path: String, segment: String },
    #[error("Ed25519 paths must be fully hardened, '{segment}' is not (in {path})")]
    NotHardened { path: String, segment: String },
    #[error("Template has no {{index}} placeholder: {0}")]
    MissingIndex(String),
}

/// A derivation path with `{coin}` and `{index}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathTemplate(pub(crate) String);

impl PathTemplate {
    /// Build a template, checking only that it can vary per index.
    pub fn new(template: impl Into<String>) -> Result<Self, PathError> {
        let template = template.into();
        if !template.trim_start().starts_with("m/") {
            return Err(PathError::MissingRoot(template));
        }
        if !template.contains(INDEX_PLACEHOLDER) {
            return Err(PathError::MissingIndex(template));
        }
        Ok(Self(template))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substitute coin type and address index.
    pub fn render(&self, coin_type: u32, index: u32) -> String {
        self.0
            .trim()
            .replace(COIN_PLACEHOLDER, &coin_type.to_string())
            .replace(INDEX_PLACEHOLDER, &index.to_string())
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse a concrete path into child indices, hardened ones with the
/// [`HARDENED`] bit set. Accepts both `'` and `h` as hardened markers.
pub fn parse_path(path: &str) -> Result<Vec<u32>, PathError> {
    let trimmed = path.trim();
    let rest = trimmed
        .strip_prefix("m/")
        .ok_or_else(|| PathError::MissingRoot(path.to_string()))?;

    rest.split('/')
        .map(|segment| {
            let invalid = || PathError::InvalidSegment {
                path: trimmed.to_string(),
                segment: segment.to_string(),
            };
            let (digits, hardened) = match segment
                .strip_suffix('\'')
                .or_else(|| segment.strip_suffix('h'))
            {
                Some(digits) => (digits, true),
                None => (segment, false),
            };
            let index: u32 = digits.parse().map_err(|_| invalid())?;
            if index >= HARDENED {
                return Err(invalid());
            }
            Ok(if hardened { index | HARDENED } else { index })
        })
        .collect()
}

/// Parse a path that must be hardened at every level (SLIP-0010 Ed25519).
pub fn parse_hardened_path(path: &str) -> Result<Vec<u32>, PathError> {
    let indices = parse_path(path)?;
    let trimmed = path.trim();
    for (segment, index) in trimmed[2..].split('/').zip(&indices) {
        if index & HARDENED == 0 {
            return Err(PathError::NotHardened {
                path: trimmed.to_string(),
                segment: segment.to_string(),
            });
        }
    }
    Ok(indices)
}
