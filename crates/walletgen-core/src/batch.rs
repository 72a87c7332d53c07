//! Batch orchestration
//!
//! Drives `count` iterations per selected network. Every iteration draws a
//! fresh mnemonic, stretches it into a seed, derives through the network's
//! driver and encodes the private key, yielding one [`WalletRecord`].
//!
//! # Ordering
//!
//! Records are grouped by network in selection order; within a network they
//! follow iteration order. Selecting `[X, Y]` with count 2 yields
//! `[X#1, X#2, Y#1, Y#2]`.
//!
//! # Failure policy
//!
//! - Invalid selections and non-positive counts fail before any entropy is
//!   drawn.
//! - Entropy failure aborts the whole batch.
//! - Derivation or encoding failure skips that iteration only; the skip is
//!   itemised in the [`BatchReport`].

use crate::drivers::{driver_for, Derivable, DerivedCredential};
use crate::encoding::encode_private_key;
use crate::network::{NetworkId, NetworkRegistry, NetworkSpec};
use crate::seed::{derive_seed, generate_mnemonic_with, parse_mnemonic, SeedError, Strength};
use log::{debug, info, warn};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Upper bound on the record buffer reserved before generation starts
const MAX_PREALLOCATED_RECORDS: usize = 4096;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Insufficient entropy: {0}")]
    InsufficientEntropy(String),
}

/// One generated wallet, as handed to the export layer.
///
/// Field names double as the export column headers.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct WalletRecord {
    /// 1-based iteration number within its network
    #[serde(rename = "No")]
    pub sequence_number: u32,
    #[serde(rename = "Network")]
    pub network_name: String,
    #[serde(rename = "Mnemonic Phrase")]
    pub mnemonic_phrase: String,
    #[serde(rename = "Private Key")]
    pub encoded_private_key: String,
    #[serde(rename = "Address")]
    pub address: String,
}

impl fmt::Debug for WalletRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletRecord")
            .field("sequence_number", &self.sequence_number)
            .field("network_name", &self.network_name)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Generation parameters shared by every iteration of a batch.
#[derive(Clone, Default)]
pub struct BatchOptions {
    pub strength: Strength,
    /// BIP-39 passphrase ("25th word")
    pub passphrase: Zeroizing<String>,
    /// Address index substituted into each network's path template
    pub path_index: u32,
}

impl fmt::Debug for BatchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchOptions")
            .field("strength", &self.strength)
            .field("passphrase", &"[REDACTED]")
            .field("path_index", &self.path_index)
            .finish()
    }
}

/// An iteration that produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skip {
    pub iteration: u32,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSummary {
    pub network: NetworkId,
    pub display_name: String,
    pub requested: u32,
    pub generated: u32,
    pub skipped: Vec<Skip>,
}

/// Requested vs. generated counts per network, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub networks: Vec<NetworkSummary>,
    /// Set when the batch stopped early on the interrupt flag
    pub interrupted: bool,
}

impl BatchReport {
    pub fn total_requested(&self) -> u64 {
        self.networks.iter().map(|n| n.requested as u64).sum()
    }

    pub fn total_generated(&self) -> u64 {
        self.networks.iter().map(|n| n.generated as u64).sum()
    }

    pub fn total_skipped(&self) -> usize {
        self.networks.iter().map(|n| n.skipped.len()).sum()
    }

    pub fn is_complete(&self) -> bool {
        !self.interrupted && self.total_generated() == self.total_requested()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for summary in &self.networks {
            writeln!(
                f,
                "{}: {}/{} generated",
                summary.display_name, summary.generated, summary.requested
            )?;
            for skip in &summary.skipped {
                writeln!(f, "  #{} skipped: {}", skip.iteration, skip.reason)?;
            }
        }
        write!(
            f,
            "Total: {}/{} generated",
            self.total_generated(),
            self.total_requested()
        )?;
        if self.interrupted {
            write!(f, " (interrupted)")?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct BatchOutput {
    pub records: Vec<WalletRecord>,
    pub report: BatchReport,
}

/// Split comma-separated selector text into network ids.
///
/// Tokens may be menu keys, ids or display names. Blank tokens are ignored;
/// an unknown token fails with [`BatchError::InvalidRequest`] naming it.
pub fn resolve_selection(registry: &NetworkRegistry, input: &str) -> Result<Vec<NetworkId>, BatchError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            registry
                .resolve(token)
                .map(|spec| spec.id)
                .ok_or_else(|| BatchError::InvalidRequest(format!("unknown network '{}'", token)))
        })
        .collect()
}

/// Check a request against the registry. Duplicates are dropped, keeping the
/// first occurrence.
fn validate_request<'a>(
    registry: &'a NetworkRegistry,
    networks: &[NetworkId],
    count: i64,
) -> Result<(Vec<&'a NetworkSpec>, u32), BatchError> {
    if networks.is_empty() {
        return Err(BatchError::InvalidRequest("no networks selected".into()));
    }
    if count <= 0 {
        return Err(BatchError::InvalidRequest(format!(
            "count must be positive, got {}",
            count
        )));
    }
    let count = u32::try_from(count)
        .map_err(|_| BatchError::InvalidRequest(format!("count {} is too large", count)))?;

    let mut selected: Vec<&NetworkSpec> = Vec::with_capacity(networks.len());
    for &id in networks {
        let spec = registry
            .get(id)
            .ok_or_else(|| BatchError::InvalidRequest(format!("network '{}' is not enabled", id)))?;
        if !selected.iter().any(|s| s.id == id) {
            selected.push(spec);
        }
    }

    Ok((selected, count))
}

enum IterationError {
    Fatal(BatchError),
    Skip(String),
}

struct Generated {
    phrase: Zeroizing<String>,
    credential: DerivedCredential,
    encoded: Zeroizing<String>,
}

fn generate_one<R: RngCore + CryptoRng>(
    rng: &mut R,
    driver: &dyn Derivable,
    options: &BatchOptions,
) -> Result<Generated, IterationError> {
    let phrase = generate_mnemonic_with(rng, options.strength).map_err(|e| match e {
        SeedError::InsufficientEntropy(reason) => {
            IterationError::Fatal(BatchError::InsufficientEntropy(reason))
        }
        other => IterationError::Fatal(BatchError::InvalidRequest(other.to_string())),
    })?;

    let credential = {
        let seed = derive_seed(&phrase, &options.passphrase);
        driver
            .derive(&seed, options.path_index)
            .map_err(|e| IterationError::Skip(e.to_string()))?
    };

    let encoded = encode_private_key(credential.private_key(), credential.network())
        .map_err(|e| IterationError::Skip(e.to_string()))?;

    Ok(Generated {
        phrase: phrase.phrase(),
        credential,
        encoded,
    })
}

/// Runs batches against a fixed registry.
///
/// Drivers are resolved once, at construction, from the registry's specs.
pub struct BatchOrchestrator<R = OsRng> {
    registry: NetworkRegistry,
    drivers: BTreeMap<NetworkId, Box<dyn Derivable>>,
    rng: R,
    interrupt: Option<Arc<AtomicBool>>,
}

impl BatchOrchestrator<OsRng> {
    /// Orchestrator drawing entropy from the operating system.
    pub fn new(registry: NetworkRegistry) -> Self {
        Self::with_rng(registry, OsRng)
    }
}

impl<R: RngCore + CryptoRng> BatchOrchestrator<R> {
    pub fn with_rng(registry: NetworkRegistry, rng: R) -> Self {
        let drivers = registry.iter().map(|spec| (spec.id, driver_for(spec))).collect();
        Self {
            registry,
            drivers,
            rng,
            interrupt: None,
        }
    }

    /// Stop between iterations once `flag` is set.
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    /// Replace the driver used for the driver's network.
    pub fn with_driver(mut self, driver: Box<dyn Derivable>) -> Self {
        self.drivers.insert(driver.network(), driver);
        self
    }

    pub fn registry(&self) -> &NetworkRegistry {
        &self.registry
    }

    /// Generate `count` wallets for each network in `networks`.
    pub fn generate_batch(
        &mut self,
        networks: &[NetworkId],
        count: i64,
        options: &BatchOptions,
    ) -> Result<BatchOutput, BatchError> {
        let Self {
            registry,
            drivers,
            rng,
            interrupt,
        } = self;

        let (selected, count) = validate_request(registry, networks, count)?;
        let mut jobs = Vec::with_capacity(selected.len());
        for spec in selected {
            let driver = drivers.get(&spec.id).ok_or_else(|| {
                BatchError::InvalidRequest(format!("no driver for network '{}'", spec.id))
            })?;
            jobs.push((spec, &**driver));
        }

        // Counts come from the user; the reservation must not scale with them
        let expected = jobs.len().saturating_mul(count as usize);
        let mut records = Vec::with_capacity(expected.min(MAX_PREALLOCATED_RECORDS));
        let mut report = BatchReport::default();

        for (spec, driver) in jobs {
            info!("Generating {} {} wallet(s)", count, spec.display_name);
            let mut summary = NetworkSummary {
                network: spec.id,
                display_name: spec.display_name.to_string(),
                requested: count,
                generated: 0,
                skipped: Vec::new(),
            };

            for iteration in 1..=count {
                if interrupt.as_ref().is_some_and(|flag| flag.load(Ordering::SeqCst)) {
                    warn!("Batch interrupted at {} #{}", spec.display_name, iteration);
                    report.interrupted = true;
                    break;
                }

                match generate_one(rng, driver, options) {
                    Ok(generated) => {
                        debug!(
                            "{} #{} -> {}",
                            spec.display_name,
                            iteration,
                            generated.credential.address()
                        );
                        records.push(WalletRecord {
                            sequence_number: iteration,
                            network_name: spec.display_name.to_string(),
                            mnemonic_phrase: generated.phrase.to_string(),
                            encoded_private_key: generated.encoded.to_string(),
                            address: generated.credential.address().to_string(),
                        });
                        summary.generated += 1;
                    }
                    Err(IterationError::Skip(reason)) => {
                        warn!("Skipping {} #{}: {}", spec.display_name, iteration, reason);
                        summary.skipped.push(Skip { iteration, reason });
                    }
                    Err(IterationError::Fatal(e)) => return Err(e),
                }
            }

            info!(
                "{}: {}/{} generated",
                summary.display_name, summary.generated, summary.requested
            );
            report.networks.push(summary);
            if report.interrupted {
                break;
            }
        }

        Ok(BatchOutput { records, report })
    }
}

/// One-shot batch with OS entropy and default options.
pub fn generate_batch(
    registry: &NetworkRegistry,
    networks: &[NetworkId],
    count: i64,
) -> Result<Vec<WalletRecord>, BatchError> {
    let output = BatchOrchestrator::new(registry.clone()).generate_batch(
        networks,
        count,
        &BatchOptions::default(),
    )?;
    Ok(output.records)
}

/// Re-derive a record from its mnemonic and check that the private key and
/// address match.
///
/// A record whose network is unknown or whose mnemonic does not parse is an
/// [`BatchError::InvalidRequest`]; a derivation that fails or disagrees is a
/// mismatch.
pub fn verify_record(
    registry: &NetworkRegistry,
    record: &WalletRecord,
    options: &BatchOptions,
) -> Result<bool, BatchError> {
    let spec = registry.resolve(&record.network_name).ok_or_else(|| {
        BatchError::InvalidRequest(format!("unknown network '{}'", record.network_name))
    })?;
    let phrase = parse_mnemonic(&record.mnemonic_phrase)
        .map_err(|e| BatchError::InvalidRequest(format!("record #{}: {}", record.sequence_number, e)))?;

    let credential = {
        let seed = derive_seed(&phrase, &options.passphrase);
        match driver_for(spec).derive(&seed, options.path_index) {
            Ok(credential) => credential,
            Err(e) => {
                warn!("Re-derivation of {} #{} failed: {}", spec.display_name, record.sequence_number, e);
                return Ok(false);
            }
        }
    };

    let encoded = match encode_private_key(credential.private_key(), spec.id) {
        Ok(encoded) => encoded,
        Err(e) => {
            warn!("Re-encoding of {} #{} failed: {}", spec.display_name, record.sequence_number, e);
            return Ok(false);
        }
    };

    Ok(encoded.as_str() == record.encoded_private_key && credential.address() == record.address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::{DeriveError, EvmDriver};
    use crate::encoding::bech32;
    use crate::seed::RawSeed;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::atomic::AtomicU32;

    fn orchestrator(seed: u64) -> BatchOrchestrator<StdRng> {
        BatchOrchestrator::with_rng(NetworkRegistry::builtin(), StdRng::seed_from_u64(seed))
    }

    fn is_lower_hex(s: &str) -> bool {
        s.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
    }

    /// RNG whose every draw fails
    struct DeadRng;

    impl RngCore for DeadRng {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            0
        }
        fn fill_bytes(&mut self, _dest: &mut [u8]) {}
        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new(std::io::Error::new(
                std::io::ErrorKind::Other,
                "entropy source offline",
            )))
        }
    }

    impl CryptoRng for DeadRng {}

    /// Fails on selected call numbers (1-based), otherwise derives normally.
    struct FlakyDriver {
        inner: EvmDriver,
        fail_on: Vec<u32>,
        calls: AtomicU32,
    }

    impl FlakyDriver {
        fn new(network: NetworkId, fail_on: Vec<u32>) -> Self {
            let spec = NetworkRegistry::builtin().get(network).unwrap().clone();
            Self {
                inner: EvmDriver::new(spec),
                fail_on,
                calls: AtomicU32::new(0),
            }
        }
    }

    impl Derivable for FlakyDriver {
        fn network(&self) -> NetworkId {
            self.inner.network()
        }

        fn derive(&self, seed: &RawSeed, index: u32) -> Result<DerivedCredential, DeriveError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_on.contains(&call) {
                return Err(DeriveError::failed(self.network(), "invalid point"));
            }
            self.inner.derive(seed, index)
        }
    }

    // ========================================================================
    // Ordering and shape
    // ========================================================================

    #[test]
    fn test_ordering_grouped_by_network() {
        let output = orchestrator(1)
            .generate_batch(
                &[NetworkId::Sui, NetworkId::Ethereum],
                2,
                &BatchOptions::default(),
            )
            .unwrap();

        let order: Vec<(&str, u32)> = output
            .records
            .iter()
            .map(|r| (r.network_name.as_str(), r.sequence_number))
            .collect();
        assert_eq!(
            order,
            vec![("Sui", 1), ("Sui", 2), ("Ethereum", 1), ("Ethereum", 2)]
        );
        assert!(output.report.is_complete());
    }

    #[test]
    fn test_record_shapes_per_family() {
        let output = orchestrator(2)
            .generate_batch(
                &[NetworkId::Polygon, NetworkId::Sui, NetworkId::Aptos],
                1,
                &BatchOptions::default(),
            )
            .unwrap();
        assert_eq!(output.records.len(), 3);

        let evm = &output.records[0];
        assert_eq!(evm.address.len(), 42);
        assert!(evm.address.starts_with("0x"));
        assert_eq!(evm.encoded_private_key.len(), 64);
        assert!(is_lower_hex(&evm.encoded_private_key));
        assert_eq!(evm.mnemonic_phrase.split(' ').count(), 12);

        let sui = &output.records[1];
        assert!(sui.encoded_private_key.starts_with("suiprivkey1"));
        assert!(bech32::decode_bytes(&sui.encoded_private_key).is_ok());
        assert_eq!(sui.address.len(), 66);

        let aptos = &output.records[2];
        assert_eq!(aptos.encoded_private_key.len(), 64);
        assert!(is_lower_hex(&aptos.encoded_private_key));
        assert_eq!(aptos.address.len(), 66);
    }

    #[test]
    fn test_each_record_has_its_own_mnemonic() {
        let output = orchestrator(3)
            .generate_batch(&[NetworkId::Ethereum], 5, &BatchOptions::default())
            .unwrap();
        let mut phrases: Vec<&str> = output
            .records
            .iter()
            .map(|r| r.mnemonic_phrase.as_str())
            .collect();
        phrases.sort_unstable();
        phrases.dedup();
        assert_eq!(phrases.len(), 5);
    }

    #[test]
    fn test_strength_option() {
        let options = BatchOptions {
            strength: Strength::Bits256,
            ..Default::default()
        };
        let output = orchestrator(4)
            .generate_batch(&[NetworkId::Aptos], 1, &options)
            .unwrap();
        assert_eq!(output.records[0].mnemonic_phrase.split(' ').count(), 24);
    }

    #[test]
    fn test_same_rng_seed_is_reproducible() {
        let networks = [NetworkId::Bsc, NetworkId::Sui];
        let a = orchestrator(9)
            .generate_batch(&networks, 3, &BatchOptions::default())
            .unwrap();
        let b = orchestrator(9)
            .generate_batch(&networks, 3, &BatchOptions::default())
            .unwrap();
        assert_eq!(a.records, b.records);
    }

    #[test]
    fn test_duplicate_selection_is_collapsed() {
        let output = orchestrator(5)
            .generate_batch(
                &[NetworkId::Aptos, NetworkId::Sui, NetworkId::Aptos],
                1,
                &BatchOptions::default(),
            )
            .unwrap();
        let names: Vec<&str> = output.records.iter().map(|r| r.network_name.as_str()).collect();
        assert_eq!(names, vec!["Aptos", "Sui"]);
        assert_eq!(output.report.networks.len(), 2);
    }

    // ========================================================================
    // Request validation
    // ========================================================================

    #[test]
    fn test_invalid_requests_draw_no_entropy() {
        // A dead RNG would surface as InsufficientEntropy if it were touched
        let mut orch = BatchOrchestrator::with_rng(NetworkRegistry::builtin(), DeadRng);
        let options = BatchOptions::default();

        for count in [0, -3] {
            match orch.generate_batch(&[NetworkId::Ethereum], count, &options) {
                Err(BatchError::InvalidRequest(msg)) => assert!(msg.contains(&count.to_string())),
                other => panic!("expected InvalidRequest, got {:?}", other),
            }
        }
        assert!(matches!(
            orch.generate_batch(&[], 3, &options),
            Err(BatchError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_disabled_network_rejected() {
        let registry = NetworkRegistry::with_overrides(&[crate::network::NetworkOverride {
            id: "fantom".into(),
            enabled: Some(false),
            ..Default::default()
        }])
        .unwrap();
        let mut orch = BatchOrchestrator::with_rng(registry, StdRng::seed_from_u64(0));
        match orch.generate_batch(&[NetworkId::Fantom], 1, &BatchOptions::default()) {
            Err(BatchError::InvalidRequest(msg)) => assert!(msg.contains("fantom")),
            other => panic!("expected InvalidRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_entropy_failure_is_fatal() {
        let mut orch = BatchOrchestrator::with_rng(NetworkRegistry::builtin(), DeadRng);
        assert!(matches!(
            orch.generate_batch(&[NetworkId::Sui], 2, &BatchOptions::default()),
            Err(BatchError::InsufficientEntropy(_))
        ));
    }

    #[test]
    fn test_resolve_selection() {
        let registry = NetworkRegistry::builtin();
        assert_eq!(
            resolve_selection(&registry, "1, sui,Aptos,,").unwrap(),
            vec![NetworkId::Ethereum, NetworkId::Sui, NetworkId::Aptos]
        );
        assert!(resolve_selection(&registry, " , ").unwrap().is_empty());
        match resolve_selection(&registry, "2,solana") {
            Err(BatchError::InvalidRequest(msg)) => assert!(msg.contains("solana")),
            other => panic!("expected InvalidRequest, got {:?}", other),
        }
    }

    // ========================================================================
    // Skips and interruption
    // ========================================================================

    #[test]
    fn test_derivation_failure_skips_iteration() {
        let mut orch = orchestrator(6).with_driver(Box::new(FlakyDriver::new(NetworkId::Bsc, vec![2])));
        let output = orch
            .generate_batch(
                &[NetworkId::Bsc, NetworkId::Aptos],
                3,
                &BatchOptions::default(),
            )
            .unwrap();

        let order: Vec<(&str, u32)> = output
            .records
            .iter()
            .map(|r| (r.network_name.as_str(), r.sequence_number))
            .collect();
        assert_eq!(
            order,
            vec![
                ("Binance Smart Chain", 1),
                ("Binance Smart Chain", 3),
                ("Aptos", 1),
                ("Aptos", 2),
                ("Aptos", 3),
            ]
        );

        let bsc = &output.report.networks[0];
        assert_eq!(bsc.requested, 3);
        assert_eq!(bsc.generated, 2);
        assert_eq!(bsc.skipped.len(), 1);
        assert_eq!(bsc.skipped[0].iteration, 2);
        assert!(bsc.skipped[0].reason.contains("invalid point"));

        assert_eq!(output.report.total_requested(), 6);
        assert_eq!(output.report.total_generated(), 5);
        assert!(!output.report.is_complete());

        let summary = output.report.to_string();
        assert!(summary.contains("Binance Smart Chain: 2/3 generated"));
        assert!(summary.contains("#2 skipped"));
        assert!(summary.contains("Total: 5/6 generated"));
    }

    #[test]
    fn test_interrupt_before_start() {
        let flag = Arc::new(AtomicBool::new(true));
        let output = orchestrator(7)
            .with_interrupt(flag)
            .generate_batch(&[NetworkId::Ethereum], 3, &BatchOptions::default())
            .unwrap();
        assert!(output.records.is_empty());
        assert!(output.report.interrupted);
        assert!(output.report.to_string().ends_with("(interrupted)"));
    }

    #[test]
    fn test_max_count_interrupted_without_allocating() {
        let flag = Arc::new(AtomicBool::new(true));
        let output = orchestrator(9)
            .with_interrupt(flag)
            .generate_batch(
                &[NetworkId::Ethereum, NetworkId::Aptos],
                u32::MAX as i64,
                &BatchOptions::default(),
            )
            .unwrap();

        assert!(output.records.is_empty());
        assert!(output.records.capacity() <= MAX_PREALLOCATED_RECORDS);
        assert!(output.report.interrupted);
        assert_eq!(output.report.networks[0].requested, u32::MAX);
        assert_eq!(output.report.networks[0].generated, 0);
    }

    #[test]
    fn test_interrupt_mid_batch_keeps_finished_records() {
        struct Tripwire {
            inner: EvmDriver,
            flag: Arc<AtomicBool>,
        }

        impl Derivable for Tripwire {
            fn network(&self) -> NetworkId {
                self.inner.network()
            }
            fn derive(&self, seed: &RawSeed, index: u32) -> Result<DerivedCredential, DeriveError> {
                self.flag.store(true, Ordering::SeqCst);
                self.inner.derive(seed, index)
            }
        }

        let flag = Arc::new(AtomicBool::new(false));
        let spec = NetworkRegistry::builtin().get(NetworkId::Polygon).unwrap().clone();
        let output = orchestrator(8)
            .with_interrupt(flag.clone())
            .with_driver(Box::new(Tripwire {
                inner: EvmDriver::new(spec),
                flag,
            }))
            .generate_batch(
                &[NetworkId::Polygon, NetworkId::Sui],
                4,
                &BatchOptions::default(),
            )
            .unwrap();

        assert_eq!(output.records.len(), 1);
        assert_eq!(output.records[0].sequence_number, 1);
        assert!(output.report.interrupted);
        assert_eq!(output.report.networks.len(), 1);
        assert_eq!(output.report.networks[0].generated, 1);
    }

    // ========================================================================
    // Verification
    // ========================================================================

    #[test]
    fn test_every_record_verifies() {
        let registry = NetworkRegistry::builtin();
        let options = BatchOptions {
            passphrase: Zeroizing::new("TREZOR".into()),
            path_index: 2,
            ..Default::default()
        };
        let all: Vec<NetworkId> = registry.iter().map(|s| s.id).collect();
        let output = BatchOrchestrator::with_rng(registry.clone(), StdRng::seed_from_u64(10))
            .generate_batch(&all, 2, &options)
            .unwrap();
        assert_eq!(output.records.len(), 14);

        for record in &output.records {
            assert!(verify_record(&registry, record, &options).unwrap(), "{:?}", record);
        }
        // Wrong passphrase derives a different account
        assert!(!verify_record(&registry, &output.records[0], &BatchOptions::default()).unwrap());
    }

    #[test]
    fn test_verify_known_record() {
        let record = WalletRecord {
            sequence_number: 1,
            network_name: "Sui".into(),
            mnemonic_phrase: crate::drivers::test_vectors::ABANDON.into(),
            encoded_private_key:
                "suiprivkey1qzyxnjc8z79lvlsg6lz2hh69fp7m7duunfzjlnkzsd59f062855mqacydfr".into(),
            address: "0x5e93a736d04fbb25737aa40bee40171ef79f65fae833749e3c089fe7cc2161f1".into(),
        };
        let registry = NetworkRegistry::builtin();
        assert!(verify_record(&registry, &record, &BatchOptions::default()).unwrap());

        let mut tampered = record.clone();
        tampered.address = tampered.address.replace("5e93", "5e94");
        assert!(!verify_record(&registry, &tampered, &BatchOptions::default()).unwrap());

        let mut unknown = record.clone();
        unknown.network_name = "Solana".into();
        assert!(matches!(
            verify_record(&registry, &unknown, &BatchOptions::default()),
            Err(BatchError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_record_debug_hides_secrets() {
        let record = WalletRecord {
            sequence_number: 1,
            network_name: "Ethereum".into(),
            mnemonic_phrase: "abandon about".into(),
            encoded_private_key: "deadbeef".into(),
            address: "0xabc".into(),
        };
        let rendered = format!("{:?}", record);
        assert!(rendered.contains("0xabc"));
        assert!(!rendered.contains("abandon"));
        assert!(!rendered.contains("deadbeef"));
    }

    #[test]
    fn test_one_shot_generate_batch() {
        let registry = NetworkRegistry::builtin();
        let records = generate_batch(&registry, &[NetworkId::Avalanche], 2).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].network_name, "Avalanche");
        assert!(verify_record(&registry, &records[1], &BatchOptions::default()).unwrap());
    }
}
