//! Security-specific tests.
//!
//! These tests verify:
//! 1. Secrets never appear in Debug output
//! 2. Secret buffers are wiped
//! 3. Malformed inputs don't panic
//! 4. Exported files are owner-only

use walletgen_core::encoding::bech32;
use walletgen_core::memory::{disable_core_dumps, LockedBytes};
use walletgen_core::{
    derive_seed, driver_for, generate_mnemonic, parse_mnemonic, resolve_selection, BatchOptions,
    NetworkId, NetworkRegistry, Strength, WalletRecord,
};
use zeroize::Zeroize;

const ABANDON: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

// ============================================================================
// 1. Redaction
// ============================================================================

#[test]
fn test_seed_types_redact_debug() {
    let phrase = parse_mnemonic(ABANDON).unwrap();
    let seed = derive_seed(&phrase, "");

    assert!(!format!("{:?}", phrase).contains("abandon"));
    assert!(!format!("{:?}", seed).contains("5eb00bbd"));
}

#[test]
fn test_credential_and_record_redact_debug() {
    let registry = NetworkRegistry::builtin();
    let seed = derive_seed(&parse_mnemonic(ABANDON).unwrap(), "");
    let cred = driver_for(registry.get(NetworkId::Sui).unwrap())
        .derive(&seed, 0)
        .unwrap();
    let debug = format!("{:?}", cred);
    assert!(debug.contains(cred.address()));
    assert!(!debug.contains(&hex_of(cred.private_key())));

    let record = WalletRecord {
        sequence_number: 1,
        network_name: "Sui".into(),
        mnemonic_phrase: ABANDON.into(),
        encoded_private_key: "suiprivkey1qzyxnjc8z79lvlsg6lz2hh69fp7m7duunfzjlnkzsd59f062855mqacydfr".into(),
        address: cred.address().to_string(),
    };
    let debug = format!("{:?}", record);
    assert!(!debug.contains("abandon"));
    assert!(!debug.contains("suiprivkey"));
}

#[test]
fn test_batch_options_redact_passphrase() {
    let options = BatchOptions {
        passphrase: zeroize::Zeroizing::new("hunter2".into()),
        ..Default::default()
    };
    assert!(!format!("{:?}", options).contains("hunter2"));
}

fn hex_of(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

// ============================================================================
// 2. Zeroization
// ============================================================================

#[test]
fn test_record_zeroize_clears_secrets() {
    let mut record = WalletRecord {
        sequence_number: 4,
        network_name: "Aptos".into(),
        mnemonic_phrase: ABANDON.into(),
        encoded_private_key: "cc".repeat(32),
        address: "0x01".into(),
    };
    record.zeroize();
    assert!(record.mnemonic_phrase.is_empty());
    assert!(record.encoded_private_key.is_empty());
    assert_eq!(record.sequence_number, 0);
}

#[test]
fn test_locked_bytes_hold_and_expose_data() {
    let mut buf = LockedBytes::<64>::zeroed();
    buf.as_mut()[0] = 0x5e;
    assert_eq!(buf.as_ref()[0], 0x5e);
    assert!(!format!("{:?}", buf).contains("5e"));
}

#[test]
fn test_disable_core_dumps_is_idempotent() {
    let first = disable_core_dumps();
    assert_eq!(disable_core_dumps(), first);
}

#[test]
fn test_generated_mnemonics_differ() {
    let a = generate_mnemonic(Strength::Bits128).unwrap();
    let b = generate_mnemonic(Strength::Bits128).unwrap();
    assert_ne!(a, b);
}

// ============================================================================
// 3. Malformed Input Panic Tests (should NOT panic)
// ============================================================================

#[test]
fn test_parse_mnemonic_garbage_does_not_panic() {
    let inputs = [
        "",
        "a",
        "hello world",
        "abandon abandon abandon", // Too few words
        &"abandon ".repeat(100),   // Too many words
        "🎉 🎊 🎈 🎃 🎄 🎅 🎆 🎇 🎁 🎂 🎀 🎍", // Unicode
        "\0\0\0\0\0\0\0\0\0\0\0\0", // Null bytes
        &"a".repeat(10000),          // Very long
    ];

    for input in &inputs {
        assert!(parse_mnemonic(input).is_err(), "accepted {:?}", input);
    }
}

#[test]
fn test_bech32_decode_garbage_does_not_panic() {
    let inputs = [
        "",
        "1",
        "suiprivkey",
        "suiprivkey1",
        "suiprivkey1qqqqqq",
        "SUIPRIVKEY1QQQQQQQQQQQQQQQQQQQQQQQQQQQQQQQQQQQQQQQQQQQQQQQQQQQQQ509DUQ",
        "suiprivkey1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq509duQ",
        "\u{80}1qqqqqq",
        &"q".repeat(5000),
    ];

    for input in &inputs {
        let _ = bech32::decode_bytes(input);
    }
}

#[test]
fn test_selection_garbage_does_not_panic() {
    let registry = NetworkRegistry::builtin();
    for input in ["", ",,,", "1,,2", "🐢", &"9,".repeat(1000), "\0"] {
        let _ = resolve_selection(&registry, input);
    }
}

// ============================================================================
// 4. File permissions
// ============================================================================

#[cfg(unix)]
#[test]
fn test_export_archive_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;
    use walletgen_export::{export_batch, ExportConfig};

    let dir = tempfile::TempDir::new().unwrap();
    let records = vec![WalletRecord {
        sequence_number: 1,
        network_name: "Ethereum".into(),
        mnemonic_phrase: ABANDON.into(),
        encoded_private_key: "1ab42cc412b618bdea3a599e3c9bae199ebf030895b039e9db1e30dafb12b727".into(),
        address: "0x9858EfFD232B4033E47d90003D41EC34EcaEda94".into(),
    }];
    let config = ExportConfig {
        output_dir: dir.path().to_path_buf(),
        keep_intermediate: true,
        ..Default::default()
    };
    let artifact = export_batch(&records, 1, &config).unwrap();

    for path in std::iter::once(&artifact.archive).chain(artifact.kept.iter()) {
        let mode = std::fs::metadata(path).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0, "{} is group/world accessible", path.display());
    }
}
