//! walletgen: generate wallets for several networks and archive them
//!
//! Each wallet gets a fresh BIP-39 mnemonic; keys and addresses are derived
//! per network and written to `{count}_wallets_{dd-mm-YYYY}.zip`.
//!
//! # Usage
//!
//! ```bash
//! walletgen                          # interactive menu
//! walletgen --networks 1,6 --count 5
//! walletgen --verify 5_wallets_19-10-2026.csv
//! ```

mod args;
mod config;
mod prompt;

use anyhow::{Context, Result};
use args::{parse_args, print_help, CliArgs, Command};
use config::WalletgenConfig;
use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use walletgen_core::{
    resolve_selection, verify_record, BatchOptions, BatchOrchestrator, NetworkRegistry, WalletRecord,
};

fn main() -> Result<()> {
    // Keep seeds and keys out of core files
    walletgen_core::memory::disable_core_dumps();

    let argv: Vec<String> = std::env::args().collect();
    let cli = match parse_args(&argv)? {
        Command::Help => {
            print_help();
            return Ok(());
        }
        Command::Version => {
            println!("walletgen {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Command::Run(cli) => cli,
    };

    // Load config
    let mut config = WalletgenConfig::load(cli.config_path.as_deref()).with_context(|| {
        match &cli.config_path {
            Some(path) => format!("Failed to load config from {}", path.display()),
            None => "Failed to load default config".to_string(),
        }
    })?;

    // Env, then flags
    config.apply_env_overrides();
    if let Some(dir) = &cli.output_dir {
        config.export.output_dir = dir.clone();
    }
    if let Some(bits) = cli.strength {
        config.generator.strength = bits;
    }

    config
        .validate()
        .context("Configuration validation failed")?;

    // Init logger
    env_logger::Builder::new()
        .parse_filters(&config.logging.level)
        .init();

    let registry = config.registry()?;
    let options = config.batch_options()?;

    if cli.list {
        prompt::print_menu(&mut io::stdout().lock(), &registry)?;
        return Ok(());
    }

    if cli.validate_only {
        println!("✅ Configuration is valid.");
        println!("  Strength:      {} bits", config.generator.strength);
        println!(
            "  Passphrase:    {}",
            if config.generator.passphrase.is_empty() { "none" } else { "set" }
        );
        println!("  Path index:    {}", config.generator.path_index);
        println!("  Output dir:    {}", config.export.output_dir.display());
        let formats: Vec<String> = config.export.formats.iter().map(|f| f.to_string()).collect();
        println!("  Formats:       {}", formats.join(", "));
        for spec in registry.iter() {
            println!(
                "  {:<20} {}",
                spec.display_name,
                spec.derivation_path(config.generator.path_index)
            );
        }
        return Ok(());
    }

    if let Some(path) = &cli.verify {
        return verify_file(path, &registry, &options);
    }

    generate(&cli, &config, registry, &options)
}

fn generate(
    cli: &CliArgs,
    config: &WalletgenConfig,
    registry: NetworkRegistry,
    options: &BatchOptions,
) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();

    if cli.networks.is_none() || cli.count.is_none() {
        prompt::print_menu(&mut out, &registry)?;
    }

    let networks = match &cli.networks {
        Some(raw) => resolve_selection(&registry, raw)?,
        None => prompt::prompt_networks(&mut input, &mut out, &registry)?,
    };
    let count = match cli.count {
        Some(count) => count,
        None => prompt::prompt_count(&mut input, &mut out)?,
    };
    drop(out);

    let interrupt = Arc::new(AtomicBool::new(false));
    install_interrupt_handler(interrupt.clone())?;

    println!("\n🔄 Generating wallets...\n");
    let mut orchestrator = BatchOrchestrator::new(registry).with_interrupt(interrupt);
    let output = orchestrator.generate_batch(&networks, count, options)?;

    println!("{}\n", output.report);
    anyhow::ensure!(!output.records.is_empty(), "No wallets were generated");

    // Count was validated positive by the batch layer
    let label = u32::try_from(count).context("count out of range")?;
    let artifact = walletgen_export::export_batch(&output.records, label, &config.export)
        .context("Export failed")?;

    println!("🎉 {} wallet(s) generated", output.records.len());
    println!("💾 Saved to: {}", artifact.archive.display());
    for kept in &artifact.kept {
        println!("   kept: {}", kept.display());
    }
    Ok(())
}

/// Flip `flag` on Ctrl-C so the batch stops between wallets and the records
/// produced so far are still exported.
fn install_interrupt_handler(flag: Arc<AtomicBool>) -> Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create signal runtime")?;

    std::thread::spawn(move || {
        rt.block_on(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::warn!("Received interrupt. Stopping after the current wallet…");
                flag.store(true, Ordering::SeqCst);
            }
        });
    });
    Ok(())
}

/// Re-derive every row of an exported CSV. Fails if any row mismatches.
fn verify_file(path: &Path, registry: &NetworkRegistry, options: &BatchOptions) -> Result<()> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut checked = 0usize;
    let mut mismatches = 0usize;
    for row in reader.deserialize::<WalletRecord>() {
        let record = row.with_context(|| format!("Malformed row in {}", path.display()))?;
        checked += 1;
        if verify_record(registry, &record, options)? {
            log::debug!("{} #{} ok", record.network_name, record.sequence_number);
        } else {
            mismatches += 1;
            println!(
                "❌ {} #{} ({}) does not match its mnemonic",
                record.network_name, record.sequence_number, record.address
            );
        }
    }

    let mut out = io::stdout().lock();
    writeln!(out, "Checked {} record(s), {} mismatch(es)", checked, mismatches)?;
    anyhow::ensure!(mismatches == 0, "{} record(s) failed verification", mismatches);
    Ok(())
}

