//! Command-line parsing (minimal, no clap dependency)

use anyhow::{bail, Result};
use std::path::PathBuf;

/// Parsed invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Version,
    Run(CliArgs),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub config_path: Option<PathBuf>,
    /// Raw comma-separated network selection
    pub networks: Option<String>,
    /// Raw wallet count; validated by the batch layer
    pub count: Option<i64>,
    pub output_dir: Option<PathBuf>,
    pub strength: Option<u32>,
    pub list: bool,
    pub verify: Option<PathBuf>,
    pub validate_only: bool,
}

/// Parse `args` (including the program name at index 0).
pub fn parse_args(args: &[String]) -> Result<Command> {
    let mut cli = CliArgs::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                cli.config_path = Some(PathBuf::from(value(args, &mut i, "--config")?));
            }
            "--networks" | "-n" => {
                cli.networks = Some(value(args, &mut i, "--networks")?.to_string());
            }
            "--count" | "-k" => {
                let raw = value(args, &mut i, "--count")?;
                match raw.trim().parse::<i64>() {
                    Ok(count) => cli.count = Some(count),
                    Err(_) => bail!("--count expects an integer, got '{}'", raw),
                }
            }
            "--output" | "-o" => {
                cli.output_dir = Some(PathBuf::from(value(args, &mut i, "--output")?));
            }
            "--strength" => {
                let raw = value(args, &mut i, "--strength")?;
                match raw.trim().parse::<u32>() {
                    Ok(bits) => cli.strength = Some(bits),
                    Err(_) => bail!("--strength expects a bit count, got '{}'", raw),
                }
            }
            "--list" => {
                cli.list = true;
            }
            "--verify" => {
                cli.verify = Some(PathBuf::from(value(args, &mut i, "--verify")?));
            }
            "--validate" => {
                cli.validate_only = true;
            }
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            other => {
                bail!("Unknown argument: {}", other);
            }
        }
        i += 1;
    }

    Ok(Command::Run(cli))
}

/// Consume the value following a flag.
fn value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    match args.get(*i) {
        Some(v) => Ok(v.as_str()),
        None => bail!("{} requires an argument", flag),
    }
}

pub fn print_help() {
    println!(
        r#"walletgen: multi-network wallet generator

USAGE:
    walletgen [OPTIONS]

OPTIONS:
    -c, --config <PATH>      Config file path (TOML)
    -n, --networks <LIST>    Comma-separated networks: menu keys, ids or names
    -k, --count <N>          Wallets to generate per network
    -o, --output <DIR>       Directory for the zip archive
        --strength <BITS>    Mnemonic strength: 128, 160, 192, 224 or 256
        --list               List available networks and exit
        --verify <CSV>       Re-derive every row of an exported CSV and compare
        --validate           Validate config file and exit
    -h, --help               Show this help message
    -V, --version            Show version

Without --networks or --count the missing values are asked for interactively.

ENVIRONMENT VARIABLES (override config file):
    WALLETGEN_LOG_LEVEL      Log level (error/warn/info/debug/trace)
    WALLETGEN_OUTPUT_DIR     Output directory
    WALLETGEN_STRENGTH       Mnemonic strength in bits
    WALLETGEN_PASSPHRASE     BIP-39 passphrase
    WALLETGEN_PATH_INDEX     Address index in each derivation path

EXAMPLES:
    # Five wallets each on Ethereum, Polygon and Sui
    walletgen --networks 1,3,6 --count 5

    # 24-word mnemonics, archive written to ./out
    walletgen -n aptos -k 10 --strength 256 -o out

    # Check an extracted export
    walletgen --verify 5_wallets_19-10-2026.csv
"#
    );
}
