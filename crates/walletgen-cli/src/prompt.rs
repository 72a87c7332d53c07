//! Interactive network menu and stdin prompts

use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};
use walletgen_core::{resolve_selection, NetworkId, NetworkRegistry};

const RULE: &str = "════════════════════════════════════════════════════════════";

/// Print the list of selectable networks.
pub fn print_menu<W: Write>(out: &mut W, registry: &NetworkRegistry) -> Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "    🌐 Wallet Generator 🌐")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)?;
    writeln!(out, "Supported networks:")?;
    writeln!(out)?;
    for spec in registry.iter() {
        writeln!(out, "  {}) {} {}", spec.key, spec.display_name, spec.icon)?;
    }
    writeln!(out)?;
    Ok(())
}

fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> Result<String> {
    write!(out, "{}", question)?;
    out.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read from stdin")?;
    if read == 0 {
        bail!("No input (end of stream)");
    }
    Ok(line.trim().to_string())
}

/// Ask for a comma-separated selection such as `1,3,6`.
pub fn prompt_networks<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    registry: &NetworkRegistry,
) -> Result<Vec<NetworkId>> {
    let answer = ask(input, out, "Select networks (comma-separated, e.g. 1,3,6): ")?;
    Ok(resolve_selection(registry, &answer)?)
}

/// Ask for the number of wallets per network.
pub fn prompt_count<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<i64> {
    let answer = ask(input, out, "Wallets per network: ")?;
    answer
        .parse::<i64>()
        .with_context(|| format!("'{}' is not a whole number", answer))
}
