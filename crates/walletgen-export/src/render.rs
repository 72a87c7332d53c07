//! Row rendering: CSV and a fixed-width text table
//!
//! Both outputs use the column order of [`WalletRecord`]'s serialized form.

use std::fmt::Write as _;
use std::io::Write;
use walletgen_core::WalletRecord;
use zeroize::Zeroizing;

/// Column headers, in output order
pub const COLUMNS: [&str; 5] = ["No", "Network", "Mnemonic Phrase", "Private Key", "Address"];

const SEPARATOR: &str = " | ";

/// Write `records` as CSV with a header line.
pub fn write_csv<W: Write>(records: &[WalletRecord], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render `records` as a left-aligned table, one row per record.
///
/// Column widths are measured in characters so multi-byte network names
/// still line up. The last column is left unpadded.
pub fn render_table(records: &[WalletRecord]) -> Zeroizing<String> {
    let numbers: Vec<String> = records.iter().map(|r| r.sequence_number.to_string()).collect();
    let rows: Vec<[&str; 5]> = records
        .iter()
        .zip(&numbers)
        .map(|(r, no)| {
            [
                no.as_str(),
                r.network_name.as_str(),
                r.mnemonic_phrase.as_str(),
                r.encoded_private_key.as_str(),
                r.address.as_str(),
            ]
        })
        .collect();

    let mut widths = COLUMNS.map(|c| c.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = Zeroizing::new(String::new());
    push_row(&mut out, &COLUMNS, &widths);
    let rule_len = widths.iter().sum::<usize>() + SEPARATOR.len() * (widths.len() - 1);
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[&str; 5], widths: &[usize; 5]) {
    let last = cells.len() - 1;
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i == last {
            out.push_str(cell);
        } else {
            // Writing into a String cannot fail
            let _ = write!(out, "{:<width$}{}", cell, SEPARATOR, width = *width);
        }
    }
    out.push('\n');
}
