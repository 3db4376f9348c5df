use std::io::Write;

use anyhow::Result;
use csv::{Writer, WriterBuilder};

use crate::engine::GainsReport;
use crate::report::rows::{summary_rows, LotRow, OpenPositionRow, SecurityRow};

pub const LOT_HEADERS: [&str; 13] = [
    "Buy Date",
    "Sell Date",
    "Stock",
    "Qty",
    "Buy Price",
    "Sell Price",
    "Buy Value",
    "Sell Value",
    "Brokerage",
    "Gain/Loss",
    "Type",
    "GST on Brokerage",
    "Days Held",
];

pub const SUMMARY_HEADERS: [&str; 2] = ["Metric", "Value"];

pub const SECURITY_HEADERS: [&str; 8] = [
    "Stock",
    "Avg Buy Price",
    "Avg Sell Price",
    "Qty",
    "Gain/Loss",
    "Brokerage",
    "GST on Brokerage",
    "Total Cost",
];

pub const OPEN_POSITION_HEADERS: [&str; 5] = ["Stock", "Buy Date", "Buy Price", "Qty", "Remaining Qty"];

/// Writes the matched lots, the summary, the per-security breakdown and the
/// open positions as four CSV tables separated by blank lines.
///
/// Headers are written even for empty tables. Monetary cells are rounded here
/// and nowhere earlier.
pub fn write_report<W: Write>(report: &GainsReport, mut output: W) -> Result<()> {
    let mut lots = section_writer(&mut output);
    lots.write_record(LOT_HEADERS)?;

    for lot in &report.lots {
        lots.serialize(LotRow::from(lot))?;
    }

    lots.flush()?;
    drop(lots);
    writeln!(output)?;

    let mut summary = section_writer(&mut output);
    summary.write_record(SUMMARY_HEADERS)?;

    for (label, value) in summary_rows(&report.summary) {
        summary.write_record([label, value.as_str()])?;
    }

    summary.flush()?;
    drop(summary);
    writeln!(output)?;

    let mut securities = section_writer(&mut output);
    securities.write_record(SECURITY_HEADERS)?;

    for security in &report.securities {
        securities.serialize(SecurityRow::from(security))?;
    }

    securities.flush()?;
    drop(securities);
    writeln!(output)?;

    let mut positions = section_writer(&mut output);
    positions.write_record(OPEN_POSITION_HEADERS)?;

    for position in &report.open_positions {
        positions.serialize(OpenPositionRow::from(position))?;
    }

    positions.flush()?;
    drop(positions);
    output.flush()?;

    Ok(())
}

fn section_writer<W: Write>(output: W) -> Writer<W> {
    WriterBuilder::new()
        .has_headers(false)
        .from_writer(output)
}
