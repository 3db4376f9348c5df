use super::write_report;

use std::str::FromStr;

use anyhow::Result;
use chrono::NaiveDate;

use crate::engine::{GainsEngine, GainsReport};
use crate::models::{Side, Transaction};
use crate::types::{Monetary, Quantity};

fn create_transaction(side: Side, date: &str, security: &str, quantity: Quantity, price: &str, fee: &str) -> Result<Transaction> {
    Ok(Transaction::new(
        NaiveDate::parse_from_str(date, "%Y-%m-%d")?,
        side,
        security,
        quantity,
        Monetary::from_str(price)?,
        Monetary::from_str(fee)?
    ))
}

fn render(report: &GainsReport) -> Result<String> {
    let mut buffer = Vec::new();
    write_report(report, &mut buffer)?;

    Ok(String::from_utf8(buffer)?)
}

#[test]
fn test_report_renders_lots_summary_breakdown_and_open_positions() -> Result<()> {
    let report = GainsEngine::new().compute(vec![
        create_transaction(Side::Buy, "2023-01-15", "RELIANCE", 100, "2500", "25")?,
        create_transaction(Side::Buy, "2023-06-20", "RELIANCE", 50, "2600", "15")?,
        create_transaction(Side::Sell, "2024-02-10", "RELIANCE", 75, "2800", "20")?,
    ]);

    let rendered = render(&report)?;
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines, vec![
        "Buy Date,Sell Date,Stock,Qty,Buy Price,Sell Price,Buy Value,Sell Value,Brokerage,Gain/Loss,Type,GST on Brokerage,Days Held",
        "2023-01-15,2024-02-10,RELIANCE,75,2500.00,2800.00,187500.00,210000.00,38.75,22461.25,LTCG,6.98,391",
        "",
        "Metric,Value",
        "Total STCG,0.00",
        "Total LTCG,22461.25",
        "Total Dividends,0.00",
        "Total Brokerage,60.00",
        "Total GST on Brokerage,6.98",
        "Final Taxable Income,22461.25",
        "Total Trades Matched,1",
        "Total Buy Trades,2",
        "Total Sell Trades,1",
        "",
        "Stock,Avg Buy Price,Avg Sell Price,Qty,Gain/Loss,Brokerage,GST on Brokerage,Total Cost",
        "RELIANCE,2500.00,2800.00,75,22461.25,38.75,6.98,45.73",
        "",
        "Stock,Buy Date,Buy Price,Qty,Remaining Qty",
        "RELIANCE,2023-01-15,2500.00,100,25",
        "RELIANCE,2023-06-20,2600.00,50,50",
    ]);

    Ok(())
}

#[test]
fn test_report_for_empty_portfolio_keeps_headers() -> Result<()> {
    let rendered = render(&GainsReport::default())?;
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[0].split(',').count(), 13);
    assert_eq!(lines[1], "");
    assert_eq!(lines[2], "Metric,Value");
    assert_eq!(lines[8], "Final Taxable Income,0.00");
    assert_eq!(lines[13], "Stock,Avg Buy Price,Avg Sell Price,Qty,Gain/Loss,Brokerage,GST on Brokerage,Total Cost");
    assert_eq!(lines[14], "");
    assert_eq!(lines.last().copied(), Some("Stock,Buy Date,Buy Price,Qty,Remaining Qty"));

    Ok(())
}

#[test]
fn test_report_rounds_negative_gains_for_short_term_losses() -> Result<()> {
    let report = GainsEngine::new().compute(vec![
        create_transaction(Side::Buy, "2023-01-01", "TCS", 3, "100.005", "0")?,
        create_transaction(Side::Sell, "2023-02-01", "TCS", 3, "99", "0")?,
    ]);

    let rendered = render(&report)?;
    let lot_line = rendered.lines().nth(1).unwrap_or_default();

    assert_eq!(lot_line, "2023-01-01,2023-02-01,TCS,3,100.01,99.00,300.02,297.00,0.00,-3.02,STCG,0.00,31");

    Ok(())
}

#[test]
fn test_report_breaks_gains_down_by_security() -> Result<()> {
    let report = GainsEngine::new().compute(vec![
        create_transaction(Side::Buy, "2023-01-01", "TCS", 10, "100", "10")?,
        create_transaction(Side::Buy, "2023-01-02", "INFY", 4, "50", "4")?,
        create_transaction(Side::Buy, "2023-01-03", "TCS", 10, "110", "10")?,
        create_transaction(Side::Sell, "2023-03-01", "TCS", 20, "130", "20")?,
        create_transaction(Side::Sell, "2023-03-02", "INFY", 4, "45", "4")?,
    ]);

    let rendered = render(&report)?.replace("\r\n", "\n");
    let breakdown: Vec<&str> = rendered.split("\n\n")
        .find(|section| section.starts_with("Stock,Avg Buy Price"))
        .map(|section| section.lines().skip(1).collect())
        .unwrap_or_default();

    assert_eq!(breakdown, vec![
        "INFY,50.00,45.00,4,-28.00,8.00,1.44,9.44",
        "TCS,105.00,130.00,20,460.00,40.00,7.20,47.20",
    ]);

    Ok(())
}
