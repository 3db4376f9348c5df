use std::collections::HashMap;
use std::path::Path;
use std::process::Command;

use anyhow::{anyhow, Result};

fn summary_of(stdout: &str) -> HashMap<String, String> {
    stdout.split("\n\n")
        .find(|section| section.starts_with("Metric,Value"))
        .map(|section| {
            section.lines()
                .skip(1)
                .filter_map(|line| line.split_once(','))
                .map(|(label, value)| (label.to_string(), value.trim().to_string()))
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn test_cli_correctly_processes_sample() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_capital-gains-engine");
    let sample_path = Path::new("samples").join("sample.csv");

    let output = Command::new(binary_path)
        .arg(sample_path)
        .output()?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?.replace("\r\n", "\n");
    let mut lines = stdout.lines();

    assert_eq!(
        lines.next(),
        Some("Buy Date,Sell Date,Stock,Qty,Buy Price,Sell Price,Buy Value,Sell Value,Brokerage,Gain/Loss,Type,GST on Brokerage,Days Held")
    );

    let securities: Vec<&str> = lines.by_ref()
        .take_while(|line| !line.is_empty())
        .map(|line| {
            let fields: Vec<&str> = line.split(',').collect();
            assert_eq!(fields.len(), 13);
            fields[2]
        })
        .collect();

    assert_eq!(securities, vec!["TCS", "INFY", "RELIANCE"]);

    Ok(())
}

#[test]
fn test_cli_outputs_correct_summary() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_capital-gains-engine");
    let fixture_path = Path::new("samples").join("sample.csv");

    let output = Command::new(binary_path)
        .arg(fixture_path)
        .output()?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?.replace("\r\n", "\n");
    let summary = summary_of(&stdout);
    let value = |label: &str| summary.get(label).cloned().ok_or_else(|| anyhow!("{label} missing from output"));

    assert_eq!(value("Total STCG")?, "4980.00");
    assert_eq!(value("Total LTCG")?, "20421.25");
    assert_eq!(value("Total Dividends")?, "200.00");
    assert_eq!(value("Total Brokerage")?, "120.00");
    assert_eq!(value("Total GST on Brokerage")?, "17.78");
    assert_eq!(value("Final Taxable Income")?, "25601.25");
    assert_eq!(value("Total Trades Matched")?, "3");
    assert_eq!(value("Total Buy Trades")?, "4");
    assert_eq!(value("Total Sell Trades")?, "3");

    Ok(())
}

#[test]
fn test_cli_warns_about_under_matched_sells_on_stderr() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_capital-gains-engine");
    let fixture_path = Path::new("samples").join("undermatched.csv");

    let output = Command::new(binary_path)
        .arg(fixture_path)
        .output()?;

    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr)?;
    let stdout = String::from_utf8(output.stdout)?.replace("\r\n", "\n");

    assert!(stderr.contains("WIPRO"));
    assert_eq!(summary_of(&stdout).get("Total Trades Matched").map(String::as_str), Some("0"));

    Ok(())
}

#[test]
fn test_cli_fails_on_invalid_rows() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_capital-gains-engine");
    let fixture_path = Path::new("samples").join("invalid.csv");

    let output = Command::new(binary_path)
        .arg(fixture_path)
        .output()?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    Ok(())
}

#[test]
fn test_cli_without_arguments_prints_usage() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_capital-gains-engine");

    let output = Command::new(binary_path).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8(output.stderr)?.contains("Usage"));

    Ok(())
}
