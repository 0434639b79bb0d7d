use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::Result;
use tempfile::tempdir;

const HEADER: &str = "oper_type,msg_type,sttl_type,oper_date,acq_inst_bin,response_code,is_reversal,merchant_name,merchant_country,terminal_type,transaction_type,account_number,balance_type,amount_purpose,card_number,card_country,auth_code,currency";

#[test]
fn test_cli_writes_us_report_for_sample() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_clearing-report");
    let sample_path = Path::new("samples").join("clearing.xml");
    let output_dir = tempdir()?;

    let output = Command::new(binary_path)
        .arg("us")
        .arg(&sample_path)
        .arg(output_dir.path())
        .output()?;

    assert!(output.status.success());

    let expected_path = output_dir.path().join("output_us_clearing.xml.csv");
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout.trim(), expected_path.display().to_string());

    let content = fs::read_to_string(&expected_path)?;
    let mut lines = content.lines();

    assert_eq!(lines.next(), Some(HEADER));
    assert_eq!(
        lines.next(),
        Some("OPTP0000,MSGTPRES,STTT0010,2024-03-01T10:15:00,400000,RESP0001,0,CORNER SHOP,643,TRMT0003,TRNT0001,40817810000000000001,BLTP0001,FETP0102,4111110000001111,643,A1B2C3,643")
    );
    assert_eq!(
        lines.next(),
        Some("OPTP0020,MSGTPRES,,,,,1,,,,TRNT0002,40817810000000000002,BLTP0001,,,,,")
    );
    assert_eq!(lines.next(), Some("OPTP0000,,,,,,,,,,,,,,,,,"));
    assert_eq!(lines.next(), None);

    Ok(())
}

#[test]
fn test_cli_them_report_differs_only_in_name() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_clearing-report");
    let sample_path = Path::new("samples").join("clearing.xml");
    let output_dir = tempdir()?;

    for variant in ["us", "them"] {
        let status = Command::new(binary_path)
            .arg(variant)
            .arg(&sample_path)
            .arg(output_dir.path())
            .status()?;

        assert!(status.success());
    }

    let us = fs::read_to_string(output_dir.path().join("output_us_clearing.xml.csv"))?;
    let them = fs::read_to_string(output_dir.path().join("output_them_clearing.xml.csv"))?;

    assert_eq!(us, them);

    Ok(())
}

#[test]
fn test_cli_writes_header_only_for_document_without_operations() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_clearing-report");
    let output_dir = tempdir()?;

    let output = Command::new(binary_path)
        .arg("them")
        .arg(Path::new("samples").join("empty.xml"))
        .arg(output_dir.path())
        .output()?;

    assert!(output.status.success());

    let content = fs::read_to_string(output_dir.path().join("output_them_empty.xml.csv"))?;

    assert_eq!(content, format!("{HEADER}\n"));

    Ok(())
}

#[test]
fn test_cli_fails_on_malformed_xml() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_clearing-report");
    let output_dir = tempdir()?;

    let output = Command::new(binary_path)
        .arg("us")
        .arg(Path::new("samples").join("malformed.xml"))
        .arg(output_dir.path())
        .output()?;

    assert!(!output.status.success());
    assert_eq!(fs::read_dir(output_dir.path())?.count(), 0);

    Ok(())
}

#[test]
fn test_cli_fails_on_missing_input_file() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_clearing-report");
    let output_dir = tempdir()?;

    let output = Command::new(binary_path)
        .arg("us")
        .arg(Path::new("samples").join("does_not_exist.xml"))
        .arg(output_dir.path())
        .output()?;

    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("was not found"));

    Ok(())
}

#[test]
fn test_cli_rejects_unknown_variant_and_missing_arguments() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_clearing-report");

    let unknown_variant = Command::new(binary_path)
        .arg("ours")
        .arg(Path::new("samples").join("clearing.xml"))
        .output()?;

    assert_eq!(unknown_variant.status.code(), Some(1));

    let missing_input = Command::new(binary_path)
        .arg("us")
        .output()?;

    assert_eq!(missing_input.status.code(), Some(1));
    assert!(String::from_utf8(missing_input.stderr)?.starts_with("Usage:"));

    Ok(())
}

#[test]
fn test_cli_creates_missing_output_directory() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_clearing-report");
    let scratch = tempdir()?;
    let output_dir = scratch.path().join("output");

    let output = Command::new(binary_path)
        .arg("us")
        .arg(Path::new("samples").join("clearing.xml"))
        .arg(&output_dir)
        .output()?;

    assert!(output.status.success());
    assert!(output_dir.join("output_us_clearing.xml.csv").is_file());

    Ok(())
}

#[test]
fn test_cli_applies_size_limit_from_environment() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_clearing-report");
    let output_dir = tempdir()?;

    let limited = Command::new(binary_path)
        .env("CLEARING_REPORT_MAX_BYTES", "64")
        .arg("us")
        .arg(Path::new("samples").join("clearing.xml"))
        .arg(output_dir.path())
        .output()?;

    assert!(!limited.status.success());
    assert!(String::from_utf8(limited.stderr)?.contains("exceeds the limit of 64 bytes"));

    let unparsable = Command::new(binary_path)
        .env("CLEARING_REPORT_MAX_BYTES", "lots")
        .arg("us")
        .arg(Path::new("samples").join("clearing.xml"))
        .arg(output_dir.path())
        .output()?;

    assert!(unparsable.status.success());

    Ok(())
}
