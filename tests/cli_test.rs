use anyhow::Result;
use std::io::{ErrorKind, Seek, SeekFrom, Write};
use std::process::{Command, Output, Stdio};
use tempfile::NamedTempFile;

fn run_bin(bin: &str, args: &[&str], input: &str) -> Result<Output> {
    let mut child = Command::new(bin)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    // 參數錯誤時子程序可能在讀取 stdin 前就結束
    if let Some(mut stdin) = child.stdin.take() {
        match stdin.write_all(input.as_bytes()) {
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {}
            other => other?,
        }
    }
    Ok(child.wait_with_output()?)
}

/// 測試 extract-stations 從 stdin 讀入並輸出到 stdout
#[test]
fn test_extract_stations_binary() -> Result<()> {
    let output = run_bin(
        env!("CARGO_BIN_EXE_extract-stations"),
        &[],
        "start_station_id,start_station_name,end_station_id,end_station_name\nN1,Newton Centre,A2,Copley\n",
    )?;

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "station_id,name\r\nA2,Copley\r\nN1,Newton Centre\r\n"
    );
    assert!(output.stderr.is_empty());
    Ok(())
}

#[test]
fn test_extract_stations_rejects_empty_input() -> Result<()> {
    let output = run_bin(env!("CARGO_BIN_EXE_extract-stations"), &[], "")?;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8(output.stderr)?.contains("header row is required"));
    Ok(())
}

/// 測試 filter-newton 讀取檔案導向的 stdin
#[test]
fn test_filter_newton_binary_from_file() -> Result<()> {
    let mut input = NamedTempFile::new()?;
    write!(input, "start_station_id,end_station_id\nN12,44\n12,44\n")?;
    input.as_file_mut().seek(SeekFrom::Start(0))?;

    let output = Command::new(env!("CARGO_BIN_EXE_filter-newton"))
        .env_remove("RUST_LOG")
        .stdin(Stdio::from(input.reopen()?))
        .output()?;

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "start_station_id,end_station_id\r\nN12,44\r\n"
    );
    Ok(())
}

#[test]
fn test_filter_newton_ragged_row_exit_code() -> Result<()> {
    let output = run_bin(
        env!("CARGO_BIN_EXE_filter-newton"),
        &[],
        "start_station_id,end_station_id\nN1,2\nN3\n",
    )?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "start_station_id,end_station_id\r\nN1,2\r\n"
    );
    assert!(String::from_utf8(output.stderr)?.contains("expected 2 fields, found 1"));
    Ok(())
}

#[test]
fn test_filter_newton_takes_no_arguments() -> Result<()> {
    let output = run_bin(env!("CARGO_BIN_EXE_filter-newton"), &["--stations"], "")?;
    assert!(!output.status.success());
    Ok(())
}

/// 測試 aggregate-trips 必須指定模式
#[test]
fn test_aggregate_requires_mode() -> Result<()> {
    let output = run_bin(env!("CARGO_BIN_EXE_aggregate-trips"), &[], "start_station_id\n")?;
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    Ok(())
}

#[test]
fn test_usage_error_with_large_input_still_reports() -> Result<()> {
    let input = "start_station_id,end_station_id\n".to_string() + &"N1,A2\n".repeat(50_000);
    let output = run_bin(
        env!("CARGO_BIN_EXE_aggregate-trips"),
        &["--stations", "--station-pairs"],
        &input,
    )?;
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    Ok(())
}

#[test]
fn test_aggregate_stations_binary() -> Result<()> {
    let output = run_bin(
        env!("CARGO_BIN_EXE_aggregate-trips"),
        &["--stations"],
        "start_station_id,end_station_id,start_lat,start_lng,end_lat,end_lng,duration_minutes,rideable_type\n\
         N1,A2,42.3,-71.2,42.35,-71.08,12,electric_bike\n",
    )?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("A2,,Boston,42.35000,-71.08000,0,1,1,"));
    assert!(lines[2].starts_with("N1,,Newton,42.30000,-71.20000,1,0,1,"));
    Ok(())
}

#[test]
fn test_clean_trips_binary() -> Result<()> {
    let output = run_bin(
        env!("CARGO_BIN_EXE_clean-trips"),
        &[],
        "ride_id,started_at,ended_at,start_lat\nr1,2024-01-01T10:00:00.500,2024-01-01 10:15:00,42.36\n",
    )?;

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "ride_id,started_at,ended_at,start_lat,duration_minutes\r\n\
         r1,2024-01-01 10:00:00,2024-01-01 10:15:00,42.36000,15\r\n"
    );
    Ok(())
}
