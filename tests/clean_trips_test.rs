use anyhow::Result;
use bluebikes_etl::{EtlEngine, TripCleaner};

fn run_cleaner(input: &str) -> Result<String> {
    let engine = EtlEngine::new(TripCleaner::new());
    let mut output = Vec::new();
    engine.run(input.as_bytes(), &mut output)?;
    Ok(String::from_utf8(output)?)
}

/// 測試時間格式統一並附加行程分鐘數
#[test]
fn test_appends_duration_column() -> Result<()> {
    let input = "ride_id,started_at,ended_at,start_lat,start_lng,end_lat,end_lng\n\
                 r1,2024-01-01T10:00:00,2024-01-01T10:09:30,42.3601,-71.0589,42.35,-71.1\n\
                 r2,2024-01-01 10:00:00,2024-01-01 10:08:30,42.3,-71.2,,\n";

    let output = run_cleaner(input)?;
    assert_eq!(
        output,
        "ride_id,started_at,ended_at,start_lat,start_lng,end_lat,end_lng,duration_minutes\r\n\
         r1,2024-01-01 10:00:00,2024-01-01 10:09:30,42.36010,-71.05890,42.35000,-71.10000,10\r\n\
         r2,2024-01-01 10:00:00,2024-01-01 10:08:30,42.30000,-71.20000,,,8\r\n"
    );
    Ok(())
}

#[test]
fn test_existing_duration_column_is_recomputed() -> Result<()> {
    let input = "started_at,duration_minutes,ended_at\n\
                 2024-03-01 08:00:00,999,2024-03-01 08:45:00\n\
                 bad,7,2024-03-01 08:45:00\n";

    let output = run_cleaner(input)?;
    assert_eq!(
        output,
        "started_at,duration_minutes,ended_at\r\n\
         2024-03-01 08:00:00,45,2024-03-01 08:45:00\r\n\
         bad,,2024-03-01 08:45:00\r\n"
    );
    Ok(())
}

/// 測試沒有時間欄位時只整理座標
#[test]
fn test_without_timestamp_columns() -> Result<()> {
    let output = run_cleaner("ride_id,end_lat\nr1,42.1\n")?;
    assert_eq!(output, "ride_id,end_lat,duration_minutes\r\nr1,42.10000,\r\n");
    Ok(())
}
