//! End-to-end checks over files on disk: ingest, report and export.

use std::fs;

use serde_json::{json, Value};
use tempfile::tempdir;

use econ_lens::app::pipeline::{build_report, combine_files, load_dataset, normalize, winsorize};
use econ_lens::domain::{RegimeSource, DATE_FIELD};
use econ_lens::error::{EXIT_INPUT, EXIT_NO_DATA};
use econ_lens::io::{load_path, write_report_json, write_series_csv};
use econ_lens::transform::winsorized_field;

fn snapshot() -> Value {
    json!({
        "markets": [
            {"DATA_YMD": "2023-01-01", "kospi": 2400.0, "vix": 20.0, "economic_phase": 0, "kor": 1},
            {"DATA_YMD": "2023-02-01", "kospi": 2450.0, "vix": 18.0, "economic_phase": 0, "kor": 1},
            {"DATA_YMD": "2023-03-01", "kospi": 2300.0, "vix": 25.0, "economic_phase": 1, "kor": 0},
            {"DATA_YMD": "2023-04-01", "kospi": 2500.0, "vix": "n/a", "economic_phase": 1, "kor": 0}
        ],
        "economics": [
            {"DATA_YMD": "2023-01-01", "cpi": 3.1},
            {"DATA_YMD": "2023-02-01", "cpi": 3.3}
        ]
    })
}

#[test]
fn snapshot_report_round_trips_through_json() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("snapshot.json");
    fs::write(&input, snapshot().to_string()).unwrap();

    let dataset = load_dataset(&input, Some("markets")).unwrap();
    assert_eq!(dataset.records.len(), 4);

    let report = build_report(&dataset, None, RegimeSource::KoreaCycle).unwrap();
    let keys: Vec<&str> = report.indicators.iter().map(|i| i.key.as_str()).collect();
    assert_eq!(keys, ["kospi", "vix"]);

    let out = dir.path().join("report.json");
    write_report_json(&out, &report).unwrap();
    let written: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();

    assert_eq!(written["dataset"], "markets");
    let kospi = &written["indicators"][0];
    assert_eq!(kospi["key"], "kospi");
    assert_eq!(kospi["summary"]["current"], 2500.0);
    assert_eq!(kospi["summary"]["asOf"], "2023-04-01");
    // Korea cycle: Jan/Feb are recession (kor = 1).
    assert_eq!(kospi["summary"]["recession"]["mean"], 2425.0);
    assert_eq!(kospi["summary"]["expansion"]["count"], 2);
}

#[test]
fn multi_dataset_snapshot_needs_a_name() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("snapshot.json");
    fs::write(&input, snapshot().to_string()).unwrap();

    let err = load_dataset(&input, None).unwrap_err();
    assert_eq!(err.exit_code(), EXIT_INPUT);
}

#[test]
fn missing_file_is_an_input_error() {
    let dir = tempdir().unwrap();
    let err = load_path(&dir.path().join("absent.json")).unwrap_err();
    assert_eq!(err.exit_code(), EXIT_INPUT);
}

#[test]
fn header_only_csv_is_no_data() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("empty.csv");
    fs::write(&input, "DATA_YMD,cpi\n").unwrap();

    let err = load_path(&input).unwrap_err();
    assert_eq!(err.exit_code(), EXIT_NO_DATA);
}

#[test]
fn normalized_series_exports_to_csv() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("fx.csv");
    fs::write(&input, "DATA_YMD,usd_krw\n2023-01-01,1200\n2023-02-01,1300\n2023-03-01,1250\n").unwrap();

    let dataset = load_dataset(&input, None).unwrap();
    assert_eq!(dataset.name, "fx");

    let records = normalize(&dataset.records, None);
    let out = dir.path().join("normalized.csv");
    write_series_csv(&out, &records).unwrap();

    let text = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, ["DATA_YMD,usd_krw", "2023-01-01,0", "2023-02-01,1", "2023-03-01,0.5"]);
}

#[test]
fn winsorized_export_reloads() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("series.csv");
    let mut text = String::from("DATA_YMD,v\n");
    for m in 1..=9 {
        text.push_str(&format!("2023-0{m}-01,1\n"));
    }
    text.push_str("2023-10-01,100\n");
    fs::write(&input, text).unwrap();

    let dataset = load_dataset(&input, None).unwrap();
    let records = winsorize(&dataset.records, "v", 1.0).unwrap();
    let out = dir.path().join("winsorized.csv");
    write_series_csv(&out, &records).unwrap();

    let reloaded = load_dataset(&out, None).unwrap();
    let field = winsorized_field("v");
    let last = reloaded.records.last().unwrap();
    assert_eq!(last.value("v"), Some(100.0));
    // mean 10.9, population std 29.7: the spike is clipped to 40.6.
    let clipped = last.value(&field).unwrap();
    assert!((clipped - 40.6).abs() < 1e-9, "clipped = {clipped}");
}

#[test]
fn combine_reads_both_files() {
    let dir = tempdir().unwrap();
    let actual = dir.path().join("actual.json");
    let forecast = dir.path().join("forecast.csv");
    fs::write(
        &actual,
        json!([
            {"DATA_YMD": "2023-01-31", "cpi": 3.0},
            {"DATA_YMD": "2022-12-31", "cpi": 2.9}
        ])
        .to_string(),
    )
    .unwrap();
    fs::write(&forecast, "cpi_forecast\n3.1\n3.2\n").unwrap();

    let out = combine_files((&actual, None), (&forecast, None)).unwrap();
    assert_eq!(out.len(), 2 + 1 + 2);

    let dates: Vec<String> = out.iter().map(|r| r.get(DATE_FIELD).unwrap().to_string()).collect();
    assert_eq!(dates, ["2022-12-31", "2023-01-31", "2023-01-31", "2023-02-28", "2023-03-31"]);
    assert_eq!(out[2].value("cpi_forecast"), Some(3.0));
}
