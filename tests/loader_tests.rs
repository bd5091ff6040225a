use std::fs;
use std::path::PathBuf;

use candle_chart::ChartError;
use candle_chart::data::{
    LoadPolicy, LoaderConfig, load_records_from_path, load_records_from_reader,
};

fn temp_csv(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("candle-chart-tests-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join(name);
    fs::write(&path, contents).expect("write csv");
    path
}

#[test]
fn loads_every_line_in_file_order() {
    let lines: Vec<String> = (0..25)
        .map(|i| {
            let open = 1800.0 + f64::from(i);
            format!(
                "2023.01.02,{:02}:00,{open},{},{},{},{}",
                i % 24,
                open + 5.0,
                open - 5.0,
                open + 1.0,
                100 + i
            )
        })
        .collect();
    let path = temp_csv("ordered.csv", &(lines.join("\n") + "\n"));

    let report = load_records_from_path(&path, &LoaderConfig::default()).expect("load");
    assert!(report.is_clean());
    assert_eq!(report.records.len(), 25);
    for (i, record) in report.records.iter().enumerate() {
        assert_eq!(record.open, 1800.0 + i as f64);
        assert_eq!(record.volume, 100 + i as i64);
    }
}

#[test]
fn first_line_is_data_not_a_header() {
    let input = "2023.01.02,00:00,1830.1,1832.4,1829.9,1831.0,512\n";
    let report =
        load_records_from_reader(input.as_bytes(), &LoaderConfig::default()).expect("load");
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].close, 1831.0);
}

#[test]
fn missing_file_is_a_fatal_io_error() {
    let path = std::env::temp_dir().join("candle-chart-definitely-missing.csv");
    let err = load_records_from_path(&path, &LoaderConfig::default()).expect_err("missing file");
    match err {
        ChartError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn lenient_load_skips_and_reports_each_malformed_line() {
    let input = "\
d,t,100,110,90,105,1000
d,t,abc,110,90,105,1000
d,t,100,110,90
d,t,100,110,90,105,12.5
d,t,100,95,90,105,1000
d,t,101,111,91,106,1001
";
    let report =
        load_records_from_reader(input.as_bytes(), &LoaderConfig::default()).expect("load");

    assert_eq!(report.records.len(), 2);
    assert_eq!(report.records[1].open, 101.0);
    let lines: Vec<u64> = report.rejected.iter().map(|line| line.line).collect();
    assert_eq!(lines, [2, 3, 4, 5]);
    assert!(report.rejected[0].reason.contains("open"));
    assert!(report.rejected[2].reason.contains("volume"));
    assert!(report.rejected[3].reason.contains("high"));
}

#[test]
fn strict_load_aborts_on_first_malformed_line() {
    let input = "d,t,100,110,90,105,1000\nd,t,100,110\n";
    let config = LoaderConfig::default().with_policy(LoadPolicy::Strict);
    let err = load_records_from_reader(input.as_bytes(), &config).expect_err("strict");
    assert!(matches!(err, ChartError::MalformedLine { line: 2, .. }));
}

#[test]
fn blank_lines_and_padding_are_tolerated() {
    let input = "d,t, 100 ,110,90,105, 7 \n\nd,t,100,110,90,95,8\n";
    let report =
        load_records_from_reader(input.as_bytes(), &LoaderConfig::default()).expect("load");
    assert!(report.is_clean());
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.records[0].volume, 7);
}

#[test]
fn empty_source_yields_empty_sequence() {
    let report = load_records_from_reader(&b""[..], &LoaderConfig::default()).expect("load");
    assert!(report.records.is_empty());
    assert!(report.rejected.is_empty());
}
