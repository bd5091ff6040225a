use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::OhlcvRecord;
use crate::error::{ChartError, ChartResult};

/// Data file the desktop viewer opens when no path is given.
pub const DEFAULT_DATA_FILE: &str = "XAUUSD_2023_01.csv";

/// Zero-based field positions of the consumed columns.
///
/// The default matches headerless `date,time,open,high,low,close,volume` rows;
/// the first two fields are not read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub open: usize,
    pub high: usize,
    pub low: usize,
    pub close: usize,
    pub volume: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            open: 2,
            high: 3,
            low: 4,
            close: 5,
            volume: 6,
        }
    }
}

impl ColumnLayout {
    /// Minimum number of fields a line needs for every consumed column to exist.
    #[must_use]
    pub fn required_fields(self) -> usize {
        [self.open, self.high, self.low, self.close, self.volume]
            .into_iter()
            .max()
            .unwrap_or(0)
            + 1
    }
}

/// What to do with a line that cannot be turned into a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoadPolicy {
    /// Skip the line, report it in [`LoadReport::rejected`] and keep loading.
    #[default]
    Lenient,
    /// Abort the whole load on the first malformed line.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    pub delimiter: u8,
    pub columns: ColumnLayout,
    pub policy: LoadPolicy,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            columns: ColumnLayout::default(),
            policy: LoadPolicy::default(),
        }
    }
}

impl LoaderConfig {
    #[must_use]
    pub fn with_policy(mut self, policy: LoadPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_columns(mut self, columns: ColumnLayout) -> Self {
        self.columns = columns;
        self
    }
}

/// One line skipped by a lenient load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedLine {
    /// 1-based line number in the source.
    pub line: u64,
    pub reason: String,
}

/// Result of a completed load: records in source order plus skipped lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadReport {
    pub records: Vec<OhlcvRecord>,
    pub rejected: Vec<RejectedLine>,
}

impl LoadReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Loads records from a delimited text file.
///
/// Failing to open or read the file is fatal. Malformed lines follow
/// `config.policy`.
pub fn load_records_from_path(
    path: impl AsRef<Path>,
    config: &LoaderConfig,
) -> ChartResult<LoadReport> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ChartError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let report = load_from(file, config, path)?;
    debug!(
        path = %path.display(),
        records = report.records.len(),
        rejected = report.rejected.len(),
        "loaded ohlcv records"
    );
    Ok(report)
}

/// Loads records from any byte reader, e.g. an in-memory buffer.
pub fn load_records_from_reader<Rd: Read>(
    reader: Rd,
    config: &LoaderConfig,
) -> ChartResult<LoadReport> {
    load_from(reader, config, Path::new("<reader>"))
}

fn load_from<Rd: Read>(
    reader: Rd,
    config: &LoaderConfig,
    source_path: &Path,
) -> ChartResult<LoadReport> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(config.delimiter)
        .from_reader(reader);

    let mut report = LoadReport::default();
    let mut row = csv::StringRecord::new();
    loop {
        let line = reader.position().line();
        match reader.read_record(&mut row) {
            Ok(false) => break,
            Ok(true) => {
                if is_blank(&row) {
                    continue;
                }
                let line = row.position().map_or(line, csv::Position::line);
                match parse_row(&row, config.columns) {
                    Ok(record) => report.records.push(record),
                    Err(reason) => reject(&mut report, config.policy, line, reason)?,
                }
            }
            Err(err) => {
                let line = err.position().map_or(line, csv::Position::line);
                match err.into_kind() {
                    csv::ErrorKind::Io(source) => {
                        return Err(ChartError::Io {
                            path: source_path.to_path_buf(),
                            source,
                        });
                    }
                    csv::ErrorKind::Utf8 { err, .. } => {
                        reject(&mut report, config.policy, line, format!("invalid utf-8: {err}"))?;
                    }
                    other => {
                        reject(&mut report, config.policy, line, format!("{other:?}"))?;
                    }
                }
            }
        }
    }

    Ok(report)
}

fn reject(
    report: &mut LoadReport,
    policy: LoadPolicy,
    line: u64,
    reason: String,
) -> ChartResult<()> {
    match policy {
        LoadPolicy::Strict => Err(ChartError::MalformedLine { line, reason }),
        LoadPolicy::Lenient => {
            warn!(line, reason = %reason, "skipping malformed ohlcv line");
            report.rejected.push(RejectedLine { line, reason });
            Ok(())
        }
    }
}

fn is_blank(row: &csv::StringRecord) -> bool {
    row.iter().all(str::is_empty)
}

fn parse_row(row: &csv::StringRecord, columns: ColumnLayout) -> Result<OhlcvRecord, String> {
    let required = columns.required_fields();
    if row.len() < required {
        return Err(format!(
            "expected at least {required} fields, found {}",
            row.len()
        ));
    }

    let open = parse_price(row, columns.open, "open")?;
    let high = parse_price(row, columns.high, "high")?;
    let low = parse_price(row, columns.low, "low")?;
    let close = parse_price(row, columns.close, "close")?;
    let volume = field(row, columns.volume, "volume")?
        .parse::<i64>()
        .map_err(|err| format!("volume is not an integer: {err}"))?;

    OhlcvRecord::new(open, high, low, close, volume).map_err(|err| err.to_string())
}

fn field<'r>(row: &'r csv::StringRecord, index: usize, name: &str) -> Result<&'r str, String> {
    row.get(index)
        .ok_or_else(|| format!("missing {name} field at position {index}"))
}

fn parse_price(row: &csv::StringRecord, index: usize, name: &str) -> Result<f64, String> {
    let raw = field(row, index, name)?;
    raw.parse::<f64>()
        .map_err(|err| format!("{name} `{raw}` is not a number: {err}"))
}

#[cfg(test)]
mod tests {
    use super::{ColumnLayout, LoadPolicy, LoaderConfig, load_records_from_reader};
    use crate::error::ChartError;

    #[test]
    fn default_layout_needs_seven_fields() {
        assert_eq!(ColumnLayout::default().required_fields(), 7);
    }

    #[test]
    fn date_and_time_columns_are_ignored() {
        let input = "not-a-date,??,1800.5,1810,1795.25,1805,42\n";
        let report =
            load_records_from_reader(input.as_bytes(), &LoaderConfig::default()).expect("load");
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].open, 1800.5);
        assert_eq!(report.records[0].volume, 42);
    }

    #[test]
    fn short_line_is_reported_with_its_line_number() {
        let input = "d,t,1,2,0.5,1.5,10\nd,t,1,2,0.5\nd,t,1,2,0.5,1.5,11\n";
        let report =
            load_records_from_reader(input.as_bytes(), &LoaderConfig::default()).expect("load");
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].line, 2);
        assert!(report.rejected[0].reason.contains("at least 7 fields"));
    }

    #[test]
    fn strict_policy_aborts_on_first_bad_line() {
        let input = "d,t,1,2,0.5,1.5,10\nd,t,x,2,0.5,1.5,10\nd,t,1,2,0.5,1.5,oops\n";
        let config = LoaderConfig::default().with_policy(LoadPolicy::Strict);
        let err = load_records_from_reader(input.as_bytes(), &config).expect_err("strict load");
        assert!(matches!(err, ChartError::MalformedLine { line: 2, .. }));
    }

    #[test]
    fn custom_delimiter_and_columns() {
        let input = "5;4;1;3;0;7\n";
        let config = LoaderConfig::default()
            .with_delimiter(b';')
            .with_columns(ColumnLayout {
                open: 3,
                high: 0,
                low: 2,
                close: 1,
                volume: 5,
            });
        let report = load_records_from_reader(input.as_bytes(), &config).expect("load");
        let record = report.records[0];
        assert_eq!(
            (record.open, record.high, record.low, record.close, record.volume),
            (3.0, 5.0, 1.0, 4.0, 7)
        );
    }
}
