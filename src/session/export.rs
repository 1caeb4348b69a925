//! Unbounded export log and CSV serialization
//!
//! Every accepted sample lands here exactly once and is never evicted. The CSV
//! layout is fixed: `date,time,amplitude,feedback`, feedback always quoted,
//! `\n` between records and no trailing newline.

use {
    crate::sample::Sample,
    chrono::{DateTime, FixedOffset, Local, NaiveDate, SecondsFormat, Utc},
    std::{
        fs,
        path::{Path, PathBuf},
    },
};

pub const CSV_HEADER: &str = "date,time,amplitude,feedback";

/// One CSV row
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRecord {
    pub iso_timestamp: String,
    pub human_time: String,
    pub amplitude: f64,
    pub feedback: String,
}

impl ExportRecord {
    fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},\"{}\"",
            self.iso_timestamp,
            self.human_time,
            self.amplitude,
            self.feedback.replace('"', "\"\"")
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExportAccumulator {
    records: Vec<ExportRecord>,
    /// Wall-clock offset for the `time` column; `None` means the local zone
    offset: Option<FixedOffset>,
}

impl ExportAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulator that renders the `time` column in a fixed offset
    pub fn with_offset(offset: FixedOffset) -> Self {
        Self {
            records: Vec::new(),
            offset: Some(offset),
        }
    }

    pub fn append(&mut self, sample: &Sample) {
        self.records.push(ExportRecord {
            iso_timestamp: iso_timestamp(sample.captured_at),
            human_time: human_time(sample.captured_at, self.offset),
            amplitude: sample.amplitude,
            feedback: sample.feedback_label.clone(),
        });
    }

    pub fn records(&self) -> &[ExportRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize the whole log. `None` when there is nothing to export.
    pub fn export(&self) -> Option<String> {
        if self.records.is_empty() {
            return None;
        }

        let mut lines = Vec::with_capacity(self.records.len() + 1);
        lines.push(CSV_HEADER.to_string());
        lines.extend(self.records.iter().map(ExportRecord::to_csv_line));
        Some(lines.join("\n"))
    }

    /// Write the export into `dir` as `eeg_data_{date}.csv`.
    ///
    /// Returns `Ok(None)` without touching the filesystem when the log is empty.
    pub fn write_csv(
        &self,
        dir: &Path,
        date: NaiveDate,
    ) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
        let Some(content) = self.export() else {
            log::debug!("Export skipped: no samples accumulated");
            return Ok(None);
        };

        fs::create_dir_all(dir)?;
        let path = dir.join(export_file_name(date));
        fs::write(&path, content)?;

        log::info!("Exported {} samples to {}", self.records.len(), path.display());
        Ok(Some(path))
    }
}

/// `eeg_data_{YYYY-MM-DD}.csv`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("eeg_data_{}.csv", date.format("%Y-%m-%d"))
}

fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn human_time(at: DateTime<Utc>, offset: Option<FixedOffset>) -> String {
    const FORMAT: &str = "%-I:%M:%S %p";
    match offset {
        Some(offset) => at.with_timezone(&offset).format(FORMAT).to_string(),
        None => at.with_timezone(&Local).format(FORMAT).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(seq: u64, amplitude: f64, feedback: &str, secs: i64) -> Sample {
        Sample {
            sequence_index: seq,
            amplitude,
            feedback_label: feedback.to_string(),
            captured_at: Utc.timestamp_opt(1_700_000_000 + secs, 250_000_000).unwrap(),
        }
    }

    #[test]
    fn test_empty_export_is_noop() {
        let acc = ExportAccumulator::new();
        assert!(acc.export().is_none());

        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let written = acc.write_csv(dir.path(), date).unwrap();
        assert!(written.is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_golden_output() {
        let mut acc = ExportAccumulator::with_offset(FixedOffset::east_opt(0).unwrap());
        acc.append(&sample(0, 25.5, "Patient is relaxed(Theta wave dominant)", 0));
        acc.append(&sample(1, 61.0, "Seizure, spike", 1));
        acc.append(&sample(2, 50.0, "say \"hi\"", 2));

        let expected = "date,time,amplitude,feedback\n\
            2023-11-14T22:13:20.250Z,10:13:20 PM,25.5,\"Patient is relaxed(Theta wave dominant)\"\n\
            2023-11-14T22:13:21.250Z,10:13:21 PM,61,\"Seizure, spike\"\n\
            2023-11-14T22:13:22.250Z,10:13:22 PM,50,\"say \"\"hi\"\"\"";
        assert_eq!(acc.export().as_deref(), Some(expected));
    }

    #[test]
    fn test_export_line_count_tracks_appends() {
        let mut acc = ExportAccumulator::new();
        for i in 0..45 {
            acc.append(&sample(i, 30.0, "relaxed", i as i64));
        }
        assert_eq!(acc.len(), 45);
        assert_eq!(acc.export().unwrap().lines().count(), 46);
    }

    #[test]
    fn test_write_csv_uses_dated_file_name() {
        let mut acc = ExportAccumulator::new();
        acc.append(&sample(0, 42.0, "Patient is engaged", 0));

        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let path = acc.write_csv(dir.path(), date).unwrap().unwrap();

        assert_eq!(path.file_name().unwrap(), "eeg_data_2024-03-01.csv");
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, acc.export().unwrap());
    }
}
