//! JSON report file
//!
//! The report is written pretty-printed with non-ASCII text kept as is, so
//! titles in any script stay readable in the file.

use crate::output::traits::{ensure_parent_dir, OutputResult, Sink};
use crate::report::CrawlReport;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes the report as a JSON document
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Sink for JsonFileSink {
    fn persist(&self, report: &CrawlReport) -> OutputResult<()> {
        ensure_parent_dir(&self.path)?;

        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, report)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        tracing::info!(
            "Wrote {} records to {}",
            report.total_records,
            self.path.display()
        );
        Ok(())
    }
}

/// Loads a previously persisted report
///
/// # Arguments
///
/// * `path` - Path of a JSON report written by `JsonFileSink`
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The report
/// * `Err(OutputError)` - The file is missing or not a valid report
pub fn load_report(path: &Path) -> OutputResult<CrawlReport> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
