//! Directory-level batch conversion.
//!
//! Every `.csv` export in the input directory is converted into
//! `<stem>-monarch.csv` in the output directory. A failing file is recorded
//! and skipped; it never stops the rest of the batch.

use crate::converter::{ConversionReport, Converter};
use crate::error::{MigrateError, Result};
use crate::tracker::RemapStats;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix appended to the source stem to name its destination.
pub const MONARCH_SUFFIX: &str = "-monarch.csv";

/// Lists convertible exports in `dir`, sorted by path.
///
/// Only regular files with a `.csv` extension (any case) are returned; files
/// already named `*-monarch.csv` are skipped.
pub fn discover_source_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }

        let is_csv = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        let already_converted = path
            .file_name()
            .map(|name| name.to_string_lossy().ends_with(MONARCH_SUFFIX))
            .unwrap_or(false);

        if is_csv && !already_converted {
            files.push(path);
        } else {
            debug!("Skipping {}", path.display());
        }
    }

    files.sort();
    Ok(files)
}

/// Destination path for `source`: `<output_dir>/<stem>-monarch.csv`.
pub fn destination_path(output_dir: &Path, source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir.join(format!("{}{}", stem, MONARCH_SUFFIX))
}

/// Result of converting one file within a batch.
#[derive(Debug)]
pub struct FileOutcome {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub result: Result<ConversionReport>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Aggregate of a whole batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub output_dir: PathBuf,

    /// One entry per discovered file, in processing order.
    pub outcomes: Vec<FileOutcome>,

    /// Rows converted across all successful files.
    pub total_transactions: usize,

    /// Remapping statistics merged across all successful files.
    pub remappings: RemapStats,
}

impl BatchSummary {
    pub fn files_found(&self) -> usize {
        self.outcomes.len()
    }

    pub fn files_converted(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    fn record(&mut self, outcome: FileOutcome) {
        if let Ok(report) = &outcome.result {
            self.total_transactions += report.transactions;
            self.remappings.merge(&report.remappings);
        }
        self.outcomes.push(outcome);
    }
}

/// Converts every export in `input_dir` into `output_dir`.
///
/// `on_file` is called after each file with its outcome, so progress can be
/// shown while the batch runs.
pub fn run_batch<F>(
    input_dir: &Path,
    output_dir: &Path,
    converter: &Converter,
    mut on_file: F,
) -> Result<BatchSummary>
where
    F: FnMut(&FileOutcome),
{
    if !input_dir.is_dir() {
        return Err(MigrateError::InputDirMissing(input_dir.to_path_buf()));
    }

    fs::create_dir_all(output_dir)?;
    let sources = discover_source_files(input_dir)?;
    debug!(
        "Found {} source file(s) in {}",
        sources.len(),
        input_dir.display()
    );

    let mut summary = BatchSummary {
        output_dir: output_dir.to_path_buf(),
        ..BatchSummary::default()
    };

    for source in sources {
        let destination = destination_path(output_dir, &source);
        let result = converter.convert_file(&source, &destination);

        if let Err(e) = &result {
            warn!("Skipping {}: {}", source.display(), e);
        }

        let outcome = FileOutcome {
            source,
            destination,
            result,
        };
        on_file(&outcome);
        summary.record(outcome);
    }

    Ok(summary)
}
