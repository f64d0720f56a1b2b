//! Single-file conversion from a Personal Capital export to a Monarch import.
//!
//! A conversion reads the whole source, transforms every row in order, tracks
//! category remappings, then writes the destination in one pass. The
//! destination file is staged in a temporary file next to it and only moved
//! into place once fully written.

use crate::category::CategoryTranslator;
use crate::error::{MigrateError, Result};
use crate::format::SourceFormat;
use crate::record::{transform, MonarchRecord, SourceRecord, MONARCH_HEADERS};
use crate::tracker::RemapStats;
use csv::{ReaderBuilder, Trim};
use log::{debug, info};
use std::fs::{self, File, Permissions};
use std::io::{self, BufReader, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Parsed contents of one source export.
#[derive(Debug, Clone, Default)]
pub struct SourceFile {
    pub format: SourceFormat,
    pub records: Vec<SourceRecord>,
}

/// Outcome of converting one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    /// Detected shape of the source export.
    pub format: SourceFormat,

    /// Rows written to the destination.
    pub transactions: usize,

    /// Categories renamed during this conversion.
    pub remappings: RemapStats,
}

fn read_csv<R: Read>(reader: R) -> csv::Result<SourceFile> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let format = SourceFormat::detect(headers.iter());

    let mut records = Vec::new();
    for result in csv_reader.records() {
        let row = result?;
        records.push(SourceRecord::from_row(headers.iter(), row.iter()));
    }

    Ok(SourceFile { format, records })
}

/// Reads a Personal Capital export from any reader.
pub fn read_source<R: Read>(reader: R) -> Result<SourceFile> {
    Ok(read_csv(reader)?)
}

/// Reads a Personal Capital export from disk.
///
/// Missing files, invalid UTF-8 and malformed CSV all surface as
/// [`MigrateError::SourceUnreadable`].
pub fn read_source_file(path: &Path) -> Result<SourceFile> {
    let unreadable = |source: csv::Error| MigrateError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(|e| unreadable(e.into()))?;
    read_csv(BufReader::new(file)).map_err(unreadable)
}

fn write_csv<W: Write>(records: &[MonarchRecord], writer: W) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    // Header goes out even for a zero-row file.
    csv_writer.write_record(MONARCH_HEADERS)?;
    for record in records {
        csv_writer.write_record(record.as_row())?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes Monarch rows, header first, to any writer.
pub fn write_monarch<W: Write>(records: &[MonarchRecord], writer: W) -> Result<()> {
    Ok(write_csv(records, writer)?)
}

/// Writes Monarch rows to `path`, all or nothing.
///
/// On failure the destination is left as it was before the call.
pub fn write_monarch_file(records: &[MonarchRecord], path: &Path) -> Result<()> {
    let unwritable = |source: io::Error| MigrateError::OutputUnwritable {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir).map_err(unwritable)?;
    write_csv(records, &mut staged).map_err(|e| unwritable(e.into()))?;
    match_destination_permissions(staged.as_file(), path).map_err(unwritable)?;
    staged.persist(path).map_err(|e| unwritable(e.error))?;

    Ok(())
}

/// Staged files are created owner-only; a replaced destination keeps its
/// mode, a new one gets a regular file's.
fn match_destination_permissions(staged: &File, path: &Path) -> io::Result<()> {
    let permissions = match fs::metadata(path) {
        Ok(existing) => existing.permissions(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => new_file_permissions(staged)?,
        Err(e) => return Err(e),
    };
    staged.set_permissions(permissions)
}

#[cfg(unix)]
fn new_file_permissions(_staged: &File) -> io::Result<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Ok(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions(staged: &File) -> io::Result<Permissions> {
    Ok(staged.metadata()?.permissions())
}

/// Drives the transformation for one or more files with a fixed translator.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    translator: CategoryTranslator,
}

impl Converter {
    pub fn new(translator: CategoryTranslator) -> Self {
        Converter { translator }
    }

    pub fn translator(&self) -> &CategoryTranslator {
        &self.translator
    }

    /// Transforms rows in order and collects remapping statistics.
    pub fn transform_all(&self, records: &[SourceRecord]) -> (Vec<MonarchRecord>, RemapStats) {
        let mut stats = RemapStats::new();
        let output = records
            .iter()
            .map(|record| {
                let row = transform(record, &self.translator);
                stats.record(record.category(), &row.category);
                row
            })
            .collect();

        (output, stats)
    }

    /// Converts an in-memory or streamed export.
    pub fn convert<R: Read, W: Write>(&self, reader: R, writer: W) -> Result<ConversionReport> {
        let source = read_source(reader)?;
        let (rows, remappings) = self.transform_all(&source.records);
        write_monarch(&rows, writer)?;

        Ok(ConversionReport {
            format: source.format,
            transactions: rows.len(),
            remappings,
        })
    }

    /// Converts the export at `input` into a Monarch file at `output`.
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<ConversionReport> {
        let source = read_source_file(input)?;
        debug!(
            "Read {} rows from {} ({} format)",
            source.records.len(),
            input.display(),
            source.format
        );

        let (rows, remappings) = self.transform_all(&source.records);
        write_monarch_file(&rows, output)?;

        info!(
            "Converted {} transactions: {} -> {}",
            rows.len(),
            input.display(),
            output.display()
        );

        Ok(ConversionReport {
            format: source.format,
            transactions: rows.len(),
            remappings,
        })
    }
}
