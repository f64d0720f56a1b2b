//! Human-readable progress and summary output.

use crate::batch::{BatchSummary, FileOutcome};
use crate::config::MappingSource;
use crate::tracker::RemapStats;
use log::warn;
use std::io::{self, Write};
use std::path::Path;

/// Formats a count with `,` thousands separators.
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Tells the user which mapping table is in effect.
pub fn write_mapping_source<W: Write>(out: &mut W, source: &MappingSource) -> io::Result<()> {
    match source {
        MappingSource::Config(path) => {
            writeln!(out, "Using category mappings from {}", path.display())
        }
        MappingSource::Defaults { reason } => {
            writeln!(out, "Warning: {}", reason)?;
            writeln!(out, "Falling back to built-in category mappings.")
        }
    }
}

/// Per-file progress lines.
pub fn write_file_outcome<W: Write>(out: &mut W, outcome: &FileOutcome) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Processing: {}", file_name(&outcome.source))?;
    writeln!(out, "Output: {}", file_name(&outcome.destination))?;

    match &outcome.result {
        Ok(report) => writeln!(
            out,
            "Converted {} transactions successfully ({} format)",
            group_thousands(report.transactions),
            report.format
        ),
        Err(e) => {
            writeln!(out, "Error processing {}: {}", file_name(&outcome.source), e)?;
            writeln!(out, "   Skipping this file and continuing with others...")
        }
    }
}

/// Batch callback that writes per-file progress to `out`.
///
/// Write failures are logged at warn level and never abort the batch.
pub fn progress<W: Write>(out: &mut W) -> impl FnMut(&FileOutcome) + '_ {
    move |outcome: &FileOutcome| {
        if let Err(e) = write_file_outcome(out, outcome) {
            warn!(
                "Unable to write progress for {}: {}",
                outcome.source.display(),
                e
            );
        }
    }
}

/// Shown when the input directory holds nothing to convert.
pub fn write_no_sources<W: Write>(out: &mut W, input_dir: &Path) -> io::Result<()> {
    writeln!(
        out,
        "No Personal Capital CSV files found in '{}'!",
        input_dir.display()
    )?;
    writeln!(
        out,
        "Please place your Personal Capital transaction exports (.csv files) in that folder."
    )
}

/// Remapped categories, most frequent first.
pub fn write_remappings<W: Write>(out: &mut W, remappings: &RemapStats) -> io::Result<()> {
    if remappings.is_empty() {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(
        out,
        "Category Remapping Summary ({} transactions recategorized):",
        group_thousands(remappings.total())
    )?;
    writeln!(
        out,
        "The following Personal Capital categories were automatically mapped to Monarch categories:"
    )?;
    for (original, entry) in remappings.by_count() {
        writeln!(
            out,
            "  • {} transactions: '{}' → '{}'",
            group_thousands(entry.count),
            original,
            entry.mapped_to
        )?;
    }
    Ok(())
}

/// Final batch summary with import instructions.
pub fn write_summary<W: Write>(out: &mut W, summary: &BatchSummary) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Migration complete!")?;
    writeln!(out, "Results Summary:")?;
    writeln!(
        out,
        "  • Files processed successfully: {}/{}",
        summary.files_converted(),
        summary.files_found()
    )?;
    writeln!(
        out,
        "  • Total transactions converted: {}",
        group_thousands(summary.total_transactions)
    )?;
    writeln!(
        out,
        "  • Output files saved in: {}",
        summary.output_dir.display()
    )?;

    let mut failures = summary.failures().peekable();
    if failures.peek().is_some() {
        writeln!(out, "  • Files skipped:")?;
        for failed in failures {
            writeln!(out, "      {}", file_name(&failed.source))?;
        }
    }

    write_remappings(out, &summary.remappings)?;

    writeln!(out)?;
    writeln!(out, "Next Steps:")?;
    writeln!(out, "1. Review the converted files in the output directory")?;
    writeln!(out, "2. In Monarch Money, go to each account's details page")?;
    writeln!(out, "3. Use Edit > Upload transactions > Upload a .CSV file")?;
    writeln!(out, "4. Select the corresponding *-monarch.csv file for each account")?;
    writeln!(
        out,
        "5. Assign the correct account name during import (Account column is left empty)"
    )?;

    if !summary.remappings.is_empty() {
        writeln!(out)?;
        writeln!(
            out,
            "Tip: Review the category remappings above and adjust in Monarch if needed."
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::ConversionReport;
    use crate::error::MigrateError;
    use crate::format::SourceFormat;
    use std::path::PathBuf;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_remappings_sorted_by_count() {
        let mut stats = RemapStats::new();
        stats.record("Transfers", "Transfer");
        stats.record("Gasoline/Fuel", "Gas");
        stats.record("Gasoline/Fuel", "Gas");

        let text = render(|out| write_remappings(out, &stats));
        assert!(text.contains("(3 transactions recategorized)"));
        let gas = text.find("2 transactions: 'Gasoline/Fuel' → 'Gas'").unwrap();
        let transfers = text.find("1 transactions: 'Transfers' → 'Transfer'").unwrap();
        assert!(gas < transfers);
    }

    #[test]
    fn test_remappings_empty_prints_nothing() {
        assert_eq!(render(|out| write_remappings(out, &RemapStats::new())), "");
    }

    #[test]
    fn test_file_outcome_failure() {
        let outcome = FileOutcome {
            source: PathBuf::from("input/bad.csv"),
            destination: PathBuf::from("output/bad-monarch.csv"),
            result: Err(MigrateError::InputDirMissing(PathBuf::from("input"))),
        };

        let text = render(|out| write_file_outcome(out, &outcome));
        assert!(text.contains("Processing: bad.csv"));
        assert!(text.contains("Error processing bad.csv"));
        assert!(text.contains("Skipping this file"));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn converted(name: &str) -> FileOutcome {
        FileOutcome {
            source: PathBuf::from("input").join(name),
            destination: PathBuf::from("output").join(name),
            result: Ok(ConversionReport {
                format: SourceFormat::Standard,
                transactions: 3,
                remappings: RemapStats::new(),
            }),
        }
    }

    #[test]
    fn test_progress_writes_each_outcome() {
        let mut out = Vec::new();
        {
            let mut on_file = progress(&mut out);
            on_file(&converted("a.csv"));
            on_file(&converted("b.csv"));
        }

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Processing: a.csv"));
        assert!(text.contains("Processing: b.csv"));
        assert_eq!(text.matches("Converted 3 transactions").count(), 2);
    }

    #[test]
    fn test_progress_survives_write_errors() {
        let mut out = BrokenPipe;
        let mut on_file = progress(&mut out);
        on_file(&converted("a.csv"));
        on_file(&converted("b.csv"));
    }

    #[test]
    fn test_summary_counts() {
        let mut remappings = RemapStats::new();
        remappings.record("Child", "Kids Gear & Supplies");

        let summary = BatchSummary {
            output_dir: PathBuf::from("output"),
            outcomes: vec![FileOutcome {
                source: PathBuf::from("input/a.csv"),
                destination: PathBuf::from("output/a-monarch.csv"),
                result: Ok(ConversionReport {
                    format: SourceFormat::Standard,
                    transactions: 1500,
                    remappings: remappings.clone(),
                }),
            }],
            total_transactions: 1500,
            remappings,
        };

        let text = render(|out| write_summary(out, &summary));
        assert!(text.contains("Files processed successfully: 1/1"));
        assert!(text.contains("Total transactions converted: 1,500"));
        assert!(text.contains("'Child' → 'Kids Gear & Supplies'"));
        assert!(text.contains("Tip:"));
    }

    #[test]
    fn test_summary_lists_skipped_files() {
        let summary = BatchSummary {
            output_dir: PathBuf::from("output"),
            outcomes: vec![
                FileOutcome {
                    source: PathBuf::from("input/good.csv"),
                    destination: PathBuf::from("output/good-monarch.csv"),
                    result: Ok(ConversionReport {
                        format: SourceFormat::Standard,
                        transactions: 2,
                        remappings: RemapStats::new(),
                    }),
                },
                FileOutcome {
                    source: PathBuf::from("input/broken.csv"),
                    destination: PathBuf::from("output/broken-monarch.csv"),
                    result: Err(MigrateError::InputDirMissing(PathBuf::from("input"))),
                },
            ],
            total_transactions: 2,
            remappings: RemapStats::new(),
        };

        let text = render(|out| write_summary(out, &summary));
        assert!(text.contains("Files processed successfully: 1/2"));
        assert!(text.contains("Files skipped:\n      broken.csv\n"));
        assert!(!text.contains("      good.csv"));
    }

    #[test]
    fn test_mapping_source_fallback() {
        let source = MappingSource::Defaults {
            reason: "bad config".to_string(),
        };
        let text = render(|out| write_mapping_source(out, &source));
        assert!(text.contains("bad config"));
        assert!(text.contains("built-in"));
    }
}
