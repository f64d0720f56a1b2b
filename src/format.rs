//! Source export format detection.

use std::fmt;

/// Columns that only appear in investment account exports.
pub const INVESTMENT_COLUMNS: [&str; 3] = ["Action", "Quantity", "Price"];

/// The two known shapes of a Personal Capital export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFormat {
    /// Brokerage export carrying `Action`, `Quantity` and `Price`.
    Investment,

    /// Checking/credit card export: `Date, Description, Category, Tags, Amount`.
    #[default]
    Standard,
}

impl SourceFormat {
    /// Classifies a header row.
    ///
    /// Returns [`SourceFormat::Investment`] only when every investment column
    /// is present; anything else, including an empty header, is standard.
    pub fn detect<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = [false; INVESTMENT_COLUMNS.len()];
        for header in headers {
            if let Some(idx) = INVESTMENT_COLUMNS
                .iter()
                .position(|col| *col == header.as_ref())
            {
                seen[idx] = true;
            }
        }

        if seen.iter().all(|present| *present) {
            SourceFormat::Investment
        } else {
            SourceFormat::Standard
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Investment => write!(f, "investment"),
            SourceFormat::Standard => write!(f, "standard"),
        }
    }
}
