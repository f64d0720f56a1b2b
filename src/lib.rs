//! # Monarch Migrate
//!
//! Converts Personal Capital transaction exports into the CSV layout Monarch
//! Money imports, renaming categories along the way.
//!
//! ## Design Principles
//!
//! - **Verbatim values**: dates, descriptions, tags and amounts are copied as
//!   text; nothing is reparsed or reformatted
//! - **Fixed output shape**: every row has the 8 Monarch columns in order
//! - **Order preserving**: one output row per input row, same order
//! - **Total lookups**: missing fields read as empty, unknown categories pass
//!   through, bad configuration falls back to built-in mappings
//!
//! ## Example
//!
//! ```
//! use monarch_migrate::Converter;
//! use std::io::Cursor;
//!
//! let csv = "Date,Description,Category,Tags,Amount\n\
//!            2024-01-15,Shell Gas Station,Gasoline/Fuel,business,-45.00\n";
//! let mut output = Vec::new();
//! let report = Converter::default()
//!     .convert(Cursor::new(csv), &mut output)
//!     .unwrap();
//!
//! assert_eq!(report.transactions, 1);
//! assert!(String::from_utf8(output)
//!     .unwrap()
//!     .contains("2024-01-15,Shell Gas Station,Gas,,Shell Gas Station,,-45.00,business"));
//! ```

pub mod batch;
pub mod category;
pub mod config;
pub mod converter;
pub mod error;
pub mod format;
pub mod record;
pub mod report;
pub mod tracker;

pub use batch::{run_batch, BatchSummary, FileOutcome};
pub use category::{CategoryTranslator, MappingTable, DEFAULT_CATEGORY_MAPPINGS};
pub use config::{load_mappings, LoadedMappings, MappingConfig, MappingSource};
pub use converter::{ConversionReport, Converter, SourceFile};
pub use error::{MigrateError, Result};
pub use format::SourceFormat;
pub use record::{transform, MonarchRecord, SourceRecord, MONARCH_HEADERS};
pub use tracker::{RemapEntry, RemapStats};
