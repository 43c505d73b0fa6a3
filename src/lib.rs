//! xlsxrec - Schema-driven Excel to keyed JSON record converter
//!
//! This crate converts tabular XLSX data into keyed JSON records according
//! to an in-sheet schema: row 1 (0-based) declares field names, row 2
//! declares per-field type tags (`int`, `long`, `float`, `json`; anything
//! else is plain text), and rows 3 onward hold data. Row 0 is reserved for
//! a human-readable title and is never read.
//!
//! Each sheet's records are re-indexed by an integer key field (`id` by
//! default) and serialized as one JSON document per sheet. A separate
//! utility extracts the set of distinct Han ideographs from a text file.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsxrec::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a converter with default settings
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     // Convert one workbook
//!     let input = File::open("items.xlsx")?;
//!     let workbook = converter.convert(input, "items")?;
//!
//!     for sheet in &workbook.sheets {
//!         let (json, _rejected) = converter.render_sheet(sheet)?;
//!         println!("{}", json);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Batch Conversion
//!
//! ```rust,no_run
//! use std::path::Path;
//! use xlsxrec::ConverterBuilder;
//!
//! # fn main() -> Result<(), xlsxrec::XlsxToJsonError> {
//! let converter = ConverterBuilder::new().build()?;
//! let report = converter.convert_dir(Path::new("data"), Path::new("out"))?;
//! println!("{} files written", report.written.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Han Glyph Extraction
//!
//! ```rust,no_run
//! use std::path::Path;
//! use xlsxrec::glyphs;
//!
//! # fn main() -> Result<(), xlsxrec::XlsxToJsonError> {
//! let set = glyphs::extract_file(Path::new("strings.txt"), Path::new("glyphs.txt"))?;
//! println!("distinct han glyphs: {}", set.distinct_count());
//! # Ok(())
//! # }
//! ```

mod api;
mod batch;
mod builder;
mod coerce;
mod error;
mod formatter;
mod output;
mod parser;
mod security;
mod types;

pub mod glyphs;

// 公開API
pub use api::{JsonStyle, TypeTag};
pub use batch::{BatchReport, OpenFailure, RejectedSheetKey};
pub use builder::{Converter, ConverterBuilder};
pub use coerce::coerce;
pub use error::XlsxToJsonError;
pub use output::{KeyedRecords, RejectedKey};
pub use types::{FieldValue, Record, SheetData, WorkbookData};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_surface_builds() {
        let converter = ConverterBuilder::new().build().unwrap();
        let sheet = SheetData {
            name: "Sheet1".to_string(),
            records: Vec::new(),
        };
        let (keyed, rejected) = converter.key_sheet(&sheet);
        assert!(keyed.is_empty());
        assert!(rejected.is_empty());
    }
}
