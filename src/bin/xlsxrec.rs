//! xlsxrec CLI
//!
//! Command-line front end for the xlsxrec library. Two modes:
//!
//! - spreadsheet conversion: every `.xlsx` workbook in the input directory
//!   becomes one JSON file per sheet in the output directory
//! - glyph extraction: collect the distinct Han ideographs of a text file

use std::path::Path;
use std::process;

use xlsxrec::{glyphs, ConverterBuilder, JsonStyle, XlsxToJsonError};

fn print_usage(program: &str) {
    eprintln!("Usage: {} --in-dir <dir> --out-dir <dir> [--compact]", program);
    eprintln!("       {} --glyphs <input.txt> <output.txt>", program);
    eprintln!("\nOptions:");
    eprintln!("  --in-dir <dir>       Directory containing source .xlsx files");
    eprintln!("  --out-dir <dir>      Directory receiving <book>_<sheet>.json files");
    eprintln!("  --compact            Write compact JSON (default is pretty, 4-space indent)");
    eprintln!("  --glyphs <in> <out>  Extract distinct Han ideographs from a text file");
    eprintln!("\nExamples:");
    eprintln!("  {} --in-dir data --out-dir out", program);
    eprintln!("  {} --in-dir data --out-dir out --compact", program);
    eprintln!("  {} --glyphs strings.txt glyphs.txt", program);
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        process::exit(1);
    }

    let mut in_dir: Option<String> = None;
    let mut out_dir: Option<String> = None;
    let mut compact = false;
    let mut glyph_paths: Option<(String, String)> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--in-dir" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --in-dir requires a value");
                    process::exit(1);
                }
                in_dir = Some(args[i + 1].clone());
                i += 2;
            }
            "--out-dir" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --out-dir requires a value");
                    process::exit(1);
                }
                out_dir = Some(args[i + 1].clone());
                i += 2;
            }
            "--compact" => {
                compact = true;
                i += 1;
            }
            "--glyphs" => {
                if i + 2 >= args.len() {
                    eprintln!("Error: --glyphs requires an input path and an output path");
                    process::exit(1);
                }
                glyph_paths = Some((args[i + 1].clone(), args[i + 2].clone()));
                i += 3;
            }
            other => {
                eprintln!("Error: Unknown option: {}", other);
                print_usage(&args[0]);
                process::exit(1);
            }
        }
    }

    let result = if let Some((input, output)) = glyph_paths {
        run_glyphs(&input, &output)
    } else {
        match (in_dir, out_dir) {
            (Some(input), Some(output)) => run_convert(&input, &output, compact),
            _ => {
                eprintln!("Error: --in-dir and --out-dir are both required");
                print_usage(&args[0]);
                process::exit(1);
            }
        }
    };

    if let Err(e) = result {
        handle_error(e);
        process::exit(1);
    }
}

fn run_convert(in_dir: &str, out_dir: &str, compact: bool) -> Result<(), XlsxToJsonError> {
    let style = if compact {
        JsonStyle::Compact
    } else {
        JsonStyle::Pretty
    };

    let converter = ConverterBuilder::new().with_json_style(style).build()?;
    let report = converter.convert_dir(Path::new(in_dir), Path::new(out_dir))?;

    for failure in &report.open_failures {
        eprintln!(
            "Warning: skipped workbook {}: {}",
            failure.path.display(),
            failure.message
        );
    }
    for rejected in &report.rejected_keys {
        eprintln!(
            "Warning: {}: record {} has non-integer id '{}', dropped",
            rejected.output, rejected.index, rejected.value
        );
    }

    for path in &report.written {
        println!("Wrote {}", path.display());
    }
    println!("Conversion completed: {} files written", report.written.len());

    Ok(())
}

fn run_glyphs(input: &str, output: &str) -> Result<(), XlsxToJsonError> {
    let set = glyphs::extract_file(Path::new(input), Path::new(output))?;
    println!("count: {}", set.distinct_count());
    Ok(())
}

fn handle_error(error: XlsxToJsonError) {
    match error {
        XlsxToJsonError::Io(io_err) => {
            eprintln!("I/O Error: {}", io_err);
            eprintln!("Please check that the paths exist and you have permission to access them.");
        }
        XlsxToJsonError::Open { workbook, source } => {
            eprintln!("Open Error: workbook '{}': {}", workbook, source);
            eprintln!("The file may not be a valid XLSX file or may be corrupted.");
        }
        XlsxToJsonError::Parse(parse_err) => {
            eprintln!("Parse Error: {}", parse_err);
            eprintln!("The file may not be a valid Excel file or may be corrupted.");
        }
        XlsxToJsonError::Schema { sheet, reason } => {
            eprintln!("Schema Error: sheet '{}': {}", sheet, reason);
            eprintln!("Row 1 must hold field names and row 2 type tags (0-based).");
        }
        XlsxToJsonError::RowFetch { sheet, row } => {
            eprintln!("Row Error: sheet '{}', row {}", sheet, row);
        }
        XlsxToJsonError::Conversion {
            sheet,
            row,
            col,
            raw,
            tag,
        } => {
            eprintln!("Conversion Error:");
            eprintln!("  Sheet: {}", sheet);
            eprintln!("  Row: {}", row);
            eprintln!("  Column: {}", col);
            eprintln!("  Value: '{}' (expected {})", raw, tag);
        }
        XlsxToJsonError::Json(json_err) => {
            eprintln!("JSON Error: {}", json_err);
        }
        XlsxToJsonError::Config(msg) => {
            eprintln!("Configuration Error: {}", msg);
        }
        XlsxToJsonError::SecurityViolation(msg) => {
            eprintln!("Security Violation: {}", msg);
            eprintln!("The file violates security constraints (e.g., file size limit).");
        }
    }
}
