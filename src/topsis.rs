use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use topsis_scoring::*;

use std::fs;

use text_diff::print_diff;

use crate::args::Args;

pub mod io_common;
pub mod io_csv;
pub mod io_excel;
pub mod notify;
pub mod report;
pub mod server;

#[derive(Debug, Snafu)]
pub enum TopsisError {
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening workbook {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The input table {path} has no content"))]
    EmptyTable { path: String },
    #[snafu(display("Error reading a csv line"))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("Error rendering the output table"))]
    CsvWrite { source: csv::Error },
    #[snafu(display(""))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Line {lineno}: expected {expected} cells as in the header, found {found}"))]
    LineWidth {
        lineno: usize,
        found: usize,
        expected: usize,
    },
    #[snafu(display("Line {lineno}, column {column}: {content:?} is not a number"))]
    NonNumericCell {
        lineno: usize,
        column: usize,
        content: String,
    },
    #[snafu(display("Line {lineno}, column {column}: unsupported cell content {content}"))]
    ExcelWrongCellType {
        lineno: usize,
        column: usize,
        content: String,
    },
    #[snafu(display("Weights must be comma-separated numbers, could not read {content:?}"))]
    WeightNotNumeric { content: String },
    #[snafu(display("Impact {symbol:?} not understood: impacts must be '+' or '-' only"))]
    BadImpactSymbol { symbol: String },
    #[snafu(display("Invalid input: {source}"))]
    Scoring { source: InvalidInput },
    #[snafu(display("Error writing the output to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("The produced output does not match the reference {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type TopsisResult<T> = Result<T, TopsisError>;

/// A tabular input, as parsed by the readers.
///
/// The cells are kept as raw strings. The numeric conversion of the
/// criterion columns happens in [build_matrix], which reports the exact
/// cell on failure.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Parses a comma-separated list of criterion weights.
pub fn parse_weights(content: &str) -> TopsisResult<Vec<f64>> {
    let mut res: Vec<f64> = Vec::new();
    for tok in content.split(',') {
        let t = tok.trim();
        let w = t
            .parse::<f64>()
            .ok()
            .context(WeightNotNumericSnafu { content: t })?;
        res.push(w);
    }
    Ok(res)
}

/// Parses a comma-separated list of '+' / '-' impact symbols.
pub fn parse_impacts(content: &str) -> TopsisResult<Vec<Impact>> {
    let mut res: Vec<Impact> = Vec::new();
    for tok in content.split(',') {
        let imp = match tok.trim() {
            "+" => Impact::Maximize,
            "-" => Impact::Minimize,
            x => return BadImpactSymbolSnafu { symbol: x }.fail(),
        };
        res.push(imp);
    }
    Ok(res)
}

/// Converts a parsed table into a decision matrix: first column is the
/// label, every other column must hold a finite number.
pub fn build_matrix(table: &ParsedTable) -> TopsisResult<Vec<Alternative>> {
    let expected = table.header.len();
    let mut res: Vec<Alternative> = Vec::new();
    for (idx, cells) in table.rows.iter().enumerate() {
        // The header is line 1 of the file.
        let lineno = idx + 2;
        if cells.len() != expected {
            return LineWidthSnafu {
                lineno,
                found: cells.len(),
                expected,
            }
            .fail();
        }
        let label = cells[0].clone();
        let mut values: Vec<f64> = Vec::new();
        for (col, cell) in cells.iter().enumerate().skip(1) {
            let v = cell
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|x| x.is_finite())
                .context(NonNumericCellSnafu {
                    lineno,
                    column: col + 1,
                    content: cell.clone(),
                })?;
            values.push(v);
        }
        res.push(Alternative { label, values });
    }
    Ok(res)
}

/// Parses the weight and impact vectors and scores the table.
pub fn score_table(
    table: &ParsedTable,
    weights_str: &str,
    impacts_str: &str,
) -> TopsisResult<ScoringResult> {
    let matrix = build_matrix(table)?;
    let weights = parse_weights(weights_str)?;
    let impacts = parse_impacts(impacts_str)?;
    debug!(
        "score_table: {:?} rows, weights: {:?}, impacts: {:?}",
        matrix.len(),
        weights,
        impacts
    );
    run_topsis(&matrix, &weights, &impacts).context(ScoringSnafu {})
}

fn read_table(path: &str, input_type: &Option<String>) -> TopsisResult<ParsedTable> {
    let itype = match input_type.clone() {
        Some(t) => t,
        None => io_common::guess_input_type(path),
    };
    info!("Attempting to read the input table {:?} as {:?}", path, itype);
    match itype.as_str() {
        "csv" => io_csv::read_csv_table(path),
        "excel" | "xlsx" => io_excel::read_excel_table(path),
        x => whatever!("Input type not understood: {:?} (expected csv or excel)", x),
    }
}

fn check_reference(path: &str, produced: &str) -> TopsisResult<()> {
    let reference = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    if reference.trim_end() != produced.trim_end() {
        warn!("Found differences with the reference file");
        print_diff(reference.as_str(), produced, "\n");
        return ReferenceMismatchSnafu { path }.fail();
    }
    Ok(())
}

/// Runs the file-based flow: read the table, score it, write the ranked
/// table out, then the optional reference check and email delivery.
pub fn run_analysis(args: &Args) -> TopsisResult<()> {
    let input_path = match args.input.clone() {
        Some(p) => p,
        None => whatever!("No input file provided. Use --input to point at a CSV or Excel file."),
    };
    let weights_str = match args.weights.clone() {
        Some(w) => w,
        None => whatever!("No weights provided. Use --weights with one positive number per criterion."),
    };
    let impacts_str = match args.impacts.clone() {
        Some(i) => i,
        None => whatever!("No impacts provided. Use --impacts with one '+' or '-' per criterion."),
    };

    let table = read_table(&input_path, &args.input_type)?;
    debug!("run_analysis: table: {:?}", table);

    let result = score_table(&table, &weights_str, &impacts_str)?;
    info!(
        "Scored {:?} alternatives, best: {:?}",
        result.rows.len(),
        result.best().map(|b| b.label.clone())
    );

    let out_text = match report::output_format(&args.out) {
        report::OutputFormat::Json => report::render_json(&table, &result)?,
        report::OutputFormat::Csv => report::render_csv(&table, &result)?,
    };
    report::write_output(&args.out, &out_text)?;

    if let Some(ref_path) = args.reference.clone() {
        check_reference(&ref_path, &out_text)?;
    }

    if let Some(recipient) = args.email.clone() {
        let message = notify::send_results(&recipient, &table, &result);
        println!("{}", message);
    }

    Ok(())
}
