// Primitives for reading CSV files.

use std::fs::File;
use std::io::Read;

use csv::ReaderBuilder;
use log::debug;
use snafu::prelude::*;

use crate::topsis::*;

pub fn read_csv_table(path: &str) -> TopsisResult<ParsedTable> {
    let file = File::open(path).context(OpeningFileSnafu { path })?;
    read_csv_table_from_reader(file, path)
}

/// Reads a table from any CSV reader. The first record is the header;
/// short or long lines are kept as-is and reported later against the
/// header width.
pub fn read_csv_table_from_reader<R: Read>(reader: R, path: &str) -> TopsisResult<ParsedTable> {
    let rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut records = rdr.into_records();

    let header = match records.next() {
        Some(rec) => rec.context(CsvLineParseSnafu {})?,
        None => return EmptyTableSnafu { path }.fail(),
    };
    let header: Vec<String> = header.iter().map(|s| s.trim().to_string()).collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, rec) in records.enumerate() {
        let lineno = idx + 2;
        let rec = rec.context(CsvLineParseSnafu {})?;
        debug!("read_csv_table: line {:?}: {:?}", lineno, rec);
        rows.push(rec.iter().map(|s| s.trim().to_string()).collect());
    }
    if rows.is_empty() {
        return EmptyTableSnafu { path }.fail();
    }
    Ok(ParsedTable { header, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_a_simple_table() {
        let table = read_csv_table_from_reader(
            "Name,A,B\nfirst,1,2\nsecond,3,4\n".as_bytes(),
            "inline",
        )
        .unwrap();
        assert_eq!(table.header, vec!["Name", "A", "B"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], vec!["second", "3", "4"]);
    }

    #[test]
    fn keeps_quoted_cells_intact() {
        let table = read_csv_table_from_reader(
            "Name,A,B\n\"Widget, large\",1,2\nGadget,3,4\n".as_bytes(),
            "inline",
        )
        .unwrap();
        assert_eq!(table.rows[0][0], "Widget, large");
    }

    #[test]
    fn rejects_an_empty_input() {
        let res = read_csv_table_from_reader("".as_bytes(), "inline");
        assert!(matches!(res, Err(TopsisError::EmptyTable { .. })));
    }

    #[test]
    fn rejects_a_header_only_input() {
        let res = read_csv_table_from_reader("Name,A,B\n".as_bytes(), "inline");
        assert!(matches!(res, Err(TopsisError::EmptyTable { .. })));
    }
}
