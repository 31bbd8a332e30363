// Reading decision matrices out of Excel workbooks.

use calamine::{open_workbook, Reader, Xlsx};
use log::debug;
use snafu::prelude::*;

use crate::topsis::io_common::format_cell_number;
use crate::topsis::*;

/// Reads the first worksheet of an Excel workbook as a table. The first
/// row is the header.
pub fn read_excel_table(path: &str) -> TopsisResult<ParsedTable> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = workbook
        .worksheet_range_at(0)
        .context(EmptyTableSnafu { path })?
        .context(OpeningExcelSnafu { path })?;

    let mut iter = wrange.rows();
    let header_row = match iter.next() {
        Some(r) => r,
        None => return EmptyTableSnafu { path }.fail(),
    };
    debug!("read_excel_table: header: {:?}", header_row);
    let header = read_row(header_row, 1)?;

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, row) in iter.enumerate() {
        let lineno = idx + 2;
        debug!("read_excel_table: line {:?}: {:?}", lineno, row);
        let cells = read_row(row, lineno)?;
        // Fully blank rows at the bottom of a worksheet are not data.
        if cells.iter().all(|c| c.is_empty()) {
            continue;
        }
        rows.push(cells);
    }
    if rows.is_empty() {
        return EmptyTableSnafu { path }.fail();
    }
    Ok(ParsedTable { header, rows })
}

fn read_row(row: &[calamine::DataType], lineno: usize) -> TopsisResult<Vec<String>> {
    let mut cells: Vec<String> = Vec::new();
    for (col, cell) in row.iter().enumerate() {
        cells.push(read_cell(cell, lineno, col + 1)?);
    }
    Ok(cells)
}

fn read_cell(cell: &calamine::DataType, lineno: usize, column: usize) -> TopsisResult<String> {
    match cell {
        calamine::DataType::String(s) => Ok(s.trim().to_string()),
        calamine::DataType::Float(f) => Ok(format_cell_number(*f)),
        calamine::DataType::Int(i) => Ok(i.to_string()),
        calamine::DataType::Empty => Ok("".to_string()),
        _ => ExcelWrongCellTypeSnafu {
            lineno,
            column,
            content: format!("{:?}", cell),
        }
        .fail(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_numeric_cells_like_csv_text() {
        assert_eq!(
            read_cell(&calamine::DataType::Float(250.0), 2, 2).unwrap(),
            "250"
        );
        assert_eq!(
            read_cell(&calamine::DataType::Float(0.84), 2, 2).unwrap(),
            "0.84"
        );
        assert_eq!(read_cell(&calamine::DataType::Int(64), 2, 3).unwrap(), "64");
        assert_eq!(read_cell(&calamine::DataType::Empty, 2, 4).unwrap(), "");
    }

    #[test]
    fn rejects_unsupported_cells() {
        let res = read_cell(&calamine::DataType::Bool(true), 3, 2);
        assert!(matches!(
            res,
            Err(TopsisError::ExcelWrongCellType {
                lineno: 3,
                column: 2,
                ..
            })
        ));
    }
}
