use std::path::Path;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_string())
        .unwrap_or_else(|| path.to_string())
}

/// Guesses the input type from the file extension. Anything that is not an
/// Excel extension is treated as CSV.
pub fn guess_input_type(path: &str) -> String {
    match Path::new(path).extension().and_then(|e| e.to_str()) {
        Some("xlsx") | Some("xls") => "excel".to_string(),
        _ => "csv".to_string(),
    }
}

/// Formats a numeric Excel cell the way it would appear in a CSV file:
/// whole numbers without the trailing '.0'.
pub fn format_cell_number(x: f64) -> String {
    if x.fract() == 0.0 && x.abs() < 1e15 {
        format!("{}", x as i64)
    } else {
        format!("{}", x)
    }
}
