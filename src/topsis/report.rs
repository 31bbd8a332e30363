// Rendering and writing of the ranked table.

use std::fs;

use log::info;
use serde_json::{json, Map as JSMap, Value as JSValue};
use snafu::prelude::*;

use crate::topsis::*;

pub enum OutputFormat {
    Csv,
    Json,
}

/// The output format is selected by the extension of the output path.
pub fn output_format(out: &Option<String>) -> OutputFormat {
    match out {
        Some(p) if p.ends_with(".json") => OutputFormat::Json,
        _ => OutputFormat::Csv,
    }
}

fn format_score(score: f64) -> String {
    // Scores are presented on a 0-100 scale with two decimals.
    format!("{:.2}", score * 100.0)
}

fn rounded_score(score: f64) -> f64 {
    (score * 10000.0).round() / 100.0
}

/// The input table with the `Topsis Score` and `Rank` columns appended,
/// as CSV text. The rows keep the input order.
pub fn render_csv(table: &ParsedTable, result: &ScoringResult) -> TopsisResult<String> {
    let mut wtr = csv::WriterBuilder::new().from_writer(Vec::new());
    let mut header = table.header.clone();
    header.push("Topsis Score".to_string());
    header.push("Rank".to_string());
    wtr.write_record(&header).context(CsvWriteSnafu {})?;
    for (cells, scored) in table.rows.iter().zip(result.rows.iter()) {
        let mut rec = cells.clone();
        rec.push(format_score(scored.score));
        rec.push(scored.rank.to_string());
        wtr.write_record(&rec).context(CsvWriteSnafu {})?;
    }
    let bytes = match wtr.into_inner() {
        Result::Ok(b) => b,
        Result::Err(e) => whatever!("Could not flush the csv writer: {:?}", e),
    };
    match String::from_utf8(bytes) {
        Result::Ok(s) => Ok(s),
        Result::Err(e) => whatever!("The rendered csv is not valid utf-8: {:?}", e),
    }
}

/// The scored rows as JSON records keyed by the header names, one record
/// per alternative, in the input order.
pub fn result_records(table: &ParsedTable, result: &ScoringResult) -> Vec<JSValue> {
    let mut records: Vec<JSValue> = Vec::new();
    for scored in result.rows.iter() {
        let mut rec: JSMap<String, JSValue> = JSMap::new();
        rec.insert(table.header[0].clone(), json!(scored.label));
        for (name, value) in table.header[1..].iter().zip(scored.values.iter()) {
            rec.insert(name.clone(), json!(value));
        }
        rec.insert(
            "Topsis Score".to_string(),
            json!(rounded_score(scored.score)),
        );
        rec.insert("Rank".to_string(), json!(scored.rank));
        records.push(JSValue::Object(rec));
    }
    records
}

pub fn render_json(table: &ParsedTable, result: &ScoringResult) -> TopsisResult<String> {
    let js = JSValue::Array(result_records(table, result));
    let mut text = serde_json::to_string_pretty(&js).context(SerializingJsonSnafu {})?;
    text.push('\n');
    Ok(text)
}

/// Writes the rendered table to the given path, or to the standard output
/// when no path (or 'stdout') is given.
pub fn write_output(out: &Option<String>, text: &str) -> TopsisResult<()> {
    match out {
        Some(p) if p != "stdout" => {
            info!("Writing the ranked table to {:?}", p);
            fs::write(p, text).context(WritingOutputSnafu { path: p.clone() })
        }
        _ => {
            print!("{}", text);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topsis::io_csv::read_csv_table_from_reader;

    fn scored_phones() -> (ParsedTable, ScoringResult) {
        let table = read_csv_table_from_reader(
            "Model,Price,Storage,Camera,Battery\n\
             P1,250,64,12,4000\n\
             P2,200,32,8,3500\n\
             P3,300,128,16,4500\n"
                .as_bytes(),
            "inline",
        )
        .unwrap();
        let result = score_table(&table, "1,1,1,2", "-,+,+,+").unwrap();
        (table, result)
    }

    #[test]
    fn renders_the_ranked_csv() {
        let (table, result) = scored_phones();
        let text = render_csv(&table, &result).unwrap();
        assert_eq!(
            text,
            "Model,Price,Storage,Camera,Battery,Topsis Score,Rank\n\
             P1,250,64,12,4000,40.08,2\n\
             P2,200,32,8,3500,22.05,3\n\
             P3,300,128,16,4500,77.95,1\n"
        );
    }

    #[test]
    fn quotes_labels_containing_commas() {
        let table = read_csv_table_from_reader(
            "Name,A,B\n\"Widget, large\",1,4\nGadget,2,3\n".as_bytes(),
            "inline",
        )
        .unwrap();
        let result = score_table(&table, "1,1", "+,+").unwrap();
        let text = render_csv(&table, &result).unwrap();
        assert!(text.contains("\"Widget, large\""), "{}", text);
    }

    #[test]
    fn renders_json_records() {
        let (table, result) = scored_phones();
        let text = render_json(&table, &result).unwrap();
        let js: JSValue = serde_json::from_str(&text).unwrap();
        let records = js.as_array().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["Model"], json!("P1"));
        assert_eq!(records[0]["Price"], json!(250.0));
        assert_eq!(records[2]["Topsis Score"], json!(77.95));
        assert_eq!(records[2]["Rank"], json!(1));
    }

    #[test]
    fn selects_the_format_from_the_extension() {
        assert!(matches!(
            output_format(&Some("out.json".to_string())),
            OutputFormat::Json
        ));
        assert!(matches!(
            output_format(&Some("out.csv".to_string())),
            OutputFormat::Csv
        ));
        assert!(matches!(output_format(&None), OutputFormat::Csv));
    }
}
