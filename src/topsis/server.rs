// A minimal synchronous HTTP surface for the scorer: one request per
// connection, no keep-alive, no shared state between requests.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};

use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::{json, Value as JSValue};
use snafu::prelude::*;

use crate::topsis::*;

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn json(status: u16, payload: JSValue) -> HttpResponse {
        HttpResponse {
            status,
            body: payload.to_string(),
        }
    }
}

/// The body of a scoring request, following the wire contract of the
/// upload form: the CSV text plus the two comma-separated vectors.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreRequest {
    #[serde(rename = "csvData")]
    pub csv_data: String,
    pub weights: String,
    pub impacts: String,
    pub email: Option<String>,
    #[serde(rename = "sendEmail", default)]
    pub send_email: bool,
}

pub fn serve(addr: &str) -> TopsisResult<()> {
    let listener = match TcpListener::bind(addr) {
        Result::Ok(l) => l,
        Result::Err(e) => whatever!("Could not bind {:?}: {:?}", addr, e),
    };
    info!("topsisrank listening on {}", addr);
    for stream in listener.incoming() {
        match stream {
            Result::Ok(stream) => {
                if let Err(err) = handle_connection(stream) {
                    warn!("http request error: {:?}", err);
                }
            }
            Result::Err(err) => {
                warn!("http accept error: {:?}", err);
            }
        }
    }
    Ok(())
}

fn handle_connection(mut stream: TcpStream) -> io::Result<()> {
    let req = match read_http_request(&stream)? {
        Some(r) => r,
        None => return Ok(()),
    };
    debug!("handle_connection: {} {}", req.method, req.path);
    let response = dispatch(&req);
    write_http_response(&mut stream, &response)
}

pub fn dispatch(req: &HttpRequest) -> HttpResponse {
    match (req.method.as_str(), req.path.as_str()) {
        ("GET", "/health") => HttpResponse::json(200, json!({"status": "ok"})),
        ("POST", "/api/topsis") => score_request(&req.body),
        ("GET", _) | ("POST", _) => {
            HttpResponse::json(404, json!({"success": false, "error": "unknown path"}))
        }
        _ => HttpResponse::json(405, json!({"success": false, "error": "method not allowed"})),
    }
}

fn score_request(body: &[u8]) -> HttpResponse {
    let req: ScoreRequest = match serde_json::from_slice(body) {
        Result::Ok(v) => v,
        Result::Err(err) => {
            return HttpResponse::json(
                400,
                json!({"success": false, "error": format!("invalid request body: {}", err)}),
            );
        }
    };
    let table = match io_csv::read_csv_table_from_reader(req.csv_data.as_bytes(), "request body") {
        Result::Ok(t) => t,
        Result::Err(err) => return rejected(err),
    };
    let result = match score_table(&table, &req.weights, &req.impacts) {
        Result::Ok(r) => r,
        Result::Err(err) => return rejected(err),
    };
    let records = report::result_records(&table, &result);

    let message = if req.send_email {
        match req.email {
            Some(ref addr) if !addr.trim().is_empty() => notify::send_results(addr, &table, &result),
            _ => "No recipient address provided, skipping the email delivery.".to_string(),
        }
    } else {
        "Ranking computed successfully.".to_string()
    };

    HttpResponse::json(
        200,
        json!({"success": true, "results": records, "message": message}),
    )
}

fn rejected(err: TopsisError) -> HttpResponse {
    HttpResponse::json(400, json!({"success": false, "error": err.to_string()}))
}

fn read_http_request(stream: &TcpStream) -> io::Result<Option<HttpRequest>> {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    if reader.read_line(&mut request_line)? == 0 {
        return Ok(None);
    }
    let mut parts = request_line.split_whitespace();
    let method = match parts.next() {
        Some(m) => m.to_string(),
        None => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "invalid http request line (missing method)",
            ))
        }
    };
    let path = match parts.next() {
        Some(p) => p.to_string(),
        None => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "invalid http request line (missing path)",
            ))
        }
    };

    let mut content_length = 0_usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse::<usize>().unwrap_or(0);
            }
        }
    }

    let mut body = vec![0_u8; content_length];
    if content_length > 0 {
        reader.read_exact(&mut body)?;
    }
    Ok(Some(HttpRequest { method, path, body }))
}

fn write_http_response(stream: &mut TcpStream, response: &HttpResponse) -> io::Result<()> {
    let reason = match response.status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        _ => "Internal Server Error",
    };
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        reason,
        response.body.len()
    );
    stream.write_all(head.as_bytes())?;
    stream.write_all(response.body.as_bytes())?;
    stream.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONES_CSV: &str = "Model,Price,Storage,Camera,Battery\n\
        P1,250,64,12,4000\n\
        P2,200,32,8,3500\n\
        P3,300,128,16,4500\n";

    fn post(path: &str, body: JSValue) -> HttpResponse {
        let req = HttpRequest {
            method: "POST".to_string(),
            path: path.to_string(),
            body: body.to_string().into_bytes(),
        };
        dispatch(&req)
    }

    #[test]
    fn health_answers_ok() {
        let req = HttpRequest {
            method: "GET".to_string(),
            path: "/health".to_string(),
            body: Vec::new(),
        };
        let resp = dispatch(&req);
        assert_eq!(resp.status, 200);
        let js: JSValue = serde_json::from_str(&resp.body).unwrap();
        assert_eq!(js["status"], json!("ok"));
    }

    #[test]
    fn scores_a_request() {
        let resp = post(
            "/api/topsis",
            json!({
                "csvData": PHONES_CSV,
                "weights": "1,1,1,2",
                "impacts": "-,+,+,+",
            }),
        );
        assert_eq!(resp.status, 200);
        let js: JSValue = serde_json::from_str(&resp.body).unwrap();
        assert_eq!(js["success"], json!(true));
        let results = js["results"].as_array().unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[2]["Model"], json!("P3"));
        assert_eq!(results[2]["Rank"], json!(1));
        assert_eq!(results[2]["Topsis Score"], json!(77.95));
        assert_eq!(results[0]["Rank"], json!(2));
        assert_eq!(results[1]["Rank"], json!(3));
    }

    #[test]
    fn reports_a_weight_count_mismatch() {
        let resp = post(
            "/api/topsis",
            json!({
                "csvData": PHONES_CSV,
                "weights": "1,1",
                "impacts": "-,+,+,+",
            }),
        );
        assert_eq!(resp.status, 400);
        let js: JSValue = serde_json::from_str(&resp.body).unwrap();
        assert_eq!(js["success"], json!(false));
        let msg = js["error"].as_str().unwrap();
        assert!(msg.contains("2 weights provided for 4 criteria"), "{}", msg);
    }

    #[test]
    fn rejects_a_body_that_is_not_json() {
        let req = HttpRequest {
            method: "POST".to_string(),
            path: "/api/topsis".to_string(),
            body: b"not json".to_vec(),
        };
        let resp = dispatch(&req);
        assert_eq!(resp.status, 400);
        let js: JSValue = serde_json::from_str(&resp.body).unwrap();
        assert_eq!(js["success"], json!(false));
    }

    #[test]
    fn unknown_paths_get_a_404() {
        let req = HttpRequest {
            method: "GET".to_string(),
            path: "/nope".to_string(),
            body: Vec::new(),
        };
        assert_eq!(dispatch(&req).status, 404);
    }

    #[test]
    fn reports_a_missing_recipient() {
        let resp = post(
            "/api/topsis",
            json!({
                "csvData": PHONES_CSV,
                "weights": "1,1,1,2",
                "impacts": "-,+,+,+",
                "sendEmail": true,
            }),
        );
        assert_eq!(resp.status, 200);
        let js: JSValue = serde_json::from_str(&resp.body).unwrap();
        let msg = js["message"].as_str().unwrap();
        assert!(msg.contains("No recipient address"), "{}", msg);
    }
}
