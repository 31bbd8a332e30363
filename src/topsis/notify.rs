// Email delivery of the ranked table. Everything in here is best-effort:
// the outcome is reported as a message and logged, it never fails the
// scoring run.

use std::env;
use std::time::Duration;

use log::{info, warn};
use serde_json::json;

use crate::topsis::*;

/// The sender configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// API key of the email service. Empty means delivery is disabled.
    pub api_key: String,
    pub api_url: String,
    pub from_email: String,
    pub from_name: String,
}

impl EmailConfig {
    pub fn from_env() -> EmailConfig {
        EmailConfig {
            api_key: env::var("RESEND_API_KEY").unwrap_or_default(),
            api_url: env_or("TOPSIS_EMAIL_API_URL", default_api_url),
            from_email: env_or("TOPSIS_FROM_EMAIL", default_from_email),
            from_name: env_or("TOPSIS_FROM_NAME", default_from_name),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// The formatted "From" header value.
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }
}

fn env_or(name: &str, default: fn() -> String) -> String {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(default)
}

fn default_api_url() -> String {
    "https://api.resend.com/emails".to_string()
}

fn default_from_email() -> String {
    "topsis@example.com".to_string()
}

fn default_from_name() -> String {
    "TOPSIS Rank".to_string()
}

/// Delivers the ranked table to the recipient, using the configuration
/// from the environment. Returns a human-readable outcome message.
pub fn send_results(recipient: &str, table: &ParsedTable, result: &ScoringResult) -> String {
    send_results_with(&EmailConfig::from_env(), recipient, table, result)
}

pub fn send_results_with(
    config: &EmailConfig,
    recipient: &str,
    table: &ParsedTable,
    result: &ScoringResult,
) -> String {
    if !recipient.contains('@') {
        warn!("send_results: invalid recipient {:?}", recipient);
        return format!(
            "The address {:?} does not look like an email address, skipping the delivery.",
            recipient
        );
    }
    if !config.is_configured() {
        info!("send_results: no email configuration, skipping");
        return "Email delivery is not configured (set RESEND_API_KEY), skipping.".to_string();
    }

    let csv = match report::render_csv(table, result) {
        Result::Ok(c) => c,
        Result::Err(e) => {
            warn!("send_results: could not render the attachment: {:?}", e);
            return "Could not render the results attachment, the email was not sent.".to_string();
        }
    };

    let payload = json!({
        "from": config.from_header(),
        "to": [recipient],
        "subject": "TOPSIS ranking results",
        "text": message_body(result),
        "attachments": [{
            "filename": "topsis_results.csv",
            "content": base64::encode(csv.as_bytes()),
        }],
    });

    let client = match reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
    {
        Result::Ok(c) => c,
        Result::Err(e) => {
            warn!("send_results: could not build the http client: {:?}", e);
            return "The email client could not be set up, the email was not sent.".to_string();
        }
    };

    let res = client
        .post(&config.api_url)
        .bearer_auth(&config.api_key)
        .json(&payload)
        .send();
    match res {
        Result::Ok(resp) if resp.status().is_success() => {
            info!("send_results: results sent to {:?}", recipient);
            format!("Results sent to {}.", recipient)
        }
        Result::Ok(resp) => {
            warn!("send_results: delivery refused with status {}", resp.status());
            format!(
                "The email service refused the delivery (status {}), download the results instead.",
                resp.status()
            )
        }
        Result::Err(err) => {
            warn!("send_results: delivery failed: {:?}", err);
            "The email could not be sent, download the results instead.".to_string()
        }
    }
}

fn message_body(result: &ScoringResult) -> String {
    let mut lines: Vec<String> = vec![
        "Your TOPSIS ranking is ready, the full table is attached.".to_string(),
        "".to_string(),
        format!("Alternatives ranked: {}", result.rows.len()),
    ];
    if let Some(best) = result.best() {
        lines.push(format!(
            "Best alternative: {} (score {:.2})",
            best.label,
            best.score * 100.0
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topsis::io_csv::read_csv_table_from_reader;

    fn scored() -> (ParsedTable, ScoringResult) {
        let table = read_csv_table_from_reader(
            "Model,Price,Storage\nP1,250,64\nP2,200,32\n".as_bytes(),
            "inline",
        )
        .unwrap();
        let result = score_table(&table, "1,1", "-,+").unwrap();
        (table, result)
    }

    fn disabled_config() -> EmailConfig {
        EmailConfig {
            api_key: "".to_string(),
            api_url: default_api_url(),
            from_email: default_from_email(),
            from_name: default_from_name(),
        }
    }

    #[test]
    fn formats_the_from_header() {
        let config = EmailConfig {
            api_key: "re_test".to_string(),
            api_url: default_api_url(),
            from_email: "support@example.com".to_string(),
            from_name: "Support Team".to_string(),
        };
        assert_eq!(config.from_header(), "Support Team <support@example.com>");
    }

    #[test]
    fn skips_delivery_without_a_configuration() {
        let (table, result) = scored();
        let msg = send_results_with(&disabled_config(), "user@example.com", &table, &result);
        assert!(msg.contains("not configured"), "{}", msg);
    }

    #[test]
    fn skips_delivery_for_a_bad_address() {
        let (table, result) = scored();
        let msg = send_results_with(&disabled_config(), "not-an-address", &table, &result);
        assert!(msg.contains("does not look like an email address"), "{}", msg);
    }

    #[test]
    fn the_message_names_the_best_alternative() {
        let (_, result) = scored();
        let body = message_body(&result);
        assert!(body.contains("Alternatives ranked: 2"), "{}", body);
        assert!(body.contains("Best alternative:"), "{}", body);
    }
}
