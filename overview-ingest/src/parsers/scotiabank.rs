//! Scotiabank credit card CSV export parser
//!
//! No header row. Each line is:
//!   03/14/2021,"SAVE ON FOODS #2190 VANCOUVER BC",-54.23
//! Charges are negative, payments positive.

use anyhow::Result;
use chrono::NaiveDate;
use tracing::debug;

use crate::types::StatementRow;

/// Parse the content of a Scotiabank export into raw rows.
pub fn parse_scotiabank_text(text: &str) -> Result<Vec<StatementRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(text.as_bytes());

    let mut out = Vec::new();

    for (line, result) in rdr.records().enumerate() {
        let record = result?;

        let date_str = record.get(0).unwrap_or("").trim();
        if date_str.is_empty() {
            continue;
        }

        let date = match NaiveDate::parse_from_str(date_str, "%m/%d/%Y") {
            Ok(d) => d,
            Err(_) => {
                debug!(line = line + 1, value = date_str, "skipping row with unparseable date");
                continue;
            }
        };

        let amount: f64 = match record.get(2).map(|s| s.trim().replace(',', "")) {
            Some(s) => match s.parse() {
                Ok(a) => a,
                Err(_) => {
                    debug!(line = line + 1, value = %s, "skipping row with unparseable amount");
                    continue;
                }
            },
            None => continue,
        };

        out.push(StatementRow {
            date,
            description: record.get(1).unwrap_or("").trim().to_string(),
            amount,
        });
    }

    Ok(out)
}
