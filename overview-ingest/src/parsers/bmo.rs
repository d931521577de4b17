//! BMO credit card CSV export parser
//!
//! Expected layout after a short preamble:
//!   Item #,Card #,Transaction Date,Posting Date,Transaction Amount,Description
//!   1,'5191230000000000',20210304,20210305,23.45,TIM HORTONS #1234 VANCOUVER BC
//! Charges are positive, payments negative.

use anyhow::Result;
use chrono::NaiveDate;
use tracing::debug;

use crate::types::StatementRow;

const DATE_COL: usize = 2;
const AMOUNT_COL: usize = 4;
const DESCRIPTION_COL: usize = 5;

/// Parse the content of a BMO export into raw rows. Preamble and header lines
/// fail the date parse and are skipped.
pub fn parse_bmo_text(text: &str) -> Result<Vec<StatementRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(text.as_bytes());

    let mut out = Vec::new();

    for (line, result) in rdr.records().enumerate() {
        let record = result?;
        if record.len() <= DESCRIPTION_COL {
            continue;
        }

        let date_str = record.get(DATE_COL).unwrap_or("").trim();
        let date = match NaiveDate::parse_from_str(date_str, "%Y%m%d") {
            Ok(d) => d,
            Err(_) => {
                debug!(line = line + 1, value = date_str, "skipping non-transaction row");
                continue;
            }
        };

        let amount_str = record.get(AMOUNT_COL).unwrap_or("").trim().replace(',', "");
        let amount: f64 = match amount_str.parse() {
            Ok(a) => a,
            Err(_) => {
                debug!(line = line + 1, value = %amount_str, "skipping row with unparseable amount");
                continue;
            }
        };

        out.push(StatementRow {
            date,
            description: record.get(DESCRIPTION_COL).unwrap_or("").trim().to_string(),
            amount,
        });
    }

    Ok(out)
}
