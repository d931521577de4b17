//! Statement loading: format dispatch, income removal and sign normalization.

use anyhow::{Context, Result};
use overview_core::{OverviewError, Transaction};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::parsers::{parse_bmo_text, parse_scotiabank_text};
use crate::types::{BankFormat, SignConvention, StatementRow};

/// Keep only spending rows and make their amounts positive.
pub fn normalize(rows: Vec<StatementRow>, convention: SignConvention) -> Vec<Transaction> {
    rows.into_iter()
        .filter_map(|row| {
            let spending = match convention {
                SignConvention::SpendingNegative => -row.amount,
                SignConvention::SpendingPositive => row.amount,
            };
            (spending > 0.0).then(|| Transaction::new(row.date, row.description, spending))
        })
        .collect()
}

/// Parse one statement file into spending transactions.
pub fn parse_statement(path: &Path) -> Result<Vec<Transaction>> {
    let format = BankFormat::detect(path)
        .ok_or_else(|| OverviewError::UnsupportedStatement(path.to_path_buf()))?;

    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let rows = match format {
        BankFormat::Scotiabank => parse_scotiabank_text(&text),
        BankFormat::Bmo => parse_bmo_text(&text),
    }
    .with_context(|| format!("parsing {}", path.display()))?;

    let row_count = rows.len();
    let txns = normalize(rows, format.sign_convention());
    if txns.is_empty() {
        warn!(
            file = %path.display(),
            "statement is empty or holds no debit; check its content"
        );
    }
    info!(
        file = %path.display(),
        ?format,
        rows = row_count,
        spending = txns.len(),
        "read statement"
    );
    Ok(txns)
}

/// CSV files of a statement folder, sorted by file name.
pub fn statement_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(OverviewError::MissingInput(dir.to_path_buf()).into());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("list {}", dir.display()))? {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("csv"));
        if path.is_file() && is_csv {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Read every statement of `dir` into one transaction stream. Fails when the
/// folder is missing or when no spending row survives income removal.
pub fn load_statement_folder(dir: &Path) -> Result<Vec<Transaction>> {
    let mut all = Vec::new();
    for file in statement_files(dir)? {
        all.extend(parse_statement(&file)?);
    }

    if all.is_empty() {
        return Err(OverviewError::NoSpending(dir.to_path_buf()).into());
    }
    Ok(all)
}
