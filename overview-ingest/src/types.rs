use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Supported statement exports. Detected from the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BankFormat {
    Scotiabank,
    Bmo,
}

/// How a bank signs a charge on its CSV export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignConvention {
    /// Charges are negative, payments/refunds positive
    SpendingNegative,
    /// Charges are positive, payments/refunds negative
    SpendingPositive,
}

impl BankFormat {
    /// Pick the format from the file name, e.g. `scotiabank_2021.csv` or `BMO-visa.csv`.
    pub fn detect(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy().to_lowercase();
        if name.contains("scotiabank") {
            Some(BankFormat::Scotiabank)
        } else if name.contains("bmo") {
            Some(BankFormat::Bmo)
        } else {
            None
        }
    }

    pub fn sign_convention(&self) -> SignConvention {
        match self {
            BankFormat::Scotiabank => SignConvention::SpendingNegative,
            BankFormat::Bmo => SignConvention::SpendingPositive,
        }
    }
}

/// A statement row as the bank wrote it, sign untouched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementRow {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_from_file_name() {
        assert_eq!(
            BankFormat::detect(Path::new("/tmp/statements/Scotiabank_2021.CSV")),
            Some(BankFormat::Scotiabank)
        );
        assert_eq!(BankFormat::detect(Path::new("bmo-mastercard.csv")), Some(BankFormat::Bmo));
        assert_eq!(BankFormat::detect(Path::new("amex.csv")), None);
    }

    #[test]
    fn test_sign_conventions() {
        assert_eq!(BankFormat::Scotiabank.sign_convention(), SignConvention::SpendingNegative);
        assert_eq!(BankFormat::Bmo.sign_convention(), SignConvention::SpendingPositive);
    }
}
