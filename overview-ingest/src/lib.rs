//! overview-ingest: bank statement exports (CSV) normalized into spending transactions.

pub mod parsers;
pub mod statement;
pub mod types;

pub use statement::{load_statement_folder, normalize, parse_statement, statement_files};
pub use types::{BankFormat, SignConvention, StatementRow};
