//! Bank-specific CSV parsers. Each one returns rows with the bank's own sign
//! convention; `statement::normalize` turns them into spending transactions.

pub mod bmo;
pub mod scotiabank;

pub use bmo::parse_bmo_text;
pub use scotiabank::parse_scotiabank_text;
