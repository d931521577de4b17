//! overview-core: data model shared by the statement ingest, the
//! categorization pipeline and the report renderer

pub mod category;
pub mod error;
pub mod month;
pub mod series;
pub mod transaction;

pub use category::{Category, CategoryKey, TransportCategory};
pub use error::OverviewError;
pub use month::YearMonth;
pub use series::{MonthlyAmount, MonthlySeries};
pub use transaction::{Transaction, earliest_date};
