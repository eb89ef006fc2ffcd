//! Domain types shared by every `ccnews` crate.
//!
//! These are pure data types with no infrastructure dependencies. They
//! derive `serde` traits so a storage sink can persist them unchanged.

mod catalog;
mod outcome;
mod period;
mod record;

pub use catalog::{Catalog, FileDescriptor, RangeSelection};
pub use outcome::{IngestionOutcome, OutcomeStatus, RunSummary};
pub use period::{Dataset, PeriodParseError, YearMonth};
pub use record::{CaptureRecord, ExtractedContent};
