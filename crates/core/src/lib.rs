pub mod config;
pub mod dates;
pub mod edit;
pub mod error;
pub mod report;
pub mod store;
pub mod types;

pub use config::{Config, SortOrder, load_config};
pub use edit::{Edit, EditOutcome, apply_edit, run_edit};
pub use error::{Error, Result};
pub use report::{IdSubset, ReportRow, ResultItem};
pub use store::{Catalog, Store};
pub use types::*;
