pub mod catalog;
pub mod error;

pub use catalog::{Catalog, IngestOutcome, SalesOutcome};
pub use error::IngestError;
