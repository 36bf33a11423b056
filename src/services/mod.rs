pub mod catalog;
pub mod explorer;

pub use catalog::{CatalogEntry, EndpointCatalog};
pub use explorer::{Explorer, ExplorerBoundary, HistoryPolicy, SubmitOutcome};
