pub mod checks;
pub mod clean;
pub mod errors;
pub mod schema;
pub mod store;
pub mod suite;
pub mod table;

pub use clean::clean;
pub use errors::CheckError;
pub use store::{ArtifactStore, LocalStore, StoreError};
pub use suite::{CheckOutcome, SuiteReport, Thresholds, run_checks};
pub use table::ListingTable;
