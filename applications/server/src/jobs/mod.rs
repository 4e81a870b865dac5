/// Background jobs
pub mod scan;

pub use scan::{ScanJobError, ScanJobs, ScanStatus};
