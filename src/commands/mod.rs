//! CLI commands for corral
//!
//! - **snapshot**: replace the current repository's nightly snapshot release
//! - **summary**: render the herd-wide software summary table

pub mod snapshot;
pub mod summary;

pub use snapshot::run_snapshot;
pub use summary::run_summary;
