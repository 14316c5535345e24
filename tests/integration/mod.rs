//! Integration tests driving the `corral` binary
//!
//! Nothing here talks to GitHub: every scenario fails or finishes before the
//! first remote call.

mod helpers;
mod test_snapshot;
mod test_summary;
