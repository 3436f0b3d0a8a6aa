//! Integration tests for drivesync-drive
//!
//! Uses wiremock to simulate the Drive v3 API and verifies end-to-end
//! behavior of the DriveClient, change-feed queries, metadata lookups,
//! downloads, and exports.

mod common;

mod test_changes;
mod test_content;
