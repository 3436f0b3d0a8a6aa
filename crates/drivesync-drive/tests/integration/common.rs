//! Shared test helpers for Drive API integration tests
//!
//! Provides wiremock-based mock server setup for Drive v3 endpoints.
//! Each helper mounts the necessary mock endpoints and returns a
//! configured DriveClient pointing at the mock server.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use drivesync_drive::client::DriveClient;

/// Starts a mock server and returns a (MockServer, DriveClient) tuple.
pub async fn setup_drive_mock() -> (MockServer, DriveClient) {
    let server = MockServer::start().await;
    let client = DriveClient::with_base_url("test-access-token", server.uri());
    (server, client)
}

/// Mounts a changes endpoint that returns a single final page for the
/// given cursor, carrying `new_start_token`.
pub async fn mount_changes_final_page(
    server: &MockServer,
    cursor: &str,
    changes: serde_json::Value,
    new_start_token: &str,
) {
    Mock::given(method("GET"))
        .and(path("/changes"))
        .and(query_param("pageToken", cursor))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "changes": changes,
            "newStartPageToken": new_start_token
        })))
        .mount(server)
        .await;
}

/// Mounts a metadata endpoint for a folder with the given parent chain.
pub async fn mount_folder_metadata(
    server: &MockServer,
    folder_id: &str,
    name: &str,
    parents: &[&str],
) {
    Mock::given(method("GET"))
        .and(path(format!("/files/{folder_id}")))
        .and(query_param("fields", "id,name,mimeType,modifiedTime,trashed,parents,shortcutDetails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": folder_id,
            "name": name,
            "mimeType": "application/vnd.google-apps.folder",
            "parents": parents
        })))
        .mount(server)
        .await;
}
