//! Integration tests for change-feed queries
//!
//! Verifies end-to-end behavior of the changes module against a
//! wiremock-based Drive API mock server:
//! - Baseline token acquisition
//! - Single-page change listing
//! - Pagination tokens
//! - Removed and shortcut records
//! - Error status mapping (429, 500)

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use drivesync_core::domain::newtypes::PageToken;
use drivesync_drive::{changes, client::DriveClient};

use crate::common;

#[tokio::test]
async fn test_start_page_token_acquisition() {
    let (server, client) = common::setup_drive_mock().await;

    Mock::given(method("GET"))
        .and(path("/changes/startPageToken"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"startPageToken": "48291"})),
        )
        .mount(&server)
        .await;

    let token = changes::start_page_token(&client)
        .await
        .expect("startPageToken query failed");
    assert_eq!(token.as_str(), "48291");
}

#[tokio::test]
async fn test_list_changes_single_final_page() {
    let (server, client) = common::setup_drive_mock().await;

    common::mount_changes_final_page(
        &server,
        "100",
        serde_json::json!([
            {
                "fileId": "file-001",
                "removed": false,
                "file": {
                    "name": "notes.txt",
                    "mimeType": "text/plain",
                    "modifiedTime": "2026-02-01T12:00:00.000Z",
                    "trashed": false,
                    "parents": ["folder-001"]
                }
            },
            {
                "fileId": "gone-001",
                "removed": true
            }
        ]),
        "101",
    )
    .await;

    let cursor = PageToken::new("100".to_string()).unwrap();
    let page = changes::list_changes(&client, &cursor)
        .await
        .expect("changes query failed");

    assert_eq!(page.records.len(), 2);
    assert!(!page.has_more());
    assert_eq!(page.commit_token().unwrap().as_str(), "101");

    let file = &page.records[0];
    assert_eq!(file.file_id, "file-001");
    assert_eq!(file.name, "notes.txt");
    assert_eq!(file.mime_type, "text/plain");
    assert_eq!(file.parents, vec!["folder-001".to_string()]);
    assert!(!file.removed);

    let gone = &page.records[1];
    assert_eq!(gone.file_id, "gone-001");
    assert!(gone.removed);
}

#[tokio::test]
async fn test_list_changes_intermediate_page() {
    let (server, client) = common::setup_drive_mock().await;

    Mock::given(method("GET"))
        .and(path("/changes"))
        .and(query_param("pageToken", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "changes": [
                {
                    "fileId": "file-a",
                    "file": { "name": "a.bin", "mimeType": "application/octet-stream" }
                }
            ],
            "nextPageToken": "page-2"
        })))
        .mount(&server)
        .await;

    let cursor = PageToken::new("100".to_string()).unwrap();
    let page = changes::list_changes(&client, &cursor).await.unwrap();

    assert!(page.has_more());
    assert_eq!(page.commit_token().unwrap().as_str(), "page-2");
    assert!(page.new_start_token.is_none());
}

#[tokio::test]
async fn test_list_changes_shortcut_record() {
    let (server, client) = common::setup_drive_mock().await;

    common::mount_changes_final_page(
        &server,
        "50",
        serde_json::json!([
            {
                "fileId": "sc-001",
                "file": {
                    "name": "link to report",
                    "mimeType": "application/vnd.google-apps.shortcut",
                    "shortcutDetails": { "targetId": "real-001" }
                }
            }
        ]),
        "51",
    )
    .await;

    let cursor = PageToken::new("50".to_string()).unwrap();
    let page = changes::list_changes(&client, &cursor).await.unwrap();
    assert_eq!(page.records[0].shortcut_target.as_deref(), Some("real-001"));
}

#[tokio::test]
async fn test_list_changes_rate_limited_surfaces_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/changes"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .mount(&server)
        .await;

    let client = DriveClient::with_base_url("token", server.uri());
    let cursor = PageToken::new("100".to_string()).unwrap();

    let err = changes::list_changes(&client, &cursor)
        .await
        .expect_err("429 must surface as an error");
    let message = format!("{err:#}");
    assert!(message.contains("429"), "unexpected error: {message}");
}

#[tokio::test]
async fn test_list_changes_server_error_surfaces_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/changes"))
        .respond_with(ResponseTemplate::new(503).set_body_string("backend unavailable"))
        .mount(&server)
        .await;

    let client = DriveClient::with_base_url("token", server.uri());
    let cursor = PageToken::new("100".to_string()).unwrap();

    let err = changes::list_changes(&client, &cursor).await.expect_err("503");
    let message = format!("{err:#}");
    assert!(message.contains("503"), "unexpected error: {message}");
}

#[tokio::test]
async fn test_list_changes_empty_feed() {
    let (server, client) = common::setup_drive_mock().await;
    common::mount_changes_final_page(&server, "7", serde_json::json!([]), "8").await;

    let cursor = PageToken::new("7".to_string()).unwrap();
    let page = changes::list_changes(&client, &cursor).await.unwrap();
    assert!(page.records.is_empty());
    assert_eq!(page.commit_token().unwrap().as_str(), "8");
}
