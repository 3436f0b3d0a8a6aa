//! Integration tests for metadata lookup, download, and export
//!
//! Verifies the content-retrieval half of the client against a
//! wiremock-based Drive API mock server.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use drivesync_core::domain::newtypes::FileId;
use drivesync_drive::client::DriveClient;

use crate::common;

#[tokio::test]
async fn test_get_metadata_folder() {
    let (server, client) = common::setup_drive_mock().await;
    common::mount_folder_metadata(&server, "folder-001", "Reports", &["root-id"]).await;

    let id: FileId = "folder-001".parse().unwrap();
    let meta = client.get_metadata(&id).await.expect("metadata lookup failed");

    assert_eq!(meta.id, "folder-001");
    assert_eq!(meta.name, "Reports");
    assert_eq!(meta.mime_type, "application/vnd.google-apps.folder");
    assert_eq!(meta.parents, vec!["root-id".to_string()]);
    assert!(meta.shortcut_target.is_none());
}

#[tokio::test]
async fn test_get_metadata_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/files/missing-001"))
        .respond_with(ResponseTemplate::new(404).set_body_string("File not found"))
        .mount(&server)
        .await;

    let client = DriveClient::with_base_url("token", server.uri());
    let id: FileId = "missing-001".parse().unwrap();

    let err = client.get_metadata(&id).await.expect_err("404 must fail");
    let message = format!("{err:#}");
    assert!(message.contains("Not found"), "unexpected error: {message}");
}

#[tokio::test]
async fn test_download_returns_raw_bytes() {
    let (server, client) = common::setup_drive_mock().await;

    let body: &[u8] = b"\x89PNG\r\n\x1a\nfakeimagedata";
    Mock::given(method("GET"))
        .and(path("/files/img-001"))
        .and(query_param("alt", "media"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(&server)
        .await;

    let id: FileId = "img-001".parse().unwrap();
    let bytes = client.download(&id).await.expect("download failed");
    assert_eq!(bytes, body);
}

#[tokio::test]
async fn test_export_requests_target_mime() {
    let (server, client) = common::setup_drive_mock().await;

    Mock::given(method("GET"))
        .and(path("/files/doc-001/export"))
        .and(query_param(
            "mimeType",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK\x03\x04docx".as_slice()))
        .mount(&server)
        .await;

    let id: FileId = "doc-001".parse().unwrap();
    let bytes = client
        .export(
            &id,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        )
        .await
        .expect("export failed");
    assert!(bytes.starts_with(b"PK"));
}

#[tokio::test]
async fn test_export_forbidden_surfaces_error() {
    // Non-exportable Google types answer 403 on the export endpoint.
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/files/form-001/export"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Export not supported"))
        .mount(&server)
        .await;

    let client = DriveClient::with_base_url("token", server.uri());
    let id: FileId = "form-001".parse().unwrap();

    let err = client.export(&id, "application/pdf").await.expect_err("403");
    let message = format!("{err:#}");
    assert!(message.contains("Forbidden"), "unexpected error: {message}");
}
