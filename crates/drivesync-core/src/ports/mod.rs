//! Port definitions (hexagonal architecture interfaces)
//!
//! This module defines the port traits that form the boundaries of the
//! hexagonal architecture. Ports are interfaces that the domain core
//! depends on, but whose implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`IDriveClient`] - Change feed, metadata lookup, content retrieval
//! - [`IObjectStore`] - Overwrite-or-create object writes (S3)
//! - [`ICheckpointStore`] - Cursor persistence (SSM parameter)
//! - [`ICredentialSource`] - Read-only OAuth2 secret (Secrets Manager)

pub mod checkpoint;
pub mod credentials;
pub mod drive_client;
pub mod object_store;

pub use checkpoint::ICheckpointStore;
pub use credentials::{DriveCredentials, ICredentialSource};
pub use drive_client::IDriveClient;
pub use object_store::{IObjectStore, ObjectMeta};
