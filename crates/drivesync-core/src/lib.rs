//! drivesync Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain model** - `ChangeRecord`, `ResolvedPath`, `ExportDecision`, `SyncCursor`, `RunSummary`
//! - **Export policy** - the pure MIME-type-to-behavior classification table
//! - **Object key building** - the stable S3 key format with name sanitization
//! - **Port definitions** - Traits for adapters: `IDriveClient`, `IObjectStore`, `ICheckpointStore`
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure business logic with no external dependencies.
//! Ports define trait interfaces that adapter crates implement.
//! The sync engine (in `drivesync-sync`) orchestrates the domain through
//! the port interfaces.

pub mod config;
pub mod domain;
pub mod ports;
