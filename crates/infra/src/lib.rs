//! `keyward-infra`: storage boundary for the user directory.
//!
//! The directory store is an external collaborator from the core's point of
//! view: this crate defines the seam (`DirectoryStore`) plus a Postgres
//! implementation and an in-memory implementation for tests/dev.

pub mod directory;

pub use directory::{
    DirectoryStore, InMemoryDirectoryStore, NewUserRecord, PostgresDirectoryStore, StoreError,
    UserRecordChanges,
};
