//! Document storage abstraction.
//!
//! The [`DocumentStore`] trait is the engine's only window onto the host's
//! note storage. Listings are produced fresh on every call — the engine
//! never caches them, so a refresh always sees the current state of the
//! store.
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod fs;
pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::Document;

/// Abstract document storage backend.
///
/// All operations are async (via `async-trait`); in-memory implementations
/// return immediately-ready futures.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// List every document currently in the store. Must reflect the store's
    /// present contents on each call, not a cached snapshot.
    async fn list_documents(&self) -> Result<Vec<Document>>;

    /// Fetch a document's content blob.
    async fn read_content(&self, document: &Document) -> Result<String>;
}
