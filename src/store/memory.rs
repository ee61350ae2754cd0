//! In-memory [`DocumentStore`] implementation for testing.
//!
//! Documents live in a `Vec` behind `std::sync::RwLock`; listing order is
//! insertion order, which the engine's stable sort preserves for equal date
//! keys. Individual documents can be marked to fail on content reads, to
//! exercise per-document degradation.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::models::Document;

use super::DocumentStore;

/// In-memory store for tests and embedded hosts.
#[derive(Default)]
pub struct InMemoryStore {
    order: RwLock<Vec<Document>>,
    contents: RwLock<HashMap<String, String>>,
    failing: RwLock<HashSet<String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a document. The basename is the final path segment
    /// with its extension stripped.
    pub fn insert(&self, path: &str, content: &str) {
        let file = path.rsplit('/').next().unwrap_or(path);
        let basename = file
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(file)
            .to_string();

        let mut order = self.order.write().unwrap();
        if !order.iter().any(|d| d.path == path) {
            order.push(Document::new(path, basename));
        }
        self.contents
            .write()
            .unwrap()
            .insert(path.to_string(), content.to_string());
    }

    pub fn remove(&self, path: &str) {
        self.order.write().unwrap().retain(|d| d.path != path);
        self.contents.write().unwrap().remove(path);
    }

    /// Make subsequent `read_content` calls for `path` return an error.
    pub fn fail_reads_for(&self, path: &str) {
        self.failing.write().unwrap().insert(path.to_string());
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn list_documents(&self) -> Result<Vec<Document>> {
        Ok(self.order.read().unwrap().clone())
    }

    async fn read_content(&self, document: &Document) -> Result<String> {
        if self.failing.read().unwrap().contains(&document.path) {
            bail!("Simulated read failure: {}", document.path);
        }
        match self.contents.read().unwrap().get(&document.path) {
            Some(content) => Ok(content.clone()),
            None => bail!("No such document: {}", document.path),
        }
    }
}
