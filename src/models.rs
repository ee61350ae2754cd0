//! Core data models for the aggregation pipeline.

use crate::pattern::DateKey;

/// A document in the external store. The engine only interprets the
/// basename; path and content are opaque to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Unique path within the store.
    pub path: String,
    /// Filename without its storage extension.
    pub basename: String,
}

impl Document {
    pub fn new(path: impl Into<String>, basename: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            basename: basename.into(),
        }
    }
}

/// A document paired with the date key parsed from its basename.
/// Created per refresh and discarded afterwards, never persisted.
#[derive(Debug, Clone)]
pub struct DatedDocument {
    pub document: Document,
    pub key: DateKey,
}
