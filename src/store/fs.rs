//! Filesystem-backed [`DocumentStore`].
//!
//! Walks a vault root, keeping files with the configured extension and
//! skipping dot-directories. Listing order is sorted by relative path for
//! deterministic output.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::StoreConfig;
use crate::models::Document;

use super::DocumentStore;

pub struct FsStore {
    root: PathBuf,
    include: GlobSet,
    exclude: GlobSet,
}

impl FsStore {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        if !config.root.exists() {
            bail!("Store root does not exist: {}", config.root.display());
        }
        let include = build_globset(&[format!("**/*.{}", config.extension)])?;
        let exclude = build_globset(&["**/.*/**".to_string(), "**/.*".to_string()])?;
        Ok(Self {
            root: config.root.clone(),
            include,
            exclude,
        })
    }

    /// Root directory this store serves from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn absolute(&self, document: &Document) -> PathBuf {
        self.root.join(&document.path)
    }
}

#[async_trait]
impl DocumentStore for FsStore {
    async fn list_documents(&self) -> Result<Vec<Document>> {
        let mut documents = Vec::new();

        for entry in WalkDir::new(&self.root) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative = path.strip_prefix(&self.root).unwrap_or(path);
            let rel_str = relative.to_string_lossy().to_string();

            if self.exclude.is_match(&rel_str) || !self.include.is_match(&rel_str) {
                continue;
            }

            let basename = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            documents.push(Document::new(rel_str, basename));
        }

        // Sort for deterministic ordering
        documents.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(documents)
    }

    async fn read_content(&self, document: &Document) -> Result<String> {
        let path = self.absolute(document);
        std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read document: {}", path.display()))
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
