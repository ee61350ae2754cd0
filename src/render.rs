//! Rendering abstraction.
//!
//! The engine never interprets note markup itself. A [`Renderer`] turns a
//! content blob into opaque display blocks inside a [`RenderedBody`] and
//! emits typed [`Marker`]s for anything interactive it produced. The
//! engine's augmentation pass consumes only the marker list, so it stays
//! decoupled from the renderer's concrete output structure.

use anyhow::Result;
use async_trait::async_trait;

/// What a marker points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerRole {
    /// An embedded reference to another document (image or note transclusion).
    EmbeddedReference,
    /// A topic tag occurring in the rendered text.
    TopicTag,
}

/// A typed interactive element emitted by a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub role: MarkerRole,
    /// Reference identifier: an embed target, or a tag name without its
    /// leading `#`.
    pub target: String,
}

/// Accumulates a renderer's output for one document region.
#[derive(Debug, Default, Clone)]
pub struct RenderedBody {
    blocks: Vec<String>,
    markers: Vec<Marker>,
}

impl RenderedBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_block(&mut self, block: impl Into<String>) {
        self.blocks.push(block.into());
    }

    pub fn push_marker(&mut self, role: MarkerRole, target: impl Into<String>) {
        self.markers.push(Marker {
            role,
            target: target.into(),
        });
    }

    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Renders note content into a region.
///
/// `source_path` is a hint for resolving relative references; the engine
/// passes the document's store path.
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, text: &str, body: &mut RenderedBody, source_path: &str) -> Result<()>;
}

/// Minimal host renderer: passes lines through as display blocks and emits
/// markers for `![[target]]` embeds and `#tag` topic tags.
pub struct LineRenderer;

#[async_trait]
impl Renderer for LineRenderer {
    async fn render(&self, text: &str, body: &mut RenderedBody, _source_path: &str) -> Result<()> {
        for line in text.lines() {
            if !line.trim().is_empty() {
                body.push_block(line);
            }
            for embed in scan_embeds(line) {
                body.push_marker(MarkerRole::EmbeddedReference, embed);
            }
            for tag in scan_tags(line) {
                body.push_marker(MarkerRole::TopicTag, tag);
            }
        }
        Ok(())
    }
}

fn scan_embeds(line: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut rest = line;
    while let Some(start) = rest.find("![[") {
        rest = &rest[start + 3..];
        match rest.find("]]") {
            Some(end) => {
                let target = rest[..end].trim();
                if !target.is_empty() {
                    found.push(target.to_string());
                }
                rest = &rest[end + 2..];
            }
            None => break,
        }
    }
    found
}

fn scan_tags(line: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut prev: Option<char> = None;
    let mut chars = line.char_indices();
    while let Some((i, ch)) = chars.next() {
        if ch == '#' && !prev.is_some_and(|p| p.is_alphanumeric() || p == '#') {
            let tag: String = line[i + 1..]
                .chars()
                .take_while(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '/'))
                .collect();
            // A bare '#' or a heading marker is not a tag.
            if !tag.is_empty() && tag.chars().any(|c| !c.is_ascii_digit()) {
                for _ in 0..tag.chars().count() {
                    chars.next();
                }
                found.push(tag);
            }
        }
        prev = Some(ch);
    }
    found
}
