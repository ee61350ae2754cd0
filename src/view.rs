//! Owned view container model.
//!
//! The engine holds its output surface directly: a [`ViewContainer`] with
//! one [`DocumentRegion`] per aggregated note, in display order. Because
//! the engine owns the handle, a refresh never has to search external UI
//! state for leftovers from a previous run — committing a refresh replaces
//! the whole child list atomically.

use crate::models::{DatedDocument, Document};
use crate::navigate::Navigator;
use crate::pattern::DateKey;
use crate::render::{MarkerRole, RenderedBody};

/// The ordered display surface for one aggregation view.
#[derive(Debug, Default)]
pub struct ViewContainer {
    children: Vec<DocumentRegion>,
}

impl ViewContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn children(&self) -> &[DocumentRegion] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Replace all children in one step. The previous generation of regions
    /// is dropped wholesale, so no stale region can survive a commit.
    pub fn replace_children(&mut self, children: Vec<DocumentRegion>) {
        self.children = children;
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }
}

/// One note's rendered slot in the container.
#[derive(Debug, Clone)]
pub struct DocumentRegion {
    pub path: String,
    pub heading: String,
    pub key: DateKey,
    pub body: RenderedBody,
    /// Set when the content fetch or render failed; the region stays in
    /// place, empty, and the rest of the view is unaffected.
    pub degraded: bool,
    interactions: Vec<Interaction>,
}

/// An augmentation wired from a renderer marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    pub kind: InteractionKind,
    pub target: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    /// Click-through on an embedded reference; opens it in a new pane.
    OpenEmbed,
    /// Click-through on a topic tag; opens a tag search.
    SearchTag,
}

impl DocumentRegion {
    /// Build a region from rendered output, wiring one interaction per
    /// typed marker the renderer emitted.
    pub fn rendered(dated: &DatedDocument, body: RenderedBody) -> Self {
        let interactions = body
            .markers()
            .iter()
            .map(|marker| Interaction {
                kind: match marker.role {
                    MarkerRole::EmbeddedReference => InteractionKind::OpenEmbed,
                    MarkerRole::TopicTag => InteractionKind::SearchTag,
                },
                target: marker.target.clone(),
            })
            .collect();

        Self {
            path: dated.document.path.clone(),
            heading: dated.document.basename.clone(),
            key: dated.key,
            body,
            degraded: false,
            interactions,
        }
    }

    /// Placeholder region for a document whose content could not be
    /// fetched or rendered.
    pub fn degraded(document: &Document, key: DateKey) -> Self {
        Self {
            path: document.path.clone(),
            heading: document.basename.clone(),
            key,
            body: RenderedBody::new(),
            degraded: true,
            interactions: Vec::new(),
        }
    }

    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    /// Activate one interaction, as a click would. Embeds open in a new
    /// pane; tags open a `#tag` search in the current one.
    pub fn activate(&self, index: usize, navigator: &dyn Navigator) {
        let Some(interaction) = self.interactions.get(index) else {
            return;
        };
        match interaction.kind {
            InteractionKind::OpenEmbed => {
                navigator.open_reference(&interaction.target, &self.path, true);
            }
            InteractionKind::SearchTag => {
                let identifier = format!("#{}", interaction.target);
                navigator.open_reference(&identifier, &self.path, false);
            }
        }
    }
}
