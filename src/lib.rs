//! # Daybook
//!
//! A date-pattern note aggregation engine with an incremental, idempotent
//! view refresh.
//!
//! Daybook watches a store of text documents whose basenames encode a
//! calendar date (`2024-01-05.md`), validates each name against a
//! configurable token template with strict round-trip parsing, orders the
//! matches chronologically, and keeps an owned view container synchronized
//! with the result — rendered content plus click-through augmentations for
//! embedded references and topic tags.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌─────────────────┐   ┌───────────────┐
//! │ DocumentStore │──▶│ aggregate        │──▶│ ViewContainer │
//! │ fs / memory   │   │ match + sort     │   │ owned regions │
//! └──────────────┘   └────────┬────────┘   └──────┬────────┘
//!                             │                    │
//!                      ┌──────▼──────┐      ┌──────▼──────┐
//!                      │  Renderer   │      │  Navigator  │
//!                      │   markers   │      │ click-through│
//!                      └─────────────┘      └─────────────┘
//! ```
//!
//! The host supplies the collaborators behind the traits; the engine owns
//! the matching, ordering, and refresh lifecycle.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`pattern`] | Date token templates and round-trip matching |
//! | [`config`] | TOML configuration |
//! | [`models`] | Core data types |
//! | [`store`] | Document storage abstraction (filesystem, in-memory) |
//! | [`render`] | Rendering trait with typed interaction markers |
//! | [`navigate`] | Link navigation trait |
//! | [`view`] | Owned view container and region model |
//! | [`engine`] | Aggregation and the generation-counted refresh lifecycle |

pub mod config;
pub mod engine;
pub mod models;
pub mod navigate;
pub mod pattern;
pub mod render;
pub mod store;
pub mod view;
