//! Core domain types shared by both surfaces.
//!
//! This module defines the content and alert model exchanged over the message
//! bridge, the search result rows rendered by the screen stack, and the crate's
//! error taxonomy.
//!
//! # Modules
//!
//! - [`content`]: Overlay content patches, alerts, and search results
//! - [`error`]: The [`SurfaceError`] taxonomy and [`Result`] alias

pub mod content;
pub mod error;

pub use content::{Alert, Corner, FieldPatch, OverlayConfig, OverlayContent, SearchResult};
pub use error::{Result, SurfaceError};
