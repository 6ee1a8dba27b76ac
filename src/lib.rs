//! Navsurface: state managers bridging a navigation app to its UI surfaces.
//!
//! Navsurface mediates between a navigation application's logic and two
//! host-controlled rendering surfaces:
//! - a floating always-on-top **overlay** showing speed, instruction, ETA and
//!   obstacle-alert fields, and
//! - an automotive head-unit **screen stack** rendering declarative templates
//!   (root navigation, search, settings).
//!
//! The hard problem is not drawing widgets (the host does that) but keeping
//! remote, asynchronously-updated surfaces consistent with navigation state
//! while the host creates and destroys them at will, delivers input as
//! asynchronous events, and forbids touching its renderer from any thread but
//! the surface's own.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Application logic (remote peer)                    │
//! └─────────────────────────────────────────────────────┘
//!          │ AppCommand                ↑ SurfaceEvent
//! ┌─────────────────────────────────────────────────────┐
//! │  Message Bridge (bridge/)                           │  ← Typed, ordered,
//! │  - command/event channels                           │    non-blocking
//! │  - per-surface marshaling loops                     │    channels
//! └─────────────────────────────────────────────────────┘
//!          │                              │
//! ┌───────────────────┐        ┌───────────────────────┐
//! │ Overlay surface   │        │ Screen stack surface  │
//! │ (overlay/)        │        │ (screen/)             │
//! │ - lifecycle       │        │ - Root/Search/Settings│
//! │ - content diffing │        │ - template generation │
//! │ - drag + alerts   │        │ - action routing      │
//! └───────────────────┘        └───────────────────────┘
//!          │                              │
//! ┌─────────────────────────────────────────────────────┐
//! │  Host renderer seams                                │
//! │  - OverlayHost / OverlaySurface traits              │
//! │  - Template values handed back to the host          │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Commands flow application → surfaces, events flow surfaces → application,
//! and every bridge-originated call is marshaled onto the owning surface's
//! thread before it touches state. Nothing survives a session: all state is
//! in-memory and discarded on teardown.
//!
//! # Modules
//!
//! - [`bridge`]: Typed command/event protocol and surface-thread loops
//! - [`overlay`]: Overlay lifecycle, content, drag, and alert expiry
//! - [`screen`]: Screen stack state machine and template generation
//! - [`domain`]: Shared content/search types and the error taxonomy
//! - [`observability`]: File-backed tracing setup
//! - [`infrastructure`]: Platform paths
//!
//! # Example
//!
//! Driving the screen stack the way a host shell does:
//!
//! ```
//! use navsurface::screen::{handle_input, ActionId, ScreenEffect, ScreenInput, StackState};
//!
//! let mut stack = StackState::default();
//!
//! // Host created the session: connected event plus the root template.
//! let effects = handle_input(&mut stack, &ScreenInput::SessionCreated)?;
//! assert_eq!(effects.len(), 2);
//!
//! // User pressed the Search action on the root strip.
//! let effects = handle_input(&mut stack, &ScreenInput::ActionPressed(ActionId::Search))?;
//! assert!(matches!(effects.last(), Some(ScreenEffect::Present(_))));
//! # Ok::<(), navsurface::domain::SurfaceError>(())
//! ```

pub mod bridge;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod overlay;
pub mod screen;

pub use bridge::{AppCommand, SurfaceEvent};
pub use domain::{Result, SurfaceError};
pub use overlay::{OverlayInput, OverlayManager, OverlaySettings};
pub use screen::{ScreenEffect, ScreenInput, StackState};

use crate::domain::Corner;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Host-facing configuration for both surfaces.
///
/// Hosts hand configuration over either as a string key-value map
/// ([`Config::from_map`]) or as a TOML file ([`Config::from_file`]). Every
/// field has a default; map parsing is lenient and falls back to defaults on
/// malformed values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Corner the overlay is anchored to. Default: top-right.
    pub overlay_corner: Corner,

    /// Horizontal inset from the anchor corner, in pixels. Default: 20.
    pub corner_inset_x: i32,

    /// Vertical inset from the anchor corner, in pixels. Default: 100.
    pub corner_inset_y: i32,

    /// Whether overlay content survives `hide` and seeds the next `show`.
    ///
    /// Default: `false`, meaning content resets on hide.
    pub persist_overlay_content: bool,

    /// Obstacle alert lifetime in milliseconds. Default: 10000.
    pub alert_ttl_ms: u64,

    /// Tracing filter level (`trace`..`error`). Default: `"info"`.
    pub trace_level: Option<String>,

    /// Trace log path, overriding the data-directory default.
    pub trace_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            overlay_corner: Corner::TopRight,
            corner_inset_x: 20,
            corner_inset_y: 100,
            persist_overlay_content: false,
            alert_ttl_ms: 10_000,
            trace_level: None,
            trace_file: None,
        }
    }
}

impl Config {
    /// Parses configuration from a host-provided key-value map.
    ///
    /// Unknown keys are ignored; malformed values fall back to their
    /// defaults.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use navsurface::Config;
    /// use navsurface::domain::Corner;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("overlay_corner".to_string(), "bottom-left".to_string());
    /// map.insert("alert_ttl_ms".to_string(), "2500".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.overlay_corner, Corner::BottomLeft);
    /// assert_eq!(config.alert_ttl_ms, 2500);
    /// assert_eq!(config.corner_inset_x, 20);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let overlay_corner = map
            .get("overlay_corner")
            .map(|s| parse_corner(s))
            .unwrap_or(defaults.overlay_corner);

        let corner_inset_x = map
            .get("corner_inset_x")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.corner_inset_x);

        let corner_inset_y = map
            .get("corner_inset_y")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.corner_inset_y);

        let persist_overlay_content = map
            .get("persist_overlay_content")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.persist_overlay_content);

        let alert_ttl_ms = map
            .get("alert_ttl_ms")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.alert_ttl_ms);

        Self {
            overlay_corner,
            corner_inset_x,
            corner_inset_y,
            persist_overlay_content,
            alert_ttl_ms,
            trace_level: map.get("trace_level").cloned(),
            trace_file: map.get("trace_file").cloned(),
        }
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::Io`] when the file cannot be read and
    /// [`SurfaceError::Config`] when it is not valid TOML for this schema.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| SurfaceError::Config(e.to_string()))
    }

    /// Overlay tunables derived from this configuration.
    #[must_use]
    pub fn overlay_settings(&self) -> OverlaySettings {
        OverlaySettings {
            corner_inset_x: self.corner_inset_x,
            corner_inset_y: self.corner_inset_y,
            persist_content: self.persist_overlay_content,
            alert_ttl: Duration::from_millis(self.alert_ttl_ms),
        }
    }
}

/// Parses a kebab-case corner name, falling back to the default corner.
fn parse_corner(value: &str) -> Corner {
    match value {
        "top-left" => Corner::TopLeft,
        "top-right" => Corner::TopRight,
        "bottom-left" => Corner::BottomLeft,
        "bottom-right" => Corner::BottomRight,
        other => {
            tracing::debug!(corner = %other, "unknown overlay corner, using default");
            Corner::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn from_map_falls_back_on_malformed_values() {
        let mut map = BTreeMap::new();
        map.insert("overlay_corner".to_string(), "middle".to_string());
        map.insert("corner_inset_x".to_string(), "lots".to_string());
        map.insert("alert_ttl_ms".to_string(), "-5".to_string());

        let config = Config::from_map(&map);
        assert_eq!(config.overlay_corner, Corner::TopRight);
        assert_eq!(config.corner_inset_x, 20);
        assert_eq!(config.alert_ttl_ms, 10_000);
    }

    #[test]
    fn from_map_parses_well_formed_values() {
        let mut map = BTreeMap::new();
        map.insert("overlay_corner".to_string(), "bottom-right".to_string());
        map.insert("persist_overlay_content".to_string(), "true".to_string());
        map.insert("trace_level".to_string(), "debug".to_string());

        let config = Config::from_map(&map);
        assert_eq!(config.overlay_corner, Corner::BottomRight);
        assert!(config.persist_overlay_content);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn from_file_reads_partial_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "overlay_corner = \"bottom-left\"\nalert_ttl_ms = 1500"
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.overlay_corner, Corner::BottomLeft);
        assert_eq!(config.alert_ttl_ms, 1500);
        assert_eq!(config.corner_inset_y, 100);
    }

    #[test]
    fn from_file_rejects_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "alert_ttl_ms = \"soon\"").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, SurfaceError::Config(_)));
    }

    #[test]
    fn overlay_settings_derive_from_config() {
        let config = Config {
            corner_inset_x: 8,
            alert_ttl_ms: 250,
            persist_overlay_content: true,
            ..Config::default()
        };
        let settings = config.overlay_settings();
        assert_eq!(settings.corner_inset_x, 8);
        assert_eq!(settings.alert_ttl, Duration::from_millis(250));
        assert!(settings.persist_content);
    }
}
