//! Overlay content model and patch types.
//!
//! The application never replaces overlay content wholesale: it sends
//! [`OverlayContent`] *patches* in which every field is independently
//! tri-state. An absent field leaves the rendered value untouched, an explicit
//! `null` clears it, and a present value sets it. [`FieldPatch`] encodes that
//! distinction so the wire format round-trips through serde without losing
//! the absent-versus-null difference.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::time::Duration;

/// Screen corner the overlay is anchored to.
///
/// Wire values use the kebab-case names the host configuration speaks
/// (`"top-right"`, `"bottom-left"`, ...). Defaults to the top-right corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Configuration passed to `show` when creating an overlay surface.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverlayConfig {
    /// Corner the surface is anchored to.
    pub position: Corner,

    /// Content applied immediately after the surface is created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_content: Option<OverlayContent>,
}

/// Tri-state patch value for a single overlay field.
///
/// Maps the wire format's three cases onto an explicit enum: an absent key
/// deserializes to [`Keep`](FieldPatch::Keep) (via `#[serde(default)]` on the
/// containing struct), an explicit `null` to [`Clear`](FieldPatch::Clear), and
/// a present value to [`Set`](FieldPatch::Set). `Keep` fields must be paired
/// with `skip_serializing_if = "FieldPatch::is_keep"` so they stay absent on
/// the wire.
///
/// # Examples
///
/// ```
/// use navsurface::domain::{FieldPatch, OverlayContent};
///
/// let patch: OverlayContent =
///     serde_json::from_str(r#"{"currentSpeed": 55, "speedLimit": null}"#).unwrap();
/// assert_eq!(patch.current_speed, FieldPatch::Set(55));
/// assert_eq!(patch.speed_limit, FieldPatch::Clear);
/// assert_eq!(patch.eta, FieldPatch::Keep);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPatch<T> {
    /// Leave the field as it is rendered now.
    Keep,
    /// Clear the field and hide its sub-view.
    Clear,
    /// Set the field and show its sub-view.
    Set(T),
}

impl<T> Default for FieldPatch<T> {
    fn default() -> Self {
        Self::Keep
    }
}

impl<T> FieldPatch<T> {
    /// Returns `true` for the [`Keep`](FieldPatch::Keep) variant.
    #[must_use]
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    /// Folds the patch into a resolved `Option`, starting from the current value.
    ///
    /// `Keep` returns the current value unchanged, `Clear` returns `None`,
    /// `Set` returns the new value.
    #[must_use]
    pub fn resolve(self, current: Option<T>) -> Option<T> {
        match self {
            Self::Keep => current,
            Self::Clear => None,
            Self::Set(value) => Some(value),
        }
    }
}

impl<T: Serialize> Serialize for FieldPatch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            // Keep is expected to be skipped by the containing struct; if it
            // is serialized anyway it degrades to an explicit null.
            Self::Keep | Self::Clear => serializer.serialize_none(),
            Self::Set(value) => serializer.serialize_some(value),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldPatch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(Option::<T>::deserialize(deserializer)?.map_or(Self::Clear, Self::Set))
    }
}

/// Content patch for the navigation overlay.
///
/// Every field is independently tri-state (see [`FieldPatch`]). The manager
/// applies patches field by field, so a patch touching one field refreshes
/// only that sub-view on the rendered surface.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverlayContent {
    /// Current travel speed, displayed as a bare number.
    #[serde(skip_serializing_if = "FieldPatch::is_keep")]
    pub current_speed: FieldPatch<i32>,

    /// Posted speed limit; hidden entirely while cleared.
    #[serde(skip_serializing_if = "FieldPatch::is_keep")]
    pub speed_limit: FieldPatch<i32>,

    /// Current turn instruction text.
    #[serde(skip_serializing_if = "FieldPatch::is_keep")]
    pub current_instruction: FieldPatch<String>,

    /// Estimated time of arrival, preformatted by the application.
    #[serde(skip_serializing_if = "FieldPatch::is_keep")]
    pub eta: FieldPatch<String>,

    /// Obstacle alert banner; self-expires after [`Alert::DEFAULT_TTL`]
    /// unless replaced or cleared earlier.
    #[serde(skip_serializing_if = "FieldPatch::is_keep")]
    pub obstacle_alert: FieldPatch<Alert>,
}

impl OverlayContent {
    /// Returns `true` when no field of the patch would change anything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.current_speed.is_keep()
            && self.speed_limit.is_keep()
            && self.current_instruction.is_keep()
            && self.eta.is_keep()
            && self.obstacle_alert.is_keep()
    }
}

/// An obstacle alert shown in the overlay banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Obstacle category, e.g. `"pothole"` or `"speed camera"`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Distance to the obstacle in meters.
    pub distance_meters: i32,
}

impl Alert {
    /// Wall-clock lifetime of an alert from the moment it is set.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(10);

    /// Banner text for the rendered alert.
    ///
    /// # Examples
    ///
    /// ```
    /// use navsurface::domain::Alert;
    ///
    /// let alert = Alert { kind: "pothole".to_string(), distance_meters: 120 };
    /// assert_eq!(alert.label(), "pothole 120m ahead");
    /// ```
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}m ahead", self.kind, self.distance_meters)
    }
}

/// A single search result row shown on the search screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Primary row text, typically the place name.
    pub title: String,

    /// Secondary row text, typically the address.
    pub subtitle: String,
}
