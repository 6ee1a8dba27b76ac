//! Host-facing traits for overlay surface creation and rendering.
//!
//! The manager never talks to a concrete windowing system. The host shell
//! implements [`OverlayHost`] (capability query plus surface creation) and
//! [`OverlaySurface`] (per-field rendering of an existing surface), and the
//! manager drives them through these seams. Releasing a surface is dropping
//! it; there is no explicit destroy call, which is what lets the teardown path
//! stay infallible.

use crate::domain::{Corner, Result};
use crate::overlay::state::FieldChange;

/// Host-side factory for overlay surfaces.
///
/// Implementations wrap whatever the host uses to put a floating always-on-top
/// view on screen. `can_draw_overlays` is consulted on every `show` because
/// the capability can be granted or revoked between sessions.
pub trait OverlayHost: Send {
    /// Returns whether the host has granted the overlay-drawing capability.
    fn can_draw_overlays(&self) -> bool;

    /// Creates a surface anchored to `corner`, offset by `position_px`.
    ///
    /// Called only after `can_draw_overlays` returned `true`; may still fail
    /// for host-specific reasons (for example no foreground context), reported
    /// as [`SurfaceError::NoActiveHost`](crate::domain::SurfaceError::NoActiveHost).
    fn create_surface(
        &mut self,
        corner: Corner,
        position_px: (i32, i32),
    ) -> Result<Box<dyn OverlaySurface>>;
}

/// One live overlay surface.
///
/// Rendering is field-granular: the manager pushes a [`FieldChange`] per
/// patched field and the surface refreshes only that sub-view. Dropping the
/// surface releases it.
pub trait OverlaySurface: Send {
    /// Refreshes the sub-view for one field.
    fn apply(&mut self, change: &FieldChange);

    /// Moves the surface to a new offset from its anchor corner.
    fn move_to(&mut self, x: i32, y: i32);
}
