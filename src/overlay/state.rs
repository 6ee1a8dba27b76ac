//! Overlay runtime state and field-granular content application.
//!
//! This module defines [`OverlayRuntimeState`], the single source of truth for
//! one overlay session, and [`ContentState`], the resolved (non-patch) content
//! currently rendered. Patch application produces a list of [`FieldChange`]
//! values so the surface refreshes only the sub-views a patch actually
//! touched, never the whole overlay.
//!
//! # Ownership
//!
//! Exactly one `OverlayRuntimeState` exists per overlay session. It is owned
//! by the manager and mutated only on the overlay's surface thread; nothing
//! else holds a reference to it.

use crate::domain::{Alert, OverlayContent};
use crate::overlay::drag::DragOrigin;

/// Resolved overlay content as currently rendered.
///
/// Each field mirrors one sub-view of the overlay: `None` means the sub-view
/// is hidden, `Some` means it is shown with that value. Patches fold into this
/// state via [`ContentState::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentState {
    /// Current travel speed.
    pub current_speed: Option<i32>,

    /// Posted speed limit.
    pub speed_limit: Option<i32>,

    /// Current turn instruction.
    pub current_instruction: Option<String>,

    /// Estimated time of arrival.
    pub eta: Option<String>,

    /// Obstacle alert banner, present for at most the alert TTL.
    pub obstacle_alert: Option<Alert>,
}

impl ContentState {
    /// Applies a patch and returns the per-field changes to push to the surface.
    ///
    /// Fields the patch keeps are untouched and produce no change; every other
    /// field is resolved (cleared or set) and reported, in declaration order.
    /// The returned changes carry the resolved value so the surface can render
    /// them without consulting state again.
    pub fn apply(&mut self, patch: OverlayContent) -> Vec<FieldChange> {
        let mut changes = Vec::new();

        if !patch.current_speed.is_keep() {
            self.current_speed = patch.current_speed.resolve(self.current_speed);
            changes.push(FieldChange::Speed(self.current_speed));
        }
        if !patch.speed_limit.is_keep() {
            self.speed_limit = patch.speed_limit.resolve(self.speed_limit);
            changes.push(FieldChange::SpeedLimit(self.speed_limit));
        }
        if !patch.current_instruction.is_keep() {
            self.current_instruction = patch
                .current_instruction
                .resolve(self.current_instruction.take());
            changes.push(FieldChange::Instruction(self.current_instruction.clone()));
        }
        if !patch.eta.is_keep() {
            self.eta = patch.eta.resolve(self.eta.take());
            changes.push(FieldChange::Eta(self.eta.clone()));
        }
        if !patch.obstacle_alert.is_keep() {
            self.obstacle_alert = patch.obstacle_alert.resolve(self.obstacle_alert.take());
            changes.push(FieldChange::ObstacleAlert(self.obstacle_alert.clone()));
        }

        changes
    }
}

/// A single sub-view refresh pushed to the rendered surface.
///
/// `None` hides the sub-view, `Some` shows it with the carried value. One
/// change is produced per patched field, preserving patch order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    Speed(Option<i32>),
    SpeedLimit(Option<i32>),
    Instruction(Option<String>),
    Eta(Option<String>),
    ObstacleAlert(Option<Alert>),
}

/// Runtime state of one overlay session.
///
/// Owned exclusively by the manager; `visible` tracks whether a host surface
/// currently exists, `position_px` is the offset from the configured corner,
/// and `drag_origin` is present only while a drag gesture is in flight.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverlayRuntimeState {
    /// Whether a rendering surface currently exists.
    pub visible: bool,

    /// Resolved content as rendered.
    pub content: ContentState,

    /// Offset in pixels from the configured corner.
    pub position_px: (i32, i32),

    /// Committed position and raw touch point captured at pointer-down.
    pub drag_origin: Option<DragOrigin>,
}
