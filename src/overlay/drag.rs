//! Drag repositioning arithmetic.
//!
//! Converts raw pointer deltas into an updated overlay position. The
//! computation is a pure function of the drag origin and the current touch
//! point; the new position is intentionally not clamped to screen bounds,
//! matching the reference behavior.

/// Position and touch point captured when a drag gesture starts.
///
/// `origin` is the overlay position committed at pointer-down; `touch` is the
/// raw pointer coordinate at the same moment. Both stay fixed for the lifetime
/// of the gesture, so every move recomputes from the gesture start rather than
/// accumulating per-move deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOrigin {
    /// Overlay position in pixels when the gesture started.
    pub origin: (i32, i32),

    /// Raw pointer coordinate when the gesture started.
    pub touch: (f32, f32),
}

/// Computes the overlay position for the current touch point of a drag.
///
/// Returns `origin + round(touch_current - touch_origin)` per axis. No
/// clamping is applied; the overlay can be dragged past the window edge.
///
/// # Examples
///
/// ```
/// use navsurface::overlay::drag::{reposition, DragOrigin};
///
/// let origin = DragOrigin { origin: (20, 100), touch: (100.0, 100.0) };
/// assert_eq!(reposition(origin, (130.0, 140.0)), (50, 140));
/// ```
#[must_use]
pub fn reposition(origin: DragOrigin, touch_current: (f32, f32)) -> (i32, i32) {
    let dx = (touch_current.0 - origin.touch.0).round() as i32;
    let dy = (touch_current.1 - origin.touch.1).round() as i32;
    (origin.origin.0 + dx, origin.origin.1 + dy)
}
