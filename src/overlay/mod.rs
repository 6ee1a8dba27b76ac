//! Overlay state manager for the floating navigation surface.
//!
//! The overlay is a host-created floating view showing speed, instruction,
//! ETA, and obstacle-alert fields. This module owns its complete runtime
//! state: visibility and surface lifecycle, field-granular content updates,
//! drag repositioning, and the self-expiring alert sub-state.
//!
//! # Data flow
//!
//! ```text
//! Bridge commands ──┐
//! Host input ───────┼→ OverlayInput queue → OverlayManager (surface thread)
//! Alert timer ──────┘                           │
//!                                   OverlayHost / OverlaySurface
//!                                      (host renderer seam)
//! ```
//!
//! All three input sources funnel through one ordered queue, so the manager
//! never sees interleaved mutations and the host renderer is only ever called
//! from its own thread.
//!
//! # Modules
//!
//! - [`state`]: Runtime state and field-granular content application
//! - [`manager`]: The input dispatcher owning state, surface, and timer
//! - [`surface`]: Host-facing creation and rendering traits
//! - [`drag`]: Pure drag repositioning arithmetic
//! - [`timer`]: Single-shot, generation-tagged alert expiry

pub mod drag;
pub mod manager;
pub mod state;
pub mod surface;
pub mod timer;

pub use drag::DragOrigin;
pub use manager::{OverlayInput, OverlayManager, OverlaySettings};
pub use state::{ContentState, FieldChange, OverlayRuntimeState};
pub use surface::{OverlayHost, OverlaySurface};
pub use timer::AlertTimer;
