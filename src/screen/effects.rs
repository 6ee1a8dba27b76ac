//! Effects produced by the screen stack handler.
//!
//! The handler never talks to the bridge or the host renderer directly: it
//! returns effect values describing what must happen, and the surface loop
//! executes them in order. This keeps every transition a pure function of
//! stack state and input, which is what the state-machine tests exercise.

use crate::bridge::SurfaceEvent;
use crate::screen::template::Template;

/// A side effect to execute after a screen transition.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenEffect {
    /// Emit an event to the application over the bridge.
    Emit(SurfaceEvent),

    /// Hand a freshly generated template to the host renderer.
    ///
    /// Always produced before control returns to the host when the rendered
    /// screen or its body content changed.
    Present(Template),
}
