//! Screen stack controller for the head-unit surface.
//!
//! The head-unit renders whatever template describes the top of an ordered
//! screen stack: root navigation at the bottom, search and settings screens
//! pushed above it by user actions. This module owns that stack, translates
//! host lifecycle callbacks and user actions into transitions, and regenerates
//! the rendered screen's declarative template on every change.
//!
//! # Data flow
//!
//! ```text
//! Host callbacks / bridge commands → ScreenInput → handle_input
//!                                        │
//!                            StackState mutations
//!                                        │
//!                    ScreenEffect::Emit ─┴─ ScreenEffect::Present
//!                        (to bridge)         (to host renderer)
//! ```
//!
//! # Modules
//!
//! - [`state`]: The stack, its invariants, and presentation configuration
//! - [`handler`]: Transition logic ([`ScreenInput`] → [`ScreenEffect`]s)
//! - [`effects`]: Effect values executed by the surface loop
//! - [`template`]: Declarative template model and per-screen generation

pub mod effects;
pub mod handler;
pub mod state;
pub mod template;

pub use effects::ScreenEffect;
pub use handler::{handle_input, ScreenInput};
pub use state::{ScreenConfig, ScreenState, SettingsToggles, StackState};
pub use template::{ActionId, HeaderAction, IconId, StripAction, Template, ToggleName, ToggleRow};
