//! Message bridge between application logic and the UI surfaces.
//!
//! The bridge is the only seam the application and the surfaces share. It
//! carries typed commands one way and typed events the other, over ordered
//! non-blocking channels, and it is where the threading rule becomes
//! structural: bridge traffic is never applied inline but marshaled onto the
//! owning surface's thread by [`runtime::spawn_surface_loop`].
//!
//! # Modules
//!
//! - [`messages`]: The [`AppCommand`]/[`SurfaceEvent`] wire protocol
//! - [`channel`]: Endpoint pair construction and the [`EventSender`]
//! - [`runtime`]: Surface-thread loops and command routing

pub mod channel;
pub mod messages;
pub mod runtime;

pub use channel::{channel, AppEndpoint, EventSender, SurfaceEndpoint};
pub use messages::{AppCommand, SurfaceEvent};
pub use runtime::{route_command, spawn_surface_loop};
