//! Channel pair backing the message bridge.
//!
//! [`channel`] produces the two endpoints of one bridge session: the
//! application side sends commands and drains events, the surface side drains
//! commands and emits events. Channels are unbounded so neither side ever
//! blocks on the other, and each channel preserves send order, which is what
//! the ordered-delivery contract rests on.

use crate::bridge::messages::{AppCommand, SurfaceEvent};
use crate::domain::{Result, SurfaceError};
use crossbeam_channel::{unbounded, Receiver, Sender};

/// Creates a connected bridge and returns its two endpoints.
///
/// # Examples
///
/// ```
/// use navsurface::bridge::{self, AppCommand};
///
/// let (app, surface) = bridge::channel();
/// app.send(AppCommand::Hide).unwrap();
/// assert_eq!(surface.commands().recv().unwrap(), AppCommand::Hide);
/// ```
#[must_use]
pub fn channel() -> (AppEndpoint, SurfaceEndpoint) {
    let (command_tx, command_rx) = unbounded();
    let (event_tx, event_rx) = unbounded();

    (
        AppEndpoint {
            commands: command_tx,
            events: event_rx,
        },
        SurfaceEndpoint {
            commands: command_rx,
            events: EventSender { tx: event_tx },
        },
    )
}

/// Application-side bridge endpoint.
#[derive(Debug, Clone)]
pub struct AppEndpoint {
    commands: Sender<AppCommand>,
    events: Receiver<SurfaceEvent>,
}

impl AppEndpoint {
    /// Sends a command toward the surfaces.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::Bridge`] when the surface side has shut down.
    pub fn send(&self, command: AppCommand) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|e| SurfaceError::Bridge(format!("surface endpoint disconnected: {e}")))
    }

    /// Receiver for events emitted by the surfaces.
    #[must_use]
    pub fn events(&self) -> &Receiver<SurfaceEvent> {
        &self.events
    }
}

/// Surface-side bridge endpoint.
#[derive(Debug)]
pub struct SurfaceEndpoint {
    commands: Receiver<AppCommand>,
    events: EventSender,
}

impl SurfaceEndpoint {
    /// Receiver for commands sent by the application.
    #[must_use]
    pub fn commands(&self) -> &Receiver<AppCommand> {
        &self.commands
    }

    /// Clonable event sender handed to each surface manager.
    #[must_use]
    pub fn event_sender(&self) -> EventSender {
        self.events.clone()
    }
}

/// Fire-and-forget sender for surface events.
///
/// Events are best-effort by contract: when the application endpoint is gone
/// (session shutdown) the failure is logged and swallowed, so surface
/// handlers never need to thread bridge errors through their teardown paths.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: Sender<SurfaceEvent>,
}

impl EventSender {
    /// Emits an event toward the application.
    pub fn send(&self, event: SurfaceEvent) {
        if let Err(e) = self.tx.send(event) {
            tracing::debug!(error = %e, "dropping surface event, app endpoint disconnected");
        }
    }
}
