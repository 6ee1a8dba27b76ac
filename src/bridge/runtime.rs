//! Surface-thread marshaling.
//!
//! Host renderer APIs are not reentrant, so every bridge command, host input,
//! and timer expiry must reach a surface's state on that surface's own thread.
//! [`spawn_surface_loop`] is that thread: a queue drained in arrival order by
//! a single handler that exclusively owns the surface state. Senders never
//! block (the queue is unbounded), and the loop exits when every sender is
//! gone.
//!
//! [`route_command`] is the dispatch step in front of the loops: it maps each
//! bridge command onto the input queue of the surface that owns it.

use crate::bridge::messages::AppCommand;
use crate::domain::{Result, SurfaceError};
use crate::overlay::manager::OverlayInput;
use crate::screen::handler::ScreenInput;
use crossbeam_channel::{Receiver, Sender};
use std::thread;

/// Spawns the owning thread for one surface.
///
/// `handle` is invoked once per input, in arrival order, and is the only code
/// that ever touches the surface's state. The thread exits when the input
/// channel closes.
pub fn spawn_surface_loop<T, F>(name: &'static str, inputs: Receiver<T>, mut handle: F) -> thread::JoinHandle<()>
where
    T: Send + 'static,
    F: FnMut(T) + Send + 'static,
{
    thread::spawn(move || {
        tracing::debug!(surface = name, "surface loop started");
        while let Ok(input) = inputs.recv() {
            handle(input);
        }
        tracing::debug!(surface = name, "input channel closed, surface loop exiting");
    })
}

/// Routes one bridge command onto the owning surface's input queue.
///
/// Overlay commands go to the overlay queue, screen commands to the screen
/// queue. The send itself never blocks.
///
/// # Errors
///
/// Returns [`SurfaceError::Bridge`] when the target surface loop has already
/// shut down.
pub fn route_command(
    command: AppCommand,
    overlay: &Sender<OverlayInput>,
    screen: &Sender<ScreenInput>,
) -> Result<()> {
    match command {
        AppCommand::Show { config } => send_to(overlay, OverlayInput::Show { config }, "overlay"),
        AppCommand::Hide => send_to(overlay, OverlayInput::Hide, "overlay"),
        AppCommand::Update { content } => {
            send_to(overlay, OverlayInput::Update { content }, "overlay")
        }
        AppCommand::SetSearchResults { results } => {
            send_to(screen, ScreenInput::SetSearchResults(results), "screen")
        }
        AppCommand::SetScreenConfig { config } => {
            send_to(screen, ScreenInput::SetScreenConfig(config), "screen")
        }
    }
}

fn send_to<T>(queue: &Sender<T>, input: T, surface: &str) -> Result<()> {
    queue
        .send(input)
        .map_err(|_| SurfaceError::Bridge(format!("{surface} surface loop has shut down")))
}
