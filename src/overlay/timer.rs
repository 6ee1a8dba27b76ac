//! Single-shot, cancellable alert expiry timer.
//!
//! Each scheduled timer carries the generation number of the alert that armed
//! it. Expiry is not applied in the timer thread: it is posted back to the
//! overlay's input queue as [`OverlayInput::AlertExpired`] and the manager
//! drops it there if the generation is stale. Cancellation therefore only has
//! to be best-effort; the generation token is what guarantees a superseded
//! timer can never clear a newer alert.
//!
//! [`OverlayInput::AlertExpired`]: crate::overlay::manager::OverlayInput

use crate::overlay::manager::OverlayInput;
use crossbeam_channel::{after, bounded, select, Sender};
use std::thread;
use std::time::Duration;

/// Handle to one scheduled expiry.
///
/// Dropping the handle cancels the timer if it has not fired yet.
#[derive(Debug)]
struct TimerHandle {
    cancel: Sender<()>,
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        let _ = self.cancel.try_send(());
    }
}

/// Alert expiry scheduler for one overlay instance.
///
/// At most one timer is live at any time: scheduling a new expiry cancels the
/// pending one first. Expiries are delivered through the overlay input queue,
/// so they arrive on the surface thread in order with every other input.
#[derive(Debug)]
pub struct AlertTimer {
    ttl: Duration,
    notify: Sender<OverlayInput>,
    pending: Option<TimerHandle>,
}

impl AlertTimer {
    /// Creates a scheduler that posts expiries into `notify` after `ttl`.
    pub fn new(ttl: Duration, notify: Sender<OverlayInput>) -> Self {
        Self {
            ttl,
            notify,
            pending: None,
        }
    }

    /// Cancels any pending timer and schedules a fresh one for `generation`.
    pub fn restart(&mut self, generation: u64) {
        self.cancel();

        let (cancel_tx, cancel_rx) = bounded::<()>(1);
        let notify = self.notify.clone();
        let ttl = self.ttl;

        thread::spawn(move || {
            select! {
                recv(cancel_rx) -> _ => {}
                recv(after(ttl)) -> _ => {
                    // The receiving side is gone only during teardown, where
                    // the expiry is irrelevant anyway.
                    let _ = notify.send(OverlayInput::AlertExpired { generation });
                }
            }
        });

        tracing::debug!(generation, ttl_ms = ttl.as_millis() as u64, "alert timer armed");
        self.pending = Some(TimerHandle { cancel: cancel_tx });
    }

    /// Cancels the pending timer, if any.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            tracing::debug!("alert timer cancelled");
        }
    }
}
