//! Overlay lifecycle, content, and drag state management.
//!
//! [`OverlayManager`] owns the one [`OverlayRuntimeState`] of its overlay
//! session and the host surface handle that goes with it. All inputs (bridge
//! commands, host pointer events, timer expiries) arrive through a single
//! [`OverlayInput`] queue drained on the overlay's surface thread, which is
//! what serializes racing `show`/`hide`/`update` calls into a consistent
//! history.
//!
//! # Alert expiry
//!
//! Every alert set bumps a generation counter; the armed timer carries that
//! generation and the expiry is dropped on delivery if a newer alert has
//! superseded it. Cancellation of the previous timer is best-effort only, the
//! generation check is the guarantee.

use crate::bridge::{EventSender, SurfaceEvent};
use crate::domain::{FieldPatch, OverlayConfig, OverlayContent, Result, SurfaceError};
use crate::overlay::drag::{self, DragOrigin};
use crate::overlay::state::{ContentState, FieldChange, OverlayRuntimeState};
use crate::overlay::surface::{OverlayHost, OverlaySurface};
use crate::overlay::timer::AlertTimer;
use crossbeam_channel::Sender;
use std::time::Duration;

/// Inputs applied to the overlay on its surface thread.
///
/// `Show`/`Hide`/`Update` originate from bridge commands, the pointer variants
/// and `Tap` from host input, and `AlertExpired` from the alert timer. The
/// queue preserves arrival order across all of them.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayInput {
    /// Create and show the surface.
    Show {
        /// Anchor corner and optional initial content.
        config: OverlayConfig,
    },
    /// Tear down the surface. Idempotent.
    Hide,
    /// Patch the rendered content.
    Update {
        /// Tri-state content patch.
        content: OverlayContent,
    },
    /// A drag gesture started at this raw pointer position.
    PointerDown { x: f32, y: f32 },
    /// The pointer moved during a drag gesture.
    PointerMove { x: f32, y: f32 },
    /// The drag gesture ended; the current position is committed.
    PointerUp,
    /// The overlay was tapped without dragging.
    Tap,
    /// The alert timer for `generation` elapsed.
    AlertExpired { generation: u64 },
}

/// Tunables for overlay placement and retention.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySettings {
    /// Horizontal inset from the anchor corner, in pixels.
    pub corner_inset_x: i32,

    /// Vertical inset from the anchor corner, in pixels.
    pub corner_inset_y: i32,

    /// Whether content survives `hide` and seeds the next `show`.
    pub persist_content: bool,

    /// Wall-clock lifetime of an obstacle alert.
    pub alert_ttl: Duration,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            corner_inset_x: 20,
            corner_inset_y: 100,
            persist_content: false,
            alert_ttl: crate::domain::Alert::DEFAULT_TTL,
        }
    }
}

/// State manager for one overlay session.
///
/// Owns the runtime state, the host surface handle, and the alert timer.
/// Constructed once per session and driven exclusively through
/// [`handle`](Self::handle) on the surface thread.
pub struct OverlayManager {
    host: Box<dyn OverlayHost>,
    surface: Option<Box<dyn OverlaySurface>>,
    state: OverlayRuntimeState,
    events: EventSender,
    timer: AlertTimer,
    alert_generation: u64,
    settings: OverlaySettings,
}

impl OverlayManager {
    /// Creates a manager for a new overlay session.
    ///
    /// `inputs` must be the sender side of the queue this manager is drained
    /// from; the alert timer posts expiries through it so they are applied on
    /// the surface thread like every other input.
    pub fn new(
        host: Box<dyn OverlayHost>,
        events: EventSender,
        inputs: Sender<OverlayInput>,
        settings: OverlaySettings,
    ) -> Self {
        let timer = AlertTimer::new(settings.alert_ttl, inputs);
        Self {
            host,
            surface: None,
            state: OverlayRuntimeState::default(),
            events,
            timer,
            alert_generation: 0,
            settings,
        }
    }

    /// Current runtime state, for host shells and diagnostics.
    #[must_use]
    pub fn state(&self) -> &OverlayRuntimeState {
        &self.state
    }

    /// Applies one input.
    ///
    /// # Errors
    ///
    /// `Show` fails with [`SurfaceError::PermissionDenied`] when the host
    /// capability is missing; `Update` fails with
    /// [`SurfaceError::NotVisible`] while hidden. `Hide`, the pointer
    /// protocol, and expiries never fail: stale host input on a torn-down
    /// surface is ignored.
    pub fn handle(&mut self, input: OverlayInput) -> Result<()> {
        let _span = tracing::debug_span!("overlay_input", input = ?input).entered();

        match input {
            OverlayInput::Show { config } => self.handle_show(&config),
            OverlayInput::Hide => {
                self.handle_hide();
                Ok(())
            }
            OverlayInput::Update { content } => self.handle_update(content),
            OverlayInput::PointerDown { x, y } => {
                self.handle_pointer_down((x, y));
                Ok(())
            }
            OverlayInput::PointerMove { x, y } => {
                self.handle_pointer_move((x, y));
                Ok(())
            }
            OverlayInput::PointerUp => {
                self.state.drag_origin = None;
                Ok(())
            }
            OverlayInput::Tap => {
                self.handle_tap();
                Ok(())
            }
            OverlayInput::AlertExpired { generation } => {
                self.handle_alert_expired(generation);
                Ok(())
            }
        }
    }

    /// Creates the surface, applying an implicit `hide` first when already shown.
    fn handle_show(&mut self, config: &OverlayConfig) -> Result<()> {
        if !self.host.can_draw_overlays() {
            tracing::debug!("show rejected, overlay capability not granted");
            return Err(SurfaceError::PermissionDenied);
        }

        if self.state.visible {
            tracing::debug!("already shown, applying implicit hide before re-show");
            self.handle_hide();
        }

        let position = (self.settings.corner_inset_x, self.settings.corner_inset_y);
        let surface = self.host.create_surface(config.position, position)?;

        self.surface = Some(surface);
        self.state.visible = true;
        self.state.position_px = position;

        tracing::debug!(
            corner = ?config.position,
            x = position.0,
            y = position.1,
            "overlay surface created"
        );

        // Persisted content from a previous session is already resolved in
        // state but was never pushed to this fresh surface.
        let retained = std::mem::take(&mut self.state.content);
        self.render_full(&retained);
        self.state.content = retained;

        if let Some(initial) = config.initial_content.clone() {
            self.apply_content(initial);
        }

        Ok(())
    }

    /// Tears the surface down. Never fails, no-op when already hidden.
    fn handle_hide(&mut self) {
        if !self.state.visible {
            tracing::debug!("hide ignored, overlay not shown");
            return;
        }

        self.surface = None;
        self.state.visible = false;
        self.state.drag_origin = None;
        self.timer.cancel();

        if !self.settings.persist_content {
            self.state.content = ContentState::default();
        }

        tracing::debug!(persisted = self.settings.persist_content, "overlay surface released");
    }

    /// Patches rendered content field by field.
    fn handle_update(&mut self, content: OverlayContent) -> Result<()> {
        if !self.state.visible {
            tracing::debug!("update rejected, overlay not shown");
            return Err(SurfaceError::NotVisible);
        }

        self.apply_content(content);
        Ok(())
    }

    /// Applies a patch to state and pushes each changed field to the surface.
    fn apply_content(&mut self, patch: OverlayContent) {
        match &patch.obstacle_alert {
            FieldPatch::Set(alert) => {
                self.alert_generation += 1;
                tracing::debug!(
                    alert = %alert.label(),
                    generation = self.alert_generation,
                    "obstacle alert set"
                );
                self.timer.restart(self.alert_generation);
            }
            FieldPatch::Clear => self.timer.cancel(),
            FieldPatch::Keep => {}
        }

        let changes = self.state.content.apply(patch);
        if let Some(surface) = self.surface.as_mut() {
            for change in &changes {
                surface.apply(change);
            }
        }

        tracing::debug!(field_count = changes.len(), "overlay content updated");
    }

    /// Pushes every populated field of `content` to a freshly created surface.
    fn render_full(&mut self, content: &ContentState) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        if content.current_speed.is_some() {
            surface.apply(&FieldChange::Speed(content.current_speed));
        }
        if content.speed_limit.is_some() {
            surface.apply(&FieldChange::SpeedLimit(content.speed_limit));
        }
        if content.current_instruction.is_some() {
            surface.apply(&FieldChange::Instruction(content.current_instruction.clone()));
        }
        if content.eta.is_some() {
            surface.apply(&FieldChange::Eta(content.eta.clone()));
        }
        if content.obstacle_alert.is_some() {
            surface.apply(&FieldChange::ObstacleAlert(content.obstacle_alert.clone()));
        }
    }

    fn handle_pointer_down(&mut self, touch: (f32, f32)) {
        if !self.state.visible {
            tracing::debug!("pointer-down ignored, overlay not shown");
            return;
        }
        self.state.drag_origin = Some(DragOrigin {
            origin: self.state.position_px,
            touch,
        });
    }

    fn handle_pointer_move(&mut self, touch: (f32, f32)) {
        let Some(origin) = self.state.drag_origin else {
            return;
        };

        let (x, y) = drag::reposition(origin, touch);
        self.state.position_px = (x, y);
        if let Some(surface) = self.surface.as_mut() {
            surface.move_to(x, y);
        }
    }

    fn handle_tap(&mut self) {
        if !self.state.visible {
            tracing::debug!("tap ignored, overlay not shown");
            return;
        }
        self.events.send(SurfaceEvent::OverlayClicked);
    }

    /// Clears the alert exactly like an explicit-null update, unless stale.
    fn handle_alert_expired(&mut self, generation: u64) {
        if generation != self.alert_generation {
            tracing::debug!(
                generation,
                current = self.alert_generation,
                "alert expiry ignored, superseded"
            );
            return;
        }
        if !self.state.visible || self.state.content.obstacle_alert.is_none() {
            return;
        }

        self.state.content.obstacle_alert = None;
        if let Some(surface) = self.surface.as_mut() {
            surface.apply(&FieldChange::ObstacleAlert(None));
        }
        tracing::debug!(generation, "obstacle alert expired");
    }
}

impl std::fmt::Debug for OverlayManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayManager")
            .field("state", &self.state)
            .field("alert_generation", &self.alert_generation)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge;
    use crate::domain::{Alert, Corner};
    use crossbeam_channel::{unbounded, Receiver};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct SurfaceLog {
        created: Mutex<Vec<(Corner, (i32, i32))>>,
        changes: Mutex<Vec<FieldChange>>,
        moves: Mutex<Vec<(i32, i32)>>,
        alive: AtomicUsize,
    }

    struct FakeSurface {
        log: Arc<SurfaceLog>,
    }

    impl OverlaySurface for FakeSurface {
        fn apply(&mut self, change: &FieldChange) {
            self.log.changes.lock().unwrap().push(change.clone());
        }

        fn move_to(&mut self, x: i32, y: i32) {
            self.log.moves.lock().unwrap().push((x, y));
        }
    }

    impl Drop for FakeSurface {
        fn drop(&mut self) {
            self.log.alive.fetch_sub(1, Ordering::SeqCst);
        }
    }

    struct FakeHost {
        permitted: bool,
        log: Arc<SurfaceLog>,
    }

    impl OverlayHost for FakeHost {
        fn can_draw_overlays(&self) -> bool {
            self.permitted
        }

        fn create_surface(
            &mut self,
            corner: Corner,
            position_px: (i32, i32),
        ) -> Result<Box<dyn OverlaySurface>> {
            self.log.created.lock().unwrap().push((corner, position_px));
            self.log.alive.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(FakeSurface {
                log: Arc::clone(&self.log),
            }))
        }
    }

    struct Fixture {
        manager: OverlayManager,
        log: Arc<SurfaceLog>,
        app: bridge::AppEndpoint,
    }

    impl Fixture {
        fn events(&self) -> &Receiver<SurfaceEvent> {
            self.app.events()
        }
    }

    fn fixture_with(permitted: bool, settings: OverlaySettings) -> Fixture {
        let log = Arc::new(SurfaceLog::default());
        let (app, surface) = bridge::channel();
        let (input_tx, _input_rx) = unbounded();
        let manager = OverlayManager::new(
            Box::new(FakeHost {
                permitted,
                log: Arc::clone(&log),
            }),
            surface.event_sender(),
            input_tx,
            settings,
        );
        Fixture { manager, log, app }
    }

    fn fixture() -> Fixture {
        fixture_with(true, OverlaySettings::default())
    }

    fn speed(v: i32) -> OverlayContent {
        OverlayContent {
            current_speed: FieldPatch::Set(v),
            ..OverlayContent::default()
        }
    }

    fn alert(kind: &str, distance: i32) -> OverlayContent {
        OverlayContent {
            obstacle_alert: FieldPatch::Set(Alert {
                kind: kind.to_string(),
                distance_meters: distance,
            }),
            ..OverlayContent::default()
        }
    }

    #[test]
    fn show_without_capability_is_permission_denied() {
        let mut f = fixture_with(false, OverlaySettings::default());
        let err = f
            .manager
            .handle(OverlayInput::Show {
                config: OverlayConfig::default(),
            })
            .unwrap_err();

        assert!(matches!(err, SurfaceError::PermissionDenied));
        assert!(!f.manager.state().visible);
        assert!(f.log.created.lock().unwrap().is_empty());
    }

    #[test]
    fn show_anchors_at_default_insets() {
        let mut f = fixture();
        f.manager
            .handle(OverlayInput::Show {
                config: OverlayConfig {
                    position: Corner::BottomLeft,
                    initial_content: None,
                },
            })
            .unwrap();

        assert!(f.manager.state().visible);
        assert_eq!(f.manager.state().position_px, (20, 100));
        assert_eq!(
            f.log.created.lock().unwrap().as_slice(),
            &[(Corner::BottomLeft, (20, 100))]
        );
    }

    #[test]
    fn show_applies_initial_content() {
        let mut f = fixture();
        f.manager
            .handle(OverlayInput::Show {
                config: OverlayConfig {
                    position: Corner::TopRight,
                    initial_content: Some(speed(48)),
                },
            })
            .unwrap();

        assert_eq!(f.manager.state().content.current_speed, Some(48));
        assert_eq!(
            f.log.changes.lock().unwrap().as_slice(),
            &[FieldChange::Speed(Some(48))]
        );
    }

    #[test]
    fn re_show_replaces_the_surface_without_error() {
        let mut f = fixture();
        let show = OverlayInput::Show {
            config: OverlayConfig::default(),
        };
        f.manager.handle(show.clone()).unwrap();
        f.manager.handle(show).unwrap();

        assert!(f.manager.state().visible);
        assert_eq!(f.log.created.lock().unwrap().len(), 2);
        assert_eq!(f.log.alive.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn hide_is_idempotent_and_never_fails() {
        let mut f = fixture();
        f.manager.handle(OverlayInput::Hide).unwrap();
        f.manager
            .handle(OverlayInput::Show {
                config: OverlayConfig::default(),
            })
            .unwrap();
        f.manager.handle(OverlayInput::Hide).unwrap();
        f.manager.handle(OverlayInput::Hide).unwrap();

        assert!(!f.manager.state().visible);
        assert_eq!(f.log.alive.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn update_while_hidden_is_not_visible() {
        let mut f = fixture();
        let err = f
            .manager
            .handle(OverlayInput::Update { content: speed(50) })
            .unwrap_err();
        assert!(matches!(err, SurfaceError::NotVisible));
    }

    #[test]
    fn update_refreshes_only_patched_fields() {
        let mut f = fixture();
        f.manager
            .handle(OverlayInput::Show {
                config: OverlayConfig::default(),
            })
            .unwrap();
        f.manager
            .handle(OverlayInput::Update { content: speed(55) })
            .unwrap();
        f.manager
            .handle(OverlayInput::Update {
                content: OverlayContent {
                    speed_limit: FieldPatch::Clear,
                    ..OverlayContent::default()
                },
            })
            .unwrap();

        assert_eq!(f.manager.state().content.current_speed, Some(55));
        assert_eq!(f.manager.state().content.speed_limit, None);
        assert_eq!(
            f.log.changes.lock().unwrap().as_slice(),
            &[
                FieldChange::Speed(Some(55)),
                FieldChange::SpeedLimit(None)
            ]
        );
    }

    #[test]
    fn content_resets_on_hide_by_default() {
        let mut f = fixture();
        let show = OverlayInput::Show {
            config: OverlayConfig::default(),
        };
        f.manager.handle(show.clone()).unwrap();
        f.manager
            .handle(OverlayInput::Update { content: speed(70) })
            .unwrap();
        f.manager.handle(OverlayInput::Hide).unwrap();
        f.manager.handle(show).unwrap();

        assert_eq!(f.manager.state().content.current_speed, None);
    }

    #[test]
    fn content_persists_across_hide_when_configured() {
        let mut f = fixture_with(
            true,
            OverlaySettings {
                persist_content: true,
                ..OverlaySettings::default()
            },
        );
        let show = OverlayInput::Show {
            config: OverlayConfig::default(),
        };
        f.manager.handle(show.clone()).unwrap();
        f.manager
            .handle(OverlayInput::Update { content: speed(70) })
            .unwrap();
        f.manager.handle(OverlayInput::Hide).unwrap();
        f.log.changes.lock().unwrap().clear();
        f.manager.handle(show).unwrap();

        assert_eq!(f.manager.state().content.current_speed, Some(70));
        // The retained value is replayed onto the fresh surface.
        assert_eq!(
            f.log.changes.lock().unwrap().as_slice(),
            &[FieldChange::Speed(Some(70))]
        );
    }

    #[test]
    fn stale_alert_expiry_is_a_no_op() {
        let mut f = fixture();
        f.manager
            .handle(OverlayInput::Show {
                config: OverlayConfig::default(),
            })
            .unwrap();
        f.manager
            .handle(OverlayInput::Update {
                content: alert("pothole", 120),
            })
            .unwrap();
        f.manager
            .handle(OverlayInput::Update {
                content: alert("debris", 60),
            })
            .unwrap();

        // First alert's timer fires late; the newer alert must survive.
        f.manager
            .handle(OverlayInput::AlertExpired { generation: 1 })
            .unwrap();
        assert_eq!(
            f.manager
                .state()
                .content
                .obstacle_alert
                .as_ref()
                .map(|a| a.kind.as_str()),
            Some("debris")
        );

        f.manager
            .handle(OverlayInput::AlertExpired { generation: 2 })
            .unwrap();
        assert_eq!(f.manager.state().content.obstacle_alert, None);
        assert_eq!(
            f.log.changes.lock().unwrap().last(),
            Some(&FieldChange::ObstacleAlert(None))
        );
    }

    #[test]
    fn alert_expires_end_to_end_after_ttl() {
        let log = Arc::new(SurfaceLog::default());
        let (_app, surface) = bridge::channel();
        let (input_tx, input_rx) = unbounded();
        let mut manager = OverlayManager::new(
            Box::new(FakeHost {
                permitted: true,
                log: Arc::clone(&log),
            }),
            surface.event_sender(),
            input_tx,
            OverlaySettings {
                alert_ttl: Duration::from_millis(30),
                ..OverlaySettings::default()
            },
        );

        manager
            .handle(OverlayInput::Show {
                config: OverlayConfig::default(),
            })
            .unwrap();
        manager
            .handle(OverlayInput::Update {
                content: alert("speed camera", 300),
            })
            .unwrap();
        assert!(manager.state().content.obstacle_alert.is_some());

        // The timer posts the expiry through the input queue; applying it on
        // this thread mirrors the surface loop.
        let expiry = input_rx.recv_timeout(Duration::from_secs(1)).unwrap();
        manager.handle(expiry).unwrap();
        assert_eq!(manager.state().content.obstacle_alert, None);
    }

    #[test]
    fn explicit_clear_preempts_pending_expiry() {
        let mut f = fixture();
        f.manager
            .handle(OverlayInput::Show {
                config: OverlayConfig::default(),
            })
            .unwrap();
        f.manager
            .handle(OverlayInput::Update {
                content: alert("pothole", 120),
            })
            .unwrap();
        f.manager
            .handle(OverlayInput::Update {
                content: OverlayContent {
                    obstacle_alert: FieldPatch::Clear,
                    ..OverlayContent::default()
                },
            })
            .unwrap();

        f.manager
            .handle(OverlayInput::AlertExpired { generation: 1 })
            .unwrap();
        assert_eq!(f.manager.state().content.obstacle_alert, None);
    }

    #[test]
    fn drag_follows_the_spec_arithmetic() {
        let mut f = fixture();
        f.manager
            .handle(OverlayInput::Show {
                config: OverlayConfig::default(),
            })
            .unwrap();
        f.manager
            .handle(OverlayInput::PointerDown { x: 100.0, y: 100.0 })
            .unwrap();
        f.manager
            .handle(OverlayInput::PointerMove { x: 130.0, y: 140.0 })
            .unwrap();

        assert_eq!(f.manager.state().position_px, (50, 140));
        assert_eq!(f.log.moves.lock().unwrap().as_slice(), &[(50, 140)]);

        f.manager.handle(OverlayInput::PointerUp).unwrap();
        assert!(f.manager.state().drag_origin.is_none());

        // The next gesture starts from the committed position.
        f.manager
            .handle(OverlayInput::PointerDown { x: 10.0, y: 10.0 })
            .unwrap();
        f.manager
            .handle(OverlayInput::PointerMove { x: 0.0, y: 0.0 })
            .unwrap();
        assert_eq!(f.manager.state().position_px, (40, 130));
    }

    #[test]
    fn tap_emits_overlay_clicked() {
        let mut f = fixture();
        f.manager
            .handle(OverlayInput::Show {
                config: OverlayConfig::default(),
            })
            .unwrap();
        f.manager.handle(OverlayInput::Tap).unwrap();

        assert_eq!(f.events().try_recv().unwrap(), SurfaceEvent::OverlayClicked);
    }

    #[test]
    fn tap_while_hidden_is_ignored() {
        let mut f = fixture();
        f.manager.handle(OverlayInput::Tap).unwrap();
        assert!(f.events().try_recv().is_err());
    }
}
