//! Host shim and demo session.
//!
//! This binary plays both external roles the library expects: the host shell
//! (surface threads, a stdout renderer, pointer and action input) and the
//! application logic on the far side of the bridge (commands in, events out,
//! search results computed from a built-in place list).
//!
//! Running it replays one scripted session end to end: session creation,
//! overlay show/update/drag/tap, an obstacle alert, a search round-trip, a
//! settings toggle, and teardown. Rendered output goes to stdout; diagnostics
//! go to the trace log.

use crossbeam_channel::{unbounded, Sender};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::thread;
use std::time::Duration;

use navsurface::bridge::{self, AppCommand, AppEndpoint, SurfaceEvent};
use navsurface::domain::{Alert, Corner, FieldPatch, OverlayConfig, OverlayContent, Result, SearchResult};
use navsurface::overlay::{FieldChange, OverlayHost, OverlayInput, OverlayManager, OverlaySurface};
use navsurface::screen::{
    handle_input, ActionId, ScreenConfig, ScreenEffect, ScreenInput, StackState, Template,
    ToggleName,
};
use navsurface::{observability, Config};

/// Overlay host rendering to stdout.
struct StdoutHost;

impl OverlayHost for StdoutHost {
    fn can_draw_overlays(&self) -> bool {
        true
    }

    fn create_surface(
        &mut self,
        corner: Corner,
        position_px: (i32, i32),
    ) -> Result<Box<dyn OverlaySurface>> {
        println!(
            "[overlay] surface created, corner {corner:?}, position {position_px:?}"
        );
        Ok(Box::new(StdoutSurface))
    }
}

struct StdoutSurface;

impl OverlaySurface for StdoutSurface {
    fn apply(&mut self, change: &FieldChange) {
        println!("[overlay] {}", describe(change));
    }

    fn move_to(&mut self, x: i32, y: i32) {
        println!("[overlay] moved to ({x}, {y})");
    }
}

impl Drop for StdoutSurface {
    fn drop(&mut self) {
        println!("[overlay] surface released");
    }
}

fn describe(change: &FieldChange) -> String {
    match change {
        FieldChange::Speed(Some(v)) => format!("speed {v}"),
        FieldChange::Speed(None) => "speed hidden".to_string(),
        FieldChange::SpeedLimit(Some(v)) => format!("speed limit {v}"),
        FieldChange::SpeedLimit(None) => "speed limit hidden".to_string(),
        FieldChange::Instruction(Some(text)) => format!("instruction \"{text}\""),
        FieldChange::Instruction(None) => "instruction hidden".to_string(),
        FieldChange::Eta(Some(eta)) => format!("eta {eta}"),
        FieldChange::Eta(None) => "eta hidden".to_string(),
        FieldChange::ObstacleAlert(Some(alert)) => format!("alert \"{}\"", alert.label()),
        FieldChange::ObstacleAlert(None) => "alert hidden".to_string(),
    }
}

/// Stdout stand-in for the head-unit template renderer.
fn render_template(template: &Template) {
    match template {
        Template::Navigation {
            action_strip,
            map_action_strip,
        } => {
            let actions: Vec<&str> = action_strip.iter().map(|a| a.label.as_str()).collect();
            let map_actions: Vec<&str> =
                map_action_strip.iter().map(|a| a.label.as_str()).collect();
            println!("[screen] navigation template, actions {actions:?}, map actions {map_actions:?}");
        }
        Template::Search {
            search_hint,
            query,
            results,
            ..
        } => {
            println!(
                "[screen] search template, hint \"{search_hint}\", query \"{query}\", {} results",
                results.len()
            );
            for result in results {
                println!("[screen]   {} ({})", result.title, result.subtitle);
            }
        }
        Template::SettingsList { title, rows, .. } => {
            println!("[screen] settings template \"{title}\"");
            for row in rows {
                let mark = if row.checked { "x" } else { " " };
                println!("[screen]   [{mark}] {}", row.title);
            }
        }
    }
}

/// Built-in place list the simulated application searches against.
const PLACES: &[(&str, &str)] = &[
    ("Cafe Luna", "12 Main St"),
    ("Harbor Cafe", "3 Dockside Walk"),
    ("Summit Coffee Roasters", "88 Hillcrest Rd"),
    ("Riverside Diner", "401 Bank St"),
    ("Night Owl Espresso", "17 College Ave"),
    ("Coastal Fuel Stop", "1500 Coastal Hwy"),
    ("Central Station", "1 Transit Plaza"),
];

/// Fuzzy-filters the place list for a search query, best matches first.
fn search_places(query: &str) -> Vec<SearchResult> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default();
    let needle = query.to_lowercase();
    let mut scored: Vec<(i64, SearchResult)> = PLACES
        .iter()
        .filter_map(|(title, subtitle)| {
            matcher
                .fuzzy_match(&title.to_lowercase(), &needle)
                .map(|score| {
                    (
                        score,
                        SearchResult {
                            title: (*title).to_string(),
                            subtitle: (*subtitle).to_string(),
                        },
                    )
                })
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, result)| result).take(5).collect()
}

fn send_app(app: &AppEndpoint, command: AppCommand) {
    if let Err(e) = app.send(command) {
        tracing::warn!(error = %e, "bridge send failed");
    }
}

fn send_to<T>(queue: &Sender<T>, input: T, surface: &str) {
    if queue.send(input).is_err() {
        tracing::warn!(surface, "surface loop is gone, input dropped");
    }
}

fn main() {
    let config = std::env::args().nth(1).map_or_else(Config::default, |path| {
        Config::from_file(&path).unwrap_or_else(|e| {
            eprintln!("ignoring config file {path}: {e}");
            Config::default()
        })
    });
    observability::init_tracing(&config);

    let (app, surface_endpoint) = bridge::channel();

    // Overlay surface thread.
    let (overlay_tx, overlay_rx) = unbounded();
    let mut overlay = OverlayManager::new(
        Box::new(StdoutHost),
        surface_endpoint.event_sender(),
        overlay_tx.clone(),
        config.overlay_settings(),
    );
    bridge::spawn_surface_loop("overlay", overlay_rx, move |input| {
        if let Err(e) = overlay.handle(input) {
            tracing::warn!(error = %e, "overlay input rejected");
        }
    });

    // Screen stack surface thread.
    let (screen_tx, screen_rx) = unbounded();
    let screen_events = surface_endpoint.event_sender();
    let mut stack = StackState::default();
    bridge::spawn_surface_loop("screen", screen_rx, move |input: ScreenInput| {
        match handle_input(&mut stack, &input) {
            Ok(effects) => {
                for effect in effects {
                    match effect {
                        ScreenEffect::Emit(event) => screen_events.send(event),
                        ScreenEffect::Present(template) => render_template(&template),
                    }
                }
            }
            Err(e) => tracing::warn!(error = %e, "screen input rejected"),
        }
    });

    // Bridge dispatcher: commands onto the owning surface's queue.
    let overlay_queue = overlay_tx.clone();
    let screen_queue = screen_tx.clone();
    thread::spawn(move || {
        while let Ok(command) = surface_endpoint.commands().recv() {
            if let Err(e) = bridge::route_command(command, &overlay_queue, &screen_queue) {
                tracing::warn!(error = %e, "command routing failed");
            }
        }
    });

    // Simulated application logic: drain events, answer searches.
    let app_logic = app.clone();
    thread::spawn(move || {
        while let Ok(event) = app_logic.events().recv() {
            match event {
                SurfaceEvent::SearchUpdated { search_text } => {
                    println!("[app] search updated: \"{search_text}\"");
                    send_app(
                        &app_logic,
                        AppCommand::SetSearchResults {
                            results: search_places(&search_text),
                        },
                    );
                }
                other => println!("[app] event: {other:?}"),
            }
        }
    });

    // Scripted host session.
    let step = Duration::from_millis(120);

    send_to(&screen_tx, ScreenInput::SessionCreated, "screen");
    thread::sleep(step);

    send_app(
        &app,
        AppCommand::SetScreenConfig {
            config: ScreenConfig {
                title: "Pathfinder".to_string(),
                ..ScreenConfig::default()
            },
        },
    );
    send_app(
        &app,
        AppCommand::Show {
            config: OverlayConfig {
                position: config.overlay_corner,
                initial_content: Some(OverlayContent {
                    current_speed: FieldPatch::Set(42),
                    current_instruction: FieldPatch::Set("Head north on 3rd Ave".to_string()),
                    ..OverlayContent::default()
                }),
            },
        },
    );
    thread::sleep(step);

    send_app(
        &app,
        AppCommand::Update {
            content: OverlayContent {
                current_speed: FieldPatch::Set(55),
                speed_limit: FieldPatch::Set(50),
                eta: FieldPatch::Set("14:32".to_string()),
                ..OverlayContent::default()
            },
        },
    );
    thread::sleep(step);

    // The driver drags the overlay out of the way, then taps it.
    send_to(&overlay_tx, OverlayInput::PointerDown { x: 100.0, y: 100.0 }, "overlay");
    send_to(&overlay_tx, OverlayInput::PointerMove { x: 130.0, y: 140.0 }, "overlay");
    send_to(&overlay_tx, OverlayInput::PointerUp, "overlay");
    send_to(&overlay_tx, OverlayInput::Tap, "overlay");
    thread::sleep(step);

    send_app(
        &app,
        AppCommand::Update {
            content: OverlayContent {
                obstacle_alert: FieldPatch::Set(Alert {
                    kind: "pothole".to_string(),
                    distance_meters: 120,
                }),
                ..OverlayContent::default()
            },
        },
    );
    thread::sleep(step);

    // Search round-trip: action, typing, async results, selection.
    send_to(&screen_tx, ScreenInput::ActionPressed(ActionId::Search), "screen");
    thread::sleep(step);
    send_to(&screen_tx, ScreenInput::SearchTextChanged("cafe".to_string()), "screen");
    thread::sleep(Duration::from_millis(250));
    send_to(&screen_tx, ScreenInput::ResultSelected(0), "screen");
    thread::sleep(step);

    send_to(&screen_tx, ScreenInput::ActionPressed(ActionId::Settings), "screen");
    thread::sleep(step);
    send_to(
        &screen_tx,
        ScreenInput::ToggleChanged {
            name: ToggleName::AvoidTolls,
            checked: true,
        },
        "screen",
    );
    send_to(&screen_tx, ScreenInput::Back, "screen");
    thread::sleep(step);

    send_app(&app, AppCommand::Hide);
    send_to(&screen_tx, ScreenInput::SessionDestroyed, "screen");
    thread::sleep(Duration::from_millis(300));

    println!("[host] session complete");
}
