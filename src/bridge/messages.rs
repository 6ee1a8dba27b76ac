//! Typed message protocol between application logic and the surfaces.
//!
//! Commands flow one way (application → surface managers), events flow the
//! other (surfaces → application). Both sides are plain serde enums with
//! camelCase wire names, so the same types serve in-process channels and a
//! serialized cross-process transport. Delivery is fire-and-forget and
//! ordered; neither side waits for acknowledgement.

use crate::domain::{OverlayConfig, OverlayContent, SearchResult};
use crate::screen::ScreenConfig;
use serde::{Deserialize, Serialize};

/// Commands sent from application logic to the surfaces.
///
/// Overlay commands (`show`, `hide`, `update`) are routed onto the overlay's
/// surface thread; screen commands (`setSearchResults`, `setScreenConfig`)
/// onto the screen stack's. A command that is invalid in the current surface
/// state resolves to a typed [`SurfaceError`](crate::domain::SurfaceError)
/// at the point of application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AppCommand {
    /// Create and show the overlay surface.
    Show {
        /// Anchor corner and optional initial content.
        config: OverlayConfig,
    },

    /// Tear down the overlay surface. Idempotent.
    Hide,

    /// Patch the overlay content field by field.
    Update {
        /// Tri-state content patch.
        content: OverlayContent,
    },

    /// Deliver search results for the currently shown search screen.
    ///
    /// Dropped (not queued) if the search screen is no longer on top.
    SetSearchResults {
        /// Result rows, in display order.
        results: Vec<SearchResult>,
    },

    /// Replace the screen-stack presentation configuration.
    SetScreenConfig {
        /// Titles and hints used by template generation.
        config: ScreenConfig,
    },
}

/// Events sent from the surfaces back to application logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SurfaceEvent {
    /// The head-unit session was created and the root screen is up.
    Connected,

    /// The head-unit session was destroyed.
    Disconnected,

    /// An action-strip button was pressed.
    #[serde(rename_all = "camelCase")]
    ActionPressed {
        /// Identifier of the pressed action (`"search"`, `"center"`, ...).
        action_id: String,
        /// Identifier of the screen the strip belongs to.
        screen_id: String,
    },

    /// The search screen's query text changed.
    #[serde(rename_all = "camelCase")]
    SearchUpdated {
        /// Current query text.
        search_text: String,
    },

    /// The overlay was tapped (click, not drag).
    OverlayClicked,
}

impl SurfaceEvent {
    /// Creates an `actionPressed` event.
    pub fn action_pressed(action_id: impl Into<String>, screen_id: impl Into<String>) -> Self {
        Self::ActionPressed {
            action_id: action_id.into(),
            screen_id: screen_id.into(),
        }
    }

    /// Creates a `searchUpdated` event.
    pub fn search_updated(search_text: impl Into<String>) -> Self {
        Self::SearchUpdated {
            search_text: search_text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_use_camel_case_wire_names() {
        let json = serde_json::to_value(&AppCommand::SetSearchResults { results: vec![] }).unwrap();
        assert_eq!(json, serde_json::json!({"setSearchResults": {"results": []}}));

        let json = serde_json::to_value(&AppCommand::Hide).unwrap();
        assert_eq!(json, serde_json::json!("hide"));
    }

    #[test]
    fn events_use_camel_case_wire_names() {
        let json = serde_json::to_value(SurfaceEvent::action_pressed("search", "navigation")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"actionPressed": {"actionId": "search", "screenId": "navigation"}})
        );

        let json = serde_json::to_value(SurfaceEvent::search_updated("cafe")).unwrap();
        assert_eq!(json, serde_json::json!({"searchUpdated": {"searchText": "cafe"}}));
    }

    #[test]
    fn update_round_trips_tri_state_content() {
        let command: AppCommand =
            serde_json::from_str(r#"{"update": {"content": {"speedLimit": null}}}"#).unwrap();
        let AppCommand::Update { content } = &command else {
            panic!("expected update command");
        };
        assert_eq!(content.speed_limit, crate::domain::FieldPatch::Clear);
        assert!(content.current_speed.is_keep());

        let json = serde_json::to_string(&command).unwrap();
        assert_eq!(json, r#"{"update":{"content":{"speedLimit":null}}}"#);
    }
}
