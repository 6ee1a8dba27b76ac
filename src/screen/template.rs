//! Declarative screen templates for the host renderer.
//!
//! The host never receives imperative drawing calls from this surface: each
//! screen is described by an immutable [`Template`] value regenerated whenever
//! the rendered screen changes. Templates are serde-serializable so they can
//! cross a process boundary unchanged. Icons are symbolic identifiers; asset
//! resolution is the host's concern.

use crate::domain::SearchResult;
use crate::screen::state::{ScreenState, SettingsToggles, StackState};
use serde::{Deserialize, Serialize};

/// Identifier of an action-strip button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionId {
    Search,
    Settings,
    Center,
    Report,
}

impl ActionId {
    /// Wire name used in `actionPressed` event payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Settings => "settings",
            Self::Center => "center",
            Self::Report => "report",
        }
    }
}

/// Symbolic icon identifier resolved to an asset by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IconId {
    Search,
    Settings,
    MyLocation,
    Report,
}

/// Header action shown by non-root screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HeaderAction {
    /// Host-rendered back affordance that triggers back-navigation.
    Back,
}

/// One button on an action strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StripAction {
    /// Identifier echoed back in `actionPressed` events.
    pub id: ActionId,

    /// Symbolic icon.
    pub icon: IconId,

    /// Button label.
    pub label: String,
}

impl StripAction {
    fn new(id: ActionId, icon: IconId, label: &str) -> Self {
        Self {
            id,
            icon,
            label: label.to_string(),
        }
    }
}

/// Name of a settings toggle, echoed back when the host reports a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToggleName {
    VoiceGuidance,
    AvoidTolls,
}

/// A settings row with a toggle control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRow {
    /// Row title.
    pub title: String,

    /// Secondary descriptive text.
    pub detail: String,

    /// Toggle identity, echoed back by the host on change.
    pub name: ToggleName,

    /// Current toggle value.
    pub checked: bool,
}

/// Immutable description of one rendered screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Template {
    /// The root navigation screen: two fixed action strips over the map.
    #[serde(rename_all = "camelCase")]
    Navigation {
        /// Primary strip: Search, Settings.
        action_strip: Vec<StripAction>,
        /// Map strip: Center, Report.
        map_action_strip: Vec<StripAction>,
    },

    /// The search screen: input box plus result rows.
    #[serde(rename_all = "camelCase")]
    Search {
        /// Header affordance.
        header_action: HeaderAction,
        /// Placeholder text for the input box.
        search_hint: String,
        /// Whether the host should open the keyboard immediately.
        show_keyboard: bool,
        /// Current query text.
        query: String,
        /// Result rows in display order.
        results: Vec<SearchResult>,
    },

    /// The settings screen: a titled list of toggle rows.
    #[serde(rename_all = "camelCase")]
    SettingsList {
        /// List title.
        title: String,
        /// Header affordance.
        header_action: HeaderAction,
        /// Toggle rows in display order.
        rows: Vec<ToggleRow>,
    },
}

impl StackState {
    /// Generates the template for the currently rendered screen.
    ///
    /// The root composition is fixed and independent of navigation progress;
    /// search and settings templates reflect the current screen state and the
    /// presentation configuration.
    #[must_use]
    pub fn compute_template(&self) -> Template {
        match self.top() {
            ScreenState::Root => root_template(),
            ScreenState::Search { query, results } => Template::Search {
                header_action: HeaderAction::Back,
                search_hint: self.config().search_hint.clone(),
                show_keyboard: true,
                query: query.clone(),
                results: results.clone(),
            },
            ScreenState::Settings { toggles } => settings_template(&self.config().title, *toggles),
        }
    }
}

fn root_template() -> Template {
    Template::Navigation {
        action_strip: vec![
            StripAction::new(ActionId::Search, IconId::Search, "Search"),
            StripAction::new(ActionId::Settings, IconId::Settings, "Settings"),
        ],
        map_action_strip: vec![
            StripAction::new(ActionId::Center, IconId::MyLocation, "Center"),
            StripAction::new(ActionId::Report, IconId::Report, "Report"),
        ],
    }
}

fn settings_template(title: &str, toggles: SettingsToggles) -> Template {
    Template::SettingsList {
        title: format!("{title} Settings"),
        header_action: HeaderAction::Back,
        rows: vec![
            ToggleRow {
                title: "Voice Guidance".to_string(),
                detail: "Enable turn-by-turn directions".to_string(),
                name: ToggleName::VoiceGuidance,
                checked: toggles.voice_guidance,
            },
            ToggleRow {
                title: "Avoid Tolls".to_string(),
                detail: "Route around toll roads".to_string(),
                name: ToggleName::AvoidTolls,
                checked: toggles.avoid_tolls,
            },
        ],
    }
}
