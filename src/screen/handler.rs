//! Screen stack transitions.
//!
//! This module implements the state machine driving the head-unit surface:
//! host lifecycle callbacks and user actions come in as [`ScreenInput`]
//! values, mutate the [`StackState`], and come out as ordered
//! [`ScreenEffect`] lists for the surface loop to execute.
//!
//! # Transition rules
//!
//! - The stack never empties: back-navigation on the root is a no-op and
//!   leaves the session eligible for host destruction.
//! - Search text and result selection are valid only while the search screen
//!   is rendered; anything else is a typed [`SurfaceError::InvalidTransition`].
//! - Search results arriving after the user navigated away are dropped, not
//!   queued; a re-entered search screen always starts empty.
//! - Every transition that changes the rendered screen (or its body content)
//!   presents a freshly generated template before yielding to the host.

use crate::bridge::SurfaceEvent;
use crate::domain::{Result, SearchResult, SurfaceError};
use crate::screen::effects::ScreenEffect;
use crate::screen::state::{ScreenConfig, ScreenState, SettingsToggles, StackState};
use crate::screen::template::{ActionId, ToggleName};

/// Screen identifier reported in `actionPressed` events.
const SCREEN_ID: &str = "navigation";

/// Inputs applied to the screen stack on its surface thread.
///
/// Lifecycle and user-action variants originate from host callbacks;
/// `SetSearchResults` and `SetScreenConfig` are bridge commands routed here.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenInput {
    /// The host created a session; the root screen is about to be rendered.
    SessionCreated,
    /// The host destroyed the session. Terminal for this stack.
    SessionDestroyed,
    /// An action-strip button was pressed.
    ActionPressed(ActionId),
    /// The search input text changed.
    SearchTextChanged(String),
    /// A search result row was selected.
    ResultSelected(usize),
    /// Host back-navigation.
    Back,
    /// A settings toggle was flipped.
    ToggleChanged {
        /// Which toggle changed.
        name: ToggleName,
        /// New value.
        checked: bool,
    },
    /// Results delivered by the application for the current search.
    SetSearchResults(Vec<SearchResult>),
    /// New presentation configuration from the application.
    SetScreenConfig(ScreenConfig),
}

/// Processes one input, mutates the stack, and returns the effects to execute.
///
/// # Errors
///
/// Returns [`SurfaceError::InvalidTransition`] for state-machine calls made in
/// a screen state that does not support them (search input while settings is
/// shown, out-of-range result selection, ...). Lifecycle inputs and
/// back-navigation never fail.
pub fn handle_input(state: &mut StackState, input: &ScreenInput) -> Result<Vec<ScreenEffect>> {
    let _span = tracing::debug_span!("screen_input", input = ?input, depth = state.depth()).entered();

    match input {
        ScreenInput::SessionCreated => {
            state.reset();
            tracing::debug!("session created, stack reset to root");
            Ok(vec![
                ScreenEffect::Emit(SurfaceEvent::Connected),
                ScreenEffect::Present(state.compute_template()),
            ])
        }
        ScreenInput::SessionDestroyed => {
            state.reset();
            tracing::debug!("session destroyed, stack discarded");
            Ok(vec![ScreenEffect::Emit(SurfaceEvent::Disconnected)])
        }
        ScreenInput::ActionPressed(action) => handle_action(state, *action),
        ScreenInput::SearchTextChanged(text) => {
            let ScreenState::Search { query, .. } = state.top_mut() else {
                return Err(invalid(state, "search text changed"));
            };
            query.clone_from(text);
            tracing::debug!(query = %text, "search query updated");
            Ok(vec![ScreenEffect::Emit(SurfaceEvent::search_updated(
                text.clone(),
            ))])
        }
        ScreenInput::ResultSelected(index) => {
            let ScreenState::Search { results, .. } = state.top() else {
                return Err(invalid(state, "result selected"));
            };
            if *index >= results.len() {
                return Err(SurfaceError::InvalidTransition(format!(
                    "result {index} selected but only {} results are shown",
                    results.len()
                )));
            }

            // Selection notification is the application's responsibility; this
            // surface only navigates back.
            state.pop();
            tracing::debug!(index, "search result selected, popping to prior screen");
            Ok(vec![ScreenEffect::Present(state.compute_template())])
        }
        ScreenInput::Back => {
            if state.pop() {
                tracing::debug!(depth = state.depth(), "popped screen");
                Ok(vec![ScreenEffect::Present(state.compute_template())])
            } else {
                tracing::debug!("back on root ignored, session eligible for destruction");
                Ok(vec![])
            }
        }
        ScreenInput::ToggleChanged { name, checked } => {
            let ScreenState::Settings { toggles } = state.top_mut() else {
                return Err(invalid(state, "setting toggled"));
            };
            match name {
                ToggleName::VoiceGuidance => toggles.voice_guidance = *checked,
                ToggleName::AvoidTolls => toggles.avoid_tolls = *checked,
            }
            tracing::debug!(name = ?name, checked, "setting toggled");
            Ok(vec![ScreenEffect::Present(state.compute_template())])
        }
        ScreenInput::SetSearchResults(results) => {
            let ScreenState::Search {
                results: current, ..
            } = state.top_mut()
            else {
                // Late results for a screen the user already left.
                tracing::debug!(
                    count = results.len(),
                    "dropping search results, search screen no longer on top"
                );
                return Ok(vec![]);
            };
            current.clone_from(results);
            tracing::debug!(count = results.len(), "search results applied");
            Ok(vec![ScreenEffect::Present(state.compute_template())])
        }
        ScreenInput::SetScreenConfig(config) => {
            state.set_config(config.clone());
            tracing::debug!(title = %config.title, "screen config replaced");
            Ok(vec![ScreenEffect::Present(state.compute_template())])
        }
    }
}

/// Handles an action-strip press: emits the event, navigates if applicable.
fn handle_action(state: &mut StackState, action: ActionId) -> Result<Vec<ScreenEffect>> {
    let mut effects = vec![ScreenEffect::Emit(SurfaceEvent::action_pressed(
        action.as_str(),
        SCREEN_ID,
    ))];

    match action {
        ActionId::Search => {
            state.push(ScreenState::Search {
                query: String::new(),
                results: Vec::new(),
            });
            effects.push(ScreenEffect::Present(state.compute_template()));
        }
        ActionId::Settings => {
            state.push(ScreenState::Settings {
                toggles: SettingsToggles::default(),
            });
            effects.push(ScreenEffect::Present(state.compute_template()));
        }
        // Map actions stay on the current screen.
        ActionId::Center | ActionId::Report => {}
    }

    tracing::debug!(action = action.as_str(), depth = state.depth(), "action pressed");
    Ok(effects)
}

fn invalid(state: &StackState, operation: &str) -> SurfaceError {
    let shown = match state.top() {
        ScreenState::Root => "root",
        ScreenState::Search { .. } => "search",
        ScreenState::Settings { .. } => "settings",
    };
    SurfaceError::InvalidTransition(format!("{operation} while the {shown} screen is shown"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::template::Template;

    fn emitted(effects: &[ScreenEffect]) -> Vec<&SurfaceEvent> {
        effects
            .iter()
            .filter_map(|e| match e {
                ScreenEffect::Emit(event) => Some(event),
                ScreenEffect::Present(_) => None,
            })
            .collect()
    }

    fn presented(effects: &[ScreenEffect]) -> Vec<&Template> {
        effects
            .iter()
            .filter_map(|e| match e {
                ScreenEffect::Present(template) => Some(template),
                ScreenEffect::Emit(_) => None,
            })
            .collect()
    }

    fn results(titles: &[&str]) -> Vec<SearchResult> {
        titles
            .iter()
            .map(|t| SearchResult {
                title: (*t).to_string(),
                subtitle: String::new(),
            })
            .collect()
    }

    #[test]
    fn fresh_session_connects_and_presents_root() {
        let mut state = StackState::default();
        let effects = handle_input(&mut state, &ScreenInput::SessionCreated).unwrap();

        assert_eq!(emitted(&effects), vec![&SurfaceEvent::Connected]);
        assert!(matches!(
            presented(&effects).as_slice(),
            [Template::Navigation { .. }]
        ));
        assert_eq!(state.depth(), 1);
    }

    #[test]
    fn search_action_pushes_and_emits() {
        let mut state = StackState::default();
        handle_input(&mut state, &ScreenInput::SessionCreated).unwrap();
        let effects =
            handle_input(&mut state, &ScreenInput::ActionPressed(ActionId::Search)).unwrap();

        assert_eq!(
            emitted(&effects),
            vec![&SurfaceEvent::action_pressed("search", "navigation")]
        );
        assert!(matches!(
            presented(&effects).as_slice(),
            [Template::Search { .. }]
        ));
        assert_eq!(state.depth(), 2);
    }

    #[test]
    fn search_text_change_emits_and_updates_query() {
        let mut state = StackState::default();
        handle_input(&mut state, &ScreenInput::ActionPressed(ActionId::Search)).unwrap();
        let effects = handle_input(
            &mut state,
            &ScreenInput::SearchTextChanged("cafe".to_string()),
        )
        .unwrap();

        assert_eq!(
            emitted(&effects),
            vec![&SurfaceEvent::search_updated("cafe")]
        );
        assert_eq!(
            state.top(),
            &ScreenState::Search {
                query: "cafe".to_string(),
                results: vec![]
            }
        );
    }

    #[test]
    fn search_text_change_outside_search_is_invalid() {
        let mut state = StackState::default();
        handle_input(&mut state, &ScreenInput::ActionPressed(ActionId::Settings)).unwrap();

        let err = handle_input(
            &mut state,
            &ScreenInput::SearchTextChanged("cafe".to_string()),
        )
        .unwrap_err();
        assert!(matches!(err, SurfaceError::InvalidTransition(_)));
    }

    #[test]
    fn map_actions_emit_without_navigating() {
        let mut state = StackState::default();
        let effects =
            handle_input(&mut state, &ScreenInput::ActionPressed(ActionId::Center)).unwrap();

        assert_eq!(
            emitted(&effects),
            vec![&SurfaceEvent::action_pressed("center", "navigation")]
        );
        assert!(presented(&effects).is_empty());
        assert_eq!(state.depth(), 1);
    }

    #[test]
    fn results_apply_only_while_search_is_on_top() {
        let mut state = StackState::default();
        handle_input(&mut state, &ScreenInput::ActionPressed(ActionId::Search)).unwrap();
        handle_input(&mut state, &ScreenInput::Back).unwrap();

        // Late results for the abandoned search are dropped, not queued.
        let effects = handle_input(
            &mut state,
            &ScreenInput::SetSearchResults(results(&["Cafe Luna"])),
        )
        .unwrap();
        assert!(effects.is_empty());

        handle_input(&mut state, &ScreenInput::ActionPressed(ActionId::Search)).unwrap();
        assert_eq!(
            state.top(),
            &ScreenState::Search {
                query: String::new(),
                results: vec![]
            }
        );
    }

    #[test]
    fn results_present_when_search_is_current() {
        let mut state = StackState::default();
        handle_input(&mut state, &ScreenInput::ActionPressed(ActionId::Search)).unwrap();
        let effects = handle_input(
            &mut state,
            &ScreenInput::SetSearchResults(results(&["Cafe Luna", "Cafe Sol"])),
        )
        .unwrap();

        let [Template::Search { results, .. }] = presented(&effects).as_slice() else {
            panic!("expected a search template");
        };
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn selecting_a_result_pops_back() {
        let mut state = StackState::default();
        handle_input(&mut state, &ScreenInput::ActionPressed(ActionId::Search)).unwrap();
        handle_input(
            &mut state,
            &ScreenInput::SetSearchResults(results(&["Cafe Luna"])),
        )
        .unwrap();

        let effects = handle_input(&mut state, &ScreenInput::ResultSelected(0)).unwrap();
        assert!(matches!(
            presented(&effects).as_slice(),
            [Template::Navigation { .. }]
        ));
        assert_eq!(state.top(), &ScreenState::Root);
    }

    #[test]
    fn selecting_out_of_range_is_invalid() {
        let mut state = StackState::default();
        handle_input(&mut state, &ScreenInput::ActionPressed(ActionId::Search)).unwrap();

        let err = handle_input(&mut state, &ScreenInput::ResultSelected(3)).unwrap_err();
        assert!(matches!(err, SurfaceError::InvalidTransition(_)));
        assert_eq!(state.depth(), 2);
    }

    #[test]
    fn back_on_root_is_a_no_op() {
        let mut state = StackState::default();
        let effects = handle_input(&mut state, &ScreenInput::Back).unwrap();
        assert!(effects.is_empty());
        assert_eq!(state.depth(), 1);
        assert_eq!(state.top(), &ScreenState::Root);
    }

    #[test]
    fn toggle_updates_in_place_without_events() {
        let mut state = StackState::default();
        handle_input(&mut state, &ScreenInput::ActionPressed(ActionId::Settings)).unwrap();
        let effects = handle_input(
            &mut state,
            &ScreenInput::ToggleChanged {
                name: ToggleName::AvoidTolls,
                checked: true,
            },
        )
        .unwrap();

        assert!(emitted(&effects).is_empty());
        assert_eq!(
            state.top(),
            &ScreenState::Settings {
                toggles: SettingsToggles {
                    voice_guidance: true,
                    avoid_tolls: true
                }
            }
        );
    }

    #[test]
    fn toggle_outside_settings_is_invalid() {
        let mut state = StackState::default();
        let err = handle_input(
            &mut state,
            &ScreenInput::ToggleChanged {
                name: ToggleName::VoiceGuidance,
                checked: false,
            },
        )
        .unwrap_err();
        assert!(matches!(err, SurfaceError::InvalidTransition(_)));
    }

    #[test]
    fn screen_config_re_presents_the_top_screen() {
        let mut state = StackState::default();
        handle_input(&mut state, &ScreenInput::ActionPressed(ActionId::Settings)).unwrap();
        let effects = handle_input(
            &mut state,
            &ScreenInput::SetScreenConfig(ScreenConfig {
                title: "VoyageNav".to_string(),
                ..ScreenConfig::default()
            }),
        )
        .unwrap();

        let [Template::SettingsList { title, .. }] = presented(&effects).as_slice() else {
            panic!("expected a settings template");
        };
        assert_eq!(title, "VoyageNav Settings");
    }

    #[test]
    fn session_destroy_discards_the_stack() {
        let mut state = StackState::default();
        handle_input(&mut state, &ScreenInput::ActionPressed(ActionId::Search)).unwrap();
        let effects = handle_input(&mut state, &ScreenInput::SessionDestroyed).unwrap();

        assert_eq!(emitted(&effects), vec![&SurfaceEvent::Disconnected]);
        assert_eq!(state.depth(), 1);
    }
}
