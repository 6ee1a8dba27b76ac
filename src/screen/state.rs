//! Screen stack state for the head-unit surface.
//!
//! [`StackState`] is the single source of truth for the template-driven screen
//! stack: an ordered, never-empty list of [`ScreenState`] values whose bottom
//! is always the root navigation screen and whose top is the screen the host
//! is currently rendering. It is owned by the screen handler and mutated only
//! on the screen surface's thread.

use crate::domain::SearchResult;
use serde::{Deserialize, Serialize};

/// One screen on the stack.
///
/// The root navigation screen carries no data of its own: live turn and ETA
/// information flows through the overlay, not through this surface. Search and
/// settings screens own their transient UI state and drop it when popped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenState {
    /// The root navigation screen with its fixed action strips.
    Root,

    /// The search screen: current query plus the results delivered for it.
    Search {
        /// Query text as last reported by the host keyboard.
        query: String,
        /// Result rows delivered by the application for the current query.
        results: Vec<SearchResult>,
    },

    /// The settings screen with its toggle rows.
    Settings {
        /// Current toggle values, local to this surface session.
        toggles: SettingsToggles,
    },
}

/// Toggle values shown on the settings screen.
///
/// Defaults match the reference screen: voice guidance on, toll avoidance off.
/// Toggling has no externally visible effect beyond this surface session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsToggles {
    /// Turn-by-turn voice directions.
    pub voice_guidance: bool,

    /// Route around toll roads.
    pub avoid_tolls: bool,
}

impl Default for SettingsToggles {
    fn default() -> Self {
        Self {
            voice_guidance: true,
            avoid_tolls: false,
        }
    }
}

/// Presentation configuration applied to generated templates.
///
/// Replaced wholesale by the `setScreenConfig` bridge command; never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScreenConfig {
    /// Application title used in screen headers.
    pub title: String,

    /// Placeholder text for the search input.
    pub search_hint: String,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            title: "Navigation".to_string(),
            search_hint: "Where to?".to_string(),
        }
    }
}

/// The screen stack and its presentation configuration.
///
/// The stack invariants (never empty, bottom always [`ScreenState::Root`])
/// are enforced here: `pop` refuses to remove the last element and `new`
/// starts from `[Root]`.
#[derive(Debug, Clone, PartialEq)]
pub struct StackState {
    stack: Vec<ScreenState>,
    config: ScreenConfig,
}

/// Fallback for accessors; the stack itself is never actually empty.
static ROOT_SCREEN: ScreenState = ScreenState::Root;

impl Default for StackState {
    fn default() -> Self {
        Self::new(ScreenConfig::default())
    }
}

impl StackState {
    /// Creates a stack holding only the root screen.
    #[must_use]
    pub fn new(config: ScreenConfig) -> Self {
        Self {
            stack: vec![ScreenState::Root],
            config,
        }
    }

    /// The screen currently rendered by the host.
    #[must_use]
    pub fn top(&self) -> &ScreenState {
        // The constructor and pop() keep the stack non-empty.
        self.stack.last().unwrap_or(&ROOT_SCREEN)
    }

    /// Mutable access to the rendered screen.
    pub fn top_mut(&mut self) -> &mut ScreenState {
        if self.stack.is_empty() {
            self.stack.push(ScreenState::Root);
        }
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    /// Pushes a screen onto the stack, making it the rendered one.
    pub fn push(&mut self, screen: ScreenState) {
        self.stack.push(screen);
    }

    /// Pops the rendered screen; refuses to pop the root.
    ///
    /// Returns `true` when a screen was removed, `false` for the root no-op.
    pub fn pop(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    /// Number of screens on the stack.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Resets the stack to `[Root]`, discarding pushed screens.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.stack.push(ScreenState::Root);
    }

    /// Current presentation configuration.
    #[must_use]
    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    /// Replaces the presentation configuration.
    pub fn set_config(&mut self, config: ScreenConfig) {
        self.config = config;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stack_holds_only_root() {
        let state = StackState::default();
        assert_eq!(state.depth(), 1);
        assert_eq!(state.top(), &ScreenState::Root);
    }

    #[test]
    fn pop_refuses_to_remove_root() {
        let mut state = StackState::default();
        assert!(!state.pop());
        assert_eq!(state.depth(), 1);

        state.push(ScreenState::Settings {
            toggles: SettingsToggles::default(),
        });
        assert!(state.pop());
        assert!(!state.pop());
        assert_eq!(state.top(), &ScreenState::Root);
    }

    #[test]
    fn settings_defaults_match_the_reference_screen() {
        let toggles = SettingsToggles::default();
        assert!(toggles.voice_guidance);
        assert!(!toggles.avoid_tolls);
    }
}
