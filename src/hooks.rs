//! Lifecycle hooks and the new-client floating classifier.
//!
//! The host invokes hooks on three independent triggers:
//! - `startup_once`: first start of the WM process only, never on restart.
//! - `startup_always`: every start and every in-place restart.
//! - `new_client`: once per newly mapped top-level window, before it is shown.
//!
//! Hook bodies are deferred [`HookAction`] lists, not closures, so the
//! registry stays serializable and a registration can be inspected in tests.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Lifecycle trigger names.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum HookEvent {
    StartupOnce,
    StartupAlways,
    NewClient,
}

/// A deferred side effect run when a hook fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HookAction {
    /// Run a script synchronously and wait for it to exit. `~` expands to the
    /// user's home directory. A failure propagates to the dispatcher, which
    /// logs it and continues; the WM itself is unaffected.
    RunScript { path: String },

    /// Launch a process fire-and-forget; no result is awaited.
    Spawn { command: String },

    /// Mark the new window floating if the transient/window-type classifier
    /// or the floating rule list says so. Only meaningful on `new_client`.
    ClassifyFloating,
}

/// Hook registrations, at most one handler (action list) per event.
///
/// `register` replaces any existing handler for the same event and warns, so
/// a config that defines the same hook twice keeps only the later definition,
/// with the shadowing visible in logs and in the `--check` lint instead of
/// silently dropping a handler.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct HookRegistry {
    handlers: BTreeMap<HookEvent, Vec<HookAction>>,
    /// Events whose handler was replaced by a later registration.
    #[serde(skip)]
    replaced: Vec<HookEvent>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for an event, replacing any previous one.
    pub fn register(&mut self, event: HookEvent, actions: Vec<HookAction>) {
        if let Some(previous) = self.handlers.insert(event, actions) {
            warn!(
                target: "tessella::hooks",
                ?event,
                replaced = ?previous,
                "hook handler re-registered; the earlier definition is unreachable"
            );
            self.replaced.push(event);
        }
    }

    /// The active handler for an event, if any.
    pub fn handler(&self, event: HookEvent) -> Option<&[HookAction]> {
        self.handlers.get(&event).map(Vec::as_slice)
    }

    /// Events whose earlier handler a later registration shadowed.
    /// Surfaced by `--check`.
    pub fn replaced_events(&self) -> &[HookEvent] {
        &self.replaced
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (HookEvent, &[HookAction])> {
        self.handlers
            .iter()
            .map(|(event, actions)| (*event, actions.as_slice()))
    }
}

/// EWMH-style window type tag.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WindowType {
    #[default]
    Normal,
    Dialog,
    Notification,
    Toolbar,
    Splash,
    Utility,
    Dock,
}

/// The properties of a newly mapped window the configuration cares about.
/// In production the host fills this from the X/Wayland surface; tests build
/// synthetic ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WindowInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wm_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub window_type: WindowType,
    /// Id of the window this one is transient for, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transient_for: Option<u64>,
}

impl WindowInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, wm_class: impl Into<String>) -> Self {
        self.wm_class = Some(wm_class.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_type(mut self, window_type: WindowType) -> Self {
        self.window_type = window_type;
        self
    }

    pub fn transient_for(mut self, window: u64) -> Self {
        self.transient_for = Some(window);
        self
    }

    /// Short identity string for logs.
    pub fn describe(&self) -> String {
        match (&self.wm_class, &self.title) {
            (Some(class), Some(title)) => format!("{class} ({title})"),
            (Some(class), None) => class.clone(),
            (None, Some(title)) => title.clone(),
            (None, None) => "<unnamed>".to_string(),
        }
    }
}

/// The hook-driven floating path: a window floats if it declares itself
/// transient for another window, or if its type is one of the fixed set
/// {notification, toolbar, splash, dialog}. Evaluated once per new window and
/// OR'd with the rule-list outcome.
pub fn window_should_float(window: &WindowInfo) -> bool {
    window.transient_for.is_some()
        || matches!(
            window.window_type,
            WindowType::Notification | WindowType::Toolbar | WindowType::Splash | WindowType::Dialog
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_re_registration_keeps_only_the_later_handler() {
        let mut hooks = HookRegistry::new();
        hooks.register(HookEvent::StartupOnce, vec![HookAction::RunScript {
            path: "~/.config/tessella/scripts/autostart.sh".to_string(),
        }]);
        hooks.register(HookEvent::StartupOnce, vec![HookAction::RunScript {
            path: "~/.config/tessella/autostart.sh".to_string(),
        }]);

        assert_eq!(hooks.len(), 1);
        let active = hooks.handler(HookEvent::StartupOnce).unwrap();
        assert_eq!(active, &[HookAction::RunScript {
            path: "~/.config/tessella/autostart.sh".to_string(),
        }]);
        assert_eq!(hooks.replaced_events(), &[HookEvent::StartupOnce]);
    }

    #[test]
    fn test_handlers_are_independent_per_event() {
        let mut hooks = HookRegistry::new();
        hooks.register(HookEvent::StartupAlways, vec![HookAction::Spawn {
            command: "xsetroot -cursor_name left_ptr".to_string(),
        }]);
        hooks.register(HookEvent::NewClient, vec![HookAction::ClassifyFloating]);

        assert_eq!(hooks.len(), 2);
        assert!(hooks.handler(HookEvent::StartupOnce).is_none());
        assert!(hooks.replaced_events().is_empty());
    }

    #[test]
    fn test_transient_window_floats() {
        let window = WindowInfo::new().with_class("firefox").transient_for(0x1a2b);
        assert!(window_should_float(&window));
    }

    #[test]
    fn test_splash_window_floats() {
        let window = WindowInfo::new().with_type(WindowType::Splash);
        assert!(window_should_float(&window));
    }

    #[test]
    fn test_plain_normal_window_does_not_float() {
        let window = WindowInfo::new()
            .with_class("Alacritty")
            .with_type(WindowType::Normal);
        assert!(!window_should_float(&window));
    }

    #[test]
    fn test_utility_and_dock_are_not_in_the_floating_set() {
        assert!(!window_should_float(
            &WindowInfo::new().with_type(WindowType::Utility)
        ));
        assert!(!window_should_float(
            &WindowInfo::new().with_type(WindowType::Dock)
        ));
    }
}
