use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::keys::{Command, KeyBinding, Modifier};
use super::widgets::{Widget, WidgetDefaults};
use crate::hooks::{HookRegistry, WindowInfo};

/// Root configuration surface.
///
/// This is everything the window manager reads at startup: the key table,
/// the group table, layout selection and theming, the bar, mouse bindings,
/// floating rules, lifecycle hooks, and the scalar behavior flags. The whole
/// structure is plain serializable data; the host evaluates the embedded
/// [`Command`]s later, in response to real events.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// Scalar behavior flags, exported at the top level of the config surface.
    #[serde(flatten)]
    pub flags: Flags,

    /// The full key table, static bindings first, derived group bindings after.
    #[serde(default)]
    pub keys: Vec<KeyBinding>,

    /// Virtual desktops, in display order.
    #[serde(default)]
    pub groups: Vec<Group>,

    /// Layout cycle order for "next layout".
    #[serde(default)]
    pub layouts: Vec<LayoutKind>,

    /// Theme parameters shared by every layout instance.
    #[serde(default)]
    pub theme: Theme,

    #[serde(default)]
    pub widget_defaults: WidgetDefaults,

    #[serde(default)]
    pub screens: Vec<Screen>,

    #[serde(default)]
    pub mouse: Vec<MouseBinding>,

    #[serde(default)]
    pub floating: FloatingRules,

    #[serde(default)]
    pub hooks: HookRegistry,
}

/// Scalar flags the host reads by name.
///
/// Defaults match the values the host expects from this configuration; a
/// JSON config only needs to name the flags it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Flags {
    /// `None` disables the automatic key binder for dynamic groups; the key
    /// table carries the derived group bindings explicitly instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dgroups_key_binder: Option<String>,
    /// No dynamic group rules; auto-assignment uses `Group::matches`.
    pub dgroups_app_rules: Vec<Match>,
    pub follow_mouse_focus: bool,
    pub bring_front_click: bool,
    pub cursor_warp: bool,
    pub auto_fullscreen: bool,
    pub focus_on_window_activation: FocusActivation,
    pub reconfigure_screens: bool,
    pub auto_minimize: bool,
    /// Identity string reported to legacy Java UI toolkits.
    pub wmname: String,
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            dgroups_key_binder: None,
            dgroups_app_rules: Vec::new(),
            follow_mouse_focus: true,
            bring_front_click: false,
            cursor_warp: false,
            auto_fullscreen: true,
            focus_on_window_activation: FocusActivation::Focus,
            reconfigure_screens: true,
            auto_minimize: true,
            wmname: "LG3D".to_string(),
        }
    }
}

/// Behavior when a window requests activation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FocusActivation {
    Smart,
    Focus,
    Urgent,
    Never,
}

/// One virtual desktop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Group {
    /// Single-character identifier, doubling as the displayed label unless
    /// `label` overrides it.
    pub id: char,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Auto-assignment predicates, evaluated host-side against new windows in
    /// table order; first match wins.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<Match>,
}

impl Group {
    pub fn new(id: char) -> Self {
        Self {
            id,
            label: None,
            matches: Vec::new(),
        }
    }

    pub fn matching(mut self, rule: Match) -> Self {
        self.matches.push(rule);
        self
    }
}

/// Exact, case-sensitive predicate over a window's class and/or title.
/// Criteria that are both present must both hold; a rule with neither set
/// matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Match {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wm_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Match {
    pub fn class(wm_class: impl Into<String>) -> Self {
        Self {
            wm_class: Some(wm_class.into()),
            title: None,
        }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self {
            wm_class: None,
            title: Some(title.into()),
        }
    }

    pub fn matches(&self, window: &WindowInfo) -> bool {
        if self.wm_class.is_none() && self.title.is_none() {
            return false;
        }
        if let Some(class) = &self.wm_class
            && window.wm_class.as_deref() != Some(class.as_str())
        {
            return false;
        }
        if let Some(title) = &self.title
            && window.title.as_deref() != Some(title.as_str())
        {
            return false;
        }
        true
    }
}

/// The floating-window rule list: the host's default rules as a fixed prefix,
/// extended (never replaced) by the user's rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FloatingRules {
    pub rules: Vec<Match>,
}

impl FloatingRules {
    /// Rules every installation carries regardless of user configuration.
    /// Window-type based floating (dialogs, splashes, ...) is handled by the
    /// new-client hook classifier, not by this list.
    pub fn host_defaults() -> Vec<Match> {
        vec![
            Match::class("confirm"),
            Match::class("dialog"),
            Match::class("download"),
            Match::class("error"),
            Match::class("file_progress"),
            Match::class("notification"),
            Match::class("splash"),
            Match::class("toolbar"),
            Match::class("ssh-askpass"),
            Match::title("branchdialog"),
            Match::title("pinentry"),
        ]
    }

    /// Concatenate the host defaults (prefix) with the user's rules.
    pub fn with_defaults(user_rules: Vec<Match>) -> Self {
        let mut rules = Self::host_defaults();
        rules.extend(user_rules);
        Self { rules }
    }

    /// First match wins; with pure predicates that reduces to "any".
    pub fn matches(&self, window: &WindowInfo) -> bool {
        self.rules.iter().any(|rule| rule.matches(window))
    }
}

/// Window-arrangement algorithm. List order in `Config::layouts` defines the
/// "next layout" cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    MonadTall,
    MonadWide,
    Grid,
    TreeTab,
    Floating,
}

/// Theme parameters applied uniformly to every layout instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Theme {
    pub border_width: u32,
    pub margin: u32,
    pub border_focus: String,
    pub border_normal: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border_width: 2,
            margin: 10,
            border_focus: "#89b4fa".to_string(),
            border_normal: "#45475a".to_string(),
        }
    }
}

/// One physical screen; currently just its bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Screen {
    pub bar: Bar,
}

/// Status bar: geometry plus the ordered widget list (left to right).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Bar {
    #[serde(default)]
    pub position: BarPosition,
    #[serde(default = "default_bar_size")]
    pub size: u32,
    pub background: String,
    pub widgets: Vec<Widget>,
}

fn default_bar_size() -> u32 {
    26
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BarPosition {
    #[default]
    Top,
    Bottom,
}

/// Pointer binding on the root or a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MouseBinding {
    #[serde(default)]
    pub mods: Vec<Modifier>,
    /// Conventional button numbering: 1 left, 2 middle, 3 right.
    pub button: u8,
    #[serde(flatten)]
    pub kind: MouseBindingKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MouseBindingKind {
    /// Command runs continuously while the button is held (move/resize drags).
    Drag { command: Command },
    /// Command runs once on press.
    Click { command: Command },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::{WindowInfo, WindowType};

    #[test]
    fn test_floating_rules_keep_host_defaults_as_prefix() {
        let user = vec![Match::class("confirmreset"), Match::title("pinentry-gtk-2")];
        let rules = FloatingRules::with_defaults(user.clone());

        let defaults = FloatingRules::host_defaults();
        assert_eq!(&rules.rules[..defaults.len()], &defaults[..]);
        assert_eq!(&rules.rules[defaults.len()..], &user[..]);
    }

    #[test]
    fn test_match_requires_all_set_criteria() {
        let window = WindowInfo::new()
            .with_class("pavucontrol")
            .with_title("Volume Control");

        assert!(Match::class("pavucontrol").matches(&window));
        assert!(Match::title("Volume Control").matches(&window));
        assert!(!Match::class("Pavucontrol").matches(&window)); // case-sensitive

        let both = Match {
            wm_class: Some("pavucontrol".to_string()),
            title: Some("Other".to_string()),
        };
        assert!(!both.matches(&window));

        // A rule with no criteria matches nothing.
        assert!(!Match::default().matches(&window));
    }

    #[test]
    fn test_floating_rules_first_match_semantics() {
        let rules = FloatingRules::with_defaults(vec![Match::class("Arandr")]);
        let floating = WindowInfo::new().with_class("Arandr");
        let tiled = WindowInfo::new()
            .with_class("Alacritty")
            .with_type(WindowType::Normal);
        assert!(rules.matches(&floating));
        assert!(!rules.matches(&tiled));
    }

    #[test]
    fn test_flags_defaults_match_host_expectations() {
        let flags = Flags::default();
        assert_eq!(flags.dgroups_key_binder, None);
        assert!(flags.dgroups_app_rules.is_empty());
        assert!(flags.follow_mouse_focus);
        assert!(!flags.bring_front_click);
        assert!(!flags.cursor_warp);
        assert!(flags.auto_fullscreen);
        assert_eq!(flags.focus_on_window_activation, FocusActivation::Focus);
        assert!(flags.reconfigure_screens);
        assert!(flags.auto_minimize);
        assert_eq!(flags.wmname, "LG3D");
    }

    #[test]
    fn test_flags_flatten_to_top_level_names() {
        let config = Config::default();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["wmname"], "LG3D");
        assert_eq!(json["follow_mouse_focus"], true);
        assert_eq!(json["focus_on_window_activation"], "focus");
    }
}
