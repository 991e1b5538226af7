use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::keys::Command;

/// Styling applied to every bar widget unless overridden per widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WidgetDefaults {
    pub font: String,
    pub fontsize: u32,
    pub padding: u32,
    /// Foreground color, `#rrggbb`.
    pub foreground: String,
    /// Background color; `None` inherits the bar background.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

impl Default for WidgetDefaults {
    fn default() -> Self {
        Self {
            font: "sans".to_string(),
            fontsize: 14,
            padding: 3,
            foreground: "#cdd6f4".to_string(),
            background: None,
        }
    }
}

/// Per-widget style overrides. Any `None` field falls back to the shared
/// [`WidgetDefaults`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WidgetStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fontsize: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

impl WidgetStyle {
    pub fn foreground(fg: impl Into<String>) -> Self {
        Self {
            foreground: Some(fg.into()),
            ..Self::default()
        }
    }

    fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the overrides over the shared defaults into a concrete style.
    pub fn resolve(&self, defaults: &WidgetDefaults) -> WidgetDefaults {
        WidgetDefaults {
            font: self.font.clone().unwrap_or_else(|| defaults.font.clone()),
            fontsize: self.fontsize.unwrap_or(defaults.fontsize),
            padding: self.padding.unwrap_or(defaults.padding),
            foreground: self
                .foreground
                .clone()
                .unwrap_or_else(|| defaults.foreground.clone()),
            background: self.background.clone().or_else(|| defaults.background.clone()),
        }
    }
}

/// Pointer button -> deferred command, for clickable widgets.
/// Buttons use the conventional numbering: 1 left, 2 middle, 3 right,
/// 4/5 scroll.
pub type ClickBindings = BTreeMap<u8, Command>;

/// One status-bar element. List order in the bar is left-to-right screen
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Widget {
    #[serde(flatten)]
    pub kind: WidgetKind,

    #[serde(default, skip_serializing_if = "WidgetStyle::is_default")]
    pub style: WidgetStyle,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub on_click: ClickBindings,
}

impl Widget {
    pub fn new(kind: WidgetKind) -> Self {
        Self {
            kind,
            style: WidgetStyle::default(),
            on_click: BTreeMap::new(),
        }
    }

    pub fn style(mut self, style: WidgetStyle) -> Self {
        self.style = style;
        self
    }

    pub fn on_click(mut self, button: u8, command: Command) -> Self {
        self.on_click.insert(button, command);
        self
    }
}

/// The fixed widget vocabulary.
///
/// Widgets that poll (CheckUpdates, Memory, Cpu) carry only their format
/// strings and intervals here; the polling timer is the host's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetKind {
    /// Static image, e.g. a distro logo at the far left.
    Image {
        path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        margin: Option<u32>,
    },

    /// One box per group, with the current group highlighted.
    GroupBox {
        #[serde(default)]
        highlight_method: HighlightMethod,
        /// Color for groups that contain windows.
        active: String,
        /// Color for empty groups.
        inactive: String,
        /// Border/underline color for the group shown on this screen.
        this_current_screen_border: String,
    },

    /// Name of the active layout.
    CurrentLayout,

    /// Number of windows in the current group.
    WindowCount {
        #[serde(default)]
        show_zero: bool,
    },

    /// Title of the focused window.
    WindowName { format: String },

    /// Pending package updates, polled on a host-managed timer.
    CheckUpdates {
        distro: String,
        display_format: String,
        no_update_string: String,
        colour_have_updates: String,
        update_interval_secs: u64,
    },

    /// Memory usage monitor.
    Memory {
        format: String,
        update_interval_secs: u64,
    },

    /// CPU load monitor.
    Cpu {
        format: String,
        update_interval_secs: u64,
    },

    /// PulseAudio volume.
    PulseVolume {
        #[serde(default)]
        limit_max_volume: bool,
    },

    /// Date/time, strftime format.
    Clock { format: String },

    /// System tray.
    Systray {
        #[serde(default = "default_icon_size")]
        icon_size: u32,
    },

    /// Fixed-width gap; `None` stretches to fill remaining space.
    Spacer {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        length: Option<u32>,
    },

    /// Click-to-confirm logout button.
    QuickExit {
        default_text: String,
        countdown_format: String,
    },
}

fn default_icon_size() -> u32 {
    20
}

/// GroupBox highlight style.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum HighlightMethod {
    #[default]
    Line,
    Block,
    Text,
}

impl WidgetKind {
    /// Stable display name, used by `--describe` and the ordering tests.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Image { .. } => "Image",
            Self::GroupBox { .. } => "GroupBox",
            Self::CurrentLayout => "CurrentLayout",
            Self::WindowCount { .. } => "WindowCount",
            Self::WindowName { .. } => "WindowName",
            Self::CheckUpdates { .. } => "CheckUpdates",
            Self::Memory { .. } => "Memory",
            Self::Cpu { .. } => "Cpu",
            Self::PulseVolume { .. } => "PulseVolume",
            Self::Clock { .. } => "Clock",
            Self::Systray { .. } => "Systray",
            Self::Spacer { .. } => "Spacer",
            Self::QuickExit { .. } => "QuickExit",
        }
    }
}
