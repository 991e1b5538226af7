//! The built-in configuration profile.
//!
//! This is the crate's equivalent of the user's config file: the palette,
//! the programs, the static key table, groups, layouts, bar, floating rules,
//! and hooks, assembled into one [`Config`] value by [`default_config`]. The
//! derived group bindings are appended by an explicit build step rather than
//! mutated in after the fact, so the combined table is a plain value.

use crate::config::{
    Bar, BarPosition, Command, Config, Flags, FloatingRules, Group, HighlightMethod, KeyBinding,
    LayoutKind, LayoutMethod, Match, Modifier, MouseBinding, MouseBindingKind, Screen, Theme,
    Widget, WidgetDefaults, WidgetKind, WidgetStyle, WindowMethod, with_group_bindings,
};
use crate::hooks::{HookAction, HookEvent, HookRegistry};

/// The modifier every binding in this profile hangs off.
pub const MODKEY: Modifier = Modifier::Super;

pub const TERMINAL: &str = "alacritty";
pub const BROWSER: &str = "firefox";
pub const FILE_MANAGER: &str = "thunar";
pub const LAUNCHER: &str = "rofi -show drun";

/// Color palette shared by theme and bar.
pub mod palette {
    pub const BASE: &str = "#1e1e2e";
    pub const SURFACE: &str = "#45475a";
    pub const OVERLAY: &str = "#6c7086";
    pub const TEXT: &str = "#cdd6f4";
    pub const BLUE: &str = "#89b4fa";
    pub const GREEN: &str = "#a6e3a1";
    pub const YELLOW: &str = "#f9e2af";
    pub const PEACH: &str = "#fab387";
    pub const RED: &str = "#f38ba8";
    pub const TEAL: &str = "#94e2d5";
}

/// Build the complete built-in configuration.
pub fn default_config() -> Config {
    let groups = groups();
    Config {
        flags: Flags::default(),
        keys: with_group_bindings(static_keys(), MODKEY, &groups),
        groups,
        layouts: layouts(),
        theme: theme(),
        widget_defaults: widget_defaults(),
        screens: vec![Screen { bar: bar() }],
        mouse: mouse_bindings(),
        floating: FloatingRules::with_defaults(float_rules()),
        hooks: hooks(),
    }
}

fn layout(method: LayoutMethod) -> Command {
    Command::Layout { method }
}

fn window(method: WindowMethod) -> Command {
    Command::Window { method }
}

fn bind(mods: &[Modifier], key: &str, commands: Vec<Command>, desc: &str) -> KeyBinding {
    KeyBinding::new(mods, key, commands).desc(desc)
}

/// The static key table. Group switch/move bindings are derived separately.
pub fn static_keys() -> Vec<KeyBinding> {
    use LayoutMethod::*;
    use Modifier::{Control, Shift};

    vec![
        // Window focus
        bind(&[MODKEY], "h", vec![layout(FocusLeft)], "Move focus left"),
        bind(&[MODKEY], "l", vec![layout(FocusRight)], "Move focus right"),
        bind(&[MODKEY], "j", vec![layout(FocusDown)], "Move focus down"),
        bind(&[MODKEY], "k", vec![layout(FocusUp)], "Move focus up"),
        bind(
            &[MODKEY],
            "space",
            vec![layout(FocusNext)],
            "Move focus to next window",
        ),
        // Window movement
        bind(
            &[MODKEY, Shift],
            "h",
            vec![layout(ShuffleLeft)],
            "Move window left",
        ),
        bind(
            &[MODKEY, Shift],
            "l",
            vec![layout(ShuffleRight)],
            "Move window right",
        ),
        bind(
            &[MODKEY, Shift],
            "j",
            vec![layout(ShuffleDown)],
            "Move window down",
        ),
        bind(
            &[MODKEY, Shift],
            "k",
            vec![layout(ShuffleUp)],
            "Move window up",
        ),
        // Resizing. Each binding lists one method per layout family; the
        // active layout answers the one it implements and no-ops the rest.
        bind(
            &[MODKEY, Control],
            "h",
            vec![
                layout(GrowLeft),
                layout(Shrink),
                layout(DecreaseRatio),
                layout(Add),
            ],
            "Grow window left",
        ),
        bind(
            &[MODKEY, Control],
            "l",
            vec![
                layout(GrowRight),
                layout(Grow),
                layout(IncreaseRatio),
                layout(Delete),
            ],
            "Grow window right",
        ),
        bind(
            &[MODKEY, Control],
            "j",
            vec![layout(GrowDown), layout(Shrink), layout(IncreaseRatio)],
            "Grow window down",
        ),
        bind(
            &[MODKEY, Control],
            "k",
            vec![layout(GrowUp), layout(Grow), layout(DecreaseRatio)],
            "Grow window up",
        ),
        bind(&[MODKEY], "n", vec![layout(Normalize)], "Reset window sizes"),
        bind(
            &[MODKEY, Shift],
            "Return",
            vec![layout(ToggleSplit)],
            "Toggle split side of stack",
        ),
        // Layout and window state
        bind(&[MODKEY], "Tab", vec![layout(Next)], "Toggle between layouts"),
        bind(&[MODKEY], "w", vec![window(WindowMethod::Kill)], "Kill focused window"),
        bind(
            &[MODKEY],
            "f",
            vec![window(WindowMethod::ToggleFullscreen)],
            "Toggle fullscreen",
        ),
        bind(
            &[MODKEY],
            "t",
            vec![window(WindowMethod::ToggleFloating)],
            "Toggle floating",
        ),
        // Programs
        bind(
            &[MODKEY],
            "Return",
            vec![Command::spawn(TERMINAL)],
            "Launch terminal",
        ),
        bind(&[MODKEY], "b", vec![Command::spawn(BROWSER)], "Launch browser"),
        bind(
            &[MODKEY],
            "e",
            vec![Command::spawn(FILE_MANAGER)],
            "Launch file manager",
        ),
        bind(&[MODKEY], "d", vec![Command::spawn(LAUNCHER)], "Application launcher"),
        bind(&[MODKEY], "p", vec![Command::SpawnPrompt], "Run prompt"),
        // Manager
        bind(&[MODKEY, Control], "r", vec![Command::Reload], "Reload the config"),
        bind(&[MODKEY, Control], "q", vec![Command::Shutdown], "Shutdown the WM"),
        // Media keys
        bind(
            &[],
            "XF86AudioRaiseVolume",
            vec![Command::spawn("pactl set-sink-volume @DEFAULT_SINK@ +5%")],
            "Raise volume",
        ),
        bind(
            &[],
            "XF86AudioLowerVolume",
            vec![Command::spawn("pactl set-sink-volume @DEFAULT_SINK@ -5%")],
            "Lower volume",
        ),
        bind(
            &[],
            "XF86AudioMute",
            vec![Command::spawn("pactl set-sink-mute @DEFAULT_SINK@ toggle")],
            "Toggle mute",
        ),
        bind(
            &[],
            "XF86MonBrightnessUp",
            vec![Command::spawn("brightnessctl set +10%")],
            "Raise brightness",
        ),
        bind(
            &[],
            "XF86MonBrightnessDown",
            vec![Command::spawn("brightnessctl set 10%-")],
            "Lower brightness",
        ),
        bind(&[], "Print", vec![Command::spawn("flameshot gui")], "Screenshot"),
    ]
}

/// Nine single-character groups; a few carry auto-assignment predicates.
pub fn groups() -> Vec<Group> {
    vec![
        Group::new('1'),
        Group::new('2').matching(Match::class("firefox")),
        Group::new('3').matching(Match::class("Thunar")),
        Group::new('4'),
        Group::new('5'),
        Group::new('6'),
        Group::new('7'),
        Group::new('8').matching(Match::class("discord")),
        Group::new('9').matching(Match::class("Spotify")),
    ]
}

/// Cycle order for "next layout".
pub fn layouts() -> Vec<LayoutKind> {
    vec![
        LayoutKind::MonadTall,
        LayoutKind::MonadWide,
        LayoutKind::Grid,
        LayoutKind::TreeTab,
        LayoutKind::Floating,
    ]
}

pub fn theme() -> Theme {
    Theme {
        border_width: 2,
        margin: 10,
        border_focus: palette::BLUE.to_string(),
        border_normal: palette::SURFACE.to_string(),
    }
}

pub fn widget_defaults() -> WidgetDefaults {
    WidgetDefaults {
        font: "JetBrainsMono Nerd Font".to_string(),
        fontsize: 14,
        padding: 3,
        foreground: palette::TEXT.to_string(),
        background: None,
    }
}

/// The bar, widgets in left-to-right order.
pub fn bar() -> Bar {
    Bar {
        position: BarPosition::Top,
        size: 26,
        background: palette::BASE.to_string(),
        widgets: vec![
            Widget::new(WidgetKind::Image {
                path: "~/.config/tessella/icons/logo.png".to_string(),
                margin: Some(4),
            })
            .on_click(1, Command::spawn(LAUNCHER)),
            Widget::new(WidgetKind::GroupBox {
                highlight_method: HighlightMethod::Line,
                active: palette::TEXT.to_string(),
                inactive: palette::OVERLAY.to_string(),
                this_current_screen_border: palette::BLUE.to_string(),
            }),
            Widget::new(WidgetKind::CurrentLayout)
                .style(WidgetStyle::foreground(palette::TEAL)),
            Widget::new(WidgetKind::WindowCount { show_zero: false }),
            Widget::new(WidgetKind::WindowName {
                format: "{name}".to_string(),
            }),
            Widget::new(WidgetKind::CheckUpdates {
                distro: "Arch_checkupdates".to_string(),
                display_format: "⟳ {updates}".to_string(),
                no_update_string: "✔".to_string(),
                colour_have_updates: palette::YELLOW.to_string(),
                update_interval_secs: 1800,
            })
            .on_click(
                1,
                Command::spawn(format!("{TERMINAL} -e sudo pacman -Syu")),
            ),
            Widget::new(WidgetKind::Memory {
                format: "󰍛 {used}M".to_string(),
                update_interval_secs: 5,
            })
            .style(WidgetStyle::foreground(palette::GREEN)),
            Widget::new(WidgetKind::Cpu {
                format: " {load}%".to_string(),
                update_interval_secs: 5,
            })
            .style(WidgetStyle::foreground(palette::PEACH)),
            Widget::new(WidgetKind::PulseVolume {
                limit_max_volume: true,
            })
            .on_click(3, Command::spawn("pavucontrol")),
            Widget::new(WidgetKind::Clock {
                format: "%a %d %b %H:%M".to_string(),
            })
            .on_click(1, Command::spawn("gsimplecal")),
            Widget::new(WidgetKind::Systray { icon_size: 20 }),
            Widget::new(WidgetKind::Spacer { length: Some(8) }),
            Widget::new(WidgetKind::QuickExit {
                default_text: "⏻".to_string(),
                countdown_format: "{}".to_string(),
            })
            .style(WidgetStyle::foreground(palette::RED)),
        ],
    }
}

pub fn mouse_bindings() -> Vec<MouseBinding> {
    vec![
        MouseBinding {
            mods: vec![MODKEY],
            button: 1,
            kind: MouseBindingKind::Drag {
                command: Command::Window {
                    method: WindowMethod::SetPositionFloating,
                },
            },
        },
        MouseBinding {
            mods: vec![MODKEY],
            button: 3,
            kind: MouseBindingKind::Drag {
                command: Command::Window {
                    method: WindowMethod::SetSizeFloating,
                },
            },
        },
        MouseBinding {
            mods: vec![MODKEY],
            button: 2,
            kind: MouseBindingKind::Click {
                command: Command::Window {
                    method: WindowMethod::BringToFront,
                },
            },
        },
    ]
}

/// Rules appended after the host defaults.
pub fn float_rules() -> Vec<Match> {
    vec![
        Match::class("confirmreset"),
        Match::class("makebranch"),
        Match::class("maketag"),
        Match::class("Arandr"),
        Match::class("blueman-manager"),
        Match::class("pavucontrol"),
        Match::title("pinentry-gtk-2"),
    ]
}

/// Lifecycle hooks. One handler per event; re-registering replaces.
pub fn hooks() -> HookRegistry {
    let mut hooks = HookRegistry::new();
    hooks.register(HookEvent::StartupOnce, vec![HookAction::RunScript {
        path: "~/.config/tessella/autostart.sh".to_string(),
    }]);
    hooks.register(HookEvent::StartupAlways, vec![HookAction::Spawn {
        command: "xsetroot -cursor_name left_ptr".to_string(),
    }]);
    hooks.register(HookEvent::NewClient, vec![HookAction::ClassifyFloating]);
    hooks
}
