use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::models::Group;

/// Keyboard modifier.
///
/// `Super` is the usual "mod" key on a tiling setup; the binding tables in the
/// profile refer to it through `profile::MODKEY` so the whole table can be
/// remapped in one place.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Super,
    Shift,
    Control,
    Alt,
}

/// A deferred, host-evaluated command.
///
/// Commands are plain data: nothing happens at declaration time. The host (or
/// a [`crate::host::Dispatcher`] driving a [`crate::host::Host`]) evaluates
/// them later, when the key press / click / hook event actually fires. Keeping
/// them as tagged variants rather than closures keeps the whole configuration
/// serializable and testable without a live window manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Launch an external program, fire-and-forget.
    Spawn { program: String },

    /// Call a method on the currently active layout.
    ///
    /// The host no-ops methods the active layout does not implement, which is
    /// why a single binding may carry several layout-specific methods in a
    /// row (see the resize bindings in the profile).
    Layout { method: LayoutMethod },

    /// Call a method on the currently focused window.
    Window { method: WindowMethod },

    /// Call a method on a group (virtual desktop), addressed by its id.
    Group { group: char, method: GroupMethod },

    /// Reload the configuration in place.
    Reload,

    /// Shut the window manager down.
    Shutdown,

    /// Open the host's run-command prompt.
    SpawnPrompt,
}

impl Command {
    /// Shorthand for `Command::Spawn` from any string-ish program line.
    pub fn spawn(program: impl Into<String>) -> Self {
        Self::Spawn {
            program: program.into(),
        }
    }
}

/// Methods delegated to the active layout instance.
///
/// Which of these apply depends entirely on the layout algorithm; the host
/// contract is "no-op if inapplicable" (`Host::layout_call` returns `false`).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMethod {
    FocusLeft,
    FocusRight,
    FocusUp,
    FocusDown,
    /// Move focus to the next window in layout order.
    FocusNext,
    ShuffleLeft,
    ShuffleRight,
    ShuffleUp,
    ShuffleDown,
    GrowLeft,
    GrowRight,
    GrowUp,
    GrowDown,
    Grow,
    Shrink,
    IncreaseRatio,
    DecreaseRatio,
    /// Add a partition/section (tree-style layouts).
    Add,
    /// Delete the current partition/section (tree-style layouts).
    Delete,
    /// Reset all partition sizes to their defaults.
    Normalize,
    ToggleSplit,
    /// Cycle to the next layout in the configured list.
    Next,
}

/// Methods delegated to the focused window.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WindowMethod {
    Kill,
    ToggleFloating,
    ToggleFullscreen,
    BringToFront,
    /// Begin a floating move (pointer drag).
    SetPositionFloating,
    /// Begin a floating resize (pointer drag).
    SetSizeFloating,
}

/// Methods addressed to a group.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GroupMethod {
    /// Make the group the visible one on the current screen.
    SwitchTo,
    /// Move the focused window to the group; `follow` also switches to it.
    MoveFocusedTo { follow: bool },
}

/// One keyboard shortcut: a modifier set, a key symbol, and the ordered list
/// of commands to run when it fires.
///
/// Duplicate (mods, key) chords are permitted by construction; resolution is
/// last-declaration-wins (see [`resolve`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeyBinding {
    #[serde(default)]
    pub mods: Vec<Modifier>,

    /// Key symbol name, e.g. `"h"`, `"Return"`, `"XF86AudioMute"`.
    pub key: String,

    /// Commands invoked in list order when the chord fires.
    pub commands: Vec<Command>,

    /// Human-readable description, shown by `--describe`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

impl KeyBinding {
    pub fn new(mods: &[Modifier], key: impl Into<String>, commands: Vec<Command>) -> Self {
        Self {
            mods: mods.to_vec(),
            key: key.into(),
            commands,
            desc: None,
        }
    }

    /// Attach a description (builder style).
    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    /// The chord identity used for duplicate resolution: modifiers sorted and
    /// deduplicated, plus the key symbol. Key symbols compare case-sensitively.
    pub fn chord(&self) -> (Vec<Modifier>, &str) {
        let mut mods = self.mods.clone();
        mods.sort_unstable();
        mods.dedup();
        (mods, self.key.as_str())
    }

    /// Whether this binding matches a physical (mods, key) event.
    pub fn matches(&self, mods: &[Modifier], key: &str) -> bool {
        let mut pressed = mods.to_vec();
        pressed.sort_unstable();
        pressed.dedup();
        self.chord() == (pressed, key)
    }
}

/// Derive the two per-group bindings: `modkey + id` switches to the group,
/// `modkey + shift + id` moves the focused window there and follows it.
///
/// Pure function of the group table; output order follows group-table order.
pub fn group_bindings(modkey: Modifier, groups: &[Group]) -> Vec<KeyBinding> {
    let mut out = Vec::with_capacity(groups.len() * 2);
    for group in groups {
        out.push(
            KeyBinding::new(
                &[modkey],
                group.id.to_string(),
                vec![Command::Group {
                    group: group.id,
                    method: GroupMethod::SwitchTo,
                }],
            )
            .desc(format!("Switch to group {}", group.id)),
        );
        out.push(
            KeyBinding::new(
                &[modkey, Modifier::Shift],
                group.id.to_string(),
                vec![Command::Group {
                    group: group.id,
                    method: GroupMethod::MoveFocusedTo { follow: true },
                }],
            )
            .desc(format!("Move focused window to group {}", group.id)),
        );
    }
    out
}

/// Build the full key table: the static bindings followed by the derived
/// group bindings. An explicit append step rather than in-place mutation, so
/// the combined table is a value the rest of the crate can reason about.
pub fn with_group_bindings(
    static_keys: Vec<KeyBinding>,
    modkey: Modifier,
    groups: &[Group],
) -> Vec<KeyBinding> {
    let mut keys = static_keys;
    keys.extend(group_bindings(modkey, groups));
    keys
}

/// Resolve duplicate chords: the last declaration wins.
///
/// The returned slice keeps the table position of each chord's first
/// appearance but carries the content of its last declaration, so iteration
/// order stays stable for display while precedence matches the documented
/// policy.
pub fn resolve(bindings: &[KeyBinding]) -> Vec<&KeyBinding> {
    let mut order: Vec<usize> = Vec::new();
    let mut slots: BTreeMap<(Vec<Modifier>, &str), usize> = BTreeMap::new();
    for (idx, binding) in bindings.iter().enumerate() {
        match slots.get(&binding.chord()) {
            Some(&slot) => order[slot] = idx,
            None => {
                slots.insert(binding.chord(), order.len());
                order.push(idx);
            }
        }
    }
    order.into_iter().map(|idx| &bindings[idx]).collect()
}

/// Report every binding that a later declaration of the same chord shadows,
/// paired with the declaration that wins. Used by the `--check` lint.
pub fn shadowed(bindings: &[KeyBinding]) -> Vec<(&KeyBinding, &KeyBinding)> {
    let mut last: BTreeMap<(Vec<Modifier>, &str), usize> = BTreeMap::new();
    for (idx, binding) in bindings.iter().enumerate() {
        last.insert(binding.chord(), idx);
    }
    bindings
        .iter()
        .enumerate()
        .filter_map(|(idx, binding)| {
            let winner = last[&binding.chord()];
            (winner != idx).then(|| (binding, &bindings[winner]))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(id: char) -> Group {
        Group {
            id,
            label: None,
            matches: Vec::new(),
        }
    }

    #[test]
    fn test_two_bindings_derived_per_group_in_order() {
        let groups = vec![group('1'), group('2'), group('3')];
        let static_keys = vec![
            KeyBinding::new(&[Modifier::Super], "Return", vec![Command::spawn("xterm")]),
        ];

        let keys = with_group_bindings(static_keys.clone(), Modifier::Super, &groups);

        // Static table first, then exactly two derived bindings per group.
        assert_eq!(keys.len(), static_keys.len() + groups.len() * 2);
        assert_eq!(keys[0], static_keys[0]);
        for (i, g) in groups.iter().enumerate() {
            let switch = &keys[1 + i * 2];
            let moveto = &keys[2 + i * 2];
            assert_eq!(switch.mods, vec![Modifier::Super]);
            assert_eq!(switch.key, g.id.to_string());
            assert_eq!(
                switch.commands,
                vec![Command::Group {
                    group: g.id,
                    method: GroupMethod::SwitchTo
                }]
            );
            assert_eq!(moveto.mods, vec![Modifier::Super, Modifier::Shift]);
            assert_eq!(moveto.key, g.id.to_string());
            assert_eq!(
                moveto.commands,
                vec![Command::Group {
                    group: g.id,
                    method: GroupMethod::MoveFocusedTo { follow: true }
                }]
            );
        }
    }

    #[test]
    fn test_resolve_last_declaration_wins() {
        let bindings = vec![
            KeyBinding::new(
                &[Modifier::Super, Modifier::Shift],
                "f",
                vec![Command::Window {
                    method: WindowMethod::ToggleFullscreen,
                }],
            ),
            KeyBinding::new(&[Modifier::Super], "w", vec![Command::Window {
                method: WindowMethod::Kill,
            }]),
            // Same chord as the first binding, declared with the modifiers in
            // the opposite order; this one must win.
            KeyBinding::new(
                &[Modifier::Shift, Modifier::Super],
                "f",
                vec![Command::Window {
                    method: WindowMethod::BringToFront,
                }],
            ),
        ];

        let effective = resolve(&bindings);
        assert_eq!(effective.len(), 2);
        assert_eq!(
            effective[0].commands,
            vec![Command::Window {
                method: WindowMethod::BringToFront
            }]
        );
    }

    #[test]
    fn test_shadowed_reports_loser_and_winner() {
        let bindings = vec![
            KeyBinding::new(&[Modifier::Super], "b", vec![Command::spawn("firefox")]),
            KeyBinding::new(&[Modifier::Super], "b", vec![Command::spawn("chromium")]),
        ];
        let report = shadowed(&bindings);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].0.commands, vec![Command::spawn("firefox")]);
        assert_eq!(report[0].1.commands, vec![Command::spawn("chromium")]);
    }

    #[test]
    fn test_binding_matches_normalizes_modifier_order() {
        let binding = KeyBinding::new(
            &[Modifier::Super, Modifier::Control],
            "l",
            vec![Command::Layout {
                method: LayoutMethod::GrowRight,
            }],
        );
        assert!(binding.matches(&[Modifier::Control, Modifier::Super], "l"));
        assert!(!binding.matches(&[Modifier::Super], "l"));
        assert!(!binding.matches(&[Modifier::Control, Modifier::Super], "L"));
    }

    #[test]
    fn test_command_json_shape() {
        let cmd = Command::Group {
            group: '3',
            method: GroupMethod::MoveFocusedTo { follow: true },
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["type"], "group");
        assert_eq!(json["group"], "3");
        assert_eq!(json["method"]["type"], "move_focused_to");
        assert_eq!(json["method"]["follow"], true);
    }
}
