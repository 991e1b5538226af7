//! Configuration surface for the window manager.
//!
//! This module wires together the data models, the key table helpers, the
//! widget vocabulary, and the loading/validation helpers. Import from here
//! for a convenient, stable API.
//!
//! Example:
//! use tessella::config::{Config, load_from_path};
//!
//! let cfg = load_from_path("~/.config/tessella/config.json")?;

pub mod keys;
pub mod loader;
pub mod models;
pub mod widgets;

// Re-export core data models
pub use keys::{
    Command, GroupMethod, KeyBinding, LayoutMethod, Modifier, WindowMethod, group_bindings,
    resolve, shadowed, with_group_bindings,
};
pub use models::{
    Bar, BarPosition, Config, Flags, FloatingRules, FocusActivation, Group, LayoutKind, Match,
    MouseBinding, MouseBindingKind, Screen, Theme,
};
pub use widgets::{ClickBindings, HighlightMethod, Widget, WidgetDefaults, WidgetKind, WidgetStyle};

// Re-export loader utilities
pub use loader::{
    generate_schema, load_from_path, load_from_reader, load_from_str, validate_config,
    write_schema_to_writer,
};
