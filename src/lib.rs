#![forbid(unsafe_code)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Tessella — a typed, serializable configuration module for a tiling window manager.
//!
//! The whole configuration is plain data: keybindings carry deferred
//! [`Command`](config::Command)s instead of callbacks, hooks carry
//! [`HookAction`](hooks::HookAction)s, and everything derives serde +
//! JSON Schema, so a config can be validated, diffed, and tested without a
//! live window manager. The host runtime reads the exposed tables once at
//! startup and drives everything afterwards; this crate never runs a loop of
//! its own.
//!
//! Modules:
//! - `config`: Data models (keys, groups, layouts, widgets, rules), loader, schema helpers.
//! - `hooks`: Lifecycle hook registry and the new-client floating classifier.
//! - `host`: The `Host` trait seam, the command dispatcher, and the shipped hosts.
//! - `profile`: The built-in configuration profile.
//!
//! Use `tessella::prelude::*` to bring commonly used items into scope quickly.

/// Public module: configuration (models, key table, widgets, loader).
pub mod config;
/// Public module: lifecycle hooks and the floating classifier.
pub mod hooks;
/// Public module: host seam (trait, dispatcher, process/dry-run hosts).
pub mod host;
/// Public module: the built-in configuration profile.
pub mod profile;

/// Crate-level constants for consumers that want to inspect package metadata at runtime.
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the crate version (e.g., "0.1.0").
#[inline]
pub const fn version() -> &'static str {
    PKG_VERSION
}

/// Initialize tracing (logging) with a reasonable default.
/// - Honors the `RUST_LOG` environment variable if set.
/// - Falls back to `info` level.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init_tracing() {
    use tracing::Level;
    use tracing_subscriber::fmt;

    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| match s.to_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        })
        .unwrap_or(Level::INFO);

    // Ignore the error if the global subscriber was already set.
    let _ = fmt().with_max_level(level).try_init();
}

/// A convenient set of exports for most consumers.
///
/// Bring this into scope with:
/// `use tessella::prelude::*;`
pub mod prelude {
    // Common result/error handling
    pub use anyhow::{Context, Error, Result, anyhow, bail, ensure};

    // Serialization
    pub use serde::{Deserialize, Serialize};

    // Tracing macros
    pub use tracing::{debug, error, info, instrument, trace, warn};

    // Frequently used internal modules and types
    pub use crate as tessella;
    pub use crate::config::{Command, Config, KeyBinding, Modifier};
    pub use crate::hooks::{HookAction, HookEvent, WindowInfo};
    pub use crate::host::{Dispatcher, DryRunHost, Host, ProcessHost};
    pub use crate::{config, hooks, host, profile};
}
