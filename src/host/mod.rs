//! The host seam.
//!
//! The configuration never executes anything itself; every [`Command`] and
//! [`HookAction`](crate::hooks::HookAction) is handed to an implementation of
//! the [`Host`] trait. The window manager embeds the crate and provides the
//! real implementation for layout/window/group calls; this crate ships:
//!
//! - [`ProcessHost`]: real process side effects (spawn, blocking scripts),
//!   WM-internal calls logged and ignored. Used by `--run-startup`.
//! - [`DryRunHost`]: logs and records every call. Used by
//!   `--simulate-startup` and by tests.
//!
//! [`Command`]: crate::config::Command

use std::path::PathBuf;

use thiserror::Error;

use crate::config::{GroupMethod, LayoutMethod, WindowMethod};
use crate::hooks::WindowInfo;

pub mod dispatcher;
pub mod dry_run;
pub mod process;

pub use dispatcher::Dispatcher;
pub use dry_run::{DryRunHost, HostCall};
pub use process::ProcessHost;

/// Errors surfaced by host calls.
#[derive(Error, Debug)]
pub enum HostError {
    #[error("failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("startup script {path:?} could not be run: {source}")]
    Script {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("startup script {path:?} exited with status {status}")]
    ScriptStatus { path: PathBuf, status: i32 },

    #[error("cannot expand '{0}': no home directory")]
    NoHome(String),
}

pub type HostResult<T> = Result<T, HostError>;

/// The command surface the host runtime exposes to the configuration.
///
/// All methods run synchronously on the host's event-loop thread. `spawn` is
/// fire-and-forget; `run_script` is the single deliberate blocking call
/// (startup-once), by the host's own API contract.
pub trait Host {
    /// Launch an external program; returns as soon as the OS has the process.
    fn spawn(&mut self, program: &str) -> HostResult<()>;

    /// Run a script and wait for it to exit. `~`-relative paths are expanded
    /// by the implementation.
    fn run_script(&mut self, path: &str) -> HostResult<()>;

    /// Invoke a method on the active layout. Returns `Ok(false)` when the
    /// layout does not implement the method (the no-op contract multi-action
    /// resize bindings rely on).
    fn layout_call(&mut self, method: LayoutMethod) -> HostResult<bool>;

    /// Invoke a method on the focused window.
    fn window_call(&mut self, method: WindowMethod) -> HostResult<()>;

    /// Invoke a method on the group with the given id.
    fn group_call(&mut self, group: char, method: GroupMethod) -> HostResult<()>;

    /// Set or clear a new window's floating attribute.
    fn set_floating(&mut self, window: &WindowInfo, floating: bool) -> HostResult<()>;

    /// Reload the configuration in place.
    fn reload(&mut self) -> HostResult<()>;

    /// Shut the window manager down.
    fn shutdown(&mut self) -> HostResult<()>;

    /// Open the run-command prompt.
    fn spawn_prompt(&mut self) -> HostResult<()>;
}
