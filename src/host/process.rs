use std::path::PathBuf;
use std::process::Command as OsCommand;

use tracing::{debug, trace, warn};

use super::{Host, HostError, HostResult};
use crate::config::{GroupMethod, LayoutMethod, WindowMethod};
use crate::hooks::WindowInfo;

/// Host implementation for the process side effects only.
///
/// Spawns are fire-and-forget; `run_script` blocks until the script exits,
/// matching the startup-once contract. WM-internal calls (layout, window,
/// group) have no meaning outside the embedding window manager and are
/// ignored with a debug log. Used by the CLI's `--run-startup`.
#[derive(Debug, Default)]
pub struct ProcessHost;

impl ProcessHost {
    pub fn new() -> Self {
        Self
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_home(path: &str) -> HostResult<PathBuf> {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = dirs::home_dir().ok_or_else(|| HostError::NoHome(path.to_string()))?;
        Ok(home.join(rest))
    } else {
        Ok(PathBuf::from(path))
    }
}

impl Host for ProcessHost {
    fn spawn(&mut self, program: &str) -> HostResult<()> {
        let mut parts = program.split_whitespace();
        let Some(argv0) = parts.next() else {
            warn!(target: "tessella::host", "empty spawn command ignored");
            return Ok(());
        };
        trace!(target: "tessella::host", %program, "spawning");
        OsCommand::new(argv0)
            .args(parts)
            .spawn()
            .map_err(|source| HostError::Spawn {
                program: program.to_string(),
                source,
            })?;
        Ok(())
    }

    fn run_script(&mut self, path: &str) -> HostResult<()> {
        let script = expand_home(path)?;
        debug!(target: "tessella::host", path = %script.display(), "running script, blocking");
        let status = OsCommand::new(&script)
            .status()
            .map_err(|source| HostError::Script {
                path: script.clone(),
                source,
            })?;
        if !status.success() {
            return Err(HostError::ScriptStatus {
                path: script,
                status: status.code().unwrap_or(-1),
            });
        }
        Ok(())
    }

    fn layout_call(&mut self, method: LayoutMethod) -> HostResult<bool> {
        debug!(target: "tessella::host", ?method, "no window manager attached; layout call ignored");
        Ok(false)
    }

    fn window_call(&mut self, method: WindowMethod) -> HostResult<()> {
        debug!(target: "tessella::host", ?method, "no window manager attached; window call ignored");
        Ok(())
    }

    fn group_call(&mut self, group: char, method: GroupMethod) -> HostResult<()> {
        debug!(
            target: "tessella::host",
            group = %group,
            ?method,
            "no window manager attached; group call ignored"
        );
        Ok(())
    }

    fn set_floating(&mut self, window: &WindowInfo, floating: bool) -> HostResult<()> {
        debug!(
            target: "tessella::host",
            window = %window.describe(),
            floating,
            "no window manager attached; set_floating ignored"
        );
        Ok(())
    }

    fn reload(&mut self) -> HostResult<()> {
        debug!(target: "tessella::host", "no window manager attached; reload ignored");
        Ok(())
    }

    fn shutdown(&mut self) -> HostResult<()> {
        debug!(target: "tessella::host", "no window manager attached; shutdown ignored");
        Ok(())
    }

    fn spawn_prompt(&mut self) -> HostResult<()> {
        debug!(target: "tessella::host", "no window manager attached; prompt ignored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home_on_tilde_paths() {
        let expanded = expand_home("~/.config/tessella/autostart.sh").unwrap();
        assert!(expanded.is_absolute());
        assert!(expanded.ends_with(".config/tessella/autostart.sh"));
    }

    #[test]
    fn test_absolute_paths_pass_through() {
        let expanded = expand_home("/usr/local/bin/autostart.sh").unwrap();
        assert_eq!(expanded, PathBuf::from("/usr/local/bin/autostart.sh"));
    }

    #[test]
    fn test_spawn_of_missing_program_errors() {
        let mut host = ProcessHost::new();
        let err = host.spawn("definitely-not-a-real-program-3141").unwrap_err();
        assert!(matches!(err, HostError::Spawn { .. }));
    }

    #[test]
    fn test_empty_spawn_is_ignored() {
        let mut host = ProcessHost::new();
        assert!(host.spawn("   ").is_ok());
    }
}
