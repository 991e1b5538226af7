use std::io;
use std::path::PathBuf;

use tracing::info;

use super::{Host, HostError, HostResult};
use crate::config::{GroupMethod, LayoutMethod, WindowMethod};
use crate::hooks::WindowInfo;

/// A recorded host call, for assertions and for the `--simulate-startup`
/// transcript.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Spawn(String),
    RunScript(PathBuf),
    Layout(LayoutMethod),
    Window(WindowMethod),
    Group { group: char, method: GroupMethod },
    SetFloating { window: String, floating: bool },
    Reload,
    Shutdown,
    SpawnPrompt,
}

impl std::fmt::Display for HostCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spawn(program) => write!(f, "spawn {program}"),
            Self::RunScript(path) => write!(f, "run script {} (blocking)", path.display()),
            Self::Layout(method) => write!(f, "layout.{method:?}"),
            Self::Window(method) => write!(f, "window.{method:?}"),
            Self::Group { group, method } => write!(f, "group[{group}].{method:?}"),
            Self::SetFloating { window, floating } => {
                write!(f, "set floating={floating} on {window}")
            }
            Self::Reload => write!(f, "reload config"),
            Self::Shutdown => write!(f, "shutdown"),
            Self::SpawnPrompt => write!(f, "spawn prompt"),
        }
    }
}

/// Host double: logs every call and records it instead of acting.
///
/// `with_inapplicable` simulates a layout that does not implement some
/// methods, the situation the multi-action resize bindings are written for;
/// `with_failing_scripts` simulates a missing/broken autostart script.
#[derive(Debug, Default)]
pub struct DryRunHost {
    calls: Vec<HostCall>,
    inapplicable: Vec<LayoutMethod>,
    fail_scripts: bool,
}

impl DryRunHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inapplicable(mut self, methods: Vec<LayoutMethod>) -> Self {
        self.inapplicable = methods;
        self
    }

    pub fn with_failing_scripts(mut self) -> Self {
        self.fail_scripts = true;
        self
    }

    /// Everything recorded so far, in call order.
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    fn record(&mut self, call: HostCall) {
        info!(target: "tessella::host", "DRY-RUN {call}");
        self.calls.push(call);
    }
}

impl Host for DryRunHost {
    fn spawn(&mut self, program: &str) -> HostResult<()> {
        self.record(HostCall::Spawn(program.to_string()));
        Ok(())
    }

    fn run_script(&mut self, path: &str) -> HostResult<()> {
        if self.fail_scripts {
            return Err(HostError::Script {
                path: PathBuf::from(path),
                source: io::Error::from(io::ErrorKind::NotFound),
            });
        }
        self.record(HostCall::RunScript(PathBuf::from(path)));
        Ok(())
    }

    fn layout_call(&mut self, method: LayoutMethod) -> HostResult<bool> {
        self.record(HostCall::Layout(method));
        Ok(!self.inapplicable.contains(&method))
    }

    fn window_call(&mut self, method: WindowMethod) -> HostResult<()> {
        self.record(HostCall::Window(method));
        Ok(())
    }

    fn group_call(&mut self, group: char, method: GroupMethod) -> HostResult<()> {
        self.record(HostCall::Group { group, method });
        Ok(())
    }

    fn set_floating(&mut self, window: &WindowInfo, floating: bool) -> HostResult<()> {
        self.record(HostCall::SetFloating {
            window: window.describe(),
            floating,
        });
        Ok(())
    }

    fn reload(&mut self) -> HostResult<()> {
        self.record(HostCall::Reload);
        Ok(())
    }

    fn shutdown(&mut self) -> HostResult<()> {
        self.record(HostCall::Shutdown);
        Ok(())
    }

    fn spawn_prompt(&mut self) -> HostResult<()> {
        self.record(HostCall::SpawnPrompt);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_calls_in_order() {
        let mut host = DryRunHost::new();
        host.spawn("alacritty").unwrap();
        host.window_call(WindowMethod::Kill).unwrap();
        assert_eq!(host.calls(), &[
            HostCall::Spawn("alacritty".to_string()),
            HostCall::Window(WindowMethod::Kill),
        ]);
    }

    #[test]
    fn test_inapplicable_methods_report_noop() {
        let mut host = DryRunHost::new().with_inapplicable(vec![LayoutMethod::IncreaseRatio]);
        assert!(host.layout_call(LayoutMethod::Grow).unwrap());
        assert!(!host.layout_call(LayoutMethod::IncreaseRatio).unwrap());
    }

    #[test]
    fn test_failing_scripts_error_without_recording() {
        let mut host = DryRunHost::new().with_failing_scripts();
        assert!(host.run_script("~/.config/tessella/autostart.sh").is_err());
        assert!(host.calls().is_empty());
    }
}
