use anyhow::Result;
use tracing::{debug, error, trace, warn};

use super::Host;
use crate::config::{Command, Config, KeyBinding, Modifier};
use crate::config::widgets::Widget;
use crate::hooks::{HookAction, HookEvent, window_should_float};
use crate::hooks::WindowInfo;

/// Translates configuration events (key presses, widget clicks, lifecycle
/// hooks) into [`Host`] calls.
///
/// The dispatcher is deliberately forgiving: a failing command inside a
/// binding or hook is logged and the remaining commands still run, matching
/// the host's own hook error handling (logged, non-fatal). Only structural
/// problems (not errors from side effects) surface as `Err`.
pub struct Dispatcher<H: Host> {
    host: H,
}

impl<H: Host> Dispatcher<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Handle a physical key event against a binding table.
    ///
    /// Bindings are scanned from the end so that when duplicate chords exist
    /// the last declaration wins, the documented resolution policy. Returns
    /// whether any binding matched.
    pub fn key_press(
        &mut self,
        bindings: &[KeyBinding],
        mods: &[Modifier],
        key: &str,
    ) -> Result<bool> {
        let Some(binding) = bindings.iter().rev().find(|b| b.matches(mods, key)) else {
            trace!(target: "tessella::dispatch", ?mods, key, "no binding for chord");
            return Ok(false);
        };

        debug!(
            target: "tessella::dispatch",
            ?mods,
            key,
            commands = binding.commands.len(),
            "key binding fired"
        );
        for command in &binding.commands {
            self.run_command(command);
        }
        Ok(true)
    }

    /// Handle a pointer click on a widget. Returns whether the widget had a
    /// binding for the button.
    pub fn click(&mut self, widget: &Widget, button: u8) -> Result<bool> {
        let Some(command) = widget.on_click.get(&button) else {
            return Ok(false);
        };
        debug!(
            target: "tessella::dispatch",
            widget = widget.kind.name(),
            button,
            "widget click"
        );
        self.run_command(command);
        Ok(true)
    }

    /// Fire a lifecycle hook from the configuration's registry.
    ///
    /// `window` must be provided for [`HookEvent::NewClient`] and is ignored
    /// otherwise.
    pub fn fire(
        &mut self,
        config: &Config,
        event: HookEvent,
        window: Option<&WindowInfo>,
    ) -> Result<()> {
        let Some(actions) = config.hooks.handler(event) else {
            trace!(target: "tessella::dispatch", ?event, "no hook handler registered");
            return Ok(());
        };

        debug!(target: "tessella::dispatch", ?event, actions = actions.len(), "hook fired");
        for action in actions {
            match action {
                HookAction::RunScript { path } => {
                    if let Err(err) = self.host.run_script(path) {
                        error!(
                            target: "tessella::dispatch",
                            ?event,
                            error = %err,
                            "hook script failed"
                        );
                    }
                }
                HookAction::Spawn { command } => {
                    if let Err(err) = self.host.spawn(command) {
                        warn!(
                            target: "tessella::dispatch",
                            ?event,
                            error = %err,
                            "hook spawn failed"
                        );
                    }
                }
                HookAction::ClassifyFloating => {
                    let Some(window) = window else {
                        warn!(
                            target: "tessella::dispatch",
                            ?event,
                            "classify_floating fired without a window"
                        );
                        continue;
                    };
                    // Rule-list path OR hook path; either is enough to float.
                    let float = config.floating.matches(window) || window_should_float(window);
                    if float {
                        debug!(
                            target: "tessella::dispatch",
                            window = %window.describe(),
                            "new client classified floating"
                        );
                        if let Err(err) = self.host.set_floating(window, true) {
                            warn!(
                                target: "tessella::dispatch",
                                error = %err,
                                "set_floating failed"
                            );
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Run one deferred command; errors from side effects are logged, not
    /// propagated, and layout no-ops are traced.
    pub fn run_command(&mut self, command: &Command) {
        let outcome = match command {
            Command::Spawn { program } => self.host.spawn(program),
            Command::Layout { method } => match self.host.layout_call(*method) {
                Ok(true) => Ok(()),
                Ok(false) => {
                    trace!(
                        target: "tessella::dispatch",
                        ?method,
                        "layout method not applicable; no-op"
                    );
                    Ok(())
                }
                Err(err) => Err(err),
            },
            Command::Window { method } => self.host.window_call(*method),
            Command::Group { group, method } => self.host.group_call(*group, *method),
            Command::Reload => self.host.reload(),
            Command::Shutdown => self.host.shutdown(),
            Command::SpawnPrompt => self.host.spawn_prompt(),
        };

        if let Err(err) = outcome {
            warn!(
                target: "tessella::dispatch",
                ?command,
                error = %err,
                "command failed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FloatingRules, LayoutMethod, Match, WindowMethod};
    use crate::host::dry_run::{DryRunHost, HostCall};
    use crate::hooks::{HookRegistry, WindowType};

    fn dispatcher() -> Dispatcher<DryRunHost> {
        Dispatcher::new(DryRunHost::new())
    }

    fn new_client_config(rules: Vec<Match>) -> Config {
        let mut hooks = HookRegistry::new();
        hooks.register(HookEvent::NewClient, vec![HookAction::ClassifyFloating]);
        Config {
            floating: FloatingRules::with_defaults(rules),
            hooks,
            ..Config::default()
        }
    }

    #[test]
    fn test_key_press_runs_commands_in_order() {
        let bindings = vec![KeyBinding::new(
            &[Modifier::Super, Modifier::Control],
            "l",
            vec![
                Command::Layout {
                    method: LayoutMethod::GrowRight,
                },
                Command::Layout {
                    method: LayoutMethod::Grow,
                },
                Command::Layout {
                    method: LayoutMethod::IncreaseRatio,
                },
                Command::Layout {
                    method: LayoutMethod::Delete,
                },
            ],
        )];

        let mut dispatcher = dispatcher();
        let hit = dispatcher
            .key_press(&bindings, &[Modifier::Control, Modifier::Super], "l")
            .unwrap();
        assert!(hit);
        assert_eq!(dispatcher.host().calls(), &[
            HostCall::Layout(LayoutMethod::GrowRight),
            HostCall::Layout(LayoutMethod::Grow),
            HostCall::Layout(LayoutMethod::IncreaseRatio),
            HostCall::Layout(LayoutMethod::Delete),
        ]);
    }

    #[test]
    fn test_inapplicable_layout_method_is_noop_and_rest_still_runs() {
        let bindings = vec![KeyBinding::new(&[Modifier::Super], "n", vec![
            Command::Layout {
                method: LayoutMethod::Normalize,
            },
            Command::Window {
                method: WindowMethod::BringToFront,
            },
        ])];

        let host = DryRunHost::new().with_inapplicable(vec![LayoutMethod::Normalize]);
        let mut dispatcher = Dispatcher::new(host);
        dispatcher
            .key_press(&bindings, &[Modifier::Super], "n")
            .unwrap();
        // The no-op layout call is still recorded, and the window call ran.
        assert_eq!(dispatcher.host().calls(), &[
            HostCall::Layout(LayoutMethod::Normalize),
            HostCall::Window(WindowMethod::BringToFront),
        ]);
    }

    #[test]
    fn test_last_declared_binding_wins_at_dispatch() {
        let bindings = vec![
            KeyBinding::new(&[Modifier::Super], "b", vec![Command::spawn("firefox")]),
            KeyBinding::new(&[Modifier::Super], "b", vec![Command::spawn("chromium")]),
        ];
        let mut dispatcher = dispatcher();
        dispatcher
            .key_press(&bindings, &[Modifier::Super], "b")
            .unwrap();
        assert_eq!(dispatcher.host().calls(), &[HostCall::Spawn(
            "chromium".to_string()
        )]);
    }

    #[test]
    fn test_unbound_chord_reports_no_match() {
        let mut dispatcher = dispatcher();
        let hit = dispatcher.key_press(&[], &[Modifier::Super], "z").unwrap();
        assert!(!hit);
        assert!(dispatcher.host().calls().is_empty());
    }

    #[test]
    fn test_widget_click_runs_bound_command() {
        use crate::config::widgets::{Widget, WidgetKind};

        let widget = Widget::new(WidgetKind::Clock {
            format: "%H:%M".to_string(),
        })
        .on_click(1, Command::spawn("gsimplecal"));

        let mut dispatcher = dispatcher();
        assert!(dispatcher.click(&widget, 1).unwrap());
        assert!(!dispatcher.click(&widget, 3).unwrap());
        assert_eq!(dispatcher.host().calls(), &[HostCall::Spawn(
            "gsimplecal".to_string()
        )]);
    }

    #[test]
    fn test_new_client_floats_transient_window() {
        let config = new_client_config(Vec::new());
        let window = WindowInfo::new().with_class("firefox").transient_for(7);

        let mut dispatcher = dispatcher();
        dispatcher
            .fire(&config, HookEvent::NewClient, Some(&window))
            .unwrap();
        assert_eq!(dispatcher.host().calls(), &[HostCall::SetFloating {
            window: window.describe(),
            floating: true,
        }]);
    }

    #[test]
    fn test_new_client_floats_on_rule_match_even_for_normal_type() {
        let config = new_client_config(vec![Match::class("pavucontrol")]);
        let window = WindowInfo::new()
            .with_class("pavucontrol")
            .with_type(WindowType::Normal);

        let mut dispatcher = dispatcher();
        dispatcher
            .fire(&config, HookEvent::NewClient, Some(&window))
            .unwrap();
        assert_eq!(dispatcher.host().calls().len(), 1);
    }

    #[test]
    fn test_new_client_leaves_plain_window_tiled() {
        let config = new_client_config(Vec::new());
        let window = WindowInfo::new()
            .with_class("Alacritty")
            .with_type(WindowType::Normal);

        let mut dispatcher = dispatcher();
        dispatcher
            .fire(&config, HookEvent::NewClient, Some(&window))
            .unwrap();
        assert!(dispatcher.host().calls().is_empty());
    }

    #[test]
    fn test_failed_hook_script_does_not_abort_the_hook() {
        let mut hooks = HookRegistry::new();
        hooks.register(HookEvent::StartupOnce, vec![
            HookAction::RunScript {
                path: "~/.config/tessella/autostart.sh".to_string(),
            },
            HookAction::Spawn {
                command: "xsetroot -cursor_name left_ptr".to_string(),
            },
        ]);
        let config = Config {
            hooks,
            ..Config::default()
        };

        let host = DryRunHost::new().with_failing_scripts();
        let mut dispatcher = Dispatcher::new(host);
        dispatcher
            .fire(&config, HookEvent::StartupOnce, None)
            .unwrap();
        // The spawn after the failing script still ran.
        assert_eq!(dispatcher.host().calls(), &[HostCall::Spawn(
            "xsetroot -cursor_name left_ptr".to_string()
        )]);
    }
}
