use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use schemars::{Schema, schema_for};
use tracing::{debug, warn};

use super::keys::{self, Command};
use super::models::Config;
use super::widgets::WidgetKind;
use crate::hooks::HookAction;

/// Load configuration from a string slice.
pub fn load_from_str(s: &str) -> Result<Config> {
    let cfg: Config =
        serde_json::from_str(s).context("Failed to parse JSON config string into Config")?;
    validate_config(&cfg)?;
    Ok(cfg)
}

/// Load configuration from any reader (e.g., a file).
pub fn load_from_reader<R: Read>(reader: R) -> Result<Config> {
    let cfg: Config =
        serde_json::from_reader(reader).context("Failed to parse JSON config from reader")?;
    validate_config(&cfg)?;
    Ok(cfg)
}

/// Load configuration from a file path.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    let file = File::open(path_ref)
        .with_context(|| format!("Failed to open config file {}", path_ref.display()))?;
    let cfg = load_from_reader(file)?;
    debug!("Loaded config from {}", path_ref.display());
    Ok(cfg)
}

/// Generate the JSON Schema for the Config model (for external validation or tooling).
pub fn generate_schema() -> Schema {
    schema_for!(Config)
}

/// Write the JSON Schema for the Config model to any writer (pretty-printed).
pub fn write_schema_to_writer<W: Write>(mut writer: W) -> Result<()> {
    let schema = generate_schema();
    let json = serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?;
    writer
        .write_all(json.as_bytes())
        .context("Failed to write schema to writer")?;
    Ok(())
}

/// Perform basic sanity checks over a configuration.
///
/// Structural problems are errors; duplicate key chords are not (the
/// last-declaration-wins policy handles them) but they are logged here and
/// reported by the `--check` lint.
pub fn validate_config(cfg: &Config) -> Result<()> {
    // Group identifiers must be unique; they double as key symbols for the
    // derived bindings.
    let mut seen = std::collections::BTreeSet::new();
    for group in &cfg.groups {
        if !seen.insert(group.id) {
            bail!("Duplicate group identifier '{}'", group.id);
        }
    }

    for (idx, binding) in cfg.keys.iter().enumerate() {
        if binding.key.is_empty() {
            bail!("Key binding #{idx} has an empty key symbol");
        }
        if binding.commands.is_empty() {
            bail!(
                "Key binding #{} ({}) has no commands",
                idx,
                binding.key
            );
        }
        for command in &binding.commands {
            validate_command(command)
                .with_context(|| format!("Invalid command on key binding '{}'", binding.key))?;
        }
    }

    if cfg.layouts.is_empty() && !cfg.keys.is_empty() {
        bail!("Layout list is empty; \"next layout\" would have nothing to cycle");
    }

    for screen in &cfg.screens {
        for widget in &screen.bar.widgets {
            if let WidgetKind::Image { path, .. } = &widget.kind
                && path.is_empty()
            {
                bail!("Image widget has an empty path");
            }
            for command in widget.on_click.values() {
                validate_command(command).context("Invalid widget click command")?;
            }
        }
    }

    for (event, actions) in cfg.hooks.iter() {
        for action in actions {
            match action {
                HookAction::RunScript { path } if path.is_empty() => {
                    bail!("Hook {event:?} has a run_script action with an empty path");
                }
                HookAction::Spawn { command } if command.trim().is_empty() => {
                    bail!("Hook {event:?} has a spawn action with an empty command");
                }
                _ => {}
            }
        }
    }

    let shadowed = keys::shadowed(&cfg.keys);
    if !shadowed.is_empty() {
        warn!(
            count = shadowed.len(),
            "key table contains shadowed chords; last declaration wins"
        );
    }

    Ok(())
}

fn validate_command(command: &Command) -> Result<()> {
    match command {
        Command::Spawn { program } if program.trim().is_empty() => {
            bail!("spawn command with an empty program");
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::models::Group;
    use crate::profile;

    #[test]
    fn test_profile_round_trips_through_json() {
        let config = profile::default_config();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let reloaded = load_from_str(&json).unwrap();
        assert_eq!(reloaded.keys, config.keys);
        assert_eq!(reloaded.groups, config.groups);
        assert_eq!(reloaded.screens, config.screens);
        assert_eq!(reloaded.floating, config.floating);
        assert_eq!(reloaded.flags, config.flags);
    }

    #[test]
    fn test_duplicate_group_ids_rejected() {
        let cfg = Config {
            groups: vec![Group::new('1'), Group::new('1')],
            ..Config::default()
        };
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_binding_without_commands_rejected() {
        let json = r#"{"keys": [{"mods": ["super"], "key": "x", "commands": []}],
                       "layouts": ["monad_tall"]}"#;
        assert!(load_from_str(json).is_err());
    }

    #[test]
    fn test_empty_spawn_program_rejected() {
        let json = r#"{"keys": [{"mods": ["super"], "key": "x",
                                 "commands": [{"type": "spawn", "program": " "}]}],
                       "layouts": ["monad_tall"]}"#;
        assert!(load_from_str(json).is_err());
    }

    #[test]
    fn test_minimal_snippet_parses() {
        let json = r#"{
            "keys": [
                {"mods": ["super"], "key": "Return",
                 "commands": [{"type": "spawn", "program": "alacritty"}],
                 "desc": "Launch terminal"}
            ],
            "groups": [{"id": "1"}, {"id": "2"}],
            "layouts": ["monad_tall", "grid"],
            "wmname": "LG3D"
        }"#;
        let cfg = load_from_str(json).unwrap();
        assert_eq!(cfg.keys.len(), 1);
        assert_eq!(cfg.groups[1].id, '2');
        assert_eq!(cfg.layouts.len(), 2);
    }

    #[test]
    fn test_schema_generates() {
        let schema = generate_schema();
        let json = serde_json::to_value(&schema).unwrap();
        assert!(json.get("$schema").is_some() || json.get("title").is_some());
    }
}
