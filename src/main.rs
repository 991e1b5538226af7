use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use tessella::config::{self as cfg, Config};
use tessella::hooks::HookEvent;
use tessella::host::{Dispatcher, DryRunHost, ProcessHost};

/// Tessella configuration tool
#[derive(Debug, Parser)]
#[command(
    name = tessella::PKG_NAME,
    version = tessella::PKG_VERSION,
    about = "Inspect, validate, and exercise a Tessella window manager configuration"
)]
struct Args {
    /// Path to a JSON configuration file (defaults to the built-in profile)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Print the JSON Schema for the configuration and exit
    #[arg(long = "print-schema")]
    print_schema: bool,

    /// Lint the configuration: shadowed keybindings, replaced hook handlers
    #[arg(long = "check")]
    check: bool,

    /// Print the effective key table, widget order, and floating rules
    #[arg(long = "describe")]
    describe: bool,

    /// Log what the startup hooks would do, without running anything
    #[arg(long = "simulate-startup")]
    simulate_startup: bool,

    /// Actually run the startup hooks (autostart script, cursor reset)
    #[arg(long = "run-startup")]
    run_startup: bool,

    /// Set log level (e.g., trace, debug, info, warn, error). Overrides RUST_LOG.
    #[arg(long = "log-level")]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(level) = &args.log_level {
        let level = match level.to_lowercase().as_str() {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "info" => tracing::Level::INFO,
            "warn" | "warning" => tracing::Level::WARN,
            "error" => tracing::Level::ERROR,
            _ => tracing::Level::INFO,
        };
        let _ = tracing_subscriber::fmt().with_max_level(level).try_init();
    } else {
        tessella::init_tracing();
    }

    if args.print_schema {
        let schema = cfg::generate_schema();
        let json = serde_json::to_string_pretty(&schema)?;
        println!("{json}");
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => cfg::load_from_path(path)?,
        None => tessella::profile::default_config(),
    };
    info!(
        version = tessella::PKG_VERSION,
        keys = config.keys.len(),
        groups = config.groups.len(),
        "Configuration loaded"
    );

    if args.check {
        check(&config);
        return Ok(());
    }

    if args.describe {
        describe(&config);
        return Ok(());
    }

    if args.simulate_startup {
        let mut dispatcher = Dispatcher::new(DryRunHost::new());
        dispatcher.fire(&config, HookEvent::StartupOnce, None)?;
        dispatcher.fire(&config, HookEvent::StartupAlways, None)?;
        println!("startup would:");
        for call in dispatcher.host().calls() {
            println!("  {call}");
        }
        return Ok(());
    }

    if args.run_startup {
        let mut dispatcher = Dispatcher::new(ProcessHost::new());
        dispatcher.fire(&config, HookEvent::StartupOnce, None)?;
        dispatcher.fire(&config, HookEvent::StartupAlways, None)?;
        return Ok(());
    }

    // No mode flag: lint, same as --check.
    check(&config);
    Ok(())
}

/// Report the things validation accepts but a user probably wants to know
/// about: chords that shadow earlier ones and hook handlers that replaced an
/// earlier registration.
fn check(config: &Config) {
    let shadowed = cfg::shadowed(&config.keys);
    if shadowed.is_empty() {
        println!("keys: {} bindings, no shadowed chords", config.keys.len());
    } else {
        println!(
            "keys: {} bindings, {} shadowed (last declaration wins):",
            config.keys.len(),
            shadowed.len()
        );
        for (loser, winner) in shadowed {
            println!(
                "  {:?}+{} : {:?} shadowed by {:?}",
                loser.mods, loser.key, loser.commands, winner.commands
            );
        }
    }

    let replaced = config.hooks.replaced_events();
    if replaced.is_empty() {
        println!("hooks: {} handlers, none replaced", config.hooks.len());
    } else {
        for event in replaced {
            println!("hooks: handler for {event:?} was re-registered; earlier body unreachable");
        }
    }
}

fn describe(config: &Config) {
    println!("groups: {}", config.groups.iter().map(|g| g.id).collect::<String>());
    println!("layouts: {:?}", config.layouts);

    println!("keys ({} effective):", cfg::resolve(&config.keys).len());
    for binding in cfg::resolve(&config.keys) {
        let mods = binding
            .mods
            .iter()
            .map(|m| format!("{m:?}").to_lowercase())
            .collect::<Vec<_>>()
            .join("+");
        let chord = if mods.is_empty() {
            binding.key.clone()
        } else {
            format!("{mods}+{}", binding.key)
        };
        match &binding.desc {
            Some(desc) => println!("  {chord:<28} {desc}"),
            None => println!("  {chord:<28} {:?}", binding.commands),
        }
    }

    for (i, screen) in config.screens.iter().enumerate() {
        let names: Vec<&str> = screen.bar.widgets.iter().map(|w| w.kind.name()).collect();
        println!("screen {i} bar: {}", names.join(" | "));
    }

    println!("floating rules: {}", config.floating.rules.len());
    for rule in &config.floating.rules {
        match (&rule.wm_class, &rule.title) {
            (Some(class), None) => println!("  class = {class}"),
            (None, Some(title)) => println!("  title = {title}"),
            (Some(class), Some(title)) => println!("  class = {class}, title = {title}"),
            (None, None) => {}
        }
    }
}
