// cellbridge CLI: inspect the facade event surface and replay occurrences
// against the in-memory services.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;

use cellbridge_cli::exit_codes::{EXIT_CONFIG_INVALID, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};
use cellbridge_cli::{ReplayError, Script};
use cellbridge_config::Settings;
use cellbridge_engine::memory::MemoryServices;
use cellbridge_facade::FacadeHost;

#[derive(Parser)]
#[command(name = "cbridge")]
#[command(about = "Facade event tooling for spreadsheet UI extensions")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every event name the default extensions provide
    Events {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replay a JSON script of UI occurrences and print delivered events
    #[command(after_help = "\
Examples:
  cbridge replay clicks.json
  cbridge replay edit.json --json
  cbridge replay edit.json --settings strict.json")]
    Replay {
        /// Script file (JSON)
        script: PathBuf,

        /// Settings file; defaults to the user settings
        #[arg(long, env = "CELLBRIDGE_SETTINGS")]
        settings: Option<PathBuf>,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,

        /// Print only the summary line
        #[arg(long, short = 'q', conflicts_with = "json")]
        quiet: bool,
    },

    /// Print the effective settings as JSON
    Settings {
        /// Settings file; defaults to the user settings
        #[arg(long, env = "CELLBRIDGE_SETTINGS")]
        settings: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        None => {
            eprintln!("Usage: cbridge <command> [options]");
            eprintln!("       cbridge --help for more information");
            Ok(())
        }
        Some(Commands::Events { json }) => cmd_events(json),
        Some(Commands::Replay { script, settings, json, quiet }) => cmd_replay(script, settings, json, quiet),
        Some(Commands::Settings { settings }) => cmd_settings(settings),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CONFIG_INVALID, message: msg.into(), hint: None }
    }

    pub fn replay(err: ReplayError) -> Self {
        let hint = match &err {
            ReplayError::Setup(msg) if msg.contains("unknown event") => {
                Some("run `cbridge events` to list the supported names".to_string())
            }
            ReplayError::Step { .. } => Some("sheet names and cells must match the script's workbook".to_string()),
            _ => None,
        };
        Self { code: err.exit_code(), message: err.to_string(), hint }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

fn load_settings(path: Option<PathBuf>) -> Result<Settings, CliError> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::args(format!("settings file not found: {}", path.display())));
            }
            Settings::load_from(&path).map_err(|e| {
                CliError::config(e.to_string()).with_hint("settings are JSON; lines starting with // are ignored")
            })
        }
        None => Ok(Settings::load()),
    }
}

fn cmd_events(json: bool) -> Result<(), CliError> {
    let services = MemoryServices::new();
    let injector = services
        .injector(Settings::default())
        .map_err(|e| CliError::internal(e.to_string()))?;
    let host = FacadeHost::with_default_extensions(injector).map_err(|e| CliError::internal(e.to_string()))?;
    let events = host.supported_events();

    if json {
        let list: Vec<_> = events
            .iter()
            .map(|(name, kind)| json!({ "name": name.as_str(), "params": kind.as_str() }))
            .collect();
        let out = json!({ "extensions": host.extensions(), "events": list });
        println!("{}", serde_json::to_string_pretty(&out).map_err(|e| CliError::internal(e.to_string()))?);
    } else {
        let width = events.iter().map(|(name, _)| name.as_str().len()).max().unwrap_or(0);
        for (name, kind) in &events {
            println!("{:width$}  {}", name.as_str(), kind, width = width);
        }
    }
    Ok(())
}

fn cmd_replay(script: PathBuf, settings: Option<PathBuf>, json: bool, quiet: bool) -> Result<(), CliError> {
    if !script.exists() {
        return Err(CliError::args(format!("script not found: {}", script.display())));
    }
    let settings = load_settings(settings)?;
    let script = Script::load(&script).map_err(CliError::replay)?;
    let report = cellbridge_cli::run(&script, settings).map_err(CliError::replay)?;

    if json {
        let out = serde_json::to_string_pretty(&report).map_err(|e| CliError::internal(e.to_string()))?;
        println!("{}", out);
    } else if quiet {
        let text = report.render_text();
        if let Some(summary) = text.lines().last() {
            println!("{}", summary);
        }
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}

fn cmd_settings(settings: Option<PathBuf>) -> Result<(), CliError> {
    let settings = load_settings(settings)?;
    let out = serde_json::to_string_pretty(&settings).map_err(|e| CliError::internal(e.to_string()))?;
    println!("{}", out);
    Ok(())
}
