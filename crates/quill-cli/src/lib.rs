//! CLI interface for the quill coding agent.
//!
//! Wires the configuration layer into the skill engine and exposes the
//! inspection commands. The dispatcher proper (interactive sessions,
//! argument parsing for registered commands) lives elsewhere; this front end
//! only exercises the loading and listing interfaces.

use anyhow::Result;
use clap::{Parser, Subcommand};
use quill_config::{global_skills_dir, Settings, Storage};
use quill_core::{
    list_skill_entries, load_skill_commands, CommandRegistry, LoadContext, TrustState,
};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quill", version, about = "A coding agent host")]
struct Cli {
    /// Project root (defaults to the current directory)
    #[arg(long, global = true)]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inspect skill packages
    Skills {
        #[command(subcommand)]
        action: SkillsAction,
    },
}

#[derive(Subcommand)]
enum SkillsAction {
    /// List discovered skills (best-effort, no schema validation)
    List {
        /// Emit the listing as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the strict loader and show the commands it would register
    Load,
}

pub async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let project_root = match cli.project {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load configuration, using defaults: {:#}", e);
            Settings::default()
        }
    };
    let ctx = load_context(&settings, &project_root);
    let cancel = CancellationToken::new();

    match cli.command {
        Command::Skills { action: SkillsAction::List { json } } => {
            let entries = list_skill_entries(&ctx, &cancel).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                println!("No skills found.");
            } else {
                for entry in &entries {
                    println!("{:<24} {} ({})", entry.name, entry.description, entry.origin);
                }
            }
        }
        Command::Skills { action: SkillsAction::Load } => {
            let mut registry = CommandRegistry::new();
            registry.register_all(load_skill_commands(&ctx, &cancel).await);
            if registry.is_empty() {
                println!("No skill commands loaded.");
            } else {
                for command in registry.commands() {
                    println!("{:<24} {}", command.name, command.description);
                }
            }
        }
    }

    Ok(())
}

/// Translate settings and storage into the loader's inputs.
///
/// Extension enumeration comes from the extension subsystem; the standalone
/// CLI runs without one, so no extension sources are contributed here.
fn load_context(settings: &Settings, project_root: &Path) -> LoadContext {
    LoadContext {
        trust: TrustState {
            enforced: settings.security.folder_trust_enabled,
            folder_trusted: settings.is_folder_trusted(project_root),
        },
        global_skills_dir: global_skills_dir(),
        project_skills_dir: Storage::new(project_root).skills_dir(),
        extensions: Vec::new(),
    }
}
