//! Skill loading orchestration.
//!
//! One load call fans out over the resolved sources, scans each
//! concurrently, and runs every package through read -> parse -> validate ->
//! synthesize in isolation: a malformed package is logged and dropped
//! without disturbing its siblings or other sources. The returned commands
//! preserve source order (all of source *i* before source *i+1*), which is
//! what gives the registry its shadowing semantics.

use super::command::SkillCommand;
use super::error::SkillError;
use super::parser::parse_header;
use super::scanner::scan_source;
use super::source::{resolve_sources, ExtensionInfo, SkillSource, SourceOrigin};
use super::validator::validate_header;
use futures_util::future::join_all;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::fs;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// The host's folder-trust verdict for the current project.
#[derive(Debug, Clone, Copy)]
pub struct TrustState {
    /// Whether folder-trust enforcement is enabled at all.
    pub enforced: bool,
    /// Whether the current folder is trusted.
    pub folder_trusted: bool,
}

impl TrustState {
    /// Whether skill loading is allowed. Untrusted folders only block
    /// loading when enforcement is on; this is a policy gate, not an error.
    pub fn allows_loading(&self) -> bool {
        !self.enforced || self.folder_trusted
    }
}

/// Inputs for one skill load cycle. Recomputed by the caller per load; the
/// loader caches nothing across calls.
#[derive(Debug, Clone)]
pub struct LoadContext {
    pub trust: TrustState,
    pub global_skills_dir: PathBuf,
    pub project_skills_dir: PathBuf,
    pub extensions: Vec<ExtensionInfo>,
}

/// Load all skill commands from the resolved sources.
///
/// Returns only the packages that survived the full pipeline; every
/// per-package and per-source failure is logged and recovered locally, so a
/// load with some bad packages still succeeds with the good ones and a load
/// with none returns an empty list. Cancellation is honored at every I/O
/// boundary and is never reported as an error.
pub async fn load_skill_commands(
    ctx: &LoadContext,
    cancel: &CancellationToken,
) -> Vec<SkillCommand> {
    if !ctx.trust.allows_loading() {
        debug!("Current folder is untrusted, skipping skill loading");
        return Vec::new();
    }

    let sources = resolve_sources(
        ctx.global_skills_dir.clone(),
        ctx.project_skills_dir.clone(),
        &ctx.extensions,
    );

    // Sources are scanned concurrently; join_all keeps their order.
    let per_source = join_all(
        sources
            .into_iter()
            .map(|source| load_from_source(source, cancel.clone())),
    )
    .await;

    let commands: Vec<SkillCommand> = per_source.into_iter().flatten().collect();
    debug!("Loaded {} skill commands", commands.len());
    commands
}

async fn load_from_source(source: SkillSource, cancel: CancellationToken) -> Vec<SkillCommand> {
    let packages = scan_source(&source.path, &cancel).await;

    let loaded = join_all(packages.into_iter().map(|path| {
        let origin = source.origin.clone();
        let cancel = cancel.clone();
        async move { load_package(path, origin, &cancel).await }
    }))
    .await;

    // The per-package isolation boundary: failures are logged and dropped
    // here, cancellation is dropped without a log.
    loaded
        .into_iter()
        .filter_map(|result| match result {
            Ok(command) => Some(command),
            Err(SkillError::Cancelled) => None,
            Err(e) => {
                warn!("Skipping skill package: {}", e);
                None
            }
        })
        .collect()
}

/// Run one package through read -> parse -> validate -> synthesize.
async fn load_package(
    path: PathBuf,
    origin: SourceOrigin,
    cancel: &CancellationToken,
) -> Result<SkillCommand, SkillError> {
    if cancel.is_cancelled() {
        return Err(SkillError::Cancelled);
    }

    let content = fs::read_to_string(&path)
        .await
        .map_err(|source| SkillError::Io { path: path.clone(), source })?;

    if cancel.is_cancelled() {
        return Err(SkillError::Cancelled);
    }

    let header =
        parse_header(&content).ok_or_else(|| SkillError::NotADeclaration { path: path.clone() })?;

    let definition = validate_header(&header)
        .map_err(|errors| SkillError::Validation { path: path.clone(), errors })?;

    Ok(SkillCommand::synthesize(definition, header.body, path, origin))
}

/// Dispatcher-boundary registration with last-registered-wins shadowing.
///
/// Combined with the loader's source order (global, project, extensions by
/// name) this means a project skill overrides a same-named global one, and
/// an extension skill overrides both. Shadowing is logged, never an error.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, SkillCommand>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one command, replacing any earlier one with the same name.
    pub fn register(&mut self, command: SkillCommand) {
        let name = command.name.clone();
        let path = command.path.clone();
        if let Some(previous) = self.commands.insert(name, command) {
            debug!(
                "Command '{}' from {} shadowed by {}",
                previous.name,
                previous.path.display(),
                path.display()
            );
        }
    }

    /// Register commands in order; later entries win name conflicts.
    pub fn register_all(&mut self, commands: impl IntoIterator<Item = SkillCommand>) {
        for command in commands {
            self.register(command);
        }
    }

    pub fn get(&self, name: &str) -> Option<&SkillCommand> {
        self.commands.get(name)
    }

    /// All registered commands, sorted by name for deterministic listings.
    pub fn commands(&self) -> Vec<&SkillCommand> {
        let mut commands: Vec<&SkillCommand> = self.commands.values().collect();
        commands.sort_by(|a, b| a.name.cmp(&b.name));
        commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// One entry of the human-inspection listing.
#[derive(Debug, Clone, Serialize)]
pub struct SkillListing {
    pub name: String,
    pub description: String,
    pub origin: SourceOrigin,
}

/// Best-effort listing of discovered skills.
///
/// Performs the same two-phase parse as the strict loader but extracts only
/// name and description, and silently skips files that lack a declaration
/// header or either field. Deliberately independent of the strict pipeline:
/// this is for human inspection, not for registration.
pub async fn list_skill_entries(
    ctx: &LoadContext,
    cancel: &CancellationToken,
) -> Vec<SkillListing> {
    if !ctx.trust.allows_loading() {
        return Vec::new();
    }

    let sources = resolve_sources(
        ctx.global_skills_dir.clone(),
        ctx.project_skills_dir.clone(),
        &ctx.extensions,
    );

    let mut entries = Vec::new();
    for source in sources {
        for path in scan_source(&source.path, cancel).await {
            if cancel.is_cancelled() {
                return entries;
            }
            let Ok(content) = fs::read_to_string(&path).await else {
                continue;
            };
            let Some(header) = parse_header(&content) else {
                continue;
            };
            let name = header.fields.get("name").map(|s| s.trim()).unwrap_or_default();
            let description =
                header.fields.get("description").map(|s| s.trim()).unwrap_or_default();
            if name.is_empty() || description.is_empty() {
                continue;
            }
            entries.push(SkillListing {
                name: name.to_string(),
                description: description.to_string(),
                origin: source.origin.clone(),
            });
        }
    }
    entries
}
