//! Skill source resolution - the ranked filesystem locations to scan.
//!
//! Sources are resolved fresh on every load (no caching) and carry the
//! provenance used later for description tagging and shadowing decisions.

use serde::Serialize;
use std::path::PathBuf;

/// Subdirectory of an extension install that may hold skill packages.
const EXTENSION_SKILLS_DIR: &str = "skills";

/// Provenance of a skill source directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceOrigin {
    /// The user-wide skills directory.
    Global,
    /// The current project's skills directory.
    Project,
    /// A skills directory shipped by an installed extension.
    Extension {
        /// Display name of the owning extension.
        name: String,
        /// Stable identity of the owning extension.
        id: String,
    },
}

impl SourceOrigin {
    /// Identity of the owning extension, if this origin is an extension.
    pub fn extension_id(&self) -> Option<&str> {
        match self {
            SourceOrigin::Extension { id, .. } => Some(id),
            _ => None,
        }
    }
}

impl std::fmt::Display for SourceOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceOrigin::Global => write!(f, "global"),
            SourceOrigin::Project => write!(f, "project"),
            SourceOrigin::Extension { name, .. } => write!(f, "extension:{}", name),
        }
    }
}

/// One ranked location to scan for skill packages.
#[derive(Debug, Clone)]
pub struct SkillSource {
    /// Directory expected to contain `<name>/SKILL.md` packages.
    /// May not exist on disk; the scanner treats that as empty.
    pub path: PathBuf,
    /// Where this source came from.
    pub origin: SourceOrigin,
}

/// An active-extensions enumerator entry, as reported by the extension
/// subsystem. Only `active` entries contribute a skill source.
#[derive(Debug, Clone)]
pub struct ExtensionInfo {
    /// Display name of the extension.
    pub name: String,
    /// Stable identity of the extension.
    pub id: String,
    /// Root of the extension's install on disk.
    pub install_path: PathBuf,
    /// Whether the extension is currently enabled.
    pub active: bool,
}

/// Resolve the ordered list of skill sources.
///
/// Order is fixed: global, then project, then one source per active
/// extension. Extension sources are sorted by extension name so discovery
/// order (and therefore name-conflict behavior) is deterministic.
///
/// Pure function of its inputs; nothing here touches the filesystem.
pub fn resolve_sources(
    global_skills_dir: PathBuf,
    project_skills_dir: PathBuf,
    extensions: &[ExtensionInfo],
) -> Vec<SkillSource> {
    let mut sources = vec![
        SkillSource { path: global_skills_dir, origin: SourceOrigin::Global },
        SkillSource { path: project_skills_dir, origin: SourceOrigin::Project },
    ];

    let mut active: Vec<&ExtensionInfo> = extensions.iter().filter(|e| e.active).collect();
    active.sort_by(|a, b| a.name.cmp(&b.name));

    for ext in active {
        sources.push(SkillSource {
            path: ext.install_path.join(EXTENSION_SKILLS_DIR),
            origin: SourceOrigin::Extension { name: ext.name.clone(), id: ext.id.clone() },
        });
    }

    sources
}
