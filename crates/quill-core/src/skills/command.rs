//! Skill command synthesis.
//!
//! Turns a validated declaration plus its provenance into the unit the host
//! dispatcher registers: a named, described command whose invocation
//! produces a single prompt payload. All content is captured at synthesis
//! time; invoking a command touches neither filesystem nor network.

use super::source::SourceOrigin;
use super::validator::SkillDefinition;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Namespace prefix for externally visible skill command identifiers.
pub const COMMAND_PREFIX: &str = "skill:";

/// An invokable command synthesized from one skill package.
#[derive(Debug, Clone)]
pub struct SkillCommand {
    /// Externally visible identifier: `skill:` + declared name.
    pub name: String,
    /// Display description, provenance-tagged for extension skills.
    pub description: String,
    /// Where the package was loaded from.
    pub origin: SourceOrigin,
    /// The validated declaration behind this command.
    pub definition: SkillDefinition,
    /// Path to the declaration file the command was built from.
    pub path: PathBuf,
    body: String,
}

impl SkillCommand {
    /// Build a command from a validated declaration.
    ///
    /// `path` is the declaration file; when its parent directory name
    /// differs from the declared name a warning is emitted (copy-paste
    /// drift), but the package still loads.
    pub fn synthesize(
        definition: SkillDefinition,
        body: String,
        path: PathBuf,
        origin: SourceOrigin,
    ) -> Self {
        if let Some(dir_name) = package_dir_name(&path) {
            if dir_name != definition.name {
                warn!(
                    "Skill directory '{}' does not match declared name '{}' ({})",
                    dir_name,
                    definition.name,
                    path.display()
                );
            }
        }

        let description = match &origin {
            SourceOrigin::Extension { name, .. } => {
                format!("[{}] {}", name, definition.description)
            }
            _ => definition.description.clone(),
        };

        SkillCommand {
            name: format!("{}{}", COMMAND_PREFIX, definition.name),
            description,
            origin,
            path,
            body,
            definition,
        }
    }

    /// Identity of the owning extension, if any.
    pub fn extension_id(&self) -> Option<&str> {
        self.origin.extension_id()
    }

    /// Build the outbound prompt payload for one invocation.
    ///
    /// The package body is transcluded verbatim, never executed. The user's
    /// argument string is appended under its own delimited section unless it
    /// is empty after trimming.
    pub fn invoke(&self, args: &str) -> String {
        let mut payload = format!(
            "You are using the \"{}\" skill.\n\n## Skill Instructions\n\n{}\n",
            self.definition.name,
            self.body.trim()
        );

        let request = args.trim();
        if !request.is_empty() {
            payload.push_str(&format!("\n## User Request\n\n{}\n", request));
        }

        payload
    }
}

fn package_dir_name(declaration_path: &Path) -> Option<&str> {
    declaration_path.parent()?.file_name()?.to_str()
}
