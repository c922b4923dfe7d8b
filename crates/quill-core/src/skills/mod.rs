//! Skill package support for quill.
//!
//! Skills are packages of instructions that give the agent new capabilities.
//! Each skill is a directory containing a `SKILL.md` file with:
//! - A flat key:value metadata header between `---` delimiter lines
//! - A free-text body with detailed instructions
//!
//! # Directory Structure
//!
//! ```text
//! skill-name/
//! └── SKILL.md          # Required: metadata header + instructions
//! ```
//!
//! # Discovery
//!
//! Skills are discovered from ranked source roots, in registration order:
//! 1. Global: `~/.quill/skills/`
//! 2. Project: `<project>/.quill/skills/`
//! 3. Extensions: `<install path>/skills/` for each active extension,
//!    sorted by extension name
//!
//! Each valid package becomes a `SkillCommand` named `skill:<name>` that the
//! host dispatcher can register. Invoking a command combines the package's
//! instructions with the caller's argument string into a single prompt
//! payload; nothing from the package is ever executed as code.
//!
//! # Header format
//!
//! The metadata header is deliberately not YAML. It is a flat, single-pass
//! key:value parser: one scalar per line, `#` comments and blank lines
//! skipped, values optionally wrapped in one pair of single or double
//! quotes. The only nesting understood is a `metadata:` section whose
//! indented `key: value` lines populate a string-to-string map. Lists,
//! block scalars, and escape sequences are not interpreted; such content
//! comes through verbatim as a trimmed string.

mod command;
mod error;
mod loader;
mod parser;
mod scanner;
mod source;
mod validator;

pub use command::{SkillCommand, COMMAND_PREFIX};
pub use error::SkillError;
pub use loader::{
    list_skill_entries, load_skill_commands, CommandRegistry, LoadContext, SkillListing,
    TrustState,
};
pub use parser::{parse_header, split_frontmatter, ParsedHeader};
pub use scanner::{scan_source, DECLARATION_FILE};
pub use source::{resolve_sources, ExtensionInfo, SkillSource, SourceOrigin};
pub use validator::{validate_header, FieldError, SkillDefinition};
