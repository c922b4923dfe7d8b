//! Core engine for the quill coding agent.
//!
//! The main subsystem here is `skills`: discovery of skill packages across
//! ranked filesystem locations and synthesis of invokable commands from them.

pub mod skills;

pub use skills::{
    list_skill_entries, load_skill_commands, CommandRegistry, ExtensionInfo, FieldError,
    LoadContext, SkillCommand, SkillDefinition, SkillError, SkillListing, SkillSource,
    SourceOrigin, TrustState, COMMAND_PREFIX, DECLARATION_FILE,
};
