//! Configuration management for the quill coding agent.
//!
//! Settings come from `~/.quill/config.toml` overlaid with `QUILL_*`
//! environment variables. Storage paths (global and per-project state
//! directories) are resolved here so the rest of the workspace never
//! hard-codes them.

mod settings;
mod storage;

pub use settings::{SecuritySettings, Settings};
pub use storage::{global_skills_dir, Storage};
