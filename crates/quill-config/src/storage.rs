//! Storage path resolution.
//!
//! Global state lives under `~/.quill`; per-project state lives under
//! `<project root>/.quill`.

use std::path::{Path, PathBuf};

/// Default global state directory.
const GLOBAL_DIR: &str = "~/.quill";

/// Per-project state directory (relative to the project root).
const PROJECT_DIR: &str = ".quill";

/// Subdirectory holding skill packages.
const SKILLS_DIR: &str = "skills";

/// The user-wide skills directory (`~/.quill/skills`), tilde-expanded.
pub fn global_skills_dir() -> PathBuf {
    expand_tilde(GLOBAL_DIR).join(SKILLS_DIR)
}

/// Per-project storage paths, keyed by the project root.
#[derive(Debug, Clone)]
pub struct Storage {
    project_root: PathBuf,
}

impl Storage {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self { project_root: project_root.into() }
    }

    /// The project's state directory (`<root>/.quill`).
    pub fn project_dir(&self) -> PathBuf {
        self.project_root.join(PROJECT_DIR)
    }

    /// The project's skills directory (`<root>/.quill/skills`). Resolved
    /// independently of whether it exists on disk.
    pub fn skills_dir(&self) -> PathBuf {
        self.project_dir().join(SKILLS_DIR)
    }
}

/// Expand a leading tilde to the home directory.
fn expand_tilde(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_skills_dir_expanded() {
        let dir = global_skills_dir();
        assert!(!dir.to_string_lossy().starts_with('~'));
        assert!(dir.ends_with(".quill/skills"));
    }

    #[test]
    fn test_project_skills_dir() {
        let storage = Storage::new("/work/repo");
        assert_eq!(storage.skills_dir(), Path::new("/work/repo/.quill/skills"));
    }

    #[test]
    fn test_project_dir() {
        let storage = Storage::new("/work/repo");
        assert_eq!(storage.project_dir(), Path::new("/work/repo/.quill"));
    }
}
