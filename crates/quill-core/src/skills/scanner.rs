//! Skill package scanner - finds declaration files under a source root.
//!
//! A package is exactly `<root>/<dirname>/SKILL.md`: one directory level
//! below the root, no deeper. Symlinked directories are followed and hidden
//! directories are included.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Fixed name of the declaration file inside each package directory.
pub const DECLARATION_FILE: &str = "SKILL.md";

/// Scan one source root for skill packages.
///
/// Returns the declaration file paths in directory-listing order, which is
/// deterministic for a fixed filesystem state. A missing root yields an
/// empty set; any other I/O error is logged and also yields an empty set so
/// one bad root never aborts the others. Cancellation stops enumeration and
/// discards this root's partial results.
pub async fn scan_source(root: &Path, cancel: &CancellationToken) -> Vec<PathBuf> {
    let mut packages = Vec::new();

    let mut entries = match fs::read_dir(root).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Skills directory {} does not exist, skipping", root.display());
            return packages;
        }
        Err(e) => {
            warn!("Failed to read skills directory {}: {}", root.display(), e);
            return packages;
        }
    };

    loop {
        if cancel.is_cancelled() {
            debug!("Scan of {} cancelled", root.display());
            packages.clear();
            return packages;
        }

        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to list skills directory {}: {}", root.display(), e);
                packages.clear();
                return packages;
            }
        };

        let path = entry.path();

        // fs::metadata follows symlinks, so a symlinked package dir counts.
        let is_dir = match fs::metadata(&path).await {
            Ok(meta) => meta.is_dir(),
            Err(e) => {
                warn!("Failed to stat {}: {}", path.display(), e);
                continue;
            }
        };
        if !is_dir {
            continue;
        }

        let declaration = path.join(DECLARATION_FILE);
        match fs::metadata(&declaration).await {
            Ok(meta) if meta.is_file() => packages.push(declaration),
            _ => continue,
        }
    }

    packages
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::TempDir;

    fn create_package(root: &Path, name: &str) {
        let dir = root.join(name);
        std_fs::create_dir_all(&dir).unwrap();
        std_fs::write(
            dir.join(DECLARATION_FILE),
            format!("---\nname: {}\ndescription: test\n---\nBody.", name),
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_finds_packages_one_level_down() {
        let temp = TempDir::new().unwrap();
        create_package(temp.path(), "skill-a");
        create_package(temp.path(), "skill-b");

        let found = scan_source(temp.path(), &CancellationToken::new()).await;

        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|p| p.ends_with(DECLARATION_FILE)));
    }

    #[tokio::test]
    async fn test_ignores_deeper_nesting_and_stray_files() {
        let temp = TempDir::new().unwrap();
        create_package(temp.path(), "top-level");
        // Nested package two levels down must not be found.
        create_package(&temp.path().join("group"), "nested");
        // A SKILL.md directly in the root is not a package.
        std_fs::write(temp.path().join(DECLARATION_FILE), "---\n---\n").unwrap();

        let found = scan_source(temp.path(), &CancellationToken::new()).await;

        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("top-level/SKILL.md"));
    }

    #[tokio::test]
    async fn test_directory_without_declaration_skipped() {
        let temp = TempDir::new().unwrap();
        std_fs::create_dir_all(temp.path().join("empty-dir")).unwrap();
        create_package(temp.path(), "real-skill");

        let found = scan_source(temp.path(), &CancellationToken::new()).await;

        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_hidden_directories_included() {
        let temp = TempDir::new().unwrap();
        create_package(temp.path(), ".hidden-skill");

        let found = scan_source(temp.path(), &CancellationToken::new()).await;

        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_root_yields_empty() {
        let found = scan_source(Path::new("/nonexistent/skills"), &CancellationToken::new()).await;
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_scan_discards_results() {
        let temp = TempDir::new().unwrap();
        create_package(temp.path(), "skill-a");

        let cancel = CancellationToken::new();
        cancel.cancel();
        let found = scan_source(temp.path(), &cancel).await;

        assert!(found.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlinked_package_followed() {
        let temp = TempDir::new().unwrap();
        let real = temp.path().join("real");
        create_package(&real, "linked-skill");

        let root = temp.path().join("root");
        std_fs::create_dir_all(&root).unwrap();
        std::os::unix::fs::symlink(real.join("linked-skill"), root.join("linked-skill")).unwrap();

        let found = scan_source(&root, &CancellationToken::new()).await;

        assert_eq!(found.len(), 1);
    }
}
