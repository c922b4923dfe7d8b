//! User-level settings.

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Top-level settings for the quill host.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub security: SecuritySettings,
}

/// Folder-trust configuration.
///
/// When `folder_trust_enabled` is on, folder-sensitive features (skill
/// loading among them) only operate inside folders listed in
/// `trusted_folders` or their subfolders.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SecuritySettings {
    pub folder_trust_enabled: bool,
    /// Trusted folder prefixes. `~` is expanded to the home directory.
    pub trusted_folders: Vec<String>,
}

impl Settings {
    /// Load settings from `~/.quill/config.toml` (if present) overlaid with
    /// `QUILL_*` environment variables.
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(home) = dirs::home_dir() {
            builder = builder
                .add_source(File::from(home.join(".quill").join("config.toml")).required(false));
        }
        builder
            .add_source(Environment::with_prefix("QUILL").separator("__"))
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Parse settings from raw TOML, bypassing file and environment sources.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("Invalid configuration")
    }

    /// Whether `folder` falls under any trusted folder entry.
    pub fn is_folder_trusted(&self, folder: &Path) -> bool {
        self.security.trusted_folders.iter().any(|entry| {
            let expanded = shellexpand::tilde(entry);
            folder.starts_with(Path::new(expanded.as_ref()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(!settings.security.folder_trust_enabled);
        assert!(settings.security.trusted_folders.is_empty());
    }

    #[test]
    fn test_parse_from_toml() {
        let settings = Settings::from_toml_str(
            r#"
[security]
folder_trust_enabled = true
trusted_folders = ["/home/user/work"]
"#,
        )
        .unwrap();

        assert!(settings.security.folder_trust_enabled);
        assert_eq!(settings.security.trusted_folders, vec!["/home/user/work"]);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert!(!settings.security.folder_trust_enabled);
    }

    #[test]
    fn test_trusted_folder_prefix_match() {
        let settings = Settings::from_toml_str(
            r#"
[security]
trusted_folders = ["/home/user/work"]
"#,
        )
        .unwrap();

        assert!(settings.is_folder_trusted(&PathBuf::from("/home/user/work")));
        assert!(settings.is_folder_trusted(&PathBuf::from("/home/user/work/repo")));
        assert!(!settings.is_folder_trusted(&PathBuf::from("/home/user/other")));
        // Prefix match is per path component, not per byte.
        assert!(!settings.is_folder_trusted(&PathBuf::from("/home/user/workspace")));
    }

    #[test]
    fn test_tilde_expanded_in_trusted_folders() {
        let settings = Settings::from_toml_str(
            r#"
[security]
trusted_folders = ["~/projects"]
"#,
        )
        .unwrap();

        if let Some(home) = dirs::home_dir() {
            assert!(settings.is_folder_trusted(&home.join("projects").join("demo")));
        }
    }
}
