//! Configuration loading and management
//!
//! Handles parsing of `taskdesk.toml` configuration files. The whole
//! configurable surface is file paths, the bind address, and the hard-coded
//! credentials and variant selection the deployments have always used.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::variant::Variant;

pub const CONFIG_FILE: &str = "taskdesk.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address the HTTP surface binds to
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Backing file locations
    #[serde(default)]
    pub files: FilesConfig,

    /// Login rules
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            files: FilesConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

/// Backing file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    /// Task table file (auto-created with the variant schema when absent)
    #[serde(default = "default_task_file")]
    pub tasks: PathBuf,

    /// User table file (must be provisioned externally)
    #[serde(default = "default_user_file")]
    pub users: PathBuf,
}

fn default_task_file() -> PathBuf {
    PathBuf::from("tasks.json")
}

fn default_user_file() -> PathBuf {
    PathBuf::from("users.json")
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            tasks: default_task_file(),
            users: default_user_file(),
        }
    }
}

/// Login configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Which deployment variant's rules apply
    #[serde(default = "default_variant")]
    pub variant: Variant,

    /// The one admin address recognized by variant A
    #[serde(default = "default_admin_email")]
    pub admin_email: String,

    /// Company domain suffix required by variant A logins
    #[serde(default = "default_domain")]
    pub domain: String,

    /// Shared static password (variant B) and lazy password default
    /// (variant C). Stored and compared in clear text, as the original
    /// deployments did.
    #[serde(default = "default_shared_password")]
    pub shared_password: String,
}

fn default_variant() -> Variant {
    Variant::A
}

fn default_admin_email() -> String {
    "admin@task.com".to_string()
}

fn default_domain() -> String {
    "@task.com".to_string()
}

fn default_shared_password() -> String {
    "task123".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            variant: default_variant(),
            admin_email: default_admin_email(),
            domain: default_domain(),
            shared_password: default_shared_password(),
        }
    }
}

impl Config {
    /// Load configuration from an explicit file path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `taskdesk.toml` from a data directory, or defaults when absent.
    /// Relative file paths in the config resolve against the directory.
    pub fn load_from_dir(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE);
        let mut config = if path.exists() {
            match Self::load(&path) {
                Ok(config) => config,
                Err(err) => {
                    tracing::warn!("ignoring unreadable {}: {}", path.display(), err);
                    Config::default()
                }
            }
        } else {
            Config::default()
        };
        config.files.tasks = resolve(dir, &config.files.tasks);
        config.files.users = resolve(dir, &config.files.users);
        config
    }
}

fn resolve(dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_config_missing() {
        let dir = TempDir::new().expect("tempdir");
        let config = Config::load_from_dir(dir.path());
        assert_eq!(config.auth.variant, Variant::A);
        assert_eq!(config.auth.admin_email, "admin@task.com");
        assert_eq!(config.files.tasks, dir.path().join("tasks.json"));
    }

    #[test]
    fn reads_file_and_resolves_paths() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"
bind = "0.0.0.0:9000"

[files]
tasks = "data/tasks.json"

[auth]
variant = "c"
shared_password = "letmein"
"#,
        )
        .expect("write config");

        let config = Config::load_from_dir(dir.path());
        assert_eq!(config.bind, "0.0.0.0:9000");
        assert_eq!(config.auth.variant, Variant::C);
        assert_eq!(config.auth.shared_password, "letmein");
        assert_eq!(config.files.tasks, dir.path().join("data/tasks.json"));
        // users path untouched by the file, still resolved against the dir
        assert_eq!(config.files.users, dir.path().join("users.json"));
    }
}
