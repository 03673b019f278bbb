//! Configuration loading and path resolution.
//!
//! Supports HOSTMAN_HOME, HOSTMAN_SSH_CONFIG and HOSTMAN_ALIAS_FILE env
//! overrides for testing.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Paths for the hostman data store (the tool's own files, not the managed ones).
#[derive(Debug, Clone)]
pub struct HostmanPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
}

impl HostmanPaths {
    /// Build paths from a base directory (ProjectDirs data dir or HOSTMAN_HOME).
    pub fn from_base(base: PathBuf) -> Self {
        let config_file = base.join("config.toml");
        Self {
            config_dir: base,
            config_file,
        }
    }

    /// Paths for testing: use a temp dir as base.
    pub fn for_test(base: impl AsRef<Path>) -> Self {
        Self::from_base(base.as_ref().to_path_buf())
    }

    /// Get default hostman paths (respects HOSTMAN_HOME).
    pub fn default_paths() -> Self {
        let base = if let Ok(home) = std::env::var("HOSTMAN_HOME") {
            PathBuf::from(home)
        } else if let Some(dirs) = directories::ProjectDirs::from("com", "hostman", "hostman") {
            dirs.data_dir().to_path_buf()
        } else {
            PathBuf::from(".hostman")
        };
        Self::from_base(base)
    }
}

/// Stored defaults in config.toml. Flags override these at invocation time.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub default_domain: Option<String>,
    #[serde(default = "default_user")]
    pub default_user: String,
    #[serde(default = "default_port")]
    pub default_port: u16,
    /// Managed ssh config path override; unset means `~/.ssh/config`.
    #[serde(default)]
    pub ssh_config_file: Option<PathBuf>,
    /// Managed alias file path override; unset means `~/.c-aliases`.
    #[serde(default)]
    pub alias_file: Option<PathBuf>,
}

fn default_user() -> String {
    "admin".to_string()
}

fn default_port() -> u16 {
    22
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_domain: None,
            default_user: default_user(),
            default_port: default_port(),
            ssh_config_file: None,
            alias_file: None,
        }
    }
}

impl Config {
    /// Load config from paths (with shared lock when the file exists).
    pub fn load(paths: &HostmanPaths) -> Result<Config> {
        if paths.config_file.is_file() {
            let mut file = fs::OpenOptions::new()
                .read(true)
                .open(&paths.config_file)
                .with_context(|| format!("open {}", paths.config_file.display()))?;
            fs2::FileExt::lock_shared(&file)?;
            use std::io::Read;
            let mut s = String::new();
            file.read_to_string(&mut s)?;
            let cfg: Config = toml::from_str(&s)
                .with_context(|| format!("parse {}", paths.config_file.display()))?;
            Ok(cfg)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to paths (with exclusive lock). Creates parent dirs if needed.
    pub fn save(&self, paths: &HostmanPaths) -> Result<()> {
        if let Some(p) = paths.config_file.parent() {
            fs::create_dir_all(p)?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&paths.config_file)
            .with_context(|| format!("open {}", paths.config_file.display()))?;
        fs2::FileExt::lock_exclusive(&file)?;
        let s = toml::to_string_pretty(self)?;
        use std::io::Write;
        file.write_all(s.as_bytes())?;
        Ok(())
    }
}

/// Resolved paths of the two files hostman edits. These never take locks.
#[derive(Debug, Clone)]
pub struct ManagedFiles {
    pub ssh_config: PathBuf,
    pub aliases: PathBuf,
}

impl ManagedFiles {
    /// Resolve each path: env override > config override > home default.
    pub fn resolve(config: &Config) -> Result<Self> {
        let ssh_config = if let Ok(p) = std::env::var("HOSTMAN_SSH_CONFIG") {
            PathBuf::from(p)
        } else if let Some(p) = &config.ssh_config_file {
            p.clone()
        } else {
            home_dir()?.join(".ssh").join("config")
        };

        let aliases = if let Ok(p) = std::env::var("HOSTMAN_ALIAS_FILE") {
            PathBuf::from(p)
        } else if let Some(p) = &config.alias_file {
            p.clone()
        } else {
            home_dir()?.join(".c-aliases")
        };

        Ok(Self { ssh_config, aliases })
    }
}

fn home_dir() -> Result<PathBuf> {
    directories::UserDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .ok_or_else(|| anyhow::anyhow!("could not determine home directory"))
}
