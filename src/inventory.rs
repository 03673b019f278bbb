//! Read-side parsing of the managed files, for `list` and `doctor`.
//!
//! Values are captured verbatim; nothing here validates or repairs content.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// One parsed `Host` block from the ssh config file.
#[derive(Debug, Clone, Serialize)]
pub struct HostEntry {
    pub name: String,
    pub hostname: Option<String>,
    pub port: Option<String>,
    pub user: Option<String>,
    pub legacy_kex: bool,
}

/// One parsed `alias` line from the alias file.
#[derive(Debug, Clone, Serialize)]
pub struct AliasEntry {
    pub name: String,
    pub command: String,
}

/// Parse ssh config `Host` blocks. Missing file reads as empty.
pub fn scan_ssh_config(path: &Path) -> Result<Vec<HostEntry>> {
    if !path.is_file() {
        return Ok(Vec::new());
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;

    let mut entries = Vec::new();
    let mut current: Option<HostEntry> = None;
    for line in content.lines() {
        if let Some(rest) = line.strip_prefix("Host ") {
            if let Some(done) = current.take() {
                entries.push(done);
            }
            current = Some(HostEntry {
                name: rest.trim().to_string(),
                hostname: None,
                port: None,
                user: None,
                legacy_kex: false,
            });
            continue;
        }
        let Some(entry) = current.as_mut() else {
            continue;
        };
        let trimmed = line.trim();
        if let Some(v) = trimmed.strip_prefix("Hostname ") {
            entry.hostname = Some(v.trim().to_string());
        } else if let Some(v) = trimmed.strip_prefix("Port ") {
            entry.port = Some(v.trim().to_string());
        } else if let Some(v) = trimmed.strip_prefix("User ") {
            entry.user = Some(v.trim().to_string());
        } else if let Some(v) = trimmed.strip_prefix("KexAlgorithms ") {
            if v.contains("diffie-hellman-group1-sha1") {
                entry.legacy_kex = true;
            }
        }
    }
    if let Some(done) = current.take() {
        entries.push(done);
    }
    Ok(entries)
}

/// Parse `alias NAME="COMMAND"` lines. Missing file reads as empty.
pub fn scan_aliases(path: &Path) -> Result<Vec<AliasEntry>> {
    if !path.is_file() {
        return Ok(Vec::new());
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;

    let mut aliases = Vec::new();
    for line in content.lines() {
        let Some(rest) = line.trim().strip_prefix("alias ") else {
            continue;
        };
        let Some((name, command)) = rest.split_once('=') else {
            continue;
        };
        aliases.push(AliasEntry {
            name: name.trim().to_string(),
            command: command.trim().trim_matches('"').to_string(),
        });
    }
    Ok(aliases)
}
