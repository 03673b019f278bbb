//! Line-oriented add/remove of host entries in the managed files.
//!
//! Matching is plain substring containment: a name that occurs inside another
//! entry's name (or any other line) matches that line too. Writes take no
//! cross-process locks; concurrent invocations against the same file may race.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Format of a managed file, which decides how far a removal extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Multi-line `Host` blocks (ssh client config).
    SshConfig,
    /// One `alias` line per host.
    Aliases,
}

/// Boundary token that ends a deletion region in ssh config format.
/// The trailing space keeps `Hostname` lines inside the region.
const BLOCK_BOUNDARY: &str = "Host ";

/// An ssh config block to append for one host.
#[derive(Debug, Clone)]
pub struct HostBlock {
    pub host: String,
    pub domain: String,
    pub user: String,
    pub port: u16,
    pub legacy_kex: bool,
}

impl HostBlock {
    /// Render the block exactly as written to the file, trailing blank line included.
    pub fn render(&self) -> String {
        let mut block = format!("Host {}\n", self.host);
        block.push_str(&format!("  Hostname {}.{}\n", self.host, self.domain));
        block.push_str(&format!("  Port {}\n", self.port));
        block.push_str(&format!("  User {}\n", self.user));
        if self.legacy_kex {
            block.push_str("  KexAlgorithms +diffie-hellman-group1-sha1\n");
        }
        block.push('\n');
        block
    }
}

/// What an alias resolves to when invoked.
#[derive(Debug, Clone)]
pub enum AliasTarget {
    /// `ssh <host>`, with connection details taken from the ssh config entry.
    Ssh,
    /// `telnet <host>.<domain>`, for hosts with no ssh config entry.
    Telnet { domain: String },
}

/// A shell alias line to append for one host.
#[derive(Debug, Clone)]
pub struct AliasLine {
    pub host: String,
    pub target: AliasTarget,
}

impl AliasLine {
    pub fn render(&self) -> String {
        match &self.target {
            AliasTarget::Ssh => format!("alias {0}=\"ssh {0}\"\n", self.host),
            AliasTarget::Telnet { domain } => {
                format!("alias {0}=\"telnet {0}.{1}\"\n", self.host, domain)
            }
        }
    }
}

/// Check whether any line of `path` contains `token`.
///
/// A missing file reads as "not present", not as an error.
pub fn entry_exists(token: &str, path: &Path) -> Result<bool> {
    if !path.is_file() {
        return Ok(false);
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Ok(content.lines().any(|line| line.contains(token)))
}

/// Append a host block to the ssh config file, creating the file if needed.
///
/// Caller-supplied strings are written verbatim; nothing is escaped or
/// validated. Parent directories are not created.
pub fn append_host_block(block: &HostBlock, path: &Path) -> Result<()> {
    append(path, &block.render())
}

/// Append one alias line to the alias file, creating the file if needed.
pub fn append_alias_line(alias: &AliasLine, path: &Path) -> Result<()> {
    append(path, &alias.render())
}

fn append(path: &Path, text: &str) -> Result<()> {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open {} for append", path.display()))?;
    file.write_all(text.as_bytes())
        .with_context(|| format!("append to {}", path.display()))?;
    Ok(())
}

/// Remove every entry matching `token` by rewriting the file without it.
///
/// A line containing `token` is dropped and arms deletion. While armed, ssh
/// config format drops lines until one containing `"Host "` shows up (that
/// line is kept); alias format drops nothing further, so exactly the matching
/// line goes. A region still armed at end of input drops the rest of the file.
/// Retained lines are written back in order, each newline-terminated.
pub fn remove_entry(token: &str, kind: FileKind, path: &Path) -> Result<()> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;

    let mut kept = String::new();
    let mut deleting = false;
    for line in content.lines() {
        if line.contains(token) {
            deleting = true;
            continue;
        }
        if deleting && kind == FileKind::SshConfig && !line.contains(BLOCK_BOUNDARY) {
            continue;
        }
        kept.push_str(line);
        kept.push('\n');
        deleting = false;
    }

    fs::write(path, kept).with_context(|| format!("rewrite {}", path.display()))?;
    Ok(())
}
