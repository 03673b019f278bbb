//! Per-host reconciliation across the ssh config and alias files.

use anyhow::Result;

use crate::config::ManagedFiles;
use crate::entry::{self, AliasLine, AliasTarget, FileKind, HostBlock};

/// Resolved parameters for one invocation, flags already merged with defaults.
#[derive(Debug, Clone)]
pub struct HostSpec {
    pub name: String,
    pub domain: Option<String>,
    pub user: String,
    pub port: u16,
    pub legacy_kex: bool,
    pub telnet: bool,
}

/// What `apply` did, in file order, for the CLI to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddedSshEntry,
    RemovedSshEntry,
    AddedAlias,
    RemovedAlias,
}

/// Apply one host's add/remove intent to both managed files.
///
/// Per file: an existing entry is only removed when `remove` is set. An absent
/// one is appended, unconditionally for the alias file, and for the ssh config
/// only outside telnet mode. A remove request for an absent host falls through
/// to the append branch.
pub fn apply(files: &ManagedFiles, spec: &HostSpec, remove: bool) -> Result<Vec<Action>> {
    let mut actions = Vec::new();

    if entry::entry_exists(&spec.name, &files.ssh_config)? {
        if remove {
            entry::remove_entry(&spec.name, FileKind::SshConfig, &files.ssh_config)?;
            actions.push(Action::RemovedSshEntry);
        }
    } else if !spec.telnet {
        let block = HostBlock {
            host: spec.name.clone(),
            domain: require_domain(spec)?.to_string(),
            user: spec.user.clone(),
            port: spec.port,
            legacy_kex: spec.legacy_kex,
        };
        entry::append_host_block(&block, &files.ssh_config)?;
        actions.push(Action::AddedSshEntry);
    }

    if entry::entry_exists(&spec.name, &files.aliases)? {
        if remove {
            entry::remove_entry(&spec.name, FileKind::Aliases, &files.aliases)?;
            actions.push(Action::RemovedAlias);
        }
    } else {
        let target = if spec.telnet {
            AliasTarget::Telnet {
                domain: require_domain(spec)?.to_string(),
            }
        } else {
            AliasTarget::Ssh
        };
        let alias = AliasLine {
            host: spec.name.clone(),
            target,
        };
        entry::append_alias_line(&alias, &files.aliases)?;
        actions.push(Action::AddedAlias);
    }

    Ok(actions)
}

fn require_domain(spec: &HostSpec) -> Result<&str> {
    spec.domain.as_deref().ok_or_else(|| {
        anyhow::anyhow!(
            "no domain configured for '{}'; pass --domain or run 'hostman config domain <name>'",
            spec.name
        )
    })
}
