//! Doctor command: consistency checks over the managed files.

use anyhow::Result;
use std::path::Path;

use crate::config::ManagedFiles;
use crate::inventory;

/// Result of a single check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub ok: bool,
    pub message: String,
}

/// Run all doctor checks.
pub fn run_checks(files: &ManagedFiles) -> Result<Vec<CheckResult>> {
    let mut results = Vec::new();

    let entries = inventory::scan_ssh_config(&files.ssh_config)?;
    let aliases = inventory::scan_aliases(&files.aliases)?;

    // 1. Managed files present (missing just means nothing was added yet)
    results.push(presence(&files.ssh_config, "ssh config", entries.len()));
    results.push(presence(&files.aliases, "alias file", aliases.len()));

    let entry_names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    let alias_names: Vec<&str> = aliases.iter().map(|a| a.name.as_str()).collect();

    // 2. Duplicate names within a file; a remove drops every match at once
    duplicates(&mut results, "ssh config", &entry_names);
    duplicates(&mut results, "alias file", &alias_names);

    // 3. Names contained in other names; substring matching treats the short
    //    one as present wherever the long one appears
    collisions(&mut results, "ssh config", &entry_names);
    collisions(&mut results, "alias file", &alias_names);

    // 4. Cross-file: an add writes both files, so a lone ssh entry lost its alias
    for &name in &entry_names {
        if !alias_names.contains(&name) {
            results.push(CheckResult {
                ok: false,
                message: format!(
                    "[{name}] ssh config entry has no alias. Run 'hostman -n {name}' to restore it."
                ),
            });
        }
    }
    for &name in &alias_names {
        if !entry_names.contains(&name) {
            results.push(CheckResult {
                ok: true,
                message: format!("[{name}] alias only (expected for telnet hosts)"),
            });
        }
    }

    Ok(results)
}

fn presence(path: &Path, label: &str, count: usize) -> CheckResult {
    if path.is_file() {
        CheckResult {
            ok: true,
            message: format!("{label}: {} ({count} entry(s))", path.display()),
        }
    } else {
        CheckResult {
            ok: true,
            message: format!("{label} not created yet: {}", path.display()),
        }
    }
}

fn duplicates(results: &mut Vec<CheckResult>, label: &str, names: &[&str]) {
    let mut seen: Vec<&str> = Vec::new();
    for &name in names {
        if seen.contains(&name) {
            continue;
        }
        seen.push(name);
        let count = names.iter().filter(|&&n| n == name).count();
        if count > 1 {
            results.push(CheckResult {
                ok: false,
                message: format!("[{name}] {count} entries in {label}; a remove drops them all"),
            });
        }
    }
}

fn collisions(results: &mut Vec<CheckResult>, label: &str, names: &[&str]) {
    let mut uniq: Vec<&str> = Vec::new();
    for &name in names {
        if !uniq.contains(&name) {
            uniq.push(name);
        }
    }
    for &a in &uniq {
        for &b in &uniq {
            if a != b && b.contains(a) {
                results.push(CheckResult {
                    ok: false,
                    message: format!(
                        "[{a}] name is contained in '{b}'; {label} operations on '{a}' also match '{b}'"
                    ),
                });
            }
        }
    }
}
