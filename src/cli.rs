//! CLI definitions and command routing.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, HostmanPaths, ManagedFiles};
use crate::doctor;
use crate::host::{self, Action, HostSpec};
use crate::inventory;

#[derive(Parser)]
#[command(name = "hostman")]
#[command(about = "Manage ssh config entries and connection aliases per host")]
pub struct Cli {
    /// Host name of the device to add or remove
    #[arg(short = 'n', long, value_name = "HOST")]
    pub hostname: Option<String>,

    /// Domain appended to the host name to form the full hostname
    #[arg(short, long, value_name = "DOMAIN")]
    pub domain: Option<String>,

    /// Enable the legacy diffie-hellman key exchange (old ssh servers)
    #[arg(short = 'D', long)]
    pub legacy_kex: bool,

    /// Port to connect on
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Remove the host's entries instead of adding them
    #[arg(short, long)]
    pub remove: bool,

    /// Connect with telnet instead of ssh (alias only, no ssh config entry)
    #[arg(short, long)]
    pub telnet: bool,

    /// User to connect with
    #[arg(short, long, value_name = "USER")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List managed entries (ssh config by default)
    List {
        /// List the alias file instead of the ssh config
        #[arg(long)]
        aliases: bool,
        /// Print JSON instead of tab-separated text
        #[arg(long)]
        json: bool,
    },

    /// Check the managed files for duplicates, name collisions and drift
    Doctor,

    /// View or change stored defaults (domain, user, port, file paths)
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}

/// Run CLI and dispatch to handlers.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = HostmanPaths::default_paths();

    match cli.command {
        Some(Commands::List { aliases, json }) => cmd_list(&paths, aliases, json),
        Some(Commands::Doctor) => cmd_doctor(&paths),
        Some(Commands::Config { key, value, list }) => cmd_config(&paths, key, value, list),
        None => match cli.hostname.clone() {
            Some(hostname) => cmd_apply(&paths, &cli, hostname),
            None => {
                println!("hostman - manage ssh config entries and connection aliases");
                println!("Use --help for usage information");
                Ok(())
            }
        },
    }
}

fn cmd_apply(paths: &HostmanPaths, cli: &Cli, hostname: String) -> Result<()> {
    let config = Config::load(paths)?;
    let files = ManagedFiles::resolve(&config)?;

    let spec = HostSpec {
        name: hostname,
        domain: cli.domain.clone().or_else(|| config.default_domain.clone()),
        user: cli
            .user
            .clone()
            .unwrap_or_else(|| config.default_user.clone()),
        port: cli.port.unwrap_or(config.default_port),
        legacy_kex: cli.legacy_kex,
        telnet: cli.telnet,
    };

    let actions = host::apply(&files, &spec, cli.remove)?;
    if actions.is_empty() {
        println!(
            "No changes: '{}' already present (use --remove to delete)",
            spec.name
        );
        return Ok(());
    }
    for action in &actions {
        match action {
            Action::AddedSshEntry => println!("Added ssh config entry: {}", spec.name),
            Action::RemovedSshEntry => println!("Removed ssh config entry: {}", spec.name),
            Action::AddedAlias => println!("Added alias: {}", spec.name),
            Action::RemovedAlias => println!("Removed alias: {}", spec.name),
        }
    }
    Ok(())
}

fn cmd_list(paths: &HostmanPaths, aliases: bool, json: bool) -> Result<()> {
    let config = Config::load(paths)?;
    let files = ManagedFiles::resolve(&config)?;

    if aliases {
        let entries = inventory::scan_aliases(&files.aliases)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&entries)?);
            return Ok(());
        }
        for a in &entries {
            println!("{}\t{}", a.name, a.command);
        }
        return Ok(());
    }

    let entries = inventory::scan_ssh_config(&files.ssh_config)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    for e in &entries {
        let hostname = e.hostname.as_deref().unwrap_or("-");
        let port = e.port.as_deref().unwrap_or("-");
        let user = e.user.as_deref().unwrap_or("-");
        let legacy = if e.legacy_kex { " (legacy-kex)" } else { "" };
        println!("{}\t{hostname}\t{port}\t{user}{legacy}", e.name);
    }
    Ok(())
}

fn cmd_doctor(paths: &HostmanPaths) -> Result<()> {
    let config = Config::load(paths)?;
    let files = ManagedFiles::resolve(&config)?;

    let results = doctor::run_checks(&files)?;
    for r in &results {
        let mark = if r.ok { "ok" } else { "!!" };
        println!("{mark} {}", r.message);
    }
    let problems = results.iter().filter(|r| !r.ok).count();
    if problems > 0 {
        anyhow::bail!("{problems} problem(s) found");
    }
    Ok(())
}

const CONFIG_KEYS: &str = "domain, user, port, ssh-config, alias-file";

fn cmd_config(
    paths: &HostmanPaths,
    key: Option<String>,
    value: Option<String>,
    list: bool,
) -> Result<()> {
    let mut config = Config::load(paths)?;

    if list {
        let files = ManagedFiles::resolve(&config)?;
        println!(
            "domain = {}",
            config.default_domain.as_deref().unwrap_or("(unset)")
        );
        println!("user = {}", config.default_user);
        println!("port = {}", config.default_port);
        println!("ssh-config = {}", files.ssh_config.display());
        println!("alias-file = {}", files.aliases.display());
        return Ok(());
    }

    let Some(key) = key else {
        println!("Usage: hostman config [--list | <key> [<value>]]");
        println!("Valid keys: {CONFIG_KEYS}");
        return Ok(());
    };

    match value {
        Some(v) => {
            match key.as_str() {
                "domain" => config.default_domain = Some(v.clone()),
                "user" => config.default_user = v.clone(),
                "port" => {
                    config.default_port =
                        v.parse().with_context(|| format!("invalid port '{v}'"))?
                }
                "ssh-config" => config.ssh_config_file = Some(PathBuf::from(&v)),
                "alias-file" => config.alias_file = Some(PathBuf::from(&v)),
                _ => anyhow::bail!("unknown config key '{key}' (valid: {CONFIG_KEYS})"),
            }
            config.save(paths)?;
            println!("Set {key} = {v}");
            Ok(())
        }
        None => {
            let files = ManagedFiles::resolve(&config)?;
            let val = match key.as_str() {
                "domain" => config.default_domain.clone().unwrap_or_default(),
                "user" => config.default_user.clone(),
                "port" => config.default_port.to_string(),
                "ssh-config" => files.ssh_config.display().to_string(),
                "alias-file" => files.aliases.display().to_string(),
                _ => anyhow::bail!("unknown config key '{key}' (valid: {CONFIG_KEYS})"),
            };
            println!("{val}");
            Ok(())
        }
    }
}
