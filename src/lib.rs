//! Hostman - ssh config entries and connection aliases, managed per host.

pub mod cli;
pub mod config;
pub mod doctor;
pub mod entry;
pub mod host;
pub mod inventory;
