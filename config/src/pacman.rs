//! pacman.conf data model
//!
//! [`PacmanConfig`] is the value assembled by the parser: global options from
//! `[options]` plus one [`Repository`] per other section, in file order.

use crate::options::{ListField, ScalarField, SigLevelField, FLAG_TABLE};
use crate::{ConfigOptions, SigLevel};
use serde::Serialize;

/// Default root directory
pub const DEFAULT_ROOT_DIR: &str = "/";

/// Default package database directory
pub const DEFAULT_DB_PATH: &str = "/var/lib/pacman";

/// Parsed pacman.conf
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PacmanConfig {
    // === Multi-valued options ===
    pub cache_dir: Vec<String>,
    pub hold_pkg: Vec<String>,
    pub sync_first: Vec<String>,
    pub ignore_group: Vec<String>,
    pub ignore_pkg: Vec<String>,
    pub no_extract: Vec<String>,
    pub no_upgrade: Vec<String>,

    // === Single-valued options ===
    pub root_dir: String,
    pub db_path: String,
    pub gpg_dir: String,
    pub log_file: String,
    /// Target architecture; `auto` is replaced at finalization
    pub architecture: String,
    pub xfer_command: String,
    pub clean_method: String,

    // === Signature levels ===
    pub sig_level: SigLevel,
    pub local_file_sig_level: SigLevel,
    pub remote_file_sig_level: SigLevel,

    /// Boolean directives
    pub options: ConfigOptions,

    /// Repository sections, in file order
    pub repos: Vec<Repository>,
}

impl Default for PacmanConfig {
    fn default() -> Self {
        Self {
            cache_dir: Vec::new(),
            hold_pkg: Vec::new(),
            sync_first: Vec::new(),
            ignore_group: Vec::new(),
            ignore_pkg: Vec::new(),
            no_extract: Vec::new(),
            no_upgrade: Vec::new(),

            root_dir: DEFAULT_ROOT_DIR.to_string(),
            db_path: DEFAULT_DB_PATH.to_string(),
            gpg_dir: String::new(),
            log_file: String::new(),
            architecture: String::new(),
            xfer_command: String::new(),
            clean_method: String::new(),

            sig_level: SigLevel::empty(),
            local_file_sig_level: SigLevel::USE_DEFAULT,
            remote_file_sig_level: SigLevel::USE_DEFAULT,

            options: ConfigOptions::empty(),

            repos: Vec::new(),
        }
    }
}

impl PacmanConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a repository by name
    pub fn repo(&self, name: &str) -> Option<&Repository> {
        self.repos.iter().find(|r| r.name == name)
    }

    /// Check whether a boolean directive is set
    pub fn has_option(&self, option: ConfigOptions) -> bool {
        self.options.contains(option)
    }

    /// Render the configuration in pacman.conf syntax.
    ///
    /// Parsing the output yields a configuration equal to `self`, provided
    /// no value contains runs of spaces (values are re-split on spaces).
    pub fn to_conf_string(&self) -> String {
        let mut out = String::from("[options]\n");

        for field in ScalarField::ALL {
            out.push_str(&format!("{} = {}\n", field.name(), field.get(self)));
        }

        for field in ListField::ALL {
            let values = field.get(self);
            if !values.is_empty() {
                out.push_str(&format!("{} = {}\n", field.name(), values.join(" ")));
            }
        }

        for (name, flag) in FLAG_TABLE {
            if self.options.contains(*flag) {
                out.push_str(&format!("{}\n", name));
            }
        }

        for field in SigLevelField::ALL {
            out.push_str(&format!(
                "{} = {}\n",
                field.name(),
                field.get(self).to_tokens().join(" ")
            ));
        }

        for repo in &self.repos {
            out.push('\n');
            out.push_str(&repo.to_conf_string());
        }

        out
    }
}

/// A repository section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
    /// Section name
    pub name: String,
    /// Signature level; [`SigLevel::USE_DEFAULT`] inherits the global one
    pub sig_level: SigLevel,
    /// Server URL templates (`$repo` and `$arch` placeholders)
    pub servers: Vec<String>,
}

impl Repository {
    /// Create a repository that inherits the global signature level
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sig_level: SigLevel::USE_DEFAULT,
            servers: Vec::new(),
        }
    }

    /// Render this section in pacman.conf syntax
    pub fn to_conf_string(&self) -> String {
        let mut out = format!("[{}]\n", self.name);
        if self.sig_level != SigLevel::USE_DEFAULT {
            out.push_str(&format!("SigLevel = {}\n", self.sig_level.to_tokens().join(" ")));
        }
        for server in &self.servers {
            out.push_str(&format!("Server = {}\n", server));
        }
        out
    }
}
