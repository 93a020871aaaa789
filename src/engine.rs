//! In-memory package engine
//!
//! Records what a configuration would register with a real package engine,
//! without touching any database.

use config::{Engine, SigLevel, SyncSource};
use serde_json::json;
use thiserror::Error;

/// Registration errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DryRunError {
    #[error("root directory is empty")]
    EmptyRoot,

    #[error("repository name is empty")]
    EmptyName,

    #[error("repository {0} is already registered")]
    Duplicate(String),
}

/// A registered repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DryRunSource {
    pub name: String,
    pub sig_level: SigLevel,
    pub servers: Vec<String>,
}

impl SyncSource for DryRunSource {
    fn set_servers(&mut self, servers: Vec<String>) {
        self.servers = servers;
    }
}

/// Engine that only records registrations
#[derive(Debug, Clone, Default)]
pub struct DryRunEngine {
    pub root: String,
    pub db_path: String,
    pub sources: Vec<DryRunSource>,
}

impl Engine for DryRunEngine {
    type Source = DryRunSource;
    type Error = DryRunError;

    fn init(root: &str, db_path: &str) -> Result<Self, DryRunError> {
        if root.is_empty() {
            return Err(DryRunError::EmptyRoot);
        }
        Ok(Self {
            root: root.to_string(),
            db_path: db_path.to_string(),
            sources: Vec::new(),
        })
    }

    fn register_sync_source(
        &mut self,
        name: &str,
        sig_level: SigLevel,
    ) -> Result<&mut DryRunSource, DryRunError> {
        if name.is_empty() {
            return Err(DryRunError::EmptyName);
        }
        if self.sources.iter().any(|s| s.name == name) {
            return Err(DryRunError::Duplicate(name.to_string()));
        }

        let index = self.sources.len();
        self.sources.push(DryRunSource {
            name: name.to_string(),
            sig_level,
            servers: Vec::new(),
        });
        Ok(&mut self.sources[index])
    }
}

impl DryRunEngine {
    /// Human-readable summary
    pub fn summary(&self) -> String {
        let mut out = format!("Root: {}\nDatabase: {}\n", self.root, self.db_path);
        for source in &self.sources {
            out.push_str(&format!("\n[{}]\n", source.name));
            let tokens = source.sig_level.to_tokens();
            if tokens.is_empty() {
                out.push_str("  SigLevel: (default)\n");
            } else {
                out.push_str(&format!("  SigLevel: {}\n", tokens.join(" ")));
            }
            for server in &source.servers {
                out.push_str(&format!("  Server: {}\n", server));
            }
        }
        out
    }

    /// JSON summary
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "root": self.root,
            "db_path": self.db_path,
            "repos": self.sources.iter().map(|s| json!({
                "name": s.name,
                "sig_level": s.sig_level.to_tokens(),
                "servers": s.servers,
            })).collect::<Vec<_>>(),
        })
    }
}
