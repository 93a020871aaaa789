//! Post-parse finalization
//!
//! Turns a parsed [`PacmanConfig`] into a package engine handle: resolves the
//! `auto` architecture, registers every repository as a sync source and hands
//! it the server list with `$repo` and `$arch` substituted.

use crate::{ConfigError, PacmanConfig, Repository, Result, SigLevel};
use std::io;

/// Architecture value replaced by the host architecture
pub const ARCH_AUTO: &str = "auto";

/// Source of host system facts
pub trait SystemInfo {
    /// Machine hardware name, e.g. `x86_64`
    fn architecture(&self) -> io::Result<String>;
}

/// A repository registered with a package engine
pub trait SyncSource {
    fn set_servers(&mut self, servers: Vec<String>);
}

/// Package engine a configuration is applied to
pub trait Engine: Sized {
    type Source: SyncSource;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Open a handle for `root` using the database at `db_path`
    fn init(root: &str, db_path: &str) -> std::result::Result<Self, Self::Error>;

    /// Register a sync repository
    fn register_sync_source(
        &mut self,
        name: &str,
        sig_level: SigLevel,
    ) -> std::result::Result<&mut Self::Source, Self::Error>;
}

/// Substitute `$repo` and then `$arch` in a server URL template.
pub fn template_server(url: &str, repo: &str, arch: &str) -> String {
    url.replace("$repo", repo).replace("$arch", arch)
}

impl Repository {
    /// Server URLs with placeholders substituted
    pub fn expanded_servers(&self, arch: &str) -> Vec<String> {
        self.servers
            .iter()
            .map(|url| template_server(url, &self.name, arch))
            .collect()
    }
}

impl PacmanConfig {
    /// Replace an `auto` architecture with the host architecture.
    pub fn resolve_architecture<S: SystemInfo>(&mut self, system: &S) -> Result<()> {
        if self.architecture == ARCH_AUTO {
            self.architecture = system.architecture().map_err(ConfigError::Architecture)?;
            tracing::info!("Resolved architecture 'auto' to {}", self.architecture);
        }
        Ok(())
    }

    /// Build an engine handle from this configuration.
    ///
    /// A repository the engine refuses to register is skipped; its server
    /// list is left untemplated. Registered repositories get their servers
    /// templated both here and in the engine.
    pub fn create_handle<E: Engine, S: SystemInfo>(&mut self, system: &S) -> Result<E> {
        let mut engine =
            E::init(&self.root_dir, &self.db_path).map_err(|e| ConfigError::Engine(Box::new(e)))?;

        self.resolve_architecture(system)?;

        let arch = self.architecture.as_str();
        for repo in &mut self.repos {
            match engine.register_sync_source(&repo.name, repo.sig_level) {
                Ok(source) => {
                    let servers = repo.expanded_servers(arch);
                    repo.servers = servers.clone();
                    source.set_servers(servers);
                }
                Err(e) => {
                    tracing::warn!("Skipping repository {}: {}", repo.name, e);
                }
            }
        }

        Ok(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedArch;
    use std::fmt;

    #[derive(Debug)]
    struct Refused(String);

    impl fmt::Display for Refused {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "refused {}", self.0)
        }
    }

    impl std::error::Error for Refused {}

    #[derive(Debug, Default)]
    struct Recorded {
        name: String,
        sig_level: SigLevel,
        servers: Vec<String>,
    }

    impl SyncSource for Recorded {
        fn set_servers(&mut self, servers: Vec<String>) {
            self.servers = servers;
        }
    }

    #[derive(Debug, Default)]
    struct TestEngine {
        root: String,
        sources: Vec<Recorded>,
    }

    impl Engine for TestEngine {
        type Source = Recorded;
        type Error = Refused;

        fn init(root: &str, _db_path: &str) -> std::result::Result<Self, Refused> {
            if root.is_empty() {
                return Err(Refused("empty root".to_string()));
            }
            Ok(Self {
                root: root.to_string(),
                sources: Vec::new(),
            })
        }

        fn register_sync_source(
            &mut self,
            name: &str,
            sig_level: SigLevel,
        ) -> std::result::Result<&mut Recorded, Refused> {
            if name == "broken" {
                return Err(Refused(name.to_string()));
            }
            self.sources.push(Recorded {
                name: name.to_string(),
                sig_level,
                servers: Vec::new(),
            });
            Ok(self.sources.last_mut().unwrap())
        }
    }

    struct NoArch;

    impl SystemInfo for NoArch {
        fn architecture(&self) -> io::Result<String> {
            Err(io::Error::new(io::ErrorKind::Other, "uname failed"))
        }
    }

    fn config() -> PacmanConfig {
        let mut conf = PacmanConfig::default();
        conf.architecture = "auto".to_string();
        let mut core = Repository::new("core");
        core.sig_level = SigLevel::PACKAGE;
        core.servers = vec![
            "ftp://ftp.example.com/$repo/os/$arch/".to_string(),
            "https://$repo.example.com/$arch/$repo".to_string(),
        ];
        let mut broken = Repository::new("broken");
        broken.servers = vec!["http://example.com/$repo".to_string()];
        conf.repos = vec![core, broken];
        conf
    }

    #[test]
    fn test_template_server() {
        assert_eq!(
            template_server("http://m/$repo/os/$arch/$repo", "extra", "x86_64"),
            "http://m/extra/os/x86_64/extra"
        );
        assert_eq!(template_server("file:///srv/pkgs", "custom", "x86_64"), "file:///srv/pkgs");
    }

    #[test]
    fn test_create_handle_templates_registered_repos() {
        let mut conf = config();
        let engine: TestEngine = conf
            .create_handle(&FixedArch("x86_64".to_string()))
            .unwrap();

        assert_eq!(engine.root, "/");
        assert_eq!(conf.architecture, "x86_64");
        assert_eq!(engine.sources.len(), 1);
        assert_eq!(engine.sources[0].name, "core");
        assert_eq!(engine.sources[0].sig_level, SigLevel::PACKAGE);
        assert_eq!(
            engine.sources[0].servers,
            vec![
                "ftp://ftp.example.com/core/os/x86_64/",
                "https://core.example.com/x86_64/core",
            ]
        );
        assert_eq!(conf.repos[0].servers, engine.sources[0].servers);
        assert_eq!(conf.repos[1].servers, vec!["http://example.com/$repo"]);
    }

    #[test]
    fn test_explicit_architecture_is_kept() {
        let mut conf = config();
        conf.architecture = "i686".to_string();
        let engine: TestEngine = conf.create_handle(&NoArch).unwrap();
        assert_eq!(engine.sources[0].servers[0], "ftp://ftp.example.com/core/os/i686/");
    }

    #[test]
    fn test_auto_architecture_failure() {
        let mut conf = config();
        let err = conf.create_handle::<TestEngine, _>(&NoArch).unwrap_err();
        assert!(matches!(err, ConfigError::Architecture(_)));
    }

    #[test]
    fn test_engine_init_failure() {
        let mut conf = config();
        conf.root_dir = String::new();
        let err = conf
            .create_handle::<TestEngine, _>(&FixedArch("x86_64".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Engine(_)));
    }
}
