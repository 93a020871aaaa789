//! pacman.conf parser
//!
//! Drives the tokenizer over the [`ReaderStack`] and applies each directive to
//! a [`PacmanConfig`] that starts out at its defaults:
//!
//! - `[options]` (and anything before the first header) holds global options
//! - any other section starts a new [`Repository`]
//! - `Include = path` continues from another file, in any section
//!
//! The first error aborts the parse.

use crate::options::{lookup, OptionKind};
use crate::reader::{ConfReader, ReaderStack};
use crate::token::Token;
use crate::{ConfigError, PacmanConfig, Repository, Result, SigLevel};
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Default limit on nested `Include` directives
pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 32;

/// Section that holds global options
const OPTIONS_SECTION: &str = "options";

/// Configurable parser
#[derive(Debug, Clone)]
pub struct Parser {
    max_include_depth: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Self {
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }
}

/// Where key directives currently go
enum Scope {
    Options,
    Repo(usize),
}

impl Parser {
    /// Create a parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how deeply `Include` directives may nest
    pub fn max_include_depth(mut self, depth: usize) -> Self {
        self.max_include_depth = depth;
        self
    }

    /// Parse a configuration from `reader`; `label` names it in log output.
    pub fn parse<'a, R: Read + 'a>(&self, reader: R, label: &str) -> Result<PacmanConfig> {
        self.parse_from(ConfReader::new(reader, label))
    }

    /// Parse a configuration file
    pub fn parse_file(&self, path: &Path) -> Result<PacmanConfig> {
        let reader = ConfReader::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
            _ => ConfigError::Io(e),
        })?;
        self.parse_from(reader)
    }

    fn parse_from(&self, primary: ConfReader<'_>) -> Result<PacmanConfig> {
        let mut conf = PacmanConfig::default();
        let mut stack = ReaderStack::new(primary);
        let mut scope = Scope::Options;

        loop {
            let token = match stack.next_token()? {
                Some(token) => token,
                None if stack.pop() => continue,
                None => return Ok(conf),
            };
            let line = stack.active().line();

            match token {
                Token::Comment => {}
                Token::Section(name) => {
                    tracing::debug!("Entering section [{}] at line {}", name, line);
                    scope = if name == OPTIONS_SECTION {
                        Scope::Options
                    } else {
                        conf.repos.push(Repository::new(name));
                        Scope::Repo(conf.repos.len() - 1)
                    };
                }
                Token::Key { name, values } if name == "Include" => {
                    let path = values.first().ok_or(ConfigError::MissingInclude { line })?;
                    if stack.depth() >= self.max_include_depth {
                        return Err(ConfigError::IncludeDepth {
                            line,
                            depth: self.max_include_depth,
                        });
                    }
                    stack.include(Path::new(path))?;
                }
                Token::Key { name, values } => match scope {
                    Scope::Options => apply_option(&mut conf, &name, values, line)?,
                    Scope::Repo(index) => apply_repo(&mut conf.repos[index], &name, values, line)?,
                },
            }
        }
    }
}

/// Apply a directive found outside repository sections.
fn apply_option(
    conf: &mut PacmanConfig,
    name: &str,
    values: Vec<String>,
    line: usize,
) -> Result<()> {
    let kind = lookup(name).ok_or_else(|| ConfigError::UnknownOption {
        line,
        name: name.to_string(),
    })?;

    match kind {
        OptionKind::Flag(flag) => conf.options |= flag,
        OptionKind::Scalar(field) => *field.get_mut(conf) = values.join(" "),
        OptionKind::List(field) => field.get_mut(conf).extend(values),
        OptionKind::SigLevel(field) => {
            let level = SigLevel::resolve(SigLevel::USE_DEFAULT, &values).map_err(|e| {
                ConfigError::InvalidValue {
                    line,
                    source: Box::new(e),
                }
            })?;
            *field.get_mut(conf) = level;
        }
    }
    Ok(())
}

/// Apply a directive inside a repository section.
fn apply_repo(repo: &mut Repository, name: &str, values: Vec<String>, line: usize) -> Result<()> {
    match name {
        "SigLevel" => {
            repo.sig_level = SigLevel::resolve(SigLevel::USE_DEFAULT, &values).map_err(|e| {
                ConfigError::RepoSigLevel {
                    repo: repo.name.clone(),
                    source: Box::new(e),
                }
            })?;
        }
        "Server" => repo.servers.extend(values),
        "Usage" => {
            tracing::debug!("Ignoring Usage for [{}] at line {}", repo.name, line);
        }
        _ => {
            return Err(ConfigError::OutsideOptions {
                line,
                name: name.to_string(),
            })
        }
    }
    Ok(())
}

/// Parse a configuration with default parser settings
pub fn parse_config<'a, R: Read + 'a>(reader: R) -> Result<PacmanConfig> {
    Parser::new().parse(reader, "<input>")
}

/// Parse a configuration file with default parser settings
pub fn parse_file(path: &Path) -> Result<PacmanConfig> {
    Parser::new().parse_file(path)
}

impl FromStr for PacmanConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        parse_config(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigOptions;

    #[test]
    fn test_scalar_last_write_wins() {
        let conf: PacmanConfig = "[options]\nLogFile = /a.log\nLogFile = /b.log\n".parse().unwrap();
        assert_eq!(conf.log_file, "/b.log");
    }

    #[test]
    fn test_scalar_joins_values() {
        let conf: PacmanConfig = "[options]\nXferCommand = /usr/bin/curl  -C - -f %u\n"
            .parse()
            .unwrap();
        assert_eq!(conf.xfer_command, "/usr/bin/curl -C - -f %u");
    }

    #[test]
    fn test_list_accumulates() {
        let conf: PacmanConfig = "[options]\nIgnorePkg = a b\nIgnorePkg = b c\n".parse().unwrap();
        assert_eq!(conf.ignore_pkg, vec!["a", "b", "b", "c"]);
    }

    #[test]
    fn test_boolean_flags() {
        let conf: PacmanConfig = "[options]\nColor\nVerbosePkgLists\n".parse().unwrap();
        assert_eq!(
            conf.options,
            ConfigOptions::COLOR | ConfigOptions::VERBOSE_PKG_LISTS
        );
    }

    #[test]
    fn test_keys_before_first_section_are_options() {
        let conf: PacmanConfig = "DBPath = /tmp/db\nCheckSpace\n".parse().unwrap();
        assert_eq!(conf.db_path, "/tmp/db");
        assert!(conf.has_option(ConfigOptions::CHECK_SPACE));
        assert!(conf.repos.is_empty());
    }

    #[test]
    fn test_unknown_option() {
        let err = "[options]\n\nNotARealOption = x\n".parse::<PacmanConfig>().unwrap_err();
        match err {
            ConfigError::UnknownOption { line, name } => {
                assert_eq!(line, 3);
                assert_eq!(name, "NotARealOption");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_option_outside_options_section() {
        let err = "[core]\nCacheDir = /tmp\n".parse::<PacmanConfig>().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutsideOptions { line: 2, ref name } if name == "CacheDir"
        ));
    }

    #[test]
    fn test_repo_directives() {
        let conf: PacmanConfig = "[core]\nServer = a b\nUsage = Sync Search\nServer = c\n\
             [options]\nColor\n[extra]\nSigLevel = PackageRequired\n"
            .parse()
            .unwrap();
        assert_eq!(conf.repos.len(), 2);
        assert_eq!(conf.repos[0].name, "core");
        assert_eq!(conf.repos[0].servers, vec!["a", "b", "c"]);
        assert_eq!(conf.repos[0].sig_level, SigLevel::USE_DEFAULT);
        assert_eq!(conf.repos[1].sig_level, SigLevel::PACKAGE);
        assert!(conf.has_option(ConfigOptions::COLOR));
    }

    #[test]
    fn test_duplicate_repo_sections_are_kept() {
        let conf: PacmanConfig = "[core]\n[core]\n".parse().unwrap();
        assert_eq!(conf.repos.len(), 2);
    }

    #[test]
    fn test_invalid_repo_siglevel() {
        let err = "[core]\nSigLevel = Sometimes\n".parse::<PacmanConfig>().unwrap_err();
        match err {
            ConfigError::RepoSigLevel { repo, source } => {
                assert_eq!(repo, "core");
                assert!(matches!(*source, ConfigError::InvalidSigLevel(ref t) if t == "Sometimes"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_global_siglevel() {
        let err = "[options]\nLocalFileSigLevel = Optional Maybe\n"
            .parse::<PacmanConfig>()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { line: 2, .. }));
    }

    #[test]
    fn test_section_errors_abort() {
        let err = "[options]\n[core]extra\n".parse::<PacmanConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::TrailingCharacters { line: 2, .. }));
        let err = "[core\n".parse::<PacmanConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::MissingBracket { line: 1 }));
    }

    #[test]
    fn test_include_without_path() {
        let err = "[options]\nInclude\n".parse::<PacmanConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::MissingInclude { line: 2 }));
    }

    #[test]
    fn test_include_depth_zero_rejects_include() {
        let err = Parser::new()
            .max_include_depth(0)
            .parse("[core]\nInclude = /etc/pacman.d/mirrorlist\n".as_bytes(), "main")
            .unwrap_err();
        assert!(matches!(err, ConfigError::IncludeDepth { line: 2, depth: 0 }));
    }

    #[test]
    fn test_latin1_comment_does_not_abort() {
        let bytes: &[u8] = b"[options]\n# Caf\xe9 mirror list\nColor\n";
        let conf = parse_config(bytes).unwrap();
        assert_eq!(conf.options, ConfigOptions::COLOR);
    }

    #[test]
    fn test_empty_input_yields_defaults() {
        let conf: PacmanConfig = "".parse().unwrap();
        assert_eq!(conf, PacmanConfig::default());
    }
}
