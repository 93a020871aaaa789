//! pacman.conf configuration
//!
//! This crate reads the INI dialect used by pacman-style package managers:
//! a primary file plus any number of recursively `Include`d files, folded
//! into a single [`PacmanConfig`].
//!
//! # Overview
//!
//! - [`token`]: classifies one line (comment, section, key)
//! - [`reader`]: line sources and the `Include` stack
//! - [`siglevel`]: signature level bitmask and its token algebra
//! - [`options`]: table of recognized `[options]` directives
//! - [`pacman`]: the configuration value and its defaults
//! - [`parser`]: assembles a configuration from a source
//! - [`finalize`]: architecture resolution, server templating, engine handles
//! - [`loader`]: locating and loading configuration files
//!
//! # Quick Start
//!
//! ```rust
//! use pacconf_config::{PacmanConfig, SigLevel};
//!
//! let conf: PacmanConfig = "[options]\nHoldPkg = pacman glibc\n\n[core]\nSigLevel = Required\n"
//!     .parse()
//!     .unwrap();
//!
//! assert_eq!(conf.hold_pkg, vec!["pacman", "glibc"]);
//! assert_eq!(conf.repos[0].sig_level, SigLevel::PACKAGE | SigLevel::DATABASE);
//! ```

pub mod error;
pub mod finalize;
pub mod loader;
pub mod options;
pub mod pacman;
pub mod parser;
pub mod reader;
pub mod siglevel;
pub mod system;
pub mod token;

pub use error::{ConfigError, Result};
pub use finalize::{template_server, Engine, SyncSource, SystemInfo, ARCH_AUTO};
pub use loader::{ConfigLoader, SYSTEM_CONFIG_PATH};
pub use options::{ConfigOptions, OptionKind};
pub use pacman::{PacmanConfig, Repository};
pub use parser::{parse_config, parse_file, Parser};
pub use siglevel::{Directive, SigLevel, Target};
pub use system::{FixedArch, Uname};
pub use token::Token;
