//! Option table for the `[options]` section
//!
//! Every recognized global directive is listed in [`OPTION_TABLE`] together
//! with the kind of field it writes. Looking a name up is a table scan; a
//! miss is an unknown option.

use crate::{PacmanConfig, SigLevel};
use serde::Serialize;

bitflags::bitflags! {
    /// Boolean `[options]` directives
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct ConfigOptions: u32 {
        const USE_SYSLOG        = 1 << 0;
        const COLOR             = 1 << 1;
        const SHOW_SIZE         = 1 << 2;
        const USE_DELTA         = 1 << 3;
        const TOTAL_DOWNLOAD    = 1 << 4;
        const CHECK_SPACE       = 1 << 5;
        const VERBOSE_PKG_LISTS = 1 << 6;
        const I_LOVE_CANDY      = 1 << 7;
    }
}

/// Single-valued string options; the last assignment wins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarField {
    RootDir,
    DbPath,
    GpgDir,
    LogFile,
    Architecture,
    XferCommand,
    CleanMethod,
}

impl ScalarField {
    pub const ALL: [ScalarField; 7] = [
        ScalarField::RootDir,
        ScalarField::DbPath,
        ScalarField::GpgDir,
        ScalarField::LogFile,
        ScalarField::Architecture,
        ScalarField::XferCommand,
        ScalarField::CleanMethod,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScalarField::RootDir => "RootDir",
            ScalarField::DbPath => "DBPath",
            ScalarField::GpgDir => "GPGDir",
            ScalarField::LogFile => "LogFile",
            ScalarField::Architecture => "Architecture",
            ScalarField::XferCommand => "XferCommand",
            ScalarField::CleanMethod => "CleanMethod",
        }
    }

    pub fn get<'a>(&self, conf: &'a PacmanConfig) -> &'a String {
        match self {
            ScalarField::RootDir => &conf.root_dir,
            ScalarField::DbPath => &conf.db_path,
            ScalarField::GpgDir => &conf.gpg_dir,
            ScalarField::LogFile => &conf.log_file,
            ScalarField::Architecture => &conf.architecture,
            ScalarField::XferCommand => &conf.xfer_command,
            ScalarField::CleanMethod => &conf.clean_method,
        }
    }

    pub fn get_mut<'a>(&self, conf: &'a mut PacmanConfig) -> &'a mut String {
        match self {
            ScalarField::RootDir => &mut conf.root_dir,
            ScalarField::DbPath => &mut conf.db_path,
            ScalarField::GpgDir => &mut conf.gpg_dir,
            ScalarField::LogFile => &mut conf.log_file,
            ScalarField::Architecture => &mut conf.architecture,
            ScalarField::XferCommand => &mut conf.xfer_command,
            ScalarField::CleanMethod => &mut conf.clean_method,
        }
    }
}

/// Multi-valued options; assignments accumulate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListField {
    CacheDir,
    HoldPkg,
    SyncFirst,
    IgnoreGroup,
    IgnorePkg,
    NoExtract,
    NoUpgrade,
}

impl ListField {
    pub const ALL: [ListField; 7] = [
        ListField::CacheDir,
        ListField::HoldPkg,
        ListField::SyncFirst,
        ListField::IgnoreGroup,
        ListField::IgnorePkg,
        ListField::NoExtract,
        ListField::NoUpgrade,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ListField::CacheDir => "CacheDir",
            ListField::HoldPkg => "HoldPkg",
            ListField::SyncFirst => "SyncFirst",
            ListField::IgnoreGroup => "IgnoreGroup",
            ListField::IgnorePkg => "IgnorePkg",
            ListField::NoExtract => "NoExtract",
            ListField::NoUpgrade => "NoUpgrade",
        }
    }

    pub fn get<'a>(&self, conf: &'a PacmanConfig) -> &'a Vec<String> {
        match self {
            ListField::CacheDir => &conf.cache_dir,
            ListField::HoldPkg => &conf.hold_pkg,
            ListField::SyncFirst => &conf.sync_first,
            ListField::IgnoreGroup => &conf.ignore_group,
            ListField::IgnorePkg => &conf.ignore_pkg,
            ListField::NoExtract => &conf.no_extract,
            ListField::NoUpgrade => &conf.no_upgrade,
        }
    }

    pub fn get_mut<'a>(&self, conf: &'a mut PacmanConfig) -> &'a mut Vec<String> {
        match self {
            ListField::CacheDir => &mut conf.cache_dir,
            ListField::HoldPkg => &mut conf.hold_pkg,
            ListField::SyncFirst => &mut conf.sync_first,
            ListField::IgnoreGroup => &mut conf.ignore_group,
            ListField::IgnorePkg => &mut conf.ignore_pkg,
            ListField::NoExtract => &mut conf.no_extract,
            ListField::NoUpgrade => &mut conf.no_upgrade,
        }
    }
}

/// Global signature level options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigLevelField {
    SigLevel,
    LocalFileSigLevel,
    RemoteFileSigLevel,
}

impl SigLevelField {
    pub const ALL: [SigLevelField; 3] = [
        SigLevelField::SigLevel,
        SigLevelField::LocalFileSigLevel,
        SigLevelField::RemoteFileSigLevel,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SigLevelField::SigLevel => "SigLevel",
            SigLevelField::LocalFileSigLevel => "LocalFileSigLevel",
            SigLevelField::RemoteFileSigLevel => "RemoteFileSigLevel",
        }
    }

    pub fn get(&self, conf: &PacmanConfig) -> SigLevel {
        match self {
            SigLevelField::SigLevel => conf.sig_level,
            SigLevelField::LocalFileSigLevel => conf.local_file_sig_level,
            SigLevelField::RemoteFileSigLevel => conf.remote_file_sig_level,
        }
    }

    pub fn get_mut<'a>(&self, conf: &'a mut PacmanConfig) -> &'a mut SigLevel {
        match self {
            SigLevelField::SigLevel => &mut conf.sig_level,
            SigLevelField::LocalFileSigLevel => &mut conf.local_file_sig_level,
            SigLevelField::RemoteFileSigLevel => &mut conf.remote_file_sig_level,
        }
    }
}

/// What a global directive writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Flag(ConfigOptions),
    Scalar(ScalarField),
    List(ListField),
    SigLevel(SigLevelField),
}

/// Boolean directives, in the order they are rendered
pub const FLAG_TABLE: &[(&str, ConfigOptions)] = &[
    ("UseSyslog", ConfigOptions::USE_SYSLOG),
    ("Color", ConfigOptions::COLOR),
    ("ShowSize", ConfigOptions::SHOW_SIZE),
    ("UseDelta", ConfigOptions::USE_DELTA),
    ("TotalDownload", ConfigOptions::TOTAL_DOWNLOAD),
    ("CheckSpace", ConfigOptions::CHECK_SPACE),
    ("VerbosePkgLists", ConfigOptions::VERBOSE_PKG_LISTS),
    ("ILoveCandy", ConfigOptions::I_LOVE_CANDY),
];

/// Every directive accepted in `[options]`, except `Include`
pub const OPTION_TABLE: &[(&str, OptionKind)] = &[
    ("UseSyslog", OptionKind::Flag(ConfigOptions::USE_SYSLOG)),
    ("Color", OptionKind::Flag(ConfigOptions::COLOR)),
    ("ShowSize", OptionKind::Flag(ConfigOptions::SHOW_SIZE)),
    ("UseDelta", OptionKind::Flag(ConfigOptions::USE_DELTA)),
    ("TotalDownload", OptionKind::Flag(ConfigOptions::TOTAL_DOWNLOAD)),
    ("CheckSpace", OptionKind::Flag(ConfigOptions::CHECK_SPACE)),
    ("VerbosePkgLists", OptionKind::Flag(ConfigOptions::VERBOSE_PKG_LISTS)),
    ("ILoveCandy", OptionKind::Flag(ConfigOptions::I_LOVE_CANDY)),
    ("RootDir", OptionKind::Scalar(ScalarField::RootDir)),
    ("DBPath", OptionKind::Scalar(ScalarField::DbPath)),
    ("GPGDir", OptionKind::Scalar(ScalarField::GpgDir)),
    ("LogFile", OptionKind::Scalar(ScalarField::LogFile)),
    ("Architecture", OptionKind::Scalar(ScalarField::Architecture)),
    ("XferCommand", OptionKind::Scalar(ScalarField::XferCommand)),
    ("CleanMethod", OptionKind::Scalar(ScalarField::CleanMethod)),
    ("CacheDir", OptionKind::List(ListField::CacheDir)),
    ("HoldPkg", OptionKind::List(ListField::HoldPkg)),
    ("SyncFirst", OptionKind::List(ListField::SyncFirst)),
    ("IgnoreGroup", OptionKind::List(ListField::IgnoreGroup)),
    ("IgnorePkg", OptionKind::List(ListField::IgnorePkg)),
    ("NoExtract", OptionKind::List(ListField::NoExtract)),
    ("NoUpgrade", OptionKind::List(ListField::NoUpgrade)),
    ("SigLevel", OptionKind::SigLevel(SigLevelField::SigLevel)),
    ("LocalFileSigLevel", OptionKind::SigLevel(SigLevelField::LocalFileSigLevel)),
    ("RemoteFileSigLevel", OptionKind::SigLevel(SigLevelField::RemoteFileSigLevel)),
];

/// Find the field a global directive name refers to.
pub fn lookup(name: &str) -> Option<OptionKind> {
    OPTION_TABLE
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, kind)| *kind)
}
