//! Signature verification levels
//!
//! A signature level is a bitmask with one group of four bits for package
//! signatures and one for database signatures, plus the [`SigLevel::USE_DEFAULT`]
//! sentinel. Directives such as `SigLevel = Required DatabaseOptional` are
//! folded left to right into a mask by [`SigLevel::resolve`].

use crate::{ConfigError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

bitflags::bitflags! {
    /// Signature verification policy
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct SigLevel: u32 {
        /// Package signatures are checked
        const PACKAGE             = 1 << 0;
        /// A missing package signature is accepted
        const PACKAGE_OPTIONAL    = 1 << 1;
        /// Package keys of marginal trust are accepted
        const PACKAGE_MARGINAL_OK = 1 << 2;
        /// Package keys of unknown trust are accepted
        const PACKAGE_UNKNOWN_OK  = 1 << 3;

        const DATABASE             = 1 << 10;
        const DATABASE_OPTIONAL    = 1 << 11;
        const DATABASE_MARGINAL_OK = 1 << 12;
        const DATABASE_UNKNOWN_OK  = 1 << 13;

        /// Inherit the global policy
        const USE_DEFAULT = 1 << 30;
    }
}

/// Which bit group a directive applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Package,
    Database,
    Both,
}

impl Target {
    /// Strip a `Package` or `Database` prefix from a token.
    pub fn split(token: &str) -> (Target, &str) {
        if let Some(rest) = token.strip_prefix("Package") {
            (Target::Package, rest)
        } else if let Some(rest) = token.strip_prefix("Database") {
            (Target::Database, rest)
        } else {
            (Target::Both, token)
        }
    }

    fn pick(self, package: SigLevel, database: SigLevel) -> SigLevel {
        match self {
            Target::Package => package,
            Target::Database => database,
            Target::Both => package | database,
        }
    }

    /// The "signature checked" bit(s) of this target
    pub fn required(self) -> SigLevel {
        self.pick(SigLevel::PACKAGE, SigLevel::DATABASE)
    }

    /// The "signature optional" bit(s) of this target
    pub fn optional(self) -> SigLevel {
        self.pick(SigLevel::PACKAGE_OPTIONAL, SigLevel::DATABASE_OPTIONAL)
    }

    /// The marginal and unknown trust bits of this target
    pub fn trust(self) -> SigLevel {
        self.pick(
            SigLevel::PACKAGE_MARGINAL_OK | SigLevel::PACKAGE_UNKNOWN_OK,
            SigLevel::DATABASE_MARGINAL_OK | SigLevel::DATABASE_UNKNOWN_OK,
        )
    }

    fn prefix(self) -> &'static str {
        match self {
            Target::Package => "Package",
            Target::Database => "Database",
            Target::Both => "",
        }
    }
}

/// One signature level directive, without its target prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Never,
    Optional,
    Required,
    TrustedOnly,
    TrustAll,
}

impl Directive {
    pub fn as_str(&self) -> &'static str {
        match self {
            Directive::Never => "Never",
            Directive::Optional => "Optional",
            Directive::Required => "Required",
            Directive::TrustedOnly => "TrustedOnly",
            Directive::TrustAll => "TrustAll",
        }
    }
}

impl FromStr for Directive {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Never" => Ok(Directive::Never),
            "Optional" => Ok(Directive::Optional),
            "Required" => Ok(Directive::Required),
            "TrustedOnly" => Ok(Directive::TrustedOnly),
            "TrustAll" => Ok(Directive::TrustAll),
            _ => Err(ConfigError::InvalidSigLevel(s.to_string())),
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SigLevel {
    /// Apply one directive to `target`, leaving the other group untouched.
    ///
    /// The sentinel bit is not touched here; [`SigLevel::resolve`] clears it.
    pub fn apply(self, target: Target, directive: Directive) -> SigLevel {
        match directive {
            Directive::Never => self - target.required(),
            Directive::Optional => self | target.required() | target.optional(),
            Directive::Required => (self | target.required()) - target.optional(),
            Directive::TrustedOnly => self - target.trust(),
            Directive::TrustAll => self | target.trust(),
        }
    }

    /// Fold `tokens` into `base` in order.
    ///
    /// Any unrecognized token fails the whole resolution. An empty token
    /// list returns `base` unchanged.
    pub fn resolve<S: AsRef<str>>(base: SigLevel, tokens: &[S]) -> Result<SigLevel> {
        let mut level = base;
        for token in tokens {
            let token = token.as_ref();
            level.remove(SigLevel::USE_DEFAULT);
            let (target, rest) = Target::split(token);
            let directive = rest
                .parse::<Directive>()
                .map_err(|_| ConfigError::InvalidSigLevel(token.to_string()))?;
            level = level.apply(target, directive);
        }
        Ok(level)
    }

    /// Tokens that [`SigLevel::resolve`] turns back into this mask when
    /// starting from [`SigLevel::USE_DEFAULT`].
    ///
    /// The sentinel alone renders as no tokens at all. Trust bit pairs that
    /// no directive can produce (only one of marginal/unknown set) render as
    /// `TrustedOnly`.
    pub fn to_tokens(self) -> Vec<String> {
        if self.contains(SigLevel::USE_DEFAULT) {
            return Vec::new();
        }

        let package = self.scope_tokens(Target::Package);
        let database = self.scope_tokens(Target::Database);

        if package == database {
            return package.iter().map(|d| d.to_string()).collect();
        }

        let mut tokens = Vec::new();
        for (target, directives) in [(Target::Package, package), (Target::Database, database)] {
            for directive in directives {
                tokens.push(format!("{}{}", target.prefix(), directive));
            }
        }
        tokens
    }

    fn scope_tokens(self, target: Target) -> Vec<Directive> {
        let mut directives = Vec::with_capacity(3);
        let required = self.contains(target.required());
        let optional = self.contains(target.optional());

        match (required, optional) {
            (true, true) => directives.push(Directive::Optional),
            (true, false) => directives.push(Directive::Required),
            (false, true) => {
                directives.push(Directive::Optional);
                directives.push(Directive::Never);
            }
            (false, false) => directives.push(Directive::Never),
        }

        if self.contains(target.trust()) {
            directives.push(Directive::TrustAll);
        } else {
            directives.push(Directive::TrustedOnly);
        }
        directives
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(tokens: &[&str]) -> SigLevel {
        SigLevel::resolve(SigLevel::USE_DEFAULT, tokens).unwrap()
    }

    #[test]
    fn test_required_database_optional() {
        assert_eq!(
            resolve(&["Required", "DatabaseOptional"]),
            SigLevel::PACKAGE | SigLevel::DATABASE | SigLevel::DATABASE_OPTIONAL
        );
    }

    #[test]
    fn test_optional_trust_all_sets_all_explicit_bits() {
        let all = SigLevel::all() - SigLevel::USE_DEFAULT;
        assert_eq!(resolve(&["Optional", "TrustAll"]), all);
    }

    #[test]
    fn test_sentinel_cleared_by_first_token() {
        assert!(!resolve(&["Never"]).contains(SigLevel::USE_DEFAULT));
        assert_eq!(resolve(&[]), SigLevel::USE_DEFAULT);
    }

    #[test]
    fn test_package_never_leaves_database_bits() {
        let bases = [
            SigLevel::empty(),
            SigLevel::all(),
            SigLevel::DATABASE | SigLevel::PACKAGE_OPTIONAL,
            SigLevel::PACKAGE | SigLevel::DATABASE_UNKNOWN_OK,
        ];
        let database_bits = Target::Database.required()
            | Target::Database.optional()
            | Target::Database.trust();
        for base in bases {
            let level = SigLevel::resolve(base, &["PackageNever"]).unwrap();
            assert!(!level.contains(SigLevel::PACKAGE));
            assert_eq!(level & database_bits, base & database_bits);
        }
    }

    #[test]
    fn test_trust_last_applied_wins() {
        let trust = Target::Both.trust();
        assert_eq!(resolve(&["TrustedOnly", "TrustAll"]) & trust, trust);
        assert!((resolve(&["TrustAll", "TrustedOnly"]) & trust).is_empty());
        assert_eq!(
            resolve(&["PackageTrustAll", "DatabaseTrustedOnly"]),
            SigLevel::PACKAGE_MARGINAL_OK | SigLevel::PACKAGE_UNKNOWN_OK
        );
    }

    #[test]
    fn test_sequential_resolution_composes() {
        let pairs = [
            ("Required", "TrustAll"),
            ("PackageOptional", "DatabaseNever"),
            ("Optional", "Required"),
            ("Never", "DatabaseRequired"),
        ];
        for (a, b) in pairs {
            let stepwise = SigLevel::resolve(resolve(&[a]), &[b]).unwrap();
            assert_eq!(stepwise, resolve(&[a, b]), "{a} then {b}");
        }
    }

    #[test]
    fn test_never_keeps_optional_bit() {
        assert_eq!(
            resolve(&["Optional", "Never"]),
            SigLevel::PACKAGE_OPTIONAL | SigLevel::DATABASE_OPTIONAL
        );
    }

    #[test]
    fn test_invalid_token_aborts() {
        let err = SigLevel::resolve(SigLevel::USE_DEFAULT, &["Required", "PackageSometimes"])
            .unwrap_err();
        match err {
            ConfigError::InvalidSigLevel(token) => assert_eq!(token, "PackageSometimes"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(SigLevel::resolve(SigLevel::USE_DEFAULT, &["Package"]).is_err());
    }

    #[test]
    fn test_to_tokens_inverts_resolve() {
        let cases: &[&[&str]] = &[
            &["Required", "DatabaseOptional"],
            &["Optional", "TrustAll"],
            &["Never"],
            &["PackageRequired", "PackageTrustAll"],
            &["Optional", "Never"],
            &["DatabaseNever", "PackageOptional", "DatabaseTrustAll"],
        ];
        for tokens in cases {
            let level = resolve(tokens);
            assert_eq!(resolve_owned(&level.to_tokens()), level, "{tokens:?}");
        }
        assert!(SigLevel::USE_DEFAULT.to_tokens().is_empty());
    }

    #[test]
    fn test_to_tokens_shares_prefixless_form() {
        assert_eq!(
            (SigLevel::PACKAGE | SigLevel::DATABASE).to_tokens(),
            vec!["Required".to_string(), "TrustedOnly".to_string()]
        );
    }

    fn resolve_owned(tokens: &[String]) -> SigLevel {
        SigLevel::resolve(SigLevel::USE_DEFAULT, tokens).unwrap()
    }
}
