//! Line tokenizer for the pacman.conf dialect
//!
//! Each physical line is classified on its own, with no lookahead:
//!
//! ```text
//! # comment            -> Token::Comment
//! [core]               -> Token::Section("core")
//! CacheDir = /a /b     -> Token::Key { name: "CacheDir", values: ["/a", "/b"] }
//! ILoveCandy           -> Token::Key { name: "ILoveCandy", values: [] }
//! ```

use crate::{ConfigError, Result};

/// A classified configuration line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Blank line or comment
    Comment,
    /// Section header, e.g. `[options]`
    Section(String),
    /// Directive; `values` is empty for a bare boolean directive
    Key { name: String, values: Vec<String> },
}

/// Classify one line. `line` is the 1-based number used in diagnostics.
pub fn tokenize_line(raw: &str, line: usize) -> Result<Token> {
    let trimmed = raw.trim();

    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(Token::Comment);
    }

    if let Some(rest) = trimmed.strip_prefix('[') {
        let closing = rest
            .find(']')
            .ok_or(ConfigError::MissingBracket { line })?;
        let name = &rest[..closing];
        let trailing = rest[closing + 1..].trim();
        if !trailing.is_empty() {
            return Err(ConfigError::TrailingCharacters {
                line,
                trailing: trailing.to_string(),
                section: name.to_string(),
            });
        }
        return Ok(Token::Section(name.to_string()));
    }

    match trimmed.split_once('=') {
        Some((name, value)) => Ok(Token::Key {
            name: name.trim().to_string(),
            values: split_values(value),
        }),
        None => Ok(Token::Key {
            name: trimmed.to_string(),
            values: Vec::new(),
        }),
    }
}

/// Split a directive value on single spaces, dropping empty pieces.
fn split_values(value: &str) -> Vec<String> {
    value
        .split(' ')
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}
