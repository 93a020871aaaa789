//! Line sources and the Include stack
//!
//! A [`ConfReader`] is one open source with its own line counter. The
//! [`ReaderStack`] keeps the active reader plus every reader suspended by an
//! `Include`, so diagnostics always report lines of the file being read and
//! a parent resumes exactly where it stopped.

use crate::token::{tokenize_line, Token};
use crate::{ConfigError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

/// Longest accepted line, in bytes, excluding the line terminator
pub const MAX_LINE_LENGTH: usize = 4096;

/// One input source and its line counter
pub struct ConfReader<'a> {
    inner: Box<dyn BufRead + 'a>,
    label: String,
    line: usize,
}

impl<'a> ConfReader<'a> {
    /// Wrap any reader; `label` names the source in log output.
    pub fn new<R: Read + 'a>(reader: R, label: impl Into<String>) -> Self {
        Self {
            inner: Box::new(BufReader::with_capacity(MAX_LINE_LENGTH, reader)),
            label: label.into(),
            line: 0,
        }
    }

    /// Number of the last line read (0 before the first line)
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Read and classify the next line; `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        let mut buf = Vec::new();
        let limit = (MAX_LINE_LENGTH + 2) as u64;
        let read = (&mut self.inner).take(limit).read_until(b'\n', &mut buf)?;
        if read == 0 {
            return Ok(None);
        }
        self.line += 1;

        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        if buf.len() > MAX_LINE_LENGTH {
            return Err(ConfigError::LineTooLong { line: self.line });
        }

        let text = String::from_utf8_lossy(&buf);
        tokenize_line(&text, self.line).map(Some)
    }
}

impl ConfReader<'static> {
    /// Open a file as a source labelled with its path.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(file, path.display().to_string()))
    }
}

impl std::fmt::Debug for ConfReader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfReader")
            .field("label", &self.label)
            .field("line", &self.line)
            .finish()
    }
}

/// The active reader plus readers suspended by `Include`
#[derive(Debug)]
pub struct ReaderStack<'a> {
    active: ConfReader<'a>,
    suspended: Vec<ConfReader<'a>>,
}

impl<'a> ReaderStack<'a> {
    pub fn new(primary: ConfReader<'a>) -> Self {
        Self {
            active: primary,
            suspended: Vec::new(),
        }
    }

    /// The reader currently being parsed
    pub fn active(&self) -> &ConfReader<'a> {
        &self.active
    }

    /// Number of suspended readers
    pub fn depth(&self) -> usize {
        self.suspended.len()
    }

    /// Open `path` and continue from its first line. The current reader
    /// resumes after the included file is exhausted.
    pub fn include(&mut self, path: &Path) -> Result<()> {
        let line = self.active.line();
        let reader = ConfReader::open(path).map_err(|source| ConfigError::Include {
            line,
            path: PathBuf::from(path),
            source,
        })?;
        self.push(reader);
        Ok(())
    }

    /// Suspend the active reader in favour of `reader`.
    pub fn push(&mut self, reader: ConfReader<'a>) {
        tracing::debug!(
            "Including {} from {} line {}",
            reader.label(),
            self.active.label(),
            self.active.line()
        );
        let parent = std::mem::replace(&mut self.active, reader);
        self.suspended.push(parent);
    }

    /// Resume the most recently suspended reader. Returns `false` when the
    /// primary reader is active and nothing is left to resume.
    pub fn pop(&mut self) -> bool {
        match self.suspended.pop() {
            Some(parent) => {
                let finished = std::mem::replace(&mut self.active, parent);
                tracing::debug!(
                    "Finished {}, resuming {} after line {}",
                    finished.label(),
                    self.active.label(),
                    self.active.line()
                );
                true
            }
            None => false,
        }
    }

    /// Next token from the active reader; `None` at end of its input.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        self.active.next_token()
    }
}
