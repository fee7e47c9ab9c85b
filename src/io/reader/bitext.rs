/*! Bitext reading

A bitext file holds one `source<TAB>target` record per line.

[BitextReader] implements [Iterator] over [BitextRecord]s and keeps [LineCounts] as it goes:

- lines without a tab are malformed: they are counted in [LineCounts::bad_lines] and not yielded,
- lines are split on the *first* tab, further tabs belong to the target,
- both fields are trimmed, and records with an empty source are dropped without being counted as malformed.

Readers are cheap to create: reading a file again means opening a new reader with [BitextReader::from_path].
!*/
use std::{
    fs::File,
    io::{BufRead, BufReader, Lines, Read},
    path::{Path, PathBuf},
};

use crate::error::Error;

/// A source sentence and its translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitextRecord {
    pub source: String,
    pub target: String,
}

impl BitextRecord {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Physical lines read and malformed (tab-less) lines skipped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LineCounts {
    pub lines: u64,
    pub bad_lines: u64,
}

/// Outcome of parsing a single line.
#[derive(Debug, PartialEq, Eq)]
pub enum ParsedLine {
    Record(BitextRecord),
    /// Source is empty once trimmed.
    Blank,
    /// No tab delimiter.
    Malformed,
}

/// Parse a line (without its line terminator).
pub fn parse_line(line: &str) -> ParsedLine {
    match line.split_once('\t') {
        None => ParsedLine::Malformed,
        Some((source, target)) => {
            let source = source.trim();
            if source.is_empty() {
                ParsedLine::Blank
            } else {
                ParsedLine::Record(BitextRecord::new(source, target.trim()))
            }
        }
    }
}

#[derive(Debug)]
pub struct BitextReader<T> {
    path: PathBuf,
    lines: Lines<BufReader<T>>,
    counts: LineCounts,
    failed: bool,
}

impl BitextReader<File> {
    /// Open a bitext file.
    ///
    /// Opening failures are returned as [Error::FileRead].
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let f = File::open(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(path, f))
    }
}

impl<T> BitextReader<T>
where
    T: Read,
{
    /// Wrap any reader. `path` is only used in diagnostics.
    pub fn new(path: &Path, inner: T) -> Self {
        Self {
            path: path.to_path_buf(),
            lines: BufReader::new(inner).lines(),
            counts: LineCounts::default(),
            failed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Counts for the lines read so far.
    pub fn counts(&self) -> LineCounts {
        self.counts
    }
}

impl<T> Iterator for BitextReader<T>
where
    T: Read,
{
    type Item = Result<BitextRecord, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        // a read error ends the file
        if self.failed {
            return None;
        }

        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(source) => {
                    self.failed = true;
                    return Some(Err(Error::FileRead {
                        path: self.path.clone(),
                        source,
                    }));
                }
            };

            self.counts.lines += 1;
            match parse_line(&line) {
                ParsedLine::Record(record) => return Some(Ok(record)),
                ParsedLine::Blank => continue,
                ParsedLine::Malformed => self.counts.bad_lines += 1,
            }
        }
    }
}
