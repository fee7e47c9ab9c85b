/*! Language pair index

A [LanguagePairIndex] maps every source sentence of a language pair to a single translation.
It is built by folding the records of every bitext file of the pair through an [IndexBuilder],
and never changes once built.

Duplicate sources are resolved by a [ConflictPolicy]. Files are expected in a fixed order
(see [crate::io::reader::Corpus::bitext_files]) so that the policy gives reproducible results.
!*/
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use log::{debug, warn};

use crate::error::Error;
use crate::io::reader::{BitextReader, BitextRecord};

/// What to do when a source is seen again with a different target.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Keep the last target seen.
    #[default]
    LastWins,
    /// Keep the first target seen.
    FirstWins,
    /// Fail the build.
    Reject,
}

impl FromStr for ConflictPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last-wins" | "last" => Ok(Self::LastWins),
            "first-wins" | "first" => Ok(Self::FirstWins),
            "reject" => Ok(Self::Reject),
            other => Err(format!(
                "unknown conflict policy {:?} (expected last-wins, first-wins or reject)",
                other
            )),
        }
    }
}

/// Scan counters of a language pair.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    /// files read
    pub files: u64,
    /// physical lines, including malformed and blank ones
    pub lines: u64,
    /// lines without a tab
    pub bad_lines: u64,
    /// files that could not be opened or read through
    pub unreadable: u64,
    /// sources seen again with a different target
    pub conflicts: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePairIndex {
    id: String,
    mapping: HashMap<String, String>,
    stats: ScanStats,
}

impl LanguagePairIndex {
    /// Build an index from an existing mapping.
    pub fn new(id: impl Into<String>, mapping: HashMap<String, String>) -> Self {
        Self {
            id: id.into(),
            mapping,
            stats: ScanStats::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn mapping(&self) -> &HashMap<String, String> {
        &self.mapping
    }

    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.mapping.get(source).map(String::as_str)
    }

    pub fn contains(&self, source: &str) -> bool {
        self.mapping.contains_key(source)
    }

    /// Number of unique sources.
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

/// Incremental construction of a [LanguagePairIndex].
#[derive(Debug)]
pub struct IndexBuilder {
    id: String,
    policy: ConflictPolicy,
    mapping: HashMap<String, String>,
    stats: ScanStats,
}

impl IndexBuilder {
    pub fn new(id: impl Into<String>, policy: ConflictPolicy) -> Self {
        Self {
            id: id.into(),
            policy,
            mapping: HashMap::new(),
            stats: ScanStats::default(),
        }
    }

    /// Fold a single record into the mapping.
    ///
    /// Only fails under [ConflictPolicy::Reject].
    pub fn insert(&mut self, record: BitextRecord) -> Result<(), Error> {
        let BitextRecord { source, target } = record;
        match self.mapping.entry(source) {
            Entry::Vacant(e) => {
                e.insert(target);
            }
            Entry::Occupied(mut e) => {
                if *e.get() == target {
                    return Ok(());
                }
                self.stats.conflicts += 1;
                match self.policy {
                    ConflictPolicy::LastWins => {
                        e.insert(target);
                    }
                    ConflictPolicy::FirstWins => (),
                    ConflictPolicy::Reject => {
                        return Err(Error::Conflict {
                            language_pair: self.id.clone(),
                            source: e.key().clone(),
                        })
                    }
                }
            }
        }
        Ok(())
    }

    /// Read a bitext file and fold its records.
    ///
    /// A file that can't be opened is logged and skipped.
    /// A read error in the middle of a file stops reading it; records folded before the error are kept.
    pub fn add_file(&mut self, path: &Path) -> Result<(), Error> {
        match BitextReader::from_path(path) {
            Ok(reader) => {
                debug!("[{}] reading {:?}", self.id, path);
                self.stats.files += 1;
                self.add_reader(reader)
            }
            Err(e) => {
                warn!("[{}] {}", self.id, e);
                self.stats.unreadable += 1;
                Ok(())
            }
        }
    }

    /// Fold every record of a reader.
    pub fn add_reader<T>(&mut self, mut reader: BitextReader<T>) -> Result<(), Error>
    where
        T: Read,
    {
        for record in reader.by_ref() {
            match record {
                Ok(record) => self.insert(record)?,
                Err(e) => {
                    warn!("[{}] {}, skipping the rest of the file", self.id, e);
                    self.stats.unreadable += 1;
                    break;
                }
            }
        }

        let counts = reader.counts();
        self.stats.lines += counts.lines;
        self.stats.bad_lines += counts.bad_lines;
        Ok(())
    }

    pub fn build(self) -> LanguagePairIndex {
        LanguagePairIndex {
            id: self.id,
            mapping: self.mapping,
            stats: self.stats,
        }
    }
}
