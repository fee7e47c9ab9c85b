/*! Corpus statistics

Counts files, lines and source words for every `(language pair, domain, stage)` found in a corpus.

- lines are non blank lines that are not header rows (see [HEADER_MARKERS]),
- words are the whitespace separated words of the first tab field of every line.

Counts are exported as a fixed-width table, CSV or JSON.
!*/
use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::ops::AddAssign;
use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::io::reader::Corpus;
use crate::layout::PathMetadata;

/// Lines containing one of these are column headers, not data.
pub const HEADER_MARKERS: [&str; 3] = ["Source_Text", "Translated_Text", "Reviewed_Text"];

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StatsKey {
    pub language_pair: String,
    pub domain: String,
    pub stage: String,
}

impl StatsKey {
    pub fn new(
        language_pair: impl Into<String>,
        domain: impl Into<String>,
        stage: impl Into<String>,
    ) -> Self {
        Self {
            language_pair: language_pair.into(),
            domain: domain.into(),
            stage: stage.into(),
        }
    }
}

impl From<&PathMetadata> for StatsKey {
    fn from(meta: &PathMetadata) -> Self {
        Self::new(&meta.language_pair, &meta.domain, &meta.stage)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub files: u64,
    pub lines: u64,
    pub words: u64,
}

impl AddAssign for Counts {
    fn add_assign(&mut self, rhs: Self) {
        self.files += rhs.files;
        self.lines += rhs.lines;
        self.words += rhs.words;
    }
}

impl Counts {
    /// Count lines and words of a single file (`files` is 1).
    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut counts = Counts {
            files: 1,
            ..Default::default()
        };

        for line in reader.lines() {
            let line = line?;
            let source = line.split('\t').next().unwrap_or("");
            counts.words += source.split_whitespace().count() as u64;

            if !line.trim().is_empty() && !HEADER_MARKERS.iter().any(|m| line.contains(m)) {
                counts.lines += 1;
            }
        }

        Ok(counts)
    }

    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let map_err = |source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        };
        let f = File::open(path).map_err(map_err)?;
        Self::from_reader(BufReader::new(f)).map_err(map_err)
    }
}

/// A CSV row.
#[derive(Debug, Serialize)]
struct StatsRow<'a> {
    #[serde(rename = "Language Pair")]
    language_pair: &'a str,
    #[serde(rename = "Domain")]
    domain: &'a str,
    #[serde(rename = "Type")]
    stage: &'a str,
    #[serde(rename = "Files")]
    files: u64,
    #[serde(rename = "Lines")]
    lines: u64,
    #[serde(rename = "Words")]
    words: u64,
}

/// Nested `language pair -> domain -> stage -> counts`, JSON export only.
type NestedCounts<'a> = BTreeMap<&'a str, BTreeMap<&'a str, BTreeMap<&'a str, Counts>>>;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CorpusStats {
    entries: BTreeMap<StatsKey, Counts>,
}

impl CorpusStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add counts to an entry, creating it if needed. This is the only way entries are created.
    pub fn record(&mut self, key: StatsKey, counts: Counts) {
        *self.entries.entry(key).or_default() += counts;
    }

    pub fn get(&self, key: &StatsKey) -> Option<&Counts> {
        self.entries.get(key)
    }

    /// Entries sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&StatsKey, &Counts)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> Counts {
        let mut total = Counts::default();
        for counts in self.entries.values() {
            total += *counts;
        }
        total
    }

    /// Count every bitext file of the corpus.
    ///
    /// Files that do not follow the tree schema or that can't be read are logged and skipped.
    pub fn collect(corpus: &Corpus) -> Result<Self, Error> {
        let mut stats = Self::new();

        for language_pair in corpus.language_pairs()? {
            for path in corpus.bitext_files(&language_pair)? {
                let meta = match corpus.layout().metadata(corpus.root(), &path) {
                    Ok(meta) => meta,
                    Err(e) => {
                        warn!("[{}] skipping: {}", language_pair, e);
                        continue;
                    }
                };

                match Counts::from_path(&path) {
                    Ok(counts) => {
                        debug!("[{}] {:?}: {:?}", language_pair, path, counts);
                        stats.record(StatsKey::from(&meta), counts);
                    }
                    Err(e) => warn!("[{}] {}", language_pair, e),
                }
            }
        }

        info!("collected statistics for {} entries", stats.len());
        Ok(stats)
    }

    /// Fixed width table with a `TOTAL` row.
    pub fn table(&self) -> String {
        let mut out = String::new();
        let rule = "-".repeat(80);

        // writing to a String can't fail
        let _ = writeln!(
            out,
            "{:<14} | {:<8} | {:<20} | {:<6} | {:<8} | {:<10}",
            "Language Pair", "Domain", "Type", "Files", "Lines", "Words"
        );
        let _ = writeln!(out, "{}", rule);
        for (key, c) in self.iter() {
            let _ = writeln!(
                out,
                "{:<14} | {:<8} | {:<20} | {:<6} | {:<8} | {:<10}",
                key.language_pair, key.domain, key.stage, c.files, c.lines, c.words
            );
        }
        let total = self.total();
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(
            out,
            "{:<14} | {:<8} | {:<20} | {:<6} | {:<8} | {:<10}",
            "TOTAL", "", "", total.files, total.lines, total.words
        );

        out
    }

    /// Write entries and a `TOTAL` row as CSV.
    pub fn write_csv<W: std::io::Write>(&self, writer: W) -> Result<(), Error> {
        let mut out = csv::Writer::from_writer(writer);
        for (key, c) in self.iter() {
            out.serialize(StatsRow {
                language_pair: &key.language_pair,
                domain: &key.domain,
                stage: &key.stage,
                files: c.files,
                lines: c.lines,
                words: c.words,
            })?;
        }

        let total = self.total();
        out.serialize(StatsRow {
            language_pair: "TOTAL",
            domain: "",
            stage: "",
            files: total.files,
            lines: total.lines,
            words: total.words,
        })?;
        out.flush()?;
        Ok(())
    }

    pub fn to_csv(&self, path: &Path) -> Result<(), Error> {
        self.write_csv(File::create(path)?)?;
        info!("statistics saved to CSV file {:?}", path);
        Ok(())
    }

    fn nested(&self) -> NestedCounts<'_> {
        let mut nested = NestedCounts::new();
        for (key, counts) in self.iter() {
            nested
                .entry(key.language_pair.as_str())
                .or_default()
                .entry(key.domain.as_str())
                .or_default()
                .insert(key.stage.as_str(), *counts);
        }
        nested
    }

    /// Write entries as nested JSON (no totals).
    pub fn write_json<W: std::io::Write>(&self, writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(writer, &self.nested())?;
        Ok(())
    }

    pub fn to_json(&self, path: &Path) -> Result<(), Error> {
        self.write_json(BufWriter::new(File::create(path)?))?;
        info!("statistics saved to JSON file {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Cursor;

    use tempfile::tempdir;

    use super::*;
    use crate::layout::Layout;

    fn write(root: &Path, rel: &str, content: &str) {
        let p = root.join(rel);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(p, content).unwrap();
    }

    #[test]
    fn count_lines_and_words() {
        let text = "Source_Text\tReviewed_Text\n\
                    the cat sat\tx\n\
                    \n\
                    one two\ty z\n\
                    no tab here\n";
        let c = Counts::from_reader(Cursor::new(text)).unwrap();

        assert_eq!(c.files, 1);
        assert_eq!(c.lines, 3);
        // header rows are not lines, but their first field still counts as words
        assert_eq!(c.words, 1 + 3 + 2 + 3);
    }

    #[test]
    fn missing_key_is_not_created() {
        let mut stats = CorpusStats::new();
        stats.record(
            StatsKey::new("A-B", "EDU", "source_reviewed"),
            Counts {
                files: 1,
                lines: 2,
                words: 3,
            },
        );

        assert!(stats
            .get(&StatsKey::new("A-B", "HLT", "source_reviewed"))
            .is_none());
        assert_eq!(stats.len(), 1);
    }

    #[test]
    fn record_accumulates() {
        let mut stats = CorpusStats::new();
        let key = StatsKey::new("A-B", "EDU", "source_reviewed");
        let c = Counts {
            files: 1,
            lines: 2,
            words: 3,
        };
        stats.record(key.clone(), c);
        stats.record(key.clone(), c);

        assert_eq!(
            stats.get(&key),
            Some(&Counts {
                files: 2,
                lines: 4,
                words: 6
            })
        );
    }

    #[test]
    fn collect_from_corpus() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(root, "A-B/EDU/x/translation_text/source_reviewed/1.txt", "a b\tc\n");
        write(root, "A-B/EDU/y/translation_text/source_reviewed/2.txt", "d\te\nf\tg\n");
        write(root, "A-B/HLT/x/translation_text/source_reviewed/1.txt", "h\ti\n");
        write(root, "C-D/EDU/x/translation_text/source_translated/1.txt", "j\tk\n");

        let layout = Layout::default().with_stages(vec![
            "source_reviewed".to_string(),
            "source_translated".to_string(),
        ]);
        let corpus = Corpus::new(root, layout).unwrap();
        let stats = CorpusStats::collect(&corpus).unwrap();

        assert_eq!(stats.len(), 3);
        assert_eq!(
            stats.get(&StatsKey::new("A-B", "EDU", "source_reviewed")),
            Some(&Counts {
                files: 2,
                lines: 3,
                words: 4
            })
        );
        assert_eq!(
            stats
                .get(&StatsKey::new("C-D", "EDU", "source_translated"))
                .map(|c| c.files),
            Some(1)
        );
        assert_eq!(stats.total().files, 4);
    }

    #[test]
    fn csv_export() {
        let mut stats = CorpusStats::new();
        stats.record(
            StatsKey::new("A-B", "EDU", "source_reviewed"),
            Counts {
                files: 1,
                lines: 2,
                words: 3,
            },
        );

        let mut buf = Vec::new();
        stats.write_csv(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Language Pair,Domain,Type,Files,Lines,Words\n\
             A-B,EDU,source_reviewed,1,2,3\n\
             TOTAL,,,1,2,3\n"
        );
    }

    #[test]
    fn json_export() {
        let mut stats = CorpusStats::new();
        stats.record(
            StatsKey::new("A-B", "EDU", "source_reviewed"),
            Counts {
                files: 1,
                lines: 2,
                words: 3,
            },
        );

        let mut buf = Vec::new();
        stats.write_json(&mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["A-B"]["EDU"]["source_reviewed"]["lines"], 2);
        assert_eq!(value["A-B"]["EDU"]["source_reviewed"]["words"], 3);
    }

    #[test]
    fn table_has_total() {
        let stats = CorpusStats::new();
        let table = stats.table();
        assert!(table.starts_with("Language Pair"));
        assert!(table.lines().last().unwrap().starts_with("TOTAL"));
    }
}
