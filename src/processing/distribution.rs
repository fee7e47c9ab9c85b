/*! Source length distribution

Bins the lines of every bitext file by the word count of their source field:
`0-5`, `6-10`, `11-20`, `21-30`, `31-55` and `> 55` words.

Every physical line counts toward [FileDistribution::total_lines], blank lines are not binned.
Empty files are left out of the report.
!*/
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info, warn};
use serde::Serialize;

use crate::error::Error;
use crate::io::reader::Corpus;
use crate::layout::PathMetadata;

/// Inclusive upper bounds of every bin but the last one.
pub const BIN_BOUNDS: [usize; 5] = [5, 10, 20, 30, 55];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WordBins([u64; 6]);

impl WordBins {
    /// Count a line of `words` source words.
    pub fn add(&mut self, words: usize) {
        let bin = BIN_BOUNDS
            .iter()
            .position(|&bound| words <= bound)
            .unwrap_or(BIN_BOUNDS.len());
        self.0[bin] += 1;
    }

    pub fn counts(&self) -> &[u64; 6] {
        &self.0
    }

    /// Binned (non blank) lines.
    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    /// Count lines and bin them.
    ///
    /// Returns the physical line count along with the bins.
    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<(u64, Self)> {
        let mut total_lines = 0;
        let mut bins = Self::default();

        for line in reader.lines() {
            let line = line?;
            total_lines += 1;

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let source = line.split('\t').next().unwrap_or("");
            bins.add(source.split_whitespace().count());
        }

        Ok((total_lines, bins))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDistribution {
    pub meta: PathMetadata,
    pub file_name: String,
    pub total_lines: u64,
    pub bins: WordBins,
}

impl FileDistribution {
    pub fn from_path(path: &Path, meta: PathMetadata) -> Result<Self, Error> {
        let map_err = |source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        };
        let f = File::open(path).map_err(map_err)?;
        let (total_lines, bins) = WordBins::from_reader(BufReader::new(f)).map_err(map_err)?;

        Ok(Self {
            meta,
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            total_lines,
            bins,
        })
    }
}

/// A CSV row.
#[derive(Debug, Serialize)]
struct DistributionRow<'a> {
    #[serde(rename = "Language Pair")]
    language_pair: &'a str,
    #[serde(rename = "Domain")]
    domain: &'a str,
    #[serde(rename = "Sub Domain")]
    sub_domain: &'a str,
    #[serde(rename = "Type")]
    stage: &'a str,
    #[serde(rename = "File Name")]
    file_name: &'a str,
    #[serde(rename = "Total Lines")]
    total_lines: u64,
    #[serde(rename = "0-5 words")]
    up_to_5: u64,
    #[serde(rename = "6-10 words")]
    up_to_10: u64,
    #[serde(rename = "11-20 words")]
    up_to_20: u64,
    #[serde(rename = "21-30 words")]
    up_to_30: u64,
    #[serde(rename = "31-55 words")]
    up_to_55: u64,
    #[serde(rename = "> 55 words")]
    over_55: u64,
}

impl<'a> From<&'a FileDistribution> for DistributionRow<'a> {
    fn from(d: &'a FileDistribution) -> Self {
        let [up_to_5, up_to_10, up_to_20, up_to_30, up_to_55, over_55] = *d.bins.counts();
        Self {
            language_pair: &d.meta.language_pair,
            domain: &d.meta.domain,
            sub_domain: d.meta.sub_domain.as_deref().unwrap_or(""),
            stage: &d.meta.stage,
            file_name: &d.file_name,
            total_lines: d.total_lines,
            up_to_5,
            up_to_10,
            up_to_20,
            up_to_30,
            up_to_55,
            over_55,
        }
    }
}

/// Per file length distribution of a corpus, in file path order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Distribution {
    files: Vec<FileDistribution>,
}

impl Distribution {
    pub fn collect(corpus: &Corpus) -> Result<Self, Error> {
        let mut files = Vec::new();

        for language_pair in corpus.language_pairs()? {
            for path in corpus.bitext_files(&language_pair)? {
                let meta = match corpus.layout().metadata(corpus.root(), &path) {
                    Ok(meta) => meta,
                    Err(e) => {
                        warn!("[{}] skipping: {}", language_pair, e);
                        continue;
                    }
                };

                match FileDistribution::from_path(&path, meta) {
                    Ok(d) if d.total_lines == 0 => debug!("[{}] {:?} is empty", language_pair, path),
                    Ok(d) => files.push(d),
                    Err(e) => warn!("[{}] {}", language_pair, e),
                }
            }
        }

        info!("length distribution of {} file(s)", files.len());
        Ok(Self { files })
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileDistribution> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Bins summed over every file.
    pub fn total(&self) -> WordBins {
        let mut total = WordBins::default();
        for d in &self.files {
            for (t, c) in total.0.iter_mut().zip(d.bins.counts()) {
                *t += c;
            }
        }
        total
    }

    pub fn write_csv<W: std::io::Write>(&self, writer: W) -> Result<(), Error> {
        let mut out = csv::Writer::from_writer(writer);
        for d in self.iter() {
            out.serialize(DistributionRow::from(d))?;
        }
        out.flush()?;
        Ok(())
    }

    pub fn to_csv(&self, path: &Path) -> Result<(), Error> {
        self.write_csv(File::create(path)?)?;
        info!("length distribution saved to CSV file {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Cursor;

    use tempfile::tempdir;

    use super::*;
    use crate::layout::{Layout, CORPUS_STAGES};

    fn sentence(words: usize) -> String {
        vec!["w"; words].join(" ")
    }

    #[test]
    fn bin_bounds_are_inclusive() {
        let mut bins = WordBins::default();
        for words in [0, 5, 6, 10, 11, 20, 21, 30, 31, 55, 56, 300] {
            bins.add(words);
        }
        assert_eq!(bins.counts(), &[2, 2, 2, 2, 2, 2]);
        assert_eq!(bins.total(), 12);
    }

    #[test]
    fn blank_lines_count_but_are_not_binned() {
        let text = format!("{}\tx\n\n   \n{}\ty\n", sentence(3), sentence(12));
        let (total_lines, bins) = WordBins::from_reader(Cursor::new(text)).unwrap();

        assert_eq!(total_lines, 4);
        assert_eq!(bins.counts(), &[1, 0, 1, 0, 0, 0]);
    }

    #[test]
    fn collect_and_export() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("root");
        let files = [
            (
                "A-B/EDU/phy/translation_text/source_reviewed/1.txt",
                format!("{}\tx\n{}\ty\n", sentence(7), sentence(60)),
            ),
            (
                "A-B/EDU/phy/translation_text/source_translated/1.txt",
                format!("{}\tx\n", sentence(25)),
            ),
            ("A-B/EDU/phy/translation_text/source_translated/empty.txt", String::new()),
        ];
        for (rel, content) in files.iter() {
            let p = root.join(rel);
            fs::create_dir_all(p.parent().unwrap()).unwrap();
            fs::write(p, content).unwrap();
        }

        let layout =
            Layout::default().with_stages(CORPUS_STAGES.iter().map(|s| s.to_string()).collect());
        let corpus = Corpus::new(&root, layout).unwrap();
        let distribution = Distribution::collect(&corpus).unwrap();

        // the empty file is left out
        assert_eq!(distribution.len(), 2);
        assert_eq!(distribution.total().counts(), &[0, 1, 0, 1, 0, 1]);

        let mut buf = Vec::new();
        distribution.write_csv(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Language Pair,Domain,Sub Domain,Type,File Name,Total Lines,\
             0-5 words,6-10 words,11-20 words,21-30 words,31-55 words,> 55 words\n\
             A-B,EDU,phy,source_reviewed,1.txt,2,0,1,0,0,0,1\n\
             A-B,EDU,phy,source_translated,1.txt,1,0,0,0,1,0,0\n"
        );
    }
}
