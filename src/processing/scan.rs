/*! Scan phase

Builds a [LanguagePairIndex] for every language pair of a [Corpus].

Each bitext file path is checked against the corpus [crate::layout::Layout] before being read:
files that do not follow the tree schema are logged and skipped, as are files from domains
that are not selected. Unreadable files are logged and skipped too,
so that a single bad file never stops the scan.
!*/
use log::{debug, info, warn};

use crate::error::Error;
use crate::io::reader::Corpus;
use crate::processing::index::{ConflictPolicy, IndexBuilder, LanguagePairIndex};

#[derive(Debug, Clone)]
pub struct Scanner {
    corpus: Corpus,
    conflict: ConflictPolicy,
    domains: Option<Vec<String>>,
}

impl Scanner {
    /// `domains` restricts the scan to some domains (`None` scans all of them).
    pub fn new(corpus: Corpus, conflict: ConflictPolicy, domains: Option<Vec<String>>) -> Self {
        Self {
            corpus,
            conflict,
            domains,
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    fn wants_domain(&self, domain: &str) -> bool {
        match &self.domains {
            Some(domains) => domains.iter().any(|d| d == domain),
            None => true,
        }
    }

    /// Build the index of a single language pair.
    ///
    /// Only fails on directory listing errors or on conflicts under [ConflictPolicy::Reject].
    pub fn index(&self, language_pair: &str) -> Result<LanguagePairIndex, Error> {
        let layout = self.corpus.layout();
        let mut builder = IndexBuilder::new(language_pair, self.conflict);

        for path in self.corpus.bitext_files(language_pair)? {
            match layout.metadata(self.corpus.root(), &path) {
                Ok(meta) if self.wants_domain(&meta.domain) => builder.add_file(&path)?,
                Ok(meta) => debug!(
                    "[{}] skipping {:?}: domain {} not selected",
                    language_pair, path, meta.domain
                ),
                Err(e) => warn!("[{}] skipping: {}", language_pair, e),
            }
        }

        let index = builder.build();
        let stats = index.stats();
        if index.is_empty() {
            info!("[{}] no data found", language_pair);
        } else {
            info!(
                "[{}] loaded {} pairs from {} file(s), {} malformed line(s) skipped",
                language_pair,
                index.len(),
                stats.files,
                stats.bad_lines
            );
        }
        if stats.conflicts > 0 {
            info!(
                "[{}] {} duplicate source(s) with differing targets ({:?})",
                language_pair, stats.conflicts, self.conflict
            );
        }

        Ok(index)
    }

    /// Build the indices of the given language pairs, in the same order.
    pub fn scan(&self, language_pairs: &[String]) -> Result<Vec<LanguagePairIndex>, Error> {
        language_pairs.iter().map(|lp| self.index(lp)).collect()
    }
}
