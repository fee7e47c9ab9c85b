/*! Cross-lingual alignment pipeline

Runs in three phases, each one starting once the previous one is done:

1. **Scan**: one [LanguagePairIndex] per language pair directory ([Scanner]),
2. **Select**: coverage selection over every index ([CoverageSelector]),
3. **Emit**: the aligned table of the selected sources ([AlignedTableWriter]).

No table is written when no source is selected.
!*/
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::Error;
use crate::io::reader::Corpus;
use crate::io::writer::AlignedTableWriter;
use crate::layout::Layout;
use crate::processing::coverage::{
    CoverageResult, CoverageSelector, EmptyPairPolicy, DEFAULT_MIN_FRACTION,
};
use crate::processing::index::{ConflictPolicy, LanguagePairIndex, ScanStats};
use crate::processing::scan::Scanner;

#[derive(Debug, Clone)]
pub struct AlignOptions {
    pub min_fraction: f64,
    pub conflict: ConflictPolicy,
    pub empty_pairs: EmptyPairPolicy,
    /// Restrict the scan to these domains.
    pub domains: Option<Vec<String>>,
    /// Print per language pair diagnostics.
    pub report: bool,
}

impl Default for AlignOptions {
    fn default() -> Self {
        Self {
            min_fraction: DEFAULT_MIN_FRACTION,
            conflict: ConflictPolicy::default(),
            empty_pairs: EmptyPairPolicy::default(),
            domains: None,
            report: false,
        }
    }
}

/// How an alignment run ended. None of these is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlignOutcome {
    Written {
        rows: usize,
        path: PathBuf,
    },
    NoLanguagePairs,
    NoSourcesSelected {
        lp_count: usize,
        min_required: usize,
    },
}

/// Diagnostics for a language pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairReport {
    pub language_pair: String,
    pub unique_sources: usize,
    /// sources that are also in the selection
    pub overlap: usize,
    pub stats: ScanStats,
}

/// Per language pair unique source counts and overlap with the selection.
pub fn pair_reports(indices: &[LanguagePairIndex], coverage: &CoverageResult) -> Vec<PairReport> {
    indices
        .iter()
        .map(|index| PairReport {
            language_pair: index.id().to_string(),
            unique_sources: index.len(),
            overlap: coverage
                .sources()
                .iter()
                .filter(|s| index.contains(s))
                .count(),
            stats: *index.stats(),
        })
        .collect()
}

fn print_report(reports: &[PairReport], with_overlap: bool) {
    println!("\nDiagnostics:");
    for r in reports {
        let scanned = format!(
            "{} file(s), {} line(s), {} malformed, {} unreadable",
            r.stats.files, r.stats.lines, r.stats.bad_lines, r.stats.unreadable
        );
        if with_overlap {
            println!(
                "  - {}: {} unique sources; overlap with selection: {} ({})",
                r.language_pair, r.unique_sources, r.overlap, scanned
            );
        } else {
            println!(
                "  - {}: {} unique sources ({})",
                r.language_pair, r.unique_sources, scanned
            );
        }
    }
}

#[derive(Debug, Clone)]
pub struct Aligner {
    scanner: Scanner,
    selector: CoverageSelector,
    report: bool,
}

impl Aligner {
    /// Checks the options, then the root directory.
    pub fn new(root: &Path, layout: Layout, options: AlignOptions) -> Result<Self, Error> {
        let selector = CoverageSelector::new(options.min_fraction, options.empty_pairs)?;
        let corpus = Corpus::new(root, layout)?;
        let scanner = Scanner::new(corpus, options.conflict, options.domains);

        Ok(Self {
            scanner,
            selector,
            report: options.report,
        })
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    pub fn run(&self, dst: &Path) -> Result<AlignOutcome, Error> {
        let corpus = self.scanner.corpus();
        let language_pairs = corpus.language_pairs()?;
        if language_pairs.is_empty() {
            warn!("no language pair directories found in {:?}", corpus.root());
            return Ok(AlignOutcome::NoLanguagePairs);
        }

        info!("scanning {} language pair(s)", language_pairs.len());
        let indices = self.scanner.scan(&language_pairs)?;

        let coverage = self.selector.select(&indices);
        info!(
            "{} source(s) present in at least {} of {} language pair(s)",
            coverage.len(),
            coverage.min_required(),
            coverage.lp_count()
        );

        if coverage.is_empty() {
            if self.report {
                print_report(&pair_reports(&indices, &coverage), false);
            }
            return Ok(AlignOutcome::NoSourcesSelected {
                lp_count: coverage.lp_count(),
                min_required: coverage.min_required(),
            });
        }

        let mut writer = AlignedTableWriter::from_path(dst)?;
        let rows = writer.write(coverage.sources().iter().map(String::as_str), &indices)?;
        info!("wrote {} row(s) to {:?}", rows, dst);

        if self.report {
            print_report(&pair_reports(&indices, &coverage), true);
        }

        Ok(AlignOutcome::Written {
            rows,
            path: dst.to_path_buf(),
        })
    }
}

/// Align the corpus at `root` into `dst`.
pub fn run(
    root: &Path,
    dst: &Path,
    layout: Layout,
    options: AlignOptions,
) -> Result<AlignOutcome, Error> {
    Aligner::new(root, layout, options)?.run(dst)
}
