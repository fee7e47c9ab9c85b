/*! Corpus processing

Contains structures and functions to aggregate bitext files into per language pair indices,
select sources across language pairs, and produce statistics, length distributions,
combined texts and filtered copies of a corpus.
!*/
pub mod align;
pub mod combine;
pub mod coverage;
pub mod distribution;
pub mod filter;
pub mod index;
pub mod lookup;
pub mod scan;
pub mod stats;

pub use align::{AlignOptions, AlignOutcome, Aligner};
pub use coverage::{CoverageResult, CoverageSelector, EmptyPairPolicy};
pub use distribution::{Distribution, FileDistribution, WordBins};
pub use index::{ConflictPolicy, IndexBuilder, LanguagePairIndex, ScanStats};
pub use scan::Scanner;
pub use stats::{CorpusStats, Counts, StatsKey};
