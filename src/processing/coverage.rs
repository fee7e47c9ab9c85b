/*! Cross-lingual coverage

Selects the source sentences that are present in enough language pairs.

With `n` counted language pairs and a minimum fraction `f`,
a source is selected when it is present in at least `max(1, floor(n * f))` of them.
Only presence matters: translations are never looked at.
!*/
use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use itertools::Itertools;

use crate::error::Error;
use crate::processing::index::LanguagePairIndex;

pub const DEFAULT_MIN_FRACTION: f64 = 0.6;

/// Whether language pairs without any data count toward the number of language pairs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EmptyPairPolicy {
    /// Every language pair counts, even empty ones.
    #[default]
    Count,
    /// Empty language pairs are left out of the count.
    Ignore,
}

impl FromStr for EmptyPairPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "count" => Ok(Self::Count),
            "ignore" => Ok(Self::Ignore),
            other => Err(format!(
                "unknown empty pair policy {:?} (expected count or ignore)",
                other
            )),
        }
    }
}

/// Sources meeting the coverage threshold.
///
/// Sources are unordered: use [CoverageResult::sorted] for a stable order.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageResult {
    sources: HashSet<String>,
    min_fraction: f64,
    lp_count: usize,
    min_required: usize,
}

impl CoverageResult {
    pub fn sources(&self) -> &HashSet<String> {
        &self.sources
    }

    pub fn sorted(&self) -> Vec<&str> {
        self.sources.iter().map(String::as_str).sorted().collect()
    }

    pub fn contains(&self, source: &str) -> bool {
        self.sources.contains(source)
    }

    pub fn min_fraction(&self) -> f64 {
        self.min_fraction
    }

    /// Number of language pairs taken into account.
    pub fn lp_count(&self) -> usize {
        self.lp_count
    }

    /// Number of language pairs a source has to be present in.
    pub fn min_required(&self) -> usize {
        self.min_required
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CoverageSelector {
    min_fraction: f64,
    empty_pairs: EmptyPairPolicy,
}

impl Default for CoverageSelector {
    fn default() -> Self {
        Self {
            min_fraction: DEFAULT_MIN_FRACTION,
            empty_pairs: EmptyPairPolicy::default(),
        }
    }
}

impl CoverageSelector {
    /// Fails with [Error::InvalidFraction] if `min_fraction` is not in `(0, 1]`.
    pub fn new(min_fraction: f64, empty_pairs: EmptyPairPolicy) -> Result<Self, Error> {
        if !(min_fraction > 0.0 && min_fraction <= 1.0) {
            return Err(Error::InvalidFraction(min_fraction));
        }
        Ok(Self {
            min_fraction,
            empty_pairs,
        })
    }

    pub fn min_fraction(&self) -> f64 {
        self.min_fraction
    }

    /// `max(1, floor(lp_count * min_fraction))`, or 0 when there are no language pairs.
    pub fn min_required(&self, lp_count: usize) -> usize {
        if lp_count == 0 {
            return 0;
        }
        let required = (lp_count as f64 * self.min_fraction).floor() as usize;
        required.max(1)
    }

    pub fn select(&self, indices: &[LanguagePairIndex]) -> CoverageResult {
        let counted: Vec<&LanguagePairIndex> = indices
            .iter()
            .filter(|index| match self.empty_pairs {
                EmptyPairPolicy::Count => true,
                EmptyPairPolicy::Ignore => !index.is_empty(),
            })
            .collect();

        let lp_count = counted.len();
        let min_required = self.min_required(lp_count);

        // sources are unique within an index, so this counts distinct indices.
        let mut presence: HashMap<&str, usize> = HashMap::new();
        for index in &counted {
            for source in index.mapping().keys() {
                *presence.entry(source.as_str()).or_insert(0) += 1;
            }
        }

        let sources = if lp_count == 0 {
            HashSet::new()
        } else {
            presence
                .into_iter()
                .filter(|(_, count)| *count >= min_required)
                .map(|(source, _)| source.to_string())
                .collect()
        };

        CoverageResult {
            sources,
            min_fraction: self.min_fraction,
            lp_count,
            min_required,
        }
    }
}
