/*! Aligned table writing

Writes one tab separated table with a `source` column followed by one column per language pair.

Output only depends on the data: language pair columns are sorted by identifier,
rows are sorted by source, and missing translations are written as empty cells.
!*/
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use itertools::Itertools;
use log::debug;

use crate::error::Error;
use crate::processing::LanguagePairIndex;

pub const SOURCE_COLUMN: &str = "source";

/// A source and its translation for every language pair (empty if missing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedRow<'a> {
    pub source: &'a str,
    pub cells: BTreeMap<&'a str, &'a str>,
}

impl<'a> AlignedRow<'a> {
    pub fn new(source: &'a str, indices: &'a [LanguagePairIndex]) -> Self {
        let cells = indices
            .iter()
            .map(|index| (index.id(), index.get(source).unwrap_or("")))
            .collect();
        Self { source, cells }
    }

    /// Source then cells, in header order.
    pub fn record(&self) -> Vec<&'a str> {
        std::iter::once(self.source)
            .chain(self.cells.values().copied())
            .collect()
    }
}

/// `source` followed by the sorted language pair identifiers.
pub fn header(indices: &[LanguagePairIndex]) -> Vec<&str> {
    std::iter::once(SOURCE_COLUMN)
        .chain(indices.iter().map(|index| index.id()).sorted().dedup())
        .collect()
}

/// Rows for the given sources, sorted by source.
pub fn rows<'a>(
    sources: impl IntoIterator<Item = &'a str>,
    indices: &'a [LanguagePairIndex],
) -> Vec<AlignedRow<'a>> {
    sources
        .into_iter()
        .sorted()
        .dedup()
        .map(|source| AlignedRow::new(source, indices))
        .collect()
}

pub struct AlignedTableWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl AlignedTableWriter<File> {
    /// Create the table file, along with its parent directories.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        debug!("writing aligned table to {:?}", path);
        let writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_path(path)?;
        Ok(Self { writer })
    }
}

impl<W: Write> AlignedTableWriter<W> {
    pub fn new(inner: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(inner);
        Self { writer }
    }

    /// Write the header and one row per source. Returns the number of rows written.
    pub fn write<'a>(
        &mut self,
        sources: impl IntoIterator<Item = &'a str>,
        indices: &'a [LanguagePairIndex],
    ) -> Result<usize, Error> {
        self.writer.write_record(header(indices))?;

        let mut nb_rows = 0;
        for row in rows(sources, indices) {
            self.writer.write_record(row.record())?;
            nb_rows += 1;
        }
        self.writer.flush()?;

        Ok(nb_rows)
    }

    pub fn into_inner(self) -> Result<W, Error> {
        self.writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }
}
