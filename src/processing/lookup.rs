/*! Translation lookup

Finds the translations of a list of source sentences across every language pair,
and writes them as an aligned table (see [crate::io::writer::aligned]).

Unlike [crate::processing::align], no coverage threshold applies: every requested source gets a row.
!*/
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{info, warn};

use crate::error::Error;
use crate::io::writer::AlignedTableWriter;
use crate::processing::scan::Scanner;

/// Read source sentences, one per line. Lines are trimmed, blank ones are ignored.
pub fn read_sources(path: &Path) -> Result<BTreeSet<String>, Error> {
    let map_err = |source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    };
    let f = File::open(path).map_err(map_err)?;

    let mut sources = BTreeSet::new();
    for line in BufReader::new(f).lines() {
        let line = line.map_err(map_err)?;
        let line = line.trim();
        if !line.is_empty() {
            sources.insert(line.to_string());
        }
    }

    info!("loaded {} unique source sentence(s) to find", sources.len());
    Ok(sources)
}

/// Write the translations of `sources` found by `scanner` to `dst`. Returns the number of rows.
pub fn lookup(scanner: &Scanner, sources: &BTreeSet<String>, dst: &Path) -> Result<usize, Error> {
    let language_pairs = scanner.corpus().language_pairs()?;
    if language_pairs.is_empty() {
        warn!(
            "no language pair directories found in {:?}",
            scanner.corpus().root()
        );
    }

    let indices = scanner.scan(&language_pairs)?;
    for index in &indices {
        let found = sources.iter().filter(|s| index.contains(s)).count();
        info!("[{}] {} of {} source(s) found", index.id(), found, sources.len());
    }

    let mut writer = AlignedTableWriter::from_path(dst)?;
    writer.write(sources.iter().map(String::as_str), &indices)
}
