/*! Combined text export

Concatenates the bitext files of every `(language pair, domain, stage)` into a single file,
`<dst>/<language pair>/<domain>/<stage>.<extension>`.

Files are appended in path order, each one followed by a newline. Sub domains are merged.
!*/
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::Error;
use crate::io::reader::Corpus;
use crate::processing::stats::StatsKey;

/// Group the bitext files of a corpus by statistics key.
fn groups(corpus: &Corpus) -> Result<BTreeMap<StatsKey, Vec<PathBuf>>, Error> {
    let mut groups: BTreeMap<StatsKey, Vec<PathBuf>> = BTreeMap::new();
    for language_pair in corpus.language_pairs()? {
        for path in corpus.bitext_files(&language_pair)? {
            match corpus.layout().metadata(corpus.root(), &path) {
                Ok(meta) => groups.entry(StatsKey::from(&meta)).or_default().push(path),
                Err(e) => warn!("[{}] skipping: {}", language_pair, e),
            }
        }
    }
    Ok(groups)
}

/// Append `files` to a new file at `dst`.
///
/// The destination is only created once a source file could be opened.
/// Returns the number of files appended.
fn concat(files: &[PathBuf], dst: &Path) -> Result<usize, Error> {
    let mut writer: Option<BufWriter<File>> = None;
    let mut appended = 0;

    for path in files {
        let mut src = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("could not open {:?}: {}", path, e);
                continue;
            }
        };

        if writer.is_none() {
            if let Some(parent) = dst.parent() {
                std::fs::create_dir_all(parent)?;
            }
            writer = Some(BufWriter::new(File::create(dst)?));
        }

        if let Some(w) = writer.as_mut() {
            if let Err(e) = std::io::copy(&mut src, w) {
                warn!("could not read {:?} through: {}", path, e);
            }
            w.write_all(b"\n")?;
            appended += 1;
        }
    }

    if let Some(mut w) = writer {
        w.flush()?;
    }
    Ok(appended)
}

/// Write the combined text of every statistics entry of `corpus` under `dst`.
///
/// `dst` must not be inside the corpus root. Returns the number of combined files written.
pub fn combine(corpus: &Corpus, dst: &Path) -> Result<usize, Error> {
    if corpus.contains(dst)? {
        return Err(Error::Custom(format!(
            "destination {:?} is inside the corpus root {:?}",
            dst,
            corpus.root()
        )));
    }

    let mut written = 0;
    for (key, files) in groups(corpus)? {
        let target = dst
            .join(&key.language_pair)
            .join(&key.domain)
            .join(format!("{}.{}", key.stage, corpus.layout().extension()));

        let appended = concat(&files, &target)?;
        if appended > 0 {
            info!(
                "[{}] combined {} file(s) into {:?}",
                key.language_pair, appended, target
            );
            written += 1;
        }
    }

    Ok(written)
}
