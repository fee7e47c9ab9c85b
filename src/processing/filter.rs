/*! Corpus filtering

Copies every bitext file of a corpus into a mirrored tree, keeping only the lines detected by a [Filter].
Kept lines are written verbatim.
!*/
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::{info, warn};

use crate::error::Error;
use crate::filtering::Filter;
use crate::io::reader::Corpus;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FilterSummary {
    pub files: u64,
    pub lines: u64,
    pub kept: u64,
}

/// Copy the lines of `reader` detected by `filter` into `writer`.
///
/// Returns `(kept, total)` line counts.
pub fn filter_lines<R, W, F>(mut reader: R, writer: &mut W, filter: &F) -> std::io::Result<(u64, u64)>
where
    R: BufRead,
    W: Write,
    F: for<'a> Filter<&'a str>,
{
    let mut line = String::new();
    let (mut kept, mut total) = (0, 0);

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        total += 1;
        if filter.detect(&line) {
            writer.write_all(line.as_bytes())?;
            kept += 1;
        }
    }

    Ok((kept, total))
}

fn filter_file<F>(src: &Path, dst: &Path, filter: &F) -> Result<(u64, u64), Error>
where
    F: for<'a> Filter<&'a str>,
{
    let map_err = |source| Error::FileRead {
        path: src.to_path_buf(),
        source,
    };
    let reader = BufReader::new(File::open(src).map_err(map_err)?);

    if let Some(parent) = dst.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(dst)?);

    let counts = filter_lines(reader, &mut writer, filter).map_err(map_err)?;
    writer.flush()?;
    Ok(counts)
}

/// Filter every bitext file of `corpus` into `dst`, mirroring the corpus tree.
///
/// `dst` must not be inside the corpus root. It is checked before anything is created.
pub fn filter<F>(corpus: &Corpus, dst: &Path, filter: &F) -> Result<FilterSummary, Error>
where
    F: for<'a> Filter<&'a str>,
{
    if corpus.contains(dst)? {
        return Err(Error::Custom(format!(
            "destination {:?} is inside the corpus root {:?}",
            dst,
            corpus.root()
        )));
    }
    std::fs::create_dir_all(dst)?;

    let mut summary = FilterSummary::default();
    for language_pair in corpus.language_pairs()? {
        for path in corpus.bitext_files(&language_pair)? {
            if let Err(e) = corpus.layout().metadata(corpus.root(), &path) {
                warn!("[{}] skipping: {}", language_pair, e);
                continue;
            }

            // metadata checked that path is under the root
            let relative = match path.strip_prefix(corpus.root()) {
                Ok(r) => r,
                Err(_) => continue,
            };
            let target = dst.join(relative);

            match filter_file(&path, &target, filter) {
                Ok((kept, total)) => {
                    info!(
                        "[{}] {:?}: kept {} of {} lines",
                        language_pair, relative, kept, total
                    );
                    summary.files += 1;
                    summary.lines += total;
                    summary.kept += kept;
                }
                Err(e) => warn!("[{}] {}", language_pair, e),
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Cursor;

    use tempfile::tempdir;

    use super::*;
    use crate::filtering::WordCount;
    use crate::layout::Layout;

    #[test]
    fn lines_are_kept_verbatim() {
        let text = "a b\tx\r\ntoo many words here\ty\nc d\tz";
        let mut out = Vec::new();
        let (kept, total) =
            filter_lines(Cursor::new(text), &mut out, &WordCount::new(2, 2)).unwrap();

        assert_eq!((kept, total), (2, 3));
        assert_eq!(String::from_utf8(out).unwrap(), "a b\tx\r\nc d\tz");
    }

    #[test]
    fn mirror_tree() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("root");
        let rel = "A-B/EDU/x/translation_text/source_reviewed/f.txt";
        let p = root.join(rel);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(&p, "one two\tx\none\ty\n").unwrap();

        let corpus = Corpus::new(&root, Layout::default()).unwrap();
        let dst = dir.path().join("filtered");
        let summary = filter(&corpus, &dst, &WordCount::new(2, 10)).unwrap();

        assert_eq!(
            summary,
            FilterSummary {
                files: 1,
                lines: 2,
                kept: 1
            }
        );
        assert_eq!(fs::read_to_string(dst.join(rel)).unwrap(), "one two\tx\n");
    }

    #[test]
    fn destination_inside_root() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let p = root.join("A-B/EDU/x/translation_text/source_reviewed/f.txt");
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(&p, "a\tb\n").unwrap();
        let corpus = Corpus::new(root, Layout::default()).unwrap();

        let res = filter(&corpus, &root.join("OUT-DIR"), &WordCount::default());
        assert!(matches!(res, Err(Error::Custom(_))));

        // a rejected destination must not show up as a language pair
        assert!(!root.join("OUT-DIR").exists());
        assert_eq!(corpus.language_pairs().unwrap(), vec!["A-B"]);
    }
}
