/*! Corpus discovery

A [Corpus] is a root directory holding one directory per language pair.
It lists language pairs and, for each of them, the bitext files found in eligible stage directories
(see [crate::layout::Layout::is_stage_dir]). Symlinked directories are followed.

File lists are sorted by full path, so that every consumer folds files in the same order
whatever the filesystem enumeration order is.
!*/
use std::path::{Path, PathBuf};

use glob::Pattern;
use log::{debug, warn};

use crate::error::Error;
use crate::layout::Layout;

#[derive(Debug, Clone)]
pub struct Corpus {
    root: PathBuf,
    layout: Layout,
}

impl Corpus {
    /// Create a new corpus reader.
    ///
    /// Fails with [Error::MissingRootDirectory] if `root` is not a directory.
    pub fn new(root: &Path, layout: Layout) -> Result<Self, Error> {
        if !root.is_dir() {
            return Err(Error::MissingRootDirectory(root.to_path_buf()));
        }

        Ok(Self {
            root: root.to_path_buf(),
            layout,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Sorted names of the language pair directories directly under the root.
    pub fn language_pairs(&self) -> Result<Vec<String>, Error> {
        let mut pairs = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            // follows symlinks, like the traversal in `bitext_files`
            if !entry.path().is_dir() {
                continue;
            }
            match entry.file_name().to_str() {
                Some(name) if self.layout.is_language_pair(name) => pairs.push(name.to_string()),
                Some(_) => (),
                None => warn!("skipping non UTF-8 directory {:?}", entry.path()),
            }
        }

        pairs.sort();
        debug!("language pairs: {:?}", pairs);
        Ok(pairs)
    }

    /// Sorted bitext files of a language pair.
    ///
    /// Files are searched in `<lp>/**/<container>/<stage>/` for every configured stage.
    /// Unreadable directories are logged and skipped.
    pub fn bitext_files(&self, language_pair: &str) -> Result<Vec<PathBuf>, Error> {
        let lp_dir = self.root.join(language_pair);
        let lp_stub = lp_dir
            .to_str()
            .ok_or_else(|| Error::Custom(format!("invalid language pair path: {:?}", lp_dir)))?;

        let mut files = Vec::new();
        for stage in self.layout.stages() {
            let pattern = format!(
                "{}/**/{}/{}/*",
                Pattern::escape(lp_stub),
                Pattern::escape(self.layout.container()),
                Pattern::escape(stage)
            );

            for path in glob::glob(&pattern)? {
                match path {
                    Ok(path) => {
                        let in_stage_dir = path
                            .parent()
                            .map_or(false, |dir| self.layout.is_stage_dir(dir));
                        if in_stage_dir && path.is_file() && self.layout.has_extension(&path) {
                            files.push(path);
                        }
                    }
                    Err(e) => warn!("[{}] skipping unreadable path: {}", language_pair, e),
                }
            }
        }

        files.sort();
        files.dedup();
        debug!("[{}] {} bitext file(s)", language_pair, files.len());
        Ok(files)
    }

    /// Whether `path` is the root or lies below it, once symlinks are resolved.
    ///
    /// `path` does not have to exist: its nearest existing ancestor is resolved instead,
    /// and nothing is created.
    pub fn contains(&self, path: &Path) -> Result<bool, Error> {
        let root = self.root.canonicalize()?;
        Ok(resolve(path)?.starts_with(root))
    }
}

/// Canonicalize the longest existing prefix of `path` and append the rest.
fn resolve(path: &Path) -> Result<PathBuf, Error> {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    for ancestor in path.ancestors() {
        if !ancestor.exists() {
            continue;
        }
        if let Ok(rest) = path.strip_prefix(ancestor) {
            return Ok(ancestor.canonicalize()?.join(rest));
        }
    }
    Ok(path)
}
