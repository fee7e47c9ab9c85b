//! Corpus tree conventions.
//!
//! Bitext files live at
//! `<root>/<language pair>/<domain>/[<sub domain>/..]/<container>/<stage>/<file>.<extension>`.
//!
//! [Layout] holds the names that make a directory eligible (container, stages, extension)
//! and decomposes file paths into [PathMetadata] by validating them against that schema.
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Parent directory name of every stage directory.
pub const DEFAULT_CONTAINER: &str = "translation_text";
/// Stages aligned when none are specified.
pub const DEFAULT_STAGES: [&str; 1] = ["source_reviewed"];
/// Stages read by corpus-wide tools (statistics, filtering) when none are specified.
pub const CORPUS_STAGES: [&str; 2] = ["source_translated", "source_reviewed"];
/// Stages produced by the translation workflow.
pub const KNOWN_STAGES: [&str; 3] = ["source_translated", "source_reviewed", "translated_reviewed"];
pub const DEFAULT_EXTENSION: &str = "txt";
pub const DEFAULT_SEPARATOR: char = '-';

/// language pair, domain, container, stage, file.
const MIN_DEPTH: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    container: String,
    stages: Vec<String>,
    extension: String,
    separator: char,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            container: DEFAULT_CONTAINER.to_string(),
            stages: DEFAULT_STAGES.iter().map(|s| s.to_string()).collect(),
            extension: DEFAULT_EXTENSION.to_string(),
            separator: DEFAULT_SEPARATOR,
        }
    }
}

impl Layout {
    pub fn new(container: String, stages: Vec<String>, extension: String, separator: char) -> Self {
        Self {
            container,
            stages,
            // accept both `txt` and `.txt`
            extension: extension.trim_start_matches('.').to_string(),
            separator,
        }
    }

    /// Same layout, scanning `stages` instead.
    pub fn with_stages(mut self, stages: Vec<String>) -> Self {
        self.stages = stages;
        self
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn stages(&self) -> &[String] {
        &self.stages
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// A language pair directory name contains the separator (`HIN-BAN`).
    pub fn is_language_pair(&self, name: &str) -> bool {
        name.contains(self.separator)
    }

    pub fn is_stage(&self, name: &str) -> bool {
        self.stages.iter().any(|s| s == name)
    }

    /// A directory is eligible when its name is a stage *and* its parent is the container.
    pub fn is_stage_dir(&self, dir: &Path) -> bool {
        let name = dir.file_name().and_then(|n| n.to_str());
        let parent = dir
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str());

        match (name, parent) {
            (Some(name), Some(parent)) => self.is_stage(name) && parent == self.container,
            _ => false,
        }
    }

    /// Case insensitive extension check.
    pub fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(&self.extension))
            .unwrap_or(false)
    }

    /// Decompose the path of a bitext file located under `root`.
    ///
    /// The relative path must have at least [MIN_DEPTH] segments, start with a language pair
    /// and end with `<container>/<stage>/<file>`. Segments between the domain and the container
    /// form the (optional) sub domain.
    pub fn metadata(&self, root: &Path, path: &Path) -> Result<PathMetadata, PathStructureError> {
        let relative = path
            .strip_prefix(root)
            .map_err(|_| PathStructureError::OutsideRoot(path.to_path_buf()))?;

        let segments = relative
            .components()
            .map(|c| match c {
                Component::Normal(s) => s
                    .to_str()
                    .ok_or_else(|| PathStructureError::NonUtf8(path.to_path_buf())),
                _ => Err(PathStructureError::UnexpectedComponent(path.to_path_buf())),
            })
            .collect::<Result<Vec<&str>, PathStructureError>>()?;

        let depth = segments.len();
        if depth < MIN_DEPTH {
            return Err(PathStructureError::TooShallow {
                path: path.to_path_buf(),
                depth,
                expected: MIN_DEPTH,
            });
        }

        let language_pair = segments[0];
        let domain = segments[1];
        let container = segments[depth - 3];
        let stage = segments[depth - 2];

        if !self.is_language_pair(language_pair) {
            return Err(PathStructureError::NotALanguagePair {
                path: path.to_path_buf(),
                found: language_pair.to_string(),
            });
        }
        if container != self.container {
            return Err(PathStructureError::UnexpectedSegment {
                path: path.to_path_buf(),
                expected: self.container.clone(),
                found: container.to_string(),
            });
        }
        if !self.is_stage(stage) {
            return Err(PathStructureError::UnknownStage {
                path: path.to_path_buf(),
                found: stage.to_string(),
            });
        }

        let sub_domain = &segments[2..depth - 3];
        let sub_domain = if sub_domain.is_empty() {
            None
        } else {
            Some(sub_domain.join("/"))
        };

        Ok(PathMetadata {
            language_pair: language_pair.to_string(),
            domain: domain.to_string(),
            sub_domain,
            stage: stage.to_string(),
        })
    }
}

/// Identifiers carried by the location of a bitext file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMetadata {
    pub language_pair: String,
    pub domain: String,
    pub sub_domain: Option<String>,
    pub stage: String,
}

/// A path that does not follow the corpus tree schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStructureError {
    OutsideRoot(PathBuf),
    NonUtf8(PathBuf),
    UnexpectedComponent(PathBuf),
    TooShallow {
        path: PathBuf,
        depth: usize,
        expected: usize,
    },
    NotALanguagePair {
        path: PathBuf,
        found: String,
    },
    UnexpectedSegment {
        path: PathBuf,
        expected: String,
        found: String,
    },
    UnknownStage {
        path: PathBuf,
        found: String,
    },
}

impl fmt::Display for PathStructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutsideRoot(p) => write!(f, "{:?} is not under the corpus root", p),
            Self::NonUtf8(p) => write!(f, "{:?} is not valid UTF-8", p),
            Self::UnexpectedComponent(p) => write!(f, "{:?} has a non-normal component", p),
            Self::TooShallow {
                path,
                depth,
                expected,
            } => write!(
                f,
                "{:?} has {} segments, expected at least {}",
                path, depth, expected
            ),
            Self::NotALanguagePair { path, found } => {
                write!(f, "{:?}: {:?} is not a language pair", path, found)
            }
            Self::UnexpectedSegment {
                path,
                expected,
                found,
            } => write!(f, "{:?}: expected {:?}, found {:?}", path, expected, found),
            Self::UnknownStage { path, found } => {
                write!(f, "{:?}: unknown stage {:?}", path, found)
            }
        }
    }
}

impl std::error::Error for PathStructureError {}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn metadata_with_sub_domain() {
        let layout = Layout::default();
        let root = Path::new("/data");
        let path = Path::new("/data/HIN-BAN/EDU/NCERT_PHY/translation_text/source_reviewed/f1.txt");

        let meta = layout.metadata(root, path).unwrap();
        assert_eq!(meta.language_pair, "HIN-BAN");
        assert_eq!(meta.domain, "EDU");
        assert_eq!(meta.sub_domain.as_deref(), Some("NCERT_PHY"));
        assert_eq!(meta.stage, "source_reviewed");
    }

    #[test]
    fn metadata_without_sub_domain() {
        let layout = Layout::default();
        let root = Path::new("/data");
        let path = Path::new("/data/HIN-BAN/HLT/translation_text/source_reviewed/f1.txt");

        let meta = layout.metadata(root, path).unwrap();
        assert_eq!(meta.domain, "HLT");
        assert_eq!(meta.sub_domain, None);
    }

    #[test]
    fn metadata_deep_sub_domain() {
        let layout = Layout::default();
        let root = Path::new("/data");
        let path = Path::new("/data/A-B/GOV/x/y/translation_text/source_reviewed/f.txt");

        let meta = layout.metadata(root, path).unwrap();
        assert_eq!(meta.sub_domain.as_deref(), Some("x/y"));
    }

    #[test]
    fn too_shallow() {
        let layout = Layout::default();
        let root = Path::new("/data");
        let path = Path::new("/data/A-B/translation_text/source_reviewed/f.txt");

        match layout.metadata(root, path) {
            Err(PathStructureError::TooShallow {
                depth, expected, ..
            }) => {
                assert_eq!(depth, 4);
                assert_eq!(expected, 5);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn wrong_container() {
        let layout = Layout::default();
        let root = Path::new("/data");
        let path = Path::new("/data/A-B/EDU/x/other/source_reviewed/f.txt");

        assert!(matches!(
            layout.metadata(root, path),
            Err(PathStructureError::UnexpectedSegment { .. })
        ));
    }

    #[test]
    fn unknown_stage() {
        let layout = Layout::default();
        let root = Path::new("/data");
        let path = Path::new("/data/A-B/EDU/x/translation_text/source_translated/f.txt");

        assert!(matches!(
            layout.metadata(root, path),
            Err(PathStructureError::UnknownStage { .. })
        ));
    }

    #[test]
    fn not_a_language_pair() {
        let layout = Layout::default();
        let root = Path::new("/data");
        let path = Path::new("/data/HINBAN/EDU/x/translation_text/source_reviewed/f.txt");

        assert!(matches!(
            layout.metadata(root, path),
            Err(PathStructureError::NotALanguagePair { .. })
        ));
    }

    #[test]
    fn outside_root() {
        let layout = Layout::default();
        let path = Path::new("/elsewhere/A-B/EDU/x/translation_text/source_reviewed/f.txt");

        assert!(matches!(
            layout.metadata(Path::new("/data"), path),
            Err(PathStructureError::OutsideRoot(_))
        ));
    }

    #[test]
    fn stage_dir_requires_container() {
        let layout = Layout::default();
        assert!(layout.is_stage_dir(Path::new("/a/translation_text/source_reviewed")));
        assert!(!layout.is_stage_dir(Path::new("/a/other/source_reviewed")));
        assert!(!layout.is_stage_dir(Path::new("/a/translation_text/source_translated")));
    }

    #[test]
    fn extension_case_insensitive() {
        let layout = Layout::new(
            DEFAULT_CONTAINER.to_string(),
            vec!["source_reviewed".to_string()],
            ".txt".to_string(),
            '-',
        );
        assert!(layout.has_extension(Path::new("f.TXT")));
        assert!(layout.has_extension(Path::new("f.txt")));
        assert!(!layout.has_extension(Path::new("f.tsv")));
        assert!(!layout.has_extension(Path::new("txt")));
    }
}
