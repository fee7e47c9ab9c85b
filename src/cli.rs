//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

use polyalign::layout::{Layout, CORPUS_STAGES, DEFAULT_STAGES};
use polyalign::processing::{AlignOptions, ConflictPolicy, EmptyPairPolicy};

#[derive(Debug, StructOpt)]
#[structopt(name = "polyalign", about = "parallel corpus aggregation tool.")]
/// Holds every command that is callable by the `polyalign` command.
pub enum Polyalign {
    #[structopt(about = "Write the sources shared by enough language pairs as an aligned table")]
    Align(Align),
    #[structopt(about = "Count files, lines and words by language pair, domain and stage")]
    Stats(Stats),
    #[structopt(about = "Find the translations of a list of source sentences")]
    Lookup(Lookup),
    #[structopt(about = "Copy the corpus, keeping lines within a source word count range")]
    Filter(Filter),
}

/// Corpus tree conventions, shared by every command.
#[derive(Debug, StructOpt)]
pub struct LayoutArgs {
    #[structopt(
        long = "container",
        help = "parent directory name of stage directories",
        default_value = "translation_text"
    )]
    pub container: String,
    #[structopt(
        long = "stage",
        help = "stage directory names to read (comma separated). Default is source_reviewed for align and lookup, source_translated,source_reviewed for stats and filter.",
        use_delimiter = true
    )]
    pub stages: Vec<String>,
    #[structopt(
        long = "extension",
        help = "bitext file extension",
        default_value = "txt"
    )]
    pub extension: String,
    #[structopt(
        long = "separator",
        help = "character found in language pair directory names",
        default_value = "-"
    )]
    pub separator: char,
}

impl LayoutArgs {
    /// Build the layout, reading `default_stages` when no stage was given.
    pub fn to_layout(&self, default_stages: &[&str]) -> Layout {
        let stages = if self.stages.is_empty() {
            default_stages.iter().map(|s| s.to_string()).collect()
        } else {
            self.stages.clone()
        };
        Layout::new(
            self.container.clone(),
            stages,
            self.extension.clone(),
            self.separator,
        )
    }
}

#[derive(Debug, StructOpt)]
/// Align command and parameters.
///
/// ```sh
/// polyalign-align 0.1.0
/// Write the sources shared by enough language pairs as an aligned table
///
/// USAGE:
///     polyalign align [FLAGS] [OPTIONS] <src> <dst>
///
/// FLAGS:
///     -r, --report    print per language pair diagnostics
///
/// ARGS:
///     <src>    corpus root (contains language pair directories)
///     <dst>    aligned table destination
/// ```
pub struct Align {
    #[structopt(parse(from_os_str), help = "corpus root (contains language pair directories)")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "aligned table destination")]
    pub dst: PathBuf,
    #[structopt(
        short = "f",
        long = "min-fraction",
        help = "minimum fraction of language pairs a source has to be in",
        default_value = "0.6"
    )]
    pub min_fraction: f64,
    #[structopt(
        long = "conflict",
        help = "duplicate source policy: last-wins, first-wins or reject",
        default_value = "last-wins"
    )]
    pub conflict: ConflictPolicy,
    #[structopt(
        long = "empty-pairs",
        help = "whether language pairs without data count toward coverage: count or ignore",
        default_value = "count"
    )]
    pub empty_pairs: EmptyPairPolicy,
    #[structopt(
        short = "d",
        long = "domain",
        help = "only read these domains (comma separated). Default is all.",
        use_delimiter = true
    )]
    pub domains: Vec<String>,
    #[structopt(short = "r", long = "report", help = "print per language pair diagnostics")]
    pub report: bool,
    #[structopt(flatten)]
    pub layout: LayoutArgs,
}

impl Align {
    pub fn layout(&self) -> Layout {
        self.layout.to_layout(&DEFAULT_STAGES)
    }

    pub fn options(&self) -> AlignOptions {
        AlignOptions {
            min_fraction: self.min_fraction,
            conflict: self.conflict,
            empty_pairs: self.empty_pairs,
            domains: domains(&self.domains),
            report: self.report,
        }
    }
}

fn domains(domains: &[String]) -> Option<Vec<String>> {
    if domains.is_empty() {
        None
    } else {
        Some(domains.to_vec())
    }
}

#[derive(Debug, StructOpt)]
pub struct Stats {
    #[structopt(parse(from_os_str), help = "corpus root")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), short = "c", long = "csv", help = "save statistics as CSV")]
    pub csv: Option<PathBuf>,
    #[structopt(parse(from_os_str), short = "j", long = "json", help = "save statistics as JSON")]
    pub json: Option<PathBuf>,
    #[structopt(
        parse(from_os_str),
        long = "distribution",
        help = "save the per file source length distribution as CSV"
    )]
    pub distribution: Option<PathBuf>,
    #[structopt(
        parse(from_os_str),
        short = "o",
        long = "output",
        help = "directory to save combined texts into (<lang pair>/<domain>/<stage>.txt)"
    )]
    pub output: Option<PathBuf>,
    #[structopt(flatten)]
    pub layout: LayoutArgs,
}

impl Stats {
    pub fn layout(&self) -> Layout {
        self.layout.to_layout(&CORPUS_STAGES)
    }
}

#[derive(Debug, StructOpt)]
pub struct Lookup {
    #[structopt(parse(from_os_str), help = "source sentences, one per line")]
    pub sources: PathBuf,
    #[structopt(parse(from_os_str), help = "corpus root")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "translation table destination")]
    pub dst: PathBuf,
    #[structopt(
        long = "conflict",
        help = "duplicate source policy: last-wins, first-wins or reject",
        default_value = "last-wins"
    )]
    pub conflict: ConflictPolicy,
    #[structopt(
        short = "d",
        long = "domain",
        help = "only read these domains (comma separated). Default is all.",
        use_delimiter = true
    )]
    pub domains: Vec<String>,
    #[structopt(flatten)]
    pub layout: LayoutArgs,
}

impl Lookup {
    pub fn layout(&self) -> Layout {
        self.layout.to_layout(&DEFAULT_STAGES)
    }

    pub fn domains(&self) -> Option<Vec<String>> {
        domains(&self.domains)
    }
}

#[derive(Debug, StructOpt)]
pub struct Filter {
    #[structopt(parse(from_os_str), help = "source corpus location")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination corpus location")]
    pub dst: PathBuf,
    #[structopt(long = "min-words", help = "minimum source word count", default_value = "6")]
    pub min_words: usize,
    #[structopt(long = "max-words", help = "maximum source word count", default_value = "55")]
    pub max_words: usize,
    #[structopt(flatten)]
    pub layout: LayoutArgs,
}

impl Filter {
    pub fn layout(&self) -> Layout {
        self.layout.to_layout(&CORPUS_STAGES)
    }
}
