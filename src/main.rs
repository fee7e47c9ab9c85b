//! # Polyalign
//!
//! Aggregation of multilingual parallel corpora organized as
//! `<root>/<language pair>/<domain>/.../translation_text/<stage>/*.txt` trees.
//!
//! ## Getting started
//!
//! ```sh
//! polyalign 0.1.0
//! parallel corpus aggregation tool.
//!
//! USAGE:
//!     polyalign <SUBCOMMAND>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! SUBCOMMANDS:
//!     align     Write the sources shared by enough language pairs as an aligned table
//!     filter    Copy the corpus, keeping lines within a source word count range
//!     help      Prints this message or the help of the given subcommand(s)
//!     lookup    Find the translations of a list of source sentences
//!     stats     Count files, lines and words by language pair, domain and stage
//! ```
//!
//! Logging is controlled through `RUST_LOG` (e.g. `RUST_LOG=info`).
use structopt::StructOpt;

use polyalign::error::Error;
use polyalign::filtering::WordCount;
use polyalign::io::reader::Corpus;
use polyalign::processing::{self, AlignOutcome, CorpusStats, Distribution, Scanner};

#[macro_use]
extern crate log;

mod cli;

fn run(opt: cli::Polyalign) -> Result<(), Error> {
    match opt {
        cli::Polyalign::Align(a) => {
            let options = a.options();
            let outcome = processing::align::run(&a.src, &a.dst, a.layout(), options)?;

            match outcome {
                AlignOutcome::Written { rows, path } => {
                    println!("Wrote aligned table with {} rows: {:?}", rows, path)
                }
                AlignOutcome::NoLanguagePairs => println!("No language pair directories found."),
                AlignOutcome::NoSourcesSelected {
                    lp_count,
                    min_required,
                } => println!(
                    "No source sentence found in at least {} of {} language pairs.",
                    min_required, lp_count
                ),
            }
        }

        cli::Polyalign::Stats(s) => {
            let corpus = Corpus::new(&s.src, s.layout())?;
            let stats = CorpusStats::collect(&corpus)?;

            println!("\n=== Language Pair and Domain-wise Statistics ===\n");
            print!("{}", stats.table());

            if let Some(csv) = &s.csv {
                stats.to_csv(csv)?;
            }
            if let Some(json) = &s.json {
                stats.to_json(json)?;
            }
            if let Some(dist) = &s.distribution {
                Distribution::collect(&corpus)?.to_csv(dist)?;
            }
            if let Some(output) = &s.output {
                let written = processing::combine::combine(&corpus, output)?;
                println!("Wrote {} combined file(s) into {:?}", written, output);
            }
        }

        cli::Polyalign::Lookup(l) => {
            let sources = processing::lookup::read_sources(&l.sources)?;
            let domains = l.domains();
            let corpus = Corpus::new(&l.src, l.layout())?;
            let scanner = Scanner::new(corpus, l.conflict, domains);

            let rows = processing::lookup::lookup(&scanner, &sources, &l.dst)?;
            println!("Wrote {} rows: {:?}", rows, l.dst);
        }

        cli::Polyalign::Filter(f) => {
            if f.min_words > f.max_words {
                return Err(Error::Custom(format!(
                    "--min-words ({}) is greater than --max-words ({})",
                    f.min_words, f.max_words
                )));
            }
            let corpus = Corpus::new(&f.src, f.layout())?;
            let filter = WordCount::new(f.min_words, f.max_words);

            let summary = processing::filter::filter(&corpus, &f.dst, &filter)?;
            println!(
                "Kept {} of {} lines from {} file(s) into {:?}",
                summary.kept, summary.lines, summary.files, f.dst
            );
        }
    };

    Ok(())
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Polyalign::from_args();
    debug!("cli args\n{:#?}", opt);

    run(opt).map_err(|e| {
        error!("{}", e);
        e
    })
}
