/*! Corpus reading utilities

- [corpus] discovers language pairs and their bitext files,
- [bitext] reads bitext files record by record.

!*/
pub mod bitext;
pub mod corpus;

pub use bitext::{BitextReader, BitextRecord, LineCounts};
pub use corpus::Corpus;
