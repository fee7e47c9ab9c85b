/*! Corpus writing utilities

- [aligned] writes the cross-lingual aligned table.
!*/
pub mod aligned;

pub use aligned::{AlignedRow, AlignedTableWriter};
