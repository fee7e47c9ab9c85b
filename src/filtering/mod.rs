/*! Filtering utilities

Filters operate on bitext lines and implement [filter::Filter].

- [sentence::WordCount] keeps lines whose source has a word count within bounds.
! */
mod filter;
mod sentence;

pub use filter::Filter;
pub use sentence::WordCount;
