//! Filtering traits.

/// immutable, pure filter (2 successive equal inputs -> 2 equal outputs)
///
/// `detect` returns `true` for items to keep.
pub trait Filter<T>: Default {
    fn detect(&self, item: T) -> bool;
}
