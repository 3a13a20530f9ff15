use std::fmt;
use std::hash::Hash;

/// Anything that can be printed on the side of a die.
///
/// Faces must be totally ordered so combos can be sorted, and hashable so
/// face sets can be compared. Strings, chars and integers all qualify; floats
/// don't.
pub trait Face: Clone + Ord + Hash + fmt::Debug + fmt::Display {}

impl<T> Face for T where T: Clone + Ord + Hash + fmt::Debug + fmt::Display {}

/// Label of a face for error messages.
pub(crate) fn label<F: Face>(face: &F) -> String {
    format!("{:?}", face)
}
