use core::hash::{Hash, Hasher};

use crate::math::{Point, Real};

/// A structure that implements `Eq` and is hashable even if the wrapped data
/// only implements `PartialEq`.
///
/// Two wrapped points are equal iff their coordinates are exactly equal. This
/// is what allows the vertices of a mesh sharing the same position to be
/// merged into a single topological point.
#[derive(PartialEq, Clone, Debug)]
pub struct HashablePartialEq<T> {
    value: T,
}

impl<T> HashablePartialEq<T> {
    /// Creates a new `HashablePartialEq`. Please make sure that you really
    /// want to transform `T`'s partial equality into an equivalence relation.
    pub fn new(value: T) -> HashablePartialEq<T> {
        HashablePartialEq { value }
    }

    /// Gets the value wrapped by this structure.
    pub fn unwrap(self) -> T {
        self.value
    }
}

impl<T: PartialEq> Eq for HashablePartialEq<T> {}

impl Hash for HashablePartialEq<Point<Real>> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        for coord in self.value.coords.iter() {
            // `-0.0 == 0.0` so both must hash identically.
            (coord + 0.0).to_bits().hash(state);
        }
    }
}
