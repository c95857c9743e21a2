//! The hash-map used for the transient lookup tables of this crate.
//!
//! None of the algorithms iterate over these maps to produce output, so the
//! iteration order of the hasher never leaks into the generated geometry.

pub use hashbrown::hash_map::Entry;

/// Hashmap using [`hashbrown::HashMap`] with its default hasher.
pub type HashMap<K, V> = hashbrown::hash_map::HashMap<K, V>;
