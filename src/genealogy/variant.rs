//! Variant payloads tracked by a genealogy
//!
//! The genealogy never inspects a payload. It only needs to know the key
//! type and how to build a payload for a freshly created key.

use std::fmt::Debug;
use std::hash::Hash;

/// A payload stored in a [`VirusGenealogy`](super::VirusGenealogy)
///
/// `new` must be deterministic per id: calling it twice with the same id
/// produces equivalent payloads.
pub trait Variant {
    /// Unique, totally ordered key of a variant
    type Id: Ord + Hash + Clone + Debug;

    /// Build the payload for a newly created node
    fn new(id: &Self::Id) -> Self;

    /// Key this payload was built for
    fn id(&self) -> &Self::Id;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Variant;

    /// Integer-keyed variant used across the unit tests
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Probe {
        pub id: u32,
        pub label: String,
    }

    impl Variant for Probe {
        type Id = u32;

        fn new(id: &u32) -> Self {
            Self {
                id: *id,
                label: format!("probe-{}", id),
            }
        }

        fn id(&self) -> &u32 {
            &self.id
        }
    }
}
