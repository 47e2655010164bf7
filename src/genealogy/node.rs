//! Graph node: one variant plus the ids of its direct relatives

use super::Variant;
use std::collections::BTreeSet;

/// A node owned by the genealogy
///
/// Relatives are referenced by id only, never by ownership.
#[derive(Debug, Clone)]
pub(crate) struct VariantNode<V: Variant> {
    pub(crate) variant: V,
    pub(crate) parents: BTreeSet<V::Id>,
    pub(crate) children: BTreeSet<V::Id>,
}

impl<V: Variant> VariantNode<V> {
    pub(crate) fn new(variant: V) -> Self {
        Self {
            variant,
            parents: BTreeSet::new(),
            children: BTreeSet::new(),
        }
    }

    pub(crate) fn with_parents(variant: V, parents: BTreeSet<V::Id>) -> Self {
        Self {
            variant,
            parents,
            children: BTreeSet::new(),
        }
    }
}
