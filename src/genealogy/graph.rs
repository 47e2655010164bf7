//! VirusGenealogy: the descent graph
//!
//! Nodes live in one map keyed by id and refer to their relatives by id.
//! Every mutation validates all of its preconditions before touching the
//! map, so a failed call leaves the graph exactly as it was.

use super::error::{GenealogyError, Result};
use super::node::VariantNode;
use super::Variant;
use std::collections::{btree_set, BTreeSet, HashMap, HashSet, VecDeque};
use std::ops::Index;

/// Directed acyclic graph of variants rooted at a permanent stem
#[derive(Debug, Clone)]
pub struct VirusGenealogy<V: Variant> {
    nodes: HashMap<V::Id, VariantNode<V>>,
    stem_id: V::Id,
}

impl<V: Variant> VirusGenealogy<V> {
    /// Create a genealogy holding only the stem variant
    pub fn new(stem_id: V::Id) -> Self {
        Self::with_stem(V::new(&stem_id))
    }

    /// Create a genealogy around an already built stem payload
    pub fn with_stem(stem: V) -> Self {
        let stem_id = stem.id().clone();
        let mut nodes = HashMap::new();
        nodes.insert(stem_id.clone(), VariantNode::new(stem));
        Self { nodes, stem_id }
    }

    /// Id of the stem variant
    pub fn stem_id(&self) -> &V::Id {
        &self.stem_id
    }

    pub fn exists(&self, id: &V::Id) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of variants, stem included
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Payload of the variant with the given id
    pub fn get(&self, id: &V::Id) -> Result<&V> {
        self.node(id).map(|node| &node.variant)
    }

    /// Direct parents of a variant, in id order
    pub fn parents(&self, id: &V::Id) -> Result<Vec<V::Id>> {
        Ok(self.node(id)?.parents.iter().cloned().collect())
    }

    /// Direct children of a variant, in id order
    pub fn children(&self, id: &V::Id) -> Result<Vec<V::Id>> {
        Ok(self.node(id)?.children.iter().cloned().collect())
    }

    /// Iterate over the payloads of a variant's direct children, in id order
    pub fn children_iter(&self, id: &V::Id) -> Result<Children<'_, V>> {
        Ok(Children {
            ids: self.node(id)?.children.iter(),
            nodes: &self.nodes,
        })
    }

    /// Create a variant descending from every listed parent
    ///
    /// # Errors
    /// + [`GenealogyError::AlreadyExists`] if `id` is taken.
    /// + [`GenealogyError::NotFound`] if a parent is missing or none is given.
    pub fn create(&mut self, id: V::Id, parent_ids: &[V::Id]) -> Result<()> {
        if self.exists(&id) {
            return Err(GenealogyError::already_exists(&id));
        }
        if parent_ids.is_empty() {
            return Err(GenealogyError::not_found(&id));
        }
        if let Some(missing) = parent_ids.iter().find(|parent| !self.exists(parent)) {
            return Err(GenealogyError::not_found(missing));
        }

        let variant = V::new(&id);
        let parents: BTreeSet<V::Id> = parent_ids.iter().cloned().collect();
        for parent in &parents {
            self.node_mut(parent)?.children.insert(id.clone());
        }
        self.nodes
            .insert(id, VariantNode::with_parents(variant, parents));
        Ok(())
    }

    /// Create a variant with a single parent
    pub fn create_one(&mut self, id: V::Id, parent_id: V::Id) -> Result<()> {
        self.create(id, std::slice::from_ref(&parent_id))
    }

    /// Add a parent -> child edge between two existing variants
    ///
    /// Connecting an already connected pair does nothing.
    ///
    /// # Errors
    /// + [`GenealogyError::NotFound`] if either variant is missing.
    /// + [`GenealogyError::CycleDetected`] if `parent_id` descends from `child_id`.
    /// + [`GenealogyError::ForbiddenEdge`] if `child_id` is the stem.
    pub fn connect(&mut self, child_id: &V::Id, parent_id: &V::Id) -> Result<()> {
        if !self.exists(child_id) {
            return Err(GenealogyError::not_found(child_id));
        }
        if !self.exists(parent_id) {
            return Err(GenealogyError::not_found(parent_id));
        }
        if self.node(parent_id)?.children.contains(child_id) {
            return Ok(());
        }
        if self.reaches(child_id, parent_id) {
            return Err(GenealogyError::cycle(child_id, parent_id));
        }
        // orphans are not descendants of the stem, so acyclicity alone
        // does not keep the stem parentless
        if *child_id == self.stem_id {
            return Err(GenealogyError::forbidden_edge(child_id, parent_id));
        }

        self.node_mut(parent_id)?.children.insert(child_id.clone());
        self.node_mut(child_id)?.parents.insert(parent_id.clone());
        Ok(())
    }

    /// Remove a variant and every edge touching it
    ///
    /// Children left without parents stay in the genealogy as orphans.
    ///
    /// # Returns
    /// The removed payload.
    ///
    /// # Errors
    /// + [`GenealogyError::NotFound`] if the variant is missing.
    /// + [`GenealogyError::ForbiddenRemoval`] if `id` is the stem.
    pub fn remove(&mut self, id: &V::Id) -> Result<V> {
        if !self.exists(id) {
            return Err(GenealogyError::not_found(id));
        }
        if *id == self.stem_id {
            return Err(GenealogyError::forbidden_removal(id));
        }

        let node = self
            .nodes
            .remove(id)
            .ok_or_else(|| GenealogyError::not_found(id))?;
        for parent in &node.parents {
            if let Some(parent) = self.nodes.get_mut(parent) {
                parent.children.remove(id);
            }
        }
        for child in &node.children {
            if let Some(child) = self.nodes.get_mut(child) {
                child.parents.remove(id);
            }
        }
        Ok(node.variant)
    }

    /// All variant ids, in id order
    pub fn ids(&self) -> Vec<V::Id> {
        let mut ids: Vec<V::Id> = self.nodes.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Whether a non-stem variant has lost all of its parents
    pub fn is_orphan(&self, id: &V::Id) -> Result<bool> {
        let node = self.node(id)?;
        Ok(*id != self.stem_id && node.parents.is_empty())
    }

    /// All orphaned variants, in id order
    pub fn orphans(&self) -> Vec<V::Id> {
        let mut orphans: Vec<V::Id> = self
            .nodes
            .iter()
            .filter(|(id, node)| **id != self.stem_id && node.parents.is_empty())
            .map(|(id, _)| id.clone())
            .collect();
        orphans.sort();
        orphans
    }

    /// Every variant `id` descends from, in id order
    pub fn ancestors(&self, id: &V::Id) -> Result<Vec<V::Id>> {
        self.closure(id, |node| &node.parents)
    }

    /// Every variant descending from `id`, in id order
    pub fn descendants(&self, id: &V::Id) -> Result<Vec<V::Id>> {
        self.closure(id, |node| &node.children)
    }

    /// Whether `descendant` is reachable from `ancestor` through child edges
    pub fn is_ancestor(&self, ancestor: &V::Id, descendant: &V::Id) -> Result<bool> {
        if !self.exists(ancestor) {
            return Err(GenealogyError::not_found(ancestor));
        }
        if !self.exists(descendant) {
            return Err(GenealogyError::not_found(descendant));
        }
        Ok(ancestor != descendant && self.reaches(ancestor, descendant))
    }

    fn node(&self, id: &V::Id) -> Result<&VariantNode<V>> {
        self.nodes.get(id).ok_or_else(|| GenealogyError::not_found(id))
    }

    fn node_mut(&mut self, id: &V::Id) -> Result<&mut VariantNode<V>> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| GenealogyError::not_found(id))
    }

    /// Breadth-first search along child edges; `from` reaches itself
    fn reaches<'a>(&'a self, from: &'a V::Id, to: &V::Id) -> bool {
        let mut seen: HashSet<&V::Id> = HashSet::new();
        let mut queue: VecDeque<&V::Id> = VecDeque::from([from]);

        while let Some(id) = queue.pop_front() {
            if id == to {
                return true;
            }
            if !seen.insert(id) {
                continue;
            }
            if let Some(node) = self.nodes.get(id) {
                queue.extend(node.children.iter());
            }
        }
        false
    }

    /// Transitive closure of `id` along the edges selected by `next`
    fn closure<F>(&self, id: &V::Id, next: F) -> Result<Vec<V::Id>>
    where
        F: Fn(&VariantNode<V>) -> &BTreeSet<V::Id>,
    {
        let start = self.node(id)?;
        let mut found: BTreeSet<&V::Id> = BTreeSet::new();
        let mut stack: Vec<&V::Id> = next(start).iter().collect();

        while let Some(current) = stack.pop() {
            if !found.insert(current) {
                continue;
            }
            if let Some(node) = self.nodes.get(current) {
                stack.extend(next(node).iter());
            }
        }
        Ok(found.into_iter().cloned().collect())
    }
}

/// Panics if the variant does not exist; see [`VirusGenealogy::get`]
impl<V: Variant> Index<&V::Id> for VirusGenealogy<V> {
    type Output = V;

    fn index(&self, id: &V::Id) -> &V {
        match self.get(id) {
            Ok(variant) => variant,
            Err(e) => panic!("{}", e),
        }
    }
}

/// Iterator over the payloads of a variant's children, in id order
pub struct Children<'a, V: Variant> {
    ids: btree_set::Iter<'a, V::Id>,
    nodes: &'a HashMap<V::Id, VariantNode<V>>,
}

impl<'a, V: Variant> Iterator for Children<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        let nodes = self.nodes;
        self.ids
            .next()
            .and_then(|id| nodes.get(id))
            .map(|node| &node.variant)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl<'a, V: Variant> DoubleEndedIterator for Children<'a, V> {
    fn next_back(&mut self) -> Option<&'a V> {
        let nodes = self.nodes;
        self.ids
            .next_back()
            .and_then(|id| nodes.get(id))
            .map(|node| &node.variant)
    }
}

impl<V: Variant> ExactSizeIterator for Children<'_, V> {}
