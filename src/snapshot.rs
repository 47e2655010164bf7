//! Snapshot: a serializable picture of a genealogy
//!
//! Built only through the public query API of [`VirusGenealogy`]. A snapshot
//! is a one-way export; nothing reads it back into a live genealogy.

use crate::genealogy::{Variant, VirusGenealogy};
use serde::{Deserialize, Serialize};

/// Edges of one variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotNode<Id> {
    pub id: Id,
    pub parents: Vec<Id>,
    pub children: Vec<Id>,
}

/// Every variant of a genealogy with its direct relatives, in id order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenealogySnapshot<Id> {
    pub stem: Id,
    pub variants: Vec<SnapshotNode<Id>>,
}

impl<Id: Clone> GenealogySnapshot<Id> {
    /// Capture the current state of a genealogy
    pub fn capture<V>(genealogy: &VirusGenealogy<V>) -> Self
    where
        V: Variant<Id = Id>,
    {
        let variants = genealogy
            .ids()
            .into_iter()
            .filter_map(|id| {
                let parents = genealogy.parents(&id).ok()?;
                let children = genealogy.children(&id).ok()?;
                Some(SnapshotNode {
                    id,
                    parents,
                    children,
                })
            })
            .collect();

        Self {
            stem: genealogy.stem_id().clone(),
            variants,
        }
    }

    /// Number of parent -> child edges
    pub fn edge_count(&self) -> usize {
        self.variants.iter().map(|v| v.children.len()).sum()
    }
}

impl<Id: Serialize> GenealogySnapshot<Id> {
    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Strain;

    fn sample() -> VirusGenealogy<Strain> {
        let mut g = VirusGenealogy::<Strain>::new("a".to_string());
        g.create_one("b".into(), "a".into()).unwrap();
        g.create("c".into(), &["a".to_string(), "b".to_string()])
            .unwrap();
        g
    }

    #[test]
    fn test_capture_lists_every_variant() {
        let snapshot = GenealogySnapshot::capture(&sample());
        assert_eq!(snapshot.stem, "a");
        let ids: Vec<&str> = snapshot.variants.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(snapshot.variants[2].parents, vec!["a", "b"]);
        assert_eq!(snapshot.edge_count(), 3);
    }

    #[test]
    fn test_compact_json() {
        let mut g = VirusGenealogy::<Strain>::new("a".to_string());
        g.create_one("b".into(), "a".into()).unwrap();
        let json = GenealogySnapshot::capture(&g).to_json(false).unwrap();
        assert_eq!(
            json,
            r#"{"stem":"a","variants":[{"id":"a","parents":[],"children":["b"]},{"id":"b","parents":["a"],"children":[]}]}"#
        );
    }

    #[test]
    fn test_pretty_json_parses_back() {
        let snapshot = GenealogySnapshot::capture(&sample());
        let json = snapshot.to_json(true).unwrap();
        assert!(json.contains('\n'));
        let parsed: GenealogySnapshot<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }
}
