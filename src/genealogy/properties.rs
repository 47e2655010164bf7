//! Property tests over random operation sequences

use super::variant::testing::Probe;
use super::{GenealogyError, VirusGenealogy};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

type Genealogy = VirusGenealogy<Probe>;

#[derive(Debug, Clone)]
enum Op {
    Create(u32, Vec<u32>),
    Connect(u32, u32),
    Remove(u32),
}

/// Small id space so operations collide often
fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u32..12, prop::collection::vec(0u32..12, 0..4))
            .prop_map(|(id, parents)| Op::Create(id, parents)),
        2 => (0u32..12, 0u32..12).prop_map(|(child, parent)| Op::Connect(child, parent)),
        1 => (0u32..12).prop_map(Op::Remove),
    ]
}

fn state(g: &Genealogy) -> Vec<(u32, Vec<u32>, Vec<u32>)> {
    g.ids()
        .into_iter()
        .map(|id| (id, g.parents(&id).unwrap(), g.children(&id).unwrap()))
        .collect()
}

fn apply(g: &mut Genealogy, op: &Op) -> Result<(), GenealogyError> {
    match op {
        Op::Create(id, parents) => g.create(*id, parents),
        Op::Connect(child, parent) => g.connect(child, parent),
        Op::Remove(id) => g.remove(id).map(|_| ()),
    }
}

fn check_invariants(g: &Genealogy) -> Result<(), TestCaseError> {
    let stem = *g.stem_id();
    prop_assert!(g.exists(&stem));
    prop_assert!(g.parents(&stem).unwrap().is_empty());

    for id in g.ids() {
        for child in g.children(&id).unwrap() {
            prop_assert!(g.exists(&child));
            prop_assert!(g.parents(&child).unwrap().contains(&id));
        }
        for parent in g.parents(&id).unwrap() {
            prop_assert!(g.exists(&parent));
            prop_assert!(g.children(&parent).unwrap().contains(&id));
        }
        prop_assert!(
            !g.descendants(&id).unwrap().contains(&id),
            "{} reaches itself",
            id
        );
    }
    Ok(())
}

proptest! {
    #[test]
    fn invariants_hold_after_every_operation(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut g = Genealogy::new(0);
        for op in &ops {
            let before = state(&g);
            match apply(&mut g, op) {
                Err(_) => {
                    prop_assert_eq!(&before, &state(&g));
                }
                Ok(()) => {
                    if let Op::Connect(child, parent) = op {
                        let after = state(&g);
                        prop_assert!(g.connect(child, parent).is_ok());
                        prop_assert_eq!(&after, &state(&g));
                    }
                }
            }
            check_invariants(&g)?;
        }
    }

    #[test]
    fn stem_removal_always_forbidden(ops in prop::collection::vec(op_strategy(), 0..32)) {
        let mut g = Genealogy::new(0);
        for op in &ops {
            let _ = apply(&mut g, op);
        }
        prop_assert_eq!(g.remove(&0), Err(GenealogyError::ForbiddenRemoval("0".into())));
        prop_assert!(g.exists(&0));
    }
}
