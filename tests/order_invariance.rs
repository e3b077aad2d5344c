//! Order-invariance and cycle properties of the full pipeline.
//!
//! Random networks are generated bottom-up (predecessors always point at
//! lower-numbered activities, so they are acyclic by construction), then
//! permuted; the computed path and total must not depend on the
//! permutation. Cyclic variants append a loop-closing activity.

use critpath::{build_graph, ActivityDescriptor, BuildError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn descriptor(id: &str, description: &str, duration: u64, preds: &[&str]) -> ActivityDescriptor {
    ActivityDescriptor {
        id: id.to_string(),
        description: description.to_string(),
        duration,
        predecessor_ids: preds.iter().map(|p| p.to_string()).collect(),
    }
}

fn scenario() -> Vec<ActivityDescriptor> {
    vec![
        descriptor("A", "Start", 0, &[]),
        descriptor("B", "Design", 5, &["A"]),
        descriptor("C", "Build", 10, &["A"]),
        descriptor("D", "Test", 3, &["B", "C"]),
    ]
}

fn compute(descriptors: Vec<ActivityDescriptor>) -> (Vec<String>, u64) {
    let graph = build_graph(descriptors).expect("network builds");
    let path = graph.critical_path().expect("network is acyclic");
    (
        path.nodes.iter().map(|a| a.id.clone()).collect(),
        path.total_weight,
    )
}

fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    if items.is_empty() {
        return vec![Vec::new()];
    }
    let mut result = Vec::new();
    for (i, item) in items.iter().enumerate() {
        let mut rest = items.to_vec();
        rest.remove(i);
        for mut tail in permutations(&rest) {
            let mut perm = Vec::with_capacity(items.len());
            perm.push(item.clone());
            perm.append(&mut tail);
            result.push(perm);
        }
    }
    result
}

#[test]
fn scenario_holds_for_every_permutation() {
    for perm in permutations(&scenario()) {
        let (ids, total) = compute(perm);
        assert_eq!(ids, vec!["A", "C", "D"]);
        assert_eq!(total, 13);
    }
}

#[test]
fn removing_the_cycle_edge_restores_the_original_result() {
    let baseline = compute(scenario());

    // Make the start activity depend on the finish activity: D already
    // depends on A transitively, so this closes a cycle.
    let mut cyclic = scenario();
    cyclic[0].predecessor_ids.push("D".to_string());
    for perm in permutations(&cyclic) {
        let graph = build_graph(perm).expect("cyclic network still builds");
        assert!(graph.critical_path().is_err());
    }

    assert_eq!(compute(scenario()), baseline);
}

/// Acyclic by construction: activity `i` may only name activities `j < i`.
fn arb_network() -> impl Strategy<Value = Vec<ActivityDescriptor>> {
    prop::collection::vec((0u64..20, prop::collection::vec(any::<bool>(), 12)), 1..12).prop_map(
        |specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (duration, picks))| ActivityDescriptor {
                    id: format!("a{i:02}"),
                    description: format!("activity-{i}"),
                    duration,
                    predecessor_ids: picks
                        .iter()
                        .enumerate()
                        .filter(|&(j, &picked)| picked && j < i)
                        .map(|(j, _)| format!("a{j:02}"))
                        .collect(),
                })
                .collect()
        },
    )
}

fn arb_permuted_network() -> impl Strategy<Value = (Vec<ActivityDescriptor>, Vec<ActivityDescriptor>)>
{
    arb_network().prop_flat_map(|net| {
        let original = net.clone();
        Just(net)
            .prop_shuffle()
            .prop_map(move |shuffled| (original.clone(), shuffled))
    })
}

fn arb_cyclic_network() -> impl Strategy<Value = Vec<ActivityDescriptor>> {
    arb_network()
        .prop_map(|mut net| {
            let head = net[0].id.clone();
            net[0].predecessor_ids.push("loopback".to_string());
            net.push(ActivityDescriptor {
                id: "loopback".to_string(),
                description: "closes-the-cycle".to_string(),
                duration: 1,
                predecessor_ids: vec![head],
            });
            net
        })
        .prop_shuffle()
}

fn arb_dangling_network() -> impl Strategy<Value = Vec<ActivityDescriptor>> {
    arb_network()
        .prop_map(|mut net| {
            net.push(ActivityDescriptor {
                id: "dangler".to_string(),
                description: "references-nothing".to_string(),
                duration: 1,
                predecessor_ids: vec!["ghost".to_string()],
            });
            net
        })
        .prop_shuffle()
}

proptest! {
    #[test]
    fn path_invariant_under_permutation((original, shuffled) in arb_permuted_network()) {
        assert_eq!(compute(original), compute(shuffled));
    }

    #[test]
    fn back_edge_reported_as_cycle_for_any_permutation(net in arb_cyclic_network()) {
        let graph = build_graph(net).expect("cyclic network still builds");
        prop_assert!(graph.critical_path().is_err());
    }

    #[test]
    fn unknown_reference_unresolved_for_any_permutation(net in arb_dangling_network()) {
        match build_graph(net) {
            Err(BuildError::UnresolvedPredecessor { id, missing }) => {
                prop_assert_eq!(id, "dangler");
                prop_assert_eq!(missing, vec!["ghost".to_string()]);
            }
            other => prop_assert!(false, "expected UnresolvedPredecessor, got {:?}", other.map(|g| g.len())),
        }
    }
}
