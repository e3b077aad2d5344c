//! Core data types for activity networks.

use rustc_hash::FxHashMap;

use crate::critical_path::{calculate_critical_path, CriticalPath, CycleError};

/// Dense activity id (u32 for compact storage and fast hashing).
///
/// Indexes into the owning graph's arena; never dangles once a graph has
/// been fully built.
pub type ActivityId = u32;

/// One raw activity record, as supplied by the input format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityDescriptor {
    pub id: String,
    pub description: String,
    pub duration: u64,
    /// Referenced activity ids; may name activities that appear later in
    /// the input sequence.
    pub predecessor_ids: Vec<String>,
}

/// An activity in a fully linked dependency graph.
#[derive(Clone, Debug)]
pub struct Activity {
    /// Unique identifier, the graph's primary key.
    pub id: String,
    /// Free-text label; plays no role in the computation.
    pub description: String,
    /// Non-negative weight of this activity.
    pub duration: u64,
    /// Activities that must complete before this one starts, as non-owning
    /// references into the graph's arena, in declaration order.
    pub predecessors: Vec<ActivityId>,
}

/// An immutable activity network.
///
/// A single arena owns every [`Activity`]; predecessor links are ids into
/// that arena rather than direct object references, so the structure stays
/// acyclic in ownership terms even when the dependency relation is not.
#[derive(Clone, Debug, Default)]
pub struct ActivityGraph {
    activities: Vec<Activity>,
    index: FxHashMap<String, ActivityId>,
}

impl ActivityGraph {
    pub(crate) fn from_parts(
        activities: Vec<Activity>,
        index: FxHashMap<String, ActivityId>,
    ) -> Self {
        Self { activities, index }
    }

    /// All activities, in insertion order.
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Look up an activity by its string id.
    pub fn get(&self, id: &str) -> Option<&Activity> {
        self.index.get(id).and_then(|&i| self.resolve(i))
    }

    /// Resolve an arena id to its activity.
    #[inline]
    pub fn resolve(&self, id: ActivityId) -> Option<&Activity> {
        self.activities.get(id as usize)
    }

    /// Number of activities in the graph.
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// String ids of an activity's predecessors, in declaration order.
    pub fn predecessor_ids<'g>(
        &'g self,
        activity: &'g Activity,
    ) -> impl Iterator<Item = &'g str> + 'g {
        activity
            .predecessors
            .iter()
            .filter_map(move |&p| self.resolve(p))
            .map(|a| a.id.as_str())
    }

    /// Compute the critical path of this network.
    ///
    /// Returns the maximum-total-duration source-to-sink sequence of
    /// activities and its total duration. The result does not depend on the
    /// order activities were inserted in.
    ///
    /// # Errors
    /// Returns [`CycleError`] if the predecessor relation contains a cycle;
    /// the graph itself is left untouched and can still be inspected.
    pub fn critical_path(&self) -> Result<CriticalPath<'_, Activity>, CycleError> {
        calculate_critical_path(
            &self.activities,
            |a| a.id.as_str(),
            |a| {
                a.predecessors
                    .iter()
                    .filter_map(move |&p| self.resolve(p))
                    .map(|pred| pred.id.as_str())
            },
            |a| a.duration,
        )
    }
}
