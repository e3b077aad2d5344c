//! Activity graph construction with deferred predecessor resolution.
//!
//! Descriptors arrive in arbitrary order and may reference predecessors
//! that only appear later in the input. Linking for such descriptors is
//! deferred; the deferred set is re-scanned to a fixed point when the
//! builder is finished, and anything still unlinked at that point names an
//! id that never appeared.

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

use crate::models::{Activity, ActivityDescriptor, ActivityGraph, ActivityId};

/// Errors raised while building an activity graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Two descriptors declared the same activity id.
    #[error("duplicate activity id '{id}'")]
    DuplicateId { id: String },
    /// After deferred resolution reached a fixed point, an activity still
    /// referenced predecessor ids that never appeared in the input.
    #[error("activity '{id}' references unknown predecessor id(s): {}", .missing.join(", "))]
    UnresolvedPredecessor { id: String, missing: Vec<String> },
}

#[derive(Debug)]
struct Deferred {
    activity: ActivityId,
    predecessor_ids: Vec<String>,
}

/// Builds an [`ActivityGraph`] from descriptors, tolerating forward
/// references.
///
/// Acyclicity is not checked here: a cyclic network builds successfully and
/// is only rejected when the critical path is computed.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    activities: Vec<Activity>,
    index: FxHashMap<String, ActivityId>,
    deferred: Vec<Deferred>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one activity.
    ///
    /// Predecessors are linked immediately when every referenced id is
    /// already known; otherwise the descriptor is deferred until
    /// [`finish`](Self::finish).
    ///
    /// # Errors
    /// Returns [`BuildError::DuplicateId`] if the id was already inserted.
    pub fn insert(&mut self, descriptor: ActivityDescriptor) -> Result<(), BuildError> {
        let ActivityDescriptor {
            id,
            description,
            duration,
            predecessor_ids,
        } = descriptor;

        if self.index.contains_key(&id) {
            return Err(BuildError::DuplicateId { id });
        }

        let slot = self.activities.len() as ActivityId;
        self.index.insert(id.clone(), slot);
        self.activities.push(Activity {
            id,
            description,
            duration,
            predecessors: Vec::new(),
        });

        if self.all_known(&predecessor_ids) {
            self.link(slot, &predecessor_ids);
        } else {
            debug!(
                activity = %self.activities[slot as usize].id,
                "predecessors not yet known, deferring"
            );
            self.deferred.push(Deferred {
                activity: slot,
                predecessor_ids,
            });
        }
        Ok(())
    }

    /// Resolve the deferred set to a fixed point and return the completed,
    /// immutable graph.
    ///
    /// # Errors
    /// Returns [`BuildError::UnresolvedPredecessor`] if a full pass over
    /// the deferred set makes no progress, naming the first affected
    /// activity (in insertion order) and its missing ids, sorted.
    pub fn finish(mut self) -> Result<ActivityGraph, BuildError> {
        while !self.deferred.is_empty() {
            let before = self.deferred.len();
            let mut still_deferred = Vec::new();
            for entry in std::mem::take(&mut self.deferred) {
                if self.all_known(&entry.predecessor_ids) {
                    self.link(entry.activity, &entry.predecessor_ids);
                } else {
                    still_deferred.push(entry);
                }
            }
            self.deferred = still_deferred;

            if self.deferred.len() == before {
                // Fixed point with leftovers: some id never appeared.
                if let Some(entry) = self.deferred.first() {
                    let id = self
                        .activities
                        .get(entry.activity as usize)
                        .map(|a| a.id.clone())
                        .unwrap_or_default();
                    let mut missing: Vec<String> = entry
                        .predecessor_ids
                        .iter()
                        .filter(|p| !self.index.contains_key(*p))
                        .cloned()
                        .collect();
                    missing.sort();
                    missing.dedup();
                    return Err(BuildError::UnresolvedPredecessor { id, missing });
                }
            }
            debug!(
                linked = before - self.deferred.len(),
                remaining = self.deferred.len(),
                "resolved deferred descriptors"
            );
        }

        Ok(ActivityGraph::from_parts(self.activities, self.index))
    }

    fn all_known(&self, predecessor_ids: &[String]) -> bool {
        predecessor_ids.iter().all(|p| self.index.contains_key(p))
    }

    fn link(&mut self, activity: ActivityId, predecessor_ids: &[String]) {
        let links: Vec<ActivityId> = predecessor_ids
            .iter()
            .filter_map(|p| self.index.get(p).copied())
            .collect();
        if let Some(a) = self.activities.get_mut(activity as usize) {
            a.predecessors = links;
        }
    }
}

/// Build a graph from a batch of descriptors.
///
/// Equivalent to inserting every descriptor into a [`GraphBuilder`] and
/// finishing it.
pub fn build_graph<D>(descriptors: D) -> Result<ActivityGraph, BuildError>
where
    D: IntoIterator<Item = ActivityDescriptor>,
{
    let mut builder = GraphBuilder::new();
    for descriptor in descriptors {
        builder.insert(descriptor)?;
    }
    builder.finish()
}
