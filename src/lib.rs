//! Critical path computation for activity dependency networks.
//!
//! Builds a validated dependency graph from activity descriptors that may
//! reference predecessors declared later in the input, then computes the
//! maximum-total-duration path (the critical path) in a single
//! DFS-plus-DP pass with synchronous cycle detection. Results are
//! deterministic and independent of input order.

pub mod builder;
pub mod critical_path;
pub mod models;
pub mod parser;
pub mod report;

pub use builder::{build_graph, BuildError, GraphBuilder};
pub use critical_path::{calculate_critical_path, CriticalPath, CycleError};
pub use models::{Activity, ActivityDescriptor, ActivityGraph, ActivityId};
pub use parser::{parse_descriptors, ParseError};
