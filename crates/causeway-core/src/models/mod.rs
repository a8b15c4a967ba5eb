//! Data model shared by every search component.

pub mod dataset;
pub mod graph;
pub mod knowledge;
pub mod outcome;
pub mod variable;

pub use dataset::Dataset;
pub use graph::{EdgeState, FeedbackTag, Graph, GraphSpec, PairKey};
pub use knowledge::{DirectedPair, FixedOrientation, Knowledge, KnowledgeSpec, ResolvedKnowledge};
pub use outcome::{ConditioningSet, SearchOutcome, SearchStats, SepsetMap, Skeleton};
pub use variable::Variable;
