//! Seams between the engine and pluggable collaborators.

pub mod cancellation;
pub mod independence;
pub mod search;

pub use cancellation::CancellationToken;
pub use independence::{IndependenceTest, Verdict};
pub use search::GraphSearch;
