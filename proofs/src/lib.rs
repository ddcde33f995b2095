//! Proof records and the structures built directly on top of them.
//!
//! - [`ProofStore`] owns every proof record, assigns identifiers, and hands
//!   out per-proof exclusive access so mutations on one proof serialize while
//!   different proofs proceed in parallel.
//! - [`MeshGraph`] links proofs pairwise; links are mirrored and permanent.
//! - [`StatsAggregator`] derives pending / verified / revoked counts by
//!   scanning the store.

pub mod error;
pub mod graph;
pub mod record;
pub mod stats;
pub mod store;

pub use error::ProofError;
pub use graph::MeshGraph;
pub use record::{NewProof, Proof};
pub use stats::{ProofStats, StatsAggregator};
pub use store::ProofStore;
