//! Assignment solver
//!
//! - `hungarian`: minimum-cost assignment over a [`CostMatrix`](crate::cost::CostMatrix)
//! - `matching`: maximum bipartite matching and Konig vertex cover, shared with
//!   the cost builder's feasibility check

mod hungarian;
mod matching;

pub use hungarian::{solve, Assignment};
pub use matching::{BipartiteMatching, LineCover};
