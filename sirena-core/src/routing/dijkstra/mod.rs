// Best-first search shared by the planner variants

mod search;
mod state;

pub(crate) use search::{best_first_search, SearchPath};
