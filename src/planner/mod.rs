//! Planner state
//!
//! An explicit, serializable state object for the diet, workout and profile
//! views, updated only through [`reduce`]. Loads carry a [`LoadTicket`] so a
//! response that arrives after a newer request (or after the view was left)
//! is discarded.

mod generation;
mod state;

pub use generation::{LoadTicket, RequestGeneration};
pub use state::{reduce, Action, DaySummary, LoadState, PlannerState, Screen};
