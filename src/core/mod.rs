//! Core matching - pure functions over an engine snapshot.
//!
//! - [`search::rank_items`] turns a query into scored trigger matches
//! - [`search::fallbacks`] offers fallback-eligible engines for the whole query
//! - [`action`] builds the activatable results both return

pub mod action;
pub mod search;

pub use action::{Action, RankedAction, Score};
pub use search::{fallbacks, rank_items, sort_by_score, EMPTY_TERM_PLACEHOLDER, MAX_SCORE};
