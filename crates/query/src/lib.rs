//! Search, tag listing and statistics over a loaded catalog.

pub mod present;
pub mod search;
pub mod stats;
pub mod tags;

pub use present::{display_title, result_items};
pub use search::{Query, SearchHit, SearchOptions, search};
pub use stats::{Stats, compute as compute_stats};
pub use tags::{TagAction, TagCount, TagMenu, TagMenuEntry, list_tags, tag_menu, tag_rows, tag_subset};
