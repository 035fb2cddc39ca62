//! Subtitle markup infrastructure
//!
//! Tag tables per tag family, the byte scanner that deletes matching tags, and
//! the per-format formatting strippers built on top of them.

mod scanner;
pub mod strippers;
mod tags;

pub use scanner::{remove_tags, remove_tags_str};
pub use tags::{ass_tags, basic_tags, vtt_tags, TagSpec, TagTable};
