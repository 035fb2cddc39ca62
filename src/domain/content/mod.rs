//! Content domain - validated byte payloads handed between pipeline stages

mod raw_content;

pub use raw_content::RawContent;
