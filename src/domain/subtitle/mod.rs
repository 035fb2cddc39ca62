//! Subtitle domain - formats, post-conversion options and the file context aggregate

mod entity;
mod format;

pub use entity::{FileContext, FileContextId, MAX_NAME_LENGTH};
pub use format::{PostConversionOption, SubtitleFormat};
