//! Tag removers backed by the markup tag tables

use std::sync::Arc;

use crate::domain::content::RawContent;
use crate::domain::conversion::{ConversionError, TagRemover};
use crate::infrastructure::markup::{ass_tags, basic_tags, remove_tags, vtt_tags, TagTable};

/// Removes every tag of one tag table
#[derive(Debug, Clone)]
pub struct TableTagRemover {
    name: &'static str,
    table: &'static TagTable,
}

impl TableTagRemover {
    /// Basic styling tags shared by SubRip, SubViewer and MicroDVD
    pub fn basic() -> Self {
        Self {
            name: "basic",
            table: basic_tags(),
        }
    }

    /// ASS override blocks
    pub fn ass() -> Self {
        Self {
            name: "ass",
            table: ass_tags(),
        }
    }

    /// WebVTT cue tags
    pub fn vtt() -> Self {
        Self {
            name: "vtt",
            table: vtt_tags(),
        }
    }

    pub fn into_shared(self) -> Arc<dyn TagRemover> {
        Arc::new(self)
    }
}

impl TagRemover for TableTagRemover {
    fn remove_tags(&self, content: &[u8]) -> Result<RawContent, ConversionError> {
        if content.is_empty() {
            return Err(ConversionError::not_convertible(
                "No content to remove tags from",
            ));
        }

        if let Err(e) = std::str::from_utf8(content) {
            return Err(ConversionError::not_convertible(format!(
                "Content is not valid UTF-8: {}",
                e
            )));
        }

        let output = remove_tags(content, self.table);

        if output.iter().all(u8::is_ascii_whitespace) {
            return Err(ConversionError::not_convertible(format!(
                "No content left after removing {} tags",
                self.name
            )));
        }

        RawContent::new(output).map_err(|e| ConversionError::not_convertible(e.message()))
    }
}
