//! Format converters, one per subtitle format

use crate::domain::content::RawContent;
use crate::domain::conversion::{convert_buffered, FormatConverter};
use crate::domain::outcome::Outcome;
use crate::domain::subtitle::SubtitleFormat;
use crate::infrastructure::markup::strippers::strip_formatting;

/// Converter for SubRip files
#[derive(Debug, Clone, Default)]
pub struct SrtConverter;

impl SrtConverter {
    pub fn new() -> Self {
        Self
    }
}

impl FormatConverter for SrtConverter {
    fn format(&self) -> SubtitleFormat {
        SubtitleFormat::Srt
    }

    fn convert(&self, content: &RawContent) -> Outcome<RawContent> {
        convert_buffered(content, |bytes| strip_formatting(SubtitleFormat::Srt, bytes))
    }
}

/// Converter for Advanced SubStation Alpha scripts
#[derive(Debug, Clone, Default)]
pub struct AssConverter;

impl AssConverter {
    pub fn new() -> Self {
        Self
    }
}

impl FormatConverter for AssConverter {
    fn format(&self) -> SubtitleFormat {
        SubtitleFormat::Ass
    }

    fn convert(&self, content: &RawContent) -> Outcome<RawContent> {
        convert_buffered(content, |bytes| strip_formatting(SubtitleFormat::Ass, bytes))
    }
}

/// Converter for WebVTT files
#[derive(Debug, Clone, Default)]
pub struct VttConverter;

impl VttConverter {
    pub fn new() -> Self {
        Self
    }
}

impl FormatConverter for VttConverter {
    fn format(&self) -> SubtitleFormat {
        SubtitleFormat::Vtt
    }

    fn convert(&self, content: &RawContent) -> Outcome<RawContent> {
        convert_buffered(content, |bytes| strip_formatting(SubtitleFormat::Vtt, bytes))
    }
}

/// Converter for YouTube SubViewer files
#[derive(Debug, Clone, Default)]
pub struct SbvConverter;

impl SbvConverter {
    pub fn new() -> Self {
        Self
    }
}

impl FormatConverter for SbvConverter {
    fn format(&self) -> SubtitleFormat {
        SubtitleFormat::Sbv
    }

    fn convert(&self, content: &RawContent) -> Outcome<RawContent> {
        convert_buffered(content, |bytes| strip_formatting(SubtitleFormat::Sbv, bytes))
    }
}

/// Converter for MicroDVD files
#[derive(Debug, Clone, Default)]
pub struct MicroDvdConverter;

impl MicroDvdConverter {
    pub fn new() -> Self {
        Self
    }
}

impl FormatConverter for MicroDvdConverter {
    fn format(&self) -> SubtitleFormat {
        SubtitleFormat::Sub
    }

    fn convert(&self, content: &RawContent) -> Outcome<RawContent> {
        convert_buffered(content, |bytes| strip_formatting(SubtitleFormat::Sub, bytes))
    }
}
