//! Conversion domain - strategy contracts and the two processing stages
//!
//! This module provides:
//! - `FormatConverter` for stripping all formatting of one subtitle format
//! - `PostConverter` and `TagRemover` for optional follow-up transformations
//! - `ConversionProcessor` and `PostConversionProcessor` selecting and running them

pub mod converter;
pub mod processor;

pub use converter::{
    convert_buffered, ConversionError, FormatConverter, PostConverter, TagRemover,
};
pub use processor::{ConversionProcessor, PostConversionProcessor};

#[cfg(test)]
pub use converter::{MockFormatConverter, MockPostConverter, MockTagRemover};
