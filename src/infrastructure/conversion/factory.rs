//! Factory wiring the built-in converters into processors

use std::sync::Arc;

use crate::domain::conversion::{
    ConversionProcessor, FormatConverter, PostConversionProcessor, PostConverter,
};
use crate::domain::DomainError;

use super::converters::{
    AssConverter, MicroDvdConverter, SbvConverter, SrtConverter, VttConverter,
};
use super::post_converters::{TagRemovalPostConverter, ToOneLineConverter};

/// Factory for the conversion processors
#[derive(Debug)]
pub struct ConverterFactory;

impl ConverterFactory {
    /// One converter per supported subtitle format
    pub fn format_converters() -> Vec<Arc<dyn FormatConverter>> {
        vec![
            Arc::new(SrtConverter::new()),
            Arc::new(AssConverter::new()),
            Arc::new(VttConverter::new()),
            Arc::new(SbvConverter::new()),
            Arc::new(MicroDvdConverter::new()),
        ]
    }

    /// One converter per post-conversion option
    pub fn post_converters() -> Vec<Arc<dyn PostConverter>> {
        vec![
            Arc::new(TagRemovalPostConverter::delete_tags()),
            Arc::new(TagRemovalPostConverter::delete_ass_tags()),
            Arc::new(TagRemovalPostConverter::delete_vtt_tags()),
            Arc::new(ToOneLineConverter::new()),
        ]
    }

    /// Creates the format-dispatch processor
    pub fn create_conversion_processor() -> Result<Arc<ConversionProcessor>, DomainError> {
        Ok(Arc::new(ConversionProcessor::new(Self::format_converters())?))
    }

    /// Creates the chained post-conversion processor
    pub fn create_post_conversion_processor() -> Result<Arc<PostConversionProcessor>, DomainError>
    {
        Ok(Arc::new(PostConversionProcessor::new(
            Self::post_converters(),
        )?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::RawContent;
    use crate::domain::subtitle::{PostConversionOption, SubtitleFormat};

    #[test]
    fn test_every_format_registered() {
        let processor = ConverterFactory::create_conversion_processor().unwrap();
        assert_eq!(processor.formats(), SubtitleFormat::ALL.to_vec());
    }

    #[test]
    fn test_every_option_registered() {
        let processor = ConverterFactory::create_post_conversion_processor().unwrap();
        assert_eq!(processor.options(), PostConversionOption::ALL.to_vec());
    }

    #[test]
    fn test_convert_then_post_convert() {
        let conversion = ConverterFactory::create_conversion_processor().unwrap();
        let post = ConverterFactory::create_post_conversion_processor().unwrap();

        let input = RawContent::try_from(
            "1\n00:00:01,000 --> 00:00:02,000\nHello\nthere\n\n2\n00:00:03,000 --> 00:00:04,000\nfriend\n",
        )
        .unwrap();

        let converted = conversion
            .process(&input, SubtitleFormat::Srt)
            .into_payload()
            .unwrap();
        let joined = post
            .process(converted, &[PostConversionOption::ToOneLine])
            .into_payload()
            .unwrap();

        assert_eq!(joined.as_bytes(), b"Hello there friend");
    }
}
