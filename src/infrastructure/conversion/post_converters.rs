//! Post converters applied after primary conversion

use std::fmt;
use std::sync::Arc;

use crate::domain::content::RawContent;
use crate::domain::conversion::{convert_buffered, PostConverter, TagRemover};
use crate::domain::outcome::Outcome;
use crate::domain::subtitle::PostConversionOption;
use crate::infrastructure::markup::strippers::{decode, join_lines};

use super::tag_removers::TableTagRemover;

/// Delegates to a tag remover for one of the tag-deleting options
pub struct TagRemovalPostConverter {
    option: PostConversionOption,
    remover: Arc<dyn TagRemover>,
}

impl TagRemovalPostConverter {
    pub fn new(option: PostConversionOption, remover: Arc<dyn TagRemover>) -> Self {
        Self { option, remover }
    }

    /// `DeleteTags` over the basic styling tags
    pub fn delete_tags() -> Self {
        Self::new(
            PostConversionOption::DeleteTags,
            TableTagRemover::basic().into_shared(),
        )
    }

    /// `DeleteAssTags` over ASS override blocks
    pub fn delete_ass_tags() -> Self {
        Self::new(
            PostConversionOption::DeleteAssTags,
            TableTagRemover::ass().into_shared(),
        )
    }

    /// `DeleteVttTags` over WebVTT cue tags
    pub fn delete_vtt_tags() -> Self {
        Self::new(
            PostConversionOption::DeleteVttTags,
            TableTagRemover::vtt().into_shared(),
        )
    }
}

impl PostConverter for TagRemovalPostConverter {
    fn option(&self) -> PostConversionOption {
        self.option
    }

    fn convert(&self, content: &RawContent) -> Outcome<RawContent> {
        match self.remover.remove_tags(content.as_bytes()) {
            Ok(output) => Outcome::success(output),
            Err(err) => err.into(),
        }
    }
}

impl fmt::Debug for TagRemovalPostConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagRemovalPostConverter")
            .field("option", &self.option)
            .finish()
    }
}

/// Collapses all dialogue onto a single line
#[derive(Debug, Clone, Default)]
pub struct ToOneLineConverter;

impl ToOneLineConverter {
    pub fn new() -> Self {
        Self
    }
}

impl PostConverter for ToOneLineConverter {
    fn option(&self) -> PostConversionOption {
        PostConversionOption::ToOneLine
    }

    fn convert(&self, content: &RawContent) -> Outcome<RawContent> {
        convert_buffered(content, |bytes| Ok(join_lines(&decode(bytes)?).into_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversion::{ConversionError, MockTagRemover};
    use crate::domain::outcome::ErrorCode;

    fn content(text: &'static str) -> RawContent {
        RawContent::try_from(text).unwrap()
    }

    #[test]
    fn test_tag_removal_delegates_to_remover() {
        let mut remover = MockTagRemover::new();
        remover
            .expect_remove_tags()
            .times(1)
            .returning(|_| Ok(RawContent::try_from("x").unwrap()));

        let converter =
            TagRemovalPostConverter::new(PostConversionOption::DeleteTags, Arc::new(remover));
        let outcome = converter.convert(&content("<i>x</i>"));

        assert_eq!(outcome.payload().unwrap().as_bytes(), b"x");
    }

    #[test]
    fn test_tag_removal_not_convertible_is_unprocessable() {
        let mut remover = MockTagRemover::new();
        remover
            .expect_remove_tags()
            .returning(|_| Err(ConversionError::not_convertible("nothing left")));

        let converter =
            TagRemovalPostConverter::new(PostConversionOption::DeleteVttTags, Arc::new(remover));
        let outcome = converter.convert(&content("<c></c>"));

        assert_eq!(outcome.first_code(), Some(ErrorCode::UnprocessableContent));
        assert_eq!(outcome.errors()[0].message, "nothing left");
    }

    #[test]
    fn test_tag_removal_unexpected_is_unknown() {
        let mut remover = MockTagRemover::new();
        remover
            .expect_remove_tags()
            .returning(|_| Err(ConversionError::unexpected("boom")));

        let converter =
            TagRemovalPostConverter::new(PostConversionOption::DeleteTags, Arc::new(remover));

        assert_eq!(
            converter.convert(&content("text")).first_code(),
            Some(ErrorCode::UnknownError)
        );
    }

    #[test]
    fn test_builtin_tag_removers() {
        let outcome = TagRemovalPostConverter::delete_tags().convert(&content("<b>Bold</b> move"));
        assert_eq!(outcome.payload().unwrap().as_bytes(), b"Bold move");

        let outcome =
            TagRemovalPostConverter::delete_ass_tags().convert(&content("{\\i1}Tilt{\\i0}"));
        assert_eq!(outcome.payload().unwrap().as_bytes(), b"Tilt");

        let outcome = TagRemovalPostConverter::delete_vtt_tags()
            .convert(&content("<v Ana>Hola</v>"));
        assert_eq!(outcome.payload().unwrap().as_bytes(), b"Hola");
    }

    #[test]
    fn test_builtin_options() {
        assert_eq!(
            TagRemovalPostConverter::delete_tags().option(),
            PostConversionOption::DeleteTags
        );
        assert_eq!(
            TagRemovalPostConverter::delete_ass_tags().option(),
            PostConversionOption::DeleteAssTags
        );
        assert_eq!(
            TagRemovalPostConverter::delete_vtt_tags().option(),
            PostConversionOption::DeleteVttTags
        );
        assert_eq!(ToOneLineConverter::new().option(), PostConversionOption::ToOneLine);
    }

    #[test]
    fn test_to_one_line() {
        let outcome = ToOneLineConverter::new().convert(&content("First line\n\nSecond  \nThird"));
        assert_eq!(
            outcome.payload().unwrap().as_bytes(),
            b"First line Second Third"
        );
    }

    #[test]
    fn test_to_one_line_whitespace_only_is_unprocessable() {
        let outcome = ToOneLineConverter::new().convert(&content(" \n \n"));
        assert_eq!(outcome.first_code(), Some(ErrorCode::UnprocessableContent));
    }

    #[test]
    fn test_to_one_line_invalid_utf8_is_unprocessable() {
        let input = RawContent::new(vec![0xFF, b'a', b'\n', 0xC3, b'b']).unwrap();

        let outcome = ToOneLineConverter::new().convert(&input);

        assert_eq!(outcome.first_code(), Some(ErrorCode::UnprocessableContent));
        assert!(outcome.payload().is_none());
    }

    #[test]
    fn test_to_one_line_crlf_input() {
        let outcome = ToOneLineConverter::new().convert(&content("One\r\nTwo\r\n"));
        assert_eq!(outcome.payload().unwrap().as_bytes(), b"One Two");
    }

    #[test]
    fn test_delete_tags_invalid_utf8_is_unprocessable() {
        let input = RawContent::new(vec![0xFF, b'<', b'i', b'>', b'a']).unwrap();

        let outcome = TagRemovalPostConverter::delete_tags().convert(&input);

        assert_eq!(outcome.first_code(), Some(ErrorCode::UnprocessableContent));
    }
}
