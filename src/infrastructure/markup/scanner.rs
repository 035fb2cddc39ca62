//! Byte scanner deleting every tag listed in a table

use super::tags::TagTable;

/// Copy `input`, dropping every byte range that matches a tag in `table`.
///
/// At each position only the specs keyed by the current byte are tried, first
/// match wins. Unmatched bytes are copied through unchanged.
pub fn remove_tags(input: &[u8], table: &TagTable) -> Vec<u8> {
    let mut output = Vec::with_capacity(input.len());
    let mut pos = 0;

    while pos < input.len() {
        let rest = &input[pos..];

        let matched = table
            .get(rest[0])
            .and_then(|specs| specs.iter().find_map(|spec| spec.match_len(rest)));

        match matched {
            Some(len) => pos += len,
            None => {
                output.push(rest[0]);
                pos += 1;
            }
        }
    }

    output
}

/// `remove_tags` over text.
///
/// Tags open and close on ASCII bytes, so removal never splits a UTF-8
/// sequence.
pub fn remove_tags_str(input: &str, table: &TagTable) -> String {
    let output = remove_tags(input.as_bytes(), table);
    String::from_utf8_lossy(&output).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::markup::{ass_tags, basic_tags, vtt_tags};

    #[test]
    fn test_removes_basic_tags() {
        let output = remove_tags(b"<i>Hello</i> <B>world</B>", basic_tags());
        assert_eq!(output, b"Hello world");
    }

    #[test]
    fn test_removes_font_tags() {
        let output = remove_tags_str("<font color=\"#ffff00\">Yellow</font> text", basic_tags());
        assert_eq!(output, "Yellow text");
    }

    #[test]
    fn test_keeps_unknown_and_unterminated_tags() {
        let output = remove_tags_str("a < b and <font without end", basic_tags());
        assert_eq!(output, "a < b and <font without end");
    }

    #[test]
    fn test_removes_ass_override_blocks() {
        let output = remove_tags_str("{\\an8}{\\i1}Top{\\i0}\\hline", ass_tags());
        assert_eq!(output, "Topline");
    }

    #[test]
    fn test_removes_vtt_tags() {
        let output = remove_tags_str(
            "<v Roger Bingham><c.yellow>We are</c> <00:00:05.250>in <i>New York</i></v>",
            vtt_tags(),
        );
        assert_eq!(output, "We are in New York");
    }

    #[test]
    fn test_preserves_multibyte_text() {
        let output = remove_tags_str("<i>Ça va, 你好?</i>", basic_tags());
        assert_eq!(output, "Ça va, 你好?");
    }

    #[test]
    fn test_input_left_untouched() {
        let input = b"<b>bold</b>".to_vec();
        let _ = remove_tags(&input, basic_tags());
        assert_eq!(input, b"<b>bold</b>");
    }
}
