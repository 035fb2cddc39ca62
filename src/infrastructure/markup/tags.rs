//! Tag tables keyed by the tag-opening byte

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// One deletable tag shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagSpec {
    /// Exact byte sequence, matched ASCII case-insensitively
    Literal(&'static [u8]),
    /// Everything from `open` through the first `close` on the same line
    Delimited {
        open: &'static [u8],
        close: &'static [u8],
    },
}

impl TagSpec {
    /// First byte of the tag, used as the table key
    pub fn opening_byte(&self) -> Option<u8> {
        match self {
            Self::Literal(bytes) => bytes.first().copied(),
            Self::Delimited { open, .. } => open.first().copied(),
        }
    }

    /// Length of the tag at the start of `input`, if it matches
    pub fn match_len(&self, input: &[u8]) -> Option<usize> {
        match self {
            Self::Literal(literal) => starts_with_ignore_case(input, literal).then_some(literal.len()),
            Self::Delimited { open, close } => {
                if !starts_with_ignore_case(input, open) {
                    return None;
                }

                let body = &input[open.len()..];
                let line_end = body.iter().position(|b| *b == b'\n').unwrap_or(body.len());

                find(&body[..line_end], close).map(|pos| open.len() + pos + close.len())
            }
        }
    }
}

/// Tag specifications grouped by their opening byte
#[derive(Debug, Clone, Default)]
pub struct TagTable {
    specs: HashMap<u8, Vec<TagSpec>>,
}

impl TagTable {
    /// Build a table; specs sharing an opening byte are tried in the given order
    pub fn new(specs: impl IntoIterator<Item = TagSpec>) -> Self {
        let mut table: HashMap<u8, Vec<TagSpec>> = HashMap::new();

        for spec in specs {
            if let Some(byte) = spec.opening_byte() {
                table.entry(byte).or_default().push(spec);
            }
        }

        Self { specs: table }
    }

    pub fn get(&self, byte: u8) -> Option<&[TagSpec]> {
        self.specs.get(&byte).map(Vec::as_slice)
    }

    /// Total number of specs in the table
    pub fn len(&self) -> usize {
        self.specs.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

const BASIC_SPECS: &[TagSpec] = &[
    TagSpec::Literal(b"<i>"),
    TagSpec::Literal(b"</i>"),
    TagSpec::Literal(b"<b>"),
    TagSpec::Literal(b"</b>"),
    TagSpec::Literal(b"<u>"),
    TagSpec::Literal(b"</u>"),
    TagSpec::Literal(b"<s>"),
    TagSpec::Literal(b"</s>"),
    TagSpec::Delimited {
        open: b"<font",
        close: b">",
    },
    TagSpec::Literal(b"</font>"),
];

static BASIC_TAGS: Lazy<TagTable> = Lazy::new(|| TagTable::new(BASIC_SPECS.iter().copied()));

static ASS_TAGS: Lazy<TagTable> = Lazy::new(|| {
    TagTable::new([
        TagSpec::Delimited {
            open: b"{",
            close: b"}",
        },
        TagSpec::Literal(b"\\h"),
    ])
});

static VTT_TAGS: Lazy<TagTable> = Lazy::new(|| {
    let mut specs = vec![
        TagSpec::Literal(b"<v>"),
        TagSpec::Delimited {
            open: b"<v ",
            close: b">",
        },
        TagSpec::Delimited {
            open: b"<v.",
            close: b">",
        },
        TagSpec::Literal(b"</v>"),
        TagSpec::Literal(b"<c>"),
        TagSpec::Delimited {
            open: b"<c.",
            close: b">",
        },
        TagSpec::Literal(b"</c>"),
        TagSpec::Delimited {
            open: b"<lang ",
            close: b">",
        },
        TagSpec::Literal(b"</lang>"),
        TagSpec::Literal(b"<ruby>"),
        TagSpec::Literal(b"</ruby>"),
        TagSpec::Literal(b"<rt>"),
        TagSpec::Literal(b"</rt>"),
        TagSpec::Delimited {
            open: b"<i.",
            close: b">",
        },
        TagSpec::Delimited {
            open: b"<b.",
            close: b">",
        },
        TagSpec::Delimited {
            open: b"<u.",
            close: b">",
        },
    ];

    // Inline cue timestamps such as <00:00:05.250>
    const DIGITS: [&[u8]; 10] = [b"<0", b"<1", b"<2", b"<3", b"<4", b"<5", b"<6", b"<7", b"<8", b"<9"];
    specs.extend(DIGITS.iter().map(|open| TagSpec::Delimited {
        open: *open,
        close: b">",
    }));

    specs.extend(BASIC_SPECS.iter().copied());
    TagTable::new(specs)
});

/// Styling tags shared by SubRip, SubViewer and MicroDVD
pub fn basic_tags() -> &'static TagTable {
    &BASIC_TAGS
}

/// ASS override blocks and hard spaces
pub fn ass_tags() -> &'static TagTable {
    &ASS_TAGS
}

/// WebVTT cue tags, inline timestamps and the basic styling tags
pub fn vtt_tags() -> &'static TagTable {
    &VTT_TAGS
}

fn starts_with_ignore_case(input: &[u8], prefix: &[u8]) -> bool {
    input.len() >= prefix.len() && input[..prefix.len()].eq_ignore_ascii_case(prefix)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }

    haystack.windows(needle.len()).position(|w| w == needle)
}
