//! Per-format formatting strippers
//!
//! Each stripper takes decoded subtitle text and returns the dialogue only,
//! one dialogue line per output line.

use once_cell::sync::Lazy;
use regex::Regex;

use super::scanner::remove_tags_str;
use super::tags::{basic_tags, vtt_tags, TagSpec, TagTable};
use crate::domain::conversion::ConversionError;
use crate::domain::subtitle::SubtitleFormat;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

static SRT_TIMING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{1,2}:\d{2}:\d{2}[,.]\d{1,3}\s*-->\s*\d{1,2}:\d{2}:\d{2}[,.]\d{1,3}")
        .expect("valid SRT timing regex")
});

static SBV_TIMING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{1,2}:\d{2}:\d{2}\.\d{1,3},\d{1,2}:\d{2}:\d{2}\.\d{1,3}$")
        .expect("valid SBV timing regex")
});

static MICRODVD_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{(\d+)\}\{(\d*)\}(.*)$").expect("valid MicroDVD line regex"));

/// Any `{...}` block: ASS override blocks and MicroDVD control codes
static BRACE_BLOCKS: Lazy<TagTable> = Lazy::new(|| {
    TagTable::new([TagSpec::Delimited {
        open: b"{",
        close: b"}",
    }])
});

/// Strip all formatting of `format` from raw bytes
pub fn strip_formatting(format: SubtitleFormat, bytes: &[u8]) -> Result<Vec<u8>, ConversionError> {
    let text = decode(bytes)?;

    let stripped = match format {
        SubtitleFormat::Srt => strip_srt(&text),
        SubtitleFormat::Ass => strip_ass(&text),
        SubtitleFormat::Vtt => strip_vtt(&text),
        SubtitleFormat::Sbv => strip_sbv(&text),
        SubtitleFormat::Sub => strip_microdvd(&text),
    };

    Ok(stripped.into_bytes())
}

/// Decode UTF-8, dropping a BOM and normalizing line endings
pub fn decode(bytes: &[u8]) -> Result<String, ConversionError> {
    if bytes.is_empty() {
        return Err(ConversionError::not_convertible("Content is empty"));
    }

    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let text = std::str::from_utf8(bytes).map_err(|e| {
        ConversionError::not_convertible(format!("Content is not valid UTF-8: {}", e))
    })?;

    Ok(text.replace("\r\n", "\n").replace('\r', "\n"))
}

/// SubRip: drop indexes and timing lines, remove styling tags
pub fn strip_srt(text: &str) -> String {
    let mut lines = Vec::new();

    for block in blocks(text) {
        let mut rest = block.as_slice();

        if rest.len() > 1 && is_index(rest[0]) && SRT_TIMING.is_match(rest[1].trim()) {
            rest = &rest[2..];
        } else if !rest.is_empty() && SRT_TIMING.is_match(rest[0].trim()) {
            rest = &rest[1..];
        }

        for line in rest {
            let cleaned = remove_tags_str(line, basic_tags());
            push_clean(&mut lines, &remove_tags_str(&cleaned, &BRACE_BLOCKS));
        }
    }

    lines.join("\n")
}

/// Advanced SubStation Alpha: dialogue events only
pub fn strip_ass(text: &str) -> String {
    let mut lines = Vec::new();

    for line in text.lines() {
        let Some(event) = line.trim_start().strip_prefix("Dialogue:") else {
            continue;
        };

        // Text is the last of ten fields and may itself contain commas
        let Some(dialogue) = event.splitn(10, ',').nth(9) else {
            continue;
        };

        let cleaned = remove_tags_str(dialogue, &BRACE_BLOCKS)
            .replace("\\N", "\n")
            .replace("\\n", "\n")
            .replace("\\h", " ");

        for part in cleaned.split('\n') {
            push_clean(&mut lines, part);
        }
    }

    lines.join("\n")
}

/// WebVTT: cue payloads only, tags removed and entities decoded
pub fn strip_vtt(text: &str) -> String {
    let mut lines = Vec::new();

    for block in blocks(text) {
        let first = block[0].trim();

        if first.starts_with("WEBVTT")
            || first.starts_with("NOTE")
            || first == "STYLE"
            || first == "REGION"
        {
            continue;
        }

        let Some(timing) = block.iter().position(|l| l.contains("-->")) else {
            continue;
        };

        for line in &block[timing + 1..] {
            let cleaned = remove_tags_str(line, vtt_tags());
            push_clean(&mut lines, &decode_entities(&cleaned));
        }
    }

    lines.join("\n")
}

/// YouTube SubViewer: blocks led by a `start,end` timing line
pub fn strip_sbv(text: &str) -> String {
    let mut lines = Vec::new();

    for block in blocks(text) {
        if !SBV_TIMING.is_match(block[0].trim()) {
            continue;
        }

        for line in &block[1..] {
            push_clean(&mut lines, &remove_tags_str(line, basic_tags()));
        }
    }

    lines.join("\n")
}

/// MicroDVD: `{start}{end}text` lines, `|` separating dialogue lines
pub fn strip_microdvd(text: &str) -> String {
    let mut lines = Vec::new();

    for line in text.lines() {
        let Some(caps) = MICRODVD_LINE.captures(line.trim()) else {
            continue;
        };

        let body = &caps[3];

        // {1}{1}23.976 declares the frame rate
        if &caps[1] == "1" && &caps[2] == "1" && body.trim().parse::<f64>().is_ok() {
            continue;
        }

        let cleaned = remove_tags_str(&remove_tags_str(body, &BRACE_BLOCKS), basic_tags());

        for part in cleaned.split('|') {
            push_clean(&mut lines, part.trim_start().trim_start_matches('/'));
        }
    }

    lines.join("\n")
}

/// Collapse all non-blank lines into one, separated by single spaces
pub fn join_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Group lines into blank-line separated blocks, dropping the blank lines
fn blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }

    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

fn is_index(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit())
}

fn push_clean(lines: &mut Vec<String>, line: &str) {
    let trimmed = line.trim();

    if !trimmed.is_empty() {
        lines.push(trimmed.to_string());
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&lrm;", "")
        .replace("&rlm;", "")
        .replace("&amp;", "&")
}
