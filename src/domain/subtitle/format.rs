//! Subtitle format and post-conversion option discriminators

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Supported subtitle markup dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubtitleFormat {
    /// SubRip
    Srt,
    /// Advanced SubStation Alpha (also reads SSA v4 scripts)
    Ass,
    /// WebVTT
    Vtt,
    /// YouTube SubViewer
    Sbv,
    /// MicroDVD
    Sub,
}

impl SubtitleFormat {
    pub const ALL: [SubtitleFormat; 5] = [Self::Srt, Self::Ass, Self::Vtt, Self::Sbv, Self::Sub];

    /// Canonical file extension
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Ass => "ass",
            Self::Vtt => "vtt",
            Self::Sbv => "sbv",
            Self::Sub => "sub",
        }
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Srt => write!(f, "Srt"),
            Self::Ass => write!(f, "Ass"),
            Self::Vtt => write!(f, "Vtt"),
            Self::Sbv => write!(f, "Sbv"),
            Self::Sub => write!(f, "Sub"),
        }
    }
}

impl FromStr for SubtitleFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().trim_start_matches('.').to_lowercase();

        match normalized.as_str() {
            "srt" | "subrip" => Ok(Self::Srt),
            "ass" | "ssa" => Ok(Self::Ass),
            "vtt" | "webvtt" => Ok(Self::Vtt),
            "sbv" => Ok(Self::Sbv),
            "sub" | "microdvd" => Ok(Self::Sub),
            _ => Err(DomainError::validation(format!(
                "Unsupported subtitle format: {}",
                s
            ))),
        }
    }
}

/// Optional transformations applied after primary conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostConversionOption {
    /// Remove basic HTML-like styling tags
    DeleteTags,
    /// Remove ASS override blocks and hard spaces
    DeleteAssTags,
    /// Remove WebVTT cue tags
    DeleteVttTags,
    /// Join all lines into a single line
    ToOneLine,
}

impl PostConversionOption {
    pub const ALL: [PostConversionOption; 4] = [
        Self::DeleteTags,
        Self::DeleteAssTags,
        Self::DeleteVttTags,
        Self::ToOneLine,
    ];
}

impl fmt::Display for PostConversionOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteTags => write!(f, "DeleteTags"),
            Self::DeleteAssTags => write!(f, "DeleteAssTags"),
            Self::DeleteVttTags => write!(f, "DeleteVttTags"),
            Self::ToOneLine => write!(f, "ToOneLine"),
        }
    }
}

impl FromStr for PostConversionOption {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_' && *c != ' ')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "deletetags" => Ok(Self::DeleteTags),
            "deleteasstags" => Ok(Self::DeleteAssTags),
            "deletevtttags" => Ok(Self::DeleteVttTags),
            "tooneline" => Ok(Self::ToOneLine),
            _ => Err(DomainError::validation(format!(
                "Unsupported post conversion option: {}",
                s
            ))),
        }
    }
}
