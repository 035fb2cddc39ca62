//! Infrastructure services

mod subtitle_service;

pub use subtitle_service::{
    SubtitleDownload, SubtitleService, SubtitleServiceTrait, UploadSubtitleRequest,
};
