//! Infrastructure layer - Converters, storage backends and services

pub mod conversion;
pub mod logging;
pub mod markup;
pub mod observability;
pub mod services;
pub mod storage;
