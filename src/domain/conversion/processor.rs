//! Format-dispatch and chained post-conversion processors

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::converter::{FormatConverter, PostConverter};
use crate::domain::content::RawContent;
use crate::domain::outcome::Outcome;
use crate::domain::subtitle::{PostConversionOption, SubtitleFormat};
use crate::domain::DomainError;

/// Selects a format converter by discriminator and runs it once.
///
/// The converter list is fixed at construction; lookups are a linear scan
/// where the first match wins.
pub struct ConversionProcessor {
    converters: Vec<Arc<dyn FormatConverter>>,
}

impl ConversionProcessor {
    /// Build a processor, rejecting two converters for the same format
    pub fn new(converters: Vec<Arc<dyn FormatConverter>>) -> Result<Self, DomainError> {
        let mut seen = HashSet::new();

        for converter in &converters {
            if !seen.insert(converter.format()) {
                return Err(DomainError::configuration(format!(
                    "Duplicate converter registered for subtitle format: {}",
                    converter.format()
                )));
            }
        }

        Ok(Self { converters })
    }

    /// Formats with a registered converter, in registration order
    pub fn formats(&self) -> Vec<SubtitleFormat> {
        self.converters.iter().map(|c| c.format()).collect()
    }

    /// Convert `content` with the converter registered for `format`
    pub fn process(&self, content: &RawContent, format: SubtitleFormat) -> Outcome<RawContent> {
        let Some(converter) = self.converters.iter().find(|c| c.format() == format) else {
            debug!(format = %format, "No converter registered");
            return DomainError::conversion(format!(
                "No converter was found for subtitle format: {}.",
                format
            ))
            .into();
        };

        let outcome = converter.convert(content);

        debug!(
            format = %format,
            input_len = content.len(),
            failed = outcome.is_error(),
            "Conversion finished"
        );

        outcome
    }
}

impl fmt::Debug for ConversionProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionProcessor")
            .field("formats", &self.formats())
            .finish()
    }
}

/// Chains named transformations over content in caller order
pub struct PostConversionProcessor {
    converters: Vec<Arc<dyn PostConverter>>,
}

impl PostConversionProcessor {
    /// Build a processor, rejecting two converters for the same option
    pub fn new(converters: Vec<Arc<dyn PostConverter>>) -> Result<Self, DomainError> {
        let mut seen = HashSet::new();

        for converter in &converters {
            if !seen.insert(converter.option()) {
                return Err(DomainError::configuration(format!(
                    "Duplicate converter registered for post conversion option: {}",
                    converter.option()
                )));
            }
        }

        Ok(Self { converters })
    }

    /// Options with a registered converter, in registration order
    pub fn options(&self) -> Vec<PostConversionOption> {
        self.converters.iter().map(|c| c.option()).collect()
    }

    /// Apply `options` in order, each step consuming the previous step's output.
    ///
    /// Stops at the first failing or unregistered option. An empty option list
    /// hands back the original content as-is.
    pub fn process(
        &self,
        content: RawContent,
        options: &[PostConversionOption],
    ) -> Outcome<RawContent> {
        let mut current = content;

        for (step, option) in options.iter().enumerate() {
            let Some(converter) = self.converters.iter().find(|c| c.option() == *option) else {
                debug!(option = %option, step, "No post converter registered");
                return DomainError::post_conversion(format!(
                    "No converter was found for post conversion option: {}.",
                    option
                ))
                .into();
            };

            match converter.convert(&current).into_result() {
                Ok(next) => {
                    debug!(
                        option = %option,
                        step,
                        before = current.len(),
                        after = next.len(),
                        "Post conversion step applied"
                    );
                    current = next;
                }
                Err(errors) => {
                    debug!(option = %option, step, "Post conversion step failed");
                    return Outcome::from_errors(errors);
                }
            }
        }

        Outcome::success(current)
    }
}

impl fmt::Debug for PostConversionProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostConversionProcessor")
            .field("options", &self.options())
            .finish()
    }
}
