//! Convert command - one-shot conversion of a local subtitle file

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use clap::Args;
use tracing::debug;

use crate::domain::content::RawContent;
use crate::domain::outcome::{Outcome, OutcomeError};
use crate::domain::subtitle::{PostConversionOption, SubtitleFormat};
use crate::infrastructure::conversion::ConverterFactory;
use crate::infrastructure::logging;

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Subtitle file to convert
    #[arg(short, long)]
    pub input: PathBuf,

    /// Subtitle format; inferred from the input extension when omitted
    #[arg(short, long)]
    pub format: Option<String>,

    /// Post-conversion option, applied in the order given
    #[arg(short = 'p', long = "option")]
    pub options: Vec<String>,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Log level for diagnostics on stderr
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Run the conversion and write the plain text
pub fn run(args: ConvertArgs) -> anyhow::Result<()> {
    logging::init_cli_logging(&args.log_level);

    let format = resolve_format(args.format.as_deref(), &args.input)?;
    let options = args
        .options
        .iter()
        .map(|o| o.parse::<PostConversionOption>())
        .collect::<Result<Vec<_>, _>>()?;

    let file = File::open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;
    let content = RawContent::read_from(file)?;

    debug!(format = %format, options = ?options, size = content.len(), "Converting file");

    let converted = convert(&content, format, &options)?;

    match &args.output {
        Some(path) => std::fs::write(path, converted.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(converted.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}

/// Both conversion stages over in-memory content
pub fn convert(
    content: &RawContent,
    format: SubtitleFormat,
    options: &[PostConversionOption],
) -> anyhow::Result<RawContent> {
    let conversion = ConverterFactory::create_conversion_processor()?;
    let post_conversion = ConverterFactory::create_post_conversion_processor()?;

    let converted = into_anyhow(conversion.process(content, format))?;
    into_anyhow(post_conversion.process(converted, options))
}

fn resolve_format(explicit: Option<&str>, input: &Path) -> anyhow::Result<SubtitleFormat> {
    let raw = match explicit {
        Some(format) => format,
        None => input
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| anyhow!("Cannot infer the format of {}; pass --format", input.display()))?,
    };

    Ok(raw.parse::<SubtitleFormat>()?)
}

fn into_anyhow<T>(outcome: Outcome<T>) -> anyhow::Result<T> {
    outcome.into_result().map_err(|errors| {
        anyhow!(errors
            .iter()
            .map(OutcomeError::to_string)
            .collect::<Vec<_>>()
            .join("; "))
    })
}
