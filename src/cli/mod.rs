//! CLI module for Subtitle Cleaner
//!
//! Provides subcommands:
//! - `serve`: HTTP API server
//! - `convert`: one-shot conversion of a local file

pub mod convert;
pub mod serve;

use clap::{Parser, Subcommand};

/// Subtitle Cleaner - Strips subtitle markup down to plain dialogue text
#[derive(Parser)]
#[command(name = "subtitle-cleaner")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Convert a local subtitle file and print or write the plain text
    Convert(convert::ConvertArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["subtitle-cleaner", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));
    }

    #[test]
    fn test_parse_convert() {
        let cli = Cli::try_parse_from([
            "subtitle-cleaner",
            "convert",
            "--input",
            "movie.srt",
            "--format",
            "srt",
            "--option",
            "delete-tags",
            "--option",
            "to-one-line",
        ])
        .unwrap();

        let Command::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.input.to_str(), Some("movie.srt"));
        assert_eq!(args.format.as_deref(), Some("srt"));
        assert_eq!(args.options, vec!["delete-tags", "to-one-line"]);
        assert!(args.output.is_none());
    }

    #[test]
    fn test_convert_requires_input() {
        assert!(Cli::try_parse_from(["subtitle-cleaner", "convert"]).is_err());
    }
}
