//! Command-line interface definition using clap.
//!
//! - [`Args`] - CLI argument structure
//! - [`OutputFormat`] - Output format flag, convertible to [`crate::format::OutputFormat`]

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::core::models::OutputConfig;

/// Default output path; its extension follows `--format` when left unchanged.
pub const DEFAULT_OUTPUT: &str = "conversation.csv";

/// Rebuild an exported chat transcript into a clean, typed message table.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatweave")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatweave _chat.txt
    chatweave \"WhatsApp Chat with Alice\" -o alice.jsonl -f jsonl
    chatweave export/ --timestamps --attachments
    RUST_LOG=chatweave=debug chatweave chat.txt")]
pub struct Args {
    /// Transcript file or extracted export directory
    pub input: PathBuf,

    /// Path to output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Include timestamps in output
    #[arg(short = 't', long)]
    pub timestamps: bool,

    /// Include message IDs in output
    #[arg(long)]
    pub ids: bool,

    /// Include attachment kind, file name and locator
    #[arg(short = 'a', long)]
    pub attachments: bool,

    /// Leave system notices out of the output
    #[arg(long)]
    pub skip_system: bool,

    /// Log parser diagnostics to stderr (repeat for more detail)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Builds the writer configuration from the flags.
    pub fn output_config(&self) -> OutputConfig {
        let mut config = OutputConfig::new();
        if self.timestamps {
            config = config.with_timestamps();
        }
        if self.ids {
            config = config.with_ids();
        }
        if self.attachments {
            config = config.with_attachments();
        }
        if self.skip_system {
            config = config.without_notices();
        }
        config
    }

    /// Default log directive for the `-v` count, used when `RUST_LOG` is unset.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "chatweave=debug",
            _ => "trace",
        }
    }

    /// Output path, with the extension matched to `--format` if `--output`
    /// was left at its default.
    pub fn output_path(&self) -> String {
        if self.output != DEFAULT_OUTPUT {
            return self.output.clone();
        }
        let lib_format: crate::format::OutputFormat = self.format.into();
        format!("conversation.{}", lib_format.extension())
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CSV with semicolon delimiter
    #[default]
    Csv,

    /// JSON array of messages
    Json,

    /// JSON Lines - one JSON object per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("chatweave").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["chat.txt"]);
        assert_eq!(args.input, PathBuf::from("chat.txt"));
        assert_eq!(args.format, OutputFormat::Csv);
        assert_eq!(args.output_path(), "conversation.csv");
        assert_eq!(args.log_directive(), "warn");

        let config = args.output_config();
        assert!(!config.include_timestamps);
        assert!(config.include_notices);
    }

    #[test]
    fn test_output_extension_follows_format() {
        assert_eq!(parse(&["chat.txt", "-f", "jsonl"]).output_path(), "conversation.jsonl");
        assert_eq!(parse(&["chat.txt", "-f", "ndjson"]).format, OutputFormat::Jsonl);
        assert_eq!(
            parse(&["chat.txt", "-f", "json", "-o", "out.txt"]).output_path(),
            "out.txt"
        );
    }

    #[test]
    fn test_flags_map_to_output_config() {
        let config = parse(&["chat.txt", "-t", "--ids", "-a", "--skip-system"]).output_config();
        assert!(config.include_timestamps);
        assert!(config.include_ids);
        assert!(config.include_attachments);
        assert!(!config.include_notices);
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(parse(&["chat.txt", "-v"]).log_directive(), "chatweave=debug");
        assert_eq!(parse(&["chat.txt", "-vv"]).log_directive(), "trace");
    }

    #[test]
    fn test_format_display() {
        assert_eq!(OutputFormat::Jsonl.to_string(), "JSONL");
    }

    #[test]
    fn test_missing_input_is_rejected() {
        assert!(Args::try_parse_from(["chatweave"]).is_err());
    }
}
