//! Tests for the CLI argument types and their mapping onto library types

use chatweave::cli::{Args, DEFAULT_OUTPUT, OutputFormat};
use chatweave::format::OutputFormat as LibFormat;
use clap::Parser;

#[test]
fn test_cli_format_converts_to_library_format() {
    assert_eq!(LibFormat::from(OutputFormat::Csv), LibFormat::Csv);
    assert_eq!(LibFormat::from(OutputFormat::Json), LibFormat::Json);
    assert_eq!(LibFormat::from(OutputFormat::Jsonl), LibFormat::Jsonl);
}

#[test]
fn test_cli_format_display_matches_library() {
    for format in [OutputFormat::Csv, OutputFormat::Json, OutputFormat::Jsonl] {
        assert_eq!(format.to_string(), LibFormat::from(format).to_string());
    }
}

#[test]
fn test_default_output_follows_format_extension() {
    let args = Args::try_parse_from(["chatweave", "chat.txt", "-f", "ndjson"]).unwrap();
    assert_eq!(args.output_path(), "conversation.jsonl");
}

#[test]
fn test_args_full_command_line() {
    let args = Args::try_parse_from([
        "chatweave",
        "export",
        "--output",
        "out.json",
        "--format",
        "json",
        "--timestamps",
        "--ids",
        "--attachments",
        "--skip-system",
        "-v",
    ])
    .unwrap();

    assert_eq!(args.output_path(), "out.json");
    assert_eq!(args.format, OutputFormat::Json);
    let config = args.output_config();
    assert!(config.include_timestamps && config.include_ids && config.include_attachments);
    assert!(!config.include_notices);
    assert_eq!(args.verbose, 1);
}

#[test]
fn test_default_output_constant() {
    let args = Args::try_parse_from(["chatweave", "chat.txt"]).unwrap();
    assert_eq!(args.output, DEFAULT_OUTPUT);
}

#[test]
fn test_unknown_format_rejected() {
    assert!(Args::try_parse_from(["chatweave", "chat.txt", "-f", "xml"]).is_err());
}
