//! # chatweave CLI
//!
//! Command-line interface for the chatweave library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatweave::ChatweaveError;
use chatweave::bundle::ExportBundle;
use chatweave::cli::Args;
use chatweave::core::ConversationStats;
use chatweave::format::{OutputFormat, write_to_format};
use chatweave::parser::ConversationParser;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(&args);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(args: &Args) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<(), ChatweaveError> {
    let total_start = Instant::now();
    let output_path = args.output_path();
    let lib_format: OutputFormat = args.format.into();

    println!("🧵 chatweave v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    println!("💾 Output:  {}", output_path);
    println!("📄 Format:  {}", lib_format);
    println!();

    println!("⏳ Loading export...");
    let bundle = ExportBundle::load(&args.input)?;
    println!(
        "   Transcript {} ({} bundled files)",
        bundle.transcript_path.display(),
        bundle.attachments.len()
    );

    let parse_start = Instant::now();
    let conversation = bundle.parse(&ConversationParser::new());
    println!(
        "   Found {} messages ({:.2}s)",
        conversation.len(),
        parse_start.elapsed().as_secs_f64()
    );

    println!("💾 Writing {}...", lib_format);
    write_to_format(
        conversation.messages(),
        &output_path,
        lib_format,
        &args.output_config(),
    )?;

    println!();
    println!("✅ Done! Output saved to {}", output_path);

    let stats = ConversationStats::from_conversation(&conversation);
    println!();
    println!("📊 Summary:");
    println!("   Title:        {}", conversation.title);
    println!("   Messages:     {}", stats.total_messages);
    println!("   Notices:      {}", stats.system_notices);
    for entry in &stats.per_author {
        println!(
            "   👤 {}: {} ({:.1}%)",
            entry.author,
            entry.messages,
            stats.share_of(&entry.author)
        );
    }
    if stats.attachments() > 0 {
        println!(
            "   Attachments:  {} ({} images, {} videos, {} audio, {} documents)",
            stats.attachments(),
            stats.images,
            stats.videos,
            stats.audio,
            stats.documents
        );
    }
    if let (Some(first), Some(last)) = (stats.first_timestamp, stats.last_timestamp) {
        println!(
            "   Span:         {} → {}",
            first.format("%Y-%m-%d %H:%M"),
            last.format("%Y-%m-%d %H:%M")
        );
    }

    let diagnostics = conversation.diagnostics();
    if !diagnostics.is_clean() {
        println!();
        println!("⚠️  Degraded lines:");
        println!("   Orphan lines dropped:    {}", diagnostics.orphan_lines);
        println!("   Unreadable timestamps:   {}", diagnostics.timestamp_fallbacks);
        println!("   Unresolved attachments:  {}", diagnostics.attachments_unresolved);
    }

    println!();
    println!("⚡ Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}
