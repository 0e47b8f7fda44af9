use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::warn;

use codescan::batch::{self, BatchScanner};
use codescan::{BarcodeDetector, DetectionLog};

#[derive(Parser)]
#[command(name = "codescan")]
#[command(about = "Detect and decode barcodes in images")]
struct Cli {
    /// Image files to scan
    #[arg(value_name = "IMAGE")]
    images: Vec<PathBuf>,

    /// Scan every image found under this directory
    #[arg(short, long, value_name = "DIR")]
    input: Option<PathBuf>,

    /// Write the batch report to this file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Report format for --output
    #[arg(long, value_enum, default_value_t = ReportFormat::Json)]
    format: ReportFormat,

    /// Save the running detection history to this file as a JSON array
    #[arg(long, value_name = "FILE")]
    history: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormat {
    Json,
    Text,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Cli::parse();
    if args.images.is_empty() && args.input.is_none() {
        anyhow::bail!("nothing to scan: pass image paths and/or --input DIR");
    }

    let detector = BarcodeDetector::new().with_verbose(args.verbose);
    let scanner = BatchScanner::new(detector).with_verbose(args.verbose);

    let mut results = Vec::new();
    for path in &args.images {
        if args.verbose {
            println!("Scanning {}", path.display());
        }
        results.push(scanner.scan_file(path));
    }
    if let Some(dir) = &args.input {
        results.extend(scanner.scan_directory(dir));
    }

    for outcome in &results {
        match &outcome.error {
            None => {
                println!("{}: {} symbols", outcome.file.display(), outcome.symbols.len());
                for symbol in &outcome.symbols {
                    let mut flags = String::new();
                    if !symbol.symbology.is_supported() {
                        flags.push_str(" [unsupported]");
                    }
                    if !symbol.valid {
                        flags.push_str(" [failed validation]");
                    }
                    println!(
                        "  {}: {} (confidence {}%){}",
                        symbol.symbology, symbol.data, symbol.confidence, flags
                    );
                }
            }
            Some(error) => println!("{}: error: {}", outcome.file.display(), error),
        }
    }

    let summary = batch::summarize(&results);
    println!("\n=== Scan Summary ===");
    println!("Files processed: {}", summary.total_files);
    println!("Successful scans: {}", summary.successful_scans);
    println!("Failed scans: {}", summary.failed_scans);
    println!("Total symbols: {}", summary.total_symbols);

    // Supported detections feed the running history and the stats view.
    let mut log = DetectionLog::new();
    for outcome in &results {
        for symbol in &outcome.symbols {
            if symbol.symbology.is_supported() {
                log.record(symbol.clone());
            }
        }
    }

    let stats = log.stats();
    println!(
        "Supported detections: {} ({} linear, {} matrix)",
        stats.total_detections, stats.linear_barcodes, stats.matrix_barcodes
    );
    if args.verbose {
        for (symbology, count) in &stats.type_breakdown {
            println!("  {}: {}", symbology, count);
        }
        if let Some(last) = &stats.last_detection {
            println!("Last detection: {}", last.data);
        }
    }

    if let Some(history_path) = &args.history {
        // Non-fatal: the scan results stand even if the history file
        // cannot be written.
        match log.save(history_path) {
            Ok(()) => println!("History saved to {}", history_path.display()),
            Err(e) => warn!("could not save history: {e:#}"),
        }
    }

    if let Some(output) = &args.output {
        match args.format {
            ReportFormat::Json => batch::write_json_report(&results, output)?,
            ReportFormat::Text => batch::write_text_report(&results, output)?,
        }
        println!("Results saved to {}", output.display());
    }

    Ok(())
}
