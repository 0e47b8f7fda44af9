//! Batch scanning over image files and directories.

use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{DynamicImage, ImageReader};
use log::warn;
use serde::Serialize;
use walkdir::WalkDir;

use crate::detection::BarcodeDetector;
use crate::models::DetectedSymbol;

const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "bmp", "tiff", "tif"];

/// Result of scanning one file. An unreadable image is a per-file error
/// outcome, never a process failure.
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    pub file: PathBuf,
    pub error: Option<String>,
    pub symbols: Vec<DetectedSymbol>,
}

impl ScanOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    pub total_files: usize,
    pub successful_scans: usize,
    pub failed_scans: usize,
    pub total_symbols: usize,
}

#[derive(Serialize)]
struct BatchReport<'a> {
    scan_summary: ScanSummary,
    results: &'a [ScanOutcome],
}

pub struct BatchScanner {
    detector: BarcodeDetector,
    verbose: bool,
}

impl BatchScanner {
    pub fn new(detector: BarcodeDetector) -> Self {
        Self { detector, verbose: false }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Scan a single file.
    pub fn scan_file(&self, path: &Path) -> ScanOutcome {
        match load_image(path) {
            Ok(img) => ScanOutcome {
                file: path.to_path_buf(),
                error: None,
                symbols: self.detector.scan(&img),
            },
            Err(e) => ScanOutcome {
                file: path.to_path_buf(),
                error: Some(format!("{e:#}")),
                symbols: Vec::new(),
            },
        }
    }

    /// Recurse through a directory and scan every image file found,
    /// in sorted path order. A path the walk cannot read becomes an
    /// error outcome, like an unreadable image.
    pub fn scan_directory(&self, dir: &Path) -> Vec<ScanOutcome> {
        let mut files = Vec::new();
        let mut walk_errors = Vec::new();
        for entry in WalkDir::new(dir) {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() {
                        let path = entry.into_path();
                        if is_image_file(&path) {
                            files.push(path);
                        }
                    }
                }
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
                    warn!("could not read {}: {}", path.display(), e);
                    walk_errors.push(ScanOutcome {
                        file: path,
                        error: Some(e.to_string()),
                        symbols: Vec::new(),
                    });
                }
            }
        }
        files.sort();

        if self.verbose {
            println!("Found {} image files in {}", files.len(), dir.display());
        }

        let total = files.len();
        let mut results = walk_errors;
        results.extend(files.iter().enumerate().map(|(i, path)| {
            if self.verbose {
                println!("  [{}/{}] {}", i + 1, total, path.display());
            }
            self.scan_file(path)
        }));
        results
    }
}

fn load_image(path: &Path) -> Result<DynamicImage> {
    let img = ImageReader::open(path)
        .with_context(|| format!("could not open {}", path.display()))?
        .decode()
        .with_context(|| format!("could not decode {}", path.display()))?;
    Ok(img)
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

pub fn summarize(results: &[ScanOutcome]) -> ScanSummary {
    let successful_scans = results.iter().filter(|r| r.succeeded()).count();
    ScanSummary {
        total_files: results.len(),
        successful_scans,
        failed_scans: results.len() - successful_scans,
        total_symbols: results.iter().map(|r| r.symbols.len()).sum(),
    }
}

/// Write summary plus per-file results as JSON, overwriting `path`.
pub fn write_json_report(results: &[ScanOutcome], path: &Path) -> Result<()> {
    let report = BatchReport { scan_summary: summarize(results), results };
    let file = File::create(path)
        .with_context(|| format!("failed to create report file {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &report)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

/// Write a human-readable report, overwriting `path`.
pub fn write_text_report(results: &[ScanOutcome], path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create report file {}", path.display()))?;
    let mut out = BufWriter::new(file);

    let summary = summarize(results);
    writeln!(out, "BATCH BARCODE SCAN RESULTS")?;
    writeln!(out, "{}", "=".repeat(50))?;
    writeln!(out)?;
    writeln!(out, "SUMMARY:")?;
    writeln!(out, "  Total files processed: {}", summary.total_files)?;
    writeln!(out, "  Successful scans: {}", summary.successful_scans)?;
    writeln!(out, "  Failed scans: {}", summary.failed_scans)?;
    writeln!(out, "  Total symbols found: {}", summary.total_symbols)?;
    writeln!(out)?;
    writeln!(out, "DETAILED RESULTS:")?;
    writeln!(out, "{}", "-".repeat(50))?;

    for outcome in results {
        writeln!(out)?;
        writeln!(out, "File: {}", outcome.file.display())?;
        match &outcome.error {
            None => {
                writeln!(out, "Symbols found: {}", outcome.symbols.len())?;
                for (i, symbol) in outcome.symbols.iter().enumerate() {
                    writeln!(out, "  {}. Type: {}", i + 1, symbol.symbology)?;
                    writeln!(out, "     Data: {}", symbol.data)?;
                    writeln!(out, "     Confidence: {}%", symbol.confidence)?;
                    if !symbol.valid {
                        writeln!(out, "     Validation: FAILED")?;
                    }
                }
            }
            Some(error) => writeln!(out, "Error: {}", error)?,
        }
        writeln!(out, "{}", "-".repeat(30))?;
    }

    Ok(())
}
