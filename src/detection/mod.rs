pub mod confidence;
pub mod decode;
pub mod passes;
pub mod preprocessing;

use std::collections::HashSet;

use image::DynamicImage;
use time::OffsetDateTime;

use crate::models::{DetectedSymbol, RawDetection};
use crate::validation;

pub use confidence::confidence_score;
pub use decode::{Decode, QrDecoder};
pub use passes::{PreprocessPass, default_passes};

/// Pixel size of the position buckets used to merge duplicate decodes
/// across passes.
const DEDUP_BUCKET: u32 = 10;

/// Multi-pass detector: runs every preprocessing pass over the grayscale
/// conversion of one image, feeds each result to the decode primitive,
/// pools the records and de-duplicates them.
///
/// Stateless: detection history belongs to the caller (see
/// [`crate::history::DetectionLog`]).
pub struct BarcodeDetector {
    passes: Vec<Box<dyn PreprocessPass>>,
    decoder: Box<dyn Decode>,
    verbose: bool,
}

impl BarcodeDetector {
    /// Detector with the six standard passes and the built-in QR backend.
    pub fn new() -> Self {
        Self::with_decoder(Box::new(QrDecoder::new()))
    }

    /// Detector with the six standard passes and a custom decode backend.
    pub fn with_decoder(decoder: Box<dyn Decode>) -> Self {
        Self { passes: default_passes(), decoder, verbose: false }
    }

    pub fn with_passes(mut self, passes: Vec<Box<dyn PreprocessPass>>) -> Self {
        self.passes = passes;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run all passes against the image and pool the raw results.
    ///
    /// Every pass runs unconditionally; none is skipped based on earlier
    /// results. An image with no symbols yields an empty vec, never an
    /// error. De-duplication keeps the first-seen record for each
    /// (payload, symbology, position bucket) key.
    pub fn detect(&self, img: &DynamicImage) -> Vec<RawDetection> {
        let gray = preprocessing::to_grayscale(img);

        let mut pooled = Vec::new();
        for pass in &self.passes {
            let transformed = pass.apply(&gray);
            let found = self.decoder.decode(&transformed);
            if self.verbose {
                println!("  {}: {} raw detections", pass.name(), found.len());
            }
            pooled.extend(found);
        }

        dedup(pooled)
    }

    /// Attach timestamp, confidence score and validation flag to a raw
    /// record.
    pub fn process(&self, raw: &RawDetection) -> DetectedSymbol {
        let confidence = confidence_score(&raw.payload, &raw.symbology, &raw.rect);
        let data = String::from_utf8_lossy(&raw.payload).into_owned();
        let valid = validation::validate(&raw.symbology, &data);

        DetectedSymbol {
            data,
            symbology: raw.symbology.clone(),
            rect: raw.rect.clone(),
            polygon: raw.polygon.clone(),
            timestamp: OffsetDateTime::now_utc(),
            confidence,
            valid,
        }
    }

    /// Detect and process in one call.
    pub fn scan(&self, img: &DynamicImage) -> Vec<DetectedSymbol> {
        self.detect(img).iter().map(|raw| self.process(raw)).collect()
    }
}

impl Default for BarcodeDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn dedup(raw: Vec<RawDetection>) -> Vec<RawDetection> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for detection in raw {
        let key = (
            detection.payload.clone(),
            detection.symbology.clone(),
            detection.rect.x / DEDUP_BUCKET,
            detection.rect.y / DEDUP_BUCKET,
        );
        if seen.insert(key) {
            unique.push(detection);
        }
    }

    unique
}
