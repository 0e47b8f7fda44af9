use image::{DynamicImage, GrayImage};

use codescan::{
    BarcodeDetector, BoundingBox, Decode, DetectedSymbol, DetectionLog, Point, RawDetection,
    Symbology,
};

/// Replays the same records for every preprocessing pass, standing in
/// for the external decode primitive.
struct ScriptedDecoder {
    records: Vec<RawDetection>,
}

impl Decode for ScriptedDecoder {
    fn decode(&self, _image: &GrayImage) -> Vec<RawDetection> {
        self.records.clone()
    }
}

fn raw(payload: &[u8], symbology: Symbology, x: u32, y: u32, w: u32, h: u32) -> RawDetection {
    RawDetection {
        payload: payload.to_vec(),
        symbology,
        rect: BoundingBox::new(x, y, w, h),
        polygon: vec![
            Point { x: x as i32, y: y as i32 },
            Point { x: (x + w) as i32, y: (y + h) as i32 },
        ],
    }
}

#[test]
fn multi_pass_merge_collapses_duplicates() {
    let decoder = ScriptedDecoder {
        records: vec![
            raw(b"HELLO123", Symbology::Code39, 100, 100, 120, 30),
            raw(b"HELLO123", Symbology::Code39, 104, 100, 120, 30),
            raw(b"0123456789012", Symbology::Ean13, 300, 40, 90, 35),
        ],
    };
    let detector = BarcodeDetector::with_decoder(Box::new(decoder));
    let img = DynamicImage::new_luma8(640, 480);

    // Every pass replays three records; the pool collapses to two.
    let detections = detector.detect(&img);
    assert_eq!(detections.len(), 2);
    assert_eq!(detections[0].payload, b"HELLO123");
    assert_eq!(detections[0].rect.x, 100);
    assert_eq!(detections[1].symbology, Symbology::Ean13);
}

#[test]
fn scan_embeds_score_validation_and_support() {
    let decoder = ScriptedDecoder {
        records: vec![
            raw(b"HELLO123", Symbology::Code39, 10, 10, 120, 30),
            raw(b"400638133393a", Symbology::Ean13, 200, 10, 90, 35),
            raw(b"whatever", Symbology::Other("MAXICODE".into()), 400, 10, 60, 60),
        ],
    };
    let detector = BarcodeDetector::with_decoder(Box::new(decoder));
    let img = DynamicImage::new_luma8(640, 480);

    let symbols = detector.scan(&img);
    assert_eq!(symbols.len(), 3);

    let code39 = &symbols[0];
    assert_eq!(code39.confidence, 70);
    assert!(code39.valid);
    assert!(code39.symbology.is_supported());

    // Digit string with one letter fails the EAN rules but is still
    // surfaced, flagged.
    let ean = &symbols[1];
    assert!(!ean.valid);
    assert!(ean.symbology.is_supported());

    // Unrecognized tag: surfaced, excluded from the supported view.
    let other = &symbols[2];
    assert!(other.valid);
    assert!(!other.symbology.is_supported());
}

#[test]
fn empty_image_is_not_an_error() {
    let detector = BarcodeDetector::with_decoder(Box::new(ScriptedDecoder { records: vec![] }));
    let img = DynamicImage::new_luma8(64, 64);
    assert!(detector.scan(&img).is_empty());
}

#[test]
fn builtin_backend_scans_blank_image_clean() {
    // Exercises all six passes against rqrr on a featureless image.
    let detector = BarcodeDetector::new();
    let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(96, 96, image::Luma([255u8])));
    assert!(detector.scan(&img).is_empty());
}

#[test]
fn history_round_trips_through_json() -> anyhow::Result<()> {
    let decoder = ScriptedDecoder {
        records: vec![
            raw(b"HELLO123", Symbology::Code39, 10, 10, 120, 30),
            raw(b"https://example.com", Symbology::QrCode, 200, 10, 80, 80),
        ],
    };
    let detector = BarcodeDetector::with_decoder(Box::new(decoder));
    let img = DynamicImage::new_luma8(640, 480);

    let mut log = DetectionLog::new();
    for symbol in detector.scan(&img) {
        log.record(symbol);
    }

    let stats = log.stats();
    assert_eq!(stats.total_detections, 2);
    assert_eq!(stats.linear_barcodes, 1);
    assert_eq!(stats.matrix_barcodes, 1);
    assert_eq!(stats.last_detection.as_ref().unwrap().symbology, Symbology::QrCode);

    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("detections.json");
    log.save(&path)?;

    let parsed: Vec<DetectedSymbol> = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0].data, "HELLO123");
    assert_eq!(parsed[1].symbology, Symbology::QrCode);
    Ok(())
}

#[test]
fn repeated_detection_is_stable() {
    let make = || {
        BarcodeDetector::with_decoder(Box::new(ScriptedDecoder {
            records: vec![
                raw(b"ONE", Symbology::Code128, 5, 5, 100, 30),
                raw(b"TWO", Symbology::Code128, 5, 50, 100, 30),
            ],
        }))
    };
    let img = DynamicImage::new_luma8(320, 240);
    assert_eq!(make().detect(&img), make().detect(&img));
}
