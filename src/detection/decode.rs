use image::GrayImage;
use log::debug;

use crate::models::{BoundingBox, Point, RawDetection};
use crate::symbology::Symbology;

/// The decode primitive: turns a single-channel image into zero or more
/// raw barcode records. The detector treats the results as ground truth
/// and does no symbol decoding of its own.
pub trait Decode: Send + Sync {
    fn decode(&self, image: &GrayImage) -> Vec<RawDetection>;
}

/// QR code backend built on rqrr.
#[derive(Debug, Default)]
pub struct QrDecoder;

impl QrDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decode for QrDecoder {
    fn decode(&self, image: &GrayImage) -> Vec<RawDetection> {
        let mut prepared = rqrr::PreparedImage::prepare(image.clone());
        let grids = prepared.detect_grids();
        let mut detections = Vec::with_capacity(grids.len());

        for grid in grids {
            let polygon: Vec<Point> = grid
                .bounds
                .iter()
                .map(|p| Point { x: p.x as i32, y: p.y as i32 })
                .collect();

            match grid.decode() {
                Ok((_meta, content)) => {
                    let rect = BoundingBox::enclosing(&polygon);
                    detections.push(RawDetection {
                        payload: content.into_bytes(),
                        symbology: Symbology::QrCode,
                        rect,
                        polygon,
                    });
                }
                Err(e) => {
                    debug!("skipping grid that failed to decode: {}", e);
                }
            }
        }

        detections
    }
}
