use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::symbology::Symbology;

/// Axis-aligned rectangle in source-image pixel coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Smallest box enclosing the given polygon, clamped to non-negative
    /// coordinates.
    pub fn enclosing(points: &[Point]) -> Self {
        let min_x = points.iter().map(|p| p.x).min().unwrap_or(0).max(0);
        let min_y = points.iter().map(|p| p.y).min().unwrap_or(0).max(0);
        let max_x = points.iter().map(|p| p.x).max().unwrap_or(0).max(0);
        let max_y = points.iter().map(|p| p.y).max().unwrap_or(0).max(0);
        Self {
            x: min_x as u32,
            y: min_y as u32,
            width: (max_x - min_x) as u32,
            height: (max_y - min_y) as u32,
        }
    }
}

/// One vertex of a detected symbol's outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Raw record returned by the decode primitive, before scoring and
/// validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDetection {
    pub payload: Vec<u8>,
    pub symbology: Symbology,
    pub rect: BoundingBox,
    pub polygon: Vec<Point>,
}

/// One decoded barcode instance. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedSymbol {
    pub data: String,
    pub symbology: Symbology,
    pub rect: BoundingBox,
    pub polygon: Vec<Point>,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Heuristic plausibility score, 0-100. Display/triage only.
    pub confidence: u8,
    /// Whether the payload passed the per-symbology validation rules.
    pub valid: bool,
}
