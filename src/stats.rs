use std::collections::HashMap;

use serde::Serialize;

use crate::models::DetectedSymbol;
use crate::symbology::{Symbology, SymbologyFamily};

/// Aggregate view over the detection history.
///
/// Recomputed by full scan on demand; history sizes in this domain are
/// small enough that no incremental state is kept.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DetectionStats {
    pub total_detections: usize,
    pub linear_barcodes: usize,
    pub matrix_barcodes: usize,
    pub type_breakdown: HashMap<Symbology, usize>,
    pub last_detection: Option<DetectedSymbol>,
}

impl DetectionStats {
    pub fn compute<'a, I>(history: I) -> Self
    where
        I: IntoIterator<Item = &'a DetectedSymbol>,
    {
        let mut stats = DetectionStats::default();

        for symbol in history {
            stats.total_detections += 1;
            match symbol.symbology.family() {
                SymbologyFamily::Linear => stats.linear_barcodes += 1,
                SymbologyFamily::Matrix => stats.matrix_barcodes += 1,
                SymbologyFamily::Other => {}
            }
            *stats.type_breakdown.entry(symbol.symbology.clone()).or_insert(0) += 1;
            stats.last_detection = Some(symbol.clone());
        }

        stats
    }
}
