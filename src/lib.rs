pub mod batch;
pub mod detection;
pub mod history;
pub mod models;
pub mod stats;
pub mod symbology;
pub mod validation;

pub use detection::{BarcodeDetector, Decode, PreprocessPass, QrDecoder, confidence_score};
pub use history::DetectionLog;
pub use models::{BoundingBox, DetectedSymbol, Point, RawDetection};
pub use stats::DetectionStats;
pub use symbology::{Symbology, SymbologyFamily};
