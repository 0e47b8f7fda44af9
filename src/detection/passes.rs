use image::GrayImage;

use crate::detection::preprocessing;

/// One preprocessing transform tried against the grayscale input before
/// decoding. Passes are independent alternatives, not a chain: every
/// pass sees the same grayscale conversion and each one's output is fed
/// to the decode primitive separately.
pub trait PreprocessPass: Send + Sync {
    fn apply(&self, gray: &GrayImage) -> GrayImage;

    /// Human-readable name for this pass (used in verbose output)
    fn name(&self) -> &str;
}

/// The untouched grayscale conversion
pub struct IdentityPass;

impl PreprocessPass for IdentityPass {
    fn apply(&self, gray: &GrayImage) -> GrayImage {
        gray.clone()
    }

    fn name(&self) -> &str {
        "Grayscale"
    }
}

/// Gaussian blur to suppress sensor noise
pub struct BlurPass {
    pub sigma: f32,
}

impl PreprocessPass for BlurPass {
    fn apply(&self, gray: &GrayImage) -> GrayImage {
        preprocessing::apply_blur(gray, self.sigma)
    }

    fn name(&self) -> &str {
        "Gaussian Blur"
    }
}

/// Adaptive local thresholding, recovers low-contrast symbols
pub struct AdaptiveThresholdPass {
    pub block_radius: u32,
}

impl PreprocessPass for AdaptiveThresholdPass {
    fn apply(&self, gray: &GrayImage) -> GrayImage {
        preprocessing::threshold_local(gray, self.block_radius)
    }

    fn name(&self) -> &str {
        "Adaptive Threshold"
    }
}

/// Morphological closing, bridges small gaps in damaged bars
pub struct MorphClosePass {
    pub kernel_radius: u8,
}

impl PreprocessPass for MorphClosePass {
    fn apply(&self, gray: &GrayImage) -> GrayImage {
        preprocessing::close_gaps(gray, self.kernel_radius)
    }

    fn name(&self) -> &str {
        "Morphological Close"
    }
}

/// Canny edge map
pub struct EdgePass {
    pub low_threshold: f32,
    pub high_threshold: f32,
}

impl PreprocessPass for EdgePass {
    fn apply(&self, gray: &GrayImage) -> GrayImage {
        preprocessing::detect_edges(gray, self.low_threshold, self.high_threshold)
    }

    fn name(&self) -> &str {
        "Edge Detection"
    }
}

/// Global histogram equalization
pub struct EqualizePass;

impl PreprocessPass for EqualizePass {
    fn apply(&self, gray: &GrayImage) -> GrayImage {
        preprocessing::equalize(gray)
    }

    fn name(&self) -> &str {
        "Histogram Equalization"
    }
}

/// The six standard passes, in the order their results are pooled.
/// First-seen order decides which duplicate survives de-duplication, so
/// the raw grayscale pass goes first.
pub fn default_passes() -> Vec<Box<dyn PreprocessPass>> {
    vec![
        Box::new(IdentityPass),
        // sigma for a 3x3 kernel
        Box::new(BlurPass { sigma: 0.8 }),
        Box::new(AdaptiveThresholdPass { block_radius: 5 }),
        Box::new(MorphClosePass { kernel_radius: 1 }),
        Box::new(EdgePass { low_threshold: 50.0, high_threshold: 150.0 }),
        Box::new(EqualizePass),
    ]
}
