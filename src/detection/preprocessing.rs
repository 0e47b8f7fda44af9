use image::{DynamicImage, GrayImage};
use imageproc::contrast::{adaptive_threshold, equalize_histogram};
use imageproc::distance_transform::Norm;
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::close;

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Apply Gaussian blur to reduce sensor noise
pub fn apply_blur(img: &GrayImage, sigma: f32) -> GrayImage {
    gaussian_blur_f32(img, sigma)
}

/// Threshold against the local mean in a (2r+1)x(2r+1) window
pub fn threshold_local(img: &GrayImage, block_radius: u32) -> GrayImage {
    adaptive_threshold(img, block_radius)
}

/// Morphological closing with a square structuring element of radius k
pub fn close_gaps(img: &GrayImage, k: u8) -> GrayImage {
    close(img, Norm::LInf, k)
}

/// Detect edges using Canny edge detector
pub fn detect_edges(img: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    canny(img, low_threshold, high_threshold)
}

/// Spread the intensity histogram over the full range
pub fn equalize(img: &GrayImage) -> GrayImage {
    equalize_histogram(img)
}
