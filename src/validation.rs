//! Per-symbology plausibility checks.
//!
//! A cheap sanity filter applied before a detection is surfaced: a
//! failing payload is flagged, not discarded. Correctness of the decode
//! itself is the decode primitive's business.

use crate::symbology::Symbology;

const CODE39_ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ-. $/+%*";

/// EAN/UPC payload lengths in common circulation (EAN-8, UPC-A, EAN-13,
/// GTIN-14).
const EAN_UPC_LENGTHS: [usize; 4] = [8, 12, 13, 14];

/// Check that the payload is plausible for the claimed symbology.
pub fn validate(symbology: &Symbology, data: &str) -> bool {
    match symbology {
        Symbology::Code39 => validate_code39(data),
        Symbology::Code128 => validate_code128(data),
        Symbology::Ean13 | Symbology::Ean8 | Symbology::UpcA | Symbology::UpcE => {
            validate_ean_upc(data)
        }
        Symbology::QrCode | Symbology::DataMatrix | Symbology::Pdf417 | Symbology::Aztec => {
            !data.is_empty()
        }
        _ => !data.is_empty(),
    }
}

/// Every character, uppercased, must lie in the Code 39 alphabet.
fn validate_code39(data: &str) -> bool {
    data.to_uppercase().chars().all(|c| CODE39_ALPHABET.contains(c))
}

/// Code 128 encodes the ASCII range.
fn validate_code128(data: &str) -> bool {
    data.is_ascii()
}

/// All-digit payload of a recognized EAN/UPC length.
fn validate_ean_upc(data: &str) -> bool {
    !data.is_empty()
        && data.bytes().all(|b| b.is_ascii_digit())
        && EAN_UPC_LENGTHS.contains(&data.len())
}
