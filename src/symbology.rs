use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Barcode encoding scheme reported by the decode primitive.
///
/// The named variants form the fixed supported set; anything else the
/// decoder reports lands in `Other` and is excluded from the supported
/// view regardless of payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbology {
    Code39,
    Code93,
    Code11,
    Code128,
    Codabar,
    Itf,
    Ean13,
    Ean8,
    UpcA,
    UpcE,
    Msi,
    Pharmacode,
    QrCode,
    DataMatrix,
    Pdf417,
    Aztec,
    Other(String),
}

/// Family partition used by the stats aggregator.
///
/// Code 11, MSI and Pharmacode are supported but counted in neither
/// family, so they fall under `Other` together with unrecognized tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbologyFamily {
    Linear,
    Matrix,
    Other,
}

impl Symbology {
    /// Canonical tag string, e.g. "CODE39" or "QRCODE".
    pub fn tag(&self) -> &str {
        match self {
            Symbology::Code39 => "CODE39",
            Symbology::Code93 => "CODE93",
            Symbology::Code11 => "CODE11",
            Symbology::Code128 => "CODE128",
            Symbology::Codabar => "CODABAR",
            Symbology::Itf => "ITF",
            Symbology::Ean13 => "EAN13",
            Symbology::Ean8 => "EAN8",
            Symbology::UpcA => "UPCA",
            Symbology::UpcE => "UPCE",
            Symbology::Msi => "MSI",
            Symbology::Pharmacode => "PHARMACODE",
            Symbology::QrCode => "QRCODE",
            Symbology::DataMatrix => "DATAMATRIX",
            Symbology::Pdf417 => "PDF417",
            Symbology::Aztec => "AZTEC",
            Symbology::Other(tag) => tag,
        }
    }

    /// Parse a tag string. Unrecognized tags are preserved in `Other`.
    pub fn from_tag(tag: &str) -> Symbology {
        match tag {
            "CODE39" => Symbology::Code39,
            "CODE93" => Symbology::Code93,
            "CODE11" => Symbology::Code11,
            "CODE128" => Symbology::Code128,
            "CODABAR" => Symbology::Codabar,
            "ITF" => Symbology::Itf,
            "EAN13" => Symbology::Ean13,
            "EAN8" => Symbology::Ean8,
            "UPCA" => Symbology::UpcA,
            "UPCE" => Symbology::UpcE,
            "MSI" => Symbology::Msi,
            "PHARMACODE" => Symbology::Pharmacode,
            "QRCODE" => Symbology::QrCode,
            "DATAMATRIX" => Symbology::DataMatrix,
            "PDF417" => Symbology::Pdf417,
            "AZTEC" => Symbology::Aztec,
            other => Symbology::Other(other.to_string()),
        }
    }

    /// Whether this symbology is in the fixed supported set.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Symbology::Other(_))
    }

    pub fn family(&self) -> SymbologyFamily {
        match self {
            Symbology::Code39
            | Symbology::Code93
            | Symbology::Code128
            | Symbology::Codabar
            | Symbology::Itf
            | Symbology::Ean13
            | Symbology::Ean8
            | Symbology::UpcA
            | Symbology::UpcE => SymbologyFamily::Linear,
            Symbology::QrCode
            | Symbology::DataMatrix
            | Symbology::Pdf417
            | Symbology::Aztec => SymbologyFamily::Matrix,
            Symbology::Code11
            | Symbology::Msi
            | Symbology::Pharmacode
            | Symbology::Other(_) => SymbologyFamily::Other,
        }
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// Serialized as the bare tag string so symbologies can key JSON maps.
impl Serialize for Symbology {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for Symbology {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TagVisitor;

        impl Visitor<'_> for TagVisitor {
            type Value = Symbology;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a symbology tag string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Symbology, E> {
                Ok(Symbology::from_tag(value))
            }
        }

        deserializer.deserialize_str(TagVisitor)
    }
}
