use crate::models::BoundingBox;
use crate::symbology::Symbology;

/// Heuristic 0-100 plausibility score for a raw decode.
///
/// Display/triage only, never a correctness filter. The arithmetic is
/// fixed for compatibility with existing consumers:
/// base = min(70, payload bytes * 5), plus a per-symbology bonus, plus
/// +10 for a box larger than 50x20 and an independent +5 for a
/// height/width ratio in [0.1, 0.5], clamped at 100. An empty payload
/// scores 0.
pub fn confidence_score(payload: &[u8], symbology: &Symbology, rect: &BoundingBox) -> u8 {
    if payload.is_empty() {
        return 0;
    }

    let base = 70.min(payload.len() * 5);

    let symbology_bonus: usize = match symbology {
        Symbology::QrCode => 30,
        Symbology::Ean13 | Symbology::UpcA | Symbology::DataMatrix | Symbology::Aztec => 25,
        Symbology::Code128 | Symbology::Ean8 | Symbology::UpcE | Symbology::Pdf417 => 20,
        Symbology::Code39 | Symbology::Codabar | Symbology::Itf | Symbology::Code93 => 15,
        _ => 10,
    };

    let mut geometry_bonus = 0;
    if rect.width > 50 && rect.height > 20 {
        geometry_bonus = 10;
    }
    if rect.width > 0 {
        let aspect = rect.height as f32 / rect.width as f32;
        if (0.1..=0.5).contains(&aspect) {
            geometry_bonus += 5;
        }
    }

    100.min(base + symbology_bonus + geometry_bonus) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_scores_zero() {
        let rect = BoundingBox::new(0, 0, 120, 30);
        assert_eq!(confidence_score(b"", &Symbology::QrCode, &rect), 0);
    }

    #[test]
    fn code39_example_scores_seventy() {
        // base 40 (8 bytes * 5) + 15 symbology + 10 size + 5 aspect
        let rect = BoundingBox::new(0, 0, 120, 30);
        assert_eq!(confidence_score(b"HELLO123", &Symbology::Code39, &rect), 70);
    }

    #[test]
    fn score_is_clamped_at_one_hundred() {
        let rect = BoundingBox::new(0, 0, 300, 90);
        let payload = b"https://example.com/some/long/payload";
        assert_eq!(confidence_score(payload, &Symbology::QrCode, &rect), 100);
    }

    #[test]
    fn unknown_symbology_gets_default_bonus() {
        // base 20 + 10 default, no geometry bonus for a tiny square box
        let rect = BoundingBox::new(0, 0, 10, 10);
        let symbology = Symbology::Other("MAXICODE".to_string());
        assert_eq!(confidence_score(b"ABCD", &symbology, &rect), 30);
    }

    #[test]
    fn aspect_bonus_applies_without_size_bonus() {
        // 40x10: too small for the size bonus, ratio 0.25 earns +5
        let rect = BoundingBox::new(0, 0, 40, 10);
        assert_eq!(confidence_score(b"12345678", &Symbology::Ean8, &rect), 65);
    }

    #[test]
    fn scoring_is_idempotent() {
        let rect = BoundingBox::new(3, 7, 80, 24);
        let first = confidence_score(b"0123456789128", &Symbology::Ean13, &rect);
        let second = confidence_score(b"0123456789128", &Symbology::Ean13, &rect);
        assert_eq!(first, second);
    }

    #[test]
    fn score_stays_in_bounds() {
        let rects = [
            BoundingBox::new(0, 0, 0, 0),
            BoundingBox::new(0, 0, 51, 21),
            BoundingBox::new(0, 0, 1000, 100),
        ];
        let payloads: [&[u8]; 3] = [b"", b"x", b"0123456789012345678901234567890123456789"];
        for rect in &rects {
            for payload in payloads {
                let score = confidence_score(payload, &Symbology::QrCode, rect);
                assert!(score <= 100);
            }
        }
    }
}
