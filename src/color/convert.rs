use palette::encoding;
use palette::{FromColor, Hsl, Srgb};

/// Convert 8-bit sRGB channels into `(hue°, saturation, lightness)`.
/// Hue lands in `[0, 360)`, saturation and lightness in `[0, 1]`.
pub fn rgb_to_hsl([r, g, b]: [u8; 3]) -> (f64, f64, f64) {
    let rgb: Srgb<f64> = Srgb::new(channel_to_unit(r), channel_to_unit(g), channel_to_unit(b));
    let hsl: Hsl<encoding::Srgb, f64> = Hsl::from_color(rgb);
    (hsl.hue.into_positive_degrees(), hsl.saturation, hsl.lightness)
}

/// Convert an HSL triple (same ranges as [`rgb_to_hsl`]) back into 8-bit sRGB,
/// rounding each channel to the nearest integer.
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> [u8; 3] {
    let hsl: Hsl<encoding::Srgb, f64> = Hsl::new(hue, saturation, lightness);
    let rgb: Srgb<f64> = Srgb::from_color(hsl);
    [
        unit_to_channel(rgb.red),
        unit_to_channel(rgb.green),
        unit_to_channel(rgb.blue),
    ]
}

fn channel_to_unit(c: u8) -> f64 {
    f64::from(c) / 255.0
}

fn unit_to_channel(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_primary_colors_to_hsl() {
        let (h, s, l) = rgb_to_hsl([255, 0, 0]);
        assert!(approx(h, 0.0) && approx(s, 1.0) && approx(l, 0.5));

        let (h, _, _) = rgb_to_hsl([0, 255, 0]);
        assert!(approx(h, 120.0));

        let (h, _, _) = rgb_to_hsl([0, 0, 255]);
        assert!(approx(h, 240.0));
    }

    #[test]
    fn test_gray_has_no_saturation() {
        let (_, s, l) = rgb_to_hsl([128, 128, 128]);
        assert!(approx(s, 0.0));
        assert!(approx(l, 128.0 / 255.0));
    }

    #[test]
    fn test_hsl_to_rgb_rounds_channels() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), [255, 0, 0]);
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.2), [0, 102, 0]);
        assert_eq!(hsl_to_rgb(0.0, 0.0, 1.0), [255, 255, 255]);
    }

    #[test]
    fn test_every_gray_level_survives_a_round_trip() {
        for v in 0..=255u8 {
            let (h, s, l) = rgb_to_hsl([v, v, v]);
            assert_eq!(hsl_to_rgb(h, s, l), [v, v, v]);
        }
    }
}
