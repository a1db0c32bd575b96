pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let c = v * s;
    let h_prime = (h.rem_euclid(1.0) * 6.0) % 6.0;
    let x = c * (1.0 - ((h_prime % 2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match h_prime as i32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [r + m, g + m, b + m]
}

/// Decodes one sRGB channel to linear light.
fn srgb_channel_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Converts an sRGB color to the linear space the surface expects.
///
/// The swapchain uses an sRGB format, so every color handed to the GPU has
/// to be linear or it gets gamma-encoded twice.
pub fn srgb_to_linear(rgb: [f32; 3]) -> [f32; 3] {
    rgb.map(srgb_channel_to_linear)
}

/// Converts a CSS-style `0xRRGGBB` color to linear RGB.
pub fn hex_to_linear(hex: u32) -> [f32; 3] {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    srgb_to_linear([r, g, b])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsv_to_rgb_red() {
        let rgb = hsv_to_rgb(0.0, 1.0, 1.0);
        assert!((rgb[0] - 1.0).abs() < 0.01);
        assert!(rgb[1].abs() < 0.01);
        assert!(rgb[2].abs() < 0.01);
    }

    #[test]
    fn test_hsv_to_rgb_wraps_hue() {
        let a = hsv_to_rgb(0.25, 0.8, 0.9);
        let b = hsv_to_rgb(1.25, 0.8, 0.9);
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() < 1e-5);
        }
    }

    #[test]
    fn test_hex_to_linear_extremes() {
        assert_eq!(hex_to_linear(0x000000), [0.0, 0.0, 0.0]);
        let white = hex_to_linear(0xffffff);
        for c in white {
            assert!((c - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_hex_to_linear_darkens_midtones() {
        // 0x44aa88: sRGB midtones map below their encoded value
        let [r, g, b] = hex_to_linear(0x44aa88);
        assert!(r < 0x44 as f32 / 255.0);
        assert!(g < 0xaa as f32 / 255.0);
        assert!(b < 0x88 as f32 / 255.0);
        assert!(g > b && b > r);
    }
}
