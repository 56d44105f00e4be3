//! HSL colours for discs and links.

use serde::{Deserialize, Serialize};

/// Colour in HSL space with opacity.
///
/// `hue` is in degrees and normalised into `[0, 360)` on construction,
/// `saturation`/`lightness` are percentages and `alpha` is `0.0 - 1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsla {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub alpha: f32,
}

impl Hsla {
    pub fn new(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        Self {
            hue: wrap_hue(hue),
            saturation: saturation.clamp(0.0, 100.0),
            lightness: lightness.clamp(0.0, 100.0),
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Convert to sRGB channels in `0.0 - 1.0`.
    pub fn to_rgb(&self) -> [f32; 3] {
        let s = self.saturation / 100.0;
        let l = self.lightness / 100.0;
        let a = s * l.min(1.0 - l);
        let f = |n: f32| {
            let k = (n + self.hue / 30.0) % 12.0;
            l - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0)
        };
        [f(0.0), f(8.0), f(4.0)]
    }

    /// Convert to 8-bit RGBA with straight (non-premultiplied) alpha.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let [r, g, b] = self.to_rgb();
        [
            channel_to_u8(r),
            channel_to_u8(g),
            channel_to_u8(b),
            channel_to_u8(self.alpha),
        ]
    }

    /// CSS `hsla()` notation, handy when forwarding to a browser canvas.
    pub fn to_css(&self) -> String {
        format!(
            "hsla({:.2}, {}%, {}%, {:.3})",
            self.hue, self.saturation, self.lightness, self.alpha
        )
    }
}

/// `rem_euclid` rounds tiny negative inputs up to exactly 360.0.
#[inline]
fn wrap_hue(hue: f32) -> f32 {
    let wrapped = hue.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

#[inline]
fn channel_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
