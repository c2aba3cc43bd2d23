// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Colouring.  The escape value picks a hue; saturation is always
//! full; points that never escaped get no brightness at all.  The
//! resulting HSV triple is turned into RGB with the same 8-bit
//! arithmetic common imaging libraries use, so the output is stable
//! to the byte.

/// An 8-bit hue, saturation, value triple.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Hsv {
    /// Hue, with the full colour wheel spread over 0..=255.
    pub hue: u8,
    /// Saturation.
    pub saturation: u8,
    /// Brightness.
    pub value: u8,
}

/// An 8-bit red, green, blue triple.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// The channels in encoder order.
    pub fn channels(&self) -> [u8; 3] {
        [self.0, self.1, self.2]
    }
}

/// Pick the colour of a pixel from its escape value.
pub fn hsv_for(escape_value: f64, max_iterations: u32) -> Hsv {
    let limit = f64::from(max_iterations);
    let hue = (255.0 * escape_value / limit).trunc();
    let hue = if hue.is_nan() { 0.0 } else { hue.max(0.0).min(255.0) };
    Hsv {
        hue: hue as u8,
        saturation: 255,
        value: if escape_value < limit { 255 } else { 0 },
    }
}

fn clip8(v: f32) -> u8 {
    v.round().max(0.0).min(255.0) as u8
}

impl Hsv {
    /// Six-sector HSV to RGB conversion in 8-bit space.  The hue wheel
    /// is divided into sectors of 255/6, and the in-between channels
    /// are rounded to the nearest integer.
    pub fn to_rgb(&self) -> Rgb {
        let v = self.value;
        if self.saturation == 0 {
            return Rgb(v, v, v);
        }

        let h = f32::from(self.hue) * 6.0 / 255.0;
        let sector = h.floor();
        let f = h - sector;
        let s = f32::from(self.saturation) / 255.0;
        let vf = f32::from(v);

        let p = clip8(vf * (1.0 - s));
        let q = clip8(vf * (1.0 - s * f));
        let t = clip8(vf * (1.0 - s * (1.0 - f)));

        match (sector as u32) % 6 {
            0 => Rgb(v, t, p),
            1 => Rgb(q, v, p),
            2 => Rgb(p, v, t),
            3 => Rgb(p, q, v),
            4 => Rgb(t, p, v),
            _ => Rgb(v, p, q),
        }
    }
}

/// Escape value straight to RGB.
pub fn colour_for(escape_value: f64, max_iterations: u32) -> Rgb {
    hsv_for(escape_value, max_iterations).to_rgb()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_escaping_points_are_black() {
        for &limit in &[1, 50, 80, 1000] {
            let hsv = hsv_for(f64::from(limit), limit);
            assert_eq!(hsv.value, 0);
            assert_eq!(hsv.to_rgb(), Rgb(0, 0, 0));
        }
    }

    #[test]
    fn escaping_points_are_bright() {
        for &value in &[0.0, 0.5, 1.64, 40.0, 79.99] {
            let hsv = hsv_for(value, 80);
            assert_eq!(hsv.value, 255);
            assert_eq!(hsv.saturation, 255);
        }
    }

    #[test]
    fn hue_is_truncated_not_rounded() {
        // 255 * 1.643 / 80 = 5.237...
        assert_eq!(hsv_for(1.643, 80).hue, 5);
        assert_eq!(hsv_for(40.0, 80).hue, 127);
    }

    #[test]
    fn hue_is_clamped_into_a_byte() {
        assert_eq!(hsv_for(80.9, 80).hue, 255);
        assert_eq!(hsv_for(-0.5, 80).hue, 0);
        assert_eq!(hsv_for(::std::f64::NAN, 80).hue, 0);
    }

    #[test]
    fn primary_hues() {
        let rgb = |hue| {
            Hsv {
                hue,
                saturation: 255,
                value: 255,
            }
            .to_rgb()
        };
        assert_eq!(rgb(0), Rgb(255, 0, 0));
        assert_eq!(rgb(85), Rgb(0, 255, 0));
        assert_eq!(rgb(170), Rgb(0, 0, 255));
        assert_eq!(rgb(255), Rgb(255, 0, 0));
    }

    #[test]
    fn in_between_hues_round_to_nearest() {
        let hsv = Hsv {
            hue: 128,
            saturation: 255,
            value: 255,
        };
        assert_eq!(hsv.to_rgb(), Rgb(0, 252, 255));
        let hsv = Hsv {
            hue: 5,
            saturation: 255,
            value: 255,
        };
        // 5 * 6 / 255 = 0.1176..., t = 255 * 0.1176... = 30
        assert_eq!(hsv.to_rgb(), Rgb(255, 30, 0));
    }

    #[test]
    fn unsaturated_is_grey() {
        let hsv = Hsv {
            hue: 200,
            saturation: 0,
            value: 90,
        };
        assert_eq!(hsv.to_rgb(), Rgb(90, 90, 90));
    }
}
