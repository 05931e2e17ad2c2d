// Packed RGBA8888 helpers: 0xRRGGBBAA.

use crate::consts::SIDE_SHADE;

#[inline]
pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    ((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | a as u32
}

#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> u32 {
    rgba(r, g, b, 0xFF)
}

#[inline]
pub const fn unpack(color: u32) -> [u8; 4] {
    [
        (color >> 24) as u8,
        (color >> 16) as u8,
        (color >> 8) as u8,
        color as u8,
    ]
}

/// Darkens R, G and B to `SIDE_SHADE / 255` of their value, alpha untouched.
#[inline]
pub fn shade(color: u32) -> u32 {
    let [r, g, b, a] = unpack(color);
    let dim = |c: u8| (c as u32 * SIDE_SHADE / 255) as u8;
    rgba(dim(r), dim(g), dim(b), a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_and_unpack_agree() {
        let c = rgba(1, 2, 3, 4);
        assert_eq!(c, 0x0102_0304);
        assert_eq!(unpack(c), [1, 2, 3, 4]);
    }

    #[test]
    fn shade_scales_channels_but_keeps_alpha() {
        assert_eq!(shade(rgba(255, 255, 255, 200)), rgba(180, 180, 180, 200));
        assert_eq!(shade(rgb(160, 40, 40)), rgb(112, 28, 28));
        assert_eq!(shade(rgba(0, 0, 0, 0)), 0);
    }
}
