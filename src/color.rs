//! Pixel color model for the 1-bit-per-pixel framebuffer.

use embedded_graphics::pixelcolor::BinaryColor;

/// Drawing color applied as a bitwise operation against the target bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Clear the pixel (dark).
    Off,
    /// Set the pixel (lit).
    #[default]
    On,
    /// Invert the pixel (XOR).
    Toggle,
}

impl Color {
    /// Applies this color to every bit selected by `mask` within `dst`.
    /// All pixel, run and blit paths funnel through this one
    /// read-modify-write.
    #[inline]
    pub(crate) fn apply(self, dst: &mut u8, mask: u8) {
        match self {
            Color::On => *dst |= mask,
            Color::Off => *dst &= !mask,
            Color::Toggle => *dst ^= mask,
        }
    }
}

impl From<BinaryColor> for Color {
    fn from(c: BinaryColor) -> Self {
        match c {
            BinaryColor::On => Color::On,
            BinaryColor::Off => Color::Off,
        }
    }
}

impl From<bool> for Color {
    fn from(lit: bool) -> Self {
        if lit { Color::On } else { Color::Off }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_set_clear_toggle() {
        let mut b = 0b0000_1111;
        Color::On.apply(&mut b, 0b1000_0000);
        assert_eq!(b, 0b1000_1111);
        Color::Off.apply(&mut b, 0b0000_0011);
        assert_eq!(b, 0b1000_1100);
        Color::Toggle.apply(&mut b, 0b1111_1111);
        assert_eq!(b, 0b0111_0011);
    }

    #[test]
    fn binary_color_maps_onto_set_clear() {
        assert_eq!(Color::from(BinaryColor::On), Color::On);
        assert_eq!(Color::from(BinaryColor::Off), Color::Off);
        assert_eq!(Color::from(true), Color::On);
    }
}
