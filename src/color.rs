use std::fmt;

use palette::Srgb;

/// A sampled pixel with its alpha already discarded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Pixel {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Srgb<u8>> for Pixel {
    fn from(c: Srgb<u8>) -> Self {
        Self::new(c.red, c.green, c.blue)
    }
}

/// The representative color of a bucket: the channel-wise average of its pixels.
///
/// Same shape as [`Pixel`], but never a sampled value unless the bucket held
/// a single pixel or identical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Upper-case `RRGGBB`, no leading `#`.
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

// A single-pixel bucket averages to itself.
impl From<Pixel> for Color {
    fn from(p: Pixel) -> Self {
        Self::new(p.r, p.g, p.b)
    }
}

impl From<Color> for Srgb<u8> {
    fn from(c: Color) -> Self {
        Srgb::new(c.r, c.g, c.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// One of the three color axes a bucket can be split along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    R,
    G,
    B,
}

impl Channel {
    /// All channels, in tie-break priority order.
    pub const ALL: [Channel; 3] = [Channel::R, Channel::G, Channel::B];

    #[inline(always)]
    pub fn of(self, pixel: &Pixel) -> u8 {
        match self {
            Channel::R => pixel.r,
            Channel::G => pixel.g,
            Channel::B => pixel.b,
        }
    }

    #[inline(always)]
    pub(crate) fn index(self) -> usize {
        match self {
            Channel::R => 0,
            Channel::G => 1,
            Channel::B => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_reads_matching_component() {
        let p = Pixel::new(1, 2, 3);
        assert_eq!(Channel::R.of(&p), 1);
        assert_eq!(Channel::G.of(&p), 2);
        assert_eq!(Channel::B.of(&p), 3);
    }

    #[test]
    fn hex_is_upper_case_and_padded() {
        assert_eq!(Color::new(0, 10, 255).to_hex(), "000AFF");
    }

    #[test]
    fn display_matches_css_rgb() {
        assert_eq!(Color::new(12, 34, 56).to_string(), "rgb(12, 34, 56)");
    }

    #[test]
    fn palette_interop() {
        let p: Pixel = Srgb::new(9u8, 8, 7).into();
        assert_eq!(p, Pixel::new(9, 8, 7));

        let s: Srgb<u8> = Color::new(4, 5, 6).into();
        assert_eq!((s.red, s.green, s.blue), (4, 5, 6));
    }
}
