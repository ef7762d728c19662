use image::{DynamicImage, GenericImageView, imageops::FilterType};

use crate::color::Pixel;
use crate::error::{PaletteError, Result};

/// A rectangular region of interest, in image pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Area {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Area {
    /// The whole `width` x `height` image.
    pub const fn full(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height }
    }

    fn fits(&self, width: u32, height: u32) -> bool {
        self.width > 0
            && self.height > 0
            && self.x.checked_add(self.width).is_some_and(|right| right <= width)
            && self.y.checked_add(self.height).is_some_and(|bottom| bottom <= height)
    }
}

/// Read pixels out of a flat `r, g, b, a, r, g, b, a, ...` buffer (the layout
/// of a canvas `ImageData`). Alpha is dropped; a trailing partial pixel is
/// ignored.
pub fn pixels_from_rgba(raw: &[u8]) -> Vec<Pixel> {
    raw.chunks_exact(4)
        .map(|chunk| Pixel::new(chunk[0], chunk[1], chunk[2]))
        .collect()
}

/// Every pixel of `img`, row-major.
pub fn image_pixels(img: &DynamicImage) -> Vec<Pixel> {
    img.to_rgb8().pixels().map(|p| Pixel::from(p.0)).collect()
}

/// Cut `area` out of `img`.
pub fn crop_area(img: &DynamicImage, area: Area) -> Result<DynamicImage> {
    let (width, height) = img.dimensions();
    if !area.fits(width, height) {
        return Err(PaletteError::AreaOutOfBounds { area, width, height });
    }
    Ok(img.crop_imm(area.x, area.y, area.width, area.height))
}

/// Row-major pixels of `area` within `img`.
pub fn pixels_in_area(img: &DynamicImage, area: Area) -> Result<Vec<Pixel>> {
    crop_area(img, area).map(|cropped| image_pixels(&cropped))
}

/// Shrink `img` (nearest-neighbour, aspect ratio kept) so its longest side is
/// at most `longest_side`. Smaller images are returned unchanged.
pub fn downscale(img: DynamicImage, longest_side: u32) -> DynamicImage {
    let (w, h) = img.dimensions();
    let max_side = w.max(h);
    if longest_side == 0 || max_side <= longest_side {
        return img;
    }

    let ratio = longest_side as f32 / max_side as f32;
    let out_w = ((w as f32) * ratio).round().max(1.0) as u32;
    let out_h = ((h as f32) * ratio).round().max(1.0) as u32;
    DynamicImage::ImageRgba8(image::imageops::resize(&img, out_w, out_h, FilterType::Nearest))
}
