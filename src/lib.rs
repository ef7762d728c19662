use wasm_bindgen::prelude::*;
use js_sys::Array;
#[cfg(not(target_arch = "wasm32"))]
use anyhow::{Context, Result};

pub mod color;
pub mod error;
pub mod extract;
pub mod median_cut;

pub use color::{Channel, Color, Pixel};
pub use error::PaletteError;
pub use extract::{Area, crop_area, downscale, image_pixels, pixels_from_rgba, pixels_in_area};
pub use median_cut::{DEFAULT_COLORS, MAX_COLORS, quantize};

/// Extract the dominant colors of `pixels` with median cut.
///
/// See [`median_cut::quantize`] for how many colors come back and in what order.
pub fn get_palette(pixels: &[Pixel], n: usize) -> error::Result<Vec<Color>> {
    median_cut::quantize(pixels, n)
}

/// How to turn an encoded image into a palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteOptions {
    /// Requested palette size, capped at [`MAX_COLORS`].
    pub colors: usize,
    /// Region to sample. `None` samples the whole image.
    pub area: Option<Area>,
    /// Shrink the sampled region so its longest side is at most this many
    /// pixels. Applied after cropping to `area`, so `area` is always in
    /// original image coordinates.
    pub downscale: Option<u32>,
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self { colors: DEFAULT_COLORS, area: None, downscale: None }
    }
}

/// Decode `input` and extract a palette from it.
fn palette_from_encoded(input: &[u8], options: &PaletteOptions) -> error::Result<Vec<Color>> {
    let img = image::load_from_memory(input)?;
    let img = match options.area {
        Some(area) => crop_area(&img, area)?,
        None => img,
    };
    let img = match options.downscale {
        Some(side) => downscale(img, side),
        None => img,
    };

    let pixels = image_pixels(&img);
    log::debug!(
        "sampled {} pixels from a {}x{} region",
        pixels.len(),
        img.width(),
        img.height()
    );

    get_palette(&pixels, options.colors)
}

// ------------------------------------------------------------
// wasm entry points
// ------------------------------------------------------------

fn hex_array(palette: &[Color]) -> Array {
    let out = Array::new();
    for color in palette {
        out.push(&JsValue::from_str(&color.to_hex()));
    }
    out
}

/// Extract up to `n_colors` dominant colors from an encoded image.
///
/// Returns an array of `RRGGBB` hex strings in split order.
#[wasm_bindgen(js_name = imagePalette)]
pub fn image_palette(
    input: Vec<u8>,
    n_colors: usize,
    downscale: Option<u32>,
) -> Result<Array, JsValue> {
    let options = PaletteOptions { colors: n_colors, area: None, downscale };
    let palette = palette_from_encoded(&input, &options)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(hex_array(&palette))
}

/// Quantize raw RGBA bytes, as returned by `CanvasRenderingContext2D.getImageData().data`.
#[wasm_bindgen(js_name = quantizeRgba)]
pub fn quantize_rgba(data: Vec<u8>, n_colors: usize) -> Result<Array, JsValue> {
    let pixels = pixels_from_rgba(&data);
    let palette = get_palette(&pixels, n_colors)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(hex_array(&palette))
}

// ------------------------------------------------------------
// Native entry points
// ------------------------------------------------------------

#[cfg(not(target_arch = "wasm32"))]
pub fn extract_palette_bytes(input: &[u8], options: &PaletteOptions) -> Result<Vec<Color>> {
    palette_from_encoded(input, options).context("palette extraction failed")
}

#[cfg(not(target_arch = "wasm32"))]
pub fn extract_palette_file(path: &std::path::Path, options: &PaletteOptions) -> Result<Vec<Color>> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    extract_palette_bytes(&bytes, options)
        .with_context(|| format!("extracting palette from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_ask_for_one_color() {
        let options = PaletteOptions::default();
        assert_eq!(options.colors, 1);
        assert_eq!(options.area, None);
        assert_eq!(options.downscale, None);
    }

    #[test]
    fn get_palette_matches_quantize() {
        let pixels = [Pixel::new(0, 0, 0), Pixel::new(200, 100, 50)];
        assert_eq!(get_palette(&pixels, 2).unwrap(), quantize(&pixels, 2).unwrap());
        assert_eq!(get_palette(&pixels, 1).unwrap(), vec![Color::new(100, 50, 25)]);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = palette_from_encoded(b"not an image", &PaletteOptions::default()).unwrap_err();
        assert!(matches!(err, PaletteError::Decode(_)));
    }

    #[test]
    fn file_errors_name_the_path() {
        let path = std::env::temp_dir().join("median_cut_palette_not_an_image.bin");
        std::fs::write(&path, b"not an image").unwrap();
        let err = extract_palette_file(&path, &PaletteOptions::default()).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        let message = format!("{err:#}");
        assert!(message.contains(&path.display().to_string()), "{message}");
        assert!(message.contains("unable to decode image"), "{message}");
    }
}
