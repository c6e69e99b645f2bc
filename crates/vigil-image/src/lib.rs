//! Raster decoding and tensor building for the vigil pipeline.
//!
//! Turns an NV21 byte buffer (luma plane followed by interleaved V/U chroma
//! pairs at quarter resolution) into an `image::RgbImage`, and turns rasters
//! into normalized HWC `Tensor<f32>` frames ready for scoring.

pub mod error;

pub use error::ImageError;

use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use vigil_base::Tensor;

/// Expected byte length of an NV21 buffer for the given dimensions.
pub fn nv21_len(width: u32, height: u32) -> usize {
    let pixels = width as usize * height as usize;
    pixels + 2 * (pixels / 4)
}

/// Decodes an NV21 buffer into an RGB raster.
///
/// The chroma pair for pixel `(x, y)` is the V,U pair of its 2x2 block.
/// Conversion uses BT.601 coefficients:
/// - R = Y + 1.402 * (V - 128)
/// - G = Y - 0.344 * (U - 128) - 0.714 * (V - 128)
/// - B = Y + 1.772 * (U - 128)
///
/// The decoded raster is then run through a JPEG encode/decode round trip at
/// `quality`. Classification only needs coarse pixel fidelity, and the lossy
/// step keeps scores comparable with captures that arrive as JPEG.
///
/// # Errors
///
/// Returns `ImageError::Decode` if the buffer is shorter than the bytes the
/// chroma indexing touches (`nv21_len(width, height)` for even dimensions;
/// odd dimensions read one extra chroma column/row) or either dimension is
/// zero, and `ImageError::Encode` if the JPEG round trip fails.
pub fn decode_nv21(
    data: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<RgbImage, ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::Decode(format!(
            "dimensions must be non-zero, got {width}x{height}"
        )));
    }

    let w = width as usize;
    let h = height as usize;
    let chroma_base = w * h;
    let half_w = w / 2;

    // Last chroma pair read below, for the bottom-right pixel.
    let last_pair = chroma_base + ((h - 1) / 2) * half_w * 2 + ((w - 1) / 2) * 2;
    let expected = last_pair + 2;
    if data.len() < expected {
        return Err(ImageError::Decode(format!(
            "NV21 buffer too short: need {expected} bytes for {width}x{height}, got {}",
            data.len()
        )));
    }

    let mut rgb = Vec::with_capacity(w * h * 3);
    for y in 0..h {
        for x in 0..w {
            let luma = data[y * w + x] as f32;
            let pair = chroma_base + (y / 2) * half_w * 2 + (x / 2) * 2;
            let v = data[pair] as f32;
            let u = data[pair + 1] as f32;

            let r = (luma + 1.402 * (v - 128.0)).clamp(0.0, 255.0) as u8;
            let g = (luma - 0.344 * (u - 128.0) - 0.714 * (v - 128.0)).clamp(0.0, 255.0) as u8;
            let b = (luma + 1.772 * (u - 128.0)).clamp(0.0, 255.0) as u8;
            rgb.extend_from_slice(&[r, g, b]);
        }
    }

    let raster = RgbImage::from_raw(width, height, rgb)
        .ok_or_else(|| ImageError::Decode("RGB buffer size mismatch".to_string()))?;

    jpeg_round_trip(&raster, quality)
}

/// Lossy JPEG encode/decode pass over a raster.
fn jpeg_round_trip(raster: &RgbImage, quality: u8) -> Result<RgbImage, ImageError> {
    let mut encoded = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut encoded, quality);
    raster
        .write_with_encoder(encoder)
        .map_err(|e| ImageError::Encode(e.to_string()))?;

    let decoded = image::load_from_memory(&encoded)?;
    Ok(decoded.to_rgb8())
}

/// Builds a normalized single-frame tensor from an RGB raster.
///
/// Resizes with bilinear filtering to `target_width` x `target_height`, then
/// divides every channel by 255. Output shape is
/// `[target_height, target_width, 3]` with every value in [0, 1].
///
/// Pure and deterministic: identical raster and target size yield
/// bit-identical tensors.
pub fn build_frame_tensor(
    raster: &RgbImage,
    target_width: u32,
    target_height: u32,
) -> Result<Tensor<f32>, ImageError> {
    let resized = image::imageops::resize(raster, target_width, target_height, FilterType::Triangle);

    let shape = vec![target_height as usize, target_width as usize, 3];
    let data = resized
        .into_raw()
        .into_iter()
        .map(|byte| byte as f32 / 255.0)
        .collect();

    Ok(Tensor::new(shape, data)?)
}
