//! PNG encoding for 8-bit grayscale rasters.
//!
//! Writes a minimal PNG (color type 0, bit depth 8): signature, IHDR, one
//! zlib-compressed IDAT and IEND. Each scanline is `width` bytes prefixed
//! with filter type 0.

use std::io::Write;

/// PNG file signature
const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Create a grayscale PNG from one byte per pixel.
///
/// # Arguments
/// - `pixels`: Row-major intensities, `width * height` bytes
/// - `width`: Image width in pixels
/// - `height`: Image height in pixels
pub fn encode_grayscale_png(pixels: &[u8], width: usize, height: usize) -> Result<Vec<u8>, String> {
    if width == 0 || height == 0 {
        return Err(format!("PNG dimensions must be non-zero, got {}x{}", width, height));
    }
    if pixels.len() != width * height {
        return Err(format!(
            "Pixel buffer has {} bytes, expected {} for {}x{}",
            pixels.len(),
            width * height,
            width,
            height
        ));
    }
    let width_u32 = u32::try_from(width).map_err(|_| format!("Width {} too large", width))?;
    let height_u32 = u32::try_from(height).map_err(|_| format!("Height {} too large", height))?;

    let mut png = Vec::new();

    // PNG signature
    png.extend_from_slice(&PNG_SIGNATURE);

    // IHDR chunk
    let mut ihdr_data = Vec::with_capacity(13);
    ihdr_data.extend_from_slice(&width_u32.to_be_bytes());
    ihdr_data.extend_from_slice(&height_u32.to_be_bytes());
    ihdr_data.push(8); // bit depth
    ihdr_data.push(0); // color type 0 = grayscale
    ihdr_data.push(0); // compression method
    ihdr_data.push(0); // filter method
    ihdr_data.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr_data);

    // IDAT chunk (image data)
    let idat_data = deflate_idat_grayscale(pixels, width, height)
        .map_err(|e| format!("IDAT compression failed: {}", e))?;
    write_chunk(&mut png, b"IDAT", &idat_data);

    // IEND chunk
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Deflate grayscale image data for IDAT chunk.
fn deflate_idat_grayscale(
    pixels: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, std::io::Error> {
    // Each row is: filter_byte + width intensity bytes
    let mut uncompressed = Vec::with_capacity(height * (1 + width));
    for row in pixels.chunks_exact(width) {
        uncompressed.push(0); // filter type: none
        uncompressed.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder.write_all(&uncompressed)?;
    encoder.finish()
}

/// Write a PNG chunk
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    // Write length
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());

    // Write chunk type
    png.extend_from_slice(chunk_type);

    // Write data
    png.extend_from_slice(data);

    // CRC covers type and data, not length
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}
