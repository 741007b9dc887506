use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLoadError(pub String);

impl fmt::Display for ImageLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "image load error: {}", self.0)
    }
}

impl std::error::Error for ImageLoadError {}

/// Decoded 8-bit RGBA pixels, straight alpha, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl ImageData {
    /// Wraps raw RGBA bytes. Fails if the buffer does not match `width × height × 4`.
    pub fn from_rgba8(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, ImageLoadError> {
        if width == 0 || height == 0 {
            return Err(ImageLoadError(format!("empty image {width}x{height}")));
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(ImageLoadError(format!(
                "expected {expected} bytes for {width}x{height}, got {}",
                rgba.len()
            )));
        }
        Ok(Self { width, height, rgba })
    }

    /// A `width × height` image filled with one straight-alpha RGBA pixel.
    pub fn solid(width: u32, height: u32, pixel: [u8; 4]) -> Self {
        let w = width.max(1);
        let h = height.max(1);
        let rgba = pixel.repeat(w as usize * h as usize);
        Self { width: w, height: h, rgba }
    }

    /// Decodes an encoded image (PNG) from memory.
    pub fn decode(bytes: &[u8]) -> Result<Self, ImageLoadError> {
        let img = image::load_from_memory(bytes).map_err(|e| ImageLoadError(e.to_string()))?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba8(width, height, rgba.into_raw())
    }

    /// Reads and decodes an image file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ImageLoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| ImageLoadError(format!("{}: {e}", path.display())))?;
        let data = Self::decode(&bytes)
            .map_err(|e| ImageLoadError(format!("{}: {}", path.display(), e.0)))?;
        log::debug!("loaded {} ({}x{})", path.display(), data.width, data.height);
        Ok(data)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_png(width: u32, height: u32, pixel: [u8; 4]) -> Vec<u8> {
        let img = ::image::RgbaImage::from_pixel(width, height, ::image::Rgba(pixel));
        let mut buf = Vec::new();
        ::image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), ::image::ImageFormat::Png)
            .unwrap();
        buf
    }

    // ── decode ────────────────────────────────────────────────────────────

    #[test]
    fn decode_png_reports_size_and_pixels() {
        let png = encode_png(3, 2, [200, 10, 20, 255]);
        let data = ImageData::decode(&png).unwrap();
        assert_eq!((data.width(), data.height()), (3, 2));
        assert_eq!(data.rgba().len(), 3 * 2 * 4);
        assert_eq!(&data.rgba()[..4], &[200, 10, 20, 255]);
    }

    #[test]
    fn decode_garbage_fails() {
        let err = ImageData::decode(b"definitely not a png").unwrap_err();
        assert!(err.to_string().starts_with("image load error"));
    }

    // ── load ──────────────────────────────────────────────────────────────

    #[test]
    fn load_missing_file_names_the_path() {
        let err = ImageData::load("no/such/dir/heart.png").unwrap_err();
        assert!(err.0.contains("heart.png"));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!("kardia-image-{}.png", std::process::id()));
        std::fs::write(&path, encode_png(4, 4, [0, 0, 0, 0])).unwrap();
        let data = ImageData::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!((data.width(), data.height()), (4, 4));
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn from_rgba8_rejects_wrong_length() {
        assert!(ImageData::from_rgba8(2, 2, vec![0; 15]).is_err());
        assert!(ImageData::from_rgba8(0, 2, vec![]).is_err());
    }

    #[test]
    fn solid_fills_every_pixel() {
        let data = ImageData::solid(2, 3, [1, 2, 3, 4]);
        assert_eq!((data.width(), data.height()), (2, 3));
        assert!(data.rgba().chunks_exact(4).all(|p| p == [1, 2, 3, 4]));
    }
}
