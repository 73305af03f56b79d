use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "std")]
use std::path::Path;

use crate::error::GraymapError;
use crate::info::GraymapFormat;

/// An 8-bit grayscale image decoded from a PBM or PGM file.
///
/// Samples are stored row-major, one byte each, scaled to 0..=255 whatever
/// the source variant. The image starts empty and is filled by a load.
///
/// A load that fails after the dimensions were read keeps those dimensions
/// and a zeroed buffer; only a bad magic line leaves the image untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraymapImage {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    max_value: u16,
    format: Option<GraymapFormat>,
    comment: Option<String>,
}

impl Default for GraymapImage {
    fn default() -> Self {
        Self::new()
    }
}

impl GraymapImage {
    pub const fn new() -> Self {
        Self {
            pixels: Vec::new(),
            width: 0,
            height: 0,
            max_value: 255,
            format: None,
            comment: None,
        }
    }

    /// Load a PBM/PGM file, replacing any previous contents.
    ///
    /// Returns `false` on failure; the reason is logged at debug level.
    /// Use [`GraymapImage::load`] to get the error itself.
    #[cfg(feature = "std")]
    pub fn load_image(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        match self.load(path) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("failed to load {}: {e}", path.display());
                false
            }
        }
    }

    /// Load a PBM/PGM file, replacing any previous contents.
    #[cfg(feature = "std")]
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), GraymapError> {
        let data = std::fs::read(path)?;
        self.decode_from(&data)
    }

    /// Decode an in-memory PBM/PGM file with default settings.
    pub fn decode_from(&mut self, data: &[u8]) -> Result<(), GraymapError> {
        crate::DecodeRequest::new(data).decode_into(self, enough::Unstoppable)
    }

    /// Width in pixels, 0 before a load.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels, 0 before a load.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Nominal maximum sample value from the header (255 if none was read).
    pub fn max_value(&self) -> u16 {
        self.max_value
    }

    /// Variant of the last file whose dimensions were read.
    pub fn format(&self) -> Option<GraymapFormat> {
        self.format
    }

    /// The header comment line, without its leading `#`.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// All samples, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Sample at linear index `y * width + x`.
    ///
    /// Only the linear index is bounds-checked: an `x` past the row width
    /// reads from the following row.
    pub fn pixel(&self, x: u32, y: u32) -> Result<u8, GraymapError> {
        let len = self.pixels.len();
        let index = (y as usize)
            .checked_mul(self.width as usize)
            .and_then(|row| row.checked_add(x as usize))
            .ok_or(GraymapError::OutOfRange {
                index: usize::MAX,
                len,
            })?;
        self.pixels
            .get(index)
            .copied()
            .ok_or(GraymapError::OutOfRange { index, len })
    }

    pub fn is_initialized(&self) -> bool {
        self.width != 0 && self.height != 0 && !self.pixels.is_empty()
    }

    /// Borrow the buffer as a 2D image.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, u8> {
        imgref::ImgRef::new(&self.pixels, self.width as usize, self.height as usize)
    }

    /// Take ownership of the samples.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Commit new dimensions with a zeroed buffer of `len` samples.
    pub(crate) fn reset(
        &mut self,
        format: GraymapFormat,
        comment: Option<String>,
        width: u32,
        height: u32,
        len: usize,
    ) {
        self.format = Some(format);
        self.comment = comment;
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(len, 0);
    }

    pub(crate) fn set_max_value(&mut self, max_value: u16) {
        self.max_value = max_value;
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }
}
