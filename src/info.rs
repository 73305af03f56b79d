use alloc::string::String;

use crate::error::GraymapError;
use crate::header::{self, HeaderLayout};
use crate::reader::Cursor;

/// PBM/PGM variant, selected once from the magic line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GraymapFormat {
    /// P1: bitmap, whitespace-separated `0`/`1` tokens.
    AsciiBitmap,
    /// P2: graymap, whitespace-separated decimal samples.
    AsciiGraymap,
    /// P4: bitmap, 8 samples per byte, MSB first, rows padded to a byte.
    BinaryBitmap,
    /// P5: graymap, one raw byte per sample.
    BinaryGraymap,
}

impl GraymapFormat {
    /// Match a magic token exactly (`P1`, `P2`, `P4`, `P5`).
    pub fn from_magic(magic: &[u8]) -> Option<Self> {
        match magic {
            b"P1" => Some(Self::AsciiBitmap),
            b"P2" => Some(Self::AsciiGraymap),
            b"P4" => Some(Self::BinaryBitmap),
            b"P5" => Some(Self::BinaryGraymap),
            _ => None,
        }
    }

    pub fn magic(self) -> &'static str {
        match self {
            Self::AsciiBitmap => "P1",
            Self::AsciiGraymap => "P2",
            Self::BinaryBitmap => "P4",
            Self::BinaryGraymap => "P5",
        }
    }

    /// Whether samples are 1-bit (scaled to 0 or 255 on decode).
    pub fn is_bitmap(self) -> bool {
        matches!(self, Self::AsciiBitmap | Self::BinaryBitmap)
    }

    /// Whether the raster is stored as text tokens.
    pub fn is_ascii(self) -> bool {
        matches!(self, Self::AsciiBitmap | Self::AsciiGraymap)
    }
}

/// Header information, obtained without decoding the raster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub max_value: u16,
    pub format: GraymapFormat,
    /// The comment line directly after the magic, without the leading `#`.
    pub comment: Option<String>,
}

impl ImageInfo {
    /// Read just the header, laid out the way [`HeaderLayout::Compat`] expects.
    pub fn from_bytes(data: &[u8]) -> Result<Self, GraymapError> {
        Self::from_bytes_with_layout(data, HeaderLayout::default())
    }

    /// Read just the header. Malformed fields are reported rather than zeroed.
    pub fn from_bytes_with_layout(
        data: &[u8],
        layout: HeaderLayout,
    ) -> Result<Self, GraymapError> {
        let mut cur = Cursor::new(data);
        let format = header::read_magic(&mut cur, layout)?;
        let comment = header::read_comment(&mut cur, layout);
        let (width, height) = header::read_dimensions(&mut cur, layout, true)?;
        let max_value = header::read_max_value(&mut cur, format, layout, true)?;
        Ok(ImageInfo {
            width,
            height,
            max_value,
            format,
            comment,
        })
    }
}
