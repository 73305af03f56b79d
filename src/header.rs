//! Header parsing: magic line, optional comment, dimensions, max value.

use alloc::format;
use alloc::string::String;

use log::trace;

use crate::error::GraymapError;
use crate::info::GraymapFormat;
use crate::reader::{Cursor, TokenError, is_space};

/// Largest max value accepted; 16-bit samples are not supported.
pub(crate) const MAX_SUPPORTED_VALUE: u32 = 255;

/// How the header is laid out in the files being read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HeaderLayout {
    /// Magic on its own line, at most one comment line right after it, and
    /// a max value field for every variant, bitmaps included. Any run of
    /// whitespace separates the header from a binary raster.
    #[default]
    Compat,

    /// The published Netpbm layout: bitmaps carry no max value, comments may
    /// appear before any header field, and exactly one whitespace byte
    /// separates the header from a binary raster.
    Netpbm,
}

pub(crate) fn read_magic(
    cur: &mut Cursor<'_>,
    layout: HeaderLayout,
) -> Result<GraymapFormat, GraymapError> {
    let magic = match layout {
        HeaderLayout::Compat => cur.read_line().ok_or(GraymapError::UnrecognizedFormat)?,
        HeaderLayout::Netpbm => {
            let magic = cur.read_bytes(2);
            match cur.peek() {
                Some(b) if is_space(b) || b == b'#' => {}
                _ => return Err(GraymapError::UnrecognizedFormat),
            }
            magic
        }
    };
    let format = GraymapFormat::from_magic(magic).ok_or(GraymapError::UnrecognizedFormat)?;
    trace!("magic: {}", format.magic());
    Ok(format)
}

/// Consume the comment line following the magic, if there is one.
pub(crate) fn read_comment(cur: &mut Cursor<'_>, layout: HeaderLayout) -> Option<String> {
    if layout == HeaderLayout::Netpbm {
        cur.skip_whitespace();
    }
    if cur.peek() != Some(b'#') {
        return None;
    }
    cur.advance(1);
    let line = cur.read_line().unwrap_or_default();
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    Some(String::from_utf8_lossy(line).into_owned())
}

pub(crate) fn read_dimensions(
    cur: &mut Cursor<'_>,
    layout: HeaderLayout,
    strict: bool,
) -> Result<(u32, u32), GraymapError> {
    let width = header_uint(cur, layout, strict, "width")?;
    let height = header_uint(cur, layout, strict, "height")?;
    if strict && (width == 0 || height == 0) {
        return Err(GraymapError::InvalidHeader(format!(
            "zero dimension {width}x{height}"
        )));
    }
    trace!("width: {width}, height: {height}");
    Ok((width, height))
}

/// Read the max value field.
///
/// Under [`HeaderLayout::Netpbm`] bitmaps have no such field and report 255.
pub(crate) fn read_max_value(
    cur: &mut Cursor<'_>,
    format: GraymapFormat,
    layout: HeaderLayout,
    strict: bool,
) -> Result<u16, GraymapError> {
    if layout == HeaderLayout::Netpbm && format.is_bitmap() {
        return Ok(MAX_SUPPORTED_VALUE as u16);
    }
    let max_value = header_uint(cur, layout, strict, "max value")?;
    if max_value > MAX_SUPPORTED_VALUE {
        return Err(GraymapError::UnsupportedMaxValue(max_value));
    }
    if strict && max_value == 0 {
        return Err(GraymapError::InvalidHeader("max value is zero".into()));
    }
    trace!("max value: {max_value}");
    Ok(max_value as u16)
}

/// One numeric header field.
///
/// Lenient parsing follows textual stream extraction: a failed field reads
/// as 0 and an overflowing one as the largest representable value.
fn header_uint(
    cur: &mut Cursor<'_>,
    layout: HeaderLayout,
    strict: bool,
    field: &str,
) -> Result<u32, GraymapError> {
    if layout == HeaderLayout::Netpbm {
        cur.skip_whitespace_and_comments();
    }
    match cur.read_uint() {
        Ok(value) => Ok(value),
        Err(e) if strict => Err(GraymapError::InvalidHeader(format!(
            "{field}: {}",
            e.describe()
        ))),
        Err(TokenError::Overflow) => Ok(u32::MAX),
        Err(_) => Ok(0),
    }
}
