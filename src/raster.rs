//! Raster decoders for the four variants.
//!
//! Every decoder fills `out` (already zeroed, `width * height` samples) in
//! row-major order. In lenient mode running out of input stops the decode
//! and leaves the remaining samples at zero.

use alloc::format;

use enough::Stop;
use log::warn;

use crate::error::GraymapError;
use crate::header::HeaderLayout;
use crate::info::GraymapFormat;
use crate::reader::{Cursor, TokenError, is_space};

pub(crate) struct RasterParams {
    pub format: GraymapFormat,
    pub width: usize,
    pub max_value: u16,
    pub layout: HeaderLayout,
    pub strict: bool,
}

pub(crate) fn decode_raster(
    cur: &mut Cursor<'_>,
    params: &RasterParams,
    out: &mut [u8],
    stop: &dyn Stop,
) -> Result<(), GraymapError> {
    if out.is_empty() || params.width == 0 {
        return Ok(());
    }
    match params.format {
        GraymapFormat::AsciiBitmap => decode_ascii(cur, params, out, stop, |v| match v {
            0 => Some(0),
            1 => Some(255),
            _ => None,
        }),
        GraymapFormat::AsciiGraymap => {
            // Only strict mode holds samples to the header max value.
            let max = u32::from(params.max_value);
            let strict = params.strict;
            decode_ascii(cur, params, out, stop, |v| {
                if strict && v > max {
                    None
                } else {
                    u8::try_from(v).ok()
                }
            })
        }
        GraymapFormat::BinaryBitmap => {
            skip_raster_separator(cur, params)?;
            decode_packed_bits(cur, params, out, stop)
        }
        GraymapFormat::BinaryGraymap => {
            skip_raster_separator(cur, params)?;
            decode_raw_bytes(cur, params, out, stop)
        }
    }
}

/// Text rasters: one token per sample, mapped through `convert`.
///
/// A token `convert` rejects is an error in strict mode and saturates to 255
/// otherwise. For P1 that means a token other than 0 or 1 reads as 255
/// rather than wrapping the byte product `token * 255`.
fn decode_ascii(
    cur: &mut Cursor<'_>,
    params: &RasterParams,
    out: &mut [u8],
    stop: &dyn Stop,
    convert: impl Fn(u32) -> Option<u8>,
) -> Result<(), GraymapError> {
    for (y, row) in out.chunks_exact_mut(params.width).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for (x, sample) in row.iter_mut().enumerate() {
            let value = match cur.read_uint() {
                Ok(v) => v,
                Err(TokenError::Overflow) if !params.strict => u32::MAX,
                Err(e) => return truncated(params, e, x, y),
            };
            *sample = match convert(value) {
                Some(s) => s,
                None if params.strict => {
                    return Err(GraymapError::InvalidData(format!(
                        "{} sample {value} at ({x}, {y}) is out of range",
                        params.format.magic()
                    )));
                }
                None => u8::MAX,
            };
        }
    }
    Ok(())
}

/// Skip what separates the header from a binary raster.
fn skip_raster_separator(
    cur: &mut Cursor<'_>,
    params: &RasterParams,
) -> Result<(), GraymapError> {
    match params.layout {
        HeaderLayout::Compat => {
            cur.skip_whitespace();
        }
        HeaderLayout::Netpbm => match cur.peek() {
            Some(b) if is_space(b) => cur.advance(1),
            None if !params.strict => {}
            None => return Err(GraymapError::UnexpectedEof),
            Some(b) => {
                return Err(GraymapError::InvalidHeader(format!(
                    "expected whitespace before raster, found byte {b:#04x}"
                )));
            }
        },
    }
    Ok(())
}

/// P4: `ceil(width / 8)` bytes per row, bit 7 is the leftmost sample.
fn decode_packed_bits(
    cur: &mut Cursor<'_>,
    params: &RasterParams,
    out: &mut [u8],
    stop: &dyn Stop,
) -> Result<(), GraymapError> {
    let row_bytes = params.width.div_ceil(8);
    for (y, row) in out.chunks_exact_mut(params.width).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        let src = cur.read_bytes(row_bytes);
        for (group, &byte) in row.chunks_mut(8).zip(src) {
            for (k, sample) in group.iter_mut().enumerate() {
                *sample = ((byte >> (7 - k)) & 0x01) * 0xFF;
            }
        }
        if src.len() < row_bytes {
            return truncated(params, TokenError::Eof, src.len() * 8, y);
        }
    }
    Ok(())
}

/// P5: one byte per sample, copied as-is.
fn decode_raw_bytes(
    cur: &mut Cursor<'_>,
    params: &RasterParams,
    out: &mut [u8],
    stop: &dyn Stop,
) -> Result<(), GraymapError> {
    for (y, row) in out.chunks_exact_mut(params.width).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        let src = cur.read_bytes(row.len());
        row[..src.len()].copy_from_slice(src);
        if src.len() < row.len() {
            return truncated(params, TokenError::Eof, src.len(), y);
        }
    }
    Ok(())
}

fn truncated(
    params: &RasterParams,
    reason: TokenError,
    x: usize,
    y: usize,
) -> Result<(), GraymapError> {
    if params.strict {
        return Err(match reason {
            TokenError::Eof => GraymapError::UnexpectedEof,
            other => GraymapError::InvalidData(format!(
                "{} at ({x}, {y}): {}",
                params.format.magic(),
                other.describe()
            )),
        });
    }
    warn!(
        "{} raster ended at ({x}, {y}): {}; remaining samples left at zero",
        params.format.magic(),
        reason.describe()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use enough::Unstoppable;

    fn params(format: GraymapFormat, width: usize, strict: bool) -> RasterParams {
        RasterParams {
            format,
            width,
            max_value: 255,
            layout: HeaderLayout::Compat,
            strict,
        }
    }

    #[test]
    fn packed_bits_msb_first() {
        let mut cur = Cursor::new(&[0b1010_0000]);
        let mut out = vec![0u8; 8];
        decode_raster(
            &mut cur,
            &params(GraymapFormat::BinaryBitmap, 8, true),
            &mut out,
            &Unstoppable,
        )
        .unwrap();
        assert_eq!(out, [255, 0, 255, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn packed_bits_partial_group_stops_at_row_end() {
        // width 3: each row uses the top 3 bits of one byte.
        let mut cur = Cursor::new(&[0b1111_1111, 0b0101_1111]);
        let mut out = vec![0u8; 6];
        decode_raster(
            &mut cur,
            &params(GraymapFormat::BinaryBitmap, 3, true),
            &mut out,
            &Unstoppable,
        )
        .unwrap();
        assert_eq!(out, [255, 255, 255, 0, 255, 0]);
    }

    #[test]
    fn compat_separator_swallows_whitespace_samples() {
        // A leading 0x20 sample is indistinguishable from header whitespace.
        let mut cur = Cursor::new(b"\n\x20\x07");
        let mut out = vec![0u8; 2];
        decode_raster(
            &mut cur,
            &params(GraymapFormat::BinaryGraymap, 2, false),
            &mut out,
            &Unstoppable,
        )
        .unwrap();
        assert_eq!(out, [7, 0]);
    }

    #[test]
    fn netpbm_separator_is_one_byte() {
        let mut cur = Cursor::new(b"\n\x20\x07");
        let mut out = vec![0u8; 2];
        let p = RasterParams {
            layout: HeaderLayout::Netpbm,
            ..params(GraymapFormat::BinaryGraymap, 2, true)
        };
        decode_raster(&mut cur, &p, &mut out, &Unstoppable).unwrap();
        assert_eq!(out, [0x20, 0x07]);
    }

    #[test]
    fn ascii_graymap_stores_verbatim() {
        let mut cur = Cursor::new(b" 0 7\n15 3");
        let mut out = vec![0u8; 4];
        let p = RasterParams {
            max_value: 15,
            ..params(GraymapFormat::AsciiGraymap, 2, true)
        };
        decode_raster(&mut cur, &p, &mut out, &Unstoppable).unwrap();
        assert_eq!(out, [0, 7, 15, 3]);
    }

    #[test]
    fn ascii_graymap_above_max_value() {
        let p = RasterParams {
            max_value: 15,
            ..params(GraymapFormat::AsciiGraymap, 2, true)
        };
        let mut out = vec![0u8; 2];
        let err = decode_raster(&mut Cursor::new(b"3 16"), &p, &mut out, &Unstoppable);
        assert!(matches!(err, Err(GraymapError::InvalidData(_))));

        // Lenient mode stores the sample verbatim.
        let lenient = RasterParams { strict: false, ..p };
        let mut out = vec![0u8; 2];
        decode_raster(&mut Cursor::new(b"3 16"), &lenient, &mut out, &Unstoppable).unwrap();
        assert_eq!(out, [3, 16]);

        // Only samples that do not fit in a byte saturate.
        let mut out = vec![0u8; 2];
        decode_raster(&mut Cursor::new(b"300 7"), &lenient, &mut out, &Unstoppable).unwrap();
        assert_eq!(out, [255, 7]);
    }

    #[test]
    fn ascii_bitmap_rejects_non_binary_tokens_when_strict() {
        let mut out = vec![0u8; 2];
        let err = decode_raster(
            &mut Cursor::new(b"1 2"),
            &params(GraymapFormat::AsciiBitmap, 2, true),
            &mut out,
            &Unstoppable,
        );
        assert!(matches!(err, Err(GraymapError::InvalidData(_))));
    }

    #[test]
    fn ascii_bitmap_saturates_non_binary_tokens_when_lenient() {
        let mut out = vec![0u8; 3];
        decode_raster(
            &mut Cursor::new(b"1 2 0"),
            &params(GraymapFormat::AsciiBitmap, 3, false),
            &mut out,
            &Unstoppable,
        )
        .unwrap();
        assert_eq!(out, [255, 255, 0]);
    }

    #[test]
    fn lenient_truncation_leaves_zeros() {
        let mut out = vec![0u8; 4];
        decode_raster(
            &mut Cursor::new(b"1 1 x 1"),
            &params(GraymapFormat::AsciiBitmap, 2, false),
            &mut out,
            &Unstoppable,
        )
        .unwrap();
        assert_eq!(out, [255, 255, 0, 0]);
    }

    #[test]
    fn strict_truncation_is_eof() {
        let mut out = vec![0u8; 4];
        let err = decode_raster(
            &mut Cursor::new(b"\x01\x02\x03"),
            &params(GraymapFormat::BinaryGraymap, 2, true),
            &mut out,
            &Unstoppable,
        );
        assert!(matches!(err, Err(GraymapError::UnexpectedEof)));
        assert_eq!(out, [1, 2, 3, 0]);
    }
}
