use enough::Stop;
use log::trace;

use crate::error::GraymapError;
use crate::header::{self, HeaderLayout};
use crate::image::GraymapImage;
use crate::limits::Limits;
use crate::raster::{self, RasterParams};
use crate::reader::Cursor;

/// Builder for decoding a PBM/PGM file held in memory.
///
/// Defaults: no limits, [`HeaderLayout::Compat`], lenient raster parsing
/// (truncated data leaves trailing samples at zero).
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    layout: HeaderLayout,
    strict: bool,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            layout: HeaderLayout::default(),
            strict: false,
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn header_layout(mut self, layout: HeaderLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Report truncated or malformed data instead of zero-filling.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Decode into a fresh image.
    pub fn decode(self, stop: impl Stop) -> Result<GraymapImage, GraymapError> {
        let mut image = GraymapImage::new();
        self.decode_into(&mut image, stop)?;
        Ok(image)
    }

    /// Decode into an existing image, replacing its contents.
    ///
    /// There is no rollback. An unrecognized magic line or a limit failure
    /// leaves `image` untouched; any later failure leaves the new dimensions
    /// and a partly filled buffer behind. An unsupported max value is still
    /// recorded (clamped to `u16::MAX`).
    pub fn decode_into(
        self,
        image: &mut GraymapImage,
        stop: impl Stop,
    ) -> Result<(), GraymapError> {
        let stop: &dyn Stop = &stop;
        let mut cur = Cursor::new(self.data);

        let format = header::read_magic(&mut cur, self.layout)?;
        let comment = header::read_comment(&mut cur, self.layout);
        let (width, height) = header::read_dimensions(&mut cur, self.layout, self.strict)?;

        let unlimited = Limits::default();
        let len = self.limits.unwrap_or(&unlimited).sample_count(width, height)?;

        image.reset(format, comment, width, height, len);

        let max_value = match header::read_max_value(&mut cur, format, self.layout, self.strict) {
            Ok(v) => v,
            Err(GraymapError::UnsupportedMaxValue(v)) => {
                // The rejected value stays visible through `max_value()`.
                image.set_max_value(u16::try_from(v).unwrap_or(u16::MAX));
                return Err(GraymapError::UnsupportedMaxValue(v));
            }
            Err(e) => return Err(e),
        };
        image.set_max_value(max_value);
        trace!(
            "{} {width}x{height} max {max_value}, raster at byte {}",
            format.magic(),
            cur.position()
        );

        stop.check()?;

        let params = RasterParams {
            format,
            width: width as usize,
            max_value,
            layout: self.layout,
            strict: self.strict,
        };
        raster::decode_raster(&mut cur, &params, image.buffer_mut(), stop)
    }
}
