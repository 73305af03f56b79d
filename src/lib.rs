//! # zengraymap
//!
//! PBM and PGM decoder producing an 8-bit grayscale buffer.
//!
//! ## Supported Formats
//!
//! - **P1** (PBM ASCII) — `0`/`1` tokens, scaled to 0/255
//! - **P2** (PGM ASCII) — decimal samples up to the max value, stored as-is
//! - **P4** (PBM binary) — packed bits, MSB first, scaled to 0/255
//! - **P5** (PGM binary) — one byte per sample
//!
//! ## Header Layout
//!
//! By default ([`HeaderLayout::Compat`]) every variant carries a max value
//! field, bitmaps included, and the magic sits alone on the first line.
//! Files written by Netpbm tools omit the max value for P1/P4; decode those
//! with [`HeaderLayout::Netpbm`].
//!
//! ## Non-Goals
//!
//! - 16-bit samples (max value above 255 is rejected)
//! - Color (P3, P6, P7) and encoding
//! - Multi-image streams
//!
//! ## Usage
//!
//! ```no_run
//! use zengraymap::GraymapImage;
//!
//! let mut image = GraymapImage::new();
//! if !image.load_image("test_image.pgm") {
//!     eprintln!("failed to load image");
//! }
//! println!("{}x{}", image.width(), image.height());
//! ```
//!
//! With limits and strict parsing:
//!
//! ```
//! use zengraymap::{DecodeRequest, GraymapError, Limits, Unstoppable};
//!
//! let limits = Limits { max_samples: Some(1 << 20), ..Default::default() };
//! let image = DecodeRequest::new(b"P5\n2 1\n255\n\x10\x20")
//!     .with_limits(&limits)
//!     .strict(true)
//!     .decode(Unstoppable)?;
//! assert_eq!(image.pixel(1, 0)?, 0x20);
//! # Ok::<(), GraymapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod decode;
mod error;
mod header;
mod image;
mod info;
mod limits;
mod raster;
mod reader;

// Re-exports
pub use decode::DecodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::GraymapError;
pub use header::HeaderLayout;
pub use image::GraymapImage;
pub use info::{GraymapFormat, ImageInfo};
pub use limits::Limits;

/// Decode a PBM/PGM file with default settings.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<GraymapImage, GraymapError> {
    DecodeRequest::new(data).decode(stop)
}
