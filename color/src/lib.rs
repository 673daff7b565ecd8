// cartograph/color/src/lib.rs
//
// Copyright © 2019 The Cartograph Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pixel records and RGBA pixel buffers.
//!
//! Raster surfaces produced by font engines and image decoders rarely agree with the map engine
//! about byte order or which scanline comes first. Everything here is parameterized over a
//! `PixelFormat` so the adapters only have to state the layout they are given and the layout
//! they must produce.

use std::fmt::{self, Debug, Formatter};

pub use crate::buffer::PixelBuffer;
pub use crate::format::{ChannelOrder, PixelFormat, RowOrder};

mod buffer;
mod format;


/// One 8-bit-per-channel pixel in red, green, blue, alpha order.
///
/// This is the record the map engine consumes for glyph bitmaps.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Pixel {
        Pixel { r, g, b, a }
    }

    #[inline]
    pub const fn transparent_black() -> Pixel {
        Pixel::new(0, 0, 0, 0)
    }

    #[inline]
    pub const fn transparent_white() -> Pixel {
        Pixel::new(255, 255, 255, 0)
    }

    #[inline]
    pub const fn white() -> Pixel {
        Pixel::new(255, 255, 255, 255)
    }

    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Returns this pixel with its alpha scaled by `coverage / 255`.
    #[inline]
    pub fn with_coverage(&self, coverage: u8) -> Pixel {
        let a = (self.a as u32 * coverage as u32 + 127) / 255;
        Pixel { a: a as u8, ..*self }
    }

    /// Composites this (non-premultiplied) pixel over `dest` with the Porter-Duff "over"
    /// operator.
    pub fn over(&self, dest: Pixel) -> Pixel {
        if self.a == 0 {
            return dest;
        }
        if self.a == 255 || dest.a == 0 {
            return *self;
        }

        let src_alpha = self.a as f32 / 255.0;
        let dest_alpha = dest.a as f32 / 255.0 * (1.0 - src_alpha);
        let alpha = src_alpha + dest_alpha;
        let blend = |src: u8, dst: u8| -> u8 {
            let value = (src as f32 * src_alpha + dst as f32 * dest_alpha) / alpha;
            value.round().max(0.0).min(255.0) as u8
        };

        Pixel {
            r: blend(self.r, dest.r),
            g: blend(self.g, dest.g),
            b: blend(self.b, dest.b),
            a: (alpha * 255.0).round().min(255.0) as u8,
        }
    }
}

impl Debug for Pixel {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        if self.a == 255 {
            write!(formatter, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(formatter,
                   "rgba({}, {}, {}, {})",
                   self.r,
                   self.g,
                   self.b,
                   self.a as f32 / 255.0)
        }
    }
}

/// Returns the smallest power of two that is greater than or equal to `value`.
///
/// Values below 1 round up to 1.
#[inline]
pub fn power_of_two(value: i32) -> i32 {
    if value <= 1 {
        return 1;
    }
    (value as u32).next_power_of_two() as i32
}
