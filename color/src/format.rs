// cartograph/color/src/format.rs
//
// Copyright © 2019 The Cartograph Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Descriptions of how 32-bit pixels are laid out in memory.

use crate::Pixel;

/// The order of the four 8-bit channels of a pixel in memory.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ChannelOrder {
    /// Red, green, blue, alpha. What the GPU upload path and the map engine expect.
    Rgba,
    /// Blue, green, red, alpha. A 32-bit ARGB word stored little-endian, the usual layout of
    /// native raster surfaces.
    Bgra,
}

/// Which visual row lives at the start of a buffer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RowOrder {
    /// Memory row 0 is the top of the image.
    TopDown,
    /// Memory row 0 is the bottom of the image (Y up).
    BottomUp,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PixelFormat {
    pub channels: ChannelOrder,
    pub rows: RowOrder,
}

impl PixelFormat {
    /// The layout of surfaces the host toolkit paints into.
    pub const NATIVE: PixelFormat = PixelFormat {
        channels: ChannelOrder::Bgra,
        rows: RowOrder::TopDown,
    };

    /// The layout the map engine consumes: row 0 is the bottom, bytes are RGBA.
    pub const ENGINE: PixelFormat = PixelFormat {
        channels: ChannelOrder::Rgba,
        rows: RowOrder::BottomUp,
    };

    /// Plain top-down RGBA, as produced by most image decoders.
    pub const RGBA8: PixelFormat = PixelFormat {
        channels: ChannelOrder::Rgba,
        rows: RowOrder::TopDown,
    };

    #[inline]
    pub const fn new(channels: ChannelOrder, rows: RowOrder) -> PixelFormat {
        PixelFormat { channels, rows }
    }
}

impl ChannelOrder {
    // Byte offsets of red, green, blue and alpha.
    #[inline]
    fn offsets(self) -> [usize; 4] {
        match self {
            ChannelOrder::Rgba => [0, 1, 2, 3],
            ChannelOrder::Bgra => [2, 1, 0, 3],
        }
    }

    #[inline]
    pub fn read(self, bytes: &[u8]) -> Pixel {
        let [r, g, b, a] = self.offsets();
        Pixel { r: bytes[r], g: bytes[g], b: bytes[b], a: bytes[a] }
    }

    #[inline]
    pub fn write(self, pixel: Pixel, bytes: &mut [u8]) {
        let [r, g, b, a] = self.offsets();
        bytes[r] = pixel.r;
        bytes[g] = pixel.g;
        bytes[b] = pixel.b;
        bytes[a] = pixel.a;
    }

    /// The order that results from exchanging bytes 0 and 2 of every pixel.
    #[inline]
    pub fn red_blue_swapped(self) -> ChannelOrder {
        match self {
            ChannelOrder::Rgba => ChannelOrder::Bgra,
            ChannelOrder::Bgra => ChannelOrder::Rgba,
        }
    }
}

impl RowOrder {
    #[inline]
    pub fn flipped(self) -> RowOrder {
        match self {
            RowOrder::TopDown => RowOrder::BottomUp,
            RowOrder::BottomUp => RowOrder::TopDown,
        }
    }

    /// Maps a visual row (0 = top) to a memory row for an image `height` rows tall.
    #[inline]
    pub fn memory_row(self, visual_row: i32, height: i32) -> i32 {
        match self {
            RowOrder::TopDown => visual_row,
            RowOrder::BottomUp => height - 1 - visual_row,
        }
    }
}
