// cartograph/color/src/buffer.rs
//
// Copyright © 2019 The Cartograph Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Owned, tightly packed 32-bit pixel storage.

use crate::format::{PixelFormat, RowOrder};
use crate::Pixel;
use pathfinder_geometry::vector::Vector2I;

const BYTES_PER_PIXEL: usize = 4;

/// A rectangular block of 4-byte pixels in a known `PixelFormat`.
///
/// Coordinates passed to the accessors are visual: `(0, 0)` is the top-left corner no matter
/// which row comes first in memory. A buffer with a width or height below 1 is null and holds no
/// bytes.
#[derive(Clone, PartialEq, Debug)]
pub struct PixelBuffer {
    size: Vector2I,
    format: PixelFormat,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Creates a buffer with every byte set to zero.
    pub fn new(size: Vector2I, format: PixelFormat) -> PixelBuffer {
        let length = byte_length(size);
        PixelBuffer { size, format, pixels: vec![0; length] }
    }

    pub fn filled(size: Vector2I, format: PixelFormat, pixel: Pixel) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(size, format);
        buffer.fill(pixel);
        buffer
    }

    /// Wraps raw bytes. Returns `None` if `pixels` is not exactly `width * height * 4` bytes.
    pub fn from_bytes(size: Vector2I, format: PixelFormat, pixels: Vec<u8>)
                      -> Option<PixelBuffer> {
        if pixels.len() != byte_length(size) {
            return None;
        }
        Some(PixelBuffer { size, format, pixels })
    }

    /// A buffer with no pixels.
    #[inline]
    pub fn null() -> PixelBuffer {
        PixelBuffer::new(Vector2I::new(0, 0), PixelFormat::NATIVE)
    }

    #[inline]
    pub fn size(&self) -> Vector2I {
        self.size
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.size.x()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.size.y()
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.width() < 1 || self.height() < 1
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.width().max(0) as usize * BYTES_PER_PIXEL
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }

    /// The bytes of the given memory row.
    pub fn scanline(&self, memory_row: i32) -> &[u8] {
        let start = memory_row as usize * self.stride();
        &self.pixels[start..(start + self.stride())]
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width() && y < self.height()
    }

    fn offset(&self, x: i32, y: i32) -> usize {
        debug_assert!(self.contains(x, y));
        let row = self.format.rows.memory_row(y, self.height()) as usize;
        row * self.stride() + x as usize * BYTES_PER_PIXEL
    }

    pub fn pixel(&self, x: i32, y: i32) -> Pixel {
        let offset = self.offset(x, y);
        self.format.channels.read(&self.pixels[offset..(offset + BYTES_PER_PIXEL)])
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, pixel: Pixel) {
        let offset = self.offset(x, y);
        self.format.channels.write(pixel, &mut self.pixels[offset..(offset + BYTES_PER_PIXEL)])
    }

    /// Composites `pixel` over the existing contents. Out-of-bounds writes are clipped.
    pub fn blend_pixel(&mut self, x: i32, y: i32, pixel: Pixel) {
        if !self.contains(x, y) {
            return;
        }
        let dest = self.pixel(x, y);
        self.set_pixel(x, y, pixel.over(dest));
    }

    pub fn fill(&mut self, pixel: Pixel) {
        let channels = self.format.channels;
        for chunk in self.pixels.chunks_mut(BYTES_PER_PIXEL) {
            channels.write(pixel, chunk);
        }
    }

    /// Copies `source` into this buffer upside down, with the source's top-left corner landing
    /// at the visual top-left of this buffer. Whatever does not fit is clipped; pixels outside the
    /// copied area are left alone.
    pub fn copy_mirrored_from(&mut self, source: &PixelBuffer) {
        let width = source.width().min(self.width());
        let height = source.height().min(self.height());
        for y in 0..height {
            let source_y = source.height() - 1 - y;
            for x in 0..width {
                self.set_pixel(x, y, source.pixel(x, source_y));
            }
        }
    }

    /// Exchanges bytes 0 and 2 of every pixel in place. The descriptor is updated to match, so
    /// `pixel()` keeps returning the same logical colors.
    pub fn swap_red_and_blue(&mut self) {
        for chunk in self.pixels.chunks_mut(BYTES_PER_PIXEL) {
            chunk.swap(0, 2);
        }
        self.format.channels = self.format.channels.red_blue_swapped();
    }

    /// Reinterprets the memory rows as running in the opposite direction without moving any
    /// bytes. Useful after a mirrored copy.
    pub fn reinterpret_rows(&mut self, rows: RowOrder) {
        self.format.rows = rows;
    }

    /// Copies the buffer into a new one with a different layout.
    pub fn convert(&self, format: PixelFormat) -> PixelBuffer {
        if format == self.format {
            return self.clone();
        }
        let mut dest = PixelBuffer::new(self.size, format);
        for y in 0..self.height() {
            for x in 0..self.width() {
                dest.set_pixel(x, y, self.pixel(x, y));
            }
        }
        dest
    }

    /// Returns every pixel as RGBA records, bottom row first.
    pub fn to_bottom_up_pixels(&self) -> Vec<Pixel> {
        let mut pixels = Vec::with_capacity((self.width().max(0) * self.height().max(0)) as usize);
        for y in (0..self.height()).rev() {
            for x in 0..self.width() {
                pixels.push(self.pixel(x, y));
            }
        }
        pixels
    }
}

impl Default for PixelBuffer {
    #[inline]
    fn default() -> PixelBuffer {
        PixelBuffer::null()
    }
}

fn byte_length(size: Vector2I) -> usize {
    if size.x() < 1 || size.y() < 1 {
        return 0;
    }
    size.x() as usize * size.y() as usize * BYTES_PER_PIXEL
}
