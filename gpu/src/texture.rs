// cartograph/gpu/src/texture.rs
//
// Copyright © 2019 The Cartograph Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Textures as the map engine sees them, and an implementation backed by an in-memory image.

use crate::error::TextureError;
use crate::{Device, HostContext, TextureFilter, TextureFormat, TextureHandle, TextureParameter};
use crate::{TextureTarget, TextureWrap};
use cartograph_color::{power_of_two, ChannelOrder, PixelBuffer, PixelFormat, RowOrder};
use log::{debug, warn};
use pathfinder_geometry::vector::{Vector2F, Vector2I};
use std::backtrace::Backtrace;
use std::borrow::Cow;
use std::rc::Rc;

pub type ImageChangedListener = Box<dyn FnMut()>;

/// Something the map engine can turn into a GPU texture.
pub trait Texture {
    /// True once there is image data worth uploading.
    fn image_ready(&self) -> bool;

    /// Creates a new GPU texture from the current image and returns its handle, or
    /// `TextureHandle::NONE` if there is nothing to upload or the upload was refused.
    ///
    /// The caller owns the returned texture.
    fn bind_texture(&self, device: &dyn Device) -> TextureHandle;

    /// The fraction of the texture, in each dimension, covered by the image.
    fn texture_dims(&self) -> Vector2F;

    /// The size of the stored (padded) image in pixels.
    fn image_dims(&self) -> Vector2F;

    fn mag_filter(&self) -> TextureFilter;
    fn min_filter(&self) -> TextureFilter;
    fn set_mag_filter(&mut self, filter: TextureFilter);
    fn set_min_filter(&mut self, filter: TextureFilter);

    fn delete_texture(&self, device: &dyn Device, texture: TextureHandle) {
        if !texture.is_none() {
            device.delete_texture(texture);
        }
    }
}

/// Sampling options applied to every texture created from an `ImageTexture`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct TextureOptions {
    pub mag_filter: TextureFilter,
    pub min_filter: TextureFilter,
}

/// A texture whose contents come from an arbitrary-size RGBA image.
///
/// The image is padded up to power-of-two dimensions, flipped so that its first memory row is the
/// bottom of the picture, and stored with RGBA byte order, ready to hand to the driver as is.
pub struct ImageTexture {
    context: Rc<dyn HostContext>,
    options: TextureOptions,
    image: PixelBuffer,
    image_ready: bool,
    fw: f32,
    fh: f32,
    listeners: Vec<ImageChangedListener>,
}

impl ImageTexture {
    #[inline]
    pub fn new(context: Rc<dyn HostContext>) -> ImageTexture {
        ImageTexture::with_options(context, TextureOptions::default())
    }

    pub fn with_options(context: Rc<dyn HostContext>, options: TextureOptions) -> ImageTexture {
        ImageTexture {
            context,
            options,
            image: PixelBuffer::null(),
            image_ready: false,
            fw: 1.0,
            fh: 1.0,
            listeners: vec![],
        }
    }

    /// Registers a callback that runs after every `set_image()`.
    pub fn on_image_changed<F>(&mut self, listener: F) where F: FnMut() + 'static {
        self.listeners.push(Box::new(listener));
    }

    /// Replaces the stored image.
    ///
    /// A null source clears the texture. Listeners are notified either way.
    pub fn set_image(&mut self, source: &PixelBuffer) {
        self.image_ready = !source.is_null();

        if !self.image_ready {
            self.image = PixelBuffer::null();
            self.fw = 1.0;
            self.fh = 1.0;
        } else {
            let size = source.size();
            let padded_size = Vector2I::new(power_of_two(size.x()), power_of_two(size.y()));

            let mut image = PixelBuffer::new(padded_size, PixelFormat::NATIVE);
            image.copy_mirrored_from(source);
            image.swap_red_and_blue();
            // The mirrored copy put the source's top row last in memory.
            image.reinterpret_rows(RowOrder::BottomUp);

            self.fw = size.x() as f32 / padded_size.x() as f32;
            self.fh = size.y() as f32 / padded_size.y() as f32;
            self.image = image;

            debug!("set_image(): {}x{} padded to {}x{}",
                   size.x(),
                   size.y(),
                   padded_size.x(),
                   padded_size.y());
        }

        self.image_changed();
    }

    /// The padded RGBA image that `bind_texture()` uploads.
    #[inline]
    pub fn image(&self) -> &PixelBuffer {
        &self.image
    }

    #[inline]
    pub fn options(&self) -> TextureOptions {
        self.options
    }

    /// Uploads `image` into a freshly generated texture.
    ///
    /// On failure a warning with a backtrace is logged and `TextureHandle::NONE` is returned.
    pub fn bind_image(&self,
                      device: &dyn Device,
                      image: &PixelBuffer,
                      target: TextureTarget,
                      format: TextureFormat,
                      mag_filter: TextureFilter,
                      min_filter: TextureFilter)
                      -> TextureHandle {
        match self.try_bind_image(device, image, target, format, mag_filter, min_filter) {
            Ok(texture) => texture,
            Err(error) => {
                warn!("Error! {}.\n{}", error, Backtrace::force_capture());
                TextureHandle::NONE
            }
        }
    }

    /// Like `bind_image()`, but reports failures to the caller instead of logging them.
    ///
    /// Nothing is sent to the device unless the upload is going to happen.
    pub fn try_bind_image(&self,
                          device: &dyn Device,
                          image: &PixelBuffer,
                          target: TextureTarget,
                          format: TextureFormat,
                          mag_filter: TextureFilter,
                          min_filter: TextureFilter)
                          -> Result<TextureHandle, TextureError> {
        if !self.context.initialized() {
            return Err(TextureError::UninitializedContext);
        }
        if image.is_null() {
            return Err(TextureError::InvalidImage);
        }

        // The driver is told the data is RGBA; anything else gets reordered first.
        let data = match image.format().channels {
            ChannelOrder::Rgba => Cow::Borrowed(image),
            ChannelOrder::Bgra => {
                let rgba = PixelFormat::new(ChannelOrder::Rgba, image.format().rows);
                Cow::Owned(image.convert(rgba))
            }
        };

        let texture = device.gen_texture();
        device.bind_texture(target, texture);
        device.upload_to_texture(target, format, data.size(), data.bytes());

        device.set_texture_parameter(target, TextureParameter::MagFilter(mag_filter));
        device.set_texture_parameter(target, TextureParameter::MinFilter(min_filter));
        device.set_texture_parameter(target, TextureParameter::WrapS(TextureWrap::ClampToEdge));
        device.set_texture_parameter(target, TextureParameter::WrapT(TextureWrap::ClampToEdge));

        if min_filter.generates_mipmaps() {
            device.generate_mipmap(target);
        }

        debug!("uploaded {}x{} image as texture {}", data.width(), data.height(), texture.0);
        Ok(texture)
    }

    fn image_changed(&mut self) {
        for listener in &mut self.listeners {
            listener();
        }
    }
}

impl Texture for ImageTexture {
    #[inline]
    fn image_ready(&self) -> bool {
        self.image_ready
    }

    fn bind_texture(&self, device: &dyn Device) -> TextureHandle {
        if !self.image_ready {
            return TextureHandle::NONE;
        }

        self.bind_image(device,
                        &self.image,
                        TextureTarget::Texture2D,
                        TextureFormat::RGBA8,
                        self.options.mag_filter,
                        self.options.min_filter)
    }

    #[inline]
    fn texture_dims(&self) -> Vector2F {
        Vector2F::new(self.fw, self.fh)
    }

    #[inline]
    fn image_dims(&self) -> Vector2F {
        self.image.size().to_f32()
    }

    #[inline]
    fn mag_filter(&self) -> TextureFilter {
        self.options.mag_filter
    }

    #[inline]
    fn min_filter(&self) -> TextureFilter {
        self.options.min_filter
    }

    #[inline]
    fn set_mag_filter(&mut self, filter: TextureFilter) {
        self.options.mag_filter = filter;
    }

    #[inline]
    fn set_min_filter(&mut self, filter: TextureFilter) {
        self.options.min_filter = filter;
    }
}
