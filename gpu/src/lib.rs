// cartograph/gpu/src/lib.rs
//
// Copyright © 2019 The Cartograph Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Minimal abstractions over GPU texture objects.
//!
//! The map engine only ever needs a handful of texture calls. They are collected in the `Device`
//! trait so that the texture adapters can be written once and driven by OpenGL (see
//! `cartograph_gl`) or by any other backend.

use pathfinder_geometry::vector::Vector2I;
use std::cell::Cell;

pub use crate::error::TextureError;
pub use crate::texture::{ImageTexture, ImageChangedListener, Texture, TextureOptions};

mod error;
mod texture;

#[cfg(test)]
mod tests;

/// The host that owns the graphics context.
///
/// Texture uploads are refused until the host reports that its context is ready.
pub trait HostContext {
    fn initialized(&self) -> bool;
}

pub trait Device {
    fn gen_texture(&self) -> TextureHandle;
    fn bind_texture(&self, target: TextureTarget, texture: TextureHandle);
    /// Uploads 8-bit-per-channel RGBA data as the base mip level of the bound texture.
    fn upload_to_texture(&self,
                         target: TextureTarget,
                         format: TextureFormat,
                         size: Vector2I,
                         data: &[u8]);
    fn set_texture_parameter(&self, target: TextureTarget, parameter: TextureParameter);
    fn generate_mipmap(&self, target: TextureTarget);
    fn delete_texture(&self, texture: TextureHandle);
}

/// A GPU texture name. Zero never names a texture and is returned when nothing was created.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
pub struct TextureHandle(pub u32);

impl TextureHandle {
    pub const NONE: TextureHandle = TextureHandle(0);

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TextureTarget {
    Texture2D,
}

/// The internal format the driver stores the texture in.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TextureFormat {
    R8,
    RGB8,
    RGBA8,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TextureFilter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapLinear,
}

impl TextureFilter {
    /// Whether selecting this minification filter triggers mipmap generation on upload.
    ///
    /// Only the two "pure" mipmap filters do; the mixed ones sample level 0 until the engine
    /// provides its own levels.
    #[inline]
    pub fn generates_mipmaps(self) -> bool {
        match self {
            TextureFilter::NearestMipmapNearest | TextureFilter::LinearMipmapLinear => true,
            TextureFilter::Nearest |
            TextureFilter::Linear |
            TextureFilter::LinearMipmapNearest |
            TextureFilter::NearestMipmapLinear => false,
        }
    }
}

impl Default for TextureFilter {
    #[inline]
    fn default() -> TextureFilter {
        TextureFilter::Linear
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TextureWrap {
    ClampToEdge,
    Repeat,
    MirroredRepeat,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TextureParameter {
    MagFilter(TextureFilter),
    MinFilter(TextureFilter),
    WrapS(TextureWrap),
    WrapT(TextureWrap),
}

/// A `HostContext` for hosts that track context readiness themselves.
#[derive(Debug, Default)]
pub struct ContextState {
    initialized: Cell<bool>,
}

impl ContextState {
    #[inline]
    pub fn new() -> ContextState {
        ContextState::default()
    }

    #[inline]
    pub fn initialized_now() -> ContextState {
        let state = ContextState::new();
        state.set_initialized(true);
        state
    }

    #[inline]
    pub fn set_initialized(&self, initialized: bool) {
        self.initialized.set(initialized)
    }
}

impl HostContext for ContextState {
    #[inline]
    fn initialized(&self) -> bool {
        self.initialized.get()
    }
}
