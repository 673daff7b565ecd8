// cartograph/gl/src/lib.rs
//
// Copyright © 2019 The Cartograph Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! An OpenGL implementation of the device abstraction.
//!
//! The GL function pointers are global: load them with `gl::load_with()` on the thread that owns
//! the context before using a `GLDevice`, and only use it from that thread.

use cartograph_gpu::{Device, HostContext, TextureFilter, TextureFormat, TextureHandle};
use cartograph_gpu::{TextureParameter, TextureTarget, TextureWrap};
use gl::types::{GLenum, GLint, GLsizei, GLuint, GLvoid};
use log::{trace, warn};
use pathfinder_geometry::vector::Vector2I;


pub struct GLDevice;

impl GLDevice {
    #[inline]
    pub fn new() -> GLDevice {
        GLDevice
    }
}

impl Default for GLDevice {
    #[inline]
    fn default() -> GLDevice {
        GLDevice::new()
    }
}

impl HostContext for GLDevice {
    /// True once the texture entry points have been loaded.
    fn initialized(&self) -> bool {
        gl::GenTextures::is_loaded() &&
            gl::BindTexture::is_loaded() &&
            gl::TexImage2D::is_loaded() &&
            gl::GenerateMipmap::is_loaded()
    }
}

impl Device for GLDevice {
    fn gen_texture(&self) -> TextureHandle {
        let mut gl_texture: GLuint = 0;
        unsafe {
            gl::GenTextures(1, &mut gl_texture);
        }
        ck();
        trace!("glGenTextures() -> {}", gl_texture);
        TextureHandle(gl_texture)
    }

    fn bind_texture(&self, target: TextureTarget, texture: TextureHandle) {
        unsafe {
            gl::BindTexture(target.to_gl_target(), texture.0);
        }
        ck();
    }

    fn upload_to_texture(&self,
                         target: TextureTarget,
                         format: TextureFormat,
                         size: Vector2I,
                         data: &[u8]) {
        if data.len() < size.x().max(0) as usize * size.y().max(0) as usize * 4 {
            warn!("upload_to_texture(): {} bytes is too small for a {}x{} RGBA image",
                  data.len(),
                  size.x(),
                  size.y());
            return;
        }

        unsafe {
            gl::TexImage2D(target.to_gl_target(),
                           0,
                           format.gl_internal_format(),
                           size.x() as GLsizei,
                           size.y() as GLsizei,
                           0,
                           gl::RGBA,
                           gl::UNSIGNED_BYTE,
                           data.as_ptr() as *const GLvoid);
        }
        ck();
    }

    fn set_texture_parameter(&self, target: TextureTarget, parameter: TextureParameter) {
        let (name, value) = parameter.to_gl_parameter();
        unsafe {
            gl::TexParameteri(target.to_gl_target(), name, value);
        }
        ck();
    }

    fn generate_mipmap(&self, target: TextureTarget) {
        unsafe {
            gl::GenerateMipmap(target.to_gl_target());
        }
        ck();
    }

    fn delete_texture(&self, texture: TextureHandle) {
        if texture.is_none() {
            return;
        }
        unsafe {
            gl::DeleteTextures(1, &texture.0);
        }
        ck();
    }
}

trait TextureTargetExt {
    fn to_gl_target(self) -> GLenum;
}

impl TextureTargetExt for TextureTarget {
    #[inline]
    fn to_gl_target(self) -> GLenum {
        match self {
            TextureTarget::Texture2D => gl::TEXTURE_2D,
        }
    }
}

trait TextureFormatExt {
    fn gl_internal_format(self) -> GLint;
}

impl TextureFormatExt for TextureFormat {
    fn gl_internal_format(self) -> GLint {
        match self {
            TextureFormat::R8 => gl::R8 as GLint,
            TextureFormat::RGB8 => gl::RGB as GLint,
            TextureFormat::RGBA8 => gl::RGBA as GLint,
        }
    }
}

trait TextureFilterExt {
    fn to_gl_filter(self) -> GLint;
}

impl TextureFilterExt for TextureFilter {
    fn to_gl_filter(self) -> GLint {
        let filter = match self {
            TextureFilter::Nearest => gl::NEAREST,
            TextureFilter::Linear => gl::LINEAR,
            TextureFilter::NearestMipmapNearest => gl::NEAREST_MIPMAP_NEAREST,
            TextureFilter::LinearMipmapNearest => gl::LINEAR_MIPMAP_NEAREST,
            TextureFilter::NearestMipmapLinear => gl::NEAREST_MIPMAP_LINEAR,
            TextureFilter::LinearMipmapLinear => gl::LINEAR_MIPMAP_LINEAR,
        };
        filter as GLint
    }
}

trait TextureWrapExt {
    fn to_gl_wrap(self) -> GLint;
}

impl TextureWrapExt for TextureWrap {
    fn to_gl_wrap(self) -> GLint {
        let wrap = match self {
            TextureWrap::ClampToEdge => gl::CLAMP_TO_EDGE,
            TextureWrap::Repeat => gl::REPEAT,
            TextureWrap::MirroredRepeat => gl::MIRRORED_REPEAT,
        };
        wrap as GLint
    }
}

trait TextureParameterExt {
    fn to_gl_parameter(self) -> (GLenum, GLint);
}

impl TextureParameterExt for TextureParameter {
    fn to_gl_parameter(self) -> (GLenum, GLint) {
        match self {
            TextureParameter::MagFilter(filter) => (gl::TEXTURE_MAG_FILTER, filter.to_gl_filter()),
            TextureParameter::MinFilter(filter) => (gl::TEXTURE_MIN_FILTER, filter.to_gl_filter()),
            TextureParameter::WrapS(wrap) => (gl::TEXTURE_WRAP_S, wrap.to_gl_wrap()),
            TextureParameter::WrapT(wrap) => (gl::TEXTURE_WRAP_T, wrap.to_gl_wrap()),
        }
    }
}

// Error checking

#[cfg(debug_assertions)]
fn ck() {
    unsafe {
        // Only the first pending error is reported.
        let err = gl::GetError();
        if err != gl::NO_ERROR {
            warn!("GL error: 0x{:x} ({})", err, gl_error_name(err));
        }
    }
}

#[cfg(not(debug_assertions))]
fn ck() {}

#[cfg_attr(not(debug_assertions), allow(dead_code))]
fn gl_error_name(err: GLenum) -> &'static str {
    match err {
        gl::INVALID_ENUM => "INVALID_ENUM",
        gl::INVALID_VALUE => "INVALID_VALUE",
        gl::INVALID_OPERATION => "INVALID_OPERATION",
        gl::INVALID_FRAMEBUFFER_OPERATION => "INVALID_FRAMEBUFFER_OPERATION",
        gl::OUT_OF_MEMORY => "OUT_OF_MEMORY",
        gl::STACK_UNDERFLOW => "STACK_UNDERFLOW",
        gl::STACK_OVERFLOW => "STACK_OVERFLOW",
        _ => "Unknown",
    }
}
